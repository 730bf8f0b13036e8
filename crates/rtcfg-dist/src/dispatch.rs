//! Locating the packaging tools and invoking the packager.

use std::path::{Path, PathBuf};

use crate::error::{DistError, Result};

/// Name of the directory, beside the board-support tree, holding packaging tools.
pub const TOOLS_DIR_NAME: &str = "tools";

/// Everything a packager needs for one run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DistRequest {
    /// Root of the board-support tree to package.
    pub bsp_root: PathBuf,
    /// Where the distributable copy is written.
    pub dist_dir: PathBuf,
    /// The located `tools` directory.
    pub tools_dir: PathBuf,
}

/// The external routine that materializes a distributable tree.
pub trait Packager {
    fn package(&self, request: &DistRequest) -> Result<()>;
}

impl<F> Packager for F
where
    F: Fn(&DistRequest) -> Result<()>,
{
    fn package(&self, request: &DistRequest) -> Result<()> {
        self(request)
    }
}

/// The `tools` directory shared by all boards: `<parent of bsp_root>/tools`.
pub fn tools_dir(bsp_root: &Path) -> Result<PathBuf> {
    let parent = bsp_root.parent().unwrap_or_else(|| Path::new(""));
    let dir = parent.join(TOOLS_DIR_NAME);
    if !dir.is_dir() {
        return Err(DistError::ToolsDirNotFound { path: dir });
    }
    Ok(dir)
}

/// Package `bsp_root` into `dist_dir` with `packager`.
///
/// Errors from locating the tools or from the packager itself are returned
/// unchanged; nothing is retried.
pub fn dispatch(bsp_root: &Path, dist_dir: &Path, packager: &dyn Packager) -> Result<()> {
    let request = DistRequest {
        bsp_root: bsp_root.to_path_buf(),
        dist_dir: dist_dir.to_path_buf(),
        tools_dir: tools_dir(bsp_root)?,
    };
    log::debug!(
        "packaging {} into {} (tools: {})",
        request.bsp_root.display(),
        request.dist_dir.display(),
        request.tools_dir.display()
    );
    packager.package(&request)
}
