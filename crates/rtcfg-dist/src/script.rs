//! Packager backed by the board-support `sdk_dist` script.

use std::ffi::OsString;
use std::path::{Path, PathBuf};
use std::process::Command;

use rtcfg_toolchain::ENV_ROOT;

use crate::dispatch::{DistRequest, Packager};
use crate::error::{DistError, Result};

/// Script expected in the tools directory.
pub const DEFAULT_ENTRY_POINT: &str = "sdk_dist.py";
/// Program used to run the entry point.
pub const DEFAULT_INTERPRETER: &str = "python";

/// Runs `<interpreter> <tools>/<entry_point> <bsp_root> <dist_dir>`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ScriptPackager {
    pub interpreter: OsString,
    pub entry_point: String,
    /// Exported to the script as `RTT_ROOT` when set.
    pub rtt_root: Option<PathBuf>,
}

impl Default for ScriptPackager {
    fn default() -> Self {
        Self {
            interpreter: DEFAULT_INTERPRETER.into(),
            entry_point: DEFAULT_ENTRY_POINT.into(),
            rtt_root: None,
        }
    }
}

impl ScriptPackager {
    pub fn with_interpreter(mut self, interpreter: impl Into<OsString>) -> Self {
        self.interpreter = interpreter.into();
        self
    }

    pub fn with_rtt_root(mut self, root: Option<PathBuf>) -> Self {
        self.rtt_root = root;
        self
    }

    /// Path of the entry point inside `tools_dir`, if it exists.
    pub fn entry_point_in(&self, tools_dir: &Path) -> Result<PathBuf> {
        let path = tools_dir.join(&self.entry_point);
        if !path.is_file() {
            return Err(DistError::EntryPointNotFound { path });
        }
        Ok(path)
    }

    fn command(&self, script: &Path, request: &DistRequest) -> Command {
        let mut cmd = Command::new(&self.interpreter);
        cmd.arg(script).arg(&request.bsp_root).arg(&request.dist_dir);
        if let Some(root) = &self.rtt_root {
            cmd.env(ENV_ROOT, root);
        }
        cmd
    }
}

impl Packager for ScriptPackager {
    fn package(&self, request: &DistRequest) -> Result<()> {
        let script = self.entry_point_in(&request.tools_dir)?;
        let mut cmd = self.command(&script, request);
        log::info!("running {cmd:?}");

        let status = cmd.status()?;
        if !status.success() {
            return Err(DistError::PackagerFailed {
                command: format!("{cmd:?}"),
                status,
            });
        }
        Ok(())
    }
}
