//! `rtcfg dist` — package a distributable board-support tree.

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use rtcfg_dist::{dispatch, ScriptPackager};

/// Run the board's packaging script for `bsp_root`, writing into `output`.
pub fn run(bsp_root: &Path, output: &Path, interpreter: &str, root: Option<PathBuf>) -> Result<()> {
    let packager = ScriptPackager::default()
        .with_interpreter(interpreter)
        .with_rtt_root(root);
    dispatch(bsp_root, output, &packager)
        .with_context(|| format!("packaging {}", bsp_root.display()))?;
    println!("Packaged {} into {}", bsp_root.display(), output.display());
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn fails_without_tools_dir() {
        let dir = tempfile::tempdir().unwrap();
        let bsp = dir.path().join("m55m1");
        std::fs::create_dir_all(&bsp).unwrap();

        let err = run(&bsp, &dir.path().join("dist"), "python", None).unwrap_err();
        let message = format!("{err:#}");
        assert!(message.contains("packaging"));
        assert!(message.contains("tools directory not found"));
    }
}
