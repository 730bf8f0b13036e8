//! `rtconfig.toml` board manifest.
//!
//! Optional per-board defaults. Command-line flags and `RTT_*` environment
//! variables take precedence over anything set here.

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use rtcfg_toolchain::BuildMode;
use serde::{Deserialize, Serialize};

/// File name searched for, walking up from the working directory.
pub const MANIFEST_NAME: &str = "rtconfig.toml";

/// The top-level manifest structure.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct BspManifest {
    #[serde(default)]
    pub toolchain: Option<ToolchainConfig>,
    #[serde(default)]
    pub build: Option<BuildConfig>,
}

/// `[toolchain]` section.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case", deny_unknown_fields)]
pub struct ToolchainConfig {
    /// Toolchain name (gcc, keil).
    #[serde(default)]
    pub name: Option<String>,
    /// Toolchain install directory.
    #[serde(default)]
    pub exec_path: Option<String>,
}

/// `[build]` section.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case", deny_unknown_fields)]
pub struct BuildConfig {
    /// "release" or "debug".
    #[serde(default)]
    pub mode: Option<String>,
    /// RT-Thread root directory.
    #[serde(default)]
    pub root: Option<String>,
}

impl BspManifest {
    /// Search upward from `start_dir` for `rtconfig.toml`, parse and return it
    /// along with the directory it was found in.
    pub fn find_and_load(start_dir: &Path) -> Result<Option<(Self, PathBuf)>> {
        match Self::locate(start_dir) {
            Some(dir) => Ok(Some((Self::load(&dir)?, dir))),
            None => Ok(None),
        }
    }

    /// Directory holding the nearest `rtconfig.toml` at or above `start_dir`.
    /// Does not read the file.
    pub fn locate(start_dir: &Path) -> Option<PathBuf> {
        let mut dir = start_dir.to_path_buf();
        loop {
            if dir.join(MANIFEST_NAME).is_file() {
                return Some(dir);
            }
            if !dir.pop() {
                return None;
            }
        }
    }

    /// Read and parse `rtconfig.toml` in `dir`.
    pub fn load(dir: &Path) -> Result<Self> {
        let path = dir.join(MANIFEST_NAME);
        let content = std::fs::read_to_string(&path)
            .with_context(|| format!("reading {}", path.display()))?;
        let manifest = toml::from_str(&content)
            .with_context(|| format!("parsing {}", path.display()))?;
        log::debug!("loaded {}", path.display());
        Ok(manifest)
    }

    /// Parse a manifest from a TOML string.
    #[cfg(test)]
    pub fn from_str(s: &str) -> Result<Self> {
        toml::from_str(s).context("parsing rtconfig.toml")
    }

    pub fn toolchain(&self) -> Option<&str> {
        self.toolchain.as_ref().and_then(|t| t.name.as_deref())
    }

    pub fn exec_path(&self) -> Option<&str> {
        self.toolchain.as_ref().and_then(|t| t.exec_path.as_deref())
    }

    pub fn root(&self) -> Option<&str> {
        self.build.as_ref().and_then(|b| b.root.as_deref())
    }

    /// Build mode from the manifest, release when unset.
    pub fn build_mode(&self) -> Result<BuildMode> {
        match self.build.as_ref().and_then(|b| b.mode.as_deref()) {
            Some(mode) => mode
                .parse()
                .with_context(|| format!("{MANIFEST_NAME}: [build] mode")),
            None => Ok(BuildMode::default()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_full_manifest() {
        let toml_str = r#"
[toolchain]
name = "keil"
exec-path = 'D:\Keil_v5'

[build]
mode = "debug"
root = "../../.."
"#;
        let manifest = BspManifest::from_str(toml_str).unwrap();
        assert_eq!(manifest.toolchain(), Some("keil"));
        assert_eq!(manifest.exec_path(), Some(r"D:\Keil_v5"));
        assert_eq!(manifest.root(), Some("../../.."));
        assert_eq!(manifest.build_mode().unwrap(), BuildMode::Debug);
    }

    #[test]
    fn parse_empty_manifest() {
        let manifest = BspManifest::from_str("").unwrap();
        assert!(manifest.toolchain().is_none());
        assert!(manifest.exec_path().is_none());
        assert_eq!(manifest.build_mode().unwrap(), BuildMode::Release);
    }

    #[test]
    fn reject_unknown_keys() {
        assert!(BspManifest::from_str("[toolchain]\ncompiler = \"gcc\"\n").is_err());
    }

    #[test]
    fn reject_bad_mode() {
        let manifest = BspManifest::from_str("[build]\nmode = \"fast\"\n").unwrap();
        let err = manifest.build_mode().unwrap_err();
        assert!(format!("{err:#}").contains("unknown build mode"));
    }

    #[test]
    fn find_and_load_walks_up() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(dir.path().join(MANIFEST_NAME), "[toolchain]\nname = \"gcc\"\n").unwrap();

        let nested = dir.path().join("applications").join("sub");
        std::fs::create_dir_all(&nested).unwrap();

        let (manifest, found_dir) = BspManifest::find_and_load(&nested).unwrap().unwrap();
        assert_eq!(manifest.toolchain(), Some("gcc"));
        assert_eq!(found_dir, dir.path());
    }

    #[test]
    fn find_and_load_reports_parse_errors() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(dir.path().join(MANIFEST_NAME), "not valid [[[").unwrap();
        let err = BspManifest::find_and_load(dir.path()).unwrap_err();
        assert!(err.to_string().contains("parsing"));
        assert!(err.to_string().contains(MANIFEST_NAME));
    }

    #[test]
    fn locate_does_not_parse() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(dir.path().join(MANIFEST_NAME), "not valid [[[").unwrap();
        let nested = dir.path().join("board");
        std::fs::create_dir_all(&nested).unwrap();
        assert_eq!(BspManifest::locate(&nested).as_deref(), Some(dir.path()));
    }
}
