//! The flat configuration record handed to the build driver.

use std::path::PathBuf;

use serde::{Deserialize, Serialize};

use crate::device::DeviceProfile;
use crate::error::Result;
use crate::flags::{compose, FlagSet};
use crate::identity::ToolchainIdentity;
use crate::mode::BuildMode;
use crate::resolve::{EnvironmentOverrides, ToolNames, ToolchainProfile};

/// Tool paths, flag strings and post-link actions for one build.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub struct BuildConfiguration {
    /// Architecture family (e.g., "arm").
    pub arch: String,
    pub cpu: String,
    pub toolchain: ToolchainIdentity,
    /// Platform name reported to the build driver ("gcc" or "armclang").
    pub platform: String,
    pub mode: BuildMode,
    pub exec_path: PathBuf,
    pub tools: ToolNames<String>,
    pub target_ext: String,
    pub flags: FlagSet,
    /// Extra include search path.
    #[serde(default)]
    pub cpath: String,
    /// Extra library search path.
    #[serde(default)]
    pub lpath: String,
    /// RT-Thread root, if one was given.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub root: Option<PathBuf>,
}

impl BuildConfiguration {
    /// Resolve and compose everything from explicit overrides.
    pub fn resolve(overrides: &EnvironmentOverrides, mode: BuildMode) -> Result<Self> {
        let profile = overrides.resolve()?;
        Ok(Self::from_profile(profile, mode, overrides.root.clone()))
    }

    /// Compose the configuration for an already-resolved profile.
    pub fn from_profile(profile: ToolchainProfile, mode: BuildMode, root: Option<PathBuf>) -> Self {
        let device = DeviceProfile::CORTEX_M55;
        let flags = compose(&profile, mode);
        Self {
            arch: device.arch.into(),
            cpu: device.cpu.into(),
            toolchain: profile.identity,
            platform: profile.identity.platform().into(),
            mode,
            exec_path: profile.exec_path,
            tools: profile.tools,
            target_ext: profile.target_ext,
            flags,
            cpath: String::new(),
            lpath: String::new(),
            root,
        }
    }

    /// The configuration as `(NAME, value)` pairs using the conventional
    /// build-driver variable names. Module variables are present only when
    /// the toolchain supports loadable modules.
    pub fn variables(&self) -> Vec<(&'static str, String)> {
        let mut vars = vec![
            ("ARCH", self.arch.clone()),
            ("CPU", self.cpu.clone()),
            ("PLATFORM", self.platform.clone()),
            ("BUILD", self.mode.to_string()),
            ("EXEC_PATH", self.exec_path.display().to_string()),
        ];
        vars.extend(
            self.tools
                .iter()
                .map(|(tool, name)| (tool.var_name(), name.clone())),
        );
        vars.push(("TARGET_EXT", self.target_ext.clone()));
        vars.push(("CFLAGS", self.flags.compile.clone()));
        vars.push(("AFLAGS", self.flags.assemble.clone()));
        vars.push(("LFLAGS", self.flags.link.clone()));
        vars.push(("CXXFLAGS", self.flags.cxx.clone()));
        if let Some(module) = &self.flags.module {
            vars.push(("M_CFLAGS", module.compile.clone()));
            vars.push(("M_CXXFLAGS", module.cxx.clone()));
            vars.push(("M_LFLAGS", module.link.clone()));
            vars.push(("M_POST_ACTION", module.post_action.script()));
        }
        vars.push(("CPATH", self.cpath.clone()));
        vars.push(("LPATH", self.lpath.clone()));
        vars.push(("POST_ACTION", self.flags.post_action.script()));
        if let Some(root) = &self.root {
            vars.push(("RTT_ROOT", root.display().to_string()));
        }
        vars
    }

    /// Render as POSIX shell assignments, one per line.
    pub fn to_env(&self) -> String {
        self.variables()
            .into_iter()
            .map(|(name, value)| format!("{name}={}\n", shell_quote(&value)))
            .collect()
    }

    pub fn to_toml(&self) -> Result<String> {
        Ok(toml::to_string_pretty(self)?)
    }

    pub fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }
}

/// Single-quote `value` for a POSIX shell.
fn shell_quote(value: &str) -> String {
    format!("'{}'", value.replace('\'', r"'\''"))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn gnu_release() -> BuildConfiguration {
        BuildConfiguration::resolve(&EnvironmentOverrides::default(), BuildMode::Release).unwrap()
    }

    fn lookup<'a>(vars: &'a [(&str, String)], name: &str) -> Option<&'a str> {
        vars.iter()
            .find(|(n, _)| *n == name)
            .map(|(_, v)| v.as_str())
    }

    #[test]
    fn default_configuration() {
        let cfg = gnu_release();
        assert_eq!(cfg.arch, "arm");
        assert_eq!(cfg.cpu, "cortex-m55");
        assert_eq!(cfg.platform, "gcc");
        assert_eq!(cfg.toolchain, ToolchainIdentity::GnuEabi);
        assert_eq!(cfg.target_ext, "elf");
        assert!(cfg.cpath.is_empty());
        assert!(cfg.lpath.is_empty());
        assert!(cfg.root.is_none());
    }

    #[test]
    fn unknown_toolchain_produces_no_configuration() {
        let overrides = EnvironmentOverrides {
            toolchain: Some("sdcc".into()),
            ..Default::default()
        };
        assert!(BuildConfiguration::resolve(&overrides, BuildMode::Debug).is_err());
    }

    #[test]
    fn gnu_variables() {
        let vars = gnu_release().variables();
        assert_eq!(lookup(&vars, "CC"), Some("arm-none-eabi-gcc"));
        assert_eq!(lookup(&vars, "OBJCPY"), Some("arm-none-eabi-objcopy"));
        assert_eq!(lookup(&vars, "BUILD"), Some("release"));
        assert!(lookup(&vars, "M_CFLAGS").is_some());
        assert_eq!(
            lookup(&vars, "M_POST_ACTION"),
            Some("arm-none-eabi-strip -R .hash $TARGET\narm-none-eabi-size $TARGET\n")
        );
        assert!(lookup(&vars, "RTT_ROOT").is_none());
    }

    #[test]
    fn vendor_variables_have_no_module_entries() {
        let overrides = EnvironmentOverrides {
            toolchain: Some("keil".into()),
            root: Some(PathBuf::from("/src/rt-thread")),
            ..Default::default()
        };
        let cfg = BuildConfiguration::resolve(&overrides, BuildMode::Debug).unwrap();
        let vars = cfg.variables();
        assert_eq!(lookup(&vars, "PLATFORM"), Some("armclang"));
        assert_eq!(lookup(&vars, "LINK"), Some("armlink"));
        assert!(lookup(&vars, "M_CFLAGS").is_none());
        assert_eq!(lookup(&vars, "RTT_ROOT"), Some("/src/rt-thread"));
    }

    #[test]
    fn env_rendering_quotes_values() {
        let env = gnu_release().to_env();
        assert!(env.contains("CC='arm-none-eabi-gcc'\n"));
        assert!(env.contains("TARGET_EXT='elf'\n"));
        assert!(env.contains("CPATH=''\n"));
        assert_eq!(shell_quote("it's"), r"'it'\''s'");
    }

    #[test]
    fn json_round_trip() {
        let cfg = gnu_release();
        let json = cfg.to_json().unwrap();
        let parsed: BuildConfiguration = serde_json::from_str(&json).unwrap();
        assert_eq!(parsed, cfg);
        assert!(json.contains("\"toolchain\": \"gcc\""));
    }

    #[test]
    fn toml_output_names_fields() {
        let toml_str = gnu_release().to_toml().unwrap();
        assert!(toml_str.contains("platform = \"gcc\""));
        assert!(toml_str.contains("target-ext = \"elf\""));
        let parsed: BuildConfiguration = toml::from_str(&toml_str).unwrap();
        assert_eq!(parsed, gnu_release());
    }
}
