//! Flag composition.
//!
//! Every flag string is built by concatenating, in order, the device fragment,
//! the category fragment and the build-mode fragment from the toolchain's
//! [`ToolchainRules`]. Fragments carry their own separating whitespace, so the
//! result is reproduced byte for byte on every call.

use serde::{Deserialize, Serialize};

use crate::device::DeviceProfile;
use crate::mode::BuildMode;
use crate::resolve::ToolchainProfile;
use crate::rules::{ActionTemplate, ToolchainRules};

/// Placeholder the build driver replaces with the linked artifact.
pub const TARGET_PLACEHOLDER: &str = "$TARGET";

/// Commands run, in order, after a successful link.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PostAction {
    pub commands: Vec<String>,
}

impl PostAction {
    fn from_templates(profile: &ToolchainProfile, templates: &[ActionTemplate]) -> Self {
        Self {
            commands: templates
                .iter()
                .map(|t| format!("{} {}", profile.tool(t.tool), t.args))
                .collect(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.commands.is_empty()
    }

    /// Render as a shell script, one command per line.
    pub fn script(&self) -> String {
        self.commands.iter().map(|c| format!("{c}\n")).collect()
    }

    /// Commands with `$TARGET` replaced by `target`.
    pub fn for_target(&self, target: &str) -> Vec<String> {
        self.commands
            .iter()
            .map(|c| c.replace(TARGET_PLACEHOLDER, target))
            .collect()
    }
}

/// Flags for position-independent loadable modules.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub struct ModuleFlags {
    pub compile: String,
    pub cxx: String,
    pub link: String,
    pub post_action: PostAction,
}

/// Complete flag set for one toolchain and build mode.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub struct FlagSet {
    pub compile: String,
    pub assemble: String,
    pub link: String,
    pub cxx: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub module: Option<ModuleFlags>,
    pub post_action: PostAction,
}

/// Compose flags for the M55M1 device.
pub fn compose(profile: &ToolchainProfile, mode: BuildMode) -> FlagSet {
    compose_for_device(profile, mode, &DeviceProfile::CORTEX_M55)
}

/// Compose flags for an arbitrary device description.
pub(crate) fn compose_for_device(
    profile: &ToolchainProfile,
    mode: BuildMode,
    device: &DeviceProfile,
) -> FlagSet {
    let rules: &ToolchainRules = profile.rules();
    let device_flags = (rules.device_flags)(device);
    let fragments = match mode {
        BuildMode::Release => rules.release,
        BuildMode::Debug => rules.debug,
    };

    let base_compile = format!("{device_flags}{}", rules.compile);
    let base_cxx = format!("{device_flags}{}", rules.cxx);

    // Module flags derive from the mode-independent compile and C++ flags.
    let module = rules.module.map(|m| ModuleFlags {
        compile: format!("{base_compile}{}", m.compile),
        cxx: format!("{base_cxx}{}", m.cxx),
        link: format!("{device_flags}{base_cxx}{}", m.link),
        post_action: PostAction::from_templates(profile, m.post_action),
    });

    let compile = format!("{base_compile}{}", fragments.compile);
    let assemble = format!(
        "{}{device_flags}{}{}",
        rules.assemble_lead, rules.assemble, fragments.assemble
    );
    let link = format!("{device_flags}{}", rules.link);

    log::debug!("composed {} {mode} flags", profile.identity);

    FlagSet {
        cxx: compile.clone(),
        compile,
        assemble,
        link,
        module,
        post_action: PostAction::from_templates(profile, rules.post_action),
    }
}
