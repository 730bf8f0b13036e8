//! Toolchain resolution and flag composition for the M55M1 board support package.
//!
//! Resolving a build configuration is a one-way pipeline:
//! - **Overrides:** optional toolchain name, root path and install path
//!   ([`EnvironmentOverrides`]), read once from the process environment or
//!   supplied explicitly.
//! - **Resolution:** the overrides select one [`ToolchainIdentity`] and its
//!   install path, yielding a [`ToolchainProfile`] with every tool name.
//! - **Composition:** the profile and a [`BuildMode`] are combined with the
//!   constant [`DeviceProfile`] into a [`FlagSet`].
//!
//! [`BuildConfiguration`] bundles the result into the flat record consumed
//! by the external build driver.

pub mod config;
pub mod device;
pub mod error;
pub mod flags;
pub mod identity;
pub mod mode;
pub mod resolve;
pub mod rules;

pub use config::BuildConfiguration;
pub use device::DeviceProfile;
pub use error::{ConfigError, Result};
pub use flags::{compose, FlagSet, ModuleFlags, PostAction, TARGET_PLACEHOLDER};
pub use identity::ToolchainIdentity;
pub use mode::BuildMode;
pub use resolve::{
    resolve, resolve_identity, EnvironmentOverrides, Tool, ToolNames, ToolchainProfile,
    ENV_EXEC_PATH, ENV_ROOT, ENV_TOOLCHAIN,
};
pub use rules::{ActionTemplate, ModeFragments, ModuleRules, ToolNaming, ToolchainRules};
