//! Toolchain resolution.
//!
//! Turns an optional toolchain name and an optional install-path override into
//! a [`ToolchainProfile`]. The precedence is two-staged:
//!
//! 1. The toolchain override replaces the default identity, and the default
//!    install path is then taken from whichever identity won.
//! 2. The install-path override replaces that default unconditionally.
//!
//! A toolchain with an `exec_subdir` rule has it appended afterwards, to the
//! default and to an overridden path alike.

use std::ffi::OsString;
use std::fmt;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::error::Result;
use crate::identity::ToolchainIdentity;
use crate::rules::ToolchainRules;

/// Selects the toolchain (`gcc` or `keil`).
pub const ENV_TOOLCHAIN: &str = "RTT_CC";
/// Root of the RT-Thread source tree, passed on to packaging.
pub const ENV_ROOT: &str = "RTT_ROOT";
/// Install directory of the selected toolchain.
pub const ENV_EXEC_PATH: &str = "RTT_EXEC_PATH";

/// A tool invoked by the build driver.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Tool {
    Cc,
    Asm,
    Ar,
    Cxx,
    Link,
    Size,
    Objdump,
    Objcopy,
    Strip,
}

impl Tool {
    pub const ALL: [Self; 9] = [
        Self::Cc,
        Self::Asm,
        Self::Ar,
        Self::Cxx,
        Self::Link,
        Self::Size,
        Self::Objdump,
        Self::Objcopy,
        Self::Strip,
    ];

    /// Conventional build-driver variable holding this tool's command.
    pub fn var_name(self) -> &'static str {
        match self {
            Self::Cc => "CC",
            Self::Asm => "AS",
            Self::Ar => "AR",
            Self::Cxx => "CXX",
            Self::Link => "LINK",
            Self::Size => "SIZE",
            Self::Objdump => "OBJDUMP",
            Self::Objcopy => "OBJCPY",
            Self::Strip => "STRIP",
        }
    }
}

impl fmt::Display for Tool {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.var_name())
    }
}

/// One command name per [`Tool`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ToolNames<S> {
    pub cc: S,
    #[serde(rename = "as")]
    pub asm: S,
    pub ar: S,
    pub cxx: S,
    pub link: S,
    pub size: S,
    pub objdump: S,
    pub objcopy: S,
    pub strip: S,
}

impl<S> ToolNames<S> {
    pub fn get(&self, tool: Tool) -> &S {
        match tool {
            Tool::Cc => &self.cc,
            Tool::Asm => &self.asm,
            Tool::Ar => &self.ar,
            Tool::Cxx => &self.cxx,
            Tool::Link => &self.link,
            Tool::Size => &self.size,
            Tool::Objdump => &self.objdump,
            Tool::Objcopy => &self.objcopy,
            Tool::Strip => &self.strip,
        }
    }

    pub fn map<T>(&self, mut f: impl FnMut(&S) -> T) -> ToolNames<T> {
        ToolNames {
            cc: f(&self.cc),
            asm: f(&self.asm),
            ar: f(&self.ar),
            cxx: f(&self.cxx),
            link: f(&self.link),
            size: f(&self.size),
            objdump: f(&self.objdump),
            objcopy: f(&self.objcopy),
            strip: f(&self.strip),
        }
    }

    /// `(tool, name)` pairs in [`Tool::ALL`] order.
    pub fn iter(&self) -> impl Iterator<Item = (Tool, &S)> + '_ {
        Tool::ALL.into_iter().map(move |tool| (tool, self.get(tool)))
    }
}

/// Optional inputs that replace compiled-in defaults.
///
/// Collected once, then passed explicitly to everything downstream.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub struct EnvironmentOverrides {
    /// Toolchain name (`RTT_CC`).
    #[serde(default)]
    pub toolchain: Option<String>,
    /// RT-Thread root (`RTT_ROOT`).
    #[serde(default)]
    pub root: Option<PathBuf>,
    /// Toolchain install directory (`RTT_EXEC_PATH`).
    #[serde(default)]
    pub exec_path: Option<PathBuf>,
}

impl EnvironmentOverrides {
    /// Read `RTT_CC`, `RTT_ROOT` and `RTT_EXEC_PATH` from the process environment.
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var_os(key))
    }

    /// Build overrides from an arbitrary variable lookup. Empty values count
    /// as unset.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<OsString>) -> Self {
        let var = |key: &str| lookup(key).filter(|value| !value.is_empty());
        Self {
            toolchain: var(ENV_TOOLCHAIN).map(|v| v.to_string_lossy().into_owned()),
            root: var(ENV_ROOT).map(PathBuf::from),
            exec_path: var(ENV_EXEC_PATH).map(PathBuf::from),
        }
    }

    /// Resolve the toolchain these overrides select.
    pub fn resolve(&self) -> Result<ToolchainProfile> {
        resolve(self.toolchain.as_deref(), self.exec_path.as_deref())
    }
}

/// The single active toolchain for a build.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub struct ToolchainProfile {
    pub identity: ToolchainIdentity,
    /// Directory holding the tool executables.
    pub exec_path: PathBuf,
    /// Command names, all formed by the identity's naming rule.
    pub tools: ToolNames<String>,
    /// Extension of the linked executable (without the dot).
    pub target_ext: String,
}

impl ToolchainProfile {
    pub fn rules(&self) -> &'static ToolchainRules {
        self.identity.rules()
    }

    /// Command name for `tool`.
    pub fn tool(&self, tool: Tool) -> &str {
        self.tools.get(tool)
    }

    /// Absolute location of `tool` under the install path.
    pub fn tool_path(&self, tool: Tool) -> PathBuf {
        self.exec_path.join(self.tool(tool))
    }
}

/// Resolve a toolchain from an optional name and install-path override.
///
/// Fails only when `requested` names an unknown toolchain.
pub fn resolve(requested: Option<&str>, exec_override: Option<&Path>) -> Result<ToolchainProfile> {
    let identity = match requested {
        Some(name) => name.parse()?,
        None => ToolchainIdentity::DEFAULT,
    };
    Ok(resolve_identity(identity, exec_override))
}

/// Resolve an already-known identity.
pub fn resolve_identity(identity: ToolchainIdentity, exec_override: Option<&Path>) -> ToolchainProfile {
    let rules = identity.rules();

    let mut exec_path = match exec_override {
        Some(path) => path.to_path_buf(),
        None => PathBuf::from(rules.default_exec_path),
    };
    if let Some(subdir) = rules.exec_subdir {
        exec_path = exec_path.join(subdir);
        log::info!("{identity} toolchain exec path: {}", exec_path.display());
    }
    log::debug!(
        "resolved toolchain {identity} (override: {}) at {}",
        exec_override.is_some(),
        exec_path.display()
    );

    ToolchainProfile {
        identity,
        exec_path,
        tools: rules.tools.map(|base| rules.naming.apply(base)),
        target_ext: rules.target_ext.to_string(),
    }
}
