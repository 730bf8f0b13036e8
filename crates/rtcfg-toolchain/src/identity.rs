//! Toolchain identity.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::ConfigError;
use crate::rules::{ToolchainRules, GNU_EABI, VENDOR_CLANG};

/// Which compiler suite a build targets.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ToolchainIdentity {
    /// The GNU Arm Embedded suite (`arm-none-eabi-*`).
    #[serde(rename = "gcc")]
    GnuEabi,
    /// The Keil MDK suite built around `armclang`.
    #[serde(rename = "keil")]
    VendorClang,
}

impl ToolchainIdentity {
    /// Identity used when nothing overrides it.
    pub const DEFAULT: Self = Self::GnuEabi;

    /// Every known identity, in table order.
    pub const ALL: [Self; 2] = [Self::GnuEabi, Self::VendorClang];

    /// Name accepted in `RTT_CC` and the board manifest.
    pub fn name(self) -> &'static str {
        match self {
            Self::GnuEabi => "gcc",
            Self::VendorClang => "keil",
        }
    }

    /// Platform name reported to the build driver.
    pub fn platform(self) -> &'static str {
        self.rules().platform
    }

    /// The rule record for this identity.
    pub fn rules(self) -> &'static ToolchainRules {
        match self {
            Self::GnuEabi => &GNU_EABI,
            Self::VendorClang => &VENDOR_CLANG,
        }
    }
}

impl Default for ToolchainIdentity {
    fn default() -> Self {
        Self::DEFAULT
    }
}

impl fmt::Display for ToolchainIdentity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for ToolchainIdentity {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|identity| identity.name() == s)
            .ok_or_else(|| ConfigError::UnknownToolchain { name: s.into() })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_known_names() {
        assert_eq!(
            "gcc".parse::<ToolchainIdentity>().unwrap(),
            ToolchainIdentity::GnuEabi
        );
        assert_eq!(
            "keil".parse::<ToolchainIdentity>().unwrap(),
            ToolchainIdentity::VendorClang
        );
    }

    #[test]
    fn parse_unknown_name() {
        let err = "iar".parse::<ToolchainIdentity>().unwrap_err();
        assert!(matches!(err, ConfigError::UnknownToolchain { ref name } if name == "iar"));
        assert!(err.to_string().contains("iar"));
    }

    #[test]
    fn names_are_case_sensitive() {
        assert!("GCC".parse::<ToolchainIdentity>().is_err());
    }

    #[test]
    fn platform_names() {
        assert_eq!(ToolchainIdentity::GnuEabi.platform(), "gcc");
        assert_eq!(ToolchainIdentity::VendorClang.platform(), "armclang");
    }

    #[test]
    fn display_round_trips_through_parse() {
        for identity in ToolchainIdentity::ALL {
            assert_eq!(identity.to_string().parse::<ToolchainIdentity>().unwrap(), identity);
        }
    }

    #[test]
    fn default_is_gnu() {
        assert_eq!(ToolchainIdentity::default(), ToolchainIdentity::GnuEabi);
    }
}
