//! Per-toolchain rule table.
//!
//! Each [`ToolchainIdentity`](crate::ToolchainIdentity) owns exactly one
//! [`ToolchainRules`] record describing how its tool names are formed, which
//! flag fragments it contributes, and what runs after a link. Composition in
//! [`crate::flags`] is written once against this record, so supporting another
//! suite means adding a record, not another branch.

use std::fmt;

use crate::device::DeviceProfile;
use crate::identity::ToolchainIdentity;
use crate::resolve::{Tool, ToolNames};

/// How tool command names are formed from the base names in the table.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ToolNaming {
    /// Every base name is prefixed with the same target triple.
    Prefixed {
        /// The shared prefix (e.g., "arm-none-eabi-").
        prefix: &'static str,
    },
    /// Base names are used verbatim.
    Fixed,
}

impl ToolNaming {
    /// Apply this naming rule to a base tool name.
    pub fn apply(self, base: &str) -> String {
        match self {
            Self::Prefixed { prefix } => format!("{prefix}{base}"),
            Self::Fixed => base.to_string(),
        }
    }
}

/// Fragments appended for one build mode.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ModeFragments {
    /// Appended to compile flags (and therefore to C++ flags).
    pub compile: &'static str,
    /// Appended to assemble flags.
    pub assemble: &'static str,
}

/// One command of a post-link action: a tool and its arguments.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ActionTemplate {
    pub tool: Tool,
    /// Arguments; `$TARGET` names the linked artifact.
    pub args: &'static str,
}

/// Flags for position-independent loadable modules.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ModuleRules {
    /// Appended to the compile flags before any mode fragment.
    pub compile: &'static str,
    /// Appended to the base C++ flags.
    pub cxx: &'static str,
    /// Appended to device + base C++ flags to form the module link flags.
    pub link: &'static str,
    /// Run after a module is linked.
    pub post_action: &'static [ActionTemplate],
}

/// Everything that distinguishes one toolchain from another.
#[derive(Clone, Copy)]
pub struct ToolchainRules {
    pub identity: ToolchainIdentity,
    /// Platform name reported to the build driver.
    pub platform: &'static str,
    /// Install root used when nothing overrides it.
    pub default_exec_path: &'static str,
    /// Appended to the install root (default or overridden) before use.
    pub exec_subdir: Option<&'static str>,
    pub naming: ToolNaming,
    /// Base tool names, before [`ToolNaming`] is applied.
    pub tools: ToolNames<&'static str>,
    /// Extension of the linked executable.
    pub target_ext: &'static str,
    /// Renders the device-flag fragment.
    pub device_flags: fn(&DeviceProfile) -> String,
    /// Appended to device flags for C compilation.
    pub compile: &'static str,
    /// Placed before the device flags for assembly.
    pub assemble_lead: &'static str,
    /// Appended to device flags for assembly.
    pub assemble: &'static str,
    /// Appended to device flags for linking.
    pub link: &'static str,
    /// Appended to device flags for the base C++ flags.
    pub cxx: &'static str,
    pub release: ModeFragments,
    pub debug: ModeFragments,
    /// Loadable-module variant, if the toolchain supports one.
    pub module: Option<ModuleRules>,
    /// Run after every successful link.
    pub post_action: &'static [ActionTemplate],
}

impl fmt::Debug for ToolchainRules {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ToolchainRules")
            .field("identity", &self.identity)
            .field("platform", &self.platform)
            .field("naming", &self.naming)
            .field("target_ext", &self.target_ext)
            .finish_non_exhaustive()
    }
}

/// GNU Arm Embedded.
///
/// Debug builds keep `-O2`; only the debug-info format changes.
pub static GNU_EABI: ToolchainRules = ToolchainRules {
    identity: ToolchainIdentity::GnuEabi,
    platform: "gcc",
    default_exec_path: r"C:\Program Files (x86)\GNU Tools ARM Embedded\6 2017-q1-update\bin",
    exec_subdir: None,
    naming: ToolNaming::Prefixed {
        prefix: "arm-none-eabi-",
    },
    tools: ToolNames {
        cc: "gcc",
        asm: "gcc",
        ar: "ar",
        cxx: "g++",
        link: "gcc",
        size: "size",
        objdump: "objdump",
        objcopy: "objcopy",
        strip: "strip",
    },
    target_ext: "elf",
    device_flags: DeviceProfile::gnu_flags,
    compile: " -Dgcc -Wno-unused-variable -Wno-unused-function -Wno-unused-but-set-variable ",
    assemble_lead: " -c ",
    assemble: " -x assembler-with-cpp -Wa,-mimplicit-it=thumb ",
    link: " -Wl,--gc-sections,-Map=rtthread.map,-cref,-u,Reset_Handler -T ./linking_scripts/M55M1.ld ",
    cxx: " -std=c++14 ",
    release: ModeFragments {
        compile: " -O2 -g",
        assemble: "",
    },
    debug: ModeFragments {
        compile: " -O2 -gdwarf-2 -g",
        assemble: " -gdwarf-2",
    },
    module: Some(ModuleRules {
        compile: " -mlong-calls -fPIC ",
        cxx: " -mlong-calls -fPIC",
        link: " -Wl,--gc-sections,-z,max-page-size=0x4 -shared -fPIC -nostartfiles -nostdlib -static-libgcc",
        post_action: &[
            ActionTemplate {
                tool: Tool::Strip,
                args: "-R .hash $TARGET",
            },
            ActionTemplate {
                tool: Tool::Size,
                args: "$TARGET",
            },
        ],
    }),
    post_action: &[
        ActionTemplate {
            tool: Tool::Objcopy,
            args: "-O binary $TARGET rtthread.bin",
        },
        ActionTemplate {
            tool: Tool::Size,
            args: "$TARGET",
        },
    ],
};

/// Keil MDK with the Arm Compiler 6 toolchain.
pub static VENDOR_CLANG: ToolchainRules = ToolchainRules {
    identity: ToolchainIdentity::VendorClang,
    platform: "armclang",
    default_exec_path: r"C:\Keil_v5",
    exec_subdir: Some("ARM/ARMCLANG/bin"),
    naming: ToolNaming::Fixed,
    tools: ToolNames {
        cc: "armclang",
        asm: "armasm",
        ar: "armar",
        cxx: "armclang",
        link: "armlink",
        size: "fromelf",
        objdump: "fromelf",
        objcopy: "fromelf",
        strip: "fromelf",
    },
    target_ext: "axf",
    device_flags: DeviceProfile::vendor_flags,
    compile: " --apcs=interwork",
    assemble_lead: "",
    assemble: "",
    link: " --info sizes --info totals --info unused --info veneers --list rtthread.map \
           --scatter ./linking_scripts/M55M1.scatter \
           --keep *.o(.rti_fn.*)   --keep *.o(FSymTab) --keep *.o(VSymTab)",
    cxx: "",
    release: ModeFragments {
        compile: " -O2",
        assemble: "",
    },
    debug: ModeFragments {
        compile: " -g -O0",
        assemble: " -g",
    },
    module: None,
    post_action: &[
        ActionTemplate {
            tool: Tool::Objcopy,
            args: "--bin $TARGET --output rtthread.bin",
        },
        ActionTemplate {
            tool: Tool::Size,
            args: "-z $TARGET",
        },
    ],
};

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn records_match_their_identity() {
        for identity in ToolchainIdentity::ALL {
            assert_eq!(identity.rules().identity, identity);
        }
    }

    #[test]
    fn prefixed_naming() {
        let naming = ToolNaming::Prefixed {
            prefix: "arm-none-eabi-",
        };
        assert_eq!(naming.apply("objcopy"), "arm-none-eabi-objcopy");
        assert_eq!(ToolNaming::Fixed.apply("armlink"), "armlink");
    }

    #[test]
    fn only_gnu_has_module_rules() {
        assert!(GNU_EABI.module.is_some());
        assert!(VENDOR_CLANG.module.is_none());
    }

    #[test]
    fn vendor_link_keeps_symbol_tables() {
        for section in ["*.o(.rti_fn.*)", "*.o(FSymTab)", "*.o(VSymTab)"] {
            assert!(VENDOR_CLANG.link.contains(&format!("--keep {section}")));
        }
    }
}
