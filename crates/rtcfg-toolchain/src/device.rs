//! Target device description.
//!
//! The M55M1 is fixed hardware, so the device profile is a constant rather
//! than something resolved at runtime. Each toolchain renders it into its own
//! device-flag fragment.

use serde::Serialize;

/// CPU, instruction set, FPU and ABI of the target.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "kebab-case")]
pub struct DeviceProfile {
    /// Architecture family (e.g., "arm").
    pub arch: &'static str,
    /// CPU name as GNU tools spell it.
    pub cpu: &'static str,
    /// CPU name as the Arm compiler spells it.
    pub vendor_cpu: &'static str,
    /// Architecture revision passed to `-march`.
    pub isa: &'static str,
    /// Instruction set (e.g., "thumb").
    pub instruction_set: &'static str,
    /// Floating-point unit.
    pub fpu: &'static str,
    /// Floating-point calling convention.
    pub float_abi: &'static str,
}

impl DeviceProfile {
    /// Nuvoton M55M1: Cortex-M55 with double-precision FPv5.
    pub const CORTEX_M55: Self = Self {
        arch: "arm",
        cpu: "cortex-m55",
        vendor_cpu: "Cortex-M55",
        isa: "armv8.1-m.main",
        instruction_set: "thumb",
        fpu: "fpv5-d16",
        float_abi: "hard",
    };

    /// Device fragment for GCC: code generation options plus section-per-symbol
    /// output and unwind tables.
    pub fn gnu_flags(&self) -> String {
        format!(
            " -march={} -m{} -mfpu={} -mfloat-abi={} -ffunction-sections -fdata-sections \
             -ffreestanding -funwind-tables -fno-strict-aliasing ",
            self.isa, self.instruction_set, self.fpu, self.float_abi
        )
    }

    /// Device fragment for armclang/armasm/armlink.
    pub fn vendor_flags(&self) -> String {
        format!(" --cpu {}", self.vendor_cpu)
    }
}

impl Default for DeviceProfile {
    fn default() -> Self {
        Self::CORTEX_M55
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn gnu_fragment() {
        assert_eq!(
            DeviceProfile::CORTEX_M55.gnu_flags(),
            " -march=armv8.1-m.main -mthumb -mfpu=fpv5-d16 -mfloat-abi=hard -ffunction-sections \
             -fdata-sections -ffreestanding -funwind-tables -fno-strict-aliasing "
        );
    }

    #[test]
    fn vendor_fragment() {
        assert_eq!(DeviceProfile::CORTEX_M55.vendor_flags(), " --cpu Cortex-M55");
    }
}
