//! `rtcfg doctor` — toolchain diagnostics.

use std::path::Path;

use anyhow::Result;
use rtcfg_toolchain::BuildConfiguration;

/// Print which of the resolved tools exist on disk.
pub fn run(config: &BuildConfiguration) -> Result<()> {
    println!("=== rtcfg doctor ===");
    println!();
    println!("rtcfg version: {}", env!("CARGO_PKG_VERSION"));
    println!("Toolchain:     {} ({})", config.toolchain, config.platform);
    println!("Exec path:     {}", config.exec_path.display());
    println!();

    println!("--- Tools ---");
    let missing = report(config, |line| println!("{line}"));
    println!();
    if missing == 0 {
        println!("All tools found.");
    } else {
        println!("{missing} tool(s) not found; set RTT_EXEC_PATH or --exec-path.");
    }
    Ok(())
}

/// Feed one status line per distinct tool to `out`; returns how many are missing.
pub(crate) fn report(config: &BuildConfiguration, mut out: impl FnMut(String)) -> usize {
    let mut seen: Vec<&str> = Vec::new();
    let mut missing = 0;
    for (_, name) in config.tools.iter() {
        if seen.contains(&name.as_str()) {
            continue;
        }
        seen.push(name.as_str());
        let status = if tool_exists(&config.exec_path, name) {
            "found"
        } else {
            missing += 1;
            "not found"
        };
        out(format!("  {name:<24} {status}"));
    }
    missing
}

fn tool_exists(exec_path: &Path, name: &str) -> bool {
    let path = exec_path.join(name);
    path.is_file() || path.with_extension("exe").is_file()
}

#[cfg(test)]
mod tests {
    use super::*;
    use rtcfg_toolchain::{BuildMode, EnvironmentOverrides};

    fn config_at(exec_path: &Path, toolchain: &str) -> BuildConfiguration {
        let overrides = EnvironmentOverrides {
            toolchain: Some(toolchain.into()),
            exec_path: Some(exec_path.to_path_buf()),
            ..Default::default()
        };
        BuildConfiguration::resolve(&overrides, BuildMode::Release).unwrap()
    }

    #[test]
    fn reports_missing_tools() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(dir.path().join("arm-none-eabi-gcc"), "").unwrap();
        std::fs::write(dir.path().join("arm-none-eabi-size.exe"), "").unwrap();

        let mut lines = Vec::new();
        let missing = report(&config_at(dir.path(), "gcc"), |l| lines.push(l));
        // gcc appears once for CC, AS and LINK
        assert_eq!(lines.len(), 7);
        assert_eq!(missing, 5);
        assert!(lines.iter().any(|l| l.contains("arm-none-eabi-gcc ") && !l.contains("not found")));
    }

    #[test]
    fn vendor_tools_live_under_armclang_bin() {
        let dir = tempfile::tempdir().unwrap();
        let bin = dir.path().join("ARM/ARMCLANG/bin");
        std::fs::create_dir_all(&bin).unwrap();
        for tool in ["armclang", "armasm", "armar", "armlink", "fromelf"] {
            std::fs::write(bin.join(tool), "").unwrap();
        }
        let missing = report(&config_at(dir.path(), "keil"), |_| {});
        assert_eq!(missing, 0);
    }

    #[test]
    fn doctor_runs_without_error() {
        let dir = tempfile::tempdir().unwrap();
        run(&config_at(dir.path(), "gcc")).unwrap();
    }
}
