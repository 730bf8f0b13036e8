//! `rtcfg show`, `rtcfg tools`, `rtcfg flags` — print the resolved configuration.

use anyhow::Result;
use rtcfg_toolchain::{BuildConfiguration, PostAction};

use crate::Format;

/// Print the full configuration in the requested format.
pub fn run(config: &BuildConfiguration, format: Format) -> Result<()> {
    print!("{}", render(config, format)?);
    Ok(())
}

pub(crate) fn render(config: &BuildConfiguration, format: Format) -> Result<String> {
    Ok(match format {
        Format::Env => config.to_env(),
        Format::Toml => config.to_toml()?,
        Format::Json => {
            let mut json = config.to_json()?;
            json.push('\n');
            json
        }
    })
}

/// Print each tool's full path.
pub fn tools(config: &BuildConfiguration) -> Result<()> {
    print!("{}", render_tools(config));
    Ok(())
}

pub(crate) fn render_tools(config: &BuildConfiguration) -> String {
    let mut out = format!(
        "Toolchain: {} ({}, {})\nExec path: {}\n",
        config.toolchain,
        config.platform,
        config.mode,
        config.exec_path.display()
    );
    for (tool, name) in config.tools.iter() {
        out.push_str(&format!(
            "  {:<8} {}\n",
            tool.var_name(),
            config.exec_path.join(name).display()
        ));
    }
    out.push_str(&format!("  {:<8} .{}\n", "TARGET", config.target_ext));
    out
}

/// Print flag strings, one labelled line each. With `target`, post-link
/// commands name that artifact instead of `$TARGET`.
pub fn flags(config: &BuildConfiguration, module: bool, target: Option<&str>) -> Result<()> {
    print!("{}", render_flags(config, module, target));
    Ok(())
}

fn post_action_lines(action: &PostAction, target: Option<&str>) -> String {
    let commands = match target {
        Some(target) => action.for_target(target),
        None => action.commands.clone(),
    };
    commands.iter().map(|c| format!("  {c}\n")).collect()
}

pub(crate) fn render_flags(
    config: &BuildConfiguration,
    module: bool,
    target: Option<&str>,
) -> String {
    let f = &config.flags;
    let mut out = String::new();
    for (label, value) in [
        ("CFLAGS", &f.compile),
        ("AFLAGS", &f.assemble),
        ("LFLAGS", &f.link),
        ("CXXFLAGS", &f.cxx),
    ] {
        out.push_str(&format!("{label:<12}{}\n", value.trim()));
    }
    out.push_str("POST_ACTION\n");
    out.push_str(&post_action_lines(&f.post_action, target));

    if module {
        match &f.module {
            Some(m) => {
                out.push_str(&format!("{:<12}{}\n", "M_CFLAGS", m.compile.trim()));
                out.push_str(&format!("{:<12}{}\n", "M_CXXFLAGS", m.cxx.trim()));
                out.push_str(&format!("{:<12}{}\n", "M_LFLAGS", m.link.trim()));
                out.push_str("M_POST_ACTION\n");
                out.push_str(&post_action_lines(&m.post_action, target));
            }
            None => out.push_str(&format!(
                "{} does not support loadable modules\n",
                config.toolchain
            )),
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use rtcfg_toolchain::{BuildMode, EnvironmentOverrides};

    fn config(toolchain: Option<&str>, mode: BuildMode) -> BuildConfiguration {
        let overrides = EnvironmentOverrides {
            toolchain: toolchain.map(String::from),
            exec_path: Some("/opt/arm/bin".into()),
            ..Default::default()
        };
        BuildConfiguration::resolve(&overrides, mode).unwrap()
    }

    #[test]
    fn env_format_lists_variables() {
        let out = render(&config(None, BuildMode::Release), Format::Env).unwrap();
        assert!(out.contains("CC='arm-none-eabi-gcc'"));
        assert!(out.contains("EXEC_PATH='/opt/arm/bin'"));
    }

    #[test]
    fn json_format_is_valid() {
        let out = render(&config(Some("keil"), BuildMode::Debug), Format::Json).unwrap();
        assert!(out.ends_with("}\n"));
        assert!(out.contains("\"platform\": \"armclang\""));
    }

    #[test]
    fn tools_lists_full_paths() {
        let out = render_tools(&config(None, BuildMode::Release));
        assert!(out.contains("/opt/arm/bin/arm-none-eabi-objcopy"));
        assert!(out.contains(".elf"));
    }

    #[test]
    fn flags_with_modules() {
        let out = render_flags(&config(None, BuildMode::Release), true, None);
        assert!(out.contains("M_LFLAGS"));
        assert!(out.contains("arm-none-eabi-strip -R .hash $TARGET"));
    }

    #[test]
    fn vendor_flags_without_modules() {
        let out = render_flags(&config(Some("keil"), BuildMode::Release), true, None);
        assert!(out.contains("keil does not support loadable modules"));
        assert!(out.contains("fromelf --bin $TARGET --output rtthread.bin"));
    }

    #[test]
    fn target_replaces_placeholder_in_post_actions() {
        let out = render_flags(&config(None, BuildMode::Release), true, Some("rtthread.elf"));
        assert!(out.contains("  arm-none-eabi-objcopy -O binary rtthread.elf rtthread.bin\n"));
        assert!(out.contains("  arm-none-eabi-strip -R .hash rtthread.elf\n"));
        assert!(!out.contains(rtcfg_toolchain::TARGET_PLACEHOLDER));
    }
}
