//! rtcfg — build-configuration resolver for the M55M1 board support package.

mod commands;
mod manifest;

use std::path::{Path, PathBuf};
use std::process;

use clap::{Args, Parser, Subcommand, ValueEnum};
use rtcfg_toolchain::{BuildConfiguration, BuildMode, EnvironmentOverrides};

use manifest::BspManifest;

#[derive(Parser)]
#[command(name = "rtcfg", version, about = "Toolchain configuration for the M55M1 board")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

/// Options shared by every command that resolves a toolchain.
#[derive(Args, Debug, Clone, Default)]
struct ResolveArgs {
    /// Toolchain to use (gcc, keil) [env: RTT_CC]
    #[arg(long)]
    toolchain: Option<String>,
    /// Toolchain install directory [env: RTT_EXEC_PATH]
    #[arg(long)]
    exec_path: Option<PathBuf>,
    /// RT-Thread root directory [env: RTT_ROOT]
    #[arg(long)]
    root: Option<PathBuf>,
    /// Build with debug info (release otherwise)
    #[arg(long)]
    debug: bool,
}

#[derive(Clone, Copy, Debug, Default, ValueEnum)]
enum Format {
    /// Shell assignments
    #[default]
    Env,
    Toml,
    Json,
}

#[derive(Subcommand)]
enum Commands {
    /// Print the full build configuration
    Show {
        #[command(flatten)]
        resolve: ResolveArgs,
        /// Output format
        #[arg(long, value_enum, default_value_t)]
        format: Format,
    },
    /// Print resolved tool paths
    Tools {
        #[command(flatten)]
        resolve: ResolveArgs,
    },
    /// Print compiler, assembler and linker flags
    Flags {
        #[command(flatten)]
        resolve: ResolveArgs,
        /// Also print loadable-module flags
        #[arg(long)]
        module: bool,
        /// Substitute this artifact for $TARGET in post-link commands
        #[arg(long, value_name = "ARTIFACT")]
        target: Option<String>,
    },
    /// Copy a minimal distributable board-support tree
    Dist {
        /// Output directory
        output: PathBuf,
        /// Board-support root (default: directory of rtconfig.toml, or cwd)
        #[arg(long)]
        bsp_root: Option<PathBuf>,
        /// Program used to run the packaging script
        #[arg(long, default_value = rtcfg_dist::DEFAULT_INTERPRETER)]
        interpreter: String,
        /// RT-Thread root directory [env: RTT_ROOT]
        #[arg(long)]
        root: Option<PathBuf>,
    },
    /// Check that the resolved tools are installed
    Doctor {
        #[command(flatten)]
        resolve: ResolveArgs,
    },
}

fn main() {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn")).init();

    let cli = Cli::parse();

    let result = run(cli);
    if let Err(e) = result {
        eprintln!("error: {e:#}");
        process::exit(1);
    }
}

fn run(cli: Cli) -> anyhow::Result<()> {
    let cwd = std::env::current_dir()?;
    let env = EnvironmentOverrides::from_env();

    match cli.command {
        Commands::Show { resolve, format } => {
            let config = configure(&resolve, &env, &cwd)?;
            commands::show::run(&config, format)
        }

        Commands::Tools { resolve } => {
            let config = configure(&resolve, &env, &cwd)?;
            commands::show::tools(&config)
        }

        Commands::Flags {
            resolve,
            module,
            target,
        } => {
            let config = configure(&resolve, &env, &cwd)?;
            commands::show::flags(&config, module, target.as_deref())
        }

        Commands::Dist {
            output,
            bsp_root,
            interpreter,
            root,
        } => {
            let (bsp_root, root) = dist_paths(bsp_root, root.or(env.root), &cwd)?;
            commands::dist::run(&bsp_root, &output, &interpreter, root)
        }

        Commands::Doctor { resolve } => {
            let config = configure(&resolve, &env, &cwd)?;
            commands::doctor::run(&config)
        }
    }
}

/// Load the nearest manifest above `cwd` and resolve against it.
fn configure(
    args: &ResolveArgs,
    env: &EnvironmentOverrides,
    cwd: &Path,
) -> anyhow::Result<BuildConfiguration> {
    let found = BspManifest::find_and_load(cwd)?;
    build_configuration(args, env, found.as_ref().map(|(m, _)| m))
}

/// Merge command-line flags, `RTT_*` variables and manifest defaults (in that
/// order) and resolve the configuration.
fn build_configuration(
    args: &ResolveArgs,
    env: &EnvironmentOverrides,
    manifest: Option<&BspManifest>,
) -> anyhow::Result<BuildConfiguration> {
    let overrides = merge_overrides(args, env, manifest);
    let mode = if args.debug {
        BuildMode::Debug
    } else {
        manifest.map(BspManifest::build_mode).transpose()?.unwrap_or_default()
    };
    Ok(BuildConfiguration::resolve(&overrides, mode)?)
}

fn merge_overrides(
    args: &ResolveArgs,
    env: &EnvironmentOverrides,
    manifest: Option<&BspManifest>,
) -> EnvironmentOverrides {
    EnvironmentOverrides {
        toolchain: args
            .toolchain
            .clone()
            .or_else(|| env.toolchain.clone())
            .or_else(|| manifest.and_then(|m| m.toolchain().map(String::from))),
        root: args
            .root
            .clone()
            .or_else(|| env.root.clone())
            .or_else(|| manifest.and_then(|m| m.root().map(PathBuf::from))),
        exec_path: args
            .exec_path
            .clone()
            .or_else(|| env.exec_path.clone())
            .or_else(|| manifest.and_then(|m| m.exec_path().map(PathBuf::from))),
    }
}

/// Board-support root and RT-Thread root for `dist`. The manifest is only
/// parsed when it has to supply the RT-Thread root.
fn dist_paths(
    bsp_root: Option<PathBuf>,
    root: Option<PathBuf>,
    cwd: &Path,
) -> anyhow::Result<(PathBuf, Option<PathBuf>)> {
    let manifest_dir = BspManifest::locate(cwd);
    let root = match (root, &manifest_dir) {
        (Some(root), _) => Some(root),
        (None, Some(dir)) => BspManifest::load(dir)?.root().map(PathBuf::from),
        (None, None) => None,
    };
    let bsp_root = bsp_root
        .or(manifest_dir)
        .unwrap_or_else(|| cwd.to_path_buf());
    Ok((bsp_root, root))
}
