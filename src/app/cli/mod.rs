//! CLI Adapter.

mod extension;
mod init;
mod patch_config;
mod provision;

use std::path::PathBuf;

use clap::{Parser, Subcommand, ValueEnum};
use tracing_subscriber::{EnvFilter, fmt, layer::SubscriberExt, util::SubscriberInitExt};

use crate::domain::AppError;

#[derive(Parser)]
#[command(name = "mistral-provision")]
#[command(version)]
#[command(
    about = "Provision a host to run the Mistral workflow service",
    long_about = None
)]
struct Cli {
    /// Enable debug logging
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Run the full provisioning sequence
    #[clap(visible_alias = "p")]
    Provision {
        /// Profile path (defaults to ./provision.toml, then built-in defaults)
        #[arg(short, long)]
        config: Option<PathBuf>,
        /// Show what would run without changing the host
        #[arg(long)]
        dry_run: bool,
        /// Do not install the optional extension
        #[arg(long)]
        skip_extension: bool,
        /// Do not ask for confirmation
        #[arg(short, long)]
        yes: bool,
        /// Output format for the final report
        #[arg(long, value_enum, default_value_t = OutputFormat::Text)]
        format: OutputFormat,
    },
    /// Print the provisioning steps and commands without running them
    Plan {
        /// Profile path (defaults to ./provision.toml, then built-in defaults)
        #[arg(short, long)]
        config: Option<PathBuf>,
        /// Mark the optional extension as skipped
        #[arg(long)]
        skip_extension: bool,
        #[arg(long, value_enum, default_value_t = OutputFormat::Text)]
        format: OutputFormat,
    },
    /// Apply the profile's configuration patches to a file
    PatchConfig {
        /// Profile path (defaults to ./provision.toml, then built-in defaults)
        #[arg(short, long)]
        config: Option<PathBuf>,
        /// Configuration file to patch (defaults to the generated config path)
        file: Option<PathBuf>,
    },
    /// Download, verify and install only the optional extension
    InstallExtension {
        /// Profile path (defaults to ./provision.toml, then built-in defaults)
        #[arg(short, long)]
        config: Option<PathBuf>,
    },
    /// Write the built-in profile to disk
    #[clap(visible_alias = "i")]
    Init {
        /// Target file or directory (defaults to ./provision.toml)
        path: Option<PathBuf>,
        /// Overwrite an existing profile
        #[arg(short, long)]
        force: bool,
    },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub(crate) enum OutputFormat {
    Text,
    Json,
}

/// Entry point for the CLI.
pub fn run() {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    let result: Result<i32, AppError> = match cli.command {
        Commands::Provision { config, dry_run, skip_extension, yes, format } => {
            provision::run_provision(config, dry_run, skip_extension, yes, format).map(|_| 0)
        }
        Commands::Plan { config, skip_extension, format } => {
            provision::run_plan(config, skip_extension, format).map(|_| 0)
        }
        Commands::PatchConfig { config, file } => {
            patch_config::run_patch_config(config, file).map(|_| 0)
        }
        Commands::InstallExtension { config } => {
            extension::run_install_extension(config).map(|_| 0)
        }
        Commands::Init { path, force } => init::run_init(path, force).map(|_| 0),
    };

    match result {
        Ok(exit_code) => {
            if exit_code != 0 {
                std::process::exit(exit_code);
            }
        }
        Err(e) => {
            eprintln!("Error: {}", e);
            std::process::exit(e.exit_code());
        }
    }
}

fn init_tracing(verbose: bool) {
    let level = if verbose { "debug" } else { "info" };
    let env_filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(level))
        .unwrap_or_else(|_| EnvFilter::new(level));

    tracing_subscriber::registry()
        .with(env_filter)
        .with(fmt::layer().with_writer(std::io::stderr).with_target(false))
        .init();
}
