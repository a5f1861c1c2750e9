//! rhino-locate — inspect platform detection and Rhino native library paths.

mod commands;
mod host;

use std::path::PathBuf;
use std::process;

use clap::{Parser, Subcommand};

use host::HostOptions;

#[derive(Parser)]
#[command(
    name = "rhino-locate",
    version,
    about = "Locate the Rhino native library for this host"
)]
struct Cli {
    /// Package root the relative base is resolved against (default: current directory)
    #[arg(long, global = true)]
    root: Option<PathBuf>,
    /// Layout config file overriding library and model file names
    #[arg(long, global = true)]
    config: Option<PathBuf>,
    /// Resolve as if the host reported this OS name (e.g., Linux, Darwin, Windows)
    #[arg(long, global = true)]
    os: Option<String>,
    /// Resolve as if the host reported this machine architecture (e.g., aarch64)
    #[arg(long, global = true)]
    arch: Option<String>,
    /// Read CPU description from this captured `lscpu` output instead of running it
    #[arg(long, global = true)]
    cpu_description_file: Option<PathBuf>,
    /// Read CPU identification from this captured cpuinfo file
    #[arg(long, global = true)]
    cpuinfo_file: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Show the resolved system and machine tag
    Platform {
        /// Output format (text, toml, json)
        #[arg(long)]
        format: Option<String>,
    },
    /// Print the native library path
    LibraryPath {
        /// Base directory relative to the package root
        base: Option<PathBuf>,
    },
    /// Print the model parameter file path
    ModelPath {
        /// Base directory relative to the package root
        base: Option<PathBuf>,
    },
    /// List every prebuilt library variant
    Variants,
    /// Resolve everything and check the artifacts exist
    Doctor {
        /// Base directory relative to the package root
        base: Option<PathBuf>,
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
    let host = HostOptions {
        root: cli.root,
        config: cli.config,
        os: cli.os,
        arch: cli.arch,
        cpu_description_file: cli.cpu_description_file,
        cpuinfo_file: cli.cpuinfo_file,
    };

    match cli.command {
        Commands::Platform { format } => commands::platform::run(&host, format.as_deref()),
        Commands::LibraryPath { base } => {
            commands::paths::library(&host, &base.unwrap_or_default())
        }
        Commands::ModelPath { base } => commands::paths::model(&host, &base.unwrap_or_default()),
        Commands::Variants => commands::variants::list(&host),
        Commands::Doctor { base } => commands::doctor::run(&host, &base.unwrap_or_default()),
    }
}
