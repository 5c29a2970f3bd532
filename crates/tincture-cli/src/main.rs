//! tincture - design-token build tool
//!
//! Usage: tincture [--config FILE] <command>
//!
//! Reads a design-tool token export and maintainer mapping rules, validates
//! them, and writes the resolved theme, mapping tables and stylesheet
//! artifacts.

mod commands;
mod config;

use std::path::PathBuf;
use std::process::ExitCode;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand, ValueEnum};
use tincture_core::Mode;
use tracing_subscriber::EnvFilter;

use crate::config::{BuildConfig, ConfigArgs};

#[derive(Parser)]
#[command(name = "tincture")]
#[command(version, about = "Design-token resolution and artifact build")]
struct Cli {
    /// Config file (default: ./tincture.json when present)
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// Log more (-v info, -vv debug); RUST_LOG also applies
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,

    #[command(flatten)]
    overrides: ConfigArgs,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Resolve tokens and write every artifact to the output directory
    Build,

    /// Report theme keys that no mapping uses
    Coverage {
        /// Exit with status 1 when unexpected unmapped keys exist
        #[arg(long)]
        strict: bool,
    },

    /// Print the final value of one token
    Lookup {
        /// External token name, e.g. `bg.primary`
        name: String,
        #[arg(long, value_enum, default_value = "light")]
        mode: ModeArg,
    },
}

#[derive(Debug, Clone, Copy, ValueEnum)]
enum ModeArg {
    Light,
    Dark,
}

impl From<ModeArg> for Mode {
    fn from(mode: ModeArg) -> Self {
        match mode {
            ModeArg::Light => Mode::Light,
            ModeArg::Dark => Mode::Dark,
        }
    }
}

fn init_tracing(verbose: u8) {
    let level = match verbose {
        0 => tracing::Level::WARN,
        1 => tracing::Level::INFO,
        _ => tracing::Level::DEBUG,
    };
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env().add_directive(level.into()))
        .with_writer(std::io::stderr)
        .init();
}

fn main() -> Result<ExitCode> {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    let cwd = std::env::current_dir().context("Failed to read working directory")?;
    let mut config = BuildConfig::load(cli.config.as_deref(), &cwd)?;
    config.apply(&cli.overrides);

    match cli.command {
        Command::Build => {
            let written = commands::build(&config)?;
            for path in written {
                println!("{}", path.display());
            }
            Ok(ExitCode::SUCCESS)
        }
        Command::Coverage { strict } => {
            let report = commands::coverage(&config)?;
            print!("{}", commands::format_report(&report));
            if strict && !report.is_clean() {
                Ok(ExitCode::FAILURE)
            } else {
                Ok(ExitCode::SUCCESS)
            }
        }
        Command::Lookup { name, mode } => {
            println!("{}", commands::lookup(&config, mode.into(), &name)?);
            Ok(ExitCode::SUCCESS)
        }
    }
}
