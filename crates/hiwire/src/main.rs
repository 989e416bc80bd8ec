//! Hiwire - Entry Point
//!
//! Builds every configuration unit linked into the binary and prints the
//! build summary. Exits non-zero when the build fails.

use anyhow::{Context, bail};
use clap::Parser;
use hiwire_application::ports::list_configuration_units;
use hiwire_infrastructure::{Engine, EngineOptions};
use std::path::PathBuf;
use tracing::error;

/// Command line interface for Hiwire
#[derive(Parser, Debug)]
#[command(name = "hiwire")]
#[command(about = "Hiwire - build the configured object graph")]
#[command(version)]
pub struct Cli {
    /// Directory holding `application.yml` and unit property files
    #[arg(short, long)]
    pub config_dir: Option<PathBuf>,

    /// Active profile (defaults to `APP_PROFILES_ACTIVE`, then `default`)
    #[arg(short, long)]
    pub profile: Option<String>,

    /// Emit JSON logs
    #[arg(long)]
    pub json_logs: bool,

    /// List registered configuration units and exit
    #[arg(long)]
    pub list: bool,
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    if cli.list {
        for (name, description) in list_configuration_units() {
            println!("{name:<24} {description}");
        }
        return Ok(());
    }

    let mut options = EngineOptions::default().with_logging(cli.json_logs);
    if let Some(dir) = cli.config_dir {
        options = options.with_config_dir(dir);
    }
    if let Some(profile) = cli.profile {
        options = options.with_profile(profile);
    }

    let mut engine = Engine::new(options);
    engine.init().context("Failed to initialize engine")?;
    let report = engine.build_registered().context("Build aborted")?;
    println!("{report}");

    if !report.is_success() {
        for fatal in report.fatal_errors() {
            error!("{fatal}");
        }
        bail!("build failed for profile {}", report.profile);
    }
    Ok(())
}
