//! Kestrel CLI - Command-line interface for option and bond valuation.
//!
//! # Usage
//!
//! ```bash
//! # Price a call option
//! kestrel option price --spot 100 --strike 105 --expiry 0.25 --rate 5 --vol 20
//!
//! # Back out implied volatility
//! kestrel option implied-vol --price 2.48 --spot 100 --strike 105 --expiry 0.25
//!
//! # Analyze a bond at a 6% yield
//! kestrel bond analyze --coupon 5 --years 10 --yield 6
//!
//! # Forward rates of the sample curve
//! kestrel curve forward --format json
//! ```

use std::path::Path;

use anyhow::{Context as _, Result};
use clap::Parser;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use kestrel_config::{EngineConfig, Validate};

mod cli;
mod commands;
mod error;
mod output;

use cli::{Cli, Commands};
use commands::Context;
use error::CliResult;

fn main() -> Result<()> {
    let cli = Cli::parse();

    init_logging(cli.verbose);

    let config = load_config(cli.config.as_deref())
        .context("failed to load engine configuration")?;

    let ctx = Context {
        format: cli.format,
        quiet: cli.quiet,
        config,
    };

    match cli.command {
        Commands::Option(args) => commands::option::execute(args, &ctx)?,
        Commands::Bond(args) => commands::bond::execute(args, &ctx)?,
        Commands::Curve(args) => commands::curve::execute(args, &ctx)?,
    }

    Ok(())
}

/// Installs the stderr subscriber; library `log` records are bridged into it.
fn init_logging(verbose: u8) {
    let default_level = match verbose {
        0 => "warn",
        1 => "debug",
        _ => "trace",
    };
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));

    tracing_subscriber::registry()
        .with(filter)
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();
}

/// Reads and validates the configuration file, or falls back to defaults.
fn load_config(path: Option<&Path>) -> CliResult<EngineConfig> {
    let Some(path) = path else {
        return Ok(EngineConfig::default());
    };

    let config = EngineConfig::from_path(path)?;
    config.validate_or_error()?;
    tracing::info!(path = %path.display(), "loaded engine configuration");
    tracing::debug!(?config, "engine configuration");
    Ok(config)
}
