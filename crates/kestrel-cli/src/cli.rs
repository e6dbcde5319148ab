//! CLI argument definitions.

use std::path::PathBuf;

use clap::{ArgAction, Parser, Subcommand, ValueEnum};

use crate::commands::{BondArgs, CurveArgs, OptionArgs};

/// Kestrel - Option and bond valuation from the command line
#[derive(Parser)]
#[command(name = "kestrel")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    /// Output format
    #[arg(short, long, value_enum, default_value = "table", global = true)]
    pub format: OutputFormat,

    /// Suppress headers and other non-essential output
    #[arg(short, long, global = true)]
    pub quiet: bool,

    /// Log solver progress to stderr (-v debug, -vv trace)
    #[arg(short, long, action = ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Engine configuration file (.json or .toml)
    #[arg(long, env = "KESTREL_CONFIG", global = true)]
    pub config: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Commands,
}

/// Available commands
#[derive(Subcommand)]
pub enum Commands {
    /// Black-Scholes pricing, Greeks, implied volatility and chart series
    Option(OptionArgs),

    /// Fixed-coupon bond pricing, yield and risk analytics
    Bond(BondArgs),

    /// Spot yield curve interpolation and forward rates
    Curve(CurveArgs),
}

/// Output format options
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, ValueEnum)]
pub enum OutputFormat {
    /// Human-readable table format
    #[default]
    Table,
    /// JSON format
    Json,
    /// CSV format
    Csv,
    /// Minimal output (just the value)
    Minimal,
}
