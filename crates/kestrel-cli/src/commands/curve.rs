//! Curve command implementation.
//!
//! Interpolates spot yields and derives implied forward rates from either the
//! built-in sample curve or user-supplied pillars.

use anyhow::Result;
use clap::{Args, Subcommand};
use serde::Serialize;
use tabled::Tabled;

use kestrel_bonds::{ForwardRate, YieldCurve};

use crate::commands::{from_percent, parse_list, Context};
use crate::error::CliError;
use crate::output::{format_amount, format_rate, KeyValue};

/// Arguments for the curve command.
#[derive(Args, Debug)]
pub struct CurveArgs {
    #[command(subcommand)]
    pub command: CurveCommand,
}

/// Curve subcommands.
#[derive(Subcommand, Debug)]
pub enum CurveCommand {
    /// Display the curve pillars
    Show(CurveSource),

    /// Interpolate the spot yield at a maturity
    Interpolate(InterpolateArgs),

    /// Implied forward rate between two maturities, or between every pair
    /// of adjacent pillars
    Forward(ForwardArgs),
}

/// Where the curve comes from. Without both lists the sample curve is used.
#[derive(Args, Debug, Clone)]
pub struct CurveSource {
    /// Pillar maturities in years (comma-separated, e.g., "0.5,1,2,5,10")
    #[arg(short, long, requires = "yields")]
    pub maturities: Option<String>,

    /// Spot yields in percent (comma-separated, e.g., "4.4,4.5,4.8,5.0,5.2")
    #[arg(short = 'z', long, requires = "maturities", allow_hyphen_values = true)]
    pub yields: Option<String>,
}

/// Arguments for interpolation.
#[derive(Args, Debug)]
pub struct InterpolateArgs {
    #[command(flatten)]
    pub source: CurveSource,

    /// Maturity to query (in years)
    #[arg(short = 't', long)]
    pub maturity: f64,
}

/// Arguments for forward rates.
#[derive(Args, Debug)]
pub struct ForwardArgs {
    #[command(flatten)]
    pub source: CurveSource,

    /// Start of the forward period (in years)
    #[arg(long, requires = "t2")]
    pub t1: Option<f64>,

    /// End of the forward period (in years)
    #[arg(long, requires = "t1")]
    pub t2: Option<f64>,
}

/// One pillar of the curve.
#[derive(Debug, Serialize, Tabled)]
struct PillarRow {
    #[tabled(rename = "Maturity (years)", display_with = "format_amount")]
    maturity: f64,
    #[tabled(rename = "Yield", display_with = "format_rate")]
    yield_value: f64,
}

/// One forward period.
#[derive(Debug, Serialize, Tabled)]
struct ForwardRow {
    #[tabled(rename = "Start", display_with = "format_amount")]
    start: f64,
    #[tabled(rename = "End", display_with = "format_amount")]
    end: f64,
    #[tabled(rename = "Forward", display_with = "format_rate")]
    rate: f64,
}

impl From<ForwardRate> for ForwardRow {
    fn from(forward: ForwardRate) -> Self {
        Self {
            start: forward.start,
            end: forward.end,
            rate: forward.rate,
        }
    }
}

/// Execute the curve command.
pub fn execute(args: CurveArgs, ctx: &Context) -> Result<()> {
    match args.command {
        CurveCommand::Show(source) => execute_show(&source, ctx),
        CurveCommand::Interpolate(interp_args) => execute_interpolate(&interp_args, ctx),
        CurveCommand::Forward(forward_args) => execute_forward(&forward_args, ctx),
    }
}

impl CurveSource {
    fn curve(&self) -> Result<YieldCurve> {
        let (Some(maturities), Some(yields)) = (&self.maturities, &self.yields) else {
            return Ok(YieldCurve::reference()?);
        };

        let maturities = parse_list(maturities, "maturities")?;
        let yields: Vec<f64> = parse_list(yields, "yields")?
            .into_iter()
            .map(from_percent)
            .collect();

        if maturities.len() != yields.len() {
            return Err(CliError::LengthMismatch {
                maturities: maturities.len(),
                yields: yields.len(),
            }
            .into());
        }

        Ok(YieldCurve::new(maturities, yields)?)
    }
}

fn execute_show(source: &CurveSource, ctx: &Context) -> Result<()> {
    let curve = source.curve()?;
    let rows: Vec<PillarRow> = curve
        .maturities()
        .iter()
        .zip(curve.yields())
        .map(|(&maturity, &yield_value)| PillarRow {
            maturity,
            yield_value,
        })
        .collect();

    ctx.series("Yield Curve", &rows, |r| {
        format!("{:.6} {:.6}", r.maturity, r.yield_value)
    })
}

fn execute_interpolate(args: &InterpolateArgs, ctx: &Context) -> Result<()> {
    let curve = args.source.curve()?;
    let yield_value = curve.interpolate_yield(args.maturity)?;

    let row = PillarRow {
        maturity: args.maturity,
        yield_value,
    };
    let rows = vec![
        KeyValue::number("Maturity (years)", args.maturity, 4),
        KeyValue::percent("Spot Yield", yield_value),
    ];

    ctx.report(
        "Interpolated Yield",
        &rows,
        &row,
        format_args!("{yield_value:.6}"),
    )
}

fn execute_forward(args: &ForwardArgs, ctx: &Context) -> Result<()> {
    let curve = args.source.curve()?;

    if let (Some(t1), Some(t2)) = (args.t1, args.t2) {
        let rate = curve.forward_rate(t1, t2)?;
        let forward = ForwardRate {
            start: t1,
            end: t2,
            rate,
        };
        let rows = vec![
            KeyValue::number("Start (years)", t1, 4),
            KeyValue::number("End (years)", t2, 4),
            KeyValue::percent("Forward Rate", rate),
        ];
        return ctx.report("Forward Rate", &rows, &forward, format_args!("{rate:.6}"));
    }

    let rows: Vec<ForwardRow> = curve
        .forward_curve()?
        .into_iter()
        .map(ForwardRow::from)
        .collect();

    ctx.series("Forward Curve", &rows, |r| {
        format!("{:.6} {:.6} {:.6}", r.start, r.end, r.rate)
    })
}
