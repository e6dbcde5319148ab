//! Option command implementation.
//!
//! Black-Scholes price, Greeks, implied volatility and chart series.

use anyhow::Result;
use clap::{Args, Subcommand, ValueEnum};
use serde::Serialize;
use tabled::Tabled;

use kestrel_options::prelude::*;

use crate::commands::{from_percent, Context};
use crate::output::{format_amount, KeyValue};

/// Arguments for the option command.
#[derive(Args, Debug)]
pub struct OptionArgs {
    #[command(subcommand)]
    pub command: OptionCommand,
}

/// Option subcommands.
#[derive(Subcommand, Debug)]
pub enum OptionCommand {
    /// Price a European option
    Price(ContractArgs),

    /// Compute delta, gamma, vega, theta and rho
    Greeks(ContractArgs),

    /// Solve for the volatility that reproduces a market price
    ImpliedVol(ImpliedVolArgs),

    /// Sample price or Greeks across a range of spot prices
    Chart(ChartArgs),
}

/// Contract terms shared by the pricing subcommands.
#[derive(Args, Debug, Clone)]
pub struct ContractArgs {
    /// Spot price of the underlying
    #[arg(short, long)]
    pub spot: f64,

    /// Strike price
    #[arg(short = 'k', long)]
    pub strike: f64,

    /// Time to expiry in years
    #[arg(short, long)]
    pub expiry: f64,

    /// Risk-free rate (as percentage, e.g., 5.0 for 5%)
    #[arg(short, long, default_value = "5.0", allow_negative_numbers = true)]
    pub rate: f64,

    /// Volatility (as percentage, e.g., 20.0 for 20%)
    #[arg(long)]
    pub vol: f64,

    /// Call or put
    #[arg(long, value_enum, default_value = "call")]
    pub kind: KindChoice,
}

/// Arguments for implied volatility.
#[derive(Args, Debug)]
pub struct ImpliedVolArgs {
    /// Observed option price
    #[arg(short, long)]
    pub price: f64,

    /// Spot price of the underlying
    #[arg(short, long)]
    pub spot: f64,

    /// Strike price
    #[arg(short = 'k', long)]
    pub strike: f64,

    /// Time to expiry in years
    #[arg(short, long)]
    pub expiry: f64,

    /// Risk-free rate (as percentage)
    #[arg(short, long, default_value = "5.0", allow_negative_numbers = true)]
    pub rate: f64,

    /// Call or put
    #[arg(long, value_enum, default_value = "call")]
    pub kind: KindChoice,
}

/// Arguments for chart sampling.
#[derive(Args, Debug)]
pub struct ChartArgs {
    #[command(flatten)]
    pub contract: ContractArgs,

    /// Lowest spot price. Defaults to the configured range around spot.
    #[arg(long)]
    pub from: Option<f64>,

    /// Highest spot price. Defaults to the configured range around spot.
    #[arg(long)]
    pub to: Option<f64>,

    /// Number of intervals (the series has steps + 1 points)
    #[arg(long)]
    pub steps: Option<u32>,

    /// Which series to sample
    #[arg(long, value_enum, default_value = "price")]
    pub series: SeriesChoice,
}

/// Option kind choices.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum KindChoice {
    /// Right to buy
    Call,
    /// Right to sell
    Put,
}

impl From<KindChoice> for OptionKind {
    fn from(choice: KindChoice) -> Self {
        match choice {
            KindChoice::Call => OptionKind::Call,
            KindChoice::Put => OptionKind::Put,
        }
    }
}

/// Chart series choices.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum SeriesChoice {
    /// Option value and intrinsic value
    Price,
    /// All five Greeks
    Greeks,
}

/// One row of a price chart.
#[derive(Debug, Serialize, Tabled)]
struct PriceRow {
    #[tabled(rename = "Spot", display_with = "format_amount")]
    spot: f64,
    #[tabled(rename = "Price", display_with = "format_amount")]
    price: f64,
    #[tabled(rename = "Intrinsic", display_with = "format_amount")]
    intrinsic: f64,
}

/// One row of a Greeks chart.
#[derive(Debug, Serialize, Tabled)]
struct GreeksRow {
    #[tabled(rename = "Spot", display_with = "format_amount")]
    spot: f64,
    #[tabled(rename = "Delta", display_with = "format_amount")]
    delta: f64,
    #[tabled(rename = "Gamma", display_with = "format_amount")]
    gamma: f64,
    #[tabled(rename = "Vega", display_with = "format_amount")]
    vega: f64,
    #[tabled(rename = "Theta/day", display_with = "format_amount")]
    theta: f64,
    #[tabled(rename = "Rho", display_with = "format_amount")]
    rho: f64,
}

/// Execute the option command.
pub fn execute(args: OptionArgs, ctx: &Context) -> Result<()> {
    match args.command {
        OptionCommand::Price(contract) => execute_price(&contract, ctx),
        OptionCommand::Greeks(contract) => execute_greeks(&contract, ctx),
        OptionCommand::ImpliedVol(iv_args) => execute_implied_vol(&iv_args, ctx),
        OptionCommand::Chart(chart_args) => execute_chart(&chart_args, ctx),
    }
}

impl ContractArgs {
    fn params(&self) -> Result<OptionParams> {
        Ok(OptionParams::new(
            self.spot,
            self.strike,
            self.expiry,
            from_percent(self.rate),
            from_percent(self.vol),
            self.kind.into(),
        )?)
    }
}

fn contract_rows(params: &OptionParams) -> Vec<KeyValue> {
    vec![
        KeyValue::new("Kind", params.kind().to_string()),
        KeyValue::number("Spot", params.spot(), 4),
        KeyValue::number("Strike", params.strike(), 4),
        KeyValue::number("Expiry (years)", params.time_to_maturity(), 4),
        KeyValue::percent("Rate", params.rate()),
        KeyValue::percent("Volatility", params.volatility()),
    ]
}

fn greek_rows(greeks: &Greeks) -> [KeyValue; 5] {
    [
        KeyValue::number("Delta", greeks.delta, 6),
        KeyValue::number("Gamma", greeks.gamma, 6),
        KeyValue::number("Vega", greeks.vega, 6),
        KeyValue::number("Theta (per day)", greeks.theta, 6),
        KeyValue::number("Rho", greeks.rho, 6),
    ]
}

fn execute_price(contract: &ContractArgs, ctx: &Context) -> Result<()> {
    let params = contract.params()?;
    if params.is_expired() {
        ctx.warn("Option has expired; reporting intrinsic value");
    }

    let result = black_scholes(&params);
    let optional = |v: Option<f64>| v.map_or_else(|| "n/a".to_string(), |v| format!("{v:.6}"));

    let mut rows = contract_rows(&params);
    rows.push(KeyValue::separator());
    rows.push(KeyValue::number("Price", result.price, 6));
    rows.push(KeyValue::number(
        "Intrinsic Value",
        intrinsic_value(params.spot(), params.strike(), params.kind()),
        6,
    ));
    rows.push(KeyValue::new("d1", optional(result.d1)));
    rows.push(KeyValue::new("d2", optional(result.d2)));

    ctx.report(
        "Black-Scholes Price",
        &rows,
        &result,
        format_args!("{:.6}", result.price),
    )
}

fn execute_greeks(contract: &ContractArgs, ctx: &Context) -> Result<()> {
    let params = contract.params()?;
    let greeks = greeks(&params);

    let mut rows = contract_rows(&params);
    rows.push(KeyValue::separator());
    rows.extend(greek_rows(&greeks));

    ctx.report(
        "Option Greeks",
        &rows,
        &greeks,
        format_args!(
            "{:.6} {:.6} {:.6} {:.6} {:.6}",
            greeks.delta, greeks.gamma, greeks.vega, greeks.theta, greeks.rho
        ),
    )
}

fn execute_implied_vol(args: &ImpliedVolArgs, ctx: &Context) -> Result<()> {
    let kind = OptionKind::from(args.kind);
    let rate = from_percent(args.rate);

    let solver = ImpliedVolSolver::new().with_config(ctx.config.implied_vol);
    let result = solver.solve(args.price, args.spot, args.strike, args.expiry, rate, kind)?;

    let rows = vec![
        KeyValue::new("Kind", kind.to_string()),
        KeyValue::number("Market Price", args.price, 6),
        KeyValue::number("Spot", args.spot, 4),
        KeyValue::number("Strike", args.strike, 4),
        KeyValue::number("Expiry (years)", args.expiry, 4),
        KeyValue::percent("Rate", rate),
        KeyValue::separator(),
        KeyValue::percent("Implied Volatility", result.volatility),
        KeyValue::new("Iterations", result.iterations.to_string()),
        KeyValue::new("Residual", format!("{:.2e}", result.residual)),
    ];

    ctx.report(
        "Implied Volatility",
        &rows,
        &result,
        format_args!("{:.6}", result.volatility),
    )
}

fn execute_chart(args: &ChartArgs, ctx: &Context) -> Result<()> {
    let params = args.contract.params()?;
    let sampling = &ctx.config.sampling;

    let (low, high) = sampling.spot_bounds(params.spot());
    let grid = SampleGrid::new(
        args.from.unwrap_or(low),
        args.to.unwrap_or(high),
        args.steps.unwrap_or(sampling.steps),
    )?;

    match args.series {
        SeriesChoice::Price => {
            let rows: Vec<PriceRow> = price_vs_spot(&params, &grid)?
                .map(|p| PriceRow {
                    spot: p.spot,
                    price: p.price,
                    intrinsic: p.intrinsic,
                })
                .collect();
            ctx.series("Price vs Spot", &rows, |r| {
                format!("{:.6} {:.6}", r.spot, r.price)
            })
        }
        SeriesChoice::Greeks => {
            let rows: Vec<GreeksRow> = greeks_vs_spot(&params, &grid)?
                .map(|p| GreeksRow {
                    spot: p.spot,
                    delta: p.greeks.delta,
                    gamma: p.greeks.gamma,
                    vega: p.greeks.vega,
                    theta: p.greeks.theta,
                    rho: p.greeks.rho,
                })
                .collect();
            ctx.series("Greeks vs Spot", &rows, |r| {
                format!("{:.6} {:.6}", r.spot, r.delta)
            })
        }
    }
}
