//! Bond command implementation.
//!
//! Prices plain fixed-coupon bonds from yield, solves for yield from price,
//! and reports duration, convexity and shock estimates.

use anyhow::Result;
use clap::{ArgGroup, Args, Subcommand};
use serde::Serialize;
use tabled::Tabled;

use kestrel_bonds::prelude::*;

use crate::commands::{from_percent, Context};
use crate::output::{format_amount, format_percent, format_rate, KeyValue};

/// Arguments for the bond command.
#[derive(Args, Debug)]
pub struct BondArgs {
    #[command(subcommand)]
    pub command: BondCommand,
}

/// Bond subcommands.
#[derive(Subcommand, Debug)]
pub enum BondCommand {
    /// Price a bond from its yield to maturity
    Price(PriceArgs),

    /// Solve for yield to maturity from a market price
    Ytm(YtmArgs),

    /// Price, duration, convexity and DV01 in one report
    Analyze(AnalyzeArgs),

    /// List the coupon and redemption cash flows
    Cashflows(BondSpec),

    /// Estimate the price impact of a parallel yield shift
    Shock(ShockArgs),

    /// Sample price across a range of yields
    Profile(ProfileArgs),
}

/// Bond terms shared by every subcommand.
#[derive(Args, Debug, Clone)]
pub struct BondSpec {
    /// Face (par) value
    #[arg(long, default_value = "1000")]
    pub face: f64,

    /// Annual coupon rate (as percentage, e.g., 5.0 for 5%)
    #[arg(short, long)]
    pub coupon: f64,

    /// Years to maturity
    #[arg(long)]
    pub years: f64,

    /// Coupon frequency: 1=Annual, 2=SemiAnnual, 4=Quarterly, 12=Monthly
    #[arg(long, default_value = "2")]
    pub frequency: u32,
}

/// Arguments for pricing from yield.
#[derive(Args, Debug)]
pub struct PriceArgs {
    #[command(flatten)]
    pub bond: BondSpec,

    /// Yield to maturity (as percentage)
    #[arg(short = 'y', long = "yield", allow_negative_numbers = true)]
    pub yield_pct: f64,
}

/// Arguments for solving yield from price.
#[derive(Args, Debug)]
pub struct YtmArgs {
    #[command(flatten)]
    pub bond: BondSpec,

    /// Market price
    #[arg(short, long)]
    pub price: f64,
}

/// Arguments for the full analysis.
#[derive(Args, Debug)]
#[command(group(ArgGroup::new("quote").required(true).args(["yield_pct", "price"])))]
pub struct AnalyzeArgs {
    #[command(flatten)]
    pub bond: BondSpec,

    /// Yield to maturity (as percentage)
    #[arg(short = 'y', long = "yield", allow_negative_numbers = true)]
    pub yield_pct: Option<f64>,

    /// Market price; the yield is solved first
    #[arg(short, long)]
    pub price: Option<f64>,
}

/// Arguments for a yield shock.
#[derive(Args, Debug)]
pub struct ShockArgs {
    #[command(flatten)]
    pub bond: BondSpec,

    /// Starting yield to maturity (as percentage)
    #[arg(short = 'y', long = "yield", allow_negative_numbers = true)]
    pub yield_pct: f64,

    /// Parallel shift in basis points
    #[arg(long, default_value = "100", allow_negative_numbers = true)]
    pub shift_bps: f64,

    /// Use the duration term only
    #[arg(long)]
    pub no_convexity: bool,
}

/// Arguments for a price/yield profile.
#[derive(Args, Debug)]
pub struct ProfileArgs {
    #[command(flatten)]
    pub bond: BondSpec,

    /// Lowest yield (as percentage). Defaults to the configured range.
    #[arg(long, allow_negative_numbers = true)]
    pub from: Option<f64>,

    /// Highest yield (as percentage). Defaults to the configured range.
    #[arg(long, allow_negative_numbers = true)]
    pub to: Option<f64>,

    /// Number of intervals (the profile has steps + 1 points)
    #[arg(long)]
    pub steps: Option<u32>,
}

/// Price at a given yield, with the running yield.
#[derive(Debug, Serialize)]
struct PriceOutput {
    yield_value: f64,
    price: f64,
    current_yield: f64,
}

/// One row of the cash-flow schedule.
#[derive(Debug, Serialize, Tabled)]
struct CashFlowRow {
    #[tabled(rename = "Period")]
    period: u32,
    #[tabled(rename = "Time (years)", display_with = "format_amount")]
    time: f64,
    #[tabled(rename = "Amount", display_with = "format_amount")]
    amount: f64,
}

/// One row of the price/yield profile.
#[derive(Debug, Serialize, Tabled)]
struct ProfileRow {
    #[tabled(rename = "Yield", display_with = "format_rate")]
    yield_value: f64,
    #[tabled(rename = "Price", display_with = "format_amount")]
    price: f64,
}

/// Execute the bond command.
pub fn execute(args: BondArgs, ctx: &Context) -> Result<()> {
    match args.command {
        BondCommand::Price(price_args) => execute_price(&price_args, ctx),
        BondCommand::Ytm(ytm_args) => execute_ytm(&ytm_args, ctx),
        BondCommand::Analyze(analyze_args) => execute_analyze(&analyze_args, ctx),
        BondCommand::Cashflows(spec) => execute_cashflows(&spec, ctx),
        BondCommand::Shock(shock_args) => execute_shock(&shock_args, ctx),
        BondCommand::Profile(profile_args) => execute_profile(&profile_args, ctx),
    }
}

impl BondSpec {
    fn params(&self, ctx: &Context) -> Result<BondParams> {
        let frequency = Frequency::try_from(self.frequency)?;
        let params = BondParams::new(self.face, from_percent(self.coupon), self.years, frequency)?;
        if params.is_matured() {
            ctx.warn("Bond has no remaining coupon periods");
        }
        Ok(params)
    }
}

fn bond_rows(params: &BondParams) -> Vec<KeyValue> {
    vec![
        KeyValue::number("Face Value", params.face_value(), 2),
        KeyValue::percent("Coupon", params.coupon_rate()),
        KeyValue::number("Years", params.years_to_maturity(), 4),
        KeyValue::new("Frequency", params.frequency().to_string()),
        KeyValue::new("Periods", params.total_periods().to_string()),
    ]
}

fn execute_price(args: &PriceArgs, ctx: &Context) -> Result<()> {
    let params = args.bond.params(ctx)?;
    let ytm = from_percent(args.yield_pct);
    let price = price_from_yield(&params, ytm)?;
    let output = PriceOutput {
        yield_value: ytm,
        price,
        current_yield: current_yield(&params, price)?,
    };

    let mut rows = bond_rows(&params);
    rows.push(KeyValue::separator());
    rows.push(KeyValue::percent("Yield (Input)", ytm));
    rows.push(KeyValue::number("Price", price, 6));
    rows.push(KeyValue::percent("Current Yield", output.current_yield));

    ctx.report("Bond Price", &rows, &output, format_args!("{price:.6}"))
}

fn execute_ytm(args: &YtmArgs, ctx: &Context) -> Result<()> {
    let params = args.bond.params(ctx)?;
    let solver = YieldSolver::new().with_config(ctx.config.yield_solver);
    let result = solver.solve(&params, args.price)?;

    let mut rows = bond_rows(&params);
    rows.push(KeyValue::separator());
    rows.push(KeyValue::number("Price (Input)", args.price, 6));
    rows.push(KeyValue::percent("Yield to Maturity", result.yield_value));
    rows.push(KeyValue::percent("Current Yield", current_yield(&params, args.price)?));
    rows.push(KeyValue::new("Iterations", result.iterations.to_string()));
    rows.push(KeyValue::new("Residual", format!("{:.2e}", result.residual)));

    ctx.report(
        "Yield to Maturity",
        &rows,
        &result,
        format_args!("{:.6}", result.yield_value),
    )
}

fn execute_analyze(args: &AnalyzeArgs, ctx: &Context) -> Result<()> {
    let params = args.bond.params(ctx)?;
    let ytm = match (args.yield_pct, args.price) {
        (Some(yield_pct), _) => from_percent(yield_pct),
        (None, Some(price)) => {
            YieldSolver::new()
                .with_config(ctx.config.yield_solver)
                .solve(&params, price)?
                .yield_value
        }
        (None, None) => anyhow::bail!("either --yield or --price is required"),
    };
    let summary = analyze(&params, ytm)?;

    let mut rows = bond_rows(&params);
    rows.push(KeyValue::separator());
    rows.push(KeyValue::percent("Yield to Maturity", summary.yield_value));
    rows.push(KeyValue::number("Price", summary.price, 6));
    rows.push(KeyValue::number("Macaulay Duration", summary.macaulay_duration, 4));
    rows.push(KeyValue::number("Modified Duration", summary.modified_duration, 4));
    rows.push(KeyValue::number("Convexity", summary.convexity, 4));
    rows.push(KeyValue::number("DV01", summary.dv01, 6));

    ctx.report(
        "Bond Analytics",
        &rows,
        &summary,
        format_args!(
            "{:.6} {:.4} {:.4} {:.6}",
            summary.price, summary.modified_duration, summary.convexity, summary.dv01
        ),
    )
}

fn execute_cashflows(spec: &BondSpec, ctx: &Context) -> Result<()> {
    let params = spec.params(ctx)?;
    let rows: Vec<CashFlowRow> = cash_flow_schedule(&params)
        .into_iter()
        .map(|cf| CashFlowRow {
            period: cf.period,
            time: cf.time,
            amount: cf.amount,
        })
        .collect();

    ctx.series("Cash Flows", &rows, |r| format!("{:.6} {:.6}", r.time, r.amount))
}

fn execute_shock(args: &ShockArgs, ctx: &Context) -> Result<()> {
    let params = args.bond.params(ctx)?;
    let ytm = from_percent(args.yield_pct);
    let estimate =
        estimate_price_change(&params, ytm, args.shift_bps * BASIS_POINT, !args.no_convexity)?;

    let mut rows = bond_rows(&params);
    rows.push(KeyValue::separator());
    rows.push(KeyValue::percent("Yield", ytm));
    rows.push(KeyValue::number("Shift (bps)", args.shift_bps, 2));
    rows.push(KeyValue::number("Current Price", estimate.current_price, 6));
    rows.push(KeyValue::new("Duration Effect", format_percent(estimate.duration_effect, 4)));
    rows.push(KeyValue::new("Convexity Effect", format_percent(estimate.convexity_effect, 4)));
    rows.push(KeyValue::new("Estimated Change", format_percent(estimate.estimated_change, 4)));
    rows.push(KeyValue::number("Estimated Price", estimate.estimated_price, 6));
    rows.push(KeyValue::number("Actual Price", estimate.actual_price, 6));
    rows.push(KeyValue::new("Actual Change", format_percent(estimate.actual_change, 4)));
    rows.push(KeyValue::new("Estimation Error", format_percent(estimate.error, 4)));

    ctx.report(
        "Yield Shock",
        &rows,
        &estimate,
        format_args!("{:.6}", estimate.estimated_price),
    )
}

fn execute_profile(args: &ProfileArgs, ctx: &Context) -> Result<()> {
    let params = args.bond.params(ctx)?;
    let sampling = &ctx.config.sampling;
    let grid = SampleGrid::new(
        args.from.map_or(sampling.yield_min, from_percent),
        args.to.map_or(sampling.yield_max, from_percent),
        args.steps.unwrap_or(sampling.steps),
    )?;

    let rows: Vec<ProfileRow> = price_yield_profile(&params, &grid)?
        .map(|p| ProfileRow {
            yield_value: p.yield_value,
            price: p.price,
        })
        .collect();

    ctx.series("Price vs Yield", &rows, |r| {
        format!("{:.6} {:.6}", r.yield_value, r.price)
    })
}
