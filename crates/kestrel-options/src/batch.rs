//! Batch valuation of many contracts.
//!
//! With the `parallel` feature the batch is spread over the rayon thread
//! pool; results keep the input order either way.

use crate::pricing::black_scholes;
use crate::types::{BlackScholesResult, OptionParams};

/// Prices every contract in `contracts`.
#[cfg(feature = "parallel")]
pub fn price_batch(contracts: &[OptionParams]) -> Vec<BlackScholesResult> {
    use rayon::prelude::*;

    contracts.par_iter().map(black_scholes).collect()
}

/// Prices every contract in `contracts` (sequential fallback).
#[cfg(not(feature = "parallel"))]
pub fn price_batch(contracts: &[OptionParams]) -> Vec<BlackScholesResult> {
    contracts.iter().map(black_scholes).collect()
}
