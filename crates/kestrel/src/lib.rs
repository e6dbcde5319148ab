//! # Kestrel
//!
//! Option and bond valuation engines behind a single dependency.
//!
//! - [`options`]: Black-Scholes prices, Greeks, implied volatility and chart series
//! - [`bonds`]: Bond pricing, yield to maturity, duration, convexity and yield curves
//! - [`math`]: Normal distribution, root finders, interpolation and sample grids
//! - [`config`]: Solver and sampling settings loaded from JSON or TOML
//!
//! ## Example
//!
//! ```rust
//! use kestrel::prelude::*;
//!
//! let call = OptionParams::new(100.0, 105.0, 0.25, 0.05, 0.2, OptionKind::Call).unwrap();
//! let bond = BondParams::new(1000.0, 0.05, 10.0, Frequency::SemiAnnual).unwrap();
//!
//! let premium = black_scholes(&call).price;
//! let summary = analyze(&bond, 0.06).unwrap();
//!
//! assert!(premium > 0.0);
//! assert!(summary.price < bond.face_value());
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]

pub use kestrel_bonds as bonds;
pub use kestrel_config as config;
pub use kestrel_math as math;
pub use kestrel_options as options;

/// Everything needed to price options and bonds.
pub mod prelude {
    pub use kestrel_bonds::prelude::*;
    pub use kestrel_config::{EngineConfig, SamplingConfig, Validate};
    pub use kestrel_options::prelude::*;
}
