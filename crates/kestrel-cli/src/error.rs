//! CLI error types.

use thiserror::Error;

/// CLI error type.
#[derive(Debug, Error)]
pub enum CliError {
    /// A comma-separated list entry is not a number.
    #[error("Invalid number '{input}' in --{flag}")]
    InvalidNumber {
        /// Flag the list came from.
        flag: &'static str,
        /// The offending entry.
        input: String,
    },

    /// Curve maturities and yields differ in length.
    #[error("Number of maturities ({maturities}) must match number of yields ({yields})")]
    LengthMismatch {
        /// Number of maturities given.
        maturities: usize,
        /// Number of yields given.
        yields: usize,
    },

    /// Configuration could not be loaded or failed validation.
    #[error("Configuration error: {0}")]
    Config(#[from] kestrel_config::ConfigError),
}

/// CLI result type.
pub type CliResult<T> = Result<T, CliError>;
