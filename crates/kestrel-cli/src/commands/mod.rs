//! CLI command implementations.

pub mod bond;
pub mod curve;
pub mod option;

pub use bond::BondArgs;
pub use curve::CurveArgs;
pub use option::OptionArgs;

use std::fmt::Display;

use serde::Serialize;
use tabled::Tabled;

use kestrel_config::EngineConfig;

use crate::cli::OutputFormat;
use crate::error::{CliError, CliResult};
use crate::output::{print_header, print_output, print_single, print_warning, KeyValue};

/// Settings shared by every command.
pub struct Context {
    /// Requested output format.
    pub format: OutputFormat,
    /// Suppress headers and warnings.
    pub quiet: bool,
    /// Solver and sampling settings.
    pub config: EngineConfig,
}

impl Context {
    /// Prints a section header in table mode.
    fn header(&self, title: &str) {
        if !self.quiet {
            print_header(title);
        }
    }

    /// Prints a warning unless running quietly.
    fn warn(&self, message: &str) {
        if !self.quiet {
            print_warning(message);
        }
    }

    /// Emits a single result: labelled rows for tables and CSV, the
    /// engine's own value for JSON, one bare value for minimal output.
    fn report<T: Serialize>(
        &self,
        title: &str,
        rows: &[KeyValue],
        value: &T,
        minimal: impl Display,
    ) -> anyhow::Result<()> {
        match self.format {
            OutputFormat::Table => {
                self.header(title);
                print_output(rows, self.format)
            }
            OutputFormat::Json => print_single(value),
            OutputFormat::Csv => {
                let filled: Vec<KeyValue> =
                    rows.iter().filter(|r| !r.key.is_empty()).cloned().collect();
                print_output(&filled, self.format)
            }
            OutputFormat::Minimal => {
                println!("{minimal}");
                Ok(())
            }
        }
    }

    /// Emits a series of rows; minimal output prints one line per row.
    fn series<T: Serialize + Tabled>(
        &self,
        title: &str,
        rows: &[T],
        minimal: impl Fn(&T) -> String,
    ) -> anyhow::Result<()> {
        match self.format {
            OutputFormat::Table => {
                self.header(title);
                print_output(rows, self.format)
            }
            OutputFormat::Minimal => {
                for row in rows {
                    println!("{}", minimal(row));
                }
                Ok(())
            }
            other => print_output(rows, other),
        }
    }
}

/// Converts a percentage argument (5.0 for 5%) to a fraction.
pub fn from_percent(value: f64) -> f64 {
    value / 100.0
}

/// Parses a comma-separated list of numbers.
pub fn parse_list(input: &str, flag: &'static str) -> CliResult<Vec<f64>> {
    input
        .split(',')
        .map(|s| {
            s.trim().parse::<f64>().map_err(|_| CliError::InvalidNumber {
                flag,
                input: s.trim().to_string(),
            })
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_list() {
        assert_eq!(parse_list("0.5, 1,2.5", "maturities").unwrap(), vec![0.5, 1.0, 2.5]);
        assert!(matches!(
            parse_list("1,x", "yields"),
            Err(CliError::InvalidNumber { flag: "yields", .. })
        ));
    }

    #[test]
    fn test_from_percent() {
        assert!((from_percent(5.0) - 0.05).abs() < 1e-15);
    }
}
