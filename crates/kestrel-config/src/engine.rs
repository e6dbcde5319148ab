//! Engine configuration: solver settings and chart sampling defaults.

use std::path::Path;

use log::debug;
use serde::{Deserialize, Serialize};

use kestrel_bonds::YieldSolverConfig;
use kestrel_options::ImpliedVolConfig;

use crate::error::{ConfigError, ConfigResult, Validate, ValidationError};

/// Maximum iterations accepted for either solver.
const MAX_SOLVER_ITERATIONS: u32 = 10_000;

/// Maximum points accepted for a chart series.
const MAX_SAMPLE_STEPS: u32 = 10_000;

fn default_steps() -> u32 {
    50
}

fn default_spot_range() -> f64 {
    0.5
}

fn default_yield_min() -> f64 {
    0.01
}

fn default_yield_max() -> f64 {
    0.15
}

/// Defaults for chart sampling when the caller gives no explicit range.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SamplingConfig {
    /// Number of intervals in a series.
    #[serde(default = "default_steps")]
    pub steps: u32,
    /// Half-width of the spot range as a fraction of spot
    /// (0.5 samples from 50% to 150% of spot).
    #[serde(default = "default_spot_range")]
    pub spot_range: f64,
    /// Lowest yield of a price/yield profile.
    #[serde(default = "default_yield_min")]
    pub yield_min: f64,
    /// Highest yield of a price/yield profile.
    #[serde(default = "default_yield_max")]
    pub yield_max: f64,
}

impl Default for SamplingConfig {
    fn default() -> Self {
        Self {
            steps: default_steps(),
            spot_range: default_spot_range(),
            yield_min: default_yield_min(),
            yield_max: default_yield_max(),
        }
    }
}

impl SamplingConfig {
    /// Sets the number of intervals.
    #[must_use]
    pub fn with_steps(mut self, steps: u32) -> Self {
        self.steps = steps;
        self
    }

    /// Sets the spot half-width.
    #[must_use]
    pub fn with_spot_range(mut self, spot_range: f64) -> Self {
        self.spot_range = spot_range;
        self
    }

    /// Spot bounds around `spot`.
    pub fn spot_bounds(&self, spot: f64) -> (f64, f64) {
        (spot * (1.0 - self.spot_range), spot * (1.0 + self.spot_range))
    }
}

/// Complete engine configuration.
///
/// Every section is optional in a file; missing sections and fields take
/// the engine defaults.
///
/// # Example
///
/// ```rust
/// use kestrel_config::{EngineConfig, Validate};
///
/// let config = EngineConfig::from_toml_str(
///     r#"
///     [implied_vol]
///     tolerance = 1e-8
///
///     [sampling]
///     steps = 100
///     "#,
/// )
/// .unwrap();
///
/// assert_eq!(config.implied_vol.tolerance, 1e-8);
/// assert_eq!(config.implied_vol.max_iterations, 100);
/// assert_eq!(config.sampling.steps, 100);
/// assert!(config.is_valid());
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct EngineConfig {
    /// Implied-volatility search.
    pub implied_vol: ImpliedVolConfig,
    /// Yield-to-maturity search.
    pub yield_solver: YieldSolverConfig,
    /// Chart sampling defaults.
    pub sampling: SamplingConfig,
}

impl EngineConfig {
    /// Creates the default configuration.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Replaces the implied-volatility settings.
    #[must_use]
    pub fn with_implied_vol(mut self, implied_vol: ImpliedVolConfig) -> Self {
        self.implied_vol = implied_vol;
        self
    }

    /// Replaces the yield solver settings.
    #[must_use]
    pub fn with_yield_solver(mut self, yield_solver: YieldSolverConfig) -> Self {
        self.yield_solver = yield_solver;
        self
    }

    /// Replaces the sampling defaults.
    #[must_use]
    pub fn with_sampling(mut self, sampling: SamplingConfig) -> Self {
        self.sampling = sampling;
        self
    }

    /// Parses and validates a JSON document.
    pub fn from_json_str(json: &str) -> ConfigResult<Self> {
        let config: Self = serde_json::from_str(json)?;
        config.validate_or_error()?;
        Ok(config)
    }

    /// Parses and validates a TOML document.
    pub fn from_toml_str(toml_text: &str) -> ConfigResult<Self> {
        let config: Self = toml::from_str(toml_text)?;
        config.validate_or_error()?;
        Ok(config)
    }

    /// Loads a `.json` or `.toml` file.
    pub fn from_path(path: impl AsRef<Path>) -> ConfigResult<Self> {
        let path = path.as_ref();
        let extension = path
            .extension()
            .and_then(|ext| ext.to_str())
            .map(str::to_ascii_lowercase);

        let text = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;

        let config = match extension.as_deref() {
            Some("json") => Self::from_json_str(&text)?,
            Some("toml") => Self::from_toml_str(&text)?,
            _ => {
                return Err(ConfigError::UnsupportedFormat {
                    path: path.to_path_buf(),
                })
            }
        };

        debug!("loaded engine configuration from {}", path.display());
        Ok(config)
    }

    /// Pretty-printed JSON.
    pub fn to_json_string(&self) -> ConfigResult<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    /// TOML document.
    pub fn to_toml_string(&self) -> ConfigResult<String> {
        Ok(toml::to_string(self)?)
    }
}

fn check_tolerance(errors: &mut Vec<ValidationError>, field: &str, value: f64) {
    if !(value > 0.0 && value <= 1e-2) {
        errors.push(ValidationError::with_rule(
            field,
            format!("Tolerance {value} must be in (0, 0.01]"),
            "valid_tolerance",
        ));
    }
}

fn check_iterations(errors: &mut Vec<ValidationError>, value: u32) {
    if value == 0 || value > MAX_SOLVER_ITERATIONS {
        errors.push(ValidationError::with_rule(
            "max_iterations",
            format!("Max iterations must be between 1 and {MAX_SOLVER_ITERATIONS}"),
            "valid_iterations",
        ));
    }
}

impl Validate for ImpliedVolConfig {
    fn validate(&self) -> Vec<ValidationError> {
        let mut errors = Vec::new();

        check_tolerance(&mut errors, "tolerance", self.tolerance);
        check_iterations(&mut errors, self.max_iterations);

        if !(self.min_vega > 0.0 && self.min_vega.is_finite()) {
            errors.push(ValidationError::new("min_vega", "Vega floor must be positive"));
        }
        if !(self.max_volatility > 0.0 && self.max_volatility.is_finite()) {
            errors.push(ValidationError::new(
                "max_volatility",
                "Volatility cap must be positive",
            ));
        }
        if !(self.volatility_reset > 0.0 && self.volatility_reset <= self.max_volatility) {
            errors.push(ValidationError::with_rule(
                "volatility_reset",
                "Reset volatility must be in (0, max_volatility]",
                "reset_in_range",
            ));
        }
        if !(self.initial_volatility > 0.0 && self.initial_volatility <= self.max_volatility) {
            errors.push(ValidationError::with_rule(
                "initial_volatility",
                "Initial volatility must be in (0, max_volatility]",
                "initial_in_range",
            ));
        }

        errors
    }
}

impl Validate for YieldSolverConfig {
    fn validate(&self) -> Vec<ValidationError> {
        let mut errors = Vec::new();

        check_tolerance(&mut errors, "tolerance", self.tolerance);
        check_iterations(&mut errors, self.max_iterations);

        if !(self.lower_bound.is_finite() && self.upper_bound.is_finite()) {
            errors.push(ValidationError::new("lower_bound", "Yield bounds must be finite"));
        } else if self.upper_bound <= self.lower_bound {
            errors.push(ValidationError::with_rule(
                "upper_bound",
                format!(
                    "Upper bound {} must exceed lower bound {}",
                    self.upper_bound, self.lower_bound
                ),
                "ordered_bounds",
            ));
        }

        errors
    }
}

impl Validate for SamplingConfig {
    fn validate(&self) -> Vec<ValidationError> {
        let mut errors = Vec::new();

        if self.steps == 0 || self.steps > MAX_SAMPLE_STEPS {
            errors.push(ValidationError::with_rule(
                "steps",
                format!("Steps must be between 1 and {MAX_SAMPLE_STEPS}"),
                "valid_steps",
            ));
        }
        if !(self.spot_range > 0.0 && self.spot_range < 1.0) {
            errors.push(ValidationError::with_rule(
                "spot_range",
                "Spot range must be in (0, 1) so the lowest spot stays positive",
                "positive_spot",
            ));
        }
        if !(self.yield_min.is_finite() && self.yield_max.is_finite())
            || self.yield_max <= self.yield_min
        {
            errors.push(ValidationError::with_rule(
                "yield_max",
                "Yield range must be finite with yield_max > yield_min",
                "ordered_bounds",
            ));
        }

        errors
    }
}

impl Validate for EngineConfig {
    fn validate(&self) -> Vec<ValidationError> {
        let sections = [
            ("implied_vol", self.implied_vol.validate()),
            ("yield_solver", self.yield_solver.validate()),
            ("sampling", self.sampling.validate()),
        ];

        sections
            .into_iter()
            .flat_map(|(name, errors)| errors.into_iter().map(move |e| e.in_section(name)))
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_defaults_match_engine_constants() {
        let config = EngineConfig::default();

        assert_eq!(config.implied_vol, ImpliedVolConfig::default());
        assert_eq!(config.implied_vol.tolerance, 1e-6);
        assert_eq!(config.implied_vol.initial_volatility, 0.3);
        assert_eq!(config.yield_solver.lower_bound, 0.0001);
        assert_eq!(config.yield_solver.upper_bound, 0.5);
        assert_eq!(config.sampling.steps, 50);
        assert!(config.is_valid());
    }

    #[test]
    fn test_partial_json() {
        let config =
            EngineConfig::from_json_str(r#"{"yield_solver": {"max_iterations": 200}}"#).unwrap();

        assert_eq!(config.yield_solver.max_iterations, 200);
        assert_eq!(config.yield_solver.tolerance, 1e-6);
        assert_eq!(config.sampling, SamplingConfig::default());
    }

    #[test]
    fn test_invalid_values_collected() {
        let mut config = EngineConfig::default();
        config.implied_vol.tolerance = 0.0;
        config.yield_solver.upper_bound = 0.0;
        config.sampling.steps = 0;

        let errors = config.validate();
        let fields: Vec<&str> = errors.iter().map(|e| e.field.as_str()).collect();
        assert_eq!(
            fields,
            vec!["implied_vol.tolerance", "yield_solver.upper_bound", "sampling.steps"]
        );
        assert!(matches!(
            config.validate_or_error(),
            Err(ConfigError::MultipleValidationErrors(_))
        ));
    }

    #[test]
    fn test_invalid_document_rejected() {
        let err = EngineConfig::from_json_str(r#"{"sampling": {"spot_range": 1.5}}"#).unwrap_err();
        assert!(matches!(err, ConfigError::Validation { .. }));

        let err = EngineConfig::from_toml_str("implied_vol = 3").unwrap_err();
        assert!(matches!(err, ConfigError::Deserialization(_)));
    }

    #[test]
    fn test_toml_round_trip() {
        let config = EngineConfig::default()
            .with_sampling(SamplingConfig::default().with_steps(200).with_spot_range(0.25));
        let text = config.to_toml_string().unwrap();
        let back = EngineConfig::from_toml_str(&text).unwrap();
        assert_eq!(back, config);
    }

    #[test]
    fn test_from_path() {
        let mut json = tempfile::Builder::new().suffix(".json").tempfile().unwrap();
        write!(json, r#"{{"implied_vol": {{"max_iterations": 40}}}}"#).unwrap();
        let config = EngineConfig::from_path(json.path()).unwrap();
        assert_eq!(config.implied_vol.max_iterations, 40);

        let mut toml_file = tempfile::Builder::new().suffix(".toml").tempfile().unwrap();
        writeln!(toml_file, "[sampling]\nsteps = 12").unwrap();
        let config = EngineConfig::from_path(toml_file.path()).unwrap();
        assert_eq!(config.sampling.steps, 12);

        let yaml = tempfile::Builder::new().suffix(".yaml").tempfile().unwrap();
        assert!(matches!(
            EngineConfig::from_path(yaml.path()),
            Err(ConfigError::UnsupportedFormat { .. })
        ));

        assert!(matches!(
            EngineConfig::from_path("/nonexistent/kestrel.toml"),
            Err(ConfigError::Io { .. })
        ));
    }

    #[test]
    fn test_spot_bounds() {
        let sampling = SamplingConfig::default();
        assert_eq!(sampling.spot_bounds(100.0), (50.0, 150.0));
    }
}
