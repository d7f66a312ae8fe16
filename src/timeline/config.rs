//! Simulation configuration.
//!
//! Loaded from an optional TOML file, then overridden by CLI flags, and
//! validated before any trace is read.
//!
//! ```toml
//! bandwidth = 25e9      # bytes/sec
//! latency_us = 1.5
//! algorithm = "ring"
//! ratio = 4.0           # compression factor, configured run only
//! savefig = "timeline.svg"
//! title = "Jacobi solver, 64 ranks"
//! ```

use crate::model::cost::{Algorithm, CostModelParameters};
use crate::utils::config::{
    DEFAULT_BANDWIDTH, DEFAULT_LATENCY_US, DEFAULT_RATIO, DEFAULT_TIMELINE_PATH, SECS_PER_US,
    TRACE_PREFIX, TRACE_SUFFIX,
};
use crate::utils::error::ConfigError;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

/// Complete simulation configuration
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
#[serde(default)]
pub struct SimulationConfig {
    /// Reference link bandwidth in bytes/sec
    pub bandwidth: f64,

    /// Per-operation latency in microseconds
    pub latency_us: f64,

    pub algorithm: Algorithm,

    /// Bandwidth multiplier applied to the configured run only
    pub ratio: f64,

    pub trace_prefix: String,
    pub trace_suffix: String,

    /// Where the rendered timeline goes
    pub savefig: PathBuf,

    /// Chart title, the renderer's default when absent
    pub title: Option<String>,
}

impl Default for SimulationConfig {
    fn default() -> Self {
        Self {
            bandwidth: DEFAULT_BANDWIDTH,
            latency_us: DEFAULT_LATENCY_US,
            algorithm: Algorithm::Flat,
            ratio: DEFAULT_RATIO,
            trace_prefix: TRACE_PREFIX.to_string(),
            trace_suffix: TRACE_SUFFIX.to_string(),
            savefig: PathBuf::from(DEFAULT_TIMELINE_PATH),
            title: None,
        }
    }
}

impl SimulationConfig {
    /// Check every numeric parameter
    ///
    /// # Errors
    /// * `ConfigError::InvalidBandwidth` - bandwidth not positive and finite
    /// * `ConfigError::InvalidLatency` - latency negative or not finite
    /// * `ConfigError::InvalidRatio` - ratio not positive and finite
    pub fn validate(&self) -> Result<(), ConfigError> {
        if !self.bandwidth.is_finite() || self.bandwidth <= 0.0 {
            return Err(ConfigError::InvalidBandwidth(self.bandwidth));
        }
        if !self.latency_us.is_finite() || self.latency_us < 0.0 {
            return Err(ConfigError::InvalidLatency(self.latency_us));
        }
        if !self.ratio.is_finite() || self.ratio <= 0.0 {
            return Err(ConfigError::InvalidRatio(self.ratio));
        }
        Ok(())
    }

    pub fn latency_s(&self) -> f64 {
        self.latency_us * SECS_PER_US
    }

    /// Bandwidth seen by the configured run
    pub fn effective_bandwidth(&self) -> f64 {
        self.bandwidth * self.ratio
    }

    /// Cost model parameters for the configured and the baseline run
    ///
    /// Both share latency and algorithm; only the baseline ignores `ratio`.
    pub fn cost_parameters(
        &self,
        rank_count: usize,
    ) -> Result<(CostModelParameters, CostModelParameters), ConfigError> {
        self.validate()?;
        let baseline =
            CostModelParameters::new(self.bandwidth, self.latency_s(), self.algorithm, rank_count)?;
        let configured = baseline.with_bandwidth(self.effective_bandwidth())?;
        Ok((configured, baseline))
    }
}

/// Load a simulation config from a TOML file
///
/// Missing keys fall back to their defaults.
///
/// # Errors
/// * `ConfigError::Io` - If file cannot be read
/// * `ConfigError::Toml` - If TOML is invalid or holds an unknown algorithm
pub fn load_config(path: impl AsRef<Path>) -> Result<SimulationConfig, ConfigError> {
    let contents = fs::read_to_string(path)?;
    let config: SimulationConfig = toml::from_str(&contents)?;
    Ok(config)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = SimulationConfig::default();
        assert_eq!(config.bandwidth, 10e9);
        assert_eq!(config.latency_us, 0.0);
        assert_eq!(config.algorithm, Algorithm::Flat);
        assert_eq!(config.ratio, 1.0);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_partial_toml_keeps_defaults() {
        let config: SimulationConfig = toml::from_str("algorithm = \"tree\"\nlatency_us = 2.0\n").unwrap();
        assert_eq!(config.algorithm, Algorithm::Tree);
        assert_eq!(config.latency_us, 2.0);
        assert_eq!(config.bandwidth, 10e9);
        assert_eq!(config.trace_suffix, ".trace");
        assert_eq!(config.title, None);
    }

    #[test]
    fn test_toml_title() {
        let config: SimulationConfig = toml::from_str("title = \"Jacobi, 64 ranks\"\n").unwrap();
        assert_eq!(config.title.as_deref(), Some("Jacobi, 64 ranks"));
    }

    #[test]
    fn test_unknown_algorithm_in_toml() {
        let result: Result<SimulationConfig, _> = toml::from_str("algorithm = \"mesh\"\n");
        assert!(result.is_err());
    }

    #[test]
    fn test_validate_rejects_bad_values() {
        let bad_bandwidth = SimulationConfig {
            bandwidth: 0.0,
            ..Default::default()
        };
        assert!(matches!(
            bad_bandwidth.validate(),
            Err(ConfigError::InvalidBandwidth(_))
        ));

        let bad_ratio = SimulationConfig {
            ratio: -2.0,
            ..Default::default()
        };
        assert!(matches!(bad_ratio.validate(), Err(ConfigError::InvalidRatio(_))));

        let bad_latency = SimulationConfig {
            latency_us: f64::NAN,
            ..Default::default()
        };
        assert!(matches!(
            bad_latency.validate(),
            Err(ConfigError::InvalidLatency(_))
        ));
    }

    #[test]
    fn test_cost_parameters_apply_ratio_to_configured_only() {
        let config = SimulationConfig {
            bandwidth: 1e9,
            latency_us: 5.0,
            ratio: 4.0,
            ..Default::default()
        };

        let (configured, baseline) = config.cost_parameters(4).unwrap();
        assert_eq!(configured.bandwidth(), 4e9);
        assert_eq!(baseline.bandwidth(), 1e9);
        assert_eq!(configured.latency_s(), baseline.latency_s());
        assert!((baseline.latency_s() - 5e-6).abs() < 1e-18);
    }
}
