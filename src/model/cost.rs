//! First-order analytical cost of a collective transfer.
//!
//! `t = latency + (bytes / bandwidth) * factor`, where the factor depends on
//! the logical topology:
//! - `flat`: 1
//! - `ring`: (P - 1) / P
//! - `tree`: 2
//!
//! No contention between ranks is modelled.

use crate::utils::error::ConfigError;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Collective algorithm variant
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Algorithm {
    #[default]
    Flat,
    Ring,
    Tree,
}

impl Algorithm {
    /// Multiplier applied to the raw transfer time for `rank_count` ranks
    pub fn factor(self, rank_count: usize) -> f64 {
        match self {
            Self::Flat => 1.0,
            Self::Ring => {
                let p = rank_count as f64;
                (p - 1.0) / p
            }
            Self::Tree => 2.0,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Self::Flat => "flat",
            Self::Ring => "ring",
            Self::Tree => "tree",
        }
    }
}

impl FromStr for Algorithm {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "flat" => Ok(Self::Flat),
            "ring" => Ok(Self::Ring),
            "tree" => Ok(Self::Tree),
            _ => Err(ConfigError::UnknownAlgorithm(s.to_string())),
        }
    }
}

impl fmt::Display for Algorithm {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Predicted duration in seconds of moving `bytes` among `rank_count` ranks
///
/// **Public** - pure cost function
///
/// # Arguments
/// * `bytes` - Volume transferred (may be a rank average, hence `f64`)
/// * `rank_count` - Number of participating ranks (P)
/// * `bandwidth` - Bytes per second, > 0
/// * `latency_s` - Fixed per-operation latency in seconds
/// * `algorithm` - Topology variant
pub fn comm_time(
    bytes: f64,
    rank_count: usize,
    bandwidth: f64,
    latency_s: f64,
    algorithm: Algorithm,
) -> f64 {
    latency_s + (bytes / bandwidth) * algorithm.factor(rank_count)
}

/// Validated inputs of one cost model evaluation
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CostModelParameters {
    bandwidth: f64,
    latency_s: f64,
    algorithm: Algorithm,
    rank_count: usize,
}

impl CostModelParameters {
    /// # Errors
    /// * `ConfigError::InvalidBandwidth` - bandwidth not positive and finite
    /// * `ConfigError::InvalidLatency` - latency negative or not finite
    /// * `ConfigError::InvalidRankCount` - fewer than two ranks
    pub fn new(
        bandwidth: f64,
        latency_s: f64,
        algorithm: Algorithm,
        rank_count: usize,
    ) -> Result<Self, ConfigError> {
        if !bandwidth.is_finite() || bandwidth <= 0.0 {
            return Err(ConfigError::InvalidBandwidth(bandwidth));
        }
        if !latency_s.is_finite() || latency_s < 0.0 {
            return Err(ConfigError::InvalidLatency(latency_s));
        }
        if rank_count < 2 {
            return Err(ConfigError::InvalidRankCount(rank_count));
        }

        Ok(Self {
            bandwidth,
            latency_s,
            algorithm,
            rank_count,
        })
    }

    /// Same parameters with a different bandwidth
    pub fn with_bandwidth(self, bandwidth: f64) -> Result<Self, ConfigError> {
        Self::new(bandwidth, self.latency_s, self.algorithm, self.rank_count)
    }

    pub fn comm_time(&self, bytes: f64) -> f64 {
        comm_time(
            bytes,
            self.rank_count,
            self.bandwidth,
            self.latency_s,
            self.algorithm,
        )
    }

    pub fn bandwidth(&self) -> f64 {
        self.bandwidth
    }

    pub fn latency_s(&self) -> f64 {
        self.latency_s
    }

    pub fn algorithm(&self) -> Algorithm {
        self.algorithm
    }

    pub fn rank_count(&self) -> usize {
        self.rank_count
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_algorithm_parsing() {
        assert_eq!("flat".parse::<Algorithm>().unwrap(), Algorithm::Flat);
        assert_eq!("Ring".parse::<Algorithm>().unwrap(), Algorithm::Ring);
        assert_eq!(" tree ".parse::<Algorithm>().unwrap(), Algorithm::Tree);
        assert!(matches!(
            "butterfly".parse::<Algorithm>(),
            Err(ConfigError::UnknownAlgorithm(name)) if name == "butterfly"
        ));
    }

    #[test]
    fn test_factors() {
        assert_eq!(Algorithm::Flat.factor(8), 1.0);
        assert_eq!(Algorithm::Ring.factor(4), 0.75);
        assert_eq!(Algorithm::Tree.factor(8), 2.0);
    }

    #[test]
    fn test_parameters_validation() {
        assert!(CostModelParameters::new(10e9, 0.0, Algorithm::Flat, 2).is_ok());
        assert!(matches!(
            CostModelParameters::new(0.0, 0.0, Algorithm::Flat, 2),
            Err(ConfigError::InvalidBandwidth(_))
        ));
        assert!(matches!(
            CostModelParameters::new(-1.0, 0.0, Algorithm::Flat, 2),
            Err(ConfigError::InvalidBandwidth(_))
        ));
        assert!(matches!(
            CostModelParameters::new(1.0, -1e-6, Algorithm::Flat, 2),
            Err(ConfigError::InvalidLatency(_))
        ));
        assert!(matches!(
            CostModelParameters::new(1.0, 0.0, Algorithm::Ring, 1),
            Err(ConfigError::InvalidRankCount(1))
        ));
    }

    #[test]
    fn test_latency_is_added_once() {
        let params = CostModelParameters::new(1000.0, 0.5, Algorithm::Tree, 4).unwrap();
        assert_eq!(params.comm_time(0.0), 0.5);
        assert_eq!(params.comm_time(1000.0), 2.5);
    }
}
