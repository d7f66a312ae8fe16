//! Analytical communication cost model.

pub mod cost;

pub use cost::{comm_time, Algorithm, CostModelParameters};
