//! CLI command implementations.
//!
//! Each command is implemented in its own module.
//! Commands orchestrate the various library components to perform user tasks.

pub mod convert;
pub mod models;
pub mod simulate;
pub mod utils;

// Re-export main command functions
pub use convert::{execute_convert, validate_convert_args};
pub use models::{ConvertArgs, SimulateArgs};
pub use simulate::{execute_simulate, validate_simulate_args};
pub use utils::{display_version, validate_report_file};
