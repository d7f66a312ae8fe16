use crate::converter::ConverterConfig;
use crate::timeline::SimulationConfig;
use std::path::PathBuf;

/// Arguments for the convert command
///
/// **Public** - used by main.rs to construct from CLI args
#[derive(Debug, Clone)]
pub struct ConvertArgs {
    /// Directory holding the raw per-rank event logs
    pub input_dir: PathBuf,

    /// Directory receiving the canonical traces
    pub output_dir: PathBuf,

    /// Converter configuration (noise threshold, file naming)
    pub config: ConverterConfig,
}

impl Default for ConvertArgs {
    fn default() -> Self {
        Self {
            input_dir: PathBuf::from("."),
            output_dir: PathBuf::from("."),
            config: ConverterConfig::default(),
        }
    }
}

/// Arguments for the simulate command
///
/// **Public** - used by main.rs to construct from CLI args
#[derive(Debug, Clone)]
pub struct SimulateArgs {
    /// Directory holding the canonical traces
    pub trace_dir: PathBuf,

    /// Network parameters and output paths
    pub config: SimulationConfig,

    /// Output path for the JSON report (optional)
    pub output_json: Option<PathBuf>,

    /// Print text summary to stdout
    pub print_summary: bool,
}

impl Default for SimulateArgs {
    fn default() -> Self {
        Self {
            trace_dir: PathBuf::from("."),
            config: SimulationConfig::default(),
            output_json: None,
            print_summary: true,
        }
    }
}
