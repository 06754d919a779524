use thiserror::Error;

use super::config::ConfigError;
use crate::core::losses::model::LossError;
use crate::core::materials::table::MaterialError;

#[derive(Debug, Error)]
pub enum EngineError {
    #[error("Material lookup failed: {source}")]
    Material {
        #[from]
        source: MaterialError,
    },

    #[error("Loss evaluation failed on cable '{cable_id}': {source}")]
    Loss { cable_id: String, source: LossError },

    #[error("Invalid solver configuration: {source}")]
    Config {
        #[from]
        source: ConfigError,
    },

    #[error("Installation has no point sources to solve")]
    EmptyInstallation,

    #[error(
        "Point {index_a} of cable '{cable_a}' coincides with point {index_b} of cable '{cable_b}'"
    )]
    CoincidentSources {
        cable_a: String,
        index_a: usize,
        cable_b: String,
        index_b: usize,
    },

    #[error(
        "Temperature of point {index} on cable '{cable_id}' became non-finite in iteration {iteration}"
    )]
    NonFiniteTemperature {
        cable_id: String,
        index: usize,
        iteration: usize,
    },

    #[error(
        "Field iteration did not converge after {iterations} iterations (last max change {max_delta:.4} °C)"
    )]
    NotConverged { iterations: usize, max_delta: f64 },

    #[error("Field iteration cancelled after {iterations} iterations")]
    Cancelled { iterations: usize },
}
