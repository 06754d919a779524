use super::file::ScenarioFile;
use cabletherm::engine::config::SolverConfig;
use std::path::PathBuf;

pub struct AppConfig {
    pub input_path: PathBuf,
    pub output_path: Option<PathBuf>,
    /// Already resolved against the scenario file's directory.
    pub materials_path: Option<PathBuf>,
    pub solver: SolverConfig,
    pub scenario: ScenarioFile,
}
