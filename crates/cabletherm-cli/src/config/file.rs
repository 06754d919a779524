use crate::error::{CliError, Result};
use serde::Deserialize;
use std::path::{Path, PathBuf};
use tracing::debug;

/// Top level of a scenario file.
#[derive(Deserialize, Debug, Clone, PartialEq)]
#[serde(rename_all = "kebab-case", deny_unknown_fields)]
pub struct ScenarioFile {
    /// °C
    pub ambient_temperature: f64,
    /// K·m/W
    pub soil_resistivity: f64,
    #[serde(default)]
    pub solver: FileSolverConfig,
    #[serde(default)]
    pub cables: Vec<FileCable>,
}

#[derive(Deserialize, Debug, Default, Clone, PartialEq)]
#[serde(rename_all = "kebab-case", deny_unknown_fields)]
pub struct FileSolverConfig {
    pub tolerance: Option<f64>,
    pub max_iterations: Option<usize>,
    pub evaluation_offset: Option<[f64; 3]>,
    /// Material override table, relative to the scenario file.
    pub materials: Option<PathBuf>,
}

#[derive(Deserialize, Debug, Clone, PartialEq)]
#[serde(rename_all = "kebab-case", deny_unknown_fields)]
pub struct FileCable {
    pub id: String,
    pub current: f64,
    pub point_spacing: f64,
    pub start: [f64; 3],
    pub segments: Vec<[f64; 3]>,
    pub material: String,
    pub construction: String,
    pub diameter: f64,
    pub dc_resistance_20: Option<f64>,
    pub conductor_spacing: Option<f64>,
    #[serde(default)]
    pub frequency: f64,
    #[serde(default)]
    pub thermal: FileThermalLayers,
}

#[derive(Deserialize, Debug, Default, Clone, Copy, PartialEq)]
#[serde(rename_all = "kebab-case", deny_unknown_fields, default)]
pub struct FileThermalLayers {
    pub insulation: f64,
    pub bedding: f64,
    pub jacket: f64,
    pub sheath_loss_factor: f64,
    pub armor_loss_factor: f64,
}

impl ScenarioFile {
    pub fn from_file(path: &Path) -> Result<Self> {
        debug!("Loading scenario from file: {:?}", path);
        let content = std::fs::read_to_string(path).map_err(|e| CliError::FileRead {
            path: path.to_path_buf(),
            source: e,
        })?;
        toml::from_str(&content).map_err(|e| CliError::FileParsing {
            path: path.to_path_buf(),
            source: e,
        })
    }
}
