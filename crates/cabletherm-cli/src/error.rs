use cabletherm::core::io::point_table::PointTableError;
use cabletherm::core::materials::table::MaterialError;
use cabletherm::core::models::cable::CableError;
use cabletherm::core::models::installation::InstallationError;
use cabletherm::engine::error::EngineError;
use std::path::PathBuf;
use thiserror::Error;

pub type Result<T> = std::result::Result<T, CliError>;

#[derive(Debug, Error)]
pub enum CliError {
    #[error(transparent)]
    Engine(#[from] EngineError),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Failed to read file '{path}': {source}", path = path.display())]
    FileRead {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to create file '{path}': {source}", path = path.display())]
    FileCreate {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to parse file '{path}': {source}", path = path.display())]
    FileParsing {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },

    #[error("Invalid cable definition: {0}")]
    Cable(#[from] CableError),

    #[error("Invalid installation: {0}")]
    Installation(#[from] InstallationError),

    #[error(transparent)]
    Material(#[from] MaterialError),

    #[error("Failed to export results: {0}")]
    Export(#[from] PointTableError),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}
