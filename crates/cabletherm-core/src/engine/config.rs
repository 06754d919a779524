use nalgebra::Vector3;
use thiserror::Error;

pub const DEFAULT_TOLERANCE: f64 = 0.1;
pub const DEFAULT_MAX_ITERATIONS: usize = 200;
/// Offset (m) from each point source at which probe temperatures are reported.
pub const DEFAULT_EVALUATION_OFFSET: [f64; 3] = [0.0, -0.05, 0.0];

#[derive(Debug, Error, PartialEq, Clone)]
pub enum ConfigError {
    #[error("Invalid value for parameter '{name}': {value}")]
    InvalidParameter { name: &'static str, value: String },
}

#[derive(Debug, Clone, PartialEq)]
pub struct SolverConfig {
    /// Largest temperature change (°C) between two iterations that counts as converged.
    pub tolerance: f64,
    pub max_iterations: usize,
    /// Only used for reporting; does not influence the solve.
    pub evaluation_offset: Vector3<f64>,
}

impl Default for SolverConfig {
    fn default() -> Self {
        Self {
            tolerance: DEFAULT_TOLERANCE,
            max_iterations: DEFAULT_MAX_ITERATIONS,
            evaluation_offset: Vector3::from(DEFAULT_EVALUATION_OFFSET),
        }
    }
}

#[derive(Default)]
pub struct SolverConfigBuilder {
    tolerance: Option<f64>,
    max_iterations: Option<usize>,
    evaluation_offset: Option<Vector3<f64>>,
}

impl SolverConfigBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn tolerance(mut self, tolerance: f64) -> Self {
        self.tolerance = Some(tolerance);
        self
    }
    pub fn max_iterations(mut self, iterations: usize) -> Self {
        self.max_iterations = Some(iterations);
        self
    }
    pub fn evaluation_offset(mut self, offset: Vector3<f64>) -> Self {
        self.evaluation_offset = Some(offset);
        self
    }

    pub fn build(self) -> Result<SolverConfig, ConfigError> {
        let defaults = SolverConfig::default();

        let tolerance = self.tolerance.unwrap_or(defaults.tolerance);
        if !(tolerance.is_finite() && tolerance > 0.0) {
            return Err(ConfigError::InvalidParameter {
                name: "tolerance",
                value: tolerance.to_string(),
            });
        }

        let max_iterations = self.max_iterations.unwrap_or(defaults.max_iterations);
        if max_iterations == 0 {
            return Err(ConfigError::InvalidParameter {
                name: "max_iterations",
                value: max_iterations.to_string(),
            });
        }

        let evaluation_offset = self
            .evaluation_offset
            .unwrap_or(defaults.evaluation_offset);
        if evaluation_offset.iter().any(|c| !c.is_finite()) {
            return Err(ConfigError::InvalidParameter {
                name: "evaluation_offset",
                value: format!("{:?}", evaluation_offset.as_slice()),
            });
        }

        Ok(SolverConfig {
            tolerance,
            max_iterations,
            evaluation_offset,
        })
    }
}
