use cabletherm::engine::config::{
    DEFAULT_EVALUATION_OFFSET, DEFAULT_MAX_ITERATIONS, DEFAULT_TOLERANCE,
};

pub struct DefaultsConfig {
    pub tolerance: f64,
    pub max_iterations: usize,
    pub evaluation_offset: [f64; 3],
}

impl Default for DefaultsConfig {
    fn default() -> Self {
        Self {
            tolerance: DEFAULT_TOLERANCE,
            max_iterations: DEFAULT_MAX_ITERATIONS,
            evaluation_offset: DEFAULT_EVALUATION_OFFSET,
        }
    }
}
