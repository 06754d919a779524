/// Outcome of a converged solve.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SolveSummary {
    /// Iterations performed by the solver so far, including any earlier `step` calls.
    pub iterations: usize,
    /// Largest temperature change (°C) in the final iteration.
    pub max_delta: f64,
}
