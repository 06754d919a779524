use super::buffers::PointArena;
use super::cancel::CancellationToken;
use super::config::SolverConfig;
use super::error::EngineError;
use super::progress::{Progress, ProgressReporter};
use super::state::SolveSummary;
use super::tasks;
use crate::core::losses::model::ConductorLossModel;
use crate::core::materials::table::MaterialTable;
use crate::core::models::installation::Installation;
use tracing::{debug, info, instrument, warn};

/// Fixed-point iteration coupling conductor losses and the soil temperature field.
///
/// The solver copies the installation's geometry and thermal state into flat buffers when it
/// is created and iterates on those buffers only. [`ThermalSolver::write_back`] copies the
/// current iterate into the cables; [`ThermalSolver::solve`] does so on every exit path once
/// at least one iteration has run.
pub struct ThermalSolver<'a> {
    installation: &'a mut Installation,
    models: Vec<ConductorLossModel>,
    arena: PointArena,
    soil_resistivity: f64,
    ambient_temperature: f64,
    iterations: usize,
    last_delta: Option<f64>,
}

impl<'a> ThermalSolver<'a> {
    #[instrument(skip_all, name = "thermal_solver_setup")]
    pub fn new(
        installation: &'a mut Installation,
        materials: &MaterialTable,
    ) -> Result<Self, EngineError> {
        let arena = PointArena::from_installation(installation);
        if arena.is_empty() {
            return Err(EngineError::EmptyInstallation);
        }

        let models = installation
            .cables()
            .map(|(_, cable)| ConductorLossModel::for_cable(cable, materials))
            .collect::<Result<Vec<_>, _>>()?;

        debug!(
            cables = arena.cables.len(),
            points = arena.len(),
            "Thermal solver buffers prepared."
        );

        Ok(Self {
            soil_resistivity: installation.soil().thermal_resistivity,
            ambient_temperature: installation.ambient_temperature(),
            installation,
            models,
            arena,
            iterations: 0,
            last_delta: None,
        })
    }

    /// Runs one iteration and returns the largest temperature change it produced.
    ///
    /// On error the previous iterate stays current.
    pub fn step(&mut self) -> Result<f64, EngineError> {
        let iteration = self.iterations + 1;

        tasks::losses::run(&mut self.arena, &self.models)?;
        tasks::field::run(&mut self.arena)?;
        tasks::temperature::run(
            &mut self.arena,
            self.soil_resistivity,
            self.ambient_temperature,
            iteration,
        )?;

        let max_delta = self.arena.max_delta();
        self.arena.swap();
        self.iterations = iteration;
        self.last_delta = Some(max_delta);
        Ok(max_delta)
    }

    /// Iterates until the largest change is within `config.tolerance`, the iteration cap is
    /// reached or `cancel` is triggered.
    #[instrument(skip_all, name = "field_iteration")]
    pub fn solve(
        &mut self,
        config: &SolverConfig,
        reporter: &ProgressReporter,
        cancel: &CancellationToken,
    ) -> Result<SolveSummary, EngineError> {
        reporter.report(Progress::TaskStart {
            total_steps: config.max_iterations as u64,
        });
        let outcome = self.iterate(config, reporter, cancel);
        reporter.report(Progress::TaskFinish);

        if self.iterations > 0 {
            self.write_back();
        }
        outcome
    }

    fn iterate(
        &mut self,
        config: &SolverConfig,
        reporter: &ProgressReporter,
        cancel: &CancellationToken,
    ) -> Result<SolveSummary, EngineError> {
        let mut performed = 0;
        loop {
            if cancel.is_cancelled() {
                warn!(iterations = self.iterations, "Field iteration cancelled.");
                return Err(EngineError::Cancelled {
                    iterations: self.iterations,
                });
            }

            let max_delta = self.step()?;
            performed += 1;

            reporter.report(Progress::TaskIncrement);
            reporter.report(Progress::StatusUpdate {
                text: format!("max ΔT {:.4} °C", max_delta),
            });
            debug!(iteration = self.iterations, max_delta, "Iteration complete.");

            if max_delta <= config.tolerance {
                info!(
                    iterations = self.iterations,
                    max_delta, "Field iteration converged."
                );
                return Ok(SolveSummary {
                    iterations: self.iterations,
                    max_delta,
                });
            }

            if performed >= config.max_iterations {
                warn!(
                    iterations = self.iterations,
                    max_delta, "Iteration cap reached before convergence."
                );
                return Err(EngineError::NotConverged {
                    iterations: self.iterations,
                    max_delta,
                });
            }
        }
    }

    /// Copies the current losses and temperatures into the installation's cables.
    pub fn write_back(&mut self) {
        for slice in &self.arena.cables {
            if let Some(cable) = self.installation.cable_mut(slice.cable_id) {
                cable.set_thermal_state(
                    &self.arena.losses[slice.range.clone()],
                    &self.arena.temperatures[slice.range.clone()],
                );
            }
        }
    }

    pub fn iterations(&self) -> usize {
        self.iterations
    }

    pub fn last_delta(&self) -> Option<f64> {
        self.last_delta
    }

    /// Current iterate of every point, cables in insertion order.
    pub fn temperatures(&self) -> &[f64] {
        &self.arena.temperatures
    }

    pub fn installation(&self) -> &Installation {
        &*self.installation
    }
}
