use crate::core::materials::table::MaterialTable;
use crate::core::models::cable::Cable;
use crate::core::models::installation::Installation;
use crate::core::thermal::probe::sample_temperature;
use crate::engine::cancel::CancellationToken;
use crate::engine::config::SolverConfig;
use crate::engine::error::EngineError;
use crate::engine::progress::{Progress, ProgressReporter};
use crate::engine::solver::ThermalSolver;
use nalgebra::{Point3, Vector3};
use tracing::{info, instrument};

/// Hottest point of a cable.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct HotSpot {
    pub index: usize,
    pub position: Point3<f64>,
    pub temperature: f64,
}

#[derive(Debug, Clone, PartialEq)]
pub struct CableReport {
    pub cable_id: String,
    pub point_count: usize,
    pub hot_spot: Option<HotSpot>,
    pub mean_temperature: Option<f64>,
    /// Heat dissipated by the whole cable, `Σ P · L`, in W.
    pub total_power: f64,
    /// Soil temperature at each point shifted by the evaluation offset.
    pub probe_temperatures: Vec<f64>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct SteadyStateReport {
    pub iterations: usize,
    pub final_max_delta: f64,
    pub cables: Vec<CableReport>,
}

impl SteadyStateReport {
    pub fn cable(&self, cable_id: &str) -> Option<&CableReport> {
        self.cables.iter().find(|c| c.cable_id == cable_id)
    }

    /// Highest conductor temperature over all cables.
    pub fn max_temperature(&self) -> Option<f64> {
        self.cables
            .iter()
            .filter_map(|c| c.hot_spot.map(|h| h.temperature))
            .reduce(f64::max)
    }
}

#[instrument(skip_all, name = "steady_state_workflow")]
pub fn run(
    installation: &mut Installation,
    materials: &MaterialTable,
    config: &SolverConfig,
    reporter: &ProgressReporter,
    cancel: &CancellationToken,
) -> Result<SteadyStateReport, EngineError> {
    // === Phase 1: Preparation ===
    reporter.report(Progress::PhaseStart {
        name: "Preparation",
    });
    info!(
        cables = installation.cable_count(),
        points = installation.point_count(),
        "Preparing thermal solver."
    );
    let mut solver = ThermalSolver::new(installation, materials)?;
    reporter.report(Progress::PhaseFinish);

    // === Phase 2: Field iteration ===
    reporter.report(Progress::PhaseStart {
        name: "Field Iteration",
    });
    let outcome = solver.solve(config, reporter, cancel);
    reporter.report(Progress::PhaseFinish);
    let summary = outcome?;
    drop(solver);
    let installation: &Installation = installation;

    // === Phase 3: Reporting ===
    reporter.report(Progress::PhaseStart { name: "Reporting" });
    let cables = installation
        .cables()
        .map(|(_, cable)| summarize_cable(installation, cable, &config.evaluation_offset))
        .collect::<Vec<_>>();
    reporter.report(Progress::PhaseFinish);

    let report = SteadyStateReport {
        iterations: summary.iterations,
        final_max_delta: summary.max_delta,
        cables,
    };
    info!(
        iterations = report.iterations,
        max_temperature = report.max_temperature(),
        "Steady-state workflow complete."
    );
    Ok(report)
}

fn summarize_cable(
    installation: &Installation,
    cable: &Cable,
    evaluation_offset: &Vector3<f64>,
) -> CableReport {
    let temperatures = cable.temperatures();
    let points = cable.points();

    let hot_spot = temperatures
        .iter()
        .enumerate()
        .max_by(|(_, a), (_, b)| a.total_cmp(b))
        .map(|(index, &temperature)| HotSpot {
            index,
            position: points[index].position,
            temperature,
        });

    let mean_temperature = (!temperatures.is_empty())
        .then(|| temperatures.iter().sum::<f64>() / temperatures.len() as f64);

    let total_power = points
        .iter()
        .zip(cable.watt_losses())
        .map(|(p, &loss)| p.length * loss)
        .sum();

    let probe_temperatures = points
        .iter()
        .map(|p| sample_temperature(installation, &(p.position + evaluation_offset)))
        .collect();

    CableReport {
        cable_id: cable.id().to_string(),
        point_count: cable.point_count(),
        hot_spot,
        mean_temperature,
        total_power,
        probe_temperatures,
    }
}
