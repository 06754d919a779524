use crate::cli::SolveArgs;
use crate::config::builder::{build_config, build_installation, load_materials};
use crate::error::Result;
use crate::utils::progress::CliProgressHandler;
use cabletherm::core::io::point_table::write_point_table_to_path;
use cabletherm::core::models::installation::Installation;
use cabletherm::engine::cancel::CancellationToken;
use cabletherm::engine::error::EngineError;
use cabletherm::engine::progress::ProgressReporter;
use cabletherm::workflows::steady_state::{self, SteadyStateReport};
use std::fmt::Write as _;
use std::path::Path;
use tracing::{info, warn};

pub fn run(args: SolveArgs) -> Result<()> {
    let config = build_config(&args)?;
    let materials = load_materials(config.materials_path.as_deref())?;

    info!("Building installation from {:?}", &config.input_path);
    let mut installation = build_installation(&config.scenario)?;
    println!(
        "Loaded {} cable(s) discretized into {} point(s).",
        installation.cable_count(),
        installation.point_count()
    );

    let progress_handler = CliProgressHandler::new();
    let reporter = ProgressReporter::with_callback(progress_handler.get_callback());
    let cancel = CancellationToken::new();

    info!("Invoking the steady-state workflow...");
    let outcome = steady_state::run(
        &mut installation,
        &materials,
        &config.solver,
        &reporter,
        &cancel,
    );

    match outcome {
        Ok(report) => {
            print!("{}", render_report(&report));
            if let Some(path) = &config.output_path {
                export(&installation, path)?;
            }
            Ok(())
        }
        Err(e @ (EngineError::NotConverged { .. } | EngineError::Cancelled { .. })) => {
            // The last iterate has been written back; keep it for diagnosis.
            warn!("Solve stopped early: {}", e);
            if let Some(path) = &config.output_path {
                export(&installation, path)?;
                println!("Last iterate written to: {}", path.display());
            }
            Err(e.into())
        }
        Err(e) => Err(e.into()),
    }
}

fn export(installation: &Installation, path: &Path) -> Result<()> {
    info!("Writing point table to {:?}", path);
    write_point_table_to_path(installation, path)?;
    println!("✓ Point table written to: {}", path.display());
    Ok(())
}

pub(crate) fn render_report(report: &SteadyStateReport) -> String {
    let mut out = String::new();
    let _ = writeln!(
        out,
        "Converged after {} iteration(s) (final max ΔT {:.4} °C).",
        report.iterations, report.final_max_delta
    );
    for cable in &report.cables {
        match (cable.hot_spot, cable.mean_temperature) {
            (Some(hot), Some(mean)) => {
                let _ = writeln!(
                    out,
                    "  {:<16} points={:<6} max={:>8.2} °C at #{} ({:.3}, {:.3}, {:.3})  mean={:>8.2} °C  power={:.2} W",
                    cable.cable_id,
                    cable.point_count,
                    hot.temperature,
                    hot.index,
                    hot.position.x,
                    hot.position.y,
                    hot.position.z,
                    mean,
                    cable.total_power
                );
            }
            _ => {
                let _ = writeln!(out, "  {:<16} (no points)", cable.cable_id);
            }
        }
        if let Some((max, mean)) = probe_summary(&cable.probe_temperatures) {
            let _ = writeln!(
                out,
                "  {:<16} probe at offset: max={:>8.2} °C  mean={:>8.2} °C",
                "", max, mean
            );
        }
    }
    if let Some(max) = report.max_temperature() {
        let _ = writeln!(out, "Hottest conductor: {:.2} °C", max);
    }
    out
}

/// Max and mean of the soil temperatures sampled at the evaluation offset.
fn probe_summary(probes: &[f64]) -> Option<(f64, f64)> {
    let max = probes.iter().copied().reduce(f64::max)?;
    let mean = probes.iter().sum::<f64>() / probes.len() as f64;
    Some((max, mean))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::CliError;
    use cabletherm::workflows::steady_state::{CableReport, HotSpot};
    use nalgebra::Point3;
    use std::fs;
    use tempfile::tempdir;

    const SCENARIO: &str = r#"
        ambient-temperature = 30.0
        soil-resistivity = 3.5

        [[cables]]
        id = "feeder"
        current = 300.0
        point-spacing = 0.5
        start = [0.0, -0.77, 0.0]
        segments = [[0.0, -0.77, 2.0]]
        material = "Al"
        construction = "RoundStranded"
        diameter = 0.02159

        [cables.thermal]
        insulation = 3.5
    "#;

    fn args_for(dir: &Path, scenario: &str) -> SolveArgs {
        let input = dir.join("scenario.toml");
        fs::write(&input, scenario).unwrap();
        SolveArgs {
            input,
            output: Some(dir.join("points.csv")),
            tolerance: None,
            max_iterations: None,
            materials: None,
        }
    }

    #[test]
    fn solve_writes_point_table() {
        let dir = tempdir().unwrap();
        let args = args_for(dir.path(), SCENARIO);
        run(args).unwrap();

        let table = fs::read_to_string(dir.path().join("points.csv")).unwrap();
        let mut lines = table.lines();
        assert_eq!(
            lines.next().unwrap(),
            "cable_id,index,x,y,z,length,distance_along,watt_loss,temperature"
        );
        assert_eq!(lines.count(), 4);
    }

    #[test]
    fn iteration_cap_still_exports_last_iterate() {
        let dir = tempdir().unwrap();
        let mut args = args_for(dir.path(), SCENARIO);
        args.max_iterations = Some(1);
        args.tolerance = Some(1e-9);

        let err = run(args).unwrap_err();
        assert!(matches!(
            err,
            CliError::Engine(EngineError::NotConverged { iterations: 1, .. })
        ));
        assert!(dir.path().join("points.csv").exists());
    }

    #[test]
    fn report_lists_every_cable() {
        let report = SteadyStateReport {
            iterations: 4,
            final_max_delta: 0.05,
            cables: vec![
                CableReport {
                    cable_id: "a".to_string(),
                    point_count: 2,
                    hot_spot: Some(HotSpot {
                        index: 1,
                        position: Point3::new(0.0, -1.0, 0.5),
                        temperature: 71.25,
                    }),
                    mean_temperature: Some(70.0),
                    total_power: 10.0,
                    probe_temperatures: vec![60.0, 61.0],
                },
                CableReport {
                    cable_id: "b".to_string(),
                    point_count: 0,
                    hot_spot: None,
                    mean_temperature: None,
                    total_power: 0.0,
                    probe_temperatures: Vec::new(),
                },
            ],
        };
        let text = render_report(&report);
        assert!(text.contains("Converged after 4 iteration(s)"));
        assert!(text.contains("71.25"));
        assert!(text.contains("(no points)"));
        assert!(text.contains("probe at offset: max=   61.00 °C  mean=   60.50 °C"));
        assert_eq!(text.matches("probe at offset").count(), 1);
        assert!(text.contains("Hottest conductor: 71.25 °C"));
    }
}
