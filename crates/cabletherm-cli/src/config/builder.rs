use super::defaults::DefaultsConfig;
use super::file::{FileCable, ScenarioFile};
use super::models::AppConfig;
use crate::cli::SolveArgs;
use crate::error::{CliError, Result};
use cabletherm::core::materials::table::MaterialTable;
use cabletherm::core::models::cable::{
    Cable, CableParams, Conductor, ConductorMaterial, ConstructionLayers,
};
use cabletherm::core::models::installation::Installation;
use cabletherm::engine::config::SolverConfigBuilder;
use cabletherm::engine::error::EngineError;
use nalgebra::{Point3, Vector3};
use std::path::{Path, PathBuf};
use tracing::debug;

/// Resolves the solve configuration: CLI flags win over the scenario file, which wins over
/// the built-in defaults.
pub fn build_config(args: &SolveArgs) -> Result<AppConfig> {
    let defaults = DefaultsConfig::default();
    let scenario = ScenarioFile::from_file(&args.input)?;
    let file_solver = scenario.solver.clone();

    let tolerance = args
        .tolerance
        .or(file_solver.tolerance)
        .unwrap_or(defaults.tolerance);
    let max_iterations = args
        .max_iterations
        .or(file_solver.max_iterations)
        .unwrap_or(defaults.max_iterations);
    let evaluation_offset = file_solver
        .evaluation_offset
        .unwrap_or(defaults.evaluation_offset);

    let solver = SolverConfigBuilder::new()
        .tolerance(tolerance)
        .max_iterations(max_iterations)
        .evaluation_offset(Vector3::from(evaluation_offset))
        .build()
        .map_err(EngineError::from)?;

    let materials_path = match (&args.materials, &file_solver.materials) {
        (Some(cli_path), _) => Some(cli_path.clone()),
        (None, Some(file_path)) => Some(resolve_relative_to(&args.input, file_path)),
        (None, None) => None,
    };

    debug!(
        tolerance,
        max_iterations,
        materials = ?materials_path,
        "Resolved solver configuration."
    );

    Ok(AppConfig {
        input_path: args.input.clone(),
        output_path: args.output.clone(),
        materials_path,
        solver,
        scenario,
    })
}

pub fn load_materials(path: Option<&Path>) -> Result<MaterialTable> {
    match path {
        Some(path) => {
            debug!("Loading material overrides from {:?}", path);
            Ok(MaterialTable::load(path)?)
        }
        None => Ok(MaterialTable::builtin()),
    }
}

/// Builds the installation described by a scenario, cables in file order.
pub fn build_installation(scenario: &ScenarioFile) -> Result<Installation> {
    let mut installation =
        Installation::new(scenario.ambient_temperature, scenario.soil_resistivity)?;
    for file_cable in &scenario.cables {
        installation.add_cable(build_cable(file_cable)?)?;
    }
    Ok(installation)
}

fn build_cable(file_cable: &FileCable) -> Result<Cable> {
    let material = file_cable
        .material
        .parse::<ConductorMaterial>()
        .map_err(|e| CliError::Config(format!("cable '{}': {}", file_cable.id, e)))?;

    if file_cable.segments.is_empty() {
        return Err(CliError::Config(format!(
            "cable '{}' has no segments",
            file_cable.id
        )));
    }

    let thermal = file_cable.thermal;
    let mut cable = Cable::new(CableParams {
        id: file_cable.id.clone(),
        current: file_cable.current,
        point_spacing: file_cable.point_spacing,
        start: Point3::from(file_cable.start),
        conductor: Conductor {
            material,
            construction: file_cable.construction.clone(),
            diameter: file_cable.diameter,
            dc_resistance_20: file_cable.dc_resistance_20,
            frequency: file_cable.frequency,
            spacing: file_cable.conductor_spacing,
        },
        layers: ConstructionLayers {
            insulation: thermal.insulation,
            bedding: thermal.bedding,
            jacket: thermal.jacket,
            sheath_loss_factor: thermal.sheath_loss_factor,
            armor_loss_factor: thermal.armor_loss_factor,
        },
    })?;

    for &end in &file_cable.segments {
        cable.append_segment(Point3::from(end))?;
    }
    debug!(
        cable = %file_cable.id,
        points = cable.point_count(),
        length = cable.total_length(),
        "Cable discretized."
    );
    Ok(cable)
}

fn resolve_relative_to(scenario_path: &Path, path: &Path) -> PathBuf {
    if path.is_absolute() {
        return path.to_path_buf();
    }
    scenario_path
        .parent()
        .map(|dir| dir.join(path))
        .unwrap_or_else(|| path.to_path_buf())
}

#[cfg(test)]
mod tests {
    use super::*;
    use cabletherm::core::models::cable::CableError;
    use cabletherm::core::models::installation::InstallationError;
    use cabletherm::engine::config::ConfigError;
    use std::fs;
    use tempfile::{TempDir, tempdir};

    const SCENARIO: &str = r#"
        ambient-temperature = 30.0
        soil-resistivity = 3.5

        [solver]
        tolerance = 0.05
        max-iterations = 80
        materials = "materials.toml"

        [[cables]]
        id = "cable1"
        current = 300.0
        point-spacing = 0.5
        start = [0.0, -0.77, 0.0]
        segments = [[0.0, -0.77, 2.0]]
        material = "Al"
        construction = "RoundStranded"
        diameter = 0.02159

        [[cables]]
        id = "cable2"
        current = 300.0
        point-spacing = 0.5
        start = [0.2, -0.77, 0.0]
        segments = [[0.2, -0.77, 1.0], [0.2, -1.0, 2.0]]
        material = "Cu"
        construction = "RoundSolid"
        diameter = 0.02
        frequency = 50.0

        [cables.thermal]
        insulation = 2.0
        jacket = 0.5
    "#;

    fn write_scenario(content: &str) -> (TempDir, PathBuf) {
        let dir = tempdir().unwrap();
        let path = dir.path().join("scenario.toml");
        fs::write(&path, content).unwrap();
        (dir, path)
    }

    fn args(input: PathBuf) -> SolveArgs {
        SolveArgs {
            input,
            output: None,
            tolerance: None,
            max_iterations: None,
            materials: None,
        }
    }

    #[test]
    fn file_values_override_defaults() {
        let (dir, path) = write_scenario(SCENARIO);
        let config = build_config(&args(path)).unwrap();
        assert_eq!(config.solver.tolerance, 0.05);
        assert_eq!(config.solver.max_iterations, 80);
        assert_eq!(config.solver.evaluation_offset, Vector3::new(0.0, -0.05, 0.0));
        assert_eq!(config.materials_path, Some(dir.path().join("materials.toml")));
    }

    #[test]
    fn cli_overrides_file_values() {
        let (_dir, path) = write_scenario(SCENARIO);
        let mut args = args(path);
        args.tolerance = Some(0.2);
        args.max_iterations = Some(5);
        args.materials = Some(PathBuf::from("/etc/override.toml"));
        let config = build_config(&args).unwrap();
        assert_eq!(config.solver.tolerance, 0.2);
        assert_eq!(config.solver.max_iterations, 5);
        assert_eq!(config.materials_path, Some(PathBuf::from("/etc/override.toml")));
    }

    #[test]
    fn invalid_tolerance_is_a_config_error() {
        let (_dir, path) = write_scenario(SCENARIO);
        let mut args = args(path);
        args.tolerance = Some(-1.0);
        assert!(matches!(
            build_config(&args),
            Err(CliError::Engine(EngineError::Config {
                source: ConfigError::InvalidParameter {
                    name: "tolerance",
                    ..
                }
            }))
        ));
    }

    #[test]
    fn installation_is_built_in_file_order() {
        let scenario: ScenarioFile = toml::from_str(SCENARIO).unwrap();
        let installation = build_installation(&scenario).unwrap();
        let ids: Vec<&str> = installation.cables().map(|(_, c)| c.id()).collect();
        assert_eq!(ids, vec!["cable1", "cable2"]);

        let cable2 = installation
            .cable(installation.find_cable("cable2").unwrap())
            .unwrap();
        assert_eq!(cable2.segments().len(), 2);
        assert_eq!(cable2.conductor().material, ConductorMaterial::Copper);
        assert_eq!(cable2.conductor().frequency, 50.0);
        assert_eq!(cable2.layers().jacket, 0.5);
        assert_eq!(installation.soil().thermal_resistivity, 3.5);
    }

    #[test]
    fn unknown_material_names_the_cable() {
        let content = SCENARIO.replacen("material = \"Al\"", "material = \"Fe\"", 1);
        let scenario: ScenarioFile = toml::from_str(&content).unwrap();
        let err = build_installation(&scenario).unwrap_err();
        assert!(matches!(&err, CliError::Config(msg) if msg.contains("cable1")));
    }

    #[test]
    fn duplicate_cable_ids_are_rejected() {
        let content = SCENARIO.replacen("id = \"cable2\"", "id = \"cable1\"", 1);
        let scenario: ScenarioFile = toml::from_str(&content).unwrap();
        assert!(matches!(
            build_installation(&scenario),
            Err(CliError::Installation(InstallationError::DuplicateCable(_)))
        ));
    }

    #[test]
    fn segment_above_grade_is_rejected() {
        let content = SCENARIO.replacen("[[0.0, -0.77, 2.0]]", "[[0.0, 0.5, 2.0]]", 1);
        let scenario: ScenarioFile = toml::from_str(&content).unwrap();
        assert!(matches!(
            build_installation(&scenario),
            Err(CliError::Cable(CableError::Geometry { .. }))
        ));
    }

    #[test]
    fn bundled_scenarios_build() {
        for content in [
            include_str!("../../../../scenarios/parallel_cables.toml"),
            include_str!("../../../../scenarios/cable_crossing.toml"),
        ] {
            let scenario: ScenarioFile = toml::from_str(content).unwrap();
            let installation = build_installation(&scenario).unwrap();
            assert_eq!(installation.cable_count(), 2);
            assert!(installation.point_count() > 0);
        }
    }

    #[test]
    fn materials_default_to_builtin_table() {
        let table = load_materials(None).unwrap();
        assert!(
            table
                .get(ConductorMaterial::Aluminium, "RoundStranded")
                .is_ok()
        );
    }

    #[test]
    fn missing_materials_file_is_reported() {
        let dir = tempdir().unwrap();
        let result = load_materials(Some(&dir.path().join("absent.toml")));
        assert!(matches!(result, Err(CliError::Material(_))));
    }
}
