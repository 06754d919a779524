#![allow(dead_code)]

use cabletherm::core::materials::table::MaterialTable;
use cabletherm::core::models::cable::{
    Cable, CableParams, Conductor, ConductorMaterial, ConstructionLayers,
};
use cabletherm::core::models::installation::Installation;
use cabletherm::engine::cancel::CancellationToken;
use cabletherm::engine::config::SolverConfig;
use cabletherm::engine::progress::ProgressReporter;
use cabletherm::workflows::steady_state::{self, SteadyStateReport};
use nalgebra::Point3;

pub const AMBIENT: f64 = 30.0;
pub const SOIL_RESISTIVITY: f64 = 3.5;

/// 300 A aluminium conductor with 3.5 K·m/W of insulation, matching the reference scenario.
pub fn aluminium_cable(id: &str, start: [f64; 3], end: [f64; 3], spacing: f64) -> Cable {
    let mut cable = Cable::new(CableParams {
        id: id.to_string(),
        current: 300.0,
        point_spacing: spacing,
        start: Point3::from(start),
        conductor: Conductor {
            material: ConductorMaterial::Aluminium,
            construction: "RoundStranded".to_string(),
            diameter: 0.02159,
            dc_resistance_20: Some(9.51443569553806e-5),
            frequency: 0.0,
            spacing: None,
        },
        layers: ConstructionLayers {
            insulation: 3.5,
            ..Default::default()
        },
    })
    .unwrap();
    cable.append_segment(Point3::from(end)).unwrap();
    cable
}

pub fn installation(cables: Vec<Cable>) -> Installation {
    let mut installation = Installation::new(AMBIENT, SOIL_RESISTIVITY).unwrap();
    for cable in cables {
        installation.add_cable(cable).unwrap();
    }
    installation
}

/// Built-in table with the aluminium temperature coefficient zeroed, so losses stay fixed.
pub fn constant_resistance_materials() -> MaterialTable {
    MaterialTable::from_toml_str(
        r#"
        [Al.RoundStranded]
        resistivity = 2.826e-8
        temperature-coefficient = 0.0
        skin-factor = 1.0
        proximity-factor = 0.8
        "#,
    )
    .unwrap()
}

pub fn solve(
    installation: &mut Installation,
    materials: &MaterialTable,
    config: &SolverConfig,
) -> SteadyStateReport {
    steady_state::run(
        installation,
        materials,
        config,
        &ProgressReporter::new(),
        &CancellationToken::new(),
    )
    .unwrap()
}

pub fn temperatures(installation: &Installation, cable_id: &str) -> Vec<f64> {
    let id = installation.find_cable(cable_id).unwrap();
    installation.cable(id).unwrap().temperatures().to_vec()
}
