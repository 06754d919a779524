use crate::cli::InspectArgs;
use crate::config::builder::build_installation;
use crate::config::file::ScenarioFile;
use crate::error::Result;
use cabletherm::core::io::point_table::write_point_table_to_path;
use cabletherm::core::models::installation::Installation;
use std::fmt::Write as _;
use tracing::info;

pub fn run(args: InspectArgs) -> Result<()> {
    let scenario = ScenarioFile::from_file(&args.input)?;
    let installation = build_installation(&scenario)?;
    print!("{}", render_summary(&installation));

    if let Some(path) = &args.output {
        info!("Writing discretized point table to {:?}", path);
        write_point_table_to_path(&installation, path)?;
        println!("✓ Point table written to: {}", path.display());
    }
    Ok(())
}

pub(crate) fn render_summary(installation: &Installation) -> String {
    let mut out = String::new();
    let _ = writeln!(
        out,
        "Ambient {:.2} °C, soil resistivity {:.3} K·m/W",
        installation.ambient_temperature(),
        installation.soil().thermal_resistivity
    );
    for (_, cable) in installation.cables() {
        let conductor = cable.conductor();
        let _ = writeln!(
            out,
            "  {:<16} {} {:<16} I={:.1} A  segments={}  length={:.3} m  points={}  T_cab={:.4} K·m/W",
            cable.id(),
            conductor.material,
            conductor.construction,
            cable.current(),
            cable.segments().len(),
            cable.total_length(),
            cable.point_count(),
            cable.construction_thermal_resistance()
        );
    }
    let _ = writeln!(
        out,
        "Total: {} cable(s), {} point(s)",
        installation.cable_count(),
        installation.point_count()
    );
    out
}
