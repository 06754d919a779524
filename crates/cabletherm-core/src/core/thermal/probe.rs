use super::kernel::{field_temperature_rise, image_kernel};
use crate::core::models::installation::Installation;
use nalgebra::Point3;

/// Soil temperature at `location` produced by every point source of every cable, using the
/// losses currently stored on the cables.
///
/// A source that coincides with `location` is skipped.
pub fn sample_temperature(installation: &Installation, location: &Point3<f64>) -> f64 {
    let field: f64 = installation
        .cables()
        .flat_map(|(_, cable)| cable.points().iter().zip(cable.watt_losses()))
        .filter_map(|(source, &loss)| {
            image_kernel(location, &source.position).map(|k| k * source.length * loss)
        })
        .sum();

    installation.ambient_temperature()
        + field_temperature_rise(field, installation.soil().thermal_resistivity)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::models::cable::Cable;
    use crate::core::models::cable::tests::aluminium_params;
    use std::f64::consts::PI;

    const TOLERANCE: f64 = 1e-9;

    fn f64_approx_equal(a: f64, b: f64) -> bool {
        (a - b).abs() < TOLERANCE
    }

    fn installation_with_single_point(loss: f64) -> Installation {
        let mut installation = Installation::new(25.0, 2.0).unwrap();
        let mut cable = Cable::new(aluminium_params("c1", Point3::new(0.0, -1.0, 0.0), 1.0)).unwrap();
        cable.append_segment(Point3::new(0.0, -1.0, 0.5)).unwrap();
        let temperatures = cable.temperatures().to_vec();
        cable.set_thermal_state(&[loss], &temperatures);
        installation.add_cable(cable).unwrap();
        installation
    }

    #[test]
    fn unloaded_installation_samples_ambient() {
        let installation = installation_with_single_point(0.0);
        let t = sample_temperature(&installation, &Point3::new(0.0, -0.5, 0.0));
        assert!(f64_approx_equal(t, 25.0));
    }

    #[test]
    fn probe_matches_single_source_closed_form() {
        let installation = installation_with_single_point(10.0);
        let probe = Point3::new(0.0, -1.05, 0.0);
        // r+ = 0.05, r- = 2.05, L = 0.5
        let expected = 25.0 + (1.0 / 0.05 - 1.0 / 2.05) * 0.5 * 10.0 * 2.0 / (4.0 * PI);
        assert!(f64_approx_equal(
            sample_temperature(&installation, &probe),
            expected
        ));
    }

    #[test]
    fn coincident_source_is_skipped() {
        let installation = installation_with_single_point(10.0);
        let t = sample_temperature(&installation, &Point3::new(0.0, -1.0, 0.0));
        assert!(f64_approx_equal(t, 25.0));
    }
}
