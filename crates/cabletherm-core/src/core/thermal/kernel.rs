use nalgebra::Point3;
use std::f64::consts::PI;

/// Distance (m) below which two sources are treated as coincident.
pub const MIN_SOURCE_DISTANCE: f64 = 1e-12;

/// Reflects a point across the soil surface `y = 0`.
#[inline]
pub fn mirror_across_surface(p: &Point3<f64>) -> Point3<f64> {
    Point3::new(p.x, -p.y, p.z)
}

/// Geometric factor `1/r+ − 1/r−` of a source and its image as seen from `target`.
///
/// Returns `None` when the source sits on the target, where the kernel is singular.
#[inline]
pub fn image_kernel(target: &Point3<f64>, source: &Point3<f64>) -> Option<f64> {
    let direct = (target - source).norm();
    if direct < MIN_SOURCE_DISTANCE {
        return None;
    }
    let image = (target - mirror_across_surface(source)).norm();
    Some(1.0 / direct - 1.0 / image)
}

/// Converts a summed `Σ kernel · L · P` field into a temperature rise in K.
#[inline]
pub fn field_temperature_rise(field: f64, soil_resistivity: f64) -> f64 {
    field * soil_resistivity / (4.0 * PI)
}

/// Rise of a point over its own surroundings: `P · L · (T_cab + ρ_soil)`.
#[inline]
pub fn self_heating_rise(
    watt_loss: f64,
    length: f64,
    construction_resistance: f64,
    soil_resistivity: f64,
) -> f64 {
    watt_loss * length * (construction_resistance + soil_resistivity)
}

#[cfg(test)]
mod tests {
    use super::*;

    const TOLERANCE: f64 = 1e-12;

    fn f64_approx_equal(a: f64, b: f64) -> bool {
        (a - b).abs() < TOLERANCE
    }

    #[test]
    fn mirror_negates_depth_only() {
        let m = mirror_across_surface(&Point3::new(1.0, -2.0, 3.0));
        assert_eq!(m, Point3::new(1.0, 2.0, 3.0));
    }

    #[test]
    fn kernel_is_singular_only_at_the_source() {
        let p = Point3::new(0.0, -1.0, 0.0);
        assert_eq!(image_kernel(&p, &p), None);
        assert!(image_kernel(&p, &Point3::new(0.0, -1.0, 1e-6)).is_some());
    }

    #[test]
    fn kernel_matches_closed_form_for_vertical_offset() {
        let target = Point3::new(0.0, -1.0, 0.0);
        let source = Point3::new(0.0, -2.0, 0.0);
        // r+ = 1, r- = |-1 - 2| = 3
        let k = image_kernel(&target, &source).unwrap();
        assert!(f64_approx_equal(k, 1.0 - 1.0 / 3.0));
    }

    #[test]
    fn kernel_is_symmetric_between_buried_points() {
        let a = Point3::new(0.3, -0.7, 1.1);
        let b = Point3::new(-0.2, -1.4, 0.4);
        let ab = image_kernel(&a, &b).unwrap();
        let ba = image_kernel(&b, &a).unwrap();
        assert!(f64_approx_equal(ab, ba));
        assert!(ab > 0.0);
    }

    #[test]
    fn kernel_vanishes_at_the_surface() {
        let surface = Point3::new(0.5, 0.0, 0.0);
        let source = Point3::new(0.0, -1.0, 0.0);
        assert!(f64_approx_equal(image_kernel(&surface, &source).unwrap(), 0.0));
    }

    #[test]
    fn field_rise_scales_by_resistivity_over_four_pi() {
        assert!(f64_approx_equal(field_temperature_rise(4.0 * PI, 2.5), 2.5));
    }

    #[test]
    fn self_heating_combines_construction_and_soil_resistance() {
        assert!(f64_approx_equal(self_heating_rise(10.0, 0.5, 3.5, 1.5), 25.0));
    }
}
