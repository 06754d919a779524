use nalgebra::Point3;

/// A discretized piece of cable treated as a finite line source of heat.
///
/// `position` is where the source sits (the start of the span it represents) and `length` is
/// the length of cable the source stands for. The y coordinate is depth and is negative below
/// grade.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PointSource {
    pub position: Point3<f64>,
    pub length: f64,
}

impl PointSource {
    pub fn new(position: Point3<f64>, length: f64) -> Self {
        Self { position, length }
    }

    /// Whether this source represents less cable than the nominal spacing, i.e. it is the
    /// trailing remainder of a segment.
    #[inline]
    pub fn is_short(&self, nominal_spacing: f64) -> bool {
        self.length < nominal_spacing * (1.0 - super::segment::SPACING_EPSILON)
    }
}
