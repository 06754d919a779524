use crate::core::models::ids::CableId;
use crate::core::models::installation::Installation;
use nalgebra::Point3;
use std::ops::Range;

/// Location of one cable's points inside the flat buffers.
#[derive(Debug, Clone)]
pub(crate) struct CableSlice {
    pub cable_id: CableId,
    pub name: String,
    pub range: Range<usize>,
    pub construction_resistance: f64,
}

/// Flat per-point storage for every cable of an installation.
///
/// Geometry is fixed when the arena is built. `temperatures` holds the previous iterate and
/// is only replaced by [`PointArena::swap`] after a complete pass has filled
/// `next_temperatures`.
#[derive(Debug, Clone)]
pub(crate) struct PointArena {
    pub cables: Vec<CableSlice>,
    pub positions: Vec<Point3<f64>>,
    pub lengths: Vec<f64>,
    /// Points shorter than their cable's nominal spacing.
    pub short: Vec<bool>,
    pub losses: Vec<f64>,
    pub temperatures: Vec<f64>,
    pub next_temperatures: Vec<f64>,
    /// Field sums from sources on the point's own cable.
    pub self_field: Vec<f64>,
    /// Field sums from sources on every other cable.
    pub mutual_field: Vec<f64>,
}

impl PointArena {
    pub fn from_installation(installation: &Installation) -> Self {
        let n = installation.point_count();
        let mut arena = Self {
            cables: Vec::with_capacity(installation.cable_count()),
            positions: Vec::with_capacity(n),
            lengths: Vec::with_capacity(n),
            short: Vec::with_capacity(n),
            losses: Vec::with_capacity(n),
            temperatures: Vec::with_capacity(n),
            next_temperatures: vec![0.0; n],
            self_field: vec![0.0; n],
            mutual_field: vec![0.0; n],
        };

        for (cable_id, cable) in installation.cables() {
            let start = arena.positions.len();
            for point in cable.points() {
                arena.positions.push(point.position);
                arena.lengths.push(point.length);
                arena.short.push(point.is_short(cable.point_spacing()));
            }
            arena.losses.extend_from_slice(cable.watt_losses());
            arena.temperatures.extend_from_slice(cable.temperatures());
            arena.cables.push(CableSlice {
                cable_id,
                name: cable.id().to_string(),
                range: start..arena.positions.len(),
                construction_resistance: cable.construction_thermal_resistance(),
            });
        }
        arena
    }

    pub fn len(&self) -> usize {
        self.positions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.positions.is_empty()
    }

    /// Largest absolute change between the previous and the freshly computed iterate.
    pub fn max_delta(&self) -> f64 {
        self.temperatures
            .iter()
            .zip(&self.next_temperatures)
            .map(|(old, new)| (new - old).abs())
            .fold(0.0, f64::max)
    }

    pub fn swap(&mut self) {
        std::mem::swap(&mut self.temperatures, &mut self.next_temperatures);
    }

    /// Name and local index of a flat point index.
    pub fn locate(&self, flat: usize) -> (&str, usize) {
        self.cables
            .iter()
            .find(|c| c.range.contains(&flat))
            .map(|c| (c.name.as_str(), flat - c.range.start))
            .unwrap_or(("<unknown>", flat))
    }
}
