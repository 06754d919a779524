use super::smoothing::smooth_short_points;
use crate::core::thermal::kernel::{field_temperature_rise, self_heating_rise};
use crate::engine::buffers::PointArena;
use crate::engine::error::EngineError;

/// Combines self-heating, the smoothed own-cable field and the field of all other cables into
/// `next_temperatures`.
pub fn run(
    arena: &mut PointArena,
    soil_resistivity: f64,
    ambient_temperature: f64,
    iteration: usize,
) -> Result<(), EngineError> {
    let PointArena {
        cables,
        lengths,
        short,
        losses,
        next_temperatures,
        self_field,
        mutual_field,
        ..
    } = arena;

    for slice in cables.iter() {
        let range = slice.range.clone();
        let mut smoothed = vec![0.0; range.len()];
        smooth_short_points(&self_field[range.clone()], &short[range.clone()], &mut smoothed);

        for (local, p) in range.enumerate() {
            let temperature = self_heating_rise(
                losses[p],
                lengths[p],
                slice.construction_resistance,
                soil_resistivity,
            ) + field_temperature_rise(smoothed[local] + mutual_field[p], soil_resistivity)
                + ambient_temperature;

            if !temperature.is_finite() {
                return Err(EngineError::NonFiniteTemperature {
                    cable_id: slice.name.clone(),
                    index: local,
                    iteration,
                });
            }
            next_temperatures[p] = temperature;
        }
    }
    Ok(())
}
