use super::ac_resistance::{
    dc_resistance_at, effect_argument, proximity_effect_factor, skin_effect_factor,
};
use crate::core::materials::table::{MaterialError, MaterialTable};
use crate::core::models::cable::Cable;
use thiserror::Error;

#[derive(Debug, Error, Clone, PartialEq)]
pub enum LossError {
    #[error(
        "Non-physical DC resistance {resistance:e} Ω/m at conductor temperature {temperature} °C"
    )]
    NonPhysicalResistance { temperature: f64, resistance: f64 },
}

/// Intermediate values of one loss evaluation.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LossBreakdown {
    pub dc_resistance: f64,
    pub skin_effect: f64,
    pub proximity_effect: f64,
    pub ac_resistance: f64,
    /// Joule loss in W/m.
    pub watt_loss: f64,
}

/// Temperature-dependent watt loss of one cable's conductor.
#[derive(Debug, Clone, PartialEq)]
pub struct ConductorLossModel {
    current: f64,
    dc_resistance_20: f64,
    temperature_coefficient: f64,
    skin_factor: f64,
    proximity_factor: f64,
    frequency: f64,
    proximity_ratio: f64,
}

impl ConductorLossModel {
    /// Resolves the cable's material constants and fixes everything that does not depend on
    /// temperature. A missing `dc_resistance_20` is derived from the material resistivity and
    /// the conductor cross-section.
    pub fn for_cable(cable: &Cable, materials: &MaterialTable) -> Result<Self, MaterialError> {
        let conductor = cable.conductor();
        let properties = materials.get(conductor.material, &conductor.construction)?;
        let dc_resistance_20 = conductor
            .dc_resistance_20
            .unwrap_or_else(|| properties.dc_resistance_20(conductor.cross_section_area()));

        Ok(Self {
            current: cable.current(),
            dc_resistance_20,
            temperature_coefficient: properties.temperature_coefficient,
            skin_factor: properties.skin_factor,
            proximity_factor: properties.proximity_factor,
            frequency: conductor.frequency,
            proximity_ratio: conductor.proximity_ratio(),
        })
    }

    pub fn dc_resistance_20(&self) -> f64 {
        self.dc_resistance_20
    }

    pub fn evaluate(&self, temperature: f64) -> Result<LossBreakdown, LossError> {
        let dc_resistance =
            dc_resistance_at(self.dc_resistance_20, self.temperature_coefficient, temperature);
        if !(dc_resistance.is_finite() && dc_resistance > 0.0) {
            return Err(LossError::NonPhysicalResistance {
                temperature,
                resistance: dc_resistance,
            });
        }

        let xs = effect_argument(self.frequency, self.skin_factor, dc_resistance);
        let xp = effect_argument(self.frequency, self.proximity_factor, dc_resistance);
        let skin_effect = skin_effect_factor(xs);
        let proximity_effect = proximity_effect_factor(xp, self.proximity_ratio);
        let ac_resistance = dc_resistance * (1.0 + skin_effect + proximity_effect);

        Ok(LossBreakdown {
            dc_resistance,
            skin_effect,
            proximity_effect,
            ac_resistance,
            watt_loss: self.current * self.current * ac_resistance,
        })
    }

    #[inline]
    pub fn watt_loss(&self, temperature: f64) -> Result<f64, LossError> {
        self.evaluate(temperature).map(|b| b.watt_loss)
    }

    /// Writes the watt loss for each temperature into `losses`, point by point.
    pub fn update(&self, temperatures: &[f64], losses: &mut [f64]) -> Result<(), LossError> {
        debug_assert_eq!(temperatures.len(), losses.len());
        for (loss, &temperature) in losses.iter_mut().zip(temperatures) {
            *loss = self.watt_loss(temperature)?;
        }
        Ok(())
    }
}
