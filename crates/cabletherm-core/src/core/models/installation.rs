use super::cable::Cable;
use super::ids::CableId;
use slotmap::SlotMap;
use std::collections::HashMap;
use thiserror::Error;

#[derive(Debug, Error, Clone, PartialEq)]
pub enum InstallationError {
    #[error("Cable '{0}' already exists in the installation")]
    DuplicateCable(String),

    #[error("Soil thermal resistivity must be finite and positive, got {0}")]
    InvalidSoil(f64),

    #[error("Ambient temperature must be finite, got {0}")]
    InvalidAmbient(f64),
}

/// Homogeneous soil surrounding the cables.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Soil {
    /// Thermal resistivity in K·m/W.
    pub thermal_resistivity: f64,
}

impl Soil {
    pub fn new(thermal_resistivity: f64) -> Result<Self, InstallationError> {
        if !(thermal_resistivity.is_finite() && thermal_resistivity > 0.0) {
            return Err(InstallationError::InvalidSoil(thermal_resistivity));
        }
        Ok(Self {
            thermal_resistivity,
        })
    }
}

/// A set of buried cables sharing one soil and ambient temperature.
///
/// Cables can only be added. Iteration follows insertion order, which is also the order the
/// solver walks cables in.
#[derive(Debug, Clone)]
pub struct Installation {
    /// Primary storage for cables.
    cables: SlotMap<CableId, Cable>,
    /// Cable handles in insertion order.
    order: Vec<CableId>,
    /// Lookup from cable identifier to handle.
    name_map: HashMap<String, CableId>,
    soil: Soil,
    /// Ambient (undisturbed) soil temperature in °C.
    ambient_temperature: f64,
}

impl Installation {
    pub fn new(
        ambient_temperature: f64,
        soil_resistivity: f64,
    ) -> Result<Self, InstallationError> {
        if !ambient_temperature.is_finite() {
            return Err(InstallationError::InvalidAmbient(ambient_temperature));
        }
        Ok(Self {
            cables: SlotMap::with_key(),
            order: Vec::new(),
            name_map: HashMap::new(),
            soil: Soil::new(soil_resistivity)?,
            ambient_temperature,
        })
    }

    /// Adds a cable, rejecting identifiers that are already present.
    pub fn add_cable(&mut self, cable: Cable) -> Result<CableId, InstallationError> {
        if self.name_map.contains_key(cable.id()) {
            return Err(InstallationError::DuplicateCable(cable.id().to_string()));
        }
        let name = cable.id().to_string();
        let id = self.cables.insert(cable);
        self.order.push(id);
        self.name_map.insert(name, id);
        Ok(id)
    }

    pub fn cable(&self, id: CableId) -> Option<&Cable> {
        self.cables.get(id)
    }

    pub(crate) fn cable_mut(&mut self, id: CableId) -> Option<&mut Cable> {
        self.cables.get_mut(id)
    }

    pub fn find_cable(&self, name: &str) -> Option<CableId> {
        self.name_map.get(name).copied()
    }

    pub fn cable_ids(&self) -> &[CableId] {
        &self.order
    }

    /// Iterates over cables in insertion order.
    pub fn cables(&self) -> impl Iterator<Item = (CableId, &Cable)> {
        self.order.iter().map(move |&id| (id, &self.cables[id]))
    }

    pub fn cable_count(&self) -> usize {
        self.order.len()
    }

    pub fn point_count(&self) -> usize {
        self.cables().map(|(_, c)| c.point_count()).sum()
    }

    pub fn soil(&self) -> &Soil {
        &self.soil
    }

    pub fn ambient_temperature(&self) -> f64 {
        self.ambient_temperature
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::models::cable::tests::aluminium_params;
    use nalgebra::Point3;

    fn cable(name: &str, x: f64) -> Cable {
        let mut cable = Cable::new(aluminium_params(name, Point3::new(x, -1.0, 0.0), 0.5)).unwrap();
        cable.append_segment(Point3::new(x, -1.0, 2.0)).unwrap();
        cable
    }

    #[test]
    fn add_cable_registers_name_and_preserves_order() {
        let mut installation = Installation::new(30.0, 3.5).unwrap();
        let a = installation.add_cable(cable("a", 0.0)).unwrap();
        let b = installation.add_cable(cable("b", 0.2)).unwrap();

        assert_eq!(installation.cable_count(), 2);
        assert_eq!(installation.find_cable("a"), Some(a));
        assert_eq!(installation.find_cable("b"), Some(b));
        let names: Vec<_> = installation.cables().map(|(_, c)| c.id()).collect();
        assert_eq!(names, vec!["a", "b"]);
        assert_eq!(installation.point_count(), 8);
    }

    #[test]
    fn duplicate_identifier_is_rejected() {
        let mut installation = Installation::new(30.0, 3.5).unwrap();
        installation.add_cable(cable("a", 0.0)).unwrap();
        let result = installation.add_cable(cable("a", 0.5));
        assert_eq!(
            result,
            Err(InstallationError::DuplicateCable("a".to_string()))
        );
        assert_eq!(installation.cable_count(), 1);
    }

    #[test]
    fn invalid_soil_and_ambient_are_rejected() {
        assert!(matches!(
            Installation::new(30.0, 0.0),
            Err(InstallationError::InvalidSoil(_))
        ));
        assert!(matches!(
            Installation::new(f64::NAN, 1.0),
            Err(InstallationError::InvalidAmbient(_))
        ));
    }

    #[test]
    fn soil_and_ambient_are_exposed() {
        let installation = Installation::new(25.0, 1.2).unwrap();
        assert_eq!(installation.soil().thermal_resistivity, 1.2);
        assert_eq!(installation.ambient_temperature(), 25.0);
    }
}
