use super::point::PointSource;
use super::segment::{GeometryError, Segment, validate_buried};
use nalgebra::Point3;
use std::f64::consts::PI;
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

/// Temperature (°C) assigned to every point whenever a cable's geometry changes.
pub const INITIAL_CONDUCTOR_TEMPERATURE: f64 = 90.0;

#[derive(Debug, Error, Clone, PartialEq)]
pub enum CableError {
    #[error("Cable identifier must not be empty")]
    EmptyIdentifier,

    #[error("Invalid parameter '{name}' for cable '{cable_id}': {value}")]
    InvalidParameter {
        cable_id: String,
        name: &'static str,
        value: f64,
    },

    #[error("Geometry error on cable '{cable_id}': {source}")]
    Geometry {
        cable_id: String,
        source: GeometryError,
    },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum ConductorMaterial {
    Copper,
    Aluminium,
}

#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[error("Unknown conductor material '{0}' (expected 'Cu' or 'Al')")]
pub struct ParseConductorMaterialError(pub String);

impl ConductorMaterial {
    pub fn symbol(&self) -> &'static str {
        match self {
            ConductorMaterial::Copper => "Cu",
            ConductorMaterial::Aluminium => "Al",
        }
    }
}

impl FromStr for ConductorMaterial {
    type Err = ParseConductorMaterialError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "cu" | "copper" => Ok(ConductorMaterial::Copper),
            "al" | "aluminium" | "aluminum" => Ok(ConductorMaterial::Aluminium),
            _ => Err(ParseConductorMaterialError(s.to_string())),
        }
    }
}

impl fmt::Display for ConductorMaterial {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.symbol())
    }
}

/// Electrical description of the conductor.
#[derive(Debug, Clone, PartialEq)]
pub struct Conductor {
    pub material: ConductorMaterial,
    /// Construction category used to look up skin/proximity constants (e.g. "RoundStranded").
    pub construction: String,
    /// Conductor diameter in metres.
    pub diameter: f64,
    /// DC resistance at 20 °C in Ω/m. Derived from the material resistivity when absent.
    pub dc_resistance_20: Option<f64>,
    /// Supply frequency in Hz.
    pub frequency: f64,
    /// Axis-to-axis distance to the neighbouring conductor in metres. `None` means touching.
    pub spacing: Option<f64>,
}

impl Conductor {
    pub fn cross_section_area(&self) -> f64 {
        PI * (self.diameter / 2.0).powi(2)
    }

    /// Ratio `d / s` used by the proximity-effect factor.
    pub fn proximity_ratio(&self) -> f64 {
        self.spacing.map_or(1.0, |s| self.diameter / s)
    }
}

/// Thermal resistances of the cable's own layers (K·m/W) and the sheath/armour loss factors.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct ConstructionLayers {
    pub insulation: f64,
    pub bedding: f64,
    pub jacket: f64,
    pub sheath_loss_factor: f64,
    pub armor_loss_factor: f64,
}

impl ConstructionLayers {
    /// Series thermal resistance of the construction, weighting the outer layers by the
    /// extra heat the sheath and armour losses push through them.
    pub fn thermal_resistance(&self) -> f64 {
        self.insulation
            + (1.0 + self.sheath_loss_factor) * self.bedding
            + (1.0 + self.sheath_loss_factor + self.armor_loss_factor) * self.jacket
    }
}

/// Everything needed to create a [`Cable`].
#[derive(Debug, Clone, PartialEq)]
pub struct CableParams {
    pub id: String,
    /// Operating current in A, constant along the cable.
    pub current: f64,
    /// Target distance between point sources in metres.
    pub point_spacing: f64,
    pub start: Point3<f64>,
    pub conductor: Conductor,
    pub layers: ConstructionLayers,
}

/// One conductor path made of chained straight segments.
///
/// The cable owns its point sources together with the per-point watt loss (W/m) and
/// conductor temperature (°C). All three sequences always have the same length.
#[derive(Debug, Clone, PartialEq)]
pub struct Cable {
    id: String,
    current: f64,
    point_spacing: f64,
    conductor: Conductor,
    layers: ConstructionLayers,
    head: Point3<f64>,
    segments: Vec<Segment>,
    points: Vec<PointSource>,
    watt_losses: Vec<f64>,
    temperatures: Vec<f64>,
}

impl Cable {
    pub fn new(params: CableParams) -> Result<Self, CableError> {
        let CableParams {
            id,
            current,
            point_spacing,
            start,
            conductor,
            layers,
        } = params;

        if id.trim().is_empty() {
            return Err(CableError::EmptyIdentifier);
        }

        let invalid = |name: &'static str, value: f64| CableError::InvalidParameter {
            cable_id: id.clone(),
            name,
            value,
        };
        let non_negative = |v: f64| v.is_finite() && v >= 0.0;
        let positive = |v: f64| v.is_finite() && v > 0.0;

        if !current.is_finite() {
            return Err(invalid("current", current));
        }
        if !positive(point_spacing) {
            return Err(invalid("point_spacing", point_spacing));
        }
        if !positive(conductor.diameter) {
            return Err(invalid("diameter", conductor.diameter));
        }
        if let Some(r) = conductor.dc_resistance_20 {
            if !positive(r) {
                return Err(invalid("dc_resistance_20", r));
            }
        }
        if let Some(s) = conductor.spacing {
            if !positive(s) {
                return Err(invalid("conductor_spacing", s));
            }
        }
        if !non_negative(conductor.frequency) {
            return Err(invalid("frequency", conductor.frequency));
        }
        for (name, value) in [
            ("insulation", layers.insulation),
            ("bedding", layers.bedding),
            ("jacket", layers.jacket),
            ("sheath_loss_factor", layers.sheath_loss_factor),
            ("armor_loss_factor", layers.armor_loss_factor),
        ] {
            if !non_negative(value) {
                return Err(invalid(name, value));
            }
        }

        validate_buried(&start).map_err(|source| CableError::Geometry {
            cable_id: id.clone(),
            source,
        })?;

        Ok(Self {
            id,
            current,
            point_spacing,
            conductor,
            layers,
            head: start,
            segments: Vec::new(),
            points: Vec::new(),
            watt_losses: Vec::new(),
            temperatures: Vec::new(),
        })
    }

    /// Extends the cable from its head to `end` with a new straight segment.
    ///
    /// On success the head moves to `end`, the new segment's point sources are appended and
    /// every point's loss and temperature are reset to their initial values. On error the
    /// cable is left untouched.
    pub fn append_segment(&mut self, end: Point3<f64>) -> Result<(), CableError> {
        let geometry_error = |source| CableError::Geometry {
            cable_id: self.id.clone(),
            source,
        };
        let segment = Segment::new(self.head, end).map_err(geometry_error)?;
        let new_points = segment
            .discretize(self.point_spacing)
            .map_err(geometry_error)?;

        self.segments.push(segment);
        self.head = end;
        self.points.extend(new_points);
        self.reset_thermal_state();
        Ok(())
    }

    fn reset_thermal_state(&mut self) {
        let n = self.points.len();
        self.watt_losses = vec![0.0; n];
        self.temperatures = vec![INITIAL_CONDUCTOR_TEMPERATURE; n];
    }

    pub(crate) fn set_thermal_state(&mut self, watt_losses: &[f64], temperatures: &[f64]) {
        debug_assert_eq!(watt_losses.len(), self.points.len());
        debug_assert_eq!(temperatures.len(), self.points.len());
        self.watt_losses.copy_from_slice(watt_losses);
        self.temperatures.copy_from_slice(temperatures);
    }

    pub fn id(&self) -> &str {
        &self.id
    }

    pub fn current(&self) -> f64 {
        self.current
    }

    pub fn point_spacing(&self) -> f64 {
        self.point_spacing
    }

    pub fn conductor(&self) -> &Conductor {
        &self.conductor
    }

    pub fn layers(&self) -> &ConstructionLayers {
        &self.layers
    }

    pub fn head(&self) -> Point3<f64> {
        self.head
    }

    pub fn segments(&self) -> &[Segment] {
        &self.segments
    }

    pub fn points(&self) -> &[PointSource] {
        &self.points
    }

    pub fn watt_losses(&self) -> &[f64] {
        &self.watt_losses
    }

    pub fn temperatures(&self) -> &[f64] {
        &self.temperatures
    }

    pub fn point_count(&self) -> usize {
        self.points.len()
    }

    pub fn total_length(&self) -> f64 {
        self.points.iter().map(|p| p.length).sum()
    }

    /// Distance along the cable at the far end of each point's span.
    pub fn cumulative_lengths(&self) -> Vec<f64> {
        self.points
            .iter()
            .scan(0.0, |acc, p| {
                *acc += p.length;
                Some(*acc)
            })
            .collect()
    }

    pub fn construction_thermal_resistance(&self) -> f64 {
        self.layers.thermal_resistance()
    }
}
