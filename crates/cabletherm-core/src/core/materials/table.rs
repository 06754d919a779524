use crate::core::models::cable::ConductorMaterial;
use phf::{Map, phf_map};
use serde::Deserialize;
use std::collections::HashMap;
use std::path::Path;
use thiserror::Error;

/// Resistivity (Ω·m) and temperature coefficient (1/K) at 20 °C per conductor material.
static CONDUCTOR_CONSTANTS: Map<&'static str, (f64, f64)> = phf_map! {
    "Cu" => (1.724e-8, 3.93e-3),
    "Al" => (2.826e-8, 4.03e-3),
};

/// Skin (`k_s`) and proximity (`k_p`) constants per "material/construction".
static EFFECT_FACTORS: Map<&'static str, (f64, f64)> = phf_map! {
    "Cu/RoundSolid" => (1.0, 1.0),
    "Cu/RoundStranded" => (1.0, 1.0),
    "Cu/RoundMilliken" => (0.435, 0.37),
    "Cu/SectorShaped" => (1.0, 0.8),
    "Al/RoundSolid" => (1.0, 1.0),
    "Al/RoundStranded" => (1.0, 0.8),
    "Al/SectorShaped" => (1.0, 0.8),
};

#[derive(Debug, Error)]
pub enum MaterialError {
    #[error("No material properties for conductor '{material}' with construction '{construction}'")]
    UnknownCombination {
        material: ConductorMaterial,
        construction: String,
    },
    #[error("Unknown conductor material '{0}' in material table")]
    UnknownMaterial(String),
    #[error("Invalid value {value} for '{name}' of {material}/{construction}")]
    InvalidProperty {
        material: ConductorMaterial,
        construction: String,
        name: &'static str,
        value: f64,
    },
    #[error("File I/O error for '{path}': {source}")]
    Io {
        path: String,
        source: std::io::Error,
    },
    #[error("TOML parsing error for '{path}': {source}")]
    Toml {
        path: String,
        source: toml::de::Error,
    },
}

#[derive(Debug, Deserialize, Clone, Copy, PartialEq)]
#[serde(rename_all = "kebab-case", deny_unknown_fields)]
pub struct MaterialProperties {
    /// Electrical resistivity at 20 °C in Ω·m.
    pub resistivity: f64,
    /// Constant-mass temperature coefficient at 20 °C in 1/K.
    pub temperature_coefficient: f64,
    pub skin_factor: f64,
    pub proximity_factor: f64,
}

impl MaterialProperties {
    /// DC resistance per metre of a solid conductor with the given cross-section (m²).
    pub fn dc_resistance_20(&self, cross_section_area: f64) -> f64 {
        self.resistivity / cross_section_area
    }

    fn validate(
        &self,
        material: ConductorMaterial,
        construction: &str,
    ) -> Result<(), MaterialError> {
        let checks = [
            ("resistivity", self.resistivity, self.resistivity > 0.0),
            (
                "temperature-coefficient",
                self.temperature_coefficient,
                true,
            ),
            ("skin-factor", self.skin_factor, self.skin_factor >= 0.0),
            (
                "proximity-factor",
                self.proximity_factor,
                self.proximity_factor >= 0.0,
            ),
        ];
        for (name, value, ok) in checks {
            if !value.is_finite() || !ok {
                return Err(MaterialError::InvalidProperty {
                    material,
                    construction: construction.to_string(),
                    name,
                    value,
                });
            }
        }
        Ok(())
    }
}

/// Immutable lookup from (material, construction) to conductor constants.
#[derive(Debug, Clone)]
pub struct MaterialTable {
    entries: HashMap<(ConductorMaterial, String), MaterialProperties>,
}

impl Default for MaterialTable {
    fn default() -> Self {
        Self::builtin()
    }
}

impl MaterialTable {
    /// Table holding only the built-in IEC 60287 rows.
    pub fn builtin() -> Self {
        let entries = EFFECT_FACTORS
            .entries()
            .filter_map(|(key, &(skin_factor, proximity_factor))| {
                let (symbol, construction) = key.split_once('/')?;
                let material = symbol.parse::<ConductorMaterial>().ok()?;
                let &(resistivity, temperature_coefficient) = CONDUCTOR_CONSTANTS.get(symbol)?;
                Some((
                    (material, construction.to_string()),
                    MaterialProperties {
                        resistivity,
                        temperature_coefficient,
                        skin_factor,
                        proximity_factor,
                    },
                ))
            })
            .collect();
        Self { entries }
    }

    /// Built-in rows merged with the overrides in a TOML file.
    pub fn load(path: &Path) -> Result<Self, MaterialError> {
        let content = std::fs::read_to_string(path).map_err(|e| MaterialError::Io {
            path: path.to_string_lossy().to_string(),
            source: e,
        })?;
        Self::parse_overrides(&content, &path.to_string_lossy())
    }

    /// Built-in rows merged with the overrides in a TOML string.
    pub fn from_toml_str(content: &str) -> Result<Self, MaterialError> {
        Self::parse_overrides(content, "<inline>")
    }

    fn parse_overrides(content: &str, origin: &str) -> Result<Self, MaterialError> {
        let raw: HashMap<String, HashMap<String, MaterialProperties>> = toml::from_str(content)
            .map_err(|e| MaterialError::Toml {
                path: origin.to_string(),
                source: e,
            })?;

        let mut table = Self::builtin();
        for (symbol, constructions) in raw {
            let material = symbol
                .parse::<ConductorMaterial>()
                .map_err(|_| MaterialError::UnknownMaterial(symbol.clone()))?;
            for (construction, properties) in constructions {
                table.insert(material, &construction, properties)?;
            }
        }
        Ok(table)
    }

    pub fn insert(
        &mut self,
        material: ConductorMaterial,
        construction: &str,
        properties: MaterialProperties,
    ) -> Result<(), MaterialError> {
        properties.validate(material, construction)?;
        self.entries
            .insert((material, construction.to_string()), properties);
        Ok(())
    }

    pub fn get(
        &self,
        material: ConductorMaterial,
        construction: &str,
    ) -> Result<&MaterialProperties, MaterialError> {
        self.entries
            .get(&(material, construction.to_string()))
            .ok_or_else(|| MaterialError::UnknownCombination {
                material,
                construction: construction.to_string(),
            })
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
