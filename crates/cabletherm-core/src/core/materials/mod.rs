//! # Materials Module
//!
//! Conductor material constants used by the electrical loss model: electrical resistivity
//! and temperature coefficient (IEC 60287-1-1 Table 1) and the skin/proximity effect
//! constants `k_s`/`k_p` (IEC 60287-1-1 Table 2).
//!
//! The built-in rows live in static `phf` maps. A [`table::MaterialTable`] starts from those
//! rows and can be extended or overridden from a TOML file:
//!
//! ```toml
//! [Al.RoundStranded]
//! resistivity = 2.826e-8
//! temperature-coefficient = 4.03e-3
//! skin-factor = 1.0
//! proximity-factor = 0.8
//! ```

pub mod table;
