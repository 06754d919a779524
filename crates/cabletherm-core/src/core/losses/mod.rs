//! # Losses Module
//!
//! Electrical loss model of a single conductor following IEC 60287-1-1 §2.1: the DC
//! resistance is corrected for temperature, the AC resistance adds the skin and proximity
//! effect factors, and the Joule loss per metre is `I² · R_ac(T)`.
//!
//! - [`ac_resistance`] holds the pure formulas, evaluated per point.
//! - [`model`] binds those formulas to one cable's conductor and material constants.

pub mod ac_resistance;
pub mod model;
