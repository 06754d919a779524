//! # Thermal Module
//!
//! Heat-conduction building blocks for a homogeneous semi-infinite soil whose surface is held
//! at ambient temperature. Every point source is paired with a mirror image above grade
//! carrying the opposite sign (Kennelly's hypothesis), so the field vanishes at `y = 0`.
//!
//! - [`kernel`] - the image-source kernel, self-heating and field scaling.
//! - [`probe`] - temperature at an arbitrary location from the current cable losses.

pub mod kernel;
pub mod probe;
