//! # Core Module
//!
//! Stateless building blocks of the cable thermal model: the data describing an installation,
//! the conductor material constants, the electrical loss formulas and the image-source heat
//! kernel. Nothing in here iterates; the fixed-point coupling lives in [`crate::engine`].
//!
//! ## Architecture
//!
//! - **Installation Representation** ([`models`]) - Soil, cables, segments and point sources
//! - **Material Constants** ([`materials`]) - IEC 60287 resistivity, temperature coefficient
//!   and skin/proximity constants, with TOML overrides
//! - **Electrical Losses** ([`losses`]) - Temperature-dependent AC resistance and watt loss
//! - **Heat Conduction** ([`thermal`]) - Image-source kernel and field sampling
//! - **Export** ([`io`]) - CSV point table
//!
//! ## Physical Model
//!
//! Each cable is a chain of short line sources of heat buried in homogeneous soil of thermal
//! resistivity ρ. The soil surface is an isotherm at ambient temperature, enforced by pairing
//! every source with a negative mirror image above grade. The temperature of a point is the
//! ambient temperature plus the rise through its own construction layers plus the superposed
//! field of every other source in the installation.

pub mod io;
pub mod losses;
pub mod materials;
pub mod models;
pub mod thermal;
