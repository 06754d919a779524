//! # Core Models Module
//!
//! Data structures describing a cable installation: the soil, the cables, the straight
//! segments they are built from and the point sources those segments are discretized into.
//!
//! ## Key Components
//!
//! - [`installation`] - Add-only cable registry with soil and ambient temperature
//! - [`cable`] - One conductor path with its per-point losses and temperatures
//! - [`segment`] - Straight runs of cable and their discretization
//! - [`point`] - Point sources of heat
//! - [`ids`] - Stable handles for cables
//!
//! ## Usage
//!
//! ```ignore
//! use cabletherm::core::models::{cable::Cable, installation::Installation};
//!
//! let mut installation = Installation::new(30.0, 3.5)?;
//! let mut cable = Cable::new(params)?;
//! cable.append_segment(Point3::new(0.0, -0.77, 50.0))?;
//! installation.add_cable(cable)?;
//! ```

pub mod cable;
pub mod ids;
pub mod installation;
pub mod point;
pub mod segment;
