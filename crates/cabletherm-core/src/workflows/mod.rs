//! # Workflows Module
//!
//! High-level entry points that tie the [`engine`](crate::engine) and [`core`](crate::core)
//! layers together into a complete analysis.
//!
//! - **Steady State** ([`steady_state`]) - Solves an installation to thermal equilibrium and
//!   summarizes the result per cable, including probe temperatures at a fixed offset from
//!   every point source.

pub mod steady_state;
