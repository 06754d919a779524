//! # Engine Module
//!
//! The stateful layer of the library: the fixed-point iteration that couples the conductor
//! loss model to the soil temperature field until both agree.
//!
//! ## Overview
//!
//! A [`solver::ThermalSolver`] is built from an installation and a material table. It copies
//! every cable's points into flat arena buffers, then repeats three passes per iteration:
//!
//! 1. recompute each point's watt loss from its current temperature,
//! 2. sum the image-source field of every source at every point,
//! 3. assemble the new temperatures (self-heating, smoothed own-cable field, field of the
//!    other cables, ambient) into a second buffer.
//!
//! The buffers are swapped only after a full pass, so every iteration reads the previous
//! iterate exclusively. Iteration stops when the largest change is within tolerance, when
//! the iteration cap is hit, or when the caller cancels.
//!
//! ## Architecture
//!
//! - **Configuration** ([`config`]) - Tolerance, iteration cap and reporting offset
//! - **Solver** ([`solver`]) - Setup, single steps, the convergence loop and write-back
//! - **State** ([`state`]) - Summary of a converged solve
//! - **Progress Monitoring** ([`progress`]) - Callback-based progress events
//! - **Cancellation** ([`cancel`]) - Cooperative stop flag checked between iterations
//! - **Error Handling** ([`error`]) - Engine error type

pub(crate) mod buffers;
pub mod cancel;
pub mod config;
pub mod error;
pub mod progress;
pub mod solver;
pub mod state;
pub(crate) mod tasks;
