//! # CableTherm Core Library
//!
//! Steady-state conductor temperatures for buried power cables, computed by an iterative
//! point-source model: each cable is discretized into short line sources of heat, sources
//! interact through an image-source kernel for a soil bounded by an isothermal surface, and
//! the temperature-dependent conductor losses (IEC 60287 skin and proximity effects) are fed
//! back until the temperatures settle.
//!
//! ## Architectural Philosophy
//!
//! The library follows a strict three-layer architecture.
//!
//! - **[`core`]: The Foundation.** Stateless data models (`Installation`, `Cable`,
//!   `Segment`), material constants, the loss formulas, the heat kernel and CSV export.
//!
//! - **[`engine`]: The Logic Core.** The stateful fixed-point solver with its arena buffers,
//!   configuration, progress reporting and cooperative cancellation.
//!
//! - **[`workflows`]: The Public API.** Runs a complete steady-state analysis on an
//!   installation and returns a per-cable report.

pub mod core;
pub mod engine;
pub mod workflows;
