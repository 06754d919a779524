//! Per-iteration passes of the field solver.
//!
//! Each task reads the previous iterate from the [`PointArena`](super::buffers::PointArena)
//! and writes only into its own output buffer, so the passes can run in sequence without
//! one iteration seeing partial results of the same iteration.

pub mod field;
pub mod losses;
pub mod smoothing;
pub mod temperature;
