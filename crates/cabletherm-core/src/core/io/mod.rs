//! Tabular export of cable point data.
//!
//! The per-point table is the hand-off to plotting and visualization tools: one CSV row per
//! point source with its position, represented length, distance along the cable, watt loss
//! and conductor temperature.

pub mod point_table;
