//! Scenario files and their merge with command-line overrides.
//!
//! - [`file`] - serde model of the scenario TOML
//! - [`defaults`] - solver defaults used when neither the file nor the CLI sets a value
//! - [`builder`] - merges CLI > file > defaults and builds the core types
//! - [`models`] - the resolved application configuration

pub mod builder;
pub mod defaults;
pub mod file;
pub mod models;
