//! Configuration module for loading simulation parameters.
//!
//! Parameters load from JSON files when present and fall back to the
//! built-in defaults otherwise.

mod parameters;

pub use parameters::{HeartbeatParameters, Parameters, PumpParameters};
