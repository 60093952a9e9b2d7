//! Biophysics primitives for the heartbeat simulation.
//!
//! This module implements the physiological side of the model:
//! - Goldman-Hodgkin-Katz (GHK) potassium flux across a membrane
//! - Sigmoid and ReLU scalar transforms used as smoothing/clamping
//!   heuristics for fuel efficiency and environmental resistance
//!
//! The flux term enters the engine through the [`Modulator`] capability
//! rather than a concrete pump type, so alternative strategies (a fixed
//! flux, a future ion species) plug in without touching the step logic.

pub mod ghk;
pub mod transforms;

pub use ghk::PotassiumPump;
pub use transforms::{relu, sigmoid};

/// Capability contract for anything that supplies a flux value to the
/// engine. Implementors are expected to be pure: repeated calls with the
/// same internal state return the same value.
pub trait Modulator {
    /// Current flux value. The engine scales its increment by `1 + flux`.
    fn flux(&self) -> f64;
}

/// Fixed-value modulator, mainly for deterministic tests and demos.
#[derive(Debug, Clone, Copy)]
pub struct ConstantFlux(pub f64);

impl Modulator for ConstantFlux {
    fn flux(&self) -> f64 {
        self.0
    }
}
