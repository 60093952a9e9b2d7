//! Heartbeat Sim - fuel-driven oscillator with potassium pump dynamics
//!
//! This library simulates a one-dimensional "heartbeat" position that
//! oscillates inside a randomized envelope, burning fuel each step and
//! optionally modulated by ion flux from a Goldman-Hodgkin-Katz (GHK)
//! potassium pump.

// Allow non-snake-case for unit suffixes in field names (mM, mV).
// This follows the project convention of including units in names.
#![allow(non_snake_case)]

pub mod biophysics;
pub mod config;
pub mod engine;

pub use biophysics::{relu, sigmoid, ConstantFlux, Modulator, PotassiumPump};
pub use config::{HeartbeatParameters, Parameters, PumpParameters};
pub use engine::{
    Direction, HeartbeatEngine, IgnitionReport, Immediate, Pacer, Phase, RunSummary, StepOutcome,
    StepReport, WallClock,
};
