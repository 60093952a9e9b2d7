//! Oscillator/fuel engine for the heartbeat simulation.
//!
//! The engine owns all mutable simulation state (position, direction,
//! fuel, oscillation envelope) and advances it one discrete step at a
//! time. Each step consumes fuel; the run ends permanently once fuel is
//! exhausted. Pacing between steps is a presentation concern and lives
//! behind the [`Pacer`] capability.

mod oscillator;
mod pacing;

pub use oscillator::{
    Direction, HeartbeatEngine, IgnitionReport, Phase, RunSummary, StepOutcome, StepReport,
};
pub use pacing::{Immediate, Pacer, WallClock};
