//! The heartbeat engine: a 1-D position oscillating inside a randomized
//! envelope, powered by a depleting fuel reservoir.
//!
//! Lifecycle: `new` validates configuration and builds an un-ignited
//! engine; `ignite` (or `prime`, its deterministic seam) draws the start
//! position and envelope threshold and moves the engine to `Running`;
//! `step` advances the state until fuel runs out, after which the engine
//! is permanently `Exhausted`. A new run requires a new engine.

use std::fmt;

use anyhow::{bail, Result};
use rand::Rng;

use crate::biophysics::{relu, sigmoid, Modulator};
use crate::config::HeartbeatParameters;

use super::Pacer;

/// Hard floor on the per-step increment, preventing an indefinite stall.
/// Also absorbs the case where a negative flux inverts the raw product.
const MIN_INCREMENT: f64 = 0.001;

/// Fraction of sigmoid(increment) burned as fuel each step.
const FUEL_BURN_RATE: f64 = 0.1;

/// Fuel level at which efficiency crosses 0.5.
const FUEL_EFFICIENCY_MIDPOINT: f64 = 5.0;

/// Absolute position domain; envelope bounds are clamped inside it.
const POSITION_LIMIT: f64 = 1.0;

/// Direction of the next position update.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Direction {
    Ascending,
    Descending,
}

impl fmt::Display for Direction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Direction::Ascending => write!(f, "up"),
            Direction::Descending => write!(f, "down"),
        }
    }
}

/// Engine lifecycle phase. `Exhausted` is terminal.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Phase {
    Uninitialized,
    Running,
    Exhausted,
}

/// Snapshot emitted by one successful step. Its `Display` is the status
/// line contract consumed by drivers.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct StepReport {
    pub direction: Direction,
    pub position: f64,
    pub increment: f64,
    pub fuel: f64,
    pub flux: f64,
}

impl fmt::Display for StepReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Direction: {} @ {:.4}, Speed: {:.4}, Fuel: {:.3}, Flux: {:.6}",
            self.direction, self.position, self.increment, self.fuel, self.flux
        )
    }
}

/// Result of one step invocation.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum StepOutcome {
    /// The engine advanced one step.
    Beat(StepReport),
    /// Fuel was exhausted before the step could run. Terminal.
    Exhausted,
}

/// Values drawn at ignition. Its `Display` is the two entry lines of the
/// console contract.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct IgnitionReport {
    pub start: f64,
    pub threshold: f64,
}

impl fmt::Display for IgnitionReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Initial start: {:.4}\nThreshold: {:.4}",
            self.start, self.threshold
        )
    }
}

/// Summary of a completed run.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RunSummary {
    pub steps_taken: u64,
    pub final_position: f64,
    pub final_fuel: f64,
}

/// Oscillator/fuel engine. Owns its state exclusively; the only mutation
/// paths are ignition and `step`.
pub struct HeartbeatEngine {
    base_increment: f64,
    position: f64,
    direction: Direction,
    fuel: f64,
    low_end: f64,
    high_end: f64,
    phase: Phase,
    steps_taken: u64,
    modulator: Option<Box<dyn Modulator>>,
}

impl HeartbeatEngine {
    /// Build an un-ignited engine.
    ///
    /// Fails synchronously on configuration errors: non-positive initial
    /// fuel or base increment.
    pub fn new(
        params: &HeartbeatParameters,
        modulator: Option<Box<dyn Modulator>>,
    ) -> Result<Self> {
        if !(params.initial_fuel > 0.0) {
            bail!("initial fuel must be positive, got {}", params.initial_fuel);
        }
        if !(params.base_increment > 0.0) {
            bail!(
                "base increment must be positive, got {}",
                params.base_increment
            );
        }

        Ok(Self {
            base_increment: params.base_increment,
            position: 0.0,
            direction: Direction::Descending,
            fuel: params.initial_fuel,
            low_end: -POSITION_LIMIT,
            high_end: POSITION_LIMIT,
            phase: Phase::Uninitialized,
            steps_taken: 0,
            modulator,
        })
    }

    /// Randomized initialization: draws the start position uniformly from
    /// [-1, 1] and the envelope threshold from [0.3, 0.9], then primes the
    /// engine with them. Happens exactly once per engine.
    pub fn ignite<R: Rng>(&mut self, rng: &mut R) -> Result<IgnitionReport> {
        let start = rng.gen_range(-1.0..=1.0);
        let threshold = rng.gen_range(0.3..=0.9);
        self.prime(start, threshold)
    }

    /// Deterministic initialization seam: applies an explicit start and
    /// threshold instead of drawing them. Tests use this to pin down the
    /// envelope exactly.
    ///
    /// The envelope is clamped inside [-1, 1] with an inset of one base
    /// increment, so a bound never coincides with the domain edge.
    pub fn prime(&mut self, start: f64, threshold: f64) -> Result<IgnitionReport> {
        if self.phase != Phase::Uninitialized {
            bail!("engine already ignited; a new run requires a new engine");
        }

        self.direction = if start >= 0.0 {
            Direction::Ascending
        } else {
            Direction::Descending
        };
        self.position = start;
        self.low_end = (start - threshold).max(-POSITION_LIMIT + self.base_increment);
        self.high_end = (start + threshold).min(POSITION_LIMIT - self.base_increment);
        self.phase = Phase::Running;

        Ok(IgnitionReport { start, threshold })
    }

    /// Advance the simulation by one step.
    ///
    /// The exhaustion check runs first, so the step that drives fuel to
    /// or below zero still completes; the following call observes the
    /// depleted reservoir and returns [`StepOutcome::Exhausted`].
    ///
    /// # Panics
    /// Panics if called before ignition; stepping an un-ignited engine is
    /// a caller programming error, not a runtime fault.
    pub fn step(&mut self) -> StepOutcome {
        assert!(
            self.phase != Phase::Uninitialized,
            "step() called before ignition"
        );

        if self.fuel <= 0.0 {
            self.phase = Phase::Exhausted;
            return StepOutcome::Exhausted;
        }

        // Both bound checks run unconditionally every step, low before
        // high, so Descending wins if both hold at once. The order is
        // load-bearing; do not reorder.
        if self.position <= self.low_end {
            self.direction = Direction::Ascending;
        }
        if self.position >= self.high_end {
            self.direction = Direction::Descending;
        }

        let increment = self.dynamic_increment();

        match self.direction {
            Direction::Ascending => self.position += increment,
            Direction::Descending => self.position -= increment,
        }

        // Fuel may go negative by a bounded amount on the final step; no
        // clamping is performed.
        self.fuel -= sigmoid(increment) * FUEL_BURN_RATE;
        self.steps_taken += 1;

        let flux = self.modulator.as_deref().map_or(0.0, |m| m.flux());
        StepOutcome::Beat(StepReport {
            direction: self.direction,
            position: self.position,
            increment,
            fuel: self.fuel,
            flux,
        })
    }

    /// Per-step increment from current fuel, position, and flux.
    fn dynamic_increment(&self) -> f64 {
        let fuel_efficiency = sigmoid(self.fuel - FUEL_EFFICIENCY_MIDPOINT);
        let environment_factor = relu(self.position.sin());

        let mut increment = self.base_increment * fuel_efficiency * (1.0 - environment_factor);

        if let Some(modulator) = &self.modulator {
            increment *= 1.0 + modulator.flux();
        }

        increment.max(MIN_INCREMENT)
    }

    /// Run to exhaustion, printing the console contract lines and pacing
    /// between steps. Ignites first if the engine is still un-ignited.
    pub fn run<R: Rng>(&mut self, rng: &mut R, pacer: &mut dyn Pacer) -> Result<RunSummary> {
        if self.phase == Phase::Uninitialized {
            let ignition = self.ignite(rng)?;
            println!("{ignition}");
        }

        loop {
            match self.step() {
                StepOutcome::Beat(report) => {
                    println!("{report}");
                    pacer.pause();
                }
                StepOutcome::Exhausted => break,
            }
        }

        println!("Out of fuel! Heartbeat stopped.");
        Ok(RunSummary {
            steps_taken: self.steps_taken,
            final_position: self.position,
            final_fuel: self.fuel,
        })
    }

    pub fn position(&self) -> f64 {
        self.position
    }

    pub fn direction(&self) -> Direction {
        self.direction
    }

    pub fn fuel(&self) -> f64 {
        self.fuel
    }

    /// Oscillation envelope as (low_end, high_end).
    pub fn envelope(&self) -> (f64, f64) {
        (self.low_end, self.high_end)
    }

    pub fn phase(&self) -> Phase {
        self.phase
    }

    pub fn steps_taken(&self) -> u64 {
        self.steps_taken
    }
}
