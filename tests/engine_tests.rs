//! Integration tests for the oscillator/fuel engine
//!
//! Tests validate:
//! - Construction validation and the two-phase ignite/step contract
//! - Envelope computation (inset clamp) and direction at ignition
//! - Bound-flip behavior, including the Descending tie-break order
//! - Fuel depletion bound and terminal exhaustion
//! - The exact status-line format emitted per step

use heartbeat_sim::{
    sigmoid, ConstantFlux, Direction, HeartbeatEngine, HeartbeatParameters, Immediate, Phase,
    StepOutcome,
};
use rand::rngs::StdRng;
use rand::SeedableRng;

fn engine(initial_fuel: f64, base_increment: f64) -> HeartbeatEngine {
    let params = HeartbeatParameters {
        initial_fuel,
        base_increment,
        ..Default::default()
    };
    HeartbeatEngine::new(&params, None).expect("valid parameters")
}

#[test]
fn test_end_to_end_first_step() {
    // Deterministic scenario: start 0.5, threshold 0.5, fuel 1, increment 0.5.
    let mut engine = engine(1.0, 0.5);
    let ignition = engine.prime(0.5, 0.5).unwrap();

    assert_eq!(
        ignition.to_string(),
        "Initial start: 0.5000\nThreshold: 0.5000"
    );

    // Inset clamp: low = max(0.0, -1 + 0.5), high = min(1.0, 1 - 0.5).
    let (low, high) = engine.envelope();
    assert_eq!(low, 0.0, "low_end");
    assert_eq!(high, 0.5, "high_end");
    assert_eq!(engine.direction(), Direction::Ascending);

    // First step: position sits on the upper bound, so the direction
    // flips Descending before the move. increment = 0.5 * sigmoid(-4)
    // * (1 - sin(0.5)) ≈ 0.0047.
    match engine.step() {
        StepOutcome::Beat(report) => {
            assert_eq!(report.direction, Direction::Descending);
            assert_eq!(
                report.to_string(),
                "Direction: down @ 0.4953, Speed: 0.0047, Fuel: 0.950, Flux: 0.000000"
            );
        }
        StepOutcome::Exhausted => panic!("engine exhausted on first step"),
    }
}

#[test]
fn test_termination_within_computed_bound() {
    // Fuel strictly decreases by at least sigmoid(MIN_INCREMENT) * 0.1
    // per step, which bounds the run length from above.
    let initial_fuel = 0.05;
    let mut engine = engine(initial_fuel, 0.05);
    engine.prime(0.0, 0.5).unwrap();

    let min_burn_per_step = sigmoid(0.001) * 0.1;
    let bound = (initial_fuel / min_burn_per_step).ceil() as u64;

    let mut steps = 0u64;
    while let StepOutcome::Beat(_) = engine.step() {
        steps += 1;
        assert!(
            steps <= bound,
            "engine still running after {} steps (bound {})",
            steps,
            bound
        );
    }

    assert_eq!(engine.phase(), Phase::Exhausted);
    assert!(engine.steps_taken() >= 1);
}

#[test]
fn test_bound_flip_property() {
    // Whenever a step begins at or below low_end the reported direction
    // must be Ascending; at or above high_end it must be Descending
    // (evaluated second, so it wins a simultaneous hit).
    let mut engine = engine(5.0, 0.5);
    engine.prime(0.0, 0.4).unwrap();
    let (low, high) = engine.envelope();

    let mut entry_position = engine.position();
    let mut direction = engine.direction();
    let mut flips = 0u32;

    while let StepOutcome::Beat(report) = engine.step() {
        let mut expected = direction;
        if entry_position <= low {
            expected = Direction::Ascending;
        }
        if entry_position >= high {
            expected = Direction::Descending;
        }
        assert_eq!(
            report.direction, expected,
            "wrong direction for entry position {} (envelope [{}, {}])",
            entry_position, low, high
        );

        if report.direction != direction {
            flips += 1;
        }
        entry_position = report.position;
        direction = report.direction;
    }

    assert!(flips >= 2, "expected repeated bound flips, saw {}", flips);
}

#[test]
fn test_ignite_draws_within_documented_ranges() {
    let mut rng = StdRng::seed_from_u64(42);

    for _ in 0..100 {
        let mut engine = engine(10.0, 0.01);
        let ignition = engine.ignite(&mut rng).unwrap();

        assert!((-1.0..=1.0).contains(&ignition.start));
        assert!((0.3..=0.9).contains(&ignition.threshold));

        let expected = if ignition.start >= 0.0 {
            Direction::Ascending
        } else {
            Direction::Descending
        };
        assert_eq!(engine.direction(), expected);

        // Envelope never touches the domain edge under the inset clamp.
        let (low, high) = engine.envelope();
        assert!(low >= -1.0 + 0.01);
        assert!(high <= 1.0 - 0.01);
    }
}

#[test]
fn test_run_to_exhaustion_with_immediate_pacer() {
    let mut engine = engine(0.5, 0.05);
    let mut rng = StdRng::seed_from_u64(7);

    let summary = engine.run(&mut rng, &mut Immediate).unwrap();

    assert!(summary.steps_taken >= 1);
    assert!(summary.final_fuel <= 0.0);
    assert_eq!(summary.final_position, engine.position());
    assert_eq!(engine.phase(), Phase::Exhausted);
}

#[test]
fn test_negative_flux_cannot_stall_the_run() {
    // (1 + flux) < 0 inverts the raw increment; the floor keeps each
    // step moving and the run terminating.
    let params = HeartbeatParameters {
        initial_fuel: 0.3,
        base_increment: 0.05,
        ..Default::default()
    };
    let mut engine =
        HeartbeatEngine::new(&params, Some(Box::new(ConstantFlux(-3.0)))).expect("valid parameters");
    engine.prime(0.1, 0.5).unwrap();

    let mut steps = 0u64;
    while let StepOutcome::Beat(report) = engine.step() {
        assert!(report.increment >= 0.001);
        steps += 1;
        assert!(steps < 100, "run failed to terminate");
    }
}
