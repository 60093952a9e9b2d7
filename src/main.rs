//! Heartbeat Sim - Entry point
//!
//! Runs the fuel-driven heartbeat simulation on the console, optionally
//! modulated by a GHK potassium pump.
//!
//! CLI Usage:
//!   cargo run                          # Defaults: fuel 10, increment 0.01, pump on
//!   cargo run -- --fuel 2 --no-pump    # Short unmodulated run
//!   cargo run -- --mem-pot -55 --interval 0.5

use std::time::Duration;

use anyhow::Result;
use heartbeat_sim::{
    biophysics::{Modulator, PotassiumPump},
    config::Parameters,
    engine::{HeartbeatEngine, StepOutcome},
};

/// CLI overrides applied on top of the loaded parameter files.
#[derive(Debug, Default)]
struct CliOptions {
    fuel: Option<f64>,
    increment: Option<f64>,
    k_in: Option<f64>,
    k_out: Option<f64>,
    membrane_potential: Option<f64>,
    interval_sec: Option<f64>,
    no_pump: bool,
    config_dir: Option<String>,
}

impl CliOptions {
    fn apply(&self, params: &mut Parameters) {
        if let Some(fuel) = self.fuel {
            params.heartbeat.initial_fuel = fuel;
        }
        if let Some(increment) = self.increment {
            params.heartbeat.base_increment = increment;
        }
        if let Some(interval) = self.interval_sec {
            params.heartbeat.step_interval_sec = interval;
        }
        if let Some(k_in) = self.k_in {
            params.pump.k_in_mM = k_in;
        }
        if let Some(k_out) = self.k_out {
            params.pump.k_out_mM = k_out;
        }
        if let Some(mv) = self.membrane_potential {
            params.pump.membrane_potential_mV = mv;
        }
        if self.no_pump {
            params.pump.enabled = false;
        }
    }
}

/// Parse CLI arguments
fn parse_args() -> CliOptions {
    let args: Vec<String> = std::env::args().collect();
    let mut opts = CliOptions::default();

    let mut i = 1;
    while i < args.len() {
        match args[i].as_str() {
            "-f" | "--fuel" => {
                i += 1;
                if i < args.len() {
                    opts.fuel = args[i].parse().ok();
                }
            }
            "-i" | "--increment" => {
                i += 1;
                if i < args.len() {
                    opts.increment = args[i].parse().ok();
                }
            }
            "--k-in" => {
                i += 1;
                if i < args.len() {
                    opts.k_in = args[i].parse().ok();
                }
            }
            "--k-out" => {
                i += 1;
                if i < args.len() {
                    opts.k_out = args[i].parse().ok();
                }
            }
            "--mem-pot" => {
                i += 1;
                if i < args.len() {
                    opts.membrane_potential = args[i].parse().ok();
                }
            }
            "--interval" => {
                i += 1;
                if i < args.len() {
                    opts.interval_sec = args[i].parse().ok();
                }
            }
            "--no-pump" => opts.no_pump = true,
            "--config" => {
                i += 1;
                if i < args.len() {
                    opts.config_dir = Some(args[i].clone());
                }
            }
            "--help" | "-h" => {
                println!("Heartbeat Sim");
                println!();
                println!("Usage: heartbeat-sim [OPTIONS]");
                println!();
                println!("Options:");
                println!("  -f, --fuel F        Initial fuel level (default: 10)");
                println!("  -i, --increment I   Base movement increment (default: 0.01)");
                println!("      --k-in MM       Intracellular K+ concentration in mM (default: 140)");
                println!("      --k-out MM      Extracellular K+ concentration in mM (default: 5)");
                println!("      --mem-pot MV    Membrane potential in mV (default: -70)");
                println!("      --interval SEC  Delay between steps in seconds (default: 1)");
                println!("      --no-pump       Run without the potassium pump");
                println!("      --config DIR    Load parameter JSON files from DIR");
                println!("  -h, --help          Show this help");
                std::process::exit(0);
            }
            _ => {}
        }
        i += 1;
    }

    opts
}

#[tokio::main(flavor = "current_thread")]
async fn main() -> Result<()> {
    env_logger::init();

    let opts = parse_args();
    let mut params = match &opts.config_dir {
        Some(dir) => Parameters::load_from_dir(dir),
        None => Parameters::load_or_default(),
    };
    opts.apply(&mut params);

    log::info!(
        "Heartbeat Sim starting: fuel={}, increment={}, pump={}",
        params.heartbeat.initial_fuel,
        params.heartbeat.base_increment,
        if params.pump.enabled { "on" } else { "off" }
    );

    let modulator: Option<Box<dyn Modulator>> = if params.pump.enabled {
        Some(Box::new(PotassiumPump::new(
            params.pump.k_in_mM,
            params.pump.k_out_mM,
            params.pump.membrane_potential_mV,
        )))
    } else {
        None
    };

    let mut engine = HeartbeatEngine::new(&params.heartbeat, modulator)?;
    let ignition = engine.ignite(&mut rand::thread_rng())?;
    println!("{ignition}");

    let delay = Duration::from_secs_f64(params.heartbeat.step_interval_sec.max(0.0));
    loop {
        match engine.step() {
            StepOutcome::Beat(report) => {
                println!("{report}");
                tokio::select! {
                    _ = tokio::time::sleep(delay) => {}
                    _ = tokio::signal::ctrl_c() => {
                        println!("\nSimulation interrupted.");
                        log::info!("interrupted after {} beats", engine.steps_taken());
                        return Ok(());
                    }
                }
            }
            StepOutcome::Exhausted => break,
        }
    }

    println!("Out of fuel! Heartbeat stopped.");
    log::info!(
        "run complete: {} beats, final position {:.4}",
        engine.steps_taken(),
        engine.position()
    );

    Ok(())
}
