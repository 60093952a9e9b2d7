//! Parameter structures for the heartbeat simulation.

use serde::{Deserialize, Serialize};
use std::path::Path;

/// Top-level parameters container
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Parameters {
    /// Oscillator/fuel engine parameters
    pub heartbeat: HeartbeatParameters,
    /// Potassium pump parameters
    pub pump: PumpParameters,
}

impl Parameters {
    /// Load parameters from JSON files, or use defaults if files don't exist
    pub fn load_or_default() -> Self {
        let heartbeat = HeartbeatParameters::load_or_default("data/parameters/heartbeat.json");
        let pump = PumpParameters::load_or_default("data/parameters/pump.json");

        Self { heartbeat, pump }
    }

    /// Load parameters from specific directory
    pub fn load_from_dir<P: AsRef<Path>>(dir: P) -> Self {
        let dir = dir.as_ref();
        let heartbeat = HeartbeatParameters::load_or_default(dir.join("heartbeat.json"));
        let pump = PumpParameters::load_or_default(dir.join("pump.json"));

        Self { heartbeat, pump }
    }
}

impl Default for Parameters {
    fn default() -> Self {
        Self {
            heartbeat: HeartbeatParameters::default(),
            pump: PumpParameters::default(),
        }
    }
}

/// Oscillator/fuel engine parameters
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HeartbeatParameters {
    /// Starting fuel level; the run ends when it is exhausted.
    /// Must be positive.
    pub initial_fuel: f64,

    /// Nominal step size before fuel/environment/flux modulation.
    /// Must be positive.
    pub base_increment: f64,

    /// Real-time delay between steps (seconds). Presentation only.
    pub step_interval_sec: f64,
}

impl HeartbeatParameters {
    /// Load from JSON file or return defaults
    pub fn load_or_default<P: AsRef<Path>>(path: P) -> Self {
        match std::fs::read_to_string(path.as_ref()) {
            Ok(contents) => match serde_json::from_str(&contents) {
                Ok(params) => {
                    log::info!("Loaded heartbeat parameters from {:?}", path.as_ref());
                    params
                }
                Err(e) => {
                    log::warn!("Failed to parse heartbeat parameters: {}, using defaults", e);
                    Self::default()
                }
            },
            Err(_) => {
                log::info!("Heartbeat parameters file not found, using defaults");
                Self::default()
            }
        }
    }
}

impl Default for HeartbeatParameters {
    fn default() -> Self {
        Self {
            initial_fuel: 10.0,
            base_increment: 0.01,
            step_interval_sec: 1.0,
        }
    }
}

/// Potassium pump parameters
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PumpParameters {
    /// Intracellular K+ concentration (mM)
    /// Reference: ~140 mM cytosolic, Bernstein 1954
    pub k_in_mM: f64,

    /// Extracellular K+ concentration (mM)
    /// Reference: ~5 mM plasma, Bernstein 1954
    pub k_out_mM: f64,

    /// Membrane potential (mV)
    /// Typical resting potential ~-70 mV
    pub membrane_potential_mV: f64,

    /// Attach the pump to the engine (set false to run unmodulated)
    pub enabled: bool,
}

impl PumpParameters {
    /// Load from JSON file or return defaults
    pub fn load_or_default<P: AsRef<Path>>(path: P) -> Self {
        match std::fs::read_to_string(path.as_ref()) {
            Ok(contents) => match serde_json::from_str(&contents) {
                Ok(params) => {
                    log::info!("Loaded pump parameters from {:?}", path.as_ref());
                    params
                }
                Err(e) => {
                    log::warn!("Failed to parse pump parameters: {}, using defaults", e);
                    Self::default()
                }
            },
            Err(_) => {
                log::info!("Pump parameters file not found, using defaults");
                Self::default()
            }
        }
    }
}

impl Default for PumpParameters {
    fn default() -> Self {
        Self {
            k_in_mM: 140.0,
            k_out_mM: 5.0,
            membrane_potential_mV: -70.0,
            enabled: true,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_heartbeat_params() {
        let params = HeartbeatParameters::default();
        assert!((params.initial_fuel - 10.0).abs() < 1e-12);
        assert!((params.base_increment - 0.01).abs() < 1e-12);
    }

    #[test]
    fn test_default_pump_params() {
        let params = PumpParameters::default();
        assert!((params.k_in_mM - 140.0).abs() < 1e-12);
        assert!(params.enabled);
    }

    #[test]
    fn test_serialization() {
        let params = Parameters::default();
        let json = serde_json::to_string_pretty(&params).unwrap();
        let parsed: Parameters = serde_json::from_str(&json).unwrap();
        assert!((parsed.heartbeat.initial_fuel - params.heartbeat.initial_fuel).abs() < 1e-12);
        assert!((parsed.pump.membrane_potential_mV - params.pump.membrane_potential_mV).abs() < 1e-12);
    }
}
