//! Potassium pump model based on the Goldman-Hodgkin-Katz (GHK) equation.
//!
//! Computes a single scalar flux from intracellular/extracellular K+
//! concentrations and the membrane potential. Physiological reference
//! values for human cells:
//! - Cytosolic K+: ~140 mM
//! - Plasma K+: ~5 mM
//! - Resting membrane potential: ~-70 mV
//!
//! References:
//! - Goldman DE. J Gen Physiol. 1943;27:37-60
//! - Hodgkin AL, Katz B. J Physiol. 1949;108:37-77

use super::Modulator;

/// Faraday constant (C/mol)
pub const FARADAY_C_PER_MOL: f64 = 96485.3329;

/// Universal gas constant (J/(mol·K))
pub const GAS_CONSTANT_J_PER_MOL_K: f64 = 8.314;

/// Body temperature (~37°C) in Kelvin
pub const BODY_TEMPERATURE_K: f64 = 310.15;

// Numerical-stability guard, not a physical constraint: exp() overflows
// f64 just above 709, so the exponent is clamped to ±700 first.
const EXPONENT_LIMIT: f64 = 700.0;

// Below this magnitude the denominator is treated as zero and the flux
// is defined as 0 rather than raised as an error.
const DENOMINATOR_EPSILON: f64 = 1e-9;

/// Potassium pump with fixed parameters for the lifetime of a run.
///
/// Values are deliberately not validated: physically nonsensical inputs
/// still produce a finite flux.
#[derive(Debug, Clone, Copy)]
pub struct PotassiumPump {
    /// Intracellular K+ concentration (mM)
    pub k_in_mM: f64,
    /// Extracellular K+ concentration (mM)
    pub k_out_mM: f64,
    /// Membrane potential (mV)
    pub membrane_potential_mV: f64,
}

impl Default for PotassiumPump {
    fn default() -> Self {
        Self {
            // Bernstein 1954 cytosolic/plasma K+, typical resting potential
            k_in_mM: 140.0,
            k_out_mM: 5.0,
            membrane_potential_mV: -70.0,
        }
    }
}

impl PotassiumPump {
    /// Create a pump with explicit parameters.
    pub fn new(k_in_mM: f64, k_out_mM: f64, membrane_potential_mV: f64) -> Self {
        Self {
            k_in_mM,
            k_out_mM,
            membrane_potential_mV,
        }
    }

    /// Ion flux through the pump via the GHK equation approximation.
    ///
    /// Pure and total: the clamped exponent and the zero-denominator
    /// fallback keep the result finite for all finite parameters.
    pub fn ghk_flux(&self) -> f64 {
        let exponent = (-self.membrane_potential_mV * FARADAY_C_PER_MOL
            / (GAS_CONSTANT_J_PER_MOL_K * BODY_TEMPERATURE_K))
            .clamp(-EXPONENT_LIMIT, EXPONENT_LIMIT);

        let e = exponent.exp();
        let numerator = self.k_out_mM - self.k_in_mM * e;
        let denominator = 1.0 - e;

        if denominator.abs() > DENOMINATOR_EPSILON {
            numerator / denominator
        } else {
            0.0
        }
    }
}

impl Modulator for PotassiumPump {
    fn flux(&self) -> f64 {
        self.ghk_flux()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_flux_regression() {
        // At -70 mV the exponent saturates at the +700 clamp, so the flux
        // converges to k_in.
        let flux = PotassiumPump::default().ghk_flux();
        assert!(
            (flux - 140.0).abs() < 1e-9,
            "default pump flux should be 140.0, got {}",
            flux
        );
    }

    #[test]
    fn test_zero_potential_zero_flux() {
        // 0 mV gives e = 1 and a zero denominator; defined as zero flux.
        let pump = PotassiumPump::new(140.0, 5.0, 0.0);
        assert_eq!(pump.ghk_flux(), 0.0);
    }

    #[test]
    fn test_flux_finite_for_extreme_parameters() {
        for &k_in in &[0.0, 1e-6, 140.0, 1e6] {
            for &k_out in &[0.0, 5.0, 1e6] {
                for &mv in &[-1e9, -700.0, -70.0, -1e-12, 0.0, 70.0, 1e9] {
                    let flux = PotassiumPump::new(k_in, k_out, mv).ghk_flux();
                    assert!(
                        flux.is_finite(),
                        "flux not finite for k_in={}, k_out={}, mv={}",
                        k_in,
                        k_out,
                        mv
                    );
                }
            }
        }
    }

    #[test]
    fn test_flux_idempotent() {
        let pump = PotassiumPump::new(12.5, 3.25, -55.0);
        assert_eq!(pump.ghk_flux().to_bits(), pump.ghk_flux().to_bits());
    }
}
