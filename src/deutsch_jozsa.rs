//! Phase-encoded Deutsch-Jozsa demonstration circuit.
//!
//! Demonstration-grade: the oracle is encoded as a conditional phase shift
//! on an ancilla mode and the verdict is read from a single photon-number
//! measurement. Phase shifts acting on the vacuum do not build a genuine
//! superposition, so this shows the circuit plumbing rather than a faithful
//! algorithm implementation.

use std::f64::consts::{FRAC_PI_2, PI};

use crate::circuit::{CircuitConfig, PhotonicCircuit};
use crate::error::Result;

/// Deutsch-Jozsa runner over a three-mode circuit: input, ancilla, and
/// oracle output modes.
pub struct DeutschJozsa<F>
where
    F: Fn(u8) -> u8,
{
    oracle: F,
    circuit: PhotonicCircuit,
}

impl<F> DeutschJozsa<F>
where
    F: Fn(u8) -> u8,
{
    /// Build the three-mode circuit with default settings.
    pub fn new(oracle: F) -> Result<Self> {
        Self::with_config(oracle, &CircuitConfig::default())
    }

    /// Build with explicit noise/seed settings, for deterministic runs.
    pub fn with_config(oracle: F, config: &CircuitConfig) -> Result<Self> {
        Ok(Self {
            oracle,
            circuit: PhotonicCircuit::with_config(3, 3, config)?,
        })
    }

    /// Run once; `true` means the oracle was judged constant.
    pub fn run(&mut self) -> Result<bool> {
        // Input superposition and ancilla preparation.
        self.circuit.add_phase_shifter(0, FRAC_PI_2)?;
        self.circuit.add_phase_shifter(1, PI)?;

        // Oracle as a conditional phase kick on the output mode.
        let phase = if (self.oracle)(0) != 0 { PI } else { 0.0 };
        self.circuit.add_phase_shifter(2, phase)?;

        // Undo the input preparation and read out.
        self.circuit.add_phase_shifter(0, -FRAC_PI_2)?;
        let outcome = self.circuit.measure(0)?;
        Ok(outcome == 0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::noise::NoiseParameters;

    fn deterministic_config() -> CircuitConfig {
        CircuitConfig::default()
            .with_noise(NoiseParameters::noiseless())
            .with_seed(6)
    }

    #[test]
    fn test_constant_oracle_detected() {
        let mut dj = DeutschJozsa::with_config(|_| 0, &deterministic_config()).unwrap();
        assert!(dj.run().unwrap());
    }

    #[test]
    fn test_balanced_oracle_runs() {
        // The vacuum-state demonstration cannot separate balanced from
        // constant; assert only that the run completes.
        let mut dj = DeutschJozsa::with_config(|x| x, &deterministic_config()).unwrap();
        dj.run().unwrap();
    }
}
