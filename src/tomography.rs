//! Minimal single-mode state tomography.
//!
//! Linear-inversion estimator over four canonical phase settings. The
//! reconstruction is structural only: the result is Hermitian with trace
//! near 1 by construction, but no fidelity to the true state is claimed.

use ndarray::Array2;
use num_complex::Complex64;
use std::f64::consts::PI;
use tracing::{debug, info};

use crate::circuit::PhotonicCircuit;
use crate::error::{Result, SimError};

/// Phase settings measured during reconstruction, in order.
const TOMOGRAPHY_PHASES: [f64; 4] = [0.0, PI / 4.0, PI / 2.0, 3.0 * PI / 4.0];

/// Repeated phase-shifted measurement estimator producing a `2x2`
/// approximate single-mode density matrix.
pub struct StateTomography {
    num_measurements: usize,
}

impl StateTomography {
    /// Create an estimator averaging `num_measurements` shots per phase.
    pub fn new(num_measurements: usize) -> Result<Self> {
        if num_measurements == 0 {
            return Err(SimError::DegenerateInput(
                "tomography needs at least one measurement per phase".into(),
            ));
        }
        Ok(Self { num_measurements })
    }

    /// Reconstruct an approximate single-mode state for `mode`.
    ///
    /// Each phase arm works on a deep copy of the circuit (state and random
    /// source included), so the caller's circuit is untouched.
    pub fn reconstruct(
        &self,
        circuit: &PhotonicCircuit,
        mode: usize,
    ) -> Result<Array2<Complex64>> {
        circuit.space().check_mode(mode)?;

        let mut means = [0.0; 4];
        for (i, &phase) in TOMOGRAPHY_PHASES.iter().enumerate() {
            let mut arm = circuit.clone();
            arm.add_phase_shifter(mode, phase)?;

            let mut sum = 0.0;
            for _ in 0..self.num_measurements {
                sum += arm.measure(mode)? as f64;
            }
            means[i] = sum / self.num_measurements as f64;
            debug!(phase, mean = means[i], "tomography arm complete");
        }

        info!(mode, shots = self.num_measurements, "tomography reconstruction");
        Ok(Self::reconstruct_density_matrix(&means))
    }

    /// Linear inversion of the four scalar means into a `2x2` matrix.
    fn reconstruct_density_matrix(means: &[f64; 4]) -> Array2<Complex64> {
        let mut rho = Array2::zeros((2, 2));
        rho[[0, 0]] = Complex64::new((means[0] + means[2]) / 2.0, 0.0);
        rho[[0, 1]] = Complex64::new(means[1] / 2.0, means[3] / 2.0);
        rho[[1, 0]] = rho[[0, 1]].conj();
        rho[[1, 1]] = Complex64::new(1.0, 0.0) - rho[[0, 0]];
        rho
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::circuit::CircuitConfig;
    use crate::noise::NoiseParameters;
    use approx::assert_relative_eq;

    fn is_hermitian(rho: &Array2<Complex64>) -> bool {
        (0..2).all(|i| (0..2).all(|j| (rho[[i, j]] - rho[[j, i]].conj()).norm() < 1e-12))
    }

    #[test]
    fn test_zero_measurements_rejected() {
        assert!(matches!(
            StateTomography::new(0),
            Err(SimError::DegenerateInput(_))
        ));
    }

    #[test]
    fn test_vacuum_reconstruction() {
        // Vacuum circuit, noise disabled: every arm measures 0, so the
        // reconstruction is diag(0, 1) with vanishing off-diagonals.
        let config = CircuitConfig::default()
            .with_noise(NoiseParameters::noiseless())
            .with_seed(31);
        let circuit = PhotonicCircuit::with_config(2, 3, &config).unwrap();

        let rho = StateTomography::new(200).unwrap().reconstruct(&circuit, 0).unwrap();

        let trace = (rho[[0, 0]] + rho[[1, 1]]).re;
        assert_relative_eq!(trace, 1.0, epsilon = 1e-9);
        assert!(rho[[0, 1]].norm() < 1e-9);
        assert!(is_hermitian(&rho));
    }

    #[test]
    fn test_reconstruction_is_hermitian_with_noise() {
        let config = CircuitConfig::default().with_seed(8);
        let circuit = PhotonicCircuit::with_config(2, 3, &config).unwrap();
        let rho = StateTomography::new(50).unwrap().reconstruct(&circuit, 1).unwrap();
        assert!(is_hermitian(&rho));
        assert_relative_eq!((rho[[0, 0]] + rho[[1, 1]]).re, 1.0, epsilon = 1e-9);
    }

    #[test]
    fn test_caller_circuit_untouched() {
        let config = CircuitConfig::default().with_seed(44);
        let circuit = PhotonicCircuit::with_config(2, 2, &config).unwrap();
        let before = circuit.state().matrix().clone();

        StateTomography::new(20).unwrap().reconstruct(&circuit, 0).unwrap();

        assert_eq!(circuit.state().matrix(), &before);
    }
}
