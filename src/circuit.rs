//! Photonic circuit: sequential operator application, noise coupling, and
//! measurement.

use std::fs;
use std::path::Path;

use ndarray::Array2;
use num_complex::Complex64;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::analysis::{self, StateAnalysis};
use crate::error::{Result, SimError};
use crate::hilbert::HilbertSpace;
use crate::noise::{NoiseChannel, NoiseParameters};
use crate::operator::phase_operator;
use crate::randomness::BitStream;
use crate::state::DensityMatrix;
use crate::tomography::StateTomography;
use crate::wigner::WignerFunction;

/// Tunable circuit parameters with JSON persistence.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CircuitConfig {
    /// Noise rates applied after every coherent operation.
    pub noise: NoiseParameters,
    /// Probability that the detector registers a measurement at all.
    pub detector_efficiency: f64,
    /// Seed for the circuit's random source. `None` seeds from OS entropy.
    pub seed: Option<u64>,
}

impl Default for CircuitConfig {
    fn default() -> Self {
        Self {
            noise: NoiseParameters::default(),
            detector_efficiency: 0.9,
            seed: None,
        }
    }
}

impl CircuitConfig {
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    pub fn with_noise(mut self, noise: NoiseParameters) -> Self {
        self.noise = noise;
        self
    }

    pub fn with_detector_efficiency(mut self, efficiency: f64) -> Self {
        self.detector_efficiency = efficiency;
        self
    }

    fn validate(&self) -> Result<()> {
        self.noise.validate()?;
        if !(0.0..=1.0).contains(&self.detector_efficiency) || self.detector_efficiency.is_nan() {
            return Err(SimError::InvalidConfiguration(format!(
                "detector_efficiency must be in [0, 1], got {}",
                self.detector_efficiency
            )));
        }
        Ok(())
    }

    /// Save configuration to a JSON file.
    pub fn save(&self, filepath: &Path) -> std::io::Result<()> {
        let json = serde_json::to_string_pretty(self).map_err(std::io::Error::other)?;
        fs::write(filepath, json)
    }

    /// Load configuration from a JSON file.
    pub fn load(filepath: &Path) -> std::io::Result<Self> {
        let json = fs::read_to_string(filepath)?;
        serde_json::from_str(&json).map_err(std::io::Error::other)
    }
}

/// Multi-mode photonic circuit over a truncated Fock space.
///
/// Owns its density matrix (vacuum at construction), a noise channel, and a
/// seedable random source. Every coherent operation is immediately followed
/// by a noise application on the same mode; the two cannot be separated.
/// All randomness flows through the one owned generator, so a seeded
/// circuit replays its entire evolution exactly.
///
/// `Clone` deep-copies the state and the generator, leaving the original
/// circuit unaffected by anything done to the copy.
#[derive(Debug, Clone)]
pub struct PhotonicCircuit {
    space: HilbertSpace,
    state: DensityMatrix,
    noise: NoiseChannel,
    detector_efficiency: f64,
    rng: StdRng,
}

impl PhotonicCircuit {
    /// Create a circuit in the vacuum state with default noise
    /// (loss 0.1, dephasing 0.05) and detector efficiency 0.9.
    pub fn new(num_modes: usize, max_photons: usize) -> Result<Self> {
        Self::with_config(num_modes, max_photons, &CircuitConfig::default())
    }

    /// Create a circuit with explicit noise, detector, and seed settings.
    pub fn with_config(
        num_modes: usize,
        max_photons: usize,
        config: &CircuitConfig,
    ) -> Result<Self> {
        config.validate()?;
        let space = HilbertSpace::new(num_modes, max_photons)?;
        let rng = match config.seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_entropy(),
        };
        Ok(Self {
            space,
            state: DensityMatrix::vacuum(space),
            noise: NoiseChannel::new(config.noise)?,
            detector_efficiency: config.detector_efficiency,
            rng,
        })
    }

    pub fn space(&self) -> HilbertSpace {
        self.space
    }

    pub fn state(&self) -> &DensityMatrix {
        &self.state
    }

    pub fn noise_params(&self) -> NoiseParameters {
        self.noise.params()
    }

    /// Apply a phase shifter to `mode`, then the noise channel to the same
    /// mode. The noise step is part of the operation contract, not an
    /// option.
    pub fn add_phase_shifter(&mut self, mode: usize, phase: f64) -> Result<()> {
        self.space.check_mode(mode)?;
        debug!(mode, phase, "applying phase shifter");
        let op = phase_operator(self.space, mode, phase)?;
        self.state.apply_unitary(&op)?;
        self.noise.apply(&mut self.state, mode, &mut self.rng)
    }

    /// Measure the photon number of `mode`.
    ///
    /// Samples from the mode's marginal distribution on the state diagonal,
    /// then runs an independent detector-efficiency trial; a missed
    /// detection reports outcome 0. Two uniform draws per call, in that
    /// order. The state is not collapsed or re-prepared; repeated
    /// measurements resample the same evolved state.
    pub fn measure(&mut self, mode: usize) -> Result<u32> {
        self.space.check_mode(mode)?;

        let marginal = self.mode_marginal(mode);
        let total: f64 = marginal.iter().sum();

        let sampled = if total > 0.0 {
            let u = self.rng.gen::<f64>() * total;
            let mut cumulative = 0.0;
            let mut outcome = marginal.len() - 1;
            for (n, &p) in marginal.iter().enumerate() {
                cumulative += p;
                if u <= cumulative {
                    outcome = n;
                    break;
                }
            }
            outcome as u32
        } else {
            // Fully attenuated state: nothing left to detect, but the draw
            // sequence must stay aligned with the non-degenerate path.
            let _ = self.rng.gen::<f64>();
            0
        };

        let detected = self.rng.gen::<f64>() < self.detector_efficiency;
        let outcome = if detected { sampled } else { 0 };
        debug!(mode, outcome, detected, "measurement");
        Ok(outcome)
    }

    /// Marginal photon-number weights of `mode`, read off the diagonal.
    /// Not normalized; lossy noise deflates the total.
    fn mode_marginal(&self, mode: usize) -> Vec<f64> {
        let mut marginal = vec![0.0; self.space.per_mode_dimension()];
        for k in 0..self.space.total_dimension() {
            marginal[self.space.photon_number(k, mode)] += self.state.diagonal_probability(k);
        }
        marginal
    }

    /// Generate `num_bits` random bits: each draws a uniformly random mode,
    /// measures it, and keeps the outcome's parity.
    pub fn generate_random_bits(&mut self, num_bits: usize) -> Result<BitStream> {
        let mut bits = BitStream::new();
        for _ in 0..num_bits {
            let mode = self.rng.gen_range(0..self.space.num_modes());
            let outcome = self.measure(mode)?;
            bits.push((outcome % 2) as u8);
        }
        Ok(bits)
    }

    /// Purity and photon-number distribution of the current state.
    pub fn analyze(&self) -> StateAnalysis {
        analysis::analyze(&self.state)
    }

    /// Wigner quasi-probability grid of the current state at the given
    /// resolution, sampled for the reference mode 0.
    pub fn wigner_grid(&self, resolution: usize) -> Result<Array2<f64>> {
        WignerFunction::new(resolution)?.calculate(&self.state, 0)
    }

    /// Reconstruct an approximate single-mode state from repeated
    /// phase-shifted measurements.
    pub fn tomography(&self, mode: usize, num_measurements: usize) -> Result<Array2<Complex64>> {
        StateTomography::new(num_measurements)?.reconstruct(self, mode)
    }
}
