//! State diagnostics: purity and photon-number distribution.

use serde::{Deserialize, Serialize};

use crate::state::DensityMatrix;

/// Snapshot of the state diagnostics, plain numbers ready for export to an
/// external plotting collaborator.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StateAnalysis {
    /// `Re(tr(rho^2))`; 1 for a pure state, below 1 for mixed ones.
    pub purity: f64,
    /// First `max_photons + 1` real diagonal entries, interpreted as
    /// (unnormalized) occupation weights for the reference mode.
    pub photon_distribution: Vec<f64>,
}

/// Purity `Re(tr(rho^2))` of the state.
pub fn purity(state: &DensityMatrix) -> f64 {
    let squared = state.matrix().dot(state.matrix());
    squared.diag().sum().re
}

/// Leading diagonal entries of the state, one per photon number of the
/// reference mode. Unnormalized when lossy noise has deflated the trace.
pub fn photon_distribution(state: &DensityMatrix) -> Vec<f64> {
    let per_mode = state.space().per_mode_dimension();
    (0..per_mode)
        .map(|n| state.matrix()[[n, n]].re)
        .collect()
}

/// Bundle both diagnostics.
pub fn analyze(state: &DensityMatrix) -> StateAnalysis {
    StateAnalysis {
        purity: purity(state),
        photon_distribution: photon_distribution(state),
    }
}
