//! Phase-space quasi-probability grid.
//!
//! The displaced-parity evaluation here is a deliberately reduced proxy: it
//! collapses to the state's trace at every grid point instead of the
//! physical displacement/parity expectation value. The grid shape and the
//! `(x, p) -> alpha` mapping are real; the values are not physically exact
//! and must not be read as a true Wigner function.

use ndarray::{Array1, Array2};
use num_complex::Complex64;

use crate::error::{Result, SimError};
use crate::state::DensityMatrix;

/// Extent of the sampled phase-space square on both axes.
const PHASE_SPACE_EXTENT: f64 = 5.0;

/// Wigner quasi-probability grid engine over `x, p in [-5, 5]`.
pub struct WignerFunction {
    resolution: usize,
    x_range: Array1<f64>,
    p_range: Array1<f64>,
}

impl WignerFunction {
    /// Create an engine producing `resolution x resolution` grids.
    pub fn new(resolution: usize) -> Result<Self> {
        if resolution < 2 {
            return Err(SimError::InvalidConfiguration(format!(
                "grid resolution must be at least 2, got {resolution}"
            )));
        }
        Ok(Self {
            resolution,
            x_range: Array1::linspace(-PHASE_SPACE_EXTENT, PHASE_SPACE_EXTENT, resolution),
            p_range: Array1::linspace(-PHASE_SPACE_EXTENT, PHASE_SPACE_EXTENT, resolution),
        })
    }

    pub fn resolution(&self) -> usize {
        self.resolution
    }

    /// Evaluate the grid for `mode` of the given state.
    pub fn calculate(&self, state: &DensityMatrix, mode: usize) -> Result<Array2<f64>> {
        state.space().check_mode(mode)?;

        let mut grid = Array2::zeros((self.resolution, self.resolution));
        for (i, &x) in self.x_range.iter().enumerate() {
            for (j, &p) in self.p_range.iter().enumerate() {
                grid[[i, j]] = self.wigner_point(state, x, p);
            }
        }
        Ok(grid)
    }

    fn wigner_point(&self, state: &DensityMatrix, x: f64, p: f64) -> f64 {
        let alpha = Complex64::new(x, p) / 2.0_f64.sqrt();
        self.displaced_parity(state, alpha).re
    }

    /// Displaced-parity proxy. Reduced semantics: the displacement is
    /// ignored and the state trace is returned for every `alpha`.
    fn displaced_parity(&self, state: &DensityMatrix, _alpha: Complex64) -> Complex64 {
        state.trace()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::hilbert::HilbertSpace;
    use approx::assert_relative_eq;

    #[test]
    fn test_grid_shape() {
        let space = HilbertSpace::new(2, 2).unwrap();
        let state = DensityMatrix::vacuum(space);
        let grid = WignerFunction::new(32).unwrap().calculate(&state, 0).unwrap();
        assert_eq!(grid.shape(), &[32, 32]);
    }

    #[test]
    fn test_vacuum_grid_is_trace() {
        // The proxy reduces every point to Re(tr(rho)) = 1 for the vacuum.
        let space = HilbertSpace::new(1, 3).unwrap();
        let state = DensityMatrix::vacuum(space);
        let grid = WignerFunction::new(8).unwrap().calculate(&state, 0).unwrap();
        for &w in grid.iter() {
            assert_relative_eq!(w, 1.0, epsilon = 1e-12);
        }
    }

    #[test]
    fn test_degenerate_resolution_rejected() {
        assert!(WignerFunction::new(0).is_err());
        assert!(WignerFunction::new(1).is_err());
    }

    #[test]
    fn test_invalid_mode_rejected() {
        let space = HilbertSpace::new(1, 1).unwrap();
        let state = DensityMatrix::vacuum(space);
        assert!(WignerFunction::new(4).unwrap().calculate(&state, 3).is_err());
    }
}
