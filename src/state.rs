//! Density-matrix representation of the optical state.

use ndarray::Array2;
use num_complex::Complex64;

use crate::error::{Result, SimError};
use crate::hilbert::HilbertSpace;

/// Complex square matrix representing a (possibly mixed) quantum state over
/// a truncated multi-mode Fock space.
///
/// The matrix is Hermitian with unit trace at creation. Lossy noise is
/// allowed to deflate the trace; entries stay finite throughout. Each
/// density matrix is owned by exactly one circuit and mutated in place;
/// `Clone` produces a fully independent deep copy.
#[derive(Debug, Clone)]
pub struct DensityMatrix {
    space: HilbertSpace,
    matrix: Array2<Complex64>,
}

impl DensityMatrix {
    /// Create the vacuum state: all probability mass on the all-zero-photon
    /// basis index.
    pub fn vacuum(space: HilbertSpace) -> Self {
        let d = space.total_dimension();
        let mut matrix = Array2::zeros((d, d));
        matrix[[0, 0]] = Complex64::new(1.0, 0.0);
        Self { space, matrix }
    }

    /// The space this state lives in.
    pub fn space(&self) -> HilbertSpace {
        self.space
    }

    /// Composite dimension.
    pub fn dimension(&self) -> usize {
        self.space.total_dimension()
    }

    /// Raw matrix access for diagnostics.
    pub fn matrix(&self) -> &Array2<Complex64> {
        &self.matrix
    }

    /// Apply a unitary in place: `rho <- U rho U^H`.
    ///
    /// The transform is computed into fresh storage and assigned only once
    /// complete, so a failed call leaves the state untouched.
    pub fn apply_unitary(&mut self, operator: &Array2<Complex64>) -> Result<()> {
        let d = self.dimension();
        if operator.shape() != [d, d] {
            return Err(SimError::DimensionMismatch {
                operator: operator.shape()[0],
                state: d,
            });
        }
        let u_h = operator.t().mapv(|x| x.conj());
        self.matrix = operator.dot(&self.matrix).dot(&u_h);
        Ok(())
    }

    /// Scale every entry by a real factor.
    pub fn scale(&mut self, factor: f64) {
        self.matrix.mapv_inplace(|x| x * factor);
    }

    /// Trace of the matrix.
    pub fn trace(&self) -> Complex64 {
        self.matrix.diag().sum()
    }

    /// Real diagonal entry at basis index `k`, clamped at zero so that
    /// floating-point dust never turns into a negative probability.
    pub fn diagonal_probability(&self, k: usize) -> f64 {
        self.matrix[[k, k]].re.max(0.0)
    }

    /// Whether the matrix equals its conjugate transpose within `tolerance`.
    pub fn is_hermitian(&self, tolerance: f64) -> bool {
        let d = self.dimension();
        for i in 0..d {
            for j in 0..d {
                if (self.matrix[[i, j]] - self.matrix[[j, i]].conj()).norm() > tolerance {
                    return false;
                }
            }
        }
        true
    }

    /// Whether every entry is finite.
    pub fn is_finite(&self) -> bool {
        self.matrix
            .iter()
            .all(|x| x.re.is_finite() && x.im.is_finite())
    }
}
