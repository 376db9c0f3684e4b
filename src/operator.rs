//! Single-mode operators and their embedding into the composite space.
//!
//! Operators are built fresh for each application and never retained. A
//! per-mode operator is lifted to the full space by tensoring identities on
//! every other mode; for diagonal operators the same matrix can be written
//! down directly from the per-mode photon numbers, and both routes must
//! agree.

use ndarray::linalg::kron;
use ndarray::Array2;
use num_complex::Complex64;

use crate::error::{Result, SimError};
use crate::hilbert::HilbertSpace;

/// Single-mode phase-shift operator: diagonal with entries `exp(i*phase*n)`
/// for photon number `n = 0..=max_photons`.
pub fn single_mode_phase(per_mode_dimension: usize, phase: f64) -> Array2<Complex64> {
    let mut op = Array2::zeros((per_mode_dimension, per_mode_dimension));
    for n in 0..per_mode_dimension {
        op[[n, n]] = Complex64::from_polar(1.0, phase * n as f64);
    }
    op
}

/// Embed a per-mode operator into the composite space by Kronecker product,
/// identity on every factor except `mode`.
pub fn embed_single_mode(
    space: HilbertSpace,
    mode: usize,
    op: &Array2<Complex64>,
) -> Result<Array2<Complex64>> {
    space.check_mode(mode)?;
    let per_mode = space.per_mode_dimension();
    if op.shape() != [per_mode, per_mode] {
        return Err(SimError::DimensionMismatch {
            operator: op.shape()[0],
            state: per_mode,
        });
    }

    let eye: Array2<Complex64> = Array2::eye(per_mode);
    let mut full: Array2<Complex64> = Array2::eye(1);
    for m in 0..space.num_modes() {
        let factor = if m == mode { op } else { &eye };
        full = kron(&full, factor);
    }
    Ok(full)
}

/// Full-space phase-shift operator for `mode`, built directly on the
/// diagonal: entry `k` is `exp(i*phase*n)` where `n` is the photon number of
/// `mode` at composite index `k`.
///
/// Numerically identical to embedding [`single_mode_phase`] via
/// [`embed_single_mode`]; this route skips the intermediate Kronecker
/// products.
pub fn phase_operator(
    space: HilbertSpace,
    mode: usize,
    phase: f64,
) -> Result<Array2<Complex64>> {
    space.check_mode(mode)?;
    let d = space.total_dimension();
    let mut op = Array2::zeros((d, d));
    for k in 0..d {
        let n = space.photon_number(k, mode);
        op[[k, k]] = Complex64::from_polar(1.0, phase * n as f64);
    }
    Ok(op)
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use proptest::prelude::*;
    use std::f64::consts::PI;

    fn max_entry_distance(a: &Array2<Complex64>, b: &Array2<Complex64>) -> f64 {
        a.iter()
            .zip(b.iter())
            .map(|(x, y)| (x - y).norm())
            .fold(0.0, f64::max)
    }

    #[test]
    fn test_single_mode_phase_entries() {
        let op = single_mode_phase(4, PI / 2.0);
        assert_relative_eq!(op[[0, 0]].re, 1.0, epsilon = 1e-12);
        assert_relative_eq!(op[[1, 1]].im, 1.0, epsilon = 1e-12);
        assert_relative_eq!(op[[2, 2]].re, -1.0, epsilon = 1e-12);
        assert_relative_eq!(op[[3, 3]].im, -1.0, epsilon = 1e-12);
    }

    #[test]
    fn test_embedding_routes_agree() {
        // Kronecker embedding and direct diagonal placement must produce
        // identical matrices, for every mode position.
        let space = HilbertSpace::new(3, 2).unwrap();
        for mode in 0..3 {
            let single = single_mode_phase(space.per_mode_dimension(), 0.7);
            let embedded = embed_single_mode(space, mode, &single).unwrap();
            let direct = phase_operator(space, mode, 0.7).unwrap();
            assert!(max_entry_distance(&embedded, &direct) < 1e-12);
        }
    }

    #[test]
    fn test_phase_operator_unitary() {
        let space = HilbertSpace::new(2, 3).unwrap();
        let op = phase_operator(space, 1, 1.3).unwrap();
        let product = op.dot(&op.t().mapv(|x| x.conj()));
        let eye: Array2<Complex64> = Array2::eye(space.total_dimension());
        assert!(max_entry_distance(&product, &eye) < 1e-12);
    }

    #[test]
    fn test_invalid_mode_rejected() {
        let space = HilbertSpace::new(2, 1).unwrap();
        assert!(matches!(
            phase_operator(space, 2, 0.1),
            Err(SimError::InvalidMode { mode: 2, .. })
        ));
    }

    #[test]
    fn test_wrong_single_mode_dimension_rejected() {
        let space = HilbertSpace::new(2, 1).unwrap();
        let op: Array2<Complex64> = Array2::eye(5);
        assert!(matches!(
            embed_single_mode(space, 0, &op),
            Err(SimError::DimensionMismatch { .. })
        ));
    }

    proptest! {
        #[test]
        fn prop_routes_agree_for_any_phase(phase in -10.0f64..10.0) {
            let space = HilbertSpace::new(2, 3).unwrap();
            let single = single_mode_phase(space.per_mode_dimension(), phase);
            let embedded = embed_single_mode(space, 1, &single).unwrap();
            let direct = phase_operator(space, 1, phase).unwrap();
            prop_assert!(max_entry_distance(&embedded, &direct) < 1e-10);
        }
    }
}
