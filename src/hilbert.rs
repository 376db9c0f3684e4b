//! Truncated multi-mode Fock space.

use crate::error::{Result, SimError};

/// Dimensions of a multi-mode optical Hilbert space with a per-mode
/// photon-number truncation.
///
/// Each mode carries photon numbers `0..=max_photons`, so a single mode has
/// dimension `max_photons + 1` and the composite space has dimension
/// `(max_photons + 1)^num_modes`.
///
/// Basis-index convention: mode 0 is the most significant tensor factor.
/// Composite index `k` encodes the photon numbers of all modes as digits of
/// `k` in base `per_mode_dimension`, mode 0 first.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct HilbertSpace {
    num_modes: usize,
    max_photons: usize,
    total_dimension: usize,
}

impl HilbertSpace {
    /// Create a space with `num_modes` modes truncated at `max_photons`
    /// photons per mode.
    pub fn new(num_modes: usize, max_photons: usize) -> Result<Self> {
        if num_modes < 1 {
            return Err(SimError::InvalidConfiguration(
                "at least one mode is required".into(),
            ));
        }
        let total_dimension = max_photons
            .checked_add(1)
            .and_then(|per_mode| per_mode.checked_pow(num_modes as u32))
            .ok_or_else(|| {
                SimError::InvalidConfiguration(format!(
                    "state space ({max_photons} + 1)^{num_modes} overflows"
                ))
            })?;
        Ok(Self {
            num_modes,
            max_photons,
            total_dimension,
        })
    }

    /// Number of optical modes.
    pub fn num_modes(&self) -> usize {
        self.num_modes
    }

    /// Per-mode photon-number truncation.
    pub fn max_photons(&self) -> usize {
        self.max_photons
    }

    /// Dimension of a single mode's truncated Fock space.
    pub fn per_mode_dimension(&self) -> usize {
        self.max_photons + 1
    }

    /// Dimension of the composite space.
    pub fn total_dimension(&self) -> usize {
        self.total_dimension
    }

    /// Reject mode indices outside `[0, num_modes)`.
    pub fn check_mode(&self, mode: usize) -> Result<()> {
        if mode >= self.num_modes {
            return Err(SimError::InvalidMode {
                mode,
                num_modes: self.num_modes,
            });
        }
        Ok(())
    }

    /// Photon number of `mode` at composite basis index `index`.
    pub fn photon_number(&self, index: usize, mode: usize) -> usize {
        let per_mode = self.per_mode_dimension();
        let place = per_mode.pow((self.num_modes - 1 - mode) as u32);
        index / place % per_mode
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_dimensions() {
        let space = HilbertSpace::new(2, 3).unwrap();
        assert_eq!(space.per_mode_dimension(), 4);
        assert_eq!(space.total_dimension(), 16);
    }

    #[test]
    fn test_single_mode() {
        let space = HilbertSpace::new(1, 0).unwrap();
        assert_eq!(space.total_dimension(), 1);
    }

    #[test]
    fn test_zero_modes_rejected() {
        assert!(matches!(
            HilbertSpace::new(0, 3),
            Err(SimError::InvalidConfiguration(_))
        ));
    }

    #[test]
    fn test_overflow_rejected() {
        assert!(matches!(
            HilbertSpace::new(64, usize::MAX - 1),
            Err(SimError::InvalidConfiguration(_))
        ));
    }

    #[test]
    fn test_photon_number_digits() {
        // 2 modes, 4 levels each: index = 4*n0 + n1.
        let space = HilbertSpace::new(2, 3).unwrap();
        assert_eq!(space.photon_number(0, 0), 0);
        assert_eq!(space.photon_number(0, 1), 0);
        assert_eq!(space.photon_number(7, 0), 1);
        assert_eq!(space.photon_number(7, 1), 3);
        assert_eq!(space.photon_number(14, 0), 3);
        assert_eq!(space.photon_number(14, 1), 2);
    }

    #[test]
    fn test_check_mode() {
        let space = HilbertSpace::new(2, 1).unwrap();
        assert!(space.check_mode(1).is_ok());
        assert_eq!(
            space.check_mode(2),
            Err(SimError::InvalidMode {
                mode: 2,
                num_modes: 2
            })
        );
    }
}
