//! Bit streams extracted from measurements and their statistical tests.

use serde::{Deserialize, Serialize};

/// Append-only ordered sequence of 0/1 bits, one per generated random
/// number. Immutable to consumers once produced.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct BitStream {
    bits: Vec<u8>,
}

impl BitStream {
    pub fn new() -> Self {
        Self::default()
    }

    pub(crate) fn push(&mut self, bit: u8) {
        debug_assert!(bit <= 1);
        self.bits.push(bit);
    }

    pub fn len(&self) -> usize {
        self.bits.len()
    }

    pub fn is_empty(&self) -> bool {
        self.bits.is_empty()
    }

    pub fn as_slice(&self) -> &[u8] {
        &self.bits
    }

    /// Number of one bits.
    pub fn ones(&self) -> usize {
        self.bits.iter().filter(|&&b| b == 1).count()
    }

    /// Absolute deviation of the ones fraction from 1/2. Zero for an empty
    /// stream.
    pub fn bias(&self) -> f64 {
        if self.bits.is_empty() {
            return 0.0;
        }
        (0.5 - self.ones() as f64 / self.bits.len() as f64).abs()
    }

    /// Shannon entropy of the bit distribution in bits, in `[0, 1]`.
    ///
    /// Zero-probability terms contribute 0 rather than `0 * log(0) = NaN`.
    pub fn shannon_entropy(&self) -> f64 {
        if self.bits.is_empty() {
            return 0.0;
        }
        let p1 = self.ones() as f64 / self.bits.len() as f64;
        let term = |p: f64| if p > 0.0 { -p * p.log2() } else { 0.0 };
        term(p1) + term(1.0 - p1)
    }
}

impl From<Vec<u8>> for BitStream {
    fn from(bits: Vec<u8>) -> Self {
        Self {
            bits: bits.into_iter().map(|b| b & 1).collect(),
        }
    }
}

/// Outcome of the statistical test suite over one bit stream.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RandomnessReport {
    /// Frequency-test p-value surrogate, monotonically decreasing in the
    /// deviation from a balanced stream. 1.0 for an empty stream.
    pub frequency_pvalue: f64,
    /// Number of maximal same-valued contiguous runs.
    pub runs_count: usize,
    /// Pearson correlation between the stream and its one-position shift.
    /// 0.0 when either side has zero variance or fewer than two bits exist.
    pub serial_correlation: f64,
}

impl RandomnessReport {
    /// Defined result for degenerate (empty) input.
    fn neutral() -> Self {
        Self {
            frequency_pvalue: 1.0,
            runs_count: 0,
            serial_correlation: 0.0,
        }
    }
}

/// Run the frequency, runs, and serial-correlation tests.
///
/// Streams of length 0 or 1 return defined results instead of dividing by
/// zero: an empty stream maps to the neutral report, a single bit counts as
/// one run with zero correlation.
pub fn run_tests(bits: &BitStream) -> RandomnessReport {
    if bits.is_empty() {
        return RandomnessReport::neutral();
    }

    RandomnessReport {
        frequency_pvalue: frequency_pvalue(bits),
        runs_count: runs_count(bits.as_slice()),
        serial_correlation: serial_correlation(bits.as_slice()),
    }
}

/// Chi-square-style frequency statistic mapped through `exp(-chi2/2)`.
///
/// The exact p-value formula is a free choice as long as it is monotonic in
/// the deviation from balance; this surrogate is 1.0 for a perfectly
/// balanced stream and decays with the squared deviation.
fn frequency_pvalue(bits: &BitStream) -> f64 {
    let n = bits.len() as f64;
    let ones = bits.ones() as f64;
    let chi_square = (2.0 * ones - n).powi(2) / n;
    (-chi_square / 2.0).exp()
}

fn runs_count(bits: &[u8]) -> usize {
    let mut runs = 1;
    for pair in bits.windows(2) {
        if pair[0] != pair[1] {
            runs += 1;
        }
    }
    runs
}

fn serial_correlation(bits: &[u8]) -> f64 {
    if bits.len() < 2 {
        return 0.0;
    }
    let x = &bits[..bits.len() - 1];
    let y = &bits[1..];
    let n = x.len() as f64;

    let mean = |v: &[u8]| v.iter().map(|&b| b as f64).sum::<f64>() / n;
    let mean_x = mean(x);
    let mean_y = mean(y);

    let mut cov = 0.0;
    let mut var_x = 0.0;
    let mut var_y = 0.0;
    for (&a, &b) in x.iter().zip(y.iter()) {
        let dx = a as f64 - mean_x;
        let dy = b as f64 - mean_y;
        cov += dx * dy;
        var_x += dx * dx;
        var_y += dy * dy;
    }

    let denom = (var_x * var_y).sqrt();
    if denom == 0.0 {
        // Constant stream on either side; correlation is undefined, report
        // the neutral value instead of NaN.
        return 0.0;
    }
    cov / denom
}
