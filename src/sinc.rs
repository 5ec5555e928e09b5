//! Oversampled windowed-sinc FIR table.
//!
//! Precomputes a length-`SINC_SIZE` table so the fractional interpolator
//! can turn a sub-sample resample into two table lookups and a linear
//! blend per tap, instead of evaluating `sinc` and the Kaiser window at
//! arbitrary real offsets on every call.

use crate::config::{KAISER_BETA, SINC_OVERSAMPLING, SINC_SIZE, SINC_WIDTH};

/// Zeroth-order modified Bessel function of the first kind, by the series
/// `I0(x) = sum_k ((x/2)^2k) / (k!)^2`, truncated once a term's
/// contribution falls below `1e-8` relative to the running sum.
fn bessel_i0(x: f64) -> f64 {
    let tolerance = 1e-8;
    let y = 0.5 * x;
    let mut term = 1.0;
    let mut sum = 1.0;
    for k in 1..26 {
        term *= y / k as f64;
        let squared_term = term * term;
        sum += squared_term;
        if sum * tolerance - squared_term > 0.0 {
            break;
        }
    }
    sum
}

/// Kaiser window weight at tap index `i` of `n` total taps, shape `beta`.
/// The exact-center tap (`i == n / 2`, only hit when `n` is odd) is
/// defined to be zero rather than evaluated from the formula: this is the
/// sinc table's even-length-window convention, distinct from `sinc(0) =
/// 1`, which still holds at that same index.
fn kaiser_weight(i: usize, n: usize, beta: f64) -> f64 {
    if i == n / 2 {
        return 0.0;
    }
    let n1 = (n - 1) as f64;
    let numerator = (2.0 * i as f64 - n1).powi(2);
    bessel_i0(beta * (1.0 - numerator / (n1 * n1)).sqrt()) / bessel_i0(beta)
}

/// An oversampled, Kaiser-windowed sinc kernel built once at startup.
pub struct SincTable {
    table: Vec<f32>,
}

impl SincTable {
    /// Build the table. `SINC_SIZE = (SINC_WIDTH - 1) * SINC_OVERSAMPLING + 1`.
    pub fn new() -> Self {
        let mut table = vec![0.0f32; SINC_SIZE];
        let center = SINC_SIZE / 2;
        for (k, slot) in table.iter_mut().enumerate() {
            let x = (k as f64 - center as f64) / SINC_OVERSAMPLING as f64;
            // At the exact center, sinc(0) = 1 and the Kaiser multiply is
            // skipped entirely rather than applied (the forced-zero Kaiser
            // tap at this same index is a property of the window, not of
            // the sinc value here — per spec §4.1, "sinc(0) is still 1 —
            // only the Kaiser multiplier at index S/2 is forced to zero").
            *slot = if x == 0.0 {
                1.0
            } else {
                let sinc = (std::f64::consts::PI * x).sin() / (std::f64::consts::PI * x);
                (sinc * kaiser_weight(k, SINC_SIZE, KAISER_BETA)) as f32
            };
        }
        Self { table }
    }

    /// Raw table storage, length `SINC_SIZE`.
    #[inline]
    pub fn as_slice(&self) -> &[f32] {
        &self.table
    }
}

impl Default for SincTable {
    fn default() -> Self {
        Self::new()
    }
}
