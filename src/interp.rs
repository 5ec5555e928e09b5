//! Fractional (sub-sample) interpolator.
//!
//! Reduces a sinc resample at an arbitrary real position to `SINC_WIDTH -
//! 1` table lookups and a linear blend per tap, using the table built by
//! [`crate::sinc::SincTable`]. Callers must keep `pos` within `[WIDTH/2 -
//! 1, N - WIDTH/2)` of the buffer being read — this function does no
//! bounds checking itself, matching the original tool's plain pointer
//! arithmetic, so the zero-padding described in [`crate::buffer`] or an
//! explicit caller-side check is what keeps reads in range.

use crate::config::{SINC_OVERSAMPLING, SINC_WIDTH};
use crate::sinc::SincTable;

/// Interpolate the sample at real position `pos` on `channel` of an
/// interleaved buffer with `channels` channels, using `sinc`.
///
/// `samples` must be indexable at least up to `(floor(pos) + WIDTH/2) *
/// channels + channel`, and from `(floor(pos) - (WIDTH/2 - 1)) * channels
/// + channel` on the low side.
#[inline]
pub fn interpolate(samples: &[f32], pos: f64, channel: usize, channels: usize, sinc: &SincTable) -> f64 {
    let ipos = pos.floor() as i64;
    let ioff = 1.0 - (pos - ipos as f64);

    let spos = ioff * SINC_OVERSAMPLING as f64;
    let sipos = spos as i64;
    let f2 = spos - sipos as f64;
    let f1 = 1.0 - f2;

    let table = sinc.as_slice();
    let base_frame = ipos - ((SINC_WIDTH as i64 / 2) - 1);

    let mut sum = 0.0f64;
    for t in 0..(SINC_WIDTH - 1) {
        let table_index = (sipos + (t * SINC_OVERSAMPLING) as i64) as usize;
        // `table_index + 1` runs one entry past the table's last valid
        // index whenever `pos` lands on an exact integer sample (`sipos`
        // == SINC_OVERSAMPLING, `f2` == 0 at the last tap). The original
        // tool's pointer arithmetic reads one float past `s_tab` there too
        // — benign because its weight `f2` is always zero at that point —
        // so the out-of-range entry is treated as an implicit zero rather
        // than bounds-checked away.
        let next = table.get(table_index + 1).copied().unwrap_or(0.0);
        let weight = table[table_index] as f64 * f1 + next as f64 * f2;
        let frame = (base_frame + t as i64) as usize;
        sum += weight * samples[frame * channels + channel] as f64;
    }
    sum
}

/// Lowest real position at which `interpolate` may safely read, for a
/// buffer indexed from frame 0.
#[inline]
pub fn min_safe_position() -> f64 {
    (SINC_WIDTH as f64 / 2.0) - 1.0
}

/// Highest frame count offset such that `interpolate` may safely read at
/// `frames - 1 - margin`, i.e. `margin = WIDTH / 2`.
#[inline]
pub fn high_margin() -> usize {
    SINC_WIDTH / 2
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sine(frames: usize, freq_hz: f64, sample_rate: f64) -> Vec<f32> {
        (0..frames)
            .map(|i| (2.0 * std::f64::consts::PI * freq_hz * i as f64 / sample_rate).sin() as f32)
            .collect()
    }

    #[test]
    fn interpolating_at_exact_integer_position_does_not_panic() {
        // `pos` landing on an exact integer drives `sipos` to
        // `SINC_OVERSAMPLING` on the last tap, which used to read one
        // entry past the end of the sinc table.
        let sinc = SincTable::new();
        let samples = sine(2000, 440.0, 48_000.0);
        let i = 1000usize;
        let got = interpolate(&samples, i as f64, 0, 1, &sinc);
        assert!((got - samples[i] as f64).abs() < 1e-3, "got {got}, want {}", samples[i]);
    }

    #[test]
    fn interpolating_at_integer_position_matches_sample() {
        let sinc = SincTable::new();
        let samples = sine(2000, 440.0, 48_000.0);
        let margin = high_margin().max(min_safe_position().ceil() as usize) + 4;
        for i in margin..(samples.len() - margin) {
            let got = interpolate(&samples, i as f64, 0, 1, &sinc);
            assert!(
                (got - samples[i] as f64).abs() < 1e-3,
                "frame {i}: got {got}, want {}",
                samples[i]
            );
        }
    }

    #[test]
    fn interpolating_midpoint_is_close_to_linear_average_for_slow_signal() {
        let sinc = SincTable::new();
        let samples = sine(4000, 100.0, 48_000.0);
        let margin = high_margin() + 4;
        let i = 2000usize;
        let got = interpolate(&samples, i as f64 + 0.5, 0, 1, &sinc);
        let linear = (samples[i] as f64 + samples[i + 1] as f64) / 2.0;
        assert!((got - linear).abs() < 0.05);
        let _ = margin;
    }
}
