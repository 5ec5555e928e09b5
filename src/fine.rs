//! Sub-sample cross-correlation search around a known integer offset.
//!
//! Where [`crate::coarse`] only ever compares integer-aligned samples, this
//! sweeps a continuous shift through the sinc interpolator so the
//! control-point sweep can report offsets finer than one sample.

use crate::buffer::AudioBuffer;
use crate::config::{FINE_MAX_SHIFT, FINE_SIZE, FINE_SUBDIV, FINE_UNIT};
use crate::interp::interpolate;
use crate::sinc::SincTable;

/// Sweep continuous shift `delta` over `[-FINE_MAX_SHIFT, FINE_MAX_SHIFT)`
/// in `1 / FINE_SUBDIV`-sample steps, comparing a directly-read reference
/// window of `search_a` at `pos_a` against a sinc-interpolated window of
/// `search_b` at `pos_b_int + delta`. Returns `(delta*, score*)` for the
/// shift maximizing `score = acc / sqrt(rms)`, ties broken by first
/// occurrence.
///
/// Per spec §4.5, normalizing by the reference window's own rms keeps
/// scores comparable across windows of differing energy — a raw L1 sum
/// would otherwise bias the sweep toward quiet passages, where small
/// absolute errors look artificially good.
pub fn search(
    search_a: &AudioBuffer,
    search_b: &AudioBuffer,
    pos_a: i64,
    pos_b_int: i64,
    sinc: &SincTable,
) -> (f64, f32) {
    let channels = search_a.channels();
    debug_assert_eq!(channels, search_b.channels());

    let reference = &search_a.samples()[(pos_a as usize) * channels..][..FINE_SIZE * channels];
    let rms: f64 = reference.iter().map(|&x| (x as f64) * (x as f64)).sum();
    let rms_sqrt = rms.sqrt().max(1e-12);

    let b_samples = search_b.samples();
    let steps = (2 * FINE_MAX_SHIFT * FINE_SUBDIV) as usize;

    let mut best_delta = -(FINE_MAX_SHIFT as f64);
    let mut best_score = f64::NEG_INFINITY;

    for step in 0..steps {
        let delta = -(FINE_MAX_SHIFT as f64) + step as f64 * FINE_UNIT;
        let mut acc = 0.0f64;
        for i in 0..FINE_SIZE {
            let b_pos = pos_b_int as f64 + delta + i as f64;
            for c in 0..channels {
                let a = reference[i * channels + c] as f64;
                let b = interpolate(b_samples, b_pos, c, channels, sinc);
                acc -= (a - b).abs();
            }
        }
        let score = acc / rms_sqrt;
        if score > best_score {
            best_score = score;
            best_delta = delta;
        }
    }

    (best_delta, best_score as f32)
}
