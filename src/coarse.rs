//! Integer-sample cross-correlation search over a wide shift range,
//! evaluated once at a fixed anchor position.

use crate::buffer::AudioBuffer;
use crate::config::{COARSE_MAX_SHIFT, COARSE_SIZE};
use rayon::prelude::*;

/// Anchor position for the coarse search and the control-point sweep's
/// starting point: far enough into the track that every tested shift
/// stays inside the padded buffer, but otherwise roughly a third of the
/// way through.
pub fn anchor(frames_a: usize) -> usize {
    (frames_a / 3).max(COARSE_MAX_SHIFT as usize)
}

/// L1 dissimilarity of the two search-domain buffers at `anchor`, for
/// every integer shift in `[-COARSE_MAX_SHIFT/2, COARSE_MAX_SHIFT)`.
/// Returns the shift maximizing similarity (i.e. minimizing summed
/// absolute difference), with ties broken by first occurrence.
///
/// Evaluated in parallel over shifts (spec §5: "embarrassingly parallel
/// over shifts"), mirroring how the upstream crate's
/// `examples/optimize.rs` parallelizes its own per-candidate evaluation
/// loop with `rayon`.
pub fn search(search_a: &AudioBuffer, search_b: &AudioBuffer, anchor: usize) -> i64 {
    let channels = search_a.channels();
    debug_assert_eq!(channels, search_b.channels());

    let reference = &search_a.samples()[anchor * channels..][..COARSE_SIZE * channels];
    let lo = -COARSE_MAX_SHIFT / 2;
    let hi = COARSE_MAX_SHIFT;

    // Indexed parallel iteration preserves shift order on collect, so the
    // sequential reduction below sees shifts in ascending order and can
    // apply "ties go to the earliest shift" with a plain `>` comparison.
    let scores: Vec<f64> = (lo..hi)
        .into_par_iter()
        .map(|shift| {
            let base = ((anchor as i64 + shift) * channels as i64) as usize;
            let candidate = &search_b.samples()[base..][..COARSE_SIZE * channels];
            let mut acc = 0.0f64;
            for i in 0..reference.len() {
                acc -= (reference[i] as f64 - candidate[i] as f64).abs();
            }
            acc
        })
        .collect();

    let mut best_shift = lo;
    let mut best_score = f64::NEG_INFINITY;
    for (i, &score) in scores.iter().enumerate() {
        if score > best_score {
            best_score = score;
            best_shift = lo + i as i64;
        }
    }
    log::info!("coarse offset: {best_shift} samples (score {best_score})");
    best_shift
}
