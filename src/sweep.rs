//! Control-point sweep: repeated fine searches forward and backward from
//! the coarse anchor, each adapting a running integer offset.

use crate::buffer::AudioBuffer;
use crate::config::{FINE_DQ, FINE_INTERVAL};
use crate::fine;
use crate::sinc::SincTable;

/// A single accepted alignment sample: `search_b[position + offset]`
/// aligns with `search_a[position]`, with `quality` the fine aligner's
/// score at that position.
///
/// The `valid` field named in spec §3 is deliberately not carried here —
/// spec §9 calls it "an implementation artifact of two-pass filtering;
/// equivalent and cleaner to produce the filtered list directly," and
/// [`crate::control_filter::filter`] does exactly that.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ControlPoint {
    pub position: i64,
    pub offset: f64,
    pub quality: f32,
}

/// Run the forward and backward walks from `anchor` and merge them into a
/// single position-ascending sequence. The anchor position itself is
/// visited only by the forward walk; the backward walk starts one
/// interval earlier so the anchor is not duplicated.
pub fn sweep(
    search_a: &AudioBuffer,
    search_b: &AudioBuffer,
    anchor: usize,
    coarse_shift: i64,
    sinc: &SincTable,
) -> Vec<ControlPoint> {
    let forward = walk(search_a, search_b, anchor as i64, coarse_shift, FINE_INTERVAL, sinc);
    let mut backward = walk(
        search_a,
        search_b,
        anchor as i64 - FINE_INTERVAL,
        coarse_shift,
        -FINE_INTERVAL,
        sinc,
    );
    // The backward walk is generated in descending-position order; build
    // it in its own Vec and reverse once here rather than prepending each
    // accepted point to a shared list, which would be O(k^2) (spec §9).
    backward.reverse();
    backward.extend(forward);
    backward
}

/// Walk `search_a` in strides of `step` (positive for the forward walk,
/// negative for the backward walk) starting at `start_pos`, maintaining a
/// running integer offset `ioff` and failure counter `nf` as described in
/// spec §4.6. Returns accepted control points in the order they were
/// visited (i.e. in `step`'s direction, not necessarily position-ascending
/// for the backward walk).
fn walk(
    search_a: &AudioBuffer,
    search_b: &AudioBuffer,
    start_pos: i64,
    coarse_shift: i64,
    step: i64,
    sinc: &SincTable,
) -> Vec<ControlPoint> {
    let mut points = Vec::new();
    let mut pos = start_pos;
    let mut ioff = coarse_shift;
    let mut nf: f64 = 1.0;
    let n_b = search_b.frames() as i64;

    loop {
        if step > 0 {
            if pos + ioff > n_b - FINE_INTERVAL {
                break;
            }
        } else if pos < FINE_INTERVAL || pos + ioff < FINE_INTERVAL {
            break;
        }

        let (delta, quality) = fine::search(search_a, search_b, pos, pos + ioff, sinc);
        let dq = quality as f64 * delta.abs() / nf;

        if dq > FINE_DQ {
            points.push(ControlPoint {
                position: pos,
                offset: ioff as f64 + delta,
                quality,
            });
            ioff += delta.floor() as i64;
            nf = 1.0;
        } else {
            nf += 1.0;
        }

        pos += step;
    }

    points
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::COARSE_MAX_SHIFT;

    fn noise(len: usize, seed: u64) -> Vec<f32> {
        let mut state = seed | 1;
        (0..len)
            .map(|_| {
                state ^= state << 13;
                state ^= state >> 7;
                state ^= state << 17;
                ((state as f64 / u64::MAX as f64) * 2.0 - 1.0) as f32
            })
            .collect()
    }

    #[test]
    fn points_are_position_ascending() {
        let pad = COARSE_MAX_SHIFT as usize;
        let samples = noise(600_000, 3);
        let buf = AudioBuffer::from_interleaved(samples, 1, 48_000, pad);
        let sinc = SincTable::new();
        let anchor = crate::coarse::anchor(buf.frames());
        let points = sweep(&buf, &buf, anchor, 0, &sinc);
        for w in points.windows(2) {
            assert!(w[0].position < w[1].position);
        }
    }

    #[test]
    fn identity_signal_has_near_zero_mean_offset() {
        let pad = COARSE_MAX_SHIFT as usize;
        let samples = noise(600_000, 11);
        let buf = AudioBuffer::from_interleaved(samples, 1, 48_000, pad);
        let sinc = SincTable::new();
        let anchor = crate::coarse::anchor(buf.frames());
        let points = sweep(&buf, &buf, anchor, 0, &sinc);
        assert!(points.len() >= 2, "expected at least two control points");
        let mean: f64 = points.iter().map(|p| p.offset).sum::<f64>() / points.len() as f64;
        assert!(mean.abs() < 1e-2, "mean offset = {mean}");
    }
}
