//! Time-warping renderer: streams the original track and, for each
//! sample, resamples the instrumental track onto the original's timeline
//! using the surviving control points as a piecewise-linear offset curve.

use crate::buffer::AudioBuffer;
use crate::config::OUTPUT_GAIN;
use crate::interp::{high_margin, interpolate, min_safe_position};
use crate::math::lerp;
use crate::sinc::SincTable;
use crate::sweep::ControlPoint;

/// Render the 2C-channel output: channels `[0, C)` hold the time-warped
/// instrumental (`raw_b`) scaled by [`OUTPUT_GAIN`], channels `[C, 2C)`
/// hold the original (`raw_a`) scaled by the same gain. Output frame count
/// equals `raw_a.frames()`. `points` must hold at least two entries —
/// callers enforce this via `AlignError::Alignment` before calling.
pub fn render(raw_a: &AudioBuffer, raw_b: &AudioBuffer, points: &[ControlPoint], sinc: &SincTable) -> Vec<f32> {
    assert!(points.len() >= 2, "render requires at least two control points");

    let channels = raw_a.channels();
    debug_assert_eq!(channels, raw_b.channels());
    let frames = raw_a.frames();
    let n_b = raw_b.frames() as f64;

    let low = min_safe_position();
    let high = n_b - high_margin() as f64;

    let mut out = vec![0.0f32; frames * channels * 2];
    let mut cursor = 0usize;

    for i in 0..frames {
        while cursor + 2 < points.len() && (i as i64) >= points[cursor + 1].position {
            cursor += 1;
        }
        let p0 = &points[cursor];
        let p1 = &points[cursor + 1];

        let span = (p1.position - p0.position) as f64;
        let t = if span > 0.0 {
            ((i as i64 - p0.position) as f64 / span).clamp(0.0, 1.0)
        } else {
            0.0
        };
        let off = lerp(p0.offset, p1.offset, t);
        let b_pos = i as f64 + off;
        let safe = b_pos >= low && b_pos <= high;

        let frame_base = i * channels * 2;
        for c in 0..channels {
            let instrumental = if safe {
                interpolate(raw_b.samples(), b_pos, c, channels, sinc) as f32 * OUTPUT_GAIN
            } else {
                0.0
            };
            out[frame_base + c] = instrumental;
            out[frame_base + channels + c] = raw_a.at(i, c) * OUTPUT_GAIN;
        }
    }

    out
}
