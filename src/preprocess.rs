//! Search-domain pre-processing: stereo-to-difference mixdown, then a
//! one-pole highpass pre-emphasis. Produces a derived buffer used only by
//! the search stages; the renderer reads the raw, unprocessed buffer.

use crate::buffer::AudioBuffer;
use crate::config::HPF_A;

/// Run the full search-domain transform: mixdown (if stereo) followed by
/// highpass. Operates over the buffer's entire padded length, not just
/// its nominal frame count, so the derived buffer stays safe to read at
/// the same out-of-range offsets the raw buffer is padded for.
pub fn prepare_search_domain(buf: &AudioBuffer) -> AudioBuffer {
    let mixed = mixdown(buf);
    highpass(&mixed)
}

/// `L - R` stereo difference, halving the channel count to 1 and
/// emphasizing side/vocal content. Buffers with any other channel count
/// pass through unchanged (mono has nothing to difference; higher counts
/// are out of scope).
fn mixdown(buf: &AudioBuffer) -> AudioBuffer {
    if buf.channels() != 2 {
        return buf.clone();
    }
    let padded = buf.padded_frames();
    let pad_frames = padded - buf.frames();
    let raw = buf.samples();
    let mut out = Vec::with_capacity(padded);
    for i in 0..padded {
        out.push(raw[i * 2] - raw[i * 2 + 1]);
    }
    out.truncate(buf.frames());
    AudioBuffer::from_interleaved(out, 1, buf.sample_rate(), pad_frames)
}

/// One-pole pre-emphasis highpass, coefficient `a`, applied independently
/// per channel with state `{y, x_prev}` initialized to zero:
/// `y <- a*y + a*(x - x_prev); x_prev <- x; emit y`.
fn highpass(buf: &AudioBuffer) -> AudioBuffer {
    let channels = buf.channels();
    let padded = buf.padded_frames();
    let pad_frames = padded - buf.frames();
    let raw = buf.samples();
    let mut out = vec![0.0f32; raw.len()];

    let a = HPF_A;
    let mut y = vec![0.0f32; channels];
    let mut x_prev = vec![0.0f32; channels];
    for i in 0..padded {
        for c in 0..channels {
            let x = raw[i * channels + c];
            y[c] = a * y[c] + a * (x - x_prev[c]);
            x_prev[c] = x;
            out[i * channels + c] = y[c];
        }
    }
    out.truncate(buf.frames() * channels);
    AudioBuffer::from_interleaved(out, channels, buf.sample_rate(), pad_frames)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn mixdown_halves_stereo_to_mono() {
        let buf = AudioBuffer::from_interleaved(vec![1.0, 0.4, -0.5, -0.5, 0.0, 0.0], 2, 48_000, 0);
        let mono = mixdown(&buf);
        assert_eq!(mono.channels(), 1);
        assert!((mono.at(0, 0) - 0.6).abs() < 1e-6);
        assert!((mono.at(1, 0) - 0.0).abs() < 1e-6);
        assert!((mono.at(2, 0) - 0.0).abs() < 1e-6);
    }

    #[test]
    fn mono_passes_through_mixdown_unchanged() {
        let buf = AudioBuffer::from_interleaved(vec![0.1, 0.2, 0.3], 1, 48_000, 0);
        let out = mixdown(&buf);
        assert_eq!(out.channels(), 1);
        assert_eq!(out.at(0, 0), 0.1);
        assert_eq!(out.at(2, 0), 0.3);
    }

    #[test]
    fn highpass_rejects_dc() {
        let frames = 200;
        let buf = AudioBuffer::from_interleaved(vec![1.0f32; frames], 1, 48_000, 0);
        let out = highpass(&buf);
        // A constant input decays toward zero geometrically with ratio (1-a).
        assert!(out.at(0, 0) > 0.5);
        assert!(out.at(frames - 1, 0).abs() < 1e-4);
    }

    #[test]
    fn prepare_search_domain_pads_like_source() {
        let buf = AudioBuffer::from_interleaved(vec![1.0, 2.0, 3.0, 4.0], 2, 48_000, 10);
        let search = prepare_search_domain(&buf);
        assert_eq!(search.channels(), 1);
        assert_eq!(search.padded_frames(), buf.padded_frames());
    }
}
