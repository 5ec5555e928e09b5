//! Interleaved multichannel audio buffer.
//!
//! Despecialized from the per-channel `Vec<Vec<f32>>` storage of the
//! upstream DSP crate's `Wave` type: the alignment pipeline indexes samples
//! as `i * channels + c` throughout (coarse/fine search, the interpolator,
//! the renderer), so storage here is interleaved to match directly instead
//! of through an adapter layer.

/// An immutable-after-load interleaved sample buffer.
///
/// `frames` is the *nominal* length as read from the source file. The
/// backing storage is over-allocated by `pad_frames` beyond that so that
/// out-of-range reads during the coarse search (which probes shifts far
/// outside the nominal length) never fault; the padding reads back as
/// silence.
#[derive(Clone)]
pub struct AudioBuffer {
    samples: Vec<f32>,
    channels: usize,
    sample_rate: u32,
    frames: usize,
}

impl AudioBuffer {
    /// Build a buffer from already-interleaved samples, zero-padding the
    /// backing storage by `pad_frames` frames so later reads at
    /// `frames + pad_frames - 1` are valid.
    pub fn from_interleaved(
        mut samples: Vec<f32>,
        channels: usize,
        sample_rate: u32,
        pad_frames: usize,
    ) -> Self {
        assert!(channels > 0);
        let frames = samples.len() / channels;
        samples.resize((frames + pad_frames) * channels, 0.0);
        Self {
            samples,
            channels,
            sample_rate,
            frames,
        }
    }

    /// Number of channels.
    #[inline]
    pub fn channels(&self) -> usize {
        self.channels
    }

    /// Sample rate in hertz.
    #[inline]
    pub fn sample_rate(&self) -> u32 {
        self.sample_rate
    }

    /// Nominal frame count, excluding zero padding.
    #[inline]
    pub fn frames(&self) -> usize {
        self.frames
    }

    /// Total frame count including zero padding, i.e. how far a read may
    /// safely go past `frames()`.
    #[inline]
    pub fn padded_frames(&self) -> usize {
        self.samples.len() / self.channels
    }

    /// Sample at frame `i`, channel `c`.
    #[inline]
    pub fn at(&self, i: usize, c: usize) -> f32 {
        self.samples[i * self.channels + c]
    }

    /// Raw interleaved sample storage.
    #[inline]
    pub fn samples(&self) -> &[f32] {
        &self.samples
    }

    /// A channel-interleaved slice starting at frame `i`, i.e. `&buf[i *
    /// channels ..]`. Used by the interpolator and search routines, which
    /// address samples by stride rather than by `(frame, channel)` pairs.
    #[inline]
    pub fn from_frame(&self, i: usize) -> &[f32] {
        &self.samples[i * self.channels..]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn padding_reads_as_silence() {
        let buf = AudioBuffer::from_interleaved(vec![1.0, 2.0, 3.0, 4.0], 2, 48_000, 10);
        assert_eq!(buf.frames(), 2);
        assert_eq!(buf.padded_frames(), 12);
        assert_eq!(buf.at(0, 0), 1.0);
        assert_eq!(buf.at(1, 1), 4.0);
        assert_eq!(buf.at(5, 0), 0.0);
    }

    #[test]
    #[should_panic]
    fn zero_channels_rejected() {
        AudioBuffer::from_interleaved(vec![], 0, 48_000, 0);
    }
}
