//! Design-value constants and the per-run pipeline configuration.
//!
//! Per spec §9: channel count and sample rate are discovered from the
//! first input and threaded through this configuration value rather than
//! kept as mutable process-wide state (the original C tool used file-scope
//! globals for exactly this, which this implementation deliberately does
//! not reproduce).

/// Kaiser window shape parameter.
pub const KAISER_BETA: f64 = 7.68;
/// Sinc kernel tap count.
pub const SINC_WIDTH: usize = 33;
/// Oversampling factor of the sinc table.
pub const SINC_OVERSAMPLING: usize = 32;
/// Sinc table length, `((WIDTH - 1) * OVERSAMPLING) + 1`.
pub const SINC_SIZE: usize = ((SINC_WIDTH - 1) * SINC_OVERSAMPLING) + 1;

/// Highpass pre-emphasis coefficient.
pub const HPF_A: f32 = 0.8;

/// Reference window length for the coarse search, in frames.
pub const COARSE_SIZE: usize = 15_000;
/// Coarse search half-range: shifts are swept over `[-MAX/2, MAX)`.
pub const COARSE_MAX_SHIFT: i64 = 200_000;

/// Frames of zero padding appended past a buffer's nominal length at load
/// time (spec §3/§9: "padding via over-allocation").
///
/// The coarse search reads `search_b` at `anchor + shift + COARSE_SIZE -
/// 1` for `shift` up to `COARSE_MAX_SHIFT - 1`, and `anchor` itself is
/// `max(N/3, COARSE_MAX_SHIFT)` — for tracks shorter than
/// `3 * COARSE_MAX_SHIFT` frames, `anchor` sits at the fixed
/// `COARSE_MAX_SHIFT` floor regardless of `N`. Padding by
/// `COARSE_MAX_SHIFT` alone (the anchor's own margin) is therefore not
/// enough; the worst case needs `2 * COARSE_MAX_SHIFT + COARSE_SIZE`
/// frames past nominal length to keep every coarse-search read in
/// bounds independent of track length.
pub const PAD_FRAMES: usize = 2 * COARSE_MAX_SHIFT as usize + COARSE_SIZE;

/// Reference window length for the fine search, in frames.
pub const FINE_SIZE: usize = 256;
/// Fine search range in samples: shifts are swept over `[-MAX, MAX)`.
pub const FINE_MAX_SHIFT: i64 = 128;
/// Fine search steps per sample.
pub const FINE_SUBDIV: i64 = 32;
/// Fine search step size in samples, `1 / FINE_SUBDIV`.
pub const FINE_UNIT: f64 = 1.0 / FINE_SUBDIV as f64;
/// Control-point sweep stride, in frames.
pub const FINE_INTERVAL: i64 = 25_000;

/// Decision-metric threshold for accepting a fine-search result into the
/// control-point sequence. See spec §4.6/§9: `dq = q * |delta| / nf` is
/// always `<= 0` because `q` is a negative normalized L1 score, so this
/// gate reads as "score not catastrophically bad and delta not
/// negligible" rather than a conventional positive threshold. Documented
/// here rather than reparameterized, per spec §9's explicit instruction
/// not to reinvent its intent.
pub const FINE_DQ: f64 = -50.0;

/// Quality-validity multiplier in the control-point filter's first pass:
/// a point's quality must exceed `Q_FACTOR * mean_quality` to be
/// considered at all before the `2 * stdev` dispersion gate.
pub const Q_FACTOR: f64 = 2.5;

/// Minimum surviving control points required to render; fewer is a fatal
/// `AlignError::Alignment`.
pub const MIN_CONTROL_POINTS: usize = 2;

/// Output gain applied to both the instrumental and original channel
/// groups, preventing clipping when the consumer sums or subtracts them.
pub const OUTPUT_GAIN: f32 = 0.8;

/// Per-run pipeline configuration: the channel count and sample rate
/// discovered from the inputs, shared by every pipeline stage.
#[derive(Debug, Clone, Copy)]
pub struct PipelineConfig {
    pub channels: usize,
    pub sample_rate: u32,
}

impl PipelineConfig {
    pub fn new(channels: usize, sample_rate: u32) -> Self {
        Self {
            channels,
            sample_rate,
        }
    }
}
