//! Time-alignment pipeline for sample-synchronous vocal isolation.
//!
//! Aligns a full mix ("original") and an instrumental mix of the same
//! performance so subtracting one from the other, once rendered to a
//! shared timeline, isolates the lead vocal. The offset between the two
//! recordings drifts slowly and non-monotonically over a track's
//! duration, so alignment is not a single constant shift: a two-stage
//! cross-correlation search (coarse integer, then fine sub-sample)
//! produces a sequence of control points, which a piecewise-linear
//! time-warp renderer then uses to resample the instrumental onto the
//! original's timeline.

pub mod buffer;
pub mod coarse;
pub mod config;
pub mod control_filter;
pub mod error;
pub mod fine;
pub mod interp;
pub mod math;
pub mod pipeline;
pub mod preprocess;
pub mod read;
pub mod render;
pub mod sinc;
pub mod sweep;
pub mod write;
