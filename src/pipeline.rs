//! End-to-end orchestration: load both inputs, cross-check them, run the
//! alignment pipeline, and write the rendered output.

use std::path::Path;

use crate::config::{PipelineConfig, MIN_CONTROL_POINTS, PAD_FRAMES};
use crate::error::AlignError;
use crate::sinc::SincTable;
use crate::{coarse, control_filter, preprocess, read, render, sweep, write};

/// Run the full pipeline: read `path_a` (original) and `path_b`
/// (instrumental), align them, and write the rendered 2C-channel WAV to
/// `path_out`. Fatal at any stage per spec §7 — no partial output file is
/// left behind on failure (the output is only opened for writing once
/// rendering has already succeeded).
pub fn run(path_a: &Path, path_b: &Path, path_out: &Path) -> Result<(), AlignError> {
    let raw_a = read::load(path_a, PAD_FRAMES)?;
    let raw_b = read::load(path_b, PAD_FRAMES)?;

    if raw_a.channels() != raw_b.channels() {
        return Err(AlignError::Mismatch {
            field: "channels",
            a: raw_a.channels(),
            b: raw_b.channels(),
        });
    }
    if raw_a.sample_rate() != raw_b.sample_rate() {
        return Err(AlignError::Mismatch {
            field: "sample rate",
            a: raw_a.sample_rate() as usize,
            b: raw_b.sample_rate() as usize,
        });
    }

    let config = PipelineConfig::new(raw_a.channels(), raw_a.sample_rate());
    log::info!(
        "original: {} ({} ch, {} Hz, {} frames)",
        path_a.display(),
        config.channels,
        config.sample_rate,
        raw_a.frames()
    );
    log::info!(
        "instrumental: {} ({} ch, {} Hz, {} frames)",
        path_b.display(),
        config.channels,
        config.sample_rate,
        raw_b.frames()
    );

    let sinc = SincTable::new();

    let search_a = preprocess::prepare_search_domain(&raw_a);
    let search_b = preprocess::prepare_search_domain(&raw_b);

    let anchor = coarse::anchor(raw_a.frames());
    let coarse_shift = coarse::search(&search_a, &search_b, anchor);
    log::info!("coarse anchor {anchor}, shift {coarse_shift} samples");

    let points = sweep::sweep(&search_a, &search_b, anchor, coarse_shift, &sinc);
    log::info!("sweep produced {} raw control points", points.len());

    let filtered = control_filter::filter(points);
    log::info!("{} control points survived filtering", filtered.len());
    if filtered.len() < MIN_CONTROL_POINTS {
        return Err(AlignError::Alignment {
            found: filtered.len(),
            required: MIN_CONTROL_POINTS,
        });
    }

    let rendered = render::render(&raw_a, &raw_b, &filtered, &sinc);
    write::save_wav16(path_out, &rendered, config.channels * 2, config.sample_rate)?;
    log::info!("wrote {}", path_out.display());

    Ok(())
}
