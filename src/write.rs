//! 16-bit PCM WAV file writing.
//!
//! Carried over from the upstream DSP crate's `write_wav16` almost
//! unchanged; the only generalization is that the renderer's output here
//! already has `2 * channels` interleaved channels (time-warped
//! instrumental plus original), where the upstream function wrote a
//! single wave's own channel count.

use crate::error::AlignError;
use crate::math::{clamp11, round};
use std::fs::File;
use std::io::prelude::*;
use std::io::BufWriter;
use std::path::Path;

/// Write a 32-bit value, little endian.
#[inline]
fn write32<W: Write>(writer: &mut W, x: u32) -> std::io::Result<()> {
    writer.write_all(&[x as u8, (x >> 8) as u8, (x >> 16) as u8, (x >> 24) as u8])
}

/// Write a 16-bit value, little endian.
#[inline]
fn write16<W: Write>(writer: &mut W, x: u16) -> std::io::Result<()> {
    writer.write_all(&[x as u8, (x >> 8) as u8])
}

fn write_wav_header<W: Write>(
    writer: &mut W,
    data_length: usize,
    channels: usize,
    sample_rate: u32,
) -> std::io::Result<()> {
    writer.write_all(b"RIFF")?;
    write32(writer, data_length as u32 + 36)?;
    writer.write_all(b"WAVE")?;
    writer.write_all(b"fmt ")?;
    write32(writer, 16)?;
    // WAVE_FORMAT_PCM.
    write16(writer, 1)?;
    write16(writer, channels as u16)?;
    write32(writer, sample_rate)?;
    let sample_bytes = 2u32;
    write32(writer, sample_rate * channels as u32 * sample_bytes)?;
    write16(writer, (channels as u32 * sample_bytes) as u16)?;
    write16(writer, (sample_bytes * 8) as u16)?;
    writer.write_all(b"data")?;
    write32(writer, data_length as u32)?;
    Ok(())
}

/// Write interleaved `f32` samples (already in `-1...1`) as a 16-bit PCM
/// WAV file. Samples are clipped to `-1...1` before quantization.
pub fn save_wav16(path: &Path, samples: &[f32], channels: usize, sample_rate: u32) -> Result<(), AlignError> {
    save_wav16_inner(path, samples, channels, sample_rate).map_err(|source| AlignError::Output {
        path: path.to_path_buf(),
        source,
    })
}

fn save_wav16_inner(
    path: &Path,
    samples: &[f32],
    channels: usize,
    sample_rate: u32,
) -> std::io::Result<()> {
    assert!(channels > 0);
    assert_eq!(samples.len() % channels, 0);
    let frames = samples.len() / channels;

    let file = File::create(path)?;
    let mut writer = BufWriter::new(file);
    write_wav_header(&mut writer, 2 * channels * frames, channels, sample_rate)?;
    for &sample in samples {
        let quantized = round((clamp11(sample) as f64) * 32767.49);
        write16(&mut writer, (quantized as i16) as u16)?;
    }
    writer.flush()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn roundtrip_header_sizes() {
        let dir = std::env::temp_dir();
        let path = dir.join("vocalign_write_test.wav");
        let samples = vec![0.0f32, 0.5, -0.5, 1.0, -1.0, 0.25, -0.25, 0.0];
        save_wav16(&path, &samples, 2, 48_000).unwrap();
        let data = std::fs::read(&path).unwrap();
        assert_eq!(&data[0..4], b"RIFF");
        assert_eq!(&data[8..12], b"WAVE");
        let declared_size = u32::from_le_bytes([data[4], data[5], data[6], data[7]]);
        assert_eq!(declared_size as usize, data.len() - 8);
        std::fs::remove_file(&path).ok();
    }
}
