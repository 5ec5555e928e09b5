//! Symphonia integration for reading audio files.

use crate::buffer::AudioBuffer;
use crate::error::AlignError;
use std::fs::File;
use std::path::Path;
use symphonia::core::audio::{AudioBuffer as SymAudioBuffer, AudioBufferRef, Signal};
use symphonia::core::codecs::{DecoderOptions, CODEC_TYPE_NULL};
use symphonia::core::errors::Error;
use symphonia::core::formats::FormatOptions;
use symphonia::core::io::MediaSourceStream;
use symphonia::core::meta::MetadataOptions;
use symphonia::core::probe::Hint;

/// Load the first track of an audio file, decoding it to an interleaved
/// `f32` [`AudioBuffer`] zero-padded by `pad_frames` beyond its nominal
/// length. Supported formats are anything Symphonia can read.
pub fn load(path: &Path, pad_frames: usize) -> Result<AudioBuffer, AlignError> {
    load_inner(path, pad_frames).map_err(|source| AlignError::Input {
        path: path.to_path_buf(),
        source,
    })
}

fn load_inner(path: &Path, pad_frames: usize) -> symphonia::core::errors::Result<AudioBuffer> {
    let mut hint = Hint::new();
    if let Some(extension) = path.extension().and_then(|e| e.to_str()) {
        hint.with_extension(extension);
    }

    let file = File::open(path).map_err(Error::IoError)?;
    let stream = MediaSourceStream::new(Box::new(file), Default::default());

    let format_opts = FormatOptions {
        enable_gapless: false,
        ..Default::default()
    };
    let metadata_opts = MetadataOptions::default();

    let probed =
        symphonia::default::get_probe().format(&hint, stream, &format_opts, &metadata_opts)?;
    let mut reader = probed.format;

    let track = reader
        .tracks()
        .iter()
        .find(|t| t.codec_params.codec != CODEC_TYPE_NULL)
        .ok_or(Error::DecodeError("no decodable track found"))?;
    let track_id = track.id;

    let decode_opts = DecoderOptions::default();
    let mut decoder = symphonia::default::get_codecs().make(&track.codec_params, &decode_opts)?;

    let mut channels = 0usize;
    let mut sample_rate = 0u32;
    let mut samples: Vec<f32> = Vec::new();

    loop {
        let packet = match reader.next_packet() {
            Ok(packet) => packet,
            Err(Error::IoError(ref err)) if err.kind() == std::io::ErrorKind::UnexpectedEof => {
                break;
            }
            Err(err) => return Err(err),
        };

        if packet.track_id() != track_id {
            continue;
        }

        let decoded = decoder.decode(&packet)?;

        if channels == 0 {
            let spec = *decoded.spec();
            channels = spec.channels.count();
            sample_rate = spec.rate;
        }

        push_interleaved(&decoded, channels, &mut samples);
    }

    if channels == 0 {
        return Err(Error::DecodeError("no audio frames decoded"));
    }

    log::debug!(
        "decoded {}: {} channels, {} Hz, {} frames",
        path.display(),
        channels,
        sample_rate,
        samples.len() / channels
    );

    Ok(AudioBuffer::from_interleaved(
        samples,
        channels,
        sample_rate,
        pad_frames,
    ))
}

/// Append one decoded packet's frames to `out` in `frame * channels + c`
/// interleaved order. Symphonia hands back samples in whatever format the
/// codec produced them in; `convert` (as used by the upstream crate's own
/// file-reading code) brings everything to `f32` planes first, which are
/// then interleaved here.
fn push_interleaved(decoded: &AudioBufferRef, channels: usize, out: &mut Vec<f32>) {
    let frames = decoded.frames();
    let mut dest = SymAudioBuffer::<f32>::new(decoded.capacity() as u64, *decoded.spec());
    dest.render_silence(Some(frames));

    match decoded {
        AudioBufferRef::U8(buf) => buf.convert(&mut dest),
        AudioBufferRef::U16(buf) => buf.convert(&mut dest),
        AudioBufferRef::U24(buf) => buf.convert(&mut dest),
        AudioBufferRef::U32(buf) => buf.convert(&mut dest),
        AudioBufferRef::S8(buf) => buf.convert(&mut dest),
        AudioBufferRef::S16(buf) => buf.convert(&mut dest),
        AudioBufferRef::S24(buf) => buf.convert(&mut dest),
        AudioBufferRef::S32(buf) => buf.convert(&mut dest),
        AudioBufferRef::F32(buf) => buf.convert(&mut dest),
        AudioBufferRef::F64(buf) => buf.convert(&mut dest),
    }

    let base = out.len();
    out.resize(base + frames * channels, 0.0);
    for c in 0..channels {
        let plane = dest.chan(c);
        for i in 0..frames {
            out[base + i * channels + c] = plane[i];
        }
    }
}
