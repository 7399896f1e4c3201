//! Compressed-audio decoding (MP3, M4A) via symphonia.
//!
//! Whisper consumes 16kHz mono i16 PCM; this module turns any supported
//! upload into that shape. WAV goes through `hound` directly, the compressed
//! containers through a symphonia probe + decode loop.

use crate::audio::intake::AudioFormat;
use crate::audio::wav::{read_wav, resample};
use crate::defaults::SAMPLE_RATE;
use crate::error::{LecternError, Result};
use std::fs::File;
use std::path::Path;

use symphonia::core::audio::SampleBuffer;
use symphonia::core::codecs::DecoderOptions;
use symphonia::core::formats::FormatOptions;
use symphonia::core::io::MediaSourceStream;
use symphonia::core::meta::MetadataOptions;
use symphonia::core::probe::Hint;

/// Decode an uploaded audio file into 16kHz mono i16 samples.
pub fn decode_to_samples(path: &Path, format: AudioFormat) -> Result<Vec<i16>> {
    match format {
        AudioFormat::Wav => {
            let file = File::open(path).map_err(|e| LecternError::AudioDecode {
                message: format!("could not open {}: {e}", path.display()),
            })?;
            read_wav(Box::new(file))
        }
        AudioFormat::Mp3 | AudioFormat::M4a => decode_compressed(path, format),
    }
}

fn decode_compressed(path: &Path, format: AudioFormat) -> Result<Vec<i16>> {
    let file = File::open(path).map_err(|e| LecternError::AudioDecode {
        message: format!("could not open {}: {e}", path.display()),
    })?;
    let mss = MediaSourceStream::new(Box::new(file), Default::default());

    let mut hint = Hint::new();
    hint.with_extension(format.extension());

    let probed = symphonia::default::get_probe()
        .format(
            &hint,
            mss,
            &FormatOptions::default(),
            &MetadataOptions::default(),
        )
        .map_err(|e| LecternError::AudioDecode {
            message: format!("probe failed: {e}"),
        })?;

    let mut reader = probed.format;

    // Find the first audio track
    let track = reader
        .tracks()
        .iter()
        .find(|t| t.codec_params.codec != symphonia::core::codecs::CODEC_TYPE_NULL)
        .ok_or_else(|| LecternError::AudioDecode {
            message: "no audio track found".to_string(),
        })?;

    let codec_params = track.codec_params.clone();
    let track_id = track.id;
    let source_rate = codec_params.sample_rate.unwrap_or(SAMPLE_RATE);
    let channels = codec_params.channels.map_or(1, |c| c.count());

    let mut decoder = symphonia::default::get_codecs()
        .make(&codec_params, &DecoderOptions::default())
        .map_err(|e| LecternError::AudioDecode {
            message: format!("codec init failed: {e}"),
        })?;

    let mut mono: Vec<f32> = Vec::new();

    loop {
        let packet = match reader.next_packet() {
            Ok(p) => p,
            Err(symphonia::core::errors::Error::IoError(ref e))
                if e.kind() == std::io::ErrorKind::UnexpectedEof =>
            {
                break;
            }
            Err(e) => {
                return Err(LecternError::AudioDecode {
                    message: format!("packet read: {e}"),
                });
            }
        };

        if packet.track_id() != track_id {
            continue;
        }

        let decoded = decoder.decode(&packet).map_err(|e| LecternError::AudioDecode {
            message: format!("decode: {e}"),
        })?;

        let spec = *decoded.spec();
        let n_frames = decoded.capacity();
        let mut sample_buf = SampleBuffer::<f32>::new(n_frames as u64, spec);
        sample_buf.copy_interleaved_ref(decoded);
        let samples = sample_buf.samples();

        // Mix to mono
        if channels > 1 {
            for chunk in samples.chunks(channels) {
                let avg: f32 = chunk.iter().sum::<f32>() / channels as f32;
                mono.push(avg);
            }
        } else {
            mono.extend_from_slice(samples);
        }
    }

    if mono.is_empty() {
        return Err(LecternError::AudioDecode {
            message: "no audio samples decoded".to_string(),
        });
    }

    let pcm: Vec<i16> = mono
        .iter()
        .map(|&s| (s.clamp(-1.0, 1.0) * 32767.0) as i16)
        .collect();

    if source_rate != SAMPLE_RATE {
        Ok(resample(&pcm, source_rate, SAMPLE_RATE))
    } else {
        Ok(pcm)
    }
}
