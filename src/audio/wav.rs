//! WAV decoding to 16kHz mono samples.

use crate::defaults::SAMPLE_RATE;
use crate::error::{LecternError, Result};
use std::io::Read;

/// Read a WAV stream into 16kHz mono i16 samples.
/// Supports arbitrary sample rates and channels, resampling to 16kHz.
pub fn read_wav(reader: Box<dyn Read + Send>) -> Result<Vec<i16>> {
    let mut wav_reader = hound::WavReader::new(reader).map_err(|e| LecternError::AudioDecode {
        message: format!("Failed to parse WAV file: {}", e),
    })?;

    let spec = wav_reader.spec();
    let source_rate = spec.sample_rate;
    let source_channels = spec.channels;

    let raw_samples: Vec<i16> = wav_reader
        .samples::<i16>()
        .collect::<std::result::Result<Vec<_>, _>>()
        .map_err(|e| LecternError::AudioDecode {
            message: format!("Failed to read WAV samples: {}", e),
        })?;

    // Convert to mono if stereo
    let mono_samples = if source_channels == 2 {
        raw_samples
            .chunks_exact(2)
            .map(|chunk| {
                let left = chunk[0] as i32;
                let right = chunk[1] as i32;
                ((left + right) / 2) as i16
            })
            .collect()
    } else {
        raw_samples
    };

    // Resample to 16kHz if needed
    let samples = if source_rate != SAMPLE_RATE {
        resample(&mono_samples, source_rate, SAMPLE_RATE)
    } else {
        mono_samples
    };

    Ok(samples)
}

/// Simple linear interpolation resampling.
///
/// Good enough for speech-to-text input; whisper is tolerant of the mild
/// aliasing this introduces.
pub(crate) fn resample(samples: &[i16], from_rate: u32, to_rate: u32) -> Vec<i16> {
    if from_rate == to_rate {
        return samples.to_vec();
    }

    let ratio = from_rate as f64 / to_rate as f64;
    let output_len = (samples.len() as f64 / ratio).ceil() as usize;

    (0..output_len)
        .map(|i| {
            let source_pos = i as f64 * ratio;
            let source_idx = source_pos.floor() as usize;
            let fraction = source_pos - source_idx as f64;

            if source_idx + 1 >= samples.len() {
                samples[source_idx.min(samples.len().saturating_sub(1))]
            } else {
                let left = samples[source_idx] as f64;
                let right = samples[source_idx + 1] as f64;
                (left + (right - left) * fraction) as i16
            }
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Cursor;

    fn make_wav_data(sample_rate: u32, channels: u16, samples: &[i16]) -> Vec<u8> {
        let mut cursor = Cursor::new(Vec::new());
        let spec = hound::WavSpec {
            channels,
            sample_rate,
            bits_per_sample: 16,
            sample_format: hound::SampleFormat::Int,
        };
        let mut writer = hound::WavWriter::new(&mut cursor, spec).unwrap();
        for &s in samples {
            writer.write_sample(s).unwrap();
        }
        writer.finalize().unwrap();
        cursor.into_inner()
    }

    #[test]
    fn read_wav_16khz_mono_matches_exactly() {
        let input_samples = vec![100i16, 200, 300, 400, 500];
        let wav_data = make_wav_data(16000, 1, &input_samples);

        let samples = read_wav(Box::new(Cursor::new(wav_data))).unwrap();

        assert_eq!(samples, input_samples);
    }

    #[test]
    fn read_wav_16khz_stereo_downmixes_to_mono() {
        // Stereo pairs: (100, 200), (300, 400), (500, 600)
        let stereo_samples = vec![100i16, 200, 300, 400, 500, 600];
        let wav_data = make_wav_data(16000, 2, &stereo_samples);

        let samples = read_wav(Box::new(Cursor::new(wav_data))).unwrap();

        // Expected mono: (100+200)/2=150, (300+400)/2=350, (500+600)/2=550
        assert_eq!(samples, vec![150i16, 350, 550]);
    }

    #[test]
    fn read_wav_48khz_mono_resamples_to_16khz() {
        let input_samples = vec![0i16; 48000]; // 1 second at 48kHz
        let wav_data = make_wav_data(48000, 1, &input_samples);

        let samples = read_wav(Box::new(Cursor::new(wav_data))).unwrap();

        assert!(samples.len() >= 15900 && samples.len() <= 16100);
    }

    #[test]
    fn read_wav_44100hz_mono_resamples_correctly() {
        let input_samples = vec![1000i16; 44100]; // 1 second at 44.1kHz
        let wav_data = make_wav_data(44100, 1, &input_samples);

        let samples = read_wav(Box::new(Cursor::new(wav_data))).unwrap();

        assert!(samples.len() >= 15900 && samples.len() <= 16100);
        // Values should be close to original
        assert!(samples.iter().all(|&s| (900..=1100).contains(&s)));
    }

    #[test]
    fn invalid_wav_data_returns_error() {
        let invalid_data = vec![0u8, 1, 2, 3, 4, 5];

        let result = read_wav(Box::new(Cursor::new(invalid_data)));

        assert!(result.is_err());
        match result {
            Err(LecternError::AudioDecode { message }) => {
                assert!(message.contains("Failed to parse WAV file"));
            }
            _ => panic!("Expected AudioDecode error"),
        }
    }

    #[test]
    fn empty_wav_data_returns_error() {
        let result = read_wav(Box::new(Cursor::new(Vec::new())));
        assert!(result.is_err());
    }

    #[test]
    fn resample_identity_same_rate() {
        let samples = vec![100i16, 200, 300, 400, 500];
        assert_eq!(resample(&samples, 16000, 16000), samples);
    }

    #[test]
    fn resample_upsample_verification() {
        let samples = vec![0i16, 1000, 2000];
        let resampled = resample(&samples, 8000, 16000);

        // Upsampling from 8kHz to 16kHz should double the sample count
        assert_eq!(resampled.len(), 6);

        // Values should be interpolated
        assert_eq!(resampled[0], 0);
        assert!(resampled[1] > 0 && resampled[1] < 1000);
        assert_eq!(resampled[2], 1000);
    }

    #[test]
    fn resample_downsample_verification() {
        let samples = vec![0i16; 3200]; // 200ms at 16kHz
        let resampled = resample(&samples, 16000, 8000);
        assert_eq!(resampled.len(), 1600);
    }

    #[test]
    fn resample_handles_edge_cases() {
        let empty = resample(&[], 16000, 8000);
        assert_eq!(empty.len(), 0);

        let single = resample(&[100i16], 16000, 8000);
        assert_eq!(single.len(), 1);
        assert_eq!(single[0], 100);
    }

    #[test]
    fn stereo_downmix_handles_negative_values() {
        // Stereo pairs with negative values: (-100, 100), (300, -300)
        let stereo_samples = vec![-100i16, 100, 300, -300];
        let wav_data = make_wav_data(16000, 2, &stereo_samples);

        let samples = read_wav(Box::new(Cursor::new(wav_data))).unwrap();

        assert_eq!(samples, vec![0i16, 0]);
    }

    #[test]
    fn malformed_wav_missing_riff_header() {
        let bad_data = b"XXXX\x00\x00\x00\x00WAVEfmt ";
        let result = read_wav(Box::new(Cursor::new(bad_data.to_vec())));
        assert!(result.is_err(), "Should reject WAV without RIFF header");
    }

    #[test]
    fn malformed_wav_all_zeros() {
        let zeros = vec![0u8; 1000];
        let result = read_wav(Box::new(Cursor::new(zeros)));
        assert!(result.is_err(), "Should reject all-zero data");
    }
}
