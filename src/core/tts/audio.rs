//! WAV assembly helpers shared by the synthesis engines.
//!
//! Everything here works on 16-bit mono PCM. Provider payloads are decoded
//! to raw samples, concatenated in segment order, and written out as one
//! WAV artifact.

use std::io::Cursor;
use std::path::Path;

use super::base::{SpeechError, SpeechResult};

/// Decode a WAV payload into 16-bit samples, downmixing to mono if needed.
pub fn decode_wav_samples(bytes: &[u8]) -> SpeechResult<(Vec<i16>, u32)> {
    let reader = hound::WavReader::new(Cursor::new(bytes))
        .map_err(|e| SpeechError::Audio(format!("invalid wav payload: {e}")))?;
    let spec = reader.spec();
    let channels = spec.channels as usize;
    if channels == 0 {
        return Err(SpeechError::Audio("wav payload has no channels".to_string()));
    }

    let samples: Vec<i16> = reader
        .into_samples::<i16>()
        .collect::<Result<_, _>>()
        .map_err(|e| SpeechError::Audio(format!("wav sample decode failed: {e}")))?;

    if channels == 1 {
        return Ok((samples, spec.sample_rate));
    }

    let mono = samples
        .chunks(channels)
        .map(|frame| {
            let sum: i32 = frame.iter().map(|&s| s as i32).sum();
            (sum / channels as i32) as i16
        })
        .collect();
    Ok((mono, spec.sample_rate))
}

/// A run of silence at the given sample rate.
pub fn silence(duration_ms: u32, sample_rate: u32) -> Vec<i16> {
    let len = (u64::from(sample_rate) * u64::from(duration_ms) / 1000) as usize;
    vec![0i16; len]
}

/// Write 16-bit mono samples as a WAV file.
pub fn write_mono_wav(path: &Path, samples: &[i16], sample_rate: u32) -> SpeechResult<()> {
    let spec = hound::WavSpec {
        channels: 1,
        sample_rate,
        bits_per_sample: 16,
        sample_format: hound::SampleFormat::Int,
    };
    let mut writer = hound::WavWriter::create(path, spec)
        .map_err(|e| SpeechError::Audio(format!("wav create failed: {e}")))?;
    for &sample in samples {
        writer
            .write_sample(sample)
            .map_err(|e| SpeechError::Audio(format!("wav write failed: {e}")))?;
    }
    writer
        .finalize()
        .map_err(|e| SpeechError::Audio(format!("wav finalize failed: {e}")))?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn encode_wav(samples: &[i16], channels: u16, sample_rate: u32) -> Vec<u8> {
        let spec = hound::WavSpec {
            channels,
            sample_rate,
            bits_per_sample: 16,
            sample_format: hound::SampleFormat::Int,
        };
        let mut cursor = Cursor::new(Vec::new());
        {
            let mut writer = hound::WavWriter::new(&mut cursor, spec).unwrap();
            for &s in samples {
                writer.write_sample(s).unwrap();
            }
            writer.finalize().unwrap();
        }
        cursor.into_inner()
    }

    #[test]
    fn test_decode_mono_round_trip() {
        let original = vec![0i16, 100, -100, 32000];
        let bytes = encode_wav(&original, 1, 24000);
        let (decoded, rate) = decode_wav_samples(&bytes).unwrap();
        assert_eq!(decoded, original);
        assert_eq!(rate, 24000);
    }

    #[test]
    fn test_decode_stereo_downmixes() {
        // Interleaved L/R frames average into mono.
        let bytes = encode_wav(&[100, 300, -50, -150], 2, 24000);
        let (decoded, _) = decode_wav_samples(&bytes).unwrap();
        assert_eq!(decoded, vec![200, -100]);
    }

    #[test]
    fn test_decode_garbage_fails() {
        let result = decode_wav_samples(b"definitely not a wav file");
        assert!(matches!(result, Err(SpeechError::Audio(_))));
    }

    #[test]
    fn test_silence_length() {
        assert_eq!(silence(500, 24000).len(), 12000);
        assert_eq!(silence(0, 24000).len(), 0);
        assert!(silence(500, 24000).iter().all(|&s| s == 0));
    }

    #[test]
    fn test_write_mono_wav() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("out.wav");
        write_mono_wav(&path, &[1, 2, 3, 4], 24000).unwrap();

        let reader = hound::WavReader::open(&path).unwrap();
        assert_eq!(reader.spec().channels, 1);
        assert_eq!(reader.spec().sample_rate, 24000);
        let samples: Vec<i16> = reader.into_samples().map(Result::unwrap).collect();
        assert_eq!(samples, vec![1, 2, 3, 4]);
    }
}
