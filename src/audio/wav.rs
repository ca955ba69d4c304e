//! WAV encoding and decoding using hound.

use std::io::Cursor;
use std::path::Path;

use thiserror::Error;

/// Mono audio produced by a synthesis engine.
#[derive(Debug, Clone, PartialEq)]
pub struct Audio {
    pub samples: Vec<f32>,
    pub sample_rate: u32,
}

impl Audio {
    pub fn new(samples: Vec<f32>, sample_rate: u32) -> Self {
        Self { samples, sample_rate }
    }

    /// Playback length in seconds.
    pub fn duration_secs(&self) -> f32 {
        if self.sample_rate == 0 {
            return 0.0;
        }
        self.samples.len() as f32 / self.sample_rate as f32
    }

    pub fn is_empty(&self) -> bool {
        self.samples.is_empty()
    }
}

#[derive(Debug, Error)]
pub enum AudioError {
    #[error("WAV error: {0}")]
    Wav(#[from] hound::Error),

    #[error("unsupported bits per sample: {0}")]
    UnsupportedBitDepth(u16),
}

/// Write audio as a mono 32-bit float WAV file.
pub fn write_wav(path: &Path, audio: &Audio) -> Result<(), AudioError> {
    let spec = hound::WavSpec {
        channels: 1,
        sample_rate: audio.sample_rate,
        bits_per_sample: 32,
        sample_format: hound::SampleFormat::Float,
    };

    let mut writer = hound::WavWriter::create(path, spec)?;
    for &sample in &audio.samples {
        writer.write_sample(sample)?;
    }
    writer.finalize()?;
    Ok(())
}

/// Mix interleaved samples down to mono by averaging each frame.
fn convert_to_mono_f32(data: &[f32], channels: usize) -> Vec<f32> {
    if channels <= 1 {
        data.to_vec()
    } else {
        data.chunks(channels).map(|frame| frame.iter().sum::<f32>() / channels as f32).collect()
    }
}

/// Decode an in-memory WAV file into mono f32 samples.
///
/// Integer PCM is scaled into [-1.0, 1.0]; multi-channel input is mixed down.
pub fn decode_wav(bytes: &[u8]) -> Result<Audio, AudioError> {
    let mut reader = hound::WavReader::new(Cursor::new(bytes))?;
    let spec = reader.spec();

    let samples: Vec<f32> = match spec.sample_format {
        hound::SampleFormat::Float => reader.samples::<f32>().collect::<Result<Vec<f32>, _>>()?,
        hound::SampleFormat::Int => {
            let bits = spec.bits_per_sample;
            if bits == 0 || bits > 32 {
                return Err(AudioError::UnsupportedBitDepth(bits));
            }
            let max_value = (1i64 << (bits - 1)) as f32;
            reader.samples::<i32>().map(|s| s.map(|s| s as f32 / max_value)).collect::<Result<Vec<f32>, _>>()?
        }
    };

    Ok(Audio::new(convert_to_mono_f32(&samples, spec.channels as usize), spec.sample_rate))
}
