//! Audio file handling for synthesized speech.
//!
//! Engines hand back WAV bytes; generated samples are written as WAV files.

mod wav;

pub use wav::{Audio, AudioError, decode_wav, write_wav};
