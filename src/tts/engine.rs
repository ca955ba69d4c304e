//! Speech engine abstraction.

use async_trait::async_trait;
use thiserror::Error;

use crate::audio::{Audio, AudioError};

#[derive(Debug, Error)]
pub enum SynthesisError {
    #[error("network error: {0}")]
    Network(String),

    #[error("request timed out")]
    Timeout,

    #[error("service error (HTTP {status}): {body}")]
    Service { status: u16, body: String },

    #[error("invalid audio in response: {0}")]
    InvalidAudio(#[from] AudioError),

    #[error("engine returned no audio")]
    Empty,
}

/// A text-to-speech engine driven by a free-text speaker description.
///
/// Parler-TTS style engines pick the voice from `description` (which names
/// the speaker) and speak `text`.
#[async_trait]
pub trait SpeechEngine: Send + Sync {
    async fn synthesize(&self, description: &str, text: &str) -> Result<Audio, SynthesisError>;
}
