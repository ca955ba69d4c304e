//! HTTP client for an out-of-process Parler-TTS inference server.
//!
//! POST {base_url}/v1/tts
//! Request: {"description": "...", "prompt": "..."} (JSON)
//! Response: audio/wav body

use std::time::Duration;

use async_trait::async_trait;
use reqwest::Client;
use serde::Serialize;
use tracing::{debug, info};

use super::engine::{SpeechEngine, SynthesisError};
use crate::audio::{Audio, decode_wav};

#[derive(Debug, Serialize)]
struct SynthesisRequest<'a> {
    description: &'a str,
    prompt: &'a str,
}

/// Connection settings for [`HttpEngine`].
#[derive(Debug, Clone, PartialEq)]
pub struct HttpEngineConfig {
    pub base_url: String,
    pub timeout_secs: u64,
}

impl Default for HttpEngineConfig {
    fn default() -> Self {
        Self { base_url: "http://localhost:8000".to_string(), timeout_secs: 300 }
    }
}

impl HttpEngineConfig {
    pub fn new(base_url: impl Into<String>) -> Self {
        Self { base_url: base_url.into(), ..Default::default() }
    }

    pub fn with_timeout(mut self, secs: u64) -> Self {
        self.timeout_secs = secs;
        self
    }
}

/// Speech engine backed by a Parler-TTS HTTP server.
pub struct HttpEngine {
    client: Client,
    config: HttpEngineConfig,
}

impl HttpEngine {
    /// Create a new HTTP engine client.
    ///
    /// # Errors
    /// Returns an error if the HTTP client cannot be constructed.
    pub fn new(config: HttpEngineConfig) -> Result<Self, SynthesisError> {
        let client = Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()
            .map_err(|e| SynthesisError::Network(e.to_string()))?;

        Ok(Self { client, config })
    }

    fn synthesize_url(&self) -> String {
        format!("{}/v1/tts", self.config.base_url.trim_end_matches('/'))
    }

    fn health_url(&self) -> String {
        format!("{}/health", self.config.base_url.trim_end_matches('/'))
    }

    /// Check whether the server answers its health endpoint.
    pub async fn health_check(&self) -> bool {
        match self.client.get(self.health_url()).timeout(Duration::from_secs(5)).send().await {
            Ok(response) => response.status().is_success(),
            Err(_) => false,
        }
    }
}

#[async_trait]
impl SpeechEngine for HttpEngine {
    async fn synthesize(&self, description: &str, text: &str) -> Result<Audio, SynthesisError> {
        let url = self.synthesize_url();
        debug!("POST {} (prompt {} chars)", url, text.len());

        let response = self
            .client
            .post(&url)
            .json(&SynthesisRequest { description, prompt: text })
            .send()
            .await
            .map_err(|e| {
                if e.is_timeout() {
                    SynthesisError::Timeout
                } else if e.is_connect() {
                    SynthesisError::Network(format!("cannot connect to TTS server at {}: {}", self.config.base_url, e))
                } else {
                    SynthesisError::Network(e.to_string())
                }
            })?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(SynthesisError::Service { status: status.as_u16(), body });
        }

        let bytes = response.bytes().await.map_err(|e| SynthesisError::Network(format!("failed to read audio: {}", e)))?;
        let audio = decode_wav(&bytes)?;
        if audio.is_empty() {
            return Err(SynthesisError::Empty);
        }

        info!("Received {} samples at {} Hz", audio.samples.len(), audio.sample_rate);
        Ok(audio)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_config_default() {
        let config = HttpEngineConfig::default();
        assert_eq!(config.base_url, "http://localhost:8000");
        assert_eq!(config.timeout_secs, 300);
    }

    #[test]
    fn test_config_builder() {
        let config = HttpEngineConfig::new("http://gpu-box:9000").with_timeout(60);
        assert_eq!(config.base_url, "http://gpu-box:9000");
        assert_eq!(config.timeout_secs, 60);
    }

    #[test]
    fn test_urls_ignore_trailing_slash() {
        let engine = HttpEngine::new(HttpEngineConfig::new("http://localhost:8000/")).unwrap();
        assert_eq!(engine.synthesize_url(), "http://localhost:8000/v1/tts");
        assert_eq!(engine.health_url(), "http://localhost:8000/health");
    }

    #[test]
    fn test_request_body_shape() {
        let body = serde_json::to_value(SynthesisRequest { description: "Jon's voice is calm.", prompt: "Hi" }).unwrap();
        assert_eq!(body, serde_json::json!({"description": "Jon's voice is calm.", "prompt": "Hi"}));
    }

    fn wav_body(samples: &[f32], sample_rate: u32) -> Vec<u8> {
        let spec = hound::WavSpec { channels: 1, sample_rate, bits_per_sample: 32, sample_format: hound::SampleFormat::Float };
        let mut bytes = Vec::new();
        {
            let mut writer = hound::WavWriter::new(std::io::Cursor::new(&mut bytes), spec).unwrap();
            for &sample in samples {
                writer.write_sample(sample).unwrap();
            }
            writer.finalize().unwrap();
        }
        bytes
    }

    fn engine_for(server: &mockito::Server) -> HttpEngine {
        HttpEngine::new(HttpEngineConfig::new(server.url()).with_timeout(10)).unwrap()
    }

    #[tokio::test]
    async fn test_synthesize_decodes_wav_body() {
        let mut server = mockito::Server::new_async().await;
        let mock = server
            .mock("POST", "/v1/tts")
            .match_body(mockito::Matcher::Json(serde_json::json!({"description": "Jon's voice is calm.", "prompt": "Hello"})))
            .with_status(200)
            .with_header("content-type", "audio/wav")
            .with_body(wav_body(&[0.25, -0.5, 0.0], 44100))
            .create_async()
            .await;

        let audio = engine_for(&server).synthesize("Jon's voice is calm.", "Hello").await.unwrap();

        assert_eq!(audio, Audio::new(vec![0.25, -0.5, 0.0], 44100));
        mock.assert_async().await;
    }

    #[tokio::test]
    async fn test_synthesize_maps_error_status() {
        let mut server = mockito::Server::new_async().await;
        let mock = server.mock("POST", "/v1/tts").with_status(500).with_body("model not loaded").create_async().await;

        let err = engine_for(&server).synthesize("Lea's voice", "Hello").await.unwrap_err();

        match err {
            SynthesisError::Service { status, body } => {
                assert_eq!(status, 500);
                assert_eq!(body, "model not loaded");
            }
            other => panic!("unexpected error: {other}"),
        }
        mock.assert_async().await;
    }

    #[tokio::test]
    async fn test_synthesize_rejects_empty_audio() {
        let mut server = mockito::Server::new_async().await;
        let mock = server.mock("POST", "/v1/tts").with_status(200).with_body(wav_body(&[], 24000)).create_async().await;

        let err = engine_for(&server).synthesize("Lea's voice", "Hello").await.unwrap_err();

        assert!(matches!(err, SynthesisError::Empty), "{err}");
        mock.assert_async().await;
    }

    #[tokio::test]
    async fn test_synthesize_rejects_non_wav_body() {
        let mut server = mockito::Server::new_async().await;
        let _mock = server.mock("POST", "/v1/tts").with_status(200).with_body("<html>oops</html>").create_async().await;

        let err = engine_for(&server).synthesize("Lea's voice", "Hello").await.unwrap_err();

        assert!(matches!(err, SynthesisError::InvalidAudio(_)), "{err}");
    }

    #[tokio::test]
    async fn test_unreachable_server_is_network_error() {
        let engine = HttpEngine::new(HttpEngineConfig::new("http://127.0.0.1:1").with_timeout(5)).unwrap();
        assert!(!engine.health_check().await);
        let err = engine.synthesize("A person's voice", "hello").await.unwrap_err();
        assert!(matches!(err, SynthesisError::Network(_) | SynthesisError::Timeout), "{err}");
    }
}
