//! Application configuration and CLI argument parsing.

use std::path::PathBuf;

use anyhow::Result;
use clap::{Parser, Subcommand};
use serde::{Deserialize, Serialize};
use tracing::info;

use crate::tts::HttpEngineConfig;
use crate::voices::Sex;

/// Voice sample generator configuration.
#[derive(Parser, Debug, Clone, Serialize, Deserialize)]
#[command(name = "parler-voices")]
#[command(author, version, about = "Parler-TTS voice persona generator", long_about = None)]
pub struct AppConfig {
    /// Parler-TTS server base URL
    #[arg(long, short = 'e', global = true, env = "PARLER_TTS_URL", default_value = "http://localhost:8000")]
    pub endpoint: String,

    /// Request timeout in seconds (generation is slow on CPU)
    #[arg(long, global = true, default_value = "300")]
    pub timeout_secs: u64,

    /// Speaking style appended to "<name>'s voice"
    #[arg(long, short = 'D', global = true)]
    pub description: Option<String>,

    /// Enable verbose logging
    #[arg(long, short = 'v', global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug, Clone, Serialize, Deserialize)]
pub enum Command {
    /// List available voices by rank
    List {
        /// Which voices to list (male, female, either)
        #[arg(long, default_value = "either")]
        sex: String,
    },

    /// Show details for one voice
    Info {
        /// Voice name
        name: String,

        /// View to resolve the name in (male, female, either)
        #[arg(long, default_value = "either")]
        sex: String,
    },

    /// Generate speech with a single voice
    Generate {
        /// Text to convert to speech
        text: String,

        /// Name of the voice to use
        #[arg(long)]
        name: Option<String>,

        /// Rank of the voice to use (negative selects the default voice)
        #[arg(long, allow_negative_numbers = true)]
        index: Option<i64>,

        /// Voice sex (male, female, either)
        #[arg(long, default_value = "female")]
        sex: String,

        /// Output file path
        #[arg(long, short = 'o', default_value = "output.wav")]
        output: PathBuf,
    },

    /// Generate speech once per voice
    GenerateAll {
        /// Text to convert to speech
        text: String,

        /// Voice sex (male, female, either)
        #[arg(long, default_value = "female")]
        sex: String,

        /// Output directory
        #[arg(long, short = 'o', default_value = "voices")]
        output_dir: PathBuf,
    },
}

impl Command {
    /// Requested voice sex, leniently parsed.
    pub fn sex(&self) -> Sex {
        match self {
            Command::List { sex } | Command::Info { sex, .. } | Command::Generate { sex, .. } | Command::GenerateAll { sex, .. } => Sex::from_preference(sex),
        }
    }

    fn text(&self) -> Option<&str> {
        match self {
            Command::Generate { text, .. } | Command::GenerateAll { text, .. } => Some(text),
            Command::List { .. } | Command::Info { .. } => None,
        }
    }
}

impl AppConfig {
    /// Parse configuration from command line arguments.
    pub fn from_args() -> Self {
        Self::parse()
    }

    /// Connection settings for the speech engine.
    pub fn engine_config(&self) -> HttpEngineConfig {
        HttpEngineConfig::new(self.endpoint.clone()).with_timeout(self.timeout_secs)
    }

    /// Whether the command talks to the speech engine.
    pub fn needs_engine(&self) -> bool {
        self.command.text().is_some()
    }

    /// Validate the configuration.
    pub fn validate(&self) -> Result<()> {
        if let Some(text) = self.command.text()
            && text.trim().is_empty()
        {
            anyhow::bail!("Text to synthesize must not be empty");
        }

        if self.needs_engine() {
            if !(self.endpoint.starts_with("http://") || self.endpoint.starts_with("https://")) {
                anyhow::bail!("Endpoint must be an http:// or https:// URL: {}", self.endpoint);
            }

            if self.timeout_secs == 0 {
                anyhow::bail!("Timeout must be positive");
            }
        }

        if let Some(ref description) = self.description
            && description.trim().is_empty()
        {
            anyhow::bail!("Description must not be empty");
        }

        Ok(())
    }

    /// Log the current configuration.
    pub fn log_config(&self) {
        info!("Configuration:");
        info!("  Endpoint: {}", self.endpoint);
        info!("  Timeout: {}s", self.timeout_secs);
        if let Some(ref description) = self.description {
            info!("  Description: {}...", description.chars().take(50).collect::<String>());
        }
        info!("  Voice sex: {}", self.command.sex());
        match &self.command {
            Command::Generate { name, index, output, .. } => {
                if let Some(name) = name {
                    info!("  Voice name: {}", name);
                }
                if let Some(index) = index {
                    info!("  Voice index: {}", index);
                }
                info!("  Output: {}", output.display());
            }
            Command::GenerateAll { output_dir, .. } => info!("  Output directory: {}", output_dir.display()),
            Command::List { .. } | Command::Info { .. } => {}
        }
    }
}
