//! Parler Voices - generate speech samples from ranked Parler-TTS speakers.
//!
//! Lists the speaker registry, or resolves a persona and sends its
//! description to a Parler-TTS server, writing the result as WAV.

use std::sync::Arc;

use anyhow::{Context, Result};
use tracing::{error, info, warn};
use tracing_subscriber::EnvFilter;
use tracing_subscriber::fmt::time::LocalTime;

use parler_voices::config::{AppConfig, Command};
use parler_voices::shutdown::{Shutdown, wait_for_signal};
use parler_voices::tts::{Generator, HttpEngine, select_persona};
use parler_voices::voices::{self, VoiceRegistry};

async fn run(config: AppConfig, registry: &'static VoiceRegistry) -> Result<()> {
    let sex = config.command.sex();

    match &config.command {
        Command::List { .. } => {
            voices::print_voices(registry, sex);
            return Ok(());
        }
        Command::Info { name, .. } => {
            voices::print_voice_info(registry, name, sex);
            return Ok(());
        }
        Command::Generate { .. } | Command::GenerateAll { .. } => {}
    }

    config.log_config();

    let engine = HttpEngine::new(config.engine_config()).context("Failed to create TTS client")?;
    if !engine.health_check().await {
        warn!("TTS server at {} did not answer its health check", config.endpoint);
    }
    let generator = Generator::new(engine, config.description.clone());

    let shutdown = Arc::new(Shutdown::new());
    let signal_task = tokio::spawn(wait_for_signal(shutdown.clone()));

    let result = match &config.command {
        Command::Generate { text, name, index, output, .. } => {
            let persona = select_persona(registry, sex, name.as_deref(), *index);
            match shutdown.run_until(generator.generate_one(persona, text, Some(output.as_path()))).await {
                Some(result) => result.map(|_| ()),
                None => {
                    info!("🛑 Generation cancelled");
                    Ok(())
                }
            }
        }
        Command::GenerateAll { text, output_dir, .. } => {
            let summary = generator.generate_all(registry, sex, text, output_dir, shutdown.flag()).await?;
            info!("✅ Wrote {} file(s) to {}", summary.written.len(), output_dir.display());
            if !summary.failed.is_empty() {
                warn!("{} voice(s) failed: {}", summary.failed.len(), summary.failed.join(", "));
            }
            Ok(())
        }
        Command::List { .. } | Command::Info { .. } => Ok(()),
    };

    signal_task.abort();
    result
}

#[tokio::main]
async fn main() -> Result<()> {
    // Parse command line arguments
    let config = AppConfig::from_args();

    // Respect RUST_LOG env var, fallback to verbose flag, default to info
    let filter = EnvFilter::try_from_default_env()
        .or_else(|_| if config.verbose { EnvFilter::try_new("debug") } else { EnvFilter::try_new("info") })
        .context("Invalid log filter")?;

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_timer(LocalTime::new(time::macros::format_description!("[hour]:[minute]:[second]")))
        .init();

    // Validate configuration
    if let Err(e) = config.validate() {
        error!("❌ Configuration error: {}", e);
        std::process::exit(1);
    }

    let registry = match voices::registry() {
        Ok(registry) => registry,
        Err(e) => {
            error!("❌ Voice table is invalid: {}", e);
            std::process::exit(1);
        }
    };

    run(config, registry).await
}
