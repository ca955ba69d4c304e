//! Text-to-speech generation for voice personas.
//!
//! The engine itself runs out of process; this module builds speaker
//! descriptions, calls the engine and writes the resulting samples.

mod engine;
mod generator;
mod http;

pub use engine::{SpeechEngine, SynthesisError};
pub use generator::{DEFAULT_DESCRIPTION, GenerationSummary, Generator, sample_file_name, select_persona};
pub use http::{HttpEngine, HttpEngineConfig};
