//! Voice persona registry and sample generation for Parler-TTS.
//!
//! The [`voices`] registry maps a requested sex, name or rank to a named
//! speaker persona with deterministic ranking and per-sex fallbacks. The
//! [`tts`] module turns a persona into a speaker description and drives an
//! external speech engine.

pub mod audio;
pub mod config;
pub mod shutdown;
pub mod tts;
pub mod voices;
