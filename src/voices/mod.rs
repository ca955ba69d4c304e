//! Voice registry mapping a requested sex, name or rank to a speaker persona.
//!
//! Built once from static tables and read-only afterwards.

mod listing;
mod persona;
mod registry;
mod sex;
pub mod table;

pub use listing::{format_voices, print_voice_info, print_voices};
pub use persona::Persona;
pub use registry::{RegistryError, VoiceRegistry, registry};
pub use sex::{ParseSexError, Sex};
pub use table::{STANDARD, VoiceTable};
