//! Console listing of the ranked voice views.

use std::fmt::Write;

use super::{Persona, Sex, VoiceRegistry};

fn score_label(persona: &Persona) -> String {
    persona.score().map_or_else(|| "-".to_string(), |score| format!("{score:.6}"))
}

/// Render the ranked view for `sex`. `Either` renders the male and female
/// views followed by the full ranking.
pub fn format_voices(registry: &VoiceRegistry, sex: Sex) -> String {
    let sections: &[Sex] = match sex {
        Sex::Either => &[Sex::Male, Sex::Female, Sex::Either],
        Sex::Male => &[Sex::Male],
        Sex::Female => &[Sex::Female],
    };

    let mut out = String::new();
    let _ = writeln!(out, "═══════════════════════════════════════════════════════════════════");
    let _ = writeln!(out, "  Parler-TTS speakers - {} voices", registry.len());
    let _ = writeln!(out, "═══════════════════════════════════════════════════════════════════");

    for &section in sections {
        let ranked = registry.ranked(section);
        let _ = writeln!(out, "\n── {} ({} voices) ──", section, ranked.len());
        let _ = writeln!(out, "{:<6} {:<12} SCORE", "INDEX", "VOICE");
        let _ = writeln!(out, "{}", "─".repeat(40));

        for (i, persona) in ranked.enumerate() {
            let _ = writeln!(out, "[{:<3}]  {:<12} {}", i, persona.name(), score_label(persona));
        }
    }

    let _ = writeln!(out, "\nDefaults: {} / {} / {}", registry.default_persona(Sex::Male).name(), registry.default_persona(Sex::Female).name(), registry.default_persona(Sex::Either).name());
    out
}

/// Print the ranked view for `sex`.
pub fn print_voices(registry: &VoiceRegistry, sex: Sex) {
    print!("{}", format_voices(registry, sex));
    println!();
    println!("Usage:");
    println!("  parler-voices generate \"Hello there\" --sex male --index 0");
    println!("  parler-voices generate-all \"Hello there\" --sex female");
}

/// Print details for one voice as it resolves within `sex`.
pub fn print_voice_info(registry: &VoiceRegistry, name: &str, sex: Sex) {
    let persona = registry.resolve(name, sex);

    println!();
    if persona.name() != name {
        println!("Voice '{}' is not a {} voice; falling back to '{}'", name, sex, persona.name());
    }
    println!("Voice: {}", persona.name());
    println!("{}", "─".repeat(40));
    println!("Sex:           {}", persona.sex());
    println!("Score:         {}", score_label(persona));
    for view in Sex::ALL {
        if let Some(rank) = registry.rank_of(persona.name(), view) {
            println!("Rank ({:<6}):  {}", view, rank);
        }
    }
    println!();
    println!("Usage:");
    println!("  parler-voices generate \"Hello there\" --name \"{}\" --sex {}", persona.name(), persona.sex());
    println!();
}
