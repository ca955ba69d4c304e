//! A single nameable voice.

use super::Sex;

/// A named voice persona with an optional affinity score.
///
/// The score is an opaque ranking weight in (0, 1]; unscored personas rank
/// after every scored one.
#[derive(Debug, Clone, PartialEq)]
pub struct Persona {
    name: String,
    score: Option<f64>,
    sex: Sex,
}

impl Persona {
    pub(crate) fn new(name: impl Into<String>, score: Option<f64>, sex: Sex) -> Self {
        Self { name: name.into(), score, sex }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn score(&self) -> Option<f64> {
        self.score
    }

    pub fn sex(&self) -> Sex {
        self.sex
    }

    /// Sort key: absent scores rank below any real score.
    pub(crate) fn rank_key(&self) -> f64 {
        self.score.unwrap_or(f64::NEG_INFINITY)
    }

    /// Build the speaker description handed to the synthesis engine.
    pub fn description(&self, template: &str) -> String {
        format!("{}'s voice {}", self.name, template)
    }
}
