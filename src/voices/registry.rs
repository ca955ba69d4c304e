//! Ranked voice registry with per-sex views and default fallbacks.

use std::collections::{HashMap, HashSet};
use std::sync::LazyLock;

use thiserror::Error;
use tracing::debug;

use super::table::{STANDARD, VoiceTable};
use super::{Persona, Sex};

/// Defects in a [`VoiceTable`] that make it unusable.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum RegistryError {
    #[error("speaker '{0}' appears more than once in the seed scores")]
    DuplicateName(String),

    #[error("speaker '{0}' is declared both male and female")]
    OverlappingSex(String),

    #[error("score {score} for speaker '{name}' is outside (0, 1]")]
    InvalidScore { name: String, score: f64 },

    #[error("default {sex} speaker '{name}' is missing from the {sex} view or classified differently")]
    MissingDefault { sex: Sex, name: String },
}

/// One ranked view over the registry's personas.
#[derive(Debug)]
struct View {
    ranked: Vec<usize>,              // Persona indices, best score first
    by_name: HashMap<String, usize>, // Name -> position in `ranked`
    default: usize,                  // Position of the fallback persona
}

impl View {
    fn build(personas: &[Persona], sex: Sex, default_name: &str) -> Result<Self, RegistryError> {
        let mut ranked: Vec<usize> = (0..personas.len()).filter(|&i| sex == Sex::Either || personas[i].sex() == sex).collect();

        // Stable: construction order breaks ties
        ranked.sort_by(|&a, &b| personas[b].rank_key().total_cmp(&personas[a].rank_key()));

        let by_name: HashMap<String, usize> = ranked.iter().enumerate().map(|(pos, &i)| (personas[i].name().to_string(), pos)).collect();

        // The either view holds every persona, so membership alone is not enough
        let default = by_name
            .get(default_name)
            .copied()
            .filter(|&pos| personas[ranked[pos]].sex() == sex)
            .ok_or_else(|| RegistryError::MissingDefault { sex, name: default_name.to_string() })?;

        Ok(Self { ranked, by_name, default })
    }
}

/// Immutable registry of voice personas.
///
/// Lookups never fail: unknown names and negative indices resolve to the
/// view's default persona, oversized indices clamp to the last entry.
#[derive(Debug)]
pub struct VoiceRegistry {
    personas: Vec<Persona>, // Seeded entries first, then unscored universe entries
    views: Vec<View>,       // Indexed by `Sex::index`
}

impl VoiceRegistry {
    /// Build a registry from a static table.
    ///
    /// # Errors
    /// Returns an error if the table has duplicate seed names, overlapping
    /// sex sets, out-of-range scores, or a default name missing from its view.
    pub fn build(table: &VoiceTable<'_>) -> Result<Self, RegistryError> {
        let male: HashSet<&str> = table.male.iter().copied().collect();
        let female: HashSet<&str> = table.female.iter().copied().collect();

        if let Some(name) = table.male.iter().find(|name| female.contains(*name)) {
            return Err(RegistryError::OverlappingSex(name.to_string()));
        }

        let classify = |name: &str| {
            if male.contains(name) {
                Sex::Male
            } else if female.contains(name) {
                Sex::Female
            } else {
                Sex::Either
            }
        };

        let mut personas = Vec::with_capacity(table.universe.len().max(table.seed_scores.len()));
        let mut seen = HashSet::new();

        for &(name, score) in table.seed_scores {
            if !(score > 0.0 && score <= 1.0) {
                return Err(RegistryError::InvalidScore { name: name.to_string(), score });
            }
            if !seen.insert(name) {
                return Err(RegistryError::DuplicateName(name.to_string()));
            }
            personas.push(Persona::new(name, Some(score), classify(name)));
        }

        for &name in table.universe {
            if seen.insert(name) {
                personas.push(Persona::new(name, None, classify(name)));
            }
        }

        let views = Sex::ALL
            .iter()
            .map(|&sex| View::build(&personas, sex, table.defaults[sex.index()]))
            .collect::<Result<Vec<_>, _>>()?;

        debug!(
            "Voice registry built: {} personas ({} male, {} female)",
            personas.len(),
            views[Sex::Male.index()].ranked.len(),
            views[Sex::Female.index()].ranked.len()
        );

        Ok(Self { personas, views })
    }

    /// Build the registry for the speakers shipped with this crate.
    pub fn standard() -> Result<Self, RegistryError> {
        Self::build(&STANDARD)
    }

    fn view(&self, sex: Sex) -> &View {
        &self.views[sex.index()]
    }

    fn at(&self, view: &View, pos: usize) -> &Persona {
        &self.personas[view.ranked[pos]]
    }

    /// Look up a persona by name within a view, falling back to the view's default.
    pub fn resolve(&self, name: &str, sex: Sex) -> &Persona {
        let view = self.view(sex);
        let pos = view.by_name.get(name).copied().unwrap_or(view.default);
        self.at(view, pos)
    }

    /// Look up a persona by rank within a view.
    ///
    /// Negative indices select the default persona; indices past the end
    /// clamp to the lowest-ranked persona.
    pub fn resolve_by_index(&self, index: i64, sex: Sex) -> &Persona {
        let view = self.view(sex);
        if index < 0 {
            return self.at(view, view.default);
        }
        let last = view.ranked.len() - 1;
        let pos = usize::try_from(index).unwrap_or(usize::MAX).min(last);
        self.at(view, pos)
    }

    /// Names in a view, best score first.
    pub fn names_of(&self, sex: Sex) -> Vec<&str> {
        self.ranked(sex).map(Persona::name).collect()
    }

    /// Personas in a view, best score first.
    pub fn ranked(&self, sex: Sex) -> impl ExactSizeIterator<Item = &Persona> + '_ {
        self.view(sex).ranked.iter().map(|&i| &self.personas[i])
    }

    /// Position of `name` in a view, if present.
    pub fn rank_of(&self, name: &str, sex: Sex) -> Option<usize> {
        self.view(sex).by_name.get(name).copied()
    }

    pub fn default_persona(&self, sex: Sex) -> &Persona {
        let view = self.view(sex);
        self.at(view, view.default)
    }

    /// All personas in construction order.
    pub fn personas(&self) -> &[Persona] {
        &self.personas
    }

    pub fn len(&self) -> usize {
        self.personas.len()
    }

    pub fn is_empty(&self) -> bool {
        self.personas.is_empty()
    }
}

static REGISTRY: LazyLock<Result<VoiceRegistry, RegistryError>> = LazyLock::new(VoiceRegistry::standard);

/// Process-wide registry built once from the standard table.
pub fn registry() -> Result<&'static VoiceRegistry, &'static RegistryError> {
    REGISTRY.as_ref()
}
