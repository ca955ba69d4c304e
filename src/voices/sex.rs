//! Speaker sex used both to classify personas and to select a ranked view.

use std::fmt;
use std::str::FromStr;

/// Sex of a voice persona.
///
/// On a [`Persona`](super::Persona) `Either` means the name is in neither
/// sex set. As a lookup key it selects the view holding every persona.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Sex {
    Male,
    Female,
    Either,
}

impl Sex {
    /// All views in table order.
    pub const ALL: [Sex; 3] = [Sex::Male, Sex::Female, Sex::Either];

    /// Position of this sex in per-view tables.
    pub const fn index(self) -> usize {
        match self {
            Sex::Male => 0,
            Sex::Female => 1,
            Sex::Either => 2,
        }
    }

    /// Lowercase label used in file names and logs.
    pub const fn as_str(self) -> &'static str {
        match self {
            Sex::Male => "male",
            Sex::Female => "female",
            Sex::Either => "either",
        }
    }

    /// Parse a free-text preference, treating anything unrecognised as `Either`.
    pub fn from_preference(text: &str) -> Sex {
        text.parse().unwrap_or(Sex::Either)
    }
}

impl fmt::Display for Sex {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Error returned when a string names no known sex.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown sex '{0}' (expected male, female or either)")]
pub struct ParseSexError(String);

impl FromStr for Sex {
    type Err = ParseSexError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "male" | "m" | "man" => Ok(Sex::Male),
            "female" | "f" | "woman" => Ok(Sex::Female),
            "either" | "any" | "all" | "person" | "unspecified" => Ok(Sex::Either),
            _ => Err(ParseSexError(s.to_string())),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_is_case_insensitive() {
        assert_eq!("MALE".parse::<Sex>(), Ok(Sex::Male));
        assert_eq!(" Female ".parse::<Sex>(), Ok(Sex::Female));
        assert_eq!("all".parse::<Sex>(), Ok(Sex::Either));
        assert!("robot".parse::<Sex>().is_err());
    }

    #[test]
    fn test_preference_falls_back_to_either() {
        assert_eq!(Sex::from_preference("w"), Sex::Either);
        assert_eq!(Sex::from_preference("woman"), Sex::Female);
        assert_eq!(Sex::from_preference(""), Sex::Either);
    }

    #[test]
    fn test_indices_match_table_order() {
        for (i, sex) in Sex::ALL.iter().enumerate() {
            assert_eq!(sex.index(), i);
        }
    }
}
