//! Static speaker data for Parler-TTS mini v1.
//!
//! Scores are affinity weights for the named speakers the model was trained
//! on; speakers without a published weight are listed in the universe only.

/// Static configuration a [`VoiceRegistry`](super::VoiceRegistry) is built from.
#[derive(Debug, Clone, Copy)]
pub struct VoiceTable<'a> {
    /// Scored speakers, in seed order.
    pub seed_scores: &'a [(&'a str, f64)],
    /// Every known speaker name, scored or not, in declaration order.
    pub universe: &'a [&'a str],
    pub male: &'a [&'a str],
    pub female: &'a [&'a str],
    /// Fallback persona names indexed by [`Sex::index`](super::Sex::index).
    pub defaults: [&'a str; 3],
}

pub const MALE_DEFAULT: &str = "A male";
pub const FEMALE_DEFAULT: &str = "A female";
pub const EITHER_DEFAULT: &str = "A person";

const SEED_SCORES: &[(&str, f64)] = &[
    ("Jon", 0.908301),
    ("Lea", 0.904785),
    ("Gary", 0.903516),
    ("Jenna", 0.901807),
    ("Mike", 0.885742),
    ("Laura", 0.882666),
    ("Lauren", 0.878320),
    ("Eileen", 0.875635),
    ("Alisa", 0.874219),
    ("Karen", 0.872363),
    ("Barbara", 0.871509),
    ("Carol", 0.863623),
    ("Emily", 0.854932),
    ("Rose", 0.852246),
    ("Will", 0.851074),
    ("Patrick", 0.850977),
    ("Eric", 0.845459),
    ("Rick", 0.845020),
    ("Anna", 0.844922),
    ("Tina", 0.839160),
];

#[rustfmt::skip]
const UNIVERSE: &[&str] = &[
    "Laura", "Gary", "Jon", "Lea", "Karen", "Rick", "Brenda", "David",
    "Eileen", "Jordan", "Mike", "Yann", "Joy", "James", "Eric", "Lauren",
    "Rose", "Will", "Jason", "Aaron", "Naomie", "Alisa", "Patrick", "Jerry",
    "Tina", "Jenna", "Bill", "Tom", "Carol", "Barbara", "Rebecca", "Anna",
    "Bruce", "Emily",
    MALE_DEFAULT, FEMALE_DEFAULT, EITHER_DEFAULT,
];

#[rustfmt::skip]
const MALE: &[&str] = &[
    "Jon", "Gary", "Mike", "Will", "Patrick", "Eric", "Rick", "David",
    "Yann", "James", "Jason", "Aaron", "Jerry", "Bill", "Tom", "Bruce",
    MALE_DEFAULT,
];

#[rustfmt::skip]
const FEMALE: &[&str] = &[
    "Lea", "Jenna", "Laura", "Lauren", "Eileen", "Alisa", "Karen", "Barbara",
    "Carol", "Emily", "Rose", "Anna", "Tina", "Brenda", "Joy", "Naomie",
    "Rebecca",
    FEMALE_DEFAULT,
];

/// The speaker table shipped with this crate.
pub const STANDARD: VoiceTable<'static> = VoiceTable {
    seed_scores: SEED_SCORES,
    universe: UNIVERSE,
    male: MALE,
    female: FEMALE,
    defaults: [MALE_DEFAULT, FEMALE_DEFAULT, EITHER_DEFAULT],
};
