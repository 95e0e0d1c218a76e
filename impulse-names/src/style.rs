//! Built-in name styles and their word lists.

use crate::error::{NamesError, NamesResult};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Word lists for one style. Earlier words are picked more often.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Pattern {
    /// First part of the name.
    pub prefixes: &'static [&'static str],
    /// Last part of the name.
    pub suffixes: &'static [&'static str],
    /// Glue between prefix and suffix. Empty strings join the two directly.
    pub connectors: &'static [&'static str],
}

impl Pattern {
    /// Creates a pattern from explicit word lists.
    #[must_use]
    pub const fn new(
        prefixes: &'static [&'static str],
        suffixes: &'static [&'static str],
        connectors: &'static [&'static str],
    ) -> Self {
        Self {
            prefixes,
            suffixes,
            connectors,
        }
    }

    /// Returns every `prefix + connector + suffix` this pattern can produce,
    /// with duplicates removed.
    #[must_use]
    pub fn base_names(&self) -> Vec<String> {
        let mut names = Vec::new();
        for prefix in self.prefixes {
            for connector in self.connectors {
                for suffix in self.suffixes {
                    let name = format!("{prefix}{connector}{suffix}");
                    if !names.contains(&name) {
                        names.push(name);
                    }
                }
            }
        }
        names
    }
}

static MODERN: Pattern = Pattern::new(
    &[
        "Quantum", "Cyber", "Neo", "Digital", "Virtual", "Synth", "Tech", "Data", "Net", "Code",
        "Byte", "Pixel", "AI", "Meta",
    ],
    &[
        "Flux", "Pulse", "Wave", "Core", "Net", "Bit", "Code", "Drive", "Shift", "Glitch",
        "Spark", "Flow", "Sync", "Edge",
    ],
    &["", "", "", "X", "Z", "V", "Prime", "Mark"],
);

static GAMING: Pattern = Pattern::new(
    &[
        "Shadow", "Dark", "Blood", "Soul", "Dragon", "Phoenix", "Wolf", "Steel", "Iron", "Ghost",
        "Night", "Death", "Chaos", "Doom",
    ],
    &[
        "Slayer", "Hunter", "Reaper", "Master", "Lord", "King", "Blade", "Fury", "Storm", "Fire",
        "Rage", "Breaker", "Crusher", "Killer",
    ],
    &["", "", "Of", "The", "X", "Z"],
);

static ELITE: Pattern = Pattern::new(
    &[
        "Imperial", "Royal", "Noble", "Elite", "Supreme", "Ultimate", "Absolute", "Divine",
        "Perfect", "Alpha", "Prime", "Gold", "Platinum", "Diamond",
    ],
    &[
        "King", "Emperor", "Lord", "Master", "Ruler", "Prince", "Duke", "Baron", "Chief",
        "Leader", "God", "Titan", "Legend", "Myth",
    ],
    &["", "The", "OfThe", "X", "Pro", "Max"],
);

static MYSTIC: Pattern = Pattern::new(
    &[
        "Mystic", "Ancient", "Arcane", "Spirit", "Crystal", "Moon", "Star", "Shadow", "Dark",
        "Eternal", "Infinite", "Cosmic", "Celestial", "Divine",
    ],
    &[
        "Seer", "Mage", "Wizard", "Oracle", "Walker", "Caller", "Binder", "Weaver", "Shaman",
        "Warlock", "Sorcerer", "Prophet", "Sage", "Witch",
    ],
    &["", "The", "Of", ""],
);

/// A named theme controlling the flavor of generated names.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Style {
    /// Tech words: "QuantumFlux", "NeoXPulse".
    #[default]
    Modern,
    /// Combat words: "ShadowOfReaper".
    Gaming,
    /// Rank words: "RoyalTheEmperor".
    Elite,
    /// Magic words: "ArcaneSeer".
    Mystic,
}

impl Style {
    /// All built-in styles.
    pub const ALL: [Style; 4] = [Style::Modern, Style::Gaming, Style::Elite, Style::Mystic];

    /// Returns the style's lowercase name.
    #[must_use]
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Modern => "modern",
            Self::Gaming => "gaming",
            Self::Elite => "elite",
            Self::Mystic => "mystic",
        }
    }

    /// Returns the word lists for this style.
    #[must_use]
    pub fn pattern(&self) -> &'static Pattern {
        match self {
            Self::Modern => &MODERN,
            Self::Gaming => &GAMING,
            Self::Elite => &ELITE,
            Self::Mystic => &MYSTIC,
        }
    }

    /// Parses a style name, falling back to [`Style::Modern`] for anything
    /// unrecognized.
    #[must_use]
    pub fn parse_or_default(name: &str) -> Self {
        name.parse().unwrap_or_default()
    }
}

impl FromStr for Style {
    type Err = NamesError;

    fn from_str(s: &str) -> NamesResult<Self> {
        let wanted = s.trim();
        Self::ALL
            .into_iter()
            .find(|style| style.as_str().eq_ignore_ascii_case(wanted))
            .ok_or_else(|| NamesError::UnknownStyle(s.to_string()))
    }
}

impl fmt::Display for Style {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
