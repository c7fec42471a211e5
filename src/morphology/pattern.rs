use crate::morphology::diacritics::{classify, letter_units, DiacriticMark, DAMMA, FATHA, KASRA};
use serde::Serialize;
use std::fmt;
use std::str::FromStr;

/// Aorist subject prefix: yā' with fatha.
pub const AORIST_PREFIX: &str = "\u{064A}\u{064E}";

/// Vowel on the middle radical of a Form I aorist.
///
/// Lane lists six perfect/aorist varieties; only the aorist vowel survives
/// in the aorist itself, so they collapse to three.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum AoristPattern {
    #[default]
    Damma,
    Kasra,
    Fatha,
}

/// One row of Lane's table of Form I varieties.
#[derive(Debug, Clone, Copy)]
pub struct Variety {
    pub number: u8,
    pub perfect: &'static str,
    pub aorist: &'static str,
    pub pattern: AoristPattern,
}

pub const LANE_VARIETIES: [Variety; 6] = [
    Variety { number: 1, perfect: "فَعَلَ", aorist: "يَفْعُلُ", pattern: AoristPattern::Damma },
    Variety { number: 2, perfect: "فَعَلَ", aorist: "يَفْعِلُ", pattern: AoristPattern::Kasra },
    Variety { number: 3, perfect: "فَعَلَ", aorist: "يَفْعَلُ", pattern: AoristPattern::Fatha },
    Variety { number: 4, perfect: "فَعِلَ", aorist: "يَفْعَلُ", pattern: AoristPattern::Fatha },
    Variety { number: 5, perfect: "فَعُلَ", aorist: "يَفْعُلُ", pattern: AoristPattern::Damma },
    Variety { number: 6, perfect: "فَعِلَ", aorist: "يَفْعِلُ", pattern: AoristPattern::Kasra },
];

impl AoristPattern {
    pub const ALL: [AoristPattern; 3] = [AoristPattern::Damma, AoristPattern::Kasra, AoristPattern::Fatha];

    /// The mark written on the middle radical.
    pub fn mark(self) -> char {
        match self {
            AoristPattern::Damma => DAMMA,
            AoristPattern::Kasra => KASRA,
            AoristPattern::Fatha => FATHA,
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            AoristPattern::Damma => "damma",
            AoristPattern::Kasra => "kasra",
            AoristPattern::Fatha => "fatha",
        }
    }

    /// Lane variety numbers whose aorist takes this vowel.
    pub fn varieties(self) -> Vec<u8> {
        LANE_VARIETIES
            .iter()
            .filter(|v| v.pattern == self)
            .map(|v| v.number)
            .collect()
    }

    /// e.g. `يَفْعُلُ (varieties 1,5)`
    pub fn variety_name(self) -> String {
        let numbers = self
            .varieties()
            .iter()
            .map(|n| n.to_string())
            .collect::<Vec<_>>()
            .join(",");
        let aorist = LANE_VARIETIES
            .iter()
            .find(|v| v.pattern == self)
            .map(|v| v.aorist)
            .unwrap_or_default();
        format!("{} (varieties {})", aorist, numbers)
    }
}

impl fmt::Display for AoristPattern {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for AoristPattern {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "damma" | "u" => Ok(AoristPattern::Damma),
            "kasra" | "i" => Ok(AoristPattern::Kasra),
            "fatha" | "a" => Ok(AoristPattern::Fatha),
            _ => Err(format!("Unknown aorist pattern: {}", s)),
        }
    }
}

/// Infer the intended aorist vowel from an existing, possibly malformed,
/// aorist. The vowel on the second letter unit (the middle radical once the
/// subject prefix is gone) is the only signal the editor left behind.
pub fn infer(current: &str) -> AoristPattern {
    let body = current.strip_prefix(AORIST_PREFIX).unwrap_or(current);
    let units = letter_units(body);

    if units.len() < 2 {
        return AoristPattern::Damma;
    }

    match classify(units[1]) {
        Some(DiacriticMark::Kasra) => AoristPattern::Kasra,
        Some(DiacriticMark::Fatha) => AoristPattern::Fatha,
        _ => AoristPattern::Damma,
    }
}
