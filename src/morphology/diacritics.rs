// Combining marks used by the lexicon's vocalized Arabic, and the base-letter
// classification the rest of the engine splits text on.

use serde::Serialize;
use std::fmt;

/// A combining mark written over or under a base letter.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum DiacriticMark {
    Fatha,
    Damma,
    Kasra,
    Sukun,
    Shadda,
    TanweenFatha,
    TanweenDamma,
    TanweenKasra,
    HamzaAbove,
    HamzaBelow,
}

pub const FATHA: char = '\u{064E}';
pub const DAMMA: char = '\u{064F}';
pub const KASRA: char = '\u{0650}';
pub const SUKUN: char = '\u{0652}';
pub const SHADDA: char = '\u{0651}';
pub const TANWEEN_FATHA: char = '\u{064B}';
pub const TANWEEN_DAMMA: char = '\u{064C}';
pub const TANWEEN_KASRA: char = '\u{064D}';
pub const HAMZA_ABOVE: char = '\u{0654}';
pub const HAMZA_BELOW: char = '\u{0655}';

/// The full mark table, in declaration order.
pub const MARKS: [(DiacriticMark, char); 10] = [
    (DiacriticMark::Fatha, FATHA),
    (DiacriticMark::Damma, DAMMA),
    (DiacriticMark::Kasra, KASRA),
    (DiacriticMark::Sukun, SUKUN),
    (DiacriticMark::Shadda, SHADDA),
    (DiacriticMark::TanweenFatha, TANWEEN_FATHA),
    (DiacriticMark::TanweenDamma, TANWEEN_DAMMA),
    (DiacriticMark::TanweenKasra, TANWEEN_KASRA),
    (DiacriticMark::HamzaAbove, HAMZA_ABOVE),
    (DiacriticMark::HamzaBelow, HAMZA_BELOW),
];

/// Order in which `classify` looks for a vowel when a unit carries several.
/// Pattern inference depends on this exact order.
const CLASSIFY_PRIORITY: [DiacriticMark; 4] = [
    DiacriticMark::Fatha,
    DiacriticMark::Kasra,
    DiacriticMark::Damma,
    DiacriticMark::Sukun,
];

impl DiacriticMark {
    pub fn as_char(self) -> char {
        match self {
            DiacriticMark::Fatha => FATHA,
            DiacriticMark::Damma => DAMMA,
            DiacriticMark::Kasra => KASRA,
            DiacriticMark::Sukun => SUKUN,
            DiacriticMark::Shadda => SHADDA,
            DiacriticMark::TanweenFatha => TANWEEN_FATHA,
            DiacriticMark::TanweenDamma => TANWEEN_DAMMA,
            DiacriticMark::TanweenKasra => TANWEEN_KASRA,
            DiacriticMark::HamzaAbove => HAMZA_ABOVE,
            DiacriticMark::HamzaBelow => HAMZA_BELOW,
        }
    }

    pub fn from_char(c: char) -> Option<Self> {
        MARKS
            .iter()
            .find(|(_, mark)| *mark == c)
            .map(|(kind, _)| *kind)
    }

    pub fn name(self) -> &'static str {
        match self {
            DiacriticMark::Fatha => "fatha",
            DiacriticMark::Damma => "damma",
            DiacriticMark::Kasra => "kasra",
            DiacriticMark::Sukun => "sukun",
            DiacriticMark::Shadda => "shadda",
            DiacriticMark::TanweenFatha => "tanween-fatha",
            DiacriticMark::TanweenDamma => "tanween-damma",
            DiacriticMark::TanweenKasra => "tanween-kasra",
            DiacriticMark::HamzaAbove => "hamza-above",
            DiacriticMark::HamzaBelow => "hamza-below",
        }
    }
}

impl fmt::Display for DiacriticMark {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

pub fn is_mark(c: char) -> bool {
    DiacriticMark::from_char(c).is_some()
}

/// Whether `c` is an Arabic base letter (hamza through yā', plus the
/// extended letters of the Arabic block). Tatweel, digits, punctuation and
/// every combining mark are excluded.
pub fn is_base_letter(c: char) -> bool {
    matches!(c,
        '\u{0621}'..='\u{063A}' |
        '\u{0641}'..='\u{064A}' |
        '\u{0671}'..='\u{06D3}' |
        '\u{06D5}' |
        '\u{06EE}'..='\u{06EF}' |
        '\u{06FA}'..='\u{06FC}' |
        '\u{06FF}'
    )
}

/// Remove every mark in the table from `text`.
pub fn strip(text: &str) -> String {
    text.chars().filter(|c| !is_mark(*c)).collect()
}

/// Return the vowel carried by a letter unit (a base letter plus the marks
/// that follow it). When several are present the first of fatha, kasra,
/// damma, sukun wins.
pub fn classify(unit: &str) -> Option<DiacriticMark> {
    CLASSIFY_PRIORITY
        .iter()
        .copied()
        .find(|mark| unit.contains(mark.as_char()))
}

/// Split text into letter units. A new unit starts at every base letter;
/// anything else attaches to the unit before it. Text before the first base
/// letter forms a unit of its own.
pub fn letter_units(text: &str) -> Vec<&str> {
    let mut units = Vec::new();
    let mut start = 0;

    for (idx, ch) in text.char_indices() {
        if is_base_letter(ch) && idx > start {
            units.push(&text[start..idx]);
            start = idx;
        }
    }

    if start < text.len() {
        units.push(&text[start..]);
    }

    units
}
