use crate::morphology::diacritics::{is_base_letter, strip};
use serde::Serialize;
use std::fmt;

/// The radicals of a triliteral root.
///
/// Built once per root scope. A root with fewer than three letters after
/// cleaning is kept (so it can still be reported) but is not generatable.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RootLetters {
    letters: Vec<char>,
}

impl RootLetters {
    /// Extract the radicals from the raw root label: drop diacritics and
    /// anything that is not an Arabic letter, then keep the first three.
    pub fn extract(root_text: &str) -> Self {
        let letters = strip(root_text.trim())
            .chars()
            .filter(|c| is_base_letter(*c))
            .take(3)
            .collect();

        Self { letters }
    }

    pub fn is_valid(&self) -> bool {
        self.letters.len() == 3
    }

    /// `(r1, r2, r3)` when the root is generatable.
    pub fn radicals(&self) -> Option<(char, char, char)> {
        match self.letters.as_slice() {
            [r1, r2, r3] => Some((*r1, *r2, *r3)),
            _ => None,
        }
    }

    pub fn first(&self) -> Option<char> {
        self.radicals().map(|(r1, _, _)| r1)
    }

    pub fn as_slice(&self) -> &[char] {
        &self.letters
    }
}

impl fmt::Display for RootLetters {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for c in &self.letters {
            write!(f, "{}", c)?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::morphology::diacritics::{FATHA, SHADDA};

    #[test]
    fn test_extract_vocalized_root() {
        let root = RootLetters::extract(&format!(" \u{0628}{FATHA}\u{062A}{FATHA}\u{0631}{FATHA} "));
        assert!(root.is_valid());
        assert_eq!(root.radicals(), Some(('\u{0628}', '\u{062A}', '\u{0631}')));
        assert_eq!(root.to_string(), "\u{0628}\u{062A}\u{0631}");
    }

    #[test]
    fn test_extract_skips_non_letters() {
        // Latin, tatweel, and a comma are dropped before taking the first three
        let root = RootLetters::extract("x\u{0628}\u{0640}\u{060C}\u{062A}\u{0631}\u{0643}");
        assert_eq!(root.as_slice(), &['\u{0628}', '\u{062A}', '\u{0631}']);
    }

    #[test]
    fn test_short_root_is_invalid() {
        let root = RootLetters::extract(&format!("\u{0645}{SHADDA}"));
        assert!(!root.is_valid());
        assert_eq!(root.radicals(), None);
        assert_eq!(root.first(), None);

        assert!(!RootLetters::extract("").is_valid());
    }
}
