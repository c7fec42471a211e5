pub mod cli;
pub mod config;
pub mod corrector;
pub mod error;
pub mod morphology;
pub mod parser;
pub mod table;

pub use config::Config;
pub use corrector::{Corrector, SkipTally};

use morphology::{Anomaly, AoristPattern, RootLetters};
use parser::Family;
use serde::Serialize;

#[derive(Debug, Clone, Default)]
pub struct FileResult {
    pub candidate_count: usize,
    pub fixed_count: usize,
    pub candidates: Vec<CorrectionCandidate>,
    pub skipped: SkipTally,
    pub scopes: usize,
    /// SHA-256 of the content the candidates were computed from.
    pub snapshot: Option<String>,
}

/// Half-open byte range into a document snapshot.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
pub struct TextSpan {
    pub start: usize,
    pub end: usize,
}

impl TextSpan {
    pub fn new(start: usize, end: usize) -> Self {
        Self { start, end }
    }

    pub fn len(&self) -> usize {
        self.end - self.start
    }

    pub fn is_empty(&self) -> bool {
        self.start == self.end
    }

    pub fn slice<'a>(&self, text: &'a str) -> &'a str {
        &text[self.start..self.end]
    }

    /// Slice a section that begins at byte `base` of the document.
    pub fn slice_from<'a>(&self, section: &'a str, base: usize) -> &'a str {
        &section[self.start - base..self.end - base]
    }
}

/// A form that differs from its canonical rendering.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CorrectionCandidate {
    pub family: Family,
    pub root_text: String,
    pub root_letters: RootLetters,
    pub form: u8,
    pub current: String,
    /// Inferred aorist vowel; Form I only.
    pub pattern: Option<AoristPattern>,
    pub generated: String,
    /// The form text to replace.
    pub span: TextSpan,
    /// The whole occurrence the form was found in.
    pub matched: TextSpan,
    pub line: usize,
    pub anomalies: Vec<Anomaly>,
}

impl CorrectionCandidate {
    pub fn edit(&self) -> Edit {
        Edit {
            span: self.span,
            replacement: self.generated.clone(),
            expected: self.current.clone(),
        }
    }
}

/// A replacement anchored to a span of the original snapshot.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Edit {
    pub span: TextSpan,
    pub replacement: String,
    /// What the snapshot holds at `span`.
    pub expected: String,
}
