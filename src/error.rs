use thiserror::Error;

/// The document cannot be split into root scopes. Fatal for the file.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum StructureError {
    #[error("root scope opened at byte {offset} is never closed")]
    UnclosedScope { offset: usize },

    #[error("root scope opened at byte {inner} is nested inside the scope opened at byte {outer}")]
    NestedScope { outer: usize, inner: usize },
}

/// A span edit does not fit the snapshot it is applied to.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum EditError {
    #[error("edit {start}..{end} is outside the document ({len} bytes)")]
    OutOfBounds { start: usize, end: usize, len: usize },

    #[error("edit {start}..{end} does not fall on character boundaries")]
    NotCharBoundary { start: usize, end: usize },

    #[error("edit at {start} overlaps the previous edit ending at {previous_end}")]
    Overlap { start: usize, previous_end: usize },

    #[error("text at {start}..{end} is '{found}', expected '{expected}'")]
    Stale {
        start: usize,
        end: usize,
        expected: String,
        found: String,
    },
}
