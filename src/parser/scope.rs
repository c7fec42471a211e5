use crate::error::StructureError;
use crate::TextSpan;
use lazy_static::lazy_static;
use regex::Regex;

lazy_static! {
    static ref SCOPE_OPEN: Regex = Regex::new(r#"<div2 type="root"[^>]*>"#).unwrap();
    static ref SCOPE_CLOSE: Regex = Regex::new(r"</div2>").unwrap();
    static ref ROOT_LABEL: Regex =
        Regex::new(r#"<head><foreign lang="ar">([^<]+)</foreign></head>"#).unwrap();
}

/// A `<div2 type="root">` block, open tag through the first `</div2>`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ScopeBounds {
    pub span: TextSpan,
}

/// Locate every root scope in document order.
///
/// A scope runs from its open tag to the first closing `</div2>` after it.
/// An open tag with no close, or a second root open before the close, means
/// the file cannot be split and nothing in it may be edited.
pub fn find_scopes(content: &str) -> Result<Vec<ScopeBounds>, StructureError> {
    let mut scopes = Vec::new();
    let mut cursor = 0;

    while let Some(open) = SCOPE_OPEN.find_at(content, cursor) {
        let close = SCOPE_CLOSE
            .find_at(content, open.end())
            .ok_or(StructureError::UnclosedScope { offset: open.start() })?;

        if let Some(inner) = SCOPE_OPEN.find_at(content, open.end()) {
            if inner.start() < close.start() {
                return Err(StructureError::NestedScope {
                    outer: open.start(),
                    inner: inner.start(),
                });
            }
        }

        scopes.push(ScopeBounds {
            span: TextSpan::new(open.start(), close.end()),
        });
        cursor = close.end();
    }

    Ok(scopes)
}

/// The root label inside a scope's text, if it has one.
pub fn root_label(section: &str) -> Option<&str> {
    ROOT_LABEL
        .captures(section)
        .and_then(|caps| caps.get(1))
        .map(|m| m.as_str())
}
