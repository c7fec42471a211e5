pub mod aorist;
pub mod derived;
pub mod scope;

use crate::error::StructureError;
use crate::TextSpan;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// The two occurrence shapes, scanned by separate patterns.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Family {
    /// `aor.` followed by a Form I inflection.
    Aorist,
    /// `<itype>N</itype>` entries for Forms II–XIII.
    Derived,
}

impl Family {
    pub const ALL: [Family; 2] = [Family::Aorist, Family::Derived];
}

impl FromStr for Family {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "aorist" | "aor" | "1" => Ok(Family::Aorist),
            "derived" | "forms" => Ok(Family::Derived),
            _ => Err(format!("Unknown family: {}", s)),
        }
    }
}

impl fmt::Display for Family {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Family::Aorist => write!(f, "aorist"),
            Family::Derived => write!(f, "derived"),
        }
    }
}

/// One verb form found inside a root scope.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Occurrence<'a> {
    pub family: Family,
    /// `None` when the itype label does not fit a form number at all.
    pub form: Option<u8>,
    /// The form text with surrounding whitespace removed.
    pub current: &'a str,
    /// Absolute span of `current`.
    pub value: TextSpan,
    /// Absolute span of the whole matched occurrence.
    pub matched: TextSpan,
}

impl<'a> Occurrence<'a> {
    pub(crate) fn new(
        family: Family,
        form: Option<u8>,
        raw_value: &'a str,
        raw_start: usize,
        matched: TextSpan,
    ) -> Self {
        let leading = raw_value.len() - raw_value.trim_start().len();
        let current = raw_value.trim();
        let start = raw_start + leading;

        Self {
            family,
            form,
            current,
            value: TextSpan::new(start, start + current.len()),
            matched,
        }
    }
}

/// A root scope with its label and the occurrences of the requested
/// families, in document order.
#[derive(Debug, Clone)]
pub struct RootScope<'a> {
    pub span: TextSpan,
    pub label: Option<&'a str>,
    pub occurrences: Vec<Occurrence<'a>>,
}

/// Split a lexicon document into root scopes and collect the occurrences of
/// `families` inside each.
pub fn parse_document<'a>(
    content: &'a str,
    families: &[Family],
) -> Result<Vec<RootScope<'a>>, StructureError> {
    let bounds = scope::find_scopes(content)?;
    let mut scopes = Vec::with_capacity(bounds.len());

    for bound in bounds {
        let section = bound.span.slice(content);
        let base = bound.span.start;

        let mut occurrences = Vec::new();
        if families.contains(&Family::Aorist) {
            occurrences.extend(aorist::find(section, base));
        }
        if families.contains(&Family::Derived) {
            occurrences.extend(derived::find(section, base));
        }
        occurrences.sort_by_key(|o| (o.value.start, o.family));
        occurrences.dedup_by_key(|o| o.value);

        scopes.push(RootScope {
            span: bound.span,
            label: scope::root_label(section),
            occurrences,
        });
    }

    Ok(scopes)
}

/// Byte offset to 1-based line number.
pub struct LineIndex {
    starts: Vec<usize>,
}

impl LineIndex {
    pub fn new(content: &str) -> Self {
        let mut starts = vec![0];
        starts.extend(content.match_indices('\n').map(|(i, _)| i + 1));
        Self { starts }
    }

    pub fn line(&self, offset: usize) -> usize {
        match self.starts.binary_search(&offset) {
            Ok(idx) => idx + 1,
            Err(idx) => idx,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const DOC: &str = concat!(
        "<div2 type=\"root\" n=\"btr\">\n",
        "<head><foreign lang=\"ar\">بتر</foreign></head>\n",
        "<entryFree>بَتِرَ aor.\n",
        "  <form n=\"infl\">\n",
        "    <orth orig=\"Ba\" lang=\"ar\">بَتَرَ</orth></form>\n",
        "<form><itype>2</itype>\n",
        "  <orth lang=\"ar\">بتر</orth></form>\n",
        "</entryFree>\n",
        "</div2>\n"
    );

    #[test]
    fn test_parse_document_both_families() {
        let scopes = parse_document(DOC, &Family::ALL).unwrap();
        assert_eq!(scopes.len(), 1);
        assert_eq!(scopes[0].label, Some("بتر"));

        let occ = &scopes[0].occurrences;
        assert_eq!(occ.len(), 2);
        assert_eq!(occ[0].family, Family::Aorist);
        assert_eq!(occ[1].family, Family::Derived);
        assert_eq!(occ[1].form, Some(2));
        assert_eq!(occ[0].value.slice(DOC), occ[0].current);
        assert_eq!(occ[1].value.slice(DOC), "بتر");
    }

    #[test]
    fn test_parse_document_single_family() {
        let scopes = parse_document(DOC, &[Family::Derived]).unwrap();
        assert_eq!(scopes[0].occurrences.len(), 1);
        assert_eq!(scopes[0].occurrences[0].family, Family::Derived);
    }

    #[test]
    fn test_occurrences_outside_scopes_are_ignored() {
        let content = "aor.\n<form n=\"infl\">\n<orth orig=\"Ba\" lang=\"ar\">بَتَرَ</orth></form>";
        assert!(parse_document(content, &Family::ALL).unwrap().is_empty());
    }

    #[test]
    fn test_line_index() {
        let index = LineIndex::new("a\nbc\n\nd");
        assert_eq!(index.line(0), 1);
        assert_eq!(index.line(1), 1);
        assert_eq!(index.line(2), 2);
        assert_eq!(index.line(5), 3);
        assert_eq!(index.line(6), 4);
    }

    #[test]
    fn test_family_from_str() {
        assert_eq!("Aorist".parse::<Family>(), Ok(Family::Aorist));
        assert_eq!("derived".parse::<Family>(), Ok(Family::Derived));
        assert!("nouns".parse::<Family>().is_err());
    }
}
