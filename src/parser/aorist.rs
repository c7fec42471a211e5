use crate::parser::{Family, Occurrence};
use crate::TextSpan;
use lazy_static::lazy_static;
use regex::Regex;

lazy_static! {
    // orig carries a transliteration and lang follows directly
    static ref ATTESTED: Regex = Regex::new(
        r#"aor\.\s*\n\s*<form n="infl">\s*\n\s*<orth orig="[^"]+"\s+lang="ar">([^<]*)</orth></form>"#
    )
    .unwrap();
    // orig is empty; other attributes may sit before lang
    static ref UNATTRIBUTED: Regex = Regex::new(
        r#"aor\.\s*\n\s*<form n="infl">\s*\n\s*<orth orig=""\s+[^>]*lang="ar">([^<]*)</orth></form>"#
    )
    .unwrap();
}

/// Form I occurrences in `section`, which starts at byte `base` of the
/// document. Offsets in the result are absolute.
pub fn find(section: &str, base: usize) -> Vec<Occurrence<'_>> {
    let mut found = Vec::new();

    for pattern in [&*ATTESTED, &*UNATTRIBUTED] {
        for caps in pattern.captures_iter(section) {
            let (Some(whole), Some(value)) = (caps.get(0), caps.get(1)) else {
                continue;
            };
            found.push(Occurrence::new(
                Family::Aorist,
                Some(1),
                value.as_str(),
                base + value.start(),
                TextSpan::new(base + whole.start(), base + whole.end()),
            ));
        }
    }

    found
}
