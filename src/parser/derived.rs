use crate::parser::{Family, Occurrence};
use crate::TextSpan;
use lazy_static::lazy_static;
use regex::Regex;

lazy_static! {
    static ref ITYPE_FORM: Regex =
        Regex::new(r#"<itype>(\d+)</itype>\s*\n\s*<orth lang="ar">([^<]+)</orth></form>"#).unwrap();
}

/// Forms II–XIII occurrences (`<itype>N</itype>` followed by the value).
/// Every itype is reported, including 1 and out-of-range numbers; the
/// corrector decides what to do with them.
pub fn find(section: &str, base: usize) -> Vec<Occurrence<'_>> {
    ITYPE_FORM
        .captures_iter(section)
        .filter_map(|caps| {
            let whole = caps.get(0)?;
            let number = caps.get(1)?;
            let value = caps.get(2)?;
            Some(Occurrence::new(
                Family::Derived,
                number.as_str().parse::<u8>().ok(),
                value.as_str(),
                base + value.start(),
                TextSpan::new(base + whole.start(), base + whole.end()),
            ))
        })
        .collect()
}
