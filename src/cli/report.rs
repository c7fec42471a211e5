use crate::morphology::pattern::LANE_VARIETIES;
use crate::morphology::{AoristPattern, Paradigm};
use crate::parser::Family;
use crate::{Config, CorrectionCandidate, FileResult, TextSpan};
use std::collections::BTreeMap;
use std::fmt::Write;
use std::path::{Path, PathBuf};
use unicode_segmentation::UnicodeSegmentation;

const RULE: &str = "--------------------------------------------------";

/// Report grouping: Form I by inferred vowel, the rest by form number.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum Group {
    Aorist(AoristPattern),
    Form(u8),
}

impl Group {
    fn of(candidate: &CorrectionCandidate) -> Self {
        match (candidate.family, candidate.pattern) {
            (Family::Aorist, pattern) => Group::Aorist(pattern.unwrap_or_default()),
            (Family::Derived, _) => Group::Form(candidate.form),
        }
    }

    pub fn label(&self) -> String {
        match self {
            Group::Aorist(pattern) => pattern.variety_name(),
            Group::Form(n) => format!("Form {:2}", n),
        }
    }
}

#[derive(Debug)]
pub struct CandidateGroup<'a> {
    pub group: Group,
    pub entries: Vec<&'a CorrectionCandidate>,
    /// Share of the group's family, in percent.
    pub percentage: f64,
}

/// Group candidates for review. Percentages are relative to the family the
/// group belongs to, so Form I and Forms II–XIII each sum to 100.
pub fn group_candidates(candidates: &[CorrectionCandidate]) -> Vec<CandidateGroup<'_>> {
    let mut groups: BTreeMap<Group, Vec<&CorrectionCandidate>> = BTreeMap::new();
    for candidate in candidates {
        groups.entry(Group::of(candidate)).or_default().push(candidate);
    }

    let aorist_total = candidates.iter().filter(|c| c.family == Family::Aorist).count();
    let derived_total = candidates.len() - aorist_total;

    groups
        .into_iter()
        .map(|(group, entries)| {
            let family_total = match group {
                Group::Aorist(_) => aorist_total,
                Group::Form(_) => derived_total,
            };
            let percentage = if family_total == 0 {
                0.0
            } else {
                entries.len() as f64 / family_total as f64 * 100.0
            };
            CandidateGroup {
                group,
                entries,
                percentage,
            }
        })
        .collect()
}

/// Whitespace-collapsed text of `span`, cut to `width` graphemes so a mark
/// is never separated from its letter.
pub fn context_snippet(content: &str, span: TextSpan, width: usize) -> String {
    let collapsed = span
        .slice(content)
        .split_whitespace()
        .collect::<Vec<_>>()
        .join(" ");

    let graphemes: Vec<&str> = collapsed.graphemes(true).collect();
    if graphemes.len() <= width {
        collapsed
    } else {
        format!("{}...", graphemes[..width].concat())
    }
}

pub fn report_path(file_path: &Path, config: &Config) -> PathBuf {
    let stem = file_path
        .file_stem()
        .and_then(|s| s.to_str())
        .unwrap_or("input");
    let name = format!("verbfix_preview_{}.txt", stem);

    match &config.report_dir {
        Some(dir) => dir.join(name),
        None => file_path
            .parent()
            .map(|p| p.join(&name))
            .unwrap_or_else(|| PathBuf::from(name)),
    }
}

pub fn render(file_path: &Path, result: &FileResult, content: &str, config: &Config) -> String {
    let mut out = String::new();
    // Writing into a String cannot fail.
    let _ = write_report(&mut out, file_path, result, content, config);
    out
}

fn write_report(
    out: &mut String,
    file_path: &Path,
    result: &FileResult,
    content: &str,
    config: &Config,
) -> std::fmt::Result {
    writeln!(out, "VERB FORM CORRECTION PREVIEW REPORT")?;
    writeln!(out, "{}", "=".repeat(50))?;
    writeln!(out)?;
    writeln!(out, "Input file: {}", file_path.display())?;
    writeln!(out, "Root scopes scanned: {}", result.scopes)?;
    writeln!(out, "Total verb forms to be corrected: {}", result.candidate_count)?;
    writeln!(
        out,
        "Skipped: {} invalid root, {} unsupported form, {} already canonical",
        result.skipped.invalid_root, result.skipped.unsupported_form, result.skipped.already_canonical
    )?;
    if let Some(digest) = &result.snapshot {
        writeln!(out, "Snapshot SHA-256: {}", digest)?;
    }
    writeln!(out, "Generated on: {}", chrono::Local::now().format("%Y-%m-%d %H:%M:%S"))?;
    writeln!(out)?;

    writeln!(out, "RECOGNIZED SHAPES:")?;
    if config.families.contains(&Family::Aorist) {
        writeln!(out, "  aor. <form n=\"infl\"> <orth orig=\"...\" lang=\"ar\">...</orth></form>")?;
        writeln!(out, "  aor. <form n=\"infl\"> <orth orig=\"\" ... lang=\"ar\">...</orth></form>")?;
    }
    if config.families.contains(&Family::Derived) {
        writeln!(out, "  <itype>N</itype> <orth lang=\"ar\">...</orth></form>")?;
    }
    writeln!(out)?;

    if config.families.contains(&Family::Aorist) {
        writeln!(out, "LANE'S 6 VARIETIES (FORM I):")?;
        for variety in LANE_VARIETIES.iter() {
            writeln!(out, "{}. {} -> {}", variety.number, variety.perfect, variety.aorist)?;
        }
        writeln!(out)?;
    }
    if config.families.contains(&Family::Derived) {
        writeln!(out, "VERB FORMS COVERED:")?;
        for paradigm in Paradigm::derived() {
            writeln!(
                out,
                "{:2}. {} - Form {} - {}",
                paradigm.number,
                paradigm.pattern_name(),
                paradigm.roman,
                paradigm.description
            )?;
        }
        writeln!(out)?;
    }
    writeln!(out, "{}", RULE)?;
    writeln!(out)?;

    let groups = group_candidates(&result.candidates);
    let mut entry_num = 1;

    for group in &groups {
        match group.group {
            Group::Aorist(pattern) => {
                writeln!(out, "=== FORM I: {} PATTERN ===", pattern.variety_name().to_uppercase())?;
                writeln!(out, "Entries using this pattern: {}", group.entries.len())?;
            }
            Group::Form(n) => {
                let paradigm = Paradigm::get(n);
                writeln!(
                    out,
                    "=== FORM {}: {} ===",
                    n,
                    paradigm.map(|p| p.pattern_name()).unwrap_or_default()
                )?;
                writeln!(
                    out,
                    "Description: {}",
                    paradigm.map(|p| p.description).unwrap_or("Unknown")
                )?;
                writeln!(out, "Entries to correct: {}", group.entries.len())?;
            }
        }
        writeln!(out)?;

        for candidate in &group.entries {
            writeln!(
                out,
                "{:3}. Root: {} ({})",
                entry_num, candidate.root_text, candidate.root_letters
            )?;
            if let Some(pattern) = candidate.pattern {
                writeln!(out, "     Pattern: {}", pattern.variety_name())?;
            } else {
                writeln!(out, "     Form: {}", candidate.form)?;
            }
            writeln!(out, "     Line: {}", candidate.line)?;
            writeln!(out, "     Current: {}", candidate.current)?;
            writeln!(out, "     Correct: {}", candidate.generated)?;
            writeln!(out, "     Action:  REPLACE")?;
            for anomaly in &candidate.anomalies {
                writeln!(out, "     Note:    {}", anomaly.describe())?;
            }
            writeln!(
                out,
                "     Context: {}",
                context_snippet(content, candidate.matched, config.context_width)
            )?;
            writeln!(out)?;
            entry_num += 1;
        }
        writeln!(out)?;
    }

    writeln!(out, "{}", RULE)?;
    writeln!(out, "SUMMARY: {} verb forms need correction", result.candidate_count)?;
    writeln!(out)?;

    let (aorist, derived): (Vec<_>, Vec<_>) = groups
        .iter()
        .partition(|g| matches!(g.group, Group::Aorist(_)));

    if !aorist.is_empty() {
        writeln!(out, "PATTERN DISTRIBUTION:")?;
        for group in aorist {
            writeln!(
                out,
                "  {}: {} ({:.1}%)",
                group.group.label(),
                group.entries.len(),
                group.percentage
            )?;
        }
    }
    if !derived.is_empty() {
        writeln!(out, "FORM DISTRIBUTION:")?;
        for group in derived {
            writeln!(
                out,
                "  {}: {:3} ({:5.1}%)",
                group.group.label(),
                group.entries.len(),
                group.percentage
            )?;
        }
    }

    writeln!(out)?;
    writeln!(out, "To apply these fixes, run:")?;
    writeln!(out, "verbfix {} --apply", file_path.display())?;

    Ok(())
}
