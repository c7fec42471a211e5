pub mod edits;

use crate::cli::output::{print_candidates, print_fixes, OutputFormat};
use crate::cli::report;
use crate::error::StructureError;
use crate::morphology::pattern::AORIST_PREFIX;
use crate::morphology::{generate, infer, paradigm, RootLetters};
use crate::parser::{self, Family, LineIndex, Occurrence};
use crate::{Config, CorrectionCandidate, FileResult};
use anyhow::{Context, Result};
use serde::Serialize;
use sha2::{Digest, Sha256};
use std::fs;
use std::io::Write;
use std::path::Path;
use tempfile::NamedTempFile;

pub use edits::{apply, apply_edits};

/// Why an occurrence produced no candidate.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SkipReason {
    InvalidRoot,
    UnsupportedForm,
    AlreadyCanonical,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct SkipTally {
    pub invalid_root: usize,
    pub unsupported_form: usize,
    pub already_canonical: usize,
}

impl SkipTally {
    fn record(&mut self, reason: SkipReason) {
        match reason {
            SkipReason::InvalidRoot => self.invalid_root += 1,
            SkipReason::UnsupportedForm => self.unsupported_form += 1,
            SkipReason::AlreadyCanonical => self.already_canonical += 1,
        }
    }

    pub fn total(&self) -> usize {
        self.invalid_root + self.unsupported_form + self.already_canonical
    }
}

/// Candidates found in one snapshot, in document order.
#[derive(Debug, Clone, Default)]
pub struct Scan {
    pub candidates: Vec<CorrectionCandidate>,
    pub skipped: SkipTally,
    pub scopes: usize,
}

pub struct Corrector {
    families: Vec<Family>,
}

impl Corrector {
    pub fn new(config: &Config) -> Self {
        Self::with_families(&config.families)
    }

    pub fn with_families(families: &[Family]) -> Self {
        let mut families = families.to_vec();
        families.sort();
        families.dedup();
        Self { families }
    }

    pub fn families(&self) -> &[Family] {
        &self.families
    }

    /// Find every form in `content` that differs from its canonical text.
    ///
    /// Root letters are extracted once per scope and shared by all of the
    /// scope's occurrences. Fails only when the document cannot be split
    /// into root scopes.
    pub fn scan(&self, content: &str) -> Result<Scan, StructureError> {
        let scopes = parser::parse_document(content, &self.families)?;
        let lines = LineIndex::new(content);

        let mut scan = Scan {
            scopes: scopes.len(),
            ..Default::default()
        };

        for scope in &scopes {
            let root_text = scope.label.unwrap_or_default();
            let root = RootLetters::extract(root_text);

            for occurrence in &scope.occurrences {
                match evaluate(occurrence, root_text, &root, &lines) {
                    Ok(candidate) => scan.candidates.push(candidate),
                    Err(reason) => {
                        log::debug!(
                            "skipping '{}' at byte {} (root '{}'): {:?}",
                            occurrence.current,
                            occurrence.value.start,
                            root_text,
                            reason
                        );
                        scan.skipped.record(reason);
                    }
                }
            }
        }

        Ok(scan)
    }

    /// Scan a file and report what would change without touching it.
    pub fn preview(
        &self,
        file_path: &Path,
        config: &Config,
        colored: bool,
        format: &OutputFormat,
    ) -> Result<FileResult> {
        let content = fs::read_to_string(file_path)
            .with_context(|| format!("Failed to read file: {}", file_path.display()))?;

        let scan = self
            .scan(&content)
            .with_context(|| format!("Failed to parse file: {}", file_path.display()))?;

        let result = FileResult {
            candidate_count: scan.candidates.len(),
            fixed_count: 0,
            candidates: scan.candidates,
            skipped: scan.skipped,
            scopes: scan.scopes,
            snapshot: Some(snapshot_digest(content.as_bytes())),
        };

        log::info!(
            "{}: {} scopes, {} candidates, {} skipped",
            file_path.display(),
            result.scopes,
            result.candidate_count,
            result.skipped.total()
        );

        print_candidates(file_path, &result, &content, config, colored, format);

        // Write preview report
        if config.writes_reports() {
            let report_path = report::report_path(file_path, config);
            let text = report::render(file_path, &result, &content, config);
            if let Some(parent) = report_path.parent().filter(|p| !p.as_os_str().is_empty()) {
                fs::create_dir_all(parent).with_context(|| {
                    format!("Failed to create report directory: {}", parent.display())
                })?;
            }
            fs::write(&report_path, text)
                .with_context(|| format!("Failed to write report: {}", report_path.display()))?;
            log::info!("preview report written to {}", report_path.display());
        }

        Ok(result)
    }

    /// Scan a file and write every correction back in one atomic step.
    pub fn fix(&self, file_path: &Path, colored: bool) -> Result<FileResult> {
        let content = fs::read_to_string(file_path)
            .with_context(|| format!("Failed to read file: {}", file_path.display()))?;
        let digest = snapshot_digest(content.as_bytes());

        let scan = self
            .scan(&content)
            .with_context(|| format!("Failed to parse file: {}", file_path.display()))?;

        let (new_content, fixed_count) = apply(&content, &scan.candidates)
            .with_context(|| format!("Failed to apply edits to {}", file_path.display()))?;

        // Nothing to write when every form is already canonical
        if fixed_count > 0 {
            write_snapshot(file_path, &new_content, &digest)?;
        }

        let result = FileResult {
            candidate_count: scan.candidates.len(),
            fixed_count,
            candidates: scan.candidates,
            skipped: scan.skipped,
            scopes: scan.scopes,
            snapshot: Some(digest),
        };

        log::info!("{}: {} corrections written", file_path.display(), fixed_count);
        print_fixes(file_path, &result, colored);

        Ok(result)
    }
}

fn evaluate(
    occurrence: &Occurrence<'_>,
    root_text: &str,
    root: &RootLetters,
    lines: &LineIndex,
) -> Result<CorrectionCandidate, SkipReason> {
    if !root.is_valid() {
        return Err(SkipReason::InvalidRoot);
    }

    let number = occurrence.form.ok_or(SkipReason::UnsupportedForm)?;
    let (form, pattern) = match occurrence.family {
        Family::Aorist => {
            if occurrence.current.starts_with(AORIST_PREFIX) {
                return Err(SkipReason::AlreadyCanonical);
            }
            (1, Some(infer(occurrence.current)))
        }
        Family::Derived => {
            if !(2..=13).contains(&number) {
                return Err(SkipReason::UnsupportedForm);
            }
            (number, None)
        }
    };

    let generated = generate(form, root, pattern).ok_or(SkipReason::InvalidRoot)?;
    if generated == occurrence.current {
        return Err(SkipReason::AlreadyCanonical);
    }

    Ok(CorrectionCandidate {
        family: occurrence.family,
        root_text: root_text.to_string(),
        root_letters: root.clone(),
        form,
        current: occurrence.current.to_string(),
        pattern,
        generated,
        span: occurrence.value,
        matched: occurrence.matched,
        line: lines.line(occurrence.value.start),
        anomalies: paradigm::anomalies(form, root),
    })
}

pub fn snapshot_digest(bytes: &[u8]) -> String {
    format!("{:x}", Sha256::digest(bytes))
}

/// Replace `path` with `content`, provided the file still holds the snapshot
/// the edits were computed from. Written through a temporary file in the
/// same directory so a failure leaves the original untouched.
fn write_snapshot(path: &Path, content: &str, expected_digest: &str) -> Result<()> {
    let on_disk =
        fs::read(path).with_context(|| format!("Failed to re-read file: {}", path.display()))?;
    if snapshot_digest(&on_disk) != expected_digest {
        log::error!("{} changed while it was being scanned", path.display());
        anyhow::bail!(
            "{} changed on disk after it was scanned; no edits written",
            path.display()
        );
    }

    let dir = path
        .parent()
        .filter(|p| !p.as_os_str().is_empty())
        .unwrap_or_else(|| Path::new("."));

    let mut temp = NamedTempFile::new_in(dir)
        .with_context(|| format!("Failed to create temporary file in {}", dir.display()))?;
    temp.write_all(content.as_bytes())
        .context("Failed to write temporary file")?;
    temp.as_file().sync_all().context("Failed to flush temporary file")?;

    if let Ok(metadata) = fs::metadata(path) {
        fs::set_permissions(temp.path(), metadata.permissions())
            .context("Failed to copy file permissions")?;
    }

    temp.persist(path)
        .map_err(|e| e.error)
        .with_context(|| format!("Failed to write file: {}", path.display()))?;

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::morphology::diacritics::{DAMMA, FATHA, SUKUN};
    use crate::morphology::AoristPattern;
    use tempfile::tempdir;

    fn aorist_entry(value: &str) -> String {
        format!(
            "aor.\n  <form n=\"infl\">\n    <orth orig=\"Ba\" lang=\"ar\">{}</orth></form>\n",
            value
        )
    }

    fn derived_entry(form: &str, value: &str) -> String {
        format!("<form><itype>{}</itype>\n  <orth lang=\"ar\">{}</orth></form>\n", form, value)
    }

    fn scope(label: &str, body: &str) -> String {
        format!(
            "<div2 type=\"root\" n=\"x\">\n<head><foreign lang=\"ar\">{}</foreign></head>\n{}</div2>\n",
            label, body
        )
    }

    fn corrector() -> Corrector {
        Corrector::with_families(&Family::ALL)
    }

    #[test]
    fn test_scan_form_i_candidate() {
        let current = format!("\u{0628}{FATHA}\u{062A}{DAMMA}\u{0631}{FATHA}");
        let doc = scope("\u{0628}\u{062A}\u{0631}", &aorist_entry(&current));

        let scan = corrector().scan(&doc).unwrap();
        assert_eq!(scan.candidates.len(), 1);

        let candidate = &scan.candidates[0];
        assert_eq!(candidate.form, 1);
        assert_eq!(candidate.pattern, Some(AoristPattern::Damma));
        assert_eq!(candidate.current, current);
        assert_eq!(
            candidate.generated,
            format!("{AORIST_PREFIX}\u{0628}{SUKUN}\u{062A}{DAMMA}\u{0631}{DAMMA}")
        );
        assert_eq!(candidate.span.slice(&doc), current);
        assert_eq!(candidate.line, 5);
    }

    #[test]
    fn test_scan_skips_prefixed_aorist() {
        let doc = scope("\u{0628}\u{062A}\u{0631}", &aorist_entry(&format!("{AORIST_PREFIX}\u{0628}")));
        let scan = corrector().scan(&doc).unwrap();
        assert!(scan.candidates.is_empty());
        assert_eq!(scan.skipped.already_canonical, 1);
    }

    #[test]
    fn test_scan_derived_forms_and_unsupported() {
        let body = [
            derived_entry("2", "\u{0628}\u{062A}\u{0631}"),
            derived_entry("1", "\u{0628}\u{062A}\u{0631}"),
            derived_entry("14", "\u{0628}\u{062A}\u{0631}"),
        ]
        .concat();
        let doc = scope("\u{0628}\u{062A}\u{0631}", &body);

        let scan = corrector().scan(&doc).unwrap();
        assert_eq!(scan.candidates.len(), 1);
        assert_eq!(scan.candidates[0].form, 2);
        assert_eq!(scan.candidates[0].pattern, None);
        assert_eq!(scan.skipped.unsupported_form, 2);
    }

    #[test]
    fn test_scan_invalid_root() {
        let body = [aorist_entry("x"), derived_entry("4", "x")].concat();
        let doc = scope("\u{0628}", &body);

        let scan = corrector().scan(&doc).unwrap();
        assert!(scan.candidates.is_empty());
        assert_eq!(scan.skipped.invalid_root, 2);
    }

    #[test]
    fn test_scan_respects_families() {
        let body = [aorist_entry("x"), derived_entry("4", "x")].concat();
        let doc = scope("\u{0628}\u{062A}\u{0631}", &body);

        let scan = Corrector::with_families(&[Family::Aorist]).scan(&doc).unwrap();
        assert_eq!(scan.candidates.len(), 1);
        assert_eq!(scan.candidates[0].family, Family::Aorist);
    }

    #[test]
    fn test_scan_flags_anomalies() {
        let doc = scope("\u{0643}\u{062A}\u{0628}", &derived_entry("12", "x"));
        let scan = corrector().scan(&doc).unwrap();
        assert_eq!(
            scan.candidates[0].anomalies,
            vec![paradigm::Anomaly::FormTwelveRepeatedMiddle]
        );
    }

    #[test]
    fn test_scan_structure_failure() {
        let doc = "<div2 type=\"root\">\n<head><foreign lang=\"ar\">بتر</foreign></head>\n";
        assert!(corrector().scan(doc).is_err());
    }

    #[test]
    fn test_fix_writes_and_is_idempotent() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("ub0.xml");
        let body = [aorist_entry("x"), derived_entry("3", "y")].concat();
        fs::write(&path, scope("\u{0628}\u{062A}\u{0631}", &body)).unwrap();

        let first = corrector().fix(&path, false).unwrap();
        assert_eq!(first.fixed_count, 2);

        let second = corrector().fix(&path, false).unwrap();
        assert_eq!(second.fixed_count, 0);
        assert_eq!(second.candidate_count, 0);
    }

    #[test]
    fn test_fix_leaves_unparseable_file_untouched() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("broken.xml");
        let content = format!("<div2 type=\"root\">\n{}", aorist_entry("x"));
        fs::write(&path, &content).unwrap();

        assert!(corrector().fix(&path, false).is_err());
        assert_eq!(fs::read_to_string(&path).unwrap(), content);
    }

    #[test]
    fn test_write_snapshot_refuses_changed_file() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("doc.xml");
        fs::write(&path, "before").unwrap();
        let digest = snapshot_digest(b"something else");

        assert!(write_snapshot(&path, "after", &digest).is_err());
        assert_eq!(fs::read_to_string(&path).unwrap(), "before");
    }
}
