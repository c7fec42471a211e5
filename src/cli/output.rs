use crate::cli::report::context_snippet;
use crate::morphology::Paradigm;
use crate::{Config, CorrectionCandidate, FileResult, SkipTally};
use anyhow::Result;
use colored::*;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::path::Path;
use std::str::FromStr;

#[derive(Debug, Clone, Copy)]
pub enum OutputFormat {
    Text,
    Json,
}

impl FromStr for OutputFormat {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "text" => Ok(OutputFormat::Text),
            "json" => Ok(OutputFormat::Json),
            _ => Err(format!("Unknown format: {}", s)),
        }
    }
}

impl fmt::Display for OutputFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            OutputFormat::Text => write!(f, "text"),
            OutputFormat::Json => write!(f, "json"),
        }
    }
}

#[derive(Debug, Serialize, Deserialize)]
struct JsonCandidate {
    line: usize,
    family: String,
    form: u8,
    root: String,
    root_letters: String,
    pattern: Option<String>,
    current: String,
    generated: String,
    start: usize,
    end: usize,
    anomalies: Vec<String>,
    context: String,
}

#[derive(Debug, Serialize, Deserialize)]
struct JsonOutput {
    file: String,
    snapshot_sha256: Option<String>,
    scopes: usize,
    total_candidates: usize,
    skipped: JsonSkipped,
    candidates: Vec<JsonCandidate>,
}

#[derive(Debug, Serialize, Deserialize)]
struct JsonSkipped {
    invalid_root: usize,
    unsupported_form: usize,
    already_canonical: usize,
}

impl From<SkipTally> for JsonSkipped {
    fn from(tally: SkipTally) -> Self {
        Self {
            invalid_root: tally.invalid_root,
            unsupported_form: tally.unsupported_form,
            already_canonical: tally.already_canonical,
        }
    }
}

pub fn print_candidates(
    file_path: &Path,
    result: &FileResult,
    content: &str,
    config: &Config,
    colored_output: bool,
    format: &OutputFormat,
) {
    match format {
        OutputFormat::Text => print_text_candidates(file_path, result, colored_output),
        OutputFormat::Json => print_json_candidates(file_path, result, content, config),
    }
}

fn form_label(candidate: &CorrectionCandidate) -> String {
    let roman = Paradigm::get(candidate.form).map(|p| p.roman).unwrap_or("?");
    match candidate.pattern {
        Some(pattern) => format!("Form {} ({})", roman, pattern),
        None => format!("Form {}", roman),
    }
}

fn print_text_candidates(file_path: &Path, result: &FileResult, colored_output: bool) {
    if result.candidates.is_empty() {
        return;
    }

    let file_name = file_path.display().to_string();

    if colored_output {
        println!("\n{}", file_name.bold().underline());
    } else {
        println!("\n{}", file_name);
    }

    for candidate in &result.candidates {
        let line_info = format!("{}", candidate.line);
        let label = form_label(candidate);

        if colored_output {
            println!(
                "  {} {} {} ({})",
                line_info.blue().bold(),
                label.cyan(),
                candidate.root_text.bold(),
                candidate.root_letters.to_string().dimmed()
            );
            println!(
                "    {} {} {}",
                candidate.current.red(),
                "→".dimmed(),
                candidate.generated.green()
            );
            for anomaly in &candidate.anomalies {
                println!("    {} {}", "!".yellow().bold(), anomaly.describe().yellow());
            }
        } else {
            println!(
                "  {} {} {} ({})",
                line_info, label, candidate.root_text, candidate.root_letters
            );
            println!("    {} → {}", candidate.current, candidate.generated);
            for anomaly in &candidate.anomalies {
                println!("    ! {}", anomaly.describe());
            }
        }
    }
}

fn print_json_candidates(file_path: &Path, result: &FileResult, content: &str, config: &Config) {
    let candidates: Vec<JsonCandidate> = result
        .candidates
        .iter()
        .map(|c| JsonCandidate {
            line: c.line,
            family: c.family.to_string(),
            form: c.form,
            root: c.root_text.clone(),
            root_letters: c.root_letters.to_string(),
            pattern: c.pattern.map(|p| p.to_string()),
            current: c.current.clone(),
            generated: c.generated.clone(),
            start: c.span.start,
            end: c.span.end,
            anomalies: c.anomalies.iter().map(|a| a.describe().to_string()).collect(),
            context: context_snippet(content, c.matched, config.context_width),
        })
        .collect();

    let output = JsonOutput {
        file: file_path.display().to_string(),
        snapshot_sha256: result.snapshot.clone(),
        scopes: result.scopes,
        total_candidates: result.candidate_count,
        skipped: result.skipped.into(),
        candidates,
    };

    // One object per line so a batch stays machine-readable
    match serde_json::to_string(&output) {
        Ok(json) => println!("{}", json),
        Err(e) => log::error!("Failed to serialize results for {}: {}", file_path.display(), e),
    }
}

pub fn print_fixes(file_path: &Path, result: &FileResult, colored: bool) {
    if result.fixed_count == 0 {
        return;
    }

    if colored {
        println!("\n{}", file_path.display().to_string().bold().underline());
    } else {
        println!("\n{}", file_path.display());
    }

    for candidate in &result.candidates {
        if colored {
            println!(
                "  {} {} ({})",
                form_label(candidate).cyan(),
                candidate.root_text.bold(),
                candidate.root_letters.to_string().dimmed()
            );
            println!(
                "    {} {} {} {}",
                "Fixed:".green(),
                candidate.current,
                "->".dimmed(),
                candidate.generated
            );
        } else {
            println!(
                "  {} {} ({})",
                form_label(candidate),
                candidate.root_text,
                candidate.root_letters
            );
            println!("    Fixed: {} -> {}", candidate.current, candidate.generated);
        }
    }
}

pub fn print_file_error(file_path: &Path, error: &anyhow::Error, colored: bool) {
    if colored {
        eprintln!(
            "{} {}: {:#}",
            "✗".red().bold(),
            file_path.display().to_string().bold(),
            error
        );
    } else {
        eprintln!("✗ {}: {:#}", file_path.display(), error);
    }
}

fn plural(count: usize, one: &'static str, many: &'static str) -> &'static str {
    if count == 1 {
        one
    } else {
        many
    }
}

pub fn print_preview_summary(total_candidates: usize, files: usize, colored: bool) {
    println!();
    if total_candidates == 0 {
        if colored {
            println!("{}", "✓ All verb forms are canonical!".green().bold());
        } else {
            println!("✓ All verb forms are canonical!");
        }
    } else {
        let form_word = plural(total_candidates, "verb form needs", "verb forms need");
        if colored {
            println!(
                "{} {} {} correction in {} {}",
                "✗".red().bold(),
                total_candidates.to_string().red().bold(),
                form_word,
                files,
                plural(files, "file", "files")
            );
            println!("Review the preview, then re-run with {} to write the changes.", "--apply".cyan());
        } else {
            println!(
                "✗ {} {} correction in {} {}",
                total_candidates,
                form_word,
                files,
                plural(files, "file", "files")
            );
            println!("Review the preview, then re-run with --apply to write the changes.");
        }
    }
}

pub fn print_fix_summary(total_fixed: usize, files: usize, colored: bool) {
    println!();
    if total_fixed == 0 {
        if colored {
            println!("{}", "No corrections needed!".green().bold());
        } else {
            println!("No corrections needed!");
        }
    } else {
        let fix_word = plural(total_fixed, "correction", "corrections");
        if colored {
            println!(
                "{} {} {} applied to {} {}",
                "✓".green().bold(),
                total_fixed.to_string().green().bold(),
                fix_word,
                files,
                plural(files, "file", "files")
            );
        } else {
            println!(
                "✓ {} {} applied to {} {}",
                total_fixed,
                fix_word,
                files,
                plural(files, "file", "files")
            );
        }
    }
}

pub fn print_batch_summary(succeeded: usize, total: usize, colored: bool) {
    let line = format!("Processing complete: {}/{} files processed successfully.", succeeded, total);
    if !colored {
        println!("{}", line);
    } else if succeeded == total {
        println!("{}", line.green());
    } else {
        println!("{}", line.yellow().bold());
    }
}

/// Ask before an irreversible apply.
pub fn confirm_apply(files: usize) -> Result<bool> {
    let prompt = format!(
        "Apply corrections in place to {} {}?",
        files,
        plural(files, "file", "files")
    );
    let answer = dialoguer::Confirm::new()
        .with_prompt(prompt)
        .default(false)
        .interact()?;
    Ok(answer)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_output_format_parsing() {
        assert!(matches!("TEXT".parse::<OutputFormat>(), Ok(OutputFormat::Text)));
        assert!(matches!("json".parse::<OutputFormat>(), Ok(OutputFormat::Json)));
        assert!("yaml".parse::<OutputFormat>().is_err());
        assert_eq!(OutputFormat::Json.to_string(), "json");
    }

    #[test]
    fn test_plural() {
        assert_eq!(plural(1, "file", "files"), "file");
        assert_eq!(plural(0, "file", "files"), "files");
    }
}
