use crate::morphology::assimilation::{self, Branch, ASSIMILATING, MIM, NUN};
use crate::morphology::paradigm::{anomalies, FA_AIN_LAM, PARADIGMS};
use crate::morphology::pattern::LANE_VARIETIES;
use crate::morphology::{infer, Anomaly, AoristPattern, Paradigm, RootLetters};
use anyhow::Result;
use colored::*;

/// A single form rendered for one root.
#[derive(Debug, Clone)]
pub struct Rendered {
    pub paradigm: &'static Paradigm,
    pub root: RootLetters,
    pub pattern: Option<AoristPattern>,
    pub branch: Branch,
    pub text: String,
    pub anomalies: Vec<Anomaly>,
}

/// Render `form` for `root_text`. For Form I the vowel comes from
/// `pattern`, else is inferred from `from`, else defaults to damma.
pub fn render(
    root_text: &str,
    form: u8,
    pattern: Option<AoristPattern>,
    from: Option<&str>,
) -> Result<Rendered> {
    let paradigm = match Paradigm::get(form) {
        Some(p) => p,
        None => anyhow::bail!("Form {} is not in the table; expected a number from 1 to 13", form),
    };

    let root = RootLetters::extract(root_text);
    let (r1, r2, r3) = match root.radicals() {
        Some(radicals) => radicals,
        None => anyhow::bail!(
            "Root '{}' does not have three radicals (found '{}')",
            root_text,
            root
        ),
    };

    let pattern = if form == 1 {
        Some(pattern.or_else(|| from.map(infer)).unwrap_or_default())
    } else {
        if pattern.is_some() || from.is_some() {
            log::warn!("aorist pattern ignored for Form {}", paradigm.roman);
        }
        None
    };

    let branch = assimilation::branch(form, r1);
    let text = paradigm.render_branch(branch, (r1, r2, r3), pattern.unwrap_or_default());

    Ok(Rendered {
        paradigm,
        anomalies: anomalies(form, &root),
        root,
        pattern,
        branch,
        text,
    })
}

pub fn list_forms(colored: bool) -> Result<()> {
    if colored {
        println!("{}", "Verb forms:".bold());
    } else {
        println!("Verb forms:");
    }
    println!();

    for paradigm in PARADIGMS.iter() {
        let name = paradigm.pattern_name();
        let marker = if paradigm.has_variant() { "*" } else { " " };
        if colored {
            println!(
                "  {:>2} {:<4} {} {} {}",
                paradigm.number.to_string().blue().bold(),
                paradigm.roman.cyan(),
                name.bold(),
                marker.yellow(),
                paradigm.description.dimmed()
            );
        } else {
            println!(
                "  {:>2} {:<4} {} {} {}",
                paradigm.number, paradigm.roman, name, marker, paradigm.description
            );
        }
    }

    println!();
    println!("* has a variant for some first radicals; see `verbfix forms show N`");
    Ok(())
}

pub fn show_form(number: u8, colored: bool) -> Result<()> {
    let paradigm = match Paradigm::get(number) {
        Some(p) => p,
        None => anyhow::bail!("Form {} is not in the table; expected a number from 1 to 13", number),
    };

    if colored {
        println!("{} {}", format!("Form {}", paradigm.roman).cyan().bold(), paradigm.pattern_name().bold());
    } else {
        println!("Form {} {}", paradigm.roman, paradigm.pattern_name());
    }
    println!("Description: {}", paradigm.description);
    println!();

    for line in form_details(paradigm) {
        println!("  {}", line);
    }

    Ok(())
}

/// Variant and pattern notes shown by `forms show`.
fn form_details(paradigm: &Paradigm) -> Vec<String> {
    let mut lines = Vec::new();

    match paradigm.number {
        1 => {
            lines.push("Aorist vowels (Lane's varieties):".to_string());
            for pattern in AoristPattern::ALL {
                lines.push(format!(
                    "  {:<6} {}",
                    pattern.name(),
                    paradigm.render(FA_AIN_LAM, pattern)
                ));
            }
            for variety in LANE_VARIETIES.iter() {
                lines.push(format!("  {}. {} -> {}", variety.number, variety.perfect, variety.aorist));
            }
        }
        5 | 6 => {
            let letters: Vec<String> = ASSIMILATING.iter().map(|c| c.to_string()).collect();
            lines.push(format!("Assimilated when r1 is one of: {}", letters.join(" ")));
            lines.push(format!(
                "  e.g. {}",
                paradigm.render_branch(Branch::Assimilated, FA_AIN_LAM, AoristPattern::default())
            ));
        }
        7 => {
            lines.push(format!("Doubled when r1 is {} or {}", NUN, MIM));
            lines.push(format!(
                "  e.g. {}",
                paradigm.render_branch(Branch::Doubled, FA_AIN_LAM, AoristPattern::default())
            ));
        }
        8 => lines.push(Anomaly::FormEightUnassimilated.describe().to_string()),
        12 => lines.push(Anomaly::FormTwelveRepeatedMiddle.describe().to_string()),
        _ => {}
    }

    lines
}

pub fn generate_form(
    root_text: &str,
    form: u8,
    pattern: Option<AoristPattern>,
    from: Option<&str>,
    colored: bool,
) -> Result<()> {
    let rendered = render(root_text, form, pattern, from)?;

    let label = match rendered.pattern {
        Some(pattern) => format!("Form {} ({})", rendered.paradigm.roman, pattern.variety_name()),
        None => format!("Form {}", rendered.paradigm.roman),
    };

    if colored {
        println!("{} {} {}", label.cyan(), rendered.root.to_string().dimmed(), "→".dimmed());
        println!("{}", rendered.text.green().bold());
    } else {
        println!("{} {} →", label, rendered.root);
        println!("{}", rendered.text);
    }

    if rendered.branch != Branch::Generic {
        println!("branch: {:?}", rendered.branch);
    }
    for anomaly in &rendered.anomalies {
        if colored {
            println!("{} {}", "!".yellow().bold(), anomaly.describe().yellow());
        } else {
            println!("! {}", anomaly.describe());
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::morphology::diacritics::{DAMMA, FATHA, KASRA, SHADDA, SUKUN};

    const BA: char = '\u{0628}';
    const TA: char = '\u{062A}';
    const RA: char = '\u{0631}';
    const SAD: char = '\u{0635}';

    #[test]
    fn test_render_form_one_from_current() {
        let from = format!("{BA}{FATHA}{TA}{KASRA}{RA}{FATHA}");
        let rendered = render("بتر", 1, None, Some(&from)).unwrap();
        assert_eq!(rendered.pattern, Some(AoristPattern::Kasra));
        assert_eq!(
            rendered.text,
            format!("\u{064A}{FATHA}{BA}{SUKUN}{TA}{KASRA}{RA}{DAMMA}")
        );
    }

    #[test]
    fn test_explicit_pattern_wins() {
        let from = format!("{BA}{FATHA}{TA}{KASRA}{RA}{FATHA}");
        let rendered = render("بتر", 1, Some(AoristPattern::Fatha), Some(&from)).unwrap();
        assert_eq!(rendered.pattern, Some(AoristPattern::Fatha));
    }

    #[test]
    fn test_render_assimilated_branch() {
        let rendered = render("صبر", 5, None, None).unwrap();
        assert_eq!(rendered.branch, Branch::Assimilated);
        assert_eq!(
            rendered.text,
            format!("\u{0627}{KASRA}{SAD}{SHADDA}{FATHA}{BA}{SHADDA}{FATHA}{RA}{FATHA}")
        );
        assert!(rendered.pattern.is_none());
    }

    #[test]
    fn test_render_rejects_bad_input() {
        assert!(render("بت", 2, None, None).is_err());
        assert!(render("بتر", 14, None, None).is_err());
        assert!(render("بتر", 0, None, None).is_err());
    }

    #[test]
    fn test_form_details() {
        let form_one = form_details(Paradigm::get(1).unwrap());
        assert!(form_one.iter().any(|l| l.starts_with("  kasra")));
        assert_eq!(form_one.len(), 1 + 3 + 6);

        let form_seven = form_details(Paradigm::get(7).unwrap());
        assert!(form_seven[0].starts_with("Doubled"));

        assert!(form_details(Paradigm::get(2).unwrap()).is_empty());
    }
}
