use anyhow::Result;
use clap::{CommandFactory, Parser};
use clap_complete::{generate, Shell};
use indicatif::{ProgressBar, ProgressStyle};
use std::io;
use std::path::{Path, PathBuf};
use verbfix::cli::output::{self, OutputFormat};
use verbfix::morphology::AoristPattern;
use verbfix::parser::Family;
use verbfix::{table, Config, Corrector};
use walkdir::WalkDir;

#[derive(Parser, Debug)]
#[command(name = "verbfix")]
#[command(version, about = "Normalize Arabic verb forms in Lane's Lexicon XML", long_about = None)]
struct Cli {
    /// Lexicon files or directories to scan
    #[arg(value_name = "FILES")]
    files: Vec<PathBuf>,

    /// Write the corrections in place (default is preview only)
    #[arg(long)]
    apply: bool,

    /// Skip the confirmation prompt before applying
    #[arg(short, long, requires = "apply")]
    yes: bool,

    /// Form families to correct (aorist, derived, all)
    #[arg(long, value_name = "FAMILY")]
    family: Vec<String>,

    /// Output format (text, json)
    #[arg(short = 'o', long, default_value = "text")]
    format: OutputFormat,

    /// Directory for preview reports
    #[arg(long, value_name = "DIR")]
    report_dir: Option<PathBuf>,

    /// Do not write preview reports
    #[arg(long)]
    no_report: bool,

    /// Disable colored output
    #[arg(long)]
    no_color: bool,

    /// Log level (error, warn, info, debug, trace)
    #[arg(long, value_name = "LEVEL")]
    log_level: Option<String>,

    /// Generate shell completion script
    #[arg(long, value_name = "SHELL")]
    completion: Option<Shell>,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Parser, Debug)]
enum Commands {
    /// Browse the conjugation table
    Forms {
        #[command(subcommand)]
        action: FormsCommands,
    },
    /// Generate one canonical form
    Generate {
        /// Root letters, e.g. بتر
        root: String,
        /// Form number (1-13)
        form: u8,
        /// Form I aorist vowel (damma, kasra, fatha)
        #[arg(long, conflicts_with = "from")]
        pattern: Option<AoristPattern>,
        /// Infer the Form I vowel from an existing aorist
        #[arg(long, value_name = "CURRENT")]
        from: Option<String>,
    },
}

#[derive(Parser, Debug)]
enum FormsCommands {
    /// List Forms I-XIII
    List,
    /// Show one form with its variants
    Show {
        /// Form number (1-13)
        number: u8,
    },
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    // Handle shell completion generation
    if let Some(shell) = cli.completion {
        let mut cmd = Cli::command();
        generate(shell, &mut cmd, "verbfix", &mut io::stdout());
        return Ok(());
    }

    let colored = !cli.no_color;
    if !colored {
        colored::control::set_override(false);
    }

    // Handle subcommands
    if let Some(command) = cli.command {
        init_logging(cli.log_level.as_deref());
        return handle_command(command, colored);
    }

    // Load configuration
    let config = Config::load(
        parse_families(&cli.family)?,
        cli.report_dir.clone(),
        cli.no_report,
        cli.log_level.clone(),
    )?;
    init_logging(config.log_level.as_deref());

    // Validate input files
    if cli.files.is_empty() {
        anyhow::bail!("No files specified. Use --help for usage information.");
    }

    let files = expand_inputs(&cli.files, &config);
    if files.is_empty() {
        anyhow::bail!(
            "No input files found (looked for extensions: {})",
            config.extensions.join(", ")
        );
    }

    let attended = console::user_attended();
    if cli.apply && !cli.yes && attended && !output::confirm_apply(files.len())? {
        println!("Aborted; no files were changed.");
        return Ok(());
    }

    // Initialize corrector
    let corrector = Corrector::new(&config);
    log::debug!("families: {:?}", corrector.families());

    let progress = if attended && files.len() > 1 {
        let pb = ProgressBar::new(files.len() as u64);
        pb.set_style(
            ProgressStyle::default_bar()
                .template("{spinner:.cyan} [{bar:30.cyan/blue}] {pos}/{len} {wide_msg}")
                .unwrap_or_else(|_| ProgressStyle::default_bar()),
        );
        Some(pb)
    } else {
        None
    };

    let mut total_candidates = 0;
    let mut total_fixed = 0;
    let mut changed_files = 0;
    let mut succeeded = 0;

    // Process files
    for file_path in &files {
        if let Some(pb) = &progress {
            pb.set_message(file_path.display().to_string());
        }

        let outcome = {
            let run = || {
                if cli.apply {
                    corrector.fix(file_path, colored)
                } else {
                    corrector.preview(file_path, &config, colored, &cli.format)
                }
            };
            match &progress {
                Some(pb) => pb.suspend(run),
                None => run(),
            }
        };

        match outcome {
            Ok(result) => {
                succeeded += 1;
                total_candidates += result.candidate_count;
                total_fixed += result.fixed_count;
                if result.candidate_count > 0 {
                    changed_files += 1;
                }
            }
            Err(e) => {
                log::warn!("{} failed: {:#}", file_path.display(), e);
                match &progress {
                    Some(pb) => pb.suspend(|| output::print_file_error(file_path, &e, colored)),
                    None => output::print_file_error(file_path, &e, colored),
                }
            }
        }

        if let Some(pb) = &progress {
            pb.inc(1);
        }
    }

    if let Some(pb) = progress {
        pb.finish_and_clear();
    }

    // Print summary
    let json = matches!(cli.format, OutputFormat::Json) && !cli.apply;
    if !json {
        if cli.apply {
            output::print_fix_summary(total_fixed, changed_files, colored);
        } else {
            output::print_preview_summary(total_candidates, changed_files, colored);
        }
        if files.len() > 1 || succeeded < files.len() {
            output::print_batch_summary(succeeded, files.len(), colored);
        }
    }

    // Exit with appropriate code
    if succeeded < files.len() {
        std::process::exit(1);
    }

    Ok(())
}

/// An explicit level (flag or config) wins; otherwise `RUST_LOG` decides,
/// and with neither set only warnings and errors are shown.
fn init_logging(level: Option<&str>) {
    let env = env_logger::Env::default().default_filter_or("warn");
    let mut builder = env_logger::Builder::from_env(env);

    if let Some(level) = level {
        builder.filter_level(parse_level(level));
    }

    builder.format_timestamp_secs().init();
}

fn parse_level(level: &str) -> log::LevelFilter {
    match level.to_lowercase().as_str() {
        "error" => log::LevelFilter::Error,
        "warn" => log::LevelFilter::Warn,
        "info" => log::LevelFilter::Info,
        "debug" => log::LevelFilter::Debug,
        "trace" => log::LevelFilter::Trace,
        "off" => log::LevelFilter::Off,
        _ => log::LevelFilter::Warn,
    }
}

/// `None` leaves the configured families alone.
fn parse_families(values: &[String]) -> Result<Option<Vec<Family>>> {
    if values.is_empty() {
        return Ok(None);
    }

    let mut families = Vec::new();
    for value in values {
        if value.eq_ignore_ascii_case("all") {
            families.extend(Family::ALL);
        } else {
            families.push(value.parse::<Family>().map_err(anyhow::Error::msg)?);
        }
    }
    families.sort();
    families.dedup();
    Ok(Some(families))
}

/// Files as given, directories walked for configured extensions. Each
/// directory's files are sorted so runs are repeatable.
fn expand_inputs(inputs: &[PathBuf], config: &Config) -> Vec<PathBuf> {
    let mut files = Vec::new();

    for input in inputs {
        if input.is_dir() {
            let mut found: Vec<PathBuf> = WalkDir::new(input)
                .into_iter()
                .filter_map(|entry| match entry {
                    Ok(entry) => Some(entry),
                    Err(e) => {
                        log::warn!("skipping unreadable entry under {}: {}", input.display(), e);
                        None
                    }
                })
                .filter(|entry| entry.file_type().is_file())
                .map(|entry| entry.into_path())
                .filter(|path| config.accepts(path) && !is_report(path))
                .collect();
            found.sort();
            files.extend(found);
        } else {
            // Missing files are reported per file later.
            files.push(input.clone());
        }
    }

    files
}

fn is_report(path: &Path) -> bool {
    path.file_name()
        .and_then(|n| n.to_str())
        .map(|n| n.starts_with("verbfix_preview_"))
        .unwrap_or(false)
}

fn handle_command(command: Commands, colored: bool) -> Result<()> {
    match command {
        Commands::Forms { action } => match action {
            FormsCommands::List => table::listing::list_forms(colored)?,
            FormsCommands::Show { number } => table::listing::show_form(number, colored)?,
        },
        Commands::Generate {
            root,
            form,
            pattern,
            from,
        } => {
            table::listing::generate_form(&root, form, pattern, from.as_deref(), colored)?;
        }
    }
    Ok(())
}
