//! docsnap CLI - consolidated preview reports for directory trees
//!
//! Walks a directory, previews every supported file, and writes a single
//! navigable .docx report.

use clap::Parser;
use colored::*;
use indicatif::{ProgressBar, ProgressStyle};
use std::path::PathBuf;

/// Generate a consolidated preview report from a directory tree
#[derive(Parser)]
#[command(
    name = "docsnap",
    version,
    about = "Generate a consolidated preview report from a directory tree",
    long_about = "docsnap walks a directory, converts each supported file \
                  (PDF, Word, Excel, image, text/CSV) into a one-page preview, \
                  and assembles a single .docx report with a table of contents \
                  and clickable cross-references."
)]
struct Cli {
    /// Root directory to scan recursively
    #[arg(short, long)]
    input: PathBuf,

    /// Destination for the generated report
    #[arg(short, long, default_value = "report.docx")]
    output: PathBuf,

    /// Print the run summary as JSON
    #[arg(long)]
    json: bool,

    /// Increase log verbosity (-v info, -vv debug)
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,
}

fn main() {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    if !cli.input.is_dir() {
        eprintln!(
            "{}: input directory '{}' does not exist",
            "Error".red().bold(),
            cli.input.display()
        );
        std::process::exit(1);
    }

    if let Err(e) = run(cli) {
        eprintln!("{}: {}", "Error".red().bold(), e);
        std::process::exit(1);
    }
}

fn run(cli: Cli) -> Result<(), Box<dyn std::error::Error>> {
    let pb = create_spinner(&format!("Scanning {}...", cli.input.display()));
    let summary = docsnap::generate_report(&cli.input, &cli.output)?;
    pb.finish_and_clear();

    // The save fallback renames the file, so a changed file name means
    // the requested location was not writable.
    let substituted = summary.output.file_name() != cli.output.file_name();
    if substituted {
        println!(
            "{} Requested location was not writable; report saved to {}",
            "!".yellow().bold(),
            summary.output.display()
        );
    }

    if cli.json {
        println!("{}", serde_json::to_string_pretty(&summary)?);
    } else {
        println!(
            "{} Report generated: {}",
            "✓".green().bold(),
            summary.output.display()
        );
        println!(
            "  {} file(s) previewed, {} skipped",
            summary.rendered, summary.skipped
        );
    }

    Ok(())
}

fn init_logging(verbose: u8) {
    let level = match verbose {
        0 => "warn",
        1 => "info",
        _ => "debug",
    };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(level)).init();
}

fn create_spinner(message: &str) -> ProgressBar {
    let pb = ProgressBar::new_spinner();
    pb.set_style(
        ProgressStyle::default_spinner()
            .tick_strings(&["⠋", "⠙", "⠹", "⠸", "⠼", "⠴", "⠦", "⠧", "⠇", "⠏"])
            .template("{spinner:.blue} {msg}")
            .unwrap(),
    );
    pb.set_message(message.to_string());
    pb.enable_steady_tick(std::time::Duration::from_millis(100));
    pb
}
