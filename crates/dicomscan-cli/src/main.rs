//! dicomscan - batch DICOM metadata scanner
//!
//! Thin adapter around `dicomscan-pipeline`: argument parsing, progress
//! display and output selection. All processing semantics live in the
//! library crates.

use std::path::PathBuf;
use std::process;

use anyhow::{Context, Result};
use clap::{Parser, ValueEnum};
use colored::Colorize;
use indicatif::{ProgressBar, ProgressStyle};

use dicomscan_core::{write_report_file, ScanReport};
use dicomscan_pipeline::{BatchScanner, ScanOptions};

#[derive(Parser)]
#[command(
    name = "dicomscan",
    version,
    about = "Extract descriptive metadata from every DICOM file under a directory",
    after_help = "Examples:\n\
                  dicomscan /data/scans\n\
                  dicomscan /data/scans -o reports --parallel 8\n\
                  dicomscan /data/scans --format json > scans.json"
)]
struct Cli {
    /// Root directory to scan recursively for .dcm files
    root: PathBuf,

    /// Output directory for the XML report (created if absent)
    #[arg(short, long, default_value = "reports")]
    output_dir: PathBuf,

    /// Output format
    #[arg(short, long, value_enum, default_value = "xml")]
    format: Format,

    /// Concurrency ceiling (default: number of logical CPUs)
    #[arg(short, long)]
    parallel: Option<usize>,

    /// Log a progress line every N files (0 disables interval logging)
    #[arg(long, default_value_t = 100)]
    progress_every: usize,

    /// Suppress progress bar and summary
    #[arg(short, long)]
    quiet: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
enum Format {
    /// Timestamped XML report file in the output directory
    Xml,
    /// JSON aggregate on stdout
    Json,
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn"))
        .target(env_logger::Target::Stderr)
        .init();

    let mut options = ScanOptions::default();
    if let Some(n) = cli.parallel {
        options.concurrency = n.max(1);
    }
    options.progress_every = cli.progress_every;

    if !cli.quiet {
        eprintln!(
            "{} Scanning {} with {} workers...",
            "Info:".blue().bold(),
            cli.root.display().to_string().cyan(),
            options.concurrency.to_string().cyan()
        );
    }

    // Length is unknown until discovery completes; the callback sets it on
    // the first processed file
    let progress = if cli.quiet {
        ProgressBar::hidden()
    } else {
        let pb = ProgressBar::new(0);
        pb.set_style(
            ProgressStyle::default_bar()
                .template("{spinner:.green} [{elapsed_precise}] [{bar:40.cyan/blue}] {pos}/{len} ({percent}%) {msg}")
                .expect("template is compile-time constant")
                .progress_chars("█▓▒░  "),
        );
        pb
    };

    let bar = progress.clone();
    let scanner = BatchScanner::new(options).on_progress(move |done, total| {
        bar.set_length(total as u64);
        bar.set_position(done as u64);
    });

    let report = match scanner.run(&cli.root) {
        Ok(report) => report,
        Err(e) => {
            progress.finish_and_clear();
            eprintln!("{} {e}", "Error:".red().bold());
            process::exit(1);
        }
    };
    progress.finish_and_clear();

    if !cli.quiet {
        print_summary(&report);
    }

    match cli.format {
        Format::Xml => {
            let path = write_report_file(&report, &cli.output_dir)
                .context("Failed to write XML report")?;
            if !cli.quiet {
                eprintln!(
                    "{} Report written to {}",
                    "Info:".blue().bold(),
                    path.display().to_string().cyan()
                );
            }
        }
        Format::Json => {
            let json =
                serde_json::to_string_pretty(&report).context("Failed to serialize results")?;
            println!("{json}");
        }
    }

    Ok(())
}

fn print_summary(report: &ScanReport) {
    let skipped = report.skipped();
    eprintln!("\n{}", "=== DICOM Scan Summary ===".bold());
    eprintln!(
        "{:<16} {}",
        "Total files:",
        report.total_files.to_string().cyan()
    );
    eprintln!(
        "{:<16} {}",
        "Succeeded:",
        report.succeeded().to_string().green()
    );
    eprintln!(
        "{:<16} {}",
        "Skipped:",
        if skipped > 0 {
            skipped.to_string().red()
        } else {
            skipped.to_string().normal()
        }
    );
    eprintln!("{:<16} {:.1}s", "Elapsed:", report.elapsed.as_secs_f64());
}
