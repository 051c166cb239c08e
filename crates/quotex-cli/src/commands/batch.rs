//! Batch processing command for multiple quote files.
//!
//! Files are processed on blocking worker tasks, at most `--jobs` at a time.
//! Outcomes are re-ordered by input position before merging, so the output
//! is the same regardless of which worker finishes first. A failed document
//! is reported and skipped; its siblings still reach the merged output.

use std::fs;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::time::Instant;

use clap::Args;
use console::style;
use glob::glob;
use indicatif::{ProgressBar, ProgressStyle};
use tokio::task::JoinSet;
use tracing::{debug, error, info};

use quotex_core::models::config::PdfConfig;
use quotex_core::quote::run_document;
use quotex_core::{BatchReport, DocumentOutcome, OutputRecord, QuoteProcessor};

use super::config::load_config;
use super::process::{
    document_name, format_records, load_document, OutputFormat, EMPTY_RESULT_WARNING,
};

/// Arguments for the batch command.
#[derive(Args)]
pub struct BatchArgs {
    /// Input glob pattern (e.g. "quotes/*.pdf")
    #[arg(required = true)]
    input: String,

    /// Merged output file (default: configured file name, extension per format)
    #[arg(short, long)]
    output: Option<PathBuf>,

    /// Output format (default: from config)
    #[arg(short, long, value_enum)]
    format: Option<OutputFormat>,

    /// Also write a per-document summary CSV next to the output
    #[arg(long)]
    summary: bool,

    /// Number of parallel workers
    #[arg(short = 'j', long, default_value = "4")]
    jobs: usize,

    /// Stop at the first failed document instead of skipping it
    #[arg(long)]
    fail_fast: bool,

    /// Exit with an error when no line items are found
    #[arg(long)]
    fail_on_empty: bool,
}

pub async fn run(args: BatchArgs, config_path: Option<&str>) -> anyhow::Result<()> {
    let start = Instant::now();

    let config = load_config(config_path)?;
    let format = OutputFormat::resolve(args.format, &config)?;

    let files = matching_files(&args.input)?;
    if files.is_empty() {
        anyhow::bail!("No matching files found for pattern: {}", args.input);
    }

    println!(
        "{} Found {} files to process",
        style("ℹ").blue(),
        files.len()
    );

    let overall_pb = ProgressBar::new(files.len() as u64);
    overall_pb.set_style(
        ProgressStyle::default_bar()
            .template("{spinner:.green} [{elapsed_precise}] [{bar:40.cyan/blue}] {pos}/{len} files")?
            .progress_chars("=>-"),
    );

    let processor = Arc::new(QuoteProcessor::from_config(&config.extraction));
    let pdf_config = Arc::new(config.pdf.clone());
    let jobs = args.jobs.max(1);
    info!("Processing {} files with {} workers", files.len(), jobs);

    let mut pending = files.into_iter().enumerate();
    let mut tasks = JoinSet::new();
    let mut outcomes = Vec::new();

    loop {
        while tasks.len() < jobs {
            let Some((index, path)) = pending.next() else {
                break;
            };
            let processor = Arc::clone(&processor);
            let pdf_config = Arc::clone(&pdf_config);
            tasks.spawn_blocking(move || process_file(&processor, &pdf_config, index, &path));
        }

        let Some(joined) = tasks.join_next().await else {
            break;
        };
        let outcome = joined?;
        overall_pb.inc(1);

        if let Err(e) = &outcome.result {
            if args.fail_fast {
                tasks.abort_all();
                overall_pb.abandon();
                error!("Failed to process {}: {}", outcome.name, e);
                anyhow::bail!("Processing failed for {}: {}", outcome.name, e);
            }
        }
        outcomes.push(outcome);
    }

    overall_pb.finish_and_clear();

    let report = BatchReport::assemble(outcomes);

    let output_path = args
        .output
        .unwrap_or_else(|| default_output_path(&config.output.file_name, format));
    if let Some(parent) = output_path.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs::create_dir_all(parent)?;
    }

    if args.summary {
        let summary_path = summary_path(&output_path);
        write_summary(&summary_path, &report)?;
        println!(
            "{} Summary written to {}",
            style("✓").green(),
            summary_path.display()
        );
    }

    let failed: Vec<(&str, &str)> = report.failures().collect();
    let records: Vec<OutputRecord> = report.records().cloned().collect();

    println!();
    println!(
        "{} Processed {} files in {:?}",
        style("✓").green(),
        report.outcomes.len(),
        start.elapsed()
    );
    println!(
        "   {} successful, {} failed, {} records",
        style(report.success_count()).green(),
        style(failed.len()).red(),
        records.len()
    );

    if !failed.is_empty() {
        println!();
        println!("{}", style("Failed files:").red());
        for (name, reason) in &failed {
            println!("  - {}: {}", name, reason);
        }
    }

    if records.is_empty() {
        eprintln!("{} {}", style("⚠").yellow(), EMPTY_RESULT_WARNING);
        if args.fail_on_empty {
            anyhow::bail!("No records extracted");
        }
        return Ok(());
    }

    fs::write(&output_path, format_records(&records, format)?)?;
    debug!("Wrote {} records to {}", records.len(), output_path.display());

    println!(
        "{} Merged output written to {}",
        style("✓").green(),
        output_path.display()
    );

    Ok(())
}

/// Expand the glob, keeping supported inputs in sorted path order.
fn matching_files(pattern: &str) -> anyhow::Result<Vec<PathBuf>> {
    let mut files: Vec<PathBuf> = glob(pattern)?
        .filter_map(|r| r.ok())
        .filter(|p| {
            let ext = p.extension().and_then(|e| e.to_str()).unwrap_or("");
            matches!(ext.to_lowercase().as_str(), "pdf" | "txt")
        })
        .collect();
    files.sort();
    Ok(files)
}

fn process_file(
    processor: &QuoteProcessor,
    pdf_config: &PdfConfig,
    index: usize,
    path: &Path,
) -> DocumentOutcome {
    run_document(processor, index, &document_name(path), || {
        load_document(path, pdf_config)
    })
}

/// Configured merged file name with the extension of the chosen format.
fn default_output_path(file_name: &str, format: OutputFormat) -> PathBuf {
    PathBuf::from(file_name).with_extension(format.extension())
}

fn summary_path(output: &Path) -> PathBuf {
    output
        .parent()
        .map(|dir| dir.join("summary.csv"))
        .unwrap_or_else(|| PathBuf::from("summary.csv"))
}

fn write_summary(path: &Path, report: &BatchReport) -> anyhow::Result<()> {
    let mut wtr = csv::Writer::from_path(path)?;

    wtr.write_record([
        "filename",
        "status",
        "quote_numbers",
        "records",
        "pages",
        "headers",
        "rejected_lines",
        "processing_time_ms",
        "error",
    ])?;

    for outcome in &report.outcomes {
        match &outcome.result {
            Ok(result) => {
                let mut quotes: Vec<&str> = Vec::new();
                for record in &result.records {
                    if !quotes.contains(&record.quote_number.as_str()) {
                        quotes.push(&record.quote_number);
                    }
                }

                wtr.write_record([
                    outcome.name.as_str(),
                    "success",
                    &quotes.join(";"),
                    &result.records.len().to_string(),
                    &result.stats.pages.to_string(),
                    &result.stats.headers.to_string(),
                    &result.stats.rejected_lines.to_string(),
                    &result.processing_time_ms.to_string(),
                    "",
                ])?;
            }
            Err(e) => {
                wtr.write_record([outcome.name.as_str(), "error", "", "", "", "", "", "", e.as_str()])?;
            }
        }
    }

    wtr.flush()?;
    Ok(())
}
