//! Process command - extract line items from a single quote file.

use std::fs;
use std::path::{Path, PathBuf};
use std::time::Instant;

use clap::{Args, ValueEnum};
use console::style;
use indicatif::{ProgressBar, ProgressStyle};
use tracing::{debug, info};

use quotex_core::models::config::{PdfConfig, QuotexConfig};
use quotex_core::pdf::{document_from_pages, split_text_pages, PdfExtractor};
use quotex_core::{OutputRecord, QuoteDocument, QuoteParser, QuoteProcessor};

use super::config::load_config;

/// Rows shown by the text preview.
const PREVIEW_ROWS: usize = 100;

/// Printed when a run produced no records.
pub const EMPTY_RESULT_WARNING: &str = "No line items found in the supplied documents.";

/// Arguments for the process command.
#[derive(Args)]
pub struct ProcessArgs {
    /// Input file (PDF or plain-text page dump)
    #[arg(required = true)]
    input: PathBuf,

    /// Output file (default: stdout)
    #[arg(short, long)]
    output: Option<PathBuf>,

    /// Output format (default: from config)
    #[arg(short, long, value_enum)]
    format: Option<OutputFormat>,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    /// CSV with the full column header
    Csv,
    /// JSON array of records
    Json,
    /// Plain text preview
    Text,
}

impl OutputFormat {
    /// Resolve an explicit choice, falling back to the configured default.
    pub fn resolve(explicit: Option<Self>, config: &QuotexConfig) -> anyhow::Result<Self> {
        match explicit {
            Some(format) => Ok(format),
            None => <Self as ValueEnum>::from_str(&config.output.format, true).map_err(|_| {
                anyhow::anyhow!("Unknown output format in config: {}", config.output.format)
            }),
        }
    }

    pub fn extension(&self) -> &'static str {
        match self {
            OutputFormat::Csv => "csv",
            OutputFormat::Json => "json",
            OutputFormat::Text => "txt",
        }
    }
}

pub async fn run(args: ProcessArgs, config_path: Option<&str>) -> anyhow::Result<()> {
    let start = Instant::now();

    let config = load_config(config_path)?;
    let format = OutputFormat::resolve(args.format, &config)?;

    if !args.input.exists() {
        anyhow::bail!("Input file not found: {}", args.input.display());
    }

    info!("Processing file: {}", args.input.display());

    let pb = ProgressBar::new_spinner();
    pb.set_style(ProgressStyle::default_spinner().template("{spinner:.green} [{elapsed_precise}] {msg}")?);
    pb.set_message("Reading pages...");

    let document = load_document(&args.input, &config.pdf)?;
    debug!("Loaded {} pages from {}", document.pages.len(), document.name);

    pb.set_message("Extracting line items...");
    let processor = QuoteProcessor::from_config(&config.extraction);
    let result = processor.process(&document);

    pb.finish_and_clear();

    if result.records.is_empty() {
        eprintln!("{} {}", style("⚠").yellow(), EMPTY_RESULT_WARNING);
    }

    let output = format_records(&result.records, format)?;

    if let Some(output_path) = &args.output {
        fs::write(output_path, &output)?;
        println!(
            "{} {} records written to {}",
            style("✓").green(),
            result.records.len(),
            output_path.display()
        );
    } else {
        print!("{}", output);
    }

    debug!(
        "Stats: {:?}, total processing time: {:?}",
        result.stats,
        start.elapsed()
    );

    Ok(())
}

/// Read a source file into page texts.
///
/// `.pdf` goes through the PDF extractor; `.txt` is read as a form-feed
/// separated page dump.
pub fn load_document(path: &Path, config: &PdfConfig) -> anyhow::Result<QuoteDocument> {
    let extension = path
        .extension()
        .and_then(|e| e.to_str())
        .unwrap_or("")
        .to_lowercase();

    let pages = match extension.as_str() {
        "pdf" => PdfExtractor::pages_from_bytes(&fs::read(path)?)?,
        "txt" => split_text_pages(&fs::read_to_string(path)?, config.page_separator),
        _ => anyhow::bail!("Unsupported file format: {}", extension),
    };

    Ok(document_from_pages(&document_name(path), pages, config))
}

/// Name recorded in the PDF column.
pub fn document_name(path: &Path) -> String {
    path.file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_else(|| path.display().to_string())
}

pub fn format_records(records: &[OutputRecord], format: OutputFormat) -> anyhow::Result<String> {
    match format {
        OutputFormat::Csv => format_csv(records),
        OutputFormat::Json => Ok(format!("{}\n", serde_json::to_string_pretty(records)?)),
        OutputFormat::Text => Ok(format_text(records)),
    }
}

fn format_csv(records: &[OutputRecord]) -> anyhow::Result<String> {
    let mut wtr = csv::Writer::from_writer(vec![]);

    wtr.write_record(OutputRecord::COLUMNS)?;
    for record in records {
        wtr.write_record(record.to_row())?;
    }

    let data = String::from_utf8(wtr.into_inner()?)?;
    Ok(data)
}

fn format_text(records: &[OutputRecord]) -> String {
    let mut output = String::new();

    output.push_str(&format!(
        "{:<10} {:<13} {:<12} {:<24} {:<16} {:>6} {:>12} {:>12}  {}\n",
        "Quote", "Date", "Customer", "Company", "Item", "Qty", "Unit Price", "Total", "PDF"
    ));

    for record in records.iter().take(PREVIEW_ROWS) {
        output.push_str(&format!(
            "{:<10} {:<13} {:<12} {:<24} {:<16} {:>6} {:>12.2} {:>12.2}  {}\n",
            record.quote_number,
            record.quote_date.as_deref().unwrap_or(""),
            record.customer_number.as_deref().unwrap_or(""),
            truncate(record.company.as_deref().unwrap_or(""), 24),
            truncate(&record.item_id, 16),
            record.quantity,
            record.unit_price,
            record.total_sales,
            record.pdf
        ));
    }

    if records.len() > PREVIEW_ROWS {
        output.push_str(&format!(
            "... {} more rows\n",
            records.len() - PREVIEW_ROWS
        ));
    }
    output.push_str(&format!("\n{} records\n", records.len()));

    output
}

fn truncate(value: &str, width: usize) -> String {
    if value.chars().count() <= width {
        value.to_string()
    } else {
        value.chars().take(width - 1).chain(['~']).collect()
    }
}
