//! Multi-document batches.
//!
//! Documents share no state, so callers may process them on any number of
//! workers. Each worker produces a [`DocumentOutcome`] tagged with the
//! document's input position; [`BatchReport::assemble`] restores input order
//! so the merged output does not depend on completion order.

use std::fmt::Display;
use std::panic::{self, AssertUnwindSafe};

use serde::{Deserialize, Serialize};
use tracing::{info, warn};

use super::processor::ExtractionResult;
use super::QuoteParser;
use crate::models::quote::QuoteDocument;
use crate::models::record::OutputRecord;

/// Outcome of one document of a batch.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DocumentOutcome {
    /// Position of the document in the batch input.
    pub index: usize,
    /// Document name.
    pub name: String,
    /// Extraction result, or the reason the document failed.
    pub result: Result<ExtractionResult, String>,
}

impl DocumentOutcome {
    /// Whether the document was processed.
    pub fn is_success(&self) -> bool {
        self.result.is_ok()
    }
}

/// Ordered outcomes of a batch.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct BatchReport {
    /// Outcomes in input order.
    pub outcomes: Vec<DocumentOutcome>,
}

impl BatchReport {
    /// Order outcomes by input position.
    pub fn assemble(mut outcomes: Vec<DocumentOutcome>) -> Self {
        outcomes.sort_by_key(|o| o.index);
        Self { outcomes }
    }

    /// All records: input order, then page order, then line order.
    pub fn records(&self) -> impl Iterator<Item = &OutputRecord> {
        self.outcomes
            .iter()
            .filter_map(|o| o.result.as_ref().ok())
            .flat_map(|r| r.records.iter())
    }

    /// Consume the report, returning all records in order.
    pub fn into_records(self) -> Vec<OutputRecord> {
        self.outcomes
            .into_iter()
            .filter_map(|o| o.result.ok())
            .flat_map(|r| r.records)
            .collect()
    }

    /// Number of records across all documents.
    pub fn record_count(&self) -> usize {
        self.records().count()
    }

    /// Failed documents as `(name, reason)`.
    pub fn failures(&self) -> impl Iterator<Item = (&str, &str)> {
        self.outcomes.iter().filter_map(|o| match &o.result {
            Ok(_) => None,
            Err(e) => Some((o.name.as_str(), e.as_str())),
        })
    }

    /// Number of documents processed successfully.
    pub fn success_count(&self) -> usize {
        self.outcomes.iter().filter(|o| o.is_success()).count()
    }
}

/// Load and process one document, isolating any failure to this document.
///
/// Loader errors and panics inside the loader or the parser both become a
/// failed [`DocumentOutcome`].
pub fn run_document<P, E, F>(parser: &P, index: usize, name: &str, load: F) -> DocumentOutcome
where
    P: QuoteParser + ?Sized,
    E: Display,
    F: FnOnce() -> Result<QuoteDocument, E>,
{
    let run = panic::catch_unwind(AssertUnwindSafe(|| {
        load().map(|doc| parser.process(&doc)).map_err(|e| e.to_string())
    }));

    let result = match run {
        Ok(result) => result,
        Err(payload) => Err(panic_message(payload.as_ref())),
    };

    if let Err(e) = &result {
        warn!("Failed to process {}: {}", name, e);
    }

    DocumentOutcome {
        index,
        name: name.to_string(),
        result,
    }
}

/// Process in-memory documents sequentially.
pub fn process_batch<P>(parser: &P, documents: Vec<QuoteDocument>) -> BatchReport
where
    P: QuoteParser + ?Sized,
{
    let outcomes: Vec<DocumentOutcome> = documents
        .into_iter()
        .enumerate()
        .map(|(index, doc)| {
            let name = doc.name.clone();
            run_document(parser, index, &name, || Ok::<_, String>(doc))
        })
        .collect();

    let report = BatchReport::assemble(outcomes);
    info!(
        "Batch complete: {} documents, {} records",
        report.outcomes.len(),
        report.record_count()
    );
    report
}

fn panic_message(payload: &(dyn std::any::Any + Send)) -> String {
    if let Some(s) = payload.downcast_ref::<&str>() {
        format!("panic: {}", s)
    } else if let Some(s) = payload.downcast_ref::<String>() {
        format!("panic: {}", s)
    } else {
        "panic while processing document".to_string()
    }
}
