//! Quote extraction engine.

pub mod batch;
pub mod customer;
pub mod header;
pub mod line_item;
mod processor;
pub mod rules;
pub mod ship_to;

pub use batch::{process_batch, run_document, BatchReport, DocumentOutcome};
pub use customer::{CustomerExtractor, CustomerGrammar};
pub use header::{HeaderExtractor, QuoteHeader};
pub use line_item::LineItemTokenizer;
pub use processor::{DocumentState, ExtractionResult, ExtractionStats, QuoteProcessor};
pub use ship_to::ShipToExtractor;

use crate::models::quote::QuoteDocument;

/// Trait for quote document parsers.
pub trait QuoteParser {
    /// Turn the pages of one document into output records.
    ///
    /// Recognition misses are skipped, so this never fails; an empty result
    /// means nothing was recognized.
    fn process(&self, document: &QuoteDocument) -> ExtractionResult;
}
