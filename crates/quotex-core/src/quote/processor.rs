//! Page-by-page quote processing.
//!
//! Header context is carried across pages as an explicit [`DocumentState`]
//! value: it is created from the first page with an identifier, replaced
//! wholesale by any later page with one, and inherited unchanged by pages
//! without one. Item rows are read only between the item-section markers,
//! and the section always starts closed at the top of a page.

use serde::{Deserialize, Serialize};
use std::time::Instant;
use tracing::{debug, info, trace};

use super::customer::CustomerExtractor;
use super::header::{HeaderExtractor, QuoteHeader};
use super::line_item::LineItemTokenizer;
use super::ship_to::ShipToExtractor;
use super::QuoteParser;
use crate::models::config::ExtractionConfig;
use crate::models::quote::{DocumentContext, QuoteDocument};
use crate::models::record::OutputRecord;

/// Header state while walking the pages of one document.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum DocumentState {
    /// No identifier seen yet; pages are skipped.
    #[default]
    NoContext,
    /// Context established by the most recent header page.
    HasContext(DocumentContext),
}

impl DocumentState {
    /// Current context, if any.
    pub fn context(&self) -> Option<&DocumentContext> {
        match self {
            DocumentState::NoContext => None,
            DocumentState::HasContext(context) => Some(context),
        }
    }
}

/// Counters collected while processing one document.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExtractionStats {
    /// Pages visited.
    pub pages: usize,
    /// Pages skipped because no header had been seen yet.
    pub pages_without_context: usize,
    /// Pages that carried an identifier (context refreshes).
    pub headers: usize,
    /// Lines inside item sections handed to the tokenizer.
    pub item_lines: usize,
    /// Item-section lines the tokenizer rejected.
    pub rejected_lines: usize,
}

/// Result of processing one document.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExtractionResult {
    /// Source document name.
    pub document: String,
    /// Output rows in page order, then line order.
    pub records: Vec<OutputRecord>,
    /// Processing counters.
    pub stats: ExtractionStats,
    /// Processing time in milliseconds.
    pub processing_time_ms: u64,
}

/// Quote processor combining the header, customer, ship-to and line extractors.
#[derive(Debug, Clone)]
pub struct QuoteProcessor {
    header: HeaderExtractor,
    customer: CustomerExtractor,
    ship_to: ShipToExtractor,
    tokenizer: LineItemTokenizer,
    brand: String,
    section_start: String,
    section_end: String,
}

impl QuoteProcessor {
    /// Create a processor with default settings.
    pub fn new() -> Self {
        Self::from_config(&ExtractionConfig::default())
    }

    /// Create a processor from extraction configuration.
    pub fn from_config(config: &ExtractionConfig) -> Self {
        Self {
            header: HeaderExtractor::new(),
            customer: CustomerExtractor::new(),
            ship_to: ShipToExtractor::from_config(config),
            tokenizer: LineItemTokenizer::from_config(config),
            brand: config.brand.clone(),
            section_start: config.item_section_start.clone(),
            section_end: config.item_section_end.clone(),
        }
    }

    /// Set the brand emitted on every record.
    pub fn with_brand(mut self, brand: impl Into<String>) -> Self {
        self.brand = brand.into();
        self
    }

    /// Set the item-section markers.
    pub fn with_section_markers(mut self, start: impl Into<String>, end: impl Into<String>) -> Self {
        self.section_start = start.into();
        self.section_end = end.into();
        self
    }

    /// Build a fresh context from a header page.
    ///
    /// Every field comes from `text`; nothing is carried over from an
    /// earlier context.
    pub fn build_context(&self, text: &str, header: QuoteHeader) -> Option<DocumentContext> {
        let identifier = header.identifier?;
        let customer = self.customer.extract(text, Some(&identifier));
        let ship_to = self.ship_to.extract(text);

        Some(DocumentContext {
            identifier,
            issue_date: header.date,
            customer,
            ship_to,
        })
    }

    /// Lines of a page that sit inside an item section.
    pub fn item_section_lines<'a>(&self, text: &'a str) -> Vec<&'a str> {
        let mut in_items = false;
        let mut lines = Vec::new();

        for line in text.lines() {
            if line.contains(&self.section_start) {
                in_items = true;
                continue;
            }
            if in_items && line.trim().starts_with(&self.section_end) {
                in_items = false;
            }
            if in_items {
                lines.push(line);
            }
        }

        lines
    }

    /// Advance the document state over one page, appending its records.
    pub fn process_page(
        &self,
        state: DocumentState,
        text: &str,
        document: &str,
        records: &mut Vec<OutputRecord>,
        stats: &mut ExtractionStats,
    ) -> DocumentState {
        stats.pages += 1;

        let header = self.header.extract(text);
        let state = if header.identifier.is_some() {
            stats.headers += 1;
            match self.build_context(text, header) {
                Some(context) => {
                    debug!(
                        "Page {}: header {} (customer {:?})",
                        stats.pages, context.identifier, context.customer.customer_id
                    );
                    DocumentState::HasContext(context)
                }
                None => state,
            }
        } else {
            state
        };

        let Some(context) = state.context() else {
            debug!("Page {}: no header context yet, skipping", stats.pages);
            stats.pages_without_context += 1;
            return state;
        };

        for line in self.item_section_lines(text) {
            stats.item_lines += 1;
            match self.tokenizer.tokenize(line) {
                Some(item) => {
                    records.push(OutputRecord::from_parts(context, item, &self.brand, document));
                }
                None => {
                    stats.rejected_lines += 1;
                    trace!("Not an item line: {:?}", line);
                }
            }
        }

        state
    }
}

impl Default for QuoteProcessor {
    fn default() -> Self {
        Self::new()
    }
}

impl QuoteParser for QuoteProcessor {
    fn process(&self, document: &QuoteDocument) -> ExtractionResult {
        let start = Instant::now();
        let mut records = Vec::new();
        let mut stats = ExtractionStats::default();

        let mut state = DocumentState::NoContext;
        for page in &document.pages {
            state = self.process_page(state, page, &document.name, &mut records, &mut stats);
        }

        info!(
            "Extracted {} records from {} ({} pages, {} headers)",
            records.len(),
            document.name,
            stats.pages,
            stats.headers
        );

        ExtractionResult {
            document: document.name.clone(),
            records,
            stats,
            processing_time_ms: start.elapsed().as_millis() as u64,
        }
    }
}
