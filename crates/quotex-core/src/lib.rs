//! Core library for sales-quote extraction.
//!
//! This crate provides:
//! - Pattern rules for amounts, dates and quote identifiers
//! - Header, customer/salesperson and ship-to extraction from page text
//! - Line item tokenization of column-less item rows
//! - A page-by-page processor that carries header context across pages and
//!   emits flat records in a fixed column layout
//! - Page-text sources (PDF and plain-text page dumps) and batch assembly

pub mod error;
pub mod models;
pub mod pdf;
pub mod quote;

pub use error::{PdfError, QuotexError, Result};
pub use models::config::{ExtractionConfig, QuotexConfig};
pub use models::quote::{
    CustomerInfo, DocumentContext, DocumentIdentifier, IdentifierFamily, LineItem, QuoteDocument,
    ShipTo,
};
pub use models::record::OutputRecord;
pub use pdf::{split_text_pages, PdfProcessor};
#[cfg(feature = "pdf")]
pub use pdf::PdfExtractor;
pub use quote::{
    process_batch, BatchReport, DocumentOutcome, ExtractionResult, QuoteParser, QuoteProcessor,
};
