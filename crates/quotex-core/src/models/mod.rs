//! Data models for quote extraction.

pub mod config;
pub mod quote;
pub mod record;

pub use config::{ExtractionConfig, OutputConfig, PdfConfig, QuotexConfig};
pub use quote::{
    CustomerInfo, DocumentContext, DocumentIdentifier, IdentifierFamily, LineItem, QuoteDocument,
    ShipTo,
};
pub use record::OutputRecord;
