//! Rule-based field extractors for quote documents.

pub mod dates;
pub mod identifiers;
pub mod money;
pub mod patterns;

pub use dates::{find_quote_date, DateExtractor};
pub use identifiers::{find_document_identifier, IdentifierExtractor};
pub use money::{is_money_token, parse_money};
pub use patterns::*;

use std::ops::Range;

/// Trait for field extractors.
pub trait FieldExtractor {
    /// The type of value this extractor produces.
    type Output;

    /// Extract the first (left-most) occurrence of the field.
    fn extract(&self, text: &str) -> Option<Self::Output>;

    /// Extract all occurrences of the field, left to right.
    fn extract_all(&self, text: &str) -> Vec<Self::Output>;
}

/// A value matched in source text.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExtractionMatch<T> {
    /// Extracted value.
    pub value: T,
    /// Byte range in source text.
    pub span: Range<usize>,
    /// Source text that was matched.
    pub source: String,
}

impl<T> ExtractionMatch<T> {
    pub fn new(value: T, span: Range<usize>, source: impl Into<String>) -> Self {
        Self {
            value,
            span,
            source: source.into(),
        }
    }
}
