//! Quote date extraction.
//!
//! Dates are kept exactly as printed; no calendar parsing is applied.

use super::patterns::QUOTE_DATE;
use super::{ExtractionMatch, FieldExtractor};

/// Date field extractor.
pub struct DateExtractor;

impl DateExtractor {
    pub fn new() -> Self {
        Self
    }
}

impl Default for DateExtractor {
    fn default() -> Self {
        Self::new()
    }
}

impl FieldExtractor for DateExtractor {
    type Output = ExtractionMatch<String>;

    fn extract(&self, text: &str) -> Option<Self::Output> {
        QUOTE_DATE
            .find(text)
            .map(|m| ExtractionMatch::new(m.as_str().to_string(), m.range(), m.as_str()))
    }

    fn extract_all(&self, text: &str) -> Vec<Self::Output> {
        QUOTE_DATE
            .find_iter(text)
            .map(|m| ExtractionMatch::new(m.as_str().to_string(), m.range(), m.as_str()))
            .collect()
    }
}

/// Find the first `Mon D, YYYY` date in `text`, verbatim.
pub fn find_quote_date(text: &str) -> Option<String> {
    DateExtractor::new().extract(text).map(|m| m.value)
}
