//! Quote document identifier extraction.

use std::ops::Range;

use super::patterns::DOCUMENT_IDENTIFIER;
use super::{ExtractionMatch, FieldExtractor};
use crate::models::quote::{DocumentIdentifier, IdentifierFamily};

/// Document identifier extractor.
pub struct IdentifierExtractor;

impl IdentifierExtractor {
    pub fn new() -> Self {
        Self
    }
}

impl Default for IdentifierExtractor {
    fn default() -> Self {
        Self::new()
    }
}

impl FieldExtractor for IdentifierExtractor {
    type Output = ExtractionMatch<DocumentIdentifier>;

    fn extract(&self, text: &str) -> Option<Self::Output> {
        let caps = DOCUMENT_IDENTIFIER.captures(text)?;
        Some(to_match(&caps))
    }

    fn extract_all(&self, text: &str) -> Vec<Self::Output> {
        DOCUMENT_IDENTIFIER
            .captures_iter(text)
            .map(|caps| to_match(&caps))
            .collect()
    }
}

fn to_match(caps: &regex::Captures<'_>) -> ExtractionMatch<DocumentIdentifier> {
    // Exactly one of the two alternation groups participates in a match.
    let family = if caps.name("quote").is_some() {
        IdentifierFamily::Quote
    } else {
        IdentifierFamily::Rfq
    };
    let m = &caps[0];
    let span = caps.get(0).map(|g| g.range()).unwrap_or_default();

    ExtractionMatch::new(DocumentIdentifier::new(m, family), span, m)
}

/// Find the left-most document identifier in `text`.
///
/// Returns the canonical identifier and the byte range it occupies.
pub fn find_document_identifier(text: &str) -> Option<(DocumentIdentifier, Range<usize>)> {
    IdentifierExtractor::new()
        .extract(text)
        .map(|m| (m.value, m.span))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_find_quote_identifier() {
        let (id, span) = find_document_identifier("Quote No. QT000171 page 1").unwrap();
        assert_eq!(id.as_str(), "QT000171");
        assert_eq!(id.family(), IdentifierFamily::Quote);
        assert_eq!(span, 10..18);
    }

    #[test]
    fn test_find_rfq_identifier_case_insensitive() {
        let (id, _) = find_document_identifier("ref rq20451-12 attached").unwrap();
        assert_eq!(id.as_str(), "RQ20451-12");
        assert_eq!(id.family(), IdentifierFamily::Rfq);
    }

    #[test]
    fn test_leftmost_occurrence_wins_across_families() {
        let (id, _) = find_document_identifier("RQ1042-3 then QT000171").unwrap();
        assert_eq!(id.as_str(), "RQ1042-3");

        let (id, _) = find_document_identifier("QT000171 then RQ1042-3").unwrap();
        assert_eq!(id.as_str(), "QT000171");
    }

    #[test]
    fn test_rejects_malformed_identifiers() {
        assert!(find_document_identifier("QT12345 and RQ123-4 and RQ12345").is_none());
        assert!(find_document_identifier("").is_none());
    }

    #[test]
    fn test_extract_all_in_order() {
        let all = IdentifierExtractor::new().extract_all("QT000001 x RQ9999-1 y qt000002");
        let values: Vec<&str> = all.iter().map(|m| m.value.as_str()).collect();
        assert_eq!(values, vec!["QT000001", "RQ9999-1", "QT000002"]);
    }
}
