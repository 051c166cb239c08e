//! Page header recognition: document identifier and issue date.

use serde::{Deserialize, Serialize};
use tracing::debug;

use super::rules::{DateExtractor, FieldExtractor, IdentifierExtractor};
use crate::models::quote::DocumentIdentifier;

/// Identifier and date found on one page.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct QuoteHeader {
    /// Document identifier, if the page carries one.
    pub identifier: Option<DocumentIdentifier>,
    /// Issue date as printed.
    pub date: Option<String>,
}

/// Extracts [`QuoteHeader`]s from page text.
#[derive(Debug, Clone, Copy, Default)]
pub struct HeaderExtractor;

impl HeaderExtractor {
    pub fn new() -> Self {
        Self
    }

    /// Recover the left-most identifier and date on a page.
    pub fn extract(&self, text: &str) -> QuoteHeader {
        let identifiers = IdentifierExtractor::new().extract_all(text);
        let identifier = identifiers.first().map(|m| m.value.clone());

        if let Some(first) = &identifier {
            if identifiers.iter().any(|m| &m.value != first) {
                debug!(
                    "Page references {} identifiers, using left-most {}",
                    identifiers.len(),
                    first
                );
            }
        }

        QuoteHeader {
            identifier,
            date: DateExtractor::new().extract(text).map(|m| m.value),
        }
    }
}
