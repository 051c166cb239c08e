//! Page-text sources.
//!
//! The engine consumes page text only. This module turns source files into
//! [`QuoteDocument`]s: PDFs through [`PdfExtractor`] and plain-text page
//! dumps (form-feed separated, as written by `pdftotext`) through
//! [`split_text_pages`].

#[cfg(feature = "pdf")]
mod extractor;

#[cfg(feature = "pdf")]
pub use extractor::PdfExtractor;

use crate::error::PdfError;
use crate::models::config::PdfConfig;
use crate::models::quote::QuoteDocument;

/// Result type for PDF operations.
pub type Result<T> = std::result::Result<T, PdfError>;

/// Trait for PDF page-text readers.
pub trait PdfProcessor {
    /// Load a PDF from bytes.
    fn load(&mut self, data: &[u8]) -> Result<()>;

    /// Get the number of pages in the PDF.
    fn page_count(&self) -> u32;

    /// Extract the text of every page, in page order.
    fn extract_pages(&self) -> Result<Vec<String>>;

    /// Extract text from a specific page (1-indexed).
    fn extract_page_text(&self, page: u32) -> Result<String> {
        let index = page.checked_sub(1).ok_or(PdfError::InvalidPage(page))? as usize;
        self.extract_pages()?
            .into_iter()
            .nth(index)
            .ok_or(PdfError::InvalidPage(page))
    }
}

/// Split a plain-text dump into pages.
///
/// A trailing empty page (left by a final separator) is dropped.
pub fn split_text_pages(text: &str, separator: char) -> Vec<String> {
    let mut pages: Vec<String> = text.split(separator).map(str::to_string).collect();
    if pages.len() > 1 && pages.last().is_some_and(|p| p.trim().is_empty()) {
        pages.pop();
    }
    pages
}

/// Build a document from page texts, honoring the configured page limit.
pub fn document_from_pages(name: &str, mut pages: Vec<String>, config: &PdfConfig) -> QuoteDocument {
    if config.max_pages > 0 && pages.len() > config.max_pages {
        pages.truncate(config.max_pages);
    }
    QuoteDocument::new(name, pages)
}
