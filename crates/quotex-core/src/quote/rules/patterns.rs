//! Common regex patterns for quote extraction.

use lazy_static::lazy_static;
use regex::Regex;

lazy_static! {
    // Money token: digits (optionally comma-grouped in threes) and exactly two decimals
    pub static ref MONEY_TOKEN: Regex = Regex::new(
        r"^(?:[0-9]{1,3}(?:,[0-9]{3})+|[0-9]+)\.[0-9]{2}$"
    ).unwrap();

    // Document identifiers: QT + 6 digits, or RQ + 4+ digits - digits
    pub static ref DOCUMENT_IDENTIFIER: Regex = Regex::new(
        r"(?i)(?P<quote>QT[0-9]{6})|(?P<rfq>RQ[0-9]{4,}-[0-9]+)"
    ).unwrap();

    // Quote date as printed: "Mar 4, 2024"
    pub static ref QUOTE_DATE: Regex = Regex::new(
        r"(?:Jan|Feb|Mar|Apr|May|Jun|Jul|Aug|Sep|Oct|Nov|Dec)\s+[0-9]{1,2},\s+[0-9]{4}"
    ).unwrap();

    // Generic customer label: "Customer No.: 12345", "Customer No # A-12".
    // "No" must end a word so "Customer Number" is not read as a label.
    pub static ref CUSTOMER_NO_LABEL: Regex = Regex::new(
        r"(?i)Customer\s+No\b\.?\s*:?[\s#]*([0-9A-Z\-]+)"
    ).unwrap();

    // RFQ header row: "RFQ <ref> <customer> <salesperson> <Word...>"
    pub static ref RFQ_HEADER_LINE: Regex = Regex::new(
        r"(?m)^[ \t]*RFQ\s+\S+\s+([0-9A-Z\-]+)\s+([A-Z0-9]{1,3})\s+[A-Z]"
    ).unwrap();

    // Two-letter upper-case token (state / province code)
    pub static ref STATE_CODE: Regex = Regex::new(
        r"\b[A-Z]{2}\b"
    ).unwrap();
}

/// Build the quote header row grammar for one identifier.
///
/// Matches an optional salesperson name (up to three capitalized words), the
/// customer id, the salesperson code, ship-via and terms codes, then the
/// identifier itself: `Brock Beehler 2026-1 MR BRAUN NET30 QT000171`.
pub fn quote_header_line(identifier: &str) -> Result<Regex, regex::Error> {
    Regex::new(&format!(
        r"(?m)^(?:[A-Z][A-Za-z]*\s+){{0,3}}([0-9A-Z\-]+)\s+([A-Z0-9]{{1,3}})\s+[A-Z0-9]+\s+[A-Z0-9]+\s+{}",
        regex::escape(identifier)
    ))
}
