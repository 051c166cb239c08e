//! Customer id and salesperson code extraction.
//!
//! The identifier family predicts the header layout, so each family carries
//! its own row grammar. A generic `Customer No` label search backs both up.

use tracing::{trace, warn};

use super::rules::patterns::{quote_header_line, CUSTOMER_NO_LABEL, RFQ_HEADER_LINE};
use crate::models::quote::{CustomerInfo, DocumentIdentifier, IdentifierFamily};

/// Header row grammar selected by identifier family.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CustomerGrammar {
    /// No identifier known: label search only.
    Generic,
    /// `RFQ <ref> <customer> <salesperson> <Word>` row.
    Rfq,
    /// `[Name...] <customer> <salesperson> <via> <terms> <identifier>` row.
    Quote { identifier: String },
}

impl CustomerGrammar {
    /// Select the grammar for an identifier.
    pub fn for_identifier(identifier: Option<&DocumentIdentifier>) -> Self {
        match identifier {
            None => CustomerGrammar::Generic,
            Some(id) => match id.family() {
                IdentifierFamily::Rfq => CustomerGrammar::Rfq,
                IdentifierFamily::Quote => CustomerGrammar::Quote {
                    identifier: id.as_str().to_string(),
                },
            },
        }
    }

    /// Apply the family-specific row grammar (no fallback).
    fn match_row(&self, text: &str) -> CustomerInfo {
        let caps = match self {
            CustomerGrammar::Generic => return CustomerInfo::default(),
            CustomerGrammar::Rfq => RFQ_HEADER_LINE.captures(text),
            CustomerGrammar::Quote { identifier } => match quote_header_line(identifier) {
                Ok(re) => re.captures(text),
                Err(e) => {
                    warn!("Failed to build header grammar for {}: {}", identifier, e);
                    None
                }
            },
        };

        match caps {
            Some(caps) => CustomerInfo {
                customer_id: caps.get(1).map(|m| m.as_str().to_string()),
                salesperson_code: caps.get(2).map(|m| m.as_str().to_string()),
            },
            None => CustomerInfo::default(),
        }
    }
}

/// Customer / salesperson extractor.
#[derive(Debug, Clone, Copy, Default)]
pub struct CustomerExtractor;

impl CustomerExtractor {
    pub fn new() -> Self {
        Self
    }

    /// Recover customer id and salesperson code from a header page.
    pub fn extract(&self, text: &str, identifier: Option<&DocumentIdentifier>) -> CustomerInfo {
        let grammar = CustomerGrammar::for_identifier(identifier);

        if grammar == CustomerGrammar::Generic {
            return CustomerInfo {
                customer_id: find_labeled_customer(text),
                salesperson_code: None,
            };
        }

        let mut info = grammar.match_row(text);
        if info.customer_id.is_none() {
            trace!("{:?} row grammar missed, falling back to customer label", grammar);
            info.customer_id = find_labeled_customer(text);
        }

        info
    }
}

/// Find a customer id after a `Customer No` label.
pub fn find_labeled_customer(text: &str) -> Option<String> {
    CUSTOMER_NO_LABEL
        .captures(text)
        .map(|caps| caps[1].to_string())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::quote::rules::find_document_identifier;
    use pretty_assertions::assert_eq;

    fn id(text: &str) -> DocumentIdentifier {
        find_document_identifier(text).unwrap().0
    }

    fn info(customer: Option<&str>, salesperson: Option<&str>) -> CustomerInfo {
        CustomerInfo {
            customer_id: customer.map(str::to_string),
            salesperson_code: salesperson.map(str::to_string),
        }
    }

    #[test]
    fn test_labeled_customer_without_identifier() {
        let text = "Invoice to\nCustomer No.: A-1009\n";
        assert_eq!(
            CustomerExtractor::new().extract(text, None),
            info(Some("A-1009"), None)
        );

        assert_eq!(find_labeled_customer("customer no # 7781"), Some("7781".to_string()));
        assert_eq!(find_labeled_customer("Customer 7781"), None);
    }

    #[test]
    fn test_customer_number_heading_is_not_a_label() {
        assert_eq!(find_labeled_customer("Customer Number: 123"), None);
        assert_eq!(find_labeled_customer("Customer No:A-7"), Some("A-7".to_string()));
        assert_eq!(
            find_labeled_customer("Customer Number\nCustomer No. 55012"),
            Some("55012".to_string())
        );
    }

    #[test]
    fn test_quote_row_grammar() {
        let text = "Customer ID Sales Ship Via Terms Quote\n11007-4 JZ UPSPPA NET30 QT000171\n";
        assert_eq!(
            CustomerExtractor::new().extract(text, Some(&id("QT000171"))),
            info(Some("11007-4"), Some("JZ"))
        );
    }

    #[test]
    fn test_quote_row_grammar_with_salesperson_name() {
        let text = "Header\nBrock Beehler 2026-1 MR BRAUN NET30 QT000569\n";
        assert_eq!(
            CustomerExtractor::new().extract(text, Some(&id("QT000569"))),
            info(Some("2026-1"), Some("MR"))
        );
    }

    #[test]
    fn test_quote_row_on_first_line() {
        let text = "11007-4 JZ UPSPPA NET30 QT000171";
        assert_eq!(
            CustomerExtractor::new().extract(text, Some(&id(text))),
            info(Some("11007-4"), Some("JZ"))
        );
    }

    #[test]
    fn test_rfq_row_grammar() {
        let text = "Request\nRFQ 0042 C5521 AB Net 30 days\nRQ1042-3\n";
        assert_eq!(
            CustomerExtractor::new().extract(text, Some(&id("RQ1042-3"))),
            info(Some("C5521"), Some("AB"))
        );
    }

    #[test]
    fn test_rfq_marker_must_start_line() {
        let text = "See RFQ 0042 C5521 AB Net 30\nCustomer No: Z-9\nRQ1042-3";
        assert_eq!(
            CustomerExtractor::new().extract(text, Some(&id("RQ1042-3"))),
            info(Some("Z-9"), None)
        );
    }

    #[test]
    fn test_family_grammar_falls_back_to_label() {
        let text = "QT000171\nCustomer No. 55012\nnothing else";
        assert_eq!(
            CustomerExtractor::new().extract(text, Some(&id(text))),
            info(Some("55012"), None)
        );
    }

    #[test]
    fn test_nothing_found() {
        assert_eq!(
            CustomerExtractor::new().extract("QT000171", Some(&id("QT000171"))),
            CustomerInfo::default()
        );
    }
}
