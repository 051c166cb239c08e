//! Quote document data models: identifiers, header context and line items.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Identifier family of a quote document.
///
/// The family predicts the layout of the page header, so customer and
/// salesperson extraction dispatch on it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum IdentifierFamily {
    /// Sales quote: `QT` followed by exactly six digits (e.g. `QT000171`).
    Quote,
    /// Request for quote: `RQ`, four or more digits, a hyphen, more digits
    /// (e.g. `RQ1042-3`).
    Rfq,
}

/// A recognized quote document identifier in canonical upper-case form.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct DocumentIdentifier {
    value: String,
    family: IdentifierFamily,
}

impl DocumentIdentifier {
    /// Build an identifier from an already-matched value.
    ///
    /// The value is upper-cased; callers are expected to have validated the
    /// shape with [`crate::quote::rules::find_document_identifier`].
    pub(crate) fn new(value: &str, family: IdentifierFamily) -> Self {
        Self {
            value: value.to_uppercase(),
            family,
        }
    }

    /// Canonical (upper-case) identifier text.
    pub fn as_str(&self) -> &str {
        &self.value
    }

    /// Identifier family.
    pub fn family(&self) -> IdentifierFamily {
        self.family
    }
}

impl fmt::Display for DocumentIdentifier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.value)
    }
}

/// Customer and salesperson codes recovered from a header page.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CustomerInfo {
    /// Customer number / account id.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub customer_id: Option<String>,

    /// Short (1-3 character) salesperson code.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub salesperson_code: Option<String>,
}

/// Shipping destination decomposed from the ship-to block.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ShipTo {
    /// Company (or division) name.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub company: Option<String>,

    /// Street address line.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub address: Option<String>,

    /// City name.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub city: Option<String>,

    /// State or province code.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub state_or_province: Option<String>,

    /// Postal or ZIP code.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub postal_code: Option<String>,

    /// Country (`USA` or `Canada`).
    #[serde(skip_serializing_if = "Option::is_none")]
    pub country: Option<String>,
}

impl ShipTo {
    /// Check if no field was recovered.
    pub fn is_empty(&self) -> bool {
        self.company.is_none()
            && self.address.is_none()
            && self.city.is_none()
            && self.state_or_province.is_none()
            && self.postal_code.is_none()
            && self.country.is_none()
    }
}

/// Header fields in effect for the pages of one quote.
///
/// A context is built from a single page and replaced wholesale when a
/// later page carries an identifier; fields are never merged across pages.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DocumentContext {
    /// Quote identifier.
    pub identifier: DocumentIdentifier,

    /// Issue date exactly as rendered (e.g. `Mar 4, 2024`).
    #[serde(skip_serializing_if = "Option::is_none")]
    pub issue_date: Option<String>,

    /// Customer and salesperson codes.
    pub customer: CustomerInfo,

    /// Ship-to destination.
    pub ship_to: ShipTo,
}

/// A sellable line item tokenized from one text line.
///
/// Amounts are taken from the document as printed; no relationship between
/// quantity, unit price and total is checked.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LineItem {
    /// Ordered quantity.
    pub quantity: u64,

    /// Item / part number.
    pub item_id: String,

    /// Free-text description (possibly empty).
    pub item_desc: String,

    /// Unit of measure printed between the two amounts.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub uom: Option<String>,

    /// Unit price.
    pub unit_price: Decimal,

    /// Line total.
    pub total_sales: Decimal,
}

/// One source document handed to the engine: its pages in order.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct QuoteDocument {
    /// Identifying name of the source (emitted in the `PDF` column).
    pub name: String,

    /// Page texts in reading order, each with embedded line breaks.
    pub pages: Vec<String>,
}

impl QuoteDocument {
    /// Create a document from its name and page texts.
    pub fn new(name: impl Into<String>, pages: Vec<String>) -> Self {
        Self {
            name: name.into(),
            pages,
        }
    }
}
