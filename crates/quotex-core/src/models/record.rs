//! Flat output record in the fixed column layout consumed by spreadsheet sinks.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use super::quote::{DocumentContext, LineItem};

/// One output row: a line item merged with the header context it was read under.
///
/// Field order and serialized names are the wire contract; they match
/// [`OutputRecord::COLUMNS`] exactly. Columns this engine does not populate
/// are always `None` and render as empty cells.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct OutputRecord {
    #[serde(rename = "ReferralManagerCode")]
    pub referral_manager_code: Option<String>,
    #[serde(rename = "ReferralManager")]
    pub referral_manager: Option<String>,
    #[serde(rename = "ReferralEmail")]
    pub referral_email: Option<String>,
    #[serde(rename = "Brand")]
    pub brand: String,
    #[serde(rename = "QuoteNumber")]
    pub quote_number: String,
    #[serde(rename = "QuoteVersion")]
    pub quote_version: Option<String>,
    #[serde(rename = "QuoteDate")]
    pub quote_date: Option<String>,
    #[serde(rename = "QuoteValidDate")]
    pub quote_valid_date: Option<String>,
    #[serde(rename = "Customer Number/ID")]
    pub customer_number: Option<String>,
    #[serde(rename = "Company")]
    pub company: Option<String>,
    #[serde(rename = "Address")]
    pub address: Option<String>,
    #[serde(rename = "County")]
    pub county: Option<String>,
    #[serde(rename = "City")]
    pub city: Option<String>,
    #[serde(rename = "State")]
    pub state: Option<String>,
    #[serde(rename = "ZipCode")]
    pub zip_code: Option<String>,
    #[serde(rename = "Country")]
    pub country: Option<String>,
    #[serde(rename = "FirstName")]
    pub first_name: Option<String>,
    #[serde(rename = "LastName")]
    pub last_name: Option<String>,
    #[serde(rename = "ContactEmail")]
    pub contact_email: Option<String>,
    #[serde(rename = "ContactPhone")]
    pub contact_phone: Option<String>,
    #[serde(rename = "Webaddress")]
    pub web_address: Option<String>,
    #[serde(rename = "item_id")]
    pub item_id: String,
    #[serde(rename = "item_desc")]
    pub item_desc: String,
    #[serde(rename = "UOM")]
    pub uom: Option<String>,
    #[serde(rename = "Quantity")]
    pub quantity: u64,
    #[serde(rename = "Unit Price")]
    pub unit_price: Decimal,
    #[serde(rename = "List Price")]
    pub list_price: Option<String>,
    #[serde(rename = "TotalSales")]
    pub total_sales: Decimal,
    #[serde(rename = "Manufacturer_ID")]
    pub manufacturer_id: Option<String>,
    #[serde(rename = "manufacturer_Name")]
    pub manufacturer_name: Option<String>,
    #[serde(rename = "Writer Name")]
    pub writer_name: Option<String>,
    #[serde(rename = "CustomerPONumber")]
    pub customer_po_number: Option<String>,
    #[serde(rename = "PDF")]
    pub pdf: String,
    #[serde(rename = "DemoQuote")]
    pub demo_quote: Option<String>,
    #[serde(rename = "Duns")]
    pub duns: Option<String>,
    #[serde(rename = "SIC")]
    pub sic: Option<String>,
    #[serde(rename = "NAICS")]
    pub naics: Option<String>,
    #[serde(rename = "LineOfBusiness")]
    pub line_of_business: Option<String>,
    #[serde(rename = "LinkedinProfile")]
    pub linkedin_profile: Option<String>,
    #[serde(rename = "PhoneResearched")]
    pub phone_researched: Option<String>,
    #[serde(rename = "PhoneSupplied")]
    pub phone_supplied: Option<String>,
    #[serde(rename = "ParentName")]
    pub parent_name: Option<String>,
}

impl OutputRecord {
    /// Column names in output order.
    pub const COLUMNS: [&'static str; 42] = [
        "ReferralManagerCode",
        "ReferralManager",
        "ReferralEmail",
        "Brand",
        "QuoteNumber",
        "QuoteVersion",
        "QuoteDate",
        "QuoteValidDate",
        "Customer Number/ID",
        "Company",
        "Address",
        "County",
        "City",
        "State",
        "ZipCode",
        "Country",
        "FirstName",
        "LastName",
        "ContactEmail",
        "ContactPhone",
        "Webaddress",
        "item_id",
        "item_desc",
        "UOM",
        "Quantity",
        "Unit Price",
        "List Price",
        "TotalSales",
        "Manufacturer_ID",
        "manufacturer_Name",
        "Writer Name",
        "CustomerPONumber",
        "PDF",
        "DemoQuote",
        "Duns",
        "SIC",
        "NAICS",
        "LineOfBusiness",
        "LinkedinProfile",
        "PhoneResearched",
        "PhoneSupplied",
        "ParentName",
    ];

    /// Merge a context snapshot and a line item into one record.
    pub fn from_parts(context: &DocumentContext, item: LineItem, brand: &str, pdf: &str) -> Self {
        let ship_to = &context.ship_to;

        Self {
            referral_manager_code: context.customer.salesperson_code.clone(),
            brand: brand.to_string(),
            quote_number: context.identifier.as_str().to_string(),
            quote_date: context.issue_date.clone(),
            customer_number: context.customer.customer_id.clone(),
            company: ship_to.company.clone(),
            address: ship_to.address.clone(),
            city: ship_to.city.clone(),
            state: ship_to.state_or_province.clone(),
            zip_code: ship_to.postal_code.clone(),
            country: ship_to.country.clone(),
            item_id: item.item_id,
            item_desc: item.item_desc,
            uom: item.uom,
            quantity: item.quantity,
            unit_price: item.unit_price,
            total_sales: item.total_sales,
            pdf: pdf.to_string(),
            ..Default::default()
        }
    }

    /// Render the record as string cells in [`Self::COLUMNS`] order.
    ///
    /// Absent values become empty strings.
    pub fn to_row(&self) -> Vec<String> {
        fn cell(value: &Option<String>) -> String {
            value.clone().unwrap_or_default()
        }

        vec![
            cell(&self.referral_manager_code),
            cell(&self.referral_manager),
            cell(&self.referral_email),
            self.brand.clone(),
            self.quote_number.clone(),
            cell(&self.quote_version),
            cell(&self.quote_date),
            cell(&self.quote_valid_date),
            cell(&self.customer_number),
            cell(&self.company),
            cell(&self.address),
            cell(&self.county),
            cell(&self.city),
            cell(&self.state),
            cell(&self.zip_code),
            cell(&self.country),
            cell(&self.first_name),
            cell(&self.last_name),
            cell(&self.contact_email),
            cell(&self.contact_phone),
            cell(&self.web_address),
            self.item_id.clone(),
            self.item_desc.clone(),
            cell(&self.uom),
            self.quantity.to_string(),
            format!("{:.2}", self.unit_price),
            cell(&self.list_price),
            format!("{:.2}", self.total_sales),
            cell(&self.manufacturer_id),
            cell(&self.manufacturer_name),
            cell(&self.writer_name),
            cell(&self.customer_po_number),
            self.pdf.clone(),
            cell(&self.demo_quote),
            cell(&self.duns),
            cell(&self.sic),
            cell(&self.naics),
            cell(&self.line_of_business),
            cell(&self.linkedin_profile),
            cell(&self.phone_researched),
            cell(&self.phone_supplied),
            cell(&self.parent_name),
        ]
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::quote::{CustomerInfo, DocumentIdentifier, IdentifierFamily, ShipTo};
    use pretty_assertions::assert_eq;

    fn sample_record() -> OutputRecord {
        let context = DocumentContext {
            identifier: DocumentIdentifier::new("QT000171", IdentifierFamily::Quote),
            issue_date: Some("Mar 4, 2024".to_string()),
            customer: CustomerInfo {
                customer_id: Some("11007-4".to_string()),
                salesperson_code: Some("JZ".to_string()),
            },
            ship_to: ShipTo {
                company: Some("Acme Corp".to_string()),
                city: Some("Springfield".to_string()),
                state_or_province: Some("IL".to_string()),
                country: Some("USA".to_string()),
                ..Default::default()
            },
        };
        let item = LineItem {
            quantity: 2,
            item_id: "158012-5013".to_string(),
            item_desc: "ASSY ATE400".to_string(),
            uom: Some("EA".to_string()),
            unit_price: Decimal::new(293500, 2),
            total_sales: Decimal::new(587000, 2),
        };

        OutputRecord::from_parts(&context, item, "Alcorn Industrial Inc", "quote.pdf")
    }

    #[test]
    fn test_from_parts_maps_context_and_item() {
        let record = sample_record();

        assert_eq!(record.referral_manager_code.as_deref(), Some("JZ"));
        assert_eq!(record.quote_number, "QT000171");
        assert_eq!(record.customer_number.as_deref(), Some("11007-4"));
        assert_eq!(record.state.as_deref(), Some("IL"));
        assert_eq!(record.quantity, 2);
        assert_eq!(record.pdf, "quote.pdf");
        assert!(record.address.is_none());
        assert!(record.list_price.is_none());
    }

    #[test]
    fn test_row_follows_column_order() {
        let row = sample_record().to_row();
        assert_eq!(row.len(), OutputRecord::COLUMNS.len());

        let cell = |name: &str| {
            let idx = OutputRecord::COLUMNS.iter().position(|c| *c == name).unwrap();
            row[idx].clone()
        };
        assert_eq!(cell("Brand"), "Alcorn Industrial Inc");
        assert_eq!(cell("Customer Number/ID"), "11007-4");
        assert_eq!(cell("Unit Price"), "2935.00");
        assert_eq!(cell("TotalSales"), "5870.00");
        assert_eq!(cell("UOM"), "EA");
        assert_eq!(cell("County"), "");
        assert_eq!(cell("PDF"), "quote.pdf");
    }

    #[test]
    fn test_serialized_keys_follow_column_order() {
        let json = serde_json::to_string(&sample_record()).unwrap();

        let mut last = 0;
        for column in OutputRecord::COLUMNS {
            let key = format!("\"{}\":", column);
            let pos = json.find(&key).unwrap_or_else(|| panic!("missing {}", column));
            assert!(pos >= last, "{} out of order", column);
            last = pos;
        }
    }
}
