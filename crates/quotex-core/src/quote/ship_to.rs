//! Ship-to block decomposition.
//!
//! The block has no fixed layout. Lines are classified by content: a country
//! marker, a `City, ST POSTAL` line, a street line with digits, and whatever
//! remains is a candidate company name.

use tracing::trace;

use super::rules::patterns::STATE_CODE;
use crate::models::config::ExtractionConfig;
use crate::models::quote::ShipTo;

/// Lines excluded from company candidates by content.
const NON_COMPANY_MARKERS: [&str; 2] = ["Customers ONLY", "Counter Sales"];

/// Ship-to block extractor.
#[derive(Debug, Clone)]
pub struct ShipToExtractor {
    anchor: String,
    window: usize,
    canadian_provinces: Vec<String>,
}

impl ShipToExtractor {
    /// Create an extractor with default anchor, window and province codes.
    pub fn new() -> Self {
        Self::from_config(&ExtractionConfig::default())
    }

    /// Create an extractor from extraction configuration.
    pub fn from_config(config: &ExtractionConfig) -> Self {
        Self {
            anchor: config.ship_to_anchor.to_ascii_lowercase(),
            window: config.ship_to_window,
            canadian_provinces: config.canadian_provinces.clone(),
        }
    }

    /// Set the number of lines read after the anchor.
    pub fn with_window(mut self, window: usize) -> Self {
        self.window = window;
        self
    }

    /// Decompose the first ship-to block on a page.
    pub fn extract(&self, text: &str) -> ShipTo {
        let lines = self.block_lines(text);
        if lines.is_empty() {
            return ShipTo::default();
        }

        let mut ship_to = ShipTo::default();

        let country_idx = lines.iter().rposition(|line| country_of(line).is_some());
        ship_to.country = country_idx.and_then(|i| country_of(lines[i])).map(str::to_string);

        let city_idx = lines
            .iter()
            .position(|line| line.contains(',') && STATE_CODE.is_match(line));

        let mut address_idx = None;
        if let Some(ci) = city_idx {
            if let Some((city, rest)) = lines[ci].split_once(',') {
                let mut parts = rest.split_whitespace();
                ship_to.city = Some(city.trim().to_string());
                ship_to.state_or_province = parts.next().map(str::to_string);
                let postal: Vec<&str> = parts.collect();
                if !postal.is_empty() {
                    ship_to.postal_code = Some(postal.join(" "));
                }
            }

            address_idx = lines[..ci]
                .iter()
                .rposition(|line| line.chars().any(|c| c.is_ascii_digit()));
            ship_to.address = address_idx.map(|i| lines[i].to_string());
        }

        ship_to.company = lines
            .iter()
            .enumerate()
            .filter(|(i, _)| Some(*i) != country_idx && Some(*i) != city_idx && Some(*i) != address_idx)
            .map(|(_, line)| *line)
            .filter(|line| is_company_candidate(line))
            .last()
            .map(str::to_string);

        if ship_to.country.is_none() {
            let canadian = ship_to
                .state_or_province
                .as_deref()
                .is_some_and(|state| self.canadian_provinces.iter().any(|p| p == state));
            ship_to.country = Some(if canadian { "Canada" } else { "USA" }.to_string());
        }

        trace!("Ship-to block {:?} -> {:?}", lines, ship_to);
        ship_to
    }

    /// Trimmed, non-blank lines following the anchor line.
    fn block_lines<'a>(&self, text: &'a str) -> Vec<&'a str> {
        // ASCII lowering keeps byte offsets aligned with `text`.
        let Some(idx) = text.to_ascii_lowercase().find(&self.anchor) else {
            return Vec::new();
        };

        text[idx..]
            .lines()
            .skip(1)
            .take(self.window)
            .map(str::trim)
            .filter(|line| !line.is_empty())
            .collect()
    }
}

impl Default for ShipToExtractor {
    fn default() -> Self {
        Self::new()
    }
}

fn country_of(line: &str) -> Option<&'static str> {
    if line.contains("Canada") {
        Some("Canada")
    } else if line.contains("USA") || line.contains("United States") {
        Some("USA")
    } else {
        None
    }
}

fn is_company_candidate(line: &str) -> bool {
    !line.to_uppercase().starts_with("ATTN:")
        && !line.contains('@')
        && !NON_COMPANY_MARKERS.iter().any(|marker| line.contains(marker))
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn some(s: &str) -> Option<String> {
        Some(s.to_string())
    }

    #[test]
    fn test_us_block() {
        let text = "Bill To\nShip To:\nAcme Corp\n123 Main St\nSpringfield, IL 62704\nUSA\n";
        let ship_to = ShipToExtractor::new().extract(text);

        assert_eq!(
            ship_to,
            ShipTo {
                company: some("Acme Corp"),
                address: some("123 Main St"),
                city: some("Springfield"),
                state_or_province: some("IL"),
                postal_code: some("62704"),
                country: some("USA"),
            }
        );
    }

    #[test]
    fn test_canadian_postal_code_keeps_both_parts() {
        let text = "SHIP TO\nNord Outillage\n455 Rue Principale\nLaval, QC H7N 4K2\nCanada";
        let ship_to = ShipToExtractor::new().extract(text);

        assert_eq!(ship_to.city, some("Laval"));
        assert_eq!(ship_to.state_or_province, some("QC"));
        assert_eq!(ship_to.postal_code, some("H7N 4K2"));
        assert_eq!(ship_to.country, some("Canada"));
        assert_eq!(ship_to.company, some("Nord Outillage"));
    }

    #[test]
    fn test_country_inferred_from_province() {
        let text = "Ship to\nMaple Supply\n10 King St W\nToronto, ON M5H 1A1";
        assert_eq!(ShipToExtractor::new().extract(text).country, some("Canada"));

        let text = "Ship to\nPrairie Co\nDenver, CO 80202";
        assert_eq!(ShipToExtractor::new().extract(text).country, some("USA"));
    }

    #[test]
    fn test_last_surviving_candidate_is_company() {
        let text = "Ship To\nGlobal Holdings\nATTN: Receiving\nGlobal Fabrication Div\n\
                    buyer@global.test\nCounter Sales Customers ONLY\n77 Forge Rd\nAkron, OH 44301\n\
                    United States";
        let ship_to = ShipToExtractor::new().extract(text);

        assert_eq!(ship_to.company, some("Global Fabrication Div"));
        assert_eq!(ship_to.address, some("77 Forge Rd"));
        assert_eq!(ship_to.country, some("USA"));
    }

    #[test]
    fn test_no_city_line_leaves_address_absent() {
        let text = "Ship to\nWarehouse 9\nDock Door 4";
        let ship_to = ShipToExtractor::new().extract(text);

        assert_eq!(ship_to.city, None);
        assert_eq!(ship_to.address, None);
        assert_eq!(ship_to.company, some("Dock Door 4"));
        assert_eq!(ship_to.country, some("USA"));
    }

    #[test]
    fn test_window_limits_block() {
        let mut text = String::from("Ship to\n");
        for i in 0..11 {
            text.push_str(&format!("Line {}\n", i));
        }
        text.push_str("Far Away, NY 10001\n");

        let ship_to = ShipToExtractor::new().extract(&text);
        assert_eq!(ship_to.city, None);
        assert_eq!(ship_to.company, some("Line 10"));

        let ship_to = ShipToExtractor::new().with_window(12).extract(&text);
        assert_eq!(ship_to.city, some("Far Away"));
    }

    #[test]
    fn test_missing_or_empty_block() {
        assert!(ShipToExtractor::new().extract("Bill to\nAcme").is_empty());
        assert!(ShipToExtractor::new().extract("Ship to\n   \n\n").is_empty());
        assert!(ShipToExtractor::new().extract("").is_empty());
    }
}
