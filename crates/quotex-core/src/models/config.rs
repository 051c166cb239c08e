//! Configuration structures for the extraction pipeline.

use serde::{Deserialize, Serialize};
use std::path::Path;

use crate::error::{QuotexError, Result};

/// Main configuration for the quotex pipeline.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct QuotexConfig {
    /// Quote extraction configuration.
    pub extraction: ExtractionConfig,

    /// Page-text source configuration.
    pub pdf: PdfConfig,

    /// Output sink configuration.
    pub output: OutputConfig,
}

/// Extraction heuristics configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ExtractionConfig {
    /// Brand emitted on every record.
    pub brand: String,

    /// Text contained in the line that opens the item section.
    pub item_section_start: String,

    /// Prefix of the trimmed line that closes the item section.
    pub item_section_end: String,

    /// Anchor phrase of the ship-to block (matched case-insensitively).
    pub ship_to_anchor: String,

    /// Number of lines after the anchor considered part of the block.
    pub ship_to_window: usize,

    /// Generic packing/category labels never used as an item id.
    pub item_stopwords: Vec<String>,

    /// Province and territory codes that imply a Canadian address.
    pub canadian_provinces: Vec<String>,
}

impl Default for ExtractionConfig {
    fn default() -> Self {
        Self {
            brand: "Alcorn Industrial Inc".to_string(),
            item_section_start: "Please send your order to:".to_string(),
            item_section_end: "Tax Summary".to_string(),
            ship_to_anchor: "ship to".to_string(),
            ship_to_window: 11,
            item_stopwords: ["PARTS", "&", "MISC", "PARTS&MISC"]
                .iter()
                .map(|s| s.to_string())
                .collect(),
            canadian_provinces: [
                "AB", "BC", "MB", "NB", "NL", "NS", "NT", "NU", "ON", "PE", "QC", "SK", "YT",
            ]
            .iter()
            .map(|s| s.to_string())
            .collect(),
        }
    }
}

/// Page-text source configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PdfConfig {
    /// Maximum pages to read per document (0 = unlimited).
    pub max_pages: usize,

    /// Page separator in plain-text page dumps.
    pub page_separator: char,
}

impl Default for PdfConfig {
    fn default() -> Self {
        Self {
            max_pages: 0,
            page_separator: '\u{000c}',
        }
    }
}

/// Output sink configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct OutputConfig {
    /// Default output format name (`csv`, `json` or `text`).
    pub format: String,

    /// Default file name for merged batch output.
    pub file_name: String,
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            format: "csv".to_string(),
            file_name: "Alcorn_Quotes_Merged.csv".to_string(),
        }
    }
}

impl QuotexConfig {
    /// Load configuration from a JSON file.
    pub fn from_file(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)?;
        let config: Self = serde_json::from_str(&content)?;
        config.validate()?;
        Ok(config)
    }

    /// Save configuration to a JSON file.
    pub fn save(&self, path: &Path) -> Result<()> {
        let content = serde_json::to_string_pretty(self)?;
        std::fs::write(path, content)?;
        Ok(())
    }

    /// Check values the engine cannot work with.
    pub fn validate(&self) -> Result<()> {
        let extraction = &self.extraction;

        if extraction.item_section_start.trim().is_empty() {
            return Err(QuotexError::Config(
                "extraction.item_section_start must not be empty".to_string(),
            ));
        }
        if extraction.item_section_end.trim().is_empty() {
            return Err(QuotexError::Config(
                "extraction.item_section_end must not be empty".to_string(),
            ));
        }
        if extraction.ship_to_anchor.trim().is_empty() {
            return Err(QuotexError::Config(
                "extraction.ship_to_anchor must not be empty".to_string(),
            ));
        }

        Ok(())
    }
}
