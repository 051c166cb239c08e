//! Line item tokenization.
//!
//! Item rows carry no column delimiters. The two trailing amounts (unit price
//! and total) are the only fixed anchor, so a row is read backward from them
//! and forward from the leading quantity; everything in between is the body,
//! which holds the item id and description.
//!
//! ```text
//! 2  MISC 158012-5013 ASSY ATE400 48INX30IN  2,935.00  EA  5,870.00
//! ^  ^------------- body ------------------^  ^price   ^uom ^total
//! ```

use std::collections::HashSet;

use crate::models::config::ExtractionConfig;
use crate::models::quote::LineItem;

use super::rules::{is_money_token, parse_money};

/// Tokenizes raw text lines into [`LineItem`]s.
#[derive(Debug, Clone)]
pub struct LineItemTokenizer {
    stopwords: HashSet<String>,
}

impl LineItemTokenizer {
    /// Create a tokenizer with the default stop-word set.
    pub fn new() -> Self {
        Self::from_config(&ExtractionConfig::default())
    }

    /// Create a tokenizer from extraction configuration.
    pub fn from_config(config: &ExtractionConfig) -> Self {
        Self {
            stopwords: config
                .item_stopwords
                .iter()
                .map(|w| w.to_uppercase())
                .collect(),
        }
    }

    /// Tokenize one raw line; `None` when the line is not an item row.
    pub fn tokenize(&self, line: &str) -> Option<LineItem> {
        let tokens: Vec<&str> = line.split_whitespace().collect();
        if tokens.is_empty() {
            return None;
        }

        let money: Vec<usize> = tokens
            .iter()
            .enumerate()
            .filter(|(_, tok)| is_money_token(tok))
            .map(|(i, _)| i)
            .collect();
        let &[.., price_idx, total_idx] = money.as_slice() else {
            return None;
        };

        let unit_price = parse_money(tokens[price_idx])?;
        let total_sales = parse_money(tokens[total_idx])?;

        // Only the first token of the leading digit run is the quantity; the
        // rest of the run is dropped.
        let qty_len = tokens
            .iter()
            .take_while(|tok| tok.bytes().all(|b| b.is_ascii_digit()))
            .count();
        if qty_len == 0 {
            return None;
        }
        let quantity: u64 = tokens[0].parse().ok()?;

        if qty_len >= price_idx {
            return None;
        }
        let mut body = &tokens[qty_len..price_idx];

        let uom_tokens = &tokens[price_idx + 1..total_idx];
        let uom = (!uom_tokens.is_empty()).then(|| uom_tokens.join(" "));

        while let [first, rest @ ..] = body {
            if *first != "0" {
                break;
            }
            body = rest;
        }
        if body.is_empty() {
            return None;
        }

        let id_idx = body
            .iter()
            .position(|tok| tok.chars().any(|c| c.is_ascii_digit() || c == '-'))
            .or_else(|| {
                body.iter()
                    .position(|tok| !self.stopwords.contains(&tok.to_uppercase()))
            })?;

        Some(LineItem {
            quantity,
            item_id: body[id_idx].to_string(),
            item_desc: body[id_idx + 1..].join(" "),
            uom,
            unit_price,
            total_sales,
        })
    }
}

impl Default for LineItemTokenizer {
    fn default() -> Self {
        Self::new()
    }
}
