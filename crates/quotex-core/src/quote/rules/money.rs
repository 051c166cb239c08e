//! Money token recognition and parsing.

use rust_decimal::Decimal;
use std::str::FromStr;

use super::patterns::MONEY_TOKEN;

/// Check whether a whitespace-delimited token is a printed amount.
///
/// Accepts digits with optional comma grouping in threes followed by exactly
/// two decimals: `8,222.00`, `15.50`. Rejects `8222.0`, `8,222`, `8,22.00`.
pub fn is_money_token(token: &str) -> bool {
    MONEY_TOKEN.is_match(token)
}

/// Parse a money token into a two-decimal amount.
///
/// Returns `None` for anything that is not a money token or does not fit a
/// [`Decimal`].
pub fn parse_money(token: &str) -> Option<Decimal> {
    if !is_money_token(token) {
        return None;
    }

    let cleaned = token.replace(',', "");
    let mut amount = Decimal::from_str(&cleaned).ok()?;
    amount.rescale(2);
    Some(amount)
}
