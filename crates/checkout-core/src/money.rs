//! Money helpers
//!
//! Prices are `Decimal` in major units (pounds). The payment API wants
//! integer minor units (pence) and the UI wants en-GB currency strings.

use rust_decimal::prelude::ToPrimitive;
use rust_decimal::{Decimal, RoundingStrategy};
use rust_decimal_macros::dec;

/// The only currency the storefront sells in
pub const CURRENCY_CODE: &str = "GBP";

const CURRENCY_SYMBOL: &str = "£";

/// Convert a major-unit amount to minor units, rounding half away from zero
pub fn to_minor_units(amount: Decimal) -> Option<i64> {
    (amount * dec!(100))
        .round_dp_with_strategy(0, RoundingStrategy::MidpointAwayFromZero)
        .to_i64()
}

/// Format like `Intl.NumberFormat("en-GB", { style: "currency", currency: "GBP" })`
pub fn format_price(amount: Decimal) -> String {
    let rounded = amount.round_dp_with_strategy(2, RoundingStrategy::MidpointAwayFromZero);
    let sign = if rounded.is_sign_negative() && !rounded.is_zero() { "-" } else { "" };
    let digits = format!("{:.2}", rounded.abs());
    let (whole, fraction) = digits.split_once('.').unwrap_or((digits.as_str(), "00"));

    format!("{sign}{CURRENCY_SYMBOL}{}.{fraction}", group_thousands(whole))
}

fn group_thousands(whole: &str) -> String {
    let mut grouped = String::with_capacity(whole.len() + whole.len() / 3);
    for (i, ch) in whole.chars().enumerate() {
        if i > 0 && (whole.len() - i) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(ch);
    }
    grouped
}
