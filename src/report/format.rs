//! Display formatting for money, rates and quantities.

use rust_decimal::{Decimal, RoundingStrategy};

/// Rounds to `dp` decimal places, midpoint away from zero.
pub fn round_to(value: Decimal, dp: u32) -> Decimal {
    value.round_dp_with_strategy(dp, RoundingStrategy::MidpointAwayFromZero)
}

/// Formats an amount as dollars with thousands separators.
///
/// ```
/// use redundancy_engine::report::format_currency;
/// use rust_decimal::Decimal;
///
/// assert_eq!(format_currency(Decimal::new(7292307692, 5)), "$72,923.08");
/// ```
pub fn format_currency(amount: Decimal) -> String {
    let rounded = round_to(amount, 2);
    let text = format!("{:.2}", rounded.abs());
    let (whole, cents) = text.split_once('.').unwrap_or((text.as_str(), "00"));

    let mut grouped = String::with_capacity(whole.len() + whole.len() / 3);
    for (index, digit) in whole.chars().enumerate() {
        if index > 0 && (whole.len() - index) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(digit);
    }

    let sign = if rounded < Decimal::ZERO { "-" } else { "" };
    format!("{}${}.{}", sign, grouped, cents)
}

/// Formats a fraction as a whole-number percentage (0.32 -> "32%").
pub fn format_percent(rate: Decimal) -> String {
    format!("{}%", round_to(rate * Decimal::ONE_HUNDRED, 0).normalize())
}

/// Formats a quantity with a fixed number of decimal places.
pub fn format_fixed(value: Decimal, dp: usize) -> String {
    format!("{:.*}", dp, round_to(value, dp as u32))
}
