// 💵 Amount Formatting - pure conversions between typed text and money values
//
// Three directions:
// - amount → seed text (when the keypad opens)
// - typed text → committed amount (when the keypad confirms)
// - amount → display text (form rows, header card)
//
// None of these touch editor state, so they are tested on their own.

/// Decimal separator accepted by the keypad
pub const DECIMAL_SEPARATOR: char = '.';

/// Canonical text of an empty edit buffer
pub const EMPTY_BUFFER: &str = "0";

/// Digits allowed after the decimal separator
pub const MAX_FRACTION_DIGITS: usize = 2;

/// Format an externally supplied amount as the initial keypad text.
///
/// Positive amounts are printed with two decimals, then trailing zeros and a
/// dangling separator are stripped: `12.0 → "12"`, `12.5 → "12.5"`,
/// `12.34 → "12.34"`. Zero, negative and non-finite amounts seed `"0"`.
pub fn seed_text(amount: f64) -> String {
    if !amount.is_finite() || amount <= 0.0 {
        return EMPTY_BUFFER.to_string();
    }

    let fixed = format!("{:.2}", amount);
    let trimmed = fixed
        .trim_end_matches('0')
        .trim_end_matches(DECIMAL_SEPARATOR);

    if trimmed.is_empty() {
        EMPTY_BUFFER.to_string()
    } else {
        trimmed.to_string()
    }
}

/// Parse keypad text into a committed amount.
///
/// Never fails: text that does not parse becomes 0. The result is rounded to
/// cents, and negative or non-finite values collapse to 0.
pub fn parse_committed(text: &str) -> f64 {
    let parsed = text.trim().parse::<f64>().unwrap_or(0.0);
    round_to_cents(parsed)
}

/// Round to two decimal places (half away from zero), flooring bad values at 0
pub fn round_to_cents(value: f64) -> f64 {
    if !value.is_finite() || value <= 0.0 {
        return 0.0;
    }
    (value * 100.0).round() / 100.0
}

/// Display form used by the form screen: symbol + two decimals
pub fn format_amount(symbol: &str, amount: f64) -> String {
    format!("{}{:.2}", symbol, amount)
}

/// Number of characters after the separator (0 when there is none)
pub fn fraction_len(text: &str) -> usize {
    text.split_once(DECIMAL_SEPARATOR)
        .map(|(_, fraction)| fraction.chars().count())
        .unwrap_or(0)
}
