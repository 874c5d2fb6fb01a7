//! Lenient money parsing, balance auto-compute and display formatting.
//!
//! Fee-entry fields are free text. Missing or unparseable input is treated
//! as zero rather than rejected; a leading numeric prefix is honored the way
//! a browser number field would (`"12abc"` reads as `12`).
//!
//! Arithmetic on amounts saturates at the `Decimal` bounds instead of
//! panicking. Writes are held to `MAX_AMOUNT` so stored sums stay exact.

use std::str::FromStr;

use rust_decimal::{Decimal, RoundingStrategy};

/// Largest magnitude accepted for a single amount on the write path.
pub const MAX_AMOUNT: Decimal = Decimal::from_parts(2_764_472_320, 232_830, 0, false, 0);

/// Whether `amount` is within `-MAX_AMOUNT..=MAX_AMOUNT`.
pub fn in_range(amount: Decimal) -> bool {
    amount.abs() <= MAX_AMOUNT
}

/// Parse the leading numeric prefix of `input`.
///
/// Returns `None` when no digits are found or the value does not fit.
pub fn parse_amount(input: &str) -> Option<Decimal> {
    let prefix = numeric_prefix(input.trim_start())?;
    if prefix.contains(['e', 'E']) {
        Decimal::from_scientific(&prefix).ok()
    } else {
        Decimal::from_str(&prefix).ok()
    }
}

/// Parse `input`, defaulting to zero.
pub fn parse_amount_or_zero(input: &str) -> Decimal {
    parse_amount(input).unwrap_or(Decimal::ZERO)
}

/// Read an amount out of a JSON document field.
///
/// Numbers and numeric strings are accepted; anything else is `None`.
pub fn amount_from_json(value: Option<&serde_json::Value>) -> Option<Decimal> {
    match value? {
        serde_json::Value::Number(n) => parse_amount(&n.to_string()),
        serde_json::Value::String(s) => parse_amount(s),
        _ => None,
    }
}

/// Derive `total_fees - paid_amount` from raw form input.
///
/// Missing or unparseable inputs count as zero. The result saturates at the
/// `Decimal` bounds; use `in_range` to reject inputs that large.
pub fn compute_balance(total_fees: &str, paid_amount: &str) -> Decimal {
    parse_amount_or_zero(total_fees).saturating_sub(parse_amount_or_zero(paid_amount))
}

/// Round to two places, half away from zero.
pub fn round_amount(amount: Decimal) -> Decimal {
    let mut rounded = amount.round_dp_with_strategy(2, RoundingStrategy::MidpointAwayFromZero);
    rounded.rescale(2);
    rounded
}

/// Render an amount with exactly two decimal places.
pub fn format_amount(amount: Decimal) -> String {
    round_amount(amount).to_string()
}

fn numeric_prefix(s: &str) -> Option<String> {
    let bytes = s.as_bytes();
    let mut end = 0;
    let mut out = String::new();

    if let Some(&sign) = bytes.first() {
        if sign == b'+' || sign == b'-' {
            if sign == b'-' {
                out.push('-');
            }
            end += 1;
        }
    }

    let int_start = end;
    while end < bytes.len() && bytes[end].is_ascii_digit() {
        end += 1;
    }
    let int_digits = &s[int_start..end];

    let mut frac_digits = "";
    if end < bytes.len() && bytes[end] == b'.' {
        let frac_start = end + 1;
        let mut frac_end = frac_start;
        while frac_end < bytes.len() && bytes[frac_end].is_ascii_digit() {
            frac_end += 1;
        }
        frac_digits = &s[frac_start..frac_end];
        end = frac_end;
    }

    if int_digits.is_empty() && frac_digits.is_empty() {
        return None;
    }

    out.push_str(if int_digits.is_empty() { "0" } else { int_digits });
    if !frac_digits.is_empty() {
        out.push('.');
        out.push_str(frac_digits);
    }

    // Exponent only counts when followed by at least one digit.
    if end < bytes.len() && (bytes[end] == b'e' || bytes[end] == b'E') {
        let mut exp_end = end + 1;
        if exp_end < bytes.len() && (bytes[exp_end] == b'+' || bytes[exp_end] == b'-') {
            exp_end += 1;
        }
        let digits_start = exp_end;
        while exp_end < bytes.len() && bytes[exp_end].is_ascii_digit() {
            exp_end += 1;
        }
        if exp_end > digits_start {
            out.push_str(&s[end..exp_end]);
        }
    }

    Some(out)
}
