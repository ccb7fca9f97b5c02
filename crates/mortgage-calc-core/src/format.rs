//! Display formatting for form fields and results.
//!
//! Separators are cosmetic: everything that interprets a number strips them
//! first via [`strip_separators`].

use rust_decimal::{Decimal, RoundingStrategy};

use crate::types::Money;

/// Thousands separator inserted into the integer part of a number.
pub const SEPARATOR: char = ',';

/// Currency symbol prefixed to formatted amounts.
pub const CURRENCY_SYMBOL: &str = "£";

/// Decimal places used for currency amounts.
pub const CURRENCY_DP: u32 = 2;

/// Remove every thousands separator.
pub fn strip_separators(text: &str) -> String {
    text.chars().filter(|c| *c != SEPARATOR).collect()
}

/// Re-insert separators every three digits in the integer part.
///
/// Existing separators are stripped first, so formatting is idempotent.
/// Only text before the first `.` is grouped; other characters are left
/// where they are.
pub fn format_number_with_commas(text: &str) -> String {
    if text.is_empty() {
        return String::new();
    }

    let stripped = strip_separators(text);
    let (integer, fraction) = match stripped.find('.') {
        Some(idx) => stripped.split_at(idx),
        None => (stripped.as_str(), ""),
    };

    let mut out = String::with_capacity(stripped.len() + stripped.len() / 3);
    let mut run = String::new();
    for c in integer.chars() {
        if c.is_ascii_digit() {
            run.push(c);
        } else {
            push_grouped(&mut out, &run);
            run.clear();
            out.push(c);
        }
    }
    push_grouped(&mut out, &run);
    out.push_str(fraction);
    out
}

fn push_grouped(out: &mut String, digits: &str) {
    let len = digits.len();
    for (i, c) in digits.chars().enumerate() {
        if i > 0 && (len - i) % 3 == 0 {
            out.push(SEPARATOR);
        }
        out.push(c);
    }
}

/// Round a currency amount to exactly two places, midpoints away from zero.
pub fn round_currency(amount: Money) -> Money {
    let mut rounded =
        amount.round_dp_with_strategy(CURRENCY_DP, RoundingStrategy::MidpointAwayFromZero);
    rounded.rescale(CURRENCY_DP);
    rounded
}

/// Render an amount as currency text, e.g. `£276,339.37`.
pub fn format_currency(amount: Money) -> String {
    let rounded = round_currency(amount);
    let sign = if rounded.is_sign_negative() && !rounded.is_zero() {
        "-"
    } else {
        ""
    };
    let digits = rounded.abs().to_string();
    format!("{sign}{CURRENCY_SYMBOL}{}", format_number_with_commas(&digits))
}

/// Why numeric text could not become a [`Decimal`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ParseNumberError {
    /// Not a number at all.
    NotANumber,
    /// A well-formed number beyond the range of `Decimal`.
    TooLarge,
    /// A well-formed number needing more than 28 decimal places.
    TooPrecise,
}

/// Parse user-entered numeric text after stripping separators.
///
/// Accepts plain and scientific notation with an optional sign and
/// surrounding whitespace.
pub fn try_parse_number(text: &str) -> Result<Decimal, ParseNumberError> {
    let cleaned = strip_separators(text);
    let literal = normalize_literal(cleaned.trim()).ok_or(ParseNumberError::NotANumber)?;

    let parsed = if literal.contains('e') {
        Decimal::from_scientific(&literal).ok()
    } else {
        literal.parse::<Decimal>().ok()
    };

    parsed.ok_or_else(|| match literal.parse::<f64>() {
        Ok(v) if v.abs() < 1.0 => ParseNumberError::TooPrecise,
        _ => ParseNumberError::TooLarge,
    })
}

/// [`try_parse_number`] without the failure reason.
pub fn parse_number(text: &str) -> Option<Decimal> {
    try_parse_number(text).ok()
}

/// Check the literal grammar and rewrite it into a form both `Decimal`
/// parsers accept: no `+` signs, no bare `.`, lowercase exponent.
fn normalize_literal(text: &str) -> Option<String> {
    let (negative, unsigned) = split_sign(text);
    let (mantissa, exponent) = match unsigned.find(['e', 'E']) {
        Some(idx) => (&unsigned[..idx], Some(&unsigned[idx + 1..])),
        None => (unsigned, None),
    };

    let (int, frac) = mantissa.split_once('.').unwrap_or((mantissa, ""));
    if (int.is_empty() && frac.is_empty()) || !all_digits(int) || !all_digits(frac) {
        return None;
    }

    let mut literal = String::with_capacity(text.len() + 2);
    if negative {
        literal.push('-');
    }
    literal.push_str(if int.is_empty() { "0" } else { int });
    if !frac.is_empty() {
        literal.push('.');
        literal.push_str(frac);
    }

    if let Some(exp) = exponent {
        let (exp_negative, exp_digits) = split_sign(exp);
        if exp_digits.is_empty() || !all_digits(exp_digits) {
            return None;
        }
        literal.push('e');
        if exp_negative {
            literal.push('-');
        }
        literal.push_str(exp_digits);
    }
    Some(literal)
}

fn split_sign(text: &str) -> (bool, &str) {
    match text.as_bytes().first() {
        Some(b'-') => (true, &text[1..]),
        Some(b'+') => (false, &text[1..]),
        _ => (false, text),
    }
}

fn all_digits(text: &str) -> bool {
    text.chars().all(|c| c.is_ascii_digit())
}
