//! CSS Values & Units Level 3 — §4 Numbers
//! Spec: <https://www.w3.org/TR/css-values-3/#numeric-types>
//!
//! `@fluid()` arguments are plain numbers, but only in canonical decimal form: the
//! spelling a shortest round-trip printer produces for the parsed value. Anything else
//! (`022`, `1.0`, `.5`, `+1`, `1e3`, `22rq3112`) is rejected rather than partially read.

use crate::ParseError;

/// A CSS <number>
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Number(pub f64);

/// Check the canonical grammar: `-?(0|[1-9][0-9]*)(\.[0-9]*[1-9])?`, excluding `-0`.
fn is_canonical_spelling(text: &str) -> bool {
    let unsigned = text.strip_prefix('-').unwrap_or(text);
    let (integer, fraction) = match unsigned.split_once('.') {
        Some((integer, fraction)) => (integer, Some(fraction)),
        None => (unsigned, None),
    };

    let integer_ok = match integer.as_bytes() {
        [b'0'] => true,
        [first, rest @ ..] => {
            (b'1'..=b'9').contains(first) && rest.iter().all(u8::is_ascii_digit)
        }
        [] => false,
    };
    if !integer_ok {
        return false;
    }

    if let Some(digits) = fraction {
        let all_digits = !digits.is_empty() && digits.bytes().all(|byte| byte.is_ascii_digit());
        if !all_digits || digits.ends_with('0') {
            return false;
        }
    }

    // Negative zero prints as plain `0`.
    !(text.starts_with('-') && integer == "0" && fraction.is_none())
}

/// Parse a canonical CSS <number> from a whole token.
///
/// # Errors
/// Returns `ParseError::UnexpectedToken` for empty input and
/// `ParseError::NonCanonical` when the text is not the canonical spelling of the
/// number it denotes.
pub fn parse_canonical_number(text: &str) -> Result<Number, ParseError> {
    if text.is_empty() {
        return Err(ParseError::UnexpectedToken);
    }
    if !is_canonical_spelling(text) {
        return Err(ParseError::NonCanonical);
    }
    let value = text
        .parse::<f64>()
        .map_err(|_parse_error| ParseError::NonCanonical)?;
    // Digit strings longer than an f64 can hold do not print back unchanged.
    if value.to_string() != text {
        return Err(ParseError::NonCanonical);
    }
    Ok(Number(value))
}
