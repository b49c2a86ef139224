//! CSS Values & Units Level 3 — §6 Dimensions (fixed-size subset)
//! Spec: <https://www.w3.org/TR/css-values-3/#lengths>
//!
//! Only `px`, `rem` and `em` are understood, and both font-relative units resolve
//! against a fixed 16px root. `em` really depends on the parent font size; treating it
//! like `rem` is a known approximation.

use crate::ParseError;

/// Pixels per `rem` (and per `em`, see module docs).
pub const PX_PER_ROOT_EM: f64 = 16.0;

/// Supported subset of CSS <length> units.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum LengthUnit {
    Pixels,
    Ems,
    RootEms,
}

impl LengthUnit {
    /// Map a unit suffix to a supported unit. Case sensitive.
    fn from_suffix(suffix: &str) -> Option<Self> {
        match suffix {
            "px" => Some(Self::Pixels),
            "em" => Some(Self::Ems),
            "rem" => Some(Self::RootEms),
            _ => None,
        }
    }
}

/// A CSS <length> value with unit.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Length {
    pub value: f64,
    pub unit: LengthUnit,
}

/// Compute the pixel value for a given `Length`.
pub fn compute_length_px(length: Length) -> f64 {
    match length.unit {
        LengthUnit::Pixels => length.value,
        LengthUnit::Ems | LengthUnit::RootEms => length.value * PX_PER_ROOT_EM,
    }
}

/// Read the leading float of a `[0-9.]+` run: digits, an optional dot, digits.
/// Anything after a second dot is ignored. Returns `None` when no digit is present.
fn leading_float(run: &str) -> Option<f64> {
    let bytes = run.as_bytes();
    let mut end = 0usize;
    let mut has_digits = false;
    while end < bytes.len() && bytes[end].is_ascii_digit() {
        end += 1;
        has_digits = true;
    }
    if end < bytes.len() && bytes[end] == b'.' {
        end += 1;
        while end < bytes.len() && bytes[end].is_ascii_digit() {
            end += 1;
            has_digits = true;
        }
    }
    if !has_digits {
        return None;
    }
    run.get(..end)?.parse::<f64>().ok()
}

/// Parse a `<number><unit>` size such as `1rem`, `16px` or `0.5em`.
///
/// Surrounding whitespace is ignored. The numeric part is an unsigned run of digits
/// and dots; the unit must follow immediately.
///
/// # Errors
/// Returns `ParseError::UnexpectedToken` when the text is not a number followed by
/// letters, and `ParseError::UnsupportedUnit` when the unit is not `px`, `rem` or `em`.
pub fn parse_fixed_length(text: &str) -> Result<Length, ParseError> {
    let trimmed = text.trim();
    let split = trimmed
        .find(|ch: char| !(ch.is_ascii_digit() || ch == '.'))
        .unwrap_or(trimmed.len());
    let (number, suffix) = trimmed.split_at(split);
    let value = leading_float(number).ok_or(ParseError::UnexpectedToken)?;
    if suffix.is_empty() || !suffix.bytes().all(|byte| byte.is_ascii_alphabetic()) {
        return Err(ParseError::UnexpectedToken);
    }
    let unit = LengthUnit::from_suffix(suffix).ok_or(ParseError::UnsupportedUnit)?;
    Ok(Length { value, unit })
}

#[cfg(test)]
mod tests {
    use super::*;

    /// Pixels pass through; font-relative units scale by 16.
    ///
    /// # Panics
    /// Panics if a supported size is rejected or converted incorrectly.
    #[test]
    fn converts_supported_units() {
        let cases = [
            ("16px", 16.0),
            ("1rem", 16.0),
            ("2rem", 32.0),
            ("0.5rem", 8.0),
            ("1.5em", 24.0),
            ("  10px ", 10.0),
        ];
        for (text, expected) in cases {
            let length = parse_fixed_length(text);
            assert_eq!(length.map(compute_length_px), Ok(expected), "{text}");
        }
    }

    /// Other units, signs, missing units and bare numbers are unparseable.
    ///
    /// # Panics
    /// Panics if an unsupported size parses.
    #[test]
    fn rejects_everything_else() {
        assert_eq!(parse_fixed_length("1vw"), Err(ParseError::UnsupportedUnit));
        assert_eq!(parse_fixed_length("1REM"), Err(ParseError::UnsupportedUnit));
        assert_eq!(parse_fixed_length("1%"), Err(ParseError::UnexpectedToken));
        assert_eq!(parse_fixed_length("-1px"), Err(ParseError::UnexpectedToken));
        assert_eq!(parse_fixed_length("16"), Err(ParseError::UnexpectedToken));
        assert_eq!(parse_fixed_length(".px"), Err(ParseError::UnexpectedToken));
        assert_eq!(parse_fixed_length("calc"), Err(ParseError::UnexpectedToken));
        assert_eq!(parse_fixed_length("1px 2px"), Err(ParseError::UnexpectedToken));
    }

    /// A second dot ends the number the way a lenient prefix reader does.
    ///
    /// # Panics
    /// Panics if the leading float is not what a prefix reader yields.
    #[test]
    fn extra_dots_end_the_number() {
        let length = parse_fixed_length("1.5.2px");
        assert_eq!(
            length,
            Ok(Length {
                value: 1.5,
                unit: LengthUnit::Pixels
            })
        );
    }
}
