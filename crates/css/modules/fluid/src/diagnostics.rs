//! Advisory messages produced while resolving `@fluid` calls.

use crate::mapping::format_number;
use std::fmt;

/// A recoverable problem found in one `@fluid` call. One is produced per offending
/// call, so a declaration with two bad calls yields two.
#[derive(Clone, Debug, PartialEq)]
pub enum Diagnostic {
    /// An argument is not a canonical number; the call is left untouched.
    InvalidArguments,
    /// The call has a number of arguments other than 0, 2 or 3; left untouched.
    WrongArgumentCount { received: usize },
    /// Both widths are equal. The call is still replaced, by `size` in px.
    DegenerateWidthRange {
        min_width: f64,
        max_width: f64,
        size: f64,
    },
}

impl fmt::Display for Diagnostic {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::InvalidArguments => {
                formatter.write_str("@fluid function contains invalid numerical arguments.")
            }
            Self::WrongArgumentCount { received } => write!(
                formatter,
                "@fluid function requires either 0, 2, or 3 numerical arguments, but received {received}."
            ),
            Self::DegenerateWidthRange {
                min_width,
                max_width,
                size,
            } => write!(
                formatter,
                "minScreen ({}px) and maxScreen ({}px) are equal. Using minSize ({}px).",
                format_number(*min_width),
                format_number(*max_width),
                format_number(*size)
            ),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    /// Messages name the offending numbers.
    ///
    /// # Panics
    /// Panics if a message text changes.
    #[test]
    fn message_texts() {
        assert_eq!(
            Diagnostic::WrongArgumentCount { received: 4 }.to_string(),
            "@fluid function requires either 0, 2, or 3 numerical arguments, but received 4."
        );
        assert_eq!(
            Diagnostic::DegenerateWidthRange {
                min_width: 768.0,
                max_width: 768.0,
                size: 16.0,
            }
            .to_string(),
            "minScreen (768px) and maxScreen (768px) are equal. Using minSize (16px)."
        );
    }
}
