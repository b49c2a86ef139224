//! CSS Values and Units Module Level 3 — numeric literals and the fixed-size lengths
//! accepted around `@fluid()`.
//! Spec: <https://www.w3.org/TR/css-values-3/>

#![forbid(unsafe_code)]

// Per-chapter modules mirroring the spec table of contents.
pub mod chapter_4_numbers;
pub mod chapter_6_dimensions;

pub use chapter_4_numbers::{Number, parse_canonical_number};
pub use chapter_6_dimensions::{
    Length, LengthUnit, PX_PER_ROOT_EM, compute_length_px, parse_fixed_length,
};

/// Parse error for Values & Units parsing utilities in this crate.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ParseError {
    /// The text is empty or does not follow the expected grammar at all.
    UnexpectedToken,
    /// The text is a number, but not written in its canonical form.
    NonCanonical,
    /// The numeric part parsed but the unit is not one we convert.
    UnsupportedUnit,
}
