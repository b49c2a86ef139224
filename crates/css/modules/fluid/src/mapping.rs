//! The size-over-viewport-width line and its `calc()` spelling.

use std::fmt;

/// Decimal places kept in emitted slopes and intercepts.
const PRECISION: f64 = 100_000.0;

/// Round to 5 decimal places, halves away from zero.
pub fn round5(value: f64) -> f64 {
    // Adding zero turns a rounded `-0` into `0`.
    (value * PRECISION).round() / PRECISION + 0.0
}

/// Shortest decimal spelling of a number: `16`, `2.08333`, never `16.0` or `-0`.
pub fn format_number(value: f64) -> String {
    (value + 0.0).to_string()
}

/// Widths and base size in effect for one `@fluid` call.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct FluidRange {
    pub min_width: f64,
    pub max_width: f64,
    pub base_font_size: f64,
}

/// `size(width) = slope * width + intercept`, all in px.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct LinearMapping {
    pub slope: f64,
    pub intercept: f64,
}

impl LinearMapping {
    /// Line through `(min_width, min_size)` and `(max_width, max_size)`.
    /// `None` when the widths are equal.
    pub fn between(min_size: f64, max_size: f64, range: &FluidRange) -> Option<Self> {
        let width_delta = range.max_width - range.min_width;
        if width_delta == 0.0 {
            return None;
        }
        let slope = (max_size - min_size) / width_delta;
        let intercept = slope.mul_add(-range.min_width, min_size);
        Some(Self { slope, intercept })
    }

    /// Slope expressed in `vw` (1vw is 1% of the viewport width), rounded.
    pub fn slope_vw(&self) -> f64 {
        round5(self.slope * 100.0)
    }

    /// Intercept in px, rounded.
    pub fn intercept_px(&self) -> f64 {
        round5(self.intercept)
    }
}

/// What replaces a `@fluid(...)` call.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum FluidValue {
    /// Degenerate width range: a plain pixel size.
    Fixed(f64),
    Interpolated(LinearMapping),
}

impl fmt::Display for FluidValue {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Fixed(size) => write!(formatter, "{}px", format_number(*size)),
            Self::Interpolated(mapping) => write!(
                formatter,
                "calc({}px + {}vw)",
                format_number(mapping.intercept_px()),
                format_number(mapping.slope_vw())
            ),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn range(min_width: f64, max_width: f64) -> FluidRange {
        FluidRange {
            min_width,
            max_width,
            base_font_size: 16.0,
        }
    }

    /// Rounding keeps five decimals and rounds halves away from zero.
    ///
    /// # Panics
    /// Panics if rounding differs.
    #[test]
    fn rounds_to_five_places() {
        assert_eq!(format_number(round5(2.083_333_333)), "2.08333");
        assert_eq!(format_number(round5(8.727_272_727)), "8.72727");
        assert_eq!(format_number(round5(1.420_454_545)), "1.42045");
        assert_eq!(format_number(round5(-0.000_001)), "0");
    }

    /// Default breakpoints with 1rem..2rem give a zero intercept.
    ///
    /// # Panics
    /// Panics if the emitted calc differs.
    #[test]
    fn default_breakpoints() {
        let mapping = LinearMapping::between(16.0, 32.0, &range(768.0, 1536.0));
        assert_eq!(
            mapping.map(|line| FluidValue::Interpolated(line).to_string()),
            Some("calc(0px + 2.08333vw)".to_owned())
        );
    }

    /// Custom breakpoints shift the intercept.
    ///
    /// # Panics
    /// Panics if the emitted calc differs.
    #[test]
    fn custom_breakpoints() {
        let mapping = LinearMapping::between(16.0, 32.0, &range(320.0, 1024.0));
        assert_eq!(
            mapping.map(|line| FluidValue::Interpolated(line).to_string()),
            Some("calc(8.72727px + 2.27273vw)".to_owned())
        );
    }

    /// Shrinking sizes give a negative slope.
    ///
    /// # Panics
    /// Panics if the emitted calc differs.
    #[test]
    fn shrinking_sizes() {
        let mapping = LinearMapping::between(32.0, 16.0, &range(400.0, 1200.0));
        assert_eq!(
            mapping.map(|line| FluidValue::Interpolated(line).to_string()),
            Some("calc(40px + -2vw)".to_owned())
        );
    }

    /// Equal widths have no line.
    ///
    /// # Panics
    /// Panics if a mapping is produced for a degenerate range.
    #[test]
    fn equal_widths_have_no_line() {
        assert_eq!(LinearMapping::between(16.0, 32.0, &range(768.0, 768.0)), None);
        assert_eq!(FluidValue::Fixed(16.0).to_string(), "16px");
    }
}
