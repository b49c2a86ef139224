//! Fluid sizes: rewrites `clamp(min, @fluid(...), max)` so the middle argument becomes a
//! `calc()` that grows linearly with the viewport width between two breakpoints.
//!
//! ```text
//! clamp(1rem, @fluid(320, 1024), 2rem)  ->  clamp(1rem, calc(8.72727px + 2.27273vw), 2rem)
//! ```

#![forbid(unsafe_code)]

pub mod diagnostics;
pub mod mapping;
pub mod resolver;

pub use diagnostics::Diagnostic;
pub use mapping::{FluidRange, FluidValue, LinearMapping, format_number, round5};
pub use resolver::{CLAMP_FUNCTION, FLUID_FUNCTION, Resolution, resolve};

use serde::Deserialize;

/// Viewport width, in px, where interpolation starts when `@fluid()` names none.
pub const DEFAULT_MIN_WIDTH: f64 = 768.0;
/// Viewport width, in px, where interpolation ends when `@fluid()` names none.
pub const DEFAULT_MAX_WIDTH: f64 = 1536.0;
/// Size used when the width range is degenerate and `@fluid()` names none.
pub const DEFAULT_BASE_FONT_SIZE: f64 = 16.0;

/// Process-wide defaults. Read-only while processing; explicit `@fluid(...)`
/// arguments override the widths (and base size) per call.
///
/// Deserializes from the camelCase option names (`warnings`, `minWidth`, `maxWidth`,
/// `baseFontSize`); missing keys keep their defaults.
#[derive(Clone, Copy, Debug, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase", default, deny_unknown_fields)]
pub struct FluidConfig {
    /// Report diagnostics for invalid or ambiguous `@fluid` calls.
    pub warnings: bool,
    pub min_width: f64,
    pub max_width: f64,
    pub base_font_size: f64,
}

impl Default for FluidConfig {
    fn default() -> Self {
        Self {
            warnings: false,
            min_width: DEFAULT_MIN_WIDTH,
            max_width: DEFAULT_MAX_WIDTH,
            base_font_size: DEFAULT_BASE_FONT_SIZE,
        }
    }
}

impl FluidConfig {
    /// Default configuration with diagnostics turned on.
    pub fn with_warnings() -> Self {
        Self {
            warnings: true,
            ..Self::default()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    /// Missing keys fall back to the documented defaults.
    ///
    /// # Panics
    /// Panics if a partial JSON object does not deserialize with defaults.
    #[test]
    fn partial_json_keeps_defaults() {
        let config: Result<FluidConfig, _> =
            serde_json::from_str(r#"{ "warnings": true, "minWidth": 320 }"#);
        assert_eq!(
            config.ok(),
            Some(FluidConfig {
                warnings: true,
                min_width: 320.0,
                max_width: DEFAULT_MAX_WIDTH,
                base_font_size: DEFAULT_BASE_FONT_SIZE,
            })
        );
    }

    /// Misspelled options are reported instead of silently ignored.
    ///
    /// # Panics
    /// Panics if an unknown key is accepted.
    #[test]
    fn unknown_keys_are_rejected() {
        let config: Result<FluidConfig, _> = serde_json::from_str(r#"{ "min_width": 320 }"#);
        assert!(config.is_err());
    }
}
