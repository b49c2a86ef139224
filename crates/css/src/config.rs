//! Loading [`FluidConfig`] from JSON using the documented option names.
//!
//! ```json
//! { "warnings": true, "minWidth": 320, "maxWidth": 1280, "baseFontSize": 16 }
//! ```

use anyhow::{Context as _, Result, bail};
use css_fluid::FluidConfig;
use std::fs;
use std::path::Path;

/// Parse a JSON configuration object. Missing keys keep their defaults.
///
/// # Errors
/// Returns an error if the text is not a JSON object of known options, or if a width
/// or the base font size is negative.
pub fn parse_config(text: &str) -> Result<FluidConfig> {
    let config: FluidConfig =
        serde_json::from_str(text).context("invalid fluid-clamp configuration")?;
    for (option, value) in [
        ("minWidth", config.min_width),
        ("maxWidth", config.max_width),
        ("baseFontSize", config.base_font_size),
    ] {
        if value < 0.0 {
            bail!("{option} must not be negative, got {value}");
        }
    }
    Ok(config)
}

/// Read and parse a JSON configuration file.
///
/// # Errors
/// Returns an error if the file cannot be read or does not parse (see [`parse_config`]).
pub fn load_config(path: &Path) -> Result<FluidConfig> {
    let text = fs::read_to_string(path)
        .with_context(|| format!("failed to read configuration {}", path.display()))?;
    parse_config(&text).with_context(|| format!("in configuration {}", path.display()))
}
