//! `fluid-clamp`: rewrite `clamp(min, @fluid(...), max)` sizes in a stylesheet.
//!
//! Reads a stylesheet from a file or stdin, writes the rewritten stylesheet to a file
//! or stdout and reports warnings on stderr, one per line. Logging goes through
//! `env_logger` (`RUST_LOG=debug` shows every rewrite).

use anyhow::{Context as _, Result};
use clap::{Parser, ValueHint};
use css::FluidClamp;
use css::config::load_config;
use css_fluid::FluidConfig;
use log::info;
use std::fs;
use std::io::{Read as _, Write as _, stderr, stdin, stdout};
use std::path::{Path, PathBuf};

/// Rewrite `clamp(min, @fluid(...), max)` into fluid `calc()` sizes
#[derive(Parser, Debug)]
#[command(name = "fluid-clamp")]
#[command(version, about, long_about = None)]
struct Cli {
    /// Stylesheet to process (`-` or nothing reads stdin)
    #[arg(value_hint = ValueHint::FilePath)]
    input: Option<PathBuf>,

    /// Write the result to this file instead of stdout
    #[arg(short, long, value_hint = ValueHint::FilePath)]
    output: Option<PathBuf>,

    /// JSON configuration file (`warnings`, `minWidth`, `maxWidth`, `baseFontSize`)
    #[arg(short, long, value_hint = ValueHint::FilePath)]
    config: Option<PathBuf>,

    /// Report invalid or ambiguous `@fluid` calls
    #[arg(short, long)]
    warnings: bool,

    /// Viewport width (px) where interpolation starts for `@fluid()`
    #[arg(long)]
    min_width: Option<f64>,

    /// Viewport width (px) where interpolation ends for `@fluid()`
    #[arg(long)]
    max_width: Option<f64>,

    /// Size (px) used when both widths are equal
    #[arg(long)]
    base_font_size: Option<f64>,
}

impl Cli {
    /// Configuration file (or defaults), then command line flags on top.
    ///
    /// # Errors
    /// Returns an error if the configuration file cannot be loaded.
    fn resolve_config(&self) -> Result<FluidConfig> {
        let mut config = match &self.config {
            Some(path) => load_config(path)?,
            None => FluidConfig::default(),
        };
        config.warnings |= self.warnings;
        if let Some(min_width) = self.min_width {
            config.min_width = min_width;
        }
        if let Some(max_width) = self.max_width {
            config.max_width = max_width;
        }
        if let Some(base_font_size) = self.base_font_size {
            config.base_font_size = base_font_size;
        }
        Ok(config)
    }

    /// The input path, unless input comes from stdin.
    fn input_path(&self) -> Option<&Path> {
        self.input
            .as_deref()
            .filter(|path| path.as_os_str() != "-")
    }

    /// # Errors
    /// Returns an error if the input cannot be read.
    fn read_input(&self) -> Result<String> {
        if let Some(path) = self.input_path() {
            return fs::read_to_string(path)
                .with_context(|| format!("failed to read {}", path.display()));
        }
        let mut css = String::new();
        stdin()
            .read_to_string(&mut css)
            .context("failed to read stdin")?;
        Ok(css)
    }

    /// # Errors
    /// Returns an error if the output cannot be written.
    fn write_output(&self, css: &str) -> Result<()> {
        if let Some(path) = &self.output {
            return fs::write(path, css)
                .with_context(|| format!("failed to write {}", path.display()));
        }
        let mut out = stdout().lock();
        out.write_all(css.as_bytes())?;
        out.flush()?;
        Ok(())
    }
}

/// Main entry point for the fluid-clamp CLI tool.
///
/// # Errors
/// Returns an error if configuration, input or output fails. Warnings about the
/// stylesheet never make the run fail.
fn main() -> Result<()> {
    env_logger::init();
    let cli = Cli::parse();
    let config = cli.resolve_config()?;
    let css = cli.read_input()?;

    let result = FluidClamp::new(config).process(&css);

    let mut err = stderr().lock();
    for warning in &result.warnings {
        writeln!(err, "{warning}")?;
    }
    cli.write_output(&result.css)?;
    info!(
        "processed {} bytes with {} warning(s)",
        css.len(),
        result.warnings.len()
    );
    Ok(())
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used, reason = "argument fixtures are valid")]

    use super::*;
    use std::ffi::OsStr;
    use std::io::Write as _;

    /// Flags override defaults without a configuration file.
    ///
    /// # Panics
    /// Panics if a flag is not applied.
    #[test]
    fn flags_override_defaults() {
        let cli = Cli::try_parse_from([
            "fluid-clamp",
            "--warnings",
            "--min-width",
            "320",
            "--base-font-size",
            "18",
            "-",
        ])
        .unwrap();
        assert_eq!(cli.input_path(), None);
        assert_eq!(
            cli.resolve_config().unwrap(),
            FluidConfig {
                warnings: true,
                min_width: 320.0,
                max_width: 1536.0,
                base_font_size: 18.0,
            }
        );
    }

    /// Flags win over the configuration file; the file fills in the rest.
    ///
    /// # Panics
    /// Panics if file and flags are not layered.
    #[test]
    fn flags_override_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(file, r#"{{ "warnings": true, "minWidth": 400, "maxWidth": 1200 }}"#).unwrap();
        let path = file.path().to_str().unwrap().to_owned();
        let cli = Cli::try_parse_from([
            "fluid-clamp",
            "--config",
            path.as_str(),
            "--max-width",
            "1000",
        ])
        .unwrap();
        assert_eq!(
            cli.resolve_config().unwrap(),
            FluidConfig {
                warnings: true,
                min_width: 400.0,
                max_width: 1000.0,
                base_font_size: 16.0,
            }
        );
    }

    /// Input and output files round-trip through the processor.
    ///
    /// # Panics
    /// Panics if the output file does not hold the rewritten stylesheet.
    #[test]
    fn file_to_file() {
        let dir = tempfile::tempdir().unwrap();
        let input = dir.path().join("in.css");
        let output = dir.path().join("out.css");
        fs::write(&input, "h1 { font-size: clamp(1rem, @fluid(), 2rem); }").unwrap();

        let cli = Cli::try_parse_from([
            OsStr::new("fluid-clamp"),
            input.as_os_str(),
            OsStr::new("-o"),
            output.as_os_str(),
        ])
        .unwrap();
        let css = cli.read_input().unwrap();
        let result = FluidClamp::new(cli.resolve_config().unwrap()).process(&css);
        cli.write_output(&result.css).unwrap();

        assert_eq!(
            fs::read_to_string(&output).unwrap(),
            "h1 { font-size: clamp(1rem, calc(0px + 2.08333vw), 2rem); }"
        );
    }
}
