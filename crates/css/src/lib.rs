//! Declaration host for fluid sizes: runs the `@fluid` resolver over every declaration
//! of a stylesheet, rewrites the values in place and collects warnings.

pub mod config;
mod parser;
pub mod types;

use crate::parser::SourceEdits;
use css_fluid::{FluidConfig, resolve};
use css_syntax::{Declaration, parse_stylesheet};
use log::{debug, warn};

pub use css_fluid::Diagnostic;
pub use types::{DeclarationOutcome, ProcessResult, Warning};

/// Name reported as the origin of every warning.
pub const PLUGIN_NAME: &str = "fluid-clamp";

/// Stylesheet processor holding the read-only configuration.
///
/// Holds no other state, so one instance can process any number of stylesheets,
/// from any number of threads.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct FluidClamp {
    config: FluidConfig,
}

impl FluidClamp {
    pub const fn new(config: FluidConfig) -> Self {
        Self { config }
    }

    pub const fn config(&self) -> &FluidConfig {
        &self.config
    }

    /// Resolve a single declaration's value.
    pub fn process_declaration(&self, declaration: &Declaration) -> DeclarationOutcome {
        let resolution = resolve(&declaration.value, &self.config);
        let warnings = resolution
            .diagnostics
            .into_iter()
            .map(|diagnostic| Warning::for_declaration(declaration, diagnostic))
            .collect();
        DeclarationOutcome {
            value: resolution.value,
            warnings,
        }
    }

    /// Rewrite every fluid declaration value in `css`.
    ///
    /// Only the value text of rewritten declarations changes; selectors, comments,
    /// formatting, `!important` and any region the parser could not make sense of are
    /// copied through unchanged.
    pub fn process(&self, css: &str) -> ProcessResult {
        let sheet = parse_stylesheet(css);
        let mut edits = SourceEdits::new(css);
        let mut warnings = Vec::new();

        for declaration in sheet.declarations() {
            let outcome = self.process_declaration(declaration);
            for warning in &outcome.warnings {
                warn!("{warning}");
            }
            warnings.extend(outcome.warnings);
            if let Some(value) = outcome.value {
                debug!(
                    "{} at {}: {} -> {value}",
                    declaration.name, declaration.location, declaration.value
                );
                edits.replace(declaration.value_span.clone(), value);
            }
        }

        ProcessResult {
            css: edits.finish(),
            warnings,
        }
    }
}
