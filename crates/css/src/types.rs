use crate::PLUGIN_NAME;
use css_fluid::Diagnostic;
use css_syntax::{Declaration, SourceLocation};
use std::fmt;

/// A diagnostic attached to the declaration it came from.
#[derive(Clone, Debug, PartialEq)]
pub struct Warning {
    /// Human-readable message.
    pub text: String,
    /// Always [`PLUGIN_NAME`].
    pub plugin: &'static str,
    /// Property name of the declaration.
    pub property: String,
    /// Where the declaration starts.
    pub location: SourceLocation,
    pub diagnostic: Diagnostic,
}

impl Warning {
    pub fn for_declaration(declaration: &Declaration, diagnostic: Diagnostic) -> Self {
        Self {
            text: diagnostic.to_string(),
            plugin: PLUGIN_NAME,
            property: declaration.name.clone(),
            location: declaration.location,
            diagnostic,
        }
    }
}

impl fmt::Display for Warning {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            formatter,
            "{}: {}: {} ({})",
            self.plugin, self.location, self.text, self.property
        )
    }
}

/// Outcome of processing one declaration.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct DeclarationOutcome {
    /// Replacement value; `None` keeps the declaration as written.
    pub value: Option<String>,
    pub warnings: Vec<Warning>,
}

/// Outcome of processing a stylesheet.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct ProcessResult {
    /// The stylesheet with fluid values rewritten.
    pub css: String,
    /// Warnings in source order.
    pub warnings: Vec<Warning>,
}
