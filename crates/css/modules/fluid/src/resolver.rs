//! Walk a declaration value and rewrite every `clamp(min, @fluid(...), max)`.

use crate::FluidConfig;
use crate::diagnostics::Diagnostic;
use crate::mapping::{FluidRange, FluidValue, LinearMapping};
use css_syntax::{FunctionNode, ValueNode, parse_value};
use css_values_units::{compute_length_px, parse_canonical_number, parse_fixed_length};
use log::{debug, trace};

/// Name of the function whose middle argument may be fluid.
pub const CLAMP_FUNCTION: &str = "clamp";
/// Name of the placeholder function replaced by a `calc()`.
pub const FLUID_FUNCTION: &str = "@fluid";

/// Result of resolving one declaration value.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Resolution {
    /// Rewritten value, or `None` when nothing was replaced and the input stands as is.
    pub value: Option<String>,
    /// Diagnostics, empty unless warnings are enabled.
    pub diagnostics: Vec<Diagnostic>,
}

impl Resolution {
    pub fn is_changed(&self) -> bool {
        self.value.is_some()
    }

    /// The rewritten value, falling back to `original` when unchanged.
    pub fn value_or<'value>(&'value self, original: &'value str) -> &'value str {
        self.value.as_deref().unwrap_or(original)
    }
}

/// Validated numeric arguments of one `@fluid(...)` call.
#[derive(Clone, Debug, PartialEq)]
struct FluidRequest {
    arguments: Vec<f64>,
}

impl FluidRequest {
    /// Read the `Word` arguments of a `@fluid` node. Nested functions, strings and
    /// separators are not arguments.
    fn from_function(function: &FunctionNode) -> Result<Self, Diagnostic> {
        let mut arguments = Vec::new();
        let mut invalid = false;
        for word in function.words() {
            match parse_canonical_number(word) {
                Ok(number) => arguments.push(number.0),
                Err(error) => {
                    trace!("@fluid argument {word:?} rejected: {error:?}");
                    invalid = true;
                }
            }
        }
        if invalid {
            return Err(Diagnostic::InvalidArguments);
        }
        if !matches!(arguments.len(), 0 | 2 | 3) {
            return Err(Diagnostic::WrongArgumentCount {
                received: arguments.len(),
            });
        }
        Ok(Self { arguments })
    }

    /// Explicit arguments override the configured widths and base size positionally.
    fn range(&self, config: &FluidConfig) -> FluidRange {
        let mut range = FluidRange {
            min_width: config.min_width,
            max_width: config.max_width,
            base_font_size: config.base_font_size,
        };
        match *self.arguments.as_slice() {
            [min_width, max_width] => {
                range.min_width = min_width;
                range.max_width = max_width;
            }
            [min_width, max_width, base_font_size] => {
                range.min_width = min_width;
                range.max_width = max_width;
                range.base_font_size = base_font_size;
            }
            _ => {}
        }
        range
    }
}

/// What happened to one `clamp()` node.
enum ClampOutcome {
    /// Not our pattern; nothing to report.
    NotApplicable,
    /// A `@fluid` call was found but left untouched.
    Rejected(Diagnostic),
    /// The `@fluid` call was replaced.
    Rewritten(Option<Diagnostic>),
}

/// Pixel size of the `clamp()` argument at `index`, if it is a plain `px`/`rem`/`em` word.
fn size_at(clamp: &FunctionNode, index: usize) -> Option<f64> {
    let word = clamp.nodes.get(index)?.as_word()?;
    match parse_fixed_length(word) {
        Ok(length) => Some(compute_length_px(length)),
        Err(error) => {
            trace!("clamp() bound {word:?} is not a fixed size: {error:?}");
            None
        }
    }
}

fn rewrite_clamp(clamp: &mut FunctionNode, config: &FluidConfig) -> ClampOutcome {
    let arguments = clamp.argument_indices();
    let &[min_index, _, max_index] = arguments.as_slice() else {
        trace!("clamp() with {} arguments skipped", arguments.len());
        return ClampOutcome::NotApplicable;
    };

    let Some((fluid_index, fluid)) = arguments.iter().find_map(|&index| {
        clamp
            .nodes
            .get(index)
            .and_then(ValueNode::as_function)
            .filter(|function| function.name == FLUID_FUNCTION)
            .map(|function| (index, function))
    }) else {
        return ClampOutcome::NotApplicable;
    };

    let request = match FluidRequest::from_function(fluid) {
        Ok(request) => request,
        Err(diagnostic) => return ClampOutcome::Rejected(diagnostic),
    };
    let range = request.range(config);

    let (Some(min_size), Some(max_size)) = (size_at(clamp, min_index), size_at(clamp, max_index))
    else {
        return ClampOutcome::NotApplicable;
    };

    let (replacement, diagnostic) = match LinearMapping::between(min_size, max_size, &range) {
        Some(mapping) => (FluidValue::Interpolated(mapping), None),
        None => (
            FluidValue::Fixed(range.base_font_size),
            Some(Diagnostic::DegenerateWidthRange {
                min_width: range.min_width,
                max_width: range.max_width,
                size: range.base_font_size,
            }),
        ),
    };
    clamp.replace_node(fluid_index, ValueNode::Word(replacement.to_string()));
    ClampOutcome::Rewritten(diagnostic)
}

/// Rewrite every `clamp(min, @fluid(...), max)` in `value`.
///
/// Never fails: values that do not match the pattern come back unchanged and
/// malformed `@fluid` calls are left in place, reported through
/// [`Resolution::diagnostics`] when `config.warnings` is set. When nothing was
/// replaced the original text is kept byte for byte (`Resolution::value` is `None`).
pub fn resolve(value: &str, config: &FluidConfig) -> Resolution {
    let mut tree = parse_value(value);
    let mut diagnostics = Vec::new();
    let mut changed = false;

    tree.walk_functions_mut(|function| {
        if function.name != CLAMP_FUNCTION {
            return;
        }
        match rewrite_clamp(function, config) {
            ClampOutcome::NotApplicable => {}
            ClampOutcome::Rejected(diagnostic) => {
                debug!("{value:?}: {diagnostic}");
                diagnostics.push(diagnostic);
            }
            ClampOutcome::Rewritten(diagnostic) => {
                changed = true;
                if let Some(diagnostic) = diagnostic {
                    debug!("{value:?}: {diagnostic}");
                    diagnostics.push(diagnostic);
                }
            }
        }
    });

    if !config.warnings {
        diagnostics.clear();
    }
    let rewritten = changed.then(|| tree.to_string());
    if let Some(text) = &rewritten {
        trace!("rewrote {value:?} to {text:?}");
    }
    Resolution {
        value: rewritten,
        diagnostics,
    }
}
