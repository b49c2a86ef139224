//! CSS Syntax Module Level 3 — Parsing and tokenization.
//! Spec: <https://www.w3.org/TR/css-syntax-3/>
//!
//! Two layers live here: [`stylesheet`] turns a whole sheet into rules and
//! declarations (keeping the byte span of every declaration value), and [`value`]
//! turns one declaration value into a tree that serializes back to the same text.

#![forbid(unsafe_code)]

pub mod stylesheet;
pub mod value;

pub use stylesheet::{Declaration, SourceLocation, StyleRule, Stylesheet, parse_stylesheet};
pub use value::{Divider, FunctionNode, ValueNode, ValueTree, parse_value};
