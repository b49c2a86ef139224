//! Value trees for a single declaration value.
//!
//! The tree keeps every byte of the input: words, whitespace, comments and strings
//! are stored as raw text, and whitespace around separators and inside parentheses is
//! attached to the separator or function. Serializing an unmodified tree with
//! [`ValueTree`]'s `Display` impl reproduces the input, except that an unclosed
//! function gains its closing parenthesis.

use core::mem;
use cssparser::ParseError;
use cssparser::Parser;
use cssparser::ParserInput;
use cssparser::Token;
use std::fmt;

/// A separator between values: `,`, `/` or `:`, with the whitespace around it.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Divider {
    pub value: char,
    pub before: String,
    pub after: String,
}

/// A function call such as `clamp(...)`, `@fluid(...)` or a bare `( ... )` group
/// (empty name).
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct FunctionNode {
    /// Name as written, without the opening parenthesis.
    pub name: String,
    /// Whitespace after the opening parenthesis.
    pub before: String,
    /// Arguments, separators included.
    pub nodes: Vec<ValueNode>,
    /// Whitespace before the closing parenthesis.
    pub after: String,
}

impl FunctionNode {
    /// Indices into `nodes` of every argument, i.e. every node that is not a divider.
    pub fn argument_indices(&self) -> Vec<usize> {
        self.nodes
            .iter()
            .enumerate()
            .filter(|(_, node)| !node.is_div())
            .map(|(index, _)| index)
            .collect()
    }

    /// Text of every direct `Word` child, in order.
    pub fn words(&self) -> impl Iterator<Item = &str> {
        self.nodes.iter().filter_map(ValueNode::as_word)
    }

    /// Substitute the child at `index`, returning the node it replaced.
    pub fn replace_node(&mut self, index: usize, node: ValueNode) -> Option<ValueNode> {
        let slot = self.nodes.get_mut(index)?;
        Some(mem::replace(slot, node))
    }
}

/// One node of a value tree.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum ValueNode {
    /// Any run of tokens not separated by whitespace, separators or blocks:
    /// `1rem`, `320`, `#fff`, `22rq3112`.
    Word(String),
    /// Whitespace between two values.
    Space(String),
    Div(Divider),
    /// A quoted string, quotes included.
    Quoted(String),
    /// A comment, delimiters included.
    Comment(String),
    Function(FunctionNode),
}

impl ValueNode {
    pub fn is_div(&self) -> bool {
        matches!(self, Self::Div(_))
    }

    pub fn as_word(&self) -> Option<&str> {
        match self {
            Self::Word(text) => Some(text.as_str()),
            Self::Space(_) | Self::Div(_) | Self::Quoted(_) | Self::Comment(_) | Self::Function(_) => {
                None
            }
        }
    }

    pub fn as_function(&self) -> Option<&FunctionNode> {
        match self {
            Self::Function(function) => Some(function),
            Self::Word(_) | Self::Space(_) | Self::Div(_) | Self::Quoted(_) | Self::Comment(_) => {
                None
            }
        }
    }

    /// Whether this node is a function with exactly this name.
    pub fn is_function_named(&self, name: &str) -> bool {
        self.as_function()
            .is_some_and(|function| function.name == name)
    }
}

/// A parsed declaration value.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct ValueTree {
    pub nodes: Vec<ValueNode>,
}

impl ValueTree {
    /// Visit every node depth first, parents before their arguments.
    pub fn walk<F: FnMut(&ValueNode)>(&self, mut visit: F) {
        walk_nodes(&self.nodes, &mut visit);
    }

    /// Visit every function node depth first with mutable access. Arguments are visited
    /// after the callback returns, so nodes it substitutes are the ones descended into.
    pub fn walk_functions_mut<F: FnMut(&mut FunctionNode)>(&mut self, mut visit: F) {
        walk_functions_mut_in(&mut self.nodes, &mut visit);
    }

    /// Whether any function anywhere in the tree has this name.
    pub fn contains_function(&self, name: &str) -> bool {
        let mut found = false;
        self.walk(|node| found |= node.is_function_named(name));
        found
    }
}

fn walk_nodes<F: FnMut(&ValueNode)>(nodes: &[ValueNode], visit: &mut F) {
    for node in nodes {
        visit(node);
        if let ValueNode::Function(function) = node {
            walk_nodes(&function.nodes, visit);
        }
    }
}

fn walk_functions_mut_in<F: FnMut(&mut FunctionNode)>(nodes: &mut [ValueNode], visit: &mut F) {
    for node in nodes {
        if let ValueNode::Function(function) = node {
            visit(&mut *function);
            walk_functions_mut_in(&mut function.nodes, visit);
        }
    }
}

fn write_nodes(formatter: &mut fmt::Formatter<'_>, nodes: &[ValueNode]) -> fmt::Result {
    for node in nodes {
        fmt::Display::fmt(node, formatter)?;
    }
    Ok(())
}

impl fmt::Display for FunctionNode {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(formatter, "{}({}", self.name, self.before)?;
        write_nodes(formatter, &self.nodes)?;
        write!(formatter, "{})", self.after)
    }
}

impl fmt::Display for ValueNode {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Word(text) | Self::Space(text) | Self::Quoted(text) | Self::Comment(text) => {
                formatter.write_str(text)
            }
            Self::Div(divider) => write!(
                formatter,
                "{}{}{}",
                divider.before, divider.value, divider.after
            ),
            Self::Function(function) => fmt::Display::fmt(function, formatter),
        }
    }
}

impl fmt::Display for ValueTree {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        write_nodes(formatter, &self.nodes)
    }
}

/// Remove trailing whitespace node, returning its text (empty if there was none).
fn pop_space(nodes: &mut Vec<ValueNode>) -> String {
    if let Some(ValueNode::Space(space)) = nodes.last_mut() {
        let taken = mem::take(space);
        nodes.pop();
        return taken;
    }
    String::new()
}

/// Remove a leading whitespace node, returning its text (empty if there was none).
fn shift_space(nodes: &mut Vec<ValueNode>) -> String {
    if let Some(ValueNode::Space(space)) = nodes.first_mut() {
        let taken = mem::take(space);
        nodes.remove(0);
        return taken;
    }
    String::new()
}

fn push_space(nodes: &mut Vec<ValueNode>, space: &str) {
    if let Some(ValueNode::Div(divider)) = nodes.last_mut()
        && divider.after.is_empty()
    {
        space.clone_into(&mut divider.after);
        return;
    }
    nodes.push(ValueNode::Space(space.to_owned()));
}

fn push_div(nodes: &mut Vec<ValueNode>, value: char) {
    let before = pop_space(nodes);
    nodes.push(ValueNode::Div(Divider {
        value,
        before,
        after: String::new(),
    }));
}

/// Push word text, extending the previous word when nothing separates them.
fn push_word(nodes: &mut Vec<ValueNode>, raw: &str, glued: bool) {
    if glued && let Some(ValueNode::Word(word)) = nodes.last_mut() {
        word.push_str(raw);
        return;
    }
    nodes.push(ValueNode::Word(raw.to_owned()));
}

/// Parse the contents of the block whose opening token was just returned.
fn parse_block_contents(input: &mut Parser) -> Vec<ValueNode> {
    input
        .parse_nested_block(|nested| Ok::<_, ParseError<'_, ()>>(parse_nodes(nested)))
        .unwrap_or_default()
}

fn parse_function(input: &mut Parser, name: String) -> ValueNode {
    let mut nodes = parse_block_contents(input);
    let before = shift_space(&mut nodes);
    let after = pop_space(&mut nodes);
    ValueNode::Function(FunctionNode {
        name,
        before,
        nodes,
        after,
    })
}

fn parse_nodes(input: &mut Parser) -> Vec<ValueNode> {
    let mut nodes = Vec::new();
    // Whether the previous token was word text with nothing in between.
    let mut glued = false;
    loop {
        let start = input.position();
        let token = match input.next_including_whitespace_and_comments() {
            Ok(token) => token.clone(),
            Err(_) => break,
        };
        let raw = input.slice_from(start);
        match token {
            Token::WhiteSpace(space) => push_space(&mut nodes, space),
            Token::Comment(_) => nodes.push(ValueNode::Comment(raw.to_owned())),
            Token::Comma => push_div(&mut nodes, ','),
            Token::Colon => push_div(&mut nodes, ':'),
            Token::Delim('/') => push_div(&mut nodes, '/'),
            Token::QuotedString(_) => nodes.push(ValueNode::Quoted(raw.to_owned())),
            Token::Function(_) => {
                let name = raw.strip_suffix('(').unwrap_or(raw).to_owned();
                let function = parse_function(input, name);
                nodes.push(function);
            }
            Token::ParenthesisBlock => {
                // `@fluid(` tokenizes as an at-keyword followed by a block.
                let name = if glued && let Some(ValueNode::Word(word)) = nodes.last_mut() {
                    let name = mem::take(word);
                    nodes.pop();
                    name
                } else {
                    String::new()
                };
                let function = parse_function(input, name);
                nodes.push(function);
            }
            Token::SquareBracketBlock | Token::CurlyBracketBlock => {
                input
                    .parse_nested_block(|nested| {
                        while nested.next_including_whitespace_and_comments().is_ok() {}
                        Ok::<_, ParseError<'_, ()>>(())
                    })
                    .unwrap_or_default();
                push_word(&mut nodes, input.slice_from(start), glued);
                glued = true;
                continue;
            }
            _ => {
                push_word(&mut nodes, raw, glued);
                glued = true;
                continue;
            }
        }
        glued = false;
    }
    nodes
}

/// Parse a declaration value into a tree. Never fails; anything cssparser cannot
/// classify is kept as raw word text.
pub fn parse_value(text: &str) -> ValueTree {
    let mut input = ParserInput::new(text);
    let mut parser = Parser::new(&mut input);
    ValueTree {
        nodes: parse_nodes(&mut parser),
    }
}
