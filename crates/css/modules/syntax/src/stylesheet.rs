//! Stylesheet parsing into rules and declarations.

use core::ops::Range;
use cssparser::AtRuleParser as CssAtRuleParser;
use cssparser::BasicParseErrorKind;
use cssparser::CowRcStr;
use cssparser::DeclarationParser as CssDeclarationParser;
use cssparser::ParseError;
use cssparser::Parser;
use cssparser::ParserInput;
use cssparser::ParserState;
use cssparser::QualifiedRuleParser as CssQualifiedRuleParser;
use cssparser::RuleBodyItemParser as CssRuleBodyItemParser;
use cssparser::RuleBodyParser as CssRuleBodyParser;
use cssparser::StyleSheetParser;
use std::fmt;

/// 1-based line and column of a construct in the stylesheet source.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, PartialOrd, Ord)]
pub struct SourceLocation {
    pub line: u32,
    pub column: u32,
}

impl From<cssparser::SourceLocation> for SourceLocation {
    fn from(location: cssparser::SourceLocation) -> Self {
        // cssparser lines are 0-based, columns already 1-based.
        Self {
            line: location.line.saturating_add(1),
            column: location.column,
        }
    }
}

impl fmt::Display for SourceLocation {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(formatter, "{}:{}", self.line, self.column)
    }
}

/// A single CSS declaration (property: value [!important]).
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Declaration {
    /// Lowercased property name.
    pub name: String,
    /// Raw value text (without trailing !important).
    pub value: String,
    /// Whether the declaration was marked as `!important`.
    pub important: bool,
    /// Byte range of `value` inside the stylesheet source.
    pub value_span: Range<usize>,
    /// Where the declaration (its property name) starts.
    pub location: SourceLocation,
}

impl fmt::Display for Declaration {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.important {
            write!(formatter, "{}: {} !important", self.name, self.value)
        } else {
            write!(formatter, "{}: {}", self.name, self.value)
        }
    }
}

/// A rule with a raw prelude, its declarations and any rules nested in its block.
///
/// Block at-rules (`@media`, `@supports`, `@font-face`, ...) are represented the same
/// way, with the `@name` included in the prelude.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct StyleRule {
    /// Raw prelude text (selector list, or `@name` plus at-rule prelude).
    pub prelude: String,
    /// Declarations within the rule block.
    pub declarations: Vec<Declaration>,
    /// Rules nested within the block.
    pub rules: Vec<StyleRule>,
}

impl StyleRule {
    /// Rule with the given prelude and the items of a parsed block.
    fn from_block(prelude: String, items: Vec<BodyItem>) -> Self {
        let mut rule = Self {
            prelude,
            declarations: Vec::new(),
            rules: Vec::new(),
        };
        for item in items {
            match item {
                BodyItem::Declaration(declaration) => rule.declarations.push(declaration),
                BodyItem::Rule(nested) => rule.rules.push(nested),
            }
        }
        rule
    }

    /// Append this rule's declarations and those of every nested rule.
    fn collect_declarations<'rule>(&'rule self, out: &mut Vec<&'rule Declaration>) {
        out.extend(self.declarations.iter());
        for nested in &self.rules {
            nested.collect_declarations(out);
        }
    }
}

/// A parsed stylesheet consisting of style rules.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Stylesheet {
    /// Top-level rules in source order.
    pub rules: Vec<StyleRule>,
}

impl Stylesheet {
    /// Every declaration in the sheet, nested ones included, in source order.
    pub fn declarations(&self) -> Vec<&Declaration> {
        let mut out = Vec::new();
        for rule in &self.rules {
            rule.collect_declarations(&mut out);
        }
        out.sort_by_key(|declaration| declaration.value_span.start);
        out
    }
}

/// Parse `!important` at the end of a value, returning (`value_without_important`, `important_flag`).
fn split_important_tail(value: &str) -> (&str, bool) {
    let trimmed = value.trim();
    if let Some(pos) = trimmed.rfind("!important")
        && let Some(prefix) = trimmed.get(..pos)
    {
        return (prefix.trim_end(), true);
    }
    (trimmed, false)
}

/// Consume the rest of `input` and return its raw text.
fn consume_raw<'input>(input: &mut Parser<'input, '_>) -> &'input str {
    let start = input.position();
    while input.next_including_whitespace_and_comments().is_ok() {}
    input.slice_from(start)
}

/// An item found inside a rule block.
enum BodyItem {
    Declaration(Declaration),
    Rule(StyleRule),
}

/// Block body parser: declarations, nested qualified rules and nested block at-rules.
struct BodyParser;

impl<'input> CssDeclarationParser<'input> for BodyParser {
    type Declaration = BodyItem;
    type Error = ();

    fn parse_value<'tokens>(
        &mut self,
        name: CowRcStr<'input>,
        input: &mut Parser<'input, 'tokens>,
        declaration_start: &ParserState,
    ) -> Result<Self::Declaration, ParseError<'input, Self::Error>> {
        let start = input.position().byte_index();
        let raw = consume_raw(input);
        let leading = raw.len() - raw.trim_start().len();
        let (value, important) = split_important_tail(raw);
        let value_start = start + leading;
        Ok(BodyItem::Declaration(Declaration {
            name: name.to_ascii_lowercase(),
            value: value.to_owned(),
            important,
            value_span: value_start..value_start + value.len(),
            location: declaration_start.source_location().into(),
        }))
    }
}

impl<'input> CssAtRuleParser<'input> for BodyParser {
    type Prelude = String;
    type AtRule = BodyItem;
    type Error = ();

    #[inline]
    fn parse_prelude<'tokens>(
        &mut self,
        name: CowRcStr<'input>,
        input: &mut Parser<'input, 'tokens>,
    ) -> Result<Self::Prelude, ParseError<'input, Self::Error>> {
        Ok(at_rule_prelude(&name, input))
    }

    #[inline]
    fn parse_block<'tokens>(
        &mut self,
        prelude: Self::Prelude,
        _start: &ParserState,
        input: &mut Parser<'input, 'tokens>,
    ) -> Result<Self::AtRule, ParseError<'input, Self::Error>> {
        Ok(BodyItem::Rule(StyleRule::from_block(
            prelude,
            parse_block_items(input),
        )))
    }
}

impl<'input> CssQualifiedRuleParser<'input> for BodyParser {
    type Prelude = String;
    type QualifiedRule = BodyItem;
    type Error = ();

    #[inline]
    fn parse_prelude<'tokens>(
        &mut self,
        input: &mut Parser<'input, 'tokens>,
    ) -> Result<Self::Prelude, ParseError<'input, Self::Error>> {
        Ok(consume_raw(input).trim().to_owned())
    }

    #[inline]
    fn parse_block<'tokens>(
        &mut self,
        prelude: Self::Prelude,
        _start: &ParserState,
        input: &mut Parser<'input, 'tokens>,
    ) -> Result<Self::QualifiedRule, ParseError<'input, Self::Error>> {
        Ok(BodyItem::Rule(StyleRule::from_block(
            prelude,
            parse_block_items(input),
        )))
    }
}

impl<'input> CssRuleBodyItemParser<'input, BodyItem, ()> for BodyParser {
    fn parse_declarations(&self) -> bool {
        true
    }
    fn parse_qualified(&self) -> bool {
        true
    }
}

/// `@name` followed by the raw at-rule prelude.
fn at_rule_prelude(name: &str, input: &mut Parser) -> String {
    let raw = consume_raw(input).trim();
    if raw.is_empty() {
        format!("@{name}")
    } else {
        format!("@{name} {raw}")
    }
}

/// Parse the items of a rule block, dropping the ones cssparser reports as invalid.
fn parse_block_items(block: &mut Parser) -> Vec<BodyItem> {
    let mut body = BodyParser;
    CssRuleBodyParser::new(block, &mut body).flatten().collect()
}

/// Top-level parser that builds `StyleRule` items for qualified rules and block at-rules.
struct TopLevelParser;

impl<'input> CssAtRuleParser<'input> for TopLevelParser {
    type Prelude = String;
    type AtRule = StyleRule;
    type Error = ();

    #[inline]
    fn parse_prelude<'tokens>(
        &mut self,
        name: CowRcStr<'input>,
        input: &mut Parser<'input, 'tokens>,
    ) -> Result<Self::Prelude, ParseError<'input, Self::Error>> {
        Ok(at_rule_prelude(&name, input))
    }

    #[inline]
    fn parse_block<'tokens>(
        &mut self,
        prelude: Self::Prelude,
        _start: &ParserState,
        input: &mut Parser<'input, 'tokens>,
    ) -> Result<Self::AtRule, ParseError<'input, Self::Error>> {
        Ok(StyleRule::from_block(prelude, parse_block_items(input)))
    }

    #[inline]
    fn rule_without_block(
        &mut self,
        _prelude: Self::Prelude,
        _start: &ParserState,
    ) -> Result<Self::AtRule, ()> {
        // Statement at-rules (`@import`, `@charset`) carry no declarations.
        Err(())
    }
}

impl<'input> CssQualifiedRuleParser<'input> for TopLevelParser {
    type Prelude = String; // raw selector/prelude
    type QualifiedRule = StyleRule;
    type Error = ();

    #[inline]
    fn parse_prelude<'tokens>(
        &mut self,
        input: &mut Parser<'input, 'tokens>,
    ) -> Result<Self::Prelude, ParseError<'input, Self::Error>> {
        let prelude = consume_raw(input).trim();
        if prelude.is_empty() {
            return Err(input.new_error(BasicParseErrorKind::QualifiedRuleInvalid));
        }
        Ok(prelude.to_owned())
    }

    #[inline]
    fn parse_block<'tokens>(
        &mut self,
        prelude: Self::Prelude,
        _start: &ParserState,
        input: &mut Parser<'input, 'tokens>,
    ) -> Result<Self::QualifiedRule, ParseError<'input, Self::Error>> {
        Ok(StyleRule::from_block(prelude, parse_block_items(input)))
    }
}

/// Parse a full stylesheet into a `Stylesheet` using cssparser.
pub fn parse_stylesheet(css: &str) -> Stylesheet {
    let mut input = ParserInput::new(css);
    let mut parser = Parser::new(&mut input);
    let mut top = TopLevelParser;
    let mut sheet = Stylesheet::default();
    for rule in StyleSheetParser::new(&mut parser, &mut top).flatten() {
        sheet.rules.push(rule);
    }
    sheet
}
