//! Recursive-descent grammar for ICU messages.
//!
//! ```text
//! message         := element*
//! element         := tag | literal | argument | simpleFormat | plural | select | pound
//! argument        := '{' _ argNameOrNumber _ '}'
//! simpleFormat    := '{' _ argNameOrNumber _ ',' _ (number|date|time) _ [',' _ style] _ '}'
//! plural          := '{' _ argNameOrNumber _ ',' _ (plural|selectordinal) _ ',' _
//!                    ['offset:' _ number] option+ _ '}'
//! select          := '{' _ argNameOrNumber _ ',' _ select _ ',' _ option+ _ '}'
//! option          := _ selector _ '{' message '}'
//! tag             := '<' tagName _ '/>' | '<' tagName _ '>' message '</' tagName _ '>'
//! pound           := '#'
//! ```
//!
//! Rules return `Ok(None)` on a soft failure, after which the caller restores
//! the cursor and tries the next alternative. `Err` is a hard failure that
//! aborts the whole parse. Every soft failure records what was expected at
//! the cursor; only the rightmost position's expectations survive, and those
//! become the syntax error if the parse cannot finish.

use std::iter;

use crate::parser::ParseOptions;
use crate::parser::ast::{
    DateTimeSkeleton, DateTimeStyle, MessageElement, NumberSkeleton, NumberStyle, PluralKind,
    Position, SelectorOption, Span, Style,
};
use crate::parser::chars::{is_name_char, is_pattern_white_space};
use crate::parser::error::{Expectation, ParseError};
use crate::skeleton::{
    SkeletonError, parse_date_time_skeleton, parse_number_skeleton, parse_number_skeleton_tokens,
};

type RuleResult<T> = Result<Option<T>, ParseError>;

const KEYWORDS: [&str; 6] = ["number", "date", "time", "plural", "selectordinal", "select"];

/// The kind of branch the cursor is inside.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Context {
    Plural,
    Select,
}

pub(crate) struct Parser<'a> {
    input: &'a str,
    pos: usize,
    options: &'a ParseOptions,
    /// Rightmost position at which a rule failed.
    furthest: usize,
    /// Expectations recorded at `furthest`.
    expected: Vec<Expectation>,
    /// Failures are not recorded while positive.
    silent: usize,
    line_starts: Vec<usize>,
    contexts: Vec<Context>,
}

impl<'a> Parser<'a> {
    pub(crate) fn new(input: &'a str, options: &'a ParseOptions) -> Self {
        let line_starts = iter::once(0)
            .chain(input.match_indices('\n').map(|(index, _)| index + 1))
            .collect();
        Parser {
            input,
            pos: 0,
            options,
            furthest: 0,
            expected: Vec::new(),
            silent: 0,
            line_starts,
            contexts: Vec::new(),
        }
    }

    /// Parses the whole input.
    pub(crate) fn parse(mut self) -> Result<Vec<MessageElement>, ParseError> {
        let elements = self.message()?;
        if self.pos < self.input.len() {
            self.fail(Expectation::EndOfInput);
            return Err(self.syntax_error());
        }
        Ok(elements)
    }

    fn syntax_error(&self) -> ParseError {
        let found = self.input[self.furthest..].chars().next();
        let end = self.furthest + found.map_or(0, char::len_utf8);
        ParseError::Expected {
            expected: self.expected.clone(),
            found,
            location: self.span_between(self.furthest, end),
        }
    }

    // ------------------------------------------------------------------
    // Cursor
    // ------------------------------------------------------------------

    fn rest(&self) -> &'a str {
        &self.input[self.pos..]
    }

    fn peek(&self) -> Option<char> {
        self.rest().chars().next()
    }

    fn bump(&mut self, c: char) {
        self.pos += c.len_utf8();
    }

    fn fail(&mut self, expectation: Expectation) {
        if self.silent > 0 || self.pos < self.furthest {
            return;
        }
        if self.pos > self.furthest {
            self.furthest = self.pos;
            self.expected.clear();
        }
        self.expected.push(expectation);
    }

    /// Consumes `text` if it comes next.
    fn eat(&mut self, text: &'static str) -> bool {
        if self.rest().starts_with(text) {
            self.pos += text.len();
            true
        } else {
            self.fail(Expectation::Literal(text));
            false
        }
    }

    fn ws(&mut self) {
        while let Some(c) = self.peek().filter(|&c| is_pattern_white_space(c)) {
            self.bump(c);
        }
    }

    /// Runs `rule`, rewinding the cursor if it fails softly.
    fn attempt<T>(&mut self, rule: impl FnOnce(&mut Self) -> RuleResult<T>) -> RuleResult<T> {
        let start = self.pos;
        let result = rule(self)?;
        if result.is_none() {
            self.pos = start;
        }
        Ok(result)
    }

    fn in_plural(&self) -> bool {
        self.contexts.last() == Some(&Context::Plural)
    }

    fn nested(&self) -> bool {
        !self.contexts.is_empty()
    }

    fn position(&self, offset: usize) -> Position {
        let line = self.line_starts.partition_point(|&start| start <= offset);
        let line_start = self.line_starts.get(line.saturating_sub(1)).copied().unwrap_or(0);
        Position {
            offset,
            line,
            column: self.input[line_start..offset].chars().count() + 1,
        }
    }

    fn span_between(&self, start: usize, end: usize) -> Span {
        Span {
            start: self.position(start),
            end: self.position(end),
        }
    }

    /// Span from `start` to the cursor, if locations are being captured.
    fn located(&self, start: usize) -> Option<Span> {
        self.options
            .capture_location
            .then(|| self.span_between(start, self.pos))
    }

    // ------------------------------------------------------------------
    // Messages
    // ------------------------------------------------------------------

    fn message(&mut self) -> Result<Vec<MessageElement>, ParseError> {
        let mut elements = Vec::new();
        while let Some(element) = self.element()? {
            push_merging_literals(&mut elements, element);
        }
        Ok(elements)
    }

    fn element(&mut self) -> RuleResult<MessageElement> {
        if !self.options.ignore_tag {
            if let Some(tag) = self.attempt(Self::tag)? {
                return Ok(Some(tag));
            }
        }
        if let Some(literal) = self.literal() {
            return Ok(Some(literal));
        }
        if let Some(element) = self.attempt(Self::braced)? {
            return Ok(Some(element));
        }
        Ok(self.pound())
    }

    fn pound(&mut self) -> Option<MessageElement> {
        if !self.in_plural() {
            return None;
        }
        let start = self.pos;
        self.eat("#").then(|| MessageElement::Pound {
            location: self.located(start),
        })
    }

    fn literal(&mut self) -> Option<MessageElement> {
        let start = self.pos;
        let mut value = String::new();
        while let Some(c) = self.peek() {
            if c == '\'' {
                self.apostrophe(&mut value);
                continue;
            }
            let stop = match c {
                '{' => true,
                '}' => self.nested(),
                '#' => self.in_plural(),
                '<' => !self.options.ignore_tag && self.tag_starts_here(),
                _ => false,
            };
            if stop {
                break;
            }
            value.push(c);
            self.bump(c);
        }
        (self.pos > start).then(|| MessageElement::Literal {
            value,
            location: self.located(start),
        })
    }

    /// `''` is one apostrophe. A `'` before a syntax character opens a quoted
    /// run that ends at the next lone `'`; any other `'` is literal.
    fn apostrophe(&mut self, value: &mut String) {
        let rest = self.rest();
        if rest.starts_with("''") {
            value.push('\'');
            self.pos += 2;
            return;
        }
        self.pos += 1;
        if !rest[1..].starts_with(['{', '}', '<', '#']) {
            value.push('\'');
            return;
        }
        while let Some(c) = self.peek() {
            if self.rest().starts_with("''") {
                value.push('\'');
                self.pos += 2;
                continue;
            }
            self.bump(c);
            if c == '\'' {
                return;
            }
            value.push(c);
        }
    }

    // ------------------------------------------------------------------
    // Names
    // ------------------------------------------------------------------

    fn name_run(&mut self) -> Option<&'a str> {
        let rest = self.rest();
        let len = rest.find(|c: char| !is_name_char(c)).unwrap_or(rest.len());
        if len == 0 {
            return None;
        }
        self.pos += len;
        Some(&rest[..len])
    }

    /// `0` or a decimal number without leading zeros.
    fn arg_number(&mut self) -> Option<&'a str> {
        let rest = self.rest();
        let len = match self.peek() {
            Some('0') => 1,
            Some('1'..='9') => rest
                .find(|c: char| !c.is_ascii_digit())
                .unwrap_or(rest.len()),
            _ => return None,
        };
        self.pos += len;
        Some(&rest[..len])
    }

    /// A number takes precedence; `{007}` does not fall back to a name.
    fn arg_name_or_number(&mut self) -> Option<String> {
        let name = self.arg_number().or_else(|| self.name_run());
        if name.is_none() {
            self.fail(Expectation::Named("argNameOrNumber"));
        }
        name.map(str::to_string)
    }

    fn arg_name(&mut self) -> Option<String> {
        let name = self.name_run();
        if name.is_none() {
            self.fail(Expectation::Named("argName"));
        }
        name.map(str::to_string)
    }

    /// `-?` followed by an argument number.
    fn number_text(&mut self) -> Option<&'a str> {
        let start = self.pos;
        if self.rest().starts_with('-') {
            self.pos += 1;
        }
        if self.arg_number().is_none() {
            self.pos = start;
            self.fail(Expectation::Named("number"));
            return None;
        }
        Some(&self.input[start..self.pos])
    }

    /// Argument names joined by hyphens.
    fn tag_name(&mut self) -> Option<String> {
        let start = self.pos;
        if self.name_run().is_none() {
            self.fail(Expectation::Named("tagName"));
            return None;
        }
        while self.rest().starts_with('-') {
            let dash = self.pos;
            self.pos += 1;
            if self.name_run().is_none() {
                self.pos = dash;
                break;
            }
        }
        Some(self.input[start..self.pos].to_string())
    }

    // ------------------------------------------------------------------
    // Tags
    // ------------------------------------------------------------------

    /// Whether a well-formed opening, closing, or self-closing tag starts at
    /// the cursor. Never moves the cursor or records failures.
    fn tag_starts_here(&mut self) -> bool {
        let start = self.pos;
        self.silent += 1;
        let closing = self.rest().starts_with("</");
        self.pos += if closing { 2 } else { 1 };
        let mut found = false;
        if self.tag_name().is_some() {
            self.ws();
            let rest = self.rest();
            found = rest.starts_with('>') || (!closing && rest.starts_with("/>"));
        }
        self.silent -= 1;
        self.pos = start;
        found
    }

    fn tag(&mut self) -> RuleResult<MessageElement> {
        let start = self.pos;
        if !self.eat("<") {
            return Ok(None);
        }
        let Some(name) = self.tag_name() else {
            return Ok(None);
        };
        self.ws();
        if self.eat("/>") {
            return Ok(Some(MessageElement::Literal {
                value: format!("<{name}/>"),
                location: self.located(start),
            }));
        }
        if !self.eat(">") {
            return Ok(None);
        }
        let children = self.message()?;
        if !self.eat("</") {
            return Ok(None);
        }
        let Some(close) = self.tag_name() else {
            return Ok(None);
        };
        self.ws();
        if !self.eat(">") {
            return Ok(None);
        }
        if close != name {
            return Err(ParseError::MismatchedTag {
                open: name,
                close,
                location: self.span_between(start, self.pos),
            });
        }
        Ok(Some(MessageElement::Tag {
            name,
            children,
            location: self.located(start),
        }))
    }

    // ------------------------------------------------------------------
    // Brace elements
    // ------------------------------------------------------------------

    fn braced(&mut self) -> RuleResult<MessageElement> {
        let start = self.pos;
        if !self.eat("{") {
            return Ok(None);
        }
        self.ws();
        let Some(name) = self.arg_name_or_number() else {
            return Ok(None);
        };
        self.ws();
        if self.eat("}") {
            return Ok(Some(MessageElement::Argument {
                name,
                location: self.located(start),
            }));
        }
        if !self.eat(",") {
            return Ok(None);
        }
        self.ws();
        let keyword = KEYWORDS.into_iter().find(|keyword| self.eat(*keyword));
        match keyword {
            Some("number") => self.number_element(name, start),
            Some("date") => self.date_time_element(name, false, start),
            Some("time") => self.date_time_element(name, true, start),
            Some("plural") => self.plural_element(name, PluralKind::Cardinal, start),
            Some("selectordinal") => self.plural_element(name, PluralKind::Ordinal, start),
            Some("select") => self.select_element(name, start),
            _ => Ok(None),
        }
    }

    fn number_element(&mut self, name: String, start: usize) -> RuleResult<MessageElement> {
        self.ws();
        let mut style = None;
        if self.eat(",") {
            self.ws();
            let Some(parsed) = self.number_style()? else {
                return Ok(None);
            };
            style = Some(parsed);
        }
        self.ws();
        if !self.eat("}") {
            return Ok(None);
        }
        Ok(Some(MessageElement::Number {
            name,
            style,
            location: self.located(start),
        }))
    }

    fn date_time_element(
        &mut self,
        name: String,
        is_time: bool,
        start: usize,
    ) -> RuleResult<MessageElement> {
        self.ws();
        let mut style = None;
        if self.eat(",") {
            self.ws();
            let Some(parsed) = self.date_time_style()? else {
                return Ok(None);
            };
            style = Some(parsed);
        }
        self.ws();
        if !self.eat("}") {
            return Ok(None);
        }
        let location = self.located(start);
        Ok(Some(if is_time {
            MessageElement::Time {
                name,
                style,
                location,
            }
        } else {
            MessageElement::Date {
                name,
                style,
                location,
            }
        }))
    }

    fn number_style(&mut self) -> RuleResult<NumberStyle> {
        let start = self.pos;
        if !self.rest().starts_with("::") {
            return Ok(self.style_name().map(Style::Named));
        }
        self.pos += 2;
        let text = self.style_text();
        let skeleton_error = |error: SkeletonError| ParseError::InvalidSkeleton {
            error,
            location: self.span_between(start, self.pos),
        };
        let tokens = parse_number_skeleton_tokens(text).map_err(skeleton_error)?;
        let parsed_options = if self.options.should_parse_skeleton {
            parse_number_skeleton(&tokens).map_err(skeleton_error)?
        } else {
            Default::default()
        };
        Ok(Some(Style::Skeleton(NumberSkeleton {
            tokens,
            parsed_options,
            location: self.located(start),
        })))
    }

    fn date_time_style(&mut self) -> RuleResult<DateTimeStyle> {
        let start = self.pos;
        if !self.rest().starts_with("::") {
            return Ok(self.style_name().map(Style::Named));
        }
        self.pos += 2;
        let pattern = self.style_text();
        let skeleton_error = |error: SkeletonError| ParseError::InvalidSkeleton {
            error,
            location: self.span_between(start, self.pos),
        };
        if pattern.is_empty() {
            return Err(skeleton_error(SkeletonError::EmptyDateTimeSkeleton));
        }
        let parsed_options = if self.options.should_parse_skeleton {
            parse_date_time_skeleton(pattern).map_err(skeleton_error)?
        } else {
            Default::default()
        };
        Ok(Some(Style::Skeleton(DateTimeSkeleton {
            pattern: pattern.to_string(),
            parsed_options,
            location: self.located(start),
        })))
    }

    fn style_name(&mut self) -> Option<String> {
        let text = self.style_text();
        if text.is_empty() {
            self.fail(Expectation::Named("argStyle"));
            return None;
        }
        Some(text.to_string())
    }

    /// Raw style text up to the element's closing brace. Quoted runs and
    /// balanced braces are kept verbatim; trailing whitespace is dropped.
    fn style_text(&mut self) -> &'a str {
        let start = self.pos;
        let mut depth = 0usize;
        while let Some(c) = self.peek() {
            match c {
                '\'' => {
                    self.bump(c);
                    let rest = self.rest();
                    self.pos += rest.find('\'').map_or(rest.len(), |index| index + 1);
                    continue;
                }
                '{' => depth += 1,
                '}' if depth == 0 => break,
                '}' => depth -= 1,
                _ => {}
            }
            self.bump(c);
        }
        self.input[start..self.pos].trim_end_matches(is_pattern_white_space)
    }

    fn plural_element(
        &mut self,
        name: String,
        kind: PluralKind,
        start: usize,
    ) -> RuleResult<MessageElement> {
        self.ws();
        if !self.eat(",") {
            return Ok(None);
        }
        self.ws();
        let mut offset = 0;
        if self.eat("offset:") {
            self.ws();
            let Some(parsed) = self.offset()? else {
                return Ok(None);
            };
            offset = parsed;
        }
        let options = self.selector_options(Context::Plural)?;
        if options.is_empty() {
            return Ok(None);
        }
        self.ws();
        if !self.eat("}") {
            return Ok(None);
        }
        let kind_name = match kind {
            PluralKind::Cardinal => "plural",
            PluralKind::Ordinal => "selectordinal",
        };
        self.check_duplicates(&options, kind_name, start)?;
        Ok(Some(MessageElement::Plural {
            name,
            kind,
            offset,
            options,
            location: self.located(start),
        }))
    }

    fn offset(&mut self) -> RuleResult<i64> {
        let start = self.pos;
        let Some(text) = self.number_text() else {
            return Ok(None);
        };
        text.parse::<i64>()
            .map(Some)
            .map_err(|_| ParseError::InvalidOffset {
                text: text.to_string(),
                location: self.span_between(start, self.pos),
            })
    }

    fn select_element(&mut self, name: String, start: usize) -> RuleResult<MessageElement> {
        self.ws();
        if !self.eat(",") {
            return Ok(None);
        }
        self.ws();
        let options = self.selector_options(Context::Select)?;
        if options.is_empty() {
            return Ok(None);
        }
        self.ws();
        if !self.eat("}") {
            return Ok(None);
        }
        self.check_duplicates(&options, "select", start)?;
        Ok(Some(MessageElement::Select {
            name,
            options,
            location: self.located(start),
        }))
    }

    fn selector_options(&mut self, context: Context) -> Result<Vec<SelectorOption>, ParseError> {
        self.contexts.push(context);
        let mut options = Vec::new();
        let result = loop {
            match self.attempt(|parser| parser.selector_option(context)) {
                Ok(Some(option)) => options.push(option),
                Ok(None) => break Ok(options),
                Err(error) => break Err(error),
            }
        };
        self.contexts.pop();
        result
    }

    fn selector_option(&mut self, context: Context) -> RuleResult<SelectorOption> {
        self.ws();
        let start = self.pos;
        let selector = match context {
            Context::Plural => self.plural_selector(),
            Context::Select => self.arg_name(),
        };
        let Some(selector) = selector else {
            return Ok(None);
        };
        self.ws();
        if !self.eat("{") {
            return Ok(None);
        }
        let value = self.message()?;
        if !self.eat("}") {
            return Ok(None);
        }
        Ok(Some(SelectorOption {
            selector,
            value,
            location: self.located(start),
        }))
    }

    /// `=N` or a category name.
    fn plural_selector(&mut self) -> Option<String> {
        let start = self.pos;
        if self.eat("=") {
            self.number_text()?;
            return Some(self.input[start..self.pos].to_string());
        }
        self.arg_name()
    }

    fn check_duplicates(
        &self,
        options: &[SelectorOption],
        kind: &'static str,
        start: usize,
    ) -> Result<(), ParseError> {
        for (index, option) in options.iter().enumerate() {
            if options[..index]
                .iter()
                .any(|earlier| earlier.selector == option.selector)
            {
                return Err(ParseError::DuplicateOption {
                    id: option.selector.clone(),
                    kind,
                    text: self.input[start..self.pos].to_string(),
                    location: self.span_between(start, self.pos),
                });
            }
        }
        Ok(())
    }
}

/// Appends `element`, joining it onto a trailing literal.
fn push_merging_literals(elements: &mut Vec<MessageElement>, element: MessageElement) {
    if let (
        Some(MessageElement::Literal {
            value: previous,
            location: previous_location,
        }),
        MessageElement::Literal { value, location },
    ) = (elements.last_mut(), &element)
    {
        previous.push_str(value);
        if let (Some(previous_location), Some(location)) = (previous_location.as_mut(), location) {
            previous_location.end = location.end;
        }
        return;
    }
    elements.push(element);
}
