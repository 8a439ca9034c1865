//! Parser for preprocessed WML text → flat list of `(tag, attributes)`.
//!
//! Built on `winnow` 0.7. Token-level rules (whitespace, comments,
//! `key = value` lines, open/close tags) are plain winnow parsers; the
//! ordered alternatives above them are driven by hand so that every failed
//! alternative can report its expectation label at the offset where it
//! failed. The furthest such offset, with all labels recorded there, becomes
//! the [`ParseFailure`].
//!
//! Grammar:
//!
//! ```text
//! File       := TopLevel*
//! TopLevel   := Whitespace | Comment | FullTag
//! FullTag    := '[' TagName ']' Body* '[/' TagName ']'
//! Body       := Whitespace | Attribute | Comment
//! Attribute  := Key ws? '=' ws? (StringValue | TextValue)
//! TextValue  := ('_ ')? (!'[/' [^+\n])*
//! ```

use crate::error::{Expectations, ParseFailure};
use crate::id::TagName;
use crate::model::{AttributeMap, AttributeValue, ParsedDocument};
use winnow::ascii::{space0, space1};
use winnow::combinator::{delimited, not, opt, preceded, repeat, terminated};
use winnow::error::{ContextError, ErrMode};
use winnow::prelude::*;
use winnow::token::{literal, none_of, take_till, take_while};

pub const EXPECT_WHITESPACE: &str = "Whitespace";
pub const EXPECT_COMMENT: &str = "Comment";
pub const EXPECT_TAG: &str = "Tag";
pub const EXPECT_TAG_BODY: &str = "Tag body";
pub const EXPECT_END_OF_INPUT: &str = "end of input";

/// Label reported when `[name]` is not closed by `[/name]`.
pub fn expect_close_tag(name: &str) -> String {
    format!("Close tag for [{name}]")
}

// ─── Public API ───────────────────────────────────────────────────────────

/// Parse a WML document.
///
/// Returns every top-level tag in source order, or a [`ParseFailure`]
/// carrying the furthest failure position and the expectations live there.
#[must_use = "parsing result should be used"]
pub fn parse_document(source: &str) -> Result<ParsedDocument, ParseFailure> {
    let mut parser = DocumentParser::new(source);
    let mut rest = source;
    match parser.document(&mut rest) {
        Some(doc) => {
            log::debug!("parsed {} tag(s) from {} bytes", doc.len(), source.len());
            Ok(doc)
        }
        None => {
            let failure = parser.expectations.into_failure(source);
            log::debug!("parse failed: {failure}");
            Err(failure)
        }
    }
}

/// Parse a WML document that is known to be well-formed.
///
/// # Panics
/// Panics with the [`ParseFailure`] message if the input does not parse.
#[track_caller]
pub fn parse_document_strict(source: &str) -> ParsedDocument {
    match parse_document(source) {
        Ok(doc) => doc,
        Err(failure) => panic!("WML parse error: {failure}"),
    }
}

// ─── Alternative driver ───────────────────────────────────────────────────

struct DocumentParser<'s> {
    source: &'s str,
    expectations: Expectations,
}

impl<'s> DocumentParser<'s> {
    fn new(source: &'s str) -> Self {
        Self {
            source,
            expectations: Expectations::default(),
        }
    }

    fn offset(&self, rest: &str) -> usize {
        self.source.len() - rest.len()
    }

    /// `TopLevel*` followed by end of input. `None` means a syntax error
    /// has been recorded in `self.expectations`.
    fn document(&mut self, input: &mut &'s str) -> Option<ParsedDocument> {
        let mut tags = ParsedDocument::new();

        loop {
            if input.is_empty() {
                return Some(tags);
            }
            let at = self.offset(input);

            if attempt(input, whitespace) {
                continue;
            }
            self.expectations.record(at, EXPECT_WHITESPACE);

            if attempt(input, comment) {
                continue;
            }
            self.expectations.record(at, EXPECT_COMMENT);

            match self.full_tag(input)? {
                Some(tag) => tags.push(tag),
                None => {
                    self.expectations.record(at, EXPECT_END_OF_INPUT);
                    return None;
                }
            }
        }
    }

    /// `[name] Body* [/name]`.
    ///
    /// `Some(None)` when no open tag starts here (input untouched);
    /// `None` when the tag opened but did not close properly.
    fn full_tag(&mut self, input: &mut &'s str) -> Option<Option<(TagName, AttributeMap)>> {
        let checkpoint = *input;
        let name = match open_tag.parse_next(input) {
            Ok(name) => name,
            Err(_) => {
                *input = checkpoint;
                let at = self.offset(input);
                self.expectations.record(at, EXPECT_TAG);
                return Some(None);
            }
        };

        let mut attributes = AttributeMap::new();
        loop {
            if attempt(input, whitespace) {
                continue;
            }
            let checkpoint = *input;
            if let Ok((key, value)) = attribute.parse_next(input) {
                attributes.insert(key.to_string(), value);
                continue;
            }
            *input = checkpoint;
            if attempt(input, comment) {
                continue;
            }
            let at = self.offset(input);
            self.expectations.record(at, EXPECT_TAG_BODY);
            break;
        }

        let checkpoint = *input;
        if close_tag(input, name).is_err() {
            *input = checkpoint;
            let at = self.offset(input);
            self.expectations.record(at, expect_close_tag(name));
            return None;
        }

        Some(Some((TagName::intern(name), attributes)))
    }
}

/// Run `parser`; on failure restore the input and report `false`.
fn attempt<'s, O>(
    input: &mut &'s str,
    mut parser: impl FnMut(&mut &'s str) -> ModalResult<O>,
) -> bool {
    let checkpoint = *input;
    if parser(input).is_ok() {
        true
    } else {
        *input = checkpoint;
        false
    }
}

// ─── Low-level parsers ──────────────────────────────────────────────────

fn is_name_char(c: char) -> bool {
    c.is_ascii_alphanumeric() || c == '_'
}

fn whitespace<'s>(input: &mut &'s str) -> ModalResult<&'s str> {
    take_while(1.., |c: char| c.is_whitespace()).parse_next(input)
}

/// `#` to end of line, optionally indented. A comment on the last line
/// needs no trailing newline.
fn comment<'s>(input: &mut &'s str) -> ModalResult<&'s str> {
    (
        take_while(0.., |c: char| c.is_whitespace()),
        '#',
        take_till(0.., '\n'),
        opt('\n'),
    )
        .take()
        .parse_next(input)
}

fn tag_name<'s>(input: &mut &'s str) -> ModalResult<&'s str> {
    take_while(1.., is_name_char).parse_next(input)
}

fn open_tag<'s>(input: &mut &'s str) -> ModalResult<&'s str> {
    delimited('[', tag_name, ']').parse_next(input)
}

fn close_tag<'s>(input: &mut &'s str, name: &str) -> ModalResult<&'s str> {
    delimited("[/", literal(name), ']').parse_next(input)
}

// ─── Attribute parsers ──────────────────────────────────────────────────

/// `key = value` → (key, value).
fn attribute<'s>(input: &mut &'s str) -> ModalResult<(&'s str, AttributeValue)> {
    let key = attribute_key.parse_next(input)?;
    let value = attribute_value.parse_next(input)?;
    Ok((key, value))
}

/// `name`, optional spaces, `=`, optional spaces. Spaces here never span
/// a line break.
fn attribute_key<'s>(input: &mut &'s str) -> ModalResult<&'s str> {
    terminated(take_while(1.., is_name_char), (space0, '=', space0)).parse_next(input)
}

/// `_ ` in front of a value marks it translatable.
fn translation_marker<'s>(input: &mut &'s str) -> ModalResult<&'s str> {
    ('_', space1).take().parse_next(input)
}

/// Quoted form first, unquoted text otherwise. An unquoted value that is
/// empty after trimming is not a value.
fn attribute_value(input: &mut &str) -> ModalResult<AttributeValue> {
    let translatable = opt(translation_marker).parse_next(input)?.is_some();

    let checkpoint = *input;
    if let Ok(raw) = quoted_value.parse_next(input) {
        return Ok(AttributeValue::new(raw, translatable));
    }
    *input = checkpoint;

    let text = text_value.parse_next(input)?.trim();
    if text.is_empty() {
        return Err(ErrMode::Backtrack(ContextError::new()));
    }
    Ok(AttributeValue::new(text, translatable))
}

/// Everything up to a `+`, end of line, or a `[/` that starts a close tag
/// on the same line.
fn text_value<'s>(input: &mut &'s str) -> ModalResult<&'s str> {
    repeat::<_, _, (), _, _>(0.., preceded(not("[/"), none_of(['+', '\n'])))
        .take()
        .parse_next(input)
}

/// `"..."` where `""` is an escaped quote. Returns the interior with the
/// escapes left in place; the interior may span lines.
fn quoted_value<'s>(input: &mut &'s str) -> ModalResult<&'s str> {
    let _ = '"'.parse_next(input)?;
    let body = *input;
    let mut len = 0;
    loop {
        let Some(quote) = body[len..].find('"') else {
            return Err(ErrMode::Backtrack(ContextError::new()));
        };
        len += quote;
        if body[len + 1..].starts_with('"') {
            len += 2;
        } else {
            break;
        }
    }
    *input = &body[len + 1..];
    Ok(&body[..len])
}
