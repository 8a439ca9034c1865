//! Structured failures for the WML parser and the tilemap differ.

use smallvec::SmallVec;
use std::collections::BTreeSet;
use std::fmt;
use thiserror::Error;

// ─── Parse failures ──────────────────────────────────────────────────────

/// A syntax error: the furthest input position any grammar rule reached
/// before failing, and every expectation that was live at that position.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("expected one of [{}] at line {line}, column {column}", .expected.join(", "))]
pub struct ParseFailure {
    /// Byte offset into the source.
    pub position: usize,
    /// 1-based line of `position`.
    pub line: usize,
    /// 1-based column (in chars) of `position`.
    pub column: usize,
    /// Sorted, de-duplicated expectation labels.
    pub expected: SmallVec<[String; 4]>,
}

impl ParseFailure {
    /// Build a failure at `position` in `source`, computing line and column.
    pub fn new<I, S>(source: &str, position: usize, expected: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let labels: BTreeSet<String> = expected.into_iter().map(Into::into).collect();
        let (line, column) = offset_to_line_col(source, position);
        Self {
            position,
            line,
            column,
            expected: labels.into_iter().collect(),
        }
    }

    /// True if `label` is among the expectations.
    pub fn expects(&self, label: &str) -> bool {
        self.expected.iter().any(|e| e == label)
    }
}

/// Convert a byte offset in source text to a 1-based (line, column) pair.
pub fn offset_to_line_col(source: &str, offset: usize) -> (usize, usize) {
    let mut line = 1;
    let mut col = 1;
    for (i, ch) in source.char_indices() {
        if i >= offset {
            break;
        }
        if ch == '\n' {
            line += 1;
            col = 1;
        } else {
            col += 1;
        }
    }
    (line, col)
}

/// Running furthest-failure record used while parsing.
///
/// A failure further into the input replaces everything recorded so far;
/// failures at the same offset accumulate their labels.
#[derive(Debug, Default)]
pub(crate) struct Expectations {
    furthest: usize,
    labels: BTreeSet<String>,
}

impl Expectations {
    pub(crate) fn record(&mut self, offset: usize, label: impl Into<String>) {
        if offset > self.furthest {
            self.furthest = offset;
            self.labels.clear();
        }
        if offset == self.furthest {
            self.labels.insert(label.into());
        }
    }

    pub(crate) fn into_failure(self, source: &str) -> ParseFailure {
        ParseFailure::new(source, self.furthest, self.labels)
    }
}

// ─── Tilemap errors ──────────────────────────────────────────────────────

/// Width × height of a grid, as reported in shape errors.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Shape {
    pub width: usize,
    pub height: usize,
}

impl fmt::Display for Shape {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}x{}", self.width, self.height)
    }
}

/// Errors from comparing two tilemaps.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum TilemapError {
    #[error("tilemaps have different row counts ({left} vs {right})")]
    RowCountMismatch { left: Shape, right: Shape },

    #[error("row {row} has {left} cells on the left and {right} on the right")]
    RowLengthMismatch { row: usize, left: usize, right: usize },
}
