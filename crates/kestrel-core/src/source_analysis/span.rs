// Copyright 2026 James Casey
// SPDX-License-Identifier: Apache-2.0

//! Source location tracking.
//!
//! Every token and AST node carries a [`Span`] indicating its position in the
//! source file. A span records both byte offsets (for slicing and for
//! [`miette`] labels) and 1-based line/column pairs (for human-facing output).

use std::fmt;
use std::ops::Range;

/// Identifies a source file for diagnostic display.
///
/// The front end never interprets the id; callers map it back to a path.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct FileId(pub u32);

impl fmt::Display for FileId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "file#{}", self.0)
    }
}

/// A single point in the source text.
///
/// `line` and `column` are 1-based; `column` counts characters, not bytes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Position {
    byte_offset: u32,
    line: u32,
    column: u32,
}

impl Position {
    /// The position of the first character of any source text.
    pub const START: Self = Self::new(0, 1, 1);

    /// Creates a position from its components.
    #[must_use]
    pub const fn new(byte_offset: u32, line: u32, column: u32) -> Self {
        Self {
            byte_offset,
            line,
            column,
        }
    }

    /// Returns the byte offset from the start of the source.
    #[must_use]
    pub const fn byte_offset(self) -> u32 {
        self.byte_offset
    }

    /// Returns the 1-based line number.
    #[must_use]
    pub const fn line(self) -> u32 {
        self.line
    }

    /// Returns the 1-based column number, in characters.
    #[must_use]
    pub const fn column(self) -> u32 {
        self.column
    }
}

impl Default for Position {
    fn default() -> Self {
        Self::START
    }
}

impl fmt::Display for Position {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.line, self.column)
    }
}

/// A span of source code.
///
/// Spans are immutable values. The end position is exclusive and never
/// precedes the start position.
///
/// # Examples
///
/// ```
/// use kestrel_core::source_analysis::{Position, Span};
///
/// let span = Span::new(Position::new(0, 1, 1), Position::new(10, 1, 11));
/// assert_eq!(span.start().byte_offset(), 0);
/// assert_eq!(span.end().byte_offset(), 10);
/// assert_eq!(span.len(), 10);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct Span {
    start: Position,
    end: Position,
    file_id: Option<FileId>,
}

impl Span {
    /// Creates a new span between two positions.
    ///
    /// If `end` precedes `start` the two are swapped, so the ordering
    /// invariant holds for every constructed span.
    #[must_use]
    pub const fn new(start: Position, end: Position) -> Self {
        if end.byte_offset < start.byte_offset {
            Self {
                start: end,
                end: start,
                file_id: None,
            }
        } else {
            Self {
                start,
                end,
                file_id: None,
            }
        }
    }

    /// Creates a zero-width span at `position`.
    #[must_use]
    pub const fn point(position: Position) -> Self {
        Self::new(position, position)
    }

    /// Returns this span tagged with a file id.
    #[must_use]
    pub const fn with_file(mut self, file_id: Option<FileId>) -> Self {
        self.file_id = file_id;
        self
    }

    /// Returns the start position.
    #[must_use]
    pub const fn start(self) -> Position {
        self.start
    }

    /// Returns the end position (exclusive).
    #[must_use]
    pub const fn end(self) -> Position {
        self.end
    }

    /// Returns the file this span belongs to, if known.
    #[must_use]
    pub const fn file_id(self) -> Option<FileId> {
        self.file_id
    }

    /// Returns the length of the span in bytes.
    #[must_use]
    pub const fn len(self) -> u32 {
        self.end.byte_offset - self.start.byte_offset
    }

    /// Returns true if the span is empty.
    #[must_use]
    pub const fn is_empty(self) -> bool {
        self.start.byte_offset == self.end.byte_offset
    }

    /// Returns true if `other` is fully contained within `self`.
    #[must_use]
    pub const fn contains(self, other: Self) -> bool {
        self.start.byte_offset <= other.start.byte_offset
            && other.end.byte_offset <= self.end.byte_offset
    }

    /// Creates a span that covers both `self` and `other`.
    #[must_use]
    pub const fn merge(self, other: Self) -> Self {
        let start = if self.start.byte_offset <= other.start.byte_offset {
            self.start
        } else {
            other.start
        };
        let end = if self.end.byte_offset >= other.end.byte_offset {
            self.end
        } else {
            other.end
        };
        let file_id = match self.file_id {
            Some(id) => Some(id),
            None => other.file_id,
        };
        Self {
            start,
            end,
            file_id,
        }
    }

    /// Converts to a `Range<usize>` for indexing into source text.
    #[must_use]
    pub const fn as_range(self) -> Range<usize> {
        self.start.byte_offset as usize..self.end.byte_offset as usize
    }
}

impl fmt::Display for Span {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if let Some(file_id) = self.file_id {
            write!(f, "{file_id}:")?;
        }
        write!(f, "{}-{}", self.start, self.end)
    }
}

impl From<Span> for Range<usize> {
    fn from(span: Span) -> Self {
        span.as_range()
    }
}

impl From<Span> for miette::SourceSpan {
    fn from(span: Span) -> Self {
        (span.start.byte_offset as usize, span.len() as usize).into()
    }
}
