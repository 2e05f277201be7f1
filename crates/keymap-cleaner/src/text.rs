//! Text spans, positions and single-edit application
//!
//! Spans are byte offsets into the document. Positions are 0-based
//! line/character pairs in the LSP sense, derived on demand through a
//! [`LineIndex`]; characters are counted in UTF-16 code units within the
//! line, as LSP hosts expect.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

use crate::error::FixError;

/// Half-open byte range over document text
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct TextSpan {
    pub start: usize,
    pub end: usize,
}

impl TextSpan {
    /// Create a new span
    pub fn new(start: usize, end: usize) -> Self {
        Self { start, end }
    }

    /// Span covering all of `text`
    pub fn whole(text: &str) -> Self {
        Self::new(0, text.len())
    }

    pub fn len(&self) -> usize {
        self.end.saturating_sub(self.start)
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// The covered slice of `text`, if the span is valid for it
    pub fn slice<'a>(&self, text: &'a str) -> Option<&'a str> {
        text.get(self.start..self.end)
    }
}

/// Position in a document (line and character)
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
pub struct Position {
    /// Line number (0-based)
    pub line: u32,
    /// Character offset in UTF-16 code units (0-based)
    pub character: u32,
}

impl Position {
    pub fn new(line: u32, character: u32) -> Self {
        Self { line, character }
    }
}

/// Range in a document (start and end positions)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Range {
    pub start: Position,
    pub end: Position,
}

impl Range {
    pub fn new(start: Position, end: Position) -> Self {
        Self { start, end }
    }
}

/// Offsets of every line start, for offset/position conversion
#[derive(Debug, Clone)]
pub struct LineIndex {
    line_starts: Vec<usize>,
    /// Multi-byte characters of each line that has any
    wide_chars: HashMap<usize, Vec<WideChar>>,
    len: usize,
}

/// A character whose UTF-8 and UTF-16 lengths differ from one byte
#[derive(Debug, Clone, Copy)]
struct WideChar {
    /// Byte column within its line
    column: usize,
    len_utf8: usize,
    len_utf16: usize,
}

impl LineIndex {
    pub fn new(text: &str) -> Self {
        let mut line_starts = vec![0];
        let mut wide_chars: HashMap<usize, Vec<WideChar>> = HashMap::new();

        for (offset, c) in text.char_indices() {
            if c == '\n' {
                line_starts.push(offset + 1);
            } else if !c.is_ascii() {
                let line = line_starts.len() - 1;
                wide_chars.entry(line).or_default().push(WideChar {
                    column: offset - line_starts[line],
                    len_utf8: c.len_utf8(),
                    len_utf16: c.len_utf16(),
                });
            }
        }

        Self {
            line_starts,
            wide_chars,
            len: text.len(),
        }
    }

    /// Line containing `offset` (offsets past the end clamp to the last line)
    pub fn line_of(&self, offset: usize) -> usize {
        let offset = offset.min(self.len);
        match self.line_starts.binary_search(&offset) {
            Ok(line) => line,
            Err(next) => next - 1,
        }
    }

    /// Byte offset where `line` starts
    pub fn line_start(&self, line: usize) -> Option<usize> {
        self.line_starts.get(line).copied()
    }

    /// Byte offset where `line` ends, excluding its line break
    pub fn line_end(&self, text: &str, line: usize) -> Option<usize> {
        let start = self.line_start(line)?;
        let next = self
            .line_starts
            .get(line + 1)
            .map(|n| n - 1)
            .unwrap_or(self.len);
        let content = text.get(start..next)?;
        Some(start + content.strip_suffix('\r').unwrap_or(content).len())
    }

    /// Text of `line` without its line break
    pub fn line_text<'a>(&self, text: &'a str, line: usize) -> Option<&'a str> {
        let start = self.line_start(line)?;
        let end = self.line_end(text, line)?;
        text.get(start..end)
    }

    pub fn position(&self, offset: usize) -> Position {
        let offset = offset.min(self.len);
        let line = self.line_of(offset);
        let column = offset - self.line_starts[line];
        Position::new(to_u32(line), to_u32(self.utf16_column(line, column)))
    }

    fn utf16_column(&self, line: usize, column: usize) -> usize {
        let Some(wide) = self.wide_chars.get(&line) else {
            return column;
        };
        wide.iter()
            .take_while(|c| c.column < column)
            .fold(column, |col, c| col - (c.len_utf8 - c.len_utf16))
    }

    pub fn range(&self, span: TextSpan) -> Range {
        Range::new(self.position(span.start), self.position(span.end))
    }
}

fn to_u32(value: usize) -> u32 {
    u32::try_from(value).unwrap_or(u32::MAX)
}

/// A single replacement over a span of the document
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TextEdit {
    pub span: TextSpan,
    pub new_text: String,
}

impl TextEdit {
    pub fn delete(span: TextSpan) -> Self {
        Self {
            span,
            new_text: String::new(),
        }
    }

    pub fn replace(span: TextSpan, new_text: impl Into<String>) -> Self {
        Self {
            span,
            new_text: new_text.into(),
        }
    }
}

/// Apply a single text edit to `text`
pub fn apply_edit(text: &str, edit: &TextEdit) -> Result<String, FixError> {
    let TextSpan { start, end } = edit.span;
    if start > end || end > text.len() {
        return Err(FixError::OutOfBounds {
            start,
            end,
            len: text.len(),
        });
    }
    if !text.is_char_boundary(start) || !text.is_char_boundary(end) {
        return Err(FixError::NotCharBoundary { start, end });
    }

    let mut result = String::with_capacity(text.len() - edit.span.len() + edit.new_text.len());
    result.push_str(&text[..start]);
    result.push_str(&edit.new_text);
    result.push_str(&text[end..]);
    Ok(result)
}
