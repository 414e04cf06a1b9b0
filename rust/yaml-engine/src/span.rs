// Copyright (c) 2026 Arista Networks, Inc.
// Use of this source code is governed by the Apache License 2.0
// that can be found in the LICENSE file.

//! Span and position types for tracking source locations.

use chumsky::span::SimpleSpan;

/// A span representing a range in the source text.
///
/// This is an alias for chumsky's `SimpleSpan`, which tracks byte offsets.
/// The span is a half-open range `[start, end)`.
pub type Span = SimpleSpan<usize>;

/// A value with an associated source span.
pub type Spanned<T> = (T, Span);

/// A line/column location in the source text.
///
/// Both fields are zero-based; [`Display`](std::fmt::Display) renders them one-based.
/// The column counts characters, not bytes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Default, Hash)]
pub struct Position {
    pub line: usize,
    pub column: usize,
}

impl Position {
    #[must_use]
    pub const fn new(line: usize, column: usize) -> Self {
        Self { line, column }
    }
}

impl std::fmt::Display for Position {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "line {}, column {}", self.line + 1, self.column + 1)
    }
}

/// Maps byte offsets of an input to line/column positions.
#[derive(Debug, Clone)]
pub struct SourceMap<'input> {
    input: &'input str,
    /// Byte offset at which each line starts.
    line_starts: Vec<usize>,
}

impl<'input> SourceMap<'input> {
    #[must_use]
    pub fn new(input: &'input str) -> Self {
        let mut line_starts = vec![0];
        line_starts.extend(
            input
                .bytes()
                .enumerate()
                .filter(|&(_, byte)| byte == b'\n')
                .map(|(idx, _)| idx + 1),
        );
        Self { input, line_starts }
    }

    /// Returns the position of the given byte offset.
    ///
    /// Offsets past the end of the input are clamped to the end.
    #[must_use]
    pub fn position(&self, offset: usize) -> Position {
        let offset = offset.min(self.input.len());
        let line = self
            .line_starts
            .partition_point(|&start| start <= offset)
            .saturating_sub(1);
        let line_start = self.line_starts.get(line).copied().unwrap_or_default();
        let column = self
            .input
            .get(line_start..offset)
            .map_or(offset - line_start, |prefix| prefix.chars().count());
        Position { line, column }
    }

    /// Number of lines in the input.
    #[must_use]
    pub fn line_count(&self) -> usize {
        self.line_starts.len()
    }
}
