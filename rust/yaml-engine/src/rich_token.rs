// Copyright (c) 2026 Arista Networks, Inc.
// Use of this source code is governed by the Apache License 2.0
// that can be found in the LICENSE file.

//! Token wrapper.
//!
//! This module provides [`RichToken`] which wraps tokens with span and
//! position information.

use crate::span::{Position, Span};
use crate::token::Token;

/// A token with its associated Span and the position where it starts.
///
/// The lifetime `'input` refers to the input string being tokenized.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RichToken<'input> {
    /// The actual token.
    pub token: Token<'input>,
    /// The source location of the token.
    pub span: Span,
    /// Line and column of the first character of the token.
    pub position: Position,
}

impl<'input> RichToken<'input> {
    /// Create a new rich token.
    #[must_use]
    pub const fn new(token: Token<'input>, span: Span, position: Position) -> Self {
        Self {
            token,
            span,
            position,
        }
    }

    #[must_use]
    pub const fn line(&self) -> usize {
        self.position.line
    }

    #[must_use]
    pub const fn column(&self) -> usize {
        self.position.column
    }
}

impl std::fmt::Display for RichToken<'_> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        self.token.fmt(f)
    }
}
