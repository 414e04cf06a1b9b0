// Copyright (c) 2026 Arista Networks, Inc.
// Use of this source code is governed by the Apache License 2.0
// that can be found in the LICENSE file.

//! Token types for the YAML lexer.
//!
//! Every token borrows from the input. Scalars carry their raw text; the
//! scalar parser turns it into a value once the node's tag is known.

use crate::directive::Directive;
use crate::scalar::{BlockHeader, ScalarStyle};

/// A YAML token.
///
/// The lifetime `'input` refers to the input string being tokenized.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Token<'input> {
    /// A `%YAML`, `%TAG` or reserved directive line
    Directive(Directive<'input>),
    /// `---` document start
    DocumentStart,
    /// `...` document end
    DocumentEnd,

    // Indicators
    /// `-` block sequence entry indicator (when followed by whitespace or newline)
    SequenceEntry,
    /// `?` mapping key indicator (when followed by whitespace or newline)
    ExplicitKey,
    /// `:` mapping value indicator
    KeySeparator,
    /// `[` flow sequence start
    FlowSequenceStart,
    /// `]` flow sequence end
    FlowSequenceEnd,
    /// `{` flow mapping start
    FlowMappingStart,
    /// `}` flow mapping end
    FlowMappingEnd,
    /// `,` flow entry separator
    FlowEntry,

    // Node properties
    /// Anchor definition (`&name`), without the `&`
    Anchor(&'input str),
    /// Alias reference (`*name`), without the `*`
    Alias(&'input str),
    /// Tag as written (`!tag`, `!!type` or `!<uri>`)
    Tag(&'input str),

    /// A plain or quoted scalar.
    ///
    /// For quoted styles `text` is the raw content between the quotes.
    Scalar {
        style: ScalarStyle,
        text: &'input str,
    },
    /// A literal or folded block scalar with its raw content lines.
    BlockScalar {
        style: ScalarStyle,
        header: BlockHeader,
        text: &'input str,
    },

    /// End of the input
    StreamEnd,
}

impl Token<'_> {
    /// Returns `true` for tokens that close the current document.
    #[must_use]
    pub const fn ends_document(&self) -> bool {
        matches!(
            self,
            Self::Directive(_) | Self::DocumentStart | Self::DocumentEnd | Self::StreamEnd
        )
    }

    /// Returns `true` if this is a flow indicator.
    #[must_use]
    pub const fn is_flow_indicator(&self) -> bool {
        matches!(
            self,
            Self::FlowMappingStart
                | Self::FlowMappingEnd
                | Self::FlowSequenceStart
                | Self::FlowSequenceEnd
                | Self::FlowEntry
        )
    }
}

impl std::fmt::Display for Token<'_> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Directive(directive) => write!(f, "directive '{directive}'"),
            Self::DocumentStart => write!(f, "'---'"),
            Self::DocumentEnd => write!(f, "'...'"),
            Self::SequenceEntry => write!(f, "'-'"),
            Self::ExplicitKey => write!(f, "'?'"),
            Self::KeySeparator => write!(f, "':'"),
            Self::FlowSequenceStart => write!(f, "'['"),
            Self::FlowSequenceEnd => write!(f, "']'"),
            Self::FlowMappingStart => write!(f, "'{{'"),
            Self::FlowMappingEnd => write!(f, "'}}'"),
            Self::FlowEntry => write!(f, "','"),
            Self::Anchor(name) => write!(f, "anchor '&{name}'"),
            Self::Alias(name) => write!(f, "alias '*{name}'"),
            Self::Tag(tag) => write!(f, "tag '{tag}'"),
            Self::Scalar { style, text } => write!(f, "{style} scalar '{text}'"),
            Self::BlockScalar { style, .. } => write!(f, "{style} block scalar"),
            Self::StreamEnd => write!(f, "end of input"),
        }
    }
}
