// Copyright (c) 2026 Arista Networks, Inc.
// Use of this source code is governed by the Apache License 2.0
// that can be found in the LICENSE file.

//! Error types for transcoding, parsing, tag resolution and node access.

use crate::input::Encoding;
use crate::scanner::ScalarType;
use crate::span::{Position, Span};
use crate::value::NodeType;

/// Result type used throughout the crate.
pub type Result<T, E = Error> = std::result::Result<T, E>;

/// Any error raised by this crate.
#[derive(Debug, derive_more::Display, derive_more::From)]
pub enum Error {
    /// Malformed input for the detected or declared Unicode encoding.
    #[display("invalid encoding: {_0}")]
    #[from]
    InvalidEncoding(EncodingError),
    /// Lexical, structural or scalar grammar violation.
    #[display("parse error: {_0}")]
    #[from]
    Parse(ParseError),
    /// Malformed tag or a tag referring to an undeclared handle.
    #[display("invalid tag '{tag}': {reason}")]
    InvalidTag { tag: String, reason: String },
    /// An operation required a different node kind.
    #[display("type error: expected {expected}, found {found}")]
    Type { expected: NodeType, found: NodeType },
    /// Index or key lookup failure.
    #[display("out of range: {_0}")]
    OutOfRange(String),
    /// Failure of the underlying reader or writer.
    #[display("I/O error: {_0}")]
    #[from]
    Io(std::io::Error),
    /// Internal invariant violation.
    #[display("{_0}")]
    Other(String),
}

impl std::error::Error for Error {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::InvalidEncoding(err) => Some(err),
            Self::Parse(err) => Some(err),
            Self::Io(err) => Some(err),
            Self::InvalidTag { .. } | Self::Type { .. } | Self::OutOfRange(_) | Self::Other(_) => {
                None
            }
        }
    }
}

impl Error {
    pub(crate) fn invalid_tag(tag: &str, reason: impl Into<String>) -> Self {
        Self::InvalidTag {
            tag: tag.to_owned(),
            reason: reason.into(),
        }
    }

    pub(crate) const fn type_error(expected: NodeType, found: NodeType) -> Self {
        Self::Type { expected, found }
    }
}

/// Transcoding failures.
#[derive(Debug, Clone, PartialEq, Eq, derive_more::Display)]
pub enum EncodingError {
    #[display("invalid UTF-8 sequence at byte offset {offset}")]
    InvalidUtf8 { offset: usize },
    #[display("unpaired UTF-16 surrogate 0x{_0:04X}")]
    UnpairedSurrogate(u16),
    #[display("code point 0x{_0:X} is out of the Unicode range")]
    CodePointOutOfRange(u32),
    #[display("input ends in the middle of a {_0} character")]
    TruncatedInput(Encoding),
    #[display("detected {detected} cannot be read from {unit_bits}-bit code units")]
    UnitWidthMismatch { detected: Encoding, unit_bits: u8 },
}

impl std::error::Error for EncodingError {}

/// An error encountered while tokenizing or parsing a YAML document.
///
/// Carries the source span and the line/column of its start.
#[derive(Debug, Clone, PartialEq)]
pub struct ParseError {
    /// The kind of error
    pub kind: ErrorKind,
    /// The span in the source where the error occurred
    pub span: Span,
    /// Line and column of the span start
    pub position: Position,
    /// Expected tokens/patterns (for diagnostic messages)
    pub expected: Vec<String>,
    /// What was actually found (for diagnostic messages)
    pub found: Option<String>,
}

/// The kind of parse error.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ErrorKind {
    /// Unexpected end of input
    UnexpectedEof,

    /// Unexpected character or token
    UnexpectedToken,

    /// A node is indented where its context does not allow it
    InvalidIndentation,

    /// Tab character in indentation (not allowed in YAML)
    TabInIndentation,

    /// Unterminated string literal with quote style
    UnterminatedQuotedString { double_quoted: bool },

    /// Invalid escape sequence in a double-quoted scalar
    InvalidEscape(char),

    /// Empty or malformed anchor/alias name
    InvalidAnchor,

    /// Malformed tag syntax
    InvalidTag,

    /// Invalid block scalar header with detail message
    InvalidBlockScalarDetail(String),

    /// Scalar text does not match the grammar of its resolved type
    ConversionFailed { target: ScalarType, text: String },

    /// A tag whose kind cannot describe the node it is attached to
    IncompatibleTag { tag: String, node: NodeType },

    /// Duplicate key with the key text
    DuplicateKeyNamed(String),

    /// Undefined alias with the alias name
    UndefinedAliasNamed(String),

    /// Duplicate anchor with names
    DuplicateAnchorNamed { first: String, second: String },

    /// Duplicate tag with names
    DuplicateTagNamed { first: String, second: String },

    /// Properties (anchor/tag) cannot be applied to alias
    PropertiesOnAlias,

    /// Duplicate directive with name
    DuplicateDirectiveNamed(String),

    /// Invalid directive with detail
    InvalidDirectiveDetail(String),

    /// Directives that are not followed by a `---` marker
    DirectivesWithoutDocument,

    /// Custom error message
    Custom(String),
}

impl ErrorKind {
    /// Get a suggestion for how to fix this error.
    ///
    /// Returns `Some(suggestion)` if a helpful fix suggestion is available,
    /// or `None` if no specific suggestion applies.
    #[must_use]
    pub fn suggestion(&self) -> Option<&'static str> {
        match self {
            Self::InvalidIndentation => {
                Some("YAML uses spaces for indentation; ensure consistent indentation levels")
            }
            Self::TabInIndentation => {
                Some("Replace tabs with spaces; YAML requires space-based indentation")
            }
            Self::UnterminatedQuotedString { .. } => {
                Some("Add the matching closing quote character")
            }
            Self::InvalidEscape(_) => Some(
                "Valid escape sequences: \\0 \\a \\b \\t \\n \\v \\f \\r \\e \\\" \\/ \\\\ \\N \\_ \\L \\P \\x## \\u#### \\U########",
            ),
            Self::DuplicateKeyNamed(_) => Some("Remove or rename one of the duplicate keys"),
            Self::UndefinedAliasNamed(_) => {
                Some("Define the anchor with &name before referencing it with *name")
            }
            Self::DuplicateAnchorNamed { .. } => {
                Some("A node can only have one anchor; remove the extra &anchor")
            }
            Self::DuplicateTagNamed { .. } => {
                Some("A node can only have one tag; remove the extra !tag")
            }
            Self::PropertiesOnAlias => Some(
                "Aliases (*name) cannot have anchors or tags; apply them to the original value",
            ),
            Self::InvalidBlockScalarDetail(_) => Some(
                "Block scalar header format: | or > followed by optional [1-9] indent and [-+] chomping",
            ),
            Self::DirectivesWithoutDocument => {
                Some("Start the document with '---' after its directives")
            }
            Self::UnexpectedEof
            | Self::UnexpectedToken
            | Self::InvalidAnchor
            | Self::InvalidTag
            | Self::ConversionFailed { .. }
            | Self::IncompatibleTag { .. }
            | Self::DuplicateDirectiveNamed(_)
            | Self::InvalidDirectiveDetail(_)
            | Self::Custom(_) => None,
        }
    }
}

impl ParseError {
    /// Create a new error with a kind, span and the position of the span start.
    #[must_use]
    pub const fn new(kind: ErrorKind, span: Span, position: Position) -> Self {
        Self {
            kind,
            span,
            position,
            expected: Vec::new(),
            found: None,
        }
    }

    /// Add expected tokens to the error.
    #[must_use]
    pub fn with_expected(mut self, expected: Vec<String>) -> Self {
        self.expected = expected;
        self
    }

    /// Add the found token to the error.
    #[must_use]
    pub fn with_found(mut self, found: String) -> Self {
        self.found = Some(found);
        self
    }

    /// Get a suggestion for how to fix this error.
    ///
    /// Delegates to [`ErrorKind::suggestion()`].
    #[must_use]
    pub fn suggestion(&self) -> Option<&'static str> {
        self.kind.suggestion()
    }

    fn write_message(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match &self.kind {
            ErrorKind::UnexpectedEof => write!(f, "unexpected end of input"),
            ErrorKind::UnexpectedToken => {
                if let Some(found) = &self.found {
                    write!(f, "unexpected token {found}")?;
                } else {
                    write!(f, "unexpected token")?;
                }
                if !self.expected.is_empty() {
                    write!(f, ", expected one of: {}", self.expected.join(", "))?;
                }
                Ok(())
            }
            ErrorKind::InvalidIndentation => write!(f, "invalid indentation"),
            ErrorKind::TabInIndentation => {
                write!(f, "tab character in indentation (use spaces)")
            }
            ErrorKind::UnterminatedQuotedString { double_quoted } => {
                let quote = if *double_quoted { '"' } else { '\'' };
                write!(f, "unterminated string literal, missing closing {quote}")
            }
            ErrorKind::InvalidEscape(ch) => write!(f, "invalid escape sequence '\\{ch}'"),
            ErrorKind::InvalidAnchor => write!(f, "invalid anchor name"),
            ErrorKind::InvalidTag => write!(f, "invalid tag"),
            ErrorKind::InvalidBlockScalarDetail(detail) => {
                write!(f, "invalid block scalar header: {detail}")
            }
            ErrorKind::ConversionFailed { target, text } => {
                write!(f, "cannot convert '{text}' to {target}")
            }
            ErrorKind::IncompatibleTag { tag, node } => {
                write!(f, "tag '{tag}' cannot be applied to a {node} node")
            }
            ErrorKind::DuplicateKeyNamed(key) => {
                write!(f, "duplicate key '{key}' in mapping")
            }
            ErrorKind::UndefinedAliasNamed(name) => {
                write!(f, "undefined alias '*{name}': anchor '&{name}' not defined")
            }
            ErrorKind::DuplicateAnchorNamed { first, second } => {
                write!(
                    f,
                    "duplicate anchor: node already has anchor '&{first}', cannot add '&{second}'"
                )
            }
            ErrorKind::DuplicateTagNamed { first, second } => {
                write!(
                    f,
                    "duplicate tag: node already has tag '{first}', cannot add '{second}'"
                )
            }
            ErrorKind::PropertiesOnAlias => write!(f, "anchor/tag cannot be applied to alias"),
            ErrorKind::DuplicateDirectiveNamed(name) => {
                write!(f, "duplicate %{name} directive")
            }
            ErrorKind::InvalidDirectiveDetail(detail) => {
                write!(f, "invalid directive: {detail}")
            }
            ErrorKind::DirectivesWithoutDocument => {
                write!(f, "directives must be followed by a document start marker")
            }
            ErrorKind::Custom(msg) => write!(f, "{msg}"),
        }
    }
}

impl std::fmt::Display for ParseError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        self.write_message(f)?;
        write!(f, " (at {})", self.position)
    }
}

impl std::error::Error for ParseError {}
