// Copyright (c) 2026 Arista Networks, Inc.
// Use of this source code is governed by the Apache License 2.0
// that can be found in the LICENSE file.

//! A YAML 1.2 document engine.
//!
//! This crate converts YAML text into value trees and back:
//! - Detects UTF-8, UTF-16 and UTF-32 input, with or without a byte order mark
//! - Resolves untagged plain scalars with the core schema
//! - Expands tag shorthands against `%TAG` directives
//! - Keeps anchors, aliases and tags as node properties
//! - Serializes trees back to YAML that parses to the same values
//!
//! # Example
//!
//! ```
//! use yaml_engine::{deserialize, serialize};
//!
//! let input = r#"
//! name: demo
//! ports: [80, 443]
//! "#;
//!
//! let root = deserialize(input)?;
//! assert_eq!(root.at("name")?.as_str()?, "demo");
//! assert_eq!(root.at("ports")?.at_index(1)?.as_int()?, 443);
//!
//! assert_eq!(serialize(&root), "name: demo\nports:\n  - 80\n  - 443\n");
//! # Ok::<(), yaml_engine::Error>(())
//! ```

mod config;
mod directive;
mod error;
mod escape;
mod input;
mod lexer;
mod parser;
mod rich_token;
mod scalar;
mod scanner;
mod serializer;
mod span;
mod tag;
mod token;
mod uri;
mod value;

#[cfg(test)]
mod tests;

use std::borrow::Cow;
use std::io;

pub use config::Configuration;
pub use directive::{Directive, Directives, YamlVersion};
pub use error::{EncodingError, Error, ErrorKind, ParseError, Result};
pub use escape::escape;
pub use input::{
    Detection, Encoding, Transcoder, detect_bytes, detect_encoding, detect_utf16, detect_utf32,
};
pub use lexer::{Lexer, tokenize};
pub use parser::{Deserializer, Documents};
pub use rich_token::RichToken;
pub use scalar::{BlockHeader, Chomping, ScalarStyle, parse_block, parse_flow};
pub use scanner::{ScalarType, scan};
pub use serializer::Serializer;
pub use span::{Position, SourceMap, Span, Spanned};
pub use tag::{TagKind, kind_of_normalized, normalize as normalize_tag, resolve as resolve_tag};
pub use token::Token;
pub use uri::is_valid_uri;
pub use value::{Node, NodeType, Value};

/// Parse the first document of `input`.
///
/// Scalars borrow from `input` where no unescaping or folding was needed.
///
/// # Errors
///
/// Returns the first error met while parsing the document.
pub fn deserialize(input: &str) -> Result<Node<'_>> {
    Deserializer::new(None).deserialize(input)
}

/// Parse every document of `input`.
///
/// # Errors
///
/// Returns the first error met in any document.
pub fn deserialize_docs(input: &str) -> Result<Vec<Node<'_>>> {
    Deserializer::new(None).deserialize_docs(input)
}

/// Iterate over the documents of `input`, parsing each on demand.
#[must_use]
pub fn documents(input: &str) -> Documents<'_> {
    Deserializer::new(None).documents(input)
}

/// Parse the first document of a byte input in any supported encoding.
///
/// UTF-8 input is parsed in place; other encodings are transcoded first.
///
/// # Errors
///
/// Fails on malformed encodings and on parse errors.
pub fn from_slice(bytes: &[u8]) -> Result<Node<'_>> {
    match input::decode_bytes(bytes)?.1 {
        Cow::Borrowed(text) => deserialize(text),
        Cow::Owned(text) => deserialize(&text).map(Node::into_owned),
    }
}

/// Parse every document of a byte input in any supported encoding.
///
/// # Errors
///
/// Fails on malformed encodings and on parse errors.
pub fn from_slice_docs(bytes: &[u8]) -> Result<Vec<Node<'_>>> {
    match input::decode_bytes(bytes)?.1 {
        Cow::Borrowed(text) => deserialize_docs(text),
        Cow::Owned(text) => deserialize_docs(&text).map(into_owned_docs),
    }
}

/// Parse the first document of UTF-16 code units.
///
/// # Errors
///
/// Fails on malformed encodings and on parse errors.
pub fn from_utf16(units: &[u16]) -> Result<Node<'static>> {
    let (_, text) = input::decode_utf16(units)?;
    deserialize(&text).map(Node::into_owned)
}

/// Parse every document of UTF-16 code units.
///
/// # Errors
///
/// Fails on malformed encodings and on parse errors.
pub fn from_utf16_docs(units: &[u16]) -> Result<Vec<Node<'static>>> {
    let (_, text) = input::decode_utf16(units)?;
    deserialize_docs(&text).map(into_owned_docs)
}

/// Parse the first document of UTF-32 code units.
///
/// # Errors
///
/// Fails on malformed encodings and on parse errors.
pub fn from_utf32(units: &[u32]) -> Result<Node<'static>> {
    let (_, text) = input::decode_utf32(units)?;
    deserialize(&text).map(Node::into_owned)
}

/// Parse every document of UTF-32 code units.
///
/// # Errors
///
/// Fails on malformed encodings and on parse errors.
pub fn from_utf32_docs(units: &[u32]) -> Result<Vec<Node<'static>>> {
    let (_, text) = input::decode_utf32(units)?;
    deserialize_docs(&text).map(into_owned_docs)
}

/// Read a whole stream and parse its first document.
///
/// # Errors
///
/// Fails on I/O errors, malformed encodings and parse errors.
pub fn from_reader(reader: impl io::Read) -> Result<Node<'static>> {
    let (_, text) = input::read_to_string(reader)?;
    deserialize(&text).map(Node::into_owned)
}

/// Read a whole stream and parse every document.
///
/// # Errors
///
/// Fails on I/O errors, malformed encodings and parse errors.
pub fn from_reader_docs(reader: impl io::Read) -> Result<Vec<Node<'static>>> {
    let (_, text) = input::read_to_string(reader)?;
    deserialize_docs(&text).map(into_owned_docs)
}

fn into_owned_docs(docs: Vec<Node<'_>>) -> Vec<Node<'static>> {
    docs.into_iter().map(Node::into_owned).collect()
}

/// Serialize one document to YAML text.
#[must_use]
pub fn serialize(root: &Node<'_>) -> String {
    Serializer::new(None).serialize(root)
}

/// Serialize several documents, separated by `...` lines.
#[must_use]
pub fn serialize_docs(docs: &[Node<'_>]) -> String {
    Serializer::new(None).serialize_docs(docs)
}

/// Serialize one document into `writer`.
///
/// # Errors
///
/// Returns [`Error::Io`] if writing fails.
pub fn to_writer(writer: impl io::Write, root: &Node<'_>) -> Result<()> {
    Serializer::new(None).to_writer(writer, root)
}
