// Copyright (c) 2026 Arista Networks, Inc.
// Use of this source code is governed by the Apache License 2.0
// that can be found in the LICENSE file.

//! YAML serializer.
//!
//! Writes value trees back to YAML text in block style. Strings are written
//! plain when reading them back yields the same string, and double-quoted
//! otherwise; empty collections are written in flow style.

use std::collections::HashSet;
use std::io;

use crate::config::Configuration;
use crate::directive::Directives;
use crate::error::Result;
use crate::escape;
use crate::lexer;
use crate::scalar::ScalarStyle;
use crate::scanner::{self, ScalarType};
use crate::token::Token;
use crate::value::{Node, Value};

const INDENT_WIDTH: usize = 2;

/// Whether `text` reads back as the same plain string scalar.
fn is_plain_safe(text: &str) -> bool {
    if escape::needs_escape(text) || scanner::scan(text) != ScalarType::String {
        return false;
    }
    let Ok(tokens) = lexer::tokenize(text) else {
        return false;
    };
    matches!(
        tokens.as_slice(),
        [first, last] if last.token == Token::StreamEnd
            && matches!(
                first.token,
                Token::Scalar { style: ScalarStyle::Plain, text: lexed } if lexed == text
            )
    )
}

/// Text of a float that reads back as the same float.
fn float_text(value: f64) -> String {
    if value.is_nan() {
        return ".nan".to_owned();
    }
    if value.is_infinite() {
        return if value.is_sign_positive() { ".inf" } else { "-.inf" }.to_owned();
    }
    let mut text = format!("{value:?}");
    if !text.contains(['.', 'e', 'E']) {
        text.push_str(".0");
    }
    text
}

/// Whether a node is written on the line of its parent indicator.
fn is_inline(node: &Node<'_>) -> bool {
    node.is_alias()
        || match &node.value {
            Value::Sequence(items) => items.is_empty(),
            Value::Mapping(entries) => entries.is_empty(),
            _ => true,
        }
}

/// Serializer state for one document.
struct Emitter<'config> {
    config: &'config Configuration,
    buf: String,
    /// Anchors written so far in the current document.
    anchors: HashSet<String>,
}

impl<'config> Emitter<'config> {
    fn new(config: &'config Configuration) -> Self {
        Self {
            config,
            buf: String::new(),
            anchors: HashSet::new(),
        }
    }

    fn indent(&mut self, width: usize) {
        self.buf.extend(std::iter::repeat_n(' ', width));
    }

    /// Write `%YAML`/`%TAG` lines and `---`; returns whether anything was written.
    fn write_header(&mut self, root: &Node<'_>) -> bool {
        let directives = root.directives().filter(|directives| !directives.is_default());
        let root_properties = !is_inline(root) && (root.has_anchor() || root.has_tag());
        if directives.is_none() && !root_properties && !self.config.explicit_document_start {
            return false;
        }
        if let Some(directives) = directives {
            self.write_directives(directives);
        }
        self.buf.push_str("---");
        true
    }

    fn write_directives(&mut self, directives: &Directives) {
        if directives.is_version_specified() {
            self.buf.push_str(&format!("%YAML {}\n", directives.version()));
        }
        if let Some(prefix) = directives.declared_primary_prefix() {
            self.buf.push_str(&format!("%TAG ! {prefix}\n"));
        }
        if let Some(prefix) = directives.declared_secondary_prefix() {
            self.buf.push_str(&format!("%TAG !! {prefix}\n"));
        }
        for (handle, prefix) in directives.named_handles() {
            self.buf.push_str(&format!("%TAG {handle} {prefix}\n"));
        }
    }

    fn write_document(&mut self, root: &Node<'_>) {
        self.anchors.clear();
        let header = self.write_header(root);
        if is_inline(root) {
            if header {
                self.buf.push(' ');
            }
            self.write_inline(root);
            if root.value.is_collection() {
                self.buf.push('\n');
            }
        } else {
            if header {
                self.write_properties(root, true);
                self.buf.push('\n');
            }
            self.write_collection(root, 0);
        }
    }

    /// Write ` &anchor !tag` (leading space) or `&anchor !tag ` (trailing space).
    fn write_properties(&mut self, node: &Node<'_>, leading_space: bool) {
        if node.is_alias() {
            return;
        }
        let properties = node
            .anchor_name()
            .map(|anchor| format!("&{anchor}"))
            .into_iter()
            .chain(node.tag_name().map(ToOwned::to_owned));
        for property in properties {
            if leading_space {
                self.buf.push(' ');
                self.buf.push_str(&property);
            } else {
                self.buf.push_str(&property);
                self.buf.push(' ');
            }
        }
        if let Some(anchor) = node.anchor_name() {
            self.anchors.insert(anchor.to_owned());
        }
    }

    /// Write an alias, scalar or empty collection with its properties.
    fn write_inline(&mut self, node: &Node<'_>) {
        if node.is_alias() {
            let name = node.anchor_name().unwrap_or_default();
            if !self.anchors.contains(name) {
                log::warn!("Alias '*{name}' refers to an anchor not written before it");
            }
            self.buf.push('*');
            self.buf.push_str(name);
            return;
        }
        self.write_properties(node, false);
        match &node.value {
            Value::Null => self.buf.push_str("null"),
            Value::Bool(value) => self.buf.push_str(if *value { "true" } else { "false" }),
            Value::Int(value) => self.buf.push_str(&value.to_string()),
            Value::Float(value) => self.buf.push_str(&float_text(*value)),
            Value::String(text) => self.write_string(text),
            Value::Sequence(_) => self.buf.push_str("[]"),
            Value::Mapping(_) => self.buf.push_str("{}"),
        }
    }

    fn write_string(&mut self, text: &str) {
        if is_plain_safe(text) {
            self.buf.push_str(text);
        } else {
            self.buf.push('"');
            self.buf.push_str(&escape::escape(text));
            self.buf.push('"');
        }
    }

    /// Write a non-empty collection whose entries start at column `indent`.
    fn write_collection(&mut self, node: &Node<'_>, indent: usize) {
        match &node.value {
            Value::Sequence(items) => {
                for item in items {
                    self.indent(indent);
                    self.buf.push('-');
                    self.write_nested(item, indent);
                }
            }
            Value::Mapping(entries) => {
                for (key, value) in entries {
                    self.indent(indent);
                    self.write_key(key, indent);
                    self.write_nested(value, indent);
                }
            }
            _ => {
                self.write_inline(node);
                self.buf.push('\n');
            }
        }
    }

    /// Write a node after an indicator (`-`, `?`, `:` or a key) at column `indent`.
    fn write_nested(&mut self, node: &Node<'_>, indent: usize) {
        if is_inline(node) {
            self.buf.push(' ');
            self.write_inline(node);
            self.buf.push('\n');
        } else {
            self.write_properties(node, true);
            self.buf.push('\n');
            self.write_collection(node, indent + INDENT_WIDTH);
        }
    }

    fn write_key(&mut self, key: &Node<'_>, indent: usize) {
        if key.is_alias() {
            self.write_inline(key);
            self.buf.push_str(" :");
        } else if key.value.is_collection() {
            self.buf.push('?');
            self.write_nested(key, indent);
            self.indent(indent);
            self.buf.push(':');
        } else {
            self.write_inline(key);
            self.buf.push(':');
        }
    }
}

/// Writes value trees as YAML text.
#[derive(Debug, Clone, Default)]
pub struct Serializer {
    config: Configuration,
}

impl Serializer {
    /// Create a serializer; `None` uses the default [`Configuration`].
    #[must_use]
    pub fn new(config: Option<&Configuration>) -> Self {
        Self {
            config: config.cloned().unwrap_or_default(),
        }
    }

    /// Serialize one document.
    ///
    /// The directive header is written only when the document's directives
    /// differ from the defaults, the root collection carries properties, or
    /// [`Configuration::explicit_document_start`] is set.
    #[must_use]
    pub fn serialize(&self, root: &Node<'_>) -> String {
        let mut emitter = Emitter::new(&self.config);
        emitter.write_document(root);
        emitter.buf
    }

    /// Serialize several documents, separated by `...` lines.
    #[must_use]
    pub fn serialize_docs(&self, docs: &[Node<'_>]) -> String {
        let mut emitter = Emitter::new(&self.config);
        for (index, doc) in docs.iter().enumerate() {
            if index > 0 {
                if !emitter.buf.ends_with('\n') {
                    emitter.buf.push('\n');
                }
                emitter.buf.push_str("...\n");
            }
            emitter.write_document(doc);
        }
        emitter.buf
    }

    /// Serialize one document into `writer`.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Io`](crate::Error::Io) if writing fails.
    pub fn to_writer(&self, mut writer: impl io::Write, root: &Node<'_>) -> Result<()> {
        writer.write_all(self.serialize(root).as_bytes())?;
        writer.flush()?;
        Ok(())
    }
}

#[cfg(test)]
#[allow(
    clippy::indexing_slicing,
    reason = "Tests benefit from direct indexing for readability"
)]
mod tests {
    use super::*;
    use crate::parser::Deserializer;

    fn serialize(node: &Node<'_>) -> String {
        Serializer::new(None).serialize(node)
    }

    fn round_trip(input: &str) -> String {
        let root = Deserializer::new(None).deserialize(input).unwrap();
        serialize(&root)
    }

    #[test]
    fn test_root_scalars() {
        let test_cases = [
            (Node::null(), "null"),
            (Node::from(true), "true"),
            (Node::from(Value::Int(-42)), "-42"),
            (Node::from(1.5), "1.5"),
            (Node::from("plain text"), "plain text"),
            (Node::sequence(Vec::new()), "[]\n"),
            (Node::mapping(Vec::new()), "{}\n"),
        ];
        for (node, expected) in test_cases {
            assert_eq!(serialize(&node), expected);
        }
    }

    #[test]
    fn test_float_text() {
        let test_cases = [
            (1.0, "1.0"),
            (-0.25, "-0.25"),
            (1e300, "1e300"),
            (f64::INFINITY, ".inf"),
            (f64::NEG_INFINITY, "-.inf"),
            (f64::NAN, ".nan"),
        ];
        for (value, expected) in test_cases {
            assert_eq!(float_text(value), expected);
        }
    }

    #[test]
    fn test_string_quoting() {
        let test_cases = [
            ("hello world", "hello world"),
            ("it's", "it's"),
            ("a:b", "a:b"),
            ("", "\"\""),
            ("true", "\"true\""),
            ("null", "\"null\""),
            ("123", "\"123\""),
            ("1.5", "\"1.5\""),
            ("- item", "\"- item\""),
            ("key: value", "\"key: value\""),
            ("a # b", "\"a # b\""),
            (" padded", "\" padded\""),
            ("trailing:", "\"trailing:\""),
            ("&anchor", "\"&anchor\""),
            ("*alias", "\"*alias\""),
            ("!tag", "\"!tag\""),
            ("[flow", "\"[flow\""),
            ("%directive", "\"%directive\""),
            ("---", "\"---\""),
            ("line\nbreak", "\"line\\nbreak\""),
            ("tab\there", "\"tab\\there\""),
            ("say \"hi\"", "\"say \\\"hi\\\"\""),
        ];
        for (text, expected) in test_cases {
            assert_eq!(serialize(&Node::from(text)), expected, "text {text:?}");
        }
    }

    #[test]
    fn test_non_printable_characters_are_escaped() {
        let test_cases = [
            ("a\u{80}b", "\"a\\x80b\""),
            ("a\u{FEFF}b", "\"a\\uFEFFb\""),
            ("\u{FFFE}", "\"\\uFFFE\""),
        ];
        for (text, expected) in test_cases {
            let output = serialize(&Node::from(text));
            assert_eq!(output, expected, "text {text:?}");
            let root = Deserializer::new(None).deserialize(&output).unwrap();
            assert_eq!(root.as_str().unwrap(), text);
        }
    }

    #[test]
    fn test_block_collections() {
        let input = "name: demo\nitems:\n  - 1\n  - two\n  - nested: true\n    other: null\nempty: []\n";
        let expected = "name: demo\nitems:\n  - 1\n  - two\n  -\n    nested: true\n    other: null\nempty: []\n";
        assert_eq!(round_trip(input), expected);
    }

    #[test]
    fn test_collection_keys() {
        let output = round_trip("[a, b]: 1\n");
        assert_eq!(output, "?\n  - a\n  - b\n: 1\n");
    }

    #[test]
    fn test_properties_and_aliases() {
        let output = round_trip("base: &b\n  x: 1\ncopy: *b\nscalar: &s !!str 5\n*s : key\n");
        assert_eq!(
            output,
            "base: &b\n  x: 1\ncopy: *b\nscalar: &s !!str \"5\"\n*s : key\n"
        );
    }

    #[test]
    fn test_root_properties_use_document_start() {
        let output = round_trip("--- &root !!map\na: 1\n");
        assert_eq!(output, "--- &root !!map\na: 1\n");
        let output = round_trip("&x value");
        assert_eq!(output, "&x value");
    }

    #[test]
    fn test_directive_header() {
        let output = round_trip("%YAML 1.2\n%TAG !e! tag:example.com,2000:\n---\n!e!foo bar\n");
        assert_eq!(
            output,
            "%YAML 1.2\n%TAG !e! tag:example.com,2000:\n--- !e!foo bar"
        );
    }

    #[test]
    fn test_explicit_document_start() {
        let config = Configuration {
            explicit_document_start: true,
            ..Configuration::default()
        };
        let root = Node::mapping(vec![(Node::from("a"), Node::from(Value::Int(1)))]);
        assert_eq!(Serializer::new(Some(&config)).serialize(&root), "---\na: 1\n");
    }

    #[test]
    fn test_serialize_docs() {
        let docs = Deserializer::new(None)
            .deserialize_docs("a: 1\n---\n- x\n---\nscalar\n")
            .unwrap();
        assert_eq!(
            Serializer::new(None).serialize_docs(&docs),
            "a: 1\n...\n- x\n...\nscalar"
        );
    }

    #[test]
    fn test_to_writer() {
        let mut out = Vec::new();
        Serializer::new(None)
            .to_writer(&mut out, &Node::sequence(vec![Node::from("a")]))
            .unwrap();
        assert_eq!(out, b"- a\n");
    }
}
