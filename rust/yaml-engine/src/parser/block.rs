// Copyright (c) 2026 Arista Networks, Inc.
// Use of this source code is governed by the Apache License 2.0
// that can be found in the LICENSE file.

//! Block collections and block nodes.
//!
//! Indentation is tracked as the column of the collection's first entry.
//! A node belongs to its parent when it is indented deeper than the parent;
//! the one exception is a block sequence used as a mapping value, which may
//! sit at the same column as the key.

use crate::error::{ErrorKind, Result};
use crate::rich_token::RichToken;
use crate::token::Token;
use crate::value::{Node, Value};

use super::{NodeContext, NodeProperties, Parser};

const fn is_deeper(column: usize, parent: Option<usize>) -> bool {
    match parent {
        Some(parent) => column > parent,
        None => true,
    }
}

impl<'input> Parser<'input> {
    /// Whether `token` starts on the line where the last consumed token ended.
    fn on_last_line(&self, token: &RichToken<'_>) -> bool {
        self.last_end > 0 && self.lexer.position(self.last_end - 1).line == token.line()
    }

    /// Error for a token that appears deeper than any open collection allows.
    fn misplaced(&self, token: &RichToken<'_>) -> crate::error::Error {
        if self.on_last_line(token) {
            self.unexpected(token, &["a line break"])
        } else {
            self.error(ErrorKind::InvalidIndentation, token)
        }
    }

    /// Collect anchor and tag tokens that belong to a node below `parent`.
    fn collect_properties(
        &mut self,
        props: &mut NodeProperties<'input>,
        parent: Option<usize>,
    ) -> Result<()> {
        loop {
            let token = self.peek()?;
            if !matches!(token.token, Token::Anchor(_) | Token::Tag(_))
                || !is_deeper(token.column(), parent)
            {
                return Ok(());
            }
            self.advance()?;
            props
                .add(&token)
                .map_err(|kind| self.error(kind, &token))?;
        }
    }

    /// Parse a block node whose parent collection sits at column `parent`.
    ///
    /// Returns an empty node when nothing indented deeper than the parent
    /// follows.
    pub(super) fn parse_block_node(
        &mut self,
        parent: Option<usize>,
        ctx: NodeContext,
    ) -> Result<Node<'input>> {
        let mut props = NodeProperties::default();
        self.collect_properties(&mut props, parent)?;

        let token = self.peek()?;
        let value_line = match ctx {
            NodeContext::Value { line } => Some(line),
            NodeContext::Root | NodeContext::Compact => None,
        };
        let is_content = match token.token {
            _ if token.token.ends_document() => false,
            Token::SequenceEntry if value_line.is_some() => parent
                .is_none_or(|parent| token.column() >= parent),
            _ => is_deeper(token.column(), parent),
        };
        if !is_content {
            return self.empty_node(props, &token);
        }

        match token.token {
            Token::SequenceEntry | Token::ExplicitKey | Token::KeySeparator => {
                if value_line == Some(token.line()) || props.line() == Some(token.line()) {
                    return Err(self.unexpected(&token, &["a scalar", "a flow collection"]));
                }
                let node = if token.token == Token::SequenceEntry {
                    self.parse_block_sequence(token.column())?
                } else {
                    self.parse_block_mapping(token.column(), None)?
                };
                self.finish_node(props, node)
            }
            Token::BlockScalar {
                style,
                header,
                text,
            } => {
                self.advance()?;
                self.block_scalar_node(props, &token, style, header, text)
            }
            _ => self.parse_inline_or_mapping(value_line, props),
        }
    }

    /// Parse a scalar, alias or flow collection, or the block mapping it is
    /// the first key of.
    ///
    /// Properties on the key's line belong to the key; properties on earlier
    /// lines belong to the mapping.
    fn parse_inline_or_mapping(
        &mut self,
        value_line: Option<usize>,
        props: NodeProperties<'input>,
    ) -> Result<Node<'input>> {
        let token = self.peek()?;
        let key_line_props = props.line() == Some(token.line());
        let indent = if key_line_props {
            props.column().unwrap_or(token.column())
        } else {
            token.column()
        };
        let (key_props, mapping_props) = if key_line_props {
            (props, NodeProperties::default())
        } else {
            (NodeProperties::default(), props)
        };

        let key = match token.token {
            Token::Scalar { .. } | Token::Alias(_) => {
                let next = self.peek_nth(1)?;
                if next.token != Token::KeySeparator || next.line() != token.line() {
                    return self.parse_flow_node(props);
                }
                self.parse_flow_node(key_props)?
            }
            Token::FlowSequenceStart | Token::FlowMappingStart => {
                let node = self.parse_flow_node(NodeProperties::default())?;
                let next = self.peek()?;
                if next.token != Token::KeySeparator || next.line() != token.line() {
                    return self.finish_node(props, node);
                }
                self.finish_node(key_props, node)?
            }
            _ => return Err(self.unexpected(&token, &["a scalar", "a flow collection"])),
        };

        if value_line == Some(token.line()) {
            let separator = self.peek()?;
            return Err(self.unexpected(&separator, &["a line break"]));
        }
        let mapping = self.parse_block_mapping(indent, Some(key))?;
        self.finish_node(mapping_props, mapping)
    }

    /// Parse a block mapping at column `indent`.
    ///
    /// When `first_key` is given it has been parsed already and the next
    /// token is its `:`.
    pub(super) fn parse_block_mapping(
        &mut self,
        indent: usize,
        first_key: Option<Node<'input>>,
    ) -> Result<Node<'input>> {
        let start = match &first_key {
            Some(key) => key.span.start,
            None => self.peek()?.span.start,
        };
        log::trace!("Block mapping at column {indent}");
        let mut entries = Vec::new();
        if let Some(key) = first_key {
            let value = self.parse_implicit_value(indent)?;
            self.insert_entry(&mut entries, key, value)?;
        }

        loop {
            let token = self.peek()?;
            if token.token.ends_document() || token.column() < indent {
                break;
            }
            if token.column() > indent || self.on_last_line(&token) {
                return Err(self.misplaced(&token));
            }
            let (key, value) = match token.token {
                Token::ExplicitKey => {
                    self.advance()?;
                    let key = self.parse_block_node(Some(indent), NodeContext::Compact)?;
                    let next = self.peek()?;
                    let value = if next.token == Token::KeySeparator && next.column() == indent {
                        self.advance()?;
                        self.parse_block_node(Some(indent), NodeContext::Compact)?
                    } else {
                        self.empty_node(NodeProperties::default(), &next)?
                    };
                    (key, value)
                }
                Token::KeySeparator => {
                    let key = self.empty_node(NodeProperties::default(), &token)?;
                    self.advance()?;
                    let value = self.parse_block_node(Some(indent), NodeContext::Compact)?;
                    (key, value)
                }
                Token::SequenceEntry => {
                    return Err(self.unexpected(&token, &["a mapping key"]));
                }
                _ => {
                    let key = self.parse_implicit_key()?;
                    let value = self.parse_implicit_value(indent)?;
                    (key, value)
                }
            };
            self.insert_entry(&mut entries, key, value)?;
        }

        Ok(Node::new(Value::Mapping(entries), self.span_from(start)))
    }

    /// Parse a single-line key followed by `:` on the same line.
    fn parse_implicit_key(&mut self) -> Result<Node<'input>> {
        let token = self.peek()?;
        let key = self.parse_flow_node(NodeProperties::default())?;
        let next = self.peek()?;
        if next.token != Token::KeySeparator || next.line() != token.line() {
            return Err(self.unexpected(&next, &["':'"]));
        }
        Ok(key)
    }

    /// Consume the `:` of an implicit key and parse its value.
    fn parse_implicit_value(&mut self, indent: usize) -> Result<Node<'input>> {
        let separator = self.advance()?;
        self.parse_block_node(
            Some(indent),
            NodeContext::Value {
                line: separator.line(),
            },
        )
    }

    /// Parse a block sequence whose `-` indicators sit at column `indent`.
    pub(super) fn parse_block_sequence(&mut self, indent: usize) -> Result<Node<'input>> {
        let start = self.peek()?.span.start;
        log::trace!("Block sequence at column {indent}");
        let mut items = Vec::new();
        loop {
            let token = self.peek()?;
            match token.token {
                _ if token.token.ends_document() || token.column() < indent => break,
                Token::SequenceEntry if token.column() == indent => {
                    self.advance()?;
                    items.push(self.parse_block_node(Some(indent), NodeContext::Compact)?);
                }
                // The key of a mapping this sequence is a value of.
                _ if token.column() == indent && !self.on_last_line(&token) => break,
                _ => return Err(self.misplaced(&token)),
            }
        }
        Ok(Node::new(Value::Sequence(items), self.span_from(start)))
    }
}

#[cfg(test)]
#[allow(
    clippy::indexing_slicing,
    reason = "Tests benefit from direct indexing for readability"
)]
mod tests {
    use crate::config::Configuration;
    use crate::error::{Error, ErrorKind, Result};
    use crate::parser::Deserializer;
    use crate::value::{Node, Value};

    fn parse(input: &str) -> Result<Node<'_>> {
        Deserializer::new(None).deserialize(input)
    }

    fn parse_error_kind(input: &str) -> ErrorKind {
        match parse(input) {
            Err(Error::Parse(error)) => error.kind,
            other => panic!("expected a parse error for {input:?}, got {other:?}"),
        }
    }

    fn str_node(text: &str) -> Node<'_> {
        Node::from(text)
    }

    #[test]
    fn test_parse_simple_mapping() {
        let root = parse("name: demo\ncount: 3\nratio: 0.5\nenabled: true\nnothing: ~\n").unwrap();
        assert_eq!(root.len().unwrap(), 5);
        assert_eq!(root.at("name").unwrap().as_str().unwrap(), "demo");
        assert_eq!(root.at("count").unwrap().as_int().unwrap(), 3);
        assert!((root.at("ratio").unwrap().as_float().unwrap() - 0.5).abs() < f64::EPSILON);
        assert!(root.at("enabled").unwrap().as_bool().unwrap());
        assert!(root.at("nothing").unwrap().is_null());
    }

    #[test]
    fn test_parse_nested_structures() {
        let input = "\
servers:
  - name: alpha
    ports:
      - 80
      - 443
  - name: beta
    ports: []
settings:
  debug: false
";
        let root = parse(input).unwrap();
        let servers = root.at("servers").unwrap();
        assert_eq!(servers.len().unwrap(), 2);
        let alpha = servers.at_index(0).unwrap();
        assert_eq!(alpha.at("name").unwrap().as_str().unwrap(), "alpha");
        let ports = alpha.at("ports").unwrap().as_sequence().unwrap();
        assert_eq!(ports.len(), 2);
        assert_eq!(ports[1].as_int().unwrap(), 443);
        assert!(servers.at_index(1).unwrap().at("ports").unwrap().is_empty().unwrap());
        assert!(!root.at("settings").unwrap().at("debug").unwrap().as_bool().unwrap());
    }

    #[test]
    fn test_sequence_at_key_indentation() {
        let root = parse("items:\n- a\n- b\nnext: c\n").unwrap();
        let items = root.at("items").unwrap().as_sequence().unwrap();
        assert_eq!(items, [str_node("a"), str_node("b")]);
        assert_eq!(root.at("next").unwrap().as_str().unwrap(), "c");
    }

    #[test]
    fn test_nested_compact_sequences() {
        let root = parse("- - a\n  - b\n- c\n").unwrap();
        let items = root.as_sequence().unwrap();
        assert_eq!(items[0].as_sequence().unwrap(), [str_node("a"), str_node("b")]);
        assert_eq!(items[1].as_str().unwrap(), "c");
    }

    #[test]
    fn test_empty_values() {
        let root = parse("a:\nb: !!str\nc: !!seq\nd: !!map\n").unwrap();
        assert!(root.at("a").unwrap().is_null());
        assert_eq!(root.at("b").unwrap().as_str().unwrap(), "");
        assert!(root.at("c").unwrap().as_sequence().unwrap().is_empty());
        assert!(root.at("d").unwrap().as_mapping().unwrap().is_empty());

        let root = parse("- \n-\n").unwrap();
        assert!(root.as_sequence().unwrap().iter().all(Node::is_null));
    }

    #[test]
    fn test_explicit_keys() {
        let root = parse("? a\n: 1\n? b\n? - x\n  - y\n: seq\n").unwrap();
        let entries = root.as_mapping().unwrap();
        assert_eq!(entries.len(), 3);
        assert_eq!(entries[0], (str_node("a"), Node::from(Value::Int(1))));
        assert!(entries[1].1.is_null());
        assert!(entries[2].0.is_sequence());
        assert_eq!(entries[2].1.as_str().unwrap(), "seq");
    }

    #[test]
    fn test_empty_key() {
        let root = parse(": value\n").unwrap();
        let entries = root.as_mapping().unwrap();
        assert!(entries[0].0.is_null());
        assert_eq!(entries[0].1.as_str().unwrap(), "value");
    }

    #[test]
    fn test_flow_collection_as_key() {
        let root = parse("[a, b]: pair\n{x: 1}: map\n").unwrap();
        let entries = root.as_mapping().unwrap();
        assert!(entries[0].0.is_sequence());
        assert!(entries[1].0.is_mapping());
        assert_eq!(entries[1].1.as_str().unwrap(), "map");
    }

    #[test]
    fn test_property_placement() {
        let root = parse("&key a: 1\n").unwrap();
        assert!(root.anchor_name().is_none());
        assert_eq!(root.as_mapping().unwrap()[0].0.anchor_name(), Some("key"));

        let root = parse("--- &map !!map\na: 1\n").unwrap();
        assert_eq!(root.anchor_name(), Some("map"));
        assert_eq!(root.tag_name(), Some("!!map"));

        let root = parse("list: &items\n  - a\n").unwrap();
        assert_eq!(root.at("list").unwrap().anchor_name(), Some("items"));
    }

    #[test]
    fn test_anchors_and_aliases() {
        let root = parse("base: &b\n  x: 1\ncopy: *b\n*b : key\n").unwrap();
        let copy = root.at("copy").unwrap();
        assert!(copy.is_alias());
        assert_eq!(copy.anchor_name(), Some("b"));
        assert_eq!(copy.at("x").unwrap().as_int().unwrap(), 1);
        let entries = root.as_mapping().unwrap();
        assert!(entries[2].0.is_alias());
        assert_eq!(entries[2].1.as_str().unwrap(), "key");
    }

    #[test]
    fn test_anchor_redefinition_uses_latest() {
        let root = parse("- &a 1\n- *a\n- &a 2\n- *a\n").unwrap();
        let items = root.as_sequence().unwrap();
        assert_eq!(items[1].as_int().unwrap(), 1);
        assert_eq!(items[3].as_int().unwrap(), 2);
    }

    #[test]
    fn test_block_scalars_in_collections() {
        let input = "text: |\n  line one\n  line two\nfolded: >-\n  a\n  b\nlist:\n- |+\n  keep\n\n";
        let root = parse(input).unwrap();
        assert_eq!(root.at("text").unwrap().as_str().unwrap(), "line one\nline two\n");
        assert_eq!(root.at("folded").unwrap().as_str().unwrap(), "a b");
        let list = root.at("list").unwrap().as_sequence().unwrap();
        assert_eq!(list[0].as_str().unwrap(), "keep\n\n");
    }

    #[test]
    fn test_tagged_scalars() {
        let root = parse("a: !!str 42\nb: !!int \"7\"\nc: !custom value\n").unwrap();
        assert_eq!(root.at("a").unwrap().as_str().unwrap(), "42");
        assert_eq!(root.at("b").unwrap().as_int().unwrap(), 7);
        let custom = root.at("c").unwrap();
        assert_eq!(custom.tag_name(), Some("!custom"));
        assert_eq!(custom.as_str().unwrap(), "value");
    }

    #[test]
    fn test_duplicate_keys() {
        assert_eq!(
            parse_error_kind("a: 1\nb: 2\na: 3\n"),
            ErrorKind::DuplicateKeyNamed("a".to_owned())
        );

        let config = Configuration {
            allow_duplicate_keys: true,
            ..Configuration::default()
        };
        let root = Deserializer::new(Some(&config))
            .deserialize("a: 1\nb: 2\na: 3\n")
            .unwrap();
        let entries = root.as_mapping().unwrap();
        assert_eq!(entries.len(), 2);
        assert_eq!(entries[0].0.as_str().unwrap(), "a");
        assert_eq!(entries[0].1.as_int().unwrap(), 3);
    }

    #[test]
    fn test_structure_errors() {
        let test_cases = [
            ("a:\n    b: 1\n  c: 2\n", ErrorKind::InvalidIndentation),
            ("a: 1\n  b: 2\n", ErrorKind::UnexpectedToken),
            ("a: b: c\n", ErrorKind::UnexpectedToken),
            ("a: - b\n", ErrorKind::UnexpectedToken),
            ("- a\nb: c\n", ErrorKind::UnexpectedToken),
            ("a: 'b' c\n", ErrorKind::UnexpectedToken),
            ("a:\n  - b\n  c: d\n", ErrorKind::InvalidIndentation),
            ("a: *missing\n", ErrorKind::UndefinedAliasNamed("missing".to_owned())),
            ("&a *b\n", ErrorKind::PropertiesOnAlias),
        ];
        for (input, expected) in test_cases {
            assert_eq!(parse_error_kind(input), expected, "input {input:?}");
        }
    }

    #[test]
    fn test_incompatible_collection_tag() {
        assert!(matches!(
            parse_error_kind("!!seq\na: 1\n"),
            ErrorKind::IncompatibleTag { .. }
        ));
        assert!(matches!(
            parse_error_kind("!!int\n- 1\n"),
            ErrorKind::IncompatibleTag { .. }
        ));
    }

    #[test]
    fn test_recursive_alias_is_undefined() {
        assert_eq!(
            parse_error_kind("&a [*a]\n"),
            ErrorKind::UndefinedAliasNamed("a".to_owned())
        );
    }

    #[test]
    fn test_node_spans() {
        let input = "key: value\nlist:\n  - item\n";
        let root = parse(input).unwrap();
        let value = root.at("key").unwrap();
        assert_eq!(&input[value.span.start..value.span.end], "value");
        let list = root.at("list").unwrap();
        assert_eq!(&input[list.span.start..list.span.end], "- item");
    }
}
