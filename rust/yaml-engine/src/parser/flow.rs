// Copyright (c) 2026 Arista Networks, Inc.
// Use of this source code is governed by the Apache License 2.0
// that can be found in the LICENSE file.

//! Flow collections (`[...]`, `{...}`) and single-token nodes.

use crate::error::Result;
use crate::token::Token;
use crate::value::{Node, Value};

use super::{NodeProperties, Parser};

impl<'input> Parser<'input> {
    /// Parse a scalar, alias or flow collection, with any properties before it.
    ///
    /// Properties followed by no content give an empty node.
    pub(super) fn parse_flow_node(
        &mut self,
        mut props: NodeProperties<'input>,
    ) -> Result<Node<'input>> {
        loop {
            let token = self.peek()?;
            if !matches!(token.token, Token::Anchor(_) | Token::Tag(_)) {
                break;
            }
            self.advance()?;
            props
                .add(&token)
                .map_err(|kind| self.error(kind, &token))?;
        }

        let token = self.peek()?;
        match token.token {
            Token::Scalar { style, text } => {
                self.advance()?;
                self.scalar_node(props, &token, style, text)
            }
            Token::Alias(name) => {
                self.advance()?;
                self.alias_node(props, &token, name)
            }
            Token::FlowSequenceStart => {
                let node = self.parse_flow_sequence()?;
                self.finish_node(props, node)
            }
            Token::FlowMappingStart => {
                let node = self.parse_flow_mapping()?;
                self.finish_node(props, node)
            }
            _ if !props.is_empty() => self.empty_node(props, &token),
            _ => Err(self.unexpected(&token, &["a scalar", "'['", "'{'"])),
        }
    }

    /// Like [`parse_flow_node`](Self::parse_flow_node), but an entry
    /// separator or closing bracket gives an empty node.
    fn parse_flow_node_or_empty(&mut self) -> Result<Node<'input>> {
        let token = self.peek()?;
        match token.token {
            Token::FlowEntry
            | Token::FlowSequenceEnd
            | Token::FlowMappingEnd
            | Token::KeySeparator => self.empty_node(NodeProperties::default(), &token),
            _ => self.parse_flow_node(NodeProperties::default()),
        }
    }

    /// Parse the value after an optional `:`; a missing value is empty.
    fn parse_flow_value(&mut self) -> Result<Node<'input>> {
        let token = self.peek()?;
        if token.token == Token::KeySeparator {
            self.advance()?;
            self.parse_flow_node_or_empty()
        } else {
            self.empty_node(NodeProperties::default(), &token)
        }
    }

    /// Consume the `,` between entries, or leave the closing bracket in place.
    fn flow_entry_end(&mut self, close: Token<'input>, expected: &[&str]) -> Result<()> {
        let token = self.peek()?;
        match token.token {
            Token::FlowEntry => {
                self.advance()?;
                Ok(())
            }
            found if found == close => Ok(()),
            _ => Err(self.unexpected(&token, expected)),
        }
    }

    pub(super) fn parse_flow_sequence(&mut self) -> Result<Node<'input>> {
        let open = self.advance()?;
        let mut items = Vec::new();
        loop {
            let token = self.peek()?;
            if token.token == Token::FlowSequenceEnd {
                self.advance()?;
                break;
            }
            items.push(self.parse_flow_sequence_entry()?);
            self.flow_entry_end(Token::FlowSequenceEnd, &["','", "']'"])?;
        }
        Ok(Node::new(
            Value::Sequence(items),
            self.span_from(open.span.start),
        ))
    }

    /// Parse one flow sequence entry; `key: value` entries become
    /// single-pair mappings.
    fn parse_flow_sequence_entry(&mut self) -> Result<Node<'input>> {
        let token = self.peek()?;
        let start = token.span.start;
        let key = match token.token {
            Token::ExplicitKey => {
                self.advance()?;
                self.parse_flow_node_or_empty()?
            }
            Token::KeySeparator => self.empty_node(NodeProperties::default(), &token)?,
            _ => {
                let node = self.parse_flow_node(NodeProperties::default())?;
                if self.peek()?.token != Token::KeySeparator {
                    return Ok(node);
                }
                node
            }
        };
        let value = self.parse_flow_value()?;
        Ok(Node::new(
            Value::Mapping(vec![(key, value)]),
            self.span_from(start),
        ))
    }

    pub(super) fn parse_flow_mapping(&mut self) -> Result<Node<'input>> {
        let open = self.advance()?;
        let mut entries = Vec::new();
        loop {
            let token = self.peek()?;
            if token.token == Token::FlowMappingEnd {
                self.advance()?;
                break;
            }
            if token.token == Token::ExplicitKey {
                self.advance()?;
            }
            let key = self.parse_flow_node_or_empty()?;
            let value = self.parse_flow_value()?;
            self.insert_entry(&mut entries, key, value)?;
            self.flow_entry_end(Token::FlowMappingEnd, &["','", "'}'"])?;
        }
        Ok(Node::new(
            Value::Mapping(entries),
            self.span_from(open.span.start),
        ))
    }
}

#[cfg(test)]
#[allow(
    clippy::indexing_slicing,
    reason = "Tests benefit from direct indexing for readability"
)]
mod tests {
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

    #[test]
    fn test_flow_sequence() {
        let root = parse("[1, two, \"three\", 4.5, null, [nested]]").unwrap();
        let items = root.as_sequence().unwrap();
        assert_eq!(items.len(), 6);
        assert_eq!(items[0].as_int().unwrap(), 1);
        assert_eq!(items[1].as_str().unwrap(), "two");
        assert_eq!(items[2].as_str().unwrap(), "three");
        assert!(items[3].is_float());
        assert!(items[4].is_null());
        assert_eq!(items[5].as_sequence().unwrap().len(), 1);
    }

    #[test]
    fn test_flow_mapping() {
        let root = parse("{a: 1, b: [x, y], c: {d: e}, f}").unwrap();
        assert_eq!(root.at("a").unwrap().as_int().unwrap(), 1);
        assert_eq!(root.at("b").unwrap().len().unwrap(), 2);
        assert_eq!(root.at("c").unwrap().at("d").unwrap().as_str().unwrap(), "e");
        assert!(root.at("f").unwrap().is_null());
    }

    #[test]
    fn test_trailing_comma_and_multiline() {
        let root = parse("[\n  a,\n  b,\n]").unwrap();
        assert_eq!(root.len().unwrap(), 2);
        let root = parse("{\n  a: 1,\n}").unwrap();
        assert_eq!(root.len().unwrap(), 1);
        let root = parse("[]").unwrap();
        assert!(root.is_empty().unwrap());
        let root = parse("{}").unwrap();
        assert!(root.is_mapping());
    }

    #[test]
    fn test_single_pair_entries() {
        let root = parse("[a: 1, ? b, : c]").unwrap();
        let items = root.as_sequence().unwrap();
        assert_eq!(items.len(), 3);
        assert_eq!(items[0].at("a").unwrap().as_int().unwrap(), 1);
        assert!(items[1].at("b").unwrap().is_null());
        let (key, value) = &items[2].as_mapping().unwrap()[0];
        assert!(key.is_null());
        assert_eq!(value.as_str().unwrap(), "c");
    }

    #[test]
    fn test_json_like_keys() {
        let root = parse(r#"{"a":1, "b":[2]}"#).unwrap();
        assert_eq!(root.at("a").unwrap().as_int().unwrap(), 1);
        assert_eq!(root.at("b").unwrap().at_index(0).unwrap().as_int().unwrap(), 2);
    }

    #[test]
    fn test_plain_scalars_with_colons() {
        let root = parse("[http://example.com/a, a:b]").unwrap();
        let items = root.as_sequence().unwrap();
        assert_eq!(items[0].as_str().unwrap(), "http://example.com/a");
        assert_eq!(items[1].as_str().unwrap(), "a:b");
    }

    #[test]
    fn test_flow_properties() {
        let root = parse("[&a one, *a, !!str 2, !!null , &e ]").unwrap();
        let items = root.as_sequence().unwrap();
        assert_eq!(items[0].anchor_name(), Some("a"));
        assert!(items[1].is_alias());
        assert_eq!(items[1].as_str().unwrap(), "one");
        assert_eq!(items[2].as_str().unwrap(), "2");
        assert!(items[3].is_null());
        assert!(items[4].is_null());
        assert_eq!(items[4].anchor_name(), Some("e"));
    }

    #[test]
    fn test_flow_collection_tags() {
        let root = parse("!!seq []").unwrap();
        assert_eq!(root.value, Value::Sequence(Vec::new()));
        assert!(matches!(
            parse_error_kind("!!map [a]"),
            ErrorKind::IncompatibleTag { .. }
        ));
    }

    #[test]
    fn test_flow_errors() {
        let test_cases = [
            ("[a, b", ErrorKind::UnexpectedEof),
            ("{a: 1", ErrorKind::UnexpectedEof),
            ("[a b: c d, ]x", ErrorKind::UnexpectedToken),
            ("[,]", ErrorKind::UnexpectedToken),
            ("{a: 1, a: 2}", ErrorKind::DuplicateKeyNamed("a".to_owned())),
        ];
        for (input, expected) in test_cases {
            assert_eq!(parse_error_kind(input), expected, "input {input:?}");
        }
    }

    #[test]
    fn test_flow_error_reports_expected_tokens() {
        let Err(Error::Parse(error)) = parse("[a {b}]") else {
            panic!("expected a parse error");
        };
        assert_eq!(error.expected, vec!["','".to_owned(), "']'".to_owned()]);
        assert_eq!(error.found.as_deref(), Some("'{'"));
        assert_eq!(error.position.column, 3);
    }
}
