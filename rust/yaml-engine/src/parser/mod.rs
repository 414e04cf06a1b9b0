// Copyright (c) 2026 Arista Networks, Inc.
// Use of this source code is governed by the Apache License 2.0
// that can be found in the LICENSE file.

//! YAML deserializer.
//!
//! This module converts the token stream of the [`Lexer`] into value trees,
//! one per document. The parser handles both block and flow styles; block
//! structure is recovered from the column of each token.
//!
//! The parser treats anchors and tags as node properties rather than value
//! wrappers. This means `&anchor key: value` parses with the anchor attached
//! to the key scalar, while properties on a line of their own belong to the
//! collection below them.

mod block;
mod flow;

use std::collections::{HashMap, VecDeque};
use std::sync::Arc;

use chumsky::span::Span as _;

use crate::config::Configuration;
use crate::directive::Directives;
use crate::error::{Error, ErrorKind, ParseError, Result};
use crate::lexer::Lexer;
use crate::rich_token::RichToken;
use crate::scalar::{self, BlockHeader, ScalarStyle};
use crate::span::{Position, Span};
use crate::tag::{self, TagKind};
use crate::token::Token;
use crate::value::{Node, Value};

/// Where a block node appears, which decides what may start on its first line.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum NodeContext {
    /// The document root.
    Root,
    /// After `-`, `?` or an explicit `:`; compact collections may follow on the same line.
    Compact,
    /// After the `:` of an implicit key written on `line`.
    Value { line: usize },
}

#[derive(Debug, Clone, Copy)]
struct Property<'input> {
    name: &'input str,
    span: Span,
    position: Position,
}

/// Pending node properties (anchor, tag) collected before parsing the value.
#[derive(Debug, Default, Clone, Copy)]
pub(crate) struct NodeProperties<'input> {
    anchor: Option<Property<'input>>,
    tag: Option<Property<'input>>,
    /// Line of the last property seen.
    line: Option<usize>,
}

impl<'input> NodeProperties<'input> {
    pub fn is_empty(&self) -> bool {
        self.anchor.is_none() && self.tag.is_none()
    }

    /// Line of the last property, if any.
    pub const fn line(&self) -> Option<usize> {
        self.line
    }

    /// Column of the first property, if any.
    pub fn column(&self) -> Option<usize> {
        self.first().map(|property| property.position.column)
    }

    fn first(&self) -> Option<&Property<'input>> {
        match (&self.anchor, &self.tag) {
            (Some(anchor), Some(tag)) if tag.span.start < anchor.span.start => Some(tag),
            (Some(anchor), _) => Some(anchor),
            (None, tag) => tag.as_ref(),
        }
    }

    /// Byte offset of the first property, if any.
    pub fn start(&self) -> Option<usize> {
        self.first().map(|property| property.span.start)
    }

    pub fn tag_name(&self) -> Option<&'input str> {
        self.tag.map(|tag| tag.name)
    }

    /// Record an anchor or tag token.
    pub fn add(&mut self, token: &RichToken<'input>) -> Result<(), ErrorKind> {
        let (slot, name) = match token.token {
            Token::Anchor(name) => (&mut self.anchor, name),
            Token::Tag(name) => (&mut self.tag, name),
            _ => return Err(ErrorKind::UnexpectedToken),
        };
        if let Some(existing) = slot {
            let first = existing.name.to_owned();
            let second = name.to_owned();
            return Err(if matches!(token.token, Token::Anchor(_)) {
                ErrorKind::DuplicateAnchorNamed { first, second }
            } else {
                ErrorKind::DuplicateTagNamed { first, second }
            });
        }
        *slot = Some(Property {
            name,
            span: token.span,
            position: token.position,
        });
        self.line = Some(token.line());
        Ok(())
    }

    /// Apply these properties to a node, updating its span to include properties.
    pub fn apply_to(self, mut node: Node<'input>) -> Node<'input> {
        if let Some(start) = self.start()
            && start < node.span.start
        {
            node.span = Span::new((), start..node.span.end);
        }
        if let Some(anchor) = self.anchor {
            node.set_anchor(anchor.name.into());
        }
        if let Some(tag) = self.tag {
            node.set_tag(tag.name.into());
        }
        node
    }
}

/// Parser state for one stream.
#[derive(Debug)]
pub(crate) struct Parser<'input> {
    lexer: Lexer<'input>,
    lookahead: VecDeque<RichToken<'input>>,
    /// End offset of the last consumed token.
    last_end: usize,
    /// Map of anchor names to their nodes (for alias resolution)
    anchors: HashMap<&'input str, Node<'input>>,
    /// Directives of the current document.
    directives: Arc<Directives>,
    config: Configuration,
}

impl<'input> Parser<'input> {
    pub fn new(input: &'input str, config: Configuration) -> Self {
        Self {
            lexer: Lexer::new(input),
            lookahead: VecDeque::new(),
            last_end: 0,
            anchors: HashMap::new(),
            directives: Arc::default(),
            config,
        }
    }

    /// Peek `n` tokens ahead (0 = current token) without consuming.
    pub fn peek_nth(&mut self, n: usize) -> Result<RichToken<'input>> {
        while self.lookahead.len() <= n {
            let token = self.lexer.next_token()?;
            self.lookahead.push_back(token);
        }
        self.lookahead
            .get(n)
            .copied()
            .ok_or_else(|| Error::Other("token lookahead exhausted".to_owned()))
    }

    /// Peek at the current token without consuming it.
    pub fn peek(&mut self) -> Result<RichToken<'input>> {
        self.peek_nth(0)
    }

    /// Consume the current token and return it.
    pub fn advance(&mut self) -> Result<RichToken<'input>> {
        let token = self.peek()?;
        self.lookahead.pop_front();
        self.last_end = token.span.end;
        log::trace!("{token} at {}", token.position);
        Ok(token)
    }

    pub fn error(&self, kind: ErrorKind, token: &RichToken<'_>) -> Error {
        ParseError::new(kind, token.span, token.position).into()
    }

    pub fn unexpected(&self, token: &RichToken<'_>, expected: &[&str]) -> Error {
        let kind = if token.token == Token::StreamEnd {
            ErrorKind::UnexpectedEof
        } else {
            ErrorKind::UnexpectedToken
        };
        ParseError::new(kind, token.span, token.position)
            .with_found(token.to_string())
            .with_expected(expected.iter().map(|&item| item.to_owned()).collect())
            .into()
    }

    /// Span from `start` to the end of the last consumed token.
    pub fn span_from(&self, start: usize) -> Span {
        Span::new((), start..self.last_end.max(start))
    }

    fn resolve_tag(&self, props: &NodeProperties<'_>) -> Result<Option<TagKind>> {
        props
            .tag_name()
            .map(|raw| tag::resolve(raw, Some(&self.directives)))
            .transpose()
    }

    /// Apply properties to a finished node and register its anchor.
    pub fn finish_node(
        &mut self,
        props: NodeProperties<'input>,
        node: Node<'input>,
    ) -> Result<Node<'input>> {
        if let Some(tag) = props.tag
            && node.value.is_collection()
        {
            let compatible = match tag::resolve(tag.name, Some(&self.directives))? {
                TagKind::Sequence => node.is_sequence(),
                TagKind::Mapping => node.is_mapping(),
                kind => !kind.is_core_scalar(),
            };
            if !compatible {
                let kind = ErrorKind::IncompatibleTag {
                    tag: tag.name.to_owned(),
                    node: node.node_type(),
                };
                return Err(ParseError::new(kind, tag.span, tag.position).into());
            }
        }
        let anchor = props.anchor.map(|anchor| anchor.name);
        let node = props.apply_to(node);
        if let Some(name) = anchor {
            self.anchors.insert(name, node.clone());
        }
        Ok(node)
    }

    pub fn scalar_node(
        &mut self,
        props: NodeProperties<'input>,
        token: &RichToken<'input>,
        style: ScalarStyle,
        text: &'input str,
    ) -> Result<Node<'input>> {
        let tag = self.resolve_tag(&props)?;
        let value =
            scalar::parse_flow(style, tag, text).map_err(|kind| self.error(kind, token))?;
        self.finish_node(props, Node::new(value, token.span))
    }

    pub fn block_scalar_node(
        &mut self,
        props: NodeProperties<'input>,
        token: &RichToken<'input>,
        style: ScalarStyle,
        header: BlockHeader,
        text: &'input str,
    ) -> Result<Node<'input>> {
        let tag = self.resolve_tag(&props)?;
        let value = scalar::parse_block(style, tag, text, header)
            .map_err(|kind| self.error(kind, token))?;
        self.finish_node(props, Node::new(value, token.span))
    }

    /// A node without content, placed just before `next`.
    ///
    /// Collection tags give an empty collection; anything else is resolved as
    /// an empty plain scalar.
    pub fn empty_node(
        &mut self,
        props: NodeProperties<'input>,
        next: &RichToken<'input>,
    ) -> Result<Node<'input>> {
        let value = match self.resolve_tag(&props)? {
            Some(TagKind::Sequence) => Value::Sequence(Vec::new()),
            Some(TagKind::Mapping) => Value::Mapping(Vec::new()),
            kind => scalar::parse_flow(ScalarStyle::Plain, kind, "")
                .map_err(|error| self.error(error, next))?,
        };
        let start = props.start().unwrap_or(next.span.start);
        let end = if props.is_empty() { start } else { self.last_end };
        self.finish_node(props, Node::new(value, Span::new((), start..end)))
    }

    pub fn alias_node(
        &self,
        props: NodeProperties<'input>,
        token: &RichToken<'input>,
        name: &'input str,
    ) -> Result<Node<'input>> {
        if !props.is_empty() {
            return Err(self.error(ErrorKind::PropertiesOnAlias, token));
        }
        let target = self
            .anchors
            .get(name)
            .ok_or_else(|| self.error(ErrorKind::UndefinedAliasNamed(name.to_owned()), token))?;
        let mut node = Node::alias_of(target)?;
        node.span = token.span;
        Ok(node)
    }

    /// Insert a mapping entry, rejecting or replacing a repeated key.
    pub fn insert_entry(
        &self,
        entries: &mut Vec<(Node<'input>, Node<'input>)>,
        key: Node<'input>,
        value: Node<'input>,
    ) -> Result<()> {
        if let Some((existing, slot)) = entries.iter_mut().find(|(existing, _)| *existing == key) {
            if !self.config.allow_duplicate_keys {
                let kind = ErrorKind::DuplicateKeyNamed(key_text(&key));
                let position = self.lexer.position(key.span.start);
                return Err(ParseError::new(kind, key.span, position).into());
            }
            log::debug!("Replacing value of repeated key '{}'", key_text(existing));
            *slot = value;
            return Ok(());
        }
        entries.push((key, value));
        Ok(())
    }

    /// Parse the next document of the stream.
    ///
    /// Returns `None` once the stream holds no further document.
    pub fn next_document(&mut self) -> Result<Option<Node<'input>>> {
        let mut directives = Directives::new();
        let mut last_directive = None;
        loop {
            let token = self.peek()?;
            match token.token {
                Token::Directive(directive) => {
                    self.advance()?;
                    directives
                        .apply(directive)
                        .map_err(|kind| self.error(kind, &token))?;
                    last_directive = Some(token);
                }
                Token::DocumentEnd if last_directive.is_none() => {
                    self.advance()?;
                }
                _ => break,
            }
        }

        let token = self.peek()?;
        match (token.token, last_directive) {
            (Token::DocumentStart, _) => {
                self.advance()?;
            }
            (_, Some(directive)) => {
                return Err(self.error(ErrorKind::DirectivesWithoutDocument, &directive));
            }
            (Token::StreamEnd, None) => return Ok(None),
            _ => {}
        }
        self.directives = Arc::new(directives);
        self.anchors.clear();

        let token = self.peek()?;
        let mut root = if token.token.ends_document() {
            self.empty_node(NodeProperties::default(), &token)?
        } else {
            self.parse_block_node(None, NodeContext::Root)?
        };

        let token = self.peek()?;
        match token.token {
            Token::DocumentEnd => {
                self.advance()?;
            }
            Token::DocumentStart | Token::StreamEnd => {}
            _ => return Err(self.unexpected(&token, &["'---'", "'...'", "end of input"])),
        }
        root.set_directives(Arc::clone(&self.directives));
        log::debug!("Parsed document ending at {}", token.position);
        Ok(Some(root))
    }
}

/// Text naming a mapping key in diagnostics.
fn key_text(key: &Node<'_>) -> String {
    match &key.value {
        Value::Null => "null".to_owned(),
        Value::Bool(value) => value.to_string(),
        Value::Int(value) => value.to_string(),
        Value::Float(value) => value.to_string(),
        Value::String(value) => value.to_string(),
        Value::Sequence(_) | Value::Mapping(_) => format!("<{}>", key.node_type()),
    }
}

/// Iterator over the documents of a YAML stream.
///
/// Yields one `Result` per document and stops after the first error;
/// documents returned before the error stay valid. A stream without any
/// document yields a single `null` document.
#[derive(Debug)]
pub struct Documents<'input> {
    parser: Parser<'input>,
    parsed: usize,
    done: bool,
}

impl<'input> Documents<'input> {
    pub(crate) fn new(input: &'input str, config: Configuration) -> Self {
        Self {
            parser: Parser::new(input, config),
            parsed: 0,
            done: false,
        }
    }
}

impl<'input> Iterator for Documents<'input> {
    type Item = Result<Node<'input>>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.done {
            return None;
        }
        match self.parser.next_document() {
            Ok(Some(document)) => {
                self.parsed += 1;
                Some(Ok(document))
            }
            Ok(None) => {
                self.done = true;
                log::debug!("Parsed {} document(s)", self.parsed.max(1));
                (self.parsed == 0).then(|| {
                    let mut root = Node::null();
                    root.set_directives(Arc::default());
                    Ok(root)
                })
            }
            Err(error) => {
                self.done = true;
                Some(Err(error))
            }
        }
    }
}

/// Builds value trees from YAML text.
#[derive(Debug, Clone, Default)]
pub struct Deserializer {
    config: Configuration,
}

impl Deserializer {
    /// Create a deserializer; `None` uses the default [`Configuration`].
    #[must_use]
    pub fn new(config: Option<&Configuration>) -> Self {
        Self {
            config: config.cloned().unwrap_or_default(),
        }
    }

    /// Iterate over the documents of `input`.
    #[must_use]
    pub fn documents<'input>(&self, input: &'input str) -> Documents<'input> {
        Documents::new(input, self.config.clone())
    }

    /// Parse the first document of `input`.
    ///
    /// Any documents after the first are not parsed.
    ///
    /// # Errors
    ///
    /// Returns the first error met while parsing the document.
    pub fn deserialize<'input>(&self, input: &'input str) -> Result<Node<'input>> {
        self.documents(input).next().unwrap_or_else(|| Ok(Node::null()))
    }

    /// Parse every document of `input`.
    ///
    /// # Errors
    ///
    /// Returns the first error met in any document.
    pub fn deserialize_docs<'input>(&self, input: &'input str) -> Result<Vec<Node<'input>>> {
        self.documents(input).collect()
    }
}

#[cfg(test)]
#[allow(
    clippy::indexing_slicing,
    reason = "Tests benefit from direct indexing for readability"
)]
mod tests {
    use super::*;
    use crate::directive::YamlVersion;

    fn parse(input: &str) -> Result<Vec<Node<'_>>> {
        Deserializer::new(None).deserialize_docs(input)
    }

    fn parse_error_kind(input: &str) -> ErrorKind {
        match parse(input) {
            Err(Error::Parse(error)) => error.kind,
            other => panic!("expected a parse error for {input:?}, got {other:?}"),
        }
    }

    #[test]
    fn test_parse_simple_scalar() {
        let docs = parse("hello").unwrap();
        assert_eq!(docs.len(), 1);
        assert_eq!(docs[0].as_str().unwrap(), "hello");
    }

    #[test]
    fn test_empty_stream_yields_null_document() {
        for input in ["", "# comment only\n", "\n\n"] {
            let docs = parse(input).unwrap();
            assert_eq!(docs.len(), 1, "input {input:?}");
            assert!(docs[0].is_null());
            assert!(docs[0].directives().is_some());
        }
    }

    #[test]
    fn test_parse_multi_document() {
        let docs = parse("a\n---\nb\n...\n--- c\n---\n").unwrap();
        let values: Vec<_> = docs.iter().map(|doc| doc.value.clone()).collect();
        assert_eq!(
            values,
            vec![
                Value::String("a".into()),
                Value::String("b".into()),
                Value::String("c".into()),
                Value::Null,
            ]
        );
    }

    #[test]
    fn test_directives_are_per_document() {
        let docs = parse("%YAML 1.1\n---\na\n...\n---\nb").unwrap();
        assert_eq!(docs[0].yaml_version(), YamlVersion::V1_1);
        assert!(docs[0].directives().unwrap().is_version_specified());
        assert_eq!(docs[1].yaml_version(), YamlVersion::V1_2);
        assert!(!docs[1].directives().unwrap().is_version_specified());
    }

    #[test]
    fn test_directive_errors() {
        let test_cases = [
            (
                "%YAML 1.2\n%YAML 1.2\n---\na",
                ErrorKind::DuplicateDirectiveNamed("YAML".to_owned()),
            ),
            ("%YAML 1.2\na", ErrorKind::DirectivesWithoutDocument),
            ("%YAML 1.2\n", ErrorKind::DirectivesWithoutDocument),
        ];
        for (input, expected) in test_cases {
            assert_eq!(parse_error_kind(input), expected, "input {input:?}");
        }
        assert!(matches!(
            parse_error_kind("%TAG !e! tag:e.com:\n%TAG !e! tag:f.com:\n---\na"),
            ErrorKind::DuplicateDirectiveNamed(_)
        ));
        assert!(matches!(
            parse_error_kind("%YAML 2.0\n---\na"),
            ErrorKind::InvalidDirectiveDetail(_)
        ));
    }

    #[test]
    fn test_reserved_directive_is_ignored() {
        let docs = parse("%FOO bar baz\n---\nvalue").unwrap();
        assert_eq!(docs[0].as_str().unwrap(), "value");
        assert!(docs[0].directives().unwrap().is_default());
    }

    #[test]
    fn test_documents_iterator_stops_after_error() {
        let mut documents = Deserializer::new(None).documents("a\n---\n[b\n---\nc");
        assert_eq!(documents.next().unwrap().unwrap().as_str().unwrap(), "a");
        assert!(documents.next().unwrap().is_err());
        assert!(documents.next().is_none());
    }

    #[test]
    fn test_deserialize_reads_first_document_only() {
        let root = Deserializer::new(None).deserialize("a: 1\n---\n[").unwrap();
        assert_eq!(root.at("a").unwrap().as_int().unwrap(), 1);
    }

    #[test]
    fn test_node_properties_duplicates() {
        let mut props = NodeProperties::default();
        let anchor = |name| {
            RichToken::new(
                Token::Anchor(name),
                Span::new((), 0..1),
                Position::default(),
            )
        };
        props.add(&anchor("a")).unwrap();
        assert_eq!(
            props.add(&anchor("b")),
            Err(ErrorKind::DuplicateAnchorNamed {
                first: "a".to_owned(),
                second: "b".to_owned()
            })
        );
    }
}
