// Copyright (c) 2026 Arista Networks, Inc.
// Use of this source code is governed by the Apache License 2.0
// that can be found in the LICENSE file.

//! YAML value tree.
//!
//! A [`Node`] pairs a [`Value`] with its node properties: anchor, tag and the
//! alias marker. Anchors and aliases relate nodes by name only; the tree
//! itself is a strict ownership tree.
//!
//! # Zero-Copy Design
//!
//! String content uses `Cow<'input, str>`. Scalars that need no unescaping or
//! folding borrow from the input, everything else is owned. Use
//! [`Node::into_owned()`] to detach a tree from its input.
//!
//! The root node of a parsed document holds the document's [`Directives`],
//! shared through an [`Arc`].

use std::borrow::Cow;
use std::sync::Arc;

use chumsky::span::Span as _;
use serde::ser::{Serialize, SerializeMap, SerializeSeq, Serializer};

use crate::directive::{Directives, YamlVersion};
use crate::error::{Error, Result};
use crate::span::Span;

/// The kind of a [`Value`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, derive_more::Display)]
pub enum NodeType {
    #[display("null")]
    Null,
    #[display("boolean")]
    Boolean,
    #[display("integer")]
    Integer,
    #[display("float")]
    Float,
    #[display("string")]
    String,
    #[display("sequence")]
    Sequence,
    #[display("mapping")]
    Mapping,
}

/// The core YAML value types.
///
/// Exactly one kind is active at a time. Changing the kind replaces the
/// payload as a whole.
#[derive(Debug, Clone, PartialEq)]
pub enum Value<'input> {
    /// A null value (`null`, `~`, or empty)
    Null,

    /// A boolean value (`true` or `false`)
    Bool(bool),

    /// A 64-bit signed integer value
    Int(i64),

    /// A 64-bit floating-point value
    Float(f64),

    /// A string value
    String(Cow<'input, str>),

    /// A sequence (array/list)
    Sequence(Vec<Node<'input>>),

    /// A mapping with keys in insertion order
    Mapping(Vec<(Node<'input>, Node<'input>)>),
}

impl Value<'_> {
    #[must_use]
    pub const fn node_type(&self) -> NodeType {
        match self {
            Self::Null => NodeType::Null,
            Self::Bool(_) => NodeType::Boolean,
            Self::Int(_) => NodeType::Integer,
            Self::Float(_) => NodeType::Float,
            Self::String(_) => NodeType::String,
            Self::Sequence(_) => NodeType::Sequence,
            Self::Mapping(_) => NodeType::Mapping,
        }
    }

    /// Returns `true` if this is a null value.
    #[must_use]
    pub const fn is_null(&self) -> bool {
        matches!(self, Self::Null)
    }

    /// Returns `true` if this is a scalar value (null, bool, int, float, string).
    #[must_use]
    pub const fn is_scalar(&self) -> bool {
        !self.is_collection()
    }

    /// Returns `true` if this is a collection (sequence or mapping).
    #[must_use]
    pub const fn is_collection(&self) -> bool {
        matches!(self, Self::Sequence(_) | Self::Mapping(_))
    }

    /// Convert this value to an owned version with `'static` lifetime.
    #[must_use]
    pub fn into_owned(self) -> Value<'static> {
        match self {
            Self::Null => Value::Null,
            Self::Bool(val) => Value::Bool(val),
            Self::Int(val) => Value::Int(val),
            Self::Float(val) => Value::Float(val),
            Self::String(cow) => Value::String(Cow::Owned(cow.into_owned())),
            Self::Sequence(seq) => Value::Sequence(seq.into_iter().map(Node::into_owned).collect()),
            Self::Mapping(map) => Value::Mapping(
                map.into_iter()
                    .map(|(key, val)| (key.into_owned(), val.into_owned()))
                    .collect(),
            ),
        }
    }
}

/// A YAML node: a value plus its anchor, tag and alias properties.
///
/// An alias node carries a copy of the value it refers to, with
/// [`is_alias()`](Self::is_alias) set and the referenced anchor as its
/// anchor name.
///
/// Equality compares values only; properties and spans are ignored.
#[derive(Debug, Clone)]
pub struct Node<'input> {
    /// The node's value
    pub value: Value<'input>,
    /// Source span covering the node, properties included
    pub span: Span,
    anchor: Option<Cow<'input, str>>,
    tag: Option<Cow<'input, str>>,
    is_alias: bool,
    directives: Option<Arc<Directives>>,
}

impl PartialEq for Node<'_> {
    fn eq(&self, other: &Self) -> bool {
        self.value == other.value
    }
}

fn empty_span() -> Span {
    Span::new((), 0..0)
}

impl<'input> Node<'input> {
    /// Create a new node with just a value and span (no properties).
    #[must_use]
    pub const fn new(value: Value<'input>, span: Span) -> Self {
        Self {
            value,
            span,
            anchor: None,
            tag: None,
            is_alias: false,
            directives: None,
        }
    }

    #[must_use]
    pub fn null() -> Self {
        Self::new(Value::Null, empty_span())
    }

    #[must_use]
    pub fn sequence(items: Vec<Self>) -> Self {
        Self::new(Value::Sequence(items), empty_span())
    }

    #[must_use]
    pub fn mapping(entries: Vec<(Self, Self)>) -> Self {
        Self::new(Value::Mapping(entries), empty_span())
    }

    /// Create an alias of `target`, referring to it by its anchor name.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Other`] if `target` has no anchor.
    pub fn alias_of(target: &Self) -> Result<Self> {
        let Some(anchor) = target.anchor.clone() else {
            return Err(Error::Other(
                "cannot create an alias of a node without an anchor".to_owned(),
            ));
        };
        Ok(Self {
            value: target.value.clone(),
            span: target.span,
            anchor: Some(anchor),
            tag: None,
            is_alias: true,
            directives: None,
        })
    }

    /// Set the anchor name (`&name`).
    #[must_use]
    pub fn with_anchor(mut self, anchor: impl Into<Cow<'input, str>>) -> Self {
        self.anchor = Some(anchor.into());
        self
    }

    /// Set the tag, either in shorthand (`!!str`) or verbatim (`!<...>`) form.
    #[must_use]
    pub fn with_tag(mut self, tag: impl Into<Cow<'input, str>>) -> Self {
        self.tag = Some(tag.into());
        self
    }

    pub(crate) fn set_anchor(&mut self, anchor: Cow<'input, str>) {
        self.anchor = Some(anchor);
    }

    pub(crate) fn set_tag(&mut self, tag: Cow<'input, str>) {
        self.tag = Some(tag);
    }

    pub(crate) fn set_directives(&mut self, directives: Arc<Directives>) {
        self.directives = Some(directives);
    }

    /// The anchor of this node, or the anchor an alias refers to.
    #[must_use]
    pub fn anchor_name(&self) -> Option<&str> {
        self.anchor.as_deref()
    }

    #[must_use]
    pub fn tag_name(&self) -> Option<&str> {
        self.tag.as_deref()
    }

    #[must_use]
    pub const fn has_anchor(&self) -> bool {
        self.anchor.is_some()
    }

    #[must_use]
    pub const fn has_tag(&self) -> bool {
        self.tag.is_some()
    }

    #[must_use]
    pub const fn is_alias(&self) -> bool {
        self.is_alias
    }

    /// The directives of the document this node is the root of.
    #[must_use]
    pub fn directives(&self) -> Option<&Directives> {
        self.directives.as_deref()
    }

    /// The YAML version of the document; 1.2 unless declared otherwise.
    #[must_use]
    pub fn yaml_version(&self) -> YamlVersion {
        self.directives().map(Directives::version).unwrap_or_default()
    }

    /// Sets the YAML version, so that it is written as a `%YAML` directive.
    ///
    /// Other documents sharing the same directive record are not affected.
    pub fn set_yaml_version(&mut self, version: YamlVersion) {
        let directives = self.directives.get_or_insert_with(Arc::default);
        Arc::make_mut(directives).set_version(version);
    }

    #[must_use]
    pub const fn node_type(&self) -> NodeType {
        self.value.node_type()
    }

    #[must_use]
    pub const fn is_null(&self) -> bool {
        self.value.is_null()
    }

    #[must_use]
    pub const fn is_bool(&self) -> bool {
        matches!(self.value, Value::Bool(_))
    }

    #[must_use]
    pub const fn is_int(&self) -> bool {
        matches!(self.value, Value::Int(_))
    }

    #[must_use]
    pub const fn is_float(&self) -> bool {
        matches!(self.value, Value::Float(_))
    }

    #[must_use]
    pub const fn is_string(&self) -> bool {
        matches!(self.value, Value::String(_))
    }

    #[must_use]
    pub const fn is_sequence(&self) -> bool {
        matches!(self.value, Value::Sequence(_))
    }

    #[must_use]
    pub const fn is_mapping(&self) -> bool {
        matches!(self.value, Value::Mapping(_))
    }

    #[must_use]
    pub const fn is_scalar(&self) -> bool {
        self.value.is_scalar()
    }

    fn type_error(&self, expected: NodeType) -> Error {
        Error::type_error(expected, self.node_type())
    }

    /// # Errors
    ///
    /// Returns [`Error::Type`] unless this is a boolean.
    pub fn as_bool(&self) -> Result<bool> {
        match self.value {
            Value::Bool(value) => Ok(value),
            _ => Err(self.type_error(NodeType::Boolean)),
        }
    }

    /// # Errors
    ///
    /// Returns [`Error::Type`] unless this is an integer.
    pub fn as_int(&self) -> Result<i64> {
        match self.value {
            Value::Int(value) => Ok(value),
            _ => Err(self.type_error(NodeType::Integer)),
        }
    }

    /// # Errors
    ///
    /// Returns [`Error::Type`] unless this is a float.
    pub fn as_float(&self) -> Result<f64> {
        match self.value {
            Value::Float(value) => Ok(value),
            _ => Err(self.type_error(NodeType::Float)),
        }
    }

    /// # Errors
    ///
    /// Returns [`Error::Type`] unless this is a string.
    pub fn as_str(&self) -> Result<&str> {
        match &self.value {
            Value::String(value) => Ok(value),
            _ => Err(self.type_error(NodeType::String)),
        }
    }

    /// # Errors
    ///
    /// Returns [`Error::Type`] unless this is a sequence.
    pub fn as_sequence(&self) -> Result<&[Self]> {
        match &self.value {
            Value::Sequence(items) => Ok(items),
            _ => Err(self.type_error(NodeType::Sequence)),
        }
    }

    /// # Errors
    ///
    /// Returns [`Error::Type`] unless this is a mapping.
    pub fn as_mapping(&self) -> Result<&[(Self, Self)]> {
        match &self.value {
            Value::Mapping(entries) => Ok(entries),
            _ => Err(self.type_error(NodeType::Mapping)),
        }
    }

    /// # Errors
    ///
    /// Returns [`Error::Type`] unless this is a boolean.
    pub fn as_bool_mut(&mut self) -> Result<&mut bool> {
        let found = self.node_type();
        match &mut self.value {
            Value::Bool(value) => Ok(value),
            _ => Err(Error::type_error(NodeType::Boolean, found)),
        }
    }

    /// # Errors
    ///
    /// Returns [`Error::Type`] unless this is an integer.
    pub fn as_int_mut(&mut self) -> Result<&mut i64> {
        let found = self.node_type();
        match &mut self.value {
            Value::Int(value) => Ok(value),
            _ => Err(Error::type_error(NodeType::Integer, found)),
        }
    }

    /// # Errors
    ///
    /// Returns [`Error::Type`] unless this is a float.
    pub fn as_float_mut(&mut self) -> Result<&mut f64> {
        let found = self.node_type();
        match &mut self.value {
            Value::Float(value) => Ok(value),
            _ => Err(Error::type_error(NodeType::Float, found)),
        }
    }

    /// Mutable access to a string, taking ownership of borrowed text.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Type`] unless this is a string.
    pub fn as_string_mut(&mut self) -> Result<&mut String> {
        let found = self.node_type();
        match &mut self.value {
            Value::String(value) => Ok(value.to_mut()),
            _ => Err(Error::type_error(NodeType::String, found)),
        }
    }

    /// # Errors
    ///
    /// Returns [`Error::Type`] unless this is a sequence.
    pub fn as_sequence_mut(&mut self) -> Result<&mut Vec<Self>> {
        let found = self.node_type();
        match &mut self.value {
            Value::Sequence(items) => Ok(items),
            _ => Err(Error::type_error(NodeType::Sequence, found)),
        }
    }

    /// # Errors
    ///
    /// Returns [`Error::Type`] unless this is a mapping.
    pub fn as_mapping_mut(&mut self) -> Result<&mut Vec<(Self, Self)>> {
        let found = self.node_type();
        match &mut self.value {
            Value::Mapping(entries) => Ok(entries),
            _ => Err(Error::type_error(NodeType::Mapping, found)),
        }
    }

    /// Looks up a mapping value by key; `None` if absent or not a mapping.
    pub fn get<'k>(&self, key: impl Into<Value<'k>>) -> Option<&Self> {
        let key = key.into();
        self.as_mapping()
            .ok()?
            .iter()
            .find(|(candidate, _)| candidate.value == key)
            .map(|(_, value)| value)
    }

    /// Mutable variant of [`get`](Self::get).
    pub fn get_mut<'k>(&mut self, key: impl Into<Value<'k>>) -> Option<&mut Self> {
        let key = key.into();
        self.as_mapping_mut()
            .ok()?
            .iter_mut()
            .find(|(candidate, _)| candidate.value == key)
            .map(|(_, value)| value)
    }

    /// Looks up a mapping value by key.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Type`] if this is not a mapping and
    /// [`Error::OutOfRange`] if the key is absent.
    pub fn at<'k>(&self, key: impl Into<Value<'k>>) -> Result<&Self> {
        let key = key.into();
        self.as_mapping()?
            .iter()
            .find(|(candidate, _)| candidate.value == key)
            .map(|(_, value)| value)
            .ok_or_else(|| Error::OutOfRange(format!("key {key:?} not found in mapping")))
    }

    /// Returns the sequence item at `index`.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Type`] if this is not a sequence and
    /// [`Error::OutOfRange`] if the index is past the end.
    pub fn at_index(&self, index: usize) -> Result<&Self> {
        let items = self.as_sequence()?;
        items.get(index).ok_or_else(|| {
            Error::OutOfRange(format!("index {index} with length {}", items.len()))
        })
    }

    /// Number of items of a sequence or entries of a mapping.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Type`] for scalars.
    pub fn len(&self) -> Result<usize> {
        match &self.value {
            Value::Sequence(items) => Ok(items.len()),
            Value::Mapping(entries) => Ok(entries.len()),
            _ => Err(self.type_error(NodeType::Sequence)),
        }
    }

    /// # Errors
    ///
    /// Returns [`Error::Type`] for scalars.
    pub fn is_empty(&self) -> Result<bool> {
        self.len().map(|len| len == 0)
    }

    /// Returns `true` if this is a mapping containing `key`.
    pub fn contains_key<'k>(&self, key: impl Into<Value<'k>>) -> bool {
        self.get(key).is_some()
    }

    /// Inserts into a mapping, replacing the value of an equal key in place.
    ///
    /// Returns the previous value of the key, if any.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Type`] if this is not a mapping.
    pub fn insert(
        &mut self,
        key: impl Into<Self>,
        value: impl Into<Self>,
    ) -> Result<Option<Self>> {
        let entries = self.as_mapping_mut()?;
        let key = key.into();
        let value = value.into();
        if let Some((_, existing)) = entries.iter_mut().find(|(candidate, _)| *candidate == key) {
            return Ok(Some(std::mem::replace(existing, value)));
        }
        entries.push((key, value));
        Ok(None)
    }

    /// Appends to a sequence.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Type`] if this is not a sequence.
    pub fn push(&mut self, value: impl Into<Self>) -> Result<()> {
        self.as_sequence_mut()?.push(value.into());
        Ok(())
    }

    /// Replaces the value, and with it possibly the kind, of this node.
    ///
    /// The node stops being an alias; anchor and tag are kept.
    pub fn set_value(&mut self, value: Value<'input>) {
        self.value = value;
        self.is_alias = false;
    }

    /// Convert this node to an owned version with `'static` lifetime.
    #[must_use]
    pub fn into_owned(self) -> Node<'static> {
        Node {
            value: self.value.into_owned(),
            span: self.span,
            anchor: self.anchor.map(|cow| Cow::Owned(cow.into_owned())),
            tag: self.tag.map(|cow| Cow::Owned(cow.into_owned())),
            is_alias: self.is_alias,
            directives: self.directives,
        }
    }
}

impl Default for Node<'_> {
    fn default() -> Self {
        Self::null()
    }
}

impl<'input> From<Value<'input>> for Node<'input> {
    fn from(value: Value<'input>) -> Self {
        Self::new(value, empty_span())
    }
}

impl From<bool> for Value<'_> {
    fn from(value: bool) -> Self {
        Self::Bool(value)
    }
}

macro_rules! impl_from_int {
    ($($ty:ty),*) => {
        $(
            impl From<$ty> for Value<'_> {
                fn from(value: $ty) -> Self {
                    Self::Int(i64::from(value))
                }
            }

            impl From<$ty> for Node<'_> {
                fn from(value: $ty) -> Self {
                    Value::from(value).into()
                }
            }
        )*
    };
}

impl_from_int!(i8, i16, i32, i64, u8, u16, u32);

impl From<f64> for Value<'_> {
    fn from(value: f64) -> Self {
        Self::Float(value)
    }
}

impl From<f32> for Value<'_> {
    fn from(value: f32) -> Self {
        Self::Float(f64::from(value))
    }
}

impl<'input> From<&'input str> for Value<'input> {
    fn from(value: &'input str) -> Self {
        Self::String(Cow::Borrowed(value))
    }
}

impl From<String> for Value<'_> {
    fn from(value: String) -> Self {
        Self::String(Cow::Owned(value))
    }
}

impl<'input> From<Vec<Node<'input>>> for Value<'input> {
    fn from(items: Vec<Node<'input>>) -> Self {
        Self::Sequence(items)
    }
}

impl From<bool> for Node<'_> {
    fn from(value: bool) -> Self {
        Value::from(value).into()
    }
}

impl From<f64> for Node<'_> {
    fn from(value: f64) -> Self {
        Value::from(value).into()
    }
}

impl From<f32> for Node<'_> {
    fn from(value: f32) -> Self {
        Value::from(value).into()
    }
}

impl<'input> From<&'input str> for Node<'input> {
    fn from(value: &'input str) -> Self {
        Value::from(value).into()
    }
}

impl From<String> for Node<'_> {
    fn from(value: String) -> Self {
        Value::from(value).into()
    }
}

impl<'input> From<Vec<Node<'input>>> for Node<'input> {
    fn from(items: Vec<Node<'input>>) -> Self {
        Self::sequence(items)
    }
}

impl Serialize for Value<'_> {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        match self {
            Self::Null => serializer.serialize_unit(),
            Self::Bool(value) => serializer.serialize_bool(*value),
            Self::Int(value) => serializer.serialize_i64(*value),
            Self::Float(value) => serializer.serialize_f64(*value),
            Self::String(value) => serializer.serialize_str(value),
            Self::Sequence(items) => {
                let mut seq = serializer.serialize_seq(Some(items.len()))?;
                for item in items {
                    seq.serialize_element(item)?;
                }
                seq.end()
            }
            Self::Mapping(entries) => {
                let mut map = serializer.serialize_map(Some(entries.len()))?;
                for (key, value) in entries {
                    map.serialize_entry(key, value)?;
                }
                map.end()
            }
        }
    }
}

impl Serialize for Node<'_> {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        self.value.serialize(serializer)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> Node<'static> {
        Node::mapping(vec![
            ("name".into(), "engine".into()),
            ("count".into(), 3.into()),
            (
                "items".into(),
                Node::sequence(vec![true.into(), 1.5.into(), Node::null()]),
            ),
        ])
    }

    #[test]
    fn test_value_types() {
        assert!(Value::Null.is_null());
        assert!(Value::Null.is_scalar());
        assert!(!Value::<'_>::Null.is_collection());
        assert!(Value::Bool(true).is_scalar());
        assert!(Value::String(Cow::Borrowed("hello")).is_scalar());
        assert!(Value::<'_>::Sequence(vec![]).is_collection());
        assert!(Value::<'_>::Mapping(vec![]).is_collection());

        let test_cases = [
            (Value::Null, NodeType::Null),
            (Value::Bool(false), NodeType::Boolean),
            (Value::Int(1), NodeType::Integer),
            (Value::Float(1.0), NodeType::Float),
            (Value::from("s"), NodeType::String),
            (Value::Sequence(vec![]), NodeType::Sequence),
            (Value::Mapping(vec![]), NodeType::Mapping),
        ];
        for (value, expected) in test_cases {
            assert_eq!(value.node_type(), expected);
        }
    }

    #[test]
    fn test_node_properties() {
        let node = Node::from("test").with_anchor("anchor").with_tag("!!str");
        assert_eq!(node.anchor_name(), Some("anchor"));
        assert_eq!(node.tag_name(), Some("!!str"));
        assert!(!node.is_alias());

        let alias = Node::alias_of(&node).unwrap();
        assert!(alias.is_alias());
        assert_eq!(alias.anchor_name(), Some("anchor"));
        assert_eq!(alias.tag_name(), None);
        assert_eq!(alias, node);

        assert!(matches!(Node::alias_of(&Node::null()), Err(Error::Other(_))));
    }

    #[test]
    fn test_equality_ignores_properties() {
        let plain = Node::from(1);
        let tagged = Node::from(1).with_tag("!!int").with_anchor("one");
        assert_eq!(plain, tagged);
        assert_ne!(plain, Node::from(2));
    }

    #[test]
    fn test_typed_accessors() {
        let root = sample();
        assert_eq!(root.at("name").unwrap().as_str().unwrap(), "engine");
        assert_eq!(root.at("count").unwrap().as_int().unwrap(), 3);
        let items = root.at("items").unwrap();
        assert!(items.at_index(0).unwrap().as_bool().unwrap());
        assert!((items.at_index(1).unwrap().as_float().unwrap() - 1.5).abs() < f64::EPSILON);
        assert!(items.at_index(2).unwrap().is_null());

        assert!(matches!(
            root.as_sequence(),
            Err(Error::Type {
                expected: NodeType::Sequence,
                found: NodeType::Mapping
            })
        ));
        assert!(matches!(
            root.at("name").unwrap().as_int(),
            Err(Error::Type {
                expected: NodeType::Integer,
                found: NodeType::String
            })
        ));
    }

    #[test]
    fn test_lookup_errors() {
        let root = sample();
        assert!(matches!(root.at("missing"), Err(Error::OutOfRange(_))));
        assert!(matches!(
            root.at("items").unwrap().at_index(3),
            Err(Error::OutOfRange(_))
        ));
        assert!(matches!(root.at_index(0), Err(Error::Type { .. })));
        assert!(matches!(
            Node::from(1).at("key"),
            Err(Error::Type { .. })
        ));
        assert!(root.get("missing").is_none());
        assert!(Node::from(1).get("key").is_none());
    }

    #[test]
    fn test_non_string_keys() {
        let root = Node::mapping(vec![(1.into(), "one".into()), (true.into(), "yes".into())]);
        assert_eq!(root.at(1).unwrap().as_str().unwrap(), "one");
        assert_eq!(root.at(true).unwrap().as_str().unwrap(), "yes");
        assert!(root.contains_key(1));
        assert!(!root.contains_key("1"));
    }

    #[test]
    fn test_mutation() {
        let mut root = sample();
        assert_eq!(root.len().unwrap(), 3);
        let previous = root.insert("count", 4).unwrap();
        assert_eq!(previous, Some(Node::from(3)));
        assert_eq!(root.len().unwrap(), 3);
        assert_eq!(root.insert("new", "value").unwrap(), None);
        assert_eq!(root.len().unwrap(), 4);

        root.get_mut("items").unwrap().push("more").unwrap();
        assert_eq!(root.at("items").unwrap().len().unwrap(), 4);

        *root.get_mut("count").unwrap().as_int_mut().unwrap() += 1;
        assert_eq!(root.at("count").unwrap().as_int().unwrap(), 5);

        root.get_mut("name").unwrap().as_string_mut().unwrap().push_str("-2");
        assert_eq!(root.at("name").unwrap().as_str().unwrap(), "engine-2");

        assert!(matches!(Node::from(1).push(2), Err(Error::Type { .. })));
        assert!(matches!(Node::from(1).insert("k", 2), Err(Error::Type { .. })));
        assert!(matches!(Node::from(1).len(), Err(Error::Type { .. })));
    }

    #[test]
    fn test_set_value_changes_kind() {
        let mut node = Node::from("text").with_anchor("a");
        node.set_value(Value::Sequence(vec![Node::from(1)]));
        assert!(node.is_sequence());
        assert!(node.is_empty().is_ok_and(|empty| !empty));
        assert_eq!(node.anchor_name(), Some("a"));
        node.set_value(Value::Null);
        assert!(node.is_null());
    }

    #[test]
    fn test_yaml_version() {
        let mut node = Node::null();
        assert_eq!(node.yaml_version(), YamlVersion::V1_2);
        assert!(node.directives().is_none());
        node.set_yaml_version(YamlVersion::V1_1);
        assert_eq!(node.yaml_version(), YamlVersion::V1_1);
        assert!(node.directives().is_some_and(Directives::is_version_specified));
    }

    #[test]
    fn test_set_yaml_version_does_not_leak_into_shared_record() {
        let shared = Arc::new(Directives::new());
        let mut first = Node::null();
        first.set_directives(Arc::clone(&shared));
        first.set_yaml_version(YamlVersion::V1_1);
        assert_eq!(shared.version(), YamlVersion::V1_2);
        assert_eq!(first.yaml_version(), YamlVersion::V1_1);
    }

    #[test]
    fn test_into_owned() {
        let input = String::from("test");
        let node = Node::from(input.as_str()).with_anchor(input.as_str());
        let owned: Node<'static> = node.into_owned();
        drop(input);
        assert!(matches!(owned.value, Value::String(Cow::Owned(ref text)) if text == "test"));
        assert_eq!(owned.anchor_name(), Some("test"));
    }
}
