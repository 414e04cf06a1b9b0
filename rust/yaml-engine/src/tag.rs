// Copyright (c) 2026 Arista Networks, Inc.
// Use of this source code is governed by the Apache License 2.0
// that can be found in the LICENSE file.

//! Tag resolution.
//!
//! A raw tag as written in the document is first normalized into the
//! verbatim form `!<uri>` by expanding its handle against the document's
//! [`Directives`], then mapped onto a [`TagKind`].

use std::borrow::Cow;

use crate::directive::{DEFAULT_PRIMARY_PREFIX, DEFAULT_SECONDARY_PREFIX, Directives};
use crate::error::{Error, Result};
use crate::uri::is_valid_uri;

/// The kinds of tag the core schema distinguishes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, derive_more::Display)]
pub enum TagKind {
    /// The `!` tag; the node keeps its default type for its kind.
    #[display("non-specific")]
    NonSpecific,
    /// Any tag outside the core schema.
    #[display("custom")]
    Custom,
    #[display("seq")]
    Sequence,
    #[display("map")]
    Mapping,
    #[display("null")]
    Null,
    #[display("bool")]
    Boolean,
    #[display("int")]
    Integer,
    #[display("float")]
    Float,
    #[display("str")]
    String,
}

impl TagKind {
    /// Returns `true` for the scalar kinds of the core schema.
    #[must_use]
    pub const fn is_core_scalar(self) -> bool {
        matches!(
            self,
            Self::Null | Self::Boolean | Self::Integer | Self::Float | Self::String
        )
    }

    fn from_uri(uri: &str) -> Self {
        match uri.strip_prefix(DEFAULT_SECONDARY_PREFIX) {
            Some("seq") => Self::Sequence,
            Some("map") => Self::Mapping,
            Some("null") => Self::Null,
            Some("bool") => Self::Boolean,
            Some("int") => Self::Integer,
            Some("float") => Self::Float,
            Some("str") => Self::String,
            _ => Self::Custom,
        }
    }
}

/// Expands a raw tag into its verbatim form `!<uri>`.
///
/// The non-specific tag `!` and verbatim tags are returned unchanged.
///
/// # Errors
///
/// Returns [`Error::InvalidTag`] for malformed tags and undeclared named handles.
pub fn normalize<'a>(raw: &'a str, directives: Option<&Directives>) -> Result<Cow<'a, str>> {
    let Some(body) = raw.strip_prefix('!') else {
        return Err(Error::invalid_tag(raw, "a tag must start with '!'"));
    };
    if body.is_empty() {
        return Ok(Cow::Borrowed(raw));
    }
    if let Some(verbatim) = body.strip_prefix('<') {
        let uri = verbatim
            .strip_suffix('>')
            .ok_or_else(|| Error::invalid_tag(raw, "missing '>' in verbatim tag"))?;
        if !is_valid_uri(uri) {
            return Err(Error::invalid_tag(raw, "verbatim tag is not a valid URI"));
        }
        return Ok(Cow::Borrowed(raw));
    }

    let (prefix, suffix) = if let Some(suffix) = body.strip_prefix('!') {
        let prefix = directives.map_or(DEFAULT_SECONDARY_PREFIX, Directives::secondary_prefix);
        (prefix, suffix)
    } else if let Some((name, suffix)) = body.split_once('!') {
        let handle_len = name.len() + 2;
        let handle = raw.get(..handle_len).unwrap_or(raw);
        let prefix = directives
            .and_then(|directives| directives.named_prefix(handle))
            .ok_or_else(|| {
                Error::invalid_tag(raw, format!("undeclared tag handle '{handle}'"))
            })?;
        (prefix, suffix)
    } else {
        let prefix = directives.map_or(DEFAULT_PRIMARY_PREFIX, Directives::primary_prefix);
        (prefix, body)
    };

    if suffix.is_empty() {
        return Err(Error::invalid_tag(raw, "missing tag suffix"));
    }
    Ok(Cow::Owned(format!("!<{prefix}{suffix}>")))
}

/// Resolves a raw tag to its kind.
///
/// # Errors
///
/// Returns [`Error::InvalidTag`] for malformed tags and undeclared named handles.
pub fn resolve(raw: &str, directives: Option<&Directives>) -> Result<TagKind> {
    let normalized = normalize(raw, directives)?;
    Ok(kind_of_normalized(&normalized))
}

/// Maps an already normalized tag onto its kind.
#[must_use]
pub fn kind_of_normalized(normalized: &str) -> TagKind {
    if normalized == "!" {
        return TagKind::NonSpecific;
    }
    normalized
        .strip_prefix("!<")
        .and_then(|rest| rest.strip_suffix('>'))
        .map_or(TagKind::Custom, TagKind::from_uri)
}
