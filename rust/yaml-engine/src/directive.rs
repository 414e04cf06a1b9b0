// Copyright (c) 2026 Arista Networks, Inc.
// Use of this source code is governed by the Apache License 2.0
// that can be found in the LICENSE file.

//! Document directives (`%YAML`, `%TAG`).
//!
//! Directive lines are lexed with small chumsky grammars into [`Directive`]
//! values, which are then folded into the per-document [`Directives`]
//! record. The record is shared read-only by every node of its document.

use chumsky::prelude::*;
use ordermap::OrderMap;

use crate::error::ErrorKind;
use crate::uri::is_valid_uri;

/// Default prefix of the primary tag handle `!`.
pub const DEFAULT_PRIMARY_PREFIX: &str = "!";

/// Default prefix of the secondary tag handle `!!`.
pub const DEFAULT_SECONDARY_PREFIX: &str = "tag:yaml.org,2002:";

/// The YAML language version a document declares.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, derive_more::Display)]
pub enum YamlVersion {
    #[display("1.1")]
    V1_1,
    #[default]
    #[display("1.2")]
    V1_2,
}

/// A directive line as written in the document prologue.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Directive<'input> {
    /// `%YAML <major>.<minor>`
    Yaml(&'input str),
    /// `%TAG <handle> <prefix>`
    Tag {
        handle: &'input str,
        prefix: &'input str,
    },
    /// Any other directive name; ignored.
    Reserved(&'input str),
}

impl std::fmt::Display for Directive<'_> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Yaml(version) => write!(f, "%YAML {version}"),
            Self::Tag { handle, prefix } => write!(f, "%TAG {handle} {prefix}"),
            Self::Reserved(name) => write!(f, "%{name}"),
        }
    }
}

fn version_grammar<'src>() -> impl Parser<'src, &'src str, &'src str, extra::Err<Rich<'src, char>>>
{
    text::digits(10)
        .then(just('.'))
        .then(text::digits(10))
        .to_slice()
        .then_ignore(end())
}

fn tag_grammar<'src>()
-> impl Parser<'src, &'src str, (&'src str, &'src str), extra::Err<Rich<'src, char>>> {
    let word_char = any().filter(|c: &char| c.is_ascii_alphanumeric() || *c == '-');
    let handle = choice((
        just('!')
            .then(word_char.repeated().at_least(1))
            .then(just('!'))
            .to_slice(),
        just("!!").to_slice(),
        just('!').to_slice(),
    ));
    let prefix = none_of(" \t").repeated().at_least(1).to_slice();
    handle
        .then_ignore(one_of(" \t").repeated().at_least(1))
        .then(prefix)
        .then_ignore(end())
}

/// Lexes one directive line.
///
/// The line must start with `%` and must not contain the trailing comment.
pub(crate) fn parse_directive(line: &str) -> Result<Directive<'_>, ErrorKind> {
    let body = line
        .strip_prefix('%')
        .ok_or_else(|| ErrorKind::InvalidDirectiveDetail("missing '%'".to_owned()))?
        .trim_end_matches([' ', '\t']);
    let (name, args) = body
        .split_once([' ', '\t'])
        .map_or((body, ""), |(name, args)| {
            (name, args.trim_start_matches([' ', '\t']))
        });
    match name {
        "" => Err(ErrorKind::InvalidDirectiveDetail(
            "missing directive name".to_owned(),
        )),
        "YAML" => version_grammar()
            .parse(args)
            .into_result()
            .map(Directive::Yaml)
            .map_err(|_| {
                ErrorKind::InvalidDirectiveDetail(format!("malformed %YAML version '{args}'"))
            }),
        "TAG" => tag_grammar()
            .parse(args)
            .into_result()
            .map(|(handle, prefix)| Directive::Tag { handle, prefix })
            .map_err(|_| {
                ErrorKind::InvalidDirectiveDetail(format!("malformed %TAG arguments '{args}'"))
            }),
        reserved => Ok(Directive::Reserved(reserved)),
    }
}

fn is_valid_prefix(prefix: &str) -> bool {
    match prefix.strip_prefix('!') {
        Some(local) => local.is_empty() || is_valid_uri(local),
        None => is_valid_uri(prefix),
    }
}

/// Directive state of one document.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Directives {
    version: YamlVersion,
    version_specified: bool,
    primary_prefix: Option<String>,
    secondary_prefix: Option<String>,
    /// Named handles (`!e!`) and their prefixes, in declaration order.
    named_handles: OrderMap<String, String>,
}

impl Directives {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub const fn version(&self) -> YamlVersion {
        self.version
    }

    /// Returns `true` if the version came from a `%YAML` directive or was set explicitly.
    #[must_use]
    pub const fn is_version_specified(&self) -> bool {
        self.version_specified
    }

    pub fn set_version(&mut self, version: YamlVersion) {
        self.version = version;
        self.version_specified = true;
    }

    /// Prefix of the `!` handle.
    #[must_use]
    pub fn primary_prefix(&self) -> &str {
        self.primary_prefix
            .as_deref()
            .unwrap_or(DEFAULT_PRIMARY_PREFIX)
    }

    /// Prefix of the `!!` handle.
    #[must_use]
    pub fn secondary_prefix(&self) -> &str {
        self.secondary_prefix
            .as_deref()
            .unwrap_or(DEFAULT_SECONDARY_PREFIX)
    }

    /// The `!` prefix, if a `%TAG` directive declared it.
    #[must_use]
    pub fn declared_primary_prefix(&self) -> Option<&str> {
        self.primary_prefix.as_deref()
    }

    /// The `!!` prefix, if a `%TAG` directive declared it.
    #[must_use]
    pub fn declared_secondary_prefix(&self) -> Option<&str> {
        self.secondary_prefix.as_deref()
    }

    /// Prefix of a named handle such as `!e!`.
    #[must_use]
    pub fn named_prefix(&self, handle: &str) -> Option<&str> {
        self.named_handles.get(handle).map(String::as_str)
    }

    /// Named handles with their prefixes, in declaration order.
    pub fn named_handles(&self) -> impl Iterator<Item = (&str, &str)> {
        self.named_handles
            .iter()
            .map(|(handle, prefix)| (handle.as_str(), prefix.as_str()))
    }

    /// Returns `true` if nothing differs from an undeclared document.
    #[must_use]
    pub fn is_default(&self) -> bool {
        !self.version_specified
            && self.primary_prefix.is_none()
            && self.secondary_prefix.is_none()
            && self.named_handles.is_empty()
    }

    /// Declares the prefix of a tag handle.
    ///
    /// # Errors
    ///
    /// Fails if the handle was already declared or the prefix is not a valid URI.
    pub fn add_tag_handle(&mut self, handle: &str, prefix: &str) -> Result<(), ErrorKind> {
        if !is_valid_prefix(prefix) {
            return Err(ErrorKind::InvalidDirectiveDetail(format!(
                "invalid tag prefix '{prefix}'"
            )));
        }
        let duplicate = || ErrorKind::DuplicateDirectiveNamed(format!("TAG {handle}"));
        match handle {
            "!" if self.primary_prefix.is_some() => Err(duplicate()),
            "!" => {
                self.primary_prefix = Some(prefix.to_owned());
                Ok(())
            }
            "!!" if self.secondary_prefix.is_some() => Err(duplicate()),
            "!!" => {
                self.secondary_prefix = Some(prefix.to_owned());
                Ok(())
            }
            named if self.named_handles.contains_key(named) => Err(duplicate()),
            named => {
                self.named_handles
                    .insert(named.to_owned(), prefix.to_owned());
                Ok(())
            }
        }
    }

    /// Folds a lexed directive into this record.
    pub(crate) fn apply(&mut self, directive: Directive<'_>) -> Result<(), ErrorKind> {
        match directive {
            Directive::Yaml(text) => {
                if self.version_specified {
                    return Err(ErrorKind::DuplicateDirectiveNamed("YAML".to_owned()));
                }
                self.set_version(parse_version(text)?);
                Ok(())
            }
            Directive::Tag { handle, prefix } => self.add_tag_handle(handle, prefix),
            Directive::Reserved(name) => {
                log::warn!("Ignoring reserved directive %{name}");
                Ok(())
            }
        }
    }
}

fn parse_version(text: &str) -> Result<YamlVersion, ErrorKind> {
    let invalid = || ErrorKind::InvalidDirectiveDetail(format!("unsupported YAML version {text}"));
    let (major, minor) = text.split_once('.').ok_or_else(invalid)?;
    let major: u32 = major.parse().map_err(|_| invalid())?;
    let minor: u32 = minor.parse().map_err(|_| invalid())?;
    match (major, minor) {
        (1, 0 | 1) => Ok(YamlVersion::V1_1),
        (1, 2) => Ok(YamlVersion::V1_2),
        (1, _) => {
            log::warn!("YAML version {text} is newer than 1.2; parsing as 1.2");
            Ok(YamlVersion::V1_2)
        }
        _ => Err(invalid()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_directive_lines() {
        let test_cases = [
            ("%YAML 1.2", Directive::Yaml("1.2")),
            ("%YAML\t1.1  ", Directive::Yaml("1.1")),
            (
                "%TAG ! tag:example.com,2000:",
                Directive::Tag {
                    handle: "!",
                    prefix: "tag:example.com,2000:",
                },
            ),
            (
                "%TAG !! tag:yaml.org,2002:",
                Directive::Tag {
                    handle: "!!",
                    prefix: "tag:yaml.org,2002:",
                },
            ),
            (
                "%TAG !e-x! !my-",
                Directive::Tag {
                    handle: "!e-x!",
                    prefix: "!my-",
                },
            ),
            ("%FOO bar baz", Directive::Reserved("FOO")),
        ];
        for (line, expected) in test_cases {
            assert_eq!(parse_directive(line), Ok(expected), "{line:?}");
        }
    }

    #[test]
    fn test_malformed_directive_lines() {
        for line in [
            "%",
            "%YAML",
            "%YAML 1",
            "%YAML 1.2.3",
            "%YAML 1.2 extra",
            "%TAG !",
            "%TAG e! prefix",
            "%TAG !e prefix",
            "%TAG ! a b",
        ] {
            assert!(
                matches!(
                    parse_directive(line),
                    Err(ErrorKind::InvalidDirectiveDetail(_))
                ),
                "{line:?} should be rejected"
            );
        }
    }

    #[test]
    fn test_versions() {
        let mut directives = Directives::new();
        assert!(!directives.is_version_specified());
        assert_eq!(directives.version(), YamlVersion::V1_2);
        directives.apply(Directive::Yaml("1.1")).unwrap();
        assert_eq!(directives.version(), YamlVersion::V1_1);
        assert!(directives.is_version_specified());
        assert_eq!(
            directives.apply(Directive::Yaml("1.2")),
            Err(ErrorKind::DuplicateDirectiveNamed("YAML".to_owned()))
        );

        assert_eq!(parse_version("1.3"), Ok(YamlVersion::V1_2));
        assert!(parse_version("2.0").is_err());
        assert!(parse_version("1.99999999999").is_err());
    }

    #[test]
    fn test_tag_handles() {
        let mut directives = Directives::new();
        assert!(directives.is_default());
        assert_eq!(directives.primary_prefix(), "!");
        assert_eq!(directives.secondary_prefix(), "tag:yaml.org,2002:");

        directives.add_tag_handle("!", "!local-").unwrap();
        directives.add_tag_handle("!!", "tag:example.com,2000:").unwrap();
        directives.add_tag_handle("!e!", "tag:e.com,2000:").unwrap();
        assert!(!directives.is_default());
        assert_eq!(directives.primary_prefix(), "!local-");
        assert_eq!(directives.secondary_prefix(), "tag:example.com,2000:");
        assert_eq!(directives.named_prefix("!e!"), Some("tag:e.com,2000:"));
        assert_eq!(directives.named_prefix("!f!"), None);

        for handle in ["!", "!!", "!e!"] {
            assert!(matches!(
                directives.add_tag_handle(handle, "tag:other,2000:"),
                Err(ErrorKind::DuplicateDirectiveNamed(_))
            ));
        }
        assert!(matches!(
            directives.add_tag_handle("!g!", "bad prefix"),
            Err(ErrorKind::InvalidDirectiveDetail(_))
        ));
    }

    #[test]
    fn test_named_handles_keep_order() {
        let mut directives = Directives::new();
        directives.add_tag_handle("!b!", "tag:b,2000:").unwrap();
        directives.add_tag_handle("!a!", "tag:a,2000:").unwrap();
        let handles: Vec<_> = directives.named_handles().collect();
        assert_eq!(handles, [("!b!", "tag:b,2000:"), ("!a!", "tag:a,2000:")]);
    }
}
