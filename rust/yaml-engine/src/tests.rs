// Copyright (c) 2026 Arista Networks, Inc.
// Use of this source code is governed by the Apache License 2.0
// that can be found in the LICENSE file.

//! Scenario tests for the public entry points.
//!
//! These cover whole documents going through transcoding, parsing, scalar
//! and tag resolution, and serialization together.

#![allow(
    clippy::indexing_slicing,
    reason = "Tests benefit from direct indexing for readability"
)]

use std::borrow::Cow;

use super::*;

#[test]
fn test_simple_scalar() {
    let root = deserialize("hello").unwrap();
    assert!(matches!(&root.value, Value::String(text) if text == "hello"));
}

#[test]
fn test_plain_scalars_borrow_from_input() {
    let root = deserialize("key: plain value\nquoted: \"esc\\taped\"").unwrap();
    assert!(matches!(
        &root.at("key").unwrap().value,
        Value::String(Cow::Borrowed("plain value"))
    ));
    assert!(matches!(
        &root.at("quoted").unwrap().value,
        Value::String(Cow::Owned(text)) if text == "esc\taped"
    ));
}

#[test]
fn test_core_schema_resolution() {
    let input = "\
null_tilde: ~
null_word: Null
bool_upper: TRUE
int_decimal: -17
int_octal: 0o17
int_hex: 0xFF
float_exp: 1.5e3
float_dot: .5
float_inf: -.inf
leading_zero: 0123
version: 1.2.3
overflow: 99999999999999999999
";
    let root = deserialize(input).unwrap();
    assert!(root.at("null_tilde").unwrap().is_null());
    assert!(root.at("null_word").unwrap().is_null());
    assert!(root.at("bool_upper").unwrap().as_bool().unwrap());
    assert_eq!(root.at("int_decimal").unwrap().as_int().unwrap(), -17);
    assert_eq!(root.at("int_octal").unwrap().as_int().unwrap(), 15);
    assert_eq!(root.at("int_hex").unwrap().as_int().unwrap(), 255);
    assert!((root.at("float_exp").unwrap().as_float().unwrap() - 1500.0).abs() < f64::EPSILON);
    assert!((root.at("float_dot").unwrap().as_float().unwrap() - 0.5).abs() < f64::EPSILON);
    assert_eq!(
        root.at("float_inf").unwrap().as_float().unwrap(),
        f64::NEG_INFINITY
    );
    assert_eq!(root.at("leading_zero").unwrap().as_str().unwrap(), "0123");
    assert_eq!(root.at("version").unwrap().as_str().unwrap(), "1.2.3");
    assert_eq!(
        root.at("overflow").unwrap().as_str().unwrap(),
        "99999999999999999999"
    );
}

#[test]
fn test_tagged_overflow_is_an_error() {
    let err = deserialize("!!int 99999999999999999999").unwrap_err();
    assert!(matches!(
        err,
        Error::Parse(ParseError {
            kind: ErrorKind::ConversionFailed { .. },
            ..
        })
    ));
}

#[test]
fn test_tag_handles_from_directives() {
    let input = "%TAG ! tag:example.com,2000:app/\n%TAG !e! tag:example.com,2000:\n---\na: !foo 1\nb: !e!bar 2\n";
    let root = deserialize(input).unwrap();
    let directives = root.directives().unwrap();
    assert_eq!(
        normalize_tag(root.at("a").unwrap().tag_name().unwrap(), Some(directives)).unwrap(),
        "!<tag:example.com,2000:app/foo>"
    );
    assert_eq!(
        normalize_tag(root.at("b").unwrap().tag_name().unwrap(), Some(directives)).unwrap(),
        "!<tag:example.com,2000:bar>"
    );
}

#[test]
fn test_undeclared_named_handle() {
    assert!(matches!(
        deserialize("!x!foo value"),
        Err(Error::InvalidTag { .. })
    ));
}

#[test]
fn test_block_scalar_chomping() {
    let input = "clip: |\n  foo\n  bar\n\nstrip: |-\n  foo\n  bar\n\nkeep: |+\n  foo\n  bar\n\nfolded: >\n  foo\n  bar\n\n  baz\n";
    let root = deserialize(input).unwrap();
    assert_eq!(root.at("clip").unwrap().as_str().unwrap(), "foo\nbar\n");
    assert_eq!(root.at("strip").unwrap().as_str().unwrap(), "foo\nbar");
    assert_eq!(root.at("keep").unwrap().as_str().unwrap(), "foo\nbar\n\n");
    assert_eq!(root.at("folded").unwrap().as_str().unwrap(), "foo bar\nbaz\n");
}

#[test]
fn test_double_quoted_escapes() {
    let root = deserialize(r#"["\x30\x2B\x6d", "\U0010FFFF", "line\nbreak", "a\
  b"]"#)
    .unwrap();
    let items = root.as_sequence().unwrap();
    assert_eq!(items[0].as_str().unwrap(), "0+m");
    assert_eq!(items[1].as_str().unwrap(), "\u{10FFFF}");
    assert_eq!(items[2].as_str().unwrap(), "line\nbreak");
    assert_eq!(items[3].as_str().unwrap(), "ab");
}

#[test]
fn test_from_slice_encodings() {
    let utf8 = from_slice(b"\xEF\xBB\xBFa: 1").unwrap();
    assert_eq!(utf8.at("a").unwrap().as_int().unwrap(), 1);

    let mut utf16le = vec![0xFF, 0xFE];
    for unit in "a: [x]".encode_utf16() {
        utf16le.extend_from_slice(&unit.to_le_bytes());
    }
    let root = from_slice(&utf16le).unwrap();
    assert_eq!(root.at("a").unwrap().at_index(0).unwrap().as_str().unwrap(), "x");

    let mut utf32be = Vec::new();
    for ch in "k: v".chars() {
        utf32be.extend_from_slice(&u32::from(ch).to_be_bytes());
    }
    let root = from_slice(&utf32be).unwrap();
    assert_eq!(root.at("k").unwrap().as_str().unwrap(), "v");
}

#[test]
fn test_fixed_width_front_ends() {
    let units: Vec<u16> = "- a\n- b\n".encode_utf16().collect();
    assert_eq!(from_utf16(&units).unwrap().len().unwrap(), 2);

    let units: Vec<u32> = "a\n---\nb\n".chars().map(u32::from).collect();
    assert_eq!(from_utf32_docs(&units).unwrap().len(), 2);

    assert!(matches!(
        from_utf16(&[0xD800, 0x0041]),
        Err(Error::InvalidEncoding(_))
    ));
}

#[test]
fn test_from_reader() {
    let input: &[u8] = b"a: 1\n---\nb: 2\n";
    let docs = from_reader_docs(input).unwrap();
    assert_eq!(docs.len(), 2);
    let root = from_reader(input).unwrap();
    assert_eq!(root.at("a").unwrap().as_int().unwrap(), 1);
}

#[test]
fn test_parse_error_position() {
    let Err(Error::Parse(error)) = deserialize("a: 1\nb: [1, 2\n") else {
        panic!("expected a parse error");
    };
    assert_eq!(error.kind, ErrorKind::UnexpectedEof);
    assert_eq!(error.position.line, 2);
    assert!(error.to_string().contains("line 3"));
}

#[test]
fn test_documents_iterator() {
    let mut docs = documents("first\n---\nsecond\n...\n");
    assert_eq!(docs.next().unwrap().unwrap().as_str().unwrap(), "first");
    assert_eq!(docs.next().unwrap().unwrap().as_str().unwrap(), "second");
    assert!(docs.next().is_none());
}

#[test]
fn test_serialize_round_trip() {
    let input = "\
name: \"true\"
count: 3
ratio: 2.0
tags:
  - alpha
  - \"123\"
nested:
  inner:
    - [1, 2]
    - {}
";
    let root = deserialize(input).unwrap();
    let text = serialize(&root);
    let again = deserialize(&text).unwrap();
    assert_eq!(root, again);
    assert_eq!(again.at("name").unwrap().as_str().unwrap(), "true");
    assert!(again.at("ratio").unwrap().is_float());
}

#[test]
fn test_yaml_version_round_trip() {
    let mut root = deserialize("%YAML 1.1\n---\nkey: value\n").unwrap();
    assert_eq!(root.yaml_version(), YamlVersion::V1_1);
    let text = serialize(&root);
    assert!(text.starts_with("%YAML 1.1\n---\n"));

    root.set_yaml_version(YamlVersion::V1_2);
    assert!(serialize(&root).starts_with("%YAML 1.2\n"));
}
