// Copyright (c) 2026 Arista Networks, Inc.
// Use of this source code is governed by the Apache License 2.0
// that can be found in the LICENSE file.

//! Scalar parsing: unescaping, line folding, chomping and typed conversion.
//!
//! The parser borrows the raw text whenever it can be used as is, and only
//! builds an owned buffer when escapes, folding or chomping change it.

use std::borrow::Cow;
use std::iter::{Peekable, repeat_n};
use std::str::Chars;

use crate::error::ErrorKind;
use crate::escape::{decode_hex_escape, hex_escape_len, unescape_char};
use crate::scanner::{ScalarType, is_null, is_special_float, parse_bool, scan};
use crate::tag::TagKind;
use crate::value::{NodeType, Value};

/// The lexical style a scalar was written in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, derive_more::Display)]
pub enum ScalarStyle {
    #[display("plain")]
    Plain,
    #[display("single-quoted")]
    SingleQuoted,
    #[display("double-quoted")]
    DoubleQuoted,
    #[display("literal")]
    Literal,
    #[display("folded")]
    Folded,
}

impl ScalarStyle {
    #[must_use]
    pub const fn is_block(self) -> bool {
        matches!(self, Self::Literal | Self::Folded)
    }
}

/// Block scalar chomping indicator.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Chomping {
    /// `-` strip all trailing newlines
    Strip,
    /// (default) clip to single trailing newline
    #[default]
    Clip,
    /// `+` keep all trailing newlines
    Keep,
}

/// Header of a block scalar with its content indentation resolved.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct BlockHeader {
    pub chomping: Chomping,
    /// Number of indentation columns stripped from every content line.
    pub indent: usize,
}

impl BlockHeader {
    #[must_use]
    pub const fn new(chomping: Chomping, indent: usize) -> Self {
        Self { chomping, indent }
    }
}

/// Parses a plain or quoted scalar.
///
/// For quoted styles `text` is the content between the quotes.
///
/// # Errors
///
/// Fails on invalid escapes, on text that does not convert to the type its
/// tag demands and on collection tags.
pub fn parse_flow<'a>(
    style: ScalarStyle,
    tag: Option<TagKind>,
    text: &'a str,
) -> Result<Value<'a>, ErrorKind> {
    if style.is_block() {
        return parse_block(style, tag, text, BlockHeader::default());
    }
    let text = unfold(style, text)?;
    let target = match scalar_target(tag)? {
        Some(target) => Target::Forced(target),
        None if style == ScalarStyle::Plain => Target::Inferred(scan(&text)),
        None => Target::Inferred(ScalarType::String),
    };
    convert(text, target)
}

/// Parses the raw content lines of a literal or folded block scalar.
///
/// # Errors
///
/// Fails if a tag demands a type the final text does not convert to, or on
/// collection tags.
pub fn parse_block<'a>(
    style: ScalarStyle,
    tag: Option<TagKind>,
    text: &'a str,
    header: BlockHeader,
) -> Result<Value<'a>, ErrorKind> {
    let lines = BlockLines::new(text, header.indent);
    let body = match style {
        ScalarStyle::Literal => lines.literal(),
        ScalarStyle::Folded => lines.folded(),
        ScalarStyle::Plain | ScalarStyle::SingleQuoted | ScalarStyle::DoubleQuoted => {
            return parse_flow(style, tag, text);
        }
    };
    let text = lines.chomp(body, header.chomping);
    let target = scalar_target(tag)?.map_or(Target::Inferred(ScalarType::String), Target::Forced);
    convert(Cow::Owned(text), target)
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Target {
    /// Demanded by a core schema tag; conversion failures are errors.
    Forced(ScalarType),
    /// Inferred from the text; conversion failures fall back to a string.
    Inferred(ScalarType),
}

/// The type a core schema tag forces, if any.
fn scalar_target(tag: Option<TagKind>) -> Result<Option<ScalarType>, ErrorKind> {
    match tag {
        Some(TagKind::Null) => Ok(Some(ScalarType::Null)),
        Some(TagKind::Boolean) => Ok(Some(ScalarType::Boolean)),
        Some(TagKind::Integer) => Ok(Some(ScalarType::Integer)),
        Some(TagKind::Float) => Ok(Some(ScalarType::Float)),
        Some(TagKind::String | TagKind::NonSpecific) => Ok(Some(ScalarType::String)),
        Some(kind @ (TagKind::Sequence | TagKind::Mapping)) => Err(ErrorKind::IncompatibleTag {
            tag: format!("!!{kind}"),
            node: NodeType::String,
        }),
        Some(TagKind::Custom) | None => Ok(None),
    }
}

fn convert(text: Cow<'_, str>, target: Target) -> Result<Value<'_>, ErrorKind> {
    let (ty, forced) = match target {
        Target::Forced(ty) => (ty, true),
        Target::Inferred(ty) => (ty, false),
    };
    let converted = match ty {
        ScalarType::String => return Ok(Value::String(text)),
        ScalarType::Null => (text.is_empty() || is_null(&text)).then_some(Value::Null),
        ScalarType::Boolean => parse_bool(&text).map(Value::Bool),
        ScalarType::Integer => parse_int(&text).map(Value::Int),
        ScalarType::Float => parse_float(&text).map(Value::Float),
    };
    match converted {
        Some(value) => Ok(value),
        None if forced => Err(ErrorKind::ConversionFailed {
            target: ty,
            text: text.into_owned(),
        }),
        // Out of range for its inferred type; keep the text.
        None => Ok(Value::String(text)),
    }
}

/// Parses a core schema integer: decimal, `0o` octal or `0x` hexadecimal.
fn parse_int(text: &str) -> Option<i64> {
    let (negative, unsigned) = match text.strip_prefix('-') {
        Some(rest) => (true, rest),
        None => (false, text.strip_prefix('+').unwrap_or(text)),
    };
    let magnitude = if let Some(octal) = unsigned.strip_prefix("0o") {
        parse_radix(octal, 8)?
    } else if let Some(hex) = unsigned.strip_prefix("0x") {
        parse_radix(hex, 16)?
    } else {
        if unsigned.len() > 1 && unsigned.starts_with('0') {
            return None;
        }
        parse_radix(unsigned, 10)?
    };
    if negative {
        0_i64.checked_sub_unsigned(magnitude)
    } else {
        i64::try_from(magnitude).ok()
    }
}

fn parse_radix(digits: &str, radix: u32) -> Option<u64> {
    if digits.is_empty() || !digits.chars().all(|ch| ch.is_digit(radix)) {
        return None;
    }
    u64::from_str_radix(digits, radix).ok()
}

/// Parses a core schema float, rejecting values outside the finite range.
fn parse_float(text: &str) -> Option<f64> {
    if is_special_float(text) {
        return Some(match text {
            ".nan" | ".NaN" | ".NAN" => f64::NAN,
            negative if negative.starts_with('-') => f64::NEG_INFINITY,
            _ => f64::INFINITY,
        });
    }
    // Rust accepts spellings such as "inf" that the core schema does not.
    if !matches!(scan(text), ScalarType::Float | ScalarType::Integer) {
        return None;
    }
    text.parse::<f64>().ok().filter(|value| value.is_finite())
}

const fn is_blank(ch: char) -> bool {
    matches!(ch, ' ' | '\t')
}

fn skip_blanks(chars: &mut Peekable<Chars<'_>>) {
    while chars.next_if(|&ch| is_blank(ch)).is_some() {}
}

/// Consumes the rest of a line break that started with `first`.
fn finish_break(chars: &mut Peekable<Chars<'_>>, first: char) {
    if first == '\r' {
        chars.next_if_eq(&'\n');
    }
}

/// Consumes a run of line breaks, the first of which was already taken,
/// together with the blanks around them. Returns the number of breaks.
fn consume_breaks(chars: &mut Peekable<Chars<'_>>, first: char) -> usize {
    finish_break(chars, first);
    let mut breaks = 1;
    loop {
        skip_blanks(chars);
        match chars.next_if(|&ch| matches!(ch, '\n' | '\r')) {
            Some(ch) => {
                finish_break(chars, ch);
                breaks += 1;
            }
            None => return breaks,
        }
    }
}

/// Applies escapes (double-quoted only), `''` (single-quoted only) and line
/// folding to the text of a flow scalar.
fn unfold(style: ScalarStyle, text: &str) -> Result<Cow<'_, str>, ErrorKind> {
    let needs_work = match style {
        ScalarStyle::DoubleQuoted => text.contains(['\\', '\n', '\r']),
        ScalarStyle::SingleQuoted => text.contains(['\'', '\n', '\r']),
        _ => text.contains(['\n', '\r']),
    };
    if !needs_work {
        return Ok(Cow::Borrowed(text));
    }

    let mut out = String::with_capacity(text.len());
    // Content before this offset came from escapes and is never trimmed.
    let mut protected = 0;
    let mut chars = text.chars().peekable();
    while let Some(ch) = chars.next() {
        match ch {
            '\n' | '\r' => {
                let keep = out.trim_end_matches(is_blank).len().max(protected);
                out.truncate(keep);
                match consume_breaks(&mut chars, ch) {
                    1 => out.push(' '),
                    breaks => out.extend(repeat_n('\n', breaks - 1)),
                }
                protected = out.len();
            }
            '\'' if style == ScalarStyle::SingleQuoted => {
                chars.next_if_eq(&'\'');
                out.push('\'');
            }
            '\\' if style == ScalarStyle::DoubleQuoted => {
                unescape(&mut chars, &mut out)?;
                protected = out.len();
            }
            _ => out.push(ch),
        }
    }
    Ok(Cow::Owned(out))
}

/// Decodes the escape sequence following a backslash.
fn unescape(chars: &mut Peekable<Chars<'_>>, out: &mut String) -> Result<(), ErrorKind> {
    let Some(ch) = chars.next() else {
        return Err(ErrorKind::InvalidEscape('\\'));
    };
    if matches!(ch, '\n' | '\r') {
        // An escaped line break joins the lines without a separator.
        finish_break(chars, ch);
        skip_blanks(chars);
        while let Some(next) = chars.next_if(|&ch| matches!(ch, '\n' | '\r')) {
            finish_break(chars, next);
            out.push('\n');
            skip_blanks(chars);
        }
        return Ok(());
    }
    if let Some(unescaped) = unescape_char(ch) {
        out.push(unescaped);
        return Ok(());
    }
    let len = hex_escape_len(ch).ok_or(ErrorKind::InvalidEscape(ch))?;
    let digits: String = chars.by_ref().take(len).collect();
    if digits.len() != len {
        return Err(ErrorKind::InvalidEscape(ch));
    }
    let decoded = decode_hex_escape(&digits).ok_or(ErrorKind::InvalidEscape(ch))?;
    out.push(decoded);
    Ok(())
}

/// The content lines of a block scalar with indentation removed.
struct BlockLines<'a> {
    lines: Vec<&'a str>,
    /// Whether the raw text ended with a line break.
    final_break: bool,
}

impl<'a> BlockLines<'a> {
    fn new(text: &'a str, indent: usize) -> Self {
        if text.is_empty() {
            return Self {
                lines: Vec::new(),
                final_break: false,
            };
        }
        let (body, final_break) = match text.strip_suffix('\n') {
            Some(body) => (body, true),
            None => (text, false),
        };
        let lines = body
            .split('\n')
            .map(|line| {
                let line = line.strip_suffix('\r').unwrap_or(line);
                let strip = line.bytes().take_while(|&b| b == b' ').count().min(indent);
                line.get(strip..).unwrap_or_default()
            })
            .collect();
        Self { lines, final_break }
    }

    fn last_content(&self) -> Option<usize> {
        self.lines.iter().rposition(|line| !line.is_empty())
    }

    fn content(&self) -> &[&'a str] {
        let end = self.last_content().map_or(0, |idx| idx + 1);
        self.lines.get(..end).unwrap_or_default()
    }

    /// Number of line breaks after the last content line.
    fn trailing_breaks(&self) -> usize {
        let after_content = match self.last_content() {
            Some(idx) => self.lines.len() - 1 - idx,
            None => self.lines.len().saturating_sub(1),
        };
        after_content + usize::from(self.final_break)
    }

    fn literal(&self) -> String {
        self.content().join("\n")
    }

    fn folded(&self) -> String {
        let mut out = String::new();
        // Whether the previous content line was more indented.
        let mut previous: Option<bool> = None;
        let mut blank_lines = 0;
        for &line in self.content() {
            if line.is_empty() {
                blank_lines += 1;
                continue;
            }
            let more_indented = line.starts_with(is_blank);
            match previous {
                None => out.extend(repeat_n('\n', blank_lines)),
                Some(false) if !more_indented && blank_lines == 0 => out.push(' '),
                Some(false) if !more_indented => out.extend(repeat_n('\n', blank_lines)),
                Some(_) => out.extend(repeat_n('\n', blank_lines + 1)),
            }
            out.push_str(line);
            previous = Some(more_indented);
            blank_lines = 0;
        }
        out
    }

    fn chomp(&self, mut body: String, chomping: Chomping) -> String {
        let trailing = self.trailing_breaks();
        match chomping {
            Chomping::Strip => {}
            Chomping::Clip => {
                if !body.is_empty() && trailing > 0 {
                    body.push('\n');
                }
            }
            Chomping::Keep => body.extend(repeat_n('\n', trailing)),
        }
        body
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn string(text: &str) -> Value<'_> {
        Value::String(Cow::Borrowed(text))
    }

    #[test]
    fn test_plain_scalars_resolve_by_scan() {
        let test_cases = [
            ("null", Value::Null),
            ("~", Value::Null),
            ("true", Value::Bool(true)),
            ("FALSE", Value::Bool(false)),
            ("42", Value::Int(42)),
            ("-17", Value::Int(-17)),
            ("+5", Value::Int(5)),
            ("0o17", Value::Int(15)),
            ("0x1A", Value::Int(26)),
            ("1.5", Value::Float(1.5)),
            ("-.5", Value::Float(-0.5)),
            ("1e3", Value::Float(1000.0)),
            ("0123", string("0123")),
            ("1.2.3", string("1.2.3")),
            ("hello", string("hello")),
        ];
        for (text, expected) in test_cases {
            assert_eq!(
                parse_flow(ScalarStyle::Plain, None, text).unwrap(),
                expected,
                "plain {text:?}"
            );
        }
    }

    #[test]
    fn test_special_floats() {
        fn parse(text: &str) -> Value<'_> {
            parse_flow(ScalarStyle::Plain, None, text).unwrap()
        }
        assert_eq!(parse(".inf"), Value::Float(f64::INFINITY));
        assert_eq!(parse("+.Inf"), Value::Float(f64::INFINITY));
        assert_eq!(parse("-.INF"), Value::Float(f64::NEG_INFINITY));
        assert!(matches!(parse(".NaN"), Value::Float(value) if value.is_nan()));
    }

    #[test]
    fn test_quoted_scalars_are_strings() {
        for style in [ScalarStyle::SingleQuoted, ScalarStyle::DoubleQuoted] {
            for text in ["null", "true", "42", "1.5", ""] {
                assert_eq!(parse_flow(style, None, text).unwrap(), string(text));
            }
        }
    }

    #[test]
    fn test_unmodified_text_is_borrowed() {
        for style in [
            ScalarStyle::Plain,
            ScalarStyle::SingleQuoted,
            ScalarStyle::DoubleQuoted,
        ] {
            let value = parse_flow(style, None, "some text").unwrap();
            assert!(matches!(value, Value::String(Cow::Borrowed("some text"))));
        }
    }

    #[test]
    fn test_line_folding() {
        let test_cases = [
            (ScalarStyle::Plain, "foo\n  bar", "foo bar"),
            (ScalarStyle::Plain, "foo  \n  bar\n\n  baz", "foo bar\nbaz"),
            (ScalarStyle::Plain, "a\n\n\n b", "a\n\nb"),
            (ScalarStyle::SingleQuoted, " foo\n bar ", " foo bar "),
            (ScalarStyle::SingleQuoted, "it''s\n  here", "it's here"),
            (ScalarStyle::DoubleQuoted, "foo \n\n  bar", "foo\nbar"),
            (ScalarStyle::DoubleQuoted, "trailing\n", "trailing "),
            (ScalarStyle::Plain, "foo\r\n bar", "foo bar"),
        ];
        for (style, text, expected) in test_cases {
            assert_eq!(
                parse_flow(style, None, text).unwrap(),
                string(expected),
                "{style} {text:?}"
            );
        }
    }

    #[test]
    fn test_double_quoted_escapes() {
        let test_cases = [
            ("\\x30\\x2B\\x6d", "0+m"),
            ("\\U0010FFFF", "\u{10FFFF}"),
            ("\\u00e9t\\u00E9", "été"),
            ("tab\\there", "tab\there"),
            ("quote\\\" slash\\/ back\\\\", "quote\" slash/ back\\"),
            ("\\N\\_\\L\\P", "\u{0085}\u{00A0}\u{2028}\u{2029}"),
            ("\\0\\a\\b\\v\\f\\r\\e\\n", "\0\x07\x08\x0B\x0C\r\x1B\n"),
            // Escaped break: no separator, next line's indentation removed.
            ("foo\\\n    bar", "foobar"),
            ("foo \\\n  bar", "foo bar"),
            // Blanks produced by escapes survive folding.
            ("foo\\t\n  bar", "foo\t bar"),
            ("foo\\x20 \n bar", "foo  bar"),
        ];
        for (text, expected) in test_cases {
            assert_eq!(
                parse_flow(ScalarStyle::DoubleQuoted, None, text).unwrap(),
                string(expected),
                "double-quoted {text:?}"
            );
        }
    }

    #[test]
    fn test_invalid_escapes() {
        let test_cases = [
            ("bad \\q", 'q'),
            ("short \\x4", 'x'),
            ("nonhex \\uZZZZ", 'u'),
            ("surrogate \\uD800", 'u'),
            ("range \\U00110000", 'U'),
            ("single quote \\'", '\''),
        ];
        for (text, escape) in test_cases {
            assert_eq!(
                parse_flow(ScalarStyle::DoubleQuoted, None, text),
                Err(ErrorKind::InvalidEscape(escape)),
                "{text:?}"
            );
        }
    }

    #[test]
    fn test_forced_types() {
        let test_cases = [
            (TagKind::Integer, "0xA0f", Value::Int(0xA0F)),
            (TagKind::Integer, "-0x10", Value::Int(-16)),
            (TagKind::Float, "1", Value::Float(1.0)),
            (TagKind::Float, ".5", Value::Float(0.5)),
            (TagKind::Boolean, "True", Value::Bool(true)),
            (TagKind::Null, "~", Value::Null),
            (TagKind::Null, "", Value::Null),
            (TagKind::String, "42", string("42")),
            (TagKind::NonSpecific, "true", string("true")),
        ];
        for (tag, text, expected) in test_cases {
            assert_eq!(
                parse_flow(ScalarStyle::Plain, Some(tag), text).unwrap(),
                expected,
                "{tag} {text:?}"
            );
        }
        // Quoted text converts too when a tag asks for it.
        assert_eq!(
            parse_flow(ScalarStyle::DoubleQuoted, Some(TagKind::Integer), "12").unwrap(),
            Value::Int(12)
        );
        // Custom tags keep the plain scalar resolution.
        assert_eq!(
            parse_flow(ScalarStyle::Plain, Some(TagKind::Custom), "12").unwrap(),
            Value::Int(12)
        );
    }

    #[test]
    fn test_forced_conversion_failures() {
        let test_cases = [
            (TagKind::Integer, "abc", ScalarType::Integer),
            (TagKind::Integer, "0123", ScalarType::Integer),
            (TagKind::Integer, "0o8", ScalarType::Integer),
            (TagKind::Integer, "1.5", ScalarType::Integer),
            (TagKind::Float, "inf", ScalarType::Float),
            (TagKind::Float, "1e999", ScalarType::Float),
            (TagKind::Boolean, "yes", ScalarType::Boolean),
            (TagKind::Null, "none", ScalarType::Null),
        ];
        for (tag, text, target) in test_cases {
            assert_eq!(
                parse_flow(ScalarStyle::Plain, Some(tag), text),
                Err(ErrorKind::ConversionFailed {
                    target,
                    text: text.to_owned()
                }),
                "{tag} {text:?}"
            );
        }
    }

    #[test]
    fn test_integer_overflow_recovery() {
        let text = "99999999999999999999";
        assert_eq!(
            parse_flow(ScalarStyle::Plain, None, text).unwrap(),
            string(text)
        );
        assert!(matches!(
            parse_flow(ScalarStyle::Plain, Some(TagKind::Integer), text),
            Err(ErrorKind::ConversionFailed { .. })
        ));
        assert_eq!(
            parse_flow(ScalarStyle::Plain, None, "-9223372036854775808").unwrap(),
            Value::Int(i64::MIN)
        );
        assert_eq!(
            parse_flow(ScalarStyle::Plain, None, "9223372036854775808").unwrap(),
            string("9223372036854775808")
        );
        assert_eq!(
            parse_flow(ScalarStyle::Plain, None, "1e400").unwrap(),
            string("1e400")
        );
    }

    #[test]
    fn test_collection_tags_are_rejected() {
        assert!(matches!(
            parse_flow(ScalarStyle::Plain, Some(TagKind::Sequence), "a"),
            Err(ErrorKind::IncompatibleTag { .. })
        ));
        assert!(matches!(
            parse_block(
                ScalarStyle::Literal,
                Some(TagKind::Mapping),
                "  a\n",
                BlockHeader::new(Chomping::Clip, 2)
            ),
            Err(ErrorKind::IncompatibleTag { .. })
        ));
    }

    fn block(style: ScalarStyle, text: &str, chomping: Chomping, indent: usize) -> Value<'_> {
        parse_block(style, None, text, BlockHeader::new(chomping, indent)).unwrap()
    }

    #[test]
    fn test_literal_chomping() {
        let test_cases = [
            ("  foo\n  bar\n", Chomping::Clip, "foo\nbar\n"),
            ("  foo\n  bar\n", Chomping::Strip, "foo\nbar"),
            ("  foo\n  bar\n", Chomping::Keep, "foo\nbar\n"),
            ("  foo\n  bar\n\n", Chomping::Keep, "foo\nbar\n\n"),
            ("  foo\n  bar\n\n", Chomping::Clip, "foo\nbar\n"),
            ("  foo\n  bar\n  \n\n", Chomping::Strip, "foo\nbar"),
            ("  foo", Chomping::Clip, "foo"),
            ("", Chomping::Clip, ""),
            ("\n\n", Chomping::Clip, ""),
            ("\n\n", Chomping::Keep, "\n\n"),
        ];
        for (text, chomping, expected) in test_cases {
            assert_eq!(
                block(ScalarStyle::Literal, text, chomping, 2),
                string(expected),
                "{chomping:?} {text:?}"
            );
        }
    }

    #[test]
    fn test_literal_keeps_extra_indentation() {
        assert_eq!(
            block(ScalarStyle::Literal, "  a\n    b\n \n  c\n", Chomping::Clip, 2),
            string("a\n  b\n\nc\n")
        );
    }

    #[test]
    fn test_folded() {
        let test_cases = [
            ("  foo\n  bar\n  \n\n", "foo bar\n"),
            ("  foo\n\n  bar\n", "foo\nbar\n"),
            ("  foo\n\n\n  bar\n", "foo\n\nbar\n"),
            ("  foo\n    code\n  bar\n", "foo\n  code\nbar\n"),
            ("  foo\n\n    code\n\n  bar\n", "foo\n\n  code\n\nbar\n"),
            ("\n  foo\n", "\nfoo\n"),
            ("  a\n  b\n  c", "a b c"),
        ];
        for (text, expected) in test_cases {
            assert_eq!(
                block(ScalarStyle::Folded, text, Chomping::Clip, 2),
                string(expected),
                "folded {text:?}"
            );
        }
    }

    #[test]
    fn test_block_scalars_with_tags() {
        let header = BlockHeader::new(Chomping::Strip, 2);
        assert_eq!(
            parse_block(ScalarStyle::Literal, Some(TagKind::Integer), "  42\n", header).unwrap(),
            Value::Int(42)
        );
        // Untagged block scalars never resolve by content.
        assert_eq!(
            parse_block(ScalarStyle::Literal, None, "  42\n", header).unwrap(),
            string("42")
        );
    }
}
