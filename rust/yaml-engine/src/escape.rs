// Copyright (c) 2026 Arista Networks, Inc.
// Use of this source code is governed by the Apache License 2.0
// that can be found in the LICENSE file.

//! Escape sequences of double-quoted scalars.

use std::borrow::Cow;

/// Returns the character denoted by a single-character escape (`\n`, `\t`, ...).
///
/// `\x`, `\u` and `\U` are not covered here; see [`hex_escape_len`].
#[must_use]
pub const fn unescape_char(ch: char) -> Option<char> {
    let unescaped = match ch {
        '0' => '\0',
        'a' => '\x07',
        'b' => '\x08',
        't' | '\t' => '\t',
        'n' => '\n',
        'v' => '\x0B',
        'f' => '\x0C',
        'r' => '\r',
        'e' => '\x1B',
        ' ' => ' ',
        '"' => '"',
        '/' => '/',
        '\\' => '\\',
        'N' => '\u{0085}',
        '_' => '\u{00A0}',
        'L' => '\u{2028}',
        'P' => '\u{2029}',
        _ => return None,
    };
    Some(unescaped)
}

/// Number of hex digits following a `\x`, `\u` or `\U` escape.
#[must_use]
pub const fn hex_escape_len(ch: char) -> Option<usize> {
    match ch {
        'x' => Some(2),
        'u' => Some(4),
        'U' => Some(8),
        _ => None,
    }
}

/// Decodes the hex digits of a `\x`, `\u` or `\U` escape into a character.
///
/// Returns `None` for non-hex input, surrogates and code points above `U+10FFFF`.
#[must_use]
pub fn decode_hex_escape(digits: &str) -> Option<char> {
    if digits.is_empty() || !digits.bytes().all(|b| b.is_ascii_hexdigit()) {
        return None;
    }
    u32::from_str_radix(digits, 16).ok().and_then(char::from_u32)
}

/// The escape sequence written for `ch` inside double quotes, if it needs one.
fn escape_sequence(ch: char) -> Option<&'static str> {
    let escaped = match ch {
        '\0' => "\\0",
        '\x07' => "\\a",
        '\x08' => "\\b",
        '\t' => "\\t",
        '\n' => "\\n",
        '\x0B' => "\\v",
        '\x0C' => "\\f",
        '\r' => "\\r",
        '\x1B' => "\\e",
        '"' => "\\\"",
        '\\' => "\\\\",
        '\u{0085}' => "\\N",
        '\u{00A0}' => "\\_",
        '\u{2028}' => "\\L",
        '\u{2029}' => "\\P",
        _ => return None,
    };
    Some(escaped)
}

/// Characters without a short escape that still cannot appear verbatim:
/// C0 and C1 controls, the byte order mark and the noncharacters `U+FFFE`/`U+FFFF`.
const fn needs_hex_escape(ch: char) -> bool {
    matches!(
        ch,
        '\x01'..='\x06'
            | '\x0E'..='\x1A'
            | '\x1C'..='\x1F'
            | '\x7F'..='\u{84}'
            | '\u{86}'..='\u{9F}'
            | '\u{FEFF}'
            | '\u{FFFE}'
            | '\u{FFFF}'
    )
}

/// Returns `true` if `text` contains a character that must be escaped in double quotes.
#[must_use]
pub fn needs_escape(text: &str) -> bool {
    text.chars()
        .any(|ch| escape_sequence(ch).is_some() || needs_hex_escape(ch))
}

/// Escapes `text` for use as the body of a double-quoted scalar.
///
/// Borrows the input when nothing needs escaping.
#[must_use]
pub fn escape(text: &str) -> Cow<'_, str> {
    if !needs_escape(text) {
        return Cow::Borrowed(text);
    }
    let mut escaped = String::with_capacity(text.len() + 8);
    for ch in text.chars() {
        if let Some(seq) = escape_sequence(ch) {
            escaped.push_str(seq);
        } else if needs_hex_escape(ch) {
            let code = u32::from(ch);
            escaped.push_str(&if code <= 0xFF {
                format!("\\x{code:02X}")
            } else {
                format!("\\u{code:04X}")
            });
        } else {
            escaped.push(ch);
        }
    }
    Cow::Owned(escaped)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_unescape_char() {
        let test_cases = [
            ('0', '\0'),
            ('a', '\x07'),
            ('b', '\x08'),
            ('t', '\t'),
            ('\t', '\t'),
            ('n', '\n'),
            ('v', '\x0B'),
            ('f', '\x0C'),
            ('r', '\r'),
            ('e', '\x1B'),
            (' ', ' '),
            ('"', '"'),
            ('/', '/'),
            ('\\', '\\'),
            ('N', '\u{0085}'),
            ('_', '\u{00A0}'),
            ('L', '\u{2028}'),
            ('P', '\u{2029}'),
        ];
        for (escape, expected) in test_cases {
            assert_eq!(unescape_char(escape), Some(expected), "\\{escape}");
        }
        assert_eq!(unescape_char('q'), None);
        assert_eq!(unescape_char('\''), None);
    }

    #[test]
    fn test_decode_hex_escape() {
        assert_eq!(decode_hex_escape("30"), Some('0'));
        assert_eq!(decode_hex_escape("2B"), Some('+'));
        assert_eq!(decode_hex_escape("6d"), Some('m'));
        assert_eq!(decode_hex_escape("00e9"), Some('é'));
        assert_eq!(decode_hex_escape("0010FFFF"), Some('\u{10FFFF}'));
        assert_eq!(decode_hex_escape("00110000"), None);
        assert_eq!(decode_hex_escape("D800"), None);
        assert_eq!(decode_hex_escape("zz"), None);
        assert_eq!(decode_hex_escape("+1"), None);
        assert_eq!(decode_hex_escape(""), None);
    }

    #[test]
    fn test_escape() {
        let test_cases = [
            ("plain text", "plain text"),
            ("foo\"bar", "foo\\\"bar"),
            ("back\\slash", "back\\\\slash"),
            ("line\nbreak", "line\\nbreak"),
            ("tab\there", "tab\\there"),
            ("\x01\x7F", "\\x01\\x7F"),
            ("\u{0085}\u{00A0}\u{2028}\u{2029}", "\\N\\_\\L\\P"),
            ("\u{00A1}\u{3028}", "\u{00A1}\u{3028}"),
            ("a\u{80}b\u{9F}", "a\\x80b\\x9F"),
            ("a\u{FEFF}b", "a\\uFEFFb"),
            ("\u{FFFE}\u{FFFF}", "\\uFFFE\\uFFFF"),
        ];
        for (input, expected) in test_cases {
            assert_eq!(escape(input), expected, "escape({input:?})");
        }
        assert!(matches!(escape("nothing to do"), Cow::Borrowed(_)));
    }
}
