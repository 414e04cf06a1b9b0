// Copyright (c) 2026 Arista Networks, Inc.
// Use of this source code is governed by the Apache License 2.0
// that can be found in the LICENSE file.

//! Core-schema classification of plain scalars.
//!
//! [`scan`] looks at the literal text of an untagged plain scalar and decides
//! which type the YAML 1.2 core schema assigns to it. The scan is a single
//! forward pass over the bytes: it never allocates and never backtracks, and
//! any byte that leaves the numeric grammar makes the scalar a string.

/// The type the core schema resolves a plain scalar to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, derive_more::Display)]
pub enum ScalarType {
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
}

/// Returns `true` for the core-schema spellings of null.
#[must_use]
pub fn is_null(text: &str) -> bool {
    matches!(text, "null" | "Null" | "NULL" | "~")
}

/// Returns the boolean denoted by a core-schema boolean spelling.
#[must_use]
pub fn parse_bool(text: &str) -> Option<bool> {
    match text {
        "true" | "True" | "TRUE" => Some(true),
        "false" | "False" | "FALSE" => Some(false),
        _ => None,
    }
}

/// Returns `true` for `.inf`/`.nan` spellings with an optional sign on infinity.
#[must_use]
pub fn is_special_float(text: &str) -> bool {
    let unsigned = text.strip_prefix(['-', '+']).unwrap_or(text);
    matches!(unsigned, ".inf" | ".Inf" | ".INF") || matches!(text, ".nan" | ".NaN" | ".NAN")
}

/// Classify the text of a plain scalar.
///
/// An empty scalar is null.
#[must_use]
pub fn scan(text: &str) -> ScalarType {
    if text.is_empty() || is_null(text) {
        return ScalarType::Null;
    }
    if parse_bool(text).is_some() {
        return ScalarType::Boolean;
    }
    if is_special_float(text) {
        return ScalarType::Float;
    }
    scan_number(text.as_bytes())
}

fn scan_number(bytes: &[u8]) -> ScalarType {
    let (signed, digits) = match bytes {
        [b'-' | b'+', rest @ ..] => (true, rest),
        _ => (false, bytes),
    };
    match digits {
        [] => ScalarType::String,
        [b'0'] => ScalarType::Integer,
        [b'0', b'o', rest @ ..] if !signed => scan_radix(rest, |b| matches!(b, b'0'..=b'7')),
        [b'0', b'x', rest @ ..] if !signed => scan_radix(rest, |b| b.is_ascii_hexdigit()),
        // Octal by leading zero is not part of YAML 1.2.
        [b'0', next, ..] if next.is_ascii_digit() => ScalarType::String,
        [b'.', rest @ ..] => scan_fraction(rest, true),
        [first, ..] if first.is_ascii_digit() => scan_decimal(digits),
        _ => ScalarType::String,
    }
}

fn scan_radix(digits: &[u8], is_digit: impl Fn(u8) -> bool) -> ScalarType {
    if !digits.is_empty() && digits.iter().all(|&b| is_digit(b)) {
        ScalarType::Integer
    } else {
        ScalarType::String
    }
}

fn scan_decimal(bytes: &[u8]) -> ScalarType {
    let int_len = bytes.iter().take_while(|b| b.is_ascii_digit()).count();
    match bytes.get(int_len..) {
        None | Some([]) => ScalarType::Integer,
        Some([b'.', rest @ ..]) => scan_fraction(rest, false),
        Some([b'e' | b'E', rest @ ..]) => scan_exponent(rest),
        Some(_) => ScalarType::String,
    }
}

/// Scans what follows the decimal point. A bare leading `.` needs at least one digit.
fn scan_fraction(bytes: &[u8], needs_digit: bool) -> ScalarType {
    let frac_len = bytes.iter().take_while(|b| b.is_ascii_digit()).count();
    if needs_digit && frac_len == 0 {
        return ScalarType::String;
    }
    match bytes.get(frac_len..) {
        None | Some([]) => ScalarType::Float,
        Some([b'e' | b'E', rest @ ..]) => scan_exponent(rest),
        Some(_) => ScalarType::String,
    }
}

fn scan_exponent(bytes: &[u8]) -> ScalarType {
    let digits = match bytes {
        [b'-' | b'+', rest @ ..] => rest,
        _ => bytes,
    };
    if !digits.is_empty() && digits.iter().all(u8::is_ascii_digit) {
        ScalarType::Float
    } else {
        ScalarType::String
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_scan_keywords() {
        let test_cases = [
            ("", ScalarType::Null),
            ("~", ScalarType::Null),
            ("null", ScalarType::Null),
            ("Null", ScalarType::Null),
            ("NULL", ScalarType::Null),
            ("nULL", ScalarType::String),
            ("true", ScalarType::Boolean),
            ("True", ScalarType::Boolean),
            ("TRUE", ScalarType::Boolean),
            ("false", ScalarType::Boolean),
            ("False", ScalarType::Boolean),
            ("FALSE", ScalarType::Boolean),
            ("yes", ScalarType::String),
            ("tRUE", ScalarType::String),
        ];
        for (text, expected) in test_cases {
            assert_eq!(scan(text), expected, "scan({text:?})");
        }
    }

    #[test]
    fn test_scan_special_floats() {
        for text in [".inf", ".Inf", ".INF", "-.inf", "+.Inf", "-.INF", ".nan", ".NaN", ".NAN"] {
            assert_eq!(scan(text), ScalarType::Float, "scan({text:?})");
        }
        for text in [".iNf", "-.nan", ".infinity", "inf", "nan"] {
            assert_eq!(scan(text), ScalarType::String, "scan({text:?})");
        }
    }

    #[test]
    fn test_scan_integers() {
        let test_cases = [
            ("0", ScalarType::Integer),
            ("-0", ScalarType::Integer),
            ("+0", ScalarType::Integer),
            ("123", ScalarType::Integer),
            ("-123", ScalarType::Integer),
            ("+123", ScalarType::Integer),
            ("0o17", ScalarType::Integer),
            ("0x1A", ScalarType::Integer),
            ("0xA0f", ScalarType::Integer),
            ("0o", ScalarType::String),
            ("0x", ScalarType::String),
            ("0o18", ScalarType::String),
            ("0xG", ScalarType::String),
            ("-0x1A", ScalarType::String),
            ("0123", ScalarType::String),
            ("-0123", ScalarType::String),
            ("-", ScalarType::String),
            ("+", ScalarType::String),
            ("12a", ScalarType::String),
            ("1_000", ScalarType::String),
        ];
        for (text, expected) in test_cases {
            assert_eq!(scan(text), expected, "scan({text:?})");
        }
    }

    #[test]
    fn test_scan_floats() {
        let test_cases = [
            ("1.5", ScalarType::Float),
            ("-1.5", ScalarType::Float),
            ("0.", ScalarType::Float),
            ("0.5", ScalarType::Float),
            ("1.", ScalarType::Float),
            (".5", ScalarType::Float),
            ("-.5", ScalarType::Float),
            ("1e10", ScalarType::Float),
            ("1E+10", ScalarType::Float),
            ("1.23e-4", ScalarType::Float),
            ("0e5", ScalarType::Float),
            ("1.2.3", ScalarType::String),
            ("1e", ScalarType::String),
            ("1e+", ScalarType::String),
            ("1.5e3x", ScalarType::String),
            (".", ScalarType::String),
            ("-.", ScalarType::String),
            ("..5", ScalarType::String),
        ];
        for (text, expected) in test_cases {
            assert_eq!(scan(text), expected, "scan({text:?})");
        }
    }

    #[test]
    fn test_scan_strings() {
        for text in ["foo", "foo bar", "0.1.2", "1-2", "2024-01-01", "-foo", "-.x", "é"] {
            assert_eq!(scan(text), ScalarType::String, "scan({text:?})");
        }
    }
}
