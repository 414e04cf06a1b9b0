// Copyright (c) 2026 Arista Networks, Inc.
// Use of this source code is governed by the Apache License 2.0
// that can be found in the LICENSE file.

//! URI character validation for tag prefixes and verbatim tags.

const URI_PUNCTUATION: &str = ";/?:@&=+$,_.!~*'()#[]-";

/// Returns `true` if `text` is a non-empty run of URI characters.
///
/// Accepts ASCII alphanumerics, the URI punctuation set, `%HH` escaped
/// octets and any non-ASCII character.
#[must_use]
pub fn is_valid_uri(text: &str) -> bool {
    if text.is_empty() {
        return false;
    }
    let mut chars = text.chars();
    while let Some(ch) = chars.next() {
        let valid = match ch {
            '%' => {
                let high = chars.next();
                let low = chars.next();
                matches!((high, low), (Some(h), Some(l)) if h.is_ascii_hexdigit() && l.is_ascii_hexdigit())
            }
            ch if ch.is_ascii_alphanumeric() => true,
            ch if URI_PUNCTUATION.contains(ch) => true,
            ch => !ch.is_ascii(),
        };
        if !valid {
            return false;
        }
    }
    true
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_valid_uris() {
        for uri in [
            "tag:yaml.org,2002:",
            "tag:example.com,2000:app/",
            "!",
            "!my-",
            "http://example.com/a?b=c&d=e#frag",
            "%21%7e",
            "tag:überall.de:",
        ] {
            assert!(is_valid_uri(uri), "{uri:?} should be valid");
        }
    }

    #[test]
    fn test_invalid_uris() {
        for uri in ["", "has space", "a{b}", "%2", "%zz", "quote\"", "back\\slash", "<>"] {
            assert!(!is_valid_uri(uri), "{uri:?} should be invalid");
        }
    }
}
