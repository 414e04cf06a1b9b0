// Copyright (c) 2026 Arista Networks, Inc.
// Use of this source code is governed by the Apache License 2.0
// that can be found in the LICENSE file.

//! Pull-based transcoding of any supported encoding into UTF-8 bytes.

use crate::error::EncodingError;

use super::encoding::{Detection, Encoding, detect_bytes, detect_utf16, detect_utf32};

type CharResult = Result<char, EncodingError>;

/// The UTF-8 encoding of the character currently being handed out.
#[derive(Debug, Default)]
struct PendingChar {
    buf: [u8; 4],
    len: usize,
    pos: usize,
}

impl PendingChar {
    fn load(&mut self, ch: char) {
        self.len = ch.encode_utf8(&mut self.buf).len();
        self.pos = 0;
    }

    fn next_byte(&mut self) -> Option<u8> {
        if self.pos >= self.len {
            return None;
        }
        let byte = self.buf.get(self.pos).copied();
        self.pos += 1;
        byte
    }
}

/// Iterates the characters of UTF-8 bytes, validating every sequence.
struct Utf8Chars<'a> {
    bytes: &'a [u8],
    /// Offset of `bytes` within the original input, for error reporting.
    base: usize,
    pos: usize,
}

impl Iterator for Utf8Chars<'_> {
    type Item = CharResult;

    fn next(&mut self) -> Option<Self::Item> {
        let rest = self.bytes.get(self.pos..)?;
        let &first = rest.first()?;
        let width = match first {
            0x00..=0x7F => 1,
            0xC2..=0xDF => 2,
            0xE0..=0xEF => 3,
            0xF0..=0xF4 => 4,
            _ => {
                return Some(Err(EncodingError::InvalidUtf8 {
                    offset: self.base + self.pos,
                }));
            }
        };
        let sequence = rest.get(..width.min(rest.len()))?;
        match std::str::from_utf8(sequence) {
            Ok(text) => {
                self.pos += width;
                text.chars().next().map(Ok)
            }
            Err(err) if err.error_len().is_none() => {
                Some(Err(EncodingError::TruncatedInput(Encoding::Utf8)))
            }
            Err(err) => Some(Err(EncodingError::InvalidUtf8 {
                offset: self.base + self.pos + err.valid_up_to(),
            })),
        }
    }
}

fn utf16_chars<'a>(
    units: impl Iterator<Item = u16> + 'a,
) -> impl Iterator<Item = CharResult> + 'a {
    char::decode_utf16(units)
        .map(|result| result.map_err(|err| EncodingError::UnpairedSurrogate(err.unpaired_surrogate())))
}

fn utf32_chars<'a>(units: impl Iterator<Item = u32> + 'a) -> impl Iterator<Item = CharResult> + 'a {
    units.map(|unit| char::from_u32(unit).ok_or(EncodingError::CodePointOutOfRange(unit)))
}

/// A byte cursor that yields the UTF-8 encoding of its input.
///
/// The encoding is detected once at construction and any byte order mark is
/// skipped. Characters are decoded one at a time as bytes are pulled, so at
/// most one source character and its UTF-8 form are buffered. The cursor
/// yields nothing after the first error.
pub struct Transcoder<'a> {
    detection: Detection,
    chars: Box<dyn Iterator<Item = CharResult> + 'a>,
    pending: PendingChar,
    failed: bool,
}

impl std::fmt::Debug for Transcoder<'_> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Transcoder")
            .field("detection", &self.detection)
            .field("pending", &self.pending)
            .field("failed", &self.failed)
            .finish_non_exhaustive()
    }
}

impl<'a> Transcoder<'a> {
    fn new(detection: Detection, chars: impl Iterator<Item = CharResult> + 'a) -> Self {
        Self {
            detection,
            chars: Box::new(chars),
            pending: PendingChar::default(),
            failed: false,
        }
    }

    /// Transcodes a byte input in whichever encoding it is detected to be in.
    #[must_use]
    pub fn from_bytes(bytes: &'a [u8]) -> Self {
        let detection = detect_bytes(bytes);
        let base = detection.bom_len().min(bytes.len());
        let body = bytes.get(base..).unwrap_or_default();
        match detection.encoding {
            Encoding::Utf8 => Self::new(
                detection,
                Utf8Chars {
                    bytes: body,
                    base,
                    pos: 0,
                },
            ),
            Encoding::Utf16Be | Encoding::Utf16Le => {
                let big_endian = detection.encoding == Encoding::Utf16Be;
                let pairs = body.chunks_exact(2);
                let truncated = (!pairs.remainder().is_empty())
                    .then_some(Err(EncodingError::TruncatedInput(detection.encoding)));
                let units = pairs.map(move |pair| {
                    let pair = [pair[0], pair[1]];
                    if big_endian {
                        u16::from_be_bytes(pair)
                    } else {
                        u16::from_le_bytes(pair)
                    }
                });
                Self::new(detection, utf16_chars(units).chain(truncated))
            }
            Encoding::Utf32Be | Encoding::Utf32Le => {
                let big_endian = detection.encoding == Encoding::Utf32Be;
                let quads = body.chunks_exact(4);
                let truncated = (!quads.remainder().is_empty())
                    .then_some(Err(EncodingError::TruncatedInput(detection.encoding)));
                let units = quads.map(move |quad| {
                    let quad = [quad[0], quad[1], quad[2], quad[3]];
                    if big_endian {
                        u32::from_be_bytes(quad)
                    } else {
                        u32::from_le_bytes(quad)
                    }
                });
                Self::new(detection, utf32_chars(units).chain(truncated))
            }
        }
    }

    /// Transcodes UTF-16 code units.
    ///
    /// A byte-swapped BOM or byte-swapped ASCII marks the units as little endian
    /// relative to their native value.
    ///
    /// # Errors
    ///
    /// Fails if the first units do not look like UTF-16.
    pub fn from_utf16(units: &'a [u16]) -> Result<Self, EncodingError> {
        let detection = detect_utf16(units)?;
        let swap = detection.encoding == Encoding::Utf16Le;
        let skip = usize::from(detection.has_bom);
        let units = units
            .iter()
            .skip(skip)
            .map(move |&unit| if swap { unit.swap_bytes() } else { unit });
        Ok(Self::new(detection, utf16_chars(units)))
    }

    /// Transcodes UTF-32 code units.
    ///
    /// # Errors
    ///
    /// Fails if the first unit does not look like UTF-32.
    pub fn from_utf32(units: &'a [u32]) -> Result<Self, EncodingError> {
        let detection = detect_utf32(units)?;
        let swap = detection.encoding == Encoding::Utf32Le;
        let skip = usize::from(detection.has_bom);
        let units = units
            .iter()
            .skip(skip)
            .map(move |&unit| if swap { unit.swap_bytes() } else { unit });
        Ok(Self::new(detection, utf32_chars(units)))
    }

    /// The detected encoding of the source.
    #[must_use]
    pub const fn encoding(&self) -> Encoding {
        self.detection.encoding
    }

    /// The full detection result, including whether a BOM was skipped.
    #[must_use]
    pub const fn detection(&self) -> Detection {
        self.detection
    }
}

impl Iterator for Transcoder<'_> {
    type Item = Result<u8, EncodingError>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.failed {
            return None;
        }
        if let Some(byte) = self.pending.next_byte() {
            return Some(Ok(byte));
        }
        match self.chars.next()? {
            Ok(ch) => {
                self.pending.load(ch);
                self.pending.next_byte().map(Ok)
            }
            Err(err) => {
                self.failed = true;
                Some(Err(err))
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn collect(transcoder: Transcoder<'_>) -> Result<Vec<u8>, EncodingError> {
        transcoder.collect()
    }

    #[test]
    fn test_utf8_passthrough_skips_bom() {
        let input = b"\xEF\xBB\xBFkey: \xC3\xA9";
        let transcoder = Transcoder::from_bytes(input);
        assert_eq!(transcoder.detection().bom_len(), 3);
        assert_eq!(collect(transcoder).unwrap(), "key: é".as_bytes());
    }

    #[test]
    fn test_utf16_bytes() {
        let be = [0xFE, 0xFF, 0x00, 0x61, 0xD8, 0x3D, 0xDE, 0x00];
        assert_eq!(
            collect(Transcoder::from_bytes(&be)).unwrap(),
            "a\u{1F600}".as_bytes()
        );

        let le = [0x61, 0x00, 0x3A, 0x00, 0x20, 0x00, 0x31, 0x00];
        let transcoder = Transcoder::from_bytes(&le);
        assert_eq!(transcoder.encoding(), Encoding::Utf16Le);
        assert_eq!(collect(transcoder).unwrap(), b"a: 1");
    }

    #[test]
    fn test_utf32_bytes() {
        let le = [0xFF, 0xFE, 0x00, 0x00, 0x61, 0x00, 0x00, 0x00, 0xE9, 0x00, 0x00, 0x00];
        assert_eq!(collect(Transcoder::from_bytes(&le)).unwrap(), "aé".as_bytes());

        let be = [0x00, 0x00, 0x00, 0x61, 0x00, 0x11, 0x00, 0x00];
        assert_eq!(
            collect(Transcoder::from_bytes(&be)),
            Err(EncodingError::CodePointOutOfRange(0x0011_0000))
        );
    }

    #[test]
    fn test_invalid_utf8() {
        let test_cases: [(&[u8], EncodingError); 4] = [
            (b"ab\xFFc", EncodingError::InvalidUtf8 { offset: 2 }),
            (b"a\xC3(", EncodingError::InvalidUtf8 { offset: 1 }),
            (b"\xED\xA0\x80", EncodingError::InvalidUtf8 { offset: 0 }),
            (b"a\xE2\x82", EncodingError::TruncatedInput(Encoding::Utf8)),
        ];
        for (input, expected) in test_cases {
            assert_eq!(collect(Transcoder::from_bytes(input)), Err(expected), "{input:02X?}");
        }
    }

    #[test]
    fn test_truncated_utf16() {
        let input = [0x00, 0x61, 0x00];
        assert_eq!(
            collect(Transcoder::from_bytes(&input)),
            Err(EncodingError::TruncatedInput(Encoding::Utf16Be))
        );
    }

    #[test]
    fn test_from_utf16_units() {
        let units: Vec<u16> = "\u{FEFF}x: \u{1F600}".encode_utf16().collect();
        let transcoder = Transcoder::from_utf16(&units).unwrap();
        assert!(transcoder.detection().has_bom);
        assert_eq!(collect(transcoder).unwrap(), "x: \u{1F600}".as_bytes());

        let swapped: Vec<u16> = "ab".encode_utf16().map(u16::swap_bytes).collect();
        assert_eq!(collect(Transcoder::from_utf16(&swapped).unwrap()).unwrap(), b"ab");
    }

    #[test]
    fn test_unpaired_surrogate() {
        let units = [0x0061, 0xD800, 0x0062];
        assert_eq!(
            collect(Transcoder::from_utf16(&units).unwrap()),
            Err(EncodingError::UnpairedSurrogate(0xD800))
        );
    }

    #[test]
    fn test_from_utf32_units() {
        let units: Vec<u32> = "a: \u{10FFFF}".chars().map(u32::from).collect();
        assert_eq!(
            collect(Transcoder::from_utf32(&units).unwrap()).unwrap(),
            "a: \u{10FFFF}".as_bytes()
        );
        assert!(Transcoder::from_utf32(&[0x0000_00E9]).is_err());
    }

    #[test]
    fn test_cursor_stops_after_error() {
        let mut transcoder = Transcoder::from_bytes(b"a\xFFb");
        assert_eq!(transcoder.next(), Some(Ok(b'a')));
        assert!(matches!(transcoder.next(), Some(Err(_))));
        assert_eq!(transcoder.next(), None);
    }
}
