// Copyright (c) 2026 Arista Networks, Inc.
// Use of this source code is governed by the Apache License 2.0
// that can be found in the LICENSE file.

//! Encoding and byte order mark detection.
//!
//! Detection looks at the first four bytes of the input only. A BOM decides
//! the encoding outright; without one the first character is assumed to be
//! ASCII and the positions of zero bytes reveal code unit width and byte order.

use crate::error::EncodingError;

/// The Unicode encodings an input may arrive in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, derive_more::Display)]
pub enum Encoding {
    #[default]
    #[display("UTF-8")]
    Utf8,
    #[display("UTF-16BE")]
    Utf16Be,
    #[display("UTF-16LE")]
    Utf16Le,
    #[display("UTF-32BE")]
    Utf32Be,
    #[display("UTF-32LE")]
    Utf32Le,
}

impl Encoding {
    /// Size of one code unit in bytes.
    #[must_use]
    pub const fn unit_width(self) -> usize {
        match self {
            Self::Utf8 => 1,
            Self::Utf16Be | Self::Utf16Le => 2,
            Self::Utf32Be | Self::Utf32Le => 4,
        }
    }

    /// Length of this encoding's byte order mark in bytes.
    #[must_use]
    pub const fn bom_len(self) -> usize {
        match self {
            Self::Utf8 => 3,
            Self::Utf16Be | Self::Utf16Le => 2,
            Self::Utf32Be | Self::Utf32Le => 4,
        }
    }
}

/// Result of encoding detection.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct Detection {
    pub encoding: Encoding,
    /// Whether the input starts with a byte order mark.
    pub has_bom: bool,
}

impl Detection {
    const fn with_bom(encoding: Encoding) -> Self {
        Self {
            encoding,
            has_bom: true,
        }
    }

    const fn without_bom(encoding: Encoding) -> Self {
        Self {
            encoding,
            has_bom: false,
        }
    }

    /// Number of leading bytes to skip before the first character.
    #[must_use]
    pub const fn bom_len(self) -> usize {
        if self.has_bom {
            self.encoding.bom_len()
        } else {
            0
        }
    }
}

/// Detects the encoding of an input from its first four bytes.
#[must_use]
pub const fn detect_encoding(bytes: [u8; 4]) -> Detection {
    match bytes {
        [0xEF, 0xBB, 0xBF, _] => Detection::with_bom(Encoding::Utf8),
        // The UTF-32LE BOM starts with the UTF-16LE one, so it must be checked first.
        [0x00, 0x00, 0xFE, 0xFF] => Detection::with_bom(Encoding::Utf32Be),
        [0xFF, 0xFE, 0x00, 0x00] => Detection::with_bom(Encoding::Utf32Le),
        [0xFE, 0xFF, _, _] => Detection::with_bom(Encoding::Utf16Be),
        [0xFF, 0xFE, _, _] => Detection::with_bom(Encoding::Utf16Le),
        [0x00, 0x00, 0x00, 0x01..=0x7F] => Detection::without_bom(Encoding::Utf32Be),
        [0x01..=0x7F, 0x00, 0x00, 0x00] => Detection::without_bom(Encoding::Utf32Le),
        [0x00, 0x01..=0x7F, _, _] => Detection::without_bom(Encoding::Utf16Be),
        [0x01..=0x7F, 0x00, _, _] => Detection::without_bom(Encoding::Utf16Le),
        _ => Detection::without_bom(Encoding::Utf8),
    }
}

/// Detects the encoding of a byte input of any length.
///
/// Inputs shorter than four bytes are padded with `0xFF`, which never takes
/// part in a zero-byte pattern.
#[must_use]
pub fn detect_bytes(bytes: &[u8]) -> Detection {
    let mut head = [0xFF; 4];
    for (slot, &byte) in head.iter_mut().zip(bytes) {
        *slot = byte;
    }
    detect_encoding(head)
}

/// Detects the byte order of UTF-16 code units.
///
/// # Errors
///
/// Returns [`EncodingError::UnitWidthMismatch`] if the units do not look like UTF-16.
pub fn detect_utf16(units: &[u16]) -> Result<Detection, EncodingError> {
    let Some(&first) = units.first() else {
        return Ok(Detection::without_bom(Encoding::Utf16Be));
    };
    let second = units.get(1).copied().unwrap_or(0xFFFF);
    let [b0, b1] = first.to_be_bytes();
    let [b2, b3] = second.to_be_bytes();
    let detection = detect_encoding([b0, b1, b2, b3]);
    match detection.encoding {
        Encoding::Utf16Be | Encoding::Utf16Le => Ok(detection),
        detected => Err(EncodingError::UnitWidthMismatch {
            detected,
            unit_bits: 16,
        }),
    }
}

/// Detects the byte order of UTF-32 code units.
///
/// # Errors
///
/// Returns [`EncodingError::UnitWidthMismatch`] if the units do not look like UTF-32.
pub fn detect_utf32(units: &[u32]) -> Result<Detection, EncodingError> {
    let Some(&first) = units.first() else {
        return Ok(Detection::without_bom(Encoding::Utf32Be));
    };
    let detection = detect_encoding(first.to_be_bytes());
    match detection.encoding {
        Encoding::Utf32Be | Encoding::Utf32Le => Ok(detection),
        detected => Err(EncodingError::UnitWidthMismatch {
            detected,
            unit_bits: 32,
        }),
    }
}
