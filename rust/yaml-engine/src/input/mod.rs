// Copyright (c) 2026 Arista Networks, Inc.
// Use of this source code is governed by the Apache License 2.0
// that can be found in the LICENSE file.

//! Unicode input handling.
//!
//! Every input source is normalized to UTF-8 text before lexing. UTF-8 byte
//! input without transcoding needs is borrowed; everything else is decoded
//! through a [`Transcoder`] into an owned string.

mod encoding;
mod transcoder;

use std::borrow::Cow;
use std::io::Read;

pub use encoding::{Detection, Encoding, detect_bytes, detect_encoding, detect_utf16, detect_utf32};
pub use transcoder::Transcoder;

use crate::error::{EncodingError, Result};

fn drain(transcoder: Transcoder<'_>) -> Result<String> {
    let bytes = transcoder.collect::<Result<Vec<u8>, EncodingError>>()?;
    String::from_utf8(bytes).map_err(|err| {
        EncodingError::InvalidUtf8 {
            offset: err.utf8_error().valid_up_to(),
        }
        .into()
    })
}

/// Decodes a byte input into UTF-8 text, skipping any BOM.
///
/// UTF-8 input is borrowed; the other encodings are transcoded.
///
/// # Errors
///
/// Returns [`Error::InvalidEncoding`](crate::Error::InvalidEncoding) for malformed input.
pub fn decode_bytes(bytes: &[u8]) -> Result<(Detection, Cow<'_, str>)> {
    let transcoder = Transcoder::from_bytes(bytes);
    let detection = transcoder.detection();
    if detection.encoding != Encoding::Utf8 {
        return Ok((detection, Cow::Owned(drain(transcoder)?)));
    }
    let bom_len = detection.bom_len();
    let body = bytes.get(bom_len..).unwrap_or_default();
    match std::str::from_utf8(body) {
        Ok(text) => Ok((detection, Cow::Borrowed(text))),
        Err(err) if err.error_len().is_none() => {
            Err(EncodingError::TruncatedInput(Encoding::Utf8).into())
        }
        Err(err) => Err(EncodingError::InvalidUtf8 {
            offset: bom_len + err.valid_up_to(),
        }
        .into()),
    }
}

/// Decodes UTF-16 code units into UTF-8 text.
///
/// # Errors
///
/// Returns [`Error::InvalidEncoding`](crate::Error::InvalidEncoding) if the
/// units are not UTF-16 or contain an unpaired surrogate.
pub fn decode_utf16(units: &[u16]) -> Result<(Detection, String)> {
    let transcoder = Transcoder::from_utf16(units)?;
    let detection = transcoder.detection();
    Ok((detection, drain(transcoder)?))
}

/// Decodes UTF-32 code units into UTF-8 text.
///
/// # Errors
///
/// Returns [`Error::InvalidEncoding`](crate::Error::InvalidEncoding) if the
/// units are not UTF-32 or contain a value outside the Unicode range.
pub fn decode_utf32(units: &[u32]) -> Result<(Detection, String)> {
    let transcoder = Transcoder::from_utf32(units)?;
    let detection = transcoder.detection();
    Ok((detection, drain(transcoder)?))
}

/// Reads a whole stream and decodes it into UTF-8 text.
///
/// # Errors
///
/// Fails on I/O errors and malformed input.
pub fn read_to_string(mut reader: impl Read) -> Result<(Detection, String)> {
    let mut bytes = Vec::new();
    reader.read_to_end(&mut bytes)?;
    let (detection, text) = decode_bytes(&bytes)?;
    Ok((detection, text.into_owned()))
}
