//! Opaque page-cursor tokens.
//!
//! A cursor is an [`Item`] serialized as JSON, gzip-compressed and encoded as
//! URL-safe Base64 without padding, so it can travel in a query string.

use crate::common::error::{Error, Result};
use crate::common::field::Item;

use base64::Engine;
use base64::engine::general_purpose::URL_SAFE_NO_PAD;
use flate2::{Compression, read};
use std::io::Read;

/// Largest decompressed cursor accepted by [`decode_cursor`], in bytes.
pub const MAX_CURSOR_BYTES: u64 = 64 * 1024;

/// Encode a resume key into a cursor token.
pub fn encode_cursor(item: &Item) -> Result<String> {
    let json = serde_json::to_vec(item)
        .map_err(|err| Error::invalid_argument(format!("Cursor cannot be serialized: {err}")))?;
    let mut compressed = Vec::new();
    read::GzEncoder::new(json.as_slice(), Compression::fast())
        .read_to_end(&mut compressed)
        .map_err(|err| Error::invalid_argument(format!("Cursor cannot be compressed: {err}")))?;
    Ok(URL_SAFE_NO_PAD.encode(compressed))
}

/// Decode a cursor token produced by [`encode_cursor`].
pub fn decode_cursor(token: &str) -> Result<Item> {
    let compressed = URL_SAFE_NO_PAD
        .decode(token.trim().trim_end_matches('='))
        .map_err(|err| Error::invalid_argument(format!("Cursor is not valid Base64: {err}")))?;
    let mut json = Vec::new();
    read::GzDecoder::new(compressed.as_slice())
        .take(MAX_CURSOR_BYTES + 1)
        .read_to_end(&mut json)
        .map_err(|err| Error::invalid_argument(format!("Cursor cannot be decompressed: {err}")))?;
    if json.len() as u64 > MAX_CURSOR_BYTES {
        return Err(Error::invalid_argument(format!(
            "Cursor exceeds {MAX_CURSOR_BYTES} bytes"
        )));
    }
    serde_json::from_slice(&json)
        .map_err(|err| Error::invalid_argument(format!("Cursor is not a valid item: {err}")))
}
