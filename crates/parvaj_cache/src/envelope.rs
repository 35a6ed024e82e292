//! Binary envelope for the persisted cache state.
//!
//! A cache file is a 4-byte little-endian header length, a `bincode`-encoded
//! [`EnvelopeHeader`], then the `bincode`-encoded payload. The header carries
//! magic bytes, a format version, the tool version that wrote it, and a
//! checksum of the payload so a truncated or foreign file is never trusted.

use std::path::Path;

use parvaj_common::ContentHash;
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};

use crate::error::CacheError;

/// Magic bytes identifying a Parvaj cache file.
const ENVELOPE_MAGIC: [u8; 4] = *b"PRVJ";

/// Current envelope format version. Increment on breaking changes to the
/// header or payload layout.
const ENVELOPE_FORMAT_VERSION: u32 = 1;

/// Header prepended to every cache file.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EnvelopeHeader {
    /// Magic bytes: must be `b"PRVJ"`.
    pub magic: [u8; 4],

    /// Envelope format version.
    pub format_version: u32,

    /// Version of the tool that wrote the file.
    pub tool_version: String,

    /// Content hash of the payload.
    pub checksum: ContentHash,
}

/// Serializes `value` into an envelope stamped with `tool_version`.
pub fn encode<T: Serialize>(value: &T, tool_version: &str) -> Result<Vec<u8>, CacheError> {
    let payload = bincode::serde::encode_to_vec(value, bincode::config::standard()).map_err(
        |e| CacheError::Serialization {
            reason: e.to_string(),
        },
    )?;

    let header = EnvelopeHeader {
        magic: ENVELOPE_MAGIC,
        format_version: ENVELOPE_FORMAT_VERSION,
        tool_version: tool_version.to_string(),
        checksum: ContentHash::from_bytes(&payload),
    };
    let header_bytes = bincode::serde::encode_to_vec(&header, bincode::config::standard())
        .map_err(|e| CacheError::Serialization {
            reason: e.to_string(),
        })?;

    let header_len = header_bytes.len() as u32;
    let mut output = Vec::with_capacity(4 + header_bytes.len() + payload.len());
    output.extend_from_slice(&header_len.to_le_bytes());
    output.extend_from_slice(&header_bytes);
    output.extend_from_slice(&payload);
    Ok(output)
}

/// Validates the envelope in `raw` and deserializes its payload.
///
/// `path` is only used for error messages.
pub fn decode<T: DeserializeOwned>(
    raw: &[u8],
    tool_version: &str,
    path: &Path,
) -> Result<T, CacheError> {
    let invalid = |reason: &str| CacheError::InvalidHeader {
        path: path.to_path_buf(),
        reason: reason.to_string(),
    };

    if raw.len() < 4 {
        return Err(invalid("file shorter than the header length prefix"));
    }
    let mut len_bytes = [0u8; 4];
    len_bytes.copy_from_slice(&raw[..4]);
    let header_len = u32::from_le_bytes(len_bytes) as usize;
    if raw.len() < 4 + header_len {
        return Err(invalid("truncated header"));
    }

    let (header, _): (EnvelopeHeader, usize) =
        bincode::serde::decode_from_slice(&raw[4..4 + header_len], bincode::config::standard())
            .map_err(|e| invalid(&e.to_string()))?;

    if header.magic != ENVELOPE_MAGIC {
        return Err(invalid("wrong magic bytes"));
    }
    if header.format_version != ENVELOPE_FORMAT_VERSION {
        return Err(CacheError::VersionMismatch {
            path: path.to_path_buf(),
            expected: ENVELOPE_FORMAT_VERSION.to_string(),
            actual: header.format_version.to_string(),
        });
    }
    if header.tool_version != tool_version {
        return Err(CacheError::VersionMismatch {
            path: path.to_path_buf(),
            expected: tool_version.to_string(),
            actual: header.tool_version,
        });
    }

    let payload = &raw[4 + header_len..];
    let actual = ContentHash::from_bytes(payload);
    if actual != header.checksum {
        return Err(CacheError::ChecksumMismatch {
            path: path.to_path_buf(),
            expected: header.checksum.to_string(),
            actual: actual.to_string(),
        });
    }

    bincode::serde::decode_from_slice(payload, bincode::config::standard())
        .map(|(value, _)| value)
        .map_err(|e| CacheError::Serialization {
            reason: e.to_string(),
        })
}
