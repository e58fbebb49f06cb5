// SPDX-License-Identifier: Apache-2.0 OR MIT
// Copyright (c) 2025-2026 naskel.com

//! Sample type and CDR string payload encoding.
//!
//! Payloads cross the middleware boundary as encoded bytes. String fields use
//! the CDR layout: 4-byte little-endian length (including the NUL
//! terminator), UTF-8 bytes, NUL.

use thiserror::Error;

/// Payload decode errors.
#[derive(Debug, Error)]
pub enum PayloadError {
    #[error("payload too short for a CDR string")]
    Truncated,

    #[error("CDR string length {len} exceeds payload size {available}")]
    BadLength { len: usize, available: usize },

    #[error("payload is not valid UTF-8")]
    Utf8(#[from] std::str::Utf8Error),
}

/// Encode a string as a CDR string payload.
pub fn encode_string(s: &str) -> Vec<u8> {
    let len = s.len() + 1; // terminating NUL
    let mut out = Vec::with_capacity(4 + len);
    out.extend_from_slice(&(len as u32).to_le_bytes());
    out.extend_from_slice(s.as_bytes());
    out.push(0);
    out
}

/// Decode a CDR string payload.
pub fn decode_string(payload: &[u8]) -> Result<String, PayloadError> {
    if payload.len() < 4 {
        return Err(PayloadError::Truncated);
    }

    let len = u32::from_le_bytes([payload[0], payload[1], payload[2], payload[3]]) as usize;
    if len == 0 || 4 + len > payload.len() {
        return Err(PayloadError::BadLength {
            len,
            available: payload.len().saturating_sub(4),
        });
    }

    let bytes = &payload[4..4 + len - 1]; // strip NUL
    Ok(std::str::from_utf8(bytes)?.to_string())
}

/// The HelloWorld sample record: a single string field.
///
/// One instance is allocated before the write loop and its `msg` field is
/// overwritten each iteration.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct HelloWorld {
    pub msg: String,
}

impl HelloWorld {
    /// Type name advertised at registration and topic creation.
    pub const TYPE_NAME: &'static str = "HelloWorld";

    pub fn new(msg: impl Into<String>) -> Self {
        Self { msg: msg.into() }
    }

    /// Encode this sample into its wire payload.
    pub fn to_payload(&self) -> Vec<u8> {
        encode_string(&self.msg)
    }

    /// Decode a sample from its wire payload.
    pub fn from_payload(payload: &[u8]) -> Result<Self, PayloadError> {
        Ok(Self {
            msg: decode_string(payload)?,
        })
    }
}
