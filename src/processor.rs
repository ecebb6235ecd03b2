//! Transform algorithms applied to fully-materialized content
//!
//! A [`TransformProcessor`] is the capability a buffered node runs exactly once on
//! its gathered input: given the complete content, produce this stage's output in
//! place. The implementations here cover the algorithms that genuinely need the
//! whole input at once — digests, MAC tags, and whole-content encodings.

use crate::buffer::TransformBuffer;
use crate::{Error, Result};
use hmac::{Hmac, Mac};
use sha2::{Digest, Sha256};

type HmacSha256 = Hmac<Sha256>;

/// Transform applied to a node's fully-materialized content
///
/// Implementations must be deterministic and side-effect-free with respect to
/// pipeline state; the node guarantees at most one invocation per gathered content.
pub trait TransformProcessor {
    /// Short identifier used in logs and error reports
    fn name(&self) -> &'static str;

    /// Replace or extend the materialized content with this transform's output
    fn process(&self, buffer: &mut TransformBuffer) -> Result<()>;
}

/// Leaves content untouched
///
/// Useful for stages that only need the buffering behavior itself, and as the
/// explicit form of a node constructed without a processor.
pub struct IdentityProcessor;

impl TransformProcessor for IdentityProcessor {
    fn name(&self) -> &'static str {
        "identity"
    }

    fn process(&self, _buffer: &mut TransformBuffer) -> Result<()> {
        Ok(())
    }
}

/// Replaces content with its SHA-256 digest (32 bytes)
pub struct Sha256DigestProcessor;

impl TransformProcessor for Sha256DigestProcessor {
    fn name(&self) -> &'static str {
        "sha256-digest"
    }

    fn process(&self, buffer: &mut TransformBuffer) -> Result<()> {
        let digest = Sha256::digest(buffer.as_slice());
        buffer.replace(&digest)
    }
}

/// Replaces content with its HMAC-SHA256 tag (32 bytes)
pub struct HmacSha256Processor {
    key: Vec<u8>,
}

impl HmacSha256Processor {
    /// Create a processor with the given secret key
    pub fn new(key: impl Into<Vec<u8>>) -> Self {
        Self { key: key.into() }
    }
}

impl TransformProcessor for HmacSha256Processor {
    fn name(&self) -> &'static str {
        "hmac-sha256"
    }

    fn process(&self, buffer: &mut TransformBuffer) -> Result<()> {
        let mut mac = HmacSha256::new_from_slice(&self.key).map_err(|e| Error::Process {
            processor: self.name(),
            reason: format!("Invalid key length: {}", e),
        })?;
        mac.update(buffer.as_slice());
        let tag = mac.finalize().into_bytes();
        buffer.replace(&tag)
    }
}

/// Replaces content with its standard base64 encoding
pub struct Base64EncodeProcessor;

impl TransformProcessor for Base64EncodeProcessor {
    fn name(&self) -> &'static str {
        "base64-encode"
    }

    fn process(&self, buffer: &mut TransformBuffer) -> Result<()> {
        use base64::Engine;
        let encoded = base64::engine::general_purpose::STANDARD.encode(buffer.as_slice());
        buffer.replace(encoded.as_bytes())
    }
}

/// Decodes standard base64 content back to raw bytes
///
/// Decoding is the case that forces buffering in the first place: a base64 stream
/// cannot be decoded chunk-by-chunk at arbitrary boundaries.
pub struct Base64DecodeProcessor;

impl TransformProcessor for Base64DecodeProcessor {
    fn name(&self) -> &'static str {
        "base64-decode"
    }

    fn process(&self, buffer: &mut TransformBuffer) -> Result<()> {
        use base64::Engine;
        let decoded = base64::engine::general_purpose::STANDARD
            .decode(buffer.as_slice())
            .map_err(|e| Error::Process {
                processor: self.name(),
                reason: format!("Invalid base64: {}", e),
            })?;
        buffer.replace(&decoded)
    }
}

/// Replaces content with its lowercase hexadecimal encoding
pub struct HexEncodeProcessor;

impl TransformProcessor for HexEncodeProcessor {
    fn name(&self) -> &'static str {
        "hex-encode"
    }

    fn process(&self, buffer: &mut TransformBuffer) -> Result<()> {
        let hex: String = buffer
            .as_slice()
            .iter()
            .map(|b| format!("{:02x}", b))
            .collect();
        buffer.replace(hex.as_bytes())
    }
}

/// Appends a 4-byte big-endian CRC32 of the content as an integrity trailer
pub struct Crc32TrailerProcessor;

impl TransformProcessor for Crc32TrailerProcessor {
    fn name(&self) -> &'static str {
        "crc32-trailer"
    }

    fn process(&self, buffer: &mut TransformBuffer) -> Result<()> {
        let checksum = crc32fast::hash(buffer.as_slice());
        buffer.append(&checksum.to_be_bytes())
    }
}
