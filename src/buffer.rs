//! Contiguous byte accumulator for full-materialization transforms
//!
//! This module implements the growable buffer a [`crate::node::BufferedNode`] uses
//! to gather its entire input before the transform runs. Growth is bounded by a
//! hard capacity limit, and consumed or released regions are optionally zero-filled
//! so transformed content does not linger in memory the buffer no longer accounts for.

use crate::{Error, Result};
use bytes::{Buf, BytesMut};

/// Growable, contiguous byte container with bounded capacity
///
/// # Design
///
/// - Backed by `bytes::BytesMut` for amortized O(1) appends
/// - `append` fails once the configured limit would be exceeded, so a runaway
///   upstream cannot balloon memory
/// - Front consumption supports partial delivery across repeated reads
/// - Zeroing on consume/wipe is configurable; signing pipelines carry key-derived
///   content through these buffers
pub struct TransformBuffer {
    data: BytesMut,
    max_size: usize,
    zero_on_release: bool,
}

impl TransformBuffer {
    /// Create a buffer with the default capacity limit and zeroing enabled
    pub fn new() -> Self {
        Self::with_options(crate::DEFAULT_MAX_BUFFER_SIZE, true)
    }

    /// Create a buffer with an explicit capacity limit and zeroing policy
    pub fn with_options(max_size: usize, zero_on_release: bool) -> Self {
        Self {
            data: BytesMut::new(),
            max_size,
            zero_on_release,
        }
    }

    /// Append bytes to the end of the buffer
    ///
    /// Fails with a buffer error if the content would exceed the capacity limit;
    /// the existing content is left untouched in that case.
    pub fn append(&mut self, bytes: &[u8]) -> Result<()> {
        if self.data.len() + bytes.len() > self.max_size {
            return Err(Error::Buffer(format!(
                "Content size {} exceeds buffer capacity {}",
                self.data.len() + bytes.len(),
                self.max_size
            )));
        }
        self.data.extend_from_slice(bytes);
        Ok(())
    }

    /// Replace the entire content with the given bytes
    ///
    /// Used by processors whose output substitutes the input (digests, encodings).
    /// The previous content is wiped according to the zeroing policy.
    pub fn replace(&mut self, bytes: &[u8]) -> Result<()> {
        if bytes.len() > self.max_size {
            return Err(Error::Buffer(format!(
                "Replacement size {} exceeds buffer capacity {}",
                bytes.len(),
                self.max_size
            )));
        }
        self.wipe();
        self.data.extend_from_slice(bytes);
        Ok(())
    }

    /// Remove `n` bytes from the front of the buffer
    ///
    /// The vacated region is zero-filled first when the zeroing policy is active.
    /// Consuming more than is available clamps to the current length.
    pub fn consume_front(&mut self, n: usize) {
        let n = n.min(self.data.len());
        if self.zero_on_release {
            self.data[..n].fill(0);
        }
        self.data.advance(n);
    }

    /// Zero-fill (per policy) and discard the entire content
    pub fn wipe(&mut self) {
        if self.zero_on_release {
            self.data.fill(0);
        }
        self.data.clear();
    }

    /// Current content length in bytes
    pub fn len(&self) -> usize {
        self.data.len()
    }

    /// Check if the buffer holds no content
    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }

    /// View the current content
    pub fn as_slice(&self) -> &[u8] {
        &self.data
    }

    /// Capacity limit in bytes
    pub fn max_size(&self) -> usize {
        self.max_size
    }
}

impl Default for TransformBuffer {
    fn default() -> Self {
        Self::new()
    }
}

impl Drop for TransformBuffer {
    fn drop(&mut self) {
        self.wipe();
    }
}
