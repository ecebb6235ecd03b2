//! In-memory chain endpoints
//!
//! A chain needs a head that serves the document bytes and a tail that collects
//! the final output. These endpoints honor the same [`ChainNode`] contract as any
//! other stage, so a buffered node composes with them without special cases. They
//! also double as the natural drivers in tests.

use crate::node::ChainNode;
use crate::Result;

/// Serves fixed content from the head of a chain
pub struct MemorySource {
    data: Vec<u8>,
    position: usize,
}

impl MemorySource {
    /// Create a source over the given content
    pub fn new(data: impl Into<Vec<u8>>) -> Self {
        Self {
            data: data.into(),
            position: 0,
        }
    }

    /// Bytes not yet served
    pub fn remaining(&self) -> usize {
        self.data.len() - self.position
    }
}

impl ChainNode for MemorySource {
    fn read(&mut self, out: &mut [u8]) -> Result<usize> {
        let n = out.len().min(self.remaining());
        out[..n].copy_from_slice(&self.data[self.position..self.position + n]);
        self.position += n;
        Ok(n)
    }

    // A source has no upstream role; pushed bytes have nowhere to go.
    fn write(&mut self, _data: &[u8]) -> Result<()> {
        Ok(())
    }

    fn flush(&mut self) -> Result<()> {
        Ok(())
    }
}

/// Collects everything written at the tail of a chain
#[derive(Default)]
pub struct MemorySink {
    data: Vec<u8>,
    writes: usize,
    flushes: usize,
}

impl MemorySink {
    /// Create an empty sink
    pub fn new() -> Self {
        Self::default()
    }

    /// Everything written so far, in arrival order
    pub fn content(&self) -> &[u8] {
        &self.data
    }

    /// Consume the sink, returning the collected content
    pub fn into_content(self) -> Vec<u8> {
        self.data
    }

    /// Number of write calls received
    pub fn writes(&self) -> usize {
        self.writes
    }

    /// Number of flush calls received
    pub fn flushes(&self) -> usize {
        self.flushes
    }
}

impl ChainNode for MemorySink {
    // A sink serves nothing downstream.
    fn read(&mut self, _out: &mut [u8]) -> Result<usize> {
        Ok(0)
    }

    fn write(&mut self, data: &[u8]) -> Result<()> {
        self.data.extend_from_slice(data);
        self.writes += 1;
        Ok(())
    }

    fn flush(&mut self) -> Result<()> {
        self.flushes += 1;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_source_serves_in_chunks() {
        let mut source = MemorySource::new(b"ABCDE".to_vec());
        let mut out = [0u8; 2];

        assert_eq!(source.read(&mut out).unwrap(), 2);
        assert_eq!(&out, b"AB");
        assert_eq!(source.read(&mut out).unwrap(), 2);
        assert_eq!(&out, b"CD");
        assert_eq!(source.read(&mut out).unwrap(), 1);
        assert_eq!(&out[..1], b"E");
        assert_eq!(source.read(&mut out).unwrap(), 0);
        assert_eq!(source.remaining(), 0);
    }

    #[test]
    fn test_sink_collects_in_order() {
        let mut sink = MemorySink::new();
        sink.write(b"one ").unwrap();
        sink.write(b"two").unwrap();
        sink.flush().unwrap();

        assert_eq!(sink.content(), b"one two");
        assert_eq!(sink.writes(), 2);
        assert_eq!(sink.flushes(), 1);
        assert_eq!(sink.into_content(), b"one two");
    }
}
