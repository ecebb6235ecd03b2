// SPDX-License-Identifier: MIT
//
// SigFlow: Streaming Transform Pipeline for Document Signing
// Copyright (c) 2026 SigFlow Contributors
//
// https://github.com/yourusername/sigflow

//! Buffered transform node and the chain-neighbor contract
//!
//! A [`BufferedNode`] sits between two neighbors in a transform chain and bridges
//! the streaming read/write protocol with algorithms that need the whole input at
//! once. Pulled from downstream, it synchronously drains its upstream neighbor to
//! completion, runs its processor exactly once, and serves the result across as
//! many reads as the caller needs. Pushed from upstream, it accumulates writes
//! until a flush forces processing and a single downstream delivery.
//!
//! # State machine
//!
//! | Status    | read                    | write       | flush                   |
//! |-----------|-------------------------|-------------|-------------------------|
//! | Pending   | may finalize on drain   | accumulates | may finalize            |
//! | Finalized | no-op, returns 0        | no-op       | no-op                   |
//!
//! The transition to `Finalized` happens exactly once and is irreversible.

use crate::buffer::TransformBuffer;
use crate::config::NodeConfig;
use crate::processor::TransformProcessor;
use crate::Result;
use std::cell::RefCell;
use std::rc::{Rc, Weak};
use tracing::{debug, trace};

/// Contract every chain stage honors so stages compose generically
///
/// Any stage — buffered or not — exposes the same three streaming operations,
/// which is what lets a buffered node call its neighbors without knowing what
/// they are.
pub trait ChainNode {
    /// Pull up to `out.len()` bytes into `out`; `Ok(0)` means exhausted
    fn read(&mut self, out: &mut [u8]) -> Result<usize>;

    /// Push bytes into this stage
    fn write(&mut self, data: &[u8]) -> Result<()>;

    /// Signal that no more writes will occur
    fn flush(&mut self) -> Result<()>;
}

/// Shared handle to a chain stage, owned by the pipeline assembler
pub type NodeHandle = Rc<RefCell<dyn ChainNode>>;

/// Non-owning link to a neighboring stage
type NeighborLink = Weak<RefCell<dyn ChainNode>>;

/// Delivery status of a buffered node
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NodeStatus {
    /// Content is still being gathered or awaiting delivery
    Pending,
    /// All processing and delivery is complete; terminal
    Finalized,
}

/// Operation counters for a single node
#[derive(Debug, Clone, Default)]
pub struct NodeStats {
    pub reads: u64,
    pub writes: u64,
    pub flushes: u64,
    pub bytes_buffered: u64,
    pub bytes_delivered: u64,
    pub process_runs: u64,
}

/// A chain stage that materializes its entire input before producing output
///
/// Neighbor links are fixed at construction and non-owning: the pipeline
/// assembler owns the stages, and a dropped neighbor simply reads as absent.
pub struct BufferedNode {
    status: NodeStatus,
    buffer: Option<TransformBuffer>,
    upstream: Option<NeighborLink>,
    downstream: Option<NeighborLink>,
    processor: Option<Rc<dyn TransformProcessor>>,
    processed: bool,
    config: NodeConfig,
    stats: NodeStats,
}

impl BufferedNode {
    /// Create a detached node with the given configuration
    ///
    /// Neighbor links and the processor are attached with the builder methods
    /// before the node enters service; they cannot be changed afterwards.
    pub fn new(config: NodeConfig) -> Self {
        Self {
            status: NodeStatus::Pending,
            buffer: None,
            upstream: None,
            downstream: None,
            processor: None,
            processed: false,
            config,
            stats: NodeStats::default(),
        }
    }

    /// Create a detached node with default configuration
    pub fn with_defaults() -> Self {
        Self::new(NodeConfig::default())
    }

    /// Attach the upstream neighbor this node drains on read
    pub fn upstream(mut self, node: &NodeHandle) -> Self {
        self.upstream = Some(Rc::downgrade(node));
        self
    }

    /// Attach the downstream neighbor this node delivers to on flush
    pub fn downstream(mut self, node: &NodeHandle) -> Self {
        self.downstream = Some(Rc::downgrade(node));
        self
    }

    /// Attach the transform processor; a node without one acts as identity
    pub fn processor(mut self, processor: Rc<dyn TransformProcessor>) -> Self {
        self.processor = Some(processor);
        self
    }

    /// Pull up to `out.len()` processed bytes from this node
    ///
    /// On the first read the entire upstream stream is drained synchronously and
    /// the processor runs; subsequent reads serve the remaining processed content
    /// front-to-back. Returns `Ok(0)` once fully drained (and forever after), or
    /// when there is no upstream to drain.
    pub fn read(&mut self, out: &mut [u8]) -> Result<usize> {
        self.stats.reads += 1;
        if out.is_empty() {
            return Ok(0);
        }
        if self.status == NodeStatus::Finalized {
            return Ok(0);
        }
        let Some(upstream) = self.upstream_node() else {
            return Ok(0);
        };

        if self.buffer.is_none() {
            let mut buffer = self.make_buffer();
            let mut scratch = vec![0u8; out.len()];
            loop {
                let n = upstream.borrow_mut().read(&mut scratch)?;
                if n == 0 {
                    break;
                }
                buffer.append(&scratch[..n])?;
            }
            trace!("Materialized {} upstream bytes", buffer.len());
            self.run_processor(&mut buffer)?;
            self.buffer = Some(buffer);
        }

        let Some(buffer) = self.buffer.as_mut() else {
            return Ok(0);
        };
        let available = buffer.len();
        if available <= out.len() {
            out[..available].copy_from_slice(buffer.as_slice());
            buffer.wipe();
            self.buffer = None;
            self.status = NodeStatus::Finalized;
            self.stats.bytes_delivered += available as u64;
            debug!("Delivered final {} bytes; node finalized", available);
            Ok(available)
        } else {
            let n = out.len();
            out.copy_from_slice(&buffer.as_slice()[..n]);
            buffer.consume_front(n);
            self.stats.bytes_delivered += n as u64;
            Ok(n)
        }
    }

    /// Accumulate bytes for the eventual flush
    ///
    /// A write after finalization, or on a node with no downstream, is silently
    /// dropped — flow control, not an error. Never triggers processing and never
    /// touches the downstream neighbor.
    pub fn write(&mut self, data: &[u8]) -> Result<()> {
        self.stats.writes += 1;
        if data.is_empty() {
            return Ok(());
        }
        if self.status == NodeStatus::Finalized || self.downstream_node().is_none() {
            return Ok(());
        }

        let max_size = self.config.max_buffer_size;
        let zero = self.config.zero_on_consume;
        let buffer = self
            .buffer
            .get_or_insert_with(|| TransformBuffer::with_options(max_size, zero));
        buffer.append(data)?;
        self.stats.bytes_buffered += data.len() as u64;
        Ok(())
    }

    /// Process the accumulated content and deliver it downstream
    ///
    /// The processed content goes out in a single downstream write, then the
    /// flush cascades down the chain. No-op when already finalized, when there is
    /// no downstream, or when nothing was ever written. On processor or downstream
    /// failure the node keeps its status and buffered content so the driver can
    /// inspect and abort.
    pub fn flush(&mut self) -> Result<()> {
        self.stats.flushes += 1;
        if self.status == NodeStatus::Finalized {
            return Ok(());
        }
        let Some(downstream) = self.downstream_node() else {
            return Ok(());
        };
        let Some(mut buffer) = self.buffer.take() else {
            return Ok(());
        };

        if let Err(e) = self.run_processor(&mut buffer) {
            self.buffer = Some(buffer);
            return Err(e);
        }
        if let Err(e) = downstream.borrow_mut().write(buffer.as_slice()) {
            self.buffer = Some(buffer);
            return Err(e);
        }

        let delivered = buffer.len();
        buffer.wipe();
        self.status = NodeStatus::Finalized;
        self.stats.bytes_delivered += delivered as u64;
        debug!("Flushed {} processed bytes downstream; node finalized", delivered);

        let result = downstream.borrow_mut().flush();
        result
    }

    /// Release any buffered content, zero-filling it first
    ///
    /// Idempotent and status-independent. Neighbors are not owned and are left
    /// untouched. Also invoked on drop.
    pub fn destroy(&mut self) {
        if let Some(buffer) = self.buffer.as_mut() {
            trace!("Destroying node with {} buffered bytes", buffer.len());
            buffer.wipe();
        }
        self.buffer = None;
    }

    /// Current delivery status
    pub fn status(&self) -> NodeStatus {
        self.status
    }

    /// Check whether the node has reached its terminal state
    pub fn is_finalized(&self) -> bool {
        self.status == NodeStatus::Finalized
    }

    /// Bytes currently held in the accumulator
    pub fn buffered_len(&self) -> usize {
        self.buffer.as_ref().map_or(0, TransformBuffer::len)
    }

    /// Operation counters
    pub fn stats(&self) -> &NodeStats {
        &self.stats
    }

    fn upstream_node(&self) -> Option<NodeHandle> {
        self.upstream.as_ref().and_then(Weak::upgrade)
    }

    fn downstream_node(&self) -> Option<NodeHandle> {
        self.downstream.as_ref().and_then(Weak::upgrade)
    }

    fn make_buffer(&self) -> TransformBuffer {
        TransformBuffer::with_options(self.config.max_buffer_size, self.config.zero_on_consume)
    }

    /// Run the processor on the gathered content, at most once per content
    ///
    /// The flag is only set after a successful run, so a failed flush can be
    /// retried by the driver without the content being silently dropped, and a
    /// successful retry after a downstream failure does not re-run the processor.
    fn run_processor(&mut self, buffer: &mut TransformBuffer) -> Result<()> {
        if self.processed {
            return Ok(());
        }
        if let Some(processor) = &self.processor {
            processor.process(buffer)?;
            trace!(
                "Processor '{}' produced {} bytes",
                processor.name(),
                buffer.len()
            );
        }
        self.processed = true;
        self.stats.process_runs += 1;
        Ok(())
    }
}

impl ChainNode for BufferedNode {
    fn read(&mut self, out: &mut [u8]) -> Result<usize> {
        BufferedNode::read(self, out)
    }

    fn write(&mut self, data: &[u8]) -> Result<()> {
        BufferedNode::write(self, data)
    }

    fn flush(&mut self) -> Result<()> {
        BufferedNode::flush(self)
    }
}

impl Drop for BufferedNode {
    fn drop(&mut self) {
        self.destroy();
    }
}
