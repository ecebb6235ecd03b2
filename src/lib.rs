// SPDX-License-Identifier: MIT
//
// SigFlow: Streaming Transform Pipeline for Document Signing
// Copyright (c) 2026 SigFlow Contributors
//
// https://github.com/yourusername/sigflow

//! SigFlow Core Library
//!
//! Building blocks for linear chains of streaming content transforms, as used in
//! document-signing and encryption processing. Each stage in a chain either pulls
//! bytes from the stage before it or pushes bytes to the stage after it. Transforms
//! that cannot emit anything before seeing the entire input (whole-document digests,
//! base64 decoding, canonicalization) are bridged into the streaming protocol by
//! [`BufferedNode`], which materializes its input, runs the transform exactly once,
//! and hands the result out incrementally.
//!
//! # Architecture
//!
//! The library is organized into modules representing core concerns:
//! - `node`: the buffered node and the chain-neighbor contract
//! - `buffer`: contiguous byte accumulator with bounded growth
//! - `processor`: transform algorithms applied to fully-materialized content
//! - `endpoints`: in-memory chain endpoints (source and sink)
//! - `config`: configuration management with validation
//! - `error`: unified error types
//!
//! # Design Principles
//!
//! 1. **Type safety**: a node either satisfies the buffered contract or does not
//!    exist as a value; there are no runtime subtype checks
//! 2. **Deterministic resources**: buffered content is wiped and released at a
//!    well-defined point in the state machine, never "eventually"
//! 3. **Composability**: every stage honors the same four-operation contract so
//!    chains assemble generically
//! 4. **Testability**: processors are plain trait objects, endpoints double as
//!    test drivers

pub mod buffer;
pub mod config;
pub mod endpoints;
pub mod error;
pub mod node;
pub mod processor;

pub use buffer::TransformBuffer;
pub use config::NodeConfig;
pub use error::{Error, Result};
pub use node::{BufferedNode, ChainNode, NodeHandle, NodeStatus};
pub use processor::TransformProcessor;

/// Library version for diagnostics
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Default cap on a single node's accumulated content (64 MiB)
pub const DEFAULT_MAX_BUFFER_SIZE: usize = 64 * 1024 * 1024;
