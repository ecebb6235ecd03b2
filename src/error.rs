// SPDX-License-Identifier: MIT
//
// SigFlow: Streaming Transform Pipeline for Document Signing
// Copyright (c) 2026 SigFlow Contributors
//
// https://github.com/yourusername/sigflow

//! Error types for the transform pipeline
//!
//! Provides a unified error taxonomy using `thiserror` for ergonomic error handling.

pub type Result<T> = std::result::Result<T, Error>;

/// Core error type for pipeline operations
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// Configuration validation failed
    #[error("Configuration error: {0}")]
    Config(String),

    /// Accumulator capacity exceeded or buffer operation failed
    #[error("Buffer error: {0}")]
    Buffer(String),

    /// Transform processor failed on materialized content
    #[error("Processor '{processor}' failed: {reason}")]
    Process {
        processor: &'static str,
        reason: String,
    },

    /// A neighboring chain stage reported a failure
    #[error("Chain error: {0}")]
    Chain(String),

    /// Data validation failed
    #[error("Validation error: {0}")]
    Validation(String),

    /// I/O error
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Generic internal error
    #[error("Internal error: {0}")]
    Internal(String),
}

impl Error {
    /// Check if error originated in a transform processor
    pub fn is_process_error(&self) -> bool {
        matches!(self, Error::Process { .. })
    }

    /// Check if error indicates the accumulator ran out of capacity
    pub fn is_capacity_error(&self) -> bool {
        matches!(self, Error::Buffer(_))
    }
}

// Conversions for common error types
impl From<serde_json::Error> for Error {
    fn from(e: serde_json::Error) -> Self {
        Error::Config(e.to_string())
    }
}
