//! Error types for Waymark operations.
//!
//! This module provides the main error type [`WaymarkError`] which wraps
//! the conditions that can occur while reading and laying out a flow graph.

use std::io;

use thiserror::Error;

/// The main error type for Waymark operations.
///
/// # Diagnostic Variants
///
/// The `Input` variant keeps the JSON source next to the decoding error so
/// that front ends can point at the offending line and column.
#[derive(Debug, Error)]
pub enum WaymarkError {
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    #[error("Invalid flow graph: {err}")]
    Input {
        err: serde_json::Error,
        src: String,
    },

    #[error("No root node found among {nodes} nodes: every node has an incoming edge")]
    NoRoots { nodes: usize },

    #[error("Layout error: {0}")]
    Layout(String),

    #[error("Configuration error: {0}")]
    Config(String),
}

impl WaymarkError {
    /// Create a new `Input` error with the associated JSON source.
    pub fn new_input_error(err: serde_json::Error, src: impl Into<String>) -> Self {
        Self::Input {
            err,
            src: src.into(),
        }
    }
}
