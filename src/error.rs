//! Error Module - Ledger Error Types
//!
//! Defines all error types used by the allocation ledger.
//!
//! # Error Categories
//!
//! ## Input Errors
//! - `InvalidSize` - Nonsensical payload size
//! - `UnknownObject` - Operation referenced a nonexistent object id
//!
//! ## Memory Errors
//! - `OutOfMemory` - Heap budget exhausted even after collection
//!
//! ## Internal Errors
//! - `CorruptGraph` - Graph invariant broken, fatal for the instance
//! - `Configuration` - Invalid ledger configuration

use crate::object::ObjectId;
use thiserror::Error;

/// Main error type for all ledger operations
///
/// Every failing operation leaves the graph and its counters exactly as
/// they were before the call; there are no partial mutations to undo.
#[derive(Debug, Error)]
pub enum LedgerError {
    /// Payload size cannot be represented
    ///
    /// **When returned:** Requested payload overflows when the fixed
    /// header overhead is added
    ///
    /// **Recovery strategy:** Caller must fix the input; never retried
    #[error("Invalid size: {0}")]
    InvalidSize(String),

    /// Operation referenced a nonexistent object id
    ///
    /// **When returned:** `set_references` or `set_rooted` named an id
    /// that is absent from the graph (possibly already collected)
    ///
    /// **Recovery strategy:** Caller holds a stale id; the operation
    /// aborted with no mutation
    #[error("Unknown object: {id}")]
    UnknownObject { id: ObjectId },

    /// Heap budget exhausted
    ///
    /// **When returned:** An allocation could not be satisfied from free
    /// space even after the lazy collection ran
    ///
    /// **Recovery strategy:** Drop references and collect, or raise the
    /// configured heap capacity
    #[error("Out of memory: requested {requested} bytes, available {available} bytes")]
    OutOfMemory { requested: usize, available: usize },

    /// Internal graph invariant broken - indicates a bug
    ///
    /// **When returned:** A sweep left a surviving object referencing a
    /// swept id
    ///
    /// **Recovery strategy:** Cannot recover; discard the graph instance
    #[error("Corrupt graph: {0}")]
    CorruptGraph(String),

    /// Configuration error
    ///
    /// **When returned:** Invalid ledger configuration detected at
    /// construction time
    ///
    /// **Recovery strategy:** Use default configuration or fail fast
    #[error("Configuration error: {0}")]
    Configuration(String),
}

impl LedgerError {
    /// Check if this error is recoverable by the caller
    pub fn is_recoverable(&self) -> bool {
        matches!(self, LedgerError::OutOfMemory { .. })
    }

    /// Check if this error indicates a bug in the ledger itself
    pub fn is_bug(&self) -> bool {
        matches!(self, LedgerError::CorruptGraph(_))
    }
}

impl From<crate::config::ConfigError> for LedgerError {
    fn from(err: crate::config::ConfigError) -> Self {
        LedgerError::Configuration(err.to_string())
    }
}

/// Result type alias for ledger operations
pub type Result<T> = std::result::Result<T, LedgerError>;
