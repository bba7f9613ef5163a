//! Error types for the registry.

use denom_ledger_core::{TraceError, TraceHash};
use denom_ledger_store::StoreError;
use thiserror::Error;

/// Errors that can occur during registry operations.
#[derive(Debug, Error)]
pub enum RegistryError {
    /// The input could not be decoded into a trace. Caller error, not retried.
    #[error("malformed denom trace: {0}")]
    MalformedTrace(TraceError),

    /// A port or channel identifier failed validation.
    #[error("invalid identifier: {0}")]
    InvalidIdentifier(TraceError),

    /// The supplied hash is not a well-formed fixed-width hex string.
    #[error("invalid trace hash: {0:?}")]
    InvalidHash(String),

    /// Valid identifier, but no registry entry for it.
    #[error("denom trace not found: {0}")]
    NotFound(String),

    /// The digest is already bound to a different trace. Must never occur
    /// for a correct hasher; surfaced instead of being silently resolved.
    #[error("trace hash collision for {hash}")]
    HashCollision { hash: TraceHash },

    /// Storage error.
    #[error("storage error: {0}")]
    Store(#[from] StoreError),
}

/// Result type for registry operations.
pub type Result<T> = std::result::Result<T, RegistryError>;
