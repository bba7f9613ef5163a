//! Store trait: the abstract interface for trace persistence.
//!
//! This trait keeps the registry storage-agnostic. Implementations
//! include SQLite (primary) and in-memory (for tests).

use async_trait::async_trait;
use denom_ledger_core::{DenomTrace, TraceHash};
use serde::{Deserialize, Serialize};

use crate::error::Result;
use crate::page::{PageRequest, PageResponse};

/// Result of inserting a trace.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum InsertOutcome {
    /// Trace was inserted successfully.
    Inserted,
    /// The exact same trace is already registered (idempotent - not an error).
    AlreadyRegistered,
    /// The digest is already bound to a different trace. Must never occur
    /// for a correct hasher; callers treat it as fatal.
    HashCollision {
        /// The trace currently stored under the digest.
        stored: DenomTrace,
    },
}

/// One registry record: a digest and the trace it addresses.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RegistryEntry {
    /// The content-address.
    pub hash: TraceHash,
    /// The full trace.
    pub trace: DenomTrace,
}

/// The TraceStore trait: async interface for trace persistence.
///
/// All methods are async to support both sync (SQLite) and async backends.
/// For SQLite, we use `spawn_blocking` internally to avoid blocking the runtime.
///
/// # Design Notes
///
/// - **Compare-and-insert**: `insert_trace` is the only mutation. It checks
///   the stored canonical string byte-for-byte before declaring a duplicate,
///   so an accidental digest collision surfaces instead of aliasing.
/// - **Stable order**: `list_traces` enumerates in insertion order
///   (ascending sequence of first registration; descending under
///   `reverse`). The order is part of the interface contract and does not
///   change across releases.
/// - **Resumable pagination**: tokens name a position in the insertion
///   order, so chained calls visit every pre-existing entry exactly once
///   even while inserts are happening concurrently.
#[async_trait]
pub trait TraceStore: Send + Sync {
    // ─────────────────────────────────────────────────────────────────────────
    // Trace Operations
    // ─────────────────────────────────────────────────────────────────────────

    /// Insert a trace under its digest.
    ///
    /// # Arguments
    /// - `hash`: The trace's content-address.
    /// - `trace`: The trace to insert.
    /// - `canonical`: The canonical path string (cached to avoid recomputation).
    ///
    /// # Returns
    /// - `Inserted` if the trace was new.
    /// - `AlreadyRegistered` if the exact same trace already exists.
    /// - `HashCollision` if a different trace is stored under the digest.
    async fn insert_trace(
        &self,
        hash: &TraceHash,
        trace: &DenomTrace,
        canonical: &str,
    ) -> Result<InsertOutcome>;

    /// Get a trace by its content-address.
    async fn get_trace(&self, hash: &TraceHash) -> Result<Option<DenomTrace>>;

    /// Check if a trace exists by content-address.
    async fn has_trace(&self, hash: &TraceHash) -> Result<bool>;

    // ─────────────────────────────────────────────────────────────────────────
    // Enumeration
    // ─────────────────────────────────────────────────────────────────────────

    /// List registry entries in insertion order, one page at a time.
    async fn list_traces(
        &self,
        page: &PageRequest,
    ) -> Result<(Vec<RegistryEntry>, PageResponse)>;

    /// Total number of registered traces.
    async fn count_traces(&self) -> Result<u64>;
}
