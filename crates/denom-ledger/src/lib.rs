//! # Denom Ledger
//!
//! A content-addressed registry for multi-hop token denominations, plus
//! deterministic escrow-address derivation per transfer channel.
//!
//! ## Overview
//!
//! Tokens that cross chained transfer channels accumulate a trace: the
//! sequence of (port, channel) hops travelled before reaching the current
//! chain, ending in the base denomination. Trace strings grow without bound,
//! so the ledger indexes them by a fixed-width Blake3 hash and keeps the
//! hash↔trace mapping in a registry that on-ledger balances reference.
//!
//! ## Key Concepts
//!
//! - **Trace**: Immutable transfer history. First registration wins; entries
//!   are never edited or deleted.
//! - **Hash**: The content-address of a canonical trace string. Reverse
//!   lookup goes through the registry, never through the hash function.
//! - **Escrow address**: A pure function of (port, channel), computable
//!   offline with no registry state.
//!
//! ## Usage
//!
//! ```rust,no_run
//! use denom_ledger::{Registry, RegistryConfig};
//! use denom_ledger::core::{DenomTrace, Hop};
//! use denom_ledger::store::SqliteStore;
//!
//! async fn example() {
//!     // Open storage
//!     let store = SqliteStore::open("ledger.db").unwrap();
//!
//!     // Create the registry
//!     let registry = Registry::new(store, RegistryConfig::default());
//!
//!     // Register a trace and resolve it back
//!     let trace = DenomTrace::new(vec![Hop::new("transfer", "channel-0")], "uatom");
//!     let hash = registry.register(&trace).await.unwrap();
//!     let resolved = registry.denom_trace(&hash.to_hex()).await.unwrap();
//!     assert_eq!(resolved, trace);
//! }
//! ```
//!
//! ## Re-exports
//!
//! This crate re-exports the component crates for convenience:
//!
//! - `denom_ledger::core` - Core primitives (DenomTrace, TraceHash, etc.)
//! - `denom_ledger::store` - Storage abstraction and SQLite

pub mod error;
pub mod registry;

// Re-export component crates
pub use denom_ledger_core as core;
pub use denom_ledger_store as store;

// Re-export main types for convenience
pub use error::{RegistryError, Result};
pub use registry::{Registry, RegistryConfig};

// Re-export commonly used core types
pub use denom_ledger_core::{
    DenomTrace, EscrowAddress, Hop, TraceError, TraceHash, TransferParams,
};
pub use denom_ledger_store::{PageRequest, PageResponse, RegistryEntry};
