//! # Denom Ledger Store
//!
//! Storage abstraction for the denom ledger. Provides a trait-based interface
//! for trace persistence with SQLite and in-memory implementations.
//!
//! ## Overview
//!
//! The store module abstracts registry persistence behind the [`TraceStore`]
//! trait, keeping the registry storage-agnostic. The primary implementation
//! is [`SqliteStore`], with [`MemoryStore`] for testing.
//!
//! ## Key Types
//!
//! - [`TraceStore`] - The async trait for all storage operations
//! - [`SqliteStore`] - SQLite-based persistent storage
//! - [`MemoryStore`] - In-memory storage for tests
//! - [`InsertOutcome`] - Result of inserting a trace
//! - [`PageRequest`] / [`PageResponse`] - Paginated enumeration
//!
//! ## Design Notes
//!
//! - **Idempotent inserts**: Inserting an already-registered trace returns
//!   `AlreadyRegistered` and changes nothing
//! - **Collision detection**: A digest already bound to a different canonical
//!   string returns `HashCollision`; callers treat it as fatal
//! - **Stable enumeration**: Entries list in insertion order, resumable
//!   through opaque page tokens without skips or duplicates

pub mod error;
pub mod memory;
pub mod migration;
pub mod page;
pub mod sqlite;
pub mod traits;

pub use error::{Result, StoreError};
pub use memory::MemoryStore;
pub use page::{PageRequest, PageResponse, DEFAULT_PAGE_LIMIT, MAX_PAGE_LIMIT};
pub use sqlite::SqliteStore;
pub use traits::{InsertOutcome, RegistryEntry, TraceStore};
