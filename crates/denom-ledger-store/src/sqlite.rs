//! SQLite implementation of the TraceStore trait.
//!
//! This is the primary storage backend for the denom ledger. It uses
//! rusqlite with bundled SQLite, wrapped in async via tokio::spawn_blocking.

use std::path::Path;
use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use rusqlite::{params, Connection, OptionalExtension};

use denom_ledger_core::{DenomTrace, TraceHash};

use crate::error::{Result, StoreError};
use crate::migration;
use crate::page::{decode_page_token, encode_page_token, PageRequest, PageResponse};
use crate::traits::{InsertOutcome, RegistryEntry, TraceStore};

/// SQLite-based store implementation.
///
/// Thread-safe via internal Mutex. All operations use spawn_blocking
/// to avoid blocking the async runtime.
pub struct SqliteStore {
    /// The SQLite connection, protected by a mutex.
    conn: Arc<Mutex<Connection>>,
}

impl SqliteStore {
    /// Open a SQLite database at the given path.
    ///
    /// Creates the file and runs migrations if it doesn't exist.
    pub fn open(path: impl AsRef<Path>) -> Result<Self> {
        let mut conn = Connection::open(path)?;
        migration::migrate(&mut conn)?;
        Ok(Self {
            conn: Arc::new(Mutex::new(conn)),
        })
    }

    /// Open an in-memory SQLite database.
    ///
    /// Useful for testing.
    pub fn open_memory() -> Result<Self> {
        let mut conn = Connection::open_in_memory()?;
        migration::migrate(&mut conn)?;
        Ok(Self {
            conn: Arc::new(Mutex::new(conn)),
        })
    }
}

/// Map a poisoned connection mutex into a store error.
fn lock_poisoned<T>(e: std::sync::PoisonError<T>) -> StoreError {
    StoreError::Database(rusqlite::Error::SqliteFailure(
        rusqlite::ffi::Error::new(rusqlite::ffi::SQLITE_LOCKED),
        Some(format!("mutex poisoned: {}", e)),
    ))
}

/// Map a failed spawn_blocking join into a store error.
fn join_failed(e: tokio::task::JoinError) -> StoreError {
    StoreError::Database(rusqlite::Error::SqliteFailure(
        rusqlite::ffi::Error::new(rusqlite::ffi::SQLITE_ERROR),
        Some(format!("spawn_blocking failed: {}", e)),
    ))
}

/// Encode a trace for the record column.
fn encode_record(trace: &DenomTrace) -> Result<Vec<u8>> {
    let mut buf = Vec::new();
    ciborium::into_writer(trace, &mut buf)
        .map_err(|e| StoreError::Serialization(e.to_string()))?;
    Ok(buf)
}

/// Decode a trace from the record column.
fn decode_record(bytes: &[u8]) -> Result<DenomTrace> {
    ciborium::from_reader(bytes).map_err(|e| StoreError::Serialization(e.to_string()))
}

/// Decode a stored hash column.
fn decode_hash(bytes: &[u8]) -> Result<TraceHash> {
    TraceHash::try_from(bytes)
        .map_err(|_| StoreError::InvalidData(format!("hash column has {} bytes", bytes.len())))
}

#[async_trait]
impl TraceStore for SqliteStore {
    async fn insert_trace(
        &self,
        hash: &TraceHash,
        trace: &DenomTrace,
        canonical: &str,
    ) -> Result<InsertOutcome> {
        let hash = *hash;
        let trace = trace.clone();
        let canonical = canonical.to_string();
        let conn = self.conn.clone();

        tokio::task::spawn_blocking(move || {
            let conn = conn.lock().map_err(lock_poisoned)?;

            // Compare-and-insert: the mutex serializes the check with the
            // write, so at most one physical insertion happens per digest.
            let existing: Option<(String, Vec<u8>)> = conn
                .query_row(
                    "SELECT canonical, record FROM denom_traces WHERE hash = ?1",
                    params![hash.as_bytes().as_slice()],
                    |row| Ok((row.get(0)?, row.get(1)?)),
                )
                .optional()?;

            if let Some((stored_canonical, record)) = existing {
                if stored_canonical == canonical {
                    return Ok(InsertOutcome::AlreadyRegistered);
                }
                let stored = decode_record(&record)?;
                return Ok(InsertOutcome::HashCollision { stored });
            }

            let record = encode_record(&trace)?;
            conn.execute(
                "INSERT INTO denom_traces (hash, canonical, record, registered_at)
                 VALUES (?1, ?2, ?3, ?4)",
                params![
                    hash.as_bytes().as_slice(),
                    canonical,
                    record,
                    now_millis(),
                ],
            )?;
            tracing::debug!(hash = %hash, trace = %canonical, "stored denom trace");

            Ok(InsertOutcome::Inserted)
        })
        .await
        .map_err(join_failed)?
    }

    async fn get_trace(&self, hash: &TraceHash) -> Result<Option<DenomTrace>> {
        let hash = *hash;
        let conn = self.conn.clone();

        tokio::task::spawn_blocking(move || {
            let conn = conn.lock().map_err(lock_poisoned)?;

            let record: Option<Vec<u8>> = conn
                .query_row(
                    "SELECT record FROM denom_traces WHERE hash = ?1",
                    params![hash.as_bytes().as_slice()],
                    |row| row.get(0),
                )
                .optional()?;

            record.as_deref().map(decode_record).transpose()
        })
        .await
        .map_err(join_failed)?
    }

    async fn has_trace(&self, hash: &TraceHash) -> Result<bool> {
        let hash = *hash;
        let conn = self.conn.clone();

        tokio::task::spawn_blocking(move || {
            let conn = conn.lock().map_err(lock_poisoned)?;

            let exists: bool = conn.query_row(
                "SELECT EXISTS(SELECT 1 FROM denom_traces WHERE hash = ?1)",
                params![hash.as_bytes().as_slice()],
                |row| row.get(0),
            )?;

            Ok(exists)
        })
        .await
        .map_err(join_failed)?
    }

    async fn list_traces(
        &self,
        page: &PageRequest,
    ) -> Result<(Vec<RegistryEntry>, PageResponse)> {
        let page = page.clone();
        let conn = self.conn.clone();

        tokio::task::spawn_blocking(move || {
            let conn = conn.lock().map_err(lock_poisoned)?;

            let limit = page.clamped_limit();
            let cursor = page.key.as_deref().map(decode_page_token).transpose()?;
            let offset = if page.key.is_none() {
                page.offset as i64
            } else {
                0
            };

            let total = if page.count_total && page.is_initial() {
                let count: i64 =
                    conn.query_row("SELECT COUNT(*) FROM denom_traces", [], |row| row.get(0))?;
                Some(count as u64)
            } else {
                None
            };

            // Fetch one extra row to learn whether the enumeration continues.
            let (sql, resume) = if page.reverse {
                (
                    "SELECT seq, hash, record FROM denom_traces
                     WHERE seq < ?1 ORDER BY seq DESC LIMIT ?2 OFFSET ?3",
                    cursor.map(|c| c as i64).unwrap_or(i64::MAX),
                )
            } else {
                (
                    "SELECT seq, hash, record FROM denom_traces
                     WHERE seq > ?1 ORDER BY seq ASC LIMIT ?2 OFFSET ?3",
                    cursor.map(|c| c as i64).unwrap_or(0),
                )
            };

            let mut stmt = conn.prepare(sql)?;
            let rows: Vec<(i64, Vec<u8>, Vec<u8>)> = stmt
                .query_map(params![resume, (limit + 1) as i64, offset], |row| {
                    Ok((row.get(0)?, row.get(1)?, row.get(2)?))
                })?
                .collect::<rusqlite::Result<Vec<_>>>()?;

            let has_more = rows.len() > limit;
            let items = &rows[..rows.len().min(limit)];

            let mut entries = Vec::with_capacity(items.len());
            for (_, hash_bytes, record) in items {
                entries.push(RegistryEntry {
                    hash: decode_hash(hash_bytes)?,
                    trace: decode_record(record)?,
                });
            }

            let next_key = if has_more {
                items.last().map(|(seq, _, _)| encode_page_token(*seq as u64))
            } else {
                None
            };

            Ok((entries, PageResponse { next_key, total }))
        })
        .await
        .map_err(join_failed)?
    }

    async fn count_traces(&self) -> Result<u64> {
        let conn = self.conn.clone();

        tokio::task::spawn_blocking(move || {
            let conn = conn.lock().map_err(lock_poisoned)?;

            let count: i64 =
                conn.query_row("SELECT COUNT(*) FROM denom_traces", [], |row| row.get(0))?;

            Ok(count as u64)
        })
        .await
        .map_err(join_failed)?
    }
}

/// Get current time in milliseconds.
fn now_millis() -> i64 {
    use std::time::{SystemTime, UNIX_EPOCH};
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .expect("time went backwards")
        .as_millis() as i64
}

#[cfg(test)]
mod tests {
    use super::*;
    use denom_ledger_core::Hop;

    fn make_trace(channel: &str, base: &str) -> DenomTrace {
        DenomTrace::new(vec![Hop::new("transfer", channel)], base)
    }

    async fn register(store: &SqliteStore, trace: &DenomTrace) -> TraceHash {
        let canonical = trace.canonical_string();
        let hash = trace.hash();
        store.insert_trace(&hash, trace, &canonical).await.unwrap();
        hash
    }

    #[tokio::test]
    async fn test_insert_and_get_trace() {
        let store = SqliteStore::open_memory().unwrap();
        let trace = make_trace("channel-0", "uatom");
        let hash = register(&store, &trace).await;

        let retrieved = store.get_trace(&hash).await.unwrap().unwrap();
        assert_eq!(retrieved, trace);
        assert!(store.has_trace(&hash).await.unwrap());
    }

    #[tokio::test]
    async fn test_idempotent_insert() {
        let store = SqliteStore::open_memory().unwrap();
        let trace = make_trace("channel-0", "uatom");
        let canonical = trace.canonical_string();
        let hash = trace.hash();

        let r1 = store.insert_trace(&hash, &trace, &canonical).await.unwrap();
        assert_eq!(r1, InsertOutcome::Inserted);

        let r2 = store.insert_trace(&hash, &trace, &canonical).await.unwrap();
        assert_eq!(r2, InsertOutcome::AlreadyRegistered);

        assert_eq!(store.count_traces().await.unwrap(), 1);
    }

    #[tokio::test]
    async fn test_collision_detection() {
        let store = SqliteStore::open_memory().unwrap();
        let trace = make_trace("channel-0", "uatom");
        let other = make_trace("channel-1", "uosmo");
        let hash = trace.hash();

        register(&store, &trace).await;

        let outcome = store
            .insert_trace(&hash, &other, &other.canonical_string())
            .await
            .unwrap();
        assert_eq!(outcome, InsertOutcome::HashCollision { stored: trace });
    }

    #[tokio::test]
    async fn test_pagination_token_chaining() {
        let store = SqliteStore::open_memory().unwrap();
        let mut inserted = Vec::new();
        for i in 0..23 {
            inserted.push(register(&store, &make_trace(&format!("channel-{i}"), "uatom")).await);
        }

        let mut seen = Vec::new();
        let mut key = None;
        loop {
            let page = PageRequest {
                key: key.clone(),
                limit: 10,
                ..PageRequest::default()
            };
            let (entries, resp) = store.list_traces(&page).await.unwrap();
            seen.extend(entries.iter().map(|e| e.hash));
            match resp.next_key {
                Some(k) => key = Some(k),
                None => break,
            }
        }

        assert_eq!(seen, inserted);
    }

    #[tokio::test]
    async fn test_pagination_reverse() {
        let store = SqliteStore::open_memory().unwrap();
        let mut inserted = Vec::new();
        for i in 0..5 {
            inserted.push(register(&store, &make_trace(&format!("channel-{i}"), "uatom")).await);
        }

        let page = PageRequest {
            limit: 10,
            reverse: true,
            ..PageRequest::default()
        };
        let (entries, _) = store.list_traces(&page).await.unwrap();
        let seen: Vec<_> = entries.iter().map(|e| e.hash).collect();
        inserted.reverse();
        assert_eq!(seen, inserted);
    }

    #[tokio::test]
    async fn test_count_total() {
        let store = SqliteStore::open_memory().unwrap();
        for i in 0..7 {
            register(&store, &make_trace(&format!("channel-{i}"), "uatom")).await;
        }

        let page = PageRequest {
            limit: 3,
            count_total: true,
            ..PageRequest::default()
        };
        let (_, resp) = store.list_traces(&page).await.unwrap();
        assert_eq!(resp.total, Some(7));
    }

    #[tokio::test]
    async fn test_persistence_across_reopen() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("ledger.db");

        let trace = make_trace("channel-0", "uatom");
        let hash = {
            let store = SqliteStore::open(&path).unwrap();
            register(&store, &trace).await
        };

        let store = SqliteStore::open(&path).unwrap();
        let retrieved = store.get_trace(&hash).await.unwrap().unwrap();
        assert_eq!(retrieved, trace);
    }
}
