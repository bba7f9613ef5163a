//! In-memory implementation of the TraceStore trait.
//!
//! This is primarily for testing. It has the same semantics as SQLite
//! but keeps everything in memory with no persistence.

use std::collections::{BTreeMap, HashMap};
use std::ops::Bound;
use std::sync::RwLock;

use async_trait::async_trait;
use denom_ledger_core::{DenomTrace, TraceHash};

use crate::error::Result;
use crate::page::{decode_page_token, encode_page_token, PageRequest, PageResponse};
use crate::traits::{InsertOutcome, RegistryEntry, TraceStore};

/// In-memory store implementation.
///
/// All data is lost when the store is dropped. Thread-safe via RwLock.
pub struct MemoryStore {
    inner: RwLock<MemoryStoreInner>,
}

struct MemoryStoreInner {
    /// Traces indexed by digest.
    traces: HashMap<TraceHash, StoredTrace>,

    /// Insertion-order index: sequence number -> digest.
    order: BTreeMap<u64, TraceHash>,

    /// Next insertion sequence number (1-indexed).
    next_seq: u64,
}

struct StoredTrace {
    trace: DenomTrace,
    canonical: String,
}

impl MemoryStore {
    /// Create a new empty in-memory store.
    pub fn new() -> Self {
        Self {
            inner: RwLock::new(MemoryStoreInner {
                traces: HashMap::new(),
                order: BTreeMap::new(),
                next_seq: 1,
            }),
        }
    }
}

impl Default for MemoryStore {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl TraceStore for MemoryStore {
    async fn insert_trace(
        &self,
        hash: &TraceHash,
        trace: &DenomTrace,
        canonical: &str,
    ) -> Result<InsertOutcome> {
        let mut inner = self.inner.write().unwrap();

        if let Some(existing) = inner.traces.get(hash) {
            if existing.canonical == canonical {
                return Ok(InsertOutcome::AlreadyRegistered);
            }
            return Ok(InsertOutcome::HashCollision {
                stored: existing.trace.clone(),
            });
        }

        let seq = inner.next_seq;
        inner.next_seq += 1;
        inner.traces.insert(
            *hash,
            StoredTrace {
                trace: trace.clone(),
                canonical: canonical.to_string(),
            },
        );
        inner.order.insert(seq, *hash);

        Ok(InsertOutcome::Inserted)
    }

    async fn get_trace(&self, hash: &TraceHash) -> Result<Option<DenomTrace>> {
        let inner = self.inner.read().unwrap();
        Ok(inner.traces.get(hash).map(|st| st.trace.clone()))
    }

    async fn has_trace(&self, hash: &TraceHash) -> Result<bool> {
        let inner = self.inner.read().unwrap();
        Ok(inner.traces.contains_key(hash))
    }

    async fn list_traces(
        &self,
        page: &PageRequest,
    ) -> Result<(Vec<RegistryEntry>, PageResponse)> {
        let inner = self.inner.read().unwrap();

        let limit = page.clamped_limit();
        let cursor = page.key.as_deref().map(decode_page_token).transpose()?;
        let skip = if page.key.is_none() {
            page.offset as usize
        } else {
            0
        };

        let total = if page.count_total && page.is_initial() {
            Some(inner.order.len() as u64)
        } else {
            None
        };

        // Fetch one extra row to learn whether the enumeration continues.
        let walk: Vec<(u64, TraceHash)> = if page.reverse {
            let upper = match cursor {
                Some(c) => Bound::Excluded(c),
                None => Bound::Unbounded,
            };
            inner
                .order
                .range((Bound::Unbounded, upper))
                .rev()
                .skip(skip)
                .take(limit + 1)
                .map(|(s, h)| (*s, *h))
                .collect()
        } else {
            let lower = match cursor {
                Some(c) => Bound::Excluded(c),
                None => Bound::Unbounded,
            };
            inner
                .order
                .range((lower, Bound::Unbounded))
                .skip(skip)
                .take(limit + 1)
                .map(|(s, h)| (*s, *h))
                .collect()
        };

        let has_more = walk.len() > limit;
        let items = &walk[..walk.len().min(limit)];

        let entries = items
            .iter()
            .map(|(_, hash)| {
                let stored = inner
                    .traces
                    .get(hash)
                    .expect("order index references missing trace");
                RegistryEntry {
                    hash: *hash,
                    trace: stored.trace.clone(),
                }
            })
            .collect();

        let next_key = if has_more {
            items.last().map(|(seq, _)| encode_page_token(*seq))
        } else {
            None
        };

        Ok((entries, PageResponse { next_key, total }))
    }

    async fn count_traces(&self) -> Result<u64> {
        let inner = self.inner.read().unwrap();
        Ok(inner.traces.len() as u64)
    }
}
