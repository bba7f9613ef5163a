//! The Registry: unified API for the denom ledger.
//!
//! The Registry wires the trace codec, hasher, and escrow derivation over a
//! storage backend into the query surface other modules consume.

use std::sync::{Arc, RwLock};

use denom_ledger_core::{DenomTrace, EscrowAddress, TraceHash, TransferParams};
use denom_ledger_store::{
    InsertOutcome, PageRequest, PageResponse, RegistryEntry, TraceStore, DEFAULT_PAGE_LIMIT,
    MAX_PAGE_LIMIT,
};

use crate::error::{RegistryError, Result};

/// Configuration for the Registry.
#[derive(Debug, Clone)]
pub struct RegistryConfig {
    /// Page size applied when a list request leaves `limit` at zero.
    pub default_page_limit: u64,
    /// Hard ceiling on entries per page.
    pub max_page_limit: u64,
}

impl Default for RegistryConfig {
    fn default() -> Self {
        Self {
            default_page_limit: DEFAULT_PAGE_LIMIT,
            max_page_limit: MAX_PAGE_LIMIT,
        }
    }
}

/// The main Registry struct.
///
/// Provides a unified API for:
/// - Registering denomination traces (insert-if-absent)
/// - Resolving a hash back to its trace, and a trace to its hash
/// - Enumerating registered traces with pagination
/// - Deriving per-channel escrow addresses
/// - Reading the module parameter snapshot
pub struct Registry<S: TraceStore> {
    /// The storage backend.
    store: Arc<S>,
    /// Configuration.
    config: RegistryConfig,
    /// Current module parameters, replaced wholesale on update.
    params: RwLock<TransferParams>,
}

impl<S: TraceStore> Registry<S> {
    /// Create a new registry instance.
    pub fn new(store: S, config: RegistryConfig) -> Self {
        Self {
            store: Arc::new(store),
            config,
            params: RwLock::new(TransferParams::default()),
        }
    }

    /// Get the store reference.
    pub fn store(&self) -> &S {
        &self.store
    }

    // ─────────────────────────────────────────────────────────────────────────
    // Registration
    // ─────────────────────────────────────────────────────────────────────────

    /// Register a trace, returning its content-address.
    ///
    /// Idempotent: registering a trace that is already present is a no-op
    /// returning the same hash. A digest bound to a different stored trace
    /// is a hash collision, logged and surfaced as an error.
    pub async fn register(&self, trace: &DenomTrace) -> Result<TraceHash> {
        trace.validate().map_err(RegistryError::MalformedTrace)?;

        let canonical = trace.canonical_string();
        let hash = TraceHash::digest(&canonical);

        match self.store.insert_trace(&hash, trace, &canonical).await? {
            InsertOutcome::Inserted => {
                tracing::debug!(hash = %hash, trace = %canonical, "registered denom trace");
                Ok(hash)
            }
            InsertOutcome::AlreadyRegistered => Ok(hash),
            InsertOutcome::HashCollision { stored } => {
                tracing::error!(
                    hash = %hash,
                    new = %canonical,
                    stored = %stored,
                    "digest already bound to a different trace"
                );
                Err(RegistryError::HashCollision { hash })
            }
        }
    }

    // ─────────────────────────────────────────────────────────────────────────
    // Query Operations
    // ─────────────────────────────────────────────────────────────────────────

    /// Resolve a fixed-width hex hash to its registered trace.
    pub async fn denom_trace(&self, hash_hex: &str) -> Result<DenomTrace> {
        let hash = TraceHash::from_hex(hash_hex)
            .map_err(|_| RegistryError::InvalidHash(hash_hex.to_string()))?;

        match self.store.get_trace(&hash).await? {
            Some(trace) => Ok(trace),
            None => Err(RegistryError::NotFound(hash.to_hex())),
        }
    }

    /// Enumerate registered traces, one page at a time.
    ///
    /// Entries come back in insertion order (descending under
    /// `page.reverse`); chain `next_key` tokens to resume.
    pub async fn denom_traces(
        &self,
        page: PageRequest,
    ) -> Result<(Vec<RegistryEntry>, PageResponse)> {
        let page = self.normalize_page(page);
        Ok(self.store.list_traces(&page).await?)
    }

    /// Resolve a trace path string to its registered hash.
    ///
    /// This is a validation lookup, not a raw hash computation: the decoded
    /// trace must already have a registry entry.
    pub async fn denom_hash(&self, trace_str: &str) -> Result<TraceHash> {
        let trace = DenomTrace::parse(trace_str).map_err(RegistryError::MalformedTrace)?;
        self.trace_hash(&trace).await
    }

    /// Resolve a trace value to its registered hash.
    pub async fn trace_hash(&self, trace: &DenomTrace) -> Result<TraceHash> {
        let hash = trace.hash();
        if self.store.has_trace(&hash).await? {
            Ok(hash)
        } else {
            Err(RegistryError::NotFound(trace.canonical_string()))
        }
    }

    /// Derive the escrow address for a (port, channel) pair.
    ///
    /// Independent of registry state; computable offline.
    pub fn escrow_address(&self, port: &str, channel: &str) -> Result<EscrowAddress> {
        EscrowAddress::derive(port, channel).map_err(RegistryError::InvalidIdentifier)
    }

    // ─────────────────────────────────────────────────────────────────────────
    // Parameters
    // ─────────────────────────────────────────────────────────────────────────

    /// The current module parameter snapshot.
    pub fn params(&self) -> TransferParams {
        *self.params.read().unwrap()
    }

    /// Replace the module parameters wholesale.
    ///
    /// Reserved for the governance collaborator; not part of the query
    /// surface.
    pub fn set_params(&self, params: TransferParams) {
        *self.params.write().unwrap() = params;
    }

    /// Clamp a page request against the configured limits.
    fn normalize_page(&self, mut page: PageRequest) -> PageRequest {
        if page.limit == 0 {
            page.limit = self.config.default_page_limit;
        }
        page.limit = page.limit.min(self.config.max_page_limit);
        page
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use denom_ledger_core::Hop;
    use denom_ledger_store::MemoryStore;

    fn registry() -> Registry<MemoryStore> {
        Registry::new(MemoryStore::new(), RegistryConfig::default())
    }

    fn make_trace(channel: &str, base: &str) -> DenomTrace {
        DenomTrace::new(vec![Hop::new("transfer", channel)], base)
    }

    #[tokio::test]
    async fn test_register_and_resolve_both_ways() {
        let registry = registry();
        let trace = make_trace("channel-0", "uatom");

        let hash = registry.register(&trace).await.unwrap();

        let resolved = registry.denom_trace(&hash.to_hex()).await.unwrap();
        assert_eq!(resolved, trace);

        let rehashed = registry.denom_hash("transfer/channel-0/uatom").await.unwrap();
        assert_eq!(rehashed, hash);
    }

    #[tokio::test]
    async fn test_register_idempotent() {
        let registry = registry();
        let trace = make_trace("channel-0", "uatom");

        let h1 = registry.register(&trace).await.unwrap();
        let h2 = registry.register(&trace).await.unwrap();
        assert_eq!(h1, h2);
        assert_eq!(registry.store().count_traces().await.unwrap(), 1);
    }

    #[tokio::test]
    async fn test_register_rejects_invalid_trace() {
        let registry = registry();
        let trace = make_trace("channel-0", "bad/denom");
        assert!(matches!(
            registry.register(&trace).await,
            Err(RegistryError::MalformedTrace(_))
        ));
    }

    #[tokio::test]
    async fn test_denom_trace_invalid_hash() {
        let registry = registry();
        assert!(matches!(
            registry.denom_trace("zzzz").await,
            Err(RegistryError::InvalidHash(_))
        ));
        // Valid hex, wrong width.
        assert!(matches!(
            registry.denom_trace("deadbeef").await,
            Err(RegistryError::InvalidHash(_))
        ));
    }

    #[tokio::test]
    async fn test_denom_trace_not_found() {
        let registry = registry();
        let absent = "deadbeef".repeat(8);
        assert!(matches!(
            registry.denom_trace(&absent).await,
            Err(RegistryError::NotFound(_))
        ));
    }

    #[tokio::test]
    async fn test_denom_hash_malformed() {
        let registry = registry();
        assert!(matches!(
            registry.denom_hash("not-a-valid-trace-format").await,
            Err(RegistryError::MalformedTrace(_))
        ));
    }

    #[tokio::test]
    async fn test_denom_hash_unregistered() {
        let registry = registry();
        assert!(matches!(
            registry.denom_hash("transfer/channel-0/uatom").await,
            Err(RegistryError::NotFound(_))
        ));
    }

    #[tokio::test]
    async fn test_trace_hash_zero_hops_not_found() {
        // A trace with no transfer history is hashable but never registered.
        let registry = registry();
        let native = DenomTrace::new(vec![], "uatom");
        assert!(matches!(
            registry.trace_hash(&native).await,
            Err(RegistryError::NotFound(_))
        ));
    }

    #[tokio::test]
    async fn test_escrow_address() {
        let registry = registry();
        let a = registry.escrow_address("transfer", "channel-0").unwrap();
        let b = registry.escrow_address("transfer", "channel-0").unwrap();
        let c = registry.escrow_address("transfer", "channel-1").unwrap();
        assert_eq!(a, b);
        assert_ne!(a, c);

        assert!(matches!(
            registry.escrow_address("", "channel-0"),
            Err(RegistryError::InvalidIdentifier(_))
        ));
    }

    #[tokio::test]
    async fn test_params_replace() {
        let registry = registry();
        assert_eq!(registry.params(), TransferParams::default());

        registry.set_params(TransferParams::new(false, true));
        assert_eq!(registry.params(), TransferParams::new(false, true));
    }

    #[tokio::test]
    async fn test_page_limit_normalization() {
        let registry = Registry::new(
            MemoryStore::new(),
            RegistryConfig {
                default_page_limit: 2,
                max_page_limit: 3,
            },
        );
        for i in 0..6 {
            registry
                .register(&make_trace(&format!("channel-{i}"), "uatom"))
                .await
                .unwrap();
        }

        // limit 0 -> configured default
        let (entries, _) = registry.denom_traces(PageRequest::default()).await.unwrap();
        assert_eq!(entries.len(), 2);

        // oversized limit -> configured max
        let (entries, _) = registry
            .denom_traces(PageRequest::with_limit(100))
            .await
            .unwrap();
        assert_eq!(entries.len(), 3);
    }
}
