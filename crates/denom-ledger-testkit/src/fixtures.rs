//! Test fixtures and helpers.
//!
//! Common setup code for integration tests.

use denom_ledger::{Registry, RegistryConfig};
use denom_ledger_core::{DenomTrace, Hop, TraceHash};
use denom_ledger_store::MemoryStore;

/// Build a trace from (port, channel) pairs and a base denomination.
pub fn make_trace(hops: &[(&str, &str)], base_denom: &str) -> DenomTrace {
    DenomTrace::new(
        hops.iter().map(|(p, c)| Hop::new(*p, *c)).collect(),
        base_denom,
    )
}

/// A test fixture with a registry over an in-memory store.
pub struct RegistryFixture {
    pub registry: Registry<MemoryStore>,
}

impl RegistryFixture {
    /// Create a new fixture with default configuration.
    pub fn new() -> Self {
        Self {
            registry: Registry::new(MemoryStore::new(), RegistryConfig::default()),
        }
    }

    /// Create with explicit page limits.
    pub fn with_page_limits(default: u64, max: u64) -> Self {
        Self {
            registry: Registry::new(
                MemoryStore::new(),
                RegistryConfig {
                    default_page_limit: default,
                    max_page_limit: max,
                },
            ),
        }
    }

    /// Register `count` single-hop traces over distinct channels,
    /// returning their hashes in registration order.
    pub async fn register_channels(&self, count: usize) -> Vec<TraceHash> {
        let mut hashes = Vec::with_capacity(count);
        for i in 0..count {
            let trace = make_trace(&[("transfer", &format!("channel-{i}"))], "uatom");
            hashes.push(
                self.registry
                    .register(&trace)
                    .await
                    .expect("fixture trace must register"),
            );
        }
        hashes
    }
}

impl Default for RegistryFixture {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use denom_ledger::PageRequest;

    #[tokio::test]
    async fn test_fixture_registers_distinct_traces() {
        let fixture = RegistryFixture::new();
        let hashes = fixture.register_channels(3).await;

        assert_eq!(hashes.len(), 3);
        assert_ne!(hashes[0], hashes[1]);
        assert_ne!(hashes[1], hashes[2]);
    }

    #[tokio::test]
    async fn test_fixture_page_limits_apply() {
        let fixture = RegistryFixture::with_page_limits(2, 5);
        fixture.register_channels(4).await;

        let (entries, _) = fixture
            .registry
            .denom_traces(PageRequest::default())
            .await
            .unwrap();
        assert_eq!(entries.len(), 2);
    }

    #[test]
    fn test_make_trace() {
        let trace = make_trace(&[("transfer", "channel-0")], "uatom");
        assert_eq!(trace.canonical_string(), "transfer/channel-0/uatom");
    }
}
