//! Golden vectors for the canonical trace encoding.
//!
//! Every implementation of the ledger must produce these exact canonical
//! strings. Digests are checked structurally (width, determinism,
//! distinctness) rather than against frozen hex, so the vectors stay valid
//! for any conforming hasher configuration.

use serde::{Deserialize, Serialize};

use denom_ledger_core::{DenomTrace, Hop};

/// A single golden vector: trace fields and the expected canonical string.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GoldenVector {
    pub name: String,
    pub description: String,

    // Inputs
    pub hops: Vec<(String, String)>,
    pub base_denom: String,

    // Expected canonical encoding
    pub canonical: String,
}

fn vector(
    name: &str,
    description: &str,
    hops: &[(&str, &str)],
    base_denom: &str,
    canonical: &str,
) -> GoldenVector {
    GoldenVector {
        name: name.to_string(),
        description: description.to_string(),
        hops: hops
            .iter()
            .map(|(p, c)| (p.to_string(), c.to_string()))
            .collect(),
        base_denom: base_denom.to_string(),
        canonical: canonical.to_string(),
    }
}

/// Build the trace described by a vector.
pub fn trace_from_vector(v: &GoldenVector) -> DenomTrace {
    DenomTrace::new(
        v.hops
            .iter()
            .map(|(p, c)| Hop::new(p.clone(), c.clone()))
            .collect(),
        v.base_denom.clone(),
    )
}

/// All golden vectors.
pub fn all_vectors() -> Vec<GoldenVector> {
    vec![
        vector(
            "single_hop",
            "One transfer hop in front of a staking denom",
            &[("transfer", "channel-0")],
            "uatom",
            "transfer/channel-0/uatom",
        ),
        vector(
            "single_hop_high_channel",
            "Channel ordinals appear verbatim, not zero-padded",
            &[("transfer", "channel-141")],
            "uosmo",
            "transfer/channel-141/uosmo",
        ),
        vector(
            "two_hops",
            "A denom forwarded across two chains",
            &[("transfer", "channel-3"), ("transfer", "channel-0")],
            "uatom",
            "transfer/channel-3/transfer/channel-0/uatom",
        ),
        vector(
            "three_hops",
            "Long path: every hop contributes exactly two segments",
            &[
                ("transfer", "channel-7"),
                ("transfer", "channel-42"),
                ("transfer", "channel-0"),
            ],
            "untrn",
            "transfer/channel-7/transfer/channel-42/transfer/channel-0/untrn",
        ),
        vector(
            "custom_port",
            "Non-default port identifiers are preserved",
            &[("wasm.contract-7", "channel-2")],
            "factorytoken",
            "wasm.contract-7/channel-2/factorytoken",
        ),
        vector(
            "erc20_base_denom",
            "Bridged base denominations keep their full name",
            &[("transfer", "channel-1")],
            "gravity0x6B175474E89094C44Da98b954EedeAC495271d0F",
            "transfer/channel-1/gravity0x6B175474E89094C44Da98b954EedeAC495271d0F",
        ),
    ]
}

/// Verify every vector: exact canonical string, parse round-trip, and
/// digest shape. Panics on the first mismatch.
pub fn verify_all_vectors() {
    let vectors = all_vectors();
    let mut hashes = Vec::new();

    for v in &vectors {
        let trace = trace_from_vector(v);

        assert_eq!(
            trace.canonical_string(),
            v.canonical,
            "canonical mismatch for {}",
            v.name
        );

        let parsed = DenomTrace::parse(&v.canonical)
            .unwrap_or_else(|e| panic!("vector {} must parse: {e}", v.name));
        assert_eq!(parsed, trace, "roundtrip mismatch for {}", v.name);

        let hash = trace.hash();
        assert_eq!(hash.as_bytes().len(), 32, "digest width for {}", v.name);
        assert_eq!(hash, trace.hash(), "digest determinism for {}", v.name);
        assert_eq!(hash.to_hex().len(), 64, "hex width for {}", v.name);
        hashes.push(hash);
    }

    // All vectors are distinct traces, so all digests must differ.
    for i in 0..hashes.len() {
        for j in (i + 1)..hashes.len() {
            assert_ne!(
                hashes[i], hashes[j],
                "digest collision between {} and {}",
                vectors[i].name, vectors[j].name
            );
        }
    }
}
