//! Proptest generators for property-based testing.

use proptest::prelude::*;

use denom_ledger_core::{DenomTrace, Hop, TraceHash};

/// Generate a valid port identifier.
pub fn port_id() -> impl Strategy<Value = String> {
    "[a-z][a-z0-9]{1,15}".prop_map(String::from)
}

/// Generate a valid channel identifier.
pub fn channel_id() -> impl Strategy<Value = String> {
    (0u64..=99_999).prop_map(|n| format!("channel-{n}"))
}

/// Generate a valid base denomination.
pub fn base_denom() -> impl Strategy<Value = String> {
    "[a-z][a-z0-9]{2,15}".prop_map(String::from)
}

/// Generate a single hop.
pub fn hop() -> impl Strategy<Value = Hop> {
    (port_id(), channel_id()).prop_map(|(port, channel)| Hop { port, channel })
}

/// Generate a trace with 1 to `max_hops` hops.
pub fn denom_trace(max_hops: usize) -> impl Strategy<Value = DenomTrace> {
    (prop::collection::vec(hop(), 1..=max_hops), base_denom())
        .prop_map(|(hops, base)| DenomTrace::new(hops, base))
}

/// Generate a random trace hash.
pub fn trace_hash() -> impl Strategy<Value = TraceHash> {
    any::<[u8; 32]>().prop_map(TraceHash::from_bytes)
}

/// Parameters for generating a trace.
#[derive(Debug, Clone)]
pub struct TraceParams {
    pub hops: Vec<(String, String)>,
    pub base_denom: String,
}

impl Arbitrary for TraceParams {
    type Parameters = ();
    type Strategy = BoxedStrategy<Self>;

    fn arbitrary_with(_: Self::Parameters) -> Self::Strategy {
        (
            prop::collection::vec((port_id(), channel_id()), 1..=4),
            base_denom(),
        )
            .prop_map(|(hops, base_denom)| TraceParams { hops, base_denom })
            .boxed()
    }
}

/// Build a trace from parameters.
pub fn trace_from_params(params: &TraceParams) -> DenomTrace {
    DenomTrace::new(
        params
            .hops
            .iter()
            .map(|(port, channel)| Hop::new(port.clone(), channel.clone()))
            .collect(),
        params.base_denom.clone(),
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use denom_ledger_core::EscrowAddress;

    proptest! {
        #[test]
        fn test_canonical_roundtrips(params: TraceParams) {
            let trace = trace_from_params(&params);
            let parsed = DenomTrace::parse(&trace.canonical_string()).unwrap();
            prop_assert_eq!(parsed, trace);
        }

        #[test]
        fn test_canonical_deterministic(params: TraceParams) {
            let t1 = trace_from_params(&params);
            let t2 = trace_from_params(&params);
            prop_assert_eq!(t1.canonical_string(), t2.canonical_string());
            prop_assert_eq!(t1.hash(), t2.hash());
        }

        #[test]
        fn test_distinct_traces_distinct_encodings(
            a in denom_trace(4),
            b in denom_trace(4),
        ) {
            prop_assume!(a != b);
            prop_assert_ne!(a.canonical_string(), b.canonical_string());
            prop_assert_ne!(a.hash(), b.hash());
        }

        #[test]
        fn test_generated_traces_validate(t in denom_trace(4)) {
            prop_assert!(t.validate().is_ok());
        }

        #[test]
        fn test_escrow_differs_across_channels(
            port in port_id(),
            c1 in channel_id(),
            c2 in channel_id(),
        ) {
            prop_assume!(c1 != c2);
            let a = EscrowAddress::derive(&port, &c1).unwrap();
            let b = EscrowAddress::derive(&port, &c2).unwrap();
            prop_assert_ne!(a, b);
        }

        #[test]
        fn test_escrow_deterministic(port in port_id(), channel in channel_id()) {
            let a = EscrowAddress::derive(&port, &channel).unwrap();
            let b = EscrowAddress::derive(&port, &channel).unwrap();
            prop_assert_eq!(a, b);
        }
    }
}
