//! # Denom Ledger Testkit
//!
//! Testing utilities for the denom ledger.
//!
//! ## Overview
//!
//! This crate provides:
//!
//! - **Golden vectors**: Known traces with expected canonical encodings for
//!   cross-platform verification
//! - **Generators**: Proptest strategies for property-based testing
//! - **Fixtures**: Helper structs for setting up test scenarios
//!
//! ## Golden Vectors
//!
//! Golden vectors pin the canonical encoding across implementations:
//!
//! ```rust
//! use denom_ledger_testkit::vectors::{all_vectors, trace_from_vector};
//!
//! for vector in all_vectors() {
//!     let trace = trace_from_vector(&vector);
//!     assert_eq!(trace.canonical_string(), vector.canonical);
//! }
//! ```
//!
//! ## Property Testing
//!
//! Use the generators with proptest:
//!
//! ```rust,ignore
//! use proptest::prelude::*;
//! use denom_ledger_testkit::generators::{trace_from_params, TraceParams};
//!
//! proptest! {
//!     #[test]
//!     fn canonical_roundtrips(params: TraceParams) {
//!         let trace = trace_from_params(&params);
//!         let parsed = denom_ledger::DenomTrace::parse(&trace.canonical_string()).unwrap();
//!         prop_assert_eq!(parsed, trace);
//!     }
//! }
//! ```
//!
//! ## Test Fixtures
//!
//! Quickly set up test scenarios:
//!
//! ```rust
//! use denom_ledger_testkit::fixtures::{make_trace, RegistryFixture};
//!
//! let fixture = RegistryFixture::new();
//! let trace = make_trace(&[("transfer", "channel-0")], "uatom");
//! ```

pub mod fixtures;
pub mod generators;
pub mod vectors;

pub use fixtures::{make_trace, RegistryFixture};
pub use generators::{trace_from_params, TraceParams};
pub use vectors::{all_vectors, trace_from_vector, verify_all_vectors, GoldenVector};
