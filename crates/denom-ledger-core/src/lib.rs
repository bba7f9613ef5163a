//! # Denom Ledger Core
//!
//! Pure primitives for the denom ledger: traces, digests, and escrow derivation.
//!
//! This crate contains no I/O, no storage, no networking. It is pure computation
//! over denomination traces and their identifiers.
//!
//! ## Key Types
//!
//! - [`DenomTrace`] - A token's transfer history: hop sequence plus base denomination
//! - [`TraceHash`] - Content-addressed identifier (Blake3 hash of the canonical path)
//! - [`EscrowAddress`] - Deterministic per-channel escrow account identifier
//! - [`TransferParams`] - Module-wide transfer toggles
//!
//! ## Canonical Encoding
//!
//! A trace encodes to a single deterministic path string,
//! `port/channel/.../baseDenom`. See [`trace`] module.

pub mod error;
pub mod escrow;
pub mod params;
pub mod trace;
pub mod types;
pub mod validation;

pub use error::TraceError;
pub use escrow::EscrowAddress;
pub use params::TransferParams;
pub use trace::{DenomTrace, Hop};
pub use types::{TraceHash, VOUCHER_PREFIX};
pub use validation::{validate_base_denom, validate_channel_id, validate_port_id};
