//! Strong type definitions for the denom ledger.
//!
//! All identifiers are newtypes to prevent misuse at compile time.

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::error::TraceError;

/// Prefix used when rendering a registered denomination for display,
/// as in `ibc/27394FB0...`.
pub const VOUCHER_PREFIX: &str = "ibc";

/// A 32-byte trace identifier, computed as Blake3(canonical_string(trace)).
///
/// This is the content-address of a denomination trace. Two traces with the
/// same hop sequence and base denomination always have the same TraceHash,
/// so on-ledger balances can carry this fixed-width identifier instead of
/// the full, unbounded path string.
#[derive(Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct TraceHash(pub [u8; 32]);

impl TraceHash {
    /// Compute the hash of a canonical trace string.
    pub fn digest(canonical: &str) -> Self {
        Self(*blake3::hash(canonical.as_bytes()).as_bytes())
    }

    /// Create a new TraceHash from raw bytes.
    pub const fn from_bytes(bytes: [u8; 32]) -> Self {
        Self(bytes)
    }

    /// Get the raw bytes.
    pub const fn as_bytes(&self) -> &[u8; 32] {
        &self.0
    }

    /// Convert to the fixed-width (64 character) hex string.
    pub fn to_hex(&self) -> String {
        hex::encode(self.0)
    }

    /// Parse from a fixed-width hex string.
    ///
    /// Accepts exactly 64 hex characters, upper or lower case.
    pub fn from_hex(s: &str) -> Result<Self, TraceError> {
        let bytes = hex::decode(s).map_err(|_| TraceError::InvalidHash(s.to_string()))?;
        if bytes.len() != 32 {
            return Err(TraceError::InvalidHash(s.to_string()));
        }
        let mut arr = [0u8; 32];
        arr.copy_from_slice(&bytes);
        Ok(Self(arr))
    }

    /// Render as a display denomination, `ibc/<hex>`.
    pub fn to_voucher_denom(&self) -> String {
        format!("{}/{}", VOUCHER_PREFIX, self.to_hex())
    }

    /// Parse a display denomination of the form `ibc/<hex>`.
    pub fn from_voucher_denom(denom: &str) -> Result<Self, TraceError> {
        match denom.split_once('/') {
            Some((prefix, hex)) if prefix == VOUCHER_PREFIX => Self::from_hex(hex),
            _ => Err(TraceError::InvalidHash(denom.to_string())),
        }
    }

    /// The zero trace hash (used as a sentinel).
    pub const ZERO: Self = Self([0u8; 32]);
}

impl fmt::Debug for TraceHash {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "TraceHash({})", &self.to_hex()[..16])
    }
}

impl fmt::Display for TraceHash {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", &self.to_hex()[..16])
    }
}

impl AsRef<[u8]> for TraceHash {
    fn as_ref(&self) -> &[u8] {
        &self.0
    }
}

impl From<[u8; 32]> for TraceHash {
    fn from(bytes: [u8; 32]) -> Self {
        Self(bytes)
    }
}

impl TryFrom<&[u8]> for TraceHash {
    type Error = std::array::TryFromSliceError;

    fn try_from(slice: &[u8]) -> Result<Self, Self::Error> {
        let arr: [u8; 32] = slice.try_into()?;
        Ok(Self(arr))
    }
}
