//! Escrow address derivation.
//!
//! Each (port, channel) pair owns exactly one escrow account holding the
//! tokens locked against that channel. The address is a pure function of
//! the pair, computable offline without any registry state.

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::error::TraceError;
use crate::validation::{validate_channel_id, validate_port_id};

/// Domain tag mixed into every escrow derivation.
const ESCROW_NAMESPACE: &[u8] = b"denom-ledger/escrow/v1:";

/// A 20-byte escrow account identifier.
///
/// Derived from Blake3(namespace || port || "/" || channel), truncated to
/// the fixed account-identifier width. Distinct (port, channel) pairs yield
/// distinct addresses with overwhelming probability.
#[derive(Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct EscrowAddress(pub [u8; 20]);

impl EscrowAddress {
    /// Derive the escrow address for a (port, channel) pair.
    pub fn derive(port: &str, channel: &str) -> Result<Self, TraceError> {
        validate_port_id(port)?;
        validate_channel_id(channel)?;

        let mut hasher = blake3::Hasher::new();
        hasher.update(ESCROW_NAMESPACE);
        hasher.update(port.as_bytes());
        hasher.update(b"/");
        hasher.update(channel.as_bytes());
        let digest = hasher.finalize();

        let mut addr = [0u8; 20];
        addr.copy_from_slice(&digest.as_bytes()[..20]);
        Ok(Self(addr))
    }

    /// Create from raw bytes.
    pub const fn from_bytes(bytes: [u8; 20]) -> Self {
        Self(bytes)
    }

    /// Get the raw bytes.
    pub const fn as_bytes(&self) -> &[u8; 20] {
        &self.0
    }

    /// Convert to the fixed-width (40 character) hex string.
    pub fn to_hex(&self) -> String {
        hex::encode(self.0)
    }
}

impl fmt::Debug for EscrowAddress {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "EscrowAddress({})", self.to_hex())
    }
}

impl fmt::Display for EscrowAddress {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_hex())
    }
}

impl AsRef<[u8]> for EscrowAddress {
    fn as_ref(&self) -> &[u8] {
        &self.0
    }
}
