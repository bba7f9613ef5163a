//! Module-wide transfer parameters.
//!
//! A small fixed set of governance-controlled toggles. The value is always
//! replaced wholesale; no field is mutated in place.

use serde::{Deserialize, Serialize};

/// Transfer module parameters.
///
/// Consumed read-only by the registry; updated only through a governance
/// collaborator outside this core.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct TransferParams {
    /// Whether outbound transfers are enabled.
    pub send_enabled: bool,

    /// Whether inbound transfers are enabled.
    pub receive_enabled: bool,
}

impl TransferParams {
    /// Create a parameter set with explicit toggles.
    pub const fn new(send_enabled: bool, receive_enabled: bool) -> Self {
        Self {
            send_enabled,
            receive_enabled,
        }
    }
}

impl Default for TransferParams {
    fn default() -> Self {
        Self::new(true, true)
    }
}
