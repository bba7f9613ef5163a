//! Error types for the denom ledger core.

use thiserror::Error;

/// Errors raised while encoding, decoding, or validating traces and
/// channel identifiers.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum TraceError {
    #[error("malformed denom trace: {0}")]
    Malformed(String),

    #[error("invalid {kind} identifier {value:?}")]
    InvalidIdentifier { kind: &'static str, value: String },

    #[error("base denomination cannot be empty")]
    EmptyBaseDenom,

    #[error("base denomination {0:?} contains a path separator")]
    BaseDenomWithSeparator(String),

    #[error("invalid trace hash {0:?}")]
    InvalidHash(String),
}
