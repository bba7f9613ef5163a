//! Denomination traces and their canonical path encoding.
//!
//! A trace records the transfer channels a token crossed before arriving on
//! the current ledger. It is immutable history: once registered under its
//! hash it is never edited or deleted.

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::error::TraceError;
use crate::types::TraceHash;
use crate::validation::{validate_base_denom, validate_channel_id, validate_port_id};

/// A single (port, channel) traversal in a trace.
///
/// The most recent hop appears first in [`DenomTrace::hops`]: each forward
/// transfer prepends the receiving channel end to the path.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Hop {
    /// Port identifier on the receiving chain.
    pub port: String,

    /// Channel identifier on the receiving chain.
    pub channel: String,
}

impl Hop {
    /// Create a new hop.
    pub fn new(port: impl Into<String>, channel: impl Into<String>) -> Self {
        Self {
            port: port.into(),
            channel: channel.into(),
        }
    }

    /// Validate both identifiers.
    pub fn validate(&self) -> Result<(), TraceError> {
        validate_port_id(&self.port)?;
        validate_channel_id(&self.channel)
    }
}

impl fmt::Display for Hop {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}/{}", self.port, self.channel)
    }
}

/// A token's full transfer history: ordered hop sequence plus base denomination.
///
/// The canonical encoding is a pure function of the fields. Because hop
/// identifiers can never contain `/` and the base denomination occupies
/// exactly the final segment, the encoding is injective and decodes back
/// to the original trace unambiguously.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct DenomTrace {
    /// Hops crossed before reaching this chain, most recent first.
    pub hops: Vec<Hop>,

    /// The denomination on the chain the token originated from.
    pub base_denom: String,
}

impl DenomTrace {
    /// Create a trace from hops and a base denomination.
    pub fn new(hops: Vec<Hop>, base_denom: impl Into<String>) -> Self {
        Self {
            hops,
            base_denom: base_denom.into(),
        }
    }

    /// Encode to the canonical path string: `port/channel/.../baseDenom`.
    pub fn canonical_string(&self) -> String {
        let mut out = String::new();
        for hop in &self.hops {
            out.push_str(&hop.port);
            out.push('/');
            out.push_str(&hop.channel);
            out.push('/');
        }
        out.push_str(&self.base_denom);
        out
    }

    /// Decode a canonical path string back into a trace.
    ///
    /// The string must consist of one or more `port/channel` pairs followed
    /// by a single base-denomination segment. Anything else, including a
    /// bare denomination with no transfer history, an even segment count,
    /// or an empty segment, is rejected as malformed.
    pub fn parse(s: &str) -> Result<Self, TraceError> {
        let segments: Vec<&str> = s.split('/').collect();
        if segments.len() % 2 == 0 {
            return Err(TraceError::Malformed(format!(
                "trace {s:?} has an odd number of path segments before the base denomination"
            )));
        }
        if segments.len() < 3 {
            return Err(TraceError::Malformed(format!(
                "trace {s:?} has no port/channel hop"
            )));
        }
        if segments.iter().any(|seg| seg.is_empty()) {
            return Err(TraceError::Malformed(format!(
                "trace {s:?} contains an empty path segment"
            )));
        }

        let mut hops = Vec::with_capacity(segments.len() / 2);
        for pair in segments[..segments.len() - 1].chunks(2) {
            let hop = Hop::new(pair[0], pair[1]);
            hop.validate()
                .map_err(|e| TraceError::Malformed(e.to_string()))?;
            hops.push(hop);
        }

        let base_denom = segments[segments.len() - 1];
        validate_base_denom(base_denom).map_err(|e| TraceError::Malformed(e.to_string()))?;

        Ok(Self::new(hops, base_denom))
    }

    /// Compute the content-address of this trace.
    pub fn hash(&self) -> TraceHash {
        TraceHash::digest(&self.canonical_string())
    }

    /// Validate the trace's fields.
    ///
    /// Unlike [`DenomTrace::parse`], an empty hop sequence is accepted here:
    /// such a trace is constructible and hashable, it just never appears in
    /// the registry (tokens without transfer history are not registered).
    pub fn validate(&self) -> Result<(), TraceError> {
        for hop in &self.hops {
            hop.validate()?;
        }
        validate_base_denom(&self.base_denom)
    }

    /// Number of hops in the trace.
    pub fn hop_count(&self) -> usize {
        self.hops.len()
    }
}

impl fmt::Display for DenomTrace {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.canonical_string())
    }
}
