//! Paginated enumeration: page requests, responses, and opaque tokens.
//!
//! Tokens are versioned byte strings carrying the insertion sequence number
//! to resume after, not raw offsets, so they stay valid if the underlying
//! row representation changes.

use bytes::Bytes;

use crate::error::{Result, StoreError};

/// Default number of entries per page when the request does not set a limit.
pub const DEFAULT_PAGE_LIMIT: u64 = 100;

/// Hard ceiling on entries per page.
pub const MAX_PAGE_LIMIT: u64 = 1000;

/// Version byte of the current page-token format.
const PAGE_TOKEN_VERSION: u8 = 0x01;

/// A request for one page of registry entries.
#[derive(Debug, Clone, Default)]
pub struct PageRequest {
    /// Opaque token returned by the previous page; resumes after that entry.
    /// Takes precedence over `offset` when both are set.
    pub key: Option<Bytes>,

    /// Number of entries to skip from the start of the enumeration.
    /// Only consulted when `key` is absent.
    pub offset: u64,

    /// Maximum entries to return. Zero means [`DEFAULT_PAGE_LIMIT`]; values
    /// above [`MAX_PAGE_LIMIT`] are clamped.
    pub limit: u64,

    /// Whether to compute the total entry count. Only honored on a request
    /// that starts from the beginning (no key, no offset).
    pub count_total: bool,

    /// Enumerate in descending insertion order instead of ascending.
    pub reverse: bool,
}

impl PageRequest {
    /// A request for the first `limit` entries.
    pub fn with_limit(limit: u64) -> Self {
        Self {
            limit,
            ..Self::default()
        }
    }

    /// Continue a previous enumeration from its `next_key`.
    pub fn after(key: Bytes, limit: u64) -> Self {
        Self {
            key: Some(key),
            limit,
            ..Self::default()
        }
    }

    /// The effective per-page limit after defaulting and clamping.
    pub fn clamped_limit(&self) -> usize {
        let limit = if self.limit == 0 {
            DEFAULT_PAGE_LIMIT
        } else {
            self.limit.min(MAX_PAGE_LIMIT)
        };
        limit as usize
    }

    /// Whether this request starts at the beginning of the enumeration.
    pub fn is_initial(&self) -> bool {
        self.key.is_none() && self.offset == 0
    }
}

/// Metadata accompanying one page of entries.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct PageResponse {
    /// Token to pass as the next request's `key`; `None` when the
    /// enumeration is exhausted.
    pub next_key: Option<Bytes>,

    /// Total number of entries, when the request asked for it.
    pub total: Option<u64>,
}

/// Encode a resume-after sequence number as an opaque page token.
pub fn encode_page_token(seq: u64) -> Bytes {
    let mut buf = Vec::with_capacity(9);
    buf.push(PAGE_TOKEN_VERSION);
    buf.extend_from_slice(&seq.to_be_bytes());
    Bytes::from(buf)
}

/// Decode a page token back into its resume-after sequence number.
pub fn decode_page_token(token: &[u8]) -> Result<u64> {
    if token.len() != 9 {
        return Err(StoreError::InvalidPageToken(format!(
            "expected 9 bytes, got {}",
            token.len()
        )));
    }
    if token[0] != PAGE_TOKEN_VERSION {
        return Err(StoreError::InvalidPageToken(format!(
            "unknown token version {:#04x}",
            token[0]
        )));
    }
    let mut seq = [0u8; 8];
    seq.copy_from_slice(&token[1..]);
    Ok(u64::from_be_bytes(seq))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_token_roundtrip() {
        for seq in [0u64, 1, 42, u64::MAX] {
            let token = encode_page_token(seq);
            assert_eq!(decode_page_token(&token).unwrap(), seq);
        }
    }

    #[test]
    fn test_token_rejects_wrong_length() {
        assert!(decode_page_token(&[]).is_err());
        assert!(decode_page_token(&[PAGE_TOKEN_VERSION; 4]).is_err());
        assert!(decode_page_token(&[PAGE_TOKEN_VERSION; 12]).is_err());
    }

    #[test]
    fn test_token_rejects_unknown_version() {
        let mut token = encode_page_token(7).to_vec();
        token[0] = 0x7f;
        assert!(matches!(
            decode_page_token(&token),
            Err(StoreError::InvalidPageToken(_))
        ));
    }

    #[test]
    fn test_clamped_limit() {
        assert_eq!(PageRequest::default().clamped_limit() as u64, DEFAULT_PAGE_LIMIT);
        assert_eq!(PageRequest::with_limit(10).clamped_limit(), 10);
        assert_eq!(
            PageRequest::with_limit(MAX_PAGE_LIMIT + 1).clamped_limit() as u64,
            MAX_PAGE_LIMIT
        );
    }

    #[test]
    fn test_is_initial() {
        assert!(PageRequest::default().is_initial());
        assert!(!PageRequest::after(encode_page_token(1), 10).is_initial());
        let offset_req = PageRequest {
            offset: 5,
            ..PageRequest::default()
        };
        assert!(!offset_req.is_initial());
    }
}
