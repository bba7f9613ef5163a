//! Identifier validation: structural checks for ports, channels, and denoms.

use crate::error::TraceError;

/// Minimum length of a port or channel identifier.
pub const MIN_IDENTIFIER_LEN: usize = 2;

/// Maximum length of a port or channel identifier.
pub const MAX_IDENTIFIER_LEN: usize = 64;

/// The path separator reserved by the canonical trace encoding.
pub const PATH_SEPARATOR: char = '/';

fn is_identifier_char(c: char) -> bool {
    c.is_ascii_alphanumeric() || matches!(c, '.' | '_' | '+' | '-' | '#' | '[' | ']' | '<' | '>')
}

fn validate_identifier(kind: &'static str, value: &str) -> Result<(), TraceError> {
    let len = value.len();
    if len < MIN_IDENTIFIER_LEN || len > MAX_IDENTIFIER_LEN {
        return Err(TraceError::InvalidIdentifier {
            kind,
            value: value.to_string(),
        });
    }
    if !value.chars().all(is_identifier_char) {
        return Err(TraceError::InvalidIdentifier {
            kind,
            value: value.to_string(),
        });
    }
    Ok(())
}

/// Validate a port identifier.
///
/// Ports are 2-64 ASCII characters drawn from alphanumerics and
/// `._+-#[]<>`. The path separator is never a valid identifier character,
/// which keeps the canonical trace encoding unambiguous.
pub fn validate_port_id(port: &str) -> Result<(), TraceError> {
    validate_identifier("port", port)
}

/// Validate a channel identifier. Same character set and bounds as ports.
pub fn validate_channel_id(channel: &str) -> Result<(), TraceError> {
    validate_identifier("channel", channel)
}

/// Validate a base denomination: non-empty and free of path separators.
pub fn validate_base_denom(denom: &str) -> Result<(), TraceError> {
    if denom.trim().is_empty() {
        return Err(TraceError::EmptyBaseDenom);
    }
    if denom.contains(PATH_SEPARATOR) {
        return Err(TraceError::BaseDenomWithSeparator(denom.to_string()));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_valid_identifiers() {
        validate_port_id("transfer").unwrap();
        validate_port_id("wasm.contract-7").unwrap();
        validate_channel_id("channel-0").unwrap();
        validate_channel_id("channel-141").unwrap();
    }

    #[test]
    fn test_identifier_length_bounds() {
        assert!(validate_port_id("").is_err());
        assert!(validate_port_id("t").is_err());
        assert!(validate_port_id(&"p".repeat(64)).is_ok());
        assert!(validate_port_id(&"p".repeat(65)).is_err());
    }

    #[test]
    fn test_identifier_rejects_separator() {
        assert!(validate_port_id("trans/fer").is_err());
        assert!(validate_channel_id("channel/0").is_err());
    }

    #[test]
    fn test_identifier_rejects_non_ascii() {
        assert!(validate_port_id("transf\u{00e9}r").is_err());
        assert!(validate_channel_id("channel 0").is_err());
    }

    #[test]
    fn test_base_denom() {
        validate_base_denom("uatom").unwrap();
        validate_base_denom("gravity0x6B175474E89094C44Da98b954EedeAC495271d0F").unwrap();
        assert_eq!(validate_base_denom(""), Err(TraceError::EmptyBaseDenom));
        assert_eq!(validate_base_denom("   "), Err(TraceError::EmptyBaseDenom));
        assert!(matches!(
            validate_base_denom("gamm/pool/1"),
            Err(TraceError::BaseDenomWithSeparator(_))
        ));
    }
}
