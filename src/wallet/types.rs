//! Wallet error definitions and signature output.

use thiserror::Error;

/// Errors that can occur while handling credentials.
#[derive(Debug, Error)]
pub enum CredentialError {
    /// The private key does not decode to a valid secp256k1 key.
    #[error("Invalid private key: {0}")]
    InvalidKey(String),

    /// The signer refused to produce a signature.
    #[error("Signing failed: {0}")]
    Signing(String),
}

/// Result type for credential operations.
pub type CredentialResult<T> = Result<T, CredentialError>;

/// Output of signing a message.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SignedMessage {
    /// `0x`-prefixed 65-byte signature (r ‖ s ‖ v, v in {27, 28}).
    pub signature: String,
    /// EIP-55 checksummed signer address.
    pub address: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = CredentialError::InvalidKey("odd number of digits".into());
        assert_eq!(err.to_string(), "Invalid private key: odd number of digits");
    }
}
