//! Credential loading and message signing.
//!
//! # Security
//! - Keys are never logged or serialized
//! - `Debug` prints only the derived address

use alloy::primitives::{hex, Address};
use alloy::signers::local::PrivateKeySigner;
use alloy::signers::SignerSync;

use crate::wallet::types::{CredentialError, CredentialResult, SignedMessage};

/// A wallet private key together with its derived address.
#[derive(Clone)]
pub struct Credential {
    signer: PrivateKeySigner,
    address: String,
}

impl Credential {
    /// Create a credential from a hex-encoded private key string.
    ///
    /// # Arguments
    /// * `private_key_hex` - Hex string (with or without 0x prefix)
    pub fn from_private_key(private_key_hex: &str) -> CredentialResult<Self> {
        let trimmed = private_key_hex.trim();
        let key_hex = trimmed.strip_prefix("0x").unwrap_or(trimmed);

        let signer: PrivateKeySigner = key_hex
            .parse()
            .map_err(|e| CredentialError::InvalidKey(format!("{}", e)))?;
        let address = signer.address().to_checksum(None);

        Ok(Self { signer, address })
    }

    /// EIP-55 checksummed address.
    pub fn address(&self) -> &str {
        &self.address
    }

    /// Raw address.
    pub fn raw_address(&self) -> Address {
        self.signer.address()
    }

    /// Sign arbitrary message bytes (with Ethereum personal-message prefix).
    pub fn sign(&self, message: &[u8]) -> CredentialResult<SignedMessage> {
        let signature = self
            .signer
            .sign_message_sync(message)
            .map_err(|e| CredentialError::Signing(e.to_string()))?;

        Ok(SignedMessage {
            signature: hex::encode_prefixed(signature.as_bytes()),
            address: self.address.clone(),
        })
    }
}

impl std::fmt::Debug for Credential {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Credential")
            .field("address", &self.address)
            .finish_non_exhaustive()
    }
}

/// Shorten an address for logs: `0x1234...abcd`.
pub fn mask_address(address: &str) -> String {
    if address.len() <= 10 || !address.is_ascii() {
        return address.to_string();
    }
    format!("{}...{}", &address[..6], &address[address.len() - 4..])
}
