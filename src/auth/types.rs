//! Session type, wire payloads and error definitions.

use std::time::SystemTime;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::wallet::CredentialError;

/// Errors that can occur while authenticating a wallet.
#[derive(Debug, Error)]
pub enum AuthError {
    /// The auth endpoint answered with a non-2xx status.
    #[error("HTTP error! status: {0}")]
    Http(u16),

    /// The endpoint answered but refused to issue tokens.
    #[error("auth rejected (code {code}): {message}")]
    Rejected { code: i64, message: String },

    /// The request never produced a response.
    #[error("auth request failed: {0}")]
    Transport(String),

    /// The response body did not match the expected envelope.
    #[error("malformed auth response: {0}")]
    Malformed(String),

    /// Signing the challenge failed.
    #[error(transparent)]
    Credential(#[from] CredentialError),
}

/// Result type for auth operations.
pub type AuthResult<T> = Result<T, AuthError>;

/// The challenge message; field order is part of the signed bytes.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct AuthMessage {
    pub wallet_address: String,
    pub timestamp: u64,
}

/// Body of the wallet-connect request.
#[derive(Debug, Serialize)]
pub struct AuthRequest<'a> {
    pub message: &'a AuthMessage,
    pub signature: &'a str,
}

/// Token pair returned by the wallet-connect endpoint.
#[derive(Clone, Deserialize)]
pub struct SessionTokens {
    pub access_token: String,
    pub api_key: String,
}

impl std::fmt::Debug for SessionTokens {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SessionTokens").finish_non_exhaustive()
    }
}

/// Credentials for one authenticated wallet.
#[derive(Clone)]
pub struct Session {
    address: String,
    access_token: String,
    api_key: String,
    created_at: SystemTime,
}

impl Session {
    pub fn new(address: impl Into<String>, tokens: SessionTokens) -> Self {
        Self {
            address: address.into(),
            access_token: tokens.access_token,
            api_key: tokens.api_key,
            created_at: SystemTime::now(),
        }
    }

    pub fn address(&self) -> &str {
        &self.address
    }

    /// Token for the account API (directory, bind).
    pub fn access_token(&self) -> &str {
        &self.access_token
    }

    /// Bearer key for chat nodes.
    pub fn api_key(&self) -> &str {
        &self.api_key
    }

    pub fn created_at(&self) -> SystemTime {
        self.created_at
    }

    /// Replace the token pair after a refresh.
    pub fn rotate(&mut self, tokens: SessionTokens) {
        self.access_token = tokens.access_token;
        self.api_key = tokens.api_key;
    }
}

impl std::fmt::Debug for Session {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Session")
            .field("address", &self.address)
            .field("created_at", &self.created_at)
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn tokens(access: &str, key: &str) -> SessionTokens {
        SessionTokens {
            access_token: access.to_string(),
            api_key: key.to_string(),
        }
    }

    #[test]
    fn test_auth_message_field_order() {
        let message = AuthMessage {
            wallet_address: "0xabc".to_string(),
            timestamp: 1_700_000_000,
        };
        assert_eq!(
            serde_json::to_string(&message).unwrap(),
            r#"{"wallet_address":"0xabc","timestamp":1700000000}"#
        );
    }

    #[test]
    fn test_session_rotate() {
        let mut session = Session::new("0xabc", tokens("a1", "k1"));
        session.rotate(tokens("a2", "k2"));
        assert_eq!(session.access_token(), "a2");
        assert_eq!(session.api_key(), "k2");
        assert_eq!(session.address(), "0xabc");
    }

    #[test]
    fn test_debug_hides_tokens() {
        let session = Session::new("0xabc", tokens("secret-access", "secret-key"));
        let debug = format!("{:?}", session);
        assert!(!debug.contains("secret"));
    }
}
