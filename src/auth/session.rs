//! Challenge-response session acquisition.
//!
//! # Responsibilities
//! - Sign `{"wallet_address", "timestamp"}` with the wallet key
//! - Exchange the signature for an access token / API key pair
//! - Refresh the pair in place when a node reports it expired

use std::time::{SystemTime, UNIX_EPOCH};

use serde_json::Value;

use crate::auth::types::{
    AuthError, AuthMessage, AuthRequest, AuthResult, Session, SessionTokens,
};
use crate::config::EndpointConfig;
use crate::http::{ApiEnvelope, HttpContext};
use crate::observability::metrics;
use crate::wallet::{mask_address, Credential};

/// Obtains and refreshes sessions against the wallet-connect endpoint.
#[derive(Debug, Clone)]
pub struct SessionManager {
    http: HttpContext,
    auth_url: String,
}

impl SessionManager {
    pub fn new(http: HttpContext, endpoints: &EndpointConfig) -> Self {
        Self {
            http,
            auth_url: endpoints.auth_url.clone(),
        }
    }

    /// Authenticate a wallet, producing a fresh session.
    pub async fn authenticate(&self, credential: &Credential) -> AuthResult<Session> {
        let tokens = self.request_tokens(credential).await?;
        Ok(Session::new(credential.address(), tokens))
    }

    /// Re-run the exchange and rotate the session's tokens.
    pub async fn refresh(&self, session: &mut Session, credential: &Credential) -> AuthResult<()> {
        let tokens = self.request_tokens(credential).await?;
        session.rotate(tokens);
        Ok(())
    }

    async fn request_tokens(&self, credential: &Credential) -> AuthResult<SessionTokens> {
        let masked = mask_address(credential.address());
        let result = self.exchange(credential).await;

        match &result {
            Ok(_) => {
                metrics::record_auth("success");
                tracing::debug!(address = %masked, "Session tokens issued");
            }
            Err(e) => {
                metrics::record_auth("failure");
                tracing::error!(address = %masked, error = %e, "Error getting auth token");
            }
        }

        result
    }

    async fn exchange(&self, credential: &Credential) -> AuthResult<SessionTokens> {
        let message = challenge(credential.address(), unix_now());
        let serialized =
            serde_json::to_string(&message).map_err(|e| AuthError::Malformed(e.to_string()))?;
        let signed = credential.sign(serialized.as_bytes())?;

        let payload = AuthRequest {
            message: &message,
            signature: &signed.signature,
        };

        let response = self
            .http
            .client
            .post(&self.auth_url)
            .headers(self.http.headers.site())
            .timeout(self.http.request_timeout)
            .json(&payload)
            .send()
            .await
            .map_err(|e| AuthError::Transport(e.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            return Err(AuthError::Http(status.as_u16()));
        }

        // `data` is only decoded once `code` says the exchange succeeded.
        let envelope: ApiEnvelope<Value> = response
            .json()
            .await
            .map_err(|e| AuthError::Malformed(e.to_string()))?;

        if !envelope.is_ok() {
            return Err(AuthError::Rejected {
                code: envelope.code,
                message: envelope
                    .msg
                    .unwrap_or_else(|| "Failed to retrieve access token".to_string()),
            });
        }

        let data = envelope
            .data
            .ok_or_else(|| AuthError::Malformed("missing data".to_string()))?;
        serde_json::from_value(data).map_err(|e| AuthError::Malformed(e.to_string()))
    }
}

/// Build the challenge for `address` at `timestamp`.
pub fn challenge(address: &str, timestamp: u64) -> AuthMessage {
    AuthMessage {
        wallet_address: address.to_string(),
        timestamp,
    }
}

fn unix_now() -> u64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .unwrap_or_default()
        .as_secs()
}
