//! User-persona message generation.
//!
//! The scheduler needs a plausible user question per topic. Where it comes
//! from is behind [`PersonaGenerator`], so the chat flow can run against any
//! provider, or a canned one in tests.

pub mod groq;

use async_trait::async_trait;
use thiserror::Error;

pub use groq::GroqPersona;

/// Errors from a persona provider.
#[derive(Debug, Error)]
pub enum PersonaError {
    #[error("persona API key missing (set persona.api_key or GROQ_API_KEY)")]
    MissingApiKey,

    #[error("persona provider returned {status}: {body}")]
    Http { status: u16, body: String },

    #[error("persona request failed: {0}")]
    Transport(String),

    #[error("malformed persona response: {0}")]
    Malformed(String),
}

/// Produces the user-role message for a topic.
#[async_trait]
pub trait PersonaGenerator: Send + Sync {
    async fn generate_user_message(&self, topic: &str) -> Result<String, PersonaError>;
}
