//! Chat wire types, exchange record and error definitions.

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::nodes::NodeId;

/// Errors that can occur while chatting with a node.
#[derive(Debug, Error)]
pub enum ChatError {
    /// Refreshing the API key after a 401 failed, or the refreshed key was
    /// rejected too many times in a row.
    #[error("Failed to refresh token: {0}")]
    ReauthFailed(String),

    /// The node answered with a non-retryable status.
    #[error("HTTP error! status: {status} => {message}")]
    Http { status: u16, message: String },

    /// Connecting, sending or reading the stream failed.
    #[error("chat request failed: {0}")]
    Transport(String),

    /// Every attempt slot was used.
    #[error("gave up after {attempts} attempts: {last}")]
    Exhausted { attempts: u32, last: String },
}

/// Result type for chat operations.
pub type ChatResult<T> = Result<T, ChatError>;

/// One message of an OpenAI-style conversation.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct ChatMessage {
    pub role: String,
    pub content: String,
}

impl ChatMessage {
    pub fn system(content: impl Into<String>) -> Self {
        Self {
            role: "system".to_string(),
            content: content.into(),
        }
    }

    pub fn user(content: impl Into<String>) -> Self {
        Self {
            role: "user".to_string(),
            content: content.into(),
        }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct StreamOptions {
    pub include_usage: bool,
}

/// Streaming completion request sent to a node.
#[derive(Debug, Clone, Serialize)]
pub struct ChatRequest {
    pub model: String,
    pub messages: Vec<ChatMessage>,
    pub stream: bool,
    pub stream_options: StreamOptions,
}

impl ChatRequest {
    /// System persona plus one user message, streamed with usage accounting.
    pub fn streaming(model: &str, system_prompt: &str, user_message: &str) -> Self {
        Self {
            model: model.to_string(),
            messages: vec![
                ChatMessage::system(system_prompt),
                ChatMessage::user(user_message),
            ],
            stream: true,
            stream_options: StreamOptions {
                include_usage: true,
            },
        }
    }
}

/// One `data:` payload of the event stream.
#[derive(Debug, Deserialize)]
pub struct StreamChunk {
    #[serde(default)]
    pub choices: Vec<StreamChoice>,
}

#[derive(Debug, Deserialize)]
pub struct StreamChoice {
    #[serde(default)]
    pub delta: Option<StreamDelta>,
}

#[derive(Debug, Deserialize)]
pub struct StreamDelta {
    #[serde(default)]
    pub content: Option<String>,
}

impl StreamChunk {
    /// `choices[0].delta.content`, if any.
    pub fn content(self) -> Option<String> {
        self.choices.into_iter().next()?.delta?.content
    }
}

/// A completed persona → node round trip.
#[derive(Debug, Clone)]
pub struct ChatExchange {
    pub topic_prompt: String,
    pub generated_user_message: String,
    pub node_id: NodeId,
    pub assembled_response_text: String,
}

/// Receives response text as it streams in.
pub trait ResponseSink: Send {
    fn on_delta(&mut self, delta: &str);

    /// Called once the stream closes cleanly.
    fn on_complete(&mut self) {}
}

impl ResponseSink for String {
    fn on_delta(&mut self, delta: &str) {
        self.push_str(delta);
    }
}
