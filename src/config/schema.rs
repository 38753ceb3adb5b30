//! Configuration schema definitions.
//!
//! This module defines the complete configuration structure for the chat bot.
//! All types derive Serde traits for deserialization from config files.

use serde::{Deserialize, Serialize};

/// Placeholder substituted with the node identifier in the chat URL template.
pub const NODE_ID_PLACEHOLDER: &str = "{node_id}";

/// Root configuration.
#[derive(Debug, Clone, Deserialize, Serialize, Default)]
#[serde(default)]
pub struct AppConfig {
    /// Remote endpoints (auth, node directory, bind, chat, persona).
    pub endpoints: EndpointConfig,

    /// Browser-identity headers sent with every request.
    pub browser: BrowserConfig,

    /// Model selection for the chat node and the persona provider.
    pub models: ModelConfig,

    /// System prompts and conversation topics.
    pub prompts: PromptConfig,

    /// Chat retry policy.
    pub retry: RetryConfig,

    /// Pacing between interactions.
    pub pacing: PacingConfig,

    /// Input file locations.
    pub files: FilesConfig,

    /// Persona provider credentials.
    pub persona: PersonaConfig,

    /// HTTP client timeouts.
    pub http: HttpConfig,

    /// Observability settings.
    pub observability: ObservabilityConfig,
}

/// Remote endpoint configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct EndpointConfig {
    /// Wallet connect (challenge-response auth) endpoint.
    pub auth_url: String,

    /// Node list endpoint.
    pub node_list_url: String,

    /// Node bind endpoint.
    pub node_bind_url: String,

    /// Per-node chat completion URL; `{node_id}` is replaced per request.
    pub chat_url_template: String,

    /// OpenAI-compatible completion endpoint for persona messages.
    pub persona_url: String,

    /// Origin header value.
    pub origin: String,

    /// Referer header value.
    pub referer: String,
}

impl Default for EndpointConfig {
    fn default() -> Self {
        Self {
            auth_url: "https://api.gaianet.ai/api/v1/users/connect-wallet/".to_string(),
            node_list_url: "https://api.gaianet.ai/api/v1/users/nodes/".to_string(),
            node_bind_url: "https://api.gaianet.ai/api/v1/users/bind-node/".to_string(),
            chat_url_template: "https://{node_id}.gaia.domains/v1/chat/completions".to_string(),
            persona_url: "https://api.groq.com/openai/v1/chat/completions".to_string(),
            origin: "https://www.gaianet.ai".to_string(),
            referer: "https://www.gaianet.ai/".to_string(),
        }
    }
}

impl EndpointConfig {
    /// Chat URL for a specific node.
    pub fn chat_url(&self, node_id: &str) -> String {
        self.chat_url_template.replace(NODE_ID_PLACEHOLDER, node_id)
    }
}

/// Desktop browser identity.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct BrowserConfig {
    pub user_agent: String,
    pub chrome_version: String,
    pub brand_version: String,
    pub platform: String,
}

impl Default for BrowserConfig {
    fn default() -> Self {
        Self {
            user_agent: "Mozilla/5.0 (Windows NT 10.0; Win64; x64) AppleWebKit/537.36 \
                         (KHTML, like Gecko) Chrome/131.0.0.0 Safari/537.36"
                .to_string(),
            chrome_version: "131".to_string(),
            brand_version: "24".to_string(),
            platform: "Windows".to_string(),
        }
    }
}

/// Model configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct ModelConfig {
    /// Model served by the chat nodes.
    pub chat_model: String,

    /// Model used to play the user persona.
    pub persona_model: String,

    /// Sampling temperature for the persona model.
    pub persona_temperature: f32,

    /// Token cap for persona messages.
    pub persona_max_tokens: u32,
}

impl Default for ModelConfig {
    fn default() -> Self {
        Self {
            chat_model: "Phi-3-mini-4k-instruct".to_string(),
            persona_model: "mixtral-8x7b-32768".to_string(),
            persona_temperature: 0.9,
            persona_max_tokens: 1024,
        }
    }
}

/// System prompts and the rotating topic list.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct PromptConfig {
    /// System prompt for the persona (user role) model.
    pub persona_system: String,

    /// System prompt for the chat node (assistant role).
    pub guide_system: String,

    /// Topics cycled through, one per interaction.
    pub topics: Vec<String>,
}

impl Default for PromptConfig {
    fn default() -> Self {
        Self {
            persona_system: "You are a tourist using a tour guide in Paris, France.".to_string(),
            guide_system: "You are a tour guide in Paris, France. Please answer the question \
                           from a Paris visitor accurately."
                .to_string(),
            topics: vec![
                "Ask about tourist attractions in paris, france".to_string(),
                "Ask about the best restaurants in Paris".to_string(),
                "Ask about museums in Paris".to_string(),
                "Ask about shopping areas in Paris".to_string(),
                "Ask about historical sites in Paris".to_string(),
            ],
        }
    }
}

/// Retry configuration for the chat driver.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct RetryConfig {
    /// Attempt slots shared by rate-limit and generic failures.
    pub max_attempts: u32,

    /// Length of one backoff unit in milliseconds; delay is `2^attempt` units.
    pub backoff_unit_ms: u64,

    /// Cooldown after a generic failure in milliseconds.
    pub error_cooldown_ms: u64,

    /// Re-authentications allowed in a row before giving up.
    pub max_consecutive_reauths: u32,
}

impl Default for RetryConfig {
    fn default() -> Self {
        Self {
            max_attempts: 5,
            backoff_unit_ms: 1000,
            error_cooldown_ms: 5000,
            max_consecutive_reauths: 2,
        }
    }
}

/// Pacing between interactions.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct PacingConfig {
    /// Wait after each interaction in milliseconds.
    pub interaction_delay_ms: u64,

    /// Render a live countdown while waiting.
    pub show_countdown: bool,
}

impl Default for PacingConfig {
    fn default() -> Self {
        Self {
            interaction_delay_ms: 10_000,
            show_countdown: true,
        }
    }
}

/// Input file locations, relative to the working directory.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct FilesConfig {
    pub private_keys: String,
    pub node_list: String,
    /// Root of a local multi-node installation (`node-<i>/` directories).
    pub node_root: String,
}

impl Default for FilesConfig {
    fn default() -> Self {
        Self {
            private_keys: "priv.txt".to_string(),
            node_list: "nodesList.txt".to_string(),
            node_root: "/root/gaianet".to_string(),
        }
    }
}

/// Persona provider credentials.
#[derive(Debug, Clone, Deserialize, Serialize, Default)]
#[serde(default)]
pub struct PersonaConfig {
    /// API key; falls back to `GROQ_API_KEY` when empty.
    pub api_key: String,
}

/// HTTP client timeouts.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct HttpConfig {
    /// Connection establishment timeout in seconds.
    pub connect_secs: u64,

    /// Total timeout for non-streaming requests in seconds.
    pub request_secs: u64,
}

impl Default for HttpConfig {
    fn default() -> Self {
        Self {
            connect_secs: 10,
            request_secs: 30,
        }
    }
}

/// Observability configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct ObservabilityConfig {
    /// Log level (trace, debug, info, warn, error).
    pub log_level: String,
}

impl Default for ObservabilityConfig {
    fn default() -> Self {
        Self {
            log_level: "info".to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_chat_url_substitutes_node_id() {
        let endpoints = EndpointConfig::default();
        assert_eq!(
            endpoints.chat_url("0xabc"),
            "https://0xabc.gaia.domains/v1/chat/completions"
        );
    }

    #[test]
    fn test_partial_toml_keeps_defaults() {
        let config: AppConfig = toml::from_str(
            r#"
            [retry]
            max_attempts = 3
            "#,
        )
        .unwrap();
        assert_eq!(config.retry.max_attempts, 3);
        assert_eq!(config.retry.backoff_unit_ms, 1000);
        assert_eq!(config.prompts.topics.len(), 5);
        assert_eq!(config.files.private_keys, "priv.txt");
        assert_eq!(config.files.node_root, "/root/gaianet");
    }
}
