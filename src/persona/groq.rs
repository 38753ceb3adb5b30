//! Persona messages from an OpenAI-compatible completion endpoint (Groq).

use async_trait::async_trait;
use reqwest::header::AUTHORIZATION;
use serde::{Deserialize, Serialize};

use crate::chat::ChatMessage;
use crate::config::AppConfig;
use crate::http::headers::header_value;
use crate::http::HttpContext;
use crate::persona::{PersonaError, PersonaGenerator};

#[derive(Debug, Serialize)]
struct CompletionRequest<'a> {
    messages: Vec<ChatMessage>,
    model: &'a str,
    temperature: f32,
    max_tokens: u32,
    stream: bool,
}

#[derive(Debug, Deserialize)]
struct CompletionResponse {
    #[serde(default)]
    choices: Vec<CompletionChoice>,
}

#[derive(Debug, Deserialize)]
struct CompletionChoice {
    #[serde(default)]
    message: Option<ChoiceMessage>,
}

#[derive(Debug, Deserialize)]
struct ChoiceMessage {
    #[serde(default)]
    content: Option<String>,
}

/// Non-streaming persona generator.
#[derive(Clone)]
pub struct GroqPersona {
    http: HttpContext,
    url: String,
    api_key: String,
    model: String,
    temperature: f32,
    max_tokens: u32,
    system_prompt: String,
}

impl GroqPersona {
    pub fn new(http: HttpContext, config: &AppConfig) -> Self {
        Self {
            http,
            url: config.endpoints.persona_url.clone(),
            api_key: config.persona.api_key.clone(),
            model: config.models.persona_model.clone(),
            temperature: config.models.persona_temperature,
            max_tokens: config.models.persona_max_tokens,
            system_prompt: config.prompts.persona_system.clone(),
        }
    }

    /// Whether an API key is configured.
    pub fn has_api_key(&self) -> bool {
        !self.api_key.is_empty()
    }
}

impl std::fmt::Debug for GroqPersona {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("GroqPersona")
            .field("url", &self.url)
            .field("model", &self.model)
            .finish_non_exhaustive()
    }
}

#[async_trait]
impl PersonaGenerator for GroqPersona {
    async fn generate_user_message(&self, topic: &str) -> Result<String, PersonaError> {
        if !self.has_api_key() {
            return Err(PersonaError::MissingApiKey);
        }

        let request = CompletionRequest {
            messages: vec![
                ChatMessage::system(&self.system_prompt),
                ChatMessage::user(topic),
            ],
            model: &self.model,
            temperature: self.temperature,
            max_tokens: self.max_tokens,
            stream: false,
        };

        let authorization = header_value("Authorization", &format!("Bearer {}", self.api_key))
            .map_err(|e| PersonaError::Transport(e.to_string()))?;

        let response = self
            .http
            .client
            .post(&self.url)
            .header(AUTHORIZATION, authorization)
            .timeout(self.http.request_timeout)
            .json(&request)
            .send()
            .await
            .map_err(|e| PersonaError::Transport(e.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(PersonaError::Http {
                status: status.as_u16(),
                body,
            });
        }

        let completion: CompletionResponse = response
            .json()
            .await
            .map_err(|e| PersonaError::Malformed(e.to_string()))?;

        Ok(completion
            .choices
            .into_iter()
            .next()
            .and_then(|choice| choice.message)
            .and_then(|message| message.content)
            .unwrap_or_default())
    }
}
