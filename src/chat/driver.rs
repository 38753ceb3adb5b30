//! Streaming chat with retry, backoff and re-authentication.
//!
//! # Attempt state machine
//! ```text
//! SENDING ─┬─ 401 ────────► AUTH_EXPIRED ─ refresh key ─► SENDING (same slot)
//!          ├─ 429 / 504 ──► RATE_LIMITED ─ wait 2^i units ─► SENDING (next slot)
//!          ├─ other !2xx ─► HTTP_ERROR ─┐
//!          ├─ transport ────────────────┴─ last slot? Exhausted : cooldown ─► SENDING (next slot)
//!          └─ 2xx ────────► OK ─ reassemble event stream ─► full text
//! ```

use std::time::Duration;

use colored::Color;
use futures_util::StreamExt;
use reqwest::header::{HeaderMap, HeaderValue, ACCEPT, AUTHORIZATION, CONNECTION};
use reqwest::Response;
use serde_json::Value;

use crate::auth::{Session, SessionManager};
use crate::chat::stream::StreamAssembler;
use crate::chat::types::{ChatError, ChatRequest, ChatResult, ResponseSink};
use crate::config::{AppConfig, EndpointConfig, RetryConfig};
use crate::http::headers::header_value;
use crate::http::{FetchSite, HttpContext};
use crate::nodes::NodeId;
use crate::observability::metrics;
use crate::resilience::{millis, rate_limit_delay, RetryBudget};
use crate::terminal::countdown;
use crate::wallet::{mask_address, Credential};

/// Outcome of one network attempt that did not raise.
#[derive(Debug)]
enum AttemptOutcome {
    Completed(String),
    AuthExpired,
    RateLimited(u16),
}

/// Drives chat completions against a node.
#[derive(Debug, Clone)]
pub struct ChatDriver {
    http: HttpContext,
    sessions: SessionManager,
    endpoints: EndpointConfig,
    retry: RetryConfig,
    model: String,
    system_prompt: String,
    show_countdown: bool,
}

impl ChatDriver {
    pub fn new(http: HttpContext, sessions: SessionManager, config: &AppConfig) -> Self {
        Self {
            http,
            sessions,
            endpoints: config.endpoints.clone(),
            retry: config.retry.clone(),
            model: config.models.chat_model.clone(),
            system_prompt: config.prompts.guide_system.clone(),
            show_countdown: config.pacing.show_countdown,
        }
    }

    /// Send `message` to `node_id` and return the assembled reply.
    ///
    /// Deltas are pushed to `sink` as they arrive. A 401 refreshes the
    /// session's tokens in place and retries without using a slot.
    pub async fn chat(
        &self,
        message: &str,
        session: &mut Session,
        node_id: &NodeId,
        credential: &Credential,
        sink: &mut dyn ResponseSink,
    ) -> ChatResult<String> {
        let url = self.endpoints.chat_url(node_id.as_str());
        let request = ChatRequest::streaming(&self.model, &self.system_prompt, message);
        let mut budget = RetryBudget::new(
            self.retry.max_attempts,
            self.retry.max_consecutive_reauths,
        );
        let mut last_error = String::from("no attempt made");

        while budget.has_attempts() {
            let attempt = budget.attempt();

            match self.attempt(&url, &request, session.api_key(), sink).await {
                Ok(AttemptOutcome::Completed(text)) => {
                    metrics::record_chat_attempt("ok");
                    return Ok(text);
                }
                Ok(AttemptOutcome::AuthExpired) => {
                    metrics::record_chat_attempt("auth_expired");
                    if !budget.try_reauth() {
                        return Err(ChatError::ReauthFailed(format!(
                            "API key rejected {} times in a row after refresh",
                            self.retry.max_consecutive_reauths
                        )));
                    }

                    tracing::warn!(
                        address = %mask_address(session.address()),
                        node_id = %node_id,
                        "Refreshing access token..."
                    );
                    metrics::record_reauth();
                    self.sessions
                        .refresh(session, credential)
                        .await
                        .map_err(|e| ChatError::ReauthFailed(e.to_string()))?;
                }
                Ok(AttemptOutcome::RateLimited(status)) => {
                    metrics::record_chat_attempt("rate_limited");
                    last_error = format!("server busy (status {})", status);
                    budget.consume();
                    if !budget.has_attempts() {
                        break;
                    }

                    let delay = rate_limit_delay(attempt, self.backoff_unit());
                    tracing::warn!(
                        node_id = %node_id,
                        status,
                        delay_ms = millis(delay),
                        "Server busy, retrying in {:.1} seconds... (Attempt {}/{})",
                        delay.as_secs_f64(),
                        attempt + 1,
                        budget.max_attempts()
                    );
                    countdown(delay, "Retrying in", Color::BrightYellow, self.show_countdown).await;
                }
                Err(e) => {
                    metrics::record_chat_attempt("error");
                    if budget.is_last() {
                        return Err(ChatError::Exhausted {
                            attempts: budget.max_attempts(),
                            last: e.to_string(),
                        });
                    }

                    tracing::error!(
                        node_id = %node_id,
                        attempt = attempt + 1,
                        error = %e,
                        "Error in attempt {}",
                        attempt + 1
                    );
                    last_error = e.to_string();
                    budget.consume();
                    countdown(
                        Duration::from_millis(self.retry.error_cooldown_ms),
                        "Retrying in",
                        Color::BrightRed,
                        self.show_countdown,
                    )
                    .await;
                }
            }
        }

        Err(ChatError::Exhausted {
            attempts: budget.max_attempts(),
            last: last_error,
        })
    }

    fn backoff_unit(&self) -> Duration {
        Duration::from_millis(self.retry.backoff_unit_ms)
    }

    async fn attempt(
        &self,
        url: &str,
        request: &ChatRequest,
        api_key: &str,
        sink: &mut dyn ResponseSink,
    ) -> ChatResult<AttemptOutcome> {
        let response = self
            .http
            .client
            .post(url)
            .headers(self.chat_headers(api_key)?)
            .json(request)
            .send()
            .await
            .map_err(|e| ChatError::Transport(e.to_string()))?;

        let status = response.status();
        match status.as_u16() {
            401 => return Ok(AttemptOutcome::AuthExpired),
            code @ (429 | 504) => return Ok(AttemptOutcome::RateLimited(code)),
            code if !status.is_success() => {
                return Err(ChatError::Http {
                    status: code,
                    message: error_message(response).await,
                })
            }
            _ => {}
        }

        let mut assembler = StreamAssembler::new();
        let mut body = response.bytes_stream();
        while let Some(chunk) = body.next().await {
            let chunk = chunk.map_err(|e| ChatError::Transport(e.to_string()))?;
            for delta in assembler.feed(&chunk) {
                sink.on_delta(&delta);
            }
        }
        if let Some(delta) = assembler.flush() {
            sink.on_delta(&delta);
        }
        sink.on_complete();

        if assembler.malformed_lines() > 0 {
            tracing::debug!(
                malformed = assembler.malformed_lines(),
                "Stream finished with skipped lines"
            );
        }
        Ok(AttemptOutcome::Completed(assembler.into_text()))
    }

    fn chat_headers(&self, api_key: &str) -> ChatResult<HeaderMap> {
        let mut headers = self.http.headers.browser(FetchSite::CrossSite);
        headers.insert(
            AUTHORIZATION,
            header_value("Authorization", &format!("Bearer {}", api_key))
                .map_err(|e| ChatError::Transport(e.to_string()))?,
        );
        headers.insert(ACCEPT, HeaderValue::from_static("text/event-stream"));
        headers.insert(CONNECTION, HeaderValue::from_static("keep-alive"));
        Ok(headers)
    }
}

/// Human-readable message from an error response.
///
/// JSON `message` field, else the JSON itself, else the status reason.
async fn error_message(response: Response) -> String {
    let fallback = response
        .status()
        .canonical_reason()
        .unwrap_or("Unknown error from server")
        .to_string();

    match response.text().await {
        Ok(text) => match serde_json::from_str::<Value>(&text) {
            Ok(json) => json
                .get("message")
                .and_then(Value::as_str)
                .map(str::to_string)
                .unwrap_or_else(|| json.to_string()),
            Err(_) => fallback,
        },
        Err(_) => fallback,
    }
}
