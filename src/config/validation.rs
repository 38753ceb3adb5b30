//! Configuration validation.
//!
//! Serde handles syntax; this checks semantics (URLs parse, counts are
//! positive, the chat template names the node). Every problem is reported,
//! not just the first.

use std::fmt;

use crate::config::schema::{AppConfig, NODE_ID_PLACEHOLDER};

/// A single semantic problem in the configuration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidationError {
    pub field: &'static str,
    pub message: String,
}

impl fmt::Display for ValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.field, self.message)
    }
}

/// Validate a configuration, returning all errors found.
pub fn validate_config(config: &AppConfig) -> Result<(), Vec<ValidationError>> {
    let mut errors = Vec::new();

    let urls = [
        ("endpoints.auth_url", &config.endpoints.auth_url),
        ("endpoints.node_list_url", &config.endpoints.node_list_url),
        ("endpoints.node_bind_url", &config.endpoints.node_bind_url),
        ("endpoints.persona_url", &config.endpoints.persona_url),
        ("endpoints.origin", &config.endpoints.origin),
        ("endpoints.referer", &config.endpoints.referer),
    ];
    for (field, value) in urls {
        if let Err(e) = url::Url::parse(value) {
            errors.push(ValidationError {
                field,
                message: format!("invalid URL '{}': {}", value, e),
            });
        }
    }

    // The template itself is not a valid host until substituted.
    let sample = config.endpoints.chat_url("node");
    if let Err(e) = url::Url::parse(&sample) {
        errors.push(ValidationError {
            field: "endpoints.chat_url_template",
            message: format!("invalid URL after substitution '{}': {}", sample, e),
        });
    }
    if !config.endpoints.chat_url_template.contains(NODE_ID_PLACEHOLDER) {
        tracing::warn!(
            template = %config.endpoints.chat_url_template,
            "Chat URL template has no {{node_id}} placeholder; all nodes share one URL"
        );
    }

    if config.retry.max_attempts == 0 {
        errors.push(ValidationError {
            field: "retry.max_attempts",
            message: "must be at least 1".to_string(),
        });
    }

    if config.prompts.topics.is_empty() {
        errors.push(ValidationError {
            field: "prompts.topics",
            message: "at least one topic is required".to_string(),
        });
    }

    if config.models.chat_model.trim().is_empty() {
        errors.push(ValidationError {
            field: "models.chat_model",
            message: "must not be empty".to_string(),
        });
    }

    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}
