//! Outbound HTTP plumbing shared by every component.
//!
//! # Design Decisions
//! - One `reqwest::Client` for the whole run (connection reuse)
//! - Short total timeout on request/response calls; none on the chat
//!   stream, which lasts as long as the node keeps talking
//! - Headers validated once at startup

pub mod envelope;
pub mod headers;

use std::time::Duration;

use reqwest::Client;
use thiserror::Error;

use crate::config::AppConfig;

pub use envelope::ApiEnvelope;
pub use headers::{FetchSite, HeaderError, HeaderTemplate};

/// Failure while setting up the HTTP layer.
#[derive(Debug, Error)]
pub enum HttpSetupError {
    #[error("failed to build HTTP client: {0}")]
    Client(#[from] reqwest::Error),
    #[error(transparent)]
    Header(#[from] HeaderError),
}

/// Client, headers and timeouts handed to each component.
#[derive(Debug, Clone)]
pub struct HttpContext {
    pub client: Client,
    pub headers: HeaderTemplate,
    pub request_timeout: Duration,
}

impl HttpContext {
    pub fn new(config: &AppConfig) -> Result<Self, HttpSetupError> {
        let client = Client::builder()
            .connect_timeout(Duration::from_secs(config.http.connect_secs))
            .build()?;
        let headers = HeaderTemplate::new(&config.endpoints, &config.browser)?;

        Ok(Self {
            client,
            headers,
            request_timeout: Duration::from_secs(config.http.request_secs),
        })
    }
}
