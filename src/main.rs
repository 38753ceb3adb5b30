//! Gaia node chat automation
//!
//! Keeps a set of wallets' Gaia nodes busy with realistic chat traffic.
//!
//! # Architecture Overview
//!
//! ```text
//!   priv.txt ──► wallet ──► auth ──────────────┐
//!                  (sign)   (session tokens)   │
//!                                              ▼
//!                               ┌──────────── scheduler ────────────┐
//!                               │  for wallet: for node: for topic  │
//!                               └──┬───────────────┬────────────┬───┘
//!                                  ▼               ▼            ▼
//!                               nodes          persona        chat
//!                           (ONLINE list)   (user question)  (stream + retry)
//!                                                               │
//!                                                               ▼
//!                                                           terminal
//!
//!   Cross-cutting: config (TOML + env), observability (tracing + metrics),
//!                  resilience (retry budget, backoff), http (client, headers)
//! ```

use std::path::Path;
use std::process::ExitCode;
use std::sync::Arc;

use gaia_autochat::config::{load_or_default, DEFAULT_CONFIG_PATH};
use gaia_autochat::http::HttpContext;
use gaia_autochat::observability::logging;
use gaia_autochat::persona::GroqPersona;
use gaia_autochat::terminal::{display_banner, TerminalSink};
use gaia_autochat::wallet::load_private_keys;
use gaia_autochat::{RunError, Scheduler};

#[tokio::main]
async fn main() -> ExitCode {
    let config = match load_or_default(Path::new(DEFAULT_CONFIG_PATH)) {
        Ok(config) => config,
        Err(e) => {
            eprintln!("Failed to load configuration: {}", e);
            return ExitCode::FAILURE;
        }
    };

    logging::init(&config.observability);
    display_banner("Gaia Auto Chat");

    tracing::info!(
        version = env!("CARGO_PKG_VERSION"),
        chat_model = %config.models.chat_model,
        max_attempts = config.retry.max_attempts,
        "gaia-autochat starting"
    );

    let keys = load_private_keys(Path::new(&config.files.private_keys)).await;

    let http = match HttpContext::new(&config) {
        Ok(http) => http,
        Err(e) => {
            tracing::error!(error = %e, "Failed to initialise HTTP client");
            return ExitCode::FAILURE;
        }
    };

    let persona = GroqPersona::new(http.clone(), &config);
    if !persona.has_api_key() {
        tracing::warn!("No persona API key configured; interactions will fail until one is set");
    }

    let scheduler = Scheduler::new(&config, http, Arc::new(persona));
    let mut sink = TerminalSink::new();

    match scheduler.run(&keys, &mut sink).await {
        Ok(summary) => {
            tracing::info!(
                wallets = summary.wallets,
                skipped = summary.skipped_wallets,
                interactions = summary.interactions,
                failed = summary.failed_interactions,
                "Run complete"
            );
            ExitCode::SUCCESS
        }
        Err(RunError::NoCredentials) => {
            tracing::error!(
                path = %config.files.private_keys,
                "No private keys found in file"
            );
            ExitCode::FAILURE
        }
    }
}
