//! Wallet × node × topic interaction loop.

use std::sync::Arc;
use std::time::Duration;

use colored::Color;
use thiserror::Error;
use tracing::Instrument;
use uuid::Uuid;

use crate::auth::{Session, SessionManager};
use crate::chat::{ChatDriver, ChatError, ChatExchange, ResponseSink};
use crate::config::{AppConfig, PacingConfig};
use crate::http::HttpContext;
use crate::nodes::{NodeDirectory, NodeId};
use crate::observability::metrics;
use crate::persona::{PersonaError, PersonaGenerator};
use crate::terminal::countdown;
use crate::wallet::{mask_address, Credential};

/// Fatal run errors.
#[derive(Debug, Error)]
pub enum RunError {
    #[error("No private keys found")]
    NoCredentials,
}

/// Why a single interaction failed.
#[derive(Debug, Error)]
pub enum InteractionError {
    #[error(transparent)]
    Persona(#[from] PersonaError),
    #[error(transparent)]
    Chat(#[from] ChatError),
}

/// Counts reported at the end of a run.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct RunSummary {
    pub wallets: usize,
    pub skipped_wallets: usize,
    pub interactions: usize,
    pub failed_interactions: usize,
}

/// Sequences authentication, discovery and chat for every wallet.
pub struct Scheduler {
    sessions: SessionManager,
    directory: NodeDirectory,
    driver: ChatDriver,
    persona: Arc<dyn PersonaGenerator>,
    topics: Vec<String>,
    pacing: PacingConfig,
}

impl Scheduler {
    pub fn new(config: &AppConfig, http: HttpContext, persona: Arc<dyn PersonaGenerator>) -> Self {
        let sessions = SessionManager::new(http.clone(), &config.endpoints);
        let directory = NodeDirectory::new(http.clone(), &config.endpoints);
        let driver = ChatDriver::new(http, sessions.clone(), config);

        Self {
            sessions,
            directory,
            driver,
            persona,
            topics: config.prompts.topics.clone(),
            pacing: config.pacing.clone(),
        }
    }

    /// Process every key in order.
    ///
    /// Fails only when there is nothing to process; everything else is
    /// logged and counted.
    pub async fn run(
        &self,
        private_keys: &[String],
        sink: &mut dyn ResponseSink,
    ) -> Result<RunSummary, RunError> {
        if private_keys.is_empty() {
            return Err(RunError::NoCredentials);
        }

        let mut summary = RunSummary::default();
        for (index, key) in private_keys.iter().enumerate() {
            summary.wallets += 1;

            let credential = match Credential::from_private_key(key) {
                Ok(credential) => credential,
                Err(e) => {
                    tracing::error!(line = index + 1, error = %e, "Skipping unreadable private key");
                    summary.skipped_wallets += 1;
                    continue;
                }
            };

            let masked = mask_address(credential.address());
            tracing::info!(address = %masked, "========== Starting with Wallet Address: {} ==========", masked);
            if !self.run_wallet(&credential, sink, &mut summary).await {
                summary.skipped_wallets += 1;
            }
            tracing::info!(address = %masked, "========== Finished for Wallet Address: {} ==========", masked);
        }

        tracing::info!(
            wallets = summary.wallets,
            skipped = summary.skipped_wallets,
            interactions = summary.interactions,
            failed = summary.failed_interactions,
            "All wallets have been processed"
        );
        Ok(summary)
    }

    /// Returns false when the wallet was skipped.
    async fn run_wallet(
        &self,
        credential: &Credential,
        sink: &mut dyn ResponseSink,
        summary: &mut RunSummary,
    ) -> bool {
        let masked = mask_address(credential.address());

        let mut session = match self.sessions.authenticate(credential).await {
            Ok(session) => session,
            Err(e) => {
                tracing::error!(address = %masked, error = %e, "Failed to get token for address");
                return false;
            }
        };
        tracing::info!(address = %masked, "Token loaded for address");

        let nodes = self.directory.list_online_nodes(session.access_token()).await;
        if nodes.is_empty() {
            tracing::warn!(address = %masked, "No ONLINE node found. Skipping address");
            return false;
        }
        tracing::info!(address = %masked, count = nodes.len(), "Found ONLINE node(s)");

        for (index, node_id) in nodes.iter().enumerate() {
            let topic = &self.topics[index % self.topics.len()];
            let span = tracing::info_span!(
                "interaction",
                id = %Uuid::new_v4(),
                number = index + 1,
                node_id = %node_id
            );

            let result = self
                .interact(topic, &mut session, node_id, credential, sink)
                .instrument(span)
                .await;

            summary.interactions += 1;
            match result {
                Ok(exchange) => {
                    metrics::record_interaction("ok");
                    tracing::debug!(
                        node_id = %exchange.node_id,
                        chars = exchange.assembled_response_text.len(),
                        "Interaction complete"
                    );
                }
                Err(e) => {
                    metrics::record_interaction("failed");
                    summary.failed_interactions += 1;
                    tracing::error!(node_id = %node_id, error = %e, "Error in interaction");
                    tracing::warn!("Skipping to next interaction...");
                }
            }

            tracing::info!("Waiting for next interaction...");
            countdown(
                Duration::from_millis(self.pacing.interaction_delay_ms),
                "Next interaction in",
                Color::BrightYellow,
                self.pacing.show_countdown,
            )
            .await;
        }

        true
    }

    async fn interact(
        &self,
        topic: &str,
        session: &mut Session,
        node_id: &NodeId,
        credential: &Credential,
        sink: &mut dyn ResponseSink,
    ) -> Result<ChatExchange, InteractionError> {
        tracing::info!("━━━━━━━━━━ Interaction ━━━━━━━━━━");

        let user_message = self.persona.generate_user_message(topic).await?;
        tracing::info!("Persona (as User): {}", user_message);
        tracing::info!("Assistant (node: {}):", node_id);

        let response = self
            .driver
            .chat(&user_message, session, node_id, credential, sink)
            .await?;

        Ok(ChatExchange {
            topic_prompt: topic.to_string(),
            generated_user_message: user_message,
            node_id: node_id.clone(),
            assembled_response_text: response,
        })
    }
}
