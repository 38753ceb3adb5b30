//! Bind a node list to every wallet.

use crate::auth::SessionManager;
use crate::config::AppConfig;
use crate::http::HttpContext;
use crate::nodes::{NodeBinder, NodeBinding};
use crate::scheduler::runner::RunError;
use crate::wallet::{mask_address, Credential};

/// Counts reported by a bind run.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct BindSummary {
    pub wallets: usize,
    pub skipped_wallets: usize,
    pub bound: usize,
    pub failed: usize,
}

/// Authenticates each wallet once, then binds every listed node to it.
pub struct BindRunner {
    sessions: SessionManager,
    binder: NodeBinder,
}

impl BindRunner {
    pub fn new(config: &AppConfig, http: HttpContext) -> Self {
        Self {
            sessions: SessionManager::new(http.clone(), &config.endpoints),
            binder: NodeBinder::new(http, &config.endpoints),
        }
    }

    pub async fn run(
        &self,
        private_keys: &[String],
        bindings: &[NodeBinding],
    ) -> Result<BindSummary, RunError> {
        if private_keys.is_empty() {
            return Err(RunError::NoCredentials);
        }

        let mut summary = BindSummary::default();
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

            let session = match self.sessions.authenticate(&credential).await {
                Ok(session) => session,
                Err(e) => {
                    tracing::error!(address = %masked, error = %e, "Failed to get token for address");
                    summary.skipped_wallets += 1;
                    continue;
                }
            };

            for binding in bindings {
                match self
                    .binder
                    .bind(session.access_token(), &credential, binding)
                    .await
                {
                    Ok(response) => {
                        summary.bound += 1;
                        tracing::info!(
                            address = %masked,
                            node_id = %binding.node_id,
                            response = %response,
                            "Node bound"
                        );
                    }
                    Err(e) => {
                        summary.failed += 1;
                        tracing::error!(
                            address = %masked,
                            node_id = %binding.node_id,
                            error = %e,
                            "Failed to bind node"
                        );
                    }
                }
            }
        }

        Ok(summary)
    }
}
