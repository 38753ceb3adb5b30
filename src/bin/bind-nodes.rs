//! Bind every node in the node list to every wallet in the key file.

use std::path::Path;
use std::process::ExitCode;

use gaia_autochat::config::{load_or_default, DEFAULT_CONFIG_PATH};
use gaia_autochat::http::HttpContext;
use gaia_autochat::nodes::load_node_list;
use gaia_autochat::observability::logging;
use gaia_autochat::scheduler::BindRunner;
use gaia_autochat::terminal::display_banner;
use gaia_autochat::wallet::load_private_keys;
use gaia_autochat::RunError;

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
    display_banner("Gaia Node Binder");

    let keys = load_private_keys(Path::new(&config.files.private_keys)).await;
    let bindings = load_node_list(Path::new(&config.files.node_list)).await;
    if bindings.is_empty() {
        tracing::warn!(path = %config.files.node_list, "No nodes to bind");
    }

    let http = match HttpContext::new(&config) {
        Ok(http) => http,
        Err(e) => {
            tracing::error!(error = %e, "Failed to initialise HTTP client");
            return ExitCode::FAILURE;
        }
    };

    match BindRunner::new(&config, http).run(&keys, &bindings).await {
        Ok(summary) => {
            tracing::info!(
                wallets = summary.wallets,
                skipped = summary.skipped_wallets,
                bound = summary.bound,
                failed = summary.failed,
                "Binding complete"
            );
            ExitCode::SUCCESS
        }
        Err(RunError::NoCredentials) => {
            tracing::error!(path = %config.files.private_keys, "No private keys found in file");
            ExitCode::FAILURE
        }
    }
}
