//! Collect node/device ids from a local installation into the node list file.

use std::io::{self, BufRead, Write};
use std::path::Path;
use std::process::ExitCode;

use gaia_autochat::config::{load_or_default, DEFAULT_CONFIG_PATH};
use gaia_autochat::nodes::binding::format_node_list;
use gaia_autochat::nodes::inventory::collect_node_info;
use gaia_autochat::observability::logging;

fn prompt_node_count() -> io::Result<Option<u32>> {
    print!("Enter the number of nodes: ");
    io::stdout().flush()?;

    let mut line = String::new();
    io::stdin().lock().read_line(&mut line)?;
    Ok(line.trim().parse().ok())
}

fn main() -> ExitCode {
    let config = match load_or_default(Path::new(DEFAULT_CONFIG_PATH)) {
        Ok(config) => config,
        Err(e) => {
            eprintln!("Failed to load configuration: {}", e);
            return ExitCode::FAILURE;
        }
    };
    logging::init(&config.observability);

    let count = match prompt_node_count() {
        Ok(Some(count)) => count,
        Ok(None) => {
            tracing::error!("Node count must be a non-negative integer");
            return ExitCode::FAILURE;
        }
        Err(e) => {
            tracing::error!(error = %e, "Failed to read node count");
            return ExitCode::FAILURE;
        }
    };

    let bindings = collect_node_info(Path::new(&config.files.node_root), count);
    if let Err(e) = std::fs::write(&config.files.node_list, format_node_list(&bindings)) {
        tracing::error!(path = %config.files.node_list, error = %e, "Failed to write node list");
        return ExitCode::FAILURE;
    }

    tracing::info!(
        count = bindings.len(),
        path = %config.files.node_list,
        "Node list written"
    );
    ExitCode::SUCCESS
}
