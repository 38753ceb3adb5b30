//! Private key list loading.

use std::path::Path;

/// Read one private key per line, trimmed, skipping blank lines.
///
/// A missing or unreadable file yields an empty list; the caller decides
/// whether that is fatal.
pub async fn load_private_keys(path: &Path) -> Vec<String> {
    match tokio::fs::read_to_string(path).await {
        Ok(content) => parse_private_keys(&content),
        Err(e) => {
            tracing::error!(path = %path.display(), error = %e, "Cannot read private key file");
            Vec::new()
        }
    }
}

/// Split file content into keys.
pub fn parse_private_keys(content: &str) -> Vec<String> {
    content
        .lines()
        .map(str::trim)
        .filter(|line| !line.is_empty())
        .map(str::to_string)
        .collect()
}
