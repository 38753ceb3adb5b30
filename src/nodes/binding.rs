//! Binding node/device pairs to an authenticated account.

use std::path::Path;

use reqwest::header::AUTHORIZATION;
use serde_json::Value;

use crate::config::EndpointConfig;
use crate::http::headers::header_value;
use crate::http::HttpContext;
use crate::nodes::types::{BindError, BindMessage, BindRequest, NodeBinding};
use crate::wallet::Credential;

/// Client for the bind-node endpoint.
#[derive(Debug, Clone)]
pub struct NodeBinder {
    http: HttpContext,
    node_bind_url: String,
}

impl NodeBinder {
    pub fn new(http: HttpContext, endpoints: &EndpointConfig) -> Self {
        Self {
            http,
            node_bind_url: endpoints.node_bind_url.clone(),
        }
    }

    /// Sign `binding` with the wallet key and register it.
    ///
    /// Returns the endpoint's JSON response on success.
    pub async fn bind(
        &self,
        access_token: &str,
        credential: &Credential,
        binding: &NodeBinding,
    ) -> Result<Value, BindError> {
        let signature = sign_binding(credential, binding)?;
        let payload = BindRequest {
            node_id: &binding.node_id,
            device_id: &binding.device_id,
            signature: &signature,
        };

        let mut headers = self.http.headers.site();
        headers.insert(
            AUTHORIZATION,
            header_value("Authorization", access_token)
                .map_err(|e| BindError::Transport(e.to_string()))?,
        );

        let response = self
            .http
            .client
            .post(&self.node_bind_url)
            .headers(headers)
            .timeout(self.http.request_timeout)
            .json(&payload)
            .send()
            .await
            .map_err(|e| BindError::Transport(e.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(BindError::Http {
                status: status.as_u16(),
                body,
            });
        }

        response
            .json()
            .await
            .map_err(|e| BindError::Malformed(e.to_string()))
    }
}

/// Signature over `{"node_id", "device_id"}`.
pub fn sign_binding(credential: &Credential, binding: &NodeBinding) -> Result<String, BindError> {
    let message = BindMessage {
        node_id: &binding.node_id,
        device_id: &binding.device_id,
    };
    let serialized =
        serde_json::to_string(&message).map_err(|e| BindError::Malformed(e.to_string()))?;
    Ok(credential.sign(serialized.as_bytes())?.signature)
}

/// Read `node_id|device_id` lines; an unreadable file yields an empty list.
pub async fn load_node_list(path: &Path) -> Vec<NodeBinding> {
    match tokio::fs::read_to_string(path).await {
        Ok(content) => parse_node_list(&content),
        Err(e) => {
            tracing::error!(path = %path.display(), error = %e, "Cannot read node list");
            Vec::new()
        }
    }
}

/// Parse node list content, skipping lines without both fields.
pub fn parse_node_list(content: &str) -> Vec<NodeBinding> {
    content
        .lines()
        .map(str::trim)
        .filter(|line| !line.is_empty())
        .filter_map(|line| {
            let mut parts = line.split('|').map(str::trim);
            match (parts.next(), parts.next()) {
                (Some(node_id), Some(device_id)) if !node_id.is_empty() && !device_id.is_empty() => {
                    Some(NodeBinding {
                        node_id: node_id.to_string(),
                        device_id: device_id.to_string(),
                    })
                }
                _ => {
                    tracing::warn!(line = %line, "Skipping malformed node list line");
                    None
                }
            }
        })
        .collect()
}

/// Render bindings in the list file format.
pub fn format_node_list(bindings: &[NodeBinding]) -> String {
    bindings
        .iter()
        .map(|b| format!("{}|{}\n", b.node_id, b.device_id))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    const TEST_PRIVATE_KEY: &str =
        "ac0974bec39a17e36ba4a6b4d238ff944bacb478cbed5efcae784d7bf4f2ff80";

    #[test]
    fn test_parse_node_list() {
        let content = "0xaaa | dev-1\n\n0xbbb|dev-2\r\nbroken-line\n|dev-3\n0xccc|\n";
        let bindings = parse_node_list(content);
        assert_eq!(
            bindings,
            vec![
                NodeBinding {
                    node_id: "0xaaa".into(),
                    device_id: "dev-1".into()
                },
                NodeBinding {
                    node_id: "0xbbb".into(),
                    device_id: "dev-2".into()
                },
            ]
        );
    }

    #[test]
    fn test_format_then_parse() {
        let bindings = vec![NodeBinding {
            node_id: "0x1".into(),
            device_id: "device-abc".into(),
        }];
        assert_eq!(format_node_list(&bindings), "0x1|device-abc\n");
        assert_eq!(parse_node_list(&format_node_list(&bindings)), bindings);
    }

    #[test]
    fn test_sign_binding_is_deterministic() {
        let credential = Credential::from_private_key(TEST_PRIVATE_KEY).unwrap();
        let binding = NodeBinding {
            node_id: "0xnode".into(),
            device_id: "device-1".into(),
        };
        let a = sign_binding(&credential, &binding).unwrap();
        let b = sign_binding(&credential, &binding).unwrap();
        // RFC 6979 nonces make ECDSA deterministic.
        assert_eq!(a, b);
    }
}
