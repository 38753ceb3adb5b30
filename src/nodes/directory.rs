//! Online node discovery.
//!
//! Failures degrade to an empty list: "no nodes" means "no work", never a
//! crash.

use reqwest::header::AUTHORIZATION;
use serde_json::Value;

use crate::config::EndpointConfig;
use crate::http::headers::header_value;
use crate::http::{FetchSite, HttpContext};
use crate::nodes::types::{DirectoryError, NodeEntry, NodeId, NodeListResponse, ONLINE};

/// Client for the node-list endpoint.
#[derive(Debug, Clone)]
pub struct NodeDirectory {
    http: HttpContext,
    node_list_url: String,
}

impl NodeDirectory {
    pub fn new(http: HttpContext, endpoints: &EndpointConfig) -> Self {
        Self {
            http,
            node_list_url: endpoints.node_list_url.clone(),
        }
    }

    /// Node ids with status `ONLINE`, in server order.
    pub async fn list_online_nodes(&self, access_token: &str) -> Vec<NodeId> {
        match self.fetch(access_token).await {
            Ok(entries) => online_nodes(&entries),
            Err(e) => {
                tracing::error!(error = %e, "Error fetching node IDs");
                Vec::new()
            }
        }
    }

    async fn fetch(&self, access_token: &str) -> Result<Vec<NodeEntry>, DirectoryError> {
        let mut headers = self.http.headers.browser(FetchSite::SameSite);
        // Raw token, no scheme prefix.
        headers.insert(
            AUTHORIZATION,
            header_value("Authorization", access_token)
                .map_err(|e| DirectoryError::Transport(e.to_string()))?,
        );

        let response = self
            .http
            .client
            .get(&self.node_list_url)
            .headers(headers)
            .timeout(self.http.request_timeout)
            .send()
            .await
            .map_err(|e| DirectoryError::Transport(e.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            return Err(DirectoryError::Http(status.as_u16()));
        }

        let body: NodeListResponse = response
            .json()
            .await
            .map_err(|e| DirectoryError::Malformed(e.to_string()))?;

        Ok(node_entries(body.data.unwrap_or_default().objects))
    }
}

/// Decode entries one by one; entries of the wrong shape are logged and dropped.
pub fn node_entries(objects: Vec<Value>) -> Vec<NodeEntry> {
    objects
        .into_iter()
        .enumerate()
        .filter_map(|(index, object)| match serde_json::from_value(object) {
            Ok(entry) => Some(entry),
            Err(e) => {
                tracing::warn!(index, error = %e, "Skipping malformed node entry");
                None
            }
        })
        .collect()
}

/// Keep online entries that carry an id.
pub fn online_nodes(entries: &[NodeEntry]) -> Vec<NodeId> {
    entries
        .iter()
        .filter(|entry| entry.status.as_deref() == Some(ONLINE))
        .filter_map(|entry| entry.node_id.as_deref())
        .filter(|id| !id.is_empty())
        .map(NodeId::from)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn entry(id: Option<&str>, status: &str) -> NodeEntry {
        NodeEntry {
            node_id: id.map(str::to_string),
            status: Some(status.to_string()),
        }
    }

    #[test]
    fn test_online_nodes_filters_and_preserves_order() {
        let entries = vec![
            entry(Some("n3"), "ONLINE"),
            entry(Some("n1"), "OFFLINE"),
            entry(Some("n2"), "ONLINE"),
            entry(None, "ONLINE"),
            entry(Some(""), "ONLINE"),
            entry(Some("n4"), "online"),
        ];
        let ids = online_nodes(&entries);
        assert_eq!(ids, vec![NodeId::from("n3"), NodeId::from("n2")]);
    }

    #[test]
    fn test_malformed_entry_does_not_hide_others() {
        let objects = vec![
            serde_json::json!({ "node_id": "0xa", "status": "ONLINE" }),
            serde_json::json!({ "node_id": 12345, "status": "ONLINE" }),
            serde_json::json!("not an object"),
            serde_json::json!({ "node_id": "0xb", "status": "ONLINE" }),
        ];
        let entries = node_entries(objects);
        assert_eq!(entries.len(), 2);
        assert_eq!(
            online_nodes(&entries),
            vec![NodeId::from("0xa"), NodeId::from("0xb")]
        );
    }

    #[test]
    fn test_online_nodes_empty() {
        assert!(online_nodes(&[]).is_empty());
    }
}
