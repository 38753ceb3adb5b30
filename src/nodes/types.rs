//! Node identifiers, bindings and directory wire types.

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::wallet::CredentialError;

/// Opaque identifier of a remote serving endpoint.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct NodeId(pub String);

impl NodeId {
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for NodeId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for NodeId {
    fn from(id: &str) -> Self {
        Self(id.to_string())
    }
}

/// Status value of a reachable node.
pub const ONLINE: &str = "ONLINE";

/// Directory response body. Only `data.objects` is read; `code` may be absent.
#[derive(Debug, Default, Deserialize)]
pub struct NodeListResponse {
    #[serde(default)]
    pub data: Option<NodeListData>,
}

/// Directory response `data` section.
///
/// Entries stay raw so one malformed object cannot hide the others.
#[derive(Debug, Default, Deserialize)]
pub struct NodeListData {
    #[serde(default)]
    pub objects: Vec<serde_json::Value>,
}

/// One entry of the node directory.
#[derive(Debug, Clone, Deserialize)]
pub struct NodeEntry {
    #[serde(default)]
    pub node_id: Option<String>,
    #[serde(default)]
    pub status: Option<String>,
}

/// Directory fetch failure. Logged by the client, never returned.
#[derive(Debug, Error)]
pub enum DirectoryError {
    #[error("Failed to fetch node list. Status: {0}")]
    Http(u16),
    #[error("node list request failed: {0}")]
    Transport(String),
    #[error("malformed node list: {0}")]
    Malformed(String),
}

/// A `node_id|device_id` pair to bind to an account.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NodeBinding {
    pub node_id: String,
    pub device_id: String,
}

/// Message signed to prove ownership of a binding; field order matters.
#[derive(Debug, Serialize)]
pub struct BindMessage<'a> {
    pub node_id: &'a str,
    pub device_id: &'a str,
}

/// Body of the bind-node request.
#[derive(Debug, Serialize)]
pub struct BindRequest<'a> {
    pub node_id: &'a str,
    pub device_id: &'a str,
    pub signature: &'a str,
}

/// Errors from the bind-node endpoint.
#[derive(Debug, Error)]
pub enum BindError {
    #[error("HTTP {status} => {body}")]
    Http { status: u16, body: String },
    #[error("bind request failed: {0}")]
    Transport(String),
    #[error("malformed bind response: {0}")]
    Malformed(String),
    #[error(transparent)]
    Credential(#[from] CredentialError),
}

/// Errors collecting node information from a local installation.
#[derive(Debug, Error)]
pub enum InventoryError {
    #[error("missing {file} for node {index}")]
    Missing { index: u32, file: &'static str },
    #[error("invalid JSON in nodeid.json for node {index}: {source}")]
    InvalidJson {
        index: u32,
        #[source]
        source: serde_json::Error,
    },
    #[error("empty node id or device id for node {index}")]
    Empty { index: u32 },
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_bind_message_field_order() {
        let message = BindMessage {
            node_id: "0xnode",
            device_id: "device-1",
        };
        assert_eq!(
            serde_json::to_string(&message).unwrap(),
            r#"{"node_id":"0xnode","device_id":"device-1"}"#
        );
    }

    #[test]
    fn test_node_entry_tolerates_missing_fields() {
        let data: NodeListData =
            serde_json::from_str(r#"{"objects":[{"status":"ONLINE"},{"node_id":"a"}]}"#).unwrap();
        assert_eq!(data.objects.len(), 2);

        let first: NodeEntry = serde_json::from_value(data.objects[0].clone()).unwrap();
        let second: NodeEntry = serde_json::from_value(data.objects[1].clone()).unwrap();
        assert!(first.node_id.is_none());
        assert!(second.status.is_none());
    }

    #[test]
    fn test_node_list_response_without_code() {
        let body: NodeListResponse =
            serde_json::from_str(r#"{"data":{"objects":[{"node_id":"0xa","status":"ONLINE"}]}}"#)
                .unwrap();
        assert_eq!(body.data.unwrap().objects.len(), 1);
    }
}
