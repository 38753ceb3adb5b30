//! Node information from a local multi-node installation.
//!
//! Layout: `<root>/node-<i>/nodeid.json` (`{"address": "0x..."}`) and
//! `<root>/node-<i>/deviceid.txt`, for `i` in `1..=count`.

use std::fs;
use std::path::Path;

use serde::Deserialize;

use crate::nodes::types::{InventoryError, NodeBinding};

const NODE_ID_FILE: &str = "nodeid.json";
const DEVICE_ID_FILE: &str = "deviceid.txt";

#[derive(Debug, Deserialize)]
struct NodeIdFile {
    #[serde(default)]
    address: String,
}

/// Read the binding of node `index` under `root`.
pub fn read_node(root: &Path, index: u32) -> Result<NodeBinding, InventoryError> {
    let node_dir = root.join(format!("node-{}", index));
    let node_file = node_dir.join(NODE_ID_FILE);
    let device_file = node_dir.join(DEVICE_ID_FILE);

    if !node_file.is_file() {
        return Err(InventoryError::Missing {
            index,
            file: NODE_ID_FILE,
        });
    }
    if !device_file.is_file() {
        return Err(InventoryError::Missing {
            index,
            file: DEVICE_ID_FILE,
        });
    }

    let node: NodeIdFile = serde_json::from_str(&fs::read_to_string(&node_file)?)
        .map_err(|source| InventoryError::InvalidJson { index, source })?;
    let device_id = fs::read_to_string(&device_file)?.trim().to_string();
    let node_id = node.address.trim().to_string();

    if node_id.is_empty() || device_id.is_empty() {
        return Err(InventoryError::Empty { index });
    }

    Ok(NodeBinding { node_id, device_id })
}

/// Collect every readable node in `1..=count`; unreadable nodes are logged.
pub fn collect_node_info(root: &Path, count: u32) -> Vec<NodeBinding> {
    let mut bindings = Vec::new();
    for index in 1..=count {
        match read_node(root, index) {
            Ok(binding) => {
                tracing::info!(
                    index,
                    node_id = %binding.node_id,
                    device_id = %binding.device_id,
                    "Collected node"
                );
                bindings.push(binding);
            }
            Err(e) => tracing::warn!(index, error = %e, "Skipping node"),
        }
    }
    bindings
}
