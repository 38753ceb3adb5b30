//! Node subsystem.
//!
//! # Data Flow
//! ```text
//! access_token
//!     → directory.rs (GET node list, keep ONLINE, server order)
//!     → Vec<NodeId> snapshot for the scheduler
//!
//! node-<i>/nodeid.json + deviceid.txt
//!     → inventory.rs → nodesList.txt
//!     → binding.rs (sign node_id|device_id, POST bind-node)
//! ```

pub mod binding;
pub mod directory;
pub mod inventory;
pub mod types;

pub use binding::{load_node_list, NodeBinder};
pub use directory::NodeDirectory;
pub use types::{BindError, DirectoryError, InventoryError, NodeBinding, NodeId};
