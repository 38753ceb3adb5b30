//! Run orchestration.
//!
//! # Data Flow
//! ```text
//! private keys ─► Credential ─► SessionManager::authenticate
//!                                   │
//!                                   ▼
//!                 NodeDirectory::list_online_nodes ─► for node i:
//!                     topic[i % n] ─► PersonaGenerator ─► ChatDriver ─► pause
//! ```
//!
//! # Design Decisions
//! - Strictly sequential: one wallet, one node, one request at a time
//! - Only "no keys at all" aborts a run; every other failure is logged,
//!   counted in the summary and skipped

pub mod bind;
pub mod runner;

pub use bind::{BindRunner, BindSummary};
pub use runner::{InteractionError, RunError, RunSummary, Scheduler};
