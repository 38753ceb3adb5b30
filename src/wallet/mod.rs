//! Wallet credentials subsystem.
//!
//! # Data Flow
//! ```text
//! priv.txt
//!     → keys.rs (one key per line)
//!     → credential.rs (key parsing, address derivation, EIP-191 signing)
//!     → auth / nodes (signed challenge payloads)
//! ```
//!
//! # Security Constraints
//! - Never log private keys
//! - Addresses are masked in logs

pub mod credential;
pub mod keys;
pub mod types;

pub use credential::{mask_address, Credential};
pub use keys::load_private_keys;
pub use types::{CredentialError, CredentialResult, SignedMessage};
