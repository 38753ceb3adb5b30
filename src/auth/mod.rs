//! Authentication subsystem.
//!
//! # Data Flow
//! ```text
//! Credential
//!     → session.rs (challenge, sign, POST connect-wallet)
//!     → Session {access_token, api_key}
//!     → nodes (access_token) / chat (api_key, refreshed on 401)
//! ```

pub mod session;
pub mod types;

pub use session::SessionManager;
pub use types::{AuthError, AuthResult, Session, SessionTokens};
