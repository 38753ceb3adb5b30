//! Resilience subsystem.
//!
//! # Data Flow
//! ```text
//! Chat attempt outcome:
//!     → 401: retries.rs (re-auth allowed? same slot)
//!     → 429/504: backoff.rs (2^attempt units), consume slot
//!     → other failure: fixed cooldown, consume slot
//! ```
//!
//! # Design Decisions
//! - Deterministic backoff, no jitter: one sequential client, no herd
//! - Consecutive re-authentications are capped

pub mod backoff;
pub mod retries;

pub use backoff::{millis, rate_limit_delay};
pub use retries::RetryBudget;
