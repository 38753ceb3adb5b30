//! Observability subsystem.
//!
//! # Data Flow
//! ```text
//! All subsystems produce:
//!     → logging.rs (structured log events, masked addresses)
//!     → metrics.rs (counters)
//!
//! Each interaction runs in a span carrying a UUID v4 interaction id.
//! ```

pub mod logging;
pub mod metrics;
