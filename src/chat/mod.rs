//! Streaming chat subsystem.
//!
//! # Data Flow
//! ```text
//! user message + Session.api_key
//!     → driver.rs (POST to node, status handling, retry policy)
//!     → stream.rs (data: lines → content deltas)
//!     → ResponseSink (incremental display) + assembled text
//! ```

pub mod driver;
pub mod stream;
pub mod types;

pub use driver::ChatDriver;
pub use stream::{StreamAssembler, StreamEvent};
pub use types::{ChatError, ChatExchange, ChatMessage, ChatRequest, ChatResult, ResponseSink};
