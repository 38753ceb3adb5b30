//! Operator-facing terminal output: banner, streamed text, countdowns.
//!
//! Logs go through `tracing`; this module only handles what is drawn
//! directly on the terminal.

pub mod banner;
pub mod countdown;
pub mod sink;

pub use banner::display_banner;
pub use countdown::countdown;
pub use sink::TerminalSink;
