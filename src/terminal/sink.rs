//! Streamed assistant output on stdout.

use std::io::Write;

use colored::Colorize;

use crate::chat::ResponseSink;

/// Prints each delta as it arrives, in bright cyan.
#[derive(Debug, Default)]
pub struct TerminalSink;

impl TerminalSink {
    pub fn new() -> Self {
        Self
    }
}

impl ResponseSink for TerminalSink {
    fn on_delta(&mut self, delta: &str) {
        let mut stdout = std::io::stdout().lock();
        let _ = write!(stdout, "{}", delta.bright_cyan());
        let _ = stdout.flush();
    }

    fn on_complete(&mut self) {
        println!();
    }
}
