//! Server-sent event reassembly.
//!
//! Bytes arrive in arbitrary chunks. Complete lines are split off on `\n`;
//! the trailing partial line waits for the next chunk, so a multi-byte
//! character or a JSON payload split across chunks is never parsed early.

use crate::chat::types::StreamChunk;

/// Prefix of an event data line.
pub const DATA_PREFIX: &str = "data: ";

/// Stream terminator.
pub const DONE_SENTINEL: &str = "[DONE]";

/// What a single line carried.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StreamEvent {
    /// `choices[0].delta.content`
    Content(String),
    /// `data: [DONE]`
    Done,
    /// Anything else: comments, blank keep-alives, usage-only chunks.
    Ignored,
}

/// Classify one complete line.
pub fn parse_line(line: &str) -> Result<StreamEvent, serde_json::Error> {
    let Some(payload) = line.strip_prefix(DATA_PREFIX) else {
        return Ok(StreamEvent::Ignored);
    };
    if payload == DONE_SENTINEL {
        return Ok(StreamEvent::Done);
    }

    let chunk: StreamChunk = serde_json::from_str(payload)?;
    Ok(match chunk.content() {
        Some(content) if !content.is_empty() => StreamEvent::Content(content),
        _ => StreamEvent::Ignored,
    })
}

/// Accumulates the full response from incremental chunks.
#[derive(Debug, Default)]
pub struct StreamAssembler {
    buffer: Vec<u8>,
    text: String,
    malformed_lines: usize,
}

impl StreamAssembler {
    pub fn new() -> Self {
        Self::default()
    }

    /// Feed raw bytes; returns the content deltas completed by this chunk.
    pub fn feed(&mut self, chunk: &[u8]) -> Vec<String> {
        self.buffer.extend_from_slice(chunk);

        let mut deltas = Vec::new();
        while let Some(pos) = self.buffer.iter().position(|&b| b == b'\n') {
            let line: Vec<u8> = self.buffer.drain(..=pos).collect();
            if let Some(delta) = self.process_line(&line[..pos]) {
                deltas.push(delta);
            }
        }
        deltas
    }

    /// Process whatever is left once the stream has closed.
    pub fn flush(&mut self) -> Option<String> {
        if self.buffer.is_empty() {
            return None;
        }
        let line = std::mem::take(&mut self.buffer);
        self.process_line(&line)
    }

    /// Text assembled so far.
    pub fn text(&self) -> &str {
        &self.text
    }

    /// Lines that looked like data but failed to parse.
    pub fn malformed_lines(&self) -> usize {
        self.malformed_lines
    }

    pub fn into_text(self) -> String {
        self.text
    }

    fn process_line(&mut self, raw: &[u8]) -> Option<String> {
        let decoded = String::from_utf8_lossy(raw);
        let line = decoded.strip_suffix('\r').unwrap_or(&*decoded);

        match parse_line(line) {
            Ok(StreamEvent::Content(content)) => {
                self.text.push_str(&content);
                Some(content)
            }
            Ok(StreamEvent::Done) | Ok(StreamEvent::Ignored) => None,
            Err(e) => {
                self.malformed_lines += 1;
                tracing::warn!(error = %e, line = %line, "Error parsing response");
                None
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn data(content: &str) -> String {
        format!(
            "data: {{\"choices\":[{{\"delta\":{{\"content\":\"{}\"}}}}]}}\n",
            content
        )
    }

    #[test]
    fn test_reassembles_hello() {
        let mut assembler = StreamAssembler::new();
        assert_eq!(assembler.feed(data("Hel").as_bytes()), vec!["Hel"]);
        assert_eq!(assembler.feed(data("lo").as_bytes()), vec!["lo"]);
        assert!(assembler.feed(b"data: [DONE]\n").is_empty());
        assert_eq!(assembler.flush(), None);
        assert_eq!(assembler.malformed_lines(), 0);
        assert_eq!(assembler.into_text(), "Hello");
    }

    #[test]
    fn test_partial_line_waits_for_rest() {
        let line = data("world");
        let (head, tail) = line.split_at(17);

        let mut assembler = StreamAssembler::new();
        assert!(assembler.feed(head.as_bytes()).is_empty());
        assert_eq!(assembler.malformed_lines(), 0);
        assert_eq!(assembler.feed(tail.as_bytes()), vec!["world"]);
        assert_eq!(assembler.text(), "world");
    }

    #[test]
    fn test_multibyte_char_split_across_chunks() {
        let line = data("café");
        let bytes = line.as_bytes();
        // Split inside the two-byte 'é'.
        let split = line.find('é').unwrap() + 1;

        let mut assembler = StreamAssembler::new();
        assembler.feed(&bytes[..split]);
        assembler.feed(&bytes[split..]);
        assert_eq!(assembler.text(), "café");
    }

    #[test]
    fn test_malformed_line_is_skipped() {
        let mut assembler = StreamAssembler::new();
        let mut input = data("a");
        input.push_str("data: {not json}\n");
        input.push_str(&data("b"));

        assert_eq!(assembler.feed(input.as_bytes()), vec!["a", "b"]);
        assert_eq!(assembler.malformed_lines(), 1);
        assert_eq!(assembler.text(), "ab");
    }

    #[test]
    fn test_crlf_and_non_data_lines() {
        let mut assembler = StreamAssembler::new();
        let input = format!(": keep-alive\r\n\r\nevent: message\r\n{}", data("x").replace('\n', "\r\n"));
        assert_eq!(assembler.feed(input.as_bytes()), vec!["x"]);
        assert_eq!(assembler.malformed_lines(), 0);
    }

    #[test]
    fn test_flush_processes_unterminated_line() {
        let mut assembler = StreamAssembler::new();
        let line = data("tail");
        assembler.feed(line.trim_end().as_bytes());
        assert_eq!(assembler.text(), "");
        assert_eq!(assembler.flush().as_deref(), Some("tail"));
        assert_eq!(assembler.text(), "tail");
    }

    #[test]
    fn test_parse_line() {
        assert_eq!(parse_line("data: [DONE]").unwrap(), StreamEvent::Done);
        assert_eq!(parse_line("id: 3").unwrap(), StreamEvent::Ignored);
        assert_eq!(
            parse_line(r#"data: {"choices":[{"delta":{"content":""}}]}"#).unwrap(),
            StreamEvent::Ignored
        );
        assert!(parse_line("data: [DON").is_err());
    }
}
