//! Incremental server-sent-events framing.
//!
//! The push channel arrives as a byte stream in SSE framing: `data:` lines
//! accumulate into one event, a blank line dispatches it. Chunk boundaries
//! fall anywhere, so the parser buffers partial lines across pushes.

/// Stateful frame parser. Feed it raw chunks, get back complete event
/// payloads (the joined `data:` contents) in arrival order.
#[derive(Debug, Default)]
pub struct EventParser {
    buffer: String,
    data_lines: Vec<String>,
}

impl EventParser {
    pub fn new() -> Self {
        Self::default()
    }

    /// Consume one transport chunk, returning any events it completed.
    pub fn push(&mut self, chunk: &str) -> Vec<String> {
        self.buffer.push_str(chunk);

        let mut events = Vec::new();
        while let Some(line_end) = self.buffer.find('\n') {
            let line = self.buffer[..line_end].trim_end_matches('\r').to_string();
            self.buffer.drain(..=line_end);

            if line.is_empty() {
                // Blank line terminates the current event.
                if !self.data_lines.is_empty() {
                    events.push(self.data_lines.join("\n"));
                    self.data_lines.clear();
                }
            } else if let Some(data) = line.strip_prefix("data:") {
                self.data_lines.push(data.strip_prefix(' ').unwrap_or(data).to_string());
            }
            // `event:`, `id:`, `retry:` and comment lines carry nothing the
            // widget uses; the payload is always in `data:`.
        }

        events
    }
}
