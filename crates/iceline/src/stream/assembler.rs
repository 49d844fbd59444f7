/// Accumulates text chunks and yields complete lines.
///
/// A line ends at a lone `\n` or a `\r\n` pair; the terminator is not
/// part of the yielded line. Whatever trails the last terminator stays
/// buffered until more data arrives, so chunk boundaries never split or
/// duplicate a line. The buffer is unbounded: a source that never sends
/// a terminator grows it without limit.
#[derive(Debug, Default)]
pub struct LineAssembler {
    buffer: String,
}

impl LineAssembler {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a chunk and return the complete lines it unlocked, in order.
    pub fn feed(&mut self, chunk: &str) -> Vec<String> {
        self.buffer.push_str(chunk);
        if !self.buffer.contains('\n') {
            return Vec::new();
        }

        let data = std::mem::take(&mut self.buffer);
        let mut segments: Vec<&str> = data.split('\n').collect();

        // The segment after the last '\n' is empty when the buffer ended
        // with a terminator, and the partial next line otherwise.
        let partial = segments.pop().unwrap_or("");
        self.buffer = partial.to_string();

        segments
            .into_iter()
            .map(|line| line.strip_suffix('\r').unwrap_or(line).to_string())
            .collect()
    }

    /// Take the buffered partial line, if any, leaving the buffer empty.
    pub fn take_partial(&mut self) -> Option<String> {
        if self.buffer.is_empty() {
            None
        } else {
            Some(std::mem::take(&mut self.buffer))
        }
    }

    /// Bytes currently buffered for the next incomplete line.
    pub fn pending_len(&self) -> usize {
        self.buffer.len()
    }
}
