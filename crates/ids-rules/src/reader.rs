//! Line Reassembler
//!
//! Joins physical lines ending in a `\` continuation marker into logical
//! rule strings. A continuation still pending at end of input is dropped.

use std::io::{self, BufRead};
use tracing::debug;

/// One complete rule string after continuation joining
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct LogicalLine {
    /// 1-based physical line the rule started on
    pub line: usize,

    /// Joined and trimmed rule text
    pub text: String,
}

/// Iterator over the logical lines of a buffered reader
pub struct LogicalLines<R> {
    reader: R,
    buf: Vec<u8>,
    pending: String,
    line: usize,
    start: Option<usize>,
}

impl<R: BufRead> LogicalLines<R> {
    /// Wrap a reader
    pub fn new(reader: R) -> Self {
        Self {
            reader,
            buf: Vec::new(),
            pending: String::new(),
            line: 0,
            start: None,
        }
    }

    fn flush(&mut self) -> Option<LogicalLine> {
        let text = self.pending.trim().to_string();
        self.pending.clear();
        let line = self.start.take().unwrap_or(self.line);

        if text.is_empty() {
            None
        } else {
            Some(LogicalLine { line, text })
        }
    }
}

impl<R: BufRead> Iterator for LogicalLines<R> {
    type Item = io::Result<LogicalLine>;

    fn next(&mut self) -> Option<Self::Item> {
        loop {
            self.buf.clear();
            match self.reader.read_until(b'\n', &mut self.buf) {
                Ok(0) => {
                    if let Some(start) = self.start.take() {
                        debug!(line = start, "dropping unterminated continuation at end of input");
                    }
                    self.pending.clear();
                    return None;
                }
                Ok(_) => {}
                Err(e) => return Some(Err(e)),
            }

            self.line += 1;
            self.start.get_or_insert(self.line);

            let physical = String::from_utf8_lossy(&self.buf).trim().to_string();

            self.pending.push(' ');
            match physical.strip_suffix('\\') {
                Some(head) => self.pending.push_str(head),
                None => {
                    self.pending.push_str(&physical);
                    if let Some(logical) = self.flush() {
                        return Some(Ok(logical));
                    }
                }
            }
        }
    }
}
