// src/parse/cursor.rs
//! Line iterator with one-line pushback.
//!
//! Multi-line violation formats need to peek past the current violation to
//! decide whether the next physical line belongs to it. When it does not,
//! the line is pushed back so the outer scan reprocesses it.

use std::io::BufRead;

pub struct LineCursor<'a> {
    reader: &'a mut dyn BufRead,
    pushed: Option<String>,
    done: bool,
}

impl<'a> LineCursor<'a> {
    pub fn new(reader: &'a mut dyn BufRead) -> Self {
        Self {
            reader,
            pushed: None,
            done: false,
        }
    }

    /// Returns the next line without its terminator, the pushed-back line
    /// first if one exists, or `None` at end of stream. A trailing partial
    /// line (no final newline) is returned as a normal line.
    ///
    /// # Errors
    /// Propagates I/O errors from the underlying reader.
    pub fn next_line(&mut self) -> std::io::Result<Option<String>> {
        if let Some(line) = self.pushed.take() {
            return Ok(Some(line));
        }

        if self.done {
            return Ok(None);
        }

        let mut buf = String::new();
        let read = self.reader.read_line(&mut buf)?;

        if read == 0 {
            self.done = true;
            return Ok(None);
        }

        while buf.ends_with('\n') || buf.ends_with('\r') {
            buf.pop();
        }

        Ok(Some(buf))
    }

    /// Returns a line to the cursor; the next `next_line` call yields it.
    /// Only one line of pushback is supported, which is all the formats need.
    pub fn push_back(&mut self, line: String) {
        debug_assert!(self.pushed.is_none(), "single-line pushback exceeded");
        self.pushed = Some(line);
    }
}
