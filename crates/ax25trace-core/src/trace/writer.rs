use std::fmt::{self, Write};

/// Line-oriented text sink for a single frame's rendering.
#[derive(Debug, Default)]
pub(crate) struct TraceWriter {
    buf: String,
}

impl TraceWriter {
    pub(crate) fn new() -> Self {
        Self::default()
    }

    pub(crate) fn push(&mut self, value: impl fmt::Display) {
        // Writing into a String cannot fail.
        let _ = write!(self.buf, "{value}");
    }

    pub(crate) fn push_str(&mut self, text: &str) {
        self.buf.push_str(text);
    }

    pub(crate) fn end_line(&mut self) {
        self.buf.push('\n');
    }

    pub(crate) fn at_line_start(&self) -> bool {
        self.buf.is_empty() || self.buf.ends_with('\n')
    }

    /// Close a partially written line, if any.
    pub(crate) fn break_line(&mut self) {
        if !self.at_line_start() {
            self.end_line();
        }
    }

    pub(crate) fn into_lines(self) -> Vec<String> {
        self.buf.split_terminator('\n').map(str::to_string).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::TraceWriter;

    #[test]
    fn blank_lines_survive() {
        let mut out = TraceWriter::new();
        out.push_str("a\n\nb");
        assert_eq!(out.into_lines(), vec!["a", "", "b"]);
    }

    #[test]
    fn break_line_only_closes_open_lines() {
        let mut out = TraceWriter::new();
        out.break_line();
        out.push(42);
        out.break_line();
        out.break_line();
        assert_eq!(out.into_lines(), vec!["42"]);
    }
}
