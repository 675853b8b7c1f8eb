//! The in-memory document: an ordered sequence of lines.
//!
//! A document is reconstructed fresh from text on every load and never holds
//! an embedded newline inside a line. It is never truly empty: the empty
//! file is represented as exactly one empty line so the editable surface
//! cannot collapse.

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Document {
    lines: Vec<String>,
}

impl Document {
    /// Split raw text into lines on `\n`, stripping a single trailing `\r`
    /// per line so CRLF input is handled. Empty leading/trailing lines are
    /// preserved as empty line entities.
    #[must_use]
    pub fn from_text(text: &str) -> Self {
        let lines = text
            .split('\n')
            .map(|raw| raw.strip_suffix('\r').unwrap_or(raw).to_owned())
            .collect();
        Self { lines }
    }

    /// Build a document from already-split lines, restoring the non-empty
    /// invariant if the input is empty.
    #[must_use]
    pub fn from_lines(lines: Vec<String>) -> Self {
        let mut doc = Self { lines };
        doc.ensure_non_empty();
        doc
    }

    /// Join the lines with `\n`. No separator is appended after the last
    /// line, so a single empty line round-trips to the empty string.
    #[must_use]
    pub fn to_text(&self) -> String {
        self.lines.join("\n")
    }

    #[must_use]
    pub fn line_count(&self) -> usize {
        self.lines.len()
    }

    #[must_use]
    pub fn line(&self, index: usize) -> Option<&str> {
        self.lines.get(index).map(String::as_str)
    }

    #[must_use]
    pub fn lines(&self) -> &[String] {
        &self.lines
    }

    /// Whether the document carries no content at all.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.lines.iter().all(String::is_empty) && self.lines.len() <= 1
    }

    /// Reinsert the single empty line if every line has been removed.
    pub fn ensure_non_empty(&mut self) {
        if self.lines.is_empty() {
            self.lines.push(String::new());
        }
    }
}

impl Default for Document {
    fn default() -> Self {
        Self {
            lines: vec![String::new()],
        }
    }
}
