//! The edit-surface capability boundary.
//!
//! The session controller never touches a concrete widget; it talks to
//! whatever hosts the editable region through [`EditSurface`]. The GUI backs
//! this with the string buffer behind its text widget; tests use a headless
//! double.

/// What the session needs from an editable region: append-one-block
/// rendering at load time, reading back the display texts in order, and
/// synchronous enforcement of the never-empty invariant.
pub trait EditSurface {
    /// Append one line block holding `display_text`.
    fn render_line(&mut self, display_text: &str);

    /// The display text of every line block, in document order.
    fn line_texts(&self) -> Vec<String>;

    /// Reinsert a single empty line block if the region is fully empty.
    fn ensure_non_empty(&mut self);

    /// Drop all line blocks.
    fn clear(&mut self);
}

/// An [`EditSurface`] backed by one contiguous string with `\n` between
/// blocks, the shape a multiline text widget edits in place.
///
/// The empty string already is a single empty line under this encoding, so
/// the never-empty invariant holds structurally.
#[derive(Debug, Default)]
pub struct TextSurface {
    text: String,
    rendered: usize,
}

impl TextSurface {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn text(&self) -> &str {
        &self.text
    }

    /// Mutable access to the backing string for the host widget.
    pub fn text_mut(&mut self) -> &mut String {
        &mut self.text
    }
}

impl EditSurface for TextSurface {
    fn render_line(&mut self, display_text: &str) {
        if self.rendered > 0 {
            self.text.push('\n');
        }
        self.text.push_str(display_text);
        self.rendered += 1;
    }

    fn line_texts(&self) -> Vec<String> {
        self.text.split('\n').map(str::to_owned).collect()
    }

    fn ensure_non_empty(&mut self) {
        // "" decodes to exactly one empty line; nothing to reinsert.
    }

    fn clear(&mut self) {
        self.text.clear();
        self.rendered = 0;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn render_line_appends_blocks_in_order() {
        let mut surface = TextSurface::new();
        for line in ["a", "", "c"] {
            surface.render_line(line);
        }
        assert_eq!(surface.text(), "a\n\nc");
        assert_eq!(surface.line_texts(), &["a", "", "c"]);
    }

    #[test]
    fn leading_empty_block_is_preserved() {
        let mut surface = TextSurface::new();
        surface.render_line("");
        surface.render_line("a");
        assert_eq!(surface.text(), "\na");
        assert_eq!(surface.line_texts(), &["", "a"]);
    }

    #[test]
    fn empty_surface_reads_as_one_empty_line() {
        let surface = TextSurface::new();
        assert_eq!(surface.line_texts(), &[""]);
    }

    #[test]
    fn clear_resets_block_accounting() {
        let mut surface = TextSurface::new();
        surface.render_line("a");
        surface.clear();
        surface.render_line("b");
        assert_eq!(surface.text(), "b");
    }
}
