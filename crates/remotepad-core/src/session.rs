//! The editing session: one file, one load, explicit saves.
//!
//! `Session` owns the unsaved-changes flag and the load lifecycle so they
//! are plain state rather than ambient globals; the host wires it to a
//! concrete [`EditSurface`] and a transport. The session populates the
//! surface once from the loaded text, marks itself dirty on edits, and
//! produces the newline-joined save body on demand.

use crate::document::Document;
use crate::markup;
use crate::remote::{FileId, LoadError};
use crate::surface::EditSurface;

/// Where the one-shot initial load stands.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum LoadState {
    Pending,
    Loaded,
    Failed(LoadError),
}

#[derive(Clone, Debug)]
pub struct Session {
    file_id: FileId,
    load_state: LoadState,
    dirty: bool,
}

impl Session {
    #[must_use]
    pub fn new(file_id: FileId) -> Self {
        Self {
            file_id,
            load_state: LoadState::Pending,
            dirty: false,
        }
    }

    #[must_use]
    pub fn file_id(&self) -> &FileId {
        &self.file_id
    }

    #[must_use]
    pub fn load_state(&self) -> &LoadState {
        &self.load_state
    }

    #[must_use]
    pub fn is_loaded(&self) -> bool {
        self.load_state == LoadState::Loaded
    }

    #[must_use]
    pub fn load_error(&self) -> Option<&LoadError> {
        match &self.load_state {
            LoadState::Failed(err) => Some(err),
            LoadState::Pending | LoadState::Loaded => None,
        }
    }

    /// Populate the surface from the fetched raw text, one display-form
    /// block per line. Runs at most once: responses arriving after the
    /// session already settled (late retries, stale in-flight loads) are
    /// dropped. Leaves the dirty flag untouched.
    pub fn apply_load(&mut self, surface: &mut impl EditSurface, raw: &str) {
        if self.load_state != LoadState::Pending {
            return;
        }

        surface.clear();
        let doc = Document::from_text(raw);
        for line in doc.lines() {
            surface.render_line(&markup::display_line(line));
        }
        self.load_state = LoadState::Loaded;
    }

    /// Record a load failure. The surface stays unpopulated so a blank
    /// editor is never presented as real file content.
    pub fn fail_load(&mut self, err: LoadError) {
        if self.load_state != LoadState::Pending {
            return;
        }
        self.load_state = LoadState::Failed(err);
    }

    /// Called on every mutation notification from the surface: reinstate
    /// the never-empty invariant synchronously, then raise the dirty flag.
    /// The flag is monotonic within one load/save cycle.
    pub fn note_edit(&mut self, surface: &mut impl EditSurface) {
        surface.ensure_non_empty();
        self.dirty = true;
    }

    #[must_use]
    pub fn is_dirty(&self) -> bool {
        self.dirty
    }

    /// Snapshot the surface into the write-request body: collapse each
    /// block's tab runs back to tabs and join with `\n`, no trailing
    /// separator. Reading twice without intervening edits yields identical
    /// bodies.
    #[must_use]
    pub fn save_body(&self, surface: &impl EditSurface) -> String {
        let lines = surface
            .line_texts()
            .into_iter()
            .map(|display| markup::restore_line(&display))
            .collect();
        Document::from_lines(lines).to_text()
    }

    /// Clear the dirty flag after a confirmed successful write. Failed
    /// writes must not call this.
    pub fn mark_saved(&mut self) {
        self.dirty = false;
    }
}
