//! Application shell state.
//!
//! # Responsibility
//! - Own the authoritative in-memory note collection and the selection.
//! - Apply save/delete/new-note callbacks coming from list and editor.
//! - Derive the list preview projection for collection rows.
//!
//! # Invariants
//! - The collection is loaded from the store exactly once, at construction.
//! - Saved notes are kept most-recently-saved-first in memory.
//! - Deleting the selected note clears the selection.

use crate::model::note::{Note, NoteId};
use crate::service::editor::EditorSession;
use crate::store::json_store::NoteStore;
use log::info;
use once_cell::sync::Lazy;
use regex::Regex;

const PREVIEW_MAX_CHARS: usize = 100;

static MARKDOWN_IMAGE_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"!\[[^\]]*]\(([^)]+)\)").expect("valid image regex"));
static MARKDOWN_LINK_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"\[([^\]]+)\]\(([^)]+)\)").expect("valid link regex"));
static MARKDOWN_SYMBOL_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r#"[\*_`#>~\[\]\(\)!]+"#).expect("valid markdown symbol regex"));
static WHITESPACE_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"\s+").expect("valid ws regex"));

/// Owner of the in-memory collection and selection pointer.
///
/// Children receive read-only views of this state; every mutation flows
/// back through the methods below.
pub struct AppShell<S: NoteStore> {
    store: S,
    notes: Vec<Note>,
    selected: Option<NoteId>,
}

impl<S: NoteStore> AppShell<S> {
    /// Loads the full collection from the store once and takes ownership of
    /// the store handle.
    pub fn load(store: S) -> Self {
        let notes = store.list();
        info!(
            "event=shell_load module=shell status=ok count={}",
            notes.len()
        );
        Self {
            store,
            notes,
            selected: None,
        }
    }

    /// Returns the store handle for editor save commits.
    pub fn store(&self) -> &S {
        &self.store
    }

    /// Returns the in-memory collection in display order.
    pub fn notes(&self) -> &[Note] {
        &self.notes
    }

    pub fn selected_id(&self) -> Option<NoteId> {
        self.selected
    }

    /// Returns the selected note, when the selection is set.
    pub fn selected_note(&self) -> Option<&Note> {
        let id = self.selected?;
        self.notes.iter().find(|note| note.id == id)
    }

    /// Sets the active selection. Ignores ids not present in memory.
    pub fn select(&mut self, id: NoteId) -> bool {
        if self.notes.iter().any(|note| note.id == id) {
            self.selected = Some(id);
            return true;
        }
        false
    }

    /// Clears the selection so the editor falls back to its empty Editing
    /// state. Does not touch the stored collection.
    pub fn new_note(&mut self) {
        self.selected = None;
    }

    /// Applies an editor save callback: drop any in-memory note with the
    /// same id, prepend the saved note and select it.
    pub fn note_saved(&mut self, note: Note) {
        self.notes.retain(|existing| existing.id != note.id);
        self.selected = Some(note.id);
        self.notes.insert(0, note);
    }

    /// Deletes one note from store and memory.
    ///
    /// Clears the selection when the deleted note was selected; unknown ids
    /// are a no-op end to end.
    pub fn delete_note(&mut self, id: NoteId) {
        self.store.delete(id);
        self.notes.retain(|note| note.id != id);
        if self.selected == Some(id) {
            self.selected = None;
        }
    }

    /// Builds an editor session for the current selection.
    ///
    /// No selection yields the empty Editing session for a new note.
    pub fn editor_for_selection(&self) -> EditorSession {
        match self.selected_note() {
            Some(note) => EditorSession::for_note(note.clone()),
            None => EditorSession::new(),
        }
    }
}

/// Derives the list-row preview for one note.
///
/// Rules:
/// - The summary wins whenever it is non-blank.
/// - Otherwise the content is used with markdown noise stripped, whitespace
///   normalized and the first 100 chars retained.
pub fn derive_list_preview(note: &Note) -> String {
    if note.has_summary() {
        return clip_preview(note.summary.trim());
    }

    let without_images = MARKDOWN_IMAGE_RE.replace_all(&note.content, " ");
    let without_links = MARKDOWN_LINK_RE.replace_all(&without_images, "$1");
    let without_symbols = MARKDOWN_SYMBOL_RE.replace_all(&without_links, " ");
    let normalized = WHITESPACE_RE.replace_all(&without_symbols, " ");
    clip_preview(normalized.trim())
}

fn clip_preview(value: &str) -> String {
    value.chars().take(PREVIEW_MAX_CHARS).collect()
}

#[cfg(test)]
mod tests {
    use super::derive_list_preview;
    use crate::model::note::Note;

    #[test]
    fn preview_prefers_the_summary_when_present() {
        let note = Note::new("t", "long body text", "short summary", 1);
        assert_eq!(derive_list_preview(&note), "short summary");
    }

    #[test]
    fn preview_strips_markdown_noise_from_content() {
        let note = Note::new(
            "t",
            "# Heading\n\n![cover](img.png) see [docs](https://example.com) **now**",
            "",
            1,
        );
        let preview = derive_list_preview(&note);
        assert!(preview.contains("Heading"));
        assert!(preview.contains("docs"));
        assert!(!preview.contains('#'));
        assert!(!preview.contains('!'));
        assert!(!preview.contains("img.png"));
    }

    #[test]
    fn preview_clips_content_to_100_chars() {
        let note = Note::new("t", "x".repeat(500), "", 1);
        assert_eq!(derive_list_preview(&note).chars().count(), 100);
    }
}
