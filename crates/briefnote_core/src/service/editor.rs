//! Note editor state machine.
//!
//! # Responsibility
//! - Hold the in-progress draft for one target note (or a new note).
//! - Enforce the Viewing/Editing transition and save-gate rules.
//! - Bind AI regeneration requests to the target that issued them.
//!
//! # Invariants
//! - Save is possible only in Editing state with non-blank title and content.
//! - Cancel is reachable only when an underlying note exists.
//! - A regeneration ticket minted before a retarget never applies afterwards.

use crate::model::note::{DetailLevel, Note, SummaryLength};
use crate::store::json_store::NoteStore;
use log::{debug, info};

/// Editor view state.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EditorMode {
    /// Existing note shown read-only.
    Viewing,
    /// Draft fields are mutable.
    Editing,
}

/// In-progress, unsaved field values.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Draft {
    pub title: String,
    pub content: String,
    pub summary: String,
}

impl Draft {
    /// Builds a draft from an existing note's fields.
    pub fn from_note(note: &Note) -> Self {
        Self {
            title: note.title.clone(),
            content: note.content.clone(),
            summary: note.summary.clone(),
        }
    }

    /// Returns whether the draft passes the save gate.
    ///
    /// Both title and content must be non-empty after trimming whitespace.
    pub fn is_savable(&self) -> bool {
        !self.title.trim().is_empty() && !self.content.trim().is_empty()
    }
}

/// Which draft field a regeneration request targets.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RegenKind {
    Summary,
    Title,
}

impl RegenKind {
    /// Stable lowercase label for logging.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Summary => "summary",
            Self::Title => "title",
        }
    }
}

/// Identity token binding an in-flight regeneration to the editor target
/// that issued it.
///
/// Tickets minted for the same target do not exclude each other; a ticket
/// from a previous target is stale and is discarded on apply.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RegenTicket {
    kind: RegenKind,
    target_epoch: u64,
}

impl RegenTicket {
    /// Returns the draft field this ticket targets.
    pub fn kind(&self) -> RegenKind {
        self.kind
    }
}

/// View/edit state machine for a single note.
pub struct EditorSession {
    note: Option<Note>,
    draft: Draft,
    mode: EditorMode,
    summary_length: SummaryLength,
    detail_level: DetailLevel,
    // Bumped on every retarget; outstanding tickets carry the old value.
    target_epoch: u64,
}

impl Default for EditorSession {
    fn default() -> Self {
        Self::new()
    }
}

impl EditorSession {
    /// Creates an empty session for authoring a new note.
    ///
    /// Initial state is Editing with a blank draft.
    pub fn new() -> Self {
        Self {
            note: None,
            draft: Draft::default(),
            mode: EditorMode::Editing,
            summary_length: SummaryLength::default(),
            detail_level: DetailLevel::default(),
            target_epoch: 0,
        }
    }

    /// Creates a session targeting an existing note.
    ///
    /// Initial state is Viewing with the draft mirroring the note.
    pub fn for_note(note: Note) -> Self {
        let draft = Draft::from_note(&note);
        Self {
            note: Some(note),
            draft,
            mode: EditorMode::Viewing,
            summary_length: SummaryLength::default(),
            detail_level: DetailLevel::default(),
            target_epoch: 0,
        }
    }

    /// Retargets the session to another note (or to a new empty note).
    ///
    /// Resets the draft from the new target, re-derives the initial state
    /// and invalidates every outstanding regeneration ticket.
    pub fn open(&mut self, note: Option<Note>) {
        self.target_epoch += 1;
        match note {
            Some(note) => {
                self.draft = Draft::from_note(&note);
                self.note = Some(note);
                self.mode = EditorMode::Viewing;
            }
            None => {
                self.draft = Draft::default();
                self.note = None;
                self.mode = EditorMode::Editing;
            }
        }
    }

    pub fn mode(&self) -> EditorMode {
        self.mode
    }

    /// Returns the underlying saved note, when one exists.
    pub fn note(&self) -> Option<&Note> {
        self.note.as_ref()
    }

    pub fn draft(&self) -> &Draft {
        &self.draft
    }

    pub fn summary_length(&self) -> SummaryLength {
        self.summary_length
    }

    pub fn set_summary_length(&mut self, length: SummaryLength) {
        self.summary_length = length;
    }

    pub fn detail_level(&self) -> DetailLevel {
        self.detail_level
    }

    pub fn set_detail_level(&mut self, detail: DetailLevel) {
        self.detail_level = detail;
    }

    /// Replaces the draft title. No-op outside Editing state.
    pub fn set_title(&mut self, value: impl Into<String>) {
        if self.mode == EditorMode::Editing {
            self.draft.title = value.into();
        }
    }

    /// Replaces the draft content. No-op outside Editing state.
    pub fn set_content(&mut self, value: impl Into<String>) {
        if self.mode == EditorMode::Editing {
            self.draft.content = value.into();
        }
    }

    /// Replaces the draft summary. No-op outside Editing state.
    pub fn set_summary(&mut self, value: impl Into<String>) {
        if self.mode == EditorMode::Editing {
            self.draft.summary = value.into();
        }
    }

    /// Moves Viewing -> Editing. Returns whether a transition happened.
    pub fn begin_edit(&mut self) -> bool {
        if self.mode != EditorMode::Viewing {
            return false;
        }
        self.mode = EditorMode::Editing;
        true
    }

    /// Moves Editing -> Viewing without saving.
    ///
    /// Only reachable when an underlying note exists; draft edits survive
    /// the transition.
    pub fn cancel_edit(&mut self) -> bool {
        if self.mode != EditorMode::Editing || self.note.is_none() {
            return false;
        }
        self.mode = EditorMode::Viewing;
        true
    }

    /// Returns whether the save control is enabled.
    pub fn can_save(&self) -> bool {
        self.mode == EditorMode::Editing && self.draft.is_savable()
    }

    /// Commits the draft to the store and moves Editing -> Viewing.
    ///
    /// Existing targets keep their id and creation timestamp; new targets
    /// mint both. `updated_at_ms` is refreshed to `now_ms` either way.
    /// Returns the saved note for the shell callback, or `None` when the
    /// save gate is closed.
    pub fn save<S: NoteStore + ?Sized>(&mut self, store: &S, now_ms: i64) -> Option<Note> {
        if !self.can_save() {
            return None;
        }

        let saved = match self.note.as_ref() {
            Some(existing) => Note {
                id: existing.id,
                title: self.draft.title.clone(),
                content: self.draft.content.clone(),
                summary: self.draft.summary.clone(),
                created_at_ms: existing.created_at_ms,
                updated_at_ms: now_ms,
            },
            None => Note::new(
                self.draft.title.clone(),
                self.draft.content.clone(),
                self.draft.summary.clone(),
                now_ms,
            ),
        };

        store.save(&saved);
        info!(
            "event=editor_save module=editor status=ok note_id={}",
            saved.id
        );

        self.note = Some(saved.clone());
        self.mode = EditorMode::Viewing;
        Some(saved)
    }

    /// Issues a regeneration ticket for the current target.
    ///
    /// Only available in Editing state with non-blank draft content.
    /// Concurrent tickets for the same target are allowed.
    pub fn begin_regeneration(&self, kind: RegenKind) -> Option<RegenTicket> {
        if self.mode != EditorMode::Editing || self.draft.content.trim().is_empty() {
            return None;
        }
        Some(RegenTicket {
            kind,
            target_epoch: self.target_epoch,
        })
    }

    /// Applies a resolved regeneration to the draft.
    ///
    /// Returns `false` and leaves the draft untouched when the ticket was
    /// minted for a previous target.
    pub fn apply_regeneration(&mut self, ticket: RegenTicket, text: impl Into<String>) -> bool {
        if ticket.target_epoch != self.target_epoch {
            debug!(
                "event=editor_regen module=editor status=stale kind={}",
                ticket.kind.as_str()
            );
            return false;
        }

        match ticket.kind {
            RegenKind::Summary => self.draft.summary = text.into(),
            RegenKind::Title => self.draft.title = text.into(),
        }
        true
    }
}
