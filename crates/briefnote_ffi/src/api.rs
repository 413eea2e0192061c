//! FFI use-case API for UI-facing calls.
//!
//! # Responsibility
//! - Expose stable, use-case-level functions to the UI host via FRB.
//! - Keep error semantics simple for the rendering layer.
//!
//! # Invariants
//! - Exported functions must not panic across the FFI boundary.
//! - Return values are UTF-8 strings or plain envelopes with stable meaning.

use briefnote_core::{
    core_version as core_version_inner, derive_list_preview, epoch_ms_now,
    init_logging as init_logging_inner, ping as ping_inner, DetailLevel, GeminiGenerator,
    JsonNoteStore, Note, NoteStore, SummaryLength, SummaryService, SUMMARY_FALLBACK_TEXT,
    TITLE_FALLBACK_TEXT,
};
use std::path::PathBuf;
use std::sync::OnceLock;
use uuid::Uuid;

static NOTES_DATA_DIR: OnceLock<PathBuf> = OnceLock::new();

/// Minimal health-check API for FRB smoke integration.
///
/// # FFI contract
/// - Sync call, non-blocking.
/// - Never throws; always returns a UTF-8 string.
#[flutter_rust_bridge::frb(sync)]
pub fn ping() -> String {
    ping_inner().to_owned()
}

/// Expose core crate version through FFI.
///
/// # FFI contract
/// - Sync call, non-blocking.
/// - Never throws; always returns a UTF-8 string.
#[flutter_rust_bridge::frb(sync)]
pub fn core_version() -> String {
    core_version_inner().to_owned()
}

/// Initializes Rust core logging once per process.
///
/// Input semantics:
/// - `level`: one of `trace|debug|info|warn|error` (case-insensitive).
/// - `log_dir`: absolute directory path where rolling logs are written.
///
/// # FFI contract
/// - Sync call; may perform small file-system setup work.
/// - Safe to call repeatedly with the same `level + log_dir` (idempotent).
/// - Never panics; returns empty string on success and error message on failure.
#[flutter_rust_bridge::frb(sync)]
pub fn init_logging(level: String, log_dir: String) -> String {
    match init_logging_inner(level.as_str(), log_dir.as_str()) {
        Ok(()) => String::new(),
        Err(err) => err,
    }
}

/// List row returned by the notes listing API.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NoteListItem {
    /// Stable note id in string form.
    pub note_id: String,
    /// Note title for the row header.
    pub title: String,
    /// Summary-or-content preview for the row body.
    pub preview: String,
    /// Last save time in epoch milliseconds.
    pub updated_at_ms: i64,
}

/// Response envelope for the notes listing API.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NoteListResponse {
    /// Rows in stored order (empty when the medium is unavailable).
    pub items: Vec<NoteListItem>,
    /// Human-readable response message for diagnostics.
    pub message: String,
}

/// Generic action response envelope for note mutations.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NoteActionResponse {
    /// Whether the operation succeeded.
    pub ok: bool,
    /// Saved/deleted note id when known.
    pub note_id: Option<String>,
    /// Human-readable response message for diagnostics/UI.
    pub message: String,
}

impl NoteActionResponse {
    fn success(message: impl Into<String>, note_id: String) -> Self {
        Self {
            ok: true,
            note_id: Some(note_id),
            message: message.into(),
        }
    }

    fn failure(message: impl Into<String>) -> Self {
        Self {
            ok: false,
            note_id: None,
            message: message.into(),
        }
    }
}

/// Response envelope for AI text generation calls.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AiTextResponse {
    /// Whether the request was accepted (fallback substitution still counts
    /// as accepted; only malformed input is rejected).
    pub ok: bool,
    /// Generated text, or the fixed fallback string.
    pub text: String,
    /// Human-readable response message for diagnostics.
    pub message: String,
}

impl AiTextResponse {
    fn accepted(text: String) -> Self {
        Self {
            ok: true,
            text,
            message: String::new(),
        }
    }

    fn rejected(message: impl Into<String>) -> Self {
        Self {
            ok: false,
            text: String::new(),
            message: message.into(),
        }
    }
}

/// Lists the stored note collection for the list view.
///
/// # FFI contract
/// - Sync call, blob-backed execution.
/// - Never panics; an unavailable medium yields an empty listing.
#[flutter_rust_bridge::frb(sync)]
pub fn notes_list() -> NoteListResponse {
    let store = open_store();
    let items: Vec<NoteListItem> = store
        .list()
        .iter()
        .map(|note| NoteListItem {
            note_id: note.id.to_string(),
            title: note.title.clone(),
            preview: derive_list_preview(note),
            updated_at_ms: note.updated_at_ms,
        })
        .collect();
    let message = if items.is_empty() {
        "No notes.".to_string()
    } else {
        format!("Found {} note(s).", items.len())
    };
    NoteListResponse { items, message }
}

/// Saves one note, upserting by id.
///
/// Passing no `note_id` creates a new note; passing an id replaces the
/// matching stored record while preserving its creation time.
///
/// # FFI contract
/// - Sync call, blob-backed execution.
/// - Rejects blank titles/content and malformed ids; never panics.
#[flutter_rust_bridge::frb(sync)]
pub fn note_save(
    note_id: Option<String>,
    title: String,
    content: String,
    summary: String,
) -> NoteActionResponse {
    if title.trim().is_empty() {
        return NoteActionResponse::failure("note_save failed: title must not be blank");
    }
    if content.trim().is_empty() {
        return NoteActionResponse::failure("note_save failed: content must not be blank");
    }

    let now_ms = epoch_ms_now();
    let store = open_store();
    let note = match note_id {
        Some(raw) => {
            let id = match Uuid::parse_str(raw.trim()) {
                Ok(id) => id,
                Err(_) => {
                    return NoteActionResponse::failure(format!(
                        "note_save failed: invalid note id `{raw}`"
                    ));
                }
            };
            let created_at_ms = store
                .get_by_id(id)
                .map(|existing| existing.created_at_ms)
                .unwrap_or(now_ms);
            Note {
                id,
                title,
                content,
                summary,
                created_at_ms,
                updated_at_ms: now_ms,
            }
        }
        None => Note::new(title, content, summary, now_ms),
    };

    store.save(&note);
    NoteActionResponse::success("Note saved.", note.id.to_string())
}

/// Deletes one note by id.
///
/// # FFI contract
/// - Sync call, blob-backed execution.
/// - Deleting an unknown id succeeds as a no-op; never panics.
#[flutter_rust_bridge::frb(sync)]
pub fn note_delete(note_id: String) -> NoteActionResponse {
    let id = match Uuid::parse_str(note_id.trim()) {
        Ok(id) => id,
        Err(_) => {
            return NoteActionResponse::failure(format!(
                "note_delete failed: invalid note id `{note_id}`"
            ));
        }
    };

    open_store().delete(id);
    NoteActionResponse::success("Note deleted.", id.to_string())
}

/// Generates a summary for the given content.
///
/// # FFI contract
/// - Sync call; performs one blocking network round-trip.
/// - Generation failures yield the fixed fallback text with `ok = true`;
///   only malformed style parameters are rejected. Never panics.
#[flutter_rust_bridge::frb(sync)]
pub fn ai_summarize(content: String, length: String, detail_level: String) -> AiTextResponse {
    let Some(length) = SummaryLength::parse(&length) else {
        return AiTextResponse::rejected(format!(
            "ai_summarize failed: unsupported length `{length}`; expected short|medium|long"
        ));
    };
    let Some(detail) = DetailLevel::parse(&detail_level) else {
        return AiTextResponse::rejected(format!(
            "ai_summarize failed: unsupported detail level `{detail_level}`; expected low|medium|high"
        ));
    };

    match GeminiGenerator::from_env() {
        Ok(generator) => AiTextResponse::accepted(
            SummaryService::new(generator).summarize(&content, length, detail),
        ),
        Err(err) => {
            log::warn!("event=ai_generate module=ffi status=error kind=summary error={err}");
            AiTextResponse::accepted(SUMMARY_FALLBACK_TEXT.to_string())
        }
    }
}

/// Generates a title suggestion for the given content.
///
/// # FFI contract
/// - Sync call; performs one blocking network round-trip.
/// - Generation failures yield the fixed fallback text with `ok = true`.
///   Never panics.
#[flutter_rust_bridge::frb(sync)]
pub fn ai_suggest_title(content: String) -> AiTextResponse {
    match GeminiGenerator::from_env() {
        Ok(generator) => {
            AiTextResponse::accepted(SummaryService::new(generator).suggest_title(&content))
        }
        Err(err) => {
            log::warn!("event=ai_generate module=ffi status=error kind=title error={err}");
            AiTextResponse::accepted(TITLE_FALLBACK_TEXT.to_string())
        }
    }
}

fn open_store() -> JsonNoteStore {
    JsonNoteStore::open(resolve_notes_dir())
}

fn resolve_notes_dir() -> PathBuf {
    NOTES_DATA_DIR
        .get_or_init(briefnote_core::resolve_data_dir)
        .clone()
}
