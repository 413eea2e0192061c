//! Core domain logic for Briefnote.
//! This crate is the single source of truth for business invariants.

pub mod ai;
pub mod logging;
pub mod model;
pub mod service;
pub mod store;

pub use ai::gemini::{
    GeminiGenerator, GenerateError, GenerateResult, TextGenerator, DEFAULT_GEMINI_MODEL,
};
pub use ai::summary_service::{SummaryService, SUMMARY_FALLBACK_TEXT, TITLE_FALLBACK_TEXT};
pub use logging::{default_log_level, init_logging, logging_status};
pub use model::note::{epoch_ms_now, DetailLevel, Note, NoteId, SummaryLength};
pub use service::editor::{Draft, EditorMode, EditorSession, RegenKind, RegenTicket};
pub use service::shell::{derive_list_preview, AppShell};
pub use store::json_store::{resolve_data_dir, JsonNoteStore, NoteStore};

/// Minimal health-check API for early integration.
pub fn ping() -> &'static str {
    "pong"
}

/// Returns the core crate version.
pub fn core_version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}

#[cfg(test)]
mod tests {
    use super::{core_version, ping};

    #[test]
    fn ping_returns_pong() {
        assert_eq!(ping(), "pong");
    }

    #[test]
    fn version_is_not_empty() {
        assert!(!core_version().is_empty());
    }
}
