//! Note domain model.
//!
//! # Responsibility
//! - Define the canonical record stored in the notes blob.
//! - Define the style parameters for AI summary generation.
//!
//! # Invariants
//! - `id` is stable and never reused for another note.
//! - `created_at_ms` is fixed at creation; `updated_at_ms` moves on save.
//! - `content` is the source of truth; `summary` is derived and replaceable.

use serde::{Deserialize, Serialize};
use std::time::{SystemTime, UNIX_EPOCH};
use uuid::Uuid;

/// Stable identifier for a note.
///
/// Kept as a type alias to make semantic intent explicit in signatures.
pub type NoteId = Uuid;

/// Requested length of a generated summary.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SummaryLength {
    /// Roughly 1-2 paragraphs.
    Short,
    /// Roughly 3-4 paragraphs.
    #[default]
    Medium,
    /// 5+ paragraphs.
    Long,
}

impl SummaryLength {
    /// Parses the wire form used by UI/FFI callers.
    pub fn parse(value: &str) -> Option<Self> {
        match value.trim().to_ascii_lowercase().as_str() {
            "short" => Some(Self::Short),
            "medium" => Some(Self::Medium),
            "long" => Some(Self::Long),
            _ => None,
        }
    }

    /// Stable lowercase label for logging and envelopes.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Short => "short",
            Self::Medium => "medium",
            Self::Long => "long",
        }
    }
}

/// Requested level of detail of a generated summary.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DetailLevel {
    /// Main points only.
    Low,
    /// Important details included.
    #[default]
    Medium,
    /// Comprehensive coverage.
    High,
}

impl DetailLevel {
    /// Parses the wire form used by UI/FFI callers.
    pub fn parse(value: &str) -> Option<Self> {
        match value.trim().to_ascii_lowercase().as_str() {
            "low" => Some(Self::Low),
            "medium" => Some(Self::Medium),
            "high" => Some(Self::High),
            _ => None,
        }
    }

    /// Stable lowercase label for logging and envelopes.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Low => "low",
            Self::Medium => "medium",
            Self::High => "high",
        }
    }
}

/// Canonical note record.
///
/// Serialized field names follow the storage blob schema, which keeps the
/// camel-cased timestamp keys of the original collection format.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Note {
    /// Stable id used for upsert/delete/selection.
    pub id: NoteId,
    /// User-provided or AI-suggested short title.
    pub title: String,
    /// User-authored free text, the source of truth.
    pub content: String,
    /// Derived summary text. Empty when never generated.
    #[serde(default)]
    pub summary: String,
    /// Unix epoch milliseconds, fixed at creation.
    #[serde(rename = "createdAt")]
    pub created_at_ms: i64,
    /// Unix epoch milliseconds, refreshed on every save.
    #[serde(rename = "updatedAt")]
    pub updated_at_ms: i64,
}

impl Note {
    /// Creates a new note with a generated stable id.
    ///
    /// Both timestamps start at `now_ms`.
    pub fn new(
        title: impl Into<String>,
        content: impl Into<String>,
        summary: impl Into<String>,
        now_ms: i64,
    ) -> Self {
        Self::with_id(Uuid::new_v4(), title, content, summary, now_ms)
    }

    /// Creates a note with a caller-provided stable id.
    ///
    /// Used by boundary callers where identity already exists externally.
    pub fn with_id(
        id: NoteId,
        title: impl Into<String>,
        content: impl Into<String>,
        summary: impl Into<String>,
        now_ms: i64,
    ) -> Self {
        Self {
            id,
            title: title.into(),
            content: content.into(),
            summary: summary.into(),
            created_at_ms: now_ms,
            updated_at_ms: now_ms,
        }
    }

    /// Returns whether the note has a non-empty generated summary.
    pub fn has_summary(&self) -> bool {
        !self.summary.trim().is_empty()
    }
}

/// Current wall-clock time in Unix epoch milliseconds.
///
/// Clamps to zero instead of failing when the system clock reports a time
/// before the epoch.
pub fn epoch_ms_now() -> i64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|elapsed| elapsed.as_millis() as i64)
        .unwrap_or(0)
}

#[cfg(test)]
mod tests {
    use super::{epoch_ms_now, DetailLevel, Note, SummaryLength};

    #[test]
    fn new_note_fixes_both_timestamps_at_creation() {
        let note = Note::new("title", "content", "", 1_700_000_000_000);
        assert_eq!(note.created_at_ms, 1_700_000_000_000);
        assert_eq!(note.updated_at_ms, 1_700_000_000_000);
        assert!(!note.has_summary());
    }

    #[test]
    fn blob_keys_match_storage_schema() {
        let note = Note::new("t", "c", "s", 42);
        let value = serde_json::to_value(&note).expect("note should serialize");
        let object = value.as_object().expect("note should serialize as object");
        assert!(object.contains_key("createdAt"));
        assert!(object.contains_key("updatedAt"));
        assert!(object.contains_key("summary"));
        assert!(!object.contains_key("created_at_ms"));
    }

    #[test]
    fn missing_summary_defaults_to_empty_on_decode() {
        let raw = r#"{
            "id": "3e2cda12-06e3-4f5a-9788-9e9a3055b8f2",
            "title": "t",
            "content": "c",
            "createdAt": 1,
            "updatedAt": 2
        }"#;
        let note: Note = serde_json::from_str(raw).expect("legacy record should decode");
        assert_eq!(note.summary, "");
        assert_eq!(note.updated_at_ms, 2);
    }

    #[test]
    fn style_parameters_round_trip_their_wire_form() {
        for length in [
            SummaryLength::Short,
            SummaryLength::Medium,
            SummaryLength::Long,
        ] {
            assert_eq!(SummaryLength::parse(length.as_str()), Some(length));
        }
        for detail in [DetailLevel::Low, DetailLevel::Medium, DetailLevel::High] {
            assert_eq!(DetailLevel::parse(detail.as_str()), Some(detail));
        }
        assert_eq!(SummaryLength::parse(" LONG "), Some(SummaryLength::Long));
        assert_eq!(SummaryLength::parse("huge"), None);
        assert_eq!(DetailLevel::parse("verbose"), None);
    }

    #[test]
    fn epoch_ms_now_is_positive() {
        assert!(epoch_ms_now() > 0);
    }
}
