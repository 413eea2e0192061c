use briefnote_core::{EditorMode, EditorSession, Note, NoteId, NoteStore, RegenKind};
use std::cell::{Cell, RefCell};
use std::rc::Rc;

#[derive(Clone, Default)]
struct RecordingStore {
    notes: Rc<RefCell<Vec<Note>>>,
    saves: Rc<Cell<usize>>,
    deletes: Rc<Cell<usize>>,
}

impl NoteStore for RecordingStore {
    fn list(&self) -> Vec<Note> {
        self.notes.borrow().clone()
    }

    fn save(&self, note: &Note) {
        self.saves.set(self.saves.get() + 1);
        let mut notes = self.notes.borrow_mut();
        match notes.iter_mut().find(|existing| existing.id == note.id) {
            Some(existing) => *existing = note.clone(),
            None => notes.push(note.clone()),
        }
    }

    fn delete(&self, id: NoteId) {
        self.deletes.set(self.deletes.get() + 1);
        self.notes.borrow_mut().retain(|note| note.id != id);
    }

    fn get_by_id(&self, id: NoteId) -> Option<Note> {
        self.notes.borrow().iter().find(|note| note.id == id).cloned()
    }
}

#[test]
fn new_session_starts_editing_and_existing_note_starts_viewing() {
    let empty = EditorSession::new();
    assert_eq!(empty.mode(), EditorMode::Editing);
    assert!(empty.note().is_none());

    let session = EditorSession::for_note(Note::new("t", "c", "s", 1));
    assert_eq!(session.mode(), EditorMode::Viewing);
    assert_eq!(session.draft().title, "t");
    assert_eq!(session.draft().summary, "s");
}

#[test]
fn save_gate_requires_non_blank_title_and_content() {
    let mut session = EditorSession::new();
    assert!(!session.can_save());

    session.set_title("   ");
    session.set_content("body");
    assert!(!session.can_save());

    session.set_title("title");
    session.set_content(" \t\n");
    assert!(!session.can_save());

    session.set_content("body");
    assert!(session.can_save());
}

#[test]
fn blocked_save_commits_nothing() {
    let store = RecordingStore::default();
    let mut session = EditorSession::new();
    session.set_content("body only");

    assert!(session.save(&store, 1_000).is_none());
    assert_eq!(store.saves.get(), 0);
    assert_eq!(session.mode(), EditorMode::Editing);
}

#[test]
fn saving_a_new_draft_mints_identity_and_enters_viewing() {
    let store = RecordingStore::default();
    let mut session = EditorSession::new();
    session.set_title("fresh");
    session.set_content("body");

    let saved = session
        .save(&store, 9_000)
        .expect("savable draft should commit");
    assert_eq!(saved.created_at_ms, 9_000);
    assert_eq!(saved.updated_at_ms, 9_000);
    assert_eq!(store.saves.get(), 1);
    assert_eq!(store.list()[0].id, saved.id);
    assert_eq!(session.mode(), EditorMode::Viewing);
    assert_eq!(session.note().map(|note| note.id), Some(saved.id));
}

#[test]
fn saving_an_existing_note_keeps_id_and_creation_time() {
    let store = RecordingStore::default();
    let original = Note::new("old", "old body", "", 1_000);
    store.save(&original);

    let mut session = EditorSession::for_note(original.clone());
    assert!(session.begin_edit());
    session.set_title("new");
    session.set_content("new body");

    let saved = session
        .save(&store, 2_000)
        .expect("savable draft should commit");
    assert_eq!(saved.id, original.id);
    assert_eq!(saved.created_at_ms, 1_000);
    assert_eq!(saved.updated_at_ms, 2_000);
    assert_eq!(store.list().len(), 1);
    assert_eq!(store.list()[0].title, "new");
}

#[test]
fn cancel_requires_an_underlying_note() {
    let mut empty = EditorSession::new();
    assert!(!empty.cancel_edit());
    assert_eq!(empty.mode(), EditorMode::Editing);

    let mut session = EditorSession::for_note(Note::new("t", "c", "", 1));
    assert!(!session.cancel_edit());
    assert!(session.begin_edit());
    assert!(session.cancel_edit());
    assert_eq!(session.mode(), EditorMode::Viewing);
}

#[test]
fn draft_edits_survive_cancel() {
    let mut session = EditorSession::for_note(Note::new("t", "c", "", 1));
    session.begin_edit();
    session.set_content("edited but never saved");
    session.cancel_edit();

    assert_eq!(session.draft().content, "edited but never saved");
    assert_eq!(
        session.note().map(|note| note.content.as_str()),
        Some("c"),
        "the underlying note must keep its saved fields"
    );
}

#[test]
fn field_setters_are_noops_while_viewing() {
    let mut session = EditorSession::for_note(Note::new("t", "c", "", 1));
    session.set_title("sneaky");
    session.set_content("sneaky");
    session.set_summary("sneaky");

    assert_eq!(session.draft().title, "t");
    assert_eq!(session.draft().content, "c");
    assert_eq!(session.draft().summary, "");
}

#[test]
fn regeneration_needs_editing_state_and_content() {
    let session = EditorSession::for_note(Note::new("t", "c", "", 1));
    assert!(session.begin_regeneration(RegenKind::Summary).is_none());

    let mut blank = EditorSession::new();
    assert!(blank.begin_regeneration(RegenKind::Title).is_none());
    blank.set_content("  ");
    assert!(blank.begin_regeneration(RegenKind::Title).is_none());
    blank.set_content("something");
    assert!(blank.begin_regeneration(RegenKind::Title).is_some());
}

#[test]
fn applied_regeneration_writes_the_matching_draft_field() {
    let mut session = EditorSession::new();
    session.set_content("content");

    let summary_ticket = session
        .begin_regeneration(RegenKind::Summary)
        .expect("editing session with content should issue tickets");
    assert!(session.apply_regeneration(summary_ticket, "a summary"));
    assert_eq!(session.draft().summary, "a summary");

    let title_ticket = session
        .begin_regeneration(RegenKind::Title)
        .expect("editing session with content should issue tickets");
    assert!(session.apply_regeneration(title_ticket, "A Title"));
    assert_eq!(session.draft().title, "A Title");
}

#[test]
fn concurrent_tickets_for_the_same_target_both_apply() {
    let mut session = EditorSession::new();
    session.set_content("content");

    let summary_ticket = session.begin_regeneration(RegenKind::Summary).unwrap();
    let title_ticket = session.begin_regeneration(RegenKind::Title).unwrap();

    // Resolve in the opposite order they were issued.
    assert!(session.apply_regeneration(title_ticket, "late title"));
    assert!(session.apply_regeneration(summary_ticket, "late summary"));
    assert_eq!(session.draft().title, "late title");
    assert_eq!(session.draft().summary, "late summary");
}

#[test]
fn ticket_from_a_previous_target_is_discarded() {
    let mut session = EditorSession::new();
    session.set_content("first target content");
    let stale = session
        .begin_regeneration(RegenKind::Summary)
        .expect("ticket should be issued for the first target");

    session.open(Some(Note::new("other", "other content", "", 1)));
    assert!(!session.apply_regeneration(stale, "stale summary"));
    assert_eq!(session.draft().summary, "");

    session.open(None);
    assert!(!session.apply_regeneration(stale, "stale summary"));
    assert_eq!(session.draft().summary, "");
}

#[test]
fn open_retargets_draft_and_mode() {
    let mut session = EditorSession::new();
    session.set_title("unsaved");
    session.set_content("unsaved");

    let note = Note::new("saved", "saved body", "saved summary", 1);
    session.open(Some(note.clone()));
    assert_eq!(session.mode(), EditorMode::Viewing);
    assert_eq!(session.draft().title, "saved");
    assert_eq!(session.draft().summary, "saved summary");

    session.open(None);
    assert_eq!(session.mode(), EditorMode::Editing);
    assert_eq!(session.draft().title, "");
    assert!(session.note().is_none());
}
