//! Persistence layer for the note collection.
//!
//! # Responsibility
//! - Define the use-case oriented `NoteStore` contract.
//! - Keep blob serialization details inside the persistence boundary.
//!
//! # Invariants
//! - The stored collection is one JSON-serialized sequence of notes.
//! - Every mutating call rewrites the whole blob; there are no partial
//!   updates and no transaction log.
//! - An unavailable medium degrades to empty reads and no-op writes; it is
//!   never surfaced to callers as an error.

pub mod json_store;
