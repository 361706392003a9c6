//! Verse Core - Entity Types
//!
//! Data structures shared by every Verse crate: patient and note records,
//! their identifiers, the store error taxonomy, and the `NotesStore` seam
//! that both the HTTP client and the in-memory test store implement.

pub mod entities;
pub mod error;
pub mod identity;
pub mod store;

pub use entities::{Gender, GenderParseError, Note, NoteInput, Patient, PatientInput};
pub use error::{ResourceKind, StoreError, StoreResult};
pub use identity::{NoteId, PatientId, Timestamp};
pub use store::NotesStore;
