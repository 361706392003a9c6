//! The remote store seam.

use crate::entities::{Note, NoteInput, Patient, PatientInput};
use crate::error::StoreResult;
use crate::identity::{NoteId, PatientId};
use async_trait::async_trait;

/// One async method per remote operation.
///
/// Each call is a single request/response round trip: no retry, caching, or
/// batching, and no state retained between calls. Implementations surface
/// every failure to the caller.
#[async_trait]
pub trait NotesStore: Send + Sync {
    async fn list_patients(&self) -> StoreResult<Vec<Patient>>;

    /// Fails with `NotFound` if the id is unknown.
    async fn get_patient(&self, id: PatientId) -> StoreResult<Patient>;

    async fn create_patient(&self, input: &PatientInput) -> StoreResult<Patient>;

    async fn update_patient(&self, id: PatientId, input: &PatientInput) -> StoreResult<Patient>;

    /// Notes are left in place; cascade behaviour belongs to the store.
    async fn delete_patient(&self, id: PatientId) -> StoreResult<()>;

    async fn list_all_notes(&self) -> StoreResult<Vec<Note>>;

    async fn get_note(&self, id: NoteId) -> StoreResult<Note>;

    async fn list_patient_notes(&self, patient_id: PatientId) -> StoreResult<Vec<Note>>;

    async fn create_note(&self, patient_id: PatientId, input: &NoteInput) -> StoreResult<Note>;

    async fn update_note(&self, id: NoteId, input: &NoteInput) -> StoreResult<Note>;

    async fn delete_note(&self, id: NoteId) -> StoreResult<()>;
}
