//! One patient's demographics and notes.

use super::{NoteDialog, NoteDialogScreen, Screen, SyncState};
use async_trait::async_trait;
use verse_core::{Note, NoteId, NoteInput, NotesStore, Patient, PatientId, StoreResult};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PatientNotesSnapshot {
    pub patient: Patient,
    pub notes: Vec<Note>,
}

#[derive(Debug, Clone)]
pub struct PatientNotesScreen {
    patient_id: PatientId,
    state: SyncState<PatientNotesSnapshot>,
    /// Body of the note being composed.
    pub new_note: String,
    dialog: NoteDialog,
}

impl PatientNotesScreen {
    pub fn new(patient_id: PatientId) -> Self {
        Self {
            patient_id,
            state: SyncState::Idle,
            new_note: String::new(),
            dialog: NoteDialog::Closed,
        }
    }

    pub fn patient_id(&self) -> PatientId {
        self.patient_id
    }

    pub fn patient(&self) -> Option<&Patient> {
        self.state.snapshot().map(|s| &s.patient)
    }

    pub fn notes(&self) -> &[Note] {
        self.state
            .snapshot()
            .map(|s| s.notes.as_slice())
            .unwrap_or_default()
    }

    pub fn find(&self, id: NoteId) -> Option<&Note> {
        self.notes().iter().find(|n| n.id == id)
    }

    pub fn can_add_note(&self) -> bool {
        !self.new_note.trim().is_empty()
    }

    /// Create a note from the composer and refetch.
    ///
    /// Blank content is ignored without a store call; the content is sent as
    /// typed, and the composer is cleared once the note is created.
    pub async fn add_note<S>(&mut self, store: &S) -> StoreResult<Option<Note>>
    where
        S: NotesStore + ?Sized,
    {
        if !self.can_add_note() {
            return Ok(None);
        }
        let patient_id = self.patient_id;
        let input = NoteInput::new(self.new_note.clone());
        let mutated = self
            .refresh_after(store, store.create_note(patient_id, &input))
            .await?;
        self.new_note.clear();
        mutated.into_result().map(Some)
    }
}

#[async_trait]
impl Screen for PatientNotesScreen {
    type Snapshot = PatientNotesSnapshot;

    fn sync_state(&self) -> &SyncState<Self::Snapshot> {
        &self.state
    }

    fn set_sync_state(&mut self, state: SyncState<Self::Snapshot>) {
        self.state = state;
    }

    async fn fetch<S>(&self, store: &S) -> StoreResult<Self::Snapshot>
    where
        S: NotesStore + ?Sized,
    {
        let patient = store.get_patient(self.patient_id).await?;
        let notes = store.list_patient_notes(self.patient_id).await?;
        Ok(PatientNotesSnapshot { patient, notes })
    }
}

impl NoteDialogScreen for PatientNotesScreen {
    fn dialog(&self) -> &NoteDialog {
        &self.dialog
    }

    fn dialog_mut(&mut self) -> &mut NoteDialog {
        &mut self.dialog
    }
}
