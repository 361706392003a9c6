//! In-memory store double.
//!
//! Mirrors the remote store's observable behaviour: ids assigned on create
//! and never reused, `created_at` stamped once, `updated_at` refreshed on
//! every note update, no cascade from patients to notes.

use async_trait::async_trait;
use chrono::Utc;
use std::collections::{BTreeMap, VecDeque};
use std::sync::{Arc, Mutex, MutexGuard};
use verse_core::{
    Note, NoteId, NoteInput, NotesStore, Patient, PatientId, PatientInput, ResourceKind,
    StoreError, StoreResult,
};

/// Operation names recorded in the call log.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum StoreOp {
    ListPatients,
    GetPatient,
    CreatePatient,
    UpdatePatient,
    DeletePatient,
    ListAllNotes,
    GetNote,
    ListPatientNotes,
    CreateNote,
    UpdateNote,
    DeleteNote,
}

#[derive(Debug)]
struct Inner {
    patients: BTreeMap<PatientId, Patient>,
    notes: BTreeMap<NoteId, Note>,
    next_patient_id: i64,
    next_note_id: i64,
    calls: Vec<StoreOp>,
    queued_failures: VecDeque<StoreError>,
    op_failures: Vec<(StoreOp, StoreError)>,
}

/// Cloneable handle; clones share the same records.
#[derive(Debug, Clone)]
pub struct MockStore {
    inner: Arc<Mutex<Inner>>,
}

impl Default for MockStore {
    fn default() -> Self {
        Self::new()
    }
}

impl MockStore {
    pub fn new() -> Self {
        Self::with_first_ids(1, 1)
    }

    /// Start id assignment at the given values (use `0` to exercise id zero).
    pub fn with_first_ids(first_patient_id: i64, first_note_id: i64) -> Self {
        Self {
            inner: Arc::new(Mutex::new(Inner {
                patients: BTreeMap::new(),
                notes: BTreeMap::new(),
                next_patient_id: first_patient_id,
                next_note_id: first_note_id,
                calls: Vec::new(),
                queued_failures: VecDeque::new(),
                op_failures: Vec::new(),
            })),
        }
    }

    fn lock(&self) -> MutexGuard<'_, Inner> {
        self.inner.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
    }

    /// Insert a patient with a caller-chosen id, bypassing validation.
    pub fn seed_patient(&self, patient: Patient) {
        let mut inner = self.lock();
        if patient.id.get() >= inner.next_patient_id {
            inner.next_patient_id = patient.id.get() + 1;
        }
        inner.patients.insert(patient.id, patient);
    }

    /// Insert a note with a caller-chosen id, bypassing validation.
    pub fn seed_note(&self, note: Note) {
        let mut inner = self.lock();
        if note.id.get() >= inner.next_note_id {
            inner.next_note_id = note.id.get() + 1;
        }
        inner.notes.insert(note.id, note);
    }

    /// Make the next call (of any operation) fail with `error`.
    pub fn fail_next(&self, error: StoreError) {
        self.lock().queued_failures.push_back(error);
    }

    /// Make the next call of `op` fail with `error`; other operations pass.
    pub fn fail_on(&self, op: StoreOp, error: StoreError) {
        self.lock().op_failures.push((op, error));
    }

    pub fn calls(&self) -> Vec<StoreOp> {
        self.lock().calls.clone()
    }

    pub fn call_count(&self, op: StoreOp) -> usize {
        self.lock().calls.iter().filter(|c| **c == op).count()
    }

    pub fn clear_calls(&self) {
        self.lock().calls.clear();
    }

    pub fn note_count(&self) -> usize {
        self.lock().notes.len()
    }

    fn begin(&self, op: StoreOp) -> StoreResult<MutexGuard<'_, Inner>> {
        let mut inner = self.lock();
        inner.calls.push(op);
        if let Some(error) = inner.queued_failures.pop_front() {
            return Err(error);
        }
        match inner.op_failures.iter().position(|(failing, _)| *failing == op) {
            Some(index) => Err(inner.op_failures.remove(index).1),
            None => Ok(inner),
        }
    }
}

fn validate_patient(input: &PatientInput, action: &str) -> StoreResult<()> {
    if input.name.trim().is_empty() {
        return Err(StoreError::validation(format!("Failed to {action} patient")));
    }
    Ok(())
}

#[async_trait]
impl NotesStore for MockStore {
    async fn list_patients(&self) -> StoreResult<Vec<Patient>> {
        let inner = self.begin(StoreOp::ListPatients)?;
        Ok(inner.patients.values().cloned().collect())
    }

    async fn get_patient(&self, id: PatientId) -> StoreResult<Patient> {
        let inner = self.begin(StoreOp::GetPatient)?;
        inner
            .patients
            .get(&id)
            .cloned()
            .ok_or_else(|| StoreError::not_found(ResourceKind::Patient, id))
    }

    async fn create_patient(&self, input: &PatientInput) -> StoreResult<Patient> {
        let mut inner = self.begin(StoreOp::CreatePatient)?;
        validate_patient(input, "create")?;
        let id = PatientId::new(inner.next_patient_id);
        inner.next_patient_id += 1;
        let patient = Patient {
            id,
            name: input.name.clone(),
            date_of_birth: input.date_of_birth,
            gender: input.gender,
        };
        inner.patients.insert(id, patient.clone());
        Ok(patient)
    }

    async fn update_patient(&self, id: PatientId, input: &PatientInput) -> StoreResult<Patient> {
        let mut inner = self.begin(StoreOp::UpdatePatient)?;
        let patient = inner
            .patients
            .get_mut(&id)
            .ok_or_else(|| StoreError::not_found(ResourceKind::Patient, id))?;
        validate_patient(input, "update")?;
        patient.name = input.name.clone();
        patient.date_of_birth = input.date_of_birth;
        patient.gender = input.gender;
        Ok(patient.clone())
    }

    async fn delete_patient(&self, id: PatientId) -> StoreResult<()> {
        let mut inner = self.begin(StoreOp::DeletePatient)?;
        inner
            .patients
            .remove(&id)
            .map(|_| ())
            .ok_or_else(|| StoreError::not_found(ResourceKind::Patient, id))
    }

    async fn list_all_notes(&self) -> StoreResult<Vec<Note>> {
        let inner = self.begin(StoreOp::ListAllNotes)?;
        Ok(inner.notes.values().cloned().collect())
    }

    async fn get_note(&self, id: NoteId) -> StoreResult<Note> {
        let inner = self.begin(StoreOp::GetNote)?;
        inner
            .notes
            .get(&id)
            .cloned()
            .ok_or_else(|| StoreError::not_found(ResourceKind::Note, id))
    }

    async fn list_patient_notes(&self, patient_id: PatientId) -> StoreResult<Vec<Note>> {
        let inner = self.begin(StoreOp::ListPatientNotes)?;
        Ok(inner
            .notes
            .values()
            .filter(|n| n.patient_id == patient_id)
            .cloned()
            .collect())
    }

    async fn create_note(&self, patient_id: PatientId, input: &NoteInput) -> StoreResult<Note> {
        let mut inner = self.begin(StoreOp::CreateNote)?;
        if !inner.patients.contains_key(&patient_id) {
            return Err(StoreError::not_found(ResourceKind::Patient, patient_id));
        }
        if input.content.trim().is_empty() {
            return Err(StoreError::validation("Failed to create note"));
        }
        let id = NoteId::new(inner.next_note_id);
        inner.next_note_id += 1;
        let now = Utc::now();
        let note = Note {
            id,
            patient_id,
            content: input.content.clone(),
            created_at: now,
            updated_at: Some(now),
        };
        inner.notes.insert(id, note.clone());
        Ok(note)
    }

    async fn update_note(&self, id: NoteId, input: &NoteInput) -> StoreResult<Note> {
        let mut inner = self.begin(StoreOp::UpdateNote)?;
        let note = inner
            .notes
            .get_mut(&id)
            .ok_or_else(|| StoreError::not_found(ResourceKind::Note, id))?;
        note.content = input.content.clone();
        note.updated_at = Some(Utc::now());
        Ok(note.clone())
    }

    async fn delete_note(&self, id: NoteId) -> StoreResult<()> {
        let mut inner = self.begin(StoreOp::DeleteNote)?;
        inner
            .notes
            .remove(&id)
            .map(|_| ())
            .ok_or_else(|| StoreError::not_found(ResourceKind::Note, id))
    }
}
