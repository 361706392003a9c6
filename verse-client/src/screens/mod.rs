//! Screen view-models and their synchronization protocol.
//!
//! Every screen owns a `SyncState` snapshot of the store. Activation fetches;
//! every mutation goes through [`Screen::refresh_after`], which runs the same
//! fetch again on success. There is no local merge: the snapshot is rebuilt
//! wholesale each time, and the last fetch to complete wins.
//!
//! A write that landed is reported as such even when the refetch after it
//! fails, so callers can drop their editing state and never resend it.

pub mod all_notes;
pub mod note_dialog;
pub mod patient_form;
pub mod patient_list;
pub mod patient_notes;

pub use all_notes::AllNotesScreen;
pub use note_dialog::{NoteDialog, NoteDialogScreen, NoteDraft};
pub use patient_form::{FormField, FormMode, PatientDraft, PatientFormScreen};
pub use patient_list::PatientListScreen;
pub use patient_notes::{PatientNotesScreen, PatientNotesSnapshot};

use async_trait::async_trait;
use std::future::Future;
use verse_core::{NotesStore, StoreError, StoreResult};

/// Lifecycle of a screen's fetched snapshot.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum SyncState<T> {
    #[default]
    Idle,
    Loading,
    Ready(T),
    Error(StoreError),
}

impl<T> SyncState<T> {
    pub fn is_loading(&self) -> bool {
        matches!(self, SyncState::Loading)
    }

    pub fn is_ready(&self) -> bool {
        matches!(self, SyncState::Ready(_))
    }

    pub fn snapshot(&self) -> Option<&T> {
        match self {
            SyncState::Ready(snapshot) => Some(snapshot),
            _ => None,
        }
    }

    pub fn error(&self) -> Option<&StoreError> {
        match self {
            SyncState::Error(err) => Some(err),
            _ => None,
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            SyncState::Idle => "Idle",
            SyncState::Loading => "Loading",
            SyncState::Ready(_) => "Ready",
            SyncState::Error(_) => "Error",
        }
    }
}

impl<T> From<StoreResult<T>> for SyncState<T> {
    fn from(result: StoreResult<T>) -> Self {
        match result {
            Ok(snapshot) => SyncState::Ready(snapshot),
            Err(err) => SyncState::Error(err),
        }
    }
}

/// A write that the store accepted, and how the refetch after it went.
#[derive(Debug, Clone, PartialEq, Eq)]
#[must_use]
pub struct Mutated<T> {
    pub value: T,
    pub refetch: StoreResult<()>,
}

impl<T> Mutated<T> {
    /// The written value, or the refetch error if the snapshot is stale.
    pub fn into_result(self) -> StoreResult<T> {
        self.refetch.map(|()| self.value)
    }
}

/// A view-model with a single fetch path.
#[async_trait]
pub trait Screen: Send + Sync {
    type Snapshot: Send + Sync;

    fn sync_state(&self) -> &SyncState<Self::Snapshot>;

    fn set_sync_state(&mut self, state: SyncState<Self::Snapshot>);

    /// The read used on activation and after every mutation.
    async fn fetch<S>(&self, store: &S) -> StoreResult<Self::Snapshot>
    where
        S: NotesStore + ?Sized;

    /// `Loading`, then `Ready` or `Error` depending on the fetch.
    async fn activate<S>(&mut self, store: &S) -> StoreResult<()>
    where
        S: NotesStore + ?Sized,
    {
        self.set_sync_state(SyncState::Loading);
        match self.fetch(store).await {
            Ok(snapshot) => {
                self.set_sync_state(SyncState::Ready(snapshot));
                Ok(())
            }
            Err(err) => {
                tracing::warn!(error = %err, "screen fetch failed");
                self.set_sync_state(SyncState::Error(err.clone()));
                Err(err)
            }
        }
    }

    /// Await `mutation`; on success refetch and return its value alongside the
    /// refetch outcome. On failure move to `Error` without fetching.
    async fn refresh_after<S, T, F>(
        &mut self,
        store: &S,
        mutation: F,
    ) -> StoreResult<Mutated<T>>
    where
        S: NotesStore + ?Sized,
        T: Send,
        F: Future<Output = StoreResult<T>> + Send,
    {
        self.set_sync_state(SyncState::Loading);
        match mutation.await {
            Ok(value) => {
                let refetch = self.activate(store).await;
                Ok(Mutated { value, refetch })
            }
            Err(err) => {
                tracing::warn!(error = %err, "screen mutation failed");
                self.set_sync_state(SyncState::Error(err.clone()));
                Err(err)
            }
        }
    }
}
