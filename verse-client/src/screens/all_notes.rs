//! Every note in the store, across patients.

use super::{NoteDialog, NoteDialogScreen, Screen, SyncState};
use async_trait::async_trait;
use verse_core::{Note, NoteId, NotesStore, StoreResult};

#[derive(Debug, Clone, Default)]
pub struct AllNotesScreen {
    state: SyncState<Vec<Note>>,
    dialog: NoteDialog,
}

impl AllNotesScreen {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn notes(&self) -> &[Note] {
        self.state.snapshot().map(Vec::as_slice).unwrap_or_default()
    }

    pub fn find(&self, id: NoteId) -> Option<&Note> {
        self.notes().iter().find(|n| n.id == id)
    }
}

#[async_trait]
impl Screen for AllNotesScreen {
    type Snapshot = Vec<Note>;

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
        store.list_all_notes().await
    }
}

impl NoteDialogScreen for AllNotesScreen {
    fn dialog(&self) -> &NoteDialog {
        &self.dialog
    }

    fn dialog_mut(&mut self) -> &mut NoteDialog {
        &mut self.dialog
    }
}
