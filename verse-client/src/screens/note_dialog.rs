//! Edit and delete dialogs shared by the note screens.

use super::Screen;
use async_trait::async_trait;
use verse_core::{Note, NoteId, NoteInput, NotesStore, StoreResult};

/// Provisional content for the note being edited.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NoteDraft {
    pub note_id: NoteId,
    pub content: String,
}

/// Dialog sub-state, held apart from the fetched snapshot.
///
/// A delete candidate exists exactly when the dialog is `ConfirmDelete`,
/// whatever the id's value.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum NoteDialog {
    #[default]
    Closed,
    Editing(NoteDraft),
    ConfirmDelete {
        candidate: NoteId,
    },
}

impl NoteDialog {
    /// Open the editor seeded with the note's current content.
    pub fn begin_edit(&mut self, note: &Note) {
        *self = NoteDialog::Editing(NoteDraft {
            note_id: note.id,
            content: note.content.clone(),
        });
    }

    pub fn request_delete(&mut self, candidate: NoteId) {
        *self = NoteDialog::ConfirmDelete { candidate };
    }

    pub fn cancel(&mut self) {
        *self = NoteDialog::Closed;
    }

    pub fn is_open(&self) -> bool {
        !matches!(self, NoteDialog::Closed)
    }

    pub fn editing(&self) -> Option<&NoteDraft> {
        match self {
            NoteDialog::Editing(draft) => Some(draft),
            _ => None,
        }
    }

    pub fn edit_content_mut(&mut self) -> Option<&mut String> {
        match self {
            NoteDialog::Editing(draft) => Some(&mut draft.content),
            _ => None,
        }
    }

    pub fn delete_candidate(&self) -> Option<NoteId> {
        match self {
            NoteDialog::ConfirmDelete { candidate } => Some(*candidate),
            _ => None,
        }
    }
}

/// Edit-save and confirm-delete flows for screens listing notes.
#[async_trait]
pub trait NoteDialogScreen: Screen {
    fn dialog(&self) -> &NoteDialog;

    fn dialog_mut(&mut self) -> &mut NoteDialog;

    /// Write the draft and refetch. The editor closes once the write lands,
    /// even if the refetch fails; returns `None` when no edit is in progress.
    async fn save_edit<S>(&mut self, store: &S) -> StoreResult<Option<Note>>
    where
        S: NotesStore + ?Sized,
    {
        let Some(draft) = self.dialog().editing().cloned() else {
            return Ok(None);
        };
        let input = NoteInput::new(draft.content);
        let mutated = self
            .refresh_after(store, store.update_note(draft.note_id, &input))
            .await?;
        self.dialog_mut().cancel();
        mutated.into_result().map(Some)
    }

    /// Delete the staged candidate and refetch. The dialog closes once the
    /// delete lands; returns `false` when nothing was staged.
    async fn confirm_delete<S>(&mut self, store: &S) -> StoreResult<bool>
    where
        S: NotesStore + ?Sized,
    {
        let Some(candidate) = self.dialog().delete_candidate() else {
            return Ok(false);
        };
        let mutated = self
            .refresh_after(store, store.delete_note(candidate))
            .await?;
        self.dialog_mut().cancel();
        mutated.into_result().map(|()| true)
    }
}
