//! View-model synchronization against the in-memory store.

use proptest::prelude::*;
use verse_client::screens::{
    AllNotesScreen, FormMode, NoteDialog, NoteDialogScreen, PatientDraft, PatientFormScreen,
    PatientListScreen, PatientNotesScreen, Screen, SyncState,
};
use verse_core::{Gender, NoteId, NoteInput, NotesStore, PatientId, ResourceKind, StoreError};
use verse_test_utils::{arb_patient_input, jane_doe, note, patient, MockStore, StoreOp};

fn store_with_patient_five() -> MockStore {
    let store = MockStore::new();
    store.seed_patient(patient(5, "Existing Patient"));
    store
}

#[tokio::test]
async fn activation_moves_idle_to_ready() {
    let store = MockStore::new();
    store.create_patient(&jane_doe()).await.unwrap();
    let mut screen = PatientListScreen::new();
    assert_eq!(screen.sync_state(), &SyncState::Idle);

    screen.activate(&store).await.unwrap();

    let patients = screen.sync_state().snapshot().unwrap();
    assert_eq!(patients.len(), 1);
    assert_eq!(patients[0].name, "Jane Doe");
}

#[tokio::test]
async fn activation_failure_moves_to_error() {
    let store = MockStore::new();
    store.fail_next(StoreError::remote(None, "offline"));
    let mut screen = AllNotesScreen::new();

    let err = screen.activate(&store).await.unwrap_err();

    assert_eq!(screen.sync_state(), &SyncState::Error(err));
}

#[tokio::test]
async fn next_activation_recovers_from_error() {
    let store = MockStore::new();
    store.fail_next(StoreError::remote(None, "offline"));
    let mut screen = PatientListScreen::new();
    assert!(screen.activate(&store).await.is_err());

    screen.activate(&store).await.unwrap();

    assert!(screen.sync_state().is_ready());
}

#[tokio::test]
async fn repeated_activation_yields_identical_snapshots() {
    let store = store_with_patient_five();
    store.seed_note(note(1, 5, "a"));
    let mut screen = PatientNotesScreen::new(PatientId::new(5));

    screen.activate(&store).await.unwrap();
    let first = screen.sync_state().clone();
    screen.activate(&store).await.unwrap();

    assert_eq!(screen.sync_state(), &first);
}

#[tokio::test]
async fn patient_notes_for_unknown_patient_is_not_found() {
    let store = MockStore::new();
    let mut screen = PatientNotesScreen::new(PatientId::new(31));

    screen.activate(&store).await.unwrap_err();

    assert_eq!(
        screen.sync_state().error(),
        Some(&StoreError::not_found(ResourceKind::Patient, 31))
    );
}

#[tokio::test]
async fn add_note_refetches_and_clears_composer() {
    let store = store_with_patient_five();
    let mut screen = PatientNotesScreen::new(PatientId::new(5));
    screen.activate(&store).await.unwrap();
    store.clear_calls();

    screen.new_note = "Follow-up in 2 weeks".to_string();
    let created = screen.add_note(&store).await.unwrap().unwrap();

    assert!(screen.new_note.is_empty());
    assert_eq!(created.patient_id, PatientId::new(5));
    assert_eq!(screen.notes(), &[created.clone()]);
    assert_eq!(
        store.calls(),
        vec![StoreOp::CreateNote, StoreOp::GetPatient, StoreOp::ListPatientNotes]
    );

    let mut all = AllNotesScreen::new();
    all.activate(&store).await.unwrap();
    assert!(all
        .notes()
        .iter()
        .any(|n| n.content == "Follow-up in 2 weeks" && n.patient_id == PatientId::new(5)));
}

#[tokio::test]
async fn blank_composer_makes_no_store_call() {
    let store = store_with_patient_five();
    let mut screen = PatientNotesScreen::new(PatientId::new(5));
    screen.activate(&store).await.unwrap();
    store.clear_calls();

    screen.new_note = "  \n ".to_string();
    assert_eq!(screen.add_note(&store).await.unwrap(), None);

    assert!(store.calls().is_empty());
    assert!(screen.sync_state().is_ready());
}

#[tokio::test]
async fn composer_content_is_sent_untrimmed() {
    let store = store_with_patient_five();
    let mut screen = PatientNotesScreen::new(PatientId::new(5));
    screen.activate(&store).await.unwrap();

    screen.new_note = "  padded  ".to_string();
    let created = screen.add_note(&store).await.unwrap().unwrap();

    assert_eq!(created.content, "  padded  ");
}

#[tokio::test]
async fn failed_mutation_skips_refetch_and_keeps_composer() {
    let store = store_with_patient_five();
    let mut screen = PatientNotesScreen::new(PatientId::new(5));
    screen.activate(&store).await.unwrap();
    store.clear_calls();
    store.fail_next(StoreError::remote(Some(500), "write failed"));

    screen.new_note = "lost?".to_string();
    let err = screen.add_note(&store).await.unwrap_err();

    assert_eq!(screen.sync_state(), &SyncState::Error(err));
    assert_eq!(store.calls(), vec![StoreOp::CreateNote]);
    assert_eq!(screen.new_note, "lost?");
}

#[tokio::test]
async fn save_edit_updates_and_closes_dialog() {
    let store = store_with_patient_five();
    store.seed_note(note(1, 5, "before"));
    let mut screen = AllNotesScreen::new();
    screen.activate(&store).await.unwrap();

    let target = screen.find(NoteId::new(1)).cloned().unwrap();
    screen.dialog_mut().begin_edit(&target);
    *screen.dialog_mut().edit_content_mut().unwrap() = "after".to_string();
    screen.save_edit(&store).await.unwrap();

    assert_eq!(screen.dialog(), &NoteDialog::Closed);
    let refetched = screen.find(NoteId::new(1)).unwrap();
    assert_eq!(refetched.content, "after");
    assert_eq!(refetched.created_at, target.created_at);
    assert_eq!(refetched.patient_id, target.patient_id);
}

#[tokio::test]
async fn failed_save_keeps_editor_open() {
    let store = store_with_patient_five();
    store.seed_note(note(1, 5, "before"));
    let mut screen = AllNotesScreen::new();
    screen.activate(&store).await.unwrap();

    let target = screen.find(NoteId::new(1)).cloned().unwrap();
    screen.dialog_mut().begin_edit(&target);
    *screen.dialog_mut().edit_content_mut().unwrap() = "after".to_string();
    store.fail_next(StoreError::remote(Some(502), "bad gateway"));

    assert!(screen.save_edit(&store).await.is_err());
    assert_eq!(screen.dialog().editing().unwrap().content, "after");
    assert!(screen.sync_state().error().is_some());
}

#[tokio::test]
async fn save_without_edit_is_noop() {
    let store = MockStore::new();
    let mut screen = AllNotesScreen::new();
    screen.activate(&store).await.unwrap();
    store.clear_calls();

    assert_eq!(screen.save_edit(&store).await.unwrap(), None);
    assert!(store.calls().is_empty());
}

#[tokio::test]
async fn second_edit_wins_after_refetch() {
    let store = store_with_patient_five();
    store.seed_note(note(1, 5, "v0"));
    let mut screen = PatientNotesScreen::new(PatientId::new(5));
    screen.activate(&store).await.unwrap();

    for content in ["first", "second"] {
        let current = screen.find(NoteId::new(1)).cloned().unwrap();
        screen.dialog_mut().begin_edit(&current);
        *screen.dialog_mut().edit_content_mut().unwrap() = content.to_string();
        screen.save_edit(&store).await.unwrap();
    }

    assert_eq!(screen.find(NoteId::new(1)).unwrap().content, "second");
    assert_eq!(store.call_count(StoreOp::UpdateNote), 2);
    assert_eq!(store.get_note(NoteId::new(1)).await.unwrap().content, "second");
}

#[tokio::test]
async fn same_text_submitted_twice_creates_two_notes() {
    let store = store_with_patient_five();
    let mut screen = PatientNotesScreen::new(PatientId::new(5));
    screen.activate(&store).await.unwrap();

    for _ in 0..2 {
        screen.new_note = "BP recheck".to_string();
        screen.add_note(&store).await.unwrap().unwrap();
    }

    let notes = screen.notes();
    assert_eq!(notes.len(), 2);
    assert!(notes.iter().all(|n| n.content == "BP recheck"));
    assert_ne!(notes[0].id, notes[1].id);
}

#[tokio::test]
async fn created_note_clears_composer_when_refetch_fails() {
    let store = store_with_patient_five();
    let mut screen = PatientNotesScreen::new(PatientId::new(5));
    screen.activate(&store).await.unwrap();
    store.fail_on(StoreOp::GetPatient, StoreError::remote(Some(503), "refetch down"));

    screen.new_note = "Follow-up".to_string();
    let err = screen.add_note(&store).await.unwrap_err();

    assert_eq!(screen.sync_state(), &SyncState::Error(err));
    assert!(screen.new_note.is_empty());
    assert_eq!(store.note_count(), 1);

    assert_eq!(screen.add_note(&store).await.unwrap(), None);
    screen.activate(&store).await.unwrap();
    assert_eq!(screen.notes().len(), 1);
    assert_eq!(store.note_count(), 1);
}

#[tokio::test]
async fn saved_edit_closes_editor_when_refetch_fails() {
    let store = store_with_patient_five();
    store.seed_note(note(1, 5, "before"));
    let mut screen = AllNotesScreen::new();
    screen.activate(&store).await.unwrap();

    let target = screen.find(NoteId::new(1)).cloned().unwrap();
    screen.dialog_mut().begin_edit(&target);
    *screen.dialog_mut().edit_content_mut().unwrap() = "after".to_string();
    store.fail_on(StoreOp::ListAllNotes, StoreError::remote(Some(503), "refetch down"));

    assert!(screen.save_edit(&store).await.is_err());
    assert_eq!(screen.dialog(), &NoteDialog::Closed);
    assert!(screen.sync_state().error().is_some());
    assert_eq!(store.get_note(NoteId::new(1)).await.unwrap().content, "after");

    screen.activate(&store).await.unwrap();
    assert_eq!(screen.find(NoteId::new(1)).unwrap().content, "after");
}

#[tokio::test]
async fn deleted_note_clears_candidate_when_refetch_fails() {
    let store = store_with_patient_five();
    store.seed_note(note(1, 5, "gone"));
    let mut screen = AllNotesScreen::new();
    screen.activate(&store).await.unwrap();
    screen.dialog_mut().request_delete(NoteId::new(1));
    store.fail_on(StoreOp::ListAllNotes, StoreError::remote(Some(503), "refetch down"));

    assert!(screen.confirm_delete(&store).await.is_err());
    assert_eq!(screen.dialog().delete_candidate(), None);
    assert_eq!(store.note_count(), 0);

    store.clear_calls();
    assert!(!screen.confirm_delete(&store).await.unwrap());
    assert!(store.calls().is_empty());
}

#[tokio::test]
async fn delete_requires_confirmation() {
    let store = store_with_patient_five();
    store.seed_note(note(1, 5, "doomed"));
    let mut screen = PatientNotesScreen::new(PatientId::new(5));
    screen.activate(&store).await.unwrap();

    screen.dialog_mut().request_delete(NoteId::new(1));
    assert_eq!(store.note_count(), 1);

    assert!(screen.confirm_delete(&store).await.unwrap());
    assert!(screen.notes().is_empty());
    assert_eq!(screen.dialog(), &NoteDialog::Closed);

    let mut all = AllNotesScreen::new();
    all.activate(&store).await.unwrap();
    assert!(all.find(NoteId::new(1)).is_none());
}

#[tokio::test]
async fn cancel_delete_leaves_snapshot_untouched() {
    let store = store_with_patient_five();
    store.seed_note(note(1, 5, "kept"));
    let mut screen = AllNotesScreen::new();
    screen.activate(&store).await.unwrap();
    let before = screen.sync_state().clone();
    store.clear_calls();

    screen.dialog_mut().request_delete(NoteId::new(1));
    screen.dialog_mut().cancel();

    assert!(!screen.confirm_delete(&store).await.unwrap());
    assert_eq!(screen.sync_state(), &before);
    assert!(store.calls().is_empty());
}

#[tokio::test]
async fn note_with_id_zero_can_be_deleted() {
    let store = MockStore::with_first_ids(0, 0);
    let owner = store.create_patient(&jane_doe()).await.unwrap();
    let zero = store
        .create_note(owner.id, &NoteInput::new("id zero"))
        .await
        .unwrap();
    assert_eq!(zero.id, NoteId::new(0));

    let mut screen = AllNotesScreen::new();
    screen.activate(&store).await.unwrap();
    screen.dialog_mut().request_delete(zero.id);

    assert!(screen.confirm_delete(&store).await.unwrap());
    assert!(screen.notes().is_empty());
}

#[tokio::test]
async fn failed_delete_keeps_candidate_for_retry() {
    let store = store_with_patient_five();
    store.seed_note(note(2, 5, "sticky"));
    let mut screen = AllNotesScreen::new();
    screen.activate(&store).await.unwrap();
    screen.dialog_mut().request_delete(NoteId::new(2));
    store.fail_next(StoreError::remote(Some(500), "nope"));

    assert!(screen.confirm_delete(&store).await.is_err());
    assert_eq!(screen.dialog().delete_candidate(), Some(NoteId::new(2)));

    assert!(screen.confirm_delete(&store).await.unwrap());
    assert!(screen.notes().is_empty());
}

#[tokio::test]
async fn form_create_submits_and_lists() {
    let store = MockStore::new();
    let mut form = PatientFormScreen::new(FormMode::Create);
    form.load(&store).await.unwrap();
    assert_eq!(form.sync_state(), &SyncState::Ready(None));
    assert!(store.calls().is_empty());

    form.draft = PatientDraft {
        name: "Jane Doe".to_string(),
        date_of_birth: "1990-01-01".to_string(),
        gender: Some(Gender::Female),
    };
    let saved = form.submit(&store).await.unwrap();
    assert_eq!(saved.to_input(), jane_doe());
    assert_eq!(form.mode(), FormMode::Edit(saved.id));

    let mut list = PatientListScreen::new();
    list.activate(&store).await.unwrap();
    assert!(list.visible().iter().any(|p| p.id == saved.id));
}

#[tokio::test]
async fn form_edit_seeds_draft_from_store() {
    let store = store_with_patient_five();
    let mut form = PatientFormScreen::new(FormMode::Edit(PatientId::new(5)));

    form.load(&store).await.unwrap();

    assert_eq!(form.draft.name, "Existing Patient");
    assert_eq!(form.draft.date_of_birth, "1980-02-14");
    assert_eq!(form.draft.gender, Some(Gender::Other));
}

#[tokio::test]
async fn invalid_draft_never_reaches_store() {
    let store = MockStore::new();
    let mut form = PatientFormScreen::new(FormMode::Create);
    form.load(&store).await.unwrap();
    form.draft.name = "Nameless".to_string();

    let err = form.submit(&store).await.unwrap_err();

    assert!(matches!(err, StoreError::Validation { .. }));
    assert_eq!(store.call_count(StoreOp::CreatePatient), 0);
    assert!(form.sync_state().is_ready());
}

#[tokio::test]
async fn failed_submit_keeps_draft() {
    let store = store_with_patient_five();
    let mut form = PatientFormScreen::new(FormMode::Edit(PatientId::new(5)));
    form.load(&store).await.unwrap();
    form.draft.name = "Renamed".to_string();
    store.fail_next(StoreError::remote(Some(500), "db down"));

    assert!(form.submit(&store).await.is_err());

    assert_eq!(form.draft.name, "Renamed");
    assert!(form.sync_state().error().is_some());
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(32))]

    #[test]
    fn submitted_patient_reads_back_unchanged(input in arb_patient_input()) {
        let runtime = tokio::runtime::Builder::new_current_thread().build().unwrap();
        runtime.block_on(async {
            let store = MockStore::new();
            let mut form = PatientFormScreen::new(FormMode::Create);
            form.load(&store).await.unwrap();
            form.draft = PatientDraft {
                name: input.name.clone(),
                date_of_birth: input.date_of_birth.to_string(),
                gender: Some(input.gender),
            };
            let saved = form.submit(&store).await.unwrap();
            let fetched = store.get_patient(saved.id).await.unwrap();
            assert_eq!(fetched.name, input.name.trim());
            assert_eq!(fetched.date_of_birth, input.date_of_birth);
            assert_eq!(fetched.gender, input.gender);
        });
    }
}
