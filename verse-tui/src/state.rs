//! Application state and view state definitions.

use crate::keys::{Action, KeyContext};
use crate::nav::{Route, View};
use crate::notifications::{Notification, NotificationLevel};
use crate::persistence::PersistedState;
use crate::theme::ClinicTheme;
use chrono::Utc;
use verse_client::screens::{
    AllNotesScreen, FormField, FormMode, NoteDialogScreen, PatientFormScreen, PatientListScreen,
    PatientNotesScreen, Screen,
};
use verse_core::{Gender, Note, NoteId, NotesStore, Patient, PatientId, StoreError, StoreResult};

/// Cap on retained notifications; older ones are dropped first.
const MAX_NOTIFICATIONS: usize = 50;

#[derive(Debug, Clone, Default)]
pub struct PatientsViewState {
    pub screen: PatientListScreen,
    pub selected: Option<PatientId>,
    pub searching: bool,
    /// Patient awaiting delete confirmation.
    pub pending_delete: Option<PatientId>,
}

impl PatientsViewState {
    pub fn selected_patient(&self) -> Option<&Patient> {
        let id = self.selected?;
        self.screen.visible().into_iter().find(|p| p.id == id)
    }
}

#[derive(Debug, Clone, Default)]
pub struct AllNotesViewState {
    pub screen: AllNotesScreen,
    pub selected: Option<NoteId>,
}

impl AllNotesViewState {
    pub fn selected_note(&self) -> Option<&Note> {
        self.screen.find(self.selected?)
    }
}

#[derive(Debug, Clone)]
pub struct PatientNotesViewState {
    pub screen: PatientNotesScreen,
    pub selected: Option<NoteId>,
    pub composing: bool,
}

impl PatientNotesViewState {
    pub fn new(patient_id: PatientId) -> Self {
        Self {
            screen: PatientNotesScreen::new(patient_id),
            selected: None,
            composing: false,
        }
    }

    pub fn selected_note(&self) -> Option<&Note> {
        self.screen.find(self.selected?)
    }
}

pub struct App<S> {
    pub store: S,
    pub theme: ClinicTheme,
    pub active_view: View,

    pub patients: PatientsViewState,
    pub all_notes: AllNotesViewState,
    /// Opened from either top-level view; closed with Esc.
    pub patient_notes: Option<PatientNotesViewState>,
    /// Drawn over whatever screen opened it.
    pub form: Option<PatientFormScreen>,

    pub notifications: Vec<Notification>,
    /// Set by the event loop while an action awaits the store.
    pub in_flight: bool,
}

impl<S> App<S> {
    pub fn new(store: S, theme: ClinicTheme) -> Self {
        Self {
            store,
            theme,
            active_view: View::Patients,
            patients: PatientsViewState::default(),
            all_notes: AllNotesViewState::default(),
            patient_notes: None,
            form: None,
            notifications: Vec::new(),
            in_flight: false,
        }
    }

    pub fn route(&self) -> Route {
        if self.form.is_some() {
            Route::PatientForm
        } else if self.patient_notes.is_some() {
            Route::PatientNotes
        } else {
            self.active_view.into()
        }
    }

    pub fn key_context(&self) -> KeyContext {
        match self.route() {
            Route::PatientForm => KeyContext::SingleLine,
            Route::PatientNotes => match &self.patient_notes {
                Some(view) if view.composing || view.screen.dialog().editing().is_some() => {
                    KeyContext::MultiLine
                }
                _ => KeyContext::Normal,
            },
            Route::AllNotes if self.all_notes.screen.dialog().editing().is_some() => {
                KeyContext::MultiLine
            }
            Route::Patients if self.patients.searching => KeyContext::SingleLine,
            Route::AllNotes | Route::Patients => KeyContext::Normal,
        }
    }

    pub fn title(&self) -> String {
        match self.route() {
            Route::Patients => View::Patients.title().to_string(),
            Route::AllNotes => View::AllNotes.title().to_string(),
            Route::PatientNotes => {
                let name = self
                    .patient_notes
                    .as_ref()
                    .and_then(|view| view.screen.patient())
                    .map(|p| p.name.clone());
                match name {
                    Some(name) => format!("Notes for {name}"),
                    None => "Patient Notes".to_string(),
                }
            }
            Route::PatientForm => self
                .form
                .as_ref()
                .map(|form| form.title())
                .unwrap_or("Patient")
                .to_string(),
        }
    }

    /// Sync label of the focused screen, or `Loading` while a call runs.
    pub fn sync_label(&self) -> &'static str {
        if self.in_flight {
            return "Loading";
        }
        match self.route() {
            Route::Patients => self.patients.screen.sync_state().label(),
            Route::AllNotes => self.all_notes.screen.sync_state().label(),
            Route::PatientNotes => self
                .patient_notes
                .as_ref()
                .map(|view| view.screen.sync_state().label())
                .unwrap_or("Idle"),
            Route::PatientForm => self
                .form
                .as_ref()
                .map(|form| form.sync_state().label())
                .unwrap_or("Idle"),
        }
    }

    pub fn notify(&mut self, level: NotificationLevel, message: impl Into<String>) {
        self.notifications.push(Notification::new(level, message));
        if self.notifications.len() > MAX_NOTIFICATIONS {
            let excess = self.notifications.len() - MAX_NOTIFICATIONS;
            self.notifications.drain(..excess);
        }
    }

    /// Latest notification still within its display window.
    pub fn current_notification(&self) -> Option<&Notification> {
        let now = Utc::now();
        self.notifications.last().filter(|n| !n.is_expired(now))
    }

    pub fn prune_notifications(&mut self) {
        let now = Utc::now();
        self.notifications.retain(|n| !n.is_expired(now));
    }

    pub fn persisted_state(&self) -> PersistedState {
        PersistedState {
            active_view: self.active_view,
        }
    }

    fn report_error(&mut self, err: &StoreError) {
        tracing::warn!(error = %err, route = ?self.route(), "action failed");
        self.notify(NotificationLevel::Error, err.to_string());
    }

    fn report<T>(&mut self, result: StoreResult<T>) -> Option<T> {
        match result {
            Ok(value) => Some(value),
            Err(err) => {
                self.report_error(&err);
                None
            }
        }
    }

    fn report_outcome(&mut self, outcome: StoreResult<Option<&'static str>>) {
        if let Some(Some(message)) = self.report(outcome) {
            self.notify(NotificationLevel::Success, message);
        }
    }

    /// Keep each list's selection when it still exists, else select the first row.
    fn sync_selection(&mut self) {
        let ids: Vec<PatientId> = self.patients.screen.visible().iter().map(|p| p.id).collect();
        keep_or_first(&ids, &mut self.patients.selected);
        let ids = note_ids(self.all_notes.screen.notes());
        keep_or_first(&ids, &mut self.all_notes.selected);
        if let Some(view) = self.patient_notes.as_mut() {
            let ids = note_ids(view.screen.notes());
            keep_or_first(&ids, &mut view.selected);
        }
    }
}

impl<S: NotesStore> App<S> {
    /// Apply one key action. Returns `true` when the app should exit.
    pub async fn apply(&mut self, action: Action) -> bool {
        tracing::debug!(?action, route = ?self.route(), "key action");
        if action == Action::Quit {
            return true;
        }
        match self.route() {
            Route::PatientForm => self.apply_form(action).await,
            Route::PatientNotes => self.apply_patient_notes(action).await,
            Route::AllNotes => self.apply_all_notes(action).await,
            Route::Patients => self.apply_patients(action).await,
        }
        false
    }

    /// Refetch the focused screen.
    pub async fn refresh(&mut self) {
        let result = match self.route() {
            Route::Patients => self.patients.screen.activate(&self.store).await,
            Route::AllNotes => self.all_notes.screen.activate(&self.store).await,
            Route::PatientNotes => match self.patient_notes.as_mut() {
                Some(view) => view.screen.activate(&self.store).await,
                None => Ok(()),
            },
            Route::PatientForm => match self.form.as_mut() {
                Some(form) => form.load(&self.store).await,
                None => Ok(()),
            },
        };
        self.sync_selection();
        self.report(result);
    }

    pub async fn switch_view(&mut self, view: View) {
        self.active_view = view;
        self.patient_notes = None;
        self.form = None;
        self.refresh().await;
    }

    pub async fn open_patient(&mut self, patient_id: PatientId) {
        self.patient_notes = Some(PatientNotesViewState::new(patient_id));
        self.refresh().await;
    }

    pub async fn open_form(&mut self, mode: FormMode) {
        self.form = Some(PatientFormScreen::new(mode));
        self.refresh().await;
    }

    /// Handle top-level view switching; `false` when `action` is not one.
    async fn apply_navigation(&mut self, action: Action) -> bool {
        let target = match action {
            Action::NextView => self.active_view.next(),
            Action::PrevView => self.active_view.previous(),
            Action::SwitchView(index) => match View::from_index(index) {
                Some(view) => view,
                None => return true,
            },
            _ => return false,
        };
        self.switch_view(target).await;
        true
    }

    async fn apply_patients(&mut self, action: Action) {
        if self.patients.searching {
            self.apply_search(action);
            return;
        }
        if let Some(candidate) = self.patients.pending_delete {
            match action {
                Action::Yes | Action::Confirm => self.delete_patient(candidate).await,
                Action::Cancel => self.patients.pending_delete = None,
                _ => {}
            }
            return;
        }
        if self.apply_navigation(action).await {
            return;
        }
        let ids: Vec<PatientId> = self.patients.screen.visible().iter().map(|p| p.id).collect();
        match action {
            Action::MoveDown => select_next_id(&ids, &mut self.patients.selected),
            Action::MoveUp => select_prev_id(&ids, &mut self.patients.selected),
            Action::Confirm => {
                if let Some(id) = self.patients.selected {
                    self.open_patient(id).await;
                }
            }
            Action::NewItem => self.open_form(FormMode::Create).await,
            Action::EditItem => {
                if let Some(id) = self.patients.selected {
                    self.open_form(FormMode::Edit(id)).await;
                }
            }
            Action::DeleteItem => self.patients.pending_delete = self.patients.selected,
            Action::OpenSearch => self.patients.searching = true,
            Action::Refresh => self.refresh().await,
            Action::Cancel if !self.patients.screen.search.is_empty() => {
                self.patients.screen.search.clear();
                self.sync_selection();
            }
            _ => {}
        }
    }

    fn apply_search(&mut self, action: Action) {
        let search = &mut self.patients.screen.search;
        match action {
            Action::Insert(c) => search.push(c),
            Action::Backspace => {
                search.pop();
            }
            Action::Submit => self.patients.searching = false,
            Action::Cancel => {
                search.clear();
                self.patients.searching = false;
            }
            _ => return,
        }
        self.sync_selection();
    }

    async fn delete_patient(&mut self, id: PatientId) {
        let result = self
            .patients
            .screen
            .refresh_after(&self.store, self.store.delete_patient(id))
            .await
            .and_then(|mutated| {
                self.patients.pending_delete = None;
                tracing::info!(patient_id = %id, "patient deleted");
                mutated.into_result()
            });
        self.sync_selection();
        self.report_outcome(result.map(|()| Some("Patient deleted")));
    }

    async fn apply_all_notes(&mut self, action: Action) {
        if let Some(outcome) =
            drive_note_dialog(&mut self.all_notes.screen, &self.store, action).await
        {
            self.sync_selection();
            self.report_outcome(outcome);
            return;
        }
        if self.apply_navigation(action).await {
            return;
        }
        let ids = note_ids(self.all_notes.screen.notes());
        match action {
            Action::MoveDown => select_next_id(&ids, &mut self.all_notes.selected),
            Action::MoveUp => select_prev_id(&ids, &mut self.all_notes.selected),
            Action::EditItem => {
                if let Some(note) = self.all_notes.selected_note().cloned() {
                    self.all_notes.screen.dialog_mut().begin_edit(&note);
                }
            }
            Action::DeleteItem => {
                if let Some(id) = self.all_notes.selected {
                    self.all_notes.screen.dialog_mut().request_delete(id);
                }
            }
            Action::Confirm => {
                if let Some(patient_id) = self.all_notes.selected_note().map(|n| n.patient_id) {
                    self.open_patient(patient_id).await;
                }
            }
            Action::Refresh => self.refresh().await,
            _ => {}
        }
    }

    async fn apply_patient_notes(&mut self, action: Action) {
        let Some(view) = self.patient_notes.as_mut() else {
            return;
        };

        if view.composing {
            match action {
                Action::Insert(c) => view.screen.new_note.push(c),
                Action::Newline => view.screen.new_note.push('\n'),
                Action::Backspace => {
                    view.screen.new_note.pop();
                }
                Action::Submit => {
                    let result = view.screen.add_note(&self.store).await;
                    match result {
                        Ok(Some(_)) => {
                            view.composing = false;
                            self.sync_selection();
                            self.notify(NotificationLevel::Success, "Note added");
                        }
                        Ok(None) => self.notify(NotificationLevel::Warning, "Note is empty"),
                        Err(err) => {
                            // An emptied composer means the note was created.
                            if view.screen.new_note.is_empty() {
                                view.composing = false;
                            }
                            self.report_error(&err);
                        }
                    }
                }
                Action::Cancel => {
                    view.composing = false;
                    view.screen.new_note.clear();
                }
                _ => {}
            }
            return;
        }

        if let Some(outcome) = drive_note_dialog(&mut view.screen, &self.store, action).await {
            self.sync_selection();
            self.report_outcome(outcome);
            return;
        }
        if self.apply_navigation(action).await {
            return;
        }

        let Some(view) = self.patient_notes.as_mut() else {
            return;
        };
        let ids = note_ids(view.screen.notes());
        match action {
            Action::MoveDown => select_next_id(&ids, &mut view.selected),
            Action::MoveUp => select_prev_id(&ids, &mut view.selected),
            Action::NewItem => view.composing = true,
            Action::EditItem => {
                if let Some(note) = view.selected_note().cloned() {
                    view.screen.dialog_mut().begin_edit(&note);
                }
            }
            Action::DeleteItem => {
                if let Some(id) = view.selected {
                    view.screen.dialog_mut().request_delete(id);
                }
            }
            Action::Refresh => self.refresh().await,
            Action::Cancel => {
                self.patient_notes = None;
                self.refresh().await;
            }
            _ => {}
        }
    }

    async fn apply_form(&mut self, action: Action) {
        let Some(form) = self.form.as_mut() else {
            return;
        };
        match action {
            Action::Insert(c) => match form.focus {
                FormField::Gender => match c.to_ascii_lowercase() {
                    'm' => form.draft.gender = Some(Gender::Male),
                    'f' => form.draft.gender = Some(Gender::Female),
                    'o' => form.draft.gender = Some(Gender::Other),
                    ' ' => form.draft.cycle_gender(),
                    _ => {}
                },
                field => {
                    if let Some(text) = form.draft.text_mut(field) {
                        text.push(c);
                    }
                }
            },
            Action::Backspace => {
                let field = form.focus;
                if let Some(text) = form.draft.text_mut(field) {
                    text.pop();
                }
            }
            Action::NextField => form.focus = form.focus.next(),
            Action::Submit => self.submit_form().await,
            Action::Cancel => self.form = None,
            _ => {}
        }
    }

    async fn submit_form(&mut self) {
        let Some(form) = self.form.as_mut() else {
            return;
        };
        match form.submit(&self.store).await {
            Ok(patient) => {
                self.form = None;
                if self.patient_notes.is_none() {
                    self.patients.selected = Some(patient.id);
                }
                self.notify(
                    NotificationLevel::Success,
                    format!("Saved patient {}", patient.name),
                );
                self.refresh().await;
            }
            Err(err) => self.report_error(&err),
        }
    }
}

/// Route `action` to an open note dialog.
///
/// `None` when no dialog is open and the action is left for the screen.
/// Otherwise the outcome carries a success message for completed writes.
async fn drive_note_dialog<N, S>(
    screen: &mut N,
    store: &S,
    action: Action,
) -> Option<StoreResult<Option<&'static str>>>
where
    N: NoteDialogScreen,
    S: NotesStore + ?Sized,
{
    if screen.dialog().editing().is_some() {
        let outcome = match action {
            Action::Submit => screen
                .save_edit(store)
                .await
                .map(|saved| saved.map(|_| "Note updated")),
            Action::Cancel => {
                screen.dialog_mut().cancel();
                Ok(None)
            }
            other => {
                if let Some(content) = screen.dialog_mut().edit_content_mut() {
                    match other {
                        Action::Insert(c) => content.push(c),
                        Action::Newline => content.push('\n'),
                        Action::Backspace => {
                            content.pop();
                        }
                        _ => {}
                    }
                }
                Ok(None)
            }
        };
        return Some(outcome);
    }

    if screen.dialog().delete_candidate().is_some() {
        let outcome = match action {
            Action::Yes | Action::Confirm => screen
                .confirm_delete(store)
                .await
                .map(|deleted| deleted.then_some("Note deleted")),
            Action::Cancel => {
                screen.dialog_mut().cancel();
                Ok(None)
            }
            _ => Ok(None),
        };
        return Some(outcome);
    }

    None
}

fn note_ids(notes: &[Note]) -> Vec<NoteId> {
    notes.iter().map(|n| n.id).collect()
}

fn keep_or_first<I: Copy + PartialEq>(ids: &[I], selected: &mut Option<I>) {
    if !selected.is_some_and(|id| ids.contains(&id)) {
        *selected = ids.first().copied();
    }
}

fn select_next_id<I: Copy + PartialEq>(ids: &[I], selected: &mut Option<I>) {
    if ids.is_empty() {
        *selected = None;
        return;
    }
    let next = selected
        .and_then(|id| ids.iter().position(|item| *item == id))
        .map_or(0, |index| (index + 1) % ids.len());
    *selected = Some(ids[next]);
}

fn select_prev_id<I: Copy + PartialEq>(ids: &[I], selected: &mut Option<I>) {
    if ids.is_empty() {
        *selected = None;
        return;
    }
    let index = selected
        .and_then(|id| ids.iter().position(|item| *item == id))
        .unwrap_or(0);
    let prev = if index == 0 { ids.len() - 1 } else { index - 1 };
    *selected = Some(ids[prev]);
}
