//! Create or edit a patient.

use super::{Screen, SyncState};
use async_trait::async_trait;
use chrono::NaiveDate;
use verse_core::{Gender, NotesStore, Patient, PatientId, PatientInput, StoreError, StoreResult};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FormMode {
    Create,
    Edit(PatientId),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FormField {
    Name,
    DateOfBirth,
    Gender,
}

impl FormField {
    pub fn next(self) -> Self {
        match self {
            FormField::Name => FormField::DateOfBirth,
            FormField::DateOfBirth => FormField::Gender,
            FormField::Gender => FormField::Name,
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            FormField::Name => "Name",
            FormField::DateOfBirth => "Date of Birth",
            FormField::Gender => "Gender",
        }
    }
}

/// Form contents as typed; validated only on submit.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PatientDraft {
    pub name: String,
    /// `YYYY-MM-DD`
    pub date_of_birth: String,
    pub gender: Option<Gender>,
}

impl PatientDraft {
    pub fn from_patient(patient: &Patient) -> Self {
        Self {
            name: patient.name.clone(),
            date_of_birth: patient.date_of_birth.format("%Y-%m-%d").to_string(),
            gender: Some(patient.gender),
        }
    }

    pub fn to_input(&self) -> StoreResult<PatientInput> {
        let name = self.name.trim();
        if name.is_empty() {
            return Err(StoreError::validation("name is required"));
        }
        let date_of_birth = NaiveDate::parse_from_str(self.date_of_birth.trim(), "%Y-%m-%d")
            .map_err(|_| StoreError::validation("date_of_birth must be YYYY-MM-DD"))?;
        let gender = self
            .gender
            .ok_or_else(|| StoreError::validation("gender is required"))?;
        Ok(PatientInput {
            name: name.to_string(),
            date_of_birth,
            gender,
        })
    }

    /// Step through the gender choices, starting from none.
    pub fn cycle_gender(&mut self) {
        self.gender = match self.gender {
            None => Some(Gender::Male),
            Some(Gender::Male) => Some(Gender::Female),
            Some(Gender::Female) => Some(Gender::Other),
            Some(Gender::Other) => Some(Gender::Male),
        };
    }

    pub fn text_mut(&mut self, field: FormField) -> Option<&mut String> {
        match field {
            FormField::Name => Some(&mut self.name),
            FormField::DateOfBirth => Some(&mut self.date_of_birth),
            FormField::Gender => None,
        }
    }
}

#[derive(Debug, Clone)]
pub struct PatientFormScreen {
    mode: FormMode,
    /// Stored record under edit; absent in create mode.
    state: SyncState<Option<Patient>>,
    pub draft: PatientDraft,
    pub focus: FormField,
}

impl PatientFormScreen {
    pub fn new(mode: FormMode) -> Self {
        Self {
            mode,
            state: SyncState::Idle,
            draft: PatientDraft::default(),
            focus: FormField::Name,
        }
    }

    pub fn mode(&self) -> FormMode {
        self.mode
    }

    pub fn title(&self) -> &'static str {
        match self.mode {
            FormMode::Create => "New Patient",
            FormMode::Edit(_) => "Edit Patient",
        }
    }

    /// Activate, then seed the draft from the stored record in edit mode.
    pub async fn load<S>(&mut self, store: &S) -> StoreResult<()>
    where
        S: NotesStore + ?Sized,
    {
        self.activate(store).await?;
        if let Some(Some(patient)) = self.state.snapshot() {
            self.draft = PatientDraft::from_patient(patient);
        }
        Ok(())
    }

    /// Validate the draft and write it.
    ///
    /// An invalid draft fails before any store call and leaves the sync
    /// state alone. A failed write keeps the draft.
    pub async fn submit<S>(&mut self, store: &S) -> StoreResult<Patient>
    where
        S: NotesStore + ?Sized,
    {
        let input = self.draft.to_input()?;
        self.state = SyncState::Loading;
        let result = match self.mode {
            FormMode::Create => store.create_patient(&input).await,
            FormMode::Edit(id) => store.update_patient(id, &input).await,
        };
        match result {
            Ok(patient) => {
                tracing::info!(patient_id = %patient.id, "patient saved");
                self.mode = FormMode::Edit(patient.id);
                self.draft = PatientDraft::from_patient(&patient);
                self.state = SyncState::Ready(Some(patient.clone()));
                Ok(patient)
            }
            Err(err) => {
                self.state = SyncState::Error(err.clone());
                Err(err)
            }
        }
    }
}

#[async_trait]
impl Screen for PatientFormScreen {
    type Snapshot = Option<Patient>;

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
        match self.mode {
            FormMode::Create => Ok(None),
            FormMode::Edit(id) => store.get_patient(id).await.map(Some),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn valid_draft() -> PatientDraft {
        PatientDraft {
            name: "  Jane Doe ".to_string(),
            date_of_birth: "1990-01-01".to_string(),
            gender: Some(Gender::Female),
        }
    }

    #[test]
    fn test_valid_draft_trims_name() {
        let input = valid_draft().to_input().unwrap();
        assert_eq!(input.name, "Jane Doe");
        assert_eq!(input.date_of_birth, NaiveDate::from_ymd_opt(1990, 1, 1).unwrap());
    }

    #[test]
    fn test_blank_name_rejected() {
        let draft = PatientDraft {
            name: "   ".to_string(),
            ..valid_draft()
        };
        assert!(matches!(draft.to_input(), Err(StoreError::Validation { .. })));
    }

    #[test]
    fn test_bad_date_rejected() {
        let draft = PatientDraft {
            date_of_birth: "01/01/1990".to_string(),
            ..valid_draft()
        };
        assert!(matches!(draft.to_input(), Err(StoreError::Validation { .. })));
    }

    #[test]
    fn test_missing_gender_rejected() {
        let draft = PatientDraft {
            gender: None,
            ..valid_draft()
        };
        assert!(draft.to_input().is_err());
    }

    #[test]
    fn test_cycle_gender_wraps() {
        let mut draft = PatientDraft::default();
        draft.cycle_gender();
        assert_eq!(draft.gender, Some(Gender::Male));
        draft.cycle_gender();
        draft.cycle_gender();
        draft.cycle_gender();
        assert_eq!(draft.gender, Some(Gender::Male));
    }

    #[test]
    fn test_focus_cycles_through_fields() {
        assert_eq!(FormField::Gender.next(), FormField::Name);
        assert!(PatientDraft::default().text_mut(FormField::Gender).is_none());
    }
}
