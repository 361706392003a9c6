//! Patient list with local name search.

use super::{Screen, SyncState};
use async_trait::async_trait;
use verse_core::{NotesStore, Patient, StoreResult};

#[derive(Debug, Clone, Default)]
pub struct PatientListScreen {
    state: SyncState<Vec<Patient>>,
    pub search: String,
}

impl PatientListScreen {
    pub fn new() -> Self {
        Self::default()
    }

    /// Patients whose name contains the search term, ignoring case.
    /// Filtering never touches the store.
    pub fn visible(&self) -> Vec<&Patient> {
        let needle = self.search.to_lowercase();
        self.state
            .snapshot()
            .map(|patients| {
                patients
                    .iter()
                    .filter(|p| p.name.to_lowercase().contains(&needle))
                    .collect()
            })
            .unwrap_or_default()
    }
}

#[async_trait]
impl Screen for PatientListScreen {
    type Snapshot = Vec<Patient>;

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
        store.list_patients().await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;
    use proptest::prelude::*;
    use verse_core::{Gender, PatientId};

    fn sample(id: i64, name: &str) -> Patient {
        Patient {
            id: PatientId::new(id),
            name: name.to_string(),
            date_of_birth: NaiveDate::from_ymd_opt(2000, 1, 1).unwrap(),
            gender: Gender::Other,
        }
    }

    fn ready_screen(names: &[&str]) -> PatientListScreen {
        let mut screen = PatientListScreen::new();
        let patients = names
            .iter()
            .enumerate()
            .map(|(i, name)| sample(i as i64, name))
            .collect();
        screen.set_sync_state(SyncState::Ready(patients));
        screen
    }

    #[test]
    fn test_visible_is_empty_before_ready() {
        let mut screen = PatientListScreen::new();
        screen.search = "a".to_string();
        assert!(screen.visible().is_empty());
    }

    #[test]
    fn test_search_ignores_case() {
        let mut screen = ready_screen(&["Jane Doe", "John Smith", "jANET roe"]);
        screen.search = "JAN".to_string();
        let names: Vec<_> = screen.visible().iter().map(|p| p.name.as_str()).collect();
        assert_eq!(names, vec!["Jane Doe", "jANET roe"]);
    }

    proptest! {
        #[test]
        fn empty_search_shows_everything(names in proptest::collection::vec("[A-Za-z ]{1,12}", 0..8)) {
            let refs: Vec<&str> = names.iter().map(String::as_str).collect();
            let screen = ready_screen(&refs);
            prop_assert_eq!(screen.visible().len(), names.len());
        }

        #[test]
        fn visible_patients_always_match(names in proptest::collection::vec("[A-Za-z ]{1,12}", 0..8), term in "[A-Za-z]{0,3}") {
            let refs: Vec<&str> = names.iter().map(String::as_str).collect();
            let mut screen = ready_screen(&refs);
            screen.search = term.clone();
            for patient in screen.visible() {
                prop_assert!(patient.name.to_lowercase().contains(&term.to_lowercase()));
            }
        }
    }
}
