//! Navigation and view switching utilities.

use serde::{Deserialize, Serialize};

/// Top-level views reachable with Tab and the digit keys.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum View {
    Patients,
    AllNotes,
}

impl View {
    pub fn title(&self) -> &'static str {
        match self {
            View::Patients => "Patients",
            View::AllNotes => "All Notes",
        }
    }

    pub fn all() -> &'static [View] {
        &[View::Patients, View::AllNotes]
    }

    pub fn index(&self) -> usize {
        Self::all().iter().position(|v| v == self).unwrap_or(0)
    }

    pub fn from_index(index: usize) -> Option<View> {
        Self::all().get(index).copied()
    }

    pub fn next(&self) -> View {
        let all = Self::all();
        all[(self.index() + 1) % all.len()]
    }

    pub fn previous(&self) -> View {
        let all = Self::all();
        let idx = self.index();
        let prev = if idx == 0 { all.len() - 1 } else { idx - 1 };
        all[prev]
    }
}

/// The screen currently receiving input, top-level or nested.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Route {
    Patients,
    AllNotes,
    PatientNotes,
    PatientForm,
}

impl From<View> for Route {
    fn from(view: View) -> Self {
        match view {
            View::Patients => Route::Patients,
            View::AllNotes => Route::AllNotes,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_next_and_previous_wrap() {
        assert_eq!(View::Patients.next(), View::AllNotes);
        assert_eq!(View::AllNotes.next(), View::Patients);
        assert_eq!(View::Patients.previous(), View::AllNotes);
    }

    #[test]
    fn test_from_index_bounds() {
        assert_eq!(View::from_index(1), Some(View::AllNotes));
        assert_eq!(View::from_index(2), None);
    }
}
