//! Fixtures for common scenarios.

use chrono::{NaiveDate, TimeZone, Utc};
use verse_core::{Gender, Note, NoteId, Patient, PatientId, PatientInput};

pub fn date(year: i32, month: u32, day: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(year, month, day).unwrap_or_default()
}

/// `{name: "Jane Doe", date_of_birth: 1990-01-01, gender: Female}`
pub fn jane_doe() -> PatientInput {
    PatientInput {
        name: "Jane Doe".to_string(),
        date_of_birth: date(1990, 1, 1),
        gender: Gender::Female,
    }
}

pub fn john_smith() -> PatientInput {
    PatientInput {
        name: "John Smith".to_string(),
        date_of_birth: date(1975, 6, 30),
        gender: Gender::Male,
    }
}

pub fn patient(id: i64, name: &str) -> Patient {
    Patient {
        id: PatientId::new(id),
        name: name.to_string(),
        date_of_birth: date(1980, 2, 14),
        gender: Gender::Other,
    }
}

pub fn note(id: i64, patient_id: i64, content: &str) -> Note {
    let created_at = Utc
        .with_ymd_and_hms(2024, 1, 1, 9, 0, 0)
        .single()
        .unwrap_or_default();
    Note {
        id: NoteId::new(id),
        patient_id: PatientId::new(patient_id),
        content: content.to_string(),
        created_at,
        updated_at: Some(created_at),
    }
}
