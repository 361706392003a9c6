//! Patient and note records as the store exposes them.

use crate::identity::{deserialize_lenient_patient_id, store_timestamp, NoteId, PatientId, Timestamp};
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Gender category recorded on a patient.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Gender {
    Male,
    Female,
    Other,
}

impl Gender {
    pub const ALL: [Gender; 3] = [Gender::Male, Gender::Female, Gender::Other];

    pub fn as_str(&self) -> &'static str {
        match self {
            Gender::Male => "Male",
            Gender::Female => "Female",
            Gender::Other => "Other",
        }
    }
}

impl fmt::Display for Gender {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Gender {
    type Err = GenderParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "male" => Ok(Gender::Male),
            "female" => Ok(Gender::Female),
            "other" => Ok(Gender::Other),
            _ => Err(GenderParseError(s.to_string())),
        }
    }
}

/// Error when parsing an unknown gender label.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GenderParseError(pub String);

impl fmt::Display for GenderParseError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Invalid gender: {}", self.0)
    }
}

impl std::error::Error for GenderParseError {}

/// Patient demographic record.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Patient {
    pub id: PatientId,
    pub name: String,
    pub date_of_birth: NaiveDate,
    pub gender: Gender,
}

impl Patient {
    /// The editable fields of this record as a request body.
    pub fn to_input(&self) -> PatientInput {
        PatientInput {
            name: self.name.clone(),
            date_of_birth: self.date_of_birth,
            gender: self.gender,
        }
    }
}

/// Body of `POST /patients` and `PUT /patients/{id}`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PatientInput {
    pub name: String,
    pub date_of_birth: NaiveDate,
    pub gender: Gender,
}

/// Free-text note owned by exactly one patient.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Note {
    pub id: NoteId,
    #[serde(deserialize_with = "deserialize_lenient_patient_id")]
    pub patient_id: PatientId,
    pub content: String,
    #[serde(with = "store_timestamp")]
    pub created_at: Timestamp,
    #[serde(default, with = "store_timestamp::option")]
    pub updated_at: Option<Timestamp>,
}

/// Body of `POST /patients/{id}/notes` and `PUT /notes/{id}`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NoteInput {
    pub content: String,
}

impl NoteInput {
    pub fn new(content: impl Into<String>) -> Self {
        Self {
            content: content.into(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn test_patient_decodes_store_body() {
        let body = r#"{"id":3,"name":"Jane Doe","date_of_birth":"1990-01-01","gender":"Female"}"#;
        let patient: Patient = serde_json::from_str(body).unwrap();
        assert_eq!(patient.id, PatientId::new(3));
        assert_eq!(patient.date_of_birth, NaiveDate::from_ymd_opt(1990, 1, 1).unwrap());
        assert_eq!(patient.gender, Gender::Female);
    }

    #[test]
    fn test_patient_input_encodes_date_as_calendar_date() {
        let input = PatientInput {
            name: "Jane Doe".to_string(),
            date_of_birth: NaiveDate::from_ymd_opt(1990, 1, 1).unwrap(),
            gender: Gender::Female,
        };
        let value = serde_json::to_value(&input).unwrap();
        assert_eq!(value["date_of_birth"], "1990-01-01");
        assert_eq!(value["gender"], "Female");
    }

    #[test]
    fn test_unknown_gender_label_fails_decoding() {
        let body = r#"{"id":3,"name":"A","date_of_birth":"1990-01-01","gender":"Robot"}"#;
        assert!(serde_json::from_str::<Patient>(body).is_err());
    }

    #[test]
    fn test_note_accepts_textual_patient_id() {
        let body = r#"{"id":1,"patient_id":"5","content":"Follow-up in 2 weeks",
            "created_at":"2024-01-01T09:00:00.000001","updated_at":"2024-01-01T09:00:00.000001"}"#;
        let note: Note = serde_json::from_str(body).unwrap();
        assert_eq!(note.patient_id, PatientId::new(5));
        assert!(note.updated_at.is_some());
    }

    #[test]
    fn test_note_accepts_numeric_patient_id_without_updated_at() {
        let body = r#"{"id":1,"patient_id":5,"content":"x","created_at":"2024-01-01T09:00:00Z"}"#;
        let note: Note = serde_json::from_str(body).unwrap();
        assert_eq!(note.patient_id, PatientId::new(5));
        assert!(note.updated_at.is_none());
    }

    #[test]
    fn test_note_rejects_non_numeric_patient_id() {
        let body = r#"{"id":1,"patient_id":"five","content":"x","created_at":"2024-01-01T09:00:00Z"}"#;
        assert!(serde_json::from_str::<Note>(body).is_err());
    }

    proptest! {
        #[test]
        fn gender_parse_is_case_insensitive(index in 0usize..3, upper in proptest::bool::ANY) {
            let gender = Gender::ALL[index];
            let label = if upper {
                gender.as_str().to_ascii_uppercase()
            } else {
                gender.as_str().to_ascii_lowercase()
            };
            prop_assert_eq!(label.parse::<Gender>().unwrap(), gender);
        }
    }
}
