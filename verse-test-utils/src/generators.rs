//! Proptest generators for Verse inputs.

use crate::fixtures::date;
use proptest::prelude::*;
use verse_core::{Gender, PatientInput};

pub fn arb_gender() -> impl Strategy<Value = Gender> {
    prop_oneof![Just(Gender::Male), Just(Gender::Female), Just(Gender::Other)]
}

/// Names that are non-empty after trimming.
pub fn arb_patient_name() -> impl Strategy<Value = String> {
    "[A-Za-z][A-Za-z .'-]{0,30}"
}

pub fn arb_patient_input() -> impl Strategy<Value = PatientInput> {
    (arb_patient_name(), 1900i32..2024, 1u32..=12, 1u32..=28, arb_gender()).prop_map(
        |(name, year, month, day, gender)| PatientInput {
            name,
            date_of_birth: date(year, month, day),
            gender,
        },
    )
}

/// Note bodies that are non-empty after trimming.
pub fn arb_note_content() -> impl Strategy<Value = String> {
    "[A-Za-z0-9][ -~]{0,80}"
}
