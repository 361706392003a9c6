//! Verse Test Utilities
//!
//! Shared test infrastructure for the Verse workspace:
//! - `MockStore`, an in-memory `NotesStore` with the remote store's semantics
//! - an axum server exposing the store's HTTP contract over a `MockStore`
//! - fixtures and proptest generators

pub mod fixtures;
pub mod generators;
pub mod mock_store;
pub mod server;

pub use fixtures::{jane_doe, john_smith, note, patient};
pub use generators::{arb_gender, arb_note_content, arb_patient_input, arb_patient_name};
pub use mock_store::{MockStore, StoreOp};
pub use server::{spawn_store_server, StoreServer};
