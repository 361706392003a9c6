//! Error types for store operations

use serde::{Deserialize, Serialize};
use std::fmt;
use thiserror::Error;

/// Resource addressed by a failed request.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ResourceKind {
    Patient,
    Note,
}

impl fmt::Display for ResourceKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ResourceKind::Patient => f.write_str("Patient"),
            ResourceKind::Note => f.write_str("Note"),
        }
    }
}

/// Failure of a single store round trip.
///
/// View-model states hold this by value, so it stays `Clone + PartialEq`
/// and never wraps transport errors directly.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum StoreError {
    #[error("{resource} not found with id {id}")]
    NotFound { resource: ResourceKind, id: i64 },

    #[error("Validation failed: {message}")]
    Validation { message: String },

    #[error("Remote error{}: {message}", http_suffix(.status))]
    Remote { status: Option<u16>, message: String },
}

impl StoreError {
    pub fn not_found(resource: ResourceKind, id: impl Into<i64>) -> Self {
        Self::NotFound {
            resource,
            id: id.into(),
        }
    }

    pub fn validation(message: impl Into<String>) -> Self {
        Self::Validation {
            message: message.into(),
        }
    }

    pub fn remote(status: Option<u16>, message: impl Into<String>) -> Self {
        Self::Remote {
            status,
            message: message.into(),
        }
    }

    pub fn is_not_found(&self) -> bool {
        matches!(self, Self::NotFound { .. })
    }
}

fn http_suffix(status: &Option<u16>) -> String {
    status.map(|s| format!(" (HTTP {s})")).unwrap_or_default()
}

/// Result type for store operations.
pub type StoreResult<T> = Result<T, StoreError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_not_found_message_names_resource_and_id() {
        let err = StoreError::not_found(ResourceKind::Patient, 42);
        assert_eq!(err.to_string(), "Patient not found with id 42");
        assert!(err.is_not_found());
    }

    #[test]
    fn test_remote_message_includes_status_when_known() {
        let err = StoreError::remote(Some(500), "boom");
        assert_eq!(err.to_string(), "Remote error (HTTP 500): boom");
        let err = StoreError::remote(None, "connection refused");
        assert_eq!(err.to_string(), "Remote error: connection refused");
    }
}
