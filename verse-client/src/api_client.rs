//! REST client for the remote patient/note store.

use crate::config::ClientConfig;
use async_trait::async_trait;
use reqwest::{Method, StatusCode};
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use std::time::Duration;
use verse_core::{
    Note, NoteId, NoteInput, NotesStore, Patient, PatientId, PatientInput, ResourceKind,
    StoreError, StoreResult,
};

#[derive(Debug, thiserror::Error)]
pub enum ClientError {
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),
    #[error("Config error: {0}")]
    Config(String),
}

/// Error body returned by the store on 4xx responses.
#[derive(Debug, Deserialize)]
struct StoreErrorBody {
    error: String,
}

/// Resource named in the request path, used to build `NotFound`.
type Target = (ResourceKind, i64);

#[derive(Clone)]
pub struct RestClient {
    client: reqwest::Client,
    base_url: String,
}

impl RestClient {
    pub fn new(config: &ClientConfig) -> Result<Self, ClientError> {
        let base_url = config.base_url.trim().trim_end_matches('/');
        if base_url.is_empty() {
            return Err(ClientError::Config("base_url must not be empty".to_string()));
        }
        let client = reqwest::Client::builder()
            .timeout(Duration::from_millis(config.request_timeout_ms))
            .build()?;
        Ok(Self {
            client,
            base_url: base_url.to_string(),
        })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    async fn get_json<T>(&self, path: &str, target: Option<Target>) -> StoreResult<T>
    where
        T: DeserializeOwned,
    {
        let (status, text) = self.execute::<()>(Method::GET, path, None, target).await?;
        decode_body(status, &text)
    }

    async fn send_json<T, B>(
        &self,
        method: Method,
        path: &str,
        body: &B,
        target: Option<Target>,
    ) -> StoreResult<T>
    where
        T: DeserializeOwned,
        B: Serialize + Sync + ?Sized,
    {
        let (status, text) = self.execute(method, path, Some(body), target).await?;
        decode_body(status, &text)
    }

    async fn delete(&self, path: &str, target: Option<Target>) -> StoreResult<()> {
        self.execute::<()>(Method::DELETE, path, None, target)
            .await
            .map(|_| ())
    }

    /// Send one request and return the status and body text of a 2xx
    /// response; anything else is mapped onto the store error taxonomy.
    async fn execute<B>(
        &self,
        method: Method,
        path: &str,
        body: Option<&B>,
        target: Option<Target>,
    ) -> StoreResult<(StatusCode, String)>
    where
        B: Serialize + Sync + ?Sized,
    {
        let url = format!("{}{}", self.base_url, path);
        tracing::debug!(method = %method, path, "store request");

        let mut request = self.client.request(method.clone(), url);
        if let Some(body) = body {
            request = request.json(body);
        }

        let result = async {
            let response = request.send().await.map_err(transport_error)?;
            let status = response.status();
            let text = response.text().await.map_err(transport_error)?;
            if status.is_success() {
                Ok((status, text))
            } else {
                Err(map_error_status(status, &text, target))
            }
        }
        .await;

        if let Err(err) = &result {
            tracing::warn!(method = %method, path, error = %err, "store request failed");
        }
        result
    }
}

fn transport_error(err: reqwest::Error) -> StoreError {
    StoreError::remote(err.status().map(|s| s.as_u16()), err.to_string())
}

fn decode_body<T: DeserializeOwned>(status: StatusCode, text: &str) -> StoreResult<T> {
    serde_json::from_str(text).map_err(|e| {
        StoreError::remote(
            Some(status.as_u16()),
            format!("Failed to decode response: {e}"),
        )
    })
}

/// Map a non-2xx response onto `NotFound`, `Validation`, or `Remote`.
fn map_error_status(status: StatusCode, text: &str, target: Option<Target>) -> StoreError {
    let message = serde_json::from_str::<StoreErrorBody>(text)
        .map(|body| body.error)
        .unwrap_or_else(|_| text.trim().to_string());

    match (status, target) {
        (StatusCode::NOT_FOUND, Some((resource, id))) => StoreError::NotFound { resource, id },
        (StatusCode::BAD_REQUEST | StatusCode::UNPROCESSABLE_ENTITY, _) => {
            StoreError::Validation { message }
        }
        _ => {
            let message = if message.is_empty() {
                format!("HTTP {}", status.as_u16())
            } else {
                message
            };
            StoreError::remote(Some(status.as_u16()), message)
        }
    }
}

fn patient_target(id: PatientId) -> Option<Target> {
    Some((ResourceKind::Patient, id.get()))
}

fn note_target(id: NoteId) -> Option<Target> {
    Some((ResourceKind::Note, id.get()))
}

#[async_trait]
impl NotesStore for RestClient {
    async fn list_patients(&self) -> StoreResult<Vec<Patient>> {
        self.get_json("/patients", None).await
    }

    async fn get_patient(&self, id: PatientId) -> StoreResult<Patient> {
        let path = format!("/patients/{id}");
        self.get_json(&path, patient_target(id)).await
    }

    async fn create_patient(&self, input: &PatientInput) -> StoreResult<Patient> {
        self.send_json(Method::POST, "/patients", input, None).await
    }

    async fn update_patient(&self, id: PatientId, input: &PatientInput) -> StoreResult<Patient> {
        let path = format!("/patients/{id}");
        self.send_json(Method::PUT, &path, input, patient_target(id))
            .await
    }

    async fn delete_patient(&self, id: PatientId) -> StoreResult<()> {
        let path = format!("/patients/{id}");
        self.delete(&path, patient_target(id)).await
    }

    async fn list_all_notes(&self) -> StoreResult<Vec<Note>> {
        self.get_json("/notes", None).await
    }

    async fn get_note(&self, id: NoteId) -> StoreResult<Note> {
        let path = format!("/notes/{id}");
        self.get_json(&path, note_target(id)).await
    }

    async fn list_patient_notes(&self, patient_id: PatientId) -> StoreResult<Vec<Note>> {
        let path = format!("/patients/{patient_id}/notes");
        self.get_json(&path, patient_target(patient_id)).await
    }

    async fn create_note(&self, patient_id: PatientId, input: &NoteInput) -> StoreResult<Note> {
        let path = format!("/patients/{patient_id}/notes");
        self.send_json(Method::POST, &path, input, patient_target(patient_id))
            .await
    }

    async fn update_note(&self, id: NoteId, input: &NoteInput) -> StoreResult<Note> {
        let path = format!("/notes/{id}");
        self.send_json(Method::PUT, &path, input, note_target(id))
            .await
    }

    async fn delete_note(&self, id: NoteId) -> StoreResult<()> {
        let path = format!("/notes/{id}");
        self.delete(&path, note_target(id)).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_trims_trailing_slash() {
        let client = RestClient::new(&ClientConfig::new("http://localhost:3000/")).unwrap();
        assert_eq!(client.base_url(), "http://localhost:3000");
    }

    #[test]
    fn test_new_rejects_empty_base_url() {
        assert!(matches!(
            RestClient::new(&ClientConfig::new("  ")),
            Err(ClientError::Config(_))
        ));
    }

    #[test]
    fn test_not_found_uses_request_target() {
        let err = map_error_status(
            StatusCode::NOT_FOUND,
            r#"{"error":"Patient not found"}"#,
            Some((ResourceKind::Patient, 0)),
        );
        assert_eq!(err, StoreError::not_found(ResourceKind::Patient, 0));
    }

    #[test]
    fn test_not_found_without_target_is_remote() {
        let err = map_error_status(StatusCode::NOT_FOUND, "", None);
        assert_eq!(err, StoreError::remote(Some(404), "HTTP 404"));
    }

    #[test]
    fn test_bad_request_carries_store_message() {
        let err = map_error_status(
            StatusCode::BAD_REQUEST,
            r#"{"error":"Failed to create patient"}"#,
            None,
        );
        assert_eq!(err, StoreError::validation("Failed to create patient"));
    }

    #[test]
    fn test_server_error_falls_back_to_raw_body() {
        let err = map_error_status(StatusCode::BAD_GATEWAY, "upstream down\n", None);
        assert_eq!(err, StoreError::remote(Some(502), "upstream down"));
    }

    #[test]
    fn test_decode_failure_is_remote_with_status() {
        let err = decode_body::<Vec<Patient>>(StatusCode::OK, "<html>").unwrap_err();
        assert!(matches!(err, StoreError::Remote { status: Some(200), .. }));
    }
}
