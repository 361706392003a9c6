//! HTTP store double.
//!
//! Serves the store contract over a `MockStore` on an ephemeral local port:
//!
//! | Method | Path                    | Success          |
//! |--------|-------------------------|------------------|
//! | GET    | `/patients`             | 200 `[Patient]`  |
//! | GET    | `/patients/{id}`        | 200 `Patient`    |
//! | POST   | `/patients`             | 201 `Patient`    |
//! | PUT    | `/patients/{id}`        | 200 `Patient`    |
//! | DELETE | `/patients/{id}`        | 204              |
//! | GET    | `/notes`                | 200 `[Note]`     |
//! | GET    | `/notes/{id}`           | 200 `Note`       |
//! | GET    | `/patients/{id}/notes`  | 200 `[Note]`     |
//! | POST   | `/patients/{id}/notes`  | 201 `Note`       |
//! | PUT    | `/notes/{id}`           | 200 `Note`       |
//! | DELETE | `/notes/{id}`           | 204              |
//!
//! Failures use the store's `{"error": "..."}` body with 404 or 400.

use crate::mock_store::MockStore;
use axum::{
    extract::{rejection::JsonRejection, Path, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::get,
    Json, Router,
};
use serde_json::json;
use std::net::SocketAddr;
use tokio::net::TcpListener;
use tokio::task::JoinHandle;
use verse_core::{
    NoteId, NoteInput, NotesStore, PatientId, PatientInput, ResourceKind, StoreError,
};

/// Running server; aborted on drop.
pub struct StoreServer {
    pub addr: SocketAddr,
    pub base_url: String,
    pub store: MockStore,
    handle: JoinHandle<()>,
}

impl Drop for StoreServer {
    fn drop(&mut self) {
        self.handle.abort();
    }
}

/// Bind `127.0.0.1:0` and serve `store` in a background task.
pub async fn spawn_store_server(store: MockStore) -> std::io::Result<StoreServer> {
    let listener = TcpListener::bind("127.0.0.1:0").await?;
    let addr = listener.local_addr()?;
    let app = router(store.clone());
    let handle = tokio::spawn(async move {
        if let Err(err) = axum::serve(listener, app).await {
            tracing::error!(error = %err, "store server stopped");
        }
    });
    Ok(StoreServer {
        addr,
        base_url: format!("http://{addr}"),
        store,
        handle,
    })
}

pub fn router(store: MockStore) -> Router {
    Router::new()
        .route("/patients", get(list_patients).post(create_patient))
        .route(
            "/patients/:id",
            get(get_patient).put(update_patient).delete(delete_patient),
        )
        .route("/patients/:id/notes", get(list_patient_notes).post(create_note))
        .route("/notes", get(list_all_notes))
        .route("/notes/:id", get(get_note).put(update_note).delete(delete_note))
        .with_state(store)
}

struct ServerError(StatusCode, String);

impl From<StoreError> for ServerError {
    fn from(err: StoreError) -> Self {
        match err {
            StoreError::NotFound { resource, .. } => {
                ServerError(StatusCode::NOT_FOUND, format!("{resource} not found"))
            }
            StoreError::Validation { message } => ServerError(StatusCode::BAD_REQUEST, message),
            StoreError::Remote { status, message } => ServerError(
                status
                    .and_then(|s| StatusCode::from_u16(s).ok())
                    .unwrap_or(StatusCode::INTERNAL_SERVER_ERROR),
                message,
            ),
        }
    }
}

impl From<JsonRejection> for ServerError {
    fn from(rejection: JsonRejection) -> Self {
        ServerError(StatusCode::BAD_REQUEST, rejection.body_text())
    }
}

impl IntoResponse for ServerError {
    fn into_response(self) -> Response {
        (self.0, Json(json!({ "error": self.1 }))).into_response()
    }
}

type ServerResult<T> = Result<T, ServerError>;

/// Unparseable ids behave like unknown ids.
fn parse_id(raw: &str, resource: ResourceKind) -> ServerResult<i64> {
    raw.trim()
        .parse::<i64>()
        .map_err(|_| ServerError(StatusCode::NOT_FOUND, format!("{resource} not found")))
}

async fn list_patients(State(store): State<MockStore>) -> ServerResult<impl IntoResponse> {
    Ok(Json(store.list_patients().await?))
}

async fn get_patient(
    State(store): State<MockStore>,
    Path(id): Path<String>,
) -> ServerResult<impl IntoResponse> {
    let id = PatientId::new(parse_id(&id, ResourceKind::Patient)?);
    Ok(Json(store.get_patient(id).await?))
}

async fn create_patient(
    State(store): State<MockStore>,
    body: Result<Json<PatientInput>, JsonRejection>,
) -> ServerResult<impl IntoResponse> {
    let Json(input) = body?;
    let patient = store.create_patient(&input).await?;
    Ok((StatusCode::CREATED, Json(patient)))
}

async fn update_patient(
    State(store): State<MockStore>,
    Path(id): Path<String>,
    body: Result<Json<PatientInput>, JsonRejection>,
) -> ServerResult<impl IntoResponse> {
    let id = PatientId::new(parse_id(&id, ResourceKind::Patient)?);
    let Json(input) = body?;
    Ok(Json(store.update_patient(id, &input).await?))
}

async fn delete_patient(
    State(store): State<MockStore>,
    Path(id): Path<String>,
) -> ServerResult<impl IntoResponse> {
    let id = PatientId::new(parse_id(&id, ResourceKind::Patient)?);
    store.delete_patient(id).await?;
    Ok(StatusCode::NO_CONTENT)
}

async fn list_all_notes(State(store): State<MockStore>) -> ServerResult<impl IntoResponse> {
    Ok(Json(store.list_all_notes().await?))
}

async fn get_note(
    State(store): State<MockStore>,
    Path(id): Path<String>,
) -> ServerResult<impl IntoResponse> {
    let id = NoteId::new(parse_id(&id, ResourceKind::Note)?);
    Ok(Json(store.get_note(id).await?))
}

async fn list_patient_notes(
    State(store): State<MockStore>,
    Path(id): Path<String>,
) -> ServerResult<impl IntoResponse> {
    let id = PatientId::new(parse_id(&id, ResourceKind::Patient)?);
    Ok(Json(store.list_patient_notes(id).await?))
}

async fn create_note(
    State(store): State<MockStore>,
    Path(id): Path<String>,
    body: Result<Json<NoteInput>, JsonRejection>,
) -> ServerResult<impl IntoResponse> {
    let id = PatientId::new(parse_id(&id, ResourceKind::Patient)?);
    let Json(input) = body?;
    let note = store.create_note(id, &input).await?;
    Ok((StatusCode::CREATED, Json(note)))
}

async fn update_note(
    State(store): State<MockStore>,
    Path(id): Path<String>,
    body: Result<Json<NoteInput>, JsonRejection>,
) -> ServerResult<impl IntoResponse> {
    let id = NoteId::new(parse_id(&id, ResourceKind::Note)?);
    let Json(input) = body?;
    Ok(Json(store.update_note(id, &input).await?))
}

async fn delete_note(
    State(store): State<MockStore>,
    Path(id): Path<String>,
) -> ServerResult<impl IntoResponse> {
    let id = NoteId::new(parse_id(&id, ResourceKind::Note)?);
    store.delete_note(id).await?;
    Ok(StatusCode::NO_CONTENT)
}
