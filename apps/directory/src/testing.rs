//! Test doubles: an in-process axum backend for the HTTP clients, and
//! in-memory fakes of the store and parser seams for the workflows.

use std::collections::BTreeMap;
use std::net::SocketAddr;
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use axum::{
    extract::{Multipart, Path, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::{get, post},
    Json, Router,
};
use serde_json::{json, Value};
use tokio::sync::Notify;
use url::Url;

use crate::cv_client::{CvParseError, CvParser};
use crate::models::{ParsedCv, Profile};
use crate::store::{ProfileStore, StoreError};

pub fn profile(email: &str, name: &str) -> Profile {
    Profile {
        email: email.to_string(),
        name: name.to_string(),
        ..Default::default()
    }
}

// ────────────────────────────────────────────────────────────────────────────
// Mock HTTP backend
// ────────────────────────────────────────────────────────────────────────────

#[derive(Default)]
struct Backend {
    profiles: Mutex<BTreeMap<String, Profile>>,
    failing: bool,
    last_text_file_name: Mutex<Option<String>>,
    last_upload: Mutex<Option<(String, usize)>>,
}

type Shared = Arc<Backend>;

pub struct MockBackend {
    addr: SocketAddr,
    state: Shared,
}

impl MockBackend {
    pub async fn start(profiles: Vec<Profile>) -> Self {
        let backend = Backend {
            profiles: Mutex::new(profiles.into_iter().map(|p| (p.email.clone(), p)).collect()),
            ..Default::default()
        };
        Self::serve(backend).await
    }

    /// Every route answers 500 with an `{ error }` body.
    pub async fn start_failing() -> Self {
        Self::serve(Backend {
            failing: true,
            ..Default::default()
        })
        .await
    }

    async fn serve(backend: Backend) -> Self {
        let state: Shared = Arc::new(backend);
        let app = Router::new()
            .route("/api/Profile", get(list_profiles).post(save_profile))
            .route("/api/Profile/:email", get(get_profile))
            .route("/api/CvParser/parse-text", post(parse_text))
            .route("/api/CvParser/parse-file", post(parse_file))
            .with_state(state.clone());

        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        tokio::spawn(async move {
            axum::serve(listener, app).await.unwrap();
        });
        Self { addr, state }
    }

    pub fn api_url(&self) -> Url {
        Url::parse(&format!("http://{}/api", self.addr)).unwrap()
    }

    pub fn last_text_file_name(&self) -> Option<String> {
        self.state.last_text_file_name.lock().unwrap().clone()
    }

    pub fn last_upload(&self) -> Option<(String, usize)> {
        self.state.last_upload.lock().unwrap().clone()
    }
}

fn unavailable() -> Response {
    (
        StatusCode::INTERNAL_SERVER_ERROR,
        Json(json!({ "error": "backend unavailable" })),
    )
        .into_response()
}

async fn list_profiles(State(state): State<Shared>) -> Response {
    if state.failing {
        return unavailable();
    }
    let profiles: Vec<Profile> = state.profiles.lock().unwrap().values().cloned().collect();
    Json(profiles).into_response()
}

async fn get_profile(State(state): State<Shared>, Path(email): Path<String>) -> Response {
    if state.failing {
        return unavailable();
    }
    match state.profiles.lock().unwrap().get(&email) {
        Some(p) => Json(p.clone()).into_response(),
        None => StatusCode::NOT_FOUND.into_response(),
    }
}

async fn save_profile(State(state): State<Shared>, Json(profile): Json<Profile>) -> Response {
    if state.failing {
        return unavailable();
    }
    state
        .profiles
        .lock()
        .unwrap()
        .insert(profile.email.clone(), profile);
    StatusCode::OK.into_response()
}

/// Echoes the first line of the text back as the full name.
async fn parse_text(State(state): State<Shared>, Json(body): Json<Value>) -> Response {
    if state.failing {
        return unavailable();
    }
    *state.last_text_file_name.lock().unwrap() =
        body["fileName"].as_str().map(str::to_string);
    let text = body["cvText"].as_str().unwrap_or_default();
    let name = text.lines().next().unwrap_or_default().trim();
    Json(json!({ "fullName": name })).into_response()
}

/// Echoes the first line of the uploaded file back as the full name.
async fn parse_file(State(state): State<Shared>, mut multipart: Multipart) -> Response {
    if state.failing {
        return unavailable();
    }
    while let Ok(Some(field)) = multipart.next_field().await {
        if field.name() != Some("file") {
            continue;
        }
        let file_name = field.file_name().unwrap_or_default().to_string();
        let bytes = field.bytes().await.unwrap_or_default();
        if bytes.is_empty() {
            return (
                StatusCode::BAD_REQUEST,
                Json(json!({ "error": "No file uploaded" })),
            )
                .into_response();
        }
        *state.last_upload.lock().unwrap() = Some((file_name, bytes.len()));
        let text = String::from_utf8_lossy(&bytes);
        let name = text.lines().next().unwrap_or_default().trim().to_string();
        return Json(json!({ "fullName": name })).into_response();
    }
    (
        StatusCode::BAD_REQUEST,
        Json(json!({ "error": "No file uploaded" })),
    )
        .into_response()
}

// ────────────────────────────────────────────────────────────────────────────
// In-memory fakes
// ────────────────────────────────────────────────────────────────────────────

#[derive(Default)]
pub struct FakeStore {
    pub profiles: Mutex<BTreeMap<String, Profile>>,
    pub fail_reads: AtomicBool,
    pub fail_writes: AtomicBool,
    pub lookups: AtomicUsize,
    pub upserts: AtomicUsize,
}

impl FakeStore {
    pub fn with(profiles: Vec<Profile>) -> Arc<Self> {
        let store = Self::default();
        *store.profiles.lock().unwrap() =
            profiles.into_iter().map(|p| (p.email.clone(), p)).collect();
        Arc::new(store)
    }

    pub fn stored(&self, email: &str) -> Option<Profile> {
        self.profiles.lock().unwrap().get(email).cloned()
    }

    fn unavailable() -> StoreError {
        StoreError::Status { status: 503 }
    }
}

#[async_trait]
impl ProfileStore for FakeStore {
    async fn fetch_all(&self) -> Result<Vec<Profile>, StoreError> {
        if self.fail_reads.load(Ordering::SeqCst) {
            return Err(Self::unavailable());
        }
        Ok(self.profiles.lock().unwrap().values().cloned().collect())
    }

    async fn get_by_email(&self, email: &str) -> Result<Option<Profile>, StoreError> {
        self.lookups.fetch_add(1, Ordering::SeqCst);
        if self.fail_reads.load(Ordering::SeqCst) {
            return Err(Self::unavailable());
        }
        Ok(self.stored(email))
    }

    async fn upsert(&self, profile: &Profile) -> Result<(), StoreError> {
        self.upserts.fetch_add(1, Ordering::SeqCst);
        if self.fail_writes.load(Ordering::SeqCst) {
            return Err(Self::unavailable());
        }
        self.profiles
            .lock()
            .unwrap()
            .insert(profile.email.clone(), profile.clone());
        Ok(())
    }
}

/// Parser that answers with a canned response, optionally held until released.
#[derive(Default)]
pub struct FakeParser {
    pub response: Mutex<Option<ParsedCv>>,
    pub gate: Option<Arc<Notify>>,
    pub calls: AtomicUsize,
    pub last_file: Mutex<Option<(String, String, usize)>>,
}

impl FakeParser {
    pub fn answering(parsed: ParsedCv) -> Arc<Self> {
        Arc::new(Self {
            response: Mutex::new(Some(parsed)),
            ..Default::default()
        })
    }

    pub fn failing() -> Arc<Self> {
        Arc::new(Self::default())
    }

    pub fn gated(parsed: ParsedCv, gate: Arc<Notify>) -> Arc<Self> {
        Arc::new(Self {
            response: Mutex::new(Some(parsed)),
            gate: Some(gate),
            ..Default::default()
        })
    }

    async fn answer(&self) -> Result<ParsedCv, CvParseError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        if let Some(gate) = &self.gate {
            gate.notified().await;
        }
        self.response
            .lock()
            .unwrap()
            .clone()
            .ok_or(CvParseError::Api {
                status: 500,
                message: "Parsing failed".to_string(),
            })
    }
}

#[async_trait]
impl CvParser for FakeParser {
    async fn parse_text(&self, _text: &str) -> Result<ParsedCv, CvParseError> {
        self.answer().await
    }

    async fn parse_file(
        &self,
        file_name: &str,
        mime: &str,
        bytes: Vec<u8>,
    ) -> Result<ParsedCv, CvParseError> {
        *self.last_file.lock().unwrap() =
            Some((file_name.to_string(), mime.to_string(), bytes.len()));
        self.answer().await
    }
}
