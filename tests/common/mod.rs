// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

use axum::body::Body;
use axum::http::{header, Request, Response};
use devatlas_api::config::Config;
use devatlas_api::db::{CatalogDb, MemoryStore};
use devatlas_api::middleware::auth::create_jwt;
use devatlas_api::models::User;
use devatlas_api::routes::create_router;
use devatlas_api::services::UploadStore;
use devatlas_api::AppState;
use std::sync::Arc;
use tempfile::TempDir;

/// Check if emulator is available via environment variable.
#[allow(dead_code)]
pub fn emulator_available() -> bool {
    std::env::var("FIRESTORE_EMULATOR_HOST").is_ok()
}

/// Skip test with message if emulator not available.
#[macro_export]
macro_rules! require_emulator {
    () => {
        if !crate::common::emulator_available() {
            eprintln!("⚠️  Skipping: FIRESTORE_EMULATOR_HOST not set");
            return;
        }
    };
}

/// Create a test database connection against the emulator.
#[allow(dead_code)]
pub async fn test_db() -> CatalogDb {
    CatalogDb::new("test-project", "(default)")
        .await
        .expect("Failed to connect to Firestore emulator")
}

/// Test app backed by the in-memory store and a temporary upload root.
///
/// Keep the returned `TempDir` alive for the duration of the test.
#[allow(dead_code)]
pub fn create_test_app() -> (axum::Router, Arc<AppState>, TempDir) {
    create_test_app_with_config(Config::test_default())
}

/// Like [`create_test_app`], starting from `config`; the upload root is replaced.
#[allow(dead_code)]
pub fn create_test_app_with_config(config: Config) -> (axum::Router, Arc<AppState>, TempDir) {
    let uploads_dir = tempfile::tempdir().expect("Failed to create temp dir");

    let config = Config {
        uploads_dir: uploads_dir.path().to_path_buf(),
        ..config
    };
    let uploads = UploadStore::new(&config.uploads_dir);

    let state = Arc::new(AppState {
        config,
        db: CatalogDb::new_in_memory(),
        uploads,
    });

    (create_router(state.clone()), state, uploads_dir)
}

/// The in-memory store behind a test app.
#[allow(dead_code)]
pub fn memory_store(state: &AppState) -> &MemoryStore {
    match &state.db {
        CatalogDb::Memory(store) => store,
        CatalogDb::Firestore(_) => panic!("test app should use the in-memory store"),
    }
}

/// A valid session token for a fixture user.
#[allow(dead_code)]
pub fn test_token(config: &Config) -> String {
    let user = User {
        id: "test-user".to_string(),
        firstname: "Test".to_string(),
        lastname: "User".to_string(),
        email: "test@example.com".to_string(),
        password_hash: String::new(),
        created_at: "2026-01-01T00:00:00Z".to_string(),
    };
    create_jwt(&user, config).expect("Failed to create JWT")
}

/// Build a JSON request, optionally with a bearer token.
#[allow(dead_code)]
pub fn json_request(
    method: &str,
    uri: &str,
    body: serde_json::Value,
    token: Option<&str>,
) -> Request<Body> {
    let mut builder = Request::builder()
        .method(method)
        .uri(uri)
        .header(header::CONTENT_TYPE, "application/json");
    if let Some(token) = token {
        builder = builder.header(header::AUTHORIZATION, format!("Bearer {}", token));
    }
    builder.body(Body::from(body.to_string())).unwrap()
}

/// Read a response body as bytes.
#[allow(dead_code)]
pub async fn body_bytes(response: Response<Body>) -> Vec<u8> {
    axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap()
        .to_vec()
}

/// Read a response body as JSON.
#[allow(dead_code)]
pub async fn body_json(response: Response<Body>) -> serde_json::Value {
    serde_json::from_slice(&body_bytes(response).await).expect("response should be JSON")
}

/// Minimal multipart/form-data body builder.
#[allow(dead_code)]
pub struct MultipartForm {
    boundary: String,
    body: Vec<u8>,
}

#[allow(dead_code)]
impl MultipartForm {
    pub fn new() -> Self {
        Self {
            boundary: "devatlas-test-boundary-7MA4YWxkTrZu0gW".to_string(),
            body: Vec::new(),
        }
    }

    pub fn text(mut self, name: &str, value: &str) -> Self {
        self.body.extend_from_slice(
            format!(
                "--{}\r\nContent-Disposition: form-data; name=\"{}\"\r\n\r\n{}\r\n",
                self.boundary, name, value
            )
            .as_bytes(),
        );
        self
    }

    pub fn file(mut self, name: &str, filename: &str, bytes: &[u8]) -> Self {
        self.body.extend_from_slice(
            format!(
                "--{}\r\nContent-Disposition: form-data; name=\"{}\"; filename=\"{}\"\r\n\
                 Content-Type: application/octet-stream\r\n\r\n",
                self.boundary, name, filename
            )
            .as_bytes(),
        );
        self.body.extend_from_slice(bytes);
        self.body.extend_from_slice(b"\r\n");
        self
    }

    pub fn into_request(mut self, uri: &str, token: Option<&str>) -> Request<Body> {
        self.body
            .extend_from_slice(format!("--{}--\r\n", self.boundary).as_bytes());

        let mut builder = Request::builder().method("POST").uri(uri).header(
            header::CONTENT_TYPE,
            format!("multipart/form-data; boundary={}", self.boundary),
        );
        if let Some(token) = token {
            builder = builder.header(header::AUTHORIZATION, format!("Bearer {}", token));
        }
        builder.body(Body::from(self.body)).unwrap()
    }
}
