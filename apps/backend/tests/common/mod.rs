//! Common test utilities for integration tests.
//!
//! This module provides shared test infrastructure including:
//! - TestContext wiring the router to in-memory storage
//! - A local stand-in for the dictionary API
//! - Authentication helpers

#![allow(dead_code)]

pub mod fixtures;

use std::collections::HashSet;
use std::sync::Arc;
use std::time::Duration;

use axum::{
    extract::{Path, State},
    http::{header::AUTHORIZATION, HeaderValue, StatusCode},
    routing::get,
    Json, Router,
};
use axum_test::{TestRequest, TestServer};
use uuid::Uuid;

use wordplay_backend::config::DictionaryConfig;
use wordplay_backend::models::PlayerRegisterResponse;
use wordplay_backend::services::dictionary::DictionaryClient;
use wordplay_backend::services::storage::Storage;
use wordplay_backend::{build_router, AppState};

/// Words the mock dictionary knows.
pub const KNOWN_WORDS: &[&str] = &[
    "cat", "tiger", "rabbit", "tomato", "orange", "eagle", "elephant", "apple", "river", "tunnel",
];

/// Word for which the mock dictionary always answers 500.
pub const FLAKY_WORD: &str = "tornado";

/// Test context containing app state and test server.
pub struct TestContext {
    pub state: AppState,
    pub server: TestServer,
    pub dictionary_url: String,
}

impl TestContext {
    /// Create a context with in-memory storage and a local dictionary.
    pub async fn new() -> Self {
        let dictionary_url = spawn_mock_dictionary(KNOWN_WORDS).await;
        let state = AppState::new(Storage::memory(), dictionary_client(&dictionary_url));
        let server = TestServer::new(build_router(state.clone())).expect("Failed to build test server");

        Self {
            state,
            server,
            dictionary_url,
        }
    }

    /// Register a player and return its ID and token.
    pub async fn register(&self, name: Option<&str>) -> (Uuid, String) {
        let response = self
            .server
            .post("/api/players/register")
            .json(&serde_json::json!({ "name": name }))
            .await;
        response.assert_status_ok();
        let body: PlayerRegisterResponse = response.json();
        (body.player_id, body.token)
    }

    /// GET with a bearer token.
    pub fn get(&self, path: &str, token: &str) -> TestRequest {
        self.server.get(path).add_header(AUTHORIZATION, bearer(token))
    }

    /// POST with a bearer token.
    pub fn post(&self, path: &str, token: &str) -> TestRequest {
        self.server.post(path).add_header(AUTHORIZATION, bearer(token))
    }

    /// DELETE with a bearer token.
    pub fn delete(&self, path: &str, token: &str) -> TestRequest {
        self.server.delete(path).add_header(AUTHORIZATION, bearer(token))
    }
}

/// Authorization header value for a token.
pub fn bearer(token: &str) -> HeaderValue {
    HeaderValue::from_str(&format!("Bearer {}", token)).expect("valid header value")
}

/// Dictionary client pointed at `base_url` with quick retries.
pub fn dictionary_client(base_url: &str) -> DictionaryClient {
    DictionaryClient::new(&DictionaryConfig {
        base_url: base_url.to_string(),
        timeout: Duration::from_secs(2),
        retries: 1,
        retry_delay: Duration::from_millis(10),
    })
    .expect("Failed to build dictionary client")
}

/// Serve a minimal dictionary API on a random local port and return its base URL.
pub async fn spawn_mock_dictionary(words: &[&str]) -> String {
    let words: Arc<HashSet<String>> = Arc::new(words.iter().map(|w| w.to_string()).collect());

    let app = Router::new()
        .route("/api/v2/entries/en/:word", get(lookup))
        .with_state(words);

    let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
        .await
        .expect("Failed to bind mock dictionary");
    let addr = listener.local_addr().expect("mock dictionary address");

    tokio::spawn(async move {
        axum::serve(listener, app).await.ok();
    });

    format!("http://{}", addr)
}

async fn lookup(
    State(words): State<Arc<HashSet<String>>>,
    Path(word): Path<String>,
) -> (StatusCode, Json<serde_json::Value>) {
    if word == FLAKY_WORD {
        (
            StatusCode::INTERNAL_SERVER_ERROR,
            Json(serde_json::json!({ "message": "upstream exploded" })),
        )
    } else if words.contains(&word) {
        (StatusCode::OK, Json(serde_json::json!([{ "word": word }])))
    } else {
        (
            StatusCode::NOT_FOUND,
            Json(serde_json::json!({ "title": "No Definitions Found" })),
        )
    }
}
