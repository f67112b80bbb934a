use serde_json::{json, Value};
use std::fs;
use std::path::Path;
use tempfile::TempDir;
use itchdl::{Endpoints, Game, Library, LibraryBuilder};
use wiremock::matchers::{header, method, path, query_param};
use wiremock::{Match, Mock, MockServer, Request, ResponseTemplate};

// Common test constants
pub const TEST_TOKEN: &str = "test-api-key";
pub const TEST_PUBLISHER: &str = "tester";

/// Creates a temporary directory for testing purposes
pub fn create_temp_dir() -> TempDir {
    tempfile::tempdir().expect("Failed to create temporary directory")
}

/// Reads a file written by a download
pub fn read_file(path: &Path) -> Vec<u8> {
    fs::read(path).unwrap_or_else(|e| panic!("Failed to read {:?}: {}", path, e))
}

// === Payload Helpers ===

/// A catalog record for `https://<publisher>.itch.io/<slug>`
pub fn game_record(game_id: u64, publisher: &str, slug: &str) -> Value {
    json!({
        "id": game_id,
        "title": format!("Game {}", game_id),
        "url": format!("https://{}.itch.io/{}", publisher, slug),
        "classification": "game",
        "user": {"id": 1, "username": format!("{} (display)", publisher)}
    })
}

/// An ownership-key record wrapping a catalog record
pub fn owned_key(key_id: u64, game_id: u64, slug: &str) -> Value {
    json!({
        "id": key_id,
        "game_id": game_id,
        "game": game_record(game_id, TEST_PUBLISHER, slug),
        "downloads": 0
    })
}

/// A page of `count` distinct ownership keys, numbered from `start`
pub fn owned_keys_page(start: u64, count: u64) -> Value {
    let keys: Vec<Value> = (start..start + count)
        .map(|n| owned_key(10_000 + n, n, &format!("game-{}", n)))
        .collect();
    json!({"page": 1, "per_page": 50, "owned_keys": keys})
}

pub fn upload(upload_id: u64, filename: &str) -> Value {
    json!({"id": upload_id, "filename": filename, "display_name": null, "p_linux": true})
}

/// A game found through an ownership key
pub fn create_owned_game(key_id: u64, game_id: u64, slug: &str) -> Game {
    let record = owned_key(key_id, game_id, slug);
    Game::new(Some(key_id), game_id, record["game"].clone()).expect("Failed to create game")
}

// === Library Helpers ===

/// A library with hidden progress pointed at the mock server
pub fn create_test_library(server: &MockServer, dir: &Path, jobs: usize) -> Library {
    LibraryBuilder::hidden(TEST_TOKEN)
        .directory(dir.to_path_buf())
        .jobs(jobs)
        .endpoints(Endpoints::new(server.uri()).with_site_root(server.uri()))
        .build()
        .expect("Failed to build library")
}

// === Mock Helpers ===

/// Matches requests sent without an `Authorization` header
pub struct NoAuthorization;

impl Match for NoAuthorization {
    fn matches(&self, request: &Request) -> bool {
        !request.headers.contains_key("authorization")
    }
}

/// Serves one page of ownership keys, expected to be requested exactly once
pub async fn mount_owned_keys_page(server: &MockServer, page: u32, body: Value) {
    Mock::given(method("GET"))
        .and(path("/profile/owned-keys"))
        .and(query_param("page", page.to_string()))
        .and(header("Authorization", TEST_TOKEN))
        .respond_with(ResponseTemplate::new(200).set_body_json(body))
        .expect(1)
        .mount(server)
        .await;
}

/// Serves the catalog record of a game
pub async fn mount_catalog(server: &MockServer, game_id: u64, record: Value) {
    Mock::given(method("GET"))
        .and(path(format!("/games/{}", game_id)))
        .and(header("Authorization", TEST_TOKEN))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"game": record})))
        .mount(server)
        .await;
}

/// Serves the key-scoped upload list of a game
pub async fn mount_uploads(server: &MockServer, game_id: u64, key_id: u64, uploads: Value) {
    Mock::given(method("GET"))
        .and(path(format!("/games/{}/uploads", game_id)))
        .and(query_param("download_key_id", key_id.to_string()))
        .and(header("Authorization", TEST_TOKEN))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"uploads": uploads})))
        .mount(server)
        .await;
}

/// Serves download sessions for a game
pub async fn mount_session(server: &MockServer, game_id: u64) {
    Mock::given(method("POST"))
        .and(path(format!("/games/{}/download-sessions", game_id)))
        .and(header("Authorization", TEST_TOKEN))
        .respond_with(
            ResponseTemplate::new(200).set_body_json(json!({"uuid": format!("uuid-{}", game_id)})),
        )
        .mount(server)
        .await;
}

/// Serves the bytes of an upload behind the signed download URL
pub async fn mount_file(server: &MockServer, upload_id: u64, key_id: u64, game_id: u64, body: &[u8]) {
    Mock::given(method("GET"))
        .and(path(format!("/uploads/{}/download", upload_id)))
        .and(query_param("api_key", TEST_TOKEN))
        .and(query_param("download_key_id", key_id.to_string()))
        .and(query_param("uuid", format!("uuid-{}", game_id)))
        .respond_with(ResponseTemplate::new(200).set_body_bytes(body.to_vec()))
        .mount(server)
        .await;
}

/// Mounts everything needed to download one owned game with a single file
pub async fn mount_downloadable_game(
    server: &MockServer,
    key_id: u64,
    game_id: u64,
    upload_id: u64,
    filename: &str,
    body: &[u8],
) {
    mount_uploads(server, game_id, key_id, json!([upload(upload_id, filename)])).await;
    mount_session(server, game_id).await;
    mount_file(server, upload_id, key_id, game_id, body).await;
}
