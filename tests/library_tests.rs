//! Tests for the library loading strategies.

use itchdl::{Error, GameLookup};
use serde_json::json;
use wiremock::matchers::{header, method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

mod common;
use common::helpers::*;

#[tokio::test]
async fn test_load_owned_games_stops_at_empty_page() {
    let server = MockServer::start().await;
    mount_owned_keys_page(&server, 1, owned_keys_page(1, 50)).await;
    mount_owned_keys_page(&server, 2, owned_keys_page(51, 50)).await;
    mount_owned_keys_page(&server, 3, owned_keys_page(0, 0)).await;

    let temp_dir = create_temp_dir();
    let mut library = create_test_library(&server, temp_dir.path(), 4);
    let loaded = library.load_owned_games().await.unwrap();

    assert_eq!(loaded, 100);
    assert_eq!(library.games().len(), 100);
    assert_eq!(server.received_requests().await.unwrap().len(), 3);

    // API response order is kept across pages.
    assert_eq!(library.games()[0].game_id, 1);
    assert_eq!(library.games()[50].game_id, 51);
    assert_eq!(library.games()[99].game_id, 100);
    assert_eq!(library.games()[0].id, Some(10_001));
}

#[tokio::test]
async fn test_load_owned_games_twice_keeps_duplicates() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/profile/owned-keys"))
        .and(query_param("page", "1"))
        .respond_with(ResponseTemplate::new(200).set_body_json(owned_keys_page(1, 2)))
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/profile/owned-keys"))
        .and(query_param("page", "2"))
        .respond_with(ResponseTemplate::new(200).set_body_json(owned_keys_page(0, 0)))
        .mount(&server)
        .await;

    let temp_dir = create_temp_dir();
    let mut library = create_test_library(&server, temp_dir.path(), 4);
    library.load_owned_games().await.unwrap();
    library.load_owned_games().await.unwrap();

    assert_eq!(library.games().len(), 4);
}

#[tokio::test]
async fn test_malformed_page_is_fatal_and_keeps_partial_results() {
    let server = MockServer::start().await;
    mount_owned_keys_page(&server, 1, owned_keys_page(1, 3)).await;
    Mock::given(method("GET"))
        .and(path("/profile/owned-keys"))
        .and(query_param("page", "2"))
        .respond_with(ResponseTemplate::new(200).set_body_string("<html>oops</html>"))
        .expect(1)
        .mount(&server)
        .await;

    let temp_dir = create_temp_dir();
    let mut library = create_test_library(&server, temp_dir.path(), 4);
    let result = library.load_owned_games().await;

    assert!(matches!(result, Err(Error::Json { .. })));
    assert_eq!(library.games().len(), 3);
}

#[tokio::test]
async fn test_page_without_owned_keys_field_is_fatal() {
    let server = MockServer::start().await;
    mount_owned_keys_page(&server, 1, json!({"page": 1, "unexpected": true})).await;

    let temp_dir = create_temp_dir();
    let mut library = create_test_library(&server, temp_dir.path(), 4);
    let result = library.load_owned_games().await;

    assert!(matches!(result, Err(Error::Json { .. })));
    assert!(library.games().is_empty());
}

#[tokio::test]
async fn test_upload_list_without_uploads_field_is_fatal() {
    let server = MockServer::start().await;
    mount_game_page(&server, "free-game", 5).await;
    Mock::given(method("GET"))
        .and(path("/games/5/uploads"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"status": "ok"})))
        .mount(&server)
        .await;

    let temp_dir = create_temp_dir();
    let mut library = create_test_library(&server, temp_dir.path(), 4);
    let result = library.load_game(TEST_PUBLISHER, "free-game").await;

    assert!(matches!(result, Err(Error::Json { .. })));
    assert!(library.games().is_empty());
    let requests = server.received_requests().await.unwrap();
    assert!(requests.iter().all(|r| r.url.path() != "/profile/owned-keys"));
}

#[tokio::test]
async fn test_api_error_envelope() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/profile/owned-keys"))
        .respond_with(ResponseTemplate::new(403).set_body_json(json!({"errors": ["invalid key"]})))
        .mount(&server)
        .await;

    let temp_dir = create_temp_dir();
    let mut library = create_test_library(&server, temp_dir.path(), 4);

    match library.load_owned_games().await {
        Err(Error::Api(msg)) => assert_eq!(msg, "invalid key"),
        other => panic!("Expected Api error, got {:?}", other),
    }
}

#[tokio::test]
async fn test_bad_link_is_fatal() {
    let server = MockServer::start().await;
    let mut key = owned_key(1, 2, "fine");
    key["game"]["url"] = json!("https://example.com/not-itch");
    mount_owned_keys_page(&server, 1, json!({"owned_keys": [key]})).await;

    let temp_dir = create_temp_dir();
    let mut library = create_test_library(&server, temp_dir.path(), 4);

    assert!(matches!(
        library.load_owned_games().await,
        Err(Error::InvalidUrl(_))
    ));
}

async fn mount_game_page(server: &MockServer, slug: &str, game_id: u64) {
    Mock::given(method("GET"))
        .and(path(format!("/{}/{}/data.json", TEST_PUBLISHER, slug)))
        .and(header("Authorization", TEST_TOKEN))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"id": game_id, "title": "x"})))
        .mount(server)
        .await;
    mount_catalog(server, game_id, game_record(game_id, TEST_PUBLISHER, slug)).await;
}

async fn mount_public_uploads(server: &MockServer, game_id: u64, uploads: serde_json::Value) {
    Mock::given(method("GET"))
        .and(path(format!("/games/{}/uploads", game_id)))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"uploads": uploads})))
        .expect(1)
        .mount(server)
        .await;
}

#[tokio::test]
async fn test_load_game_direct() {
    let server = MockServer::start().await;
    mount_game_page(&server, "free-game", 77).await;
    mount_public_uploads(&server, 77, json!([upload(1, "free.zip"), upload(2, "free-linux.tar.gz")])).await;
    Mock::given(method("GET"))
        .and(path("/profile/owned-keys"))
        .respond_with(ResponseTemplate::new(200).set_body_json(owned_keys_page(0, 0)))
        .expect(0)
        .mount(&server)
        .await;

    let temp_dir = create_temp_dir();
    let mut library = create_test_library(&server, temp_dir.path(), 4);
    let lookup = library.load_game(TEST_PUBLISHER, "free-game").await.unwrap();

    assert_eq!(lookup, GameLookup::Direct);
    assert_eq!(library.games().len(), 1);
    let game = &library.games()[0];
    assert_eq!(game.id, None);
    assert_eq!(game.game_id, 77);
    assert_eq!(game.game_slug, "free-game");
    assert_eq!(game.downloads().len(), 2);
}

#[tokio::test]
async fn test_load_game_keyed() {
    let server = MockServer::start().await;
    mount_game_page(&server, "paid-game", 5).await;
    mount_public_uploads(&server, 5, json!({})).await;
    mount_owned_keys_page(&server, 1, json!({"owned_keys": [owned_key(100, 3, "other"), owned_key(101, 4, "another")]})).await;
    mount_owned_keys_page(&server, 2, json!({"owned_keys": [owned_key(102, 5, "paid-game"), owned_key(103, 6, "after")]})).await;

    let temp_dir = create_temp_dir();
    let mut library = create_test_library(&server, temp_dir.path(), 4);
    let lookup = library.load_game(TEST_PUBLISHER, "paid-game").await.unwrap();

    assert_eq!(lookup, GameLookup::Keyed);
    assert_eq!(library.games().len(), 1);
    assert_eq!(library.games()[0].id, Some(102));
    assert_eq!(library.games()[0].link, "https://tester.itch.io/paid-game");
}

#[tokio::test]
async fn test_load_game_not_owned() {
    let server = MockServer::start().await;
    mount_game_page(&server, "paid-game", 5).await;
    mount_public_uploads(&server, 5, json!([])).await;
    mount_owned_keys_page(&server, 1, json!({"owned_keys": [owned_key(100, 3, "other")]})).await;
    mount_owned_keys_page(&server, 2, json!({"owned_keys": []})).await;

    let temp_dir = create_temp_dir();
    let mut library = create_test_library(&server, temp_dir.path(), 4);
    library.add_game(create_owned_game(1, 2, "already-here"));

    let lookup = library.load_game(TEST_PUBLISHER, "paid-game").await.unwrap();

    assert_eq!(lookup, GameLookup::NotOwned);
    assert_eq!(library.games().len(), 1);
    assert_eq!(library.games()[0].game_slug, "already-here");
}

#[tokio::test]
async fn test_load_games_from_storefront() {
    let server = MockServer::start().await;
    let page = r#"
        <div class="game_grid_widget">
          <div class="game_cell"><a class="title game_link" data-label="game:31:title" href="https://tester.itch.io/one">One</a></div>
          <div class="game_cell"><a class="title game_link" data-label="game:32:title" href="https://tester.itch.io/two">Two</a></div>
        </div>
    "#;
    Mock::given(method("GET"))
        .and(path(format!("/{}", TEST_PUBLISHER)))
        .and(NoAuthorization)
        .respond_with(ResponseTemplate::new(200).set_body_string(page))
        .expect(1)
        .mount(&server)
        .await;
    mount_catalog(&server, 31, game_record(31, TEST_PUBLISHER, "one")).await;
    mount_catalog(&server, 32, game_record(32, TEST_PUBLISHER, "two")).await;

    let temp_dir = create_temp_dir();
    let mut library = create_test_library(&server, temp_dir.path(), 4);
    let loaded = library.load_games(TEST_PUBLISHER).await.unwrap();

    assert_eq!(loaded, 2);
    let slugs: Vec<&str> = library.games().iter().map(|g| g.game_slug.as_str()).collect();
    assert_eq!(slugs, vec!["one", "two"]);
    assert!(library.games().iter().all(|g| g.id.is_none()));
}

#[tokio::test]
async fn test_load_games_missing_storefront() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/nobody"))
        .respond_with(ResponseTemplate::new(404))
        .mount(&server)
        .await;

    let temp_dir = create_temp_dir();
    let mut library = create_test_library(&server, temp_dir.path(), 4);

    assert!(matches!(
        library.load_games("nobody").await,
        Err(Error::Reqwest { .. })
    ));
    assert!(library.games().is_empty());
}
