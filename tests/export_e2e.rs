//! End-to-end export tests against a mock groups.io server.
//!
//! These tests drive the full pipeline: login, album listing, photo
//! listing with pagination, streaming downloads, collision-safe naming,
//! and extension recovery, verifying the resulting tree on disk.

use gio_export::{ApiClient, Config, Exporter};
use tempfile::TempDir;
use wiremock::matchers::{method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

const JPEG_BYTES: &[u8] = &[0xFF, 0xD8, 0xFF, 0xE0, 0x00, 0x10, b'J', b'F', b'I', b'F'];

async fn mock_login(server: &MockServer) {
    Mock::given(method("POST"))
        .and(path("/v1/login"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
            "user": {
                "subscriptions": [
                    {"group_id": 12345, "group_name": "w6ek"}
                ]
            }
        })))
        .mount(server)
        .await;
}

async fn logged_in_client(server: &MockServer) -> ApiClient {
    let config = Config::new("user@example.com", "secret", server.uri());
    ApiClient::login(&config)
        .await
        .expect("login against mock server should succeed")
}

fn albums_page(albums: serde_json::Value) -> ResponseTemplate {
    ResponseTemplate::new(200)
        .set_body_json(serde_json::json!({ "data": albums, "has_more": false }))
}

fn photos_page(photos: serde_json::Value) -> ResponseTemplate {
    ResponseTemplate::new(200)
        .set_body_json(serde_json::json!({ "data": photos, "has_more": false }))
}

#[tokio::test]
async fn test_export_mirrors_group_hierarchy_onto_disk() {
    let server = MockServer::start().await;
    let temp_dir = TempDir::new().expect("failed to create temp dir");
    mock_login(&server).await;

    Mock::given(method("GET"))
        .and(path("/v1/getalbums"))
        .and(query_param("group_id", "12345"))
        .respond_with(albums_page(serde_json::json!([
            {"id": 1, "title": "Antennas"},
            {"id": 2, "title": "Field Day"}
        ])))
        .mount(&server)
        .await;

    Mock::given(method("GET"))
        .and(path("/v1/getphotos"))
        .and(query_param("album_id", "1"))
        .respond_with(photos_page(serde_json::json!([
            {"id": 10, "name": "tower.jpg", "download_url": format!("{}/p/10", server.uri())},
            {"id": 11, "name": "Beach + Sunset (edited).JPEG",
             "download_url": format!("{}/p/11", server.uri())}
        ])))
        .mount(&server)
        .await;

    Mock::given(method("GET"))
        .and(path("/v1/getphotos"))
        .and(query_param("album_id", "2"))
        .respond_with(photos_page(serde_json::json!([
            {"id": 20, "name": "logbook.png", "download_url": format!("{}/p/20", server.uri())}
        ])))
        .mount(&server)
        .await;

    for id in [10, 11, 20] {
        Mock::given(method("GET"))
            .and(path(format!("/p/{id}")))
            .respond_with(ResponseTemplate::new(200).set_body_bytes(JPEG_BYTES))
            .expect(1)
            .mount(&server)
            .await;
    }

    let client = logged_in_client(&server).await;
    let group = client.subscriptions()[0].clone();
    let exporter = Exporter::new(client, temp_dir.path());

    let stats = exporter.export_group(&group).await.expect("export succeeds");

    assert_eq!(stats.albums, 2);
    assert_eq!(stats.downloaded, 3);
    assert_eq!(stats.skipped, 0);
    assert_eq!(stats.failed, 0);

    let root = temp_dir.path().join("w6ek");
    assert!(root.join("Antennas").join("tower.JPG").exists());
    assert!(root.join("Antennas").join("Beach and Sunset.JPG").exists());
    assert!(root.join("Field Day").join("logbook.PNG").exists());

    let bytes =
        std::fs::read(root.join("Antennas").join("tower.JPG")).expect("downloaded file readable");
    assert_eq!(bytes, JPEG_BYTES);
}

#[tokio::test]
async fn test_part_photo_is_skipped_with_zero_requests_and_zero_writes() {
    let server = MockServer::start().await;
    let temp_dir = TempDir::new().expect("failed to create temp dir");
    mock_login(&server).await;

    Mock::given(method("GET"))
        .and(path("/v1/getalbums"))
        .respond_with(albums_page(serde_json::json!([{"id": 1, "title": "Antennas"}])))
        .mount(&server)
        .await;

    Mock::given(method("GET"))
        .and(path("/v1/getphotos"))
        .respond_with(photos_page(serde_json::json!([
            {"id": 10, "name": "upload.part", "download_url": format!("{}/p/10", server.uri())}
        ])))
        .mount(&server)
        .await;

    // The download endpoint must never be hit for a .part marker.
    Mock::given(method("GET"))
        .and(path("/p/10"))
        .respond_with(ResponseTemplate::new(200).set_body_bytes(JPEG_BYTES))
        .expect(0)
        .mount(&server)
        .await;

    let client = logged_in_client(&server).await;
    let group = client.subscriptions()[0].clone();
    let exporter = Exporter::new(client, temp_dir.path());

    let stats = exporter.export_group(&group).await.expect("export succeeds");

    assert_eq!(stats.skipped, 1);
    assert_eq!(stats.downloaded, 0);

    let album_dir = temp_dir.path().join("w6ek").join("Antennas");
    let entries: Vec<_> = std::fs::read_dir(&album_dir)
        .expect("album dir exists")
        .collect();
    assert!(entries.is_empty(), "no files expected, found: {entries:?}");
}

#[tokio::test]
async fn test_duplicate_names_within_album_get_collision_suffixes() {
    let server = MockServer::start().await;
    let temp_dir = TempDir::new().expect("failed to create temp dir");
    mock_login(&server).await;

    Mock::given(method("GET"))
        .and(path("/v1/getalbums"))
        .respond_with(albums_page(serde_json::json!([{"id": 1, "title": "Antennas"}])))
        .mount(&server)
        .await;

    let photos: Vec<serde_json::Value> = (0..3)
        .map(|i| {
            serde_json::json!({
                "id": 10 + i,
                "name": "tower.jpg",
                "download_url": format!("{}/p/{}", server.uri(), 10 + i)
            })
        })
        .collect();

    Mock::given(method("GET"))
        .and(path("/v1/getphotos"))
        .respond_with(photos_page(serde_json::json!(photos)))
        .mount(&server)
        .await;

    for id in 10..13 {
        Mock::given(method("GET"))
            .and(path(format!("/p/{id}")))
            .respond_with(ResponseTemplate::new(200).set_body_bytes(JPEG_BYTES))
            .mount(&server)
            .await;
    }

    let client = logged_in_client(&server).await;
    let group = client.subscriptions()[0].clone();
    let exporter = Exporter::new(client, temp_dir.path());

    let stats = exporter.export_group(&group).await.expect("export succeeds");
    assert_eq!(stats.downloaded, 3);

    let album_dir = temp_dir.path().join("w6ek").join("Antennas");
    assert!(album_dir.join("tower.JPG").exists());
    assert!(album_dir.join("tower-2.JPG").exists());
    assert!(album_dir.join("tower-3.JPG").exists());
}

#[tokio::test]
async fn test_extensionless_photo_recovers_extension_from_content() {
    let server = MockServer::start().await;
    let temp_dir = TempDir::new().expect("failed to create temp dir");
    mock_login(&server).await;

    Mock::given(method("GET"))
        .and(path("/v1/getalbums"))
        .respond_with(albums_page(serde_json::json!([{"id": 1, "title": "Antennas"}])))
        .mount(&server)
        .await;

    Mock::given(method("GET"))
        .and(path("/v1/getphotos"))
        .respond_with(photos_page(serde_json::json!([
            {"id": 10, "name": "snapshot", "download_url": format!("{}/p/10", server.uri())}
        ])))
        .mount(&server)
        .await;

    Mock::given(method("GET"))
        .and(path("/p/10"))
        .respond_with(ResponseTemplate::new(200).set_body_bytes(JPEG_BYTES))
        .mount(&server)
        .await;

    let client = logged_in_client(&server).await;
    let group = client.subscriptions()[0].clone();
    let exporter = Exporter::new(client, temp_dir.path());

    let stats = exporter.export_group(&group).await.expect("export succeeds");
    assert_eq!(stats.downloaded, 1);

    let album_dir = temp_dir.path().join("w6ek").join("Antennas");
    assert!(
        album_dir.join("snapshot.JPG").exists(),
        "extensionless download should be renamed from its sniffed content type"
    );
    assert!(!album_dir.join("snapshot").exists());
}

#[tokio::test]
async fn test_failed_photo_does_not_abort_the_album() {
    let server = MockServer::start().await;
    let temp_dir = TempDir::new().expect("failed to create temp dir");
    mock_login(&server).await;

    Mock::given(method("GET"))
        .and(path("/v1/getalbums"))
        .respond_with(albums_page(serde_json::json!([{"id": 1, "title": "Antennas"}])))
        .mount(&server)
        .await;

    Mock::given(method("GET"))
        .and(path("/v1/getphotos"))
        .respond_with(photos_page(serde_json::json!([
            {"id": 10, "name": "broken.jpg", "download_url": format!("{}/p/10", server.uri())},
            {"id": 11, "name": "fine.jpg", "download_url": format!("{}/p/11", server.uri())}
        ])))
        .mount(&server)
        .await;

    Mock::given(method("GET"))
        .and(path("/p/10"))
        .respond_with(ResponseTemplate::new(500))
        .mount(&server)
        .await;

    Mock::given(method("GET"))
        .and(path("/p/11"))
        .respond_with(ResponseTemplate::new(200).set_body_bytes(JPEG_BYTES))
        .mount(&server)
        .await;

    let client = logged_in_client(&server).await;
    let group = client.subscriptions()[0].clone();
    let exporter = Exporter::new(client, temp_dir.path());

    let stats = exporter.export_group(&group).await.expect("run continues");

    assert_eq!(stats.failed, 1);
    assert_eq!(stats.downloaded, 1);
    let album_dir = temp_dir.path().join("w6ek").join("Antennas");
    assert!(album_dir.join("fine.JPG").exists());
    assert!(!album_dir.join("broken.JPG").exists());
}

#[tokio::test]
async fn test_album_listing_failure_degrades_to_empty_run() {
    let server = MockServer::start().await;
    let temp_dir = TempDir::new().expect("failed to create temp dir");
    mock_login(&server).await;

    Mock::given(method("GET"))
        .and(path("/v1/getalbums"))
        .respond_with(ResponseTemplate::new(500))
        .mount(&server)
        .await;

    let client = logged_in_client(&server).await;
    let group = client.subscriptions()[0].clone();
    let exporter = Exporter::new(client, temp_dir.path());

    let stats = exporter.export_group(&group).await.expect("degraded, not fatal");
    assert_eq!(stats.albums, 0);
    assert_eq!(stats.downloaded, 0);
    // The group directory is still created before listing.
    assert!(temp_dir.path().join("w6ek").exists());
}

#[tokio::test]
async fn test_photo_listing_protocol_violation_skips_album_and_continues() {
    let server = MockServer::start().await;
    let temp_dir = TempDir::new().expect("failed to create temp dir");
    mock_login(&server).await;

    Mock::given(method("GET"))
        .and(path("/v1/getalbums"))
        .respond_with(albums_page(serde_json::json!([
            {"id": 1, "title": "Corrupt"},
            {"id": 2, "title": "Healthy"}
        ])))
        .mount(&server)
        .await;

    // Album 1 claims more data exists but supplies no item array.
    Mock::given(method("GET"))
        .and(path("/v1/getphotos"))
        .and(query_param("album_id", "1"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
            "has_more": true,
            "next_page_token": "t2"
        })))
        .mount(&server)
        .await;

    Mock::given(method("GET"))
        .and(path("/v1/getphotos"))
        .and(query_param("album_id", "2"))
        .respond_with(photos_page(serde_json::json!([
            {"id": 20, "name": "ok.gif", "download_url": format!("{}/p/20", server.uri())}
        ])))
        .mount(&server)
        .await;

    Mock::given(method("GET"))
        .and(path("/p/20"))
        .respond_with(ResponseTemplate::new(200).set_body_bytes(b"GIF89a\x01\x00"))
        .mount(&server)
        .await;

    let client = logged_in_client(&server).await;
    let group = client.subscriptions()[0].clone();
    let exporter = Exporter::new(client, temp_dir.path());

    let stats = exporter.export_group(&group).await.expect("run continues");

    // Only the healthy album completes.
    assert_eq!(stats.albums, 1);
    assert_eq!(stats.downloaded, 1);
    assert!(temp_dir.path().join("w6ek").join("Healthy").join("ok.GIF").exists());
}
