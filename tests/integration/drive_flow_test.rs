// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use axum::http::StatusCode;
use mirrorrs::config::settings::DriveSettings;
use mirrorrs::infrastructure::storage::create_storage_connector;
use serde_json::{json, Value};
use wiremock::matchers::{body_string_contains, header, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

use super::helpers::{create_test_server, default_settings, start_image_server, TEST_KEY};

fn drive_settings(google: &MockServer) -> DriveSettings {
    DriveSettings {
        client_email: Some("mirror@test-project.iam.gserviceaccount.com".to_string()),
        // 环境变量中常见的转义换行形式
        private_key: Some(TEST_KEY.replace('\n', "\\n")),
        folder_id: Some("folder-xyz".to_string()),
        token_uri: format!("{}/token", google.uri()),
        scope: "https://www.googleapis.com/auth/drive.file".to_string(),
        upload_base_url: google.uri(),
    }
}

fn server_for(drive: DriveSettings) -> axum_test::TestServer {
    let mut settings = default_settings();
    settings.storage.storage_type = "drive".to_string();
    settings.drive = drive;

    let connector = create_storage_connector(&settings, reqwest::Client::new()).unwrap();
    create_test_server(connector, settings.imgbb)
}

async fn mount_token_endpoint(google: &MockServer, expected_calls: u64) {
    Mock::given(method("POST"))
        .and(path("/token"))
        .and(body_string_contains("grant_type=urn"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "access_token": "drive-token",
            "expires_in": 3600,
            "token_type": "Bearer"
        })))
        .expect(expected_calls)
        .mount(google)
        .await;
}

#[tokio::test]
async fn test_batch_uploads_to_drive_folder() {
    let origin = start_image_server().await;
    let google = MockServer::start().await;
    mount_token_endpoint(&google, 1).await;
    Mock::given(method("POST"))
        .and(path("/drive/v3/files"))
        .and(header("authorization", "Bearer drive-token"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "id": "drive-file-1" })))
        .expect(2)
        .mount(&google)
        .await;

    let server = server_for(drive_settings(&google));
    let urls = [
        format!("{}/valid.png", origin),
        format!("{}/notes.txt", origin),
        format!("{}/photo.JPG", origin),
    ];

    let response = server
        .post("/api/mirror")
        .json(&json!({ "urls": urls }))
        .await;

    response.assert_status_ok();
    let body: Value = response.json();
    let results = body["results"].as_array().unwrap();
    assert_eq!(results.len(), 3);
    assert_eq!(
        results[0]["driveLink"],
        json!("https://drive.google.com/file/d/drive-file-1/view")
    );
    assert_eq!(results[1]["error"], json!("Not an image URL"));
    assert!(results[2]["driveLink"]
        .as_str()
        .unwrap()
        .starts_with("https://drive.google.com/file/d/"));
}

#[tokio::test]
async fn test_access_token_is_reused_across_requests() {
    let origin = start_image_server().await;
    let google = MockServer::start().await;
    mount_token_endpoint(&google, 1).await;
    Mock::given(method("POST"))
        .and(path("/drive/v3/files"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "id": "f" })))
        .mount(&google)
        .await;

    let server = server_for(drive_settings(&google));
    for _ in 0..2 {
        server
            .post("/api/mirror")
            .json(&json!({ "urls": [format!("{}/valid.png", origin)] }))
            .await
            .assert_status_ok();
    }
}

#[tokio::test]
async fn test_drive_rejection_is_per_item() {
    let origin = start_image_server().await;
    let google = MockServer::start().await;
    mount_token_endpoint(&google, 1).await;
    Mock::given(method("POST"))
        .and(path("/drive/v3/files"))
        .respond_with(ResponseTemplate::new(404).set_body_json(json!({
            "error": { "code": 404, "message": "File not found: folder-xyz." }
        })))
        .mount(&google)
        .await;

    let server = server_for(drive_settings(&google));
    let response = server
        .post("/api/mirror")
        .json(&json!({ "urls": [format!("{}/valid.png", origin)] }))
        .await;

    response.assert_status_ok();
    let body: Value = response.json();
    assert_eq!(
        body["results"][0],
        json!({
            "original": format!("{}/valid.png", origin),
            "success": false,
            "error": "File not found: folder-xyz."
        })
    );
}

#[tokio::test]
async fn test_missing_credentials_fail_the_request() {
    let google = MockServer::start().await;
    let mut drive = drive_settings(&google);
    drive.client_email = None;

    let server = server_for(drive);
    let response = server
        .post("/api/mirror")
        .json(&json!({ "urls": ["http://x/a.png"] }))
        .await;

    response.assert_status(StatusCode::INTERNAL_SERVER_ERROR);
    response.assert_json(&json!({
        "error": "Server configuration error: drive.client_email not set"
    }));
}

#[tokio::test]
async fn test_missing_folder_fails_the_request() {
    let google = MockServer::start().await;
    let mut drive = drive_settings(&google);
    drive.folder_id = Some("  ".to_string());

    let server = server_for(drive);
    let response = server
        .post("/api/mirror")
        .json(&json!({ "urls": ["http://x/a.png"] }))
        .await;

    response.assert_status(StatusCode::INTERNAL_SERVER_ERROR);
    response.assert_json(&json!({
        "error": "Server configuration error: drive.folder_id not set"
    }));
}

#[tokio::test]
async fn test_invalid_private_key_fails_the_request() {
    let google = MockServer::start().await;
    let mut drive = drive_settings(&google);
    drive.private_key = Some("not a pem".to_string());

    let server = server_for(drive);
    let response = server
        .post("/api/mirror")
        .json(&json!({ "urls": ["http://x/a.png"] }))
        .await;

    response.assert_status(StatusCode::INTERNAL_SERVER_ERROR);
    let body: Value = response.json();
    assert!(body["error"].is_string());
    assert!(google.received_requests().await.unwrap_or_default().is_empty());
}
