// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use axum::http::StatusCode;
use mirrorrs::config::settings::ImgbbSettings;
use mirrorrs::infrastructure::storage::{InMemoryStorage, StaticConnector};
use serde_json::json;
use std::sync::Arc;
use wiremock::matchers::{method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

use super::helpers::{create_memory_server, create_test_server, start_image_server};

fn imgbb_settings(api_key: Option<&str>, api_base_url: String) -> ImgbbSettings {
    ImgbbSettings {
        api_key: api_key.map(str::to_string),
        api_base_url,
    }
}

fn server_with_imgbb(settings: ImgbbSettings) -> axum_test::TestServer {
    let connector = Arc::new(StaticConnector::new(
        Arc::new(InMemoryStorage::new()),
        "test-folder",
    ));
    create_test_server(connector, settings)
}

#[tokio::test]
async fn test_reupload_returns_hosted_url() {
    let origin = start_image_server().await;
    let imgbb = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/1/upload"))
        .and(query_param("key", "imgbb-key"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "success": true,
            "data": { "url": "https://i.ibb.co/xyz/valid.png" }
        })))
        .expect(1)
        .mount(&imgbb)
        .await;

    let server = server_with_imgbb(imgbb_settings(Some("imgbb-key"), imgbb.uri()));
    let response = server
        .post("/api/upload")
        .json(&json!({ "imageUrl": format!("{}/valid.png", origin) }))
        .await;

    response.assert_status_ok();
    response.assert_json(&json!({ "url": "https://i.ibb.co/xyz/valid.png" }));
}

#[tokio::test]
async fn test_missing_image_url_is_bad_request() {
    let storage = InMemoryStorage::new();
    let server = create_memory_server(&storage);

    for body in [json!({}), json!({ "imageUrl": "" }), json!({ "imageUrl": 7 })] {
        let response = server.post("/api/upload").json(&body).await;
        response.assert_status(StatusCode::BAD_REQUEST);
        response.assert_json(&json!({ "error": "Image URL is required" }));
    }
}

#[tokio::test]
async fn test_missing_api_key_is_configuration_error() {
    let imgbb = MockServer::start().await;
    Mock::given(method("POST"))
        .respond_with(ResponseTemplate::new(200))
        .expect(0)
        .mount(&imgbb)
        .await;

    let server = server_with_imgbb(imgbb_settings(None, imgbb.uri()));
    let response = server
        .post("/api/upload")
        .json(&json!({ "imageUrl": "http://x/a.png" }))
        .await;

    response.assert_status(StatusCode::INTERNAL_SERVER_ERROR);
    response.assert_json(&json!({ "error": "Server configuration error: API key not set" }));
}

#[tokio::test]
async fn test_failed_fetch_is_reported() {
    let origin = start_image_server().await;
    let imgbb = MockServer::start().await;
    Mock::given(method("POST"))
        .respond_with(ResponseTemplate::new(200))
        .expect(0)
        .mount(&imgbb)
        .await;

    let server = server_with_imgbb(imgbb_settings(Some("imgbb-key"), imgbb.uri()));
    let response = server
        .post("/api/upload")
        .json(&json!({ "imageUrl": format!("{}/missing.png", origin) }))
        .await;

    response.assert_status(StatusCode::INTERNAL_SERVER_ERROR);
    response.assert_json(&json!({ "error": "Failed to fetch image. Status: 404" }));
}

#[tokio::test]
async fn test_upload_rejects_other_methods() {
    let storage = InMemoryStorage::new();
    let server = create_memory_server(&storage);

    let response = server.get("/api/upload").await;
    response.assert_status(StatusCode::METHOD_NOT_ALLOWED);
    response.assert_json(&json!({ "error": "Method Not Allowed" }));
}
