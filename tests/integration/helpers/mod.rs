// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use axum::{
    body::Body,
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::get,
    Router,
};
use axum_test::TestServer;
use mirrorrs::application::usecases::mirror_images::MirrorImagesUseCase;
use mirrorrs::application::usecases::reupload_image::ReuploadImageUseCase;
use mirrorrs::config::settings::{ImgbbSettings, Settings};
use mirrorrs::domain::repositories::storage_repository::StorageConnector;
use mirrorrs::domain::services::mirror_service::{MirrorOptions, MirrorService};
use mirrorrs::engines::reqwest_engine::ReqwestFetcher;
use mirrorrs::engines::traits::ImageFetcher;
use mirrorrs::infrastructure::storage::{InMemoryStorage, StaticConnector};
use mirrorrs::presentation::routes;
use mirrorrs::utils::naming::Namer;
use std::sync::Arc;
use tokio::net::TcpListener;

pub const PNG_BYTES: &[u8] = &[0x89, b'P', b'N', b'G', 0x0d, 0x0a, 0x1a, 0x0a, 0x00, 0x01];
pub const TEST_KEY: &str = include_str!("../../fixtures/test_service_account_key.pem");

/// 启动本地图片源服务器，返回其基础地址
pub async fn start_image_server() -> String {
    let app = Router::new()
        .route(
            "/valid.png",
            get(|| async {
                Response::builder()
                    .header("content-type", "image/png")
                    .body(Body::from(PNG_BYTES))
                    .unwrap()
            }),
        )
        .route(
            "/photo.JPG",
            get(|| async {
                Response::builder()
                    .header("content-type", "image/jpeg")
                    .body(Body::from(vec![0xffu8, 0xd8, 0xff]))
                    .unwrap()
            }),
        )
        .route(
            "/missing.png",
            get(|| async { StatusCode::NOT_FOUND.into_response() }),
        )
        .route(
            "/broken.gif",
            get(|| async { StatusCode::INTERNAL_SERVER_ERROR.into_response() }),
        );

    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();

    tokio::spawn(async move {
        axum::serve(listener, app).await.unwrap();
    });

    format!("http://{}", addr)
}

pub fn fetcher() -> Arc<dyn ImageFetcher> {
    Arc::new(ReqwestFetcher::new("mirrorrs-test").unwrap())
}

pub fn default_settings() -> Settings {
    Settings::defaults().unwrap()
}

/// 使用给定连接器和 ImgBB 配置构建测试服务器
pub fn create_test_server(
    connector: Arc<dyn StorageConnector>,
    imgbb: ImgbbSettings,
) -> TestServer {
    let settings = default_settings();
    let fetcher = fetcher();
    let service = Arc::new(MirrorService::new(
        fetcher.clone(),
        Arc::new(Namer::new()),
        MirrorOptions::from(&settings.mirror),
    ));
    let mirror = Arc::new(MirrorImagesUseCase::new(connector, service));
    let reupload = Arc::new(ReuploadImageUseCase::new(
        fetcher,
        imgbb,
        reqwest::Client::new(),
        settings.mirror.fetch_timeout(),
    ));

    TestServer::new(routes::app(mirror, reupload)).unwrap()
}

/// 使用内存存储构建测试服务器
pub fn create_memory_server(storage: &InMemoryStorage) -> TestServer {
    let connector = Arc::new(StaticConnector::new(
        Arc::new(storage.clone()),
        "test-folder",
    ));
    create_test_server(connector, default_settings().imgbb)
}
