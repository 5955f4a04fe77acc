// Copyright 2025 Kirky.X
//
// Licensed under the Apache License, Version 2.0 (the "License");
// you may not use this file except in compliance with the License.
// You may obtain a copy of the License at
//
//     http://www.apache.org/licenses/LICENSE-2.0
//
// Unless required by applicable law or agreed to in writing, software
// distributed under the License is distributed on an "AS IS" BASIS,
// WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
// See the License for the specific language governing permissions and
// limitations under the License.

use mirrorrs::application::usecases::mirror_images::MirrorImagesUseCase;
use mirrorrs::application::usecases::reupload_image::ReuploadImageUseCase;
use mirrorrs::config::settings::Settings;
use mirrorrs::domain::services::mirror_service::{MirrorOptions, MirrorService};
use mirrorrs::engines::reqwest_engine::ReqwestFetcher;
use mirrorrs::engines::traits::ImageFetcher;
use mirrorrs::infrastructure::storage::create_storage_connector;
use mirrorrs::presentation::routes;
use mirrorrs::utils::naming::Namer;
use std::sync::Arc;
use tokio::net::TcpListener;
use tracing::info;

use mirrorrs::utils::telemetry;

/// 主函数
///
/// 应用程序入口点，负责初始化所有组件并启动服务
#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // 1. Initialize logging
    telemetry::init_telemetry();
    info!("Starting mirrorrs...");

    // 2. Load configuration
    let settings = Arc::new(Settings::new()?);
    info!("Configuration loaded");

    // Initialize Prometheus Metrics
    mirrorrs::infrastructure::metrics::init_metrics(&settings.metrics);

    // 3. Shared HTTP client for fetching, storage backends and ImgBB
    let http = reqwest::Client::builder()
        .user_agent(settings.mirror.user_agent.as_str())
        .build()?;

    // 4. Initialize Components
    let fetcher: Arc<dyn ImageFetcher> = Arc::new(ReqwestFetcher::with_client(http.clone()));
    let connector = create_storage_connector(&settings, http.clone())?;
    info!("Storage backend: {}", settings.storage.storage_type);

    let mirror_service = Arc::new(MirrorService::new(
        fetcher.clone(),
        Arc::new(Namer::new()),
        MirrorOptions::from(&settings.mirror),
    ));
    let mirror_use_case = Arc::new(MirrorImagesUseCase::new(connector, mirror_service));
    let reupload_use_case = Arc::new(ReuploadImageUseCase::new(
        fetcher,
        settings.imgbb.clone(),
        http,
        settings.mirror.fetch_timeout(),
    ));

    // 5. Start HTTP server
    let app = routes::app(mirror_use_case, reupload_use_case);

    let addr = format!("{}:{}", settings.server.host, settings.server.port);
    let listener = TcpListener::bind(&addr).await?;
    info!("Server listening on {}", addr);

    axum::serve(listener, app).await?;

    Ok(())
}
