// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use std::sync::Arc;

use axum::{
    routing::{get, post},
    Extension, Router,
};
use tower_http::trace::TraceLayer;

use crate::application::usecases::{
    mirror_images::MirrorImagesUseCase, reupload_image::ReuploadImageUseCase,
};
use crate::presentation::handlers::{method_not_allowed, mirror_handler, upload_handler};

/// 创建应用路由
///
/// # 返回值
///
/// 返回配置好的路由
pub fn routes() -> Router {
    Router::new()
        .route("/health", get(health_check))
        .route("/v1/version", get(version))
        .route(
            "/api/mirror",
            post(mirror_handler::mirror_images).fallback(method_not_allowed),
        )
        .route(
            "/api/upload",
            post(upload_handler::reupload_image).fallback(method_not_allowed),
        )
}

/// 创建注入了用例依赖的完整应用
pub fn app(mirror: Arc<MirrorImagesUseCase>, reupload: Arc<ReuploadImageUseCase>) -> Router {
    routes()
        .layer(Extension(mirror))
        .layer(Extension(reupload))
        .layer(TraceLayer::new_for_http())
}

/// 健康检查端点
///
/// # 返回值
///
/// 返回"OK"字符串
pub async fn health_check() -> &'static str {
    "OK"
}

/// 版本信息端点
///
/// # 返回值
///
/// 返回应用版本号
pub async fn version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}
