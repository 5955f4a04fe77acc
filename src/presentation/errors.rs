// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use thiserror::Error;
use tracing::error;

use crate::application::usecases::reupload_image::ReuploadError;
use crate::domain::models::mirror::MirrorRequestError;
use crate::domain::repositories::storage_repository::ConfigurationError;

/// 应用错误类型
///
/// 请求级别的错误，统一以 `{ "error": message }` 形式返回
#[derive(Error, Debug)]
pub enum AppError {
    /// 请求方法不被允许
    #[error("Method Not Allowed")]
    MethodNotAllowed,
    /// 请求体格式错误
    #[error("{0}")]
    BadRequest(String),
    /// 配置或凭据错误
    #[error(transparent)]
    Configuration(#[from] ConfigurationError),
    /// 其他内部错误
    #[error("{0}")]
    Internal(String),
}

impl AppError {
    pub fn status_code(&self) -> StatusCode {
        match self {
            AppError::MethodNotAllowed => StatusCode::METHOD_NOT_ALLOWED,
            AppError::BadRequest(_) => StatusCode::BAD_REQUEST,
            AppError::Configuration(_) | AppError::Internal(_) => {
                StatusCode::INTERNAL_SERVER_ERROR
            }
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = self.status_code();
        let error_message = self.to_string();

        if status.is_server_error() {
            error!("Request failed: {}", error_message);
        }

        let body = Json(json!({ "error": error_message }));
        (status, body).into_response()
    }
}

impl From<MirrorRequestError> for AppError {
    fn from(err: MirrorRequestError) -> Self {
        AppError::BadRequest(err.to_string())
    }
}

impl From<ReuploadError> for AppError {
    fn from(err: ReuploadError) -> Self {
        match err {
            ReuploadError::Configuration(e) => AppError::Configuration(e),
            other => AppError::Internal(other.to_string()),
        }
    }
}
