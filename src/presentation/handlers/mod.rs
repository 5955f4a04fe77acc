// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

/// HTTP请求处理器模块
///
/// 包含各个API端点的具体处理逻辑
pub mod mirror_handler;
pub mod upload_handler;

use crate::presentation::errors::AppError;

/// 非 POST 请求的统一处理
pub async fn method_not_allowed() -> AppError {
    AppError::MethodNotAllowed
}
