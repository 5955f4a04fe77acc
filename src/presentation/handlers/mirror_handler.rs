// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use axum::{body::Bytes, extract::Extension, Json};
use std::sync::Arc;

use crate::{
    application::{
        dto::{mirror_request::MirrorRequestDto, mirror_response::MirrorResponseDto},
        usecases::mirror_images::MirrorImagesUseCase,
    },
    domain::models::mirror::MirrorRequest,
    presentation::errors::AppError,
};

/// 批量镜像图片
///
/// 请求体 `{ "urls": [...] }`，只要请求格式正确且存储会话建立成功即返回 200，
/// 单个条目的失败体现在对应位置的结果中
pub async fn mirror_images(
    Extension(use_case): Extension<Arc<MirrorImagesUseCase>>,
    body: Bytes,
) -> Result<Json<MirrorResponseDto>, AppError> {
    let request = MirrorRequest::try_from(MirrorRequestDto::from_body(&body))?;
    let results = use_case.execute(request).await?;
    Ok(Json(MirrorResponseDto { results }))
}
