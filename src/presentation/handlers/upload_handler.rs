// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use axum::{body::Bytes, extract::Extension, Json};
use std::sync::Arc;

use crate::{
    application::{
        dto::upload_request::{UploadRequestDto, UploadResponseDto},
        usecases::reupload_image::ReuploadImageUseCase,
    },
    presentation::errors::AppError,
};

/// 单图转存
pub async fn reupload_image(
    Extension(use_case): Extension<Arc<ReuploadImageUseCase>>,
    body: Bytes,
) -> Result<Json<UploadResponseDto>, AppError> {
    let dto = UploadRequestDto::from_body(&body);
    let image_url = dto
        .image_url()
        .ok_or_else(|| AppError::BadRequest("Image URL is required".to_string()))?;

    let url = use_case.execute(image_url).await?;
    Ok(Json(UploadResponseDto { url }))
}
