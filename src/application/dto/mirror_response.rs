// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use serde::Serialize;

use crate::domain::models::mirror::BatchResult;

/// 批量镜像响应数据传输对象
#[derive(Debug, Serialize)]
pub struct MirrorResponseDto {
    /// 与请求 URL 按位置对应的结果
    pub results: BatchResult,
}
