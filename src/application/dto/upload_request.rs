// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use serde::{Deserialize, Serialize};

/// 单图转存请求数据传输对象
#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UploadRequestDto {
    /// 源图片 URL
    #[serde(default)]
    pub image_url: Option<String>,
}

impl UploadRequestDto {
    pub fn from_body(body: &[u8]) -> Self {
        serde_json::from_slice(body).unwrap_or_default()
    }

    /// 非空的源图片 URL
    pub fn image_url(&self) -> Option<&str> {
        self.image_url.as_deref().filter(|url| !url.is_empty())
    }
}

/// 单图转存响应数据传输对象
#[derive(Debug, Serialize)]
pub struct UploadResponseDto {
    /// 新的托管地址
    pub url: String,
}
