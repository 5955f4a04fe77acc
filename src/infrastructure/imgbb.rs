// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use base64::{engine::general_purpose::STANDARD, Engine as _};
use serde::Deserialize;
use thiserror::Error;

/// ImgBB 错误类型
#[derive(Error, Debug)]
pub enum ImgbbError {
    /// 请求失败
    #[error("Request failed: {0}")]
    RequestFailed(#[from] reqwest::Error),
    /// API 返回失败
    #[error("{0}")]
    Api(String),
}

#[derive(Debug, Deserialize)]
struct UploadResponse {
    #[serde(default)]
    success: bool,
    data: Option<UploadData>,
    error: Option<UploadErrorDetail>,
}

#[derive(Debug, Deserialize)]
struct UploadData {
    url: String,
}

#[derive(Debug, Deserialize)]
struct UploadErrorDetail {
    message: Option<String>,
}

/// ImgBB 图床客户端
#[derive(Clone)]
pub struct ImgbbClient {
    http: reqwest::Client,
    api_base_url: String,
    api_key: String,
}

impl ImgbbClient {
    pub fn new(http: reqwest::Client, api_base_url: String, api_key: String) -> Self {
        Self {
            http,
            api_base_url,
            api_key,
        }
    }

    /// 上传图片并返回新的托管地址
    ///
    /// 图片以 base64 编码放入表单字段 `image`
    pub async fn upload(&self, image: &[u8]) -> Result<String, ImgbbError> {
        let url = format!("{}/1/upload", self.api_base_url.trim_end_matches('/'));
        let encoded = STANDARD.encode(image);

        let response: UploadResponse = self
            .http
            .post(url)
            .query(&[("key", self.api_key.as_str())])
            .form(&[("image", encoded.as_str())])
            .send()
            .await?
            .json()
            .await?;

        match response {
            UploadResponse {
                success: true,
                data: Some(data),
                ..
            } => Ok(data.url),
            UploadResponse { error, .. } => Err(ImgbbError::Api(
                error
                    .and_then(|e| e.message)
                    .unwrap_or_else(|| "ImgBB API error".to_string()),
            )),
        }
    }
}
