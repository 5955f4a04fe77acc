// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use serde::Deserialize;
use serde_json::Value;

use crate::domain::models::mirror::{MirrorRequest, MirrorRequestError};

/// 批量镜像请求数据传输对象
///
/// `urls` 保持为原始 JSON 值，以便区分缺失、类型错误和空数组
#[derive(Debug, Default, Deserialize)]
pub struct MirrorRequestDto {
    #[serde(default)]
    pub urls: Option<Value>,
}

impl MirrorRequestDto {
    /// 从原始请求体解析，无法解析的请求体视为缺少 `urls`
    pub fn from_body(body: &[u8]) -> Self {
        serde_json::from_slice(body).unwrap_or_default()
    }
}

impl TryFrom<MirrorRequestDto> for MirrorRequest {
    type Error = MirrorRequestError;

    fn try_from(dto: MirrorRequestDto) -> Result<Self, Self::Error> {
        let Some(Value::Array(items)) = dto.urls else {
            return Err(MirrorRequestError::Malformed);
        };

        let urls = items
            .into_iter()
            .map(|item| match item {
                Value::String(url) => Ok(url),
                _ => Err(MirrorRequestError::Malformed),
            })
            .collect::<Result<Vec<_>, _>>()?;

        MirrorRequest::new(urls)
    }
}
