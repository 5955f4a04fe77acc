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

use async_trait::async_trait;
use bytes::Bytes;
use thiserror::Error;

/// 抓取错误类型
#[derive(Error, Debug)]
pub enum FetchError {
    /// 传输层失败
    #[error("Failed to fetch image: {0}")]
    RequestFailed(#[from] reqwest::Error),
    /// 响应状态码不在成功范围内
    #[error("Failed to fetch image. Status: {0}")]
    Status(u16),
}

#[derive(Debug, Clone)]
pub struct FetchedImage {
    /// 原始字节
    pub data: Bytes,
    /// 响应声明的媒体类型，缺失时为空字符串
    pub content_type: String,
}

/// 图片抓取特质
#[async_trait]
pub trait ImageFetcher: Send + Sync {
    /// 抓取 URL 指向的内容，只尝试一次
    async fn fetch(&self, url: &str) -> Result<FetchedImage, FetchError>;

    /// 抓取器名称
    fn name(&self) -> &'static str;
}
