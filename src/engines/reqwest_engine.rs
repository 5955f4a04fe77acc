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

use crate::engines::traits::{FetchError, FetchedImage, ImageFetcher};
use async_trait::async_trait;
use reqwest::header::CONTENT_TYPE;
use std::time::Instant;
use tracing::debug;

/// 抓取引擎
///
/// 基于reqwest实现的图片抓取引擎，批量内所有条目复用同一个客户端
#[derive(Clone)]
pub struct ReqwestFetcher {
    client: reqwest::Client,
}

impl ReqwestFetcher {
    /// 创建抓取引擎
    ///
    /// # 参数
    ///
    /// * `user_agent` - 请求使用的 User-Agent
    pub fn new(user_agent: &str) -> Result<Self, FetchError> {
        let client = reqwest::Client::builder().user_agent(user_agent).build()?;
        Ok(Self { client })
    }

    pub fn with_client(client: reqwest::Client) -> Self {
        Self { client }
    }
}

#[async_trait]
impl ImageFetcher for ReqwestFetcher {
    /// 执行HTTP抓取
    ///
    /// # 参数
    ///
    /// * `url` - 源图片URL
    ///
    /// # 返回值
    ///
    /// * `Ok(FetchedImage)` - 图片字节与媒体类型
    /// * `Err(FetchError)` - 传输失败或非成功状态码
    async fn fetch(&self, url: &str) -> Result<FetchedImage, FetchError> {
        let start = Instant::now();
        let response = self.client.get(url).send().await?;

        let status = response.status();
        if !status.is_success() {
            return Err(FetchError::Status(status.as_u16()));
        }

        let content_type = response
            .headers()
            .get(CONTENT_TYPE)
            .and_then(|v| v.to_str().ok())
            .unwrap_or_default()
            .trim()
            .to_string();

        let data = response.bytes().await?;

        debug!(
            url,
            bytes = data.len(),
            content_type = %content_type,
            elapsed_ms = start.elapsed().as_millis() as u64,
            "Fetched image"
        );

        Ok(FetchedImage { data, content_type })
    }

    /// 获取引擎名称
    fn name(&self) -> &'static str {
        "reqwest"
    }
}

#[cfg(test)]
#[path = "reqwest_engine_test.rs"]
mod tests;
