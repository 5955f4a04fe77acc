// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use std::sync::Arc;
use std::time::Duration;

use thiserror::Error;
use tokio::time::timeout;
use tracing::info;

use crate::config::settings::ImgbbSettings;
use crate::domain::repositories::storage_repository::ConfigurationError;
use crate::engines::traits::{FetchError, ImageFetcher};
use crate::infrastructure::imgbb::{ImgbbClient, ImgbbError};

/// 单图转存错误类型
#[derive(Error, Debug)]
pub enum ReuploadError {
    #[error(transparent)]
    Configuration(#[from] ConfigurationError),
    #[error(transparent)]
    Fetch(#[from] FetchError),
    #[error("Timed out after {0}s while fetching image")]
    Timeout(u64),
    #[error(transparent)]
    Upload(#[from] ImgbbError),
}

/// 单图转存用例
///
/// 抓取一张图片并转存到 ImgBB，返回新的托管地址
pub struct ReuploadImageUseCase {
    fetcher: Arc<dyn ImageFetcher>,
    settings: ImgbbSettings,
    http: reqwest::Client,
    fetch_timeout: Duration,
}

impl ReuploadImageUseCase {
    pub fn new(
        fetcher: Arc<dyn ImageFetcher>,
        settings: ImgbbSettings,
        http: reqwest::Client,
        fetch_timeout: Duration,
    ) -> Self {
        Self {
            fetcher,
            settings,
            http,
            fetch_timeout,
        }
    }

    fn client(&self) -> Result<ImgbbClient, ConfigurationError> {
        let api_key = self
            .settings
            .api_key
            .as_deref()
            .filter(|k| !k.trim().is_empty())
            .ok_or(ConfigurationError::Missing("API key"))?;

        Ok(ImgbbClient::new(
            self.http.clone(),
            self.settings.api_base_url.clone(),
            api_key.to_string(),
        ))
    }

    pub async fn execute(&self, image_url: &str) -> Result<String, ReuploadError> {
        let client = self.client()?;

        let image = timeout(self.fetch_timeout, self.fetcher.fetch(image_url))
            .await
            .map_err(|_| ReuploadError::Timeout(self.fetch_timeout.as_secs()))??;

        let url = client.upload(&image.data).await?;
        info!(source = image_url, url = %url, "Reuploaded image");
        Ok(url)
    }
}
