// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use std::any::Any;
use std::panic::AssertUnwindSafe;
use std::sync::Arc;
use std::time::Duration;

use chrono::Utc;
use futures::stream::{self, StreamExt};
use futures::FutureExt;
use tokio::time::timeout;
use tracing::{debug, info, warn};

use crate::config::settings::MirrorSettings;
use crate::domain::models::mirror::{
    BatchResult, MirrorError, MirrorOutcome, MirrorRequest, PipelineStage,
};
use crate::domain::repositories::storage_repository::{NewObject, StorageError, StorageSession};
use crate::engines::traits::{FetchError, ImageFetcher};
use crate::infrastructure::metrics;
use crate::utils::naming::Namer;
use crate::utils::validators::{validate_image_url, ValidationError};

impl From<ValidationError> for MirrorError {
    fn from(_: ValidationError) -> Self {
        MirrorError::Validation
    }
}

impl From<FetchError> for MirrorError {
    fn from(err: FetchError) -> Self {
        MirrorError::Fetch(err.to_string())
    }
}

impl From<StorageError> for MirrorError {
    fn from(err: StorageError) -> Self {
        MirrorError::Upload(err.to_string())
    }
}

/// 镜像流水线选项
#[derive(Debug, Clone, Copy)]
pub struct MirrorOptions {
    /// 同时处理的条目数
    pub concurrency: usize,
    /// 单次抓取超时
    pub fetch_timeout: Duration,
    /// 单次上传超时
    pub upload_timeout: Duration,
}

impl Default for MirrorOptions {
    fn default() -> Self {
        Self {
            concurrency: 1,
            fetch_timeout: Duration::from_secs(30),
            upload_timeout: Duration::from_secs(60),
        }
    }
}

impl From<&MirrorSettings> for MirrorOptions {
    fn from(settings: &MirrorSettings) -> Self {
        Self {
            concurrency: settings.concurrency,
            fetch_timeout: settings.fetch_timeout(),
            upload_timeout: settings.upload_timeout(),
        }
    }
}

/// 批量镜像服务
///
/// 对每个 URL 依次执行 校验 → 抓取 → 命名 → 上传，单个条目的失败只转换为该条目的
/// 失败结果，不会影响其他条目。结果顺序始终与输入顺序一致。
pub struct MirrorService {
    fetcher: Arc<dyn ImageFetcher>,
    namer: Arc<Namer>,
    options: MirrorOptions,
}

impl MirrorService {
    pub fn new(fetcher: Arc<dyn ImageFetcher>, namer: Arc<Namer>, options: MirrorOptions) -> Self {
        Self {
            fetcher,
            namer,
            options,
        }
    }

    /// 镜像整个批次
    ///
    /// # 参数
    ///
    /// * `request` - 镜像请求
    /// * `session` - 已认证的存储会话，批次内所有条目复用
    ///
    /// # 返回值
    ///
    /// 与输入等长且按位置对应的批量结果
    pub async fn mirror_batch(
        &self,
        request: &MirrorRequest,
        session: &StorageSession,
    ) -> BatchResult {
        let concurrency = self.options.concurrency.max(1);
        debug!(
            fetcher = self.fetcher.name(),
            concurrency,
            "Dispatching mirror items"
        );

        // `buffered` yields in submission order even when later items finish first
        stream::iter(request.urls().iter().cloned())
            .map(|url| async move { self.mirror_isolated(&url, session).await })
            .buffered(concurrency)
            .collect()
            .await
    }

    /// 在独立的失败范围内处理单个条目，任何错误或 panic 都转换为失败结果
    async fn mirror_isolated(&self, url: &str, session: &StorageSession) -> MirrorOutcome {
        let result = AssertUnwindSafe(self.mirror_one(url, session))
            .catch_unwind()
            .await
            .unwrap_or_else(|panic| Err(MirrorError::Unexpected(panic_message(panic))));

        match result {
            Ok(link) => {
                info!(url, link = %link, "Mirrored image");
                metrics::record_item_success();
                MirrorOutcome::succeeded(url, link)
            }
            Err(err) => {
                warn!(url, stage = err.stage().as_str(), error = %err, "Failed to mirror image");
                metrics::record_item_failure(&err);
                MirrorOutcome::failed(url, &err)
            }
        }
    }

    /// 执行单个条目的流水线，返回目标链接
    pub async fn mirror_one(
        &self,
        url: &str,
        session: &StorageSession,
    ) -> Result<String, MirrorError> {
        validate_image_url(url)?;

        let image = timeout(self.options.fetch_timeout, self.fetcher.fetch(url))
            .await
            .map_err(|_| MirrorError::Timeout {
                stage: PipelineStage::Fetch,
                secs: self.options.fetch_timeout.as_secs(),
            })??;

        let name = self.namer.name_for(url, Utc::now());

        let object = NewObject {
            parent: &session.parent,
            name: &name,
            content_type: &image.content_type,
            data: &image.data,
        };
        let stored = timeout(self.options.upload_timeout, session.repository.create(object))
            .await
            .map_err(|_| MirrorError::Timeout {
                stage: PipelineStage::Upload,
                secs: self.options.upload_timeout.as_secs(),
            })??;

        Ok(stored.link)
    }
}

fn panic_message(panic: Box<dyn Any + Send>) -> String {
    if let Some(msg) = panic.downcast_ref::<&str>() {
        (*msg).to_string()
    } else if let Some(msg) = panic.downcast_ref::<String>() {
        msg.clone()
    } else {
        "Unexpected error".to_string()
    }
}

#[cfg(test)]
#[path = "mirror_service_test.rs"]
mod tests;
