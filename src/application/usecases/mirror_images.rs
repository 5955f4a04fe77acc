// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use std::sync::Arc;
use std::time::Instant;

use tracing::{error, info};

use crate::domain::models::mirror::{BatchResult, MirrorRequest};
use crate::domain::repositories::storage_repository::{ConfigurationError, StorageConnector};
use crate::domain::services::mirror_service::MirrorService;
use crate::infrastructure::metrics;

// === Section: Use Case Definition ===

/// 批量镜像用例
///
/// 外层失败范围：先建立已认证的存储会话，失败时整个请求失败且不产生任何条目结果
pub struct MirrorImagesUseCase {
    connector: Arc<dyn StorageConnector>,
    service: Arc<MirrorService>,
}

// === Section: Implementation ===

impl MirrorImagesUseCase {
    pub fn new(connector: Arc<dyn StorageConnector>, service: Arc<MirrorService>) -> Self {
        Self { connector, service }
    }

    pub async fn execute(&self, request: MirrorRequest) -> Result<BatchResult, ConfigurationError> {
        let start = Instant::now();

        let session = self.connector.connect().await.map_err(|e| {
            error!("Failed to establish storage session: {}", e);
            e
        })?;

        info!(
            items = request.len(),
            backend = session.repository.backend(),
            "Starting mirror batch"
        );

        let result = self.service.mirror_batch(&request, &session).await;
        let elapsed = start.elapsed().as_secs_f64();
        metrics::record_batch(&result, elapsed);

        info!(
            items = result.len(),
            succeeded = result.succeeded(),
            elapsed_secs = elapsed,
            "Finished mirror batch"
        );

        Ok(result)
    }
}
