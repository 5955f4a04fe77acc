// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use std::sync::Arc;

use async_trait::async_trait;
use reqwest::{header::CONTENT_TYPE, StatusCode};
use serde::Deserialize;
use serde_json::json;
use tokio::sync::RwLock;
use tracing::{debug, info, warn};
use uuid::Uuid;

use crate::config::settings::DriveSettings;
use crate::domain::repositories::storage_repository::{
    ConfigurationError, NewObject, StorageConnector, StorageError, StorageRepository,
    StorageSession, StoredObject,
};
use crate::infrastructure::google_auth::{AccessToken, ServiceAccountCredentials};

/// 由文件 ID 生成可访问的 Drive 链接
pub fn drive_link(file_id: &str) -> String {
    format!("https://drive.google.com/file/d/{}/view", file_id)
}

#[derive(Debug, Deserialize)]
struct CreatedFile {
    id: String,
}

#[derive(Debug, Deserialize)]
struct DriveErrorBody {
    error: DriveErrorDetail,
}

#[derive(Debug, Deserialize)]
struct DriveErrorDetail {
    message: Option<String>,
}

/// Google Drive 存储实现
///
/// 持有已认证的访问令牌，可在整个批次内重复创建文件
pub struct DriveStorage {
    http: reqwest::Client,
    upload_base_url: String,
    access_token: String,
    token_cache: Option<TokenCache>,
}

type TokenCache = Arc<RwLock<Option<AccessToken>>>;

impl DriveStorage {
    pub fn new(http: reqwest::Client, upload_base_url: String, access_token: String) -> Self {
        Self {
            http,
            upload_base_url,
            access_token,
            token_cache: None,
        }
    }

    /// 关联连接器的令牌缓存，令牌被拒绝时将其清除
    fn with_token_cache(mut self, cache: TokenCache) -> Self {
        self.token_cache = Some(cache);
        self
    }

    async fn invalidate_token(&self) {
        let Some(cache) = &self.token_cache else {
            return;
        };
        let mut cached = cache.write().await;
        if cached
            .as_ref()
            .is_some_and(|t| t.token == self.access_token)
        {
            warn!("Drive rejected the access token, clearing cache");
            *cached = None;
        }
    }

    fn upload_url(&self) -> String {
        format!(
            "{}/drive/v3/files?uploadType=multipart&fields=id&supportsAllDrives=true",
            self.upload_base_url.trim_end_matches('/')
        )
    }
}

/// 构造 multipart/related 请求体：第一段为 JSON 元数据，第二段为文件内容
fn multipart_related_body(boundary: &str, object: &NewObject<'_>) -> Vec<u8> {
    let mut metadata = json!({
        "name": object.name,
        "parents": [object.parent],
    });
    if !object.content_type.is_empty() {
        metadata["mimeType"] = json!(object.content_type);
    }

    let media_type = if object.content_type.is_empty() {
        "application/octet-stream"
    } else {
        object.content_type
    };

    let mut body = Vec::with_capacity(object.data.len() + 512);
    body.extend_from_slice(
        format!(
            "--{boundary}\r\nContent-Type: application/json; charset=UTF-8\r\n\r\n{metadata}\r\n"
        )
        .as_bytes(),
    );
    body.extend_from_slice(
        format!("--{boundary}\r\nContent-Type: {media_type}\r\n\r\n").as_bytes(),
    );
    body.extend_from_slice(object.data);
    body.extend_from_slice(format!("\r\n--{boundary}--\r\n").as_bytes());
    body
}

#[async_trait]
impl StorageRepository for DriveStorage {
    async fn create(&self, object: NewObject<'_>) -> Result<StoredObject, StorageError> {
        let boundary = format!("mirrorrs-{}", Uuid::new_v4().simple());
        let body = multipart_related_body(&boundary, &object);

        let response = self
            .http
            .post(self.upload_url())
            .bearer_auth(&self.access_token)
            .header(
                CONTENT_TYPE,
                format!("multipart/related; boundary={}", boundary),
            )
            .body(body)
            .send()
            .await
            .map_err(|e| StorageError::Other(e.to_string()))?;

        let status = response.status();
        if status == StatusCode::UNAUTHORIZED {
            self.invalidate_token().await;
        }
        if !status.is_success() {
            let text = response.text().await.unwrap_or_default();
            debug!(status = status.as_u16(), body = %text, "Drive rejected upload");
            return Err(serde_json::from_str::<DriveErrorBody>(&text)
                .ok()
                .and_then(|b| b.error.message)
                .filter(|m| !m.is_empty())
                .map(StorageError::Rejected)
                .unwrap_or(StorageError::Unknown));
        }

        let created: CreatedFile = response
            .json()
            .await
            .map_err(|e| StorageError::Other(e.to_string()))?;

        Ok(StoredObject {
            link: drive_link(&created.id),
            id: created.id,
        })
    }

    fn backend(&self) -> &'static str {
        "drive"
    }
}

/// Google Drive 连接器
///
/// 读取服务账号配置并换取访问令牌，令牌在过期前跨请求复用
pub struct DriveConnector {
    settings: DriveSettings,
    http: reqwest::Client,
    token_cache: TokenCache,
}

impl DriveConnector {
    pub fn new(settings: DriveSettings, http: reqwest::Client) -> Self {
        Self {
            settings,
            http,
            token_cache: Arc::new(RwLock::new(None)),
        }
    }

    async fn access_token(
        &self,
        credentials: &ServiceAccountCredentials,
    ) -> Result<String, ConfigurationError> {
        {
            let cache = self.token_cache.read().await;
            if let Some(token) = cache.as_ref().filter(|t| !t.is_expired()) {
                return Ok(token.token.clone());
            }
        }

        let token = credentials.fetch_access_token(&self.http).await?;
        info!(
            client_email = credentials.client_email(),
            "Obtained Drive access token"
        );

        let value = token.token.clone();
        *self.token_cache.write().await = Some(token);
        Ok(value)
    }
}

#[async_trait]
impl StorageConnector for DriveConnector {
    async fn connect(&self) -> Result<StorageSession, ConfigurationError> {
        let credentials = ServiceAccountCredentials::from_settings(&self.settings)?;
        let parent = self
            .settings
            .folder_id
            .as_deref()
            .map(str::trim)
            .filter(|v| !v.is_empty())
            .ok_or(ConfigurationError::Missing("drive.folder_id"))?
            .to_string();

        let access_token = self.access_token(&credentials).await?;
        let repository = DriveStorage::new(
            self.http.clone(),
            self.settings.upload_base_url.clone(),
            access_token,
        )
        .with_token_cache(self.token_cache.clone());

        Ok(StorageSession {
            repository: Arc::new(repository),
            parent,
        })
    }
}
