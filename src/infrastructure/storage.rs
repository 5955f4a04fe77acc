// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use async_trait::async_trait;
use std::collections::HashMap;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use tokio::fs;
use tokio::io::AsyncWriteExt;
use tokio::sync::RwLock;
use url::Url;

use crate::config::settings::Settings;
use crate::domain::repositories::storage_repository::{
    ConfigurationError, NewObject, StorageConnector, StorageError, StorageRepository,
    StorageSession, StoredObject,
};
use crate::infrastructure::drive::DriveConnector;

/// 本地文件系统存储实现
///
/// 对象写入 `<base_path>/<parent>/<name>`，链接为文件的 `file://` 地址
pub struct LocalStorage {
    base_path: PathBuf,
}

impl LocalStorage {
    pub fn new(base_path: impl Into<PathBuf>) -> Self {
        Self {
            base_path: base_path.into(),
        }
    }

    fn get_full_path(&self, parent: &str, name: &str) -> PathBuf {
        self.base_path.join(parent).join(name)
    }
}

#[async_trait]
impl StorageRepository for LocalStorage {
    async fn create(&self, object: NewObject<'_>) -> Result<StoredObject, StorageError> {
        if object.name.contains(['/', '\\']) || object.name.starts_with('.') {
            return Err(StorageError::Rejected(format!(
                "Invalid object name: {}",
                object.name
            )));
        }

        let full_path = self.get_full_path(object.parent, object.name);

        // 确保目录存在
        if let Some(parent) = Path::new(&full_path).parent() {
            fs::create_dir_all(parent).await?;
        }

        // 已存在的对象不可覆盖
        let mut file = match fs::OpenOptions::new()
            .write(true)
            .create_new(true)
            .open(&full_path)
            .await
        {
            Ok(file) => file,
            Err(e) if e.kind() == std::io::ErrorKind::AlreadyExists => {
                return Err(StorageError::Rejected(format!(
                    "Object already exists: {}/{}",
                    object.parent, object.name
                )));
            }
            Err(e) => return Err(e.into()),
        };
        file.write_all(object.data).await?;
        file.flush().await?;

        let absolute = fs::canonicalize(&full_path).await?;
        let link = Url::from_file_path(&absolute)
            .map_err(|_| StorageError::Other(format!("Invalid path: {}", absolute.display())))?;

        Ok(StoredObject {
            id: format!("{}/{}", object.parent, object.name),
            link: link.to_string(),
        })
    }

    fn backend(&self) -> &'static str {
        "local"
    }
}

/// 内存中保存的对象
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StoredEntry {
    pub parent: String,
    pub name: String,
    pub content_type: String,
    pub data: Vec<u8>,
}

/// 测试用的内存存储实现（用于单元测试）
#[derive(Clone, Default)]
pub struct InMemoryStorage {
    data: Arc<RwLock<HashMap<String, StoredEntry>>>,
}

impl InMemoryStorage {
    pub fn new() -> Self {
        Self::default()
    }

    /// 按对象 ID 读取已保存的对象
    pub async fn get(&self, id: &str) -> Option<StoredEntry> {
        self.data.read().await.get(id).cloned()
    }

    pub async fn len(&self) -> usize {
        self.data.read().await.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.data.read().await.is_empty()
    }
}

#[async_trait]
impl StorageRepository for InMemoryStorage {
    async fn create(&self, object: NewObject<'_>) -> Result<StoredObject, StorageError> {
        let id = format!("{}/{}", object.parent, object.name);
        let mut map = self.data.write().await;
        if map.contains_key(&id) {
            return Err(StorageError::Rejected(format!("Object already exists: {}", id)));
        }
        map.insert(
            id.clone(),
            StoredEntry {
                parent: object.parent.to_string(),
                name: object.name.to_string(),
                content_type: object.content_type.to_string(),
                data: object.data.to_vec(),
            },
        );
        Ok(StoredObject {
            link: format!("memory://{}", id),
            id,
        })
    }

    fn backend(&self) -> &'static str {
        "memory"
    }
}

/// 返回预先建立的存储会话的连接器
pub struct StaticConnector {
    session: StorageSession,
}

impl StaticConnector {
    pub fn new(repository: Arc<dyn StorageRepository>, parent: impl Into<String>) -> Self {
        Self {
            session: StorageSession {
                repository,
                parent: parent.into(),
            },
        }
    }
}

#[async_trait]
impl StorageConnector for StaticConnector {
    async fn connect(&self) -> Result<StorageSession, ConfigurationError> {
        Ok(self.session.clone())
    }
}

/// 存储工厂函数
///
/// 根据 `storage.storage_type` 创建对应的连接器
pub fn create_storage_connector(
    settings: &Settings,
    http: reqwest::Client,
) -> Result<Arc<dyn StorageConnector>, ConfigurationError> {
    match settings.storage.storage_type.as_str() {
        "drive" => Ok(Arc::new(DriveConnector::new(settings.drive.clone(), http))),
        "local" => {
            let base_path = settings
                .storage
                .local_path
                .as_ref()
                .cloned()
                .unwrap_or_else(|| "./storage".to_string());
            Ok(Arc::new(StaticConnector::new(
                Arc::new(LocalStorage::new(base_path)),
                settings.storage.local_folder.clone(),
            )))
        }

        other => Err(ConfigurationError::UnsupportedBackend(other.to_string())),
    }
}
