// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use std::sync::Arc;

use async_trait::async_trait;
use thiserror::Error;

/// 存储错误类型
#[derive(Error, Debug)]
pub enum StorageError {
    /// IO错误
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    /// 后端拒绝请求，携带后端自身的诊断信息
    #[error("{0}")]
    Rejected(String),
    /// 后端拒绝请求但未给出诊断信息
    #[error("upload failed")]
    Unknown,
    /// 存储错误
    #[error("Storage error: {0}")]
    Other(String),
}

/// 配置错误类型
///
/// 获取已认证存储客户端时出现的错误，会使整个请求失败
#[derive(Error, Debug)]
pub enum ConfigurationError {
    /// 缺少必需的配置项
    #[error("Server configuration error: {0} not set")]
    Missing(&'static str),
    /// 私钥无法解析
    #[error("Server configuration error: invalid private key: {0}")]
    InvalidPrivateKey(String),
    /// 向存储后端认证失败
    #[error("Authentication with storage backend failed: {0}")]
    Authentication(String),
    /// 不支持的存储类型
    #[error("Unsupported storage type: {0}")]
    UnsupportedBackend(String),
}

/// 待创建的存储对象
#[derive(Debug, Clone, Copy)]
pub struct NewObject<'a> {
    /// 父级容器（文件夹）标识
    pub parent: &'a str,
    /// 对象名称
    pub name: &'a str,
    /// 媒体类型，可能为空
    pub content_type: &'a str,
    /// 对象内容
    pub data: &'a [u8],
}

/// 已创建的存储对象
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StoredObject {
    /// 后端分配的稳定标识
    pub id: String,
    /// 可从外部访问的链接
    pub link: String,
}

/// 存储仓库特质
///
/// 已认证的存储会话，可重复调用 `create` 而无需重新认证
#[async_trait]
pub trait StorageRepository: Send + Sync {
    /// 在父级容器下创建新对象
    async fn create(&self, object: NewObject<'_>) -> Result<StoredObject, StorageError>;

    /// 后端名称
    fn backend(&self) -> &'static str;
}

/// 已建立的存储会话及其目标容器
#[derive(Clone)]
pub struct StorageSession {
    pub repository: Arc<dyn StorageRepository>,
    pub parent: String,
}

/// 存储连接器特质
///
/// 读取配置并获取已认证的存储会话，每个批量请求调用一次
#[async_trait]
pub trait StorageConnector: Send + Sync {
    async fn connect(&self) -> Result<StorageSession, ConfigurationError>;
}
