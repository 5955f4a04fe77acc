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

use std::time::Duration;

use config::{Config, ConfigError, Environment, File};
use serde::Deserialize;

/// 应用程序配置设置
///
/// 包含服务器、存储、Google Drive、镜像流水线、ImgBB 和指标等所有配置项
#[derive(Debug, Clone, Deserialize)]
pub struct Settings {
    /// 服务器配置
    pub server: ServerSettings,
    /// 存储配置
    pub storage: StorageSettings,
    /// Google Drive 配置
    pub drive: DriveSettings,
    /// 镜像流水线配置
    pub mirror: MirrorSettings,
    /// ImgBB 配置
    pub imgbb: ImgbbSettings,
    /// 指标配置
    pub metrics: MetricsSettings,
}

/// 服务器配置设置
#[derive(Debug, Clone, Deserialize)]
pub struct ServerSettings {
    /// 服务器监听主机地址
    pub host: String,
    /// 服务器监听端口
    pub port: u16,
}

/// 存储配置设置
#[derive(Debug, Clone, Deserialize)]
pub struct StorageSettings {
    /// 存储类型 (drive, local)
    pub storage_type: String,
    /// 本地存储路径 (当 type=local 时使用)
    pub local_path: Option<String>,
    /// 本地存储下的目标子目录 (当 type=local 时使用)
    pub local_folder: String,
}

/// Google Drive 服务账号配置
///
/// 凭据在加载时均为可选，缺失时在请求阶段报告配置错误
#[derive(Debug, Clone, Deserialize)]
pub struct DriveSettings {
    /// 服务账号邮箱
    pub client_email: Option<String>,
    /// 服务账号私钥 (PEM，允许使用字面量 `\n` 表示换行)
    pub private_key: Option<String>,
    /// 目标文件夹 ID
    pub folder_id: Option<String>,
    /// OAuth2 令牌端点
    pub token_uri: String,
    /// OAuth2 权限范围
    pub scope: String,
    /// Drive 上传 API 基础地址
    pub upload_base_url: String,
}

/// 镜像流水线配置设置
#[derive(Debug, Clone, Deserialize)]
pub struct MirrorSettings {
    /// 同时处理的条目数，1 表示严格顺序执行
    pub concurrency: usize,
    /// 抓取图片超时时间（秒）
    pub fetch_timeout_secs: u64,
    /// 上传超时时间（秒）
    pub upload_timeout_secs: u64,
    /// 抓取时使用的 User-Agent
    pub user_agent: String,
}

impl MirrorSettings {
    pub fn fetch_timeout(&self) -> Duration {
        Duration::from_secs(self.fetch_timeout_secs)
    }

    pub fn upload_timeout(&self) -> Duration {
        Duration::from_secs(self.upload_timeout_secs)
    }
}

/// ImgBB 配置设置
#[derive(Debug, Clone, Deserialize)]
pub struct ImgbbSettings {
    /// API 密钥
    pub api_key: Option<String>,
    /// API 基础地址
    pub api_base_url: String,
}

/// 指标配置设置
#[derive(Debug, Clone, Deserialize)]
pub struct MetricsSettings {
    /// 是否启用 Prometheus 导出
    pub enabled: bool,
    /// 导出监听地址
    pub listen_addr: String,
}

impl Settings {
    /// 创建新的配置实例
    ///
    /// 从默认值、配置文件和环境变量加载配置
    ///
    /// # Returns
    ///
    /// * `Ok(Settings)` - 成功加载的配置
    /// * `Err(ConfigError)` - 配置加载失败
    pub fn new() -> Result<Self, ConfigError> {
        let env = std::env::var("APP_ENVIRONMENT").unwrap_or_else(|_| "default".to_string());
        Self::builder()?
            .add_source(File::with_name("config/default").required(false))
            .add_source(File::with_name(&format!("config/{}", env)).required(false))
            .add_source(Environment::with_prefix("MIRRORRS").separator("__"))
            .build()?
            .try_deserialize()
    }

    /// 仅包含默认值的配置构建器
    pub fn builder() -> Result<config::ConfigBuilder<config::builder::DefaultState>, ConfigError> {
        Config::builder()
            // Start with default settings
            .set_default("server.host", "0.0.0.0")?
            .set_default("server.port", 3000)?
            // Default Storage settings
            .set_default("storage.storage_type", "drive")?
            .set_default("storage.local_path", "./storage")?
            .set_default("storage.local_folder", "mirrored")?
            // Default Drive endpoints
            .set_default("drive.token_uri", "https://oauth2.googleapis.com/token")?
            .set_default("drive.scope", "https://www.googleapis.com/auth/drive")?
            .set_default("drive.upload_base_url", "https://www.googleapis.com/upload")?
            // Default Mirror pipeline settings
            .set_default("mirror.concurrency", 1)?
            .set_default("mirror.fetch_timeout_secs", 30)?
            .set_default("mirror.upload_timeout_secs", 60)?
            .set_default(
                "mirror.user_agent",
                format!("mirrorrs/{}", env!("CARGO_PKG_VERSION")),
            )?
            // Default ImgBB settings
            .set_default("imgbb.api_base_url", "https://api.imgbb.com")?
            // Default Metrics settings
            .set_default("metrics.enabled", true)?
            .set_default("metrics.listen_addr", "0.0.0.0:9000")
    }

    /// 仅使用默认值构建配置，主要用于测试
    pub fn defaults() -> Result<Self, ConfigError> {
        Self::builder()?.build()?.try_deserialize()
    }
}
