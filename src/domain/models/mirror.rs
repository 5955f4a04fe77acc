// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use serde::Serialize;
use thiserror::Error;

/// 镜像请求
///
/// 一次批量镜像调用中按顺序提交的源 URL 列表，构造后不可变且保证非空。
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MirrorRequest {
    urls: Vec<String>,
}

/// 镜像请求构造错误
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum MirrorRequestError {
    /// URL 列表为空
    #[error("urls array required")]
    Empty,
    /// `urls` 缺失、不是数组或包含非字符串元素
    #[error("urls array required")]
    Malformed,
}

impl MirrorRequest {
    /// 创建镜像请求
    ///
    /// # 参数
    ///
    /// * `urls` - 源 URL 列表
    ///
    /// # 返回值
    ///
    /// * `Ok(MirrorRequest)` - 非空的请求
    /// * `Err(MirrorRequestError::Empty)` - 列表为空
    pub fn new(urls: Vec<String>) -> Result<Self, MirrorRequestError> {
        if urls.is_empty() {
            return Err(MirrorRequestError::Empty);
        }
        Ok(Self { urls })
    }

    pub fn urls(&self) -> &[String] {
        &self.urls
    }

    pub fn len(&self) -> usize {
        self.urls.len()
    }

    /// 始终为 false，空请求无法被构造
    pub fn is_empty(&self) -> bool {
        self.urls.is_empty()
    }
}

/// 流水线阶段
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PipelineStage {
    Validate,
    Fetch,
    Upload,
    Unknown,
}

impl PipelineStage {
    pub fn as_str(&self) -> &'static str {
        match self {
            PipelineStage::Validate => "validate",
            PipelineStage::Fetch => "fetch",
            PipelineStage::Upload => "upload",
            PipelineStage::Unknown => "unknown",
        }
    }

    fn activity(&self) -> &'static str {
        match self {
            PipelineStage::Validate => "validating url",
            PipelineStage::Fetch => "fetching image",
            PipelineStage::Upload => "uploading image",
            PipelineStage::Unknown => "processing item",
        }
    }
}

/// 单个条目的镜像错误
///
/// 每个变体对应流水线中失败的阶段，消息即为返回给调用方的错误文本。
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum MirrorError {
    /// URL 不是可识别的图片地址
    #[error("Not an image URL")]
    Validation,
    /// 抓取源图片失败
    #[error("{0}")]
    Fetch(String),
    /// 存储后端拒绝创建对象
    #[error("{0}")]
    Upload(String),
    /// 抓取或上传超时
    #[error("Timed out after {secs}s while {}", .stage.activity())]
    Timeout { stage: PipelineStage, secs: u64 },
    /// 其他未预期的错误
    #[error("{0}")]
    Unexpected(String),
}

impl MirrorError {
    /// 返回失败所在的流水线阶段
    pub fn stage(&self) -> PipelineStage {
        match self {
            MirrorError::Validation => PipelineStage::Validate,
            MirrorError::Fetch(_) => PipelineStage::Fetch,
            MirrorError::Upload(_) => PipelineStage::Upload,
            MirrorError::Timeout { stage, .. } => *stage,
            MirrorError::Unexpected(_) => PipelineStage::Unknown,
        }
    }
}

/// 单个 URL 的镜像结果
///
/// 成功时仅携带 `driveLink`，失败时仅携带 `error`，两者互斥。
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct MirrorOutcome {
    original: String,
    success: bool,
    #[serde(rename = "driveLink", skip_serializing_if = "Option::is_none")]
    destination_link: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    error: Option<String>,
}

impl MirrorOutcome {
    pub fn succeeded(original: impl Into<String>, destination_link: impl Into<String>) -> Self {
        Self {
            original: original.into(),
            success: true,
            destination_link: Some(destination_link.into()),
            error: None,
        }
    }

    pub fn failed(original: impl Into<String>, error: &MirrorError) -> Self {
        Self {
            original: original.into(),
            success: false,
            destination_link: None,
            error: Some(error.to_string()),
        }
    }

    pub fn original(&self) -> &str {
        &self.original
    }

    pub fn is_success(&self) -> bool {
        self.success
    }

    pub fn destination_link(&self) -> Option<&str> {
        self.destination_link.as_deref()
    }

    pub fn error(&self) -> Option<&str> {
        self.error.as_deref()
    }
}

/// 批量镜像结果
///
/// 与输入请求按位置一一对应。
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct BatchResult(Vec<MirrorOutcome>);

impl BatchResult {
    pub fn outcomes(&self) -> &[MirrorOutcome] {
        &self.0
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn succeeded(&self) -> usize {
        self.0.iter().filter(|o| o.is_success()).count()
    }
}

// `StreamExt::collect` 需要 `Default + Extend`
impl Extend<MirrorOutcome> for BatchResult {
    fn extend<I: IntoIterator<Item = MirrorOutcome>>(&mut self, iter: I) {
        self.0.extend(iter);
    }
}
