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

use thiserror::Error;

/// 允许镜像的图片扩展名（不区分大小写）
pub const IMAGE_EXTENSIONS: [&str; 5] = ["jpg", "jpeg", "png", "gif", "webp"];

/// 验证错误类型
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ValidationError {
    /// URL 不指向图片
    #[error("Not an image URL")]
    NotAnImage,
}

/// 去掉 URL 末尾的查询字符串
pub fn strip_query(url: &str) -> &str {
    match url.find('?') {
        Some(idx) => &url[..idx],
        None => url,
    }
}

/// 校验 URL 是否为可接受的图片地址
///
/// 忽略查询字符串后，路径必须以允许的扩展名结尾
///
/// # 参数
///
/// * `url` - 源 URL
///
/// # 返回值
///
/// * `Ok(())` - 接受
/// * `Err(ValidationError::NotAnImage)` - 拒绝
pub fn validate_image_url(url: &str) -> Result<(), ValidationError> {
    let path = strip_query(url);
    let accepted = path
        .rsplit_once('.')
        .map(|(_, ext)| {
            IMAGE_EXTENSIONS
                .iter()
                .any(|allowed| ext.eq_ignore_ascii_case(allowed))
        })
        .unwrap_or(false);

    if accepted {
        Ok(())
    } else {
        Err(ValidationError::NotAnImage)
    }
}
