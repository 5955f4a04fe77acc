// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

/// 领域服务模块
///
/// 包含的服务：
/// - 镜像服务（mirror_service）：批量图片镜像的编排逻辑
pub mod mirror_service;
