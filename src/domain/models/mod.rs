// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

/// 领域模型模块
///
/// 该模块定义了系统的核心业务实体，包括：
/// - 镜像请求（MirrorRequest）：一次批量调用提交的源 URL 列表
/// - 镜像结果（MirrorOutcome）：单个 URL 的成功或失败记录
/// - 批量结果（BatchResult）：与输入按位置对应的结果列表
pub mod mirror;
