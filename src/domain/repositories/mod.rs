// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

/// 仓库接口模块
///
/// 定义存储后端的抽象接口，由基础设施层提供具体实现
pub mod storage_repository;
