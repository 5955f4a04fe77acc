// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

/// 基础设施层模块
///
/// 该模块包含系统的技术实现细节，负责与外部系统的交互。
///
/// 包含的子模块：
/// - Google Drive（drive）：基于服务账号的 Drive 文件创建
/// - Google 认证（google_auth）：服务账号 JWT 换取访问令牌
/// - ImgBB（imgbb）：单图转存所用的图床客户端
/// - 指标（metrics）：Prometheus 指标导出与记录
/// - 存储（storage）：本地与内存存储实现及连接器工厂
///
/// 基础设施层依赖于领域层的抽象接口，确保领域层保持纯粹的业务逻辑。
pub mod drive;
pub mod google_auth;
pub mod imgbb;
pub mod metrics;
pub mod storage;
