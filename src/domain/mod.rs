// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

/// 领域层模块
///
/// 该模块包含系统的核心业务逻辑，包括：
/// - 领域模型（models）：抓取记录与结果集
/// - 仓库接口（repositories）：数据持久化抽象接口
/// - 服务（services）：记录提取与最新结果存储
///
/// 领域层不依赖于任何外部实现，网络与文件系统都通过接口注入。
pub mod models;
pub mod repositories;
pub mod services;
