// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

/// 仓库接口模块
///
/// 定义领域层的持久化抽象，具体实现由基础设施层提供。
/// 目前只有存储仓库（storage_repository），用于最新结果的持久化镜像。
pub mod storage_repository;
