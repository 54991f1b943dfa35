// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

/// 领域服务模块
///
/// 包含的服务：
/// - 提取服务（extraction_service）：把列表页内容解析为有序的抓取记录
/// - 最新结果存储（latest_result_store）：持有最新结果集并维护持久化镜像
pub mod extraction_service;
pub mod latest_result_store;
