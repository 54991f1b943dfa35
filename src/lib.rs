// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

/// 应用程序模块
///
/// 包含刷新编排用例和数据传输对象
pub mod application;

/// 配置模块
///
/// 处理应用程序的配置设置和环境变量
pub mod config;

/// 领域模块
///
/// 包含核心实体、条目提取与最新结果存储
pub mod domain;

/// 引擎模块
///
/// 实现列表页的抓取引擎
pub mod engines;

/// 基础设施模块
///
/// 提供外部服务集成，如本地存储、会话和 OAuth
pub mod infrastructure;

/// 表示层模块
///
/// 处理HTTP请求和响应，包括路由、处理器和中间件
pub mod presentation;

/// 工具模块
///
/// 提供通用的工具函数和辅助功能
pub mod utils;

/// 工作器模块
///
/// 实现定时刷新与工作器管理
pub mod workers;
