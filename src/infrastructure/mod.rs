// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

/// 基础设施层模块
///
/// 该模块包含系统的技术实现细节，负责与文件系统、OAuth 提供方等外部资源交互。
///
/// 包含的子模块：
/// - OAuth（oauth）：授权码换取令牌与读取用户资料
/// - 会话（session）：签名令牌与进程内会话存储
/// - 存储（storage）：存储仓库接口的本地文件与内存实现
pub mod oauth;
pub mod session;
pub mod storage;
