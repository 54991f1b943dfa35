// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

/// 领域模型模块
///
/// 该模块定义了系统的核心业务实体：
/// - 抓取记录（Record）：从列表页提取的单个条目
/// - 结果集（ResultSet）：最近一次发布的完整快照
/// - 用户资料（UserProfile）：受保护接口使用的当前用户上下文
pub mod record;
pub mod user;

pub use record::{Record, ResultSet};
pub use user::UserProfile;
