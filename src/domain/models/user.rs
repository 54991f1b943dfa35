// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use serde::{Deserialize, Serialize};

/// 已登录用户资料
///
/// 来自 OAuth 提供方的用户接口，受保护接口只把它当作不透明的“当前用户”上下文
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserProfile {
    pub id: Option<u64>,
    pub name: Option<String>,
    pub login: Option<String>,
    pub avatar_url: Option<String>,
}
