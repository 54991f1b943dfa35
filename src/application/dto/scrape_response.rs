// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use serde::{Deserialize, Serialize};

use crate::domain::models::{Record, ResultSet};

/// 实时抓取响应数据传输对象
///
/// 按需刷新接口直接返回本次发布的记录
#[derive(Debug, Deserialize, Serialize)]
pub struct LiveScrapeResponseDto {
    /// 数据来源，固定为 `live`
    pub source: String,
    /// 条目数量
    pub count: usize,
    /// 本次发布的条目
    pub items: Vec<Record>,
}

impl From<&ResultSet> for LiveScrapeResponseDto {
    fn from(result: &ResultSet) -> Self {
        Self {
            source: "live".to_string(),
            count: result.items.len(),
            items: result.items.clone(),
        }
    }
}
