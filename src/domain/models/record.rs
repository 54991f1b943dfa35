// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// 单条抓取记录
///
/// 从列表页的一个候选条目中提取，标题保证非空
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Record {
    /// 源站分配的标识符，可能缺失
    pub id: Option<String>,
    /// 去除首尾空白后的标题
    pub title: String,
    /// 链接目标（绝对或相对）
    pub url: String,
    /// 本批次的抓取时间（同一批次共享）
    pub scraped_at: DateTime<Utc>,
}

/// 最新结果集
///
/// 每次发布整体替换，不做合并。`count` 由 [`ResultSet::new`] 根据 `items` 计算。
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ResultSet {
    /// 发布时间，从未发布过时为 `None`
    pub updated_at: Option<DateTime<Utc>>,
    /// 条目数量
    pub count: usize,
    /// 按源页面顺序排列的条目
    pub items: Vec<Record>,
}

impl ResultSet {
    /// 以发布时间构造结果集
    pub fn new(items: Vec<Record>, updated_at: DateTime<Utc>) -> Self {
        Self {
            updated_at: Some(updated_at),
            count: items.len(),
            items,
        }
    }

    /// 冷启动时的空结果集
    pub fn empty() -> Self {
        Self {
            updated_at: None,
            count: 0,
            items: Vec::new(),
        }
    }
}

impl Default for ResultSet {
    fn default() -> Self {
        Self::empty()
    }
}
