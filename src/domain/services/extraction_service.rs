// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use chrono::{DateTime, Utc};
use scraper::{ElementRef, Html, Selector};
use thiserror::Error;
use tracing::debug;

use crate::config::settings::SourceSettings;
use crate::domain::models::Record;

/// 单批次最多处理的候选条目数
pub const MAX_RECORDS: usize = 50;

/// 提取错误类型
#[derive(Error, Debug)]
pub enum ExtractionError {
    /// CSS 选择器无法解析
    #[error("Invalid selector `{selector}`: {message}")]
    InvalidSelector { selector: String, message: String },
}

/// 提取服务
///
/// 负责把列表页 HTML 转换为有序的 [`Record`] 序列。纯转换，没有网络或存储副作用。
pub struct ExtractionService {
    item_selector: Selector,
    title_selector: Selector,
    max_records: usize,
}

impl ExtractionService {
    /// 创建提取服务
    ///
    /// # 参数
    ///
    /// * `item_selector` - 候选条目选择器
    /// * `title_selector` - 条目内标题链接选择器
    /// * `max_records` - 最多处理的候选条目数，超过 [`MAX_RECORDS`] 时按上限截断
    pub fn new(
        item_selector: &str,
        title_selector: &str,
        max_records: usize,
    ) -> Result<Self, ExtractionError> {
        Ok(Self {
            item_selector: parse_selector(item_selector)?,
            title_selector: parse_selector(title_selector)?,
            max_records: max_records.min(MAX_RECORDS),
        })
    }

    /// 根据抓取源配置创建提取服务
    pub fn from_settings(settings: &SourceSettings) -> Result<Self, ExtractionError> {
        Self::new(
            &settings.item_selector,
            &settings.title_selector,
            settings.max_records,
        )
    }

    /// 提取记录
    ///
    /// 只处理前 `max_records` 个候选节点；缺少标题或链接的候选被跳过，
    /// 其余记录保持页面顺序。页面结构完全变化时返回空序列而不是错误。
    ///
    /// # 参数
    ///
    /// * `html` - 原始页面内容
    /// * `scraped_at` - 本批次统一使用的抓取时间
    pub fn extract(&self, html: &str, scraped_at: DateTime<Utc>) -> Vec<Record> {
        let document = Html::parse_document(html);
        let mut records = Vec::with_capacity(self.max_records);
        let mut skipped = 0usize;

        for candidate in document.select(&self.item_selector).take(self.max_records) {
            match self.extract_candidate(candidate, scraped_at) {
                Some(record) => records.push(record),
                None => skipped += 1,
            }
        }

        if skipped > 0 {
            debug!("Skipped {} malformed candidates", skipped);
        }

        records
    }

    fn extract_candidate(&self, candidate: ElementRef<'_>, scraped_at: DateTime<Utc>) -> Option<Record> {
        let link = candidate.select(&self.title_selector).next()?;

        let title = link.text().collect::<String>().trim().to_string();
        if title.is_empty() {
            return None;
        }

        let url = link.value().attr("href")?.trim();
        if url.is_empty() {
            return None;
        }

        Some(Record {
            id: candidate.value().attr("id").map(|id| id.to_string()),
            title,
            url: url.to_string(),
            scraped_at,
        })
    }
}

fn parse_selector(selector: &str) -> Result<Selector, ExtractionError> {
    Selector::parse(selector).map_err(|e| ExtractionError::InvalidSelector {
        selector: selector.to_string(),
        message: e.to_string(),
    })
}

#[cfg(test)]
#[path = "extraction_service_test.rs"]
mod tests;
