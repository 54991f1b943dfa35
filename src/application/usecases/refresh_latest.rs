// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use std::collections::HashMap;
use std::sync::Arc;
use std::time::Duration;

use chrono::Utc;
use thiserror::Error;
use tracing::{info, warn};

use crate::config::settings::SourceSettings;
use crate::domain::models::ResultSet;
use crate::domain::services::extraction_service::ExtractionService;
use crate::domain::services::latest_result_store::LatestResultStore;
use crate::engines::traits::{EngineError, ScrapeRequest, ScraperEngine};

// === Section: Errors ===

/// 刷新错误类型
///
/// 任何刷新错误都发生在发布之前，之前的结果集保持不变
#[derive(Error, Debug)]
pub enum RefreshError {
    /// 网络错误或超时
    #[error("Fetch failed: {0}")]
    Fetch(#[from] EngineError),
    /// 源站返回非 2xx 状态码
    #[error("Source returned status {0}")]
    UpstreamStatus(u16),
}

// === Section: Use Case Definition ===

/// 抓取并发布用例
///
/// 定时器和按需接口共用的唯一入口：抓取 -> 提取 -> 发布
pub struct RefreshLatestUseCase {
    engine: Arc<dyn ScraperEngine>,
    extractor: Arc<ExtractionService>,
    store: Arc<LatestResultStore>,
    source_url: String,
    timeout: Duration,
    headers: HashMap<String, String>,
}

// === Section: Implementation ===

impl RefreshLatestUseCase {
    pub fn new(
        engine: Arc<dyn ScraperEngine>,
        extractor: Arc<ExtractionService>,
        store: Arc<LatestResultStore>,
        source_url: impl Into<String>,
        timeout: Duration,
    ) -> Self {
        Self {
            engine,
            extractor,
            store,
            source_url: source_url.into(),
            timeout,
            headers: HashMap::new(),
        }
    }

    /// 设置每次抓取附带的请求头
    pub fn with_headers(mut self, headers: HashMap<String, String>) -> Self {
        self.headers = headers;
        self
    }

    pub fn from_settings(
        engine: Arc<dyn ScraperEngine>,
        extractor: Arc<ExtractionService>,
        store: Arc<LatestResultStore>,
        settings: &SourceSettings,
    ) -> Self {
        Self::new(engine, extractor, store, settings.url.clone(), settings.timeout())
            .with_headers(settings.request_headers())
    }

    /// 执行一次完整刷新
    ///
    /// 抓取失败（网络错误、超时、非 2xx）时不触碰存储直接返回错误。
    /// 提取结果为空也照常发布。
    ///
    /// # 返回值
    ///
    /// * `Ok(Arc<ResultSet>)` - 本次发布的结果集
    /// * `Err(RefreshError)` - 抓取失败
    pub async fn execute(&self) -> Result<Arc<ResultSet>, RefreshError> {
        info!("Refreshing latest results from {}", self.source_url);

        let request = ScrapeRequest::new(self.source_url.clone(), self.timeout)
            .with_headers(self.headers.clone());
        let response = match self.engine.scrape(&request).await {
            Ok(response) => response,
            Err(e) => {
                warn!("Fetch of {} failed: {}", self.source_url, e);
                return Err(e.into());
            }
        };

        if !response.is_success() {
            warn!(
                "Fetch of {} returned status {}",
                self.source_url, response.status_code
            );
            return Err(RefreshError::UpstreamStatus(response.status_code));
        }

        let scraped_at = Utc::now();
        let records = self.extractor.extract(&response.content, scraped_at);
        if records.is_empty() {
            warn!("No records extracted from {}", self.source_url);
        }

        let published = self.store.publish(records).await;
        info!(
            "Refresh finished: {} records in {}ms fetch",
            published.count, response.response_time_ms
        );
        Ok(published)
    }
}
