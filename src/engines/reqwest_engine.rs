// Copyright 2025 Kirky.X
//
// Licensed under the Apache License, Version 2.0 (the "License");
// you may not use this file except in compliance with the License.
// You may obtain a copy of the License at
//
//     http://www.apache.org/licenses/LICENSE-2.0
//
// Unless required by applicable law or agreed to in writing, software
// distributed under the License is distributed on an "AS IS" BASIS,
// WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
// See the License for the specific language governing permissions and
// limitations under the License.

use crate::engines::traits::{EngineError, ScrapeRequest, ScrapeResponse, ScraperEngine};
use async_trait::async_trait;
use reqwest::header::{HeaderMap, HeaderName, HeaderValue};
use std::time::Instant;
use tracing::warn;

/// 抓取引擎
///
/// 基于reqwest实现的基本HTTP抓取引擎，客户端在引擎生命周期内复用。
/// User-Agent 等请求头随每个 [`ScrapeRequest`] 传入。
pub struct ReqwestEngine {
    client: reqwest::Client,
}

impl ReqwestEngine {
    /// 创建抓取引擎
    pub fn new() -> Result<Self, EngineError> {
        let client = reqwest::Client::builder().build()?;
        Ok(Self { client })
    }
}

#[async_trait]
impl ScraperEngine for ReqwestEngine {
    /// 执行HTTP抓取
    ///
    /// # 参数
    ///
    /// * `request` - 抓取请求
    ///
    /// # 返回值
    ///
    /// * `Ok(ScrapeResponse)` - 抓取响应
    /// * `Err(EngineError)` - 连接失败、超时或读取响应体失败
    async fn scrape(&self, request: &ScrapeRequest) -> Result<ScrapeResponse, EngineError> {
        // Build headers
        let mut headers = HeaderMap::new();
        for (k, v) in &request.headers {
            match (
                HeaderName::from_bytes(k.as_bytes()),
                HeaderValue::from_str(v),
            ) {
                (Ok(k), Ok(v)) => {
                    headers.insert(k, v);
                }
                _ => warn!("Skipping invalid request header {:?}", k),
            }
        }

        let start = Instant::now();
        let timeout_error = |e: reqwest::Error| {
            if e.is_timeout() {
                EngineError::Timeout(request.timeout)
            } else {
                EngineError::RequestFailed(e)
            }
        };

        // The timeout covers both the response headers and the body
        let response = self
            .client
            .get(&request.url)
            .headers(headers)
            .timeout(request.timeout)
            .send()
            .await
            .map_err(timeout_error)?;

        let status_code = response.status().as_u16();

        let content = response.text().await.map_err(timeout_error)?;

        Ok(ScrapeResponse {
            status_code,
            content,
            response_time_ms: start.elapsed().as_millis() as u64,
        })
    }
}

#[cfg(test)]
#[path = "reqwest_engine_test.rs"]
mod tests;
