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

use axum::extract::{Extension, Json};
use std::sync::Arc;
use tracing::info;

use crate::{
    application::{
        dto::scrape_response::LiveScrapeResponseDto, usecases::refresh_latest::RefreshLatestUseCase,
    },
    presentation::{errors::AppError, extractors::current_user::CurrentUser},
};

/// 立即刷新
///
/// 同步执行一次抓取并发布，返回刚发布的条目。抓取失败时返回 500，缓存保持不变
pub async fn scrape_now(
    CurrentUser(user): CurrentUser,
    Extension(use_case): Extension<Arc<RefreshLatestUseCase>>,
) -> Result<Json<LiveScrapeResponseDto>, AppError> {
    info!(
        "On-demand refresh requested by {}",
        user.login.as_deref().unwrap_or("unknown")
    );

    let result = use_case.execute().await?;
    Ok(Json(LiveScrapeResponseDto::from(result.as_ref())))
}
