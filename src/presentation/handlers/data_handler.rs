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

use crate::{
    domain::{models::ResultSet, services::latest_result_store::LatestResultStore},
    presentation::extractors::current_user::CurrentUser,
};

/// 读取最新结果
///
/// 不触发任何网络请求
pub async fn get_data(
    _user: CurrentUser,
    Extension(store): Extension<Arc<LatestResultStore>>,
) -> Json<ResultSet> {
    let latest = store.get_latest().await;
    Json(latest.as_ref().clone())
}
