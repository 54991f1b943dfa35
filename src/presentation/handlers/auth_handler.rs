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

use axum::{
    extract::{Extension, Json, Query},
    http::{header, HeaderMap},
    response::{IntoResponse, Redirect},
};
use serde::Deserialize;
use serde_json::json;
use std::sync::Arc;
use tracing::info;

use crate::{
    config::settings::Settings,
    domain::models::UserProfile,
    infrastructure::{oauth::OAuthClient, session::SessionStore},
    presentation::{
        errors::AppError,
        extractors::current_user::CurrentUser,
        middleware::auth_middleware::{clear_session_cookie, read_cookie, session_cookie},
    },
};

#[derive(Debug, Deserialize)]
pub struct CallbackQuery {
    pub code: String,
}

/// 跳转到 OAuth 授权页
pub async fn login(
    Extension(oauth): Extension<Arc<OAuthClient>>,
) -> Result<Redirect, AppError> {
    let url = oauth.authorize_url()?;
    Ok(Redirect::to(url.as_str()))
}

/// OAuth 回调
///
/// 换取令牌、读取用户资料并建立会话，随后跳转回前端
pub async fn callback(
    Extension(oauth): Extension<Arc<OAuthClient>>,
    Extension(sessions): Extension<Arc<SessionStore>>,
    Extension(settings): Extension<Arc<Settings>>,
    Query(query): Query<CallbackQuery>,
) -> Result<impl IntoResponse, AppError> {
    let access_token = oauth.exchange_code(&query.code).await?;
    let user = oauth.fetch_user(&access_token).await?;

    info!(
        "User {} signed in",
        user.login.as_deref().unwrap_or("unknown")
    );

    let token = sessions.create(user);
    let cookie = session_cookie(
        &settings.auth.cookie_name,
        &token,
        settings.auth.session_ttl_secs,
        settings.auth.cookie_secure,
    );
    let target = format!("{}/", settings.server.frontend_origin.trim_end_matches('/'));

    Ok(([(header::SET_COOKIE, cookie)], Redirect::to(&target)))
}

/// 注销
pub async fn logout(
    Extension(sessions): Extension<Arc<SessionStore>>,
    Extension(settings): Extension<Arc<Settings>>,
    headers: HeaderMap,
) -> impl IntoResponse {
    let cookie_name = &settings.auth.cookie_name;
    if let Some(token) = read_cookie(&headers, cookie_name) {
        sessions.remove(&token);
    }

    (
        [(header::SET_COOKIE, clear_session_cookie(cookie_name))],
        Json(json!({ "message": "Logged out" })),
    )
}

/// 当前登录用户
pub async fn me(CurrentUser(user): CurrentUser) -> Json<UserProfile> {
    Json(user)
}
