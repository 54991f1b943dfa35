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

use crate::infrastructure::session::SessionStore;
use crate::presentation::errors::AuthError;
use crate::presentation::extractors::current_user::CurrentUser;
use axum::{
    extract::{Request, State},
    http::{header, HeaderMap},
    middleware::Next,
    response::Response,
};
use tracing::debug;

use std::sync::Arc;

/// 认证状态
#[derive(Clone)]
pub struct AuthState {
    /// 会话存储
    pub sessions: Arc<SessionStore>,
    /// 会话 Cookie 名称
    pub cookie_name: String,
}

/// 认证中间件
///
/// 校验请求中的会话 Cookie，并把当前用户注入请求扩展
///
/// # 参数
///
/// * `state` - 认证状态
/// * `req` - HTTP请求
/// * `next` - 下一个中间件
///
/// # 返回值
///
/// * `Ok(Response)` - 认证成功的响应
/// * `Err(AuthError)` - 认证失败，渲染为 401
pub async fn auth_middleware(
    State(state): State<AuthState>,
    mut req: Request,
    next: Next,
) -> Result<Response, AuthError> {
    debug!("AuthMiddleware processing path: {}", req.uri().path());

    let token = read_cookie(req.headers(), &state.cookie_name).ok_or(AuthError::MissingSession)?;

    let user = state.sessions.read(&token).ok_or_else(|| {
        debug!("Rejected session cookie");
        AuthError::InvalidSession
    })?;

    req.extensions_mut().insert(CurrentUser(user));
    Ok(next.run(req).await)
}

/// 从 Cookie 头中读取指定名称的值
pub fn read_cookie(headers: &HeaderMap, name: &str) -> Option<String> {
    headers
        .get_all(header::COOKIE)
        .iter()
        .filter_map(|value| value.to_str().ok())
        .flat_map(|value| value.split(';'))
        .filter_map(|pair| pair.trim().split_once('='))
        .find(|(key, _)| *key == name)
        .map(|(_, value)| value.trim_matches('"').to_string())
        .filter(|value| !value.is_empty())
}

/// 构造会话 Cookie
pub fn session_cookie(name: &str, token: &str, max_age_secs: u64, secure: bool) -> String {
    let mut cookie = format!(
        "{}={}; Path=/; HttpOnly; SameSite=Lax; Max-Age={}",
        name, token, max_age_secs
    );
    if secure {
        cookie.push_str("; Secure");
    }
    cookie
}

/// 构造清除会话的 Cookie
pub fn clear_session_cookie(name: &str) -> String {
    format!("{}=; Path=/; HttpOnly; SameSite=Lax; Max-Age=0", name)
}

#[cfg(test)]
#[path = "auth_middleware_test.rs"]
mod tests;
