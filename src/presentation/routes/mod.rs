// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use axum::{
    http::{HeaderValue, Method},
    routing::{get, post},
    Extension, Json, Router,
};
use serde_json::{json, Value};
use std::sync::Arc;
use tower_http::{
    catch_panic::CatchPanicLayer,
    cors::{AllowHeaders, CorsLayer},
    trace::TraceLayer,
};
use tracing::warn;

use crate::application::usecases::refresh_latest::RefreshLatestUseCase;
use crate::config::settings::Settings;
use crate::domain::services::latest_result_store::LatestResultStore;
use crate::infrastructure::{oauth::OAuthClient, session::SessionStore};
use crate::presentation::errors::panic_response;
use crate::presentation::handlers::{auth_handler, data_handler, scrape_handler};
use crate::presentation::middleware::auth_middleware::{auth_middleware, AuthState};

/// 路由所需的共享组件
#[derive(Clone)]
pub struct AppContext {
    pub settings: Arc<Settings>,
    pub store: Arc<LatestResultStore>,
    pub refresh: Arc<RefreshLatestUseCase>,
    pub sessions: Arc<SessionStore>,
    pub oauth: Arc<OAuthClient>,
}

/// 创建应用路由
///
/// # 参数
///
/// * `ctx` - 共享组件
///
/// # 返回值
///
/// 返回配置好的路由
pub fn app(ctx: AppContext) -> Router {
    let auth_state = AuthState {
        sessions: ctx.sessions.clone(),
        cookie_name: ctx.settings.auth.cookie_name.clone(),
    };

    let public_routes = Router::new()
        .route("/ping", get(ping))
        .route("/auth/login", get(auth_handler::login))
        .route("/auth/callback", get(auth_handler::callback))
        .route("/auth/logout", post(auth_handler::logout));

    let protected_routes = Router::new()
        .route("/scrape", get(scrape_handler::scrape_now))
        .route("/data", get(data_handler::get_data))
        .route("/auth/me", get(auth_handler::me))
        .layer(axum::middleware::from_fn_with_state(
            auth_state,
            auth_middleware,
        ));

    let router = Router::new()
        .merge(public_routes)
        .merge(protected_routes)
        .layer(Extension(ctx.store))
        .layer(Extension(ctx.refresh))
        .layer(Extension(ctx.sessions))
        .layer(Extension(ctx.oauth));

    with_boundary_layers(router, &ctx.settings.server.frontend_origin)
        .layer(Extension(ctx.settings))
}

/// 外层通用中间件：请求追踪、panic 转 500 `{detail}`、CORS
fn with_boundary_layers(router: Router, frontend_origin: &str) -> Router {
    router
        .layer(TraceLayer::new_for_http())
        .layer(CatchPanicLayer::custom(panic_response))
        .layer(cors_layer(frontend_origin))
}

/// 前端来源的 CORS 配置（允许携带凭据）
fn cors_layer(frontend_origin: &str) -> CorsLayer {
    let cors = CorsLayer::new()
        .allow_methods([Method::GET, Method::POST, Method::OPTIONS])
        .allow_headers(AllowHeaders::mirror_request())
        .allow_credentials(true);

    match HeaderValue::from_str(frontend_origin.trim_end_matches('/')) {
        Ok(origin) => cors.allow_origin(origin),
        Err(e) => {
            warn!("Invalid frontend origin {:?}: {}", frontend_origin, e);
            cors
        }
    }
}

/// 存活检查端点
pub async fn ping() -> Json<Value> {
    Json(json!({ "status": "ok" }))
}
