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

use super::helpers::{body_json, create_test_app, mount_page};
use axum::{
    body::Body,
    http::{header, Method, Request, StatusCode},
};
use serde_json::json;
use tower::util::ServiceExt;

fn get(uri: &str, cookie: Option<&str>) -> Request<Body> {
    let mut builder = Request::builder().uri(uri);
    if let Some(cookie) = cookie {
        builder = builder.header(header::COOKIE, cookie);
    }
    builder.body(Body::empty()).unwrap()
}

/// 存活检查无需登录
#[tokio::test]
async fn ping_works() {
    let app = create_test_app().await;

    let response = app.router.oneshot(get("/ping", None)).await.unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(body_json(response).await, json!({ "status": "ok" }));
}

/// 受保护接口在未登录时返回 401，且不触发抓取
#[tokio::test]
async fn protected_routes_return_401_without_session() {
    let app = create_test_app().await;

    for uri in ["/data", "/scrape", "/auth/me"] {
        let response = app.router.clone().oneshot(get(uri, None)).await.unwrap();
        assert_eq!(response.status(), StatusCode::UNAUTHORIZED, "{}", uri);
        assert_eq!(
            body_json(response).await,
            json!({ "detail": "Not authenticated" })
        );
    }

    assert!(app.source.received_requests().await.unwrap().is_empty());
    assert!(app.store.current().is_none());
}

/// 冷启动时 /data 返回空结果集
#[tokio::test]
async fn data_returns_empty_result_on_cold_start() {
    let app = create_test_app().await;
    let cookie = app.login_cookie();

    let response = app
        .router
        .clone()
        .oneshot(get("/data", Some(&cookie)))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(
        body_json(response).await,
        json!({ "updated_at": null, "count": 0, "items": [] })
    );
    assert!(app.source.received_requests().await.unwrap().is_empty());
}

/// /scrape 同步刷新并返回本次结果，随后 /data 读到同样的条目
#[tokio::test]
async fn scrape_returns_live_result_and_updates_data() {
    let app = create_test_app().await;
    let cookie = app.login_cookie();

    let response = app
        .router
        .clone()
        .oneshot(get("/scrape", Some(&cookie)))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    let live = body_json(response).await;
    assert_eq!(live["source"], "live");
    assert_eq!(live["count"], 3);
    assert_eq!(live["items"][0]["id"], "101");

    let response = app
        .router
        .clone()
        .oneshot(get("/data", Some(&cookie)))
        .await
        .unwrap();
    let data = body_json(response).await;
    assert_eq!(data["count"], 3);
    assert_eq!(data["items"], live["items"]);
    assert!(data["updated_at"].as_str().unwrap().ends_with('Z'));
}

/// 上游失败时 /scrape 返回 500 并保留缓存
#[tokio::test]
async fn scrape_upstream_failure_returns_500() {
    let app = create_test_app().await;
    let cookie = app.login_cookie();
    let previous = app.refresh.execute().await.unwrap();

    mount_page(&app.source, 500, "boom").await;
    let response = app
        .router
        .clone()
        .oneshot(get("/scrape", Some(&cookie)))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
    let body = body_json(response).await;
    assert!(body["detail"].as_str().unwrap().contains("500"));
    assert_eq!(app.store.get_latest().await, previous);
}

/// /auth/me 返回当前用户
#[tokio::test]
async fn me_returns_current_user() {
    let app = create_test_app().await;
    let cookie = app.login_cookie();

    let response = app
        .router
        .clone()
        .oneshot(get("/auth/me", Some(&cookie)))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(body_json(response).await["login"], "ada");
}

/// 注销后会话失效
#[tokio::test]
async fn logout_clears_session() {
    let app = create_test_app().await;
    let cookie = app.login_cookie();

    let response = app
        .router
        .clone()
        .oneshot(
            Request::builder()
                .method(Method::POST)
                .uri("/auth/logout")
                .header(header::COOKIE, &cookie)
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let set_cookie = response.headers()[header::SET_COOKIE].to_str().unwrap().to_string();
    assert!(set_cookie.contains("Max-Age=0"));
    assert_eq!(
        body_json(response).await,
        json!({ "message": "Logged out" })
    );

    let response = app
        .router
        .clone()
        .oneshot(get("/data", Some(&cookie)))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
}

/// 未配置 OAuth 时登录返回 500
#[tokio::test]
async fn login_without_oauth_config_returns_500() {
    let app = create_test_app().await;

    let response = app.router.oneshot(get("/auth/login", None)).await.unwrap();

    assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
    let body = body_json(response).await;
    assert!(body["detail"]
        .as_str()
        .unwrap()
        .starts_with("OAuth is not configured"));
}
