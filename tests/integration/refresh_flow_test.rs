// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use super::helpers::{create_test_app, mount_page, LATEST_KEY, LISTING_PAGE};
use restaverse::application::usecases::refresh_latest::RefreshError;
use restaverse::domain::models::ResultSet;
use restaverse::domain::services::latest_result_store::LatestResultStore;
use restaverse::infrastructure::storage::LocalStorage;
use std::sync::Arc;
use wiremock::matchers::{header, method, path};
use wiremock::{Mock, ResponseTemplate};

/// 刷新后读取应看到本次发布的条目
#[tokio::test]
async fn refresh_publishes_extracted_records() {
    let app = create_test_app().await;

    let published = app.refresh.execute().await.unwrap();
    let latest = app.store.get_latest().await;

    assert_eq!(published.count, 3);
    assert_eq!(latest.count, latest.items.len());
    let titles: Vec<&str> = latest.items.iter().map(|r| r.title.as_str()).collect();
    assert_eq!(titles, vec!["First story", "Second story", "Ask HN: 日本語"]);
    assert_eq!(latest.items[2].url, "item?id=104");
    assert!(latest.updated_at.is_some());
}

/// 持久化镜像与内存结果一致，并保留非 ASCII 字符
#[tokio::test]
async fn refresh_writes_durable_mirror() {
    let app = create_test_app().await;

    let published = app.refresh.execute().await.unwrap();

    let raw = tokio::fs::read_to_string(app.data_dir.path().join(LATEST_KEY))
        .await
        .unwrap();
    assert!(raw.contains("日本語"));
    let mirrored: ResultSet = serde_json::from_str(&raw).unwrap();
    assert_eq!(&mirrored, published.as_ref());
}

/// 上游返回错误状态时保留上一次结果
#[tokio::test]
async fn upstream_error_keeps_previous_result() {
    let app = create_test_app().await;
    let first = app.refresh.execute().await.unwrap();

    mount_page(&app.source, 503, "unavailable").await;
    let err = app.refresh.execute().await.unwrap_err();

    assert!(matches!(err, RefreshError::UpstreamStatus(503)));
    assert_eq!(app.store.get_latest().await, first);
}

/// 页面结构变化时发布空结果集
#[tokio::test]
async fn layout_change_publishes_empty_result() {
    let app = create_test_app().await;
    app.refresh.execute().await.unwrap();

    mount_page(&app.source, 200, "<html><body><p>redesigned</p></body></html>").await;
    let published = app.refresh.execute().await.unwrap();

    assert_eq!(published.count, 0);
    assert!(published.items.is_empty());
    assert!(published.updated_at.is_some());
    assert_eq!(app.store.get_latest().await.count, 0);
}

/// 新进程在没有刷新前读取已有的持久化镜像
#[tokio::test]
async fn restart_serves_durable_mirror() {
    let app = create_test_app().await;
    let published = app.refresh.execute().await.unwrap();

    let storage = Arc::new(LocalStorage::new(app.data_dir.path()));
    let restarted = LatestResultStore::new(storage, LATEST_KEY);

    assert_eq!(restarted.get_latest().await, published);
    assert!(restarted.current().is_none());
}

/// 抓取请求携带配置的 User-Agent
#[tokio::test]
async fn refresh_sends_configured_user_agent() {
    let app = create_test_app().await;
    app.source.reset().await;
    Mock::given(method("GET"))
        .and(path("/"))
        .and(header("user-agent", app.settings.source.user_agent.as_str()))
        .respond_with(ResponseTemplate::new(200).set_body_string(LISTING_PAGE))
        .mount(&app.source)
        .await;

    let published = app.refresh.execute().await.unwrap();

    assert_eq!(published.count, 3);
}
