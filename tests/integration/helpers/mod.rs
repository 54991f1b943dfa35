// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use axum::{body::to_bytes, response::Response, Router};
use restaverse::application::usecases::refresh_latest::RefreshLatestUseCase;
use restaverse::config::settings::Settings;
use restaverse::domain::models::UserProfile;
use restaverse::domain::services::extraction_service::ExtractionService;
use restaverse::domain::services::latest_result_store::LatestResultStore;
use restaverse::engines::reqwest_engine::ReqwestEngine;
use restaverse::infrastructure::oauth::OAuthClient;
use restaverse::infrastructure::session::SessionStore;
use restaverse::infrastructure::storage::LocalStorage;
use restaverse::presentation::routes::{self, AppContext};
use serde_json::Value;
use std::sync::Arc;
use tempfile::TempDir;
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

/// 三条有效条目加一条缺少链接的条目
pub const LISTING_PAGE: &str = r#"
<html><body><table>
  <tr class="athing" id="101"><td><span class="titleline"><a href="https://example.com/a">First story</a></span></td></tr>
  <tr class="athing" id="102"><td><span class="titleline"><a href="https://example.com/b">Second story</a></span></td></tr>
  <tr class="athing" id="103"><td><span class="titleline"><a>Broken story</a></span></td></tr>
  <tr class="athing" id="104"><td><span class="titleline"><a href="item?id=104">Ask HN: 日本語</a></span></td></tr>
</table></body></html>
"#;

pub const LATEST_KEY: &str = "latest_articles.json";

#[allow(dead_code)]
pub struct TestApp {
    pub router: Router,
    pub store: Arc<LatestResultStore>,
    pub refresh: Arc<RefreshLatestUseCase>,
    pub sessions: Arc<SessionStore>,
    pub settings: Arc<Settings>,
    pub source: MockServer,
    pub data_dir: TempDir,
}

impl TestApp {
    /// 建立会话并返回 Cookie 头
    pub fn login_cookie(&self) -> String {
        let token = self.sessions.create(UserProfile {
            id: Some(1),
            name: Some("Ada".to_string()),
            login: Some("ada".to_string()),
            avatar_url: None,
        });
        format!("{}={}", self.settings.auth.cookie_name, token)
    }
}

pub fn test_settings(source_url: &str, data_dir: &str) -> Settings {
    Settings::builder()
        .unwrap()
        .set_override("source.url", source_url)
        .unwrap()
        .set_override("source.timeout_secs", 2)
        .unwrap()
        .set_override("storage.local_path", data_dir)
        .unwrap()
        .set_override("refresh.warm_up", false)
        .unwrap()
        .build()
        .unwrap()
        .try_deserialize()
        .unwrap()
}

pub async fn mount_page(server: &MockServer, status: u16, body: &str) {
    server.reset().await;
    Mock::given(method("GET"))
        .and(path("/"))
        .respond_with(
            ResponseTemplate::new(status)
                .insert_header("content-type", "text/html; charset=utf-8")
                .set_body_string(body),
        )
        .mount(server)
        .await;
}

pub async fn create_test_app() -> TestApp {
    let source = MockServer::start().await;
    mount_page(&source, 200, LISTING_PAGE).await;

    let data_dir = tempfile::tempdir().unwrap();
    let settings = Arc::new(test_settings(
        &format!("{}/", source.uri()),
        data_dir.path().to_str().unwrap(),
    ));

    let storage = Arc::new(LocalStorage::new(data_dir.path()));
    let store = Arc::new(LatestResultStore::new(
        storage,
        settings.storage.latest_key.clone(),
    ));
    let engine = Arc::new(ReqwestEngine::new().unwrap());
    let extractor = Arc::new(ExtractionService::from_settings(&settings.source).unwrap());
    let refresh = Arc::new(RefreshLatestUseCase::from_settings(
        engine,
        extractor,
        store.clone(),
        &settings.source,
    ));
    let sessions = Arc::new(SessionStore::from_settings(&settings.auth));
    let oauth = Arc::new(OAuthClient::new(settings.auth.clone()).unwrap());

    let router = routes::app(AppContext {
        settings: settings.clone(),
        store: store.clone(),
        refresh: refresh.clone(),
        sessions: sessions.clone(),
        oauth,
    });

    TestApp {
        router,
        store,
        refresh,
        sessions,
        settings,
        source,
        data_dir,
    }
}

pub async fn body_json(response: Response) -> Value {
    let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    serde_json::from_slice(&bytes).unwrap()
}
