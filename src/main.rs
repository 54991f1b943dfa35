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

use restaverse::application::usecases::refresh_latest::RefreshLatestUseCase;
use restaverse::config::settings::Settings;
use restaverse::domain::services::extraction_service::ExtractionService;
use restaverse::domain::services::latest_result_store::LatestResultStore;
use restaverse::engines::reqwest_engine::ReqwestEngine;
use restaverse::infrastructure::oauth::OAuthClient;
use restaverse::infrastructure::session::SessionStore;
use restaverse::infrastructure::storage::LocalStorage;
use restaverse::presentation::routes::{self, AppContext};
use restaverse::workers::manager::WorkerManager;
use std::sync::Arc;
use tokio::net::TcpListener;
use tracing::{info, warn};

use restaverse::utils::telemetry;

/// 主函数
///
/// 应用程序入口点，负责初始化所有组件并启动服务
#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // 1. Initialize logging
    telemetry::init_telemetry();
    info!("Starting restaverse...");

    // 2. Load configuration
    let settings = Arc::new(Settings::new()?);
    info!("Configuration loaded");

    // 3. Storage and latest-result store
    let storage = Arc::new(LocalStorage::new(settings.storage.local_path.clone()));
    let store = Arc::new(LatestResultStore::new(
        storage,
        settings.storage.latest_key.clone(),
    ));
    info!("Durable mirror at {}/{}", settings.storage.local_path, settings.storage.latest_key);

    // 4. Engine, extractor and refresh use case
    let engine = Arc::new(ReqwestEngine::new()?);
    let extractor = Arc::new(ExtractionService::from_settings(&settings.source)?);
    let refresh = Arc::new(RefreshLatestUseCase::from_settings(
        engine,
        extractor,
        store.clone(),
        &settings.source,
    ));

    // 5. Warm up, then start the timer
    let worker_manager = WorkerManager::new(refresh.clone(), settings.refresh.interval());
    if settings.refresh.warm_up {
        worker_manager.warm_up().await;
    }
    worker_manager.start_refresh_worker();

    // 6. Sessions and OAuth
    if !settings.auth.oauth_configured() {
        warn!("OAuth is not configured; /auth/login will return 500");
    }
    let sessions = Arc::new(SessionStore::from_settings(&settings.auth));
    let oauth = Arc::new(OAuthClient::new(settings.auth.clone())?);

    // 7. Start HTTP server
    let app = routes::app(AppContext {
        settings: settings.clone(),
        store,
        refresh,
        sessions,
        oauth,
    });

    let addr = format!("{}:{}", settings.server.host, settings.server.port);
    let listener = TcpListener::bind(&addr).await?;
    info!("Server listening on {}", addr);

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    worker_manager.shutdown();
    info!("Server stopped");

    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        warn!("Failed to listen for shutdown signal: {}", e);
        std::future::pending::<()>().await;
    }
    info!("Shutdown signal received");
}
