// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use crate::application::usecases::refresh_latest::RefreshLatestUseCase;
use std::sync::Arc;
use std::time::Duration;
use tokio::task::JoinHandle;
use tokio::time::{interval_at, Instant, MissedTickBehavior};
use tracing::{error, info};

/// 定时刷新工作器
///
/// 按固定周期调用刷新用例，与接口流量无关。首次触发在一个周期之后，
/// 启动时的预热由 [`crate::workers::manager::WorkerManager::warm_up`] 单独完成。
pub struct RefreshWorker {
    use_case: Arc<RefreshLatestUseCase>,
    interval: Duration,
}

impl RefreshWorker {
    pub fn new(use_case: Arc<RefreshLatestUseCase>, interval: Duration) -> Self {
        Self { use_case, interval }
    }

    /// 运行工作器
    pub async fn run(&self) {
        if self.interval.is_zero() {
            error!("Refresh interval must be greater than zero, worker exiting");
            return;
        }

        info!(
            "Refresh worker started, interval {}s",
            self.interval.as_secs()
        );

        let mut interval = interval_at(Instant::now() + self.interval, self.interval);
        interval.set_missed_tick_behavior(MissedTickBehavior::Delay);

        loop {
            interval.tick().await;
            self.run_once().await;
        }
    }

    /// 启动后台运行
    pub fn start(self) -> JoinHandle<()> {
        tokio::spawn(async move {
            self.run().await;
        })
    }

    /// 执行一次刷新，错误只记录不传播
    ///
    /// # 返回值
    ///
    /// 刷新成功返回 `true`
    pub async fn run_once(&self) -> bool {
        match self.use_case.execute().await {
            Ok(result) => {
                info!("Scheduled refresh published {} records", result.count);
                true
            }
            Err(e) => {
                error!("Scheduled refresh failed: {}", e);
                false
            }
        }
    }
}

#[cfg(test)]
#[path = "refresh_worker_test.rs"]
mod tests;
