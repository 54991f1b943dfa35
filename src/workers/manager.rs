// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use crate::application::usecases::refresh_latest::RefreshLatestUseCase;
use crate::workers::refresh_worker::RefreshWorker;
use parking_lot::Mutex;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::time::Duration;
use tokio::task::JoinHandle;
use tracing::{debug, error, info, warn};

/// 工作管理器
///
/// 管理进程内唯一的定时刷新工作器，重复启动是空操作
pub struct WorkerManager {
    use_case: Arc<RefreshLatestUseCase>,
    interval: Duration,
    started: AtomicBool,
    handle: Mutex<Option<JoinHandle<()>>>,
}

impl WorkerManager {
    pub fn new(use_case: Arc<RefreshLatestUseCase>, interval: Duration) -> Self {
        Self {
            use_case,
            interval,
            started: AtomicBool::new(false),
            handle: Mutex::new(None),
        }
    }

    /// 启动前预热缓存
    ///
    /// 尽力而为：失败只记录警告，读取会回退到持久化镜像或空结果集
    pub async fn warm_up(&self) {
        match self.use_case.execute().await {
            Ok(result) => info!("Warm-up published {} records", result.count),
            Err(e) => warn!("Warm-up refresh failed, continuing startup: {}", e),
        }
    }

    /// 启动定时刷新工作器
    ///
    /// # 返回值
    ///
    /// 本次调用实际启动了工作器返回 `true`；已在运行或间隔为零时返回 `false`
    pub fn start_refresh_worker(&self) -> bool {
        if self.interval.is_zero() {
            error!("Refresh interval must be greater than zero, timer not started");
            return false;
        }

        if self
            .started
            .compare_exchange(false, true, Ordering::AcqRel, Ordering::Acquire)
            .is_err()
        {
            debug!("Refresh worker already running");
            return false;
        }

        let worker = RefreshWorker::new(self.use_case.clone(), self.interval);
        *self.handle.lock() = Some(worker.start());
        true
    }

    /// 停止定时刷新工作器
    pub fn shutdown(&self) {
        if let Some(handle) = self.handle.lock().take() {
            info!("Shutting down refresh worker...");
            handle.abort();
        }
    }
}
