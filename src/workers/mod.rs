// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

/// 工作器模块
///
/// 提供后台定时刷新与工作器生命周期管理
pub mod manager;
pub mod refresh_worker;

pub use manager::WorkerManager;
pub use refresh_worker::RefreshWorker;
