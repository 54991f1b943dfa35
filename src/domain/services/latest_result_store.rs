// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use chrono::Utc;
use parking_lot::RwLock;
use std::sync::Arc;
use tokio::sync::Mutex;
use tracing::{debug, error, info, warn};

use crate::domain::models::{Record, ResultSet};
use crate::domain::repositories::storage_repository::{StorageError, StorageRepository};

/// 最新结果存储
///
/// 持有进程内唯一的规范结果集，并在每次发布时同步写入持久化镜像。
///
/// 读取顺序为：内存 -> 持久化镜像 -> 空结果集。读取从不访问网络，也不会失败。
/// 内存槽位的替换只在写锁内交换一个 `Arc`，读者只会看到发布前或发布后的完整快照。
pub struct LatestResultStore {
    /// 规范结果集，进程启动后首次发布前为 `None`
    current: RwLock<Option<Arc<ResultSet>>>,
    /// 串行化发布，保证镜像的最终内容与内存中最后一次发布一致
    publish_lock: Mutex<()>,
    storage: Arc<dyn StorageRepository>,
    key: String,
}

impl LatestResultStore {
    /// 创建结果存储
    ///
    /// # 参数
    ///
    /// * `storage` - 持久化镜像所在的存储
    /// * `key` - 镜像使用的固定键名
    pub fn new(storage: Arc<dyn StorageRepository>, key: impl Into<String>) -> Self {
        Self {
            current: RwLock::new(None),
            publish_lock: Mutex::new(()),
            storage,
            key: key.into(),
        }
    }

    /// 发布一批记录
    ///
    /// 以当前 UTC 时间作为 `updated_at` 构造结果集，原子替换内存槽位，
    /// 然后写入持久化镜像。镜像写入失败只记录错误，内存发布不回滚。
    ///
    /// # 返回值
    ///
    /// 返回刚发布的结果集
    pub async fn publish(&self, items: Vec<Record>) -> Arc<ResultSet> {
        let _guard = self.publish_lock.lock().await;

        let result = Arc::new(ResultSet::new(items, Utc::now()));
        *self.current.write() = Some(result.clone());
        info!("Published {} records", result.count);

        if let Err(e) = self.persist(&result).await {
            error!(
                "Failed to write durable copy `{}`, serving from memory: {}",
                self.key, e
            );
        }

        result
    }

    /// 获取最新结果集
    ///
    /// 本进程发布过则返回内存中的结果集；否则原样返回持久化镜像；
    /// 两者都没有时返回空结果集。
    pub async fn get_latest(&self) -> Arc<ResultSet> {
        if let Some(current) = self.current() {
            return current;
        }

        match self.load_durable().await {
            Ok(Some(stored)) => {
                debug!("Serving durable copy `{}`", self.key);
                Arc::new(stored)
            }
            Ok(None) => Arc::new(ResultSet::empty()),
            Err(e) => {
                warn!("Failed to read durable copy `{}`: {}", self.key, e);
                Arc::new(ResultSet::empty())
            }
        }
    }

    /// 本进程内已发布的结果集
    pub fn current(&self) -> Option<Arc<ResultSet>> {
        self.current.read().clone()
    }

    async fn persist(&self, result: &ResultSet) -> Result<(), StorageError> {
        let payload = serde_json::to_vec_pretty(result)?;
        self.storage.save(&self.key, &payload).await
    }

    async fn load_durable(&self) -> Result<Option<ResultSet>, StorageError> {
        match self.storage.get(&self.key).await? {
            Some(bytes) => Ok(Some(serde_json::from_slice(&bytes)?)),
            None => Ok(None),
        }
    }
}

#[cfg(test)]
#[path = "latest_result_store_test.rs"]
mod tests;
