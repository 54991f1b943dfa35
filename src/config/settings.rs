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

use config::builder::DefaultState;
use config::{Config, ConfigBuilder, ConfigError, Environment, File};
use serde::Deserialize;
use std::collections::HashMap;
use std::time::Duration;

/// 应用程序配置设置
///
/// 包含服务器、抓取源、定时刷新、存储和认证等所有配置项
#[derive(Debug, Clone, Deserialize)]
pub struct Settings {
    /// 服务器配置
    pub server: ServerSettings,
    /// 抓取源配置
    pub source: SourceSettings,
    /// 定时刷新配置
    pub refresh: RefreshSettings,
    /// 存储配置
    pub storage: StorageSettings,
    /// 认证配置
    pub auth: AuthSettings,
}

/// 服务器配置设置
#[derive(Debug, Clone, Deserialize)]
pub struct ServerSettings {
    /// 服务器监听主机地址
    pub host: String,
    /// 服务器监听端口
    pub port: u16,
    /// 前端来源（CORS 与登录后跳转）
    pub frontend_origin: String,
}

/// 抓取源配置设置
#[derive(Debug, Clone, Deserialize)]
pub struct SourceSettings {
    /// 列表页URL
    pub url: String,
    /// 请求超时时间（秒）
    pub timeout_secs: u64,
    /// 每次最多处理的候选条目数
    pub max_records: usize,
    /// 候选条目选择器
    pub item_selector: String,
    /// 条目内标题链接选择器
    pub title_selector: String,
    /// 请求使用的 User-Agent
    pub user_agent: String,
}

impl SourceSettings {
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }

    /// 抓取列表页时附带的请求头
    pub fn request_headers(&self) -> HashMap<String, String> {
        HashMap::from([
            ("User-Agent".to_string(), self.user_agent.clone()),
            (
                "Accept".to_string(),
                "text/html,application/xhtml+xml".to_string(),
            ),
        ])
    }
}

/// 定时刷新配置设置
#[derive(Debug, Clone, Deserialize)]
pub struct RefreshSettings {
    /// 刷新间隔（分钟）
    pub interval_minutes: u64,
    /// 启动时是否预热缓存
    pub warm_up: bool,
}

impl RefreshSettings {
    pub fn interval(&self) -> Duration {
        Duration::from_secs(self.interval_minutes * 60)
    }
}

/// 存储配置设置
#[derive(Debug, Clone, Deserialize)]
pub struct StorageSettings {
    /// 本地存储目录
    pub local_path: String,
    /// 最新结果的固定键名
    pub latest_key: String,
}

/// 认证配置设置
#[derive(Debug, Clone, Deserialize)]
pub struct AuthSettings {
    /// 会话签名密钥
    pub session_secret: String,
    /// 会话有效期（秒）
    pub session_ttl_secs: u64,
    /// 会话 Cookie 名称
    pub cookie_name: String,
    /// Cookie 是否仅限 HTTPS
    pub cookie_secure: bool,
    /// OAuth 客户端ID
    pub oauth_client_id: String,
    /// OAuth 客户端密钥
    pub oauth_client_secret: String,
    pub oauth_authorize_url: String,
    pub oauth_token_url: String,
    pub oauth_user_api: String,
    pub oauth_redirect_uri: String,
}

impl AuthSettings {
    /// OAuth 是否已配置
    pub fn oauth_configured(&self) -> bool {
        !self.oauth_client_id.is_empty() && !self.oauth_client_secret.is_empty()
    }
}

impl Settings {
    /// 创建新的配置实例
    ///
    /// 依次叠加默认值、配置文件和环境变量（前缀 `RESTAVERSE`，分隔符 `__`）
    ///
    /// # Returns
    ///
    /// * `Ok(Settings)` - 成功加载的配置
    /// * `Err(ConfigError)` - 配置加载失败
    pub fn new() -> Result<Self, ConfigError> {
        let env = std::env::var("APP_ENVIRONMENT").unwrap_or_else(|_| "default".to_string());
        Self::builder()?
            .add_source(File::with_name("config/default").required(false))
            .add_source(File::with_name(&format!("config/{}", env)).required(false))
            .add_source(Environment::with_prefix("RESTAVERSE").separator("__"))
            .build()?
            .try_deserialize::<Settings>()
            .and_then(Settings::validated)
    }

    /// 校验配置取值
    ///
    /// 刷新间隔与抓取超时必须大于零
    pub fn validated(self) -> Result<Self, ConfigError> {
        if self.refresh.interval_minutes == 0 {
            return Err(ConfigError::Message(
                "refresh.interval_minutes must be greater than 0".to_string(),
            ));
        }
        if self.source.timeout_secs == 0 {
            return Err(ConfigError::Message(
                "source.timeout_secs must be greater than 0".to_string(),
            ));
        }
        Ok(self)
    }

    /// 仅包含默认值的配置构建器
    pub fn builder() -> Result<ConfigBuilder<DefaultState>, ConfigError> {
        Config::builder()
            // Server
            .set_default("server.host", "0.0.0.0")?
            .set_default("server.port", 8000)?
            .set_default("server.frontend_origin", "http://localhost:5173")?
            // Source
            .set_default("source.url", "https://news.ycombinator.com/")?
            .set_default("source.timeout_secs", 10)?
            .set_default("source.max_records", 50)?
            .set_default("source.item_selector", "tr.athing")?
            .set_default("source.title_selector", "span.titleline a")?
            .set_default(
                "source.user_agent",
                "Mozilla/5.0 (compatible; restaverse/0.1)",
            )?
            // Refresh
            .set_default("refresh.interval_minutes", 60)?
            .set_default("refresh.warm_up", true)?
            // Storage
            .set_default("storage.local_path", "./data")?
            .set_default("storage.latest_key", "latest_articles.json")?
            // Auth
            .set_default("auth.session_secret", "change-this-session-secret")?
            .set_default("auth.session_ttl_secs", 60 * 60 * 8)?
            .set_default("auth.cookie_name", "restaverse_session")?
            .set_default("auth.cookie_secure", false)?
            .set_default("auth.oauth_client_id", "")?
            .set_default("auth.oauth_client_secret", "")?
            .set_default(
                "auth.oauth_authorize_url",
                "https://github.com/login/oauth/authorize",
            )?
            .set_default(
                "auth.oauth_token_url",
                "https://github.com/login/oauth/access_token",
            )?
            .set_default("auth.oauth_user_api", "https://api.github.com/user")?
            .set_default(
                "auth.oauth_redirect_uri",
                "http://localhost:8000/auth/callback",
            )
    }
}

#[cfg(test)]
#[path = "settings_test.rs"]
mod tests;
