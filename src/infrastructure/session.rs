// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use base64::engine::general_purpose::URL_SAFE_NO_PAD;
use base64::Engine as _;
use chrono::{DateTime, Duration, Utc};
use dashmap::DashMap;
use hmac::{Hmac, Mac};
use rand::Rng;
use sha2::Sha256;
use tracing::debug;

use crate::config::settings::AuthSettings;
use crate::domain::models::UserProfile;

type HmacSha256 = Hmac<Sha256>;

/// 会话存储
///
/// 会话ID映射到用户资料，保存在进程内存中。发给浏览器的令牌格式为
/// `{session_id}.{issued_at}.{signature}`，签名为 HMAC-SHA256 的十六进制编码。
pub struct SessionStore {
    secret: Vec<u8>,
    ttl: Duration,
    sessions: DashMap<String, UserProfile>,
}

impl SessionStore {
    /// 创建会话存储
    ///
    /// # 参数
    ///
    /// * `secret` - 签名密钥
    /// * `ttl_secs` - 令牌有效期（秒）
    pub fn new(secret: &str, ttl_secs: u64) -> Self {
        Self {
            secret: secret.as_bytes().to_vec(),
            ttl: Duration::seconds(ttl_secs as i64),
            sessions: DashMap::new(),
        }
    }

    pub fn from_settings(settings: &AuthSettings) -> Self {
        Self::new(&settings.session_secret, settings.session_ttl_secs)
    }

    /// 创建会话并返回签名令牌
    pub fn create(&self, user: UserProfile) -> String {
        self.create_at(user, Utc::now())
    }

    fn create_at(&self, user: UserProfile, issued_at: DateTime<Utc>) -> String {
        let mut bytes = [0u8; 32];
        rand::rng().fill(&mut bytes);
        let session_id = URL_SAFE_NO_PAD.encode(bytes);

        self.sessions.insert(session_id.clone(), user);

        let payload = format!("{}.{}", session_id, issued_at.timestamp());
        let signature = self.sign(&payload);
        format!("{}.{}", payload, signature)
    }

    /// 读取令牌对应的用户
    ///
    /// 签名无效、已过期或会话不存在时返回 `None`
    pub fn read(&self, token: &str) -> Option<UserProfile> {
        self.read_at(token, Utc::now())
    }

    fn read_at(&self, token: &str, now: DateTime<Utc>) -> Option<UserProfile> {
        let (session_id, issued_at) = self.verify(token)?;

        if now - issued_at > self.ttl {
            debug!("Session token expired");
            self.sessions.remove(&session_id);
            return None;
        }

        self.sessions.get(&session_id).map(|entry| entry.value().clone())
    }

    /// 删除令牌对应的会话
    pub fn remove(&self, token: &str) {
        if let Some((session_id, _)) = self.verify(token) {
            self.sessions.remove(&session_id);
        }
    }

    /// 校验签名，返回会话ID与签发时间
    fn verify(&self, token: &str) -> Option<(String, DateTime<Utc>)> {
        let (payload, signature) = token.rsplit_once('.')?;
        let (session_id, issued_at) = payload.split_once('.')?;

        let signature = hex::decode(signature).ok()?;
        let mut mac = self.mac();
        mac.update(payload.as_bytes());
        if mac.verify_slice(&signature).is_err() {
            debug!("Session token signature mismatch");
            return None;
        }

        let issued_at = DateTime::from_timestamp(issued_at.parse().ok()?, 0)?;
        Some((session_id.to_string(), issued_at))
    }

    fn sign(&self, payload: &str) -> String {
        let mut mac = self.mac();
        mac.update(payload.as_bytes());
        hex::encode(mac.finalize().into_bytes())
    }

    fn mac(&self) -> HmacSha256 {
        HmacSha256::new_from_slice(&self.secret).expect("HMAC can take key of any size")
    }
}
