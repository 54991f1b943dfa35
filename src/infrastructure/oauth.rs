// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use serde::Deserialize;
use std::time::Duration;
use thiserror::Error;
use url::Url;

use crate::config::settings::AuthSettings;
use crate::domain::models::UserProfile;

/// OAuth 请求超时
const OAUTH_TIMEOUT: Duration = Duration::from_secs(10);

/// OAuth 登录流程错误
#[derive(Error, Debug)]
pub enum OAuthError {
    #[error("OAuth is not configured. Set OAUTH_CLIENT_ID and OAUTH_CLIENT_SECRET.")]
    NotConfigured,
    #[error("Failed to exchange code: {0}")]
    Exchange(String),
    #[error("No access token in OAuth response")]
    MissingAccessToken,
    #[error("Failed to load user profile: {0}")]
    Profile(String),
}

#[derive(Debug, Deserialize)]
struct TokenResponse {
    access_token: Option<String>,
}

#[derive(Debug, Deserialize)]
struct ProviderUser {
    id: Option<u64>,
    name: Option<String>,
    login: Option<String>,
    avatar_url: Option<String>,
}

/// OAuth 客户端
///
/// 负责授权码流程中与提供方（默认 GitHub）的交互
pub struct OAuthClient {
    client: reqwest::Client,
    settings: AuthSettings,
}

impl OAuthClient {
    pub fn new(settings: AuthSettings) -> Result<Self, reqwest::Error> {
        let client = reqwest::Client::builder()
            .user_agent(concat!("restaverse/", env!("CARGO_PKG_VERSION")))
            .timeout(OAUTH_TIMEOUT)
            .build()?;
        Ok(Self { client, settings })
    }

    /// 授权跳转地址
    pub fn authorize_url(&self) -> Result<Url, OAuthError> {
        self.ensure_configured()?;
        Url::parse_with_params(
            &self.settings.oauth_authorize_url,
            &[
                ("client_id", self.settings.oauth_client_id.as_str()),
                ("redirect_uri", self.settings.oauth_redirect_uri.as_str()),
                ("scope", "read:user"),
                ("response_type", "code"),
            ],
        )
        .map_err(|e| OAuthError::Exchange(format!("invalid authorize url: {}", e)))
    }

    /// 用授权码换取访问令牌
    pub async fn exchange_code(&self, code: &str) -> Result<String, OAuthError> {
        self.ensure_configured()?;

        let response = self
            .client
            .post(&self.settings.oauth_token_url)
            .header(reqwest::header::ACCEPT, "application/json")
            .form(&[
                ("client_id", self.settings.oauth_client_id.as_str()),
                ("client_secret", self.settings.oauth_client_secret.as_str()),
                ("code", code),
                ("redirect_uri", self.settings.oauth_redirect_uri.as_str()),
            ])
            .send()
            .await
            .map_err(|e| OAuthError::Exchange(e.to_string()))?;

        if !response.status().is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(OAuthError::Exchange(body));
        }

        let token: TokenResponse = response
            .json()
            .await
            .map_err(|e| OAuthError::Exchange(e.to_string()))?;

        token
            .access_token
            .filter(|t| !t.is_empty())
            .ok_or(OAuthError::MissingAccessToken)
    }

    /// 读取用户资料
    pub async fn fetch_user(&self, access_token: &str) -> Result<UserProfile, OAuthError> {
        let response = self
            .client
            .get(&self.settings.oauth_user_api)
            .bearer_auth(access_token)
            .send()
            .await
            .map_err(|e| OAuthError::Profile(e.to_string()))?;

        if !response.status().is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(OAuthError::Profile(body));
        }

        let user: ProviderUser = response
            .json()
            .await
            .map_err(|e| OAuthError::Profile(e.to_string()))?;

        Ok(UserProfile {
            id: user.id,
            name: user.name.or_else(|| user.login.clone()),
            login: user.login,
            avatar_url: user.avatar_url,
        })
    }

    fn ensure_configured(&self) -> Result<(), OAuthError> {
        if self.settings.oauth_configured() {
            Ok(())
        } else {
            Err(OAuthError::NotConfigured)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::settings::Settings;
    use wiremock::matchers::{body_string_contains, header, method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    fn settings(server: Option<&MockServer>, configured: bool) -> AuthSettings {
        let mut auth = Settings::builder()
            .unwrap()
            .build()
            .unwrap()
            .try_deserialize::<Settings>()
            .unwrap()
            .auth;
        if configured {
            auth.oauth_client_id = "client".to_string();
            auth.oauth_client_secret = "secret".to_string();
        }
        if let Some(server) = server {
            auth.oauth_token_url = format!("{}/login/oauth/access_token", server.uri());
            auth.oauth_user_api = format!("{}/user", server.uri());
        }
        auth
    }

    #[test]
    fn test_authorize_url_requires_configuration() {
        let client = OAuthClient::new(settings(None, false)).unwrap();
        assert!(matches!(
            client.authorize_url(),
            Err(OAuthError::NotConfigured)
        ));
    }

    #[test]
    fn test_authorize_url_contains_params() {
        let client = OAuthClient::new(settings(None, true)).unwrap();
        let url = client.authorize_url().unwrap();

        assert!(url.as_str().starts_with("https://github.com/login/oauth/authorize?"));
        let pairs: Vec<(String, String)> = url.query_pairs().into_owned().collect();
        assert!(pairs.contains(&("client_id".to_string(), "client".to_string())));
        assert!(pairs.contains(&("scope".to_string(), "read:user".to_string())));
        assert!(pairs.contains(&("response_type".to_string(), "code".to_string())));
    }

    #[tokio::test]
    async fn test_exchange_and_fetch_user() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/login/oauth/access_token"))
            .and(body_string_contains("code=abc"))
            .respond_with(
                ResponseTemplate::new(200)
                    .set_body_json(serde_json::json!({ "access_token": "tok" })),
            )
            .mount(&server)
            .await;
        Mock::given(method("GET"))
            .and(path("/user"))
            .and(header("authorization", "Bearer tok"))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
                "id": 7,
                "login": "octocat",
                "avatar_url": "https://avatars.example/7"
            })))
            .mount(&server)
            .await;

        let client = OAuthClient::new(settings(Some(&server), true)).unwrap();
        let token = client.exchange_code("abc").await.unwrap();
        let user = client.fetch_user(&token).await.unwrap();

        assert_eq!(token, "tok");
        assert_eq!(user.id, Some(7));
        // name 缺失时回退到 login
        assert_eq!(user.name.as_deref(), Some("octocat"));
    }

    #[tokio::test]
    async fn test_missing_access_token() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/login/oauth/access_token"))
            .respond_with(
                ResponseTemplate::new(200)
                    .set_body_json(serde_json::json!({ "error": "bad_verification_code" })),
            )
            .mount(&server)
            .await;

        let client = OAuthClient::new(settings(Some(&server), true)).unwrap();

        assert!(matches!(
            client.exchange_code("nope").await,
            Err(OAuthError::MissingAccessToken)
        ));
    }

    #[tokio::test]
    async fn test_exchange_failure_status() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/login/oauth/access_token"))
            .respond_with(ResponseTemplate::new(401).set_body_string("denied"))
            .mount(&server)
            .await;

        let client = OAuthClient::new(settings(Some(&server), true)).unwrap();

        match client.exchange_code("abc").await {
            Err(OAuthError::Exchange(body)) => assert_eq!(body, "denied"),
            other => panic!("unexpected: {:?}", other.map(|_| ())),
        }
    }
}
