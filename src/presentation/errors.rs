// Copyright (c) 2025 Kirky.X
//
// Licensed under the MIT License
// See LICENSE file in the project root for full license information.

use std::any::Any;

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use thiserror::Error;
use tracing::error;

use crate::infrastructure::oauth::OAuthError;

/// 认证错误类型
///
/// 在任何刷新或存储逻辑之前以 401 返回
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum AuthError {
    #[error("Not authenticated")]
    MissingSession,
    #[error("Invalid or expired session")]
    InvalidSession,
}

impl IntoResponse for AuthError {
    fn into_response(self) -> Response {
        detail_response(StatusCode::UNAUTHORIZED, self.to_string())
    }
}

/// OAuth 错误对应的状态码
fn oauth_status(err: &OAuthError) -> StatusCode {
    match err {
        OAuthError::NotConfigured => StatusCode::INTERNAL_SERVER_ERROR,
        _ => StatusCode::BAD_REQUEST,
    }
}

/// 应用错误类型
///
/// 封装所有可能的应用层错误。未识别的错误统一渲染为 500，并在 `detail` 中带上原始错误信息
#[derive(Debug)]
pub struct AppError(anyhow::Error);

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        if let Some(auth) = self.0.downcast_ref::<AuthError>() {
            return auth.clone().into_response();
        }

        let status = match self.0.downcast_ref::<OAuthError>() {
            Some(oauth) => oauth_status(oauth),
            None => StatusCode::INTERNAL_SERVER_ERROR,
        };

        if status.is_server_error() {
            error!("Request failed: {:#}", self.0);
        }

        let mut message = self.0.to_string();
        if message.is_empty() {
            message = "Internal server error".to_string();
        }
        detail_response(status, message)
    }
}

impl<E> From<E> for AppError
where
    E: Into<anyhow::Error>,
{
    fn from(err: E) -> Self {
        Self(err.into())
    }
}

/// 处理器内部 panic 时的响应
pub fn panic_response(err: Box<dyn Any + Send + 'static>) -> Response {
    let message = if let Some(s) = err.downcast_ref::<String>() {
        s.clone()
    } else if let Some(s) = err.downcast_ref::<&str>() {
        s.to_string()
    } else {
        "Internal server error".to_string()
    };

    error!("Handler panicked: {}", message);
    detail_response(StatusCode::INTERNAL_SERVER_ERROR, message)
}

fn detail_response(status: StatusCode, detail: String) -> Response {
    (status, Json(json!({ "detail": detail }))).into_response()
}
