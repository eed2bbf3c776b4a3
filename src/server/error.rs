// SPDX-FileCopyrightText: 2025 Joost van der Laan <joost@fashionunited.com>
//
// SPDX-License-Identifier: AGPL-3.0-only

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use tracing::warn;

use crate::error::FxError;
use crate::models::{ErrorBody, ErrorEnvelope};

/// Error returned to the add-in as `{"error": {"message", "detail"}}`.
#[derive(Debug, Clone)]
pub struct ApiError {
    pub status: StatusCode,
    pub message: &'static str,
    pub detail: Option<String>,
}

impl ApiError {
    pub fn bad_request(message: &'static str) -> Self {
        Self {
            status: StatusCode::BAD_REQUEST,
            message,
            detail: None,
        }
    }

    pub fn unauthorized() -> Self {
        Self {
            status: StatusCode::UNAUTHORIZED,
            message: "unauthorized",
            detail: None,
        }
    }

    pub fn not_found(message: &'static str) -> Self {
        Self {
            status: StatusCode::NOT_FOUND,
            message,
            detail: None,
        }
    }

    pub fn invalid_namespace() -> Self {
        Self::bad_request("invalid namespace")
    }

    pub fn invalid_input() -> Self {
        Self::bad_request("invalid input")
    }

    pub fn with_detail(mut self, detail: impl Into<String>) -> Self {
        self.detail = Some(detail.into());
        self
    }
}

impl From<FxError> for ApiError {
    fn from(err: FxError) -> Self {
        let status = match &err {
            FxError::InvalidInput(_) => StatusCode::BAD_REQUEST,
            FxError::NoDataForRange { .. } => StatusCode::NOT_FOUND,
            FxError::UpstreamUnavailable { .. } => StatusCode::BAD_GATEWAY,
        };
        Self {
            status,
            message: "unable to process",
            detail: Some(err.to_string()),
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        warn!(
            status = self.status.as_u16(),
            message = self.message,
            detail = self.detail.as_deref().unwrap_or_default(),
            "rate table request rejected"
        );
        let body = ErrorEnvelope {
            error: ErrorBody {
                message: self.message.to_string(),
                detail: self.detail,
            },
        };
        (self.status, Json(body)).into_response()
    }
}
