//! Response envelope and error mapping

use crate::lookup::LookupError;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde::Serialize;
use thiserror::Error;

/// Status block of every response
#[derive(Debug, Clone, Serialize)]
pub struct Meta {
    pub code: u16,
    pub message: String,
}

/// `{"meta": {...}, "data": ...}` envelope
#[derive(Debug, Clone, Serialize)]
pub struct ApiResponse<T> {
    pub meta: Meta,
    pub data: Option<T>,
}

impl<T: Serialize> ApiResponse<T> {
    pub fn ok(data: T) -> Json<Self> {
        Json(Self {
            meta: Meta {
                code: StatusCode::OK.as_u16(),
                message: "ok".to_string(),
            },
            data: Some(data),
        })
    }
}

/// Request-level failures
#[derive(Debug, Error)]
pub enum ApiError {
    #[error("missing symbol value")]
    MissingSymbol,
    #[error("invalid symbol value '{0}'")]
    InvalidSymbol(String),
    #[error("interval only support '24' hours")]
    UnsupportedInterval,
    #[error(transparent)]
    Lookup(#[from] LookupError),
}

impl ApiError {
    pub fn status(&self) -> StatusCode {
        match self {
            ApiError::MissingSymbol | ApiError::InvalidSymbol(_) | ApiError::UnsupportedInterval => {
                StatusCode::BAD_REQUEST
            }
            ApiError::Lookup(LookupError::NotFound(_)) => StatusCode::NOT_FOUND,
            ApiError::Lookup(LookupError::Upstream(_)) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status();
        if status.is_server_error() {
            tracing::error!(error = %self, code = status.as_u16(), "Request failed");
        } else {
            tracing::warn!(error = %self, code = status.as_u16(), "Request rejected");
        }

        let body = ApiResponse::<()> {
            meta: Meta {
                code: status.as_u16(),
                message: self.to_string(),
            },
            data: None,
        };
        (status, Json(body)).into_response()
    }
}
