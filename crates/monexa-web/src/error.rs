use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use monexa_core::{BatchError, ChatError, SummaryError};
use serde::Serialize;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum ApiError {
    #[error("{0}")]
    BadRequest(String),
    #[error(transparent)]
    Batch(#[from] BatchError),
    #[error("Failed to fetch finance data")]
    Summary(#[from] SummaryError),
    #[error("Chat failed")]
    Chat(#[from] ChatError),
    #[error("Internal Server Error")]
    Internal(String),
}

#[derive(Serialize)]
struct ErrorBody {
    error: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    detail: Option<String>,
}

impl ApiError {
    pub fn status(&self) -> StatusCode {
        match self {
            Self::BadRequest(_) | Self::Batch(_) => StatusCode::BAD_REQUEST,
            Self::Summary(_) | Self::Chat(_) | Self::Internal(_) => {
                StatusCode::INTERNAL_SERVER_ERROR
            }
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status();
        let detail = match &self {
            Self::Summary(source) => {
                tracing::error!(error = %source, "finance summary failed");
                None
            }
            Self::Chat(source) => {
                tracing::error!(error = %source, "chat failed");
                Some(source.to_string())
            }
            Self::Internal(reason) => {
                tracing::error!(%reason, "internal error");
                None
            }
            Self::BadRequest(_) | Self::Batch(_) => None,
        };

        let body = Json(ErrorBody {
            error: self.to_string(),
            detail,
        });
        (status, body).into_response()
    }
}

pub type ApiResult<T> = Result<T, ApiError>;
