use crate::completion::CompletionError;
use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::{Deserialize, Serialize};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum OptimizeError {
    #[error(transparent)]
    Completion(#[from] CompletionError),
    #[error("no response received from model")]
    EmptyResponse,
}

#[derive(Debug, Error)]
pub enum ApiError {
    #[error("{0}")]
    Validation(String),
    #[error("{action} failed: {source}")]
    Upstream {
        action: &'static str,
        #[source]
        source: OptimizeError,
    },
}

impl ApiError {
    pub fn upstream(action: &'static str) -> impl FnOnce(OptimizeError) -> Self {
        move |source| Self::Upstream { action, source }
    }

    pub fn status(&self) -> StatusCode {
        match self {
            Self::Validation(_) => StatusCode::BAD_REQUEST,
            Self::Upstream { .. } => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ErrorBody {
    pub error: String,
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let body = ErrorBody {
            error: self.to_string(),
        };
        (self.status(), Json(body)).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_mapping() {
        assert_eq!(
            ApiError::Validation("invalid request parameters".into()).status(),
            StatusCode::BAD_REQUEST
        );
        let err = ApiError::upstream("optimization")(OptimizeError::EmptyResponse);
        assert_eq!(err.status(), StatusCode::INTERNAL_SERVER_ERROR);
    }

    #[test]
    fn test_upstream_message() {
        let err = ApiError::upstream("batch generation")(OptimizeError::EmptyResponse);
        assert_eq!(
            err.to_string(),
            "batch generation failed: no response received from model"
        );
    }
}
