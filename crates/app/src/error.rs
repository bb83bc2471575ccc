use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use metrics::counter;
use serde::Serialize;
use thiserror::Error;
use tracing::error;

use todo_board_core::{StoreError, TitleError};

pub const TITLE_REQUIRED: &str = "Title is required";
pub const INTERNAL_ERROR: &str = "Internal server error";

#[derive(Debug, Serialize)]
struct ErrorBody {
    error: &'static str,
}

/// Failures surfaced by the todo endpoints.
#[derive(Debug, Error)]
pub enum ApiError {
    #[error("invalid create request: {0}")]
    Validation(#[from] TitleError),
    #[error("store failed during {operation}: {source}")]
    Store {
        operation: &'static str,
        source: StoreError,
    },
}

impl ApiError {
    pub fn store(operation: &'static str, source: StoreError) -> Self {
        Self::Store { operation, source }
    }

    pub fn status(&self) -> StatusCode {
        match self {
            Self::Validation(_) => StatusCode::BAD_REQUEST,
            Self::Store { .. } => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status();
        let message = match &self {
            Self::Validation(_) => TITLE_REQUIRED,
            Self::Store { operation, source } => {
                counter!("store_errors_total", "operation" => *operation).increment(1);
                error!(stage = "api", operation = *operation, error = %source, "store operation failed");
                INTERNAL_ERROR
            }
        };

        (status, Json(ErrorBody { error: message })).into_response()
    }
}
