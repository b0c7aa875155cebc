use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;

use cabin_catalog::CatalogError;
use cabin_voucher::{AssignError, IssueError};

#[derive(Debug)]
pub enum ApiError {
    InvalidInput(String),
    NotFound(String),
    Conflict(String),
    Gone(String),
    InternalServerError(String),
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, message) = match self {
            ApiError::InvalidInput(msg) => (StatusCode::BAD_REQUEST, msg),
            ApiError::NotFound(msg) => (StatusCode::NOT_FOUND, msg),
            ApiError::Conflict(msg) => (StatusCode::CONFLICT, msg),
            ApiError::Gone(msg) => (StatusCode::GONE, msg),
            ApiError::InternalServerError(msg) => {
                tracing::error!("Internal Server Error: {}", msg);
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "Internal Server Error".to_string(),
                )
            }
        };

        let body = Json(json!({
            "status_code": status.as_u16(),
            "data": message,
        }));

        (status, body).into_response()
    }
}

impl From<CatalogError> for ApiError {
    fn from(err: CatalogError) -> Self {
        match err {
            CatalogError::InvalidInput(_) | CatalogError::FlightNotFound(_) => {
                ApiError::InvalidInput(err.to_string())
            }
            // Spec table lists only 400 for the flights route
            CatalogError::DuplicateFlight(_) => ApiError::InvalidInput(err.to_string()),
            CatalogError::DuplicateSeat(_) => ApiError::Conflict(err.to_string()),
            CatalogError::Store(e) => ApiError::InternalServerError(e.to_string()),
        }
    }
}

impl From<IssueError> for ApiError {
    fn from(err: IssueError) -> Self {
        match err {
            IssueError::EmptyCode | IssueError::FlightNotFound(_) => {
                ApiError::InvalidInput(err.to_string())
            }
            IssueError::DuplicateCode(_) => ApiError::Conflict(err.to_string()),
            IssueError::Store(e) => ApiError::InternalServerError(e.to_string()),
        }
    }
}

impl From<AssignError> for ApiError {
    fn from(err: AssignError) -> Self {
        match err {
            AssignError::NotFound(_) => ApiError::NotFound(err.to_string()),
            AssignError::AlreadyRedeemed(_)
            | AssignError::NoSeatAvailable { .. }
            | AssignError::Conflict(_) => ApiError::Conflict(err.to_string()),
            AssignError::Expired(_) => ApiError::Gone(err.to_string()),
            AssignError::DeadlineExceeded | AssignError::Store(_) => {
                ApiError::InternalServerError(err.to_string())
            }
        }
    }
}
