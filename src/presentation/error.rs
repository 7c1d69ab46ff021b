use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde::{Deserialize, Serialize};
use tracing::error;

use crate::domain::error::DomainError;

/// json body for every error response
#[derive(Debug, Serialize, Deserialize)]
pub struct ErrorResponse {
    pub detail: String,
}

impl IntoResponse for DomainError {
    fn into_response(self) -> Response {
        let status = match self {
            DomainError::ActivityNotFound | DomainError::ParticipantNotFound => {
                StatusCode::NOT_FOUND
            }
            DomainError::ActivityFull
            | DomainError::AlreadyRegistered
            | DomainError::InvalidEmail => StatusCode::BAD_REQUEST,
            // the activity invariants only fail when rebuilding stored rows
            DomainError::Repository(_)
            | DomainError::EmptyActivityName
            | DomainError::InvalidCapacity => StatusCode::INTERNAL_SERVER_ERROR,
        };

        // server-side details stay in the log
        let detail = if status == StatusCode::INTERNAL_SERVER_ERROR {
            error!(error = %self, "request failed");
            "Internal server error".to_string()
        } else {
            self.to_string()
        };

        (status, Json(ErrorResponse { detail })).into_response()
    }
}
