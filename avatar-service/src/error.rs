use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use thiserror::Error;

use crate::dtos::ErrorResponse;

/// Errors surfaced by the avatar endpoint.
#[derive(Debug, Error)]
pub enum AvatarError {
    /// Randomly injected failure. Not caused by any real fault; clients may
    /// retry.
    #[error("{0}")]
    SimulatedTransient(String),
}

impl IntoResponse for AvatarError {
    fn into_response(self) -> Response {
        let (status, message) = match self {
            AvatarError::SimulatedTransient(message) => {
                (StatusCode::INTERNAL_SERVER_ERROR, message)
            }
        };

        (status, Json(ErrorResponse { error: message })).into_response()
    }
}
