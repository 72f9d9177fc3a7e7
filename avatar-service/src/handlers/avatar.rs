use axum::{extract::State, Json};

use crate::dtos::AvatarResponse;
use crate::error::AvatarError;
use crate::services::{metrics::record_generation, GenerationOutcome};
use crate::startup::AppState;

/// `POST /generate-avatar`
///
/// The request body is never read.
pub async fn generate_avatar(
    State(state): State<AppState>,
) -> Result<Json<AvatarResponse>, AvatarError> {
    let outcome = state.generator.generate().await;
    record_generation(&outcome);

    match outcome {
        GenerationOutcome::Ready { avatar_url } => {
            tracing::info!(avatar_url = %avatar_url, "Avatar generated");
            Ok(Json(AvatarResponse { avatar_url }))
        }
        GenerationOutcome::SimulatedFailure { message } => {
            tracing::warn!("Simulated avatar generation failure");
            Err(AvatarError::SimulatedTransient(message))
        }
    }
}
