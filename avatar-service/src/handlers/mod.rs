//! HTTP handlers for the avatar service.

pub mod avatar;
pub mod health;

use service_core::error::AppError;

/// JSON 404 for unknown routes.
pub async fn not_found(uri: axum::http::Uri) -> AppError {
    AppError::NotFound(anyhow::anyhow!("No route for {}", uri.path()))
}
