//! Shared helpers for avatar-service integration tests.

#![allow(dead_code)]

use avatar_service::config::{AvatarConfig, GenerationConfig};
use avatar_service::services::{FixedSource, RandomSource};
use avatar_service::{build_router, AppState, Application};
use axum::Router;
use std::sync::Arc;
use std::time::Duration;

/// Draw that always lands in the failure branch at the default rate.
pub const FAILING_DRAW: f64 = 0.01;
/// Draw that always lands in the success branch at the default rate.
pub const SUCCEEDING_DRAW: f64 = 0.99;

pub fn test_config(delay_ms: u64) -> AvatarConfig {
    let mut config = AvatarConfig::default();
    config.common.port = 0;
    config.service_name = "avatar-service-test".to_string();
    config.generation = GenerationConfig {
        delay_ms,
        ..GenerationConfig::default()
    };
    config
}

pub fn router_with_draw(config: AvatarConfig, draw: f64) -> Router {
    build_router(AppState::new(config, Arc::new(FixedSource(draw))))
}

pub struct TestApp {
    pub address: String,
}

impl TestApp {
    /// Spawn the application on a random port.
    pub async fn spawn(config: AvatarConfig, source: Arc<dyn RandomSource>) -> Self {
        let app = Application::build_with_source(config, source)
            .await
            .expect("Failed to build application");
        let address = format!("http://127.0.0.1:{}", app.port());

        tokio::spawn(async move {
            let _ = app.run_until_stopped().await;
        });

        // Wait for server to start
        tokio::time::sleep(Duration::from_millis(50)).await;

        Self { address }
    }

    pub fn client(&self) -> reqwest::Client {
        reqwest::Client::builder()
            .timeout(Duration::from_secs(10))
            .build()
            .expect("Failed to build HTTP client")
    }
}
