use avatar_service::config::AvatarConfig;
use avatar_service::services::metrics::init_metrics;
use avatar_service::startup::Application;
use service_core::error::AppError;
use service_core::observability::init_tracing;

#[tokio::main]
async fn main() -> Result<(), AppError> {
    // Load configuration - fail fast if invalid
    let config = AvatarConfig::load()?;

    init_tracing(
        &config.service_name,
        &config.log_level,
        config.otlp_endpoint.as_deref(),
    );
    init_metrics()?;

    tracing::info!(
        service = %config.service_name,
        version = env!("CARGO_PKG_VERSION"),
        environment = ?config.environment,
        port = config.common.port,
        "Starting avatar service"
    );

    let app = Application::build(config).await?;
    app.run_until_stopped().await
}
