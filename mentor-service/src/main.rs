use dotenvy::dotenv;
use mentor_service::config::MentorConfig;
use mentor_service::observability::init_tracing;
use mentor_service::services::init_metrics;
use mentor_service::startup::Application;
use tracing::info;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenv().ok();

    // Metrics recorder must exist before any request is served
    init_metrics();

    let otlp_endpoint =
        std::env::var("OTLP_ENDPOINT").unwrap_or_else(|_| "http://tempo:4317".to_string());
    init_tracing("mentor-service", "info", &otlp_endpoint);

    let config = MentorConfig::load().map_err(|e| {
        tracing::error!("Failed to load configuration: {}", e);
        anyhow::anyhow!("Configuration error: {}", e)
    })?;

    let app = Application::build(config).await.map_err(|e| {
        tracing::error!("Failed to build application: {}", e);
        anyhow::anyhow!("Startup error: {}", e)
    })?;

    info!("Starting mentor-service on port {}", app.port());
    app.run_until_stopped().await?;

    Ok(())
}
