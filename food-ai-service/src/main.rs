use food_ai_service::config::FoodAiConfig;
use food_ai_service::services::metrics::init_metrics;
use food_ai_service::startup::Application;
use service_core::observability::init_tracing;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let config = FoodAiConfig::load().map_err(|e| {
        eprintln!("Failed to load configuration: {}", e);
        anyhow::anyhow!("Configuration error: {}", e)
    })?;

    init_tracing(
        "food-ai-service",
        &config.observability.log_level,
        config.observability.otlp_endpoint.as_deref(),
    )
    .map_err(|e| anyhow::anyhow!("Tracing error: {}", e))?;

    init_metrics();

    tracing::info!(
        model = %config.model.path,
        food_info = %config.catalog.path,
        threshold = config.model.confidence_threshold,
        "Starting food-ai-service"
    );

    let app = Application::build(config).await.map_err(|e| {
        tracing::error!("Failed to start application: {}", e);
        anyhow::anyhow!("Startup error: {}", e)
    })?;

    app.run_until_stopped().await?;

    tracing::info!("food-ai-service stopped");
    Ok(())
}
