use service_core::observability::{init_metrics, init_tracing};
use user_service::config::UserServiceConfig;
use user_service::startup::Application;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let config = UserServiceConfig::load()?;

    init_tracing(
        "user-service",
        &config.common.log_level,
        config.otlp_endpoint.as_deref(),
    );
    init_metrics();

    let application = Application::build(config).await.map_err(|e| {
        tracing::error!("Failed to start user-service: {}", e);
        e
    })?;
    application.run_until_stopped().await?;

    Ok(())
}
