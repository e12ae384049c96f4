use scholar_relay::config::RelayConfig;
use scholar_relay::startup::Application;
use secrecy::ExposeSecret;
use service_core::observability::init_tracing;

#[tokio::main]
async fn main() -> std::io::Result<()> {
    let config = RelayConfig::load().map_err(|e| {
        eprintln!("Failed to load configuration: {}", e);
        std::io::Error::other(format!("Configuration error: {}", e))
    })?;

    init_tracing(
        "scholar-relay",
        &config.common.log_level,
        config.common.otlp_endpoint.as_deref(),
    );

    if config.gemini.api_key.expose_secret().is_empty() {
        tracing::warn!("GEMINI_API_KEY is not set; the Gemini API will reject relayed prompts");
    }

    let app = Application::build(config).await.map_err(|e| {
        tracing::error!("Failed to build application: {}", e);
        std::io::Error::other(format!("Startup error: {}", e))
    })?;

    app.run_until_stopped().await
}
