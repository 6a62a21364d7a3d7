use anyhow::{Context, Result};
use weather_relay::{WeatherRelayConfig, logging, web};

#[tokio::main]
async fn main() -> Result<()> {
    let config = WeatherRelayConfig::load().context("Failed to load configuration")?;
    logging::init_logging(&config.logging)?;

    tracing::info!(
        version = weather_relay::VERSION,
        geocoding = %config.upstream.geocoding_url,
        forecast = %config.upstream.forecast_url,
        "Starting weather relay"
    );

    web::run(&config).await.context("Web server failed")?;
    Ok(())
}
