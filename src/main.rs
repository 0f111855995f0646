//! Weather Chat - menu-driven weather console
//!
//! A session engine that walks a configurable prompt tree, looks up
//! weather for user profiles and keeps a per-session transaction log.

mod condition;
mod config;
mod console;
mod prompt;
mod session;
mod store;
mod weather;

use config::{AppConfig, SessionData};
use console::Terminal;
use session::{SessionContext, SessionEngine};
use std::process::ExitCode;
use std::sync::Arc;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};
use weather::OpenMeteoClient;

#[tokio::main]
async fn main() -> ExitCode {
    // Initialize logging; stdout belongs to the conversation
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "weather_chat=warn".into()),
        )
        .with(
            tracing_subscriber::fmt::layer()
                .json()
                .with_current_span(false)
                .with_span_list(false)
                .with_writer(std::io::stderr),
        )
        .init();

    match run().await {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            tracing::error!(error = %e, "Weather chat failed");
            eprintln!("weather-chat: {e}");
            ExitCode::FAILURE
        }
    }
}

async fn run() -> Result<(), Box<dyn std::error::Error>> {
    let config = AppConfig::from_env()?;
    tracing::info!(
        data_dir = %config.data_dir.display(),
        timeout_secs = config.timeout.as_secs(),
        "Configuration loaded"
    );

    let data = SessionData::load(&config.data_dir)?;

    // One HTTP client serves both forecast and geocoding
    let client = Arc::new(OpenMeteoClient::new(
        config.forecast_url,
        config.geocoding_url,
        config.timeout,
    )?);

    let context = SessionContext::new(data.profiles, data.tree);
    let mut engine = SessionEngine::new(context, Terminal::new(), client.clone(), client);
    engine.run(&data.labels.welcome_page).await?;

    Ok(())
}
