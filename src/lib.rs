//! Forecast Panel
//!
//! A terminal control panel for the BTC forecasting service: collect market
//! data, train the model and ask how many days it takes to reach a target
//! profit, with the service's answer shown as a single result line.

pub mod api;
pub mod commands;
pub mod config;
pub mod dispatcher;
pub mod display;
pub mod error;
pub mod form;
pub mod messages;
pub mod panel;
pub mod state;

use config::PanelConfig;
use state::AppState;
use std::sync::Arc;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

/// Initialize tracing/logging on stderr
pub fn init_tracing() {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "forecast_panel_lib=warn".into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();
}

/// Load configuration and run the panel
pub async fn run() -> anyhow::Result<()> {
    init_tracing();
    tracing::info!("Starting Forecast Panel...");

    let config = PanelConfig::load()?;
    let state = Arc::new(AppState::new(config)?);

    panel::run_panel(state).await?;
    Ok(())
}
