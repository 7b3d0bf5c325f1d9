//! Application state management

use crate::api::{ForecastApi, ForecastClient};
use crate::config::PanelConfig;
use crate::dispatcher::ActionDispatcher;
use crate::display::DisplayTarget;
use crate::error::Result;
use crate::form::FormState;
use std::sync::Arc;

/// Application state shared by the host and every launched action
pub struct AppState {
    /// Startup configuration
    pub config: PanelConfig,

    /// Form fields the actions read from
    pub form: Arc<FormState>,

    /// The single display target
    pub display: Arc<DisplayTarget>,

    /// Action handlers
    pub dispatcher: Arc<ActionDispatcher>,
}

impl AppState {
    /// Create state talking to the configured service
    pub fn new(config: PanelConfig) -> Result<Self> {
        config.validate()?;
        let client = ForecastClient::new(&config.base_url)?;
        tracing::info!("Forecast service: {}", client.base_url());
        Ok(Self::with_api(config, Arc::new(client)))
    }

    /// Create state around any `ForecastApi` implementation
    pub fn with_api(config: PanelConfig, api: Arc<dyn ForecastApi>) -> Self {
        let form = Arc::new(FormState::new());
        let display = Arc::new(DisplayTarget::new(config.discard_stale));
        let dispatcher = Arc::new(ActionDispatcher::new(
            api,
            form.clone(),
            display.clone(),
            config.variant,
        ));

        Self {
            config,
            form,
            display,
            dispatcher,
        }
    }
}
