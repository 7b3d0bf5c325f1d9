//! Action dispatcher
//!
//! Turns a panel action into one (or, for variant 2 collection, two
//! sequential) requests to the forecasting service and renders the outcome
//! on the display target.
//!
//! Every step of an invocation is awaited before the next one starts, and
//! any failure ends the invocation with the generic error message. Nothing
//! coordinates separate invocations: they share the display and the last
//! write wins.

use crate::api::ForecastApi;
use crate::config::Variant;
use crate::display::{DisplaySink, Ticket};
use crate::error::Result;
use crate::form::{CollectParams, FieldSource, PredictParams};
use crate::messages;
use std::sync::Arc;
use tracing::{error, info};

pub struct ActionDispatcher {
    api: Arc<dyn ForecastApi>,
    fields: Arc<dyn FieldSource>,
    display: Arc<dyn DisplaySink>,
    variant: Variant,
}

impl ActionDispatcher {
    pub fn new(
        api: Arc<dyn ForecastApi>,
        fields: Arc<dyn FieldSource>,
        display: Arc<dyn DisplaySink>,
        variant: Variant,
    ) -> Self {
        Self {
            api,
            fields,
            display,
            variant,
        }
    }

    /// Collect market data into the service's database
    pub async fn collect_data(&self) {
        let ticket = self.display.begin();
        let params = CollectParams::read(self.fields.as_ref());
        info!(
            "ActionDispatcher::collect_data - #{} {} {} limit={} fetch_all={}",
            ticket.0, params.symbol, params.timeframe, params.limit, params.fetch_all
        );

        let outcome = match self.variant {
            Variant::V1 => self.collect_by_query(&params).await,
            Variant::V2 => self.clear_and_collect(ticket, &params).await,
        };
        self.finish(ticket, "collect_data", outcome);
    }

    /// Train the forecasting model on the collected data
    pub async fn train_model(&self) {
        let ticket = self.display.begin();
        info!("ActionDispatcher::train_model - #{}", ticket.0);

        if self.variant == Variant::V2 {
            self.display.show(ticket, messages::TRAIN_INTERIM.to_string());
        }

        let outcome = self
            .api
            .train_model()
            .await
            .map(|response| messages::trained(self.variant, &response));
        self.finish(ticket, "train_model", outcome);
    }

    /// Ask how many days until the target profit is reached
    pub async fn predict_profit(&self) {
        let ticket = self.display.begin();
        let params = PredictParams::read(self.fields.as_ref());
        info!(
            "ActionDispatcher::predict_profit - #{} target_profit={:?} max_days={:?}",
            ticket.0, params.target_profit, params.max_days
        );

        if self.variant == Variant::V2 {
            self.display.show(ticket, messages::PREDICT_INTERIM.to_string());
        }

        let outcome = self
            .api
            .predict_days_profit(&params.to_request())
            .await
            .map(|response| messages::predicted(&response));
        self.finish(ticket, "predict_profit", outcome);
    }

    /// Check that the service is reachable
    pub async fn check_service(&self) {
        let ticket = self.display.begin();
        info!("ActionDispatcher::check_service - #{}", ticket.0);

        let outcome = self
            .api
            .health()
            .await
            .map(|response| messages::health(&response));
        self.finish(ticket, "check_service", outcome);
    }

    // ========================================================================
    // Private Helper Methods
    // ========================================================================

    async fn collect_by_query(&self, params: &CollectParams) -> Result<String> {
        let response = self.api.fetch_data_query(&params.to_query()).await?;
        Ok(messages::collected(Variant::V1, &response))
    }

    /// Clear, then fetch; a failed clear ends the sequence
    async fn clear_and_collect(&self, ticket: Ticket, params: &CollectParams) -> Result<String> {
        self.api.clear_database().await?;
        self.display.show(ticket, messages::COLLECT_INTERIM.to_string());

        let response = self.api.fetch_data(&params.to_request()).await?;
        Ok(messages::collected(Variant::V2, &response))
    }

    fn finish(&self, ticket: Ticket, action: &str, outcome: Result<String>) {
        let text = match outcome {
            Ok(text) => {
                info!("{} #{} done: {}", action, ticket.0, text);
                text
            }
            Err(e) => {
                error!("{} #{} failed [{}]: {}", action, ticket.0, e.code(), e);
                messages::failed(&e)
            }
        };
        self.display.show(ticket, text);
    }
}
