//! Forecasting service client
//!
//! `ForecastApi` is the seam between the action dispatcher and the network;
//! `ForecastClient` is the reqwest implementation used by the panel.

pub mod types;

use crate::error::{AppError, Result};
use async_trait::async_trait;
use reqwest::{Client, Response};
use serde::de::DeserializeOwned;
use tracing::{debug, warn};
use types::*;

/// Remote operations offered by the forecasting service
#[async_trait]
pub trait ForecastApi: Send + Sync {
    /// `GET /`
    async fn health(&self) -> Result<HealthResponse>;

    /// `POST /clear-database`
    ///
    /// Only transport failures are errors; the response is not inspected.
    async fn clear_database(&self) -> Result<()>;

    /// `POST /fetch-data` with query-string parameters
    async fn fetch_data_query(&self, query: &FetchDataQuery) -> Result<FetchDataResponse>;

    /// `POST /fetch-data` with a JSON body
    async fn fetch_data(&self, request: &FetchDataRequest) -> Result<FetchDataResponse>;

    /// `POST /train-model`
    async fn train_model(&self) -> Result<TrainModelResponse>;

    /// `POST /predict-days-profit`
    async fn predict_days_profit(&self, request: &PredictRequest) -> Result<PredictResponse>;
}

/// HTTP client for the forecasting service
pub struct ForecastClient {
    client: Client,
    base_url: String,
}

impl ForecastClient {
    /// Create a client bound to `base_url`
    ///
    /// No request timeout is set; a call runs until the service answers or
    /// the connection fails.
    pub fn new(base_url: &str) -> Result<Self> {
        let client = Client::builder().build()?;
        Ok(Self {
            client,
            base_url: base_url.trim_end_matches('/').to_string(),
        })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    /// Decode a JSON body, turning non-2xx statuses into `AppError::Status`
    async fn read_json<T: DeserializeOwned>(response: Response) -> Result<T> {
        let status = response.status();
        let body = response.text().await?;

        if !status.is_success() {
            let detail = serde_json::from_str::<ServiceErrorBody>(&body)
                .ok()
                .and_then(|b| b.detail_text())
                .unwrap_or_else(|| {
                    if body.trim().is_empty() {
                        status.canonical_reason().unwrap_or("no details").to_string()
                    } else {
                        body.clone()
                    }
                });
            warn!("Forecast service returned {}: {}", status, detail);
            return Err(AppError::Status { status, detail });
        }

        Ok(serde_json::from_str(&body)?)
    }
}

#[async_trait]
impl ForecastApi for ForecastClient {
    async fn health(&self) -> Result<HealthResponse> {
        let response = self.client.get(self.url("/")).send().await?;
        Self::read_json(response).await
    }

    async fn clear_database(&self) -> Result<()> {
        let response = self.client.post(self.url("/clear-database")).send().await?;
        debug!("clear-database answered {}", response.status());
        Ok(())
    }

    async fn fetch_data_query(&self, query: &FetchDataQuery) -> Result<FetchDataResponse> {
        let url = format!(
            "{}?symbol={}&exchange_name={}&timeframe={}&limit={}",
            self.url("/fetch-data"),
            urlencoding::encode(&query.symbol),
            urlencoding::encode(&query.exchange_name),
            urlencoding::encode(&query.timeframe),
            urlencoding::encode(&query.limit),
        );
        debug!("POST {}", url);

        let response = self.client.post(url).send().await?;
        Self::read_json(response).await
    }

    async fn fetch_data(&self, request: &FetchDataRequest) -> Result<FetchDataResponse> {
        let response = self
            .client
            .post(self.url("/fetch-data"))
            .json(request)
            .send()
            .await?;
        Self::read_json(response).await
    }

    async fn train_model(&self) -> Result<TrainModelResponse> {
        let response = self.client.post(self.url("/train-model")).send().await?;
        Self::read_json(response).await
    }

    async fn predict_days_profit(&self, request: &PredictRequest) -> Result<PredictResponse> {
        let response = self
            .client
            .post(self.url("/predict-days-profit"))
            .json(request)
            .send()
            .await?;
        Self::read_json(response).await
    }
}
