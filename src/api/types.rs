//! Request and response shapes of the forecasting service
//!
//! Responses are minimal structural contracts: only the fields the panel
//! reads are named, all of them optional, and anything else is ignored.

use serde::{Deserialize, Serialize};
use serde_json::Number;

// ============================================================================
// Requests
// ============================================================================

/// Query-string parameters of `POST /fetch-data` (variant 1)
///
/// Values are the raw field text; the service does its own coercion.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FetchDataQuery {
    pub symbol: String,
    pub exchange_name: String,
    pub timeframe: String,
    pub limit: String,
}

/// JSON body of `POST /fetch-data` (variant 2)
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FetchDataRequest {
    pub symbol: String,
    pub timeframe: String,
    /// `None` when the field text is not a number; sent as `null`
    pub limit: Option<Number>,
    pub fetch_all: bool,
}

/// JSON body of `POST /predict-days-profit`
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PredictRequest {
    pub target_profit: Option<f64>,
    pub max_days: Option<Number>,
}

// ============================================================================
// Responses
// ============================================================================

/// `GET /`
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct HealthResponse {
    pub msg: Option<String>,
}

/// `POST /fetch-data`
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct FetchDataResponse {
    pub rows_inserted: Option<i64>,
}

/// `POST /train-model`
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct TrainModelResponse {
    pub last_date: Option<String>,
    pub last_price: Option<f64>,
}

/// `POST /predict-days-profit`
///
/// When the target is not reached the service omits `days_needed`; absent
/// and `null` are treated alike.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct PredictResponse {
    pub days_needed: Option<i64>,
}

/// Error body sent with non-2xx responses
///
/// `detail` is a string for service errors and a list for request
/// validation errors.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ServiceErrorBody {
    pub detail: Option<serde_json::Value>,
}

impl ServiceErrorBody {
    pub fn detail_text(&self) -> Option<String> {
        match self.detail.as_ref()? {
            serde_json::Value::String(s) => Some(s.clone()),
            serde_json::Value::Null => None,
            other => Some(other.to_string()),
        }
    }
}
