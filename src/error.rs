//! Application error types

use reqwest::StatusCode;
use thiserror::Error;

/// Application-wide error type
///
/// Every variant that can come out of an action is rendered the same way on
/// the display; the variants only matter for logging.
#[derive(Error, Debug)]
pub enum AppError {
    #[error("HTTP request error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("Service returned {status}: {detail}")]
    Status { status: StatusCode, detail: String },

    #[error("Validation error: {0}")]
    Validation(String),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

impl AppError {
    /// Stable machine-readable code for log records
    pub fn code(&self) -> &'static str {
        match self {
            AppError::Http(_) => "HTTP_ERROR",
            AppError::Serialization(_) => "SERIALIZATION_ERROR",
            AppError::Status { .. } => "STATUS_ERROR",
            AppError::Validation(_) => "VALIDATION_ERROR",
            AppError::Config(_) => "CONFIG_ERROR",
            AppError::Io(_) => "IO_ERROR",
        }
    }
}

impl From<url::ParseError> for AppError {
    fn from(err: url::ParseError) -> Self {
        AppError::Config(format!("Invalid base URL: {}", err))
    }
}

pub type Result<T> = std::result::Result<T, AppError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_error_message() {
        let err = AppError::Status {
            status: StatusCode::INTERNAL_SERVER_ERROR,
            detail: "Poucos dados no banco para treinar.".to_string(),
        };
        assert_eq!(
            err.to_string(),
            "Service returned 500 Internal Server Error: Poucos dados no banco para treinar."
        );
        assert_eq!(err.code(), "STATUS_ERROR");
    }

    #[test]
    fn test_config_error_message() {
        let err = AppError::Config("missing file".to_string());
        assert_eq!(err.code(), "CONFIG_ERROR");
        assert_eq!(err.to_string(), "Configuration error: missing file");
    }

    #[test]
    fn test_url_error_maps_to_config() {
        let err: AppError = url::Url::parse("not a url").unwrap_err().into();
        assert_eq!(err.code(), "CONFIG_ERROR");
    }
}
