//! Panel configuration
//!
//! The remote service address is fixed for the lifetime of the process.
//! Configuration is read once at startup from an optional JSON file, with a
//! single environment override for the panel variant.

use crate::error::{AppError, Result};
use serde::Deserialize;
use std::path::{Path, PathBuf};
use std::str::FromStr;
use tracing::{debug, info};
use url::Url;

/// Default address of the forecasting service
pub const BASE_URL: &str = "http://127.0.0.1:8000";

/// Env var pointing at a JSON config file
pub const CONFIG_PATH_ENV: &str = "FORECAST_PANEL_CONFIG";

/// Env var overriding the panel variant (`v1` / `v2`)
pub const VARIANT_ENV: &str = "FORECAST_PANEL_VARIANT";

/// Config file picked up from the working directory when no path is given
pub const DEFAULT_CONFIG_FILE: &str = "panel.json";

/// Panel behavior variant
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Variant {
    /// Query-string collection, no pre-clear, no interim messages
    V1,
    /// Clear-then-fetch collection with JSON bodies and interim messages
    #[default]
    V2,
}

impl FromStr for Variant {
    type Err = AppError;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "v1" | "1" => Ok(Variant::V1),
            "v2" | "2" => Ok(Variant::V2),
            other => Err(AppError::Config(format!("Unknown variant: {}", other))),
        }
    }
}

/// Startup configuration
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct PanelConfig {
    pub base_url: String,
    pub variant: Variant,
    /// Drop display writes from invocations superseded by a newer one
    pub discard_stale: bool,
}

impl Default for PanelConfig {
    fn default() -> Self {
        Self {
            base_url: BASE_URL.to_string(),
            variant: Variant::default(),
            discard_stale: false,
        }
    }
}

impl PanelConfig {
    /// Load a config file
    pub fn from_file(path: &Path) -> Result<Self> {
        let raw = std::fs::read_to_string(path)?;
        let config: PanelConfig = serde_json::from_str(&raw)?;
        config.validate()?;
        debug!("Loaded config from {:?}", path);
        Ok(config)
    }

    /// Resolve the startup configuration from the environment
    pub fn load() -> Result<Self> {
        let path = std::env::var(CONFIG_PATH_ENV).ok().map(PathBuf::from);
        let variant = std::env::var(VARIANT_ENV).ok();
        Self::resolve(path.as_deref(), variant.as_deref())
    }

    /// Resolve from an explicit config path and variant override
    ///
    /// An explicit path must exist; the default `panel.json` is optional.
    pub fn resolve(path: Option<&Path>, variant: Option<&str>) -> Result<Self> {
        let mut config = match path {
            Some(path) => Self::from_file(path)?,
            None => {
                let default_path = Path::new(DEFAULT_CONFIG_FILE);
                if default_path.exists() {
                    Self::from_file(default_path)?
                } else {
                    Self::default()
                }
            }
        };

        if let Some(variant) = variant {
            config.variant = variant.parse()?;
        }

        config.validate()?;
        info!(
            "Panel config: base_url={}, variant={:?}, discard_stale={}",
            config.base_url, config.variant, config.discard_stale
        );
        Ok(config)
    }

    /// Check that the base address is an absolute http(s) URL
    pub fn validate(&self) -> Result<()> {
        let url = Url::parse(&self.base_url)?;
        match url.scheme() {
            "http" | "https" => Ok(()),
            scheme => Err(AppError::Config(format!(
                "Unsupported scheme '{}' in base URL",
                scheme
            ))),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_defaults() {
        let config = PanelConfig::default();
        assert_eq!(config.base_url, "http://127.0.0.1:8000");
        assert_eq!(config.variant, Variant::V2);
        assert!(!config.discard_stale);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_variant_parsing() {
        assert_eq!("v1".parse::<Variant>().unwrap(), Variant::V1);
        assert_eq!(" V2 ".parse::<Variant>().unwrap(), Variant::V2);
        assert_eq!("1".parse::<Variant>().unwrap(), Variant::V1);
        assert!("v3".parse::<Variant>().is_err());
    }

    #[test]
    fn test_from_file_partial() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(file, r#"{{"variant": "v1"}}"#).unwrap();

        let config = PanelConfig::from_file(file.path()).unwrap();
        assert_eq!(config.variant, Variant::V1);
        assert_eq!(config.base_url, BASE_URL);
    }

    #[test]
    fn test_resolve_variant_override() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(
            file,
            r#"{{"base_url": "http://10.0.0.5:9000", "variant": "v2", "discard_stale": true}}"#
        )
        .unwrap();

        let config = PanelConfig::resolve(Some(file.path()), Some("v1")).unwrap();
        assert_eq!(config.base_url, "http://10.0.0.5:9000");
        assert_eq!(config.variant, Variant::V1);
        assert!(config.discard_stale);
    }

    #[test]
    fn test_resolve_missing_explicit_file() {
        let dir = tempfile::tempdir().unwrap();
        let missing = dir.path().join("nope.json");
        let err = PanelConfig::resolve(Some(&missing), None).unwrap_err();
        assert_eq!(err.code(), "IO_ERROR");
    }

    #[test]
    fn test_rejects_bad_base_url() {
        let config = PanelConfig {
            base_url: "ftp://127.0.0.1".to_string(),
            ..Default::default()
        };
        assert!(config.validate().is_err());

        let config = PanelConfig {
            base_url: "127.0.0.1:8000".to_string(),
            ..Default::default()
        };
        assert!(config.validate().is_err());
    }
}
