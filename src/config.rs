//! Configuration handling for the TUI

use crate::prediction::DEFAULT_ENDPOINT;
use anyhow::Result;
use directories::ProjectDirs;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

/// Environment variable that overrides the configured endpoint
pub const ENDPOINT_ENV: &str = "HEALTH_RISK_ENDPOINT";

/// User configuration for the TUI
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct TuiConfig {
    /// Prediction service URL
    pub endpoint: Option<String>,
}

impl TuiConfig {
    /// Get the config file path
    fn config_path() -> Option<PathBuf> {
        ProjectDirs::from("io", "healthrisk", "health-risk-tui")
            .map(|dirs| dirs.config_dir().join("config.json"))
    }

    /// Load configuration from the platform config directory
    pub fn load() -> Result<Self> {
        match Self::config_path() {
            Some(path) => Self::load_from(&path),
            None => Ok(Self::default()),
        }
    }

    /// Load configuration from a specific file; a missing file yields defaults
    pub fn load_from(path: &Path) -> Result<Self> {
        if !path.exists() {
            return Ok(Self::default());
        }
        let content = fs::read_to_string(path)?;
        let config: TuiConfig = serde_json::from_str(&content)?;
        Ok(config)
    }

    /// Load configuration, falling back to defaults when the file is unreadable
    pub fn load_or_default() -> Self {
        Self::load().unwrap_or_else(|err| {
            tracing::warn!("Ignoring unreadable config: {err:#}");
            Self::default()
        })
    }

    /// Endpoint to use: environment, then config file, then the default
    pub fn resolve_endpoint(&self) -> String {
        Self::pick_endpoint(std::env::var(ENDPOINT_ENV).ok(), self.endpoint.as_deref())
    }

    fn pick_endpoint(env: Option<String>, configured: Option<&str>) -> String {
        env.filter(|e| !e.trim().is_empty())
            .or_else(|| configured.map(str::to_string))
            .unwrap_or_else(|| DEFAULT_ENDPOINT.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = TuiConfig::default();
        assert!(config.endpoint.is_none());
    }

    #[test]
    fn test_serialization() {
        let config = TuiConfig {
            endpoint: Some("http://predictor.local/predict".to_string()),
        };

        let json = serde_json::to_string(&config).unwrap();
        let parsed: TuiConfig = serde_json::from_str(&json).unwrap();

        assert_eq!(
            parsed.endpoint,
            Some("http://predictor.local/predict".to_string())
        );
    }

    #[test]
    fn test_deserialize_from_empty_json() {
        let parsed: TuiConfig = serde_json::from_str("{}").unwrap();
        assert!(parsed.endpoint.is_none());
    }

    #[test]
    fn test_deserialize_with_extra_fields() {
        // Should ignore unknown fields
        let json = r#"{"endpoint": "http://x/predict", "theme": "dark"}"#;
        let parsed: TuiConfig = serde_json::from_str(json).unwrap();
        assert_eq!(parsed.endpoint, Some("http://x/predict".to_string()));
    }

    #[test]
    fn test_load_from_missing_file_is_default() {
        let path = std::env::temp_dir().join("health-risk-tui-no-such-config.json");
        let config = TuiConfig::load_from(&path).unwrap();
        assert!(config.endpoint.is_none());
    }

    #[test]
    fn test_load_from_file() {
        let path = std::env::temp_dir().join(format!(
            "health-risk-tui-config-{}.json",
            std::process::id()
        ));
        fs::write(&path, r#"{"endpoint": "http://10.0.0.2:5000/predict"}"#).unwrap();
        let config = TuiConfig::load_from(&path).unwrap();
        fs::remove_file(&path).ok();
        assert_eq!(
            config.endpoint.as_deref(),
            Some("http://10.0.0.2:5000/predict")
        );
    }

    #[test]
    fn test_load_from_invalid_json_errors() {
        let path = std::env::temp_dir().join(format!(
            "health-risk-tui-bad-config-{}.json",
            std::process::id()
        ));
        fs::write(&path, "not json").unwrap();
        let result = TuiConfig::load_from(&path);
        fs::remove_file(&path).ok();
        assert!(result.is_err());
    }

    #[test]
    fn test_pick_endpoint_prefers_env() {
        assert_eq!(
            TuiConfig::pick_endpoint(Some("http://env/predict".into()), Some("http://file/predict")),
            "http://env/predict"
        );
    }

    #[test]
    fn test_pick_endpoint_falls_back_to_config_then_default() {
        assert_eq!(
            TuiConfig::pick_endpoint(None, Some("http://file/predict")),
            "http://file/predict"
        );
        assert_eq!(
            TuiConfig::pick_endpoint(Some("  ".into()), None),
            DEFAULT_ENDPOINT
        );
    }
}
