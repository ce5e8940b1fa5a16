//! Gemini backend configuration

use secrecy::{ExposeSecret, Secret};
use serde::Deserialize;
use std::time::Duration;

use super::error::ValidationError;

/// Seconds the orchestrator waits beyond the HTTP client's own timeout.
pub const BACKEND_TIMEOUT_SLACK_SECS: u64 = 5;

/// Gemini backend configuration
#[derive(Debug, Clone, Deserialize)]
pub struct AiConfig {
    /// Gemini API key
    pub api_key: Option<Secret<String>>,

    /// Model identifier
    #[serde(default = "default_model")]
    pub model: String,

    /// Base URL of the generative language API
    #[serde(default = "default_base_url")]
    pub base_url: String,

    /// Request timeout in seconds
    #[serde(default = "default_timeout")]
    pub timeout_secs: u64,
}

impl AiConfig {
    /// Get timeout as Duration
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }

    /// Upper bound the orchestrator puts on a backend call
    pub fn backend_deadline(&self) -> Duration {
        Duration::from_secs(self.backend_deadline_secs())
    }

    pub(crate) fn backend_deadline_secs(&self) -> u64 {
        self.timeout_secs.saturating_add(BACKEND_TIMEOUT_SLACK_SECS)
    }

    /// Check if an API key is configured
    pub fn has_api_key(&self) -> bool {
        self.api_key
            .as_ref()
            .is_some_and(|k| !k.expose_secret().trim().is_empty())
    }

    /// Validate Gemini configuration
    pub fn validate(&self) -> Result<(), ValidationError> {
        if !self.has_api_key() {
            return Err(ValidationError::MissingRequired("GEMINI_API_KEY"));
        }
        if self.model.trim().is_empty() {
            return Err(ValidationError::MissingRequired("GEMINI_MODEL_NAME"));
        }
        if !(self.base_url.starts_with("http://") || self.base_url.starts_with("https://")) {
            return Err(ValidationError::InvalidBaseUrl);
        }
        if self.timeout_secs == 0 || self.timeout_secs > 300 {
            return Err(ValidationError::InvalidTimeout);
        }
        Ok(())
    }
}

impl Default for AiConfig {
    fn default() -> Self {
        Self {
            api_key: None,
            model: default_model(),
            base_url: default_base_url(),
            timeout_secs: default_timeout(),
        }
    }
}

fn default_model() -> String {
    "gemini-2.5-flash".to_string()
}

fn default_base_url() -> String {
    "https://generativelanguage.googleapis.com/v1beta".to_string()
}

fn default_timeout() -> u64 {
    30
}

#[cfg(test)]
mod tests {
    use super::*;

    fn with_key(key: &str) -> AiConfig {
        AiConfig {
            api_key: Some(Secret::new(key.to_string())),
            ..Default::default()
        }
    }

    #[test]
    fn test_ai_config_defaults() {
        let config = AiConfig::default();
        assert_eq!(config.model, "gemini-2.5-flash");
        assert_eq!(config.timeout_secs, 30);
        assert!(config.api_key.is_none());
    }

    #[test]
    fn test_timeout_duration() {
        let config = AiConfig {
            timeout_secs: 60,
            ..Default::default()
        };
        assert_eq!(config.timeout(), Duration::from_secs(60));
    }

    #[test]
    fn test_backend_deadline_adds_slack() {
        assert_eq!(AiConfig::default().backend_deadline(), Duration::from_secs(35));
    }

    #[test]
    fn test_validation_missing_key() {
        assert_eq!(
            AiConfig::default().validate(),
            Err(ValidationError::MissingRequired("GEMINI_API_KEY"))
        );
        assert_eq!(
            with_key("  ").validate(),
            Err(ValidationError::MissingRequired("GEMINI_API_KEY"))
        );
    }

    #[test]
    fn test_validation_bad_base_url() {
        let config = AiConfig {
            base_url: "generativelanguage.googleapis.com".to_string(),
            ..with_key("key")
        };
        assert_eq!(config.validate(), Err(ValidationError::InvalidBaseUrl));
    }

    #[test]
    fn test_validation_bad_timeout() {
        let config = AiConfig {
            timeout_secs: 0,
            ..with_key("key")
        };
        assert_eq!(config.validate(), Err(ValidationError::InvalidTimeout));
    }

    #[test]
    fn test_validation_valid_config() {
        assert!(with_key("AIza-test").validate().is_ok());
    }

    #[test]
    fn test_debug_redacts_key() {
        let rendered = format!("{:?}", with_key("AIza-very-secret"));
        assert!(!rendered.contains("AIza-very-secret"));
    }
}
