// src/config/env.rs
// DOCUMENTATION: Environment variable management
// PURPOSE: Load and validate configuration from .env files

use dotenv::dotenv;
use std::env;

use crate::errors::ProspectorError;

/// Application configuration loaded from environment variables
/// DOCUMENTATION: Centralizes all configuration in one struct
/// Load with Config::from_env() at application startup
#[derive(Debug, Clone)]
pub struct Config {
    /// Google Maps API Key (Places + Geocoding)
    pub google_maps_api_key: String,

    /// Base URL for the Google Maps APIs (overridable for tests)
    pub places_base_url: String,

    /// HTTP request timeout in seconds
    pub http_timeout_secs: u64,

    /// Pause before requesting a follow-up result page, in milliseconds.
    /// next_page_token takes a moment to become valid on Google's side.
    pub page_delay_ms: u64,

    /// Pause between Place Details calls, in milliseconds
    pub detail_delay_ms: u64,

    /// Log level: debug, info, warn, error
    pub log_level: String,
}

impl Config {
    /// Load configuration from environment variables
    /// DOCUMENTATION: Reads from .env or process environment
    /// Called once at application startup
    pub fn from_env() -> Self {
        // Load .env file if it exists
        dotenv().ok();

        Config {
            google_maps_api_key: env::var("GOOGLE_MAPS_API_KEY").unwrap_or_else(|_| String::new()),

            places_base_url: env::var("PLACES_BASE_URL")
                .unwrap_or_else(|_| "https://maps.googleapis.com/maps/api".to_string()),

            http_timeout_secs: env::var("HTTP_TIMEOUT_SECS")
                .unwrap_or_else(|_| "30".to_string())
                .parse()
                .unwrap_or(30),

            page_delay_ms: env::var("PAGE_DELAY_MS")
                .unwrap_or_else(|_| "2000".to_string())
                .parse()
                .unwrap_or(2000),

            detail_delay_ms: env::var("DETAIL_DELAY_MS")
                .unwrap_or_else(|_| "100".to_string())
                .parse()
                .unwrap_or(100),

            log_level: env::var("LOG_LEVEL").unwrap_or_else(|_| "info".to_string()),
        }
    }

    /// Validate critical configuration
    /// DOCUMENTATION: Ensures the API key is present before any request is issued
    pub fn validate(&self) -> Result<(), ProspectorError> {
        if self.google_maps_api_key.is_empty() {
            return Err(ProspectorError::MissingApiKey);
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn config_with_key(key: &str) -> Config {
        Config {
            google_maps_api_key: key.to_string(),
            places_base_url: "https://maps.googleapis.com/maps/api".to_string(),
            http_timeout_secs: 30,
            page_delay_ms: 2000,
            detail_delay_ms: 100,
            log_level: "info".to_string(),
        }
    }

    #[test]
    fn test_validate_rejects_missing_key() {
        let config = config_with_key("");
        assert!(matches!(
            config.validate(),
            Err(ProspectorError::MissingApiKey)
        ));
    }

    #[test]
    fn test_validate_accepts_configured_key() {
        let config = config_with_key("test-key");
        assert!(config.validate().is_ok());
    }
}
