//! Configuration management for the `Tripwise` application
//!
//! Handles loading configuration from files, environment variables,
//! and provides validation for all configuration settings.

use crate::TripwiseError;
use anyhow::{Context, Result};
use config::{Config, Environment, File};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Root configuration structure for the `Tripwise` application
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TripwiseConfig {
    /// Geoapify geocoding/places configuration
    #[serde(default)]
    pub geo: GeoConfig,
    /// Weather API configuration
    #[serde(default)]
    pub weather: WeatherConfig,
    /// Cache configuration
    #[serde(default)]
    pub cache: CacheConfig,
    /// Logging configuration
    #[serde(default)]
    pub logging: LoggingConfig,
    /// HTTP server settings
    #[serde(default)]
    pub server: ServerConfig,
    /// Planner defaults
    #[serde(default)]
    pub planner: PlannerConfig,
}

/// Geoapify API configuration settings
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GeoConfig {
    /// Geoapify API key; without it hotel and places lookups fall back to
    /// the static catalog
    pub api_key: Option<String>,
    /// Base URL for the Geoapify API
    #[serde(default = "default_geo_base_url")]
    pub base_url: String,
    /// Search radius around the city center in meters
    #[serde(default = "default_geo_radius")]
    pub radius_m: u32,
}

/// Weather API configuration settings
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WeatherConfig {
    /// OpenWeatherMap API key; without it the weather snapshot falls back
    /// to the static record
    pub api_key: Option<String>,
    /// Base URL for the weather API
    #[serde(default = "default_weather_base_url")]
    pub base_url: String,
    /// Request timeout in seconds
    #[serde(default = "default_weather_timeout")]
    pub timeout_seconds: u32,
    /// Maximum number of retries for failed requests
    #[serde(default = "default_weather_max_retries")]
    pub max_retries: u32,
}

/// Cache configuration settings
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CacheConfig {
    /// Cache TTL in hours
    #[serde(default = "default_cache_ttl")]
    pub ttl_hours: u32,
    /// Cache directory location
    #[serde(default = "default_cache_location")]
    pub location: String,
}

/// Logging configuration settings
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoggingConfig {
    /// Log level (error, warn, info, debug, trace)
    #[serde(default = "default_log_level")]
    pub level: String,
    /// Log format (pretty or json)
    #[serde(default = "default_log_format")]
    pub format: String,
}

/// HTTP server settings
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServerConfig {
    /// Port the API server binds to
    #[serde(default = "default_server_port")]
    pub port: u16,
}

/// Planner defaults
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PlannerConfig {
    /// Seed for the candidate generator's deterministic jitter
    #[serde(default = "default_candidate_seed")]
    pub candidate_seed: u64,
}

// Default value functions
fn default_geo_base_url() -> String {
    "https://api.geoapify.com".to_string()
}

fn default_geo_radius() -> u32 {
    10_000
}

fn default_weather_base_url() -> String {
    "https://api.openweathermap.org/data/2.5".to_string()
}

fn default_weather_timeout() -> u32 {
    30
}

fn default_weather_max_retries() -> u32 {
    3
}

fn default_cache_ttl() -> u32 {
    6
}

fn default_cache_location() -> String {
    "~/.cache/tripwise".to_string()
}

fn default_log_level() -> String {
    "info".to_string()
}

fn default_log_format() -> String {
    "pretty".to_string()
}

fn default_server_port() -> u16 {
    8080
}

fn default_candidate_seed() -> u64 {
    2024
}

impl Default for GeoConfig {
    fn default() -> Self {
        Self {
            api_key: None,
            base_url: default_geo_base_url(),
            radius_m: default_geo_radius(),
        }
    }
}

impl Default for WeatherConfig {
    fn default() -> Self {
        Self {
            api_key: None,
            base_url: default_weather_base_url(),
            timeout_seconds: default_weather_timeout(),
            max_retries: default_weather_max_retries(),
        }
    }
}

impl Default for CacheConfig {
    fn default() -> Self {
        Self {
            ttl_hours: default_cache_ttl(),
            location: default_cache_location(),
        }
    }
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
            format: default_log_format(),
        }
    }
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            port: default_server_port(),
        }
    }
}

impl Default for PlannerConfig {
    fn default() -> Self {
        Self {
            candidate_seed: default_candidate_seed(),
        }
    }
}

impl Default for TripwiseConfig {
    fn default() -> Self {
        Self {
            geo: GeoConfig::default(),
            weather: WeatherConfig::default(),
            cache: CacheConfig::default(),
            logging: LoggingConfig::default(),
            server: ServerConfig::default(),
            planner: PlannerConfig::default(),
        }
    }
}

impl TripwiseConfig {
    /// Load configuration from file and environment variables
    pub fn load() -> Result<Self> {
        Self::load_from_path(None)
    }

    /// Load configuration from specified path
    pub fn load_from_path(config_path: Option<PathBuf>) -> Result<Self> {
        let mut builder = Config::builder();

        let config_file = config_path.unwrap_or_else(|| {
            Self::get_config_path().unwrap_or_else(|| PathBuf::from("config.toml"))
        });

        if config_file.exists() {
            builder = builder.add_source(
                File::from(config_file.clone())
                    .required(false)
                    .format(config::FileFormat::Toml),
            );
        }

        // Environment variable overrides with TRIPWISE_ prefix,
        // e.g. TRIPWISE_GEO__API_KEY
        builder = builder.add_source(
            Environment::with_prefix("TRIPWISE")
                .separator("__")
                .try_parsing(true),
        );

        let settings = builder
            .build()
            .with_context(|| "Failed to build configuration")?;

        let config: TripwiseConfig = settings
            .try_deserialize()
            .with_context(|| "Failed to deserialize configuration")?;

        config.validate()?;

        Ok(config)
    }

    /// Get the default configuration file path
    #[must_use]
    pub fn get_config_path() -> Option<PathBuf> {
        dirs::config_dir().map(|dir| dir.join("tripwise").join("config.toml"))
    }

    /// Resolve the cache directory, expanding a leading `~`
    #[must_use]
    pub fn cache_dir(&self) -> PathBuf {
        if let Some(rest) = self.cache.location.strip_prefix("~/") {
            if let Some(home) = dirs::home_dir() {
                return home.join(rest);
            }
        }
        PathBuf::from(&self.cache.location)
    }

    /// Validate all configuration settings
    pub fn validate(&self) -> Result<()> {
        self.validate_api_keys()?;
        self.validate_numeric_ranges()?;
        self.validate_string_values()?;
        Ok(())
    }

    /// Validate API keys and credentials
    pub fn validate_api_keys(&self) -> Result<()> {
        // Keys are optional; the providers fall back to the static catalog.
        for (name, key) in [
            ("Geoapify", &self.geo.api_key),
            ("Weather", &self.weather.api_key),
        ] {
            if let Some(api_key) = key {
                if api_key.is_empty() {
                    return Err(TripwiseError::config(format!(
                        "{name} API key cannot be empty if provided. Either remove it or provide a valid key."
                    ))
                    .into());
                }
                if api_key.len() < 8 {
                    return Err(TripwiseError::config(format!(
                        "{name} API key appears to be invalid (too short). Please check your API key."
                    ))
                    .into());
                }
            }
        }
        Ok(())
    }

    /// Validate numeric configuration ranges
    fn validate_numeric_ranges(&self) -> Result<()> {
        if self.weather.timeout_seconds > 300 {
            return Err(
                TripwiseError::config("Weather API timeout cannot exceed 300 seconds").into(),
            );
        }

        if self.weather.max_retries > 10 {
            return Err(TripwiseError::config("Weather API max retries cannot exceed 10").into());
        }

        if self.cache.ttl_hours > 168 {
            return Err(
                TripwiseError::config("Cache TTL cannot exceed 168 hours (1 week)").into(),
            );
        }

        if self.geo.radius_m < 1000 || self.geo.radius_m > 50_000 {
            return Err(TripwiseError::config(
                "Places search radius must be between 1000 and 50000 meters",
            )
            .into());
        }

        Ok(())
    }

    /// Validate string configuration values
    fn validate_string_values(&self) -> Result<()> {
        let valid_log_levels = ["error", "warn", "info", "debug", "trace"];
        if !valid_log_levels.contains(&self.logging.level.as_str()) {
            return Err(TripwiseError::config(format!(
                "Invalid log level '{}'. Must be one of: {}",
                self.logging.level,
                valid_log_levels.join(", ")
            ))
            .into());
        }

        let valid_log_formats = ["pretty", "json"];
        if !valid_log_formats.contains(&self.logging.format.as_str()) {
            return Err(TripwiseError::config(format!(
                "Invalid log format '{}'. Must be one of: {}",
                self.logging.format,
                valid_log_formats.join(", ")
            ))
            .into());
        }

        for (name, url) in [
            ("Geoapify", &self.geo.base_url),
            ("Weather", &self.weather.base_url),
        ] {
            if !url.starts_with("http://") && !url.starts_with("https://") {
                return Err(TripwiseError::config(format!(
                    "{name} base URL must be a valid HTTP or HTTPS URL"
                ))
                .into());
            }
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = TripwiseConfig::default();
        assert_eq!(config.geo.base_url, "https://api.geoapify.com");
        assert_eq!(config.weather.timeout_seconds, 30);
        assert_eq!(config.cache.ttl_hours, 6);
        assert_eq!(config.logging.level, "info");
        assert_eq!(config.server.port, 8080);
        assert!(config.geo.api_key.is_none());
        assert!(config.weather.api_key.is_none());
    }

    #[test]
    fn test_default_config_validates() {
        assert!(TripwiseConfig::default().validate().is_ok());
    }

    #[test]
    fn test_config_validation_short_api_key() {
        let mut config = TripwiseConfig::default();
        config.geo.api_key = Some("short".to_string());
        let result = config.validate_api_keys();
        assert!(result.is_err());
        assert!(result.unwrap_err().to_string().contains("too short"));
    }

    #[test]
    fn test_config_validation_invalid_log_level() {
        let mut config = TripwiseConfig::default();
        config.logging.level = "loud".to_string();
        let result = config.validate();
        assert!(result.is_err());
        assert!(result.unwrap_err().to_string().contains("Invalid log level"));
    }

    #[test]
    fn test_config_validation_numeric_ranges() {
        let mut config = TripwiseConfig::default();
        config.weather.timeout_seconds = 500;
        let result = config.validate();
        assert!(result.is_err());
        assert!(
            result
                .unwrap_err()
                .to_string()
                .contains("timeout cannot exceed")
        );
    }

    #[test]
    fn test_config_validation_radius_bounds() {
        let mut config = TripwiseConfig::default();
        config.geo.radius_m = 100;
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_config_path_generation() {
        let path = TripwiseConfig::get_config_path();
        assert!(path.is_some());
        let path = path.unwrap();
        assert!(path.to_string_lossy().contains("tripwise"));
        assert!(path.to_string_lossy().contains("config.toml"));
    }

    #[test]
    fn test_cache_dir_expands_tilde() {
        let config = TripwiseConfig::default();
        let dir = config.cache_dir();
        assert!(!dir.to_string_lossy().starts_with("~"));
    }
}
