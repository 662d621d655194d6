//! Configuration management for EPEX Monitor
//!
//! This module handles loading, validation, and management of the application
//! configuration from YAML files. The ENTSO-E access token can also be supplied
//! through the `EPEX_API_KEY` environment variable.

use crate::error::{EpexError, Result};
use serde::{Deserialize, Serialize};
use std::path::Path;

mod defaults;

/// Environment variable that overrides `entsoe.api_key`
pub const API_KEY_ENV: &str = "EPEX_API_KEY";

/// Main configuration structure
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// ENTSO-E transparency platform access
    pub entsoe: EntsoeConfig,

    /// Minutes between two price cycles
    pub refresh_interval_minutes: u64,

    /// IANA timezone used for local-hour change detection and log output
    pub timezone: String,

    /// Logging configuration
    pub logging: LoggingConfig,

    /// Published price sensor
    pub sensor: SensorConfig,

    /// Web server binding configuration
    pub web: WebConfig,
}

/// ENTSO-E API parameters
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct EntsoeConfig {
    /// Security token; empty means no credentials
    pub api_key: String,

    /// Bidding zone EIC code, used for both in and out domain
    pub in_domain: String,

    /// API endpoint
    pub base_url: String,

    /// Document type requested (A44 = day-ahead prices)
    pub document_type: String,

    /// Width of the request window starting at today's UTC midnight
    pub window_hours: u32,
}

/// Logging configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    /// Log level (TRACE, DEBUG, INFO, WARN, ERROR)
    pub level: String,

    /// Optional console-specific level
    pub console_level: Option<String>,

    /// Optional file-specific level
    pub file_level: Option<String>,

    /// Path to log file (its directory receives the rolling files)
    pub file: String,

    /// Number of rotated files to keep
    pub backup_count: u32,

    /// Whether to log to console
    pub console_output: bool,

    /// Whether to use JSON format
    pub json_format: bool,
}

/// Identity of the published price sensor
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct SensorConfig {
    /// Display name
    pub name: String,
}

/// Web server configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct WebConfig {
    /// Whether to serve the read API
    pub enabled: bool,

    /// Bind address
    pub host: String,

    /// TCP port
    pub port: u16,
}

impl EntsoeConfig {
    /// Whether a usable security token is configured
    pub fn has_credentials(&self) -> bool {
        !self.api_key.trim().is_empty()
    }
}

impl Config {
    /// Load configuration from a YAML file
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let contents = std::fs::read_to_string(path)?;
        let config: Config = serde_yaml::from_str(&contents)?;
        Ok(config)
    }

    /// Load configuration from the first default location that exists
    pub fn load() -> Result<Self> {
        let default_paths = [
            "epex_config.yaml",
            "/data/epex_config.yaml",
            "/etc/epex-monitor/config.yaml",
        ];

        let mut config = default_paths
            .iter()
            .find(|p| Path::new(p).exists())
            .map(Self::from_file)
            .transpose()?
            .unwrap_or_default();
        config.apply_env_overrides();
        Ok(config)
    }

    /// Save configuration to a YAML file
    pub fn save_to_file<P: AsRef<Path>>(&self, path: P) -> Result<()> {
        let yaml = serde_yaml::to_string(self)?;
        std::fs::write(path, yaml)?;
        Ok(())
    }

    /// Apply environment overrides on top of file values
    pub fn apply_env_overrides(&mut self) {
        if let Ok(key) = std::env::var(API_KEY_ENV)
            && !key.trim().is_empty()
        {
            self.entsoe.api_key = key;
        }
    }

    /// Parsed timezone
    pub fn tz(&self) -> Result<chrono_tz::Tz> {
        self.timezone
            .parse::<chrono_tz::Tz>()
            .map_err(|e| EpexError::validation("timezone".to_string(), e.to_string()))
    }

    /// Validate the configuration
    pub fn validate(&self) -> Result<()> {
        if self.refresh_interval_minutes == 0 {
            return Err(EpexError::validation(
                "refresh_interval_minutes",
                "Must be greater than 0",
            ));
        }

        if self.entsoe.in_domain.trim().is_empty() {
            return Err(EpexError::validation(
                "entsoe.in_domain",
                "Area code cannot be empty",
            ));
        }

        if !self.entsoe.base_url.starts_with("http://")
            && !self.entsoe.base_url.starts_with("https://")
        {
            return Err(EpexError::validation(
                "entsoe.base_url",
                "Must be an http(s) URL",
            ));
        }

        if self.entsoe.window_hours == 0 {
            return Err(EpexError::validation(
                "entsoe.window_hours",
                "Must be greater than 0",
            ));
        }

        self.tz()?;

        if self.web.enabled && self.web.port == 0 {
            return Err(EpexError::validation(
                "web.port",
                "Port must be greater than 0",
            ));
        }

        Ok(())
    }
}
