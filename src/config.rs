//! Configuration management for the Outlook client
//!
//! This module handles loading, validation, and management of the application
//! configuration from YAML files.

use crate::error::{OutlookError, Result};
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Default portal host; the Electricity Outlook production site
pub const DEFAULT_BASE_URL: &str = "https://electricityoutlook.jemena.com.au";

/// Main configuration structure
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct Config {
    /// Portal connection and credentials
    pub portal: PortalConfig,

    /// Refresh cadence and throttle
    pub refresh: RefreshConfig,

    /// Logging configuration
    pub logging: LoggingConfig,
}

/// Portal connection parameters
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct PortalConfig {
    /// Account email used on the login form
    pub username: String,

    /// Account password
    pub password: String,

    /// Base URL of the portal
    pub base_url: String,

    /// Per-request timeout in seconds
    pub timeout_seconds: u64,
}

/// Refresh cadence configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct RefreshConfig {
    /// Minimum hours between two refreshes that actually hit the portal
    pub min_interval_hours: u64,

    /// Hours between scheduled refresh attempts in the poll loop
    pub scan_interval_hours: u64,
}

/// Logging configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    /// Log level (DEBUG, INFO, WARNING, ERROR)
    pub level: String,

    /// Optional path to a log file
    pub file: Option<String>,

    /// Whether to log to console
    pub console_output: bool,

    /// Whether to use JSON format
    pub json_format: bool,
}

impl Default for PortalConfig {
    fn default() -> Self {
        Self {
            username: String::new(),
            password: String::new(),
            base_url: DEFAULT_BASE_URL.to_string(),
            timeout_seconds: 15,
        }
    }
}

impl Default for RefreshConfig {
    fn default() -> Self {
        Self {
            min_interval_hours: 24,
            scan_interval_hours: 24,
        }
    }
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: "INFO".to_string(),
            file: None,
            console_output: true,
            json_format: false,
        }
    }
}

impl Config {
    /// Load configuration from a YAML file
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let contents = std::fs::read_to_string(path)?;
        let config: Config = serde_yaml::from_str(&contents)?;
        Ok(config)
    }

    /// Load configuration from the default locations
    pub fn load() -> Result<Self> {
        if let Ok(path) = std::env::var("JEMENA_OUTLOOK_CONFIG") {
            return Self::from_file(path);
        }

        let default_paths = ["outlook_config.yaml", "/etc/jemena-outlook/config.yaml"];
        for path in &default_paths {
            if Path::new(path).exists() {
                return Self::from_file(path);
            }
        }

        // Fall back to default configuration
        Ok(Config::default())
    }

    /// Save configuration to a YAML file
    pub fn save_to_file<P: AsRef<Path>>(&self, path: P) -> Result<()> {
        let yaml = serde_yaml::to_string(self)?;
        std::fs::write(path, yaml)?;
        Ok(())
    }

    /// Validate the configuration
    pub fn validate(&self) -> Result<()> {
        if self.portal.username.is_empty() {
            return Err(OutlookError::validation(
                "portal.username",
                "Username cannot be empty",
            ));
        }

        if self.portal.password.is_empty() {
            return Err(OutlookError::validation(
                "portal.password",
                "Password cannot be empty",
            ));
        }

        if !self.portal.base_url.starts_with("http") {
            return Err(OutlookError::validation(
                "portal.base_url",
                "Base URL must be an HTTP(S) URL",
            ));
        }

        if self.portal.timeout_seconds == 0 {
            return Err(OutlookError::validation(
                "portal.timeout_seconds",
                "Must be greater than 0",
            ));
        }

        if self.refresh.scan_interval_hours == 0 {
            return Err(OutlookError::validation(
                "refresh.scan_interval_hours",
                "Must be greater than 0",
            ));
        }

        Ok(())
    }
}
