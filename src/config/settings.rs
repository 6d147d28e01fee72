//! Application settings loaded from `config.toml`.
//!
//! The file is optional: every section has defaults so a bare checkout can run.
//! A handful of deployment-specific values can be overridden from the
//! environment (after `.env` has been loaded by `main`).

use crate::errors::{Error, Result};
use serde::Deserialize;
use std::path::Path;
use tracing::{debug, info};

/// Default location of the settings file.
pub const DEFAULT_CONFIG_PATH: &str = "config.toml";

/// Configuration structure representing the entire config.toml file
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    pub server: ServerConfig,
    pub business: BusinessConfig,
    pub invoice: InvoiceConfig,
    pub notifications: NotificationConfig,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct ServerConfig {
    /// Socket address the HTTP API listens on
    pub bind_address: String,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            bind_address: "127.0.0.1:3000".to_string(),
        }
    }
}

/// Agency details printed on the invoice letterhead and provider block.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct BusinessConfig {
    pub name: String,
    pub address_lines: Vec<String>,
    pub email: String,
    pub phone: String,
    pub website: Option<String>,
    pub currency_symbol: String,
    pub vat_number: Option<String>,
    /// Free text printed under the totals block
    pub payment_terms: String,
}

impl Default for BusinessConfig {
    fn default() -> Self {
        Self {
            name: "Dental Nurse Staffing".to_string(),
            address_lines: Vec::new(),
            email: "accounts@example.com".to_string(),
            phone: String::new(),
            website: None,
            currency_symbol: "£".to_string(),
            vat_number: None,
            payment_terms: "Payment due within 14 days of the invoice date.".to_string(),
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct InvoiceConfig {
    /// Rate pre-filled into every new invoice draft
    pub default_hourly_rate: f64,
}

impl Default for InvoiceConfig {
    fn default() -> Self {
        Self {
            default_hourly_rate: 20.0,
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct NotificationConfig {
    /// Staff inbox alerted about new timesheets
    pub admin_email: String,
    /// Endpoint of the mail relay that wraps the SMTP provider
    pub relay_url: String,
    /// Display name used in email subjects and greetings
    pub from_name: String,
}

impl Default for NotificationConfig {
    fn default() -> Self {
        Self {
            admin_email: "admin@example.com".to_string(),
            relay_url: "http://127.0.0.1:8025/send-email".to_string(),
            from_name: "Dental Nurse Staffing".to_string(),
        }
    }
}

impl AppConfig {
    /// Applies `BIND_ADDRESS`, `ADMIN_EMAIL` and `MAIL_RELAY_URL` overrides.
    pub fn apply_env_overrides(&mut self) {
        if let Ok(bind_address) = std::env::var("BIND_ADDRESS") {
            self.server.bind_address = bind_address;
        }
        if let Ok(admin_email) = std::env::var("ADMIN_EMAIL") {
            self.notifications.admin_email = admin_email;
        }
        if let Ok(relay_url) = std::env::var("MAIL_RELAY_URL") {
            self.notifications.relay_url = relay_url;
        }
    }

    fn validate(&self) -> Result<()> {
        let rate = self.invoice.default_hourly_rate;
        if !rate.is_finite() || rate < 0.0 {
            return Err(Error::Config {
                message: format!("invoice.default_hourly_rate must be non-negative, got {rate}"),
            });
        }
        if self.business.name.trim().is_empty() {
            return Err(Error::Config {
                message: "business.name cannot be empty".to_string(),
            });
        }
        Ok(())
    }
}

/// Parses settings from TOML text.
///
/// # Errors
/// Returns `Error::Config` if the TOML is invalid or a value is out of range.
pub fn parse_config(contents: &str) -> Result<AppConfig> {
    let config: AppConfig = toml::from_str(contents).map_err(|e| Error::Config {
        message: format!("Failed to parse config.toml: {e}"),
    })?;
    config.validate()?;
    Ok(config)
}

/// Loads settings from a TOML file. A missing file yields the defaults.
///
/// # Errors
/// Returns an error if the file exists but cannot be read or parsed.
pub fn load_config<P: AsRef<Path>>(path: P) -> Result<AppConfig> {
    let path_ref = path.as_ref();
    if !path_ref.exists() {
        info!("No config file at {:?}, using defaults", path_ref);
        return Ok(AppConfig::default());
    }
    debug!("Loading configuration from {:?}", path_ref);
    let contents = std::fs::read_to_string(path_ref).map_err(|e| Error::Config {
        message: format!("Failed to read config file {path_ref:?}: {e}"),
    })?;
    parse_config(&contents)
}

/// Loads settings from `STAFFING_DESK_CONFIG` (or `./config.toml`) and applies
/// environment overrides.
pub fn load_app_configuration() -> Result<AppConfig> {
    let path =
        std::env::var("STAFFING_DESK_CONFIG").unwrap_or_else(|_| DEFAULT_CONFIG_PATH.to_string());
    let mut config = load_config(&path)?;
    config.apply_env_overrides();
    Ok(config)
}
