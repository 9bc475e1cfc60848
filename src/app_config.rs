use crate::expiry::{self, HolidaySet};
use crate::market;
use anyhow::{bail, Result};
use colored::Colorize;

pub const DEFAULT_MODE: &str = "server";
pub const DEFAULT_HOST: &str = "127.0.0.1";
pub const DEFAULT_PORT: u16 = 5000;

/// Application configuration handler
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AppConfig {
    pub mode: String,
    pub host: String,
    pub port: u16,
    pub holidays_file: Option<String>,
    pub data_dir: String,
    pub instruments_url: String,
    pub single_index: String,
    pub single_date: Option<String>,
}

impl AppConfig {
    /// Create new configuration from environment variables
    pub fn from_env() -> Self {
        Self {
            mode: std::env::var("EXPIRY_MODE").unwrap_or_else(|_| DEFAULT_MODE.to_string()),
            host: std::env::var("EXPIRY_HOST").unwrap_or_else(|_| DEFAULT_HOST.to_string()),
            port: Self::parse_port(std::env::var("EXPIRY_PORT").ok().as_deref()),
            holidays_file: expiry::config::get_holidays_file(),
            data_dir: market::config::get_data_dir(),
            instruments_url: market::config::get_instruments_url(),
            single_index: expiry::config::get_single_index(),
            single_date: expiry::config::get_single_date(),
        }
    }

    /// Port from a raw value, falling back to the default when absent or malformed
    pub fn parse_port(raw: Option<&str>) -> u16 {
        raw.and_then(|p| p.trim().parse::<u16>().ok())
            .unwrap_or(DEFAULT_PORT)
    }

    pub fn bind_address(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }

    /// Holiday table from the configured file, or the built-in NSE table
    pub fn load_holidays(&self) -> Result<HolidaySet> {
        match &self.holidays_file {
            Some(path) => HolidaySet::load(path),
            None => Ok(HolidaySet::nse_2024()),
        }
    }

    pub fn log_config(&self) {
        println!("{} Mode: {}", "→".cyan(), self.mode.yellow());
        println!(
            "{} Holidays: {}",
            "→".cyan(),
            self.holidays_file.as_deref().unwrap_or("built-in NSE 2024").yellow()
        );
        if self.mode == "server" {
            println!("{} Address: {}", "→".cyan(), self.bind_address().yellow());
        }
        println!();
    }

    /// Validate configuration
    pub fn validate(&self) -> Result<()> {
        if self.port == 0 {
            bail!("EXPIRY_PORT must be between 1 and 65535");
        }
        if self.host.trim().is_empty() {
            bail!("EXPIRY_HOST must not be empty");
        }
        Ok(())
    }
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            mode: DEFAULT_MODE.to_string(),
            host: DEFAULT_HOST.to_string(),
            port: DEFAULT_PORT,
            holidays_file: None,
            data_dir: market::config::DEFAULT_DATA_DIR.to_string(),
            instruments_url: market::config::KITE_INSTRUMENTS_URL.to_string(),
            single_index: expiry::config::DEFAULT_INDEX.to_string(),
            single_date: None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_parse_port() {
        assert_eq!(AppConfig::parse_port(Some("8080")), 8080);
        assert_eq!(AppConfig::parse_port(Some("not-a-port")), DEFAULT_PORT);
        assert_eq!(AppConfig::parse_port(Some("70000")), DEFAULT_PORT);
        assert_eq!(AppConfig::parse_port(None), DEFAULT_PORT);
    }

    #[test]
    fn test_validate() {
        assert!(AppConfig::default().validate().is_ok());

        let zero_port = AppConfig { port: 0, ..AppConfig::default() };
        assert!(zero_port.validate().is_err());
    }

    #[test]
    fn test_default_holidays() {
        let holidays = AppConfig::default().load_holidays().unwrap();
        assert_eq!(holidays.len(), 12);
    }

    #[test]
    fn test_holidays_from_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(file, r#"{{"2025-01-26": "Republic Day"}}"#).unwrap();

        let config = AppConfig {
            holidays_file: Some(file.path().to_string_lossy().into_owned()),
            ..AppConfig::default()
        };
        let holidays = config.load_holidays().unwrap();
        assert_eq!(holidays.len(), 1);
    }

    #[test]
    fn test_missing_holidays_file() {
        let config = AppConfig {
            holidays_file: Some("/definitely/not/here.json".into()),
            ..AppConfig::default()
        };
        assert!(config.load_holidays().is_err());
    }
}
