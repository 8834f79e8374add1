use config::{Config, Environment, File};
use serde::Deserialize;
use std::env;

pub use config::ConfigError;

#[derive(Debug, Deserialize, Clone)]
pub struct Settings {
    pub client: ClientSettings,
    pub fixtures: FixtureSettings,
    pub logging: LoggingSettings,
}

#[derive(Debug, Deserialize, Clone)]
pub struct ClientSettings {
    pub endpoint: String,
    pub request_timeout_ms: u64,
}

#[derive(Debug, Deserialize, Clone)]
pub struct FixtureSettings {
    /// Gate for all fixture file writes. Off by default so the recorder is
    /// inert outside data-generation runs.
    pub write_enabled: bool,
    /// Root directory fixture paths resolve against. Empty means the current
    /// working directory.
    pub output_root: String,
}

#[derive(Debug, Deserialize, Clone)]
pub struct LoggingSettings {
    pub level: String,
    pub format: String,
}

impl Settings {
    pub fn new() -> Result<Self, ConfigError> {
        let environment = env::var("ENVIRONMENT").unwrap_or_else(|_| "development".to_string());

        let config = Config::builder()
            // Start with default values
            .set_default("client.endpoint", "https://transfer.example.com")?
            .set_default("client.request_timeout_ms", 30_000)?
            .set_default("fixtures.write_enabled", false)?
            .set_default("fixtures.output_root", "")?
            .set_default("logging.level", "info")?
            .set_default("logging.format", "json")?
            // Add configuration file if it exists
            .add_source(File::with_name("config/default").required(false))
            .add_source(File::with_name(&format!("config/{environment}")).required(false))
            .add_source(File::with_name("config/local").required(false))
            // Add environment variables with prefix
            .add_source(Environment::with_prefix("MOORAGE").separator("__"))
            .build()?;

        config.try_deserialize()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_settings_can_be_loaded() {
        let settings = Settings::new();
        assert!(settings.is_ok());
    }

    #[test]
    fn test_fixture_writes_disabled_by_default() {
        let settings = Settings::new().unwrap();
        assert!(!settings.fixtures.write_enabled);
        assert!(settings.fixtures.output_root.is_empty());
    }
}
