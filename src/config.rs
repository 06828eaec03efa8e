use config::{Config as ConfigBuilder, ConfigError, Environment, File};
use serde::Deserialize;
use std::env;

#[derive(Debug, Deserialize, Clone)]
pub struct Config {
    #[serde(default)]
    pub observability: ObservabilityConfig,
    #[serde(default)]
    pub planning: PlanningConfig,
}

#[derive(Debug, Deserialize, Clone)]
pub struct ObservabilityConfig {
    #[serde(default = "default_log_level")]
    pub log_level: String,
}

impl Default for ObservabilityConfig {
    fn default() -> Self {
        Self {
            log_level: default_log_level(),
        }
    }
}

fn default_log_level() -> String {
    "info".to_string()
}

#[derive(Debug, Deserialize, Clone)]
pub struct PlanningConfig {
    /// Caller-side bound on replan range length. The engine itself does not
    /// cap ranges; the CLI refuses anything longer to keep runtime and the
    /// title registry small.
    #[serde(default = "default_max_range_days")]
    pub max_range_days: u32,
}

impl Default for PlanningConfig {
    fn default() -> Self {
        Self {
            max_range_days: default_max_range_days(),
        }
    }
}

fn default_max_range_days() -> u32 {
    90
}

impl Config {
    pub fn load(config_path: Option<String>) -> Result<Self, ConfigError> {
        let mut builder = ConfigBuilder::builder();

        builder = builder
            .set_default("observability.log_level", "info")?
            .set_default("planning.max_range_days", 90)?;

        let config_file_path = config_path
            .or_else(|| env::var("CONFIG_PATH").ok())
            .unwrap_or_else(|| "config/default.toml".to_string());

        // Config file is optional; ignore a missing one.
        if std::path::Path::new(&config_file_path).exists() {
            builder = builder.add_source(File::with_name(&config_file_path));
        }

        // Environment overrides: FUELPLAN__PLANNING__MAX_RANGE_DAYS, etc.
        builder = builder.add_source(
            Environment::with_prefix("FUELPLAN")
                .separator("__")
                .try_parsing(true),
        );

        builder.build()?.try_deserialize()
    }

    pub fn validate(&self) -> Result<(), String> {
        if self.planning.max_range_days == 0 {
            return Err("planning.max_range_days must be at least 1".to_string());
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = Config::load(Some("/nonexistent/path.toml".to_string())).unwrap();
        assert_eq!(config.observability.log_level, "info");
        assert_eq!(config.planning.max_range_days, 90);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_validate_rejects_zero_range() {
        let config = Config {
            observability: ObservabilityConfig::default(),
            planning: PlanningConfig { max_range_days: 0 },
        };
        assert!(config.validate().is_err());
    }
}
