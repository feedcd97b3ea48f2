use std::{env, fs};
use serde::Deserialize;
use crate::errors::ConfigError;
use crate::logging::setup_logger;

const DEFAULT_CONFIG_PATH: &str = "config.toml";

#[derive(Deserialize)]
pub struct WebServerParameters {
    pub bind_address: String,
    pub bind_port: u16,
}

#[derive(Deserialize)]
pub struct DBParameters {
    pub db_path: String,
}

#[derive(Deserialize)]
pub struct WeatherParameters {
    pub api_key: String,
    #[serde(default = "default_base_url")]
    pub base_url: String,
    #[serde(default = "default_forecast_days")]
    pub forecast_days: usize,
}

#[derive(Deserialize)]
pub struct General {
    pub log_path: String,
    #[serde(default = "default_log_level")]
    pub log_level: String,
    #[serde(default)]
    pub log_to_stdout: bool,
}

#[derive(Deserialize)]
pub struct Config {
    pub web_server: WebServerParameters,
    pub db: DBParameters,
    pub weather: WeatherParameters,
    pub general: General,
}

fn default_base_url() -> String { "https://api.openweathermap.org".to_string() }
fn default_forecast_days() -> usize { 5 }
fn default_log_level() -> String { "info".to_string() }

/// Loads the configuration file and sets up logging
///
/// The config file path is taken from the first program argument, then from the
/// CONFIG_PATH environment variable, falling back on config.toml in the working directory
pub fn config() -> Result<Config, ConfigError> {
    let config_path = env::args().nth(1)
        .or_else(|| env::var("CONFIG_PATH").ok())
        .unwrap_or(DEFAULT_CONFIG_PATH.to_string());

    let toml = fs::read_to_string(&config_path)?;
    let config = parse_config(&toml)?;

    setup_logger(&config.general.log_path, &config.general.log_level, config.general.log_to_stdout)?;

    Ok(config)
}

/// Parses and validates a toml configuration
///
/// # Arguments
///
/// * 'toml' - configuration file contents
fn parse_config(toml: &str) -> Result<Config, ConfigError> {
    let config: Config = toml::from_str(toml)?;

    if config.weather.api_key.trim().is_empty() {
        return Err(ConfigError::from("weather.api_key must not be empty"));
    }
    if config.weather.forecast_days == 0 {
        return Err(ConfigError::from("weather.forecast_days must be at least 1"));
    }

    Ok(config)
}
