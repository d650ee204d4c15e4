//! Application configuration loaded from environment variables.
//!
//! A `.env` file in the working directory is honored for local runs.

use crate::models::Coordinates;
use std::env;
use std::path::PathBuf;

const DEFAULT_STORE_PATH: &str = "mapty-store.json";
const DEFAULT_STORAGE_KEY: &str = crate::db::keys::WORKOUTS;
const DEFAULT_MAP_ZOOM: u8 = 13;

/// Application configuration, loaded once at startup.
#[derive(Debug, Clone)]
pub struct Config {
    /// Path of the file-backed key-value store
    pub store_path: PathBuf,
    /// Key under which the workout collection is stored
    pub storage_key: String,
    /// Zoom level for centering and panning the map
    pub map_zoom: u8,
    /// Fixed position reported by the console geolocation provider
    pub home: Option<Coordinates>,
    /// Emit logs as JSON instead of plain text
    pub log_json: bool,
}

impl Default for Config {
    /// Default config for testing only.
    fn default() -> Self {
        Self {
            store_path: PathBuf::from(DEFAULT_STORE_PATH),
            storage_key: DEFAULT_STORAGE_KEY.to_string(),
            map_zoom: DEFAULT_MAP_ZOOM,
            home: None,
            log_json: false,
        }
    }
}

impl Config {
    /// Load configuration from environment variables.
    pub fn from_env() -> Result<Self, ConfigError> {
        dotenvy::dotenv().ok(); // Load .env file if present

        Ok(Self {
            store_path: env::var("MAPTY_STORE_PATH")
                .map(PathBuf::from)
                .unwrap_or_else(|_| PathBuf::from(DEFAULT_STORE_PATH)),
            storage_key: env::var("MAPTY_STORAGE_KEY")
                .map(|v| v.trim().to_string())
                .ok()
                .filter(|v| !v.is_empty())
                .unwrap_or_else(|| DEFAULT_STORAGE_KEY.to_string()),
            map_zoom: env::var("MAPTY_MAP_ZOOM")
                .ok()
                .and_then(|v| v.trim().parse().ok())
                .unwrap_or(DEFAULT_MAP_ZOOM),
            home: home_from_env()?,
            log_json: env::var("MAPTY_LOG_JSON").is_ok(),
        })
    }
}

/// Read the optional fixed home position; both halves must be present.
fn home_from_env() -> Result<Option<Coordinates>, ConfigError> {
    let lat = env::var("MAPTY_HOME_LAT").ok();
    let lng = env::var("MAPTY_HOME_LNG").ok();

    match (lat, lng) {
        (None, None) => Ok(None),
        (Some(lat), Some(lng)) => {
            let lat = parse_coordinate("MAPTY_HOME_LAT", &lat)?;
            let lng = parse_coordinate("MAPTY_HOME_LNG", &lng)?;
            Ok(Some(Coordinates::new(lat, lng)))
        }
        (Some(_), None) => Err(ConfigError::Missing("MAPTY_HOME_LNG")),
        (None, Some(_)) => Err(ConfigError::Missing("MAPTY_HOME_LAT")),
    }
}

fn parse_coordinate(name: &'static str, raw: &str) -> Result<f64, ConfigError> {
    raw.trim()
        .parse::<f64>()
        .ok()
        .filter(|v| v.is_finite())
        .ok_or_else(|| ConfigError::Invalid(name, raw.to_string()))
}

/// Configuration errors
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Missing required environment variable: {0}")]
    Missing(&'static str),

    #[error("Invalid value for {0}: {1:?}")]
    Invalid(&'static str, String),
}

#[cfg(test)]
mod tests {
    use super::*;

    // Env vars are process-global, so everything touching them lives in one test.
    #[test]
    fn test_config_from_env() {
        env::remove_var("MAPTY_HOME_LAT");
        env::remove_var("MAPTY_HOME_LNG");
        env::set_var("MAPTY_STORAGE_KEY", "test_workouts");
        env::set_var("MAPTY_MAP_ZOOM", "not-a-number");

        let config = Config::from_env().expect("Config should load");
        assert_eq!(config.storage_key, "test_workouts");
        assert_eq!(config.map_zoom, DEFAULT_MAP_ZOOM);
        assert!(config.home.is_none());

        env::set_var("MAPTY_HOME_LAT", "51.5");
        env::set_var("MAPTY_HOME_LNG", "-0.1");
        let config = Config::from_env().expect("Config should load");
        assert_eq!(config.home, Some(Coordinates::new(51.5, -0.1)));

        env::set_var("MAPTY_HOME_LNG", "west");
        assert!(matches!(
            Config::from_env(),
            Err(ConfigError::Invalid("MAPTY_HOME_LNG", _))
        ));

        env::remove_var("MAPTY_HOME_LNG");
        assert!(matches!(
            Config::from_env(),
            Err(ConfigError::Missing("MAPTY_HOME_LNG"))
        ));

        env::remove_var("MAPTY_HOME_LAT");
        env::remove_var("MAPTY_STORAGE_KEY");
        env::remove_var("MAPTY_MAP_ZOOM");
    }
}
