use serde::{Deserialize, Serialize};

use crate::client::Error;

/// Settings for [`HafasClient`](crate::client::HafasClient).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Config {
    /// Base URL of a transport.rest style HAFAS API.
    #[serde(default = "default_base_url")]
    pub base_url: String,
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
    /// Upper bound on stops and routes per request.
    #[serde(default = "default_max_results")]
    pub max_results: u8,
    /// How long a departure board stays valid before it is fetched again.
    #[serde(default = "default_departure_refresh_secs")]
    pub departure_refresh_secs: u64,
    /// Time window the departure board covers.
    #[serde(default = "default_departure_window_minutes")]
    pub departure_window_minutes: u32,
    /// Search radius for nearby stops.
    #[serde(default = "default_nearby_distance_m")]
    pub nearby_distance_m: u32,
    #[serde(default = "default_user_agent")]
    pub user_agent: String,
}

fn default_base_url() -> String {
    "https://v6.db.transport.rest".to_string()
}

const fn default_timeout_secs() -> u64 {
    10
}

const fn default_max_results() -> u8 {
    10
}

const fn default_departure_refresh_secs() -> u64 {
    60
}

const fn default_departure_window_minutes() -> u32 {
    60
}

const fn default_nearby_distance_m() -> u32 {
    1000
}

fn default_user_agent() -> String {
    concat!("manni/", env!("CARGO_PKG_VERSION")).to_string()
}

impl Default for Config {
    fn default() -> Self {
        Self {
            base_url: default_base_url(),
            timeout_secs: default_timeout_secs(),
            max_results: default_max_results(),
            departure_refresh_secs: default_departure_refresh_secs(),
            departure_window_minutes: default_departure_window_minutes(),
            nearby_distance_m: default_nearby_distance_m(),
            user_agent: default_user_agent(),
        }
    }
}

impl Config {
    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into();
        self
    }

    pub fn validate(&self) -> Result<(), Error> {
        if self.base_url.is_empty() {
            return Err(Error::Config("base_url must not be empty".into()));
        }
        if self.timeout_secs == 0 {
            return Err(Error::Config("timeout_secs must be greater than 0".into()));
        }
        if self.max_results == 0 {
            return Err(Error::Config("max_results must be greater than 0".into()));
        }
        if self.departure_refresh_secs == 0 {
            return Err(Error::Config(
                "departure_refresh_secs must be greater than 0".into(),
            ));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_are_valid() {
        let config = Config::default();
        assert!(config.validate().is_ok());
        assert_eq!(config.base_url, "https://v6.db.transport.rest");
        assert!(config.user_agent.starts_with("manni/"));
    }

    #[test]
    fn missing_fields_use_defaults() {
        let config: Config =
            serde_json::from_str(r#"{ "base_url": "http://localhost:3000" }"#).unwrap();
        assert_eq!(config.base_url, "http://localhost:3000");
        assert_eq!(config.timeout_secs, 10);
        assert_eq!(config.departure_refresh_secs, 60);
    }

    #[test]
    fn rejects_zero_values() {
        let config = Config {
            timeout_secs: 0,
            ..Default::default()
        };
        assert!(matches!(config.validate(), Err(Error::Config(_))));

        let config = Config {
            max_results: 0,
            ..Default::default()
        };
        assert!(config.validate().is_err());

        let config = Config::default().with_base_url("");
        assert!(config.validate().is_err());
    }
}
