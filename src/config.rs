use std::time::Duration;

use crate::state::Coordinates;

pub const DEFAULT_BASE_URL: &str = "https://api.openweathermap.org/data/2.5/";

/// Key baked in at build time from `OPENWEATHER_API_KEY`, empty when unset.
pub const EMBEDDED_API_KEY: &str = match option_env!("OPENWEATHER_API_KEY") {
    Some(key) => key,
    None => "",
};

pub const POLL_INTERVAL: Duration = Duration::from_millis(600_000);
pub const GEOLOCATION_TIMEOUT: Duration = Duration::from_secs(10);

/// Delhi.
pub const FALLBACK_COORDINATES: Coordinates = Coordinates {
    lat: 28.67,
    lon: 77.22,
};

#[derive(Debug, Clone, PartialEq)]
pub struct WidgetConfig {
    pub base_url: String,
    pub api_key: String,
    pub poll_interval: Duration,
    pub geolocation_timeout: Duration,
    pub fallback: Coordinates,
}

impl WidgetConfig {
    /// Base URL with the trailing slash the endpoint path is appended to.
    pub fn normalized_base_url(&self) -> String {
        if self.base_url.ends_with('/') {
            self.base_url.clone()
        } else {
            format!("{}/", self.base_url)
        }
    }
}

impl Default for WidgetConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            api_key: EMBEDDED_API_KEY.to_string(),
            poll_interval: POLL_INTERVAL,
            geolocation_timeout: GEOLOCATION_TIMEOUT,
            fallback: FALLBACK_COORDINATES,
        }
    }
}

#[test]
fn test_defaults() {
    let config = WidgetConfig::default();
    assert_eq!(config.poll_interval, Duration::from_secs(600));
    assert_eq!(config.geolocation_timeout, Duration::from_secs(10));
    assert_eq!(config.fallback, Coordinates::new(28.67, 77.22));
    assert_eq!(config.normalized_base_url(), DEFAULT_BASE_URL);
}

#[test]
fn test_base_url_gets_trailing_slash() {
    let config = WidgetConfig {
        base_url: "http://127.0.0.1:8080".to_string(),
        ..Default::default()
    };
    assert_eq!(config.normalized_base_url(), "http://127.0.0.1:8080/");
}
