//! OpenWeatherMap "current weather" client.

use reqwest::Client;
use serde::Deserialize;
use tracing::{debug, instrument};

use crate::config::WidgetConfig;
use crate::error::FetchError;
use crate::icon::Icon;
use crate::state::Coordinates;

pub const UNKNOWN_LOCATION: &str = "Unknown location";

#[derive(Deserialize, Debug)]
struct CurrentWeather {
    #[serde(default)]
    weather: Vec<Condition>,

    main: Option<Readings>,

    name: Option<String>,

    sys: Option<Sys>,
}

#[derive(Deserialize, Debug)]
struct Condition {
    main: String,
}

#[derive(Deserialize, Debug)]
struct Readings {
    temp: Option<f64>,

    humidity: Option<f64>,
}

#[derive(Deserialize, Debug)]
struct Sys {
    country: Option<String>,
}

/// Provider payload mapped into display-ready fields.
#[derive(Debug, Clone, PartialEq)]
pub struct WeatherReport {
    pub temperature_c: Option<i32>,
    pub humidity: Option<f64>,
    pub city: String,
    pub country: Option<String>,
    pub main: String,
    pub icon: Icon,
}

impl WeatherReport {
    fn from_body(body: CurrentWeather) -> Result<Self, FetchError> {
        let category = body
            .weather
            .into_iter()
            .next()
            .ok_or(FetchError::MissingCategory)?
            .main;

        let (temperature_c, humidity) = match body.main {
            Some(readings) => (readings.temp.map(round_half_up), readings.humidity),
            None => (None, None),
        };

        let city = body
            .name
            .filter(|name| !name.is_empty())
            .unwrap_or_else(|| UNKNOWN_LOCATION.to_string());

        Ok(Self {
            temperature_c,
            humidity,
            city,
            country: body.sys.and_then(|sys| sys.country),
            icon: Icon::from_category(&category),
            main: category,
        })
    }
}

/// Nearest integer, halves toward +∞ (-2.5 → -2, 23.5 → 24).
fn round_half_up(t: f64) -> i32 {
    (t + 0.5).floor() as i32
}

#[derive(Debug, Clone)]
pub struct WeatherClient {
    http: Client,
    base_url: String,
    api_key: String,
}

impl WeatherClient {
    pub fn new(config: &WidgetConfig) -> Result<Self, FetchError> {
        let http = Client::builder()
            .user_agent(concat!("locwx/", env!("CARGO_PKG_VERSION")))
            .build()?;
        Ok(Self {
            http,
            base_url: config.normalized_base_url(),
            api_key: config.api_key.clone(),
        })
    }

    fn endpoint(&self, at: Coordinates) -> String {
        format!(
            "{}weather?lat={}&lon={}&units=metric&APPID={}",
            self.base_url, at.lat, at.lon, self.api_key
        )
    }

    /// Current conditions at `at`. Any non-2xx status is an error.
    #[instrument(skip(self, at), fields(lat = at.lat, lon = at.lon))]
    pub async fn current(&self, at: Coordinates) -> Result<WeatherReport, FetchError> {
        let response = self.http.get(self.endpoint(at)).send().await?;
        let status = response.status();
        if !status.is_success() {
            return Err(FetchError::Status(status));
        }

        let body: CurrentWeather = response.json().await?;
        let report = WeatherReport::from_body(body)?;
        debug!(city = %report.city, category = %report.main, "weather report received");
        Ok(report)
    }
}
