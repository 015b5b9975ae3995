use crate::icon::Icon;
use crate::openweather::WeatherReport;

pub const FALLBACK_LOCATION_MESSAGE: &str = "Using default location (Delhi)";
pub const GEOLOCATION_UNSUPPORTED_MESSAGE: &str = "Geolocation not supported";
pub const FETCH_FAILED_MESSAGE: &str = "Failed to load weather data";

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Coordinates {
    pub lat: f64,
    pub lon: f64,
}

impl Coordinates {
    pub const fn new(lat: f64, lon: f64) -> Self {
        Self { lat, lon }
    }
}

/// Everything the widget knows. Only the widget's own tasks write to it.
#[derive(Debug, Clone, PartialEq)]
pub struct WidgetState {
    pub coordinates: Option<Coordinates>,
    pub error_message: Option<String>,
    pub temperature_c: Option<i32>,
    pub city: Option<String>,
    pub country: Option<String>,
    pub humidity: Option<f64>,
    pub main: Option<String>,
    pub icon: Icon,
    pub is_loading: bool,
    pub has_location_permission: bool,
}

impl Default for WidgetState {
    fn default() -> Self {
        Self {
            coordinates: None,
            error_message: None,
            temperature_c: None,
            city: None,
            country: None,
            humidity: None,
            main: None,
            icon: Icon::default(),
            is_loading: true,
            has_location_permission: false,
        }
    }
}

impl WidgetState {
    pub fn apply_position_granted(&mut self) {
        self.has_location_permission = true;
    }

    pub fn apply_position_denied(&mut self) {
        self.error_message = Some(FALLBACK_LOCATION_MESSAGE.to_string());
        self.has_location_permission = false;
    }

    pub fn apply_geolocation_unsupported(&mut self) {
        self.error_message = Some(GEOLOCATION_UNSUPPORTED_MESSAGE.to_string());
    }

    pub fn apply_report(&mut self, coordinates: Coordinates, report: WeatherReport) {
        self.coordinates = Some(coordinates);
        self.city = Some(report.city);
        self.temperature_c = report.temperature_c;
        self.humidity = report.humidity;
        self.icon = report.icon;
        self.main = Some(report.main);
        self.country = report.country;
        self.is_loading = false;
        self.error_message = None;
    }

    /// Keeps whatever was shown before, only flags the failure.
    pub fn apply_fetch_failure(&mut self) {
        self.is_loading = false;
        self.error_message = Some(FETCH_FAILED_MESSAGE.to_string());
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn pune_rain() -> WeatherReport {
        WeatherReport {
            temperature_c: Some(24),
            humidity: Some(80.0),
            city: "Pune".to_string(),
            country: Some("IN".to_string()),
            main: "Rain".to_string(),
            icon: Icon::Rain,
        }
    }

    #[test]
    fn test_initial_state_is_loading() {
        let state = WidgetState::default();
        assert!(state.is_loading);
        assert!(!state.has_location_permission);
        assert_eq!(state.icon, Icon::ClearDay);
        assert!(state.coordinates.is_none());
        assert!(state.temperature_c.is_none());
    }

    #[test]
    fn test_report_clears_error_and_loading() {
        let mut state = WidgetState::default();
        state.apply_position_denied();
        state.apply_report(Coordinates::new(18.52, 73.85), pune_rain());

        assert!(!state.is_loading);
        assert_eq!(state.error_message, None);
        assert_eq!(state.temperature_c, Some(24));
        assert_eq!(state.city.as_deref(), Some("Pune"));
        assert_eq!(state.country.as_deref(), Some("IN"));
        assert_eq!(state.icon, Icon::Rain);
        assert_eq!(state.coordinates, Some(Coordinates::new(18.52, 73.85)));
    }

    #[test]
    fn test_failure_keeps_previous_readings() {
        let mut state = WidgetState::default();
        state.apply_report(Coordinates::new(18.52, 73.85), pune_rain());
        let before = state.clone();

        state.apply_fetch_failure();

        assert!(!state.is_loading);
        assert_eq!(state.error_message.as_deref(), Some(FETCH_FAILED_MESSAGE));
        assert_eq!(state.temperature_c, before.temperature_c);
        assert_eq!(state.humidity, before.humidity);
        assert_eq!(state.coordinates, before.coordinates);
    }

    #[test]
    fn test_location_outcomes() {
        let mut state = WidgetState::default();
        state.apply_position_granted();
        assert!(state.has_location_permission);
        assert_eq!(state.error_message, None);

        state.apply_position_denied();
        assert!(!state.has_location_permission);
        assert_eq!(state.error_message.as_deref(), Some(FALLBACK_LOCATION_MESSAGE));

        let mut state = WidgetState::default();
        state.apply_geolocation_unsupported();
        assert_eq!(
            state.error_message.as_deref(),
            Some(GEOLOCATION_UNSUPPORTED_MESSAGE)
        );
        assert!(state.is_loading);
    }
}
