use crate::icon::Icon;
use crate::openweather::UNKNOWN_LOCATION;
use crate::state::WidgetState;

pub const LOADING_TEXT: &str = "Detecting your location...";
pub const NO_DATA_TEXT: &str = "Weather data not available";

#[derive(Debug, Clone, PartialEq)]
pub enum View<'a> {
    Loading,
    Error(&'a str),
    NoData,
    Data(DataView<'a>),
}

#[derive(Debug, Clone, PartialEq)]
pub struct DataView<'a> {
    pub city: &'a str,
    pub country: Option<&'a str>,
    pub icon: Icon,
    pub category: Option<&'a str>,
    pub temperature_c: i32,
    pub humidity: Option<f64>,
}

/// Loading wins over error, error over missing data.
pub fn select_view(state: &WidgetState) -> View<'_> {
    if state.is_loading {
        return View::Loading;
    }
    if let Some(message) = state.error_message.as_deref() {
        return View::Error(message);
    }
    let Some(temperature_c) = state.temperature_c else {
        return View::NoData;
    };
    View::Data(DataView {
        city: state.city.as_deref().unwrap_or(UNKNOWN_LOCATION),
        country: state.country.as_deref(),
        icon: state.icon,
        category: state.main.as_deref(),
        temperature_c,
        humidity: state.humidity,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn loaded() -> WidgetState {
        WidgetState {
            is_loading: false,
            temperature_c: Some(24),
            city: Some("Pune".into()),
            country: Some("IN".into()),
            main: Some("Rain".into()),
            icon: Icon::Rain,
            humidity: Some(80.0),
            ..Default::default()
        }
    }

    #[test]
    fn test_loading_first() {
        let state = WidgetState {
            error_message: Some("boom".into()),
            temperature_c: Some(3),
            ..Default::default()
        };
        assert_eq!(select_view(&state), View::Loading);
    }

    #[test]
    fn test_error_before_data() {
        let state = WidgetState {
            error_message: Some("Failed to load weather data".into()),
            ..loaded()
        };
        assert_eq!(select_view(&state), View::Error("Failed to load weather data"));
    }

    #[test]
    fn test_no_temperature() {
        let state = WidgetState {
            temperature_c: None,
            ..loaded()
        };
        assert_eq!(select_view(&state), View::NoData);
    }

    #[test]
    fn test_zero_degrees_is_data() {
        let state = WidgetState {
            temperature_c: Some(0),
            ..loaded()
        };
        assert!(matches!(select_view(&state), View::Data(data) if data.temperature_c == 0));
    }

    #[test]
    fn test_data_view() {
        let state = loaded();
        let View::Data(data) = select_view(&state) else {
            panic!("expected data view");
        };
        assert_eq!(data.city, "Pune");
        assert_eq!(data.country, Some("IN"));
        assert_eq!(data.icon, Icon::Rain);
        assert_eq!(data.category, Some("Rain"));
        assert_eq!(data.temperature_c, 24);
    }
}
