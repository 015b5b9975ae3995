use thiserror::Error;

/// Why the geolocation capability could not produce a position.
#[derive(Error, Debug)]
pub enum GeolocationError {
    #[error("geolocation permission denied")]
    Denied,

    #[error("position unavailable: {0}")]
    Unavailable(String),

    #[error("geolocation request timed out")]
    Timeout,
}

impl From<reqwest::Error> for GeolocationError {
    fn from(err: reqwest::Error) -> Self {
        Self::Unavailable(err.to_string())
    }
}

#[derive(Error, Debug)]
pub enum FetchError {
    #[error("weather request failed: {0}")]
    Request(#[from] reqwest::Error),

    #[error("weather API returned status {0}")]
    Status(reqwest::StatusCode),

    #[error("weather response has no weather[0] entry")]
    MissingCategory,
}
