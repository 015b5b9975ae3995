//! Position sources and the one-shot resolver that falls back to a fixed city.

use std::future::Future;
use std::time::Duration;

use reqwest::Client;
use serde::Deserialize;
use tracing::{info, warn};

use crate::error::GeolocationError;
use crate::state::Coordinates;

const IP_API_URL: &str = "http://ip-api.com/json/?fields=status,message,lat,lon";

/// Host capability that can report where the device is.
pub trait Geolocation {
    fn current_position(
        &self,
    ) -> impl Future<Output = Result<Coordinates, GeolocationError>> + Send;
}

/// Position taken from the command line.
#[derive(Debug, Clone, Copy)]
pub struct FixedPosition(pub Coordinates);

impl Geolocation for FixedPosition {
    async fn current_position(&self) -> Result<Coordinates, GeolocationError> {
        Ok(self.0)
    }
}

#[derive(Deserialize, Debug)]
struct IpApiResponse {
    status: String,
    message: Option<String>,
    lat: Option<f64>,
    lon: Option<f64>,
}

/// Approximate position from the public IP address.
#[derive(Debug, Clone)]
pub struct IpGeolocation {
    http: Client,
    url: String,
}

impl IpGeolocation {
    pub fn new() -> reqwest::Result<Self> {
        Self::with_url(IP_API_URL)
    }

    pub fn with_url(url: impl Into<String>) -> reqwest::Result<Self> {
        let http = Client::builder()
            .user_agent(concat!("locwx/", env!("CARGO_PKG_VERSION")))
            .build()?;
        Ok(Self {
            http,
            url: url.into(),
        })
    }
}

impl Geolocation for IpGeolocation {
    async fn current_position(&self) -> Result<Coordinates, GeolocationError> {
        let body: IpApiResponse = self
            .http
            .get(&self.url)
            .send()
            .await?
            .error_for_status()?
            .json()
            .await?;

        match (body.status.as_str(), body.lat, body.lon) {
            ("success", Some(lat), Some(lon)) => Ok(Coordinates::new(lat, lon)),
            _ => Err(GeolocationError::Unavailable(
                body.message.unwrap_or(body.status),
            )),
        }
    }
}

/// The capability the binary wires in.
#[derive(Debug, Clone)]
pub enum Locator {
    Ip(IpGeolocation),
    Fixed(FixedPosition),
}

impl Geolocation for Locator {
    async fn current_position(&self) -> Result<Coordinates, GeolocationError> {
        match self {
            Locator::Ip(ip) => ip.current_position().await,
            Locator::Fixed(fixed) => fixed.current_position().await,
        }
    }
}

#[derive(Debug)]
pub enum Resolution {
    Located(Coordinates),
    Failed(GeolocationError),
    Unsupported,
}

/// Asks `capability` once, giving up after `timeout`.
pub async fn resolve<G: Geolocation>(capability: Option<&G>, timeout: Duration) -> Resolution {
    let Some(capability) = capability else {
        warn!("no geolocation capability available");
        return Resolution::Unsupported;
    };

    let outcome = match tokio::time::timeout(timeout, capability.current_position()).await {
        Ok(outcome) => outcome,
        Err(_) => Err(GeolocationError::Timeout),
    };

    match outcome {
        Ok(at) => {
            info!(lat = at.lat, lon = at.lon, "position resolved");
            Resolution::Located(at)
        }
        Err(err) => {
            warn!(error = %err, "position lookup failed; using fallback location");
            Resolution::Failed(err)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use wiremock::matchers::method;
    use wiremock::{Mock, MockServer, ResponseTemplate};

    struct Stalled;

    impl Geolocation for Stalled {
        async fn current_position(&self) -> Result<Coordinates, GeolocationError> {
            tokio::time::sleep(Duration::from_secs(60)).await;
            Ok(Coordinates::new(0.0, 0.0))
        }
    }

    struct Refusing;

    impl Geolocation for Refusing {
        async fn current_position(&self) -> Result<Coordinates, GeolocationError> {
            Err(GeolocationError::Denied)
        }
    }

    #[tokio::test]
    async fn test_fixed_position_resolves() {
        let fixed = FixedPosition(Coordinates::new(12.9, 77.6));
        let resolution = resolve(Some(&fixed), Duration::from_secs(1)).await;
        assert!(matches!(resolution, Resolution::Located(at) if at == Coordinates::new(12.9, 77.6)));
    }

    #[tokio::test]
    async fn test_missing_capability_is_unsupported() {
        let resolution = resolve::<FixedPosition>(None, Duration::from_secs(1)).await;
        assert!(matches!(resolution, Resolution::Unsupported));
    }

    #[tokio::test]
    async fn test_denied_is_a_failure() {
        let resolution = resolve(Some(&Refusing), Duration::from_secs(1)).await;
        assert!(matches!(resolution, Resolution::Failed(GeolocationError::Denied)));
    }

    #[tokio::test]
    async fn test_slow_capability_times_out() {
        let resolution = resolve(Some(&Stalled), Duration::from_millis(20)).await;
        assert!(matches!(resolution, Resolution::Failed(GeolocationError::Timeout)));
    }

    #[tokio::test]
    async fn test_ip_lookup() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "status": "success",
                "lat": 18.52,
                "lon": 73.85
            })))
            .mount(&server)
            .await;

        let ip = IpGeolocation::with_url(server.uri()).unwrap();
        let at = ip.current_position().await.unwrap();
        assert_eq!(at, Coordinates::new(18.52, 73.85));
    }

    #[tokio::test]
    async fn test_ip_lookup_failure_status() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "status": "fail",
                "message": "private range"
            })))
            .mount(&server)
            .await;

        let ip = IpGeolocation::with_url(server.uri()).unwrap();
        let err = ip.current_position().await.unwrap_err();
        assert!(matches!(err, GeolocationError::Unavailable(msg) if msg == "private range"));
    }
}
