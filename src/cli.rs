use std::path::PathBuf;
use std::time::Duration;

use clap::builder::{styling::AnsiColor, Styles};
use clap::Parser;
use locwx::config::{WidgetConfig, DEFAULT_BASE_URL, EMBEDDED_API_KEY};
use locwx::geolocation::{FixedPosition, IpGeolocation, Locator};
use locwx::Coordinates;

const ABOUT: &str = "Current weather for where you are";

const LONG_ABOUT: &str = "
TUI showing current conditions from OpenWeatherMap for your location.

The location is looked up from your public IP address unless --lat/--lon are given. When the
lookup fails, or --no-geolocation is set, weather for Delhi is shown instead. Conditions refresh
every ten minutes by default; press `r` to refresh now and `q` to quit.
";

const STYLES: Styles = Styles::styled()
    .header(AnsiColor::Yellow.on_default())
    .usage(AnsiColor::Green.on_default())
    .literal(AnsiColor::Green.on_default())
    .placeholder(AnsiColor::Green.on_default());

#[derive(Parser, Debug)]
#[command(version, styles=STYLES, about=ABOUT, long_about = LONG_ABOUT)]
pub struct Args {
    #[arg(long, help = "OpenWeatherMap API key (defaults to the key embedded at build time)")]
    pub api_key: Option<String>,

    #[arg(long, default_value = DEFAULT_BASE_URL, help = "Weather API base URL")]
    pub base_url: String,

    #[arg(long, requires = "lon", allow_hyphen_values = true, help = "Latitude to use instead of IP lookup")]
    pub lat: Option<f64>,

    #[arg(long, requires = "lat", allow_hyphen_values = true, help = "Longitude to use instead of IP lookup")]
    pub lon: Option<f64>,

    #[arg(long, conflicts_with_all = ["lat", "lon"], help = "Skip location lookup and use the default city")]
    pub no_geolocation: bool,

    #[arg(
        long,
        default_value_t = 600,
        value_parser = clap::value_parser!(u64).range(1..),
        help = "Refresh interval in seconds"
    )]
    pub interval: u64,

    #[arg(long, help = "Write logs to this file")]
    pub log_file: Option<PathBuf>,
}

impl Args {
    pub fn widget_config(&self) -> WidgetConfig {
        WidgetConfig {
            base_url: self.base_url.clone(),
            api_key: self
                .api_key
                .clone()
                .unwrap_or_else(|| EMBEDDED_API_KEY.to_string()),
            poll_interval: Duration::from_secs(self.interval),
            ..Default::default()
        }
    }

    pub fn locator(&self) -> reqwest::Result<Option<Locator>> {
        if self.no_geolocation {
            return Ok(None);
        }
        match (self.lat, self.lon) {
            (Some(lat), Some(lon)) => Ok(Some(Locator::Fixed(FixedPosition(Coordinates::new(
                lat, lon,
            ))))),
            _ => Ok(Some(Locator::Ip(IpGeolocation::new()?))),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let args = Args::try_parse_from(["locwx"]).unwrap();
        let config = args.widget_config();
        assert_eq!(config.base_url, DEFAULT_BASE_URL);
        assert_eq!(config.poll_interval, Duration::from_secs(600));
        assert!(matches!(args.locator().unwrap(), Some(Locator::Ip(_))));
    }

    #[test]
    fn test_fixed_position() {
        let args =
            Args::try_parse_from(["locwx", "--lat", "-33.87", "--lon", "151.21"]).unwrap();
        let Some(Locator::Fixed(FixedPosition(at))) = args.locator().unwrap() else {
            panic!("expected fixed position");
        };
        assert_eq!(at, Coordinates::new(-33.87, 151.21));
    }

    #[test]
    fn test_no_geolocation() {
        let args = Args::try_parse_from(["locwx", "--no-geolocation", "--api-key", "k"]).unwrap();
        assert!(args.locator().unwrap().is_none());
        assert_eq!(args.widget_config().api_key, "k");
    }

    #[test]
    fn test_rejected_arguments() {
        assert!(Args::try_parse_from(["locwx", "--lat", "12.9"]).is_err());
        assert!(Args::try_parse_from(["locwx", "--interval", "0"]).is_err());
        assert!(
            Args::try_parse_from(["locwx", "--no-geolocation", "--lat", "1", "--lon", "2"])
                .is_err()
        );
    }
}
