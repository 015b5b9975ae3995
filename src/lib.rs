//! Current weather for wherever the terminal happens to be.
//!
//! The [`widget::LocationWeatherWidget`] resolves a position, polls the
//! OpenWeatherMap "current weather" endpoint and publishes a [`state::WidgetState`]
//! that [`ui::draw`] turns into one of four views.

pub mod config;
pub mod date;
pub mod error;
pub mod geolocation;
pub mod icon;
pub mod openweather;
pub mod state;
pub mod ui;
pub mod view;
pub mod widget;

pub use config::WidgetConfig;
pub use state::{Coordinates, WidgetState};
pub use widget::LocationWeatherWidget;
