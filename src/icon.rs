use std::fmt;

/// Closed set of weather glyph identifiers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Icon {
    #[default]
    ClearDay,
    ClearNight,
    PartlyCloudyDay,
    PartlyCloudyNight,
    Cloudy,
    Rain,
    Sleet,
    Snow,
    Wind,
    Fog,
}

/// Provider category → icon. Anything not listed falls back to `Icon::default()`.
const CATEGORY_ICONS: &[(&str, Icon)] = &[
    ("Haze", Icon::ClearDay),
    ("Clouds", Icon::Cloudy),
    ("Rain", Icon::Rain),
    ("Snow", Icon::Snow),
    ("Dust", Icon::Wind),
    ("Drizzle", Icon::Sleet),
    ("Fog", Icon::Fog),
    ("Smoke", Icon::Fog),
    ("Tornado", Icon::Wind),
];

impl Icon {
    pub const ALL: [Icon; 10] = [
        Icon::ClearDay,
        Icon::ClearNight,
        Icon::PartlyCloudyDay,
        Icon::PartlyCloudyNight,
        Icon::Cloudy,
        Icon::Rain,
        Icon::Sleet,
        Icon::Snow,
        Icon::Wind,
        Icon::Fog,
    ];

    pub fn from_category(category: &str) -> Self {
        CATEGORY_ICONS
            .iter()
            .find(|(name, _)| *name == category)
            .map_or_else(Icon::default, |&(_, icon)| icon)
    }

    pub const fn as_str(self) -> &'static str {
        match self {
            Icon::ClearDay => "CLEAR_DAY",
            Icon::ClearNight => "CLEAR_NIGHT",
            Icon::PartlyCloudyDay => "PARTLY_CLOUDY_DAY",
            Icon::PartlyCloudyNight => "PARTLY_CLOUDY_NIGHT",
            Icon::Cloudy => "CLOUDY",
            Icon::Rain => "RAIN",
            Icon::Sleet => "SLEET",
            Icon::Snow => "SNOW",
            Icon::Wind => "WIND",
            Icon::Fog => "FOG",
        }
    }

    /// Terminal stand-in for the animated glyph.
    pub const fn glyph(self) -> &'static str {
        match self {
            Icon::ClearDay => "☀",
            Icon::ClearNight => "☾",
            Icon::PartlyCloudyDay => "⛅",
            Icon::PartlyCloudyNight => "☁☾",
            Icon::Cloudy => "☁",
            Icon::Rain => "☂",
            Icon::Sleet => "☂❄",
            Icon::Snow => "❄",
            Icon::Wind => "≋",
            Icon::Fog => "▒",
        }
    }
}

impl fmt::Display for Icon {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
