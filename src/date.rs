use std::time::Duration;

use chrono::{DateTime, Local, NaiveDate};

/// `"<Weekday>, <Day> <Month> <Year>"`, e.g. `"Monday, 5 June 2023"`.
pub fn format_date(date: NaiveDate) -> String {
    date.format("%A, %-d %B %Y").to_string()
}

/// Live clock shown next to the date.
#[derive(Debug, Clone, Copy)]
pub struct Clock {
    pub format: &'static str,
    pub interval: Duration,
}

pub const CLOCK: Clock = Clock {
    format: "%H:%M:%S",
    interval: Duration::from_secs(1),
};

impl Clock {
    pub fn display(&self, now: DateTime<Local>) -> String {
        now.format(self.format).to_string()
    }
}
