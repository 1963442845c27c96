// Pure display formatting: uptime, coordinates and time labels
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Locale {
    #[default]
    En,
    Id,
}

struct UptimeParts {
    days: u64,
    hours: u64,
    minutes: u64,
}

impl UptimeParts {
    fn split(seconds: u64) -> Self {
        Self {
            days: seconds / 86_400,
            hours: (seconds % 86_400) / 3_600,
            minutes: (seconds % 3_600) / 60,
        }
    }
}

fn unit(count: u64, locale: Locale, en: &str, id: &str) -> String {
    match locale {
        Locale::En if count == 1 => format!("1 {}", en),
        Locale::En => format!("{} {}s", count, en),
        Locale::Id => format!("{} {}", count, id),
    }
}

fn join(parts: &[String], locale: Locale) -> String {
    match locale {
        Locale::En => parts.join(", "),
        Locale::Id => parts.join(" "),
    }
}

/// Human uptime showing the two largest units: "days, hours", "hours, minutes" or "minutes".
pub fn format_uptime(seconds: u64, locale: Locale) -> String {
    let parts = UptimeParts::split(seconds);
    let days = unit(parts.days, locale, "day", "hari");
    let hours = unit(parts.hours, locale, "hour", "jam");
    let minutes = unit(parts.minutes, locale, "minute", "menit");

    if parts.days > 0 {
        join(&[days, hours], locale)
    } else if parts.hours > 0 {
        join(&[hours, minutes], locale)
    } else {
        minutes
    }
}

/// Like [`format_uptime`] but keeps minutes when days are shown.
pub fn format_uptime_full(seconds: u64, locale: Locale) -> String {
    let parts = UptimeParts::split(seconds);
    if parts.days == 0 {
        return format_uptime(seconds, locale);
    }
    join(
        &[
            unit(parts.days, locale, "day", "hari"),
            unit(parts.hours, locale, "hour", "jam"),
            unit(parts.minutes, locale, "minute", "menit"),
        ],
        locale,
    )
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum Hemisphere {
    N,
    S,
    E,
    W,
}

impl Hemisphere {
    pub fn letter(&self) -> char {
        match self {
            Self::N => 'N',
            Self::S => 'S',
            Self::E => 'E',
            Self::W => 'W',
        }
    }
}

/// Degrees/minutes/seconds rendering of a decimal coordinate
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Dms {
    pub degrees: u32,
    pub minutes: u32,
    pub seconds: f64,
    pub hemisphere: Hemisphere,
}

impl fmt::Display for Dms {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}°{}'{:.1}\"{}",
            self.degrees,
            self.minutes,
            self.seconds,
            self.hemisphere.letter()
        )
    }
}

pub fn to_dms(decimal_degrees: f64, is_latitude: bool) -> Dms {
    let hemisphere = match (is_latitude, decimal_degrees >= 0.0) {
        (true, true) => Hemisphere::N,
        (true, false) => Hemisphere::S,
        (false, true) => Hemisphere::E,
        (false, false) => Hemisphere::W,
    };

    let abs = decimal_degrees.abs();
    let whole_degrees = abs.floor();
    let whole_minutes = ((abs - whole_degrees) * 60.0).floor();
    let raw_seconds = (abs - whole_degrees - whole_minutes / 60.0) * 3_600.0;

    // Seconds are kept to a tenth; a value that rounds up to 60 carries into the minutes.
    let mut degrees = whole_degrees as u32;
    let mut minutes = whole_minutes as u32;
    let mut seconds = (raw_seconds * 10.0).round() / 10.0;
    if seconds <= 0.0 {
        seconds = 0.0;
    }
    if seconds >= 60.0 {
        seconds = 0.0;
        minutes += 1;
    }
    if minutes >= 60 {
        minutes -= 60;
        degrees += 1;
    }

    Dms {
        degrees,
        minutes,
        seconds,
        hemisphere,
    }
}

/// Clock label used on chart axes and notices
pub fn format_time_label(timestamp: DateTime<Utc>, locale: Locale) -> String {
    match locale {
        Locale::En => timestamp.format("%H:%M:%S").to_string(),
        Locale::Id => timestamp.format("%H.%M.%S").to_string(),
    }
}

/// Attach a unit suffix; percent signs sit flush against the value.
pub fn with_unit(value: &str, unit: &str) -> String {
    match unit {
        "" | "%" => format!("{}{}", value, unit),
        _ => format!("{} {}", value, unit),
    }
}
