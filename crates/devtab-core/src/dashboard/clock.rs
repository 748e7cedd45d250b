//! Clock widget text.

use chrono::{DateTime, Datelike, TimeZone, Timelike};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum ClockFormat {
    #[serde(rename = "12")]
    Hour12,
    #[default]
    #[serde(rename = "24")]
    Hour24,
}

impl std::str::FromStr for ClockFormat {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim() {
            "12" => Ok(ClockFormat::Hour12),
            "24" => Ok(ClockFormat::Hour24),
            other => Err(format!("clock format must be 12 or 24, got '{other}'")),
        }
    }
}

/// Pre-formatted clock parts.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ClockFace {
    pub hours: String,
    pub minutes: String,
    /// Present only when seconds are shown.
    pub seconds: Option<String>,
    /// "AM"/"PM" in 12-hour mode.
    pub meridiem: Option<&'static str>,
    /// e.g. "Thursday, October 15, 2026"
    pub date: String,
}

impl ClockFace {
    pub fn at<Tz: TimeZone>(now: &DateTime<Tz>, format: ClockFormat, show_seconds: bool) -> Self {
        let (hour, meridiem) = match format {
            ClockFormat::Hour24 => (now.hour(), None),
            ClockFormat::Hour12 => {
                let (pm, h12) = now.hour12();
                (h12, Some(if pm { "PM" } else { "AM" }))
            }
        };
        Self {
            hours: format!("{hour:02}"),
            minutes: format!("{:02}", now.minute()),
            seconds: show_seconds.then(|| format!("{:02}", now.second())),
            meridiem,
            date: format!(
                "{}, {} {}, {}",
                weekday_name(now.weekday()),
                month_name(now.month()),
                now.day(),
                now.year()
            ),
        }
    }

    /// `HH:MM[:SS][ AM]`
    pub fn time(&self) -> String {
        let mut out = format!("{}:{}", self.hours, self.minutes);
        if let Some(s) = &self.seconds {
            out.push(':');
            out.push_str(s);
        }
        if let Some(m) = self.meridiem {
            out.push(' ');
            out.push_str(m);
        }
        out
    }
}

fn weekday_name(day: chrono::Weekday) -> &'static str {
    use chrono::Weekday::*;
    match day {
        Mon => "Monday",
        Tue => "Tuesday",
        Wed => "Wednesday",
        Thu => "Thursday",
        Fri => "Friday",
        Sat => "Saturday",
        Sun => "Sunday",
    }
}

fn month_name(month: u32) -> &'static str {
    const MONTHS: [&str; 12] = [
        "January",
        "February",
        "March",
        "April",
        "May",
        "June",
        "July",
        "August",
        "September",
        "October",
        "November",
        "December",
    ];
    MONTHS[(month.clamp(1, 12) - 1) as usize]
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;

    fn at(h: u32, m: u32, s: u32) -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2026, 10, 15, h, m, s).unwrap()
    }

    #[test]
    fn twenty_four_hour_with_seconds() {
        let face = ClockFace::at(&at(7, 5, 9), ClockFormat::Hour24, true);
        assert_eq!(face.time(), "07:05:09");
        assert_eq!(face.meridiem, None);
        assert_eq!(face.date, "Thursday, October 15, 2026");
    }

    #[test]
    fn twelve_hour_maps_midnight_and_afternoon() {
        let midnight = ClockFace::at(&at(0, 30, 0), ClockFormat::Hour12, false);
        assert_eq!(midnight.time(), "12:30 AM");
        let afternoon = ClockFace::at(&at(13, 0, 0), ClockFormat::Hour12, false);
        assert_eq!(afternoon.time(), "01:00 PM");
        assert_eq!(afternoon.seconds, None);
    }

    #[test]
    fn clock_format_parses() {
        assert_eq!("12".parse::<ClockFormat>().unwrap(), ClockFormat::Hour12);
        assert!("13".parse::<ClockFormat>().is_err());
    }
}
