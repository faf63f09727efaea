use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::errors::{BookingError, BookingResult};

pub const MINUTES_PER_DAY: u16 = 24 * 60;

/// A wall-clock time of day with minute granularity, stored as minutes since
/// midnight. Formats and parses as zero-padded `"HH:MM"`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct ClockTime(u16);

impl ClockTime {
    pub fn from_minutes(minutes: u16) -> BookingResult<Self> {
        if minutes >= MINUTES_PER_DAY {
            return Err(BookingError::Validation(format!(
                "{minutes} minutes is past the end of the day"
            )));
        }
        Ok(Self(minutes))
    }

    pub fn from_hm(hour: u16, minute: u16) -> BookingResult<Self> {
        if hour >= 24 || minute >= 60 {
            return Err(BookingError::Validation(format!(
                "{hour:02}:{minute:02} is not a valid time of day"
            )));
        }
        Ok(Self(hour * 60 + minute))
    }

    pub fn minutes(self) -> u16 {
        self.0
    }

    /// Minutes from `earlier` to `self`, or `None` if `earlier` is later.
    pub fn minutes_since(self, earlier: ClockTime) -> Option<u16> {
        self.0.checked_sub(earlier.0)
    }
}

impl fmt::Display for ClockTime {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:02}:{:02}", self.0 / 60, self.0 % 60)
    }
}

impl FromStr for ClockTime {
    type Err = BookingError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let invalid = || BookingError::Validation(format!("'{s}' is not an HH:MM time"));

        let (hour, minute) = s.trim().split_once(':').ok_or_else(invalid)?;
        if hour.is_empty() || hour.len() > 2 || minute.len() != 2 {
            return Err(invalid());
        }
        let hour: u16 = hour.parse().map_err(|_| invalid())?;
        let minute: u16 = minute.parse().map_err(|_| invalid())?;

        Self::from_hm(hour, minute)
    }
}

impl TryFrom<String> for ClockTime {
    type Error = BookingError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<ClockTime> for String {
    fn from(value: ClockTime) -> Self {
        value.to_string()
    }
}
