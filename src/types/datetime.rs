// SPDX-License-Identifier: MPL-2.0
// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Device clock values.
//!
//! The `Agent.Time` field carries the device's local clock as ISO 8601,
//! normally with the configured UTC offset (`"2021-03-17T10:34:52+01:00"`).
//! Older firmware omits the offset.

use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, FixedOffset, NaiveDateTime};
use serde::{Deserialize, Deserializer, Serialize, Serializer, de};

/// Error returned when a device time string cannot be parsed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DateTimeParseError {
    input: String,
}

impl DateTimeParseError {
    fn new(input: &str) -> Self {
        Self {
            input: input.to_string(),
        }
    }

    /// Returns the input string that failed to parse.
    #[must_use]
    pub fn input(&self) -> &str {
        &self.input
    }
}

impl fmt::Display for DateTimeParseError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "failed to parse device time: '{}' (expected ISO 8601)",
            self.input
        )
    }
}

impl std::error::Error for DateTimeParseError {}

/// Current time as reported by the device.
///
/// # Examples
///
/// ```
/// use netio_lib::types::DeviceTime;
///
/// let time: DeviceTime = "2021-03-17T10:34:52+01:00".parse().unwrap();
/// assert_eq!(time.naive().format("%H:%M").to_string(), "10:34");
/// assert!(time.to_datetime().is_some());
///
/// let local: DeviceTime = "2021-03-17T10:34:52".parse().unwrap();
/// assert!(local.timezone_offset().is_none());
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DeviceTime {
    naive: NaiveDateTime,
    offset_secs: Option<i32>,
}

impl DeviceTime {
    fn parse_with_offset(s: &str) -> Option<Self> {
        let datetime = DateTime::parse_from_rfc3339(s).ok()?;
        Some(Self {
            naive: datetime.naive_local(),
            offset_secs: Some(datetime.offset().local_minus_utc()),
        })
    }

    fn parse_naive(s: &str) -> Option<Self> {
        ["%Y-%m-%dT%H:%M:%S", "%Y-%m-%dT%H:%M:%S%.f", "%Y-%m-%d %H:%M:%S"]
            .iter()
            .find_map(|fmt| NaiveDateTime::parse_from_str(s, fmt).ok())
            .map(|naive| Self {
                naive,
                offset_secs: None,
            })
    }

    /// Returns the device's local wall-clock time.
    #[must_use]
    pub const fn naive(&self) -> NaiveDateTime {
        self.naive
    }

    /// Returns the UTC offset the device reported, if any.
    #[must_use]
    pub fn timezone_offset(&self) -> Option<FixedOffset> {
        self.offset_secs.and_then(FixedOffset::east_opt)
    }

    /// Returns the offset-aware time when the offset is known.
    #[must_use]
    pub fn to_datetime(&self) -> Option<DateTime<FixedOffset>> {
        self.timezone_offset()
            .and_then(|tz| self.naive.and_local_timezone(tz).single())
    }
}

impl FromStr for DeviceTime {
    type Err = DateTimeParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        Self::parse_with_offset(s)
            .or_else(|| Self::parse_naive(s))
            .ok_or_else(|| DateTimeParseError::new(s))
    }
}

impl fmt::Display for DeviceTime {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.to_datetime() {
            Some(datetime) => write!(f, "{}", datetime.to_rfc3339()),
            None => write!(f, "{}", self.naive.format("%Y-%m-%dT%H:%M:%S")),
        }
    }
}

impl From<NaiveDateTime> for DeviceTime {
    fn from(naive: NaiveDateTime) -> Self {
        Self {
            naive,
            offset_secs: None,
        }
    }
}

impl Serialize for DeviceTime {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

impl<'de> Deserialize<'de> for DeviceTime {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let raw = String::deserialize(deserializer)?;
        raw.parse().map_err(de::Error::custom)
    }
}

#[cfg(test)]
mod tests {
    use chrono::{Datelike, Timelike};

    use super::*;

    #[test]
    fn parses_offset_time() {
        let time: DeviceTime = "2021-03-17T10:34:52+01:00".parse().unwrap();
        assert_eq!(time.naive().year(), 2021);
        assert_eq!(time.naive().hour(), 10);
        assert_eq!(time.timezone_offset().unwrap().local_minus_utc(), 3600);
    }

    #[test]
    fn parses_utc_suffix() {
        let time: DeviceTime = "2021-03-17T09:34:52Z".parse().unwrap();
        assert_eq!(time.timezone_offset().unwrap().local_minus_utc(), 0);
    }

    #[test]
    fn parses_naive_time() {
        let time: DeviceTime = "2021-03-17T10:34:52".parse().unwrap();
        assert!(time.timezone_offset().is_none());
        assert!(time.to_datetime().is_none());
        assert_eq!(time.to_string(), "2021-03-17T10:34:52");
    }

    #[test]
    fn rejects_garbage() {
        let err = "yesterday".parse::<DeviceTime>().unwrap_err();
        assert_eq!(err.input(), "yesterday");
    }

    #[test]
    fn display_keeps_offset() {
        let time: DeviceTime = "2021-03-17T10:34:52+01:00".parse().unwrap();
        assert_eq!(time.to_string(), "2021-03-17T10:34:52+01:00");
    }
}
