// Copyright (c) 2025 Felix Kahle.
//
// Permission is hereby granted, free of charge, to any person obtaining
// a copy of this software and associated documentation files (the
// "Software"), to deal in the Software without restriction, including
// without limitation the rights to use, copy, modify, merge, publish,
// distribute, sublicense, and/or sell copies of the Software, and to
// permit persons to whom the Software is furnished to do so, subject to
// the following conditions:
//
// The above copyright notice and this permission notice shall be
// included in all copies or substantial portions of the Software.
//
// THE SOFTWARE IS PROVIDED "AS IS", WITHOUT WARRANTY OF ANY KIND,
// EXPRESS OR IMPLIED, INCLUDING BUT NOT LIMITED TO THE WARRANTIES OF
// MERCHANTABILITY, FITNESS FOR A PARTICULAR PURPOSE AND
// NONINFRINGEMENT. IN NO EVENT SHALL THE AUTHORS OR COPYRIGHT HOLDERS BE
// LIABLE FOR ANY CLAIM, DAMAGES OR OTHER LIABILITY, WHETHER IN AN ACTION
// OF CONTRACT, TORT OR OTHERWISE, ARISING FROM, OUT OF OR IN CONNECTION
// WITH THE SOFTWARE OR THE USE OR OTHER DEALINGS IN THE SOFTWARE.

//! # Wall-Clock Time
//!
//! `Time` is a time of day with minute resolution, stored as minutes since
//! midnight so that ordering and equality are plain integer comparisons.
//! It is built from a 12-hour clock reading, a 24-hour reading, or a raw
//! minute count, and renders back in the `9:05AM` style used by course
//! listings.
//!
//! `TimeInterval` is a half-open `[start, end)` span within one day. It
//! cannot cross midnight because `Time` never exceeds `11:59PM`.

use crate::error::{ModelError, Result};
use regex::Regex;
use roster_core::math::interval::ClosedOpenInterval;
use std::{str::FromStr, sync::LazyLock};

/// Number of minutes in a day.
pub const MINUTES_PER_DAY: u16 = 24 * 60;

/// Ante or post meridiem.
#[derive(Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Debug)]
pub enum Meridiem {
    Am,
    Pm,
}

impl std::fmt::Display for Meridiem {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Meridiem::Am => write!(f, "AM"),
            Meridiem::Pm => write!(f, "PM"),
        }
    }
}

/// A time of day with minute resolution.
#[derive(Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Time {
    minutes: u16,
}

impl Time {
    /// Midnight, `12:00AM`.
    pub const MIDNIGHT: Time = Time { minutes: 0 };

    /// Creates a time from a 12-hour clock reading.
    ///
    /// `12:xxAM` is just after midnight and `12:xxPM` is just after noon.
    ///
    /// # Errors
    ///
    /// `OutOfRange` if `hour` is not in `1..=12` or `minute` is not in `0..=59`.
    ///
    /// # Examples
    ///
    /// ```rust
    /// # use roster_model::time::{Meridiem, Time};
    /// let t = Time::new(1, 30, Meridiem::Pm).unwrap();
    /// assert_eq!(t.minutes(), 13 * 60 + 30);
    /// assert_eq!(t.to_string(), "1:30PM");
    /// ```
    pub fn new(hour: u8, minute: u8, meridiem: Meridiem) -> Result<Self> {
        if !(1..=12).contains(&hour) {
            return Err(ModelError::out_of_range("hour", hour as usize, 1, 12));
        }
        if minute > 59 {
            return Err(ModelError::out_of_range("minute", minute as usize, 0, 59));
        }
        let hour24 = match (hour, meridiem) {
            (12, Meridiem::Am) => 0,
            (12, Meridiem::Pm) => 12,
            (h, Meridiem::Am) => h,
            (h, Meridiem::Pm) => h + 12,
        };
        Ok(Self {
            minutes: hour24 as u16 * 60 + minute as u16,
        })
    }

    /// Creates a time from a 24-hour clock reading.
    ///
    /// # Errors
    ///
    /// `OutOfRange` if `hour` is not in `0..=23` or `minute` is not in `0..=59`.
    pub fn from_hm(hour: u8, minute: u8) -> Result<Self> {
        if hour > 23 {
            return Err(ModelError::out_of_range("hour", hour as usize, 0, 23));
        }
        if minute > 59 {
            return Err(ModelError::out_of_range("minute", minute as usize, 0, 59));
        }
        Ok(Self {
            minutes: hour as u16 * 60 + minute as u16,
        })
    }

    /// Creates a time from minutes since midnight.
    ///
    /// # Errors
    ///
    /// `OutOfRange` if `minutes >= 1440`.
    pub fn from_minutes(minutes: u16) -> Result<Self> {
        if minutes >= MINUTES_PER_DAY {
            return Err(ModelError::out_of_range(
                "minute of day",
                minutes as usize,
                0,
                MINUTES_PER_DAY as usize - 1,
            ));
        }
        Ok(Self { minutes })
    }

    /// Minutes since midnight.
    #[inline]
    pub const fn minutes(&self) -> u16 {
        self.minutes
    }

    /// Hour on a 24-hour clock.
    #[inline]
    pub const fn hour24(&self) -> u8 {
        (self.minutes / 60) as u8
    }

    /// Hour on a 12-hour clock, `1..=12`.
    #[inline]
    pub const fn hour(&self) -> u8 {
        match self.hour24() % 12 {
            0 => 12,
            h => h,
        }
    }

    #[inline]
    pub const fn minute(&self) -> u8 {
        (self.minutes % 60) as u8
    }

    #[inline]
    pub const fn meridiem(&self) -> Meridiem {
        if self.hour24() < 12 {
            Meridiem::Am
        } else {
            Meridiem::Pm
        }
    }
}

impl std::fmt::Display for Time {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}:{:02}{}", self.hour(), self.minute(), self.meridiem())
    }
}

impl std::fmt::Debug for Time {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "Time({})", self)
    }
}

static TIME_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)^(\d{1,2}):(\d{2})\s?(AM|PM)$").expect("time pattern is a valid regex")
});

impl FromStr for Time {
    type Err = ModelError;

    /// Parses `h:mmAM` / `h:mm PM`, ignoring case and surrounding whitespace.
    fn from_str(s: &str) -> Result<Self> {
        let trimmed = s.trim();
        let caps = TIME_RE
            .captures(trimmed)
            .ok_or_else(|| ModelError::InvalidTime(trimmed.to_string()))?;
        let hour: u8 = caps[1]
            .parse()
            .map_err(|_| ModelError::InvalidTime(trimmed.to_string()))?;
        let minute: u8 = caps[2]
            .parse()
            .map_err(|_| ModelError::InvalidTime(trimmed.to_string()))?;
        let meridiem = if caps[3].eq_ignore_ascii_case("pm") {
            Meridiem::Pm
        } else {
            Meridiem::Am
        };
        Time::new(hour, minute, meridiem)
    }
}

/// A half-open span `[start, end)` within a single day.
#[derive(Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct TimeInterval {
    start: Time,
    end: Time,
}

impl TimeInterval {
    /// Creates an interval.
    ///
    /// # Errors
    ///
    /// `InvalidInterval` if `start > end`.
    ///
    /// # Examples
    ///
    /// ```rust
    /// # use roster_model::time::{Time, TimeInterval};
    /// let start: Time = "9:00AM".parse().unwrap();
    /// let end: Time = "10:20AM".parse().unwrap();
    /// assert_eq!(TimeInterval::new(start, end).unwrap().duration(), 80);
    /// assert!(TimeInterval::new(end, start).is_err());
    /// ```
    #[inline]
    pub fn new(start: Time, end: Time) -> Result<Self> {
        if start > end {
            return Err(ModelError::InvalidInterval { start, end });
        }
        Ok(Self { start, end })
    }

    #[inline]
    pub const fn start(&self) -> Time {
        self.start
    }

    #[inline]
    pub const fn end(&self) -> Time {
        self.end
    }

    /// Length in minutes.
    #[inline]
    pub const fn duration(&self) -> u16 {
        self.end.minutes - self.start.minutes
    }

    #[inline]
    pub const fn is_empty(&self) -> bool {
        self.start.minutes == self.end.minutes
    }

    /// The span as minutes since midnight.
    #[inline]
    pub fn as_minutes(&self) -> ClosedOpenInterval<u16> {
        ClosedOpenInterval::new_unchecked(self.start.minutes, self.end.minutes)
    }

    /// Returns `true` if the two spans share at least one minute.
    #[inline]
    pub fn intersects(&self, other: &TimeInterval) -> bool {
        self.as_minutes().intersects(other.as_minutes())
    }

    /// The free span between `self` and a span that starts no earlier.
    ///
    /// Back-to-back spans give a zero-length gap.
    ///
    /// # Errors
    ///
    /// `OverlappingPeriods` (reported against `day`) if the spans overlap or
    /// `later` starts before `self`.
    pub fn gap_until(&self, later: &TimeInterval, day: crate::weekday::Weekday) -> Result<Self> {
        let overlapping = || ModelError::OverlappingPeriods {
            day,
            first: *self,
            second: *later,
        };
        if later.start < self.start {
            return Err(overlapping());
        }
        let gap = self
            .as_minutes()
            .gap(later.as_minutes())
            .ok_or_else(overlapping)?;
        Ok(Self {
            start: Time {
                minutes: gap.start(),
            },
            end: Time { minutes: gap.end() },
        })
    }
}

impl std::fmt::Display for TimeInterval {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}-{}", self.start, self.end)
    }
}

impl std::fmt::Debug for TimeInterval {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "TimeInterval({}-{})", self.start, self.end)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::weekday::Weekday;

    fn t(s: &str) -> Time {
        s.parse().unwrap()
    }

    fn span(a: &str, b: &str) -> TimeInterval {
        TimeInterval::new(t(a), t(b)).unwrap()
    }

    #[test]
    fn test_twelve_hour_construction() {
        assert_eq!(Time::new(12, 0, Meridiem::Am).unwrap().minutes(), 0);
        assert_eq!(Time::new(12, 0, Meridiem::Pm).unwrap().minutes(), 720);
        assert_eq!(Time::new(11, 59, Meridiem::Pm).unwrap().minutes(), 1439);
        assert!(Time::new(0, 0, Meridiem::Am).is_err());
        assert!(Time::new(13, 0, Meridiem::Am).is_err());
        assert!(Time::new(9, 60, Meridiem::Am).is_err());
    }

    #[test]
    fn test_other_constructors() {
        assert_eq!(Time::from_hm(14, 5).unwrap(), t("2:05PM"));
        assert!(Time::from_hm(24, 0).is_err());
        assert_eq!(Time::from_minutes(545).unwrap(), t("9:05AM"));
        assert!(matches!(
            Time::from_minutes(1440),
            Err(ModelError::OutOfRange { .. })
        ));
    }

    #[test]
    fn test_accessors() {
        let time = t("12:40AM");
        assert_eq!(time.hour(), 12);
        assert_eq!(time.hour24(), 0);
        assert_eq!(time.minute(), 40);
        assert_eq!(time.meridiem(), Meridiem::Am);
        assert_eq!(t("1:15PM").hour(), 1);
        assert_eq!(t("1:15PM").meridiem(), Meridiem::Pm);
    }

    #[test]
    fn test_display_and_parse() {
        assert_eq!(Time::from_hm(9, 5).unwrap().to_string(), "9:05AM");
        assert_eq!(Time::from_hm(12, 0).unwrap().to_string(), "12:00PM");
        assert_eq!(t(" 4:10 pm ").to_string(), "4:10PM");
        assert!("4:1PM".parse::<Time>().is_err());
        assert!("16:10".parse::<Time>().is_err());
        assert!(matches!(
            "13:00PM".parse::<Time>(),
            Err(ModelError::OutOfRange { .. })
        ));
    }

    #[test]
    fn test_ordering_is_by_minutes() {
        assert!(t("11:59AM") < t("12:00PM"));
        assert!(t("12:30AM") < t("1:00AM"));
        assert_eq!(t("9:00AM"), Time::from_hm(9, 0).unwrap());
    }

    #[test]
    fn test_interval_rejects_inverted_bounds() {
        let err = TimeInterval::new(t("10:00AM"), t("9:00AM")).unwrap_err();
        assert!(matches!(err, ModelError::InvalidInterval { .. }));
        assert_eq!(span("9:00AM", "9:00AM").duration(), 0);
    }

    #[test]
    fn test_interval_duration_and_intersection() {
        let a = span("9:00AM", "10:20AM");
        assert_eq!(a.duration(), 80);
        assert!(a.intersects(&span("10:00AM", "11:00AM")));
        assert!(!a.intersects(&span("10:20AM", "11:00AM")));
    }

    #[test]
    fn test_gap_until() {
        let a = span("9:00AM", "10:00AM");
        let b = span("11:00AM", "12:00PM");
        assert_eq!(
            a.gap_until(&b, Weekday::Monday).unwrap(),
            span("10:00AM", "11:00AM")
        );

        let touching = span("10:00AM", "10:50AM");
        assert!(a.gap_until(&touching, Weekday::Monday).unwrap().is_empty());

        let overlapping = span("9:30AM", "10:30AM");
        assert!(matches!(
            a.gap_until(&overlapping, Weekday::Tuesday),
            Err(ModelError::OverlappingPeriods {
                day: Weekday::Tuesday,
                ..
            })
        ));
    }
}
