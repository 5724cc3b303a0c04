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

//! Weekdays and compact weekday sets.
//!
//! Day lists in course listings come in many shapes (`"mon,wed,fri"`,
//! `"M-W-F"`, `"tu/th"`, `"TR"`). `WeekdaySet::from_str` accepts all of
//! them: each token is matched as a prefix of a full day name, with `r`/`tr`
//! standing for Thursday and at least two letters required for the weekend.

use crate::error::{ModelError, Result};
use regex::Regex;
use std::{str::FromStr, sync::LazyLock};

/// Day of the week, Monday first.
#[derive(Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Debug)]
#[repr(u8)]
pub enum Weekday {
    Monday = 0,
    Tuesday = 1,
    Wednesday = 2,
    Thursday = 3,
    Friday = 4,
    Saturday = 5,
    Sunday = 6,
}

impl Weekday {
    /// Number of days in a week.
    pub const COUNT: usize = 7;

    /// All days, Monday through Sunday.
    pub const ALL: [Weekday; 7] = [
        Weekday::Monday,
        Weekday::Tuesday,
        Weekday::Wednesday,
        Weekday::Thursday,
        Weekday::Friday,
        Weekday::Saturday,
        Weekday::Sunday,
    ];

    /// The day at `index`, where Monday is 0.
    ///
    /// # Errors
    ///
    /// `OutOfRange` if `index > 6`.
    #[inline]
    pub fn from_index(index: usize) -> Result<Self> {
        Self::ALL
            .get(index)
            .copied()
            .ok_or_else(|| ModelError::out_of_range("weekday", index, 0, Self::COUNT - 1))
    }

    #[inline]
    pub const fn index(self) -> usize {
        self as usize
    }

    /// Lowercase full name, e.g. `"thursday"`.
    pub const fn name(self) -> &'static str {
        match self {
            Weekday::Monday => "monday",
            Weekday::Tuesday => "tuesday",
            Weekday::Wednesday => "wednesday",
            Weekday::Thursday => "thursday",
            Weekday::Friday => "friday",
            Weekday::Saturday => "saturday",
            Weekday::Sunday => "sunday",
        }
    }

    /// Three-letter abbreviation, e.g. `"thu"`.
    #[inline]
    pub fn abbrev(self) -> &'static str {
        &self.name()[..3]
    }

    #[inline]
    const fn bit(self) -> u8 {
        1 << (self as u8)
    }
}

impl std::fmt::Display for Weekday {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.abbrev())
    }
}

/// A set of weekdays, one bit per day.
#[derive(Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
pub struct WeekdaySet {
    bits: u8,
}

impl WeekdaySet {
    #[inline]
    pub const fn empty() -> Self {
        Self { bits: 0 }
    }

    /// Creates a set from any collection of days.
    #[inline]
    pub fn of<I>(days: I) -> Self
    where
        I: IntoIterator<Item = Weekday>,
    {
        days.into_iter().fold(Self::empty(), |mut set, day| {
            set.insert(day);
            set
        })
    }

    /// Inserts `day`, returning whether it was already present.
    #[inline]
    pub fn insert(&mut self, day: Weekday) -> bool {
        let was = self.contains(day);
        self.bits |= day.bit();
        was
    }

    #[inline]
    pub const fn contains(&self, day: Weekday) -> bool {
        self.bits & day.bit() != 0
    }

    #[inline]
    pub const fn len(&self) -> usize {
        self.bits.count_ones() as usize
    }

    #[inline]
    pub const fn is_empty(&self) -> bool {
        self.bits == 0
    }

    /// The days in the set, Monday first.
    #[inline]
    pub fn iter(&self) -> impl Iterator<Item = Weekday> + '_ {
        Weekday::ALL.into_iter().filter(|d| self.contains(*d))
    }
}

impl FromIterator<Weekday> for WeekdaySet {
    fn from_iter<I: IntoIterator<Item = Weekday>>(iter: I) -> Self {
        Self::of(iter)
    }
}

impl std::fmt::Display for WeekdaySet {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let names: Vec<&str> = self.iter().map(Weekday::abbrev).collect();
        write!(f, "{}", names.join(","))
    }
}

impl std::fmt::Debug for WeekdaySet {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "WeekdaySet({})", self)
    }
}

static DAY_SEPARATOR_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"[,\-/+ ]+").expect("day separator is a valid regex"));

fn parse_day_token(token: &str, list: &str) -> Result<Weekday> {
    let lower = token.to_ascii_lowercase();
    let is_prefix_of = |day: Weekday| day.name().starts_with(lower.as_str());

    let day = if is_prefix_of(Weekday::Monday) {
        Weekday::Monday
    } else if is_prefix_of(Weekday::Tuesday) {
        Weekday::Tuesday
    } else if is_prefix_of(Weekday::Wednesday) {
        Weekday::Wednesday
    } else if lower == "r" || lower == "tr" || is_prefix_of(Weekday::Thursday) {
        Weekday::Thursday
    } else if is_prefix_of(Weekday::Friday) {
        Weekday::Friday
    } else if lower.len() >= 2 && is_prefix_of(Weekday::Saturday) {
        Weekday::Saturday
    } else if lower.len() >= 2 && is_prefix_of(Weekday::Sunday) {
        Weekday::Sunday
    } else {
        return Err(ModelError::InvalidDay {
            token: token.to_string(),
            list: list.to_string(),
        });
    };
    Ok(day)
}

impl FromStr for WeekdaySet {
    type Err = ModelError;

    /// Parses a day list. A blank list is the empty set.
    ///
    /// # Examples
    ///
    /// ```rust
    /// # use roster_model::weekday::{Weekday, WeekdaySet};
    /// let set: WeekdaySet = "tu/th".parse().unwrap();
    /// assert!(set.contains(Weekday::Tuesday) && set.contains(Weekday::Thursday));
    /// assert_eq!("M-W-F".parse::<WeekdaySet>().unwrap().len(), 3);
    /// assert!("mon,xyz".parse::<WeekdaySet>().is_err());
    /// ```
    fn from_str(s: &str) -> Result<Self> {
        let mut set = WeekdaySet::empty();
        for token in DAY_SEPARATOR_RE.split(s.trim()) {
            if token.is_empty() {
                continue;
            }
            set.insert(parse_day_token(token, s)?);
        }
        if set.is_empty() && !s.trim().is_empty() {
            return Err(ModelError::EmptyDaySet(s.to_string()));
        }
        Ok(set)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_index() {
        assert_eq!(Weekday::from_index(0).unwrap(), Weekday::Monday);
        assert_eq!(Weekday::from_index(6).unwrap(), Weekday::Sunday);
        assert!(matches!(
            Weekday::from_index(7),
            Err(ModelError::OutOfRange { value: 7, .. })
        ));
        for (i, day) in Weekday::ALL.iter().enumerate() {
            assert_eq!(day.index(), i);
        }
    }

    #[test]
    fn test_set_operations() {
        let mut set = WeekdaySet::empty();
        assert!(set.is_empty());
        assert!(!set.insert(Weekday::Friday));
        assert!(set.insert(Weekday::Friday));
        set.insert(Weekday::Monday);
        assert_eq!(set.len(), 2);
        let days: Vec<_> = set.iter().collect();
        assert_eq!(days, vec![Weekday::Monday, Weekday::Friday]);
        assert_eq!(set.to_string(), "mon,fri");
    }

    #[test]
    fn test_parse_long_and_short_names() {
        let set: WeekdaySet = "Monday, Wednesday, Friday".parse().unwrap();
        assert_eq!(
            set,
            WeekdaySet::of([Weekday::Monday, Weekday::Wednesday, Weekday::Friday])
        );
        let set: WeekdaySet = "mon+wed".parse().unwrap();
        assert_eq!(set.len(), 2);
    }

    #[test]
    fn test_parse_single_letters() {
        let set: WeekdaySet = "M T W R F".parse().unwrap();
        assert_eq!(set.len(), 5);
        assert!(set.contains(Weekday::Thursday));
        let set: WeekdaySet = "tr".parse().unwrap();
        assert_eq!(set, WeekdaySet::of([Weekday::Thursday]));
    }

    #[test]
    fn test_parse_weekend_needs_two_letters() {
        assert!("s".parse::<WeekdaySet>().is_err());
        assert_eq!(
            "sa,su".parse::<WeekdaySet>().unwrap(),
            WeekdaySet::of([Weekday::Saturday, Weekday::Sunday])
        );
    }

    #[test]
    fn test_parse_errors() {
        assert!(matches!(
            "mon,funday".parse::<WeekdaySet>(),
            Err(ModelError::InvalidDay { .. })
        ));
        assert!(matches!(
            " , - ".parse::<WeekdaySet>(),
            Err(ModelError::EmptyDaySet(_))
        ));
        assert!("".parse::<WeekdaySet>().unwrap().is_empty());
    }
}
