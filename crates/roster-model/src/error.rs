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

//! # Model Errors
//!
//! Every fallible operation in the model returns `ModelError`. Construction
//! errors (`InvalidInterval`, `OutOfRange`, parse failures, builder
//! validation) are raised at the catalog boundary so that malformed values
//! never reach the mask layer. `IncompatibleMask` marks a wiring mistake.
//! `ScheduleConflict` is the ordinary negative answer of
//! `Schedule::add_section`, and `OverlappingPeriods` signals that a
//! schedule's occupancy periods contradict its mask.

use crate::{
    descriptor::{CourseDescriptor, SectionDescriptor},
    time::{Time, TimeInterval},
    weekday::Weekday,
};
use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ModelError {
    #[error("invalid interval: start {start} is after end {end}")]
    InvalidInterval { start: Time, end: Time },

    #[error("{what} {value} is outside {min}..={max}")]
    OutOfRange {
        what: &'static str,
        value: usize,
        min: usize,
        max: usize,
    },

    #[error("incompatible masks: {left} blocks against {right} blocks")]
    IncompatibleMask { left: usize, right: usize },

    #[error("{section} conflicts with the schedule")]
    ScheduleConflict { section: SectionDescriptor },

    #[error("overlapping periods on {day}: {first} and {second}")]
    OverlappingPeriods {
        day: Weekday,
        first: TimeInterval,
        second: TimeInterval,
    },

    #[error("invalid time string '{0}'")]
    InvalidTime(String),

    #[error("invalid day name '{token}' (part of day list '{list}')")]
    InvalidDay { token: String, list: String },

    #[error("no day names found in '{0}'")]
    EmptyDaySet(String),

    #[error("block length of {0} minutes does not evenly divide a day")]
    InvalidBlockLength(u16),

    #[error("invalid credit range {min}-{max}")]
    InvalidCreditRange { min: u8, max: u8 },

    #[error("section of {found} cannot join a unique section of {expected}")]
    CourseMismatch {
        expected: CourseDescriptor,
        found: CourseDescriptor,
    },

    #[error("{section} does not meet at the same times as its unique section")]
    MaskMismatch { section: SectionDescriptor },

    #[error("a unique section needs at least one member")]
    EmptyUniqueSection,

    #[error("department '{0}' is defined twice")]
    DuplicateDepartment(String),

    #[error("course {department} {course} is defined twice")]
    DuplicateCourse { department: String, course: String },

    #[error("section id {id} is defined twice in {course}")]
    DuplicateSection { course: String, id: u32 },

    #[error("unknown department '{0}'")]
    UnknownDepartment(String),

    #[error("unknown course {department} {course}")]
    UnknownCourse { department: String, course: String },

    #[error("unknown section id {id} in {course}")]
    UnknownSection { course: String, id: u32 },

    #[error("no saved entries could be restored ({skipped} skipped)")]
    NothingRestored { skipped: usize },
}

/// Convenience alias used throughout the model.
pub type Result<T> = std::result::Result<T, ModelError>;

impl ModelError {
    /// Shorthand for an `OutOfRange` error over an inclusive range.
    #[inline]
    pub(crate) fn out_of_range(what: &'static str, value: usize, min: usize, max: usize) -> Self {
        ModelError::OutOfRange {
            what,
            value,
            min,
            max,
        }
    }

    /// Returns `true` for the conflict signal used by schedule assembly.
    #[inline]
    pub fn is_conflict(&self) -> bool {
        matches!(self, ModelError::ScheduleConflict { .. })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_out_of_range_message() {
        let err = ModelError::out_of_range("block", 300, 0, 287);
        assert_eq!(err.to_string(), "block 300 is outside 0..=287");
    }

    #[test]
    fn test_invalid_interval_message_uses_clock_format() {
        let err = ModelError::InvalidInterval {
            start: Time::from_hm(11, 0).unwrap(),
            end: Time::from_hm(9, 30).unwrap(),
        };
        assert_eq!(
            err.to_string(),
            "invalid interval: start 11:00AM is after end 9:30AM"
        );
    }

    #[test]
    fn test_is_conflict() {
        let conflict = ModelError::ScheduleConflict {
            section: SectionDescriptor::new(0.into(), 1.into(), 2.into()),
        };
        assert!(conflict.is_conflict());
        assert!(!ModelError::EmptyUniqueSection.is_conflict());
    }
}
