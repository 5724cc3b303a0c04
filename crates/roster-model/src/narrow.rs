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

//! # Narrowing
//!
//! Before assembly a student can rule out time ("time off") and individual
//! sections. A `SectionFilter` holds both; `group_admitted_sections` only
//! groups the sections it admits, and `NarrowReport` says which courses are
//! left without a usable section.

use crate::{
    descriptor::{CourseDescriptor, SectionDescriptor},
    error::Result,
    grid::TimeGrid,
    mask::{DayMask, WeekMask},
    time::TimeInterval,
    weekday::WeekdaySet,
};
use rustc_hash::FxHashSet;

/// Blocked time and excluded sections.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SectionFilter<M: DayMask> {
    time_off: WeekMask<M>,
    excluded: FxHashSet<SectionDescriptor>,
}

impl<M> SectionFilter<M>
where
    M: DayMask,
{
    /// A filter that admits every section of `grid`.
    pub fn new(grid: &TimeGrid) -> Result<Self> {
        Ok(Self::with_time_off(grid.empty_week()?))
    }

    #[inline]
    pub fn with_time_off(time_off: WeekMask<M>) -> Self {
        Self {
            time_off,
            excluded: FxHashSet::default(),
        }
    }

    /// Marks `interval` on every day of `days` as time off.
    ///
    /// # Errors
    ///
    /// `OutOfRange` if `interval` maps past the blocks of the filter, which
    /// happens when `grid` is finer than the grid the filter was built on.
    pub fn block(&mut self, grid: &TimeGrid, days: WeekdaySet, interval: &TimeInterval) -> Result<()> {
        let blocks = grid.block_range(interval);
        for day in days.iter() {
            self.time_off.day_mut(day).add_range(blocks)?;
        }
        Ok(())
    }

    /// Excludes `section`. Returns `false` if it was already excluded.
    #[inline]
    pub fn exclude(&mut self, section: SectionDescriptor) -> bool {
        self.excluded.insert(section)
    }

    #[inline]
    pub fn time_off(&self) -> &WeekMask<M> {
        &self.time_off
    }

    #[inline]
    pub fn is_excluded(&self, section: SectionDescriptor) -> bool {
        self.excluded.contains(&section)
    }

    /// Whether nothing is blocked or excluded.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.time_off.is_empty() && self.excluded.is_empty()
    }

    /// Whether a section occupying `mask` survives the filter.
    ///
    /// # Errors
    ///
    /// `IncompatibleMask` if `mask` was compiled on a different grid.
    pub fn admits(&self, section: SectionDescriptor, mask: &WeekMask<M>) -> Result<bool> {
        if self.is_excluded(section) {
            return Ok(false);
        }
        mask.fits_into(&self.time_off)
    }
}

/// What is left of each course after narrowing.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct NarrowReport {
    /// Sections that survived, over all courses.
    pub usable_sections: usize,
    /// Required courses with no usable section.
    pub unavailable_required: Vec<CourseDescriptor>,
    /// Optional courses with no usable section. Assembly just skips them.
    pub unavailable_optional: Vec<CourseDescriptor>,
}

impl NarrowReport {
    /// Records the outcome for one course.
    pub fn record(&mut self, course: CourseDescriptor, optional: bool, usable: usize) {
        self.usable_sections += usable;
        if usable == 0 {
            if optional {
                self.unavailable_optional.push(course);
            } else {
                self.unavailable_required.push(course);
            }
        }
    }

    /// Whether some section survived and every required course kept one.
    #[inline]
    pub fn all_required_available(&self) -> bool {
        self.usable_sections > 0 && self.unavailable_required.is_empty()
    }
}

impl std::fmt::Display for NarrowReport {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "NarrowReport(usable sections: {}, unavailable required: {}, unavailable optional: {})",
            self.usable_sections,
            self.unavailable_required.len(),
            self.unavailable_optional.len()
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{mask::WordDayMask, time::Time, weekday::Weekday};
    use roster_core::math::interval::ClosedOpenInterval;

    fn grid() -> TimeGrid {
        TimeGrid::new(30).unwrap()
    }

    fn span(start: &str, end: &str) -> TimeInterval {
        TimeInterval::new(start.parse::<Time>().unwrap(), end.parse::<Time>().unwrap()).unwrap()
    }

    fn section(index: usize) -> SectionDescriptor {
        CourseDescriptor::new(0.into(), 0.into()).section(index.into())
    }

    fn monday(blocks: (usize, usize)) -> WeekMask<WordDayMask> {
        let mut mask: WeekMask<WordDayMask> = WeekMask::with_capacity(48).unwrap();
        mask.day_mut(Weekday::Monday)
            .add_range(ClosedOpenInterval::new(blocks.0, blocks.1))
            .unwrap();
        mask
    }

    #[test]
    fn test_empty_filter_admits_everything() {
        let filter = SectionFilter::<WordDayMask>::new(&grid()).unwrap();
        assert!(filter.is_empty());
        assert!(filter.admits(section(0), &monday((0, 48))).unwrap());
    }

    #[test]
    fn test_time_off_rejects_overlapping_sections() {
        let grid = grid();
        let mut filter = SectionFilter::<WordDayMask>::new(&grid).unwrap();
        filter
            .block(&grid, "mon,wed".parse().unwrap(), &span("12:00PM", "1:00PM"))
            .unwrap();
        assert_eq!(filter.time_off().time_block_sum(), 4);

        // Blocks 24 and 25 are noon to one.
        assert!(!filter.admits(section(0), &monday((23, 25))).unwrap());
        assert!(filter.admits(section(0), &monday((26, 28))).unwrap());
        assert!(filter.admits(section(0), &monday((20, 24))).unwrap());
    }

    #[test]
    fn test_excluded_section_is_rejected() {
        let mut filter = SectionFilter::<WordDayMask>::new(&grid()).unwrap();
        assert!(filter.exclude(section(1)));
        assert!(!filter.exclude(section(1)));
        assert!(!filter.is_empty());
        assert!(!filter.admits(section(1), &monday((0, 2))).unwrap());
        assert!(filter.admits(section(0), &monday((0, 2))).unwrap());
    }

    #[test]
    fn test_capacity_mismatch_is_an_error() {
        let filter = SectionFilter::<WordDayMask>::new(&grid()).unwrap();
        let small = WeekMask::<WordDayMask>::with_capacity(24).unwrap();
        assert!(filter.admits(section(0), &small).is_err());
    }

    #[test]
    fn test_report_tracks_unavailable_courses() {
        let required = CourseDescriptor::new(0.into(), 0.into());
        let optional = CourseDescriptor::new(0.into(), 1.into());

        let mut report = NarrowReport::default();
        assert!(!report.all_required_available());
        report.record(required, false, 2);
        report.record(optional, true, 0);
        assert!(report.all_required_available());
        assert_eq!(report.unavailable_optional, vec![optional]);

        report.record(CourseDescriptor::new(0.into(), 2.into()), false, 0);
        assert!(!report.all_required_available());
        assert_eq!(report.usable_sections, 2);
        assert_eq!(
            report.to_string(),
            "NarrowReport(usable sections: 2, unavailable required: 1, unavailable optional: 1)"
        );
    }
}
