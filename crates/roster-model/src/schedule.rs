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

//! # Schedule
//!
//! A conflict-free set of unique sections together with their merged
//! occupancy. `add_section` is the only mutator and refuses any section
//! whose mask overlaps the merged mask, so the merged mask is always the
//! disjoint union of the member masks.
//!
//! Cloning is O(1) in the number of members: the member list is a shared,
//! persistent cons list, and only the merged mask is copied. Assembly
//! clones a partial schedule at every descent, so this matters.

use crate::{
    catalog::{Catalog, CreditRange, Section},
    error::{ModelError, Result},
    grid::TimeGrid,
    mask::{DayMask, WeekMask},
    time::TimeInterval,
    unique::UniqueSection,
    weekday::Weekday,
};
use std::sync::{Arc, OnceLock};

/// One link of the persistent member list. The newest member is the head.
#[derive(Debug)]
struct Link<M: DayMask> {
    section: Arc<UniqueSection<M>>,
    previous: Option<Arc<Link<M>>>,
}

/// Free time between consecutive periods, indexed by weekday.
pub type Betweens = [Vec<TimeInterval>; 7];

/// A set of mutually compatible unique sections.
pub struct Schedule<M: DayMask> {
    head: Option<Arc<Link<M>>>,
    len: usize,
    mask: WeekMask<M>,
    days_of_class: OnceLock<usize>,
    time_sums: OnceLock<[usize; 7]>,
    betweens: OnceLock<Betweens>,
}

impl<M> Schedule<M>
where
    M: DayMask,
{
    /// An empty schedule over days of `max_blocks` blocks.
    ///
    /// # Errors
    ///
    /// `OutOfRange` if `M` cannot hold `max_blocks` blocks.
    pub fn new(max_blocks: usize) -> Result<Self> {
        Ok(Self::from_mask(WeekMask::with_capacity(max_blocks)?))
    }

    /// An empty schedule on `grid`.
    #[inline]
    pub fn for_grid(grid: &TimeGrid) -> Result<Self> {
        Self::new(grid.max_blocks())
    }

    fn from_mask(mask: WeekMask<M>) -> Self {
        Self {
            head: None,
            len: 0,
            mask,
            days_of_class: OnceLock::new(),
            time_sums: OnceLock::new(),
            betweens: OnceLock::new(),
        }
    }

    /// Clones `template` and adds `sections` in order.
    ///
    /// # Errors
    ///
    /// Stops at the first section `add_section` rejects.
    pub fn from_members<I>(template: &Self, sections: I) -> Result<Self>
    where
        I: IntoIterator<Item = Arc<UniqueSection<M>>>,
    {
        let mut schedule = template.clone();
        for section in sections {
            schedule.add_section(section)?;
        }
        Ok(schedule)
    }

    /// Whether `section` overlaps nothing already scheduled.
    ///
    /// # Errors
    ///
    /// `IncompatibleMask` if the block counts differ.
    #[inline]
    pub fn can_add(&self, section: &UniqueSection<M>) -> Result<bool> {
        section.week_mask().fits_into(&self.mask)
    }

    /// Adds `section` to the schedule.
    ///
    /// # Errors
    ///
    /// `ScheduleConflict` naming the section's first member if it overlaps
    /// the schedule, `IncompatibleMask` if the block counts differ. The
    /// schedule is unchanged on error.
    pub fn add_section(&mut self, section: Arc<UniqueSection<M>>) -> Result<()> {
        if !self.can_add(&section)? {
            return Err(ModelError::ScheduleConflict {
                section: section.first(),
            });
        }
        self.mask.merge(section.week_mask())?;
        self.head = Some(Arc::new(Link {
            section,
            previous: self.head.take(),
        }));
        self.len += 1;
        self.reset_statistics();
        Ok(())
    }

    fn reset_statistics(&mut self) {
        self.days_of_class.take();
        self.time_sums.take();
        self.betweens.take();
    }

    /// The members, oldest first.
    pub fn members(&self) -> impl DoubleEndedIterator<Item = &Arc<UniqueSection<M>>> + '_ {
        let mut members = Vec::with_capacity(self.len);
        let mut link = self.head.as_deref();
        while let Some(current) = link {
            members.push(&current.section);
            link = current.previous.as_deref();
        }
        members.into_iter().rev()
    }

    /// The merged occupancy of every member.
    #[inline]
    pub fn week_mask(&self) -> &WeekMask<M> {
        &self.mask
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.len
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Number of weekdays with at least one class.
    pub fn days_of_class(&self) -> usize {
        *self
            .days_of_class
            .get_or_init(|| self.mask.days_with_class())
    }

    /// Occupied blocks per weekday, largest first.
    pub fn time_sums(&self) -> [usize; 7] {
        *self.time_sums.get_or_init(|| {
            let mut sums = self.mask.block_sums();
            sums.sort_unstable_by(|a, b| b.cmp(a));
            sums
        })
    }

    /// The free time between consecutive periods on each weekday.
    ///
    /// Back-to-back periods contribute a zero-length gap. Zero-length
    /// periods occupy no time and are left out.
    ///
    /// # Errors
    ///
    /// `OverlappingPeriods` if two periods on the same day overlap, which
    /// a consistent catalog never produces. Errors are not cached.
    pub fn betweens(&self) -> Result<&Betweens> {
        if let Some(cached) = self.betweens.get() {
            return Ok(cached);
        }
        let computed = self.compute_betweens()?;
        Ok(self.betweens.get_or_init(|| computed))
    }

    fn compute_betweens(&self) -> Result<Betweens> {
        let mut per_day: [Vec<TimeInterval>; 7] = Default::default();
        for member in self.members() {
            for occupancy in member.periods().iter().filter(|o| !o.interval.is_empty()) {
                per_day[occupancy.day.index()].push(occupancy.interval);
            }
        }

        let mut gaps: Betweens = Default::default();
        for (day, periods) in Weekday::ALL.into_iter().zip(per_day.iter_mut()) {
            periods.sort_unstable();
            gaps[day.index()] = periods
                .windows(2)
                .map(|pair| pair[0].gap_until(&pair[1], day))
                .collect::<Result<Vec<_>>>()?;
        }
        Ok(gaps)
    }

    /// The shortest gap between two periods on any day.
    ///
    /// # Errors
    ///
    /// As for `betweens`.
    pub fn shortest_break(&self) -> Result<Option<TimeInterval>> {
        Ok(self
            .betweens()?
            .iter()
            .flatten()
            .min_by_key(|gap| gap.duration())
            .copied())
    }

    /// Minutes spent in class over the week.
    pub fn total_class_minutes(&self) -> u32 {
        self.members()
            .flat_map(|member| member.periods().iter())
            .map(|occupancy| u32::from(occupancy.interval.duration()))
            .sum()
    }

    /// The summed credit range of the member courses.
    ///
    /// # Errors
    ///
    /// `UnknownCourse` if a member's course is not in `catalog`.
    pub fn credit_range(&self, catalog: &Catalog) -> Result<CreditRange> {
        let (mut min, mut max) = (0u8, 0u8);
        for member in self.members() {
            let course = catalog
                .course(member.course())
                .ok_or_else(|| ModelError::UnknownCourse {
                    department: member.course().department().to_string(),
                    course: member.course().course().to_string(),
                })?;
            min = min.saturating_add(course.credits().min());
            max = max.saturating_add(course.credits().max());
        }
        CreditRange::new(min, max)
    }

    /// Every catalog section the schedule allows, grouped by member.
    ///
    /// Descriptors that no longer resolve are left out.
    pub fn sections<'c>(&self, catalog: &'c Catalog) -> Vec<Vec<&'c Section>> {
        self.members()
            .map(|member| {
                member
                    .members()
                    .iter()
                    .filter_map(|&descriptor| catalog.section(descriptor))
                    .collect()
            })
            .collect()
    }
}

impl<M> Clone for Schedule<M>
where
    M: DayMask,
{
    fn clone(&self) -> Self {
        Self {
            head: self.head.clone(),
            len: self.len,
            mask: self.mask.clone(),
            days_of_class: OnceLock::new(),
            time_sums: OnceLock::new(),
            betweens: OnceLock::new(),
        }
    }
}

impl<M> std::fmt::Debug for Schedule<M>
where
    M: DayMask,
{
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Schedule")
            .field("members", &self.members().map(|m| m.first()).collect::<Vec<_>>())
            .field("mask", &self.mask)
            .finish()
    }
}

impl<M> std::fmt::Display for Schedule<M>
where
    M: DayMask,
{
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "Schedule(sections: {}, days: {}, blocks: {})",
            self.len,
            self.days_of_class(),
            self.mask.time_block_sum()
        )
    }
}
