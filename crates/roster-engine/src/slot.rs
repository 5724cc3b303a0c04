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

//! A slot is one wanted course: the unique sections it can be taken in, and
//! whether the course may be left out altogether.

use roster_model::{
    catalog::Catalog,
    descriptor::CourseDescriptor,
    error::{ModelError, Result},
    grid::TimeGrid,
    mask::DayMask,
    narrow::{NarrowReport, SectionFilter},
    unique::{UniqueSection, group_admitted_sections, group_unique_sections},
};
use std::sync::Arc;

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Slot<M: DayMask> {
    candidates: Vec<Arc<UniqueSection<M>>>,
    optional: bool,
}

impl<M> Slot<M>
where
    M: DayMask,
{
    /// Creates a slot from candidates that all belong to one course.
    ///
    /// Candidates are tried in the order given.
    ///
    /// # Errors
    ///
    /// `CourseMismatch` if two candidates belong to different courses.
    pub fn new(candidates: Vec<Arc<UniqueSection<M>>>, optional: bool) -> Result<Self> {
        if let Some(first) = candidates.first() {
            let expected = first.course();
            if let Some(other) = candidates.iter().find(|c| c.course() != expected) {
                return Err(ModelError::CourseMismatch {
                    expected,
                    found: other.course(),
                });
            }
        }
        Ok(Self {
            candidates,
            optional,
        })
    }

    /// A slot that must be filled.
    #[inline]
    pub fn required(candidates: Vec<Arc<UniqueSection<M>>>) -> Result<Self> {
        Self::new(candidates, false)
    }

    /// A slot that may be skipped.
    #[inline]
    pub fn optional(candidates: Vec<Arc<UniqueSection<M>>>) -> Result<Self> {
        Self::new(candidates, true)
    }

    /// Groups the sections of `course` and offers every group as a candidate.
    ///
    /// # Errors
    ///
    /// `UnknownCourse` if `course` does not resolve. Mask construction errors
    /// propagate.
    pub fn for_course(
        catalog: &Catalog,
        course: CourseDescriptor,
        grid: &TimeGrid,
        optional: bool,
    ) -> Result<Self> {
        let candidates = group_unique_sections::<M>(catalog, course, grid)?;
        Self::new(candidates, optional)
    }

    /// Like `for_course`, but only with the sections `filter` admits.
    ///
    /// # Errors
    ///
    /// As for `for_course`, plus `IncompatibleMask` if `filter` was built
    /// on another grid.
    pub fn for_course_filtered(
        catalog: &Catalog,
        course: CourseDescriptor,
        grid: &TimeGrid,
        optional: bool,
        filter: &SectionFilter<M>,
    ) -> Result<Self> {
        let candidates = group_admitted_sections::<M>(catalog, course, grid, filter)?;
        Self::new(candidates, optional)
    }

    /// Sections over all candidates.
    #[inline]
    pub fn num_sections(&self) -> usize {
        self.candidates.iter().map(|c| c.len()).sum()
    }

    #[inline]
    pub fn candidates(&self) -> &[Arc<UniqueSection<M>>] {
        &self.candidates
    }

    #[inline]
    pub fn candidate(&self, index: usize) -> Option<&Arc<UniqueSection<M>>> {
        self.candidates.get(index)
    }

    #[inline]
    pub fn is_optional(&self) -> bool {
        self.optional
    }

    /// The course of the candidates, or `None` for an empty slot.
    #[inline]
    pub fn course(&self) -> Option<CourseDescriptor> {
        self.candidates.first().map(|c| c.course())
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.candidates.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.candidates.is_empty()
    }

    /// Number of branches the search opens at this slot: one per candidate,
    /// plus the skip branch of an optional slot.
    #[inline]
    pub fn num_branches(&self) -> usize {
        self.candidates.len() + usize::from(self.optional)
    }

    /// Fails with `IncompatibleMask` if any candidate was compiled for a
    /// different block count.
    pub(crate) fn check_capacity(&self, max_blocks: usize) -> Result<()> {
        match self
            .candidates
            .iter()
            .find(|c| c.week_mask().max_blocks() != max_blocks)
        {
            Some(c) => Err(ModelError::IncompatibleMask {
                left: c.week_mask().max_blocks(),
                right: max_blocks,
            }),
            None => Ok(()),
        }
    }
}

/// Builds one slot per `(course, optional)` pair, in order, keeping only
/// the sections `filter` admits, and reports the courses left empty.
///
/// A required course without usable sections still gets its (empty) slot,
/// so assembling the slots yields no schedules.
///
/// # Errors
///
/// As for `Slot::for_course_filtered`.
pub fn narrow_courses<M, I>(
    catalog: &Catalog,
    grid: &TimeGrid,
    courses: I,
    filter: &SectionFilter<M>,
) -> Result<(Vec<Slot<M>>, NarrowReport)>
where
    M: DayMask,
    I: IntoIterator<Item = (CourseDescriptor, bool)>,
{
    let mut report = NarrowReport::default();
    let mut slots = Vec::new();
    for (course, optional) in courses {
        let slot = Slot::for_course_filtered(catalog, course, grid, optional, filter)?;
        report.record(course, optional, slot.num_sections());
        slots.push(slot);
    }
    if !report.all_required_available() {
        log::warn!(
            "narrowing left {} required courses without a usable section",
            report.unavailable_required.len()
        );
    }
    Ok((slots, report))
}

impl<M: DayMask> std::fmt::Display for Slot<M> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "Slot(candidates: {}, optional: {})",
            self.candidates.len(),
            self.optional
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use roster_model::{
        catalog::{CatalogBuilder, ClassPeriod, CourseBuilder, DepartmentBuilder, SectionBuilder},
        mask::{BitVecDayMask, WordDayMask},
        time::TimeInterval,
    };

    fn catalog() -> Catalog {
        let period = |days, start, end| ClassPeriod::parse(days, start, end, "LEC").unwrap();
        let algebra = CourseBuilder::new("1010", "Algebra")
            .credits(3, 3)
            .section(
                SectionBuilder::new("01", 100)
                    .period(period("mon,wed", "9:00AM", "9:50AM"))
                    .build(),
            )
            .section(
                SectionBuilder::new("02", 101)
                    .period(period("mon,wed", "9:00AM", "9:50AM"))
                    .build(),
            )
            .section(
                SectionBuilder::new("03", 102)
                    .period(period("tue,thu", "1:00PM", "2:15PM"))
                    .build(),
            )
            .build()
            .unwrap();
        let physics = CourseBuilder::new("2210", "Physics")
            .credits(4, 4)
            .section(
                SectionBuilder::new("01", 200)
                    .period(period("fri", "10:00AM", "11:00AM"))
                    .build(),
            )
            .build()
            .unwrap();
        let math = DepartmentBuilder::new("MATH", "Mathematics")
            .course(algebra)
            .course(physics)
            .build()
            .unwrap();
        CatalogBuilder::new().department(math).build().unwrap()
    }

    #[test]
    fn test_for_course_groups_sections() {
        let catalog = catalog();
        let grid = TimeGrid::new(30).unwrap();
        let course = catalog.find_course("MATH", "1010").unwrap();
        let slot = Slot::<WordDayMask>::for_course(&catalog, course, &grid, false).unwrap();

        assert_eq!(slot.len(), 2);
        assert_eq!(slot.course(), Some(course));
        assert_eq!(slot.candidate(0).unwrap().len(), 2);
        assert_eq!(slot.num_branches(), 2);
        assert!(slot.check_capacity(grid.max_blocks()).is_ok());
    }

    #[test]
    fn test_filtered_slot_keeps_admitted_sections() {
        let catalog = catalog();
        let grid = TimeGrid::new(30).unwrap();
        let course = catalog.find_course("MATH", "1010").unwrap();
        let mut filter = SectionFilter::<WordDayMask>::new(&grid).unwrap();
        filter.exclude(catalog.require_section(course, 100).unwrap());

        let slot =
            Slot::for_course_filtered(&catalog, course, &grid, false, &filter).unwrap();
        assert_eq!(slot.len(), 2);
        assert_eq!(slot.num_sections(), 2);
        assert_eq!(slot.candidate(0).unwrap().members(), &[course.section(1.into())]);
    }

    #[test]
    fn test_narrow_courses_reports_emptied_courses() {
        let catalog = catalog();
        let grid = TimeGrid::new(30).unwrap();
        let algebra = catalog.find_course("MATH", "1010").unwrap();
        let physics = catalog.find_course("MATH", "2210").unwrap();
        let friday = TimeInterval::new("9:00AM".parse().unwrap(), "12:00PM".parse().unwrap()).unwrap();

        let mut filter = SectionFilter::<WordDayMask>::new(&grid).unwrap();
        filter.block(&grid, "fri".parse().unwrap(), &friday).unwrap();

        let (slots, report) =
            narrow_courses(&catalog, &grid, [(algebra, false), (physics, true)], &filter).unwrap();
        assert_eq!(slots.len(), 2);
        assert!(slots[1].is_empty());
        assert_eq!(report.usable_sections, 3);
        assert_eq!(report.unavailable_optional, vec![physics]);
        assert!(report.all_required_available());

        let (slots, report) =
            narrow_courses(&catalog, &grid, [(physics, false)], &filter).unwrap();
        assert!(slots[0].is_empty());
        assert_eq!(report.unavailable_required, vec![physics]);
        assert!(!report.all_required_available());
    }

    #[test]
    fn test_mixed_courses_are_rejected() {
        let catalog = catalog();
        let grid = TimeGrid::default();
        let algebra = catalog.find_course("MATH", "1010").unwrap();
        let physics = catalog.find_course("MATH", "2210").unwrap();
        let mut candidates = group_unique_sections::<BitVecDayMask>(&catalog, algebra, &grid).unwrap();
        candidates.extend(group_unique_sections::<BitVecDayMask>(&catalog, physics, &grid).unwrap());

        assert_eq!(
            Slot::required(candidates),
            Err(ModelError::CourseMismatch {
                expected: algebra,
                found: physics
            })
        );
    }

    #[test]
    fn test_empty_optional_slot() {
        let slot = Slot::<WordDayMask>::optional(Vec::new()).unwrap();
        assert!(slot.is_empty());
        assert_eq!(slot.course(), None);
        assert_eq!(slot.num_branches(), 1);
        assert_eq!(slot.to_string(), "Slot(candidates: 0, optional: true)");
    }

    #[test]
    fn test_capacity_mismatch_is_detected() {
        let catalog = catalog();
        let course = catalog.find_course("MATH", "2210").unwrap();
        let slot =
            Slot::<BitVecDayMask>::for_course(&catalog, course, &TimeGrid::default(), true).unwrap();
        assert_eq!(
            slot.check_capacity(48),
            Err(ModelError::IncompatibleMask {
                left: 288,
                right: 48
            })
        );
    }
}
