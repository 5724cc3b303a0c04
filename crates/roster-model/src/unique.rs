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

//! # Unique Sections
//!
//! Sections of one course that meet at exactly the same times are
//! interchangeable for assembly. They are grouped into a `UniqueSection`
//! so that the search branches once per distinct timetable instead of once
//! per section.

use crate::{
    catalog::{Catalog, DailyOccupancy},
    descriptor::{CourseDescriptor, SectionDescriptor},
    error::{ModelError, Result},
    grid::TimeGrid,
    mask::{DayMask, WeekMask},
    narrow::SectionFilter,
};
use rustc_hash::FxHashMap;
use smallvec::SmallVec;
use std::sync::Arc;

/// One or more sections of a course with identical weekly occupancy.
#[derive(Clone, PartialEq, Eq, Debug)]
pub struct UniqueSection<M: DayMask> {
    course: CourseDescriptor,
    members: SmallVec<[SectionDescriptor; 2]>,
    lowest_number: String,
    mask: WeekMask<M>,
    periods: Arc<[DailyOccupancy]>,
}

impl<M> UniqueSection<M>
where
    M: DayMask,
{
    /// Groups `sections` into one unique section, compiling each on `grid`.
    ///
    /// # Errors
    ///
    /// `EmptyUniqueSection` for an empty slice, `UnknownSection` if a
    /// descriptor does not resolve, `CourseMismatch` or `MaskMismatch` if the
    /// sections do not belong together.
    pub fn resolve(
        catalog: &Catalog,
        grid: &TimeGrid,
        sections: &[SectionDescriptor],
    ) -> Result<Self> {
        let mut builder: Option<UniqueSectionBuilder<M>> = None;
        for &descriptor in sections {
            let section = catalog
                .section(descriptor)
                .ok_or_else(|| ModelError::UnknownSection {
                    course: catalog.course_label(descriptor.course_descriptor()),
                    id: descriptor.section().get() as u32,
                })?;
            let mask = grid.section_mask::<M>(section)?;
            builder
                .get_or_insert_with(|| UniqueSectionBuilder::new(descriptor.course_descriptor()))
                .add(descriptor, section.number(), mask, section.occupancies())?;
        }
        builder.ok_or(ModelError::EmptyUniqueSection)?.build()
    }

    #[inline]
    pub fn course(&self) -> CourseDescriptor {
        self.course
    }

    /// The member sections, in the order they were added.
    #[inline]
    pub fn members(&self) -> &[SectionDescriptor] {
        &self.members
    }

    /// The first member. Conflicts are reported against this section.
    #[inline]
    pub fn first(&self) -> SectionDescriptor {
        self.members[0]
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.members.len()
    }

    /// Always `false`; a unique section cannot be built without members.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.members.is_empty()
    }

    /// The smallest section number among the members, e.g. `"01"`.
    #[inline]
    pub fn lowest_number(&self) -> &str {
        &self.lowest_number
    }

    /// The occupancy shared by every member.
    #[inline]
    pub fn week_mask(&self) -> &WeekMask<M> {
        &self.mask
    }

    /// The meeting times of the first member, one entry per day.
    #[inline]
    pub fn periods(&self) -> &[DailyOccupancy] {
        &self.periods
    }

    /// Whether `section` is one of the members.
    #[inline]
    pub fn contains(&self, section: SectionDescriptor) -> bool {
        self.members.contains(&section)
    }
}

impl<M: DayMask> std::fmt::Display for UniqueSection<M> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "UniqueSection({}: ", self.course)?;
        for (i, member) in self.members.iter().enumerate() {
            if i > 0 {
                write!(f, ", ")?;
            }
            write!(f, "{}", member.section())?;
        }
        write!(f, ")")
    }
}

/// Accumulates sections with identical masks into a `UniqueSection`.
#[derive(Clone, Debug)]
pub struct UniqueSectionBuilder<M: DayMask> {
    course: CourseDescriptor,
    members: SmallVec<[SectionDescriptor; 2]>,
    lowest_number: String,
    mask: Option<WeekMask<M>>,
    periods: Vec<DailyOccupancy>,
}

impl<M> UniqueSectionBuilder<M>
where
    M: DayMask,
{
    pub fn new(course: CourseDescriptor) -> Self {
        Self {
            course,
            members: SmallVec::new(),
            lowest_number: String::new(),
            mask: None,
            periods: Vec::new(),
        }
    }

    /// The mask shared by the members added so far.
    #[inline]
    pub fn week_mask(&self) -> Option<&WeekMask<M>> {
        self.mask.as_ref()
    }

    /// Adds a member. The first member fixes the mask and the periods;
    /// later members only contribute their descriptor and number.
    ///
    /// # Errors
    ///
    /// `CourseMismatch` if `section` belongs to another course,
    /// `MaskMismatch` if `mask` differs from the first member's.
    pub fn add<I>(
        &mut self,
        section: SectionDescriptor,
        number: &str,
        mask: WeekMask<M>,
        periods: I,
    ) -> Result<&mut Self>
    where
        I: IntoIterator<Item = DailyOccupancy>,
    {
        if section.course_descriptor() != self.course {
            return Err(ModelError::CourseMismatch {
                expected: self.course,
                found: section.course_descriptor(),
            });
        }
        if let Some(existing) = &self.mask {
            if *existing != mask {
                return Err(ModelError::MaskMismatch { section });
            }
        } else {
            self.mask = Some(mask);
            self.periods = periods.into_iter().collect();
        }
        if self.members.is_empty()
            || section_number_key(number) < section_number_key(&self.lowest_number)
        {
            self.lowest_number = number.to_string();
        }
        self.members.push(section);
        Ok(self)
    }

    /// # Errors
    ///
    /// `EmptyUniqueSection` if no member was added.
    pub fn build(self) -> Result<UniqueSection<M>> {
        let mask = self.mask.ok_or(ModelError::EmptyUniqueSection)?;
        Ok(UniqueSection {
            course: self.course,
            members: self.members,
            lowest_number: self.lowest_number,
            mask,
            periods: self.periods.into(),
        })
    }
}

/// Orders `"2"` before `"10"` and `"01"` before `"02"`.
#[inline]
fn section_number_key(number: &str) -> (usize, &str) {
    (number.len(), number)
}

/// Partitions the sections of `course` into unique sections.
///
/// Groups appear in the order their first member appears in the course
/// listing, and members keep listing order within a group.
///
/// # Errors
///
/// `UnknownCourse` if `course` does not resolve. Mask construction errors
/// propagate.
pub fn group_unique_sections<M>(
    catalog: &Catalog,
    course: CourseDescriptor,
    grid: &TimeGrid,
) -> Result<Vec<Arc<UniqueSection<M>>>>
where
    M: DayMask,
{
    group_sections_where(catalog, course, grid, |_, _| Ok(true))
}

/// Like `group_unique_sections`, but only with the sections `filter`
/// admits. A course whose every section is filtered out yields no groups.
///
/// # Errors
///
/// As for `group_unique_sections`, plus `IncompatibleMask` if `filter`
/// was built on a grid with a different block count.
pub fn group_admitted_sections<M>(
    catalog: &Catalog,
    course: CourseDescriptor,
    grid: &TimeGrid,
    filter: &SectionFilter<M>,
) -> Result<Vec<Arc<UniqueSection<M>>>>
where
    M: DayMask,
{
    group_sections_where(catalog, course, grid, |section, mask| {
        filter.admits(section, mask)
    })
}

fn group_sections_where<M, F>(
    catalog: &Catalog,
    course: CourseDescriptor,
    grid: &TimeGrid,
    mut admit: F,
) -> Result<Vec<Arc<UniqueSection<M>>>>
where
    M: DayMask,
    F: FnMut(SectionDescriptor, &WeekMask<M>) -> Result<bool>,
{
    let resolved = catalog.course(course).ok_or_else(|| ModelError::UnknownCourse {
        department: course.department().to_string(),
        course: course.course().to_string(),
    })?;

    let mut groups: Vec<UniqueSectionBuilder<M>> = Vec::new();
    let mut by_mask: FxHashMap<WeekMask<M>, usize> = FxHashMap::default();
    for (index, section) in resolved.sections().iter().enumerate() {
        let descriptor = course.section(index.into());
        let mask = grid.section_mask::<M>(section)?;
        if !admit(descriptor, &mask)? {
            continue;
        }
        let group = match by_mask.get(&mask) {
            Some(&group) => group,
            None => {
                by_mask.insert(mask.clone(), groups.len());
                groups.push(UniqueSectionBuilder::new(course));
                groups.len() - 1
            }
        };
        groups[group].add(descriptor, section.number(), mask, section.occupancies())?;
    }

    log::trace!(
        "grouped {} sections of {} into {} unique sections",
        resolved.sections().len(),
        catalog.course_label(course),
        groups.len()
    );

    groups
        .into_iter()
        .map(|builder| builder.build().map(Arc::new))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{
        catalog::{CatalogBuilder, ClassPeriod, CourseBuilder, DepartmentBuilder, SectionBuilder},
        mask::{BitVecDayMask, WordDayMask},
        time::TimeInterval,
        weekday::Weekday,
    };

    fn period(days: &str, start: &str, end: &str) -> ClassPeriod {
        ClassPeriod::parse(days, start, end, "lec").unwrap()
    }

    fn span(start: &str, end: &str) -> TimeInterval {
        TimeInterval::new(start.parse().unwrap(), end.parse().unwrap()).unwrap()
    }

    fn section(number: &str, id: u32, days: &str, start: &str, end: &str) -> crate::catalog::Section {
        SectionBuilder::new(number, id)
            .period(period(days, start, end))
            .build()
    }

    /// Sections 10 and 03 share a timetable, 02 meets at another time.
    fn catalog() -> Catalog {
        let course = CourseBuilder::new("2200", "Data Structures")
            .section(section("10", 210, "mon,wed", "10:00AM", "11:20AM"))
            .section(section("02", 202, "tu,th", "10:00AM", "11:20AM"))
            .section(section("03", 203, "mon,wed", "10:00AM", "11:20AM"))
            .build()
            .unwrap();
        let other = CourseBuilder::new("1010", "Calculus I")
            .section(section("01", 101, "mon,wed", "10:00AM", "11:20AM"))
            .build()
            .unwrap();
        CatalogBuilder::new()
            .department(
                DepartmentBuilder::new("CSCI", "Computer Science")
                    .course(course)
                    .build()
                    .unwrap(),
            )
            .department(
                DepartmentBuilder::new("MATH", "Mathematics")
                    .course(other)
                    .build()
                    .unwrap(),
            )
            .build()
            .unwrap()
    }

    fn groups_in_listing_order<M: DayMask>() {
        let catalog = catalog();
        let grid = TimeGrid::new(30).unwrap();
        let course = catalog.require_course("csci", "2200").unwrap();
        let groups = group_unique_sections::<M>(&catalog, course, &grid).unwrap();

        assert_eq!(groups.len(), 2);
        assert_eq!(
            groups[0].members(),
            &[course.section(0.into()), course.section(2.into())]
        );
        assert_eq!(groups[0].lowest_number(), "03");
        assert_eq!(groups[1].members(), &[course.section(1.into())]);
        assert_eq!(groups[0].week_mask().days_with_class(), 2);
        assert!(groups[0].week_mask().fits_into(groups[1].week_mask()).unwrap());
        assert_eq!(groups[0].periods().len(), 2);
        assert_eq!(groups[0].periods()[0].day, Weekday::Monday);
    }

    #[test]
    fn test_group_unique_sections_both_representations() {
        groups_in_listing_order::<WordDayMask>();
        groups_in_listing_order::<BitVecDayMask>();
    }

    #[test]
    fn test_admitted_sections_drop_time_off_and_exclusions() {
        let catalog = catalog();
        let grid = TimeGrid::new(30).unwrap();
        let course = catalog.require_course("CSCI", "2200").unwrap();

        // Excluding 10 leaves 03 alone in the Monday group.
        let mut filter = SectionFilter::<WordDayMask>::new(&grid).unwrap();
        filter.exclude(catalog.require_section(course, 210).unwrap());
        let groups = group_admitted_sections(&catalog, course, &grid, &filter).unwrap();
        assert_eq!(groups.len(), 2);
        assert_eq!(groups[0].members(), &[course.section(2.into())]);
        assert_eq!(groups[0].lowest_number(), "03");

        // Tuesday morning off removes 02.
        filter
            .block(&grid, "tue".parse().unwrap(), &span("10:30AM", "11:00AM"))
            .unwrap();
        let groups = group_admitted_sections(&catalog, course, &grid, &filter).unwrap();
        assert_eq!(groups.len(), 1);
        assert_eq!(groups[0].members(), &[course.section(2.into())]);

        // Monday morning off removes the rest.
        filter
            .block(&grid, "mon".parse().unwrap(), &span("9:00AM", "10:30AM"))
            .unwrap();
        assert!(group_admitted_sections(&catalog, course, &grid, &filter)
            .unwrap()
            .is_empty());
    }

    #[test]
    fn test_unknown_course_is_reported() {
        let catalog = catalog();
        let grid = TimeGrid::new(30).unwrap();
        let bogus = CourseDescriptor::new(0.into(), 9.into());
        assert!(matches!(
            group_unique_sections::<WordDayMask>(&catalog, bogus, &grid),
            Err(ModelError::UnknownCourse { .. })
        ));
    }

    #[test]
    fn test_resolve_checks_membership() {
        let catalog = catalog();
        let grid = TimeGrid::new(30).unwrap();
        let ds = catalog.require_course("CSCI", "2200").unwrap();
        let calc = catalog.require_course("MATH", "1010").unwrap();

        let same = [ds.section(0.into()), ds.section(2.into())];
        let unique = UniqueSection::<WordDayMask>::resolve(&catalog, &grid, &same).unwrap();
        assert_eq!(unique.len(), 2);
        assert!(unique.contains(ds.section(2.into())));

        let differing = [ds.section(0.into()), ds.section(1.into())];
        assert_eq!(
            UniqueSection::<WordDayMask>::resolve(&catalog, &grid, &differing),
            Err(ModelError::MaskMismatch {
                section: ds.section(1.into())
            })
        );

        let mixed = [ds.section(0.into()), calc.section(0.into())];
        assert!(matches!(
            UniqueSection::<WordDayMask>::resolve(&catalog, &grid, &mixed),
            Err(ModelError::CourseMismatch { .. })
        ));

        assert_eq!(
            UniqueSection::<WordDayMask>::resolve(&catalog, &grid, &[]),
            Err(ModelError::EmptyUniqueSection)
        );
    }

    #[test]
    fn test_empty_builder_fails() {
        let course = CourseDescriptor::new(0.into(), 0.into());
        assert_eq!(
            UniqueSectionBuilder::<WordDayMask>::new(course).build(),
            Err(ModelError::EmptyUniqueSection)
        );
    }

    #[test]
    fn test_lowest_number_orders_numerically() {
        let course = CourseDescriptor::new(0.into(), 0.into());
        let mask = WeekMask::<WordDayMask>::with_capacity(48).unwrap();
        let mut builder = UniqueSectionBuilder::new(course);
        builder
            .add(course.section(0.into()), "10", mask.clone(), std::iter::empty())
            .unwrap()
            .add(course.section(1.into()), "9", mask, std::iter::empty())
            .unwrap();
        assert_eq!(builder.build().unwrap().lowest_number(), "9");
    }
}
