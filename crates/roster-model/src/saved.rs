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

//! Catalog-independent snapshots of a schedule.
//!
//! A `SavedSchedule` names sections by department abbreviation, course
//! number and section id, so it survives a catalog reload. Restoring
//! resolves each entry against the live catalog and drops entries that no
//! longer resolve or no longer fit.

use crate::{
    catalog::Catalog,
    error::{ModelError, Result},
    grid::TimeGrid,
    mask::DayMask,
    schedule::Schedule,
    unique::UniqueSection,
};
use serde::{Deserialize, Serialize};
use std::sync::Arc;

/// One unique section of a saved schedule.
#[derive(Clone, PartialEq, Eq, Hash, Debug, Serialize, Deserialize)]
pub struct SavedEntry {
    pub department: String,
    pub course: String,
    /// Section ids of the grouped sections.
    pub sections: Vec<u32>,
}

impl std::fmt::Display for SavedEntry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} {} {:?}", self.department, self.course, self.sections)
    }
}

/// A schedule in catalog-independent form.
#[derive(Clone, PartialEq, Eq, Debug, Default, Serialize, Deserialize)]
pub struct SavedSchedule {
    pub entries: Vec<SavedEntry>,
}

/// The outcome of `SavedSchedule::restore`.
#[derive(Clone, Debug)]
pub struct RestoredSchedule<M: DayMask> {
    pub schedule: Schedule<M>,
    /// Entries that could not be restored.
    pub skipped: usize,
}

impl SavedSchedule {
    /// Captures the members of `schedule`.
    ///
    /// # Errors
    ///
    /// `UnknownCourse` or `UnknownSection` if a member does not resolve in
    /// `catalog`.
    pub fn from_schedule<M: DayMask>(schedule: &Schedule<M>, catalog: &Catalog) -> Result<Self> {
        let entries = schedule
            .members()
            .map(|member| Self::entry(member, catalog))
            .collect::<Result<Vec<_>>>()?;
        Ok(Self { entries })
    }

    fn entry<M: DayMask>(member: &UniqueSection<M>, catalog: &Catalog) -> Result<SavedEntry> {
        let descriptor = member.course();
        let unknown_course = || ModelError::UnknownCourse {
            department: descriptor.department().to_string(),
            course: descriptor.course().to_string(),
        };
        let department = catalog
            .department(descriptor.department())
            .ok_or_else(unknown_course)?;
        let course = catalog.course(descriptor).ok_or_else(unknown_course)?;
        let sections = member
            .members()
            .iter()
            .map(|&section| {
                catalog
                    .section(section)
                    .map(|s| s.id())
                    .ok_or_else(|| ModelError::UnknownSection {
                        course: catalog.course_label(descriptor),
                        id: section.section().get() as u32,
                    })
            })
            .collect::<Result<Vec<_>>>()?;
        Ok(SavedEntry {
            department: department.abbrev().to_string(),
            course: course.number().to_string(),
            sections,
        })
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Rebuilds the schedule against `catalog` on `grid`.
    ///
    /// Entries that no longer resolve, whose sections no longer share a
    /// timetable, or that conflict with an earlier entry are skipped and
    /// logged.
    ///
    /// # Errors
    ///
    /// `NothingRestored` if the save has entries but none could be
    /// restored. Errors creating the empty schedule propagate.
    pub fn restore<M: DayMask>(
        &self,
        catalog: &Catalog,
        grid: &TimeGrid,
    ) -> Result<RestoredSchedule<M>> {
        let mut schedule = Schedule::for_grid(grid)?;
        let mut skipped = 0;
        for entry in &self.entries {
            let restored = Self::resolve_entry::<M>(entry, catalog, grid)
                .and_then(|unique| schedule.add_section(Arc::new(unique)));
            if let Err(err) = restored {
                log::warn!("skipping saved entry {}: {}", entry, err);
                skipped += 1;
            }
        }

        if !self.entries.is_empty() && schedule.is_empty() {
            return Err(ModelError::NothingRestored { skipped });
        }
        Ok(RestoredSchedule { schedule, skipped })
    }

    fn resolve_entry<M: DayMask>(
        entry: &SavedEntry,
        catalog: &Catalog,
        grid: &TimeGrid,
    ) -> Result<UniqueSection<M>> {
        let course = catalog.require_course(&entry.department, &entry.course)?;
        let sections = entry
            .sections
            .iter()
            .map(|&id| catalog.require_section(course, id))
            .collect::<Result<Vec<_>>>()?;
        UniqueSection::resolve(catalog, grid, &sections)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{
        catalog::{CatalogBuilder, ClassPeriod, CourseBuilder, DepartmentBuilder, SectionBuilder},
        mask::{BitVecDayMask, WordDayMask},
        unique::group_unique_sections,
    };

    fn section(number: &str, id: u32, days: &str, start: &str, end: &str) -> crate::catalog::Section {
        SectionBuilder::new(number, id)
            .period(ClassPeriod::parse(days, start, end, "lec").unwrap())
            .build()
    }

    fn catalog() -> Catalog {
        CatalogBuilder::new()
            .department(
                DepartmentBuilder::new("CSCI", "Computer Science")
                    .course(
                        CourseBuilder::new("1100", "Computer Science I")
                            .section(section("01", 100, "mon,wed", "9:00AM", "9:50AM"))
                            .section(section("02", 101, "mon,wed", "9:00AM", "9:50AM"))
                            .section(section("03", 102, "tu,th", "9:00AM", "9:50AM"))
                            .build()
                            .unwrap(),
                    )
                    .build()
                    .unwrap(),
            )
            .department(
                DepartmentBuilder::new("MATH", "Mathematics")
                    .course(
                        CourseBuilder::new("1010", "Calculus I")
                            .section(section("01", 500, "mon,wed", "9:30AM", "10:20AM"))
                            .section(section("02", 501, "fri", "9:00AM", "9:50AM"))
                            .build()
                            .unwrap(),
                    )
                    .build()
                    .unwrap(),
            )
            .build()
            .unwrap()
    }

    fn entry(department: &str, course: &str, sections: &[u32]) -> SavedEntry {
        SavedEntry {
            department: department.to_string(),
            course: course.to_string(),
            sections: sections.to_vec(),
        }
    }

    #[test]
    fn test_capture_and_restore() {
        let catalog = catalog();
        let grid = TimeGrid::new(30).unwrap();
        let mut schedule = Schedule::<WordDayMask>::for_grid(&grid).unwrap();
        for course in catalog.course_descriptors() {
            let groups = group_unique_sections(&catalog, course, &grid).unwrap();
            let fitting = groups
                .into_iter()
                .find(|g| schedule.can_add(g).unwrap())
                .unwrap();
            schedule.add_section(fitting).unwrap();
        }

        let saved = SavedSchedule::from_schedule(&schedule, &catalog).unwrap();
        assert_eq!(
            saved.entries,
            vec![entry("CSCI", "1100", &[100, 101]), entry("MATH", "1010", &[501])]
        );

        let json = serde_json::to_string(&saved).unwrap();
        let loaded: SavedSchedule = serde_json::from_str(&json).unwrap();
        let restored = loaded.restore::<WordDayMask>(&catalog, &grid).unwrap();
        assert_eq!(restored.skipped, 0);
        assert_eq!(restored.schedule.week_mask(), schedule.week_mask());
    }

    #[test]
    fn test_restore_skips_stale_entries() {
        let _ = env_logger::builder().is_test(true).try_init();
        let catalog = catalog();
        let grid = TimeGrid::default();
        let saved = SavedSchedule {
            entries: vec![
                entry("csci", "1100", &[100]),
                // Overlaps CSCI 1100 on Monday.
                entry("MATH", "1010", &[500]),
                entry("PHYS", "1100", &[1]),
                entry("CSCI", "1100", &[999]),
                // 100 and 102 meet on different days.
                entry("CSCI", "1100", &[100, 102]),
                entry("MATH", "1010", &[]),
            ],
        };
        let restored = saved.restore::<BitVecDayMask>(&catalog, &grid).unwrap();
        assert_eq!(restored.schedule.len(), 1);
        assert_eq!(restored.skipped, 5);
    }

    #[test]
    fn test_restore_nothing_is_an_error() {
        let catalog = catalog();
        let grid = TimeGrid::default();
        let saved = SavedSchedule {
            entries: vec![entry("PHYS", "1100", &[1])],
        };
        assert_eq!(
            saved.restore::<BitVecDayMask>(&catalog, &grid).unwrap_err(),
            ModelError::NothingRestored { skipped: 1 }
        );

        let empty = SavedSchedule::default()
            .restore::<BitVecDayMask>(&catalog, &grid)
            .unwrap();
        assert!(empty.schedule.is_empty());
    }

    #[test]
    fn test_saved_schedule_json_shape() {
        let saved = SavedSchedule {
            entries: vec![entry("CSCI", "1100", &[100, 101])],
        };
        let value = serde_json::to_value(&saved).unwrap();
        assert_eq!(
            value,
            serde_json::json!({
                "entries": [{ "department": "CSCI", "course": "1100", "sections": [100, 101] }]
            })
        );
    }
}
