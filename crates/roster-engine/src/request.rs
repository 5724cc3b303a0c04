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

//! Course lists resolved against a catalog and assembled in one call.
//!
//! A request may also block time off and exclude sections by registration
//! id; those are applied before grouping, and the report says which
//! courses were left without a usable section.
//!
//! The mask representation is picked at run time from the configured grid
//! through `MaskKind::dispatch`; results come back as `SavedSchedule`s so
//! the caller never names a mask type.

use crate::{config::AssemblyConfig, config::ConfigError, slot::narrow_courses};
use roster_model::{
    catalog::Catalog,
    grid::TimeGrid,
    mask::{DayMask, MaskVisitor},
    narrow::{NarrowReport, SectionFilter},
    saved::SavedSchedule,
    time::{Time, TimeInterval},
    weekday::WeekdaySet,
};
use roster_search::{result::AssemblyStatus, stats::AssemblyStatistics};

/// One wanted course, by department abbreviation and course number.
#[derive(Clone, PartialEq, Eq, Debug, serde::Serialize, serde::Deserialize)]
pub struct CourseRequest {
    pub department: String,
    pub course: String,
    #[serde(default)]
    pub optional: bool,
    /// Registration ids of sections to leave out.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub excluded: Vec<u32>,
}

impl CourseRequest {
    pub fn new(department: impl Into<String>, course: impl Into<String>) -> Self {
        Self {
            department: department.into(),
            course: course.into(),
            optional: false,
            excluded: Vec::new(),
        }
    }

    pub fn optional(mut self) -> Self {
        self.optional = true;
        self
    }

    pub fn excluding(mut self, id: u32) -> Self {
        self.excluded.push(id);
        self
    }
}

impl std::fmt::Display for CourseRequest {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} {}", self.department, self.course)?;
        if self.optional {
            write!(f, " (optional)")?;
        }
        Ok(())
    }
}

/// Time to keep free of class, e.g. `mon,wed` from `12:00PM` to `1:00PM`.
#[derive(Clone, PartialEq, Eq, Debug, serde::Serialize, serde::Deserialize)]
pub struct TimeOff {
    pub days: String,
    pub start: String,
    pub end: String,
}

impl TimeOff {
    pub fn new(days: impl Into<String>, start: impl Into<String>, end: impl Into<String>) -> Self {
        Self {
            days: days.into(),
            start: start.into(),
            end: end.into(),
        }
    }

    fn parse(&self) -> Result<(WeekdaySet, TimeInterval), ConfigError> {
        let days: WeekdaySet = self.days.parse()?;
        let interval = TimeInterval::new(self.start.parse::<Time>()?, self.end.parse::<Time>()?)?;
        Ok((days, interval))
    }
}

/// Courses in slot order, plus time off and the run configuration.
#[derive(Clone, PartialEq, Eq, Debug, Default, serde::Serialize, serde::Deserialize)]
#[serde(default)]
pub struct AssemblyRequest {
    pub courses: Vec<CourseRequest>,
    pub time_off: Vec<TimeOff>,
    pub config: AssemblyConfig,
}

impl AssemblyRequest {
    pub fn from_json(json: &str) -> Result<Self, ConfigError> {
        let request: Self = serde_json::from_str(json)?;
        request.config.validate()?;
        Ok(request)
    }

    /// Resolves the courses and enumerates the schedules.
    ///
    /// # Errors
    ///
    /// `UnknownDepartment` or `UnknownCourse` for a course that does not
    /// resolve, `UnknownSection` for an excluded id the course does not
    /// list. Malformed time off and configuration errors propagate.
    pub fn assemble(&self, catalog: &Catalog) -> Result<AssemblyReport, ConfigError> {
        let grid = self.config.grid()?;
        grid.mask_kind().dispatch(RequestVisitor {
            request: self,
            catalog,
            grid,
        })
    }
}

/// The mask-independent result of an `AssemblyRequest`.
#[derive(Clone, Debug)]
pub struct AssemblyReport {
    pub schedules: Vec<SavedSchedule>,
    pub status: AssemblyStatus,
    pub statistics: AssemblyStatistics,
    pub narrow: NarrowReport,
}

impl std::fmt::Display for AssemblyReport {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        writeln!(
            f,
            "Assembly Report: {} schedules ({})",
            self.schedules.len(),
            self.status
        )?;
        writeln!(f, "{}", self.narrow)?;
        write!(f, "{}", self.statistics)
    }
}

struct RequestVisitor<'a> {
    request: &'a AssemblyRequest,
    catalog: &'a Catalog,
    grid: TimeGrid,
}

impl MaskVisitor for RequestVisitor<'_> {
    type Output = Result<AssemblyReport, ConfigError>;

    fn visit<M: DayMask>(self) -> Self::Output {
        let mut filter = SectionFilter::<M>::new(&self.grid)?;
        for time_off in &self.request.time_off {
            let (days, interval) = time_off.parse()?;
            filter.block(&self.grid, days, &interval)?;
        }

        let mut courses = Vec::with_capacity(self.request.courses.len());
        for wanted in &self.request.courses {
            let course = self
                .catalog
                .require_course(&wanted.department, &wanted.course)?;
            for &id in &wanted.excluded {
                filter.exclude(self.catalog.require_section(course, id)?);
            }
            courses.push((course, wanted.optional));
        }
        let (slots, narrow) = narrow_courses(self.catalog, &self.grid, courses, &filter)?;

        let outcome = self.request.config.assembler()?.assemble(&slots)?;
        let schedules = outcome
            .schedules
            .iter()
            .map(|schedule| SavedSchedule::from_schedule(schedule, self.catalog))
            .collect::<Result<Vec<_>, _>>()?;

        Ok(AssemblyReport {
            schedules,
            status: outcome.status,
            statistics: outcome.statistics,
            narrow,
        })
    }
}
