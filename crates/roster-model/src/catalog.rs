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

//! # Course Catalog
//!
//! The read-only catalog the assembler draws from: departments own courses,
//! courses own sections, and sections own the weekly class periods that
//! occupy time.
//!
//! ## Construction
//!
//! Catalog ingestion happens elsewhere; it hands its parsed records to the
//! builders in this module. Validation happens at the boundary:
//!
//! - `ClassPeriod::new` rejects an empty day set (inverted times were
//!   already rejected by `TimeInterval::new`).
//! - `CourseBuilder::build` rejects an inverted credit range and repeated
//!   section ids.
//! - `DepartmentBuilder::build` rejects repeated course numbers.
//! - `CatalogBuilder::build` rejects department abbreviations that collide
//!   ignoring case.
//!
//! Once built, a `Catalog` never changes. Everything downstream refers to it
//! through `CourseDescriptor` and `SectionDescriptor`.
//!
//! ## Example
//!
//! ```rust
//! use roster_model::catalog::{CatalogBuilder, ClassPeriod, CourseBuilder, DepartmentBuilder, PeriodKind, SectionBuilder};
//!
//! let lecture = ClassPeriod::parse("mon,wed,fri", "9:00AM", "9:50AM", "LEC").unwrap();
//! let section = SectionBuilder::new("01", 40112).seats(30).period(lecture).build();
//! let course = CourseBuilder::new("1100", "Computer Science I")
//!     .credits(4, 4)
//!     .section(section)
//!     .build()
//!     .unwrap();
//! let csci = DepartmentBuilder::new("CSCI", "Computer Science").course(course).build().unwrap();
//! let catalog = CatalogBuilder::new().department(csci).build().unwrap();
//!
//! let course = catalog.find_course("csci", "1100").unwrap();
//! assert_eq!(catalog.course(course).unwrap().name(), "Computer Science I");
//! ```

use crate::{
    descriptor::{CourseDescriptor, SectionDescriptor},
    error::{ModelError, Result},
    index::{CourseIndex, DepartmentIndex, SectionIndex},
    time::{Time, TimeInterval},
    weekday::{Weekday, WeekdaySet},
};
use rustc_hash::FxHashSet;

/// What kind of meeting a class period is.
#[derive(Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Debug, Default)]
pub enum PeriodKind {
    Lecture,
    Lab,
    Recitation,
    Studio,
    Seminar,
    IndependentStudy,
    #[default]
    Unknown,
}

impl PeriodKind {
    /// Short listing code, e.g. `"LEC"`. `Unknown` has the empty code.
    pub const fn code(self) -> &'static str {
        match self {
            PeriodKind::Lecture => "LEC",
            PeriodKind::Lab => "LAB",
            PeriodKind::Recitation => "REC",
            PeriodKind::Studio => "STU",
            PeriodKind::Seminar => "SEM",
            PeriodKind::IndependentStudy => "IND",
            PeriodKind::Unknown => "",
        }
    }

    /// Human readable name.
    pub const fn name(self) -> &'static str {
        match self {
            PeriodKind::Lecture => "lecture",
            PeriodKind::Lab => "lab",
            PeriodKind::Recitation => "recitation",
            PeriodKind::Studio => "studio",
            PeriodKind::Seminar => "seminar",
            PeriodKind::IndependentStudy => "independent study",
            PeriodKind::Unknown => "unknown",
        }
    }

    /// Resolves a listing code or name, ignoring case.
    ///
    /// Anything unrecognised is `Unknown`; an odd period type should not
    /// make the section unusable.
    ///
    /// ```rust
    /// # use roster_model::catalog::PeriodKind;
    /// assert_eq!(PeriodKind::parse("rec"), PeriodKind::Recitation);
    /// assert_eq!(PeriodKind::parse("ind-study"), PeriodKind::IndependentStudy);
    /// assert_eq!(PeriodKind::parse("clinic"), PeriodKind::Unknown);
    /// ```
    pub fn parse(text: &str) -> Self {
        match text.trim().to_ascii_lowercase().as_str() {
            "lec" | "lecture" => PeriodKind::Lecture,
            "lab" | "laboratory" => PeriodKind::Lab,
            "rec" | "recitation" => PeriodKind::Recitation,
            "stu" | "studio" => PeriodKind::Studio,
            "sem" | "seminar" => PeriodKind::Seminar,
            "ind" | "ind-study" | "independent study" => PeriodKind::IndependentStudy,
            _ => PeriodKind::Unknown,
        }
    }
}

impl std::fmt::Display for PeriodKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.name())
    }
}

/// How a course is graded.
#[derive(Clone, Copy, PartialEq, Eq, Hash, Debug, Default)]
pub enum GradeType {
    #[default]
    Normal,
    PassFail,
    NoGrade,
}

impl std::fmt::Display for GradeType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            GradeType::Normal => write!(f, "normal"),
            GradeType::PassFail => write!(f, "pass/fail"),
            GradeType::NoGrade => write!(f, "no grade"),
        }
    }
}

/// Credit hours a course may be taken for, `min..=max`.
#[derive(Clone, Copy, PartialEq, Eq, Hash, Debug, Default)]
pub struct CreditRange {
    min: u8,
    max: u8,
}

impl CreditRange {
    /// # Errors
    ///
    /// `InvalidCreditRange` if `min > max`.
    #[inline]
    pub fn new(min: u8, max: u8) -> Result<Self> {
        if min > max {
            return Err(ModelError::InvalidCreditRange { min, max });
        }
        Ok(Self { min, max })
    }

    #[inline]
    pub const fn fixed(credits: u8) -> Self {
        Self {
            min: credits,
            max: credits,
        }
    }

    #[inline]
    pub const fn min(&self) -> u8 {
        self.min
    }

    #[inline]
    pub const fn max(&self) -> u8 {
        self.max
    }

    #[inline]
    pub const fn is_fixed(&self) -> bool {
        self.min == self.max
    }
}

impl std::fmt::Display for CreditRange {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        if self.is_fixed() {
            write!(f, "{}", self.min)
        } else {
            write!(f, "{}-{}", self.min, self.max)
        }
    }
}

/// One weekday's slice of a class period.
#[derive(Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Debug)]
pub struct DailyOccupancy {
    pub day: Weekday,
    pub interval: TimeInterval,
}

/// A recurring weekly meeting of a section.
#[derive(Clone, PartialEq, Eq, Hash, Debug)]
pub struct ClassPeriod {
    days: WeekdaySet,
    interval: TimeInterval,
    kind: PeriodKind,
    instructor: Option<String>,
    location: Option<String>,
}

impl ClassPeriod {
    /// # Errors
    ///
    /// `EmptyDaySet` if `days` is empty.
    pub fn new(days: WeekdaySet, interval: TimeInterval, kind: PeriodKind) -> Result<Self> {
        if days.is_empty() {
            return Err(ModelError::EmptyDaySet(days.to_string()));
        }
        Ok(Self {
            days,
            interval,
            kind,
            instructor: None,
            location: None,
        })
    }

    /// Builds a period from listing text: a day list, two clock times and a
    /// period type.
    ///
    /// # Errors
    ///
    /// Any day-list or time parse error, `InvalidInterval` if the period
    /// ends before it starts, and `EmptyDaySet` for a blank day list.
    pub fn parse(days: &str, start: &str, end: &str, kind: &str) -> Result<Self> {
        let days: WeekdaySet = days.parse()?;
        let start: Time = start.parse()?;
        let end: Time = end.parse()?;
        Self::new(days, TimeInterval::new(start, end)?, PeriodKind::parse(kind))
    }

    pub fn with_instructor(mut self, instructor: impl Into<String>) -> Self {
        self.instructor = Some(instructor.into());
        self
    }

    pub fn with_location(mut self, location: impl Into<String>) -> Self {
        self.location = Some(location.into());
        self
    }

    #[inline]
    pub fn days(&self) -> WeekdaySet {
        self.days
    }

    #[inline]
    pub fn interval(&self) -> TimeInterval {
        self.interval
    }

    #[inline]
    pub fn kind(&self) -> PeriodKind {
        self.kind
    }

    #[inline]
    pub fn instructor(&self) -> Option<&str> {
        self.instructor.as_deref()
    }

    #[inline]
    pub fn location(&self) -> Option<&str> {
        self.location.as_deref()
    }

    /// The period expanded into one occupancy per meeting day.
    #[inline]
    pub fn occupancies(&self) -> impl Iterator<Item = DailyOccupancy> + '_ {
        self.days.iter().map(|day| DailyOccupancy {
            day,
            interval: self.interval,
        })
    }
}

impl std::fmt::Display for ClassPeriod {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} {} {}", self.kind.code(), self.days, self.interval)
    }
}

/// A section of a course.
#[derive(Clone, PartialEq, Eq, Debug)]
pub struct Section {
    number: String,
    id: u32,
    seats: u32,
    periods: Vec<ClassPeriod>,
    notes: Vec<String>,
}

impl Section {
    /// Display number such as `"01"`.
    #[inline]
    pub fn number(&self) -> &str {
        &self.number
    }

    /// Registration id, unique within the course.
    #[inline]
    pub fn id(&self) -> u32 {
        self.id
    }

    #[inline]
    pub fn seats(&self) -> u32 {
        self.seats
    }

    #[inline]
    pub fn periods(&self) -> &[ClassPeriod] {
        &self.periods
    }

    #[inline]
    pub fn notes(&self) -> &[String] {
        &self.notes
    }

    /// Every (weekday, interval) this section occupies.
    pub fn occupancies(&self) -> impl Iterator<Item = DailyOccupancy> + '_ {
        self.periods.iter().flat_map(ClassPeriod::occupancies)
    }
}

/// Builder for `Section`.
#[derive(Clone, Debug)]
pub struct SectionBuilder {
    number: String,
    id: u32,
    seats: u32,
    periods: Vec<ClassPeriod>,
    notes: Vec<String>,
}

impl SectionBuilder {
    pub fn new(number: impl Into<String>, id: u32) -> Self {
        Self {
            number: number.into(),
            id,
            seats: 0,
            periods: Vec::new(),
            notes: Vec::new(),
        }
    }

    #[inline]
    pub fn seats(mut self, seats: u32) -> Self {
        self.seats = seats;
        self
    }

    #[inline]
    pub fn period(mut self, period: ClassPeriod) -> Self {
        self.periods.push(period);
        self
    }

    #[inline]
    pub fn note(mut self, note: impl Into<String>) -> Self {
        self.notes.push(note.into());
        self
    }

    pub fn build(self) -> Section {
        Section {
            number: self.number,
            id: self.id,
            seats: self.seats,
            periods: self.periods,
            notes: self.notes,
        }
    }
}

/// A course and its sections.
#[derive(Clone, PartialEq, Eq, Debug)]
pub struct Course {
    number: String,
    name: String,
    credits: CreditRange,
    grade_type: GradeType,
    sections: Vec<Section>,
    notes: Vec<String>,
}

impl Course {
    #[inline]
    pub fn number(&self) -> &str {
        &self.number
    }

    #[inline]
    pub fn name(&self) -> &str {
        &self.name
    }

    #[inline]
    pub fn credits(&self) -> CreditRange {
        self.credits
    }

    #[inline]
    pub fn grade_type(&self) -> GradeType {
        self.grade_type
    }

    #[inline]
    pub fn sections(&self) -> &[Section] {
        &self.sections
    }

    #[inline]
    pub fn section(&self, index: SectionIndex) -> Option<&Section> {
        self.sections.get(index.get())
    }

    #[inline]
    pub fn notes(&self) -> &[String] {
        &self.notes
    }

    /// Position of the section with registration id `id`.
    pub fn find_section(&self, id: u32) -> Option<SectionIndex> {
        self.sections
            .iter()
            .position(|s| s.id == id)
            .map(SectionIndex::new)
    }
}

/// Builder for `Course`.
#[derive(Clone, Debug)]
pub struct CourseBuilder {
    number: String,
    name: String,
    credits: (u8, u8),
    grade_type: GradeType,
    sections: Vec<Section>,
    notes: Vec<String>,
}

impl CourseBuilder {
    pub fn new(number: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            number: number.into(),
            name: name.into(),
            credits: (0, 0),
            grade_type: GradeType::Normal,
            sections: Vec::new(),
            notes: Vec::new(),
        }
    }

    #[inline]
    pub fn credits(mut self, min: u8, max: u8) -> Self {
        self.credits = (min, max);
        self
    }

    #[inline]
    pub fn grade_type(mut self, grade_type: GradeType) -> Self {
        self.grade_type = grade_type;
        self
    }

    #[inline]
    pub fn section(mut self, section: Section) -> Self {
        self.sections.push(section);
        self
    }

    #[inline]
    pub fn note(mut self, note: impl Into<String>) -> Self {
        self.notes.push(note.into());
        self
    }

    /// # Errors
    ///
    /// `InvalidCreditRange` for an inverted credit range, `DuplicateSection`
    /// if two sections share a registration id.
    pub fn build(self) -> Result<Course> {
        let credits = CreditRange::new(self.credits.0, self.credits.1)?;
        let mut seen = FxHashSet::default();
        for section in &self.sections {
            if !seen.insert(section.id) {
                return Err(ModelError::DuplicateSection {
                    course: self.number,
                    id: section.id,
                });
            }
        }
        Ok(Course {
            number: self.number,
            name: self.name,
            credits,
            grade_type: self.grade_type,
            sections: self.sections,
            notes: self.notes,
        })
    }
}

/// A department and its courses.
#[derive(Clone, PartialEq, Eq, Debug)]
pub struct Department {
    abbrev: String,
    name: String,
    courses: Vec<Course>,
}

impl Department {
    /// Abbreviation such as `"CSCI"`.
    #[inline]
    pub fn abbrev(&self) -> &str {
        &self.abbrev
    }

    #[inline]
    pub fn name(&self) -> &str {
        &self.name
    }

    #[inline]
    pub fn courses(&self) -> &[Course] {
        &self.courses
    }

    #[inline]
    pub fn course(&self, index: CourseIndex) -> Option<&Course> {
        self.courses.get(index.get())
    }

    pub fn find_course(&self, number: &str) -> Option<CourseIndex> {
        self.courses
            .iter()
            .position(|c| c.number == number)
            .map(CourseIndex::new)
    }
}

/// Builder for `Department`.
#[derive(Clone, Debug)]
pub struct DepartmentBuilder {
    abbrev: String,
    name: String,
    courses: Vec<Course>,
}

impl DepartmentBuilder {
    pub fn new(abbrev: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            abbrev: abbrev.into(),
            name: name.into(),
            courses: Vec::new(),
        }
    }

    #[inline]
    pub fn course(mut self, course: Course) -> Self {
        self.courses.push(course);
        self
    }

    /// # Errors
    ///
    /// `DuplicateCourse` if two courses share a number.
    pub fn build(self) -> Result<Department> {
        let mut seen = FxHashSet::default();
        for course in &self.courses {
            if !seen.insert(course.number.as_str()) {
                return Err(ModelError::DuplicateCourse {
                    department: self.abbrev.clone(),
                    course: course.number.clone(),
                });
            }
        }
        Ok(Department {
            abbrev: self.abbrev,
            name: self.name,
            courses: self.courses,
        })
    }
}

/// An immutable collection of departments.
#[derive(Clone, PartialEq, Eq, Debug, Default)]
pub struct Catalog {
    departments: Vec<Department>,
}

impl Catalog {
    #[inline]
    pub fn departments(&self) -> &[Department] {
        &self.departments
    }

    #[inline]
    pub fn department(&self, index: DepartmentIndex) -> Option<&Department> {
        self.departments.get(index.get())
    }

    /// Looks a department up by abbreviation, ignoring case.
    pub fn find_department(&self, abbrev: &str) -> Option<DepartmentIndex> {
        self.departments
            .iter()
            .position(|d| d.abbrev.eq_ignore_ascii_case(abbrev))
            .map(DepartmentIndex::new)
    }

    pub fn find_course(&self, abbrev: &str, number: &str) -> Option<CourseDescriptor> {
        let department = self.find_department(abbrev)?;
        let course = self.departments[department.get()].find_course(number)?;
        Some(CourseDescriptor::new(department, course))
    }

    /// Like `find_course`, but says which part of the lookup failed.
    ///
    /// # Errors
    ///
    /// `UnknownDepartment` or `UnknownCourse`.
    pub fn require_course(&self, abbrev: &str, number: &str) -> Result<CourseDescriptor> {
        let department = self
            .find_department(abbrev)
            .ok_or_else(|| ModelError::UnknownDepartment(abbrev.to_string()))?;
        let course = self.departments[department.get()]
            .find_course(number)
            .ok_or_else(|| ModelError::UnknownCourse {
                department: abbrev.to_string(),
                course: number.to_string(),
            })?;
        Ok(CourseDescriptor::new(department, course))
    }

    /// Resolves a section of `course` by registration id.
    ///
    /// # Errors
    ///
    /// `UnknownCourse` if `course` does not resolve, `UnknownSection` if no
    /// section carries `id`.
    pub fn require_section(&self, course: CourseDescriptor, id: u32) -> Result<SectionDescriptor> {
        let resolved = self.course(course).ok_or_else(|| ModelError::UnknownCourse {
            department: course.department().to_string(),
            course: course.course().to_string(),
        })?;
        let section = resolved
            .find_section(id)
            .ok_or_else(|| ModelError::UnknownSection {
                course: self.course_label(course),
                id,
            })?;
        Ok(course.section(section))
    }

    #[inline]
    pub fn course(&self, descriptor: CourseDescriptor) -> Option<&Course> {
        self.department(descriptor.department())?
            .course(descriptor.course())
    }

    #[inline]
    pub fn section(&self, descriptor: SectionDescriptor) -> Option<&Section> {
        self.course(descriptor.course_descriptor())?
            .section(descriptor.section())
    }

    /// Every course in catalog order.
    pub fn course_descriptors(&self) -> impl Iterator<Item = CourseDescriptor> + '_ {
        self.departments
            .iter()
            .enumerate()
            .flat_map(|(d, department)| {
                (0..department.courses.len())
                    .map(move |c| CourseDescriptor::new(d.into(), c.into()))
            })
    }

    /// Every section of `course` in listing order.
    pub fn section_descriptors(
        &self,
        course: CourseDescriptor,
    ) -> impl Iterator<Item = SectionDescriptor> + '_ {
        let count = self.course(course).map_or(0, |c| c.sections.len());
        (0..count).map(move |s| course.section(s.into()))
    }

    /// `"CSCI 1100"`, or the raw descriptor if it does not resolve.
    pub fn course_label(&self, course: CourseDescriptor) -> String {
        match (self.department(course.department()), self.course(course)) {
            (Some(d), Some(c)) => format!("{} {}", d.abbrev, c.number),
            _ => course.to_string(),
        }
    }

    /// `"CSCI 1100-01"`, or the raw descriptor if it does not resolve.
    pub fn section_label(&self, section: SectionDescriptor) -> String {
        match self.section(section) {
            Some(s) => format!(
                "{}-{}",
                self.course_label(section.course_descriptor()),
                s.number
            ),
            None => section.to_string(),
        }
    }

    /// Total number of sections in the catalog.
    pub fn num_sections(&self) -> usize {
        self.departments
            .iter()
            .flat_map(|d| d.courses.iter())
            .map(|c| c.sections.len())
            .sum()
    }
}

impl std::fmt::Display for Catalog {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "Catalog(departments: {}, courses: {}, sections: {})",
            self.departments.len(),
            self.course_descriptors().count(),
            self.num_sections()
        )
    }
}

/// Builder for `Catalog`.
#[derive(Clone, Debug, Default)]
pub struct CatalogBuilder {
    departments: Vec<Department>,
}

impl CatalogBuilder {
    #[inline]
    pub fn new() -> Self {
        Self::default()
    }

    #[inline]
    pub fn department(mut self, department: Department) -> Self {
        self.departments.push(department);
        self
    }

    /// # Errors
    ///
    /// `DuplicateDepartment` if two abbreviations are equal ignoring case.
    pub fn build(self) -> Result<Catalog> {
        let mut seen = FxHashSet::default();
        for department in &self.departments {
            if !seen.insert(department.abbrev.to_ascii_uppercase()) {
                return Err(ModelError::DuplicateDepartment(department.abbrev.clone()));
            }
        }
        Ok(Catalog {
            departments: self.departments,
        })
    }
}
