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

//! # Catalog Descriptors
//!
//! Descriptors are `Copy` coordinates into a `Catalog`. A unique section
//! or a schedule stores descriptors instead of cloned catalog records, and
//! resolves them through the catalog when names, credits or periods are
//! needed.

use crate::index::{CourseIndex, DepartmentIndex, SectionIndex};

/// Identifies one course: (department, course).
#[derive(Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Debug)]
pub struct CourseDescriptor {
    department: DepartmentIndex,
    course: CourseIndex,
}

impl CourseDescriptor {
    #[inline]
    pub const fn new(department: DepartmentIndex, course: CourseIndex) -> Self {
        Self { department, course }
    }

    #[inline]
    pub const fn department(&self) -> DepartmentIndex {
        self.department
    }

    #[inline]
    pub const fn course(&self) -> CourseIndex {
        self.course
    }

    /// The descriptor of section `section` of this course.
    #[inline]
    pub const fn section(&self, section: SectionIndex) -> SectionDescriptor {
        SectionDescriptor::new(self.department, self.course, section)
    }
}

impl std::fmt::Display for CourseDescriptor {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "course {}/{}", self.department.get(), self.course.get())
    }
}

/// Identifies one section: (department, course, section).
#[derive(Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Debug)]
pub struct SectionDescriptor {
    department: DepartmentIndex,
    course: CourseIndex,
    section: SectionIndex,
}

impl SectionDescriptor {
    #[inline]
    pub const fn new(
        department: DepartmentIndex,
        course: CourseIndex,
        section: SectionIndex,
    ) -> Self {
        Self {
            department,
            course,
            section,
        }
    }

    #[inline]
    pub const fn department(&self) -> DepartmentIndex {
        self.department
    }

    #[inline]
    pub const fn course(&self) -> CourseIndex {
        self.course
    }

    #[inline]
    pub const fn section(&self) -> SectionIndex {
        self.section
    }

    /// The course this section belongs to.
    #[inline]
    pub const fn course_descriptor(&self) -> CourseDescriptor {
        CourseDescriptor::new(self.department, self.course)
    }
}

impl std::fmt::Display for SectionDescriptor {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "section {}/{}/{}",
            self.department.get(),
            self.course.get(),
            self.section.get()
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_section_knows_its_course() {
        let course = CourseDescriptor::new(2.into(), 5.into());
        let section = course.section(1.into());
        assert_eq!(section.course_descriptor(), course);
        assert_eq!(section.section().get(), 1);
    }

    #[test]
    fn test_display() {
        let section = SectionDescriptor::new(0.into(), 3.into(), 1.into());
        assert_eq!(section.to_string(), "section 0/3/1");
        assert_eq!(section.course_descriptor().to_string(), "course 0/3");
    }

    #[test]
    fn test_ordering_is_lexicographic() {
        let a = SectionDescriptor::new(0.into(), 3.into(), 9.into());
        let b = SectionDescriptor::new(1.into(), 0.into(), 0.into());
        assert!(a < b);
    }
}
