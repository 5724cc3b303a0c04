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

use crate::stats::AssemblyStatistics;
use roster_model::{mask::DayMask, schedule::Schedule};

/// Why a search loop stopped.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TerminationReason {
    /// Every branch was explored.
    Exhausted,
    /// A monitor stopped the search with work left. The string names the
    /// bound that was hit.
    Aborted(String),
}

impl std::fmt::Display for TerminationReason {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            TerminationReason::Exhausted => write!(f, "Exhausted"),
            TerminationReason::Aborted(reason) => write!(f, "Aborted: {}", reason),
        }
    }
}

/// Whether the returned schedules are all schedules there are.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AssemblyStatus {
    /// The search was exhaustive.
    Complete,
    /// A bound stopped the search early; more schedules may exist.
    Truncated(String),
}

impl From<TerminationReason> for AssemblyStatus {
    fn from(reason: TerminationReason) -> Self {
        match reason {
            TerminationReason::Exhausted => AssemblyStatus::Complete,
            TerminationReason::Aborted(reason) => AssemblyStatus::Truncated(reason),
        }
    }
}

impl std::fmt::Display for AssemblyStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            AssemblyStatus::Complete => write!(f, "Complete"),
            AssemblyStatus::Truncated(reason) => write!(f, "Truncated: {}", reason),
        }
    }
}

/// The schedules of one assembly run, in enumeration order.
#[derive(Debug, Clone)]
pub struct AssemblyOutcome<M: DayMask> {
    pub schedules: Vec<Schedule<M>>,
    pub status: AssemblyStatus,
    pub statistics: AssemblyStatistics,
}

impl<M> AssemblyOutcome<M>
where
    M: DayMask,
{
    #[inline]
    pub fn new(
        schedules: Vec<Schedule<M>>,
        status: AssemblyStatus,
        statistics: AssemblyStatistics,
    ) -> Self {
        Self {
            schedules,
            status,
            statistics,
        }
    }

    #[inline]
    pub fn is_complete(&self) -> bool {
        matches!(self.status, AssemblyStatus::Complete)
    }

    #[inline]
    pub fn is_truncated(&self) -> bool {
        matches!(self.status, AssemblyStatus::Truncated(_))
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.schedules.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.schedules.is_empty()
    }
}

impl<M> std::fmt::Display for AssemblyOutcome<M>
where
    M: DayMask,
{
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        writeln!(
            f,
            "Assembly Outcome: {} schedules ({})",
            self.schedules.len(),
            self.status
        )?;
        write!(f, "{}", self.statistics)
    }
}
