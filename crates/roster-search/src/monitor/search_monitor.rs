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

//! Search monitoring interface.
//!
//! Lifecycle: enter → step → {descend | conflict | backtrack} → schedule
//! found → exit. The engine asks `search_command` once per step, so a
//! monitor can stop the search between any two frame operations.
//!
//! Only `name` is required; every hook defaults to a no-op and
//! `search_command` defaults to `Continue`.

use crate::stats::AssemblyStatistics;
use roster_model::{mask::DayMask, schedule::Schedule};

#[derive(Clone, PartialEq, Eq, Debug, Default)]
pub enum SearchCommand {
    #[default]
    Continue,
    Terminate(String),
}

impl std::fmt::Display for SearchCommand {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            SearchCommand::Continue => write!(f, "Continue"),
            SearchCommand::Terminate(reason) => write!(f, "Terminate: {}", reason),
        }
    }
}

/// Observes and controls a schedule search.
pub trait SearchMonitor<M>
where
    M: DayMask,
{
    /// Returns the name of the monitor.
    fn name(&self) -> &str;

    /// Called once before the first step with the number of slots to fill.
    fn on_enter_search(&mut self, _num_slots: usize) {}

    /// Called once after the last step.
    fn on_exit_search(&mut self, _statistics: &AssemblyStatistics) {}

    /// Called at the start of every loop iteration.
    fn on_step(&mut self, _statistics: &AssemblyStatistics) {}

    /// Called after a candidate (or a skip) extends the partial schedule.
    /// `depth` is the number of slots decided so far.
    fn on_descend(&mut self, _depth: usize, _statistics: &AssemblyStatistics) {}

    /// Called when a candidate overlaps the partial schedule at `depth`.
    fn on_conflict(&mut self, _depth: usize, _statistics: &AssemblyStatistics) {}

    /// Called when the frame at `depth` has no alternatives left.
    fn on_backtrack(&mut self, _depth: usize, _statistics: &AssemblyStatistics) {}

    /// Called for every complete schedule, in emission order.
    fn on_schedule_found(&mut self, _schedule: &Schedule<M>, _statistics: &AssemblyStatistics) {}

    /// Asked once per step whether to keep going.
    fn search_command(&self) -> SearchCommand {
        SearchCommand::Continue
    }
}

impl<M, S> SearchMonitor<M> for &mut S
where
    M: DayMask,
    S: SearchMonitor<M> + ?Sized,
{
    fn name(&self) -> &str {
        (**self).name()
    }

    fn on_enter_search(&mut self, num_slots: usize) {
        (**self).on_enter_search(num_slots);
    }

    fn on_exit_search(&mut self, statistics: &AssemblyStatistics) {
        (**self).on_exit_search(statistics);
    }

    #[inline(always)]
    fn on_step(&mut self, statistics: &AssemblyStatistics) {
        (**self).on_step(statistics);
    }

    fn on_descend(&mut self, depth: usize, statistics: &AssemblyStatistics) {
        (**self).on_descend(depth, statistics);
    }

    fn on_conflict(&mut self, depth: usize, statistics: &AssemblyStatistics) {
        (**self).on_conflict(depth, statistics);
    }

    fn on_backtrack(&mut self, depth: usize, statistics: &AssemblyStatistics) {
        (**self).on_backtrack(depth, statistics);
    }

    fn on_schedule_found(&mut self, schedule: &Schedule<M>, statistics: &AssemblyStatistics) {
        (**self).on_schedule_found(schedule, statistics);
    }

    #[inline(always)]
    fn search_command(&self) -> SearchCommand {
        (**self).search_command()
    }
}

impl<M> std::fmt::Debug for dyn SearchMonitor<M> + '_
where
    M: DayMask,
{
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "SearchMonitor({})", self.name())
    }
}

impl<M> std::fmt::Display for dyn SearchMonitor<M> + '_
where
    M: DayMask,
{
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "SearchMonitor({})", self.name())
    }
}
