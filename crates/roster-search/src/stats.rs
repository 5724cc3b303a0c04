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

use std::time::Duration;

/// Counters collected while enumerating schedules.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct AssemblyStatistics {
    /// Iterations of the search loop.
    pub steps: u64,
    /// Partial or complete schedules created by a descent.
    pub nodes_explored: u64,
    /// Frames popped after their alternatives ran out.
    pub backtracks: u64,
    /// Candidates rejected because they overlap the partial schedule.
    pub conflict_prunings: u64,
    /// Optional slots left out.
    pub skips_taken: u64,
    /// The deepest slot level reached.
    pub max_depth: u64,
    /// Complete schedules emitted.
    pub schedules_found: u64,
    /// Worker threads that took part.
    pub used_threads: usize,
    /// Wall-clock time of the whole run.
    pub time_total: Duration,
}

impl AssemblyStatistics {
    #[inline]
    pub fn on_step(&mut self) {
        self.steps = self.steps.saturating_add(1);
    }

    #[inline]
    pub fn on_node_explored(&mut self) {
        self.nodes_explored = self.nodes_explored.saturating_add(1);
    }

    #[inline]
    pub fn on_backtrack(&mut self) {
        self.backtracks = self.backtracks.saturating_add(1);
    }

    #[inline]
    pub fn on_conflict(&mut self) {
        self.conflict_prunings = self.conflict_prunings.saturating_add(1);
    }

    #[inline]
    pub fn on_skip(&mut self) {
        self.skips_taken = self.skips_taken.saturating_add(1);
    }

    #[inline]
    pub fn on_schedule_found(&mut self) {
        self.schedules_found = self.schedules_found.saturating_add(1);
    }

    #[inline]
    pub fn on_depth_update(&mut self, depth: u64) {
        self.max_depth = self.max_depth.max(depth);
    }

    #[inline]
    pub fn set_total_time(&mut self, duration: Duration) {
        self.time_total = duration;
    }

    /// Adds the counters of another run, e.g. one worker of a parallel run.
    ///
    /// `time_total` and `used_threads` are left to the caller.
    pub fn absorb(&mut self, other: &AssemblyStatistics) {
        self.steps = self.steps.saturating_add(other.steps);
        self.nodes_explored = self.nodes_explored.saturating_add(other.nodes_explored);
        self.backtracks = self.backtracks.saturating_add(other.backtracks);
        self.conflict_prunings = self
            .conflict_prunings
            .saturating_add(other.conflict_prunings);
        self.skips_taken = self.skips_taken.saturating_add(other.skips_taken);
        self.schedules_found = self.schedules_found.saturating_add(other.schedules_found);
        self.max_depth = self.max_depth.max(other.max_depth);
    }
}

impl std::fmt::Display for AssemblyStatistics {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        writeln!(f, "Assembly Statistics:")?;
        writeln!(f, "  Steps:                {}", self.steps)?;
        writeln!(f, "  Nodes explored:       {}", self.nodes_explored)?;
        writeln!(f, "  Backtracks:           {}", self.backtracks)?;
        writeln!(f, "  Conflict prunings:    {}", self.conflict_prunings)?;
        writeln!(f, "  Skips taken:          {}", self.skips_taken)?;
        writeln!(f, "  Max depth reached:    {}", self.max_depth)?;
        writeln!(f, "  Schedules found:      {}", self.schedules_found)?;
        writeln!(f, "  Used threads:         {}", self.used_threads)?;
        writeln!(f, "  Total time:           {:.2?}", self.time_total)?;
        Ok(())
    }
}
