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

use crate::{
    monitor::search_monitor::{SearchCommand, SearchMonitor},
    stats::AssemblyStatistics,
};
use roster_model::{mask::DayMask, schedule::Schedule};
use std::sync::atomic::{AtomicU64, Ordering};

/// Stops the search once `schedule_limit` schedules have been found.
///
/// The counter is shared, so several searches (e.g. the workers of a
/// parallel run) can draw on one global budget.
#[derive(Debug)]
pub struct ScheduleLimitMonitor<'a> {
    schedules_found: &'a AtomicU64,
    schedule_limit: u64,
}

impl<'a> ScheduleLimitMonitor<'a> {
    #[inline]
    pub fn new(schedules_found: &'a AtomicU64, schedule_limit: u64) -> Self {
        Self {
            schedules_found,
            schedule_limit,
        }
    }

    #[inline]
    pub fn schedule_limit(&self) -> u64 {
        self.schedule_limit
    }

    #[inline]
    fn reached_limit(&self) -> bool {
        self.schedules_found.load(Ordering::Relaxed) >= self.schedule_limit
    }
}

impl<'a, M> SearchMonitor<M> for ScheduleLimitMonitor<'a>
where
    M: DayMask,
{
    fn name(&self) -> &str {
        "ScheduleLimitMonitor"
    }

    fn on_schedule_found(&mut self, _schedule: &Schedule<M>, _statistics: &AssemblyStatistics) {
        self.schedules_found.fetch_add(1, Ordering::Relaxed);
    }

    fn search_command(&self) -> SearchCommand {
        if self.reached_limit() {
            SearchCommand::Terminate("schedule limit reached".to_string())
        } else {
            SearchCommand::Continue
        }
    }
}
