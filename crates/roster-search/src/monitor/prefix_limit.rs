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

/// Result limit for one branch of a search split into ordered branches.
///
/// Every branch counts into its own entry of `counters`. Branch `index`
/// stops once branches `0..=index` hold `schedule_limit` schedules between
/// them, so the first `schedule_limit` schedules in branch order are always
/// found, no matter how the branches are scheduled on threads.
#[derive(Debug)]
pub struct PrefixLimitMonitor<'a> {
    counters: &'a [AtomicU64],
    index: usize,
    schedule_limit: u64,
}

impl<'a> PrefixLimitMonitor<'a> {
    /// # Panics
    ///
    /// Panics if `index` is not a valid index into `counters`.
    #[inline]
    pub fn new(counters: &'a [AtomicU64], index: usize, schedule_limit: u64) -> Self {
        assert!(
            index < counters.len(),
            "called `PrefixLimitMonitor::new` with branch index {} but only {} counters",
            index,
            counters.len()
        );
        Self {
            counters,
            index,
            schedule_limit,
        }
    }

    #[inline]
    pub fn index(&self) -> usize {
        self.index
    }

    #[inline]
    pub fn schedule_limit(&self) -> u64 {
        self.schedule_limit
    }

    /// Schedules found so far by this branch and every branch before it.
    #[inline]
    pub fn found_in_prefix(&self) -> u64 {
        self.counters[..=self.index]
            .iter()
            .map(|counter| counter.load(Ordering::Relaxed))
            .fold(0, u64::saturating_add)
    }
}

impl<'a, M> SearchMonitor<M> for PrefixLimitMonitor<'a>
where
    M: DayMask,
{
    fn name(&self) -> &str {
        "PrefixLimitMonitor"
    }

    fn on_schedule_found(&mut self, _schedule: &Schedule<M>, _statistics: &AssemblyStatistics) {
        self.counters[self.index].fetch_add(1, Ordering::Relaxed);
    }

    fn search_command(&self) -> SearchCommand {
        if self.found_in_prefix() >= self.schedule_limit {
            SearchCommand::Terminate("schedule limit reached".to_string())
        } else {
            SearchCommand::Continue
        }
    }
}

#[cfg(test)]
mod tests {
    use super::PrefixLimitMonitor;
    use crate::{
        monitor::search_monitor::{SearchCommand, SearchMonitor},
        stats::AssemblyStatistics,
    };
    use roster_model::{mask::WordDayMask, schedule::Schedule};
    use std::sync::atomic::{AtomicU64, Ordering};

    fn counters(n: usize) -> Vec<AtomicU64> {
        (0..n).map(|_| AtomicU64::new(0)).collect()
    }

    fn found(monitor: &mut PrefixLimitMonitor<'_>) {
        let schedule = Schedule::<WordDayMask>::new(48).unwrap();
        monitor.on_schedule_found(&schedule, &AssemblyStatistics::default());
    }

    fn stops(monitor: &PrefixLimitMonitor<'_>) -> bool {
        matches!(
            SearchMonitor::<WordDayMask>::search_command(monitor),
            SearchCommand::Terminate(_)
        )
    }

    #[test]
    fn test_branch_counts_into_its_own_counter() {
        let counters = counters(3);
        let mut monitor = PrefixLimitMonitor::new(&counters, 1, 5);
        found(&mut monitor);
        found(&mut monitor);
        assert_eq!(counters[0].load(Ordering::Relaxed), 0);
        assert_eq!(counters[1].load(Ordering::Relaxed), 2);
        assert_eq!(monitor.found_in_prefix(), 2);
        assert!(!stops(&monitor));
    }

    #[test]
    fn test_lower_branches_stop_higher_ones() {
        let counters = counters(3);
        let mut first = PrefixLimitMonitor::new(&counters, 0, 2);
        let last = PrefixLimitMonitor::new(&counters, 2, 2);
        found(&mut first);
        assert!(!stops(&last));
        found(&mut first);
        assert!(stops(&first));
        assert!(stops(&last));
    }

    #[test]
    fn test_higher_branches_never_stop_lower_ones() {
        let counters = counters(2);
        let first = PrefixLimitMonitor::new(&counters, 0, 2);
        let mut second = PrefixLimitMonitor::new(&counters, 1, 2);
        found(&mut second);
        found(&mut second);
        found(&mut second);
        assert!(stops(&second));
        assert!(!stops(&first));
        assert_eq!(first.found_in_prefix(), 0);
    }

    #[test]
    fn test_zero_limit_stops_every_branch() {
        let counters = counters(1);
        let monitor = PrefixLimitMonitor::new(&counters, 0, 0);
        assert!(stops(&monitor));
        assert_eq!(monitor.index(), 0);
        assert_eq!(monitor.schedule_limit(), 0);
    }

    #[test]
    #[should_panic(expected = "called `PrefixLimitMonitor::new` with branch index 2 but only 2 counters")]
    fn test_index_out_of_range_panics() {
        let counters = counters(2);
        let _ = PrefixLimitMonitor::new(&counters, 2, 1);
    }
}
