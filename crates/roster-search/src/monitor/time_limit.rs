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

//! # Time Limit Monitor
//!
//! Enforces a wall-clock budget. The clock is read only on steps where
//! `(steps & clock_check_mask) == 0`; the default mask `0xFF` reads it every
//! 256 steps. Once the budget is spent, `search_command` returns
//! `Terminate("time limit reached")`.
//!
//! ```rust
//! use roster_model::mask::WordDayMask;
//! use roster_search::monitor::search_monitor::{SearchCommand, SearchMonitor};
//! use roster_search::monitor::time_limit::TimeLimitMonitor;
//! use roster_search::stats::AssemblyStatistics;
//! use std::time::Duration;
//!
//! let mut monitor = TimeLimitMonitor::new(Duration::from_secs(5));
//! SearchMonitor::<WordDayMask>::on_step(&mut monitor, &AssemblyStatistics::default());
//! assert_eq!(
//!     SearchMonitor::<WordDayMask>::search_command(&monitor),
//!     SearchCommand::Continue
//! );
//! ```

use crate::{
    monitor::search_monitor::{SearchCommand, SearchMonitor},
    stats::AssemblyStatistics,
};
use roster_model::mask::DayMask;
use std::time::{Duration, Instant};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TimeLimitMonitor {
    clock_check_mask: u64,
    steps: u64,
    time_limit: Duration,
    start_time: Instant,
}

impl TimeLimitMonitor {
    /// Check every 256 steps.
    pub const DEFAULT_CLOCK_CHECK_MASK: u64 = 0xFF;

    #[inline]
    pub fn new(time_limit: Duration) -> Self {
        Self::with_clock_check_mask(time_limit, Self::DEFAULT_CLOCK_CHECK_MASK)
    }

    #[inline]
    pub fn with_clock_check_mask(time_limit: Duration, clock_check_mask: u64) -> Self {
        Self {
            clock_check_mask,
            steps: 0,
            time_limit,
            start_time: Instant::now(),
        }
    }

    #[inline]
    pub fn time_limit(&self) -> Duration {
        self.time_limit
    }
}

impl<M> SearchMonitor<M> for TimeLimitMonitor
where
    M: DayMask,
{
    fn name(&self) -> &str {
        "TimeLimitMonitor"
    }

    fn on_enter_search(&mut self, _num_slots: usize) {
        self.start_time = Instant::now();
        self.steps = 0;
    }

    #[inline(always)]
    fn on_step(&mut self, _statistics: &AssemblyStatistics) {
        self.steps = self.steps.wrapping_add(1);
    }

    #[inline(always)]
    fn search_command(&self) -> SearchCommand {
        if (self.steps & self.clock_check_mask) == 0 && self.start_time.elapsed() >= self.time_limit
        {
            return SearchCommand::Terminate("time limit reached".to_string());
        }
        SearchCommand::Continue
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use roster_model::mask::WordDayMask;

    fn command(monitor: &TimeLimitMonitor) -> SearchCommand {
        SearchMonitor::<WordDayMask>::search_command(monitor)
    }

    #[test]
    fn test_terminates_once_budget_is_spent_at_a_check_point() {
        let mut monitor = TimeLimitMonitor::new(Duration::from_millis(10));
        monitor.start_time = Instant::now() - Duration::from_millis(50);
        monitor.steps = 0;
        match command(&monitor) {
            SearchCommand::Terminate(msg) => assert_eq!(msg, "time limit reached"),
            other => panic!("expected Terminate, got {:?}", other),
        }
    }

    #[test]
    fn test_skips_clock_between_check_points() {
        let mut monitor = TimeLimitMonitor::new(Duration::from_millis(1));
        monitor.start_time = Instant::now() - Duration::from_millis(50);
        monitor.steps = 1;
        assert_eq!(command(&monitor), SearchCommand::Continue);
        monitor.steps = 256;
        assert!(matches!(command(&monitor), SearchCommand::Terminate(_)));
    }

    #[test]
    fn test_zero_mask_checks_every_step() {
        let mut monitor =
            TimeLimitMonitor::with_clock_check_mask(Duration::from_millis(1), 0);
        monitor.start_time = Instant::now() - Duration::from_millis(50);
        monitor.steps = 12345;
        assert!(matches!(command(&monitor), SearchCommand::Terminate(_)));
    }

    #[test]
    fn test_continues_within_budget() {
        let monitor = TimeLimitMonitor::new(Duration::from_secs(3600));
        assert_eq!(command(&monitor), SearchCommand::Continue);
    }

    #[test]
    fn test_enter_search_restarts_the_clock() {
        let mut monitor = TimeLimitMonitor::with_clock_check_mask(Duration::from_secs(1), 0);
        monitor.start_time = Instant::now() - Duration::from_secs(5);
        monitor.steps = 99;
        SearchMonitor::<WordDayMask>::on_enter_search(&mut monitor, 3);
        assert_eq!(monitor.steps, 0);
        assert_eq!(command(&monitor), SearchCommand::Continue);
    }

    #[test]
    fn test_on_step_wraps() {
        let mut monitor = TimeLimitMonitor::new(Duration::from_secs(1));
        monitor.steps = u64::MAX;
        SearchMonitor::<WordDayMask>::on_step(&mut monitor, &AssemblyStatistics::default());
        assert_eq!(monitor.steps, 0);
    }
}
