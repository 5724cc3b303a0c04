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

//! Periodic progress reporting through the `log` facade.
//!
//! Progress lines are written at `info` level. To keep the hot loop cheap the
//! clock is only consulted when `(steps & clock_check_mask) == 0`, and a
//! line is emitted at most once per `log_interval`.

use crate::{monitor::search_monitor::SearchMonitor, stats::AssemblyStatistics};
use roster_model::{mask::DayMask, schedule::Schedule};
use std::time::{Duration, Instant};

#[derive(Debug, Clone)]
pub struct LogMonitor {
    start_time: Instant,
    last_log_time: Instant,
    log_interval: Duration,
    clock_check_mask: u64,
    fewest_days: Option<usize>,
}

impl LogMonitor {
    pub fn new(log_interval: Duration, clock_check_mask: u64) -> Self {
        let now = Instant::now();
        Self {
            start_time: now,
            last_log_time: now,
            log_interval,
            clock_check_mask,
            fewest_days: None,
        }
    }

    #[inline]
    fn due(&self, statistics: &AssemblyStatistics) -> bool {
        (statistics.steps & self.clock_check_mask) == 0
            && self.last_log_time.elapsed() >= self.log_interval
    }

    fn log_line(&mut self, statistics: &AssemblyStatistics) {
        let now = Instant::now();
        let fewest_days = self
            .fewest_days
            .map_or_else(|| "-".to_string(), |d| d.to_string());
        log::info!(
            "{:.1}s | nodes {} | depth {} | schedules {} | conflicts {} | backtracks {} | fewest days {}",
            now.duration_since(self.start_time).as_secs_f32(),
            statistics.nodes_explored,
            statistics.max_depth,
            statistics.schedules_found,
            statistics.conflict_prunings,
            statistics.backtracks,
            fewest_days
        );
        self.last_log_time = now;
    }
}

impl Default for LogMonitor {
    fn default() -> Self {
        Self::new(Duration::from_secs(1), 4095)
    }
}

impl std::fmt::Display for LogMonitor {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "LogMonitor(log_interval: {}s, clock_check_mask: {})",
            self.log_interval.as_secs(),
            self.clock_check_mask
        )
    }
}

impl<M> SearchMonitor<M> for LogMonitor
where
    M: DayMask,
{
    fn name(&self) -> &str {
        "LogMonitor"
    }

    fn on_enter_search(&mut self, num_slots: usize) {
        self.start_time = Instant::now();
        self.last_log_time = self.start_time;
        self.fewest_days = None;
        log::info!("searching schedules over {} slots", num_slots);
    }

    fn on_step(&mut self, statistics: &AssemblyStatistics) {
        if self.due(statistics) {
            self.log_line(statistics);
        }
    }

    fn on_schedule_found(&mut self, schedule: &Schedule<M>, _statistics: &AssemblyStatistics) {
        let days = schedule.days_of_class();
        self.fewest_days = Some(self.fewest_days.map_or(days, |d| d.min(days)));
    }

    fn on_exit_search(&mut self, statistics: &AssemblyStatistics) {
        log::info!(
            "search finished after {:.2?}: {} schedules, {} nodes",
            self.start_time.elapsed(),
            statistics.schedules_found,
            statistics.nodes_explored
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use roster_model::mask::WordDayMask;

    #[test]
    fn test_due_respects_mask_and_interval() {
        let mut monitor = LogMonitor::new(Duration::ZERO, 0x3);
        let mut stats = AssemblyStatistics::default();
        stats.steps = 4;
        assert!(monitor.due(&stats));
        stats.steps = 5;
        assert!(!monitor.due(&stats));

        monitor.log_interval = Duration::from_secs(3600);
        stats.steps = 8;
        assert!(!monitor.due(&stats));
    }

    #[test]
    fn test_tracks_fewest_days() {
        let _ = env_logger::builder().is_test(true).try_init();
        let mut monitor = LogMonitor::default();
        SearchMonitor::<WordDayMask>::on_enter_search(&mut monitor, 2);
        let empty = Schedule::<WordDayMask>::new(48).unwrap();
        monitor.on_schedule_found(&empty, &AssemblyStatistics::default());
        assert_eq!(monitor.fewest_days, Some(0));
        SearchMonitor::<WordDayMask>::on_exit_search(&mut monitor, &AssemblyStatistics::default());
        assert_eq!(
            monitor.to_string(),
            "LogMonitor(log_interval: 1s, clock_check_mask: 4095)"
        );
    }
}
