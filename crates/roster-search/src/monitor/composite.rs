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

/// Forwards every event to a list of monitors. The first monitor asking to
/// terminate wins.
pub struct CompositeMonitor<'a, M>
where
    M: DayMask,
{
    monitors: Vec<Box<dyn SearchMonitor<M> + 'a>>,
}

impl<'a, M> std::fmt::Debug for CompositeMonitor<'a, M>
where
    M: DayMask,
{
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CompositeMonitor")
            .field("monitors", &self.names().join(", "))
            .finish()
    }
}

impl<'a, M> std::fmt::Display for CompositeMonitor<'a, M>
where
    M: DayMask,
{
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "CompositeMonitor([{}])", self.names().join(", "))
    }
}

impl<'a, M> Default for CompositeMonitor<'a, M>
where
    M: DayMask,
{
    fn default() -> Self {
        Self::new()
    }
}

impl<'a, M> CompositeMonitor<'a, M>
where
    M: DayMask,
{
    #[inline]
    pub fn new() -> Self {
        Self {
            monitors: Vec::new(),
        }
    }

    #[inline]
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            monitors: Vec::with_capacity(capacity),
        }
    }

    #[inline]
    pub fn from_vec(monitors: Vec<Box<dyn SearchMonitor<M> + 'a>>) -> Self {
        Self { monitors }
    }

    #[inline]
    pub fn add_monitor<S>(&mut self, monitor: S)
    where
        S: SearchMonitor<M> + 'a,
    {
        self.monitors.push(Box::new(monitor));
    }

    #[inline]
    pub fn add_monitor_boxed(&mut self, monitor: Box<dyn SearchMonitor<M> + 'a>) {
        self.monitors.push(monitor);
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.monitors.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.monitors.is_empty()
    }

    fn names(&self) -> Vec<&str> {
        self.monitors.iter().map(|m| m.name()).collect()
    }
}

impl<'a, M> FromIterator<Box<dyn SearchMonitor<M> + 'a>> for CompositeMonitor<'a, M>
where
    M: DayMask,
{
    fn from_iter<I>(iter: I) -> Self
    where
        I: IntoIterator<Item = Box<dyn SearchMonitor<M> + 'a>>,
    {
        Self {
            monitors: iter.into_iter().collect(),
        }
    }
}

impl<'a, M> SearchMonitor<M> for CompositeMonitor<'a, M>
where
    M: DayMask,
{
    fn name(&self) -> &str {
        "CompositeMonitor"
    }

    fn on_enter_search(&mut self, num_slots: usize) {
        for monitor in &mut self.monitors {
            monitor.on_enter_search(num_slots);
        }
    }

    fn on_exit_search(&mut self, statistics: &AssemblyStatistics) {
        for monitor in &mut self.monitors {
            monitor.on_exit_search(statistics);
        }
    }

    fn on_step(&mut self, statistics: &AssemblyStatistics) {
        for monitor in &mut self.monitors {
            monitor.on_step(statistics);
        }
    }

    fn on_descend(&mut self, depth: usize, statistics: &AssemblyStatistics) {
        for monitor in &mut self.monitors {
            monitor.on_descend(depth, statistics);
        }
    }

    fn on_conflict(&mut self, depth: usize, statistics: &AssemblyStatistics) {
        for monitor in &mut self.monitors {
            monitor.on_conflict(depth, statistics);
        }
    }

    fn on_backtrack(&mut self, depth: usize, statistics: &AssemblyStatistics) {
        for monitor in &mut self.monitors {
            monitor.on_backtrack(depth, statistics);
        }
    }

    fn on_schedule_found(&mut self, schedule: &Schedule<M>, statistics: &AssemblyStatistics) {
        for monitor in &mut self.monitors {
            monitor.on_schedule_found(schedule, statistics);
        }
    }

    fn search_command(&self) -> SearchCommand {
        // Plain loop: this runs once per step.
        for monitor in &self.monitors {
            if let SearchCommand::Terminate(reason) = monitor.search_command() {
                return SearchCommand::Terminate(reason);
            }
        }
        SearchCommand::Continue
    }
}
