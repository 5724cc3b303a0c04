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

//! # Depth-First Schedule Assembly
//!
//! `AssemblyEngine` enumerates every conflict-free schedule that can be built
//! from an ordered list of `Slot`s, one per wanted course. The search is a
//! depth-first walk over an explicit frame stack:
//!
//! - At slot `i` each candidate is tried in the order the slot lists it. A
//!   candidate that fits descends into slot `i + 1` with a clone of the
//!   partial schedule plus that candidate; one that does not counts as a
//!   conflict pruning.
//! - An optional slot opens a skip branch after all of its candidates.
//! - When every slot is consumed the partial schedule is emitted.
//!
//! Schedules therefore come out in the lexicographic order of (slot order,
//! candidate order, skip last), and two runs on the same input produce the
//! same sequence. No ranking is applied.
//!
//! Every loop iteration calls `on_step` on the monitor and asks it for a
//! `SearchCommand`. A result limit, a time limit and any caller-supplied
//! monitor can stop the search; the outcome is then `Truncated` unless no
//! untried branch was left.
//!
//! ## Example
//!
//! ```rust
//! use roster_engine::{engine::AssemblyEngineBuilder, slot::Slot};
//! use roster_model::{grid::TimeGrid, mask::BitVecDayMask};
//!
//! let grid = TimeGrid::default();
//! let engine = AssemblyEngineBuilder::new(&grid).with_max_results(10).build();
//! let slots: Vec<Slot<BitVecDayMask>> = Vec::new();
//!
//! // No slots: exactly one empty schedule.
//! let outcome = engine.assemble(&slots).unwrap();
//! assert_eq!(outcome.len(), 1);
//! assert!(outcome.is_complete());
//! ```

use crate::{
    slot::Slot,
    stack::{AssemblyStack, Branch, Frame},
};
use roster_model::{error::Result, grid::TimeGrid, mask::DayMask, schedule::Schedule};
use roster_search::{
    monitor::{
        composite::CompositeMonitor,
        no_op::NoOpMonitor,
        schedule_limit::ScheduleLimitMonitor,
        search_monitor::{SearchCommand, SearchMonitor},
        time_limit::TimeLimitMonitor,
    },
    result::{AssemblyOutcome, AssemblyStatus, TerminationReason},
    stats::AssemblyStatistics,
};
use std::{
    sync::{Arc, atomic::AtomicU64},
    time::{Duration, Instant},
};

/// The sequential schedule enumerator.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct AssemblyEngine {
    max_blocks: usize,
    max_results: Option<u64>,
    time_limit: Option<Duration>,
    clock_check_mask: u64,
}

impl AssemblyEngine {
    /// An unbounded engine for schedules on `grid`.
    #[inline]
    pub fn new(grid: &TimeGrid) -> Self {
        AssemblyEngineBuilder::new(grid).build()
    }

    #[inline]
    pub fn max_blocks(&self) -> usize {
        self.max_blocks
    }

    #[inline]
    pub fn max_results(&self) -> Option<u64> {
        self.max_results
    }

    #[inline]
    pub fn time_limit(&self) -> Option<Duration> {
        self.time_limit
    }

    #[inline]
    pub fn clock_check_mask(&self) -> u64 {
        self.clock_check_mask
    }

    /// Enumerates all schedules within the configured limits.
    ///
    /// # Errors
    ///
    /// `IncompatibleMask` if a candidate was compiled for a different block
    /// count than this engine's grid.
    #[inline]
    pub fn assemble<M>(&self, slots: &[Slot<M>]) -> Result<AssemblyOutcome<M>>
    where
        M: DayMask,
    {
        self.assemble_with_monitor(slots, &mut NoOpMonitor::new())
    }

    /// Like `assemble`, reporting to `monitor` and letting it stop the
    /// search.
    ///
    /// # Errors
    ///
    /// `IncompatibleMask` if a candidate was compiled for a different block
    /// count than this engine's grid.
    pub fn assemble_with_monitor<M, S>(
        &self,
        slots: &[Slot<M>],
        monitor: &mut S,
    ) -> Result<AssemblyOutcome<M>>
    where
        M: DayMask,
        S: SearchMonitor<M> + ?Sized,
    {
        let schedules_found = AtomicU64::new(0);
        let mut composite = CompositeMonitor::<M>::with_capacity(3);
        composite.add_monitor(monitor);
        if let Some(limit) = self.max_results {
            composite.add_monitor(ScheduleLimitMonitor::new(&schedules_found, limit));
        }
        if let Some(limit) = self.time_limit {
            composite.add_monitor(TimeLimitMonitor::with_clock_check_mask(
                limit,
                self.clock_check_mask,
            ));
        }

        let initial = Schedule::new(self.max_blocks)?;
        let mut outcome = assemble_from(initial, slots, 0, &mut composite)?;
        outcome.statistics.used_threads = 1;
        Ok(outcome)
    }
}

impl std::fmt::Display for AssemblyEngine {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "AssemblyEngine(blocks: {}", self.max_blocks)?;
        if let Some(limit) = self.max_results {
            write!(f, ", max results: {}", limit)?;
        }
        if let Some(limit) = self.time_limit {
            write!(f, ", time limit: {:?}", limit)?;
        }
        write!(f, ")")
    }
}

#[derive(Clone, Debug)]
pub struct AssemblyEngineBuilder {
    max_blocks: usize,
    max_results: Option<u64>,
    time_limit: Option<Duration>,
    clock_check_mask: u64,
}

impl AssemblyEngineBuilder {
    #[inline]
    pub fn new(grid: &TimeGrid) -> Self {
        Self {
            max_blocks: grid.max_blocks(),
            max_results: None,
            time_limit: None,
            clock_check_mask: TimeLimitMonitor::DEFAULT_CLOCK_CHECK_MASK,
        }
    }

    #[inline]
    pub fn with_max_results(mut self, limit: u64) -> Self {
        self.max_results = Some(limit);
        self
    }

    #[inline]
    pub fn with_time_limit(mut self, limit: Duration) -> Self {
        self.time_limit = Some(limit);
        self
    }

    #[inline]
    pub fn with_clock_check_mask(mut self, mask: u64) -> Self {
        self.clock_check_mask = mask;
        self
    }

    #[inline]
    pub fn build(self) -> AssemblyEngine {
        AssemblyEngine {
            max_blocks: self.max_blocks,
            max_results: self.max_results,
            time_limit: self.time_limit,
            clock_check_mask: self.clock_check_mask,
        }
    }
}

/// Runs the raw search from `initial` over `slots`, with no limits besides
/// what `monitor` enforces.
///
/// `depth_offset` is the number of slots already decided in `initial`; it
/// shifts the depths reported to the monitor and the statistics.
pub(crate) fn assemble_from<M, S>(
    initial: Schedule<M>,
    slots: &[Slot<M>],
    depth_offset: usize,
    monitor: &mut S,
) -> Result<AssemblyOutcome<M>>
where
    M: DayMask,
    S: SearchMonitor<M> + ?Sized,
{
    let max_blocks = initial.week_mask().max_blocks();
    for slot in slots {
        slot.check_capacity(max_blocks)?;
    }
    AssemblySession::new(slots, depth_offset, monitor).run(initial)
}

/// The state of one run of the search loop.
struct AssemblySession<'a, M, S>
where
    M: DayMask,
    S: SearchMonitor<M> + ?Sized,
{
    slots: &'a [Slot<M>],
    depth_offset: usize,
    monitor: &'a mut S,
    stack: AssemblyStack<M>,
    schedules: Vec<Schedule<M>>,
    stats: AssemblyStatistics,
    start_time: Instant,
}

impl<'a, M, S> AssemblySession<'a, M, S>
where
    M: DayMask,
    S: SearchMonitor<M> + ?Sized,
{
    #[inline]
    fn new(slots: &'a [Slot<M>], depth_offset: usize, monitor: &'a mut S) -> Self {
        Self {
            slots,
            depth_offset,
            monitor,
            stack: AssemblyStack::preallocated(slots.len()),
            schedules: Vec::new(),
            stats: AssemblyStatistics::default(),
            start_time: Instant::now(),
        }
    }

    fn run(mut self, initial: Schedule<M>) -> Result<AssemblyOutcome<M>> {
        log::debug!(
            "assembling schedules over {} slots ({} branches at the first slot)",
            self.slots.len(),
            self.slots.first().map_or(0, Slot::num_branches)
        );
        self.monitor.on_enter_search(self.slots.len());

        let termination_reason = if self.slots.is_empty() {
            self.emit_initial(initial)
        } else {
            self.stack.push_frame(Frame::new(0, initial));
            self.search_loop()?
        };

        self.stats.set_total_time(self.start_time.elapsed());
        self.monitor.on_exit_search(&self.stats);
        Ok(self.finalize_result(termination_reason))
    }

    fn search_loop(&mut self) -> Result<TerminationReason> {
        loop {
            self.stats.on_step();
            self.monitor.on_step(&self.stats);

            if self.stack.is_empty() {
                return Ok(TerminationReason::Exhausted);
            }

            if let SearchCommand::Terminate(msg) = self.monitor.search_command() {
                return Ok(if self.stack.has_pending(self.slots) {
                    TerminationReason::Aborted(msg)
                } else {
                    TerminationReason::Exhausted
                });
            }

            self.process_next_branch()?;
        }
    }

    /// With no slots left, `initial` itself is the only schedule. The monitor
    /// is asked first, so a zero result limit still yields nothing.
    fn emit_initial(&mut self, initial: Schedule<M>) -> TerminationReason {
        self.stats.on_step();
        self.monitor.on_step(&self.stats);
        match self.monitor.search_command() {
            SearchCommand::Terminate(msg) => TerminationReason::Aborted(msg),
            SearchCommand::Continue => {
                self.handle_complete_schedule(initial);
                TerminationReason::Exhausted
            }
        }
    }

    fn finalize_result(self, reason: TerminationReason) -> AssemblyOutcome<M> {
        match &reason {
            TerminationReason::Exhausted => log::debug!(
                "assembly exhausted after {:.2?}: {} schedules, {} nodes",
                self.stats.time_total,
                self.schedules.len(),
                self.stats.nodes_explored
            ),
            TerminationReason::Aborted(msg) => log::info!(
                "assembly truncated after {} schedules: {}",
                self.schedules.len(),
                msg
            ),
        }
        AssemblyOutcome::new(self.schedules, AssemblyStatus::from(reason), self.stats)
    }

    /// Takes the next branch of the top frame, or backtracks if it has none.
    fn process_next_branch(&mut self) -> Result<()> {
        let slots = self.slots;
        let Some(frame) = self.stack.top_mut() else {
            return Ok(());
        };
        let index = frame.slot();

        let child = match frame.advance(&slots[index]) {
            Branch::Take(candidate) => {
                if frame.partial().can_add(candidate)? {
                    let mut child = frame.partial().clone();
                    child.add_section(Arc::clone(candidate))?;
                    Some(child)
                } else {
                    None
                }
            }
            Branch::Skip => {
                self.stats.on_skip();
                Some(frame.partial().clone())
            }
            Branch::Exhausted => {
                self.backtrack_step();
                return Ok(());
            }
        };

        match child {
            Some(child) => self.descend(index + 1, child),
            None => {
                self.stats.on_conflict();
                self.monitor
                    .on_conflict(index + self.depth_offset, &self.stats);
            }
        }
        Ok(())
    }

    #[inline]
    fn backtrack_step(&mut self) {
        self.stack.pop_frame();
        self.stats.on_backtrack();
        self.monitor
            .on_backtrack(self.stack.depth() + self.depth_offset, &self.stats);
    }

    /// Enters the level after `next_slot - 1` with `partial` decided so far.
    #[inline]
    fn descend(&mut self, next_slot: usize, partial: Schedule<M>) {
        let depth = next_slot + self.depth_offset;
        self.stats.on_node_explored();
        self.stats.on_depth_update(depth as u64);
        self.monitor.on_descend(depth, &self.stats);

        if next_slot == self.slots.len() {
            self.handle_complete_schedule(partial);
        } else {
            self.stack.push_frame(Frame::new(next_slot, partial));
        }
    }

    #[inline]
    fn handle_complete_schedule(&mut self, schedule: Schedule<M>) {
        self.stats.on_schedule_found();
        self.monitor.on_schedule_found(&schedule, &self.stats);
        self.schedules.push(schedule);
    }
}
