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

//! # Parallel Schedule Assembly
//!
//! `ParallelAssembler` splits the search at the first slot. Every branch of
//! slot 0 (each candidate, then the skip branch if the slot is optional) is
//! an independent subtree; branches are dealt round-robin to worker threads
//! spawned with `std::thread::scope`.
//!
//! - Each worker owns its partial schedules and builds a private monitor
//!   stack per branch: an `InterruptMonitor` on the shared stop flag, a
//!   `PrefixLimitMonitor` on the per-branch result counters and a
//!   `TimeLimitMonitor` holding whatever is left of the time budget.
//! - Results are merged in branch order, so an unbounded run returns the
//!   same sequence as `AssemblyEngine`.
//! - With a result limit a branch only stops once the branches before it
//!   and itself hold the limit between them. The merged list, cut to the
//!   limit, is then the prefix the sequential engine returns.

use crate::{
    engine::{AssemblyEngine, assemble_from},
    slot::Slot,
};
use roster_model::{error::Result, mask::DayMask, schedule::Schedule};
use roster_search::{
    monitor::{
        composite::CompositeMonitor, interrupt::InterruptMonitor,
        prefix_limit::PrefixLimitMonitor, time_limit::TimeLimitMonitor,
    },
    result::{AssemblyOutcome, AssemblyStatus},
    stats::AssemblyStatistics,
};
use std::{
    sync::{
        Arc,
        atomic::{AtomicBool, AtomicU64, Ordering},
    },
    time::Instant,
};

pub struct ParallelAssembler {
    engine: AssemblyEngine,
    threads: usize,
    /// Shared flag telling every worker to stop.
    stop_signal: AtomicBool,
}

impl ParallelAssembler {
    /// Creates an assembler running the limits of `engine` on up to
    /// `threads` workers.
    ///
    /// # Panics
    ///
    /// Panics if `threads` is zero.
    pub fn new(engine: AssemblyEngine, threads: usize) -> Self {
        assert!(
            threads > 0,
            "called `ParallelAssembler::new` with zero threads"
        );
        Self {
            engine,
            threads,
            stop_signal: AtomicBool::new(false),
        }
    }

    #[inline]
    pub fn engine(&self) -> &AssemblyEngine {
        &self.engine
    }

    #[inline]
    pub fn threads(&self) -> usize {
        self.threads
    }

    /// Asks a running `assemble` to stop. The flag is cleared when the next
    /// run starts.
    #[inline]
    pub fn interrupt(&self) {
        self.stop_signal.store(true, Ordering::Relaxed);
    }

    /// Enumerates all schedules within the engine's limits.
    ///
    /// # Errors
    ///
    /// `IncompatibleMask` if a candidate was compiled for a different block
    /// count than the engine's grid.
    pub fn assemble<M>(&self, slots: &[Slot<M>]) -> Result<AssemblyOutcome<M>>
    where
        M: DayMask,
    {
        let Some(first) = slots.first() else {
            return self.engine.assemble(slots);
        };
        if self.threads == 1 || first.num_branches() < 2 {
            return self.engine.assemble(slots);
        }

        let root = Schedule::new(self.engine.max_blocks())?;
        for slot in slots {
            slot.check_capacity(root.week_mask().max_blocks())?;
        }

        let start_time = Instant::now();
        self.stop_signal.store(false, Ordering::Relaxed);

        let workers = self.threads.min(first.num_branches());
        log::debug!(
            "assembling {} slots on {} threads ({} branches at the first slot)",
            slots.len(),
            workers,
            first.num_branches()
        );

        let branch_counts: Vec<AtomicU64> = (0..first.num_branches())
            .map(|_| AtomicU64::new(0))
            .collect();
        let mut branches =
            self.run_branches_parallel(&root, slots, &branch_counts, workers, start_time)?;
        branches.sort_by_key(|(index, _)| *index);
        Ok(self.construct_outcome(start_time, workers, branches))
    }

    /// Spawns the workers and collects `(branch index, outcome)` pairs.
    fn run_branches_parallel<M>(
        &self,
        root: &Schedule<M>,
        slots: &[Slot<M>],
        branch_counts: &[AtomicU64],
        workers: usize,
        start_time: Instant,
    ) -> Result<Vec<(usize, AssemblyOutcome<M>)>>
    where
        M: DayMask,
    {
        let first = &slots[0];
        let rest = &slots[1..];
        let num_branches = first.num_branches();
        let stop_signal = &self.stop_signal;
        let engine = &self.engine;

        let mut results = Vec::with_capacity(num_branches);
        std::thread::scope(|scope| {
            let handles: Vec<_> = (0..workers)
                .map(|worker| {
                    scope.spawn(move || -> Result<Vec<(usize, AssemblyOutcome<M>)>> {
                        let mut outcomes = Vec::new();
                        for index in (worker..num_branches).step_by(workers) {
                            let mut monitor = CompositeMonitor::<M>::with_capacity(3);
                            monitor.add_monitor(InterruptMonitor::new(stop_signal));
                            if let Some(limit) = engine.max_results() {
                                monitor.add_monitor(PrefixLimitMonitor::new(
                                    branch_counts,
                                    index,
                                    limit,
                                ));
                            }
                            if let Some(limit) = engine.time_limit() {
                                monitor.add_monitor(TimeLimitMonitor::with_clock_check_mask(
                                    limit.saturating_sub(start_time.elapsed()),
                                    engine.clock_check_mask(),
                                ));
                            }

                            match run_branch(root, first, rest, index, &mut monitor) {
                                Ok(outcome) => outcomes.push((index, outcome)),
                                Err(err) => {
                                    stop_signal.store(true, Ordering::Relaxed);
                                    return Err(err);
                                }
                            }
                        }
                        Ok(outcomes)
                    })
                })
                .collect();

            for handle in handles {
                let outcome = handle
                    .join()
                    .unwrap_or_else(|payload| std::panic::resume_unwind(payload));
                results.push(outcome);
            }
        });

        let mut merged = Vec::with_capacity(num_branches);
        for outcome in results {
            merged.extend(outcome?);
        }
        Ok(merged)
    }

    fn construct_outcome<M>(
        &self,
        start_time: Instant,
        workers: usize,
        branches: Vec<(usize, AssemblyOutcome<M>)>,
    ) -> AssemblyOutcome<M>
    where
        M: DayMask,
    {
        let mut statistics = AssemblyStatistics::default();
        let mut schedules = Vec::new();
        let mut abort_reason = None;
        for (_, outcome) in branches {
            statistics.absorb(&outcome.statistics);
            if abort_reason.is_none() {
                if let AssemblyStatus::Truncated(reason) = &outcome.status {
                    abort_reason = Some(reason.clone());
                }
            }
            schedules.extend(outcome.schedules);
        }

        if let Some(limit) = self.engine.max_results() {
            let limit = usize::try_from(limit).unwrap_or(usize::MAX);
            if schedules.len() > limit {
                schedules.truncate(limit);
                abort_reason.get_or_insert_with(|| "schedule limit reached".to_string());
            }
        }

        statistics.used_threads = workers;
        statistics.set_total_time(start_time.elapsed());

        let status = match abort_reason {
            Some(reason) => {
                log::info!(
                    "parallel assembly truncated after {} schedules: {}",
                    schedules.len(),
                    reason
                );
                AssemblyStatus::Truncated(reason)
            }
            None => {
                log::debug!(
                    "parallel assembly exhausted after {:.2?}: {} schedules",
                    statistics.time_total,
                    schedules.len()
                );
                AssemblyStatus::Complete
            }
        };
        AssemblyOutcome::new(schedules, status, statistics)
    }
}

impl std::fmt::Debug for ParallelAssembler {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ParallelAssembler")
            .field("engine", &self.engine)
            .field("threads", &self.threads)
            .field("stop_signal", &self.stop_signal.load(Ordering::Relaxed))
            .finish()
    }
}

impl std::fmt::Display for ParallelAssembler {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "ParallelAssembler({} on {} threads)", self.engine, self.threads)
    }
}

/// Searches the subtree below branch `index` of the first slot.
fn run_branch<M>(
    root: &Schedule<M>,
    first: &Slot<M>,
    rest: &[Slot<M>],
    index: usize,
    monitor: &mut CompositeMonitor<'_, M>,
) -> Result<AssemblyOutcome<M>>
where
    M: DayMask,
{
    let mut initial = root.clone();
    let skipped = match first.candidate(index) {
        Some(candidate) => {
            initial.add_section(Arc::clone(candidate))?;
            false
        }
        None => true,
    };

    let mut outcome = assemble_from(initial, rest, 1, monitor)?;
    outcome.statistics.on_node_explored();
    outcome.statistics.on_depth_update(1);
    if skipped {
        outcome.statistics.on_skip();
    }
    Ok(outcome)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::engine::AssemblyEngineBuilder;
    use roster_core::math::interval::ClosedOpenInterval;
    use roster_model::{
        descriptor::CourseDescriptor,
        grid::TimeGrid,
        mask::{BitVecDayMask, WeekMask, WordDayMask},
        unique::{UniqueSection, UniqueSectionBuilder},
        weekday::Weekday,
    };
    use rand::{Rng, SeedableRng};
    use rand_chacha::ChaCha8Rng;

    fn grid() -> TimeGrid {
        TimeGrid::new(30).unwrap()
    }

    fn candidate<M: DayMask>(
        course: usize,
        section: usize,
        day: Weekday,
        blocks: (usize, usize),
    ) -> Arc<UniqueSection<M>> {
        let course = CourseDescriptor::new(0.into(), course.into());
        let mut mask = WeekMask::<M>::with_capacity(48).unwrap();
        mask.day_mut(day)
            .add_range(ClosedOpenInterval::new(blocks.0, blocks.1))
            .unwrap();
        let mut builder = UniqueSectionBuilder::new(course);
        builder
            .add(course.section(section.into()), "01", mask, Vec::new())
            .unwrap();
        Arc::new(builder.build().unwrap())
    }

    /// `courses` slots of random two hour Monday to Friday candidates.
    fn random_slots<M: DayMask>(seed: u64, courses: usize, per_course: usize) -> Vec<Slot<M>> {
        let mut rng = ChaCha8Rng::seed_from_u64(seed);
        (0..courses)
            .map(|course| {
                let candidates = (0..per_course)
                    .map(|section| {
                        let day = Weekday::from_index(rng.random_range(0..5)).unwrap();
                        let start = rng.random_range(16..40);
                        candidate(course, section, day, (start, start + 4))
                    })
                    .collect();
                Slot::new(candidates, course % 2 == 1).unwrap()
            })
            .collect()
    }

    fn keys<M: DayMask>(outcome: &AssemblyOutcome<M>) -> Vec<Vec<(usize, usize)>> {
        outcome
            .schedules
            .iter()
            .map(|s| {
                s.members()
                    .map(|m| (m.course().course().get(), m.first().section().get()))
                    .collect()
            })
            .collect()
    }

    fn matches_sequential<M: DayMask>(seed: u64) {
        let slots = random_slots::<M>(seed, 5, 4);
        let engine = AssemblyEngine::new(&grid());
        let sequential = engine.assemble(&slots).unwrap();
        let parallel = ParallelAssembler::new(engine, 3).assemble(&slots).unwrap();

        assert!(parallel.is_complete());
        assert_eq!(keys(&parallel), keys(&sequential));
        assert_eq!(
            parallel.statistics.schedules_found,
            sequential.statistics.schedules_found
        );
        assert_eq!(parallel.statistics.used_threads, 3);
    }

    #[test]
    fn test_parallel_matches_sequential() {
        let _ = env_logger::builder().is_test(true).try_init();
        for seed in [1, 7, 42] {
            matches_sequential::<WordDayMask>(seed);
            matches_sequential::<BitVecDayMask>(seed);
        }
    }

    #[test]
    fn test_optional_first_slot_skip_branch_is_last() {
        let slots = vec![
            Slot::optional(vec![
                candidate::<WordDayMask>(0, 0, Weekday::Monday, (10, 12)),
                candidate::<WordDayMask>(0, 1, Weekday::Tuesday, (10, 12)),
            ])
            .unwrap(),
            Slot::required(vec![candidate::<WordDayMask>(1, 0, Weekday::Friday, (10, 12))])
                .unwrap(),
        ];
        let outcome = ParallelAssembler::new(AssemblyEngine::new(&grid()), 4)
            .assemble(&slots)
            .unwrap();

        assert_eq!(
            keys(&outcome),
            vec![vec![(0, 0), (1, 0)], vec![(0, 1), (1, 0)], vec![(1, 0)]]
        );
        assert_eq!(outcome.statistics.used_threads, 3);
        assert_eq!(outcome.statistics.skips_taken, 1);
    }

    #[test]
    fn test_result_limit_is_respected() {
        let slots = random_slots::<WordDayMask>(3, 4, 5);
        let engine = AssemblyEngine::new(&grid());
        let total = engine.assemble(&slots).unwrap().len();
        assert!(total > 3);

        let limited = AssemblyEngineBuilder::new(&grid()).with_max_results(3).build();
        let outcome = ParallelAssembler::new(limited, 2).assemble(&slots).unwrap();
        assert_eq!(outcome.len(), 3);
        assert!(outcome.is_truncated());
    }

    /// Branch 0 fills Monday to Wednesday, so every later slot first walks
    /// `conflicting` Monday candidates before reaching its free ones. Branch 1
    /// sits on Sunday and finds its schedules at once.
    fn slow_first_branch(conflicting: usize) -> Vec<Slot<WordDayMask>> {
        let mut busy = WeekMask::<WordDayMask>::with_capacity(48).unwrap();
        for day in [Weekday::Monday, Weekday::Tuesday, Weekday::Wednesday] {
            busy.day_mut(day)
                .add_range(ClosedOpenInterval::new(0, 48))
                .unwrap();
        }
        let course = CourseDescriptor::new(0.into(), 0.into());
        let mut builder = UniqueSectionBuilder::new(course);
        builder
            .add(course.section(0.into()), "01", busy, Vec::new())
            .unwrap();

        let mut slots = vec![
            Slot::required(vec![
                Arc::new(builder.build().unwrap()),
                candidate::<WordDayMask>(0, 1, Weekday::Sunday, (10, 12)),
            ])
            .unwrap(),
        ];
        for course in 1..=3 {
            let free = (4 * course, 4 * course + 2);
            let candidates = (0..conflicting)
                .map(|section| candidate::<WordDayMask>(course, section, Weekday::Monday, (10, 12)))
                .chain((0..10).map(|section| {
                    candidate(course, conflicting + section, Weekday::Thursday, free)
                }))
                .collect();
            slots.push(Slot::required(candidates).unwrap());
        }
        slots
    }

    #[test]
    fn test_bounded_parallel_run_keeps_sequential_prefix() {
        let slots = slow_first_branch(2000);
        let limited = AssemblyEngineBuilder::new(&grid()).with_max_results(5).build();
        let sequential = limited.assemble(&slots).unwrap();
        assert!(keys(&sequential).iter().all(|k| k[0] == (0, 0)));

        for threads in [2, 4] {
            let parallel = ParallelAssembler::new(limited.clone(), threads)
                .assemble(&slots)
                .unwrap();
            assert_eq!(keys(&parallel), keys(&sequential));
            assert!(parallel.is_truncated());
            assert!(sequential.is_truncated());
        }
    }

    #[test]
    fn test_bounded_parallel_run_fills_limit_across_branches() {
        let slots = random_slots::<WordDayMask>(11, 4, 4);
        let engine = AssemblyEngine::new(&grid());
        let total = engine.assemble(&slots).unwrap().len();
        assert!(total > 1);

        for limit in [1, total as u64 / 2, total as u64, total as u64 + 3] {
            let limited = AssemblyEngineBuilder::new(&grid())
                .with_max_results(limit)
                .build();
            let sequential = limited.assemble(&slots).unwrap();
            let parallel = ParallelAssembler::new(limited, 3).assemble(&slots).unwrap();
            assert_eq!(keys(&parallel), keys(&sequential), "limit {}", limit);
        }
    }

    #[test]
    fn test_single_thread_delegates_to_engine() {
        let slots = random_slots::<WordDayMask>(5, 3, 3);
        let engine = AssemblyEngine::new(&grid());
        let assembler = ParallelAssembler::new(engine.clone(), 1);
        let outcome = assembler.assemble(&slots).unwrap();
        assert_eq!(keys(&outcome), keys(&engine.assemble(&slots).unwrap()));
        assert_eq!(outcome.statistics.used_threads, 1);
        assert_eq!(assembler.threads(), 1);
    }

    #[test]
    fn test_zero_slots() {
        let outcome = ParallelAssembler::new(AssemblyEngine::new(&grid()), 4)
            .assemble::<WordDayMask>(&[])
            .unwrap();
        assert_eq!(outcome.len(), 1);
    }

    #[test]
    #[should_panic(expected = "called `ParallelAssembler::new` with zero threads")]
    fn test_zero_threads_panics() {
        let _ = ParallelAssembler::new(AssemblyEngine::new(&grid()), 0);
    }
}
