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

use criterion::{BenchmarkId, Criterion, Throughput, criterion_group, criterion_main};
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;
use roster_core::math::interval::ClosedOpenInterval;
use roster_engine::{engine::AssemblyEngine, parallel::ParallelAssembler, slot::Slot};
use roster_model::{
    descriptor::CourseDescriptor,
    grid::TimeGrid,
    mask::{BitVecDayMask, DayMask, WeekMask, WordDayMask},
    unique::UniqueSectionBuilder,
    weekday::Weekday,
};
use std::hint::black_box;
use std::sync::Arc;

/// `courses` slots of `per_course` candidates, each meeting twice a week for
/// `length` blocks at a random time of the day.
fn random_slots<M: DayMask>(
    seed: u64,
    max_blocks: usize,
    courses: usize,
    per_course: usize,
    length: usize,
) -> Vec<Slot<M>> {
    let mut rng = ChaCha8Rng::seed_from_u64(seed);
    let first_block = max_blocks / 3;
    let last_block = max_blocks * 5 / 6 - length;
    (0..courses)
        .map(|course| {
            let course = CourseDescriptor::new(0.into(), course.into());
            let candidates = (0..per_course)
                .map(|section| {
                    let mut mask = WeekMask::<M>::with_capacity(max_blocks).unwrap();
                    let start = rng.random_range(first_block..last_block);
                    let day = rng.random_range(0..3);
                    for day in [day, day + 2] {
                        mask.day_mut(Weekday::from_index(day).unwrap())
                            .add_range(ClosedOpenInterval::new(start, start + length))
                            .unwrap();
                    }
                    let mut builder = UniqueSectionBuilder::new(course);
                    builder
                        .add(course.section(section.into()), "01", mask, Vec::new())
                        .unwrap();
                    Arc::new(builder.build().unwrap())
                })
                .collect();
            Slot::new(candidates, false).unwrap()
        })
        .collect()
}

fn bench_sequential<M: DayMask>(c: &mut Criterion, name: &str, grid: TimeGrid, length: usize) {
    let mut group = c.benchmark_group(name);
    let engine = AssemblyEngine::new(&grid);

    for courses in [4, 5, 6] {
        let slots = random_slots::<M>(42, grid.max_blocks(), courses, 6, length);
        let found = engine.assemble(&slots).unwrap().len() as u64;
        group.throughput(Throughput::Elements(found.max(1)));
        group.bench_with_input(BenchmarkId::from_parameter(courses), &slots, |b, slots| {
            b.iter(|| engine.assemble(black_box(slots)).unwrap())
        });
    }
    group.finish();
}

fn bench_word_masks(c: &mut Criterion) {
    bench_sequential::<WordDayMask>(c, "assemble_word_30min", TimeGrid::new(30).unwrap(), 3);
}

fn bench_bitvec_masks(c: &mut Criterion) {
    bench_sequential::<BitVecDayMask>(c, "assemble_bitvec_5min", TimeGrid::default(), 15);
}

fn bench_parallel(c: &mut Criterion) {
    let grid = TimeGrid::new(30).unwrap();
    let slots = random_slots::<WordDayMask>(7, grid.max_blocks(), 6, 8, 3);
    let mut group = c.benchmark_group("assemble_parallel");
    for threads in [1, 2, 4] {
        let assembler = ParallelAssembler::new(AssemblyEngine::new(&grid), threads);
        group.bench_with_input(BenchmarkId::from_parameter(threads), &slots, |b, slots| {
            b.iter(|| assembler.assemble(black_box(slots)).unwrap())
        });
    }
    group.finish();
}

criterion_group!(benches, bench_word_masks, bench_bitvec_masks, bench_parallel);
criterion_main!(benches);
