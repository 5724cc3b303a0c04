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

use crate::slot::Slot;
use roster_model::{mask::DayMask, schedule::Schedule, unique::UniqueSection};
use std::sync::Arc;

/// The next branch a frame offers.
#[derive(Debug)]
pub(crate) enum Branch<'s, M: DayMask> {
    /// Add this candidate to the partial schedule.
    Take(&'s Arc<UniqueSection<M>>),
    /// Leave the optional slot empty.
    Skip,
    /// Every branch of the slot has been tried.
    Exhausted,
}

/// One decision level of the search: a slot and the partial schedule built
/// from the slots before it.
#[derive(Clone, Debug)]
pub(crate) struct Frame<M: DayMask> {
    slot: usize,
    next_candidate: usize,
    skip_taken: bool,
    partial: Schedule<M>,
}

impl<M> Frame<M>
where
    M: DayMask,
{
    #[inline]
    pub(crate) fn new(slot: usize, partial: Schedule<M>) -> Self {
        Self {
            slot,
            next_candidate: 0,
            skip_taken: false,
            partial,
        }
    }

    #[inline]
    pub(crate) fn slot(&self) -> usize {
        self.slot
    }

    #[inline]
    pub(crate) fn partial(&self) -> &Schedule<M> {
        &self.partial
    }

    /// Moves to the next branch. Candidates come first in slot order, the
    /// skip branch last.
    pub(crate) fn advance<'s>(&mut self, slot: &'s Slot<M>) -> Branch<'s, M> {
        debug_assert!(
            self.next_candidate <= slot.len(),
            "called `Frame::advance` with a slot of {} candidates, but the frame is at candidate {}",
            slot.len(),
            self.next_candidate
        );

        if let Some(candidate) = slot.candidate(self.next_candidate) {
            self.next_candidate += 1;
            return Branch::Take(candidate);
        }
        if slot.is_optional() && !self.skip_taken {
            self.skip_taken = true;
            return Branch::Skip;
        }
        Branch::Exhausted
    }

    /// Whether `advance` would still return a branch.
    #[inline]
    pub(crate) fn has_pending(&self, slot: &Slot<M>) -> bool {
        self.next_candidate < slot.len() || (slot.is_optional() && !self.skip_taken)
    }
}

/// A LIFO stack of frames, one per slot level currently open.
#[derive(Clone, Debug)]
pub(crate) struct AssemblyStack<M: DayMask> {
    frames: Vec<Frame<M>>,
}

impl<M> AssemblyStack<M>
where
    M: DayMask,
{
    #[inline]
    pub(crate) fn preallocated(num_slots: usize) -> Self {
        Self {
            frames: Vec::with_capacity(num_slots),
        }
    }

    #[inline]
    pub(crate) fn depth(&self) -> usize {
        self.frames.len()
    }

    #[inline]
    pub(crate) fn is_empty(&self) -> bool {
        self.frames.is_empty()
    }

    #[inline]
    pub(crate) fn push_frame(&mut self, frame: Frame<M>) {
        self.frames.push(frame);
    }

    #[inline]
    pub(crate) fn pop_frame(&mut self) -> Option<Frame<M>> {
        self.frames.pop()
    }

    #[inline]
    pub(crate) fn top_mut(&mut self) -> Option<&mut Frame<M>> {
        self.frames.last_mut()
    }

    /// Whether any open frame still has an untried branch.
    pub(crate) fn has_pending(&self, slots: &[Slot<M>]) -> bool {
        self.frames
            .iter()
            .any(|frame| slots.get(frame.slot).is_some_and(|slot| frame.has_pending(slot)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use roster_model::{
        descriptor::CourseDescriptor, mask::WordDayMask, mask::WeekMask,
        unique::UniqueSectionBuilder,
    };

    fn candidate(section: usize) -> Arc<UniqueSection<WordDayMask>> {
        let course = CourseDescriptor::new(0.into(), 0.into());
        let mask = WeekMask::<WordDayMask>::with_capacity(48).unwrap();
        let mut builder = UniqueSectionBuilder::new(course);
        builder
            .add(course.section(section.into()), "01", mask, Vec::new())
            .unwrap();
        Arc::new(builder.build().unwrap())
    }

    #[test]
    fn test_frame_offers_candidates_then_skip() {
        let slot = Slot::optional(vec![candidate(0), candidate(1)]).unwrap();
        let mut frame = Frame::new(0, Schedule::<WordDayMask>::new(48).unwrap());

        assert!(matches!(frame.advance(&slot), Branch::Take(c) if Arc::ptr_eq(c, &slot.candidates()[0])));
        assert!(matches!(frame.advance(&slot), Branch::Take(c) if Arc::ptr_eq(c, &slot.candidates()[1])));
        assert!(frame.has_pending(&slot));
        assert!(matches!(frame.advance(&slot), Branch::Skip));
        assert!(!frame.has_pending(&slot));
        assert!(matches!(frame.advance(&slot), Branch::Exhausted));
    }

    #[test]
    fn test_required_slot_has_no_skip() {
        let slot = Slot::required(vec![candidate(0)]).unwrap();
        let mut frame = Frame::new(0, Schedule::<WordDayMask>::new(48).unwrap());
        assert!(matches!(frame.advance(&slot), Branch::Take(_)));
        assert!(matches!(frame.advance(&slot), Branch::Exhausted));
    }

    #[test]
    fn test_stack_pending_tracks_open_frames() {
        let slots = vec![Slot::required(vec![candidate(0)]).unwrap()];
        let mut stack = AssemblyStack::preallocated(1);
        assert!(!stack.has_pending(&slots));

        stack.push_frame(Frame::new(0, Schedule::new(48).unwrap()));
        assert_eq!(stack.depth(), 1);
        assert!(stack.has_pending(&slots));

        let top = stack.top_mut().unwrap();
        assert!(matches!(top.advance(&slots[0]), Branch::Take(_)));
        assert!(!stack.has_pending(&slots));
        assert!(stack.pop_frame().is_some());
        assert!(stack.is_empty());
    }
}
