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

//! Single-word day mask.
//!
//! Every operation is one or two integer instructions. Blocks at or above
//! `max_blocks` are never set, so equality, hashing and population counts
//! only see the live part of the word.

use super::{DayMask, MaskKind, check_block, check_compatible, check_range};
use crate::error::{ModelError, Result};
use roster_core::math::interval::ClosedOpenInterval;

/// A `DayMask` backed by a `u64`, for days of at most 64 blocks.
#[derive(Clone, Copy, PartialEq, Eq, Hash)]
pub struct WordDayMask {
    bits: u64,
    max_blocks: u8,
}

impl WordDayMask {
    /// Largest block count a word mask can hold.
    pub const CAPACITY: usize = u64::BITS as usize;

    /// The bits that correspond to real blocks.
    #[inline]
    const fn live_bits(&self) -> u64 {
        Self::low_bits(self.max_blocks as usize)
    }

    #[inline]
    const fn low_bits(count: usize) -> u64 {
        if count >= Self::CAPACITY {
            u64::MAX
        } else {
            (1u64 << count) - 1
        }
    }

    /// The raw occupancy word, block 0 in the least significant bit.
    #[inline]
    pub const fn bits(&self) -> u64 {
        self.bits
    }
}

impl DayMask for WordDayMask {
    const KIND: MaskKind = MaskKind::Word;

    fn with_capacity(max_blocks: usize) -> Result<Self> {
        if max_blocks > Self::CAPACITY {
            return Err(ModelError::out_of_range(
                "word mask capacity",
                max_blocks,
                0,
                Self::CAPACITY,
            ));
        }
        Ok(Self {
            bits: 0,
            max_blocks: max_blocks as u8,
        })
    }

    #[inline]
    fn max_blocks(&self) -> usize {
        self.max_blocks as usize
    }

    #[inline]
    fn is_on(&self, block: usize) -> Result<bool> {
        check_block(block, self.max_blocks())?;
        Ok(self.bits & (1u64 << block) != 0)
    }

    #[inline]
    fn add(&mut self, block: usize) -> Result<bool> {
        check_block(block, self.max_blocks())?;
        let bit = 1u64 << block;
        let was = self.bits & bit != 0;
        self.bits |= bit;
        Ok(was)
    }

    #[inline]
    fn delete(&mut self, block: usize) -> Result<bool> {
        check_block(block, self.max_blocks())?;
        let bit = 1u64 << block;
        let was = self.bits & bit != 0;
        self.bits &= !bit;
        Ok(was)
    }

    #[inline]
    fn fill(&mut self) -> bool {
        let full = self.live_bits();
        let changed = self.bits != full;
        self.bits = full;
        changed
    }

    #[inline]
    fn clear(&mut self) -> bool {
        let changed = self.bits != 0;
        self.bits = 0;
        changed
    }

    #[inline]
    fn fits_into(&self, other: &Self) -> Result<bool> {
        check_compatible(self.max_blocks(), other.max_blocks())?;
        Ok(self.bits & other.bits == 0)
    }

    #[inline]
    fn merge(&mut self, other: &Self) -> Result<()> {
        check_compatible(self.max_blocks(), other.max_blocks())?;
        self.bits |= other.bits;
        Ok(())
    }

    #[inline]
    fn time_block_sum(&self) -> usize {
        self.bits.count_ones() as usize
    }

    fn add_range(&mut self, blocks: ClosedOpenInterval<usize>) -> Result<()> {
        check_range(blocks, self.max_blocks())?;
        let range = Self::low_bits(blocks.end()) & !Self::low_bits(blocks.start());
        self.bits |= range;
        Ok(())
    }

    fn iter_on(&self) -> impl Iterator<Item = usize> + '_ {
        let mut remaining = self.bits;
        std::iter::from_fn(move || {
            if remaining == 0 {
                return None;
            }
            let block = remaining.trailing_zeros() as usize;
            remaining &= remaining - 1;
            Some(block)
        })
    }

    #[inline]
    fn is_empty(&self) -> bool {
        self.bits == 0
    }
}

impl std::fmt::Debug for WordDayMask {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "WordDayMask({:0width$b})",
            self.bits,
            width = self.max_blocks()
        )
    }
}
