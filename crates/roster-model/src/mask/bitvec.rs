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

//! Arbitrary-length day mask backed by `FixedBitSet`.

use super::{DayMask, MaskKind, check_block, check_compatible, check_range};
use crate::error::Result;
use fixedbitset::FixedBitSet;
use roster_core::math::interval::ClosedOpenInterval;

/// A `DayMask` for any number of blocks.
#[derive(Clone, PartialEq, Eq, Hash)]
pub struct BitVecDayMask {
    bits: FixedBitSet,
}

impl BitVecDayMask {
    /// The underlying bit set.
    #[inline]
    pub fn as_bitset(&self) -> &FixedBitSet {
        &self.bits
    }
}

impl DayMask for BitVecDayMask {
    const KIND: MaskKind = MaskKind::BitVec;

    #[inline]
    fn with_capacity(max_blocks: usize) -> Result<Self> {
        Ok(Self {
            bits: FixedBitSet::with_capacity(max_blocks),
        })
    }

    #[inline]
    fn max_blocks(&self) -> usize {
        self.bits.len()
    }

    #[inline]
    fn is_on(&self, block: usize) -> Result<bool> {
        check_block(block, self.max_blocks())?;
        Ok(self.bits.contains(block))
    }

    #[inline]
    fn add(&mut self, block: usize) -> Result<bool> {
        check_block(block, self.max_blocks())?;
        Ok(self.bits.put(block))
    }

    #[inline]
    fn delete(&mut self, block: usize) -> Result<bool> {
        check_block(block, self.max_blocks())?;
        let was = self.bits.contains(block);
        self.bits.set(block, false);
        Ok(was)
    }

    fn fill(&mut self) -> bool {
        let changed = self.bits.count_ones(..) != self.max_blocks();
        self.bits.insert_range(..);
        changed
    }

    fn clear(&mut self) -> bool {
        let changed = !self.bits.is_clear();
        self.bits.clear();
        changed
    }

    #[inline]
    fn fits_into(&self, other: &Self) -> Result<bool> {
        check_compatible(self.max_blocks(), other.max_blocks())?;
        Ok(self.bits.is_disjoint(&other.bits))
    }

    #[inline]
    fn merge(&mut self, other: &Self) -> Result<()> {
        check_compatible(self.max_blocks(), other.max_blocks())?;
        self.bits.union_with(&other.bits);
        Ok(())
    }

    #[inline]
    fn time_block_sum(&self) -> usize {
        self.bits.count_ones(..)
    }

    fn add_range(&mut self, blocks: ClosedOpenInterval<usize>) -> Result<()> {
        check_range(blocks, self.max_blocks())?;
        self.bits.insert_range(std::ops::Range::from(blocks));
        Ok(())
    }

    fn iter_on(&self) -> impl Iterator<Item = usize> + '_ {
        self.bits.ones()
    }

    #[inline]
    fn is_empty(&self) -> bool {
        self.bits.is_clear()
    }
}

impl std::fmt::Debug for BitVecDayMask {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "BitVecDayMask({} of {} blocks)",
            self.time_block_sum(),
            self.max_blocks()
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_five_minute_grid() {
        let mut mask = BitVecDayMask::with_capacity(288).unwrap();
        // 9:00AM-9:50AM on a 5 minute grid.
        mask.add_range(ClosedOpenInterval::new(108, 118)).unwrap();
        assert_eq!(mask.time_block_sum(), 10);
        assert!(mask.is_on(108).unwrap());
        assert!(!mask.is_on(118).unwrap());
        assert!(mask.is_on(288).is_err());
    }

    #[test]
    fn test_fill_and_clear_report_changes() {
        let mut mask = BitVecDayMask::with_capacity(100).unwrap();
        mask.add(99).unwrap();
        assert!(mask.fill());
        assert_eq!(mask.time_block_sum(), 100);
        assert!(!mask.fill());
        assert!(mask.clear());
        assert!(!mask.clear());
    }

    #[test]
    fn test_zero_capacity_mask() {
        let mut mask = BitVecDayMask::with_capacity(0).unwrap();
        assert!(!mask.fill());
        assert!(!mask.clear());
        assert!(mask.is_on(0).is_err());
    }

    #[test]
    fn test_equality_ignores_history() {
        let mut a = BitVecDayMask::with_capacity(200).unwrap();
        let mut b = BitVecDayMask::with_capacity(200).unwrap();
        a.add(150).unwrap();
        a.add(3).unwrap();
        a.delete(3).unwrap();
        b.add(150).unwrap();
        assert_eq!(a, b);
    }
}
