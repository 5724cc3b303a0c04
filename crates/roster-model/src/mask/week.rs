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

//! Seven day masks, Monday through Sunday.

use super::DayMask;
use crate::{
    error::{ModelError, Result},
    weekday::Weekday,
};

/// Weekly occupancy of one section or one (partial) schedule.
///
/// All seven components share the representation `M` and the same block
/// count, so the per-day operations never see mismatched masks from within
/// one week.
#[derive(Clone, PartialEq, Eq, Hash)]
pub struct WeekMask<M> {
    days: [M; 7],
}

impl<M> WeekMask<M>
where
    M: DayMask,
{
    /// An empty week with `max_blocks` blocks per day.
    ///
    /// # Errors
    ///
    /// `OutOfRange` if `M` cannot hold `max_blocks` blocks.
    pub fn with_capacity(max_blocks: usize) -> Result<Self> {
        let day = M::with_capacity(max_blocks)?;
        Ok(Self {
            days: std::array::from_fn(|_| day.clone()),
        })
    }

    /// Blocks per day.
    #[inline]
    pub fn max_blocks(&self) -> usize {
        self.days[0].max_blocks()
    }

    /// The mask of day `day`, where Monday is 0.
    ///
    /// # Errors
    ///
    /// `OutOfRange` if `day > 6`.
    #[inline]
    pub fn day_mask(&self, day: usize) -> Result<&M> {
        self.days
            .get(day)
            .ok_or_else(|| ModelError::out_of_range("weekday", day, 0, Weekday::COUNT - 1))
    }

    #[inline]
    pub fn day(&self, day: Weekday) -> &M {
        &self.days[day.index()]
    }

    #[inline]
    pub fn day_mut(&mut self, day: Weekday) -> &mut M {
        &mut self.days[day.index()]
    }

    /// Returns `true` if no day of `self` overlaps the same day of `other`.
    ///
    /// # Errors
    ///
    /// `IncompatibleMask` if the block counts differ.
    pub fn fits_into(&self, other: &Self) -> Result<bool> {
        for (mine, theirs) in self.days.iter().zip(other.days.iter()) {
            if !mine.fits_into(theirs)? {
                return Ok(false);
            }
        }
        Ok(true)
    }

    /// Merges `other` into `self`, day by day.
    ///
    /// # Errors
    ///
    /// `IncompatibleMask` if the block counts differ. `self` is left
    /// untouched in that case.
    pub fn merge(&mut self, other: &Self) -> Result<()> {
        super::check_compatible(self.max_blocks(), other.max_blocks())?;
        for (mine, theirs) in self.days.iter_mut().zip(other.days.iter()) {
            mine.merge(theirs)?;
        }
        Ok(())
    }

    /// Occupied blocks over the whole week.
    #[inline]
    pub fn time_block_sum(&self) -> usize {
        self.days.iter().map(DayMask::time_block_sum).sum()
    }

    /// Occupied blocks per day, indexed by weekday.
    #[inline]
    pub fn block_sums(&self) -> [usize; 7] {
        std::array::from_fn(|i| self.days[i].time_block_sum())
    }

    /// Number of days with at least one occupied block.
    #[inline]
    pub fn days_with_class(&self) -> usize {
        self.days.iter().filter(|d| !d.is_empty()).count()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.days.iter().all(DayMask::is_empty)
    }

    /// The days paired with their masks, Monday first.
    #[inline]
    pub fn iter(&self) -> impl Iterator<Item = (Weekday, &M)> {
        Weekday::ALL.into_iter().zip(self.days.iter())
    }
}

impl<M> std::fmt::Debug for WeekMask<M>
where
    M: DayMask,
{
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let mut map = f.debug_map();
        for (day, mask) in self.iter() {
            if !mask.is_empty() {
                map.entry(&day, mask);
            }
        }
        map.finish()
    }
}

impl<M> std::fmt::Display for WeekMask<M>
where
    M: DayMask,
{
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "WeekMask(blocks: {}, days: {}, occupied: {})",
            self.max_blocks(),
            self.days_with_class(),
            self.time_block_sum()
        )
    }
}
