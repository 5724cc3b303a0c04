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

//! # Time Grid
//!
//! A `TimeGrid` splits the day into blocks of `block_minutes` minutes and
//! compiles class periods into week masks. A period occupies every block it
//! touches: `[start / len, ceil(end / len))`. Two periods can therefore only
//! share a block if at least one of them reaches into it, and a period that
//! ends exactly on a block boundary does not claim the next block.
//!
//! `GridConfig` is the serde-facing description of a grid. It can pin the
//! mask representation or leave it to `MaskKind::for_blocks`.

use crate::{
    catalog::{ClassPeriod, Section},
    error::{ModelError, Result},
    mask::{DayMask, MaskKind, WeekMask},
    time::{MINUTES_PER_DAY, Time, TimeInterval},
};
use roster_core::math::interval::ClosedOpenInterval;

/// Block length used when none is configured.
pub const DEFAULT_BLOCK_MINUTES: u16 = 5;

/// Fixed-width division of a day into occupancy blocks.
#[derive(Clone, Copy, PartialEq, Eq, Hash, Debug)]
pub struct TimeGrid {
    block_minutes: u16,
    mask_kind: MaskKind,
}

impl TimeGrid {
    /// Creates a grid, choosing the mask representation from the block count.
    ///
    /// # Errors
    ///
    /// `InvalidBlockLength` if `block_minutes` is zero or does not divide 1440.
    ///
    /// # Examples
    ///
    /// ```rust
    /// # use roster_model::grid::TimeGrid;
    /// # use roster_model::mask::MaskKind;
    /// let grid = TimeGrid::new(30).unwrap();
    /// assert_eq!(grid.max_blocks(), 48);
    /// assert_eq!(grid.mask_kind(), MaskKind::Word);
    /// assert!(TimeGrid::new(7).is_err());
    /// ```
    pub fn new(block_minutes: u16) -> Result<Self> {
        let max_blocks = Self::blocks_for(block_minutes)?;
        Ok(Self {
            block_minutes,
            mask_kind: MaskKind::for_blocks(max_blocks),
        })
    }

    /// Creates a grid with an explicit mask representation.
    ///
    /// # Errors
    ///
    /// `InvalidBlockLength` as for `new`, and `OutOfRange` if `mask_kind`
    /// cannot hold the resulting block count.
    pub fn with_mask_kind(block_minutes: u16, mask_kind: MaskKind) -> Result<Self> {
        let max_blocks = Self::blocks_for(block_minutes)?;
        if !mask_kind.supports(max_blocks) {
            return Err(ModelError::out_of_range(
                "blocks per day",
                max_blocks,
                0,
                crate::mask::WordDayMask::CAPACITY,
            ));
        }
        Ok(Self {
            block_minutes,
            mask_kind,
        })
    }

    fn blocks_for(block_minutes: u16) -> Result<usize> {
        if block_minutes == 0 || MINUTES_PER_DAY % block_minutes != 0 {
            return Err(ModelError::InvalidBlockLength(block_minutes));
        }
        Ok((MINUTES_PER_DAY / block_minutes) as usize)
    }

    #[inline]
    pub const fn block_minutes(&self) -> u16 {
        self.block_minutes
    }

    /// Number of blocks in a day.
    #[inline]
    pub const fn max_blocks(&self) -> usize {
        (MINUTES_PER_DAY / self.block_minutes) as usize
    }

    /// The mask representation this grid compiles into.
    #[inline]
    pub const fn mask_kind(&self) -> MaskKind {
        self.mask_kind
    }

    /// The blocks an interval occupies.
    #[inline]
    pub fn block_range(&self, interval: &TimeInterval) -> ClosedOpenInterval<usize> {
        let cells = interval.as_minutes().covering_cells(self.block_minutes);
        ClosedOpenInterval::new_unchecked(cells.start() as usize, cells.end() as usize)
    }

    /// The wall-clock start of `block`.
    ///
    /// # Errors
    ///
    /// `OutOfRange` if `block >= max_blocks`.
    pub fn block_start(&self, block: usize) -> Result<Time> {
        if block >= self.max_blocks() {
            return Err(ModelError::out_of_range(
                "block",
                block,
                0,
                self.max_blocks() - 1,
            ));
        }
        Time::from_minutes(block as u16 * self.block_minutes)
    }

    /// An empty week on this grid.
    ///
    /// # Errors
    ///
    /// `OutOfRange` if `M` cannot hold this grid's block count.
    #[inline]
    pub fn empty_week<M: DayMask>(&self) -> Result<WeekMask<M>> {
        WeekMask::with_capacity(self.max_blocks())
    }

    /// Compiles class periods into a week mask.
    pub fn compile<'a, M, I>(&self, periods: I) -> Result<WeekMask<M>>
    where
        M: DayMask,
        I: IntoIterator<Item = &'a ClassPeriod>,
    {
        let mut week = self.empty_week::<M>()?;
        for period in periods {
            let blocks = self.block_range(&period.interval());
            for day in period.days().iter() {
                week.day_mut(day).add_range(blocks)?;
            }
        }
        Ok(week)
    }

    /// The week mask of every period of `section`.
    #[inline]
    pub fn section_mask<M: DayMask>(&self, section: &Section) -> Result<WeekMask<M>> {
        self.compile(section.periods())
    }
}

impl Default for TimeGrid {
    fn default() -> Self {
        Self {
            block_minutes: DEFAULT_BLOCK_MINUTES,
            mask_kind: MaskKind::for_blocks((MINUTES_PER_DAY / DEFAULT_BLOCK_MINUTES) as usize),
        }
    }
}

impl std::fmt::Display for TimeGrid {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "TimeGrid({} min blocks, {} per day, {} masks)",
            self.block_minutes,
            self.max_blocks(),
            self.mask_kind
        )
    }
}

/// Serializable grid settings.
#[derive(Clone, Copy, PartialEq, Eq, Debug, serde::Serialize, serde::Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct GridConfig {
    /// Block length in minutes; must divide 1440.
    pub block_minutes: u16,
    /// Mask representation; chosen from the block count when absent.
    pub mask: Option<MaskKind>,
}

impl Default for GridConfig {
    fn default() -> Self {
        Self {
            block_minutes: DEFAULT_BLOCK_MINUTES,
            mask: None,
        }
    }
}

impl GridConfig {
    /// Validates the settings and builds the grid.
    pub fn build(&self) -> Result<TimeGrid> {
        match self.mask {
            Some(kind) => TimeGrid::with_mask_kind(self.block_minutes, kind),
            None => TimeGrid::new(self.block_minutes),
        }
    }
}
