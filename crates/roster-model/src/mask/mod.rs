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

//! # Occupancy Masks
//!
//! A day is divided into `max_blocks` equal blocks. A `DayMask` records
//! which blocks are occupied; a `WeekMask` holds one `DayMask` per weekday.
//! Conflict detection between two sections, or between a section and a
//! partial schedule, is a disjointness test on these masks.
//!
//! ## Representations
//!
//! - `WordDayMask`: a single `u64`, for grids of at most 64 blocks
//!   (e.g. 30 minute blocks).
//! - `BitVecDayMask`: a `FixedBitSet`, for any block count (e.g. the
//!   288 blocks of a 5 minute grid).
//!
//! Both implement the same `DayMask` contract and behave identically at any
//! block count they both support. Operations that combine two masks take
//! `&Self`, so mixing representations does not type-check. The only runtime
//! incompatibility left is a capacity mismatch, reported as
//! `IncompatibleMask`. The representation is picked once, by `MaskKind`.

pub mod bitvec;
pub mod week;
pub mod word;

use crate::error::{ModelError, Result};
use roster_core::math::interval::ClosedOpenInterval;

pub use bitvec::BitVecDayMask;
pub use week::WeekMask;
pub use word::WordDayMask;

/// The occupancy contract shared by every day-mask representation.
pub trait DayMask: Clone + PartialEq + Eq + std::hash::Hash + std::fmt::Debug + Send + Sync {
    /// The representation this type implements.
    const KIND: MaskKind;

    /// Creates an empty mask with `max_blocks` blocks.
    ///
    /// # Errors
    ///
    /// `OutOfRange` if the representation cannot hold `max_blocks` blocks.
    fn with_capacity(max_blocks: usize) -> Result<Self>;

    /// Number of blocks in the day.
    fn max_blocks(&self) -> usize;

    /// Whether `block` is occupied.
    ///
    /// # Errors
    ///
    /// `OutOfRange` if `block >= max_blocks`.
    fn is_on(&self, block: usize) -> Result<bool>;

    /// Occupies `block`, returning its previous state.
    fn add(&mut self, block: usize) -> Result<bool>;

    /// Frees `block`, returning its previous state.
    fn delete(&mut self, block: usize) -> Result<bool>;

    /// Occupies every block. Returns `true` if any block changed.
    fn fill(&mut self) -> bool;

    /// Frees every block. Returns `true` if any block changed.
    fn clear(&mut self) -> bool;

    /// Returns `true` if `self` and `other` share no occupied block.
    ///
    /// # Errors
    ///
    /// `IncompatibleMask` if the block counts differ.
    fn fits_into(&self, other: &Self) -> Result<bool>;

    /// Occupies every block that is occupied in `other`.
    ///
    /// # Errors
    ///
    /// `IncompatibleMask` if the block counts differ.
    fn merge(&mut self, other: &Self) -> Result<()>;

    /// Number of occupied blocks.
    fn time_block_sum(&self) -> usize;

    /// Occupies the half-open block range `blocks`.
    ///
    /// # Errors
    ///
    /// `OutOfRange` if the range extends past `max_blocks`.
    fn add_range(&mut self, blocks: ClosedOpenInterval<usize>) -> Result<()>;

    /// The occupied blocks in ascending order.
    fn iter_on(&self) -> impl Iterator<Item = usize> + '_;

    #[inline]
    fn is_empty(&self) -> bool {
        self.time_block_sum() == 0
    }
}

/// Selects a `DayMask` representation.
#[derive(Clone, Copy, PartialEq, Eq, Hash, Debug, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MaskKind {
    /// `WordDayMask`, at most 64 blocks.
    Word,
    /// `BitVecDayMask`, any block count.
    BitVec,
}

impl MaskKind {
    /// The cheapest representation that can hold `max_blocks` blocks.
    #[inline]
    pub const fn for_blocks(max_blocks: usize) -> Self {
        if max_blocks <= WordDayMask::CAPACITY {
            MaskKind::Word
        } else {
            MaskKind::BitVec
        }
    }

    /// Whether this representation can hold `max_blocks` blocks.
    #[inline]
    pub const fn supports(self, max_blocks: usize) -> bool {
        match self {
            MaskKind::Word => max_blocks <= WordDayMask::CAPACITY,
            MaskKind::BitVec => true,
        }
    }

    /// Runs `visitor` with the concrete mask type this kind names.
    ///
    /// Code that is generic over `M: DayMask` is monomorphised for both
    /// representations; this is the single place where a runtime choice
    /// turns into a type.
    pub fn dispatch<V>(self, visitor: V) -> V::Output
    where
        V: MaskVisitor,
    {
        match self {
            MaskKind::Word => visitor.visit::<WordDayMask>(),
            MaskKind::BitVec => visitor.visit::<BitVecDayMask>(),
        }
    }
}

impl std::fmt::Display for MaskKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            MaskKind::Word => write!(f, "word"),
            MaskKind::BitVec => write!(f, "bitvec"),
        }
    }
}

/// Generic work parameterised by a mask representation, see `MaskKind::dispatch`.
pub trait MaskVisitor {
    type Output;

    fn visit<M: DayMask>(self) -> Self::Output;
}

#[inline]
pub(crate) fn check_block(block: usize, max_blocks: usize) -> Result<()> {
    if block >= max_blocks {
        return Err(ModelError::out_of_range(
            "block",
            block,
            0,
            max_blocks.saturating_sub(1),
        ));
    }
    Ok(())
}

#[inline]
pub(crate) fn check_range(blocks: ClosedOpenInterval<usize>, max_blocks: usize) -> Result<()> {
    if blocks.end() > max_blocks {
        return Err(ModelError::out_of_range(
            "block range end",
            blocks.end(),
            0,
            max_blocks,
        ));
    }
    Ok(())
}

#[inline]
pub(crate) fn check_compatible(left: usize, right: usize) -> Result<()> {
    if left != right {
        return Err(ModelError::IncompatibleMask { left, right });
    }
    Ok(())
}
