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

//! # Half-Open Integer Intervals
//!
//! `ClosedOpenInterval<T>` models `[start, end)` over any primitive integer.
//! Schedules use it twice: for wall-clock spans measured in minutes since
//! midnight, and for runs of occupancy blocks inside a day mask. The type
//! only offers the queries those two layers need (overlap, containment,
//! gaps, and rescaling onto a coarser grid) plus iteration over the points.

use num_traits::PrimInt;
use std::iter::FusedIterator;

/// A half-open interval `[start, end)` over a primitive integer type.
///
/// # Invariants
///
/// `start <= end`. An interval with `start == end` is empty.
#[derive(Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct ClosedOpenInterval<T>
where
    T: PrimInt,
{
    start_inclusive: T,
    end_exclusive: T,
}

impl<T> ClosedOpenInterval<T>
where
    T: PrimInt,
{
    /// Creates a new interval.
    ///
    /// # Panics
    ///
    /// Panics if `start_inclusive > end_exclusive`.
    ///
    /// # Examples
    ///
    /// ```rust
    /// # use roster_core::math::interval::ClosedOpenInterval;
    /// let iv = ClosedOpenInterval::new(540u16, 600u16);
    /// assert_eq!(iv.len(), 60);
    /// ```
    #[inline]
    pub fn new(start_inclusive: T, end_exclusive: T) -> Self {
        assert!(
            start_inclusive <= end_exclusive,
            "called `ClosedOpenInterval::new` with start_inclusive greater than end_exclusive"
        );
        Self {
            start_inclusive,
            end_exclusive,
        }
    }

    /// Creates a new interval, or `None` if `start_inclusive > end_exclusive`.
    ///
    /// # Examples
    ///
    /// ```rust
    /// # use roster_core::math::interval::ClosedOpenInterval;
    /// assert!(ClosedOpenInterval::try_new(3, 7).is_some());
    /// assert!(ClosedOpenInterval::try_new(7, 3).is_none());
    /// ```
    #[inline]
    pub fn try_new(start_inclusive: T, end_exclusive: T) -> Option<Self> {
        (start_inclusive <= end_exclusive).then_some(Self {
            start_inclusive,
            end_exclusive,
        })
    }

    /// Creates a new interval, checking the bound order only in debug builds.
    #[inline]
    pub fn new_unchecked(start_inclusive: T, end_exclusive: T) -> Self {
        debug_assert!(
            start_inclusive <= end_exclusive,
            "called `ClosedOpenInterval::new_unchecked` with start_inclusive greater than end_exclusive"
        );
        Self {
            start_inclusive,
            end_exclusive,
        }
    }

    /// The inclusive lower bound.
    #[inline]
    pub const fn start(&self) -> T {
        self.start_inclusive
    }

    /// The exclusive upper bound.
    #[inline]
    pub const fn end(&self) -> T {
        self.end_exclusive
    }

    /// `end - start`.
    #[inline]
    pub fn len(&self) -> T {
        self.end_exclusive - self.start_inclusive
    }

    /// Returns `true` if the interval holds no points.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.start_inclusive == self.end_exclusive
    }

    /// Returns `true` if the two intervals share at least one point.
    ///
    /// Touching intervals such as `[0, 10)` and `[10, 20)` do not intersect.
    ///
    /// # Examples
    ///
    /// ```rust
    /// # use roster_core::math::interval::ClosedOpenInterval;
    /// let a = ClosedOpenInterval::new(0, 10);
    /// assert!(a.intersects(ClosedOpenInterval::new(5, 15)));
    /// assert!(!a.intersects(ClosedOpenInterval::new(10, 20)));
    /// ```
    #[inline]
    pub fn intersects(&self, other: Self) -> bool {
        self.start_inclusive < other.end_exclusive && other.start_inclusive < self.end_exclusive
    }

    /// Returns `true` if `value` lies in `[start, end)`.
    #[inline]
    pub fn contains_point(&self, value: T) -> bool {
        self.start_inclusive <= value && value < self.end_exclusive
    }

    /// Returns `true` if `other` lies entirely inside `self`.
    #[inline]
    pub fn contains_interval(&self, other: Self) -> bool {
        self.start_inclusive <= other.start_inclusive && other.end_exclusive <= self.end_exclusive
    }

    /// The overlapping part of two intervals, if it is non-empty.
    #[inline]
    pub fn intersection(&self, other: Self) -> Option<Self> {
        let start = self.start_inclusive.max(other.start_inclusive);
        let end = self.end_exclusive.min(other.end_exclusive);
        (start < end).then_some(Self::new_unchecked(start, end))
    }

    /// The interval strictly between two non-overlapping intervals.
    ///
    /// Returns `None` when they overlap. Touching intervals yield an empty gap.
    ///
    /// # Examples
    ///
    /// ```rust
    /// # use roster_core::math::interval::ClosedOpenInterval;
    /// let a = ClosedOpenInterval::new(0, 10);
    /// let b = ClosedOpenInterval::new(15, 20);
    /// assert_eq!(a.gap(b), Some(ClosedOpenInterval::new(10, 15)));
    /// assert_eq!(b.gap(a), Some(ClosedOpenInterval::new(10, 15)));
    /// assert!(a.gap(ClosedOpenInterval::new(10, 12)).unwrap().is_empty());
    /// assert_eq!(a.gap(ClosedOpenInterval::new(5, 12)), None);
    /// ```
    #[inline]
    pub fn gap(&self, other: Self) -> Option<Self> {
        if self.intersects(other) {
            return None;
        }
        if self.end_exclusive <= other.start_inclusive {
            Some(Self::new_unchecked(self.end_exclusive, other.start_inclusive))
        } else {
            Some(Self::new_unchecked(other.end_exclusive, self.start_inclusive))
        }
    }

    /// Maps the interval onto a grid of cells of width `cell`.
    ///
    /// The result is the smallest range of cell indices whose cells cover
    /// every point of `self`: `[start / cell, ceil(end / cell))`. An empty
    /// interval maps to an empty range.
    ///
    /// # Panics
    ///
    /// Panics if `cell` is not positive.
    ///
    /// # Examples
    ///
    /// ```rust
    /// # use roster_core::math::interval::ClosedOpenInterval;
    /// // 9:00-9:50 on a 30 minute grid covers cells 18 and 19.
    /// let iv = ClosedOpenInterval::new(540u32, 590u32);
    /// assert_eq!(iv.covering_cells(30), ClosedOpenInterval::new(18, 20));
    /// ```
    #[inline]
    pub fn covering_cells(&self, cell: T) -> Self {
        assert!(
            cell > T::zero(),
            "called `ClosedOpenInterval::covering_cells` with a non-positive cell width"
        );
        if self.is_empty() {
            let at = self.start_inclusive / cell;
            return Self::new_unchecked(at, at);
        }
        let first = self.start_inclusive / cell;
        let mut last = self.end_exclusive / cell;
        if self.end_exclusive % cell != T::zero() {
            last = last + T::one();
        }
        Self::new_unchecked(first, last)
    }

    /// An iterator over every point in the interval, in ascending order.
    #[inline]
    pub fn iter(&self) -> ClosedOpenIntervalIterator<T> {
        ClosedOpenIntervalIterator {
            current: self.start_inclusive,
            end_exclusive: self.end_exclusive,
        }
    }
}

/// An iterator over the points of a `ClosedOpenInterval`.
#[derive(Clone, Debug)]
pub struct ClosedOpenIntervalIterator<T>
where
    T: PrimInt,
{
    current: T,
    end_exclusive: T,
}

impl<T> Iterator for ClosedOpenIntervalIterator<T>
where
    T: PrimInt,
{
    type Item = T;

    #[inline]
    fn next(&mut self) -> Option<Self::Item> {
        if self.current < self.end_exclusive {
            let value = self.current;
            self.current = self.current + T::one();
            Some(value)
        } else {
            None
        }
    }

    #[inline]
    fn size_hint(&self) -> (usize, Option<usize>) {
        let remaining = if self.current < self.end_exclusive {
            (self.end_exclusive - self.current).to_usize().unwrap_or(usize::MAX)
        } else {
            0
        };
        (remaining, Some(remaining))
    }
}

impl<T> DoubleEndedIterator for ClosedOpenIntervalIterator<T>
where
    T: PrimInt,
{
    #[inline]
    fn next_back(&mut self) -> Option<Self::Item> {
        if self.current < self.end_exclusive {
            self.end_exclusive = self.end_exclusive - T::one();
            Some(self.end_exclusive)
        } else {
            None
        }
    }
}

impl<T> ExactSizeIterator for ClosedOpenIntervalIterator<T> where T: PrimInt {}

impl<T> FusedIterator for ClosedOpenIntervalIterator<T> where T: PrimInt {}

impl<T> IntoIterator for ClosedOpenInterval<T>
where
    T: PrimInt,
{
    type Item = T;
    type IntoIter = ClosedOpenIntervalIterator<T>;

    #[inline]
    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

impl<T> From<std::ops::Range<T>> for ClosedOpenInterval<T>
where
    T: PrimInt,
{
    #[inline]
    fn from(range: std::ops::Range<T>) -> Self {
        Self::new(range.start, range.end)
    }
}

impl<T> From<ClosedOpenInterval<T>> for std::ops::Range<T>
where
    T: PrimInt,
{
    #[inline]
    fn from(interval: ClosedOpenInterval<T>) -> Self {
        interval.start_inclusive..interval.end_exclusive
    }
}

impl<T> std::fmt::Debug for ClosedOpenInterval<T>
where
    T: PrimInt + std::fmt::Debug,
{
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "[{:?}, {:?})", self.start_inclusive, self.end_exclusive)
    }
}

impl<T> std::fmt::Display for ClosedOpenInterval<T>
where
    T: PrimInt + std::fmt::Display,
{
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "[{}, {})", self.start_inclusive, self.end_exclusive)
    }
}
