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

//! # Roster Model
//!
//! **The domain model for conflict-free class schedule assembly.**
//!
//! This crate holds everything the assembly engine reads: the course
//! catalog, wall-clock time, occupancy masks, and the `Schedule` value the
//! engine produces.
//!
//! ## Architecture
//!
//! * **`time`** / **`weekday`**: `Time`, `TimeInterval`, `Weekday` and
//!   `WeekdaySet`, with the string formats used by course listings.
//! * **`catalog`**: `Catalog` → `Department` → `Course` → `Section` →
//!   `ClassPeriod`, built through validating builders.
//! * **`index`** / **`descriptor`**: typed indices and the descriptors that
//!   address a course or section inside a catalog.
//! * **`mask`**: the `DayMask` contract with a single-word and a bit-vector
//!   representation, and the seven-day `WeekMask`.
//! * **`grid`**: `TimeGrid`, which compiles class periods into masks.
//! * **`unique`**: grouping of sections with identical timetables.
//! * **`narrow`**: time off and excluded sections, applied before grouping.
//! * **`schedule`**: the conflict-free `Schedule` and its statistics.
//! * **`saved`**: a serializable, catalog-independent schedule snapshot.
//!
//! ## Design Philosophy
//!
//! 1.  **One representation per run**: `WeekMask`, `UniqueSection` and
//!     `Schedule` are generic over `M: DayMask`, so masks of different
//!     representations can never meet.
//! 2.  **Fail-Fast**: builders and constructors validate eagerly; every
//!     failure is a `ModelError`.
//! 3.  **Cheap snapshots**: cloning a `Schedule` shares its member list.

pub mod catalog;
pub mod descriptor;
pub mod error;
pub mod grid;
pub mod index;
pub mod mask;
pub mod narrow;
pub mod saved;
pub mod schedule;
pub mod time;
pub mod unique;
pub mod weekday;
