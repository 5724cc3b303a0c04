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

//! # Roster Engine
//!
//! Enumeration of conflict-free class schedules.
//!
//! ## Modules
//!
//! - `slot`: one wanted course and its candidate unique sections.
//! - `engine`: the sequential depth-first `AssemblyEngine` and its builder.
//! - `parallel`: `ParallelAssembler`, which splits the first slot across
//!   scoped worker threads and merges results in sequential order.
//! - `config`: the serde `AssemblyConfig` and `ConfigError`.
//! - `request`: course lists resolved against a catalog, assembled with the
//!   mask representation chosen at run time.
//!
//! The outcome types live in `roster_search::result` and are re-exported
//! here.

pub mod config;
pub mod engine;
pub mod parallel;
pub mod request;
pub mod slot;

mod stack;

pub use roster_search::result::{AssemblyOutcome, AssemblyStatus, TerminationReason};
