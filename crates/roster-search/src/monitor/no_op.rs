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

use crate::monitor::search_monitor::SearchMonitor;
use roster_model::mask::DayMask;

/// A monitor that observes nothing and never stops the search.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct NoOpMonitor;

impl NoOpMonitor {
    #[inline]
    pub fn new() -> Self {
        Self
    }
}

impl<M> SearchMonitor<M> for NoOpMonitor
where
    M: DayMask,
{
    fn name(&self) -> &str {
        "NoOpMonitor"
    }
}

#[cfg(test)]
mod tests {
    use super::NoOpMonitor;
    use crate::monitor::search_monitor::{SearchCommand, SearchMonitor};
    use roster_model::mask::BitVecDayMask;

    #[test]
    fn test_no_op_always_continues() {
        let monitor = NoOpMonitor::new();
        assert_eq!(SearchMonitor::<BitVecDayMask>::name(&monitor), "NoOpMonitor");
        assert_eq!(
            SearchMonitor::<BitVecDayMask>::search_command(&monitor),
            SearchCommand::Continue
        );
    }
}
