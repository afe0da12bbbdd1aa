//! ConservationChecker - population accounting for partition operations.
//!
//! Every [`PartitionPlan`](crate::PartitionPlan) is built through this
//! checker, so the `conserved` flag is computed for every operation whether
//! or not the operation promises conservation.

use crate::bitset::BitSet;

/// Pure population accounting.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ConservationChecker;

impl ConservationChecker {
    /// True iff the totals match.
    ///
    /// # Examples
    ///
    /// ```
    /// use vorax::ConservationChecker;
    ///
    /// assert!(ConservationChecker::check(8, 8));
    /// assert!(!ConservationChecker::check(8, 7));
    /// ```
    #[inline(always)]
    pub const fn check(total_before: usize, total_after: usize) -> bool {
        total_before == total_after
    }

    /// Sum of populations.
    pub fn total<'a, I>(sets: I) -> usize
    where
        I: IntoIterator<Item = &'a BitSet>,
    {
        sets.into_iter().map(BitSet::population).sum()
    }
}
