//! Reducers that total a set of rolls according to a selection rule.
//!
//! Each reducer takes the selection count and the plain roll values (in roll order) and sums a specific set of
//! indices from [`selection`](super::selection). `None` is returned if the sum overflows.

use alloc::collections::BTreeSet;

use super::selection::{drop_highest, drop_lowest, invert, keep_highest, keep_lowest};

/// Whether [`removing_highest()`] sums the dropped highest dice themselves rather than the remaining ones.
///
/// Unlike [`removing_lowest()`], which totals everything *except* the dropped dice, totals for the drop-highest rule
/// are the sum of the dropped dice. Flipping this changes the results of every `-H`/`dh` roll.
pub const DROP_HIGHEST_SUMS_DROPPED: bool = true;

/// Sums every roll.
#[must_use]
pub fn sum_all(rolls: &[u16]) -> Option<u32> {
	rolls
		.iter()
		.try_fold(0u32, |sum, &val| sum.checked_add(u32::from(val)))
}

/// Sums the rolls at the given indices. Indices past the end of the rolls are ignored.
#[must_use]
pub fn sum_indices(rolls: &[u16], indices: &BTreeSet<usize>) -> Option<u32> {
	indices
		.iter()
		.filter_map(|&idx| rolls.get(idx))
		.try_fold(0u32, |sum, &val| sum.checked_add(u32::from(val)))
}

/// Totals the rolls with the lowest `count` of them removed.
///
/// # Examples
/// ```
/// use rollwright::dice::aggregate::removing_lowest;
///
/// assert_eq!(removing_lowest(1, &[3, 6, 1, 2]), Some(11));
/// ```
#[must_use]
pub fn removing_lowest(count: usize, rolls: &[u16]) -> Option<u32> {
	sum_indices(rolls, &invert(rolls, &drop_lowest(count, rolls)))
}

/// Totals the rolls for the drop-highest rule. See [`DROP_HIGHEST_SUMS_DROPPED`].
///
/// # Examples
/// ```
/// use rollwright::dice::aggregate::removing_highest;
///
/// // The highest die (5) is the one that gets counted
/// assert_eq!(removing_highest(1, &[5, 1, 1]), Some(5));
/// ```
#[must_use]
pub fn removing_highest(count: usize, rolls: &[u16]) -> Option<u32> {
	let dropped = drop_highest(count, rolls);
	if DROP_HIGHEST_SUMS_DROPPED {
		sum_indices(rolls, &dropped)
	} else {
		sum_indices(rolls, &invert(rolls, &dropped))
	}
}

/// Totals only the highest `count` rolls.
///
/// # Examples
/// ```
/// use rollwright::dice::aggregate::keeping_highest;
///
/// assert_eq!(keeping_highest(1, &[3, 7, 2]), Some(7));
/// ```
#[must_use]
pub fn keeping_highest(count: usize, rolls: &[u16]) -> Option<u32> {
	sum_indices(rolls, &invert(rolls, &keep_highest(count, rolls)))
}

/// Totals only the lowest `count` rolls.
///
/// # Examples
/// ```
/// use rollwright::dice::aggregate::keeping_lowest;
///
/// assert_eq!(keeping_lowest(2, &[3, 7, 2]), Some(5));
/// ```
#[must_use]
pub fn keeping_lowest(count: usize, rolls: &[u16]) -> Option<u32> {
	sum_indices(rolls, &invert(rolls, &keep_lowest(count, rolls)))
}
