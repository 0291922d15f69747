use std::collections::BTreeSet;

use proptest::prelude::*;

use crate::dice::selection::{drop_highest, drop_lowest, invert, keep_highest, keep_lowest};

fn indices(set: BTreeSet<usize>) -> Vec<usize> {
	set.into_iter().collect()
}

#[test]
fn drop_lowest_picks_lowest_values() {
	assert_eq!(indices(drop_lowest(2, &[2, 1, 3])), [0, 1]);
}

#[test]
fn drop_lowest_splits_equal_values() {
	let dropped = drop_lowest(3, &[1, 1, 1, 1]);
	assert_eq!(dropped.len(), 3);
	assert!(dropped.iter().all(|&idx| idx < 4));
}

#[test]
fn drop_lowest_ties_mixed_with_others() {
	// Two of the three 4s go along with the 2
	let rolls = [4, 6, 4, 2, 4];
	let dropped = drop_lowest(3, &rolls);
	assert_eq!(dropped.len(), 3);
	assert!(dropped.contains(&3));
	assert_eq!(dropped.iter().filter(|&&idx| rolls[idx] == 4).count(), 2);
	assert!(!dropped.contains(&1));
}

#[test]
fn drop_lowest_over_drop_selects_everything() {
	assert_eq!(indices(drop_lowest(5, &[10, 20, 30, 40])), [0, 1, 2, 3]);
}

#[test]
fn drop_lowest_nothing() {
	assert!(drop_lowest(0, &[5, 3]).is_empty());
	assert!(drop_lowest(3, &[]).is_empty());
}

#[test]
fn drop_highest_picks_highest_values() {
	assert_eq!(indices(drop_highest(1, &[3, 6, 1, 2])), [1]);
	assert_eq!(indices(drop_highest(2, &[3, 6, 1, 2])), [0, 1]);
}

#[test]
fn drop_highest_over_drop_selects_everything() {
	assert_eq!(indices(drop_highest(9, &[3, 6, 1])), [0, 1, 2]);
}

#[test]
fn keep_highest_crosses_out_the_rest() {
	assert_eq!(indices(keep_highest(1, &[3, 7, 2])), [0, 2]);
}

#[test]
fn keep_lowest_crosses_out_the_rest() {
	assert_eq!(indices(keep_lowest(1, &[3, 7, 2])), [0, 1]);
	assert_eq!(indices(keep_lowest(2, &[3, 6, 1, 2])), [0, 1]);
}

#[test]
fn keep_more_than_rolled() {
	assert!(keep_highest(4, &[3, 7, 2]).is_empty());
	assert!(keep_lowest(4, &[3, 7, 2]).is_empty());
}

#[test]
fn invert_complements() {
	let set = BTreeSet::from([0, 2]);
	assert_eq!(indices(invert(&[1, 2, 3, 4], &set)), [1, 3]);
	assert!(invert(&[1, 2], &BTreeSet::from([0, 1])).is_empty());
}

/// Generates a set of rolls along with a count that is at most the number of rolls.
fn rolls_and_count() -> impl Strategy<Value = (Vec<u16>, usize)> {
	prop::collection::vec(1..=20u16, 0..=30).prop_flat_map(|rolls| {
		let len = rolls.len();
		(Just(rolls), 0..=len)
	})
}

proptest! {
	#[test]
	fn drop_lowest_cardinality((rolls, count) in rolls_and_count()) {
		prop_assert_eq!(drop_lowest(count, &rolls).len(), count);
	}

	#[test]
	fn dropped_never_above_kept((rolls, count) in rolls_and_count()) {
		let dropped = drop_lowest(count, &rolls);
		let kept = invert(&rolls, &dropped);
		let highest_dropped = dropped.iter().map(|&idx| rolls[idx]).max();
		let lowest_kept = kept.iter().map(|&idx| rolls[idx]).min();
		if let (Some(highest_dropped), Some(lowest_kept)) = (highest_dropped, lowest_kept) {
			prop_assert!(highest_dropped <= lowest_kept);
		}
	}

	#[test]
	fn drop_highest_is_inverted_drop_lowest((rolls, count) in rolls_and_count()) {
		prop_assert_eq!(
			drop_highest(count, &rolls),
			invert(&rolls, &drop_lowest(rolls.len() - count, &rolls))
		);
	}

	#[test]
	fn dropped_highest_never_below_kept((rolls, count) in rolls_and_count()) {
		let dropped = drop_highest(count, &rolls);
		prop_assert_eq!(dropped.len(), count);
		let lowest_dropped = dropped.iter().map(|&idx| rolls[idx]).min();
		let highest_kept = invert(&rolls, &dropped).iter().map(|&idx| rolls[idx]).max();
		if let (Some(lowest_dropped), Some(highest_kept)) = (lowest_dropped, highest_kept) {
			prop_assert!(lowest_dropped >= highest_kept);
		}
	}

	#[test]
	fn keep_leaves_count_kept((rolls, count) in rolls_and_count()) {
		prop_assert_eq!(invert(&rolls, &keep_highest(count, &rolls)).len(), count);
		prop_assert_eq!(invert(&rolls, &keep_lowest(count, &rolls)).len(), count);
	}

	#[test]
	fn selection_is_idempotent((rolls, count) in rolls_and_count()) {
		prop_assert_eq!(drop_lowest(count, &rolls), drop_lowest(count, &rolls));
		prop_assert_eq!(drop_highest(count, &rolls), drop_highest(count, &rolls));
		prop_assert_eq!(keep_highest(count, &rolls), keep_highest(count, &rolls));
		prop_assert_eq!(keep_lowest(count, &rolls), keep_lowest(count, &rolls));
	}

	#[test]
	fn indices_in_range((rolls, count) in rolls_and_count()) {
		prop_assert!(drop_lowest(count, &rolls).iter().all(|&idx| idx < rolls.len()));
		prop_assert!(drop_highest(count, &rolls).iter().all(|&idx| idx < rolls.len()));
	}
}
