//! Selection rules (drop/keep highest/lowest) and the index-selection primitives behind them.
//!
//! Every function here works on the plain values of a set of rolls, in their original roll order, and returns the set
//! of *indices* into those rolls that are excluded ("crossed out"). Index identity, not value identity, is what gets
//! selected, so equal values are always distributed between distinct dice.
//!
//! All four modes are derived from a single primitive, [`drop_lowest()`], and [`invert()`]:
//!
//! | Mode | Crossed-out set |
//! |---|---|
//! | drop lowest `n` | `drop_lowest(n)` |
//! | drop highest `n` | `invert(drop_lowest(len - n))` |
//! | keep highest `n` | `drop_lowest(len - n)` |
//! | keep lowest `n` | `drop_highest(len - n)` |

use alloc::{
	collections::{BTreeMap, BTreeSet},
	vec::Vec,
};
use core::fmt;

/// Rule that excludes some of the rolls of a set of dice from its total
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[expect(clippy::exhaustive_enums, reason = "The four drop/keep modes are the whole family")]
pub enum Selection {
	/// Drops the lowest x dice (`-L`, `dN`, `dlN`).
	///
	/// # Examples
	/// ```
	/// use rollwright::dice::{roller::{Iter as IterRoller, Roller}, Dice};
	///
	/// let dice = Dice::builder().count(4).sides(6).drop_lowest(1).build();
	/// let rolled = IterRoller::new([3, 6, 1, 2]).roll(&dice, true)?;
	/// assert_eq!(rolled.to_string(), "4d6dl1[3, 6, 1 (x), 2]");
	/// assert_eq!(rolled.total()?, 11);
	/// # Ok::<(), rollwright::dice::Error>(())
	/// ```
	DropLowest(u16),

	/// Drops the highest x dice (`-H`, `dhN`).
	///
	/// Note that the total of dice using this rule is the sum of the *dropped* dice, see
	/// [`DROP_HIGHEST_SUMS_DROPPED`](super::aggregate::DROP_HIGHEST_SUMS_DROPPED).
	DropHighest(u16),

	/// Keeps only the highest x dice, crossing out the rest (`^N`, `kN`, `khN`).
	///
	/// # Examples
	/// ```
	/// use rollwright::dice::{roller::{Iter as IterRoller, Roller}, Dice};
	///
	/// let dice = Dice::builder().count(2).sides(20).keep_highest(1).build();
	/// let rolled = IterRoller::new([7, 15]).roll(&dice, true)?;
	/// assert_eq!(rolled.to_string(), "2d20kh1[7 (x), 15]");
	/// assert_eq!(rolled.total()?, 15);
	/// # Ok::<(), rollwright::dice::Error>(())
	/// ```
	KeepHighest(u16),

	/// Keeps only the lowest x dice, crossing out the rest (`vN`, `klN`).
	KeepLowest(u16),
}

impl Selection {
	/// Determines which of the given rolls this rule crosses out.
	#[must_use]
	pub fn crossed_out(&self, rolls: &[u16]) -> BTreeSet<usize> {
		match *self {
			Self::DropLowest(count) => drop_lowest(count.into(), rolls),
			Self::DropHighest(count) => drop_highest(count.into(), rolls),
			Self::KeepHighest(count) => keep_highest(count.into(), rolls),
			Self::KeepLowest(count) => keep_lowest(count.into(), rolls),
		}
	}

	/// Gets the number of dice the rule drops or keeps.
	#[must_use]
	pub const fn count(&self) -> u16 {
		match *self {
			Self::DropLowest(count) | Self::DropHighest(count) | Self::KeepHighest(count) | Self::KeepLowest(count) => {
				count
			}
		}
	}
}

impl fmt::Display for Selection {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		match self {
			Self::DropLowest(count) => write!(f, "dl{count}"),
			Self::DropHighest(count) => write!(f, "dh{count}"),
			Self::KeepHighest(count) => write!(f, "kh{count}"),
			Self::KeepLowest(count) => write!(f, "kl{count}"),
		}
	}
}

/// Selects the indices of the lowest `count` rolls.
///
/// When several rolls share a value, only as many of them are selected as there are occurrences of that value among
/// the lowest `count`. Which of the equal dice get picked is deterministic for a given set of rolls.
/// A `count` of at least the number of rolls selects every index, and a `count` of zero selects none.
///
/// # Examples
/// ```
/// use rollwright::dice::selection::drop_lowest;
///
/// assert_eq!(drop_lowest(2, &[2, 1, 3]).into_iter().collect::<Vec<_>>(), [0, 1]);
/// assert_eq!(drop_lowest(3, &[4, 4, 4, 4]).len(), 3);
/// assert_eq!(drop_lowest(5, &[10, 20, 30, 40]).len(), 4);
/// ```
#[must_use]
pub fn drop_lowest(count: usize, rolls: &[u16]) -> BTreeSet<usize> {
	// Find the values to drop, taking one occurrence of the current minimum each time
	let mut scratch = rolls.to_vec();
	let mut lowest = Vec::with_capacity(count.min(rolls.len()));
	for _ in 0..count {
		let Some((pos, &val)) = scratch.iter().enumerate().min_by_key(|&(_, val)| *val) else {
			break;
		};
		lowest.push(val);
		scratch.swap_remove(pos);
	}

	// Stack up the original indices holding each value
	let mut positions: BTreeMap<u16, Vec<usize>> = BTreeMap::new();
	for (idx, &val) in rolls.iter().enumerate() {
		positions.entry(val).or_default().push(idx);
	}

	lowest
		.into_iter()
		.filter_map(|val| positions.get_mut(&val).and_then(Vec::pop))
		.collect()
}

/// Selects the indices of the highest `count` rolls.
/// This is exactly the complement of the lowest `len - count` rolls.
///
/// # Examples
/// ```
/// use rollwright::dice::selection::drop_highest;
///
/// assert_eq!(drop_highest(1, &[3, 6, 1, 2]).into_iter().collect::<Vec<_>>(), [1]);
/// assert!(drop_highest(0, &[3, 6]).is_empty());
/// ```
#[must_use]
pub fn drop_highest(count: usize, rolls: &[u16]) -> BTreeSet<usize> {
	invert(rolls, &drop_lowest(rolls.len().saturating_sub(count), rolls))
}

/// Selects the indices crossed out when keeping only the highest `count` rolls (the lowest `len - count`).
///
/// # Examples
/// ```
/// use rollwright::dice::selection::keep_highest;
///
/// assert_eq!(keep_highest(1, &[3, 7, 2]).into_iter().collect::<Vec<_>>(), [0, 2]);
/// ```
#[must_use]
pub fn keep_highest(count: usize, rolls: &[u16]) -> BTreeSet<usize> {
	drop_lowest(rolls.len().saturating_sub(count), rolls)
}

/// Selects the indices crossed out when keeping only the lowest `count` rolls (the highest `len - count`).
///
/// # Examples
/// ```
/// use rollwright::dice::selection::keep_lowest;
///
/// assert_eq!(keep_lowest(1, &[3, 7, 2]).into_iter().collect::<Vec<_>>(), [0, 1]);
/// ```
#[must_use]
pub fn keep_lowest(count: usize, rolls: &[u16]) -> BTreeSet<usize> {
	drop_highest(rolls.len().saturating_sub(count), rolls)
}

/// Gets the complement of a set of indices over all indices of the rolls.
#[must_use]
pub fn invert(rolls: &[u16], indices: &BTreeSet<usize>) -> BTreeSet<usize> {
	(0..rolls.len()).filter(|idx| !indices.contains(idx)).collect()
}
