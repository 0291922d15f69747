//! All functionality for directly creating dice, rolling them, and working with their resulting rolls.
//!
//! This is the home of the dice "primitives". For using as part of a larger expression, see [`Expr::Dice`].
//!
//! [`Expr::Dice`]: crate::expr::Expr::Dice

pub mod aggregate;
pub mod roller;
pub mod selection;

use alloc::{
	borrow::Cow,
	format,
	string::{String, ToString},
	vec::Vec,
};
use core::fmt;

pub use self::{roller::Roller, selection::Selection};
use crate::expr::Describe;

/// A set of one or more rollable dice with a specific number of sides, along with an optional selection rule that
/// determines which of the resulting rolls count towards the total.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[allow(clippy::exhaustive_structs)]
pub struct Dice {
	/// Number of dice to roll
	pub count: u16,

	/// Number of sides for each die
	pub sides: u16,

	/// Selection rule (drop/keep highest/lowest) to apply to rolls from this set of dice
	pub selection: Option<Selection>,
}

impl Dice {
	/// Creates a new set of dice matching this one but without a selection rule.
	#[must_use]
	#[inline]
	pub const fn plain(&self) -> Self {
		Self::new(self.count, self.sides)
	}

	/// Creates a new set of dice with a given count and number of sides.
	#[must_use]
	pub const fn new(count: u16, sides: u16) -> Self {
		Self {
			count,
			sides,
			selection: None,
		}
	}

	/// Creates a new dice builder.
	#[must_use]
	#[inline]
	pub fn builder() -> Builder {
		Builder::default()
	}

	/// Checks whether the dice can actually be rolled (at least one die with at least one side).
	#[must_use]
	#[inline]
	pub const fn is_valid(&self) -> bool {
		self.count > 0 && self.sides > 0
	}
}

impl Default for Dice {
	/// Creates the default dice (1d20).
	#[inline]
	fn default() -> Self {
		Self::new(1, 20)
	}
}

impl fmt::Display for Dice {
	fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
		write!(
			f,
			"{}d{}{}",
			self.count,
			self.sides,
			self.selection.map(|sel| sel.to_string()).unwrap_or_default()
		)
	}
}

/// Single die produced from rolling [`Dice`] and optionally applying its [`Selection`]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[non_exhaustive]
pub struct DieRoll {
	/// Value that was rolled
	pub val: u16,

	/// Whether the die was excluded from the total by a selection rule
	pub crossed_out: bool,
}

impl DieRoll {
	/// Marks this die roll as crossed out (excluded from the total by a selection rule).
	///
	/// # Panics
	/// Panics if the die has already been crossed out.
	pub fn cross_out(&mut self) {
		assert!(!self.crossed_out, "crossing out a die that has already been crossed out");
		self.crossed_out = true;
	}

	/// Indicates whether this die roll has been crossed out by a selection rule.
	#[must_use]
	#[inline]
	pub const fn is_crossed_out(&self) -> bool {
		self.crossed_out
	}

	/// Indicates whether this die roll is being kept (has *not* been crossed out).
	/// This is the direct inverse of [`DieRoll::is_crossed_out()`].
	#[must_use]
	#[inline]
	pub const fn is_kept(&self) -> bool {
		!self.crossed_out
	}

	/// Creates a new die roll with the given value.
	#[must_use]
	pub const fn new(val: u16) -> Self {
		Self { val, crossed_out: false }
	}
}

impl fmt::Display for DieRoll {
	/// Formats the value using the given formatter. [Read more][core::fmt::Debug::fmt()]
	///
	/// The format of a die roll is simply the plain numeric value of the roll.
	/// If the roll was crossed out, it is appended with ` (x)`.
	///
	/// # Examples
	/// ```
	/// use rollwright::dice::DieRoll;
	///
	/// let roll = DieRoll::new(4);
	/// assert_eq!(roll.to_string(), "4");
	///
	/// let mut roll = DieRoll::new(16);
	/// roll.cross_out();
	/// assert_eq!(roll.to_string(), "16 (x)");
	/// ```
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		write!(f, "{}{}", self.val, if self.crossed_out { " (x)" } else { "" })
	}
}

/// Representation of the result from rolling [`Dice`]
#[derive(Debug, Clone, PartialEq, Eq)]
#[allow(clippy::exhaustive_structs)]
pub struct Rolled<'a> {
	/// Each individual die roll that was made, in the order they were rolled
	pub rolls: Vec<DieRoll>,

	/// Dice that were rolled to produce this
	pub dice: Cow<'a, Dice>,
}

impl Rolled<'_> {
	/// Calculates the total of the rolls according to the dice's selection rule (see [`aggregate`]).
	/// Plain dice sum every roll.
	///
	/// # Errors
	/// If there is an integer overflow while summing the die rolls, an error variant is returned.
	///
	/// # Examples
	/// ```
	/// use rollwright::dice::{roller::{Iter as IterRoller, Roller}, Dice};
	///
	/// let dice = Dice::builder().count(4).sides(6).drop_lowest(1).build();
	/// let rolled = IterRoller::new([3, 6, 1, 2]).roll(&dice, true)?;
	/// assert_eq!(rolled.total()?, 11);
	/// # Ok::<(), rollwright::dice::Error>(())
	/// ```
	pub fn total(&self) -> Result<u32, Error> {
		let vals = self.values();
		let total = match self.dice.selection {
			None => aggregate::sum_all(&vals),
			Some(Selection::DropLowest(count)) => aggregate::removing_lowest(count.into(), &vals),
			Some(Selection::DropHighest(count)) => aggregate::removing_highest(count.into(), &vals),
			Some(Selection::KeepHighest(count)) => aggregate::keeping_highest(count.into(), &vals),
			Some(Selection::KeepLowest(count)) => aggregate::keeping_lowest(count.into(), &vals),
		};

		total.ok_or_else(|| Error::Overflow(self.clone().into_owned()))
	}

	/// Gets the plain values of all rolls, in roll order.
	#[must_use]
	pub fn values(&self) -> Vec<u16> {
		self.rolls.iter().map(|roll| roll.val).collect()
	}

	/// Crosses out the rolls excluded by the dice's selection rule, if it has one.
	/// Rolls that are already crossed out are left as they are.
	pub fn apply_selection(&mut self) {
		let Some(selection) = self.dice.selection else {
			return;
		};

		for idx in selection.crossed_out(&self.values()) {
			if let Some(roll) = self.rolls.get_mut(idx).filter(|roll| roll.is_kept()) {
				roll.cross_out();
			}
		}
	}

	/// Moves all of self's owned data into a new instance and clones any unowned data in order to create a `'static`
	/// instance of self.
	#[must_use]
	pub fn into_owned(self) -> Rolled<'static> {
		Rolled {
			rolls: self.rolls,
			dice: Cow::Owned(self.dice.into_owned()),
		}
	}

	/// Creates a new rolled set of dice from a given set of dice and an iterator of values.
	/// The dice's selection rule is not applied.
	#[must_use]
	pub fn from_dice_and_rolls(dice: &Dice, rolls: impl IntoIterator<Item = u16>) -> Rolled<'_> {
		Rolled {
			rolls: rolls.into_iter().map(DieRoll::new).collect(),
			dice: Cow::Borrowed(dice),
		}
	}
}

impl Describe for Rolled<'_> {
	/// Builds a string of the dice the roll is from and a list of all of the individual rolled dice
	/// (see [`DieRoll::fmt()`]).
	///
	/// If `list_limit` is specified and there are more rolls than it, the list of rolled dice will be truncated and
	/// appended with "X more..." (where X is the remaining roll count past the max).
	///
	/// # Examples
	/// ```
	/// use rollwright::{dice::{roller::{Iter as IterRoller, Roller}, Dice}, expr::Describe};
	///
	/// let dice = Dice::builder().count(4).sides(6).keep_highest(2).build();
	/// let rolled = IterRoller::new([6, 2, 5, 3]).roll(&dice, true)?;
	///
	/// assert_eq!(rolled.describe(None), "4d6kh2[6, 2 (x), 5, 3 (x)]");
	/// assert_eq!(rolled.describe(Some(2)), "4d6kh2[6, 2 (x), 2 more...]");
	/// # Ok::<(), rollwright::dice::Error>(())
	/// ```
	///
	/// [`DieRoll::fmt()`]: ./struct.DieRoll.html#method.fmt
	fn describe(&self, list_limit: Option<usize>) -> String {
		let list_limit = list_limit.unwrap_or(usize::MAX);
		let total_rolls = self.rolls.len();
		let truncated_rolls = total_rolls.saturating_sub(list_limit);

		format!(
			"{}[{}{}]",
			self.dice,
			self.rolls
				.iter()
				.take(list_limit)
				.map(ToString::to_string)
				.collect::<Vec<_>>()
				.join(", "),
			if truncated_rolls > 0 {
				format!(", {truncated_rolls} more...")
			} else {
				String::new()
			}
		)
	}
}

impl fmt::Display for Rolled<'_> {
	/// Formats the value using the given formatter. [Read more][core::fmt::Debug::fmt()]
	///
	/// The output is equivalent to calling [`Self::describe(None)`].
	///
	/// [`Self::describe(None)`]: Self::describe()
	fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
		write!(f, "{}", self.describe(None))
	}
}

/// An error resulting from a dice operation
#[derive(thiserror::Error, Debug)]
#[non_exhaustive]
pub enum Error {
	/// There was an integer overflow when performing mathematical operations on roll values.
	/// This normally should not ever happen given the types used for die counts, sides, and totals.
	#[error("integer overflow")]
	Overflow(Rolled<'static>),

	/// The dice can't be rolled because they have no dice or no sides.
	///
	/// # Examples
	/// ```
	/// use rollwright::dice::{roller::{FastRand as FastRandRoller, Roller}, Dice, Error};
	///
	/// let dice = Dice::new(0, 6);
	/// assert!(matches!(FastRandRoller::default().roll(&dice, true), Err(Error::InvalidDice(..))));
	/// ```
	#[error("{0} must have at least one die with at least one side")]
	InvalidDice(Dice),
}

/// Builds [`Dice`] with a fluent interface.
///
/// # Examples
///
/// ## Basic dice
/// ```
/// use rollwright::Dice;
///
/// let dice = Dice::builder().count(2).sides(6).build();
/// assert_eq!(dice, Dice::new(2, 6));
/// ```
///
/// ## With a selection rule
/// ```
/// use rollwright::dice::{Dice, Selection};
///
/// let dice = Dice::builder().count(2).sides(20).keep_highest(1).build();
/// assert_eq!(
/// 	dice,
/// 	Dice {
/// 		count: 2,
/// 		sides: 20,
/// 		selection: Some(Selection::KeepHighest(1)),
/// 	},
/// );
/// ```
#[derive(Debug, Clone, Default)]
pub struct Builder(Dice);

impl Builder {
	/// Sets the number of dice to roll.
	#[must_use]
	pub const fn count(mut self, count: u16) -> Self {
		self.0.count = count;
		self
	}

	/// Sets the number of sides per die.
	#[must_use]
	pub const fn sides(mut self, sides: u16) -> Self {
		self.0.sides = sides;
		self
	}

	/// Sets the selection rule, replacing any previous one.
	#[must_use]
	pub const fn selection(mut self, selection: Selection) -> Self {
		self.0.selection = Some(selection);
		self
	}

	/// Drops the lowest `count` dice.
	#[must_use]
	pub const fn drop_lowest(self, count: u16) -> Self {
		self.selection(Selection::DropLowest(count))
	}

	/// Drops the highest `count` dice.
	#[must_use]
	pub const fn drop_highest(self, count: u16) -> Self {
		self.selection(Selection::DropHighest(count))
	}

	/// Keeps only the highest `count` dice.
	#[must_use]
	pub const fn keep_highest(self, count: u16) -> Self {
		self.selection(Selection::KeepHighest(count))
	}

	/// Keeps only the lowest `count` dice.
	#[must_use]
	pub const fn keep_lowest(self, count: u16) -> Self {
		self.selection(Selection::KeepLowest(count))
	}

	/// Finalizes the dice.
	#[must_use]
	pub const fn build(self) -> Dice {
		self.0
	}
}
