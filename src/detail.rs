//! Render-ready results of evaluated expressions.
//!
//! A [`DiceRollResult`] pairs the numeric result of an expression with an ordered list of [`DiceRollDetail`]s, one per
//! token of the written expression, so a client can display every individual die (crossing out the ones excluded by
//! a selection rule) alongside the constants, operators, and parentheses around them.

use alloc::{
	string::{String, ToString},
	vec::Vec,
};

use crate::{
	dice::Rolled,
	expr::{CalcError, EvalError, Evaled},
};
#[cfg(feature = "parse")]
use crate::{dice::roller::Roller, expr::Expr, parse::Error as ParseError};

/// Fully evaluated expression
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[non_exhaustive]
pub struct DiceRollResult {
	/// Numeric result of the whole expression
	pub result: f64,

	/// Display nodes for each token of the expression, in written order
	pub detail: Vec<DiceRollDetail>,
}

impl DiceRollResult {
	/// Builds the result for an evaluated expression, calculating its total.
	///
	/// # Errors
	/// If calculating the total of the expression fails, an error variant is returned.
	pub fn from_evaled(evaled: &Evaled) -> Result<Self, CalcError> {
		let result = evaled.calc()?;
		let mut detail = Vec::new();
		push_details(evaled, &mut detail);
		Ok(Self { result, detail })
	}

	/// Parses, evaluates, and formats an expression in one go, rolling any dice with the given roller.
	///
	/// # Errors
	/// If the expression can't be parsed, evaluated, or calculated, an error variant is returned.
	///
	/// # Examples
	/// ```
	/// use rollwright::{
	/// 	dice::roller::Iter as IterRoller,
	/// 	detail::{DiceRollDetail, DiceRollResult, DieCategory, DieDetail},
	/// };
	///
	/// let rolled = DiceRollResult::evaluate("2d20kh1 + 3", &mut IterRoller::new([20, 9]))?;
	/// assert_eq!(rolled.result, 23.0);
	/// assert_eq!(
	/// 	rolled.detail,
	/// 	[
	/// 		DiceRollDetail::DiceRoll {
	/// 			content: "2d20".into(),
	/// 			min: 1,
	/// 			max: 20,
	/// 			rolls: vec![
	/// 				DieDetail { value: 20, crossed_out: false, category: DieCategory::Max },
	/// 				DieDetail { value: 9, crossed_out: true, category: DieCategory::Default },
	/// 			],
	/// 		},
	/// 		DiceRollDetail::Operator { content: "+".into() },
	/// 		DiceRollDetail::Constant { content: "3".into() },
	/// 	]
	/// );
	/// # Ok::<(), rollwright::detail::Error>(())
	/// ```
	#[cfg(feature = "parse")]
	pub fn evaluate(input: &str, rng: &mut impl Roller) -> Result<Self, Error> {
		let expr: Expr = input.parse()?;
		let evaled = expr.eval(rng)?;
		Ok(Self::from_evaled(&evaled)?)
	}
}

/// Single display node of an evaluated expression
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(tag = "type"))]
#[expect(clippy::exhaustive_enums, reason = "Clients render every variant; a new one must be a breaking change")]
pub enum DiceRollDetail {
	/// Rolled dice group
	DiceRoll {
		/// Dice notation without any selection rule (e.g. `2d20` for `2d20kh1`)
		content: String,

		/// Lowest value a die can roll
		min: u16,

		/// Highest value a die can roll
		max: u16,

		/// Every die that was rolled, in roll order
		rolls: Vec<DieDetail>,
	},

	/// Standalone number
	Constant {
		/// Number as displayed
		content: String,
	},

	/// Arithmetic operator
	Operator {
		/// Operator symbol
		content: String,
	},

	/// Opening parenthesis
	OpenParen {
		/// Always `(`
		content: String,
	},

	/// Closing parenthesis
	CloseParen {
		/// Always `)`
		content: String,
	},
}

impl From<&Rolled<'_>> for DiceRollDetail {
	fn from(rolled: &Rolled<'_>) -> Self {
		let min = 1;
		let max = rolled.dice.sides;
		Self::DiceRoll {
			content: rolled.dice.plain().to_string(),
			min,
			max,
			rolls: rolled
				.rolls
				.iter()
				.map(|roll| DieDetail {
					value: roll.val,
					crossed_out: roll.is_crossed_out(),
					category: DieCategory::of(roll.val, min, max),
				})
				.collect(),
		}
	}
}

/// Single die of a [`DiceRollDetail::DiceRoll`]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "camelCase"))]
#[allow(clippy::exhaustive_structs)]
pub struct DieDetail {
	/// Value that was rolled
	pub value: u16,

	/// Whether the die was excluded from the total by a selection rule
	pub crossed_out: bool,

	/// Highlighting category of the value
	pub category: DieCategory,
}

/// Highlighting category of a die's value, for display
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "SCREAMING_SNAKE_CASE"))]
#[expect(clippy::exhaustive_enums, reason = "A value can only be at either end of the range or neither")]
pub enum DieCategory {
	/// Highest possible value
	Max,

	/// Lowest possible value
	Min,

	/// Anything in between
	Default,
}

impl DieCategory {
	/// Categorizes a value by equality against the ends of its range. A value matching both ends is [`Self::Max`].
	///
	/// # Examples
	/// ```
	/// use rollwright::detail::DieCategory;
	///
	/// assert_eq!(DieCategory::of(20, 1, 20), DieCategory::Max);
	/// assert_eq!(DieCategory::of(1, 1, 20), DieCategory::Min);
	/// assert_eq!(DieCategory::of(12, 1, 20), DieCategory::Default);
	/// assert_eq!(DieCategory::of(1, 1, 1), DieCategory::Max);
	/// ```
	#[must_use]
	pub const fn of(value: u16, min: u16, max: u16) -> Self {
		if value == max {
			Self::Max
		} else if value == min {
			Self::Min
		} else {
			Self::Default
		}
	}
}

/// Pushes the display nodes for an evaluated expression onto a list, in written order.
fn push_details(evaled: &Evaled, detail: &mut Vec<DiceRollDetail>) {
	match evaled {
		Evaled::Num(x) => detail.push(DiceRollDetail::Constant { content: x.to_string() }),
		Evaled::Dice(rolled) => detail.push(rolled.into()),
		Evaled::Group(x) => {
			detail.push(DiceRollDetail::OpenParen { content: "(".into() });
			push_details(x, detail);
			detail.push(DiceRollDetail::CloseParen { content: ")".into() });
		}
		Evaled::Neg(x) => {
			detail.push(operator('-'));
			push_details(x, detail);
		}
		Evaled::Add(a, b) => push_binary(a, '+', b, detail),
		Evaled::Sub(a, b) => push_binary(a, '-', b, detail),
		Evaled::Mul(a, b) => push_binary(a, '*', b, detail),
		Evaled::Div(a, b) => push_binary(a, '/', b, detail),
	}
}

/// Pushes the display nodes for a binary operation.
fn push_binary(a: &Evaled, op: char, b: &Evaled, detail: &mut Vec<DiceRollDetail>) {
	push_details(a, detail);
	detail.push(operator(op));
	push_details(b, detail);
}

/// Builds an operator node.
fn operator(op: char) -> DiceRollDetail {
	DiceRollDetail::Operator { content: op.to_string() }
}

/// Error that can occur during [`DiceRollResult::evaluate()`]
#[derive(thiserror::Error, Debug)]
#[non_exhaustive]
pub enum Error {
	/// The input isn't a valid expression
	#[cfg(feature = "parse")]
	#[error("parse error: {0}")]
	Parse(#[from] ParseError),

	/// Rolling the expression's dice failed
	#[error(transparent)]
	Eval(#[from] EvalError),

	/// Calculating the expression's result failed
	#[error(transparent)]
	Calc(#[from] CalcError),
}
