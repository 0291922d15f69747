//! Parser generator functions and implementations of [`str::FromStr`] for all dice and expression data structures.
//! Requires the `parse` feature (enabled by default).
//!
//! The parsers all expect lowercase input; the [`str::FromStr`] implementations lowercase their input before parsing.
//!
//! # Dice notation
//!
//! | Notation | Selection |
//! |---|---|
//! | `XdY` | none |
//! | `XdY-l` | [`Selection::DropLowest(1)`] |
//! | `XdY-h` | [`Selection::DropHighest(1)`] |
//! | `XdYdN`, `XdYdlN` | [`Selection::DropLowest(N)`] |
//! | `XdYdhN` | [`Selection::DropHighest(N)`] |
//! | `XdYvN`, `XdYklN` | [`Selection::KeepLowest(N)`] |
//! | `XdY^N`, `XdYkN`, `XdYkhN` | [`Selection::KeepHighest(N)`] |
//!
//! `X` defaults to 1 when omitted, and so does `N` for the `k`, `kh`, and `kl` forms.
//!
//! [`Selection::DropLowest(1)`]: Selection::DropLowest
//! [`Selection::DropHighest(1)`]: Selection::DropHighest
//! [`Selection::DropLowest(N)`]: Selection::DropLowest
//! [`Selection::DropHighest(N)`]: Selection::DropHighest
//! [`Selection::KeepLowest(N)`]: Selection::KeepLowest
//! [`Selection::KeepHighest(N)`]: Selection::KeepHighest

use alloc::{
	boxed::Box,
	format,
	string::{String, ToString},
	vec::Vec,
};
use core::str;

use chumsky::prelude::*;

use crate::{
	dice::{Dice, Selection},
	expr::Expr,
};

/// Generates a parser that specifically handles dice with or without a selection rule like "d20", "2d20kh", "4d6-l",
/// "8d6d2", etc.
#[must_use]
pub fn dice_part<'src>() -> impl Parser<'src, &'src str, Dice, extra::Err<Rich<'src, char>>> + Clone {
	// Parser for a required selection count
	let count = text::int::<&'src str, _, _>(10).try_map(|count: &str, span| {
		count
			.parse::<u16>()
			.map_err(|err| Rich::custom(span, format!("Selection count: {err}")))
	});

	// Parser for an optional selection count, defaulting to 1
	let opt_count = text::int::<&'src str, _, _>(10).or_not().try_map(|count: Option<&str>, span| {
		count
			.unwrap_or("1")
			.parse::<u16>()
			.map_err(|err| Rich::custom(span, format!("Selection count: {err}")))
	});

	// Parser for selection rules, most specific first
	let selection = choice((
		// Drop one lowest/highest (e.g. -l, -h)
		just("-l").to(Selection::DropLowest(1)),
		just("-h").to(Selection::DropHighest(1)),
		// Drop highest (e.g. dh2)
		just("dh").ignore_then(count.clone()).map(Selection::DropHighest),
		// Drop lowest (e.g. dl2, d2)
		just("dl").ignore_then(count.clone()).map(Selection::DropLowest),
		just('d').ignore_then(count.clone()).map(Selection::DropLowest),
		// Keep lowest (e.g. kl, kl2, v2)
		just("kl").ignore_then(opt_count.clone()).map(Selection::KeepLowest),
		just('v').ignore_then(count.clone()).map(Selection::KeepLowest),
		// Keep highest (e.g. k, kh, kh2, ^2)
		just("kh").ignore_then(opt_count.clone()).map(Selection::KeepHighest),
		just('k').ignore_then(opt_count).map(Selection::KeepHighest),
		just('^').ignore_then(count).map(Selection::KeepHighest),
	));

	// Parser for dice expressions
	text::int(10)
		.or_not()
		.then_ignore(just('d'))
		.then(text::int(10))
		.then(selection.or_not())
		.try_map(|((count, sides), selection), span| {
			let count = count
				.unwrap_or("1")
				.parse()
				.map_err(|err| Rich::custom(span, format!("Dice count: {err}")))?;
			let sides = sides
				.parse()
				.map_err(|err| Rich::custom(span, format!("Dice sides: {err}")))?;

			let dice = Dice {
				count,
				sides,
				selection,
			};
			if dice.is_valid() {
				Ok(dice)
			} else {
				Err(Rich::custom(span, format!("{dice} must have at least one die with at least one side")))
			}
		})
}

/// Generates a parser that specifically handles dice with or without a selection rule like "d20", "2d20kh", "4d6-l",
/// "8d6d2", etc. and expects end of input
#[must_use]
pub fn dice<'src>() -> impl Parser<'src, &'src str, Dice, extra::Err<Rich<'src, char>>> + Clone {
	dice_part().then_ignore(end())
}

/// Generates a parser that handles full expressions including mathematical operations, grouping with parentheses,
/// dice, etc.
#[must_use]
pub fn expr_part<'src>() -> impl Parser<'src, &'src str, Expr, extra::Err<Rich<'src, char>>> + Clone {
	// Helper function for operators
	let op = |c| just(c).padded();

	recursive(|expr| {
		// Parser for numbers, with an optional fractional part
		let num = text::int(10)
			.then(just('.').ignore_then(text::digits(10).collect::<String>()).or_not())
			.try_map(|(int, frac): (&str, Option<String>), span| {
				let literal = match frac {
					Some(frac) => format!("{int}.{frac}"),
					None => int.to_string(),
				};
				literal
					.parse()
					.map(Expr::Num)
					.map_err(|err| Rich::custom(span, format!("Number: {err}")))
			});

		// Parser for dice expressions
		let dice = dice_part().map(Expr::Dice);

		// Parser for expressions enclosed in parentheses
		let group = expr
			.delimited_by(just('('), just(')'))
			.map(|inner| Expr::Group(Box::new(inner)));

		let atom = dice.or(num).or(group).padded();

		// Parser for negative sign
		let unary = op('-').repeated().foldr(atom, |_op, rhs| Expr::Neg(Box::new(rhs)));

		// Parser for multiplication and division
		let product = unary.clone().foldl(
			choice((op('*').to(Expr::Mul as fn(_, _) -> _), op('/').to(Expr::Div as fn(_, _) -> _)))
				.then(unary)
				.repeated(),
			|lhs, (op, rhs)| op(Box::new(lhs), Box::new(rhs)),
		);

		// Parser for addition and subtraction operators
		product.clone().foldl(
			choice((op('+').to(Expr::Add as fn(_, _) -> _), op('-').to(Expr::Sub as fn(_, _) -> _)))
				.then(product)
				.repeated(),
			|lhs, (op, rhs)| op(Box::new(lhs), Box::new(rhs)),
		)
	})
}

/// Generates a parser that handles full expressions including mathematical operations, grouping with parentheses,
/// dice, etc. and expects end of input
#[must_use]
pub fn expr<'src>() -> impl Parser<'src, &'src str, Expr, extra::Err<Rich<'src, char>>> + Clone {
	expr_part().then_ignore(end())
}

/// Error that can occur while parsing a string into a dice or expression-related structure via [`str::FromStr`].
#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
#[error("{details}")]
#[non_exhaustive]
pub struct Error {
	/// Details of every problem encountered while parsing, joined with "; "
	pub details: String,
}

impl Error {
	/// Builds an error from a list of chumsky errors.
	fn from_rich(errs: &[Rich<'_, char>]) -> Self {
		Self {
			details: errs.iter().map(ToString::to_string).collect::<Vec<_>>().join("; "),
		}
	}
}

impl str::FromStr for Dice {
	type Err = Error;

	/// Parses a dice string (e.g. `4d6-L`, `2d20kh1`). Input is lowercased first.
	fn from_str(s: &str) -> Result<Self, Self::Err> {
		let lc = s.to_lowercase();
		let result = dice().parse(&lc).into_result().map_err(|errs| Error::from_rich(&errs));
		result
	}
}

impl str::FromStr for Expr {
	type Err = Error;

	/// Parses a full expression string (e.g. `2d20kh1 + 3d6-L`). Input is lowercased first.
	fn from_str(s: &str) -> Result<Self, Self::Err> {
		let lc = s.to_lowercase();
		let result = expr().parse(&lc).into_result().map_err(|errs| Error::from_rich(&errs));
		result
	}
}
