//! AST-like data structures for evaluating full mathematical dice expressions and working with their results.

use alloc::{
	boxed::Box,
	format,
	string::{String, ToString},
	vec::Vec,
};
use core::fmt;

use crate::dice::{roller::Roller, Dice, Error as DiceError, Rolled};

/// Generates an implementation of [`HasOpType`] for an enum type.
/// This is very tightly coupled with the expected variants:
/// `Num`, `Dice`, `Group`, `Neg`, `Add`, `Sub`, `Mul`, and `Div`.
macro_rules! op_type_impl {
	($name:ty) => {
		impl HasOpType for $name {
			fn op_type(&self) -> OpType {
				match self {
					Self::Num(..) | Self::Dice(..) | Self::Group(..) => OpType::Value,
					Self::Neg(..) => OpType::Unary,
					Self::Add(..) | Self::Sub(..) => OpType::Additive,
					Self::Mul(..) | Self::Div(..) => OpType::Multiplicative,
				}
			}
		}
	};
}

/// Individual elements of a full mathematical dice expression
#[derive(Debug, Clone, PartialEq)]
#[non_exhaustive]
pub enum Expr {
	/// Standalone number (integer or decimal)
	Num(f64),

	/// Dice literal
	Dice(Dice),

	/// Expression that was explicitly wrapped in parentheses
	Group(Box<Self>),

	/// Negation of an expression (makes the result of it negative)
	Neg(Box<Self>),

	/// Sum of two expressions
	Add(Box<Self>, Box<Self>),

	/// Difference of two expressions
	Sub(Box<Self>, Box<Self>),

	/// Product of two expressions
	Mul(Box<Self>, Box<Self>),

	/// Quotient of two expressions
	Div(Box<Self>, Box<Self>),
}

op_type_impl!(Expr);

impl Expr {
	/// Evaluates the expression. For most types of expressions, this will directly result in a 1:1 equivalent
	/// [`Evaled`], with the notable exception of [`Expr::Dice`]. For dice expressions, the dice they contain are
	/// rolled with the given roller (and their selection rules applied), resulting in an [`Evaled::Dice`] with the
	/// [`Rolled`] set of dice.
	///
	/// # Errors
	/// If an error occurs during dice rolling, an error variant will be returned.
	///
	/// # Examples
	/// ```
	/// use rollwright::{dice::roller::Iter as IterRoller, expr::{Describe, Expr}};
	///
	/// let expr: Expr = "2d20kh1 + 5".parse()?;
	/// let evaled = expr.eval(&mut IterRoller::new([4, 17]))?;
	/// assert_eq!(evaled.describe(None), "2d20kh1[4 (x), 17] + 5");
	/// assert_eq!(evaled.calc()?, 22.0);
	/// # Ok::<(), Box<dyn std::error::Error>>(())
	/// ```
	pub fn eval(&self, rng: &mut impl Roller) -> Result<Evaled<'_>, EvalError> {
		Ok(match self {
			Self::Num(x) => Evaled::Num(*x),
			Self::Dice(dice) => Evaled::Dice(rng.roll(dice, true).map_err(|err| EvalError::Dice(self.clone(), err))?),

			Self::Group(x) => Evaled::Group(Box::new(x.eval(rng)?)),
			Self::Neg(x) => Evaled::Neg(Box::new(x.eval(rng)?)),

			Self::Add(a, b) => Evaled::Add(Box::new(a.eval(rng)?), Box::new(b.eval(rng)?)),
			Self::Sub(a, b) => Evaled::Sub(Box::new(a.eval(rng)?), Box::new(b.eval(rng)?)),
			Self::Mul(a, b) => Evaled::Mul(Box::new(a.eval(rng)?), Box::new(b.eval(rng)?)),
			Self::Div(a, b) => Evaled::Div(Box::new(a.eval(rng)?), Box::new(b.eval(rng)?)),
		})
	}

	/// Checks whether the expression is deterministic (will always yield the same value with every evaluation).
	/// A [`Self::Num`] will always return `true`, a [`Self::Dice`] will always return `false` unless the dice they
	/// contain only have one side, and all unary and binary expressions forward the check to their children.
	#[must_use]
	pub fn is_deterministic(&self) -> bool {
		match self {
			Self::Num(..) => true,
			Self::Dice(dice) => dice.sides == 1,
			Self::Group(x) | Self::Neg(x) => x.is_deterministic(),
			Self::Add(a, b) | Self::Sub(a, b) | Self::Mul(a, b) | Self::Div(a, b) => {
				a.is_deterministic() && b.is_deterministic()
			}
		}
	}

	/// Flattens the expression into its tokens, in the order they appear in the written expression.
	///
	/// # Examples
	/// ```
	/// use rollwright::{dice::Dice, expr::{Expr, Token}};
	///
	/// let expr: Expr = "(2d6 + 3) * 2".parse()?;
	/// assert_eq!(
	/// 	expr.tokens(),
	/// 	[
	/// 		Token::OpenParen,
	/// 		Token::Dice(&Dice::new(2, 6)),
	/// 		Token::Operator('+'),
	/// 		Token::Num(3.0),
	/// 		Token::CloseParen,
	/// 		Token::Operator('*'),
	/// 		Token::Num(2.0),
	/// 	]
	/// );
	/// # Ok::<(), rollwright::parse::Error>(())
	/// ```
	#[must_use]
	pub fn tokens(&self) -> Vec<Token<'_>> {
		let mut tokens = Vec::new();
		self.push_tokens(&mut tokens);
		tokens
	}

	/// Pushes the tokens of the expression onto a list, in written order.
	fn push_tokens<'a>(&'a self, tokens: &mut Vec<Token<'a>>) {
		match self {
			Self::Num(x) => tokens.push(Token::Num(*x)),
			Self::Dice(dice) => tokens.push(Token::Dice(dice)),
			Self::Group(x) => {
				tokens.push(Token::OpenParen);
				x.push_tokens(tokens);
				tokens.push(Token::CloseParen);
			}
			Self::Neg(x) => {
				tokens.push(Token::Operator('-'));
				x.push_tokens(tokens);
			}
			Self::Add(a, b) | Self::Sub(a, b) | Self::Mul(a, b) | Self::Div(a, b) => {
				a.push_tokens(tokens);
				tokens.push(Token::Operator(self.op_symbol()));
				b.push_tokens(tokens);
			}
		}
	}

	/// Gets the operator symbol for binary expressions, or `'-'` for negation. Values have no symbol and get `' '`.
	const fn op_symbol(&self) -> char {
		match self {
			Self::Add(..) => '+',
			Self::Sub(..) | Self::Neg(..) => '-',
			Self::Mul(..) => '*',
			Self::Div(..) => '/',
			Self::Num(..) | Self::Dice(..) | Self::Group(..) => ' ',
		}
	}
}

impl Describe for Expr {
	/// Builds a full usable expression string from the expressions. Operations are grouped with parentheses whenever
	/// the order of operations could be considered ambiguous, such as when mixing addition and multiplication together.
	/// All strings output from this should result in the exact same expression layout when re-parsing them.
	///
	/// `list_limit` does not affect the output of this implementation in any way since there are no possible lists of
	/// elements included, so it is always safe to pass `None`.
	fn describe(&self, _list_limit: Option<usize>) -> String {
		match self {
			Self::Num(x) => x.to_string(),
			Self::Dice(dice) => dice.to_string(),
			Self::Group(x) => paren_wrap(x.describe(None)),

			Self::Neg(x) => match x.as_ref() {
				Self::Num(..) | Self::Dice(..) | Self::Group(..) => format!("-{}", x.describe(None)),
				_ => format!("-({})", x.describe(None)),
			},

			Self::Add(a, b) => self.describe_binary_expr('+', a.as_ref(), b.as_ref(), None),
			Self::Sub(a, b) => self.describe_binary_expr('-', a.as_ref(), b.as_ref(), None),
			Self::Mul(a, b) => self.describe_binary_expr('*', a.as_ref(), b.as_ref(), None),
			Self::Div(a, b) => self.describe_binary_expr('/', a.as_ref(), b.as_ref(), None),
		}
	}
}

impl fmt::Display for Expr {
	/// Formats the value using the given formatter. [Read more][core::fmt::Debug::fmt()]
	///
	/// The output of this implementation is equivalent to [`Self::describe(None)`].
	///
	/// [`Self::describe(None)`]: Self::describe()
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		write!(f, "{}", self.describe(None))
	}
}

/// Single token of an expression, as written
#[derive(Debug, Clone, Copy, PartialEq)]
#[non_exhaustive]
pub enum Token<'a> {
	/// Standalone number
	Num(f64),

	/// Dice group
	Dice(&'a Dice),

	/// Arithmetic operator (`+`, `-`, `*`, `/`)
	Operator(char),

	/// Opening parenthesis
	OpenParen,

	/// Closing parenthesis
	CloseParen,
}

/// Individual elements of an evaluated mathematical dice expression
#[derive(Debug, Clone, PartialEq)]
#[non_exhaustive]
pub enum Evaled<'a> {
	/// Standalone number
	Num(f64),

	/// Rolled dice
	Dice(Rolled<'a>),

	/// Expression that was explicitly wrapped in parentheses
	Group(Box<Self>),

	/// Negation of an expression (makes the result of it negative)
	Neg(Box<Self>),

	/// Sum of two expressions
	Add(Box<Self>, Box<Self>),

	/// Difference of two expressions
	Sub(Box<Self>, Box<Self>),

	/// Product of two expressions
	Mul(Box<Self>, Box<Self>),

	/// Quotient of two expressions
	Div(Box<Self>, Box<Self>),
}

op_type_impl!(Evaled<'_>);

impl Evaled<'_> {
	/// Calculates the final result of the evaluated expression and all of its children (if any).
	/// Each set of rolled dice contributes its [`Rolled::total()`].
	///
	/// # Errors
	/// If there is a division by zero, a non-finite result, or an error calculating the total of a set of dice rolls,
	/// an error variant will be returned.
	pub fn calc(&self) -> Result<f64, CalcError> {
		let result = match self {
			Self::Num(x) => *x,
			Self::Dice(rolled) => rolled
				.total()
				.map_err(|err| CalcError::Dice(self.clone().into_owned(), err))?
				.into(),

			Self::Group(x) => x.calc()?,
			Self::Neg(x) => -x.calc()?,

			Self::Add(a, b) => a.calc()? + b.calc()?,
			Self::Sub(a, b) => a.calc()? - b.calc()?,
			Self::Mul(a, b) => a.calc()? * b.calc()?,
			Self::Div(a, b) => {
				let a_val = a.calc()?;
				let b_val = b.calc()?;
				if b_val == 0.0 {
					return Err(CalcError::Division(self.clone().into_owned()));
				}
				a_val / b_val
			}
		};

		if result.is_finite() {
			Ok(result)
		} else {
			Err(CalcError::Overflow(self.clone().into_owned()))
		}
	}

	/// Moves all of self's owned data into a new instance and clones any unowned data in order to create a `'static`
	/// instance of self.
	#[must_use]
	pub fn into_owned(self) -> Evaled<'static> {
		match self {
			Self::Num(x) => Evaled::Num(x),
			Self::Dice(rolled) => Evaled::Dice(rolled.into_owned()),
			Self::Group(x) => Evaled::Group(Box::new(x.into_owned())),
			Self::Neg(x) => Evaled::Neg(Box::new(x.into_owned())),
			Self::Add(a, b) => Evaled::Add(Box::new(a.into_owned()), Box::new(b.into_owned())),
			Self::Sub(a, b) => Evaled::Sub(Box::new(a.into_owned()), Box::new(b.into_owned())),
			Self::Mul(a, b) => Evaled::Mul(Box::new(a.into_owned()), Box::new(b.into_owned())),
			Self::Div(a, b) => Evaled::Div(Box::new(a.into_owned()), Box::new(b.into_owned())),
		}
	}
}

impl Describe for Evaled<'_> {
	fn describe(&self, list_limit: Option<usize>) -> String {
		match self {
			Self::Num(x) => x.to_string(),
			Self::Dice(roll) => roll.describe(list_limit),
			Self::Group(x) => paren_wrap(x.describe(list_limit)),

			Self::Neg(x) => match x.as_ref() {
				Self::Num(..) | Self::Dice(..) | Self::Group(..) => format!("-{}", x.describe(list_limit)),
				_ => format!("-({})", x.describe(list_limit)),
			},

			Self::Add(a, b) => self.describe_binary_expr('+', a.as_ref(), b.as_ref(), list_limit),
			Self::Sub(a, b) => self.describe_binary_expr('-', a.as_ref(), b.as_ref(), list_limit),
			Self::Mul(a, b) => self.describe_binary_expr('*', a.as_ref(), b.as_ref(), list_limit),
			Self::Div(a, b) => self.describe_binary_expr('/', a.as_ref(), b.as_ref(), list_limit),
		}
	}
}

impl fmt::Display for Evaled<'_> {
	/// Formats the value using the given formatter. [Read more][core::fmt::Debug::fmt()]
	///
	/// The output of this implementation is equivalent to [`Self::describe(None)`].
	///
	/// [`Self::describe(None)`]: Self::describe()
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		write!(f, "{}", self.describe(None))
	}
}

/// Error that can occur during [`Expr::eval()`]
#[derive(thiserror::Error, Debug)]
#[non_exhaustive]
pub enum EvalError {
	/// Dice-related error (likely during rolling)
	#[error("dice error while evaluating \"{0}\": {1}")]
	Dice(Expr, #[source] DiceError),
}

/// Error that can occur during [`Evaled::calc()`]
#[derive(thiserror::Error, Debug)]
#[non_exhaustive]
pub enum CalcError {
	/// Dice-related error (likely during totalling)
	#[error("dice error while calculating ({0}): {1}")]
	Dice(Evaled<'static>, #[source] DiceError),

	/// Result is too large to represent (infinite or not a number)
	#[error("overflow while calculating {0}")]
	Overflow(Evaled<'static>),

	/// Division by zero
	#[error("division by zero while calculating {0}")]
	Division(Evaled<'static>),
}

/// Operation type for an individual expression
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[allow(clippy::exhaustive_enums)]
pub enum OpType {
	/// Single value, no operation
	Value,

	/// Unary operation
	Unary,

	/// Additive operation (sum or difference)
	Additive,

	/// Multiplicative operation (product or quotient)
	Multiplicative,
}

/// Trait that offers [`OpType`]-related information
pub trait HasOpType {
	/// Gets the type of this expression.
	fn op_type(&self) -> OpType;
}

/// Trait to allow creation of expanded descriptions with an optional max number of individual listed results where
/// applicable
pub trait Describe {
	/// Builds a detailed expression string with additional information about non-deterministic elements.
	/// Any elements of the expression that can have a different result between multiple evaluations or multiple results
	/// should list all of the specific individual results that occurred (ideally, up to `list_limit` of them).
	#[must_use]
	fn describe(&self, list_limit: Option<usize>) -> String;
}

/// Trait for describing binary expressions with influence from own type.
/// Used for, e.g. wrapping parentheses around parts of expressions based on [`OpType`] of self and the expression.
trait DescribeBinaryExpr: HasOpType + Describe {
	/// Builds a detailed description for a binary expression with parentheses added to disambiguate mixed
	/// additive/multiplicative operations.
	fn describe_binary_expr(
		&self,
		op: char,
		a: &impl DescribeBinaryExpr,
		b: &impl DescribeBinaryExpr,
		list_limit: Option<usize>,
	) -> String {
		format!(
			"{} {} {}",
			match (self.op_type(), a.op_type()) {
				(OpType::Additive | OpType::Unary, OpType::Multiplicative)
				| (OpType::Multiplicative | OpType::Unary, OpType::Additive)
				| (OpType::Unary, OpType::Unary) => paren_wrap(a.describe(list_limit)),
				_ => a.describe(list_limit),
			},
			op,
			match (self.op_type(), b.op_type()) {
				(OpType::Additive | OpType::Unary, OpType::Multiplicative)
				| (OpType::Multiplicative | OpType::Unary, OpType::Additive)
				| (OpType::Unary, OpType::Unary) => paren_wrap(b.describe(list_limit)),
				_ => b.describe(list_limit),
			}
		)
	}
}

impl<T: HasOpType + Describe> DescribeBinaryExpr for T {}

/// Wraps a string in parentheses.
#[must_use]
fn paren_wrap(mut text: String) -> String {
	text.insert(0, '(');
	text.push(')');
	text
}
