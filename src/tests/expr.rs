use crate::{
	dice::{
		roller::{FastRand as FastRandRoller, Iter as IterRoller, Val as ValRoller},
		Dice,
	},
	expr::{CalcError, Describe, EvalError, Evaled, Expr, Token},
};

#[test]
fn basic_negation() {
	let expr = Expr::Neg(Box::new(Expr::Num(42.0)));
	let result = expr.eval(&mut FastRandRoller::default()).unwrap().calc();
	assert_eq!(result.unwrap(), -42.0);
}

#[test]
fn basic_addition() {
	let expr = Expr::Add(Box::new(Expr::Num(42.0)), Box::new(Expr::Num(69.0)));
	let result = expr.eval(&mut FastRandRoller::default()).unwrap().calc();
	assert_eq!(result.unwrap(), 111.0);
}

#[test]
fn basic_subtraction() {
	let expr = Expr::Sub(Box::new(Expr::Num(42.0)), Box::new(Expr::Num(69.0)));
	let result = expr.eval(&mut FastRandRoller::default()).unwrap().calc();
	assert_eq!(result.unwrap(), -27.0);
}

#[test]
fn basic_multiplication() {
	let expr = Expr::Mul(Box::new(Expr::Num(42.0)), Box::new(Expr::Num(69.0)));
	let result = expr.eval(&mut FastRandRoller::default()).unwrap().calc();
	assert_eq!(result.unwrap(), 2898.0);
}

#[test]
fn basic_division() {
	let expr = Expr::Div(Box::new(Expr::Num(50.0)), Box::new(Expr::Num(8.0)));
	let result = expr.eval(&mut FastRandRoller::default()).unwrap().calc();
	assert_eq!(result.unwrap(), 6.25);
}

#[test]
fn division_by_zero() {
	let expr = Expr::Div(Box::new(Expr::Num(5.0)), Box::new(Expr::Num(0.0)));
	let result = expr.eval(&mut FastRandRoller::default()).unwrap().calc();
	assert!(matches!(result, Err(CalcError::Division(..))));
}

#[test]
fn overflow() {
	let expr = Expr::Mul(Box::new(Expr::Num(f64::MAX)), Box::new(Expr::Num(2.0)));
	let result = expr.eval(&mut FastRandRoller::default()).unwrap().calc();
	assert!(result.is_err());
	assert!(result.unwrap_err().to_string().contains("overflow"));
}

#[test]
fn complex_math() {
	let expr = Expr::Sub(
		Box::new(Expr::Mul(
			Box::new(Expr::Neg(Box::new(Expr::Num(5.0)))),
			Box::new(Expr::Group(Box::new(Expr::Add(
				Box::new(Expr::Num(3.0)),
				Box::new(Expr::Num(1.0)),
			)))),
		)),
		Box::new(Expr::Div(
			Box::new(Expr::Neg(Box::new(Expr::Num(4.0)))),
			Box::new(Expr::Num(2.0)),
		)),
	);
	let result = expr.eval(&mut FastRandRoller::default()).unwrap().calc();
	assert_eq!(result.unwrap(), -18.0);
}

#[test]
fn basic_dice_math() {
	let dice = Dice::new(4, 6);
	let expr = Expr::Add(Box::new(Expr::Dice(dice)), Box::new(Expr::Num(8.0)));
	let evaled = expr.eval(&mut FastRandRoller::default()).unwrap();

	let dice_total = match evaled {
		Evaled::Add(ref boxed, _) => match boxed.as_ref() {
			Evaled::Dice(evaled_dice) => f64::from(evaled_dice.total().unwrap()),
			_ => panic!(),
		},
		_ => panic!(),
	};

	let total = evaled.calc().unwrap();
	assert_eq!(total, dice_total + 8.0);
}

#[test]
fn dice_selection_applied_during_eval() {
	let dice = Dice::builder().count(4).sides(6).drop_lowest(1).build();
	let expr = Expr::Mul(Box::new(Expr::Dice(dice)), Box::new(Expr::Num(2.0)));
	let evaled = expr.eval(&mut IterRoller::new([3, 6, 1, 2])).unwrap();
	assert_eq!(evaled.describe(None), "4d6dl1[3, 6, 1 (x), 2] * 2");
	assert_eq!(evaled.calc().unwrap(), 22.0);
}

#[test]
fn invalid_dice_fail_eval() {
	let expr = Expr::Add(Box::new(Expr::Num(1.0)), Box::new(Expr::Dice(Dice::new(0, 6))));
	let result = expr.eval(&mut ValRoller(1));
	assert!(matches!(result, Err(EvalError::Dice(Expr::Dice(..), ..))));
}

#[test]
fn deterministic() {
	assert!(Expr::Num(4.0).is_deterministic());
	assert!(Expr::Dice(Dice::new(3, 1)).is_deterministic());
	assert!(!Expr::Dice(Dice::new(3, 6)).is_deterministic());
	assert!(!Expr::Add(Box::new(Expr::Num(4.0)), Box::new(Expr::Dice(Dice::new(1, 6)))).is_deterministic());
	assert!(Expr::Group(Box::new(Expr::Neg(Box::new(Expr::Num(1.5))))).is_deterministic());
}

#[test]
fn tokens_in_written_order() {
	let dice = Dice::new(1, 20);
	let expr = Expr::Div(
		Box::new(Expr::Neg(Box::new(Expr::Dice(dice)))),
		Box::new(Expr::Group(Box::new(Expr::Sub(
			Box::new(Expr::Num(2.5)),
			Box::new(Expr::Num(1.0)),
		)))),
	);
	assert_eq!(
		expr.tokens(),
		[
			Token::Operator('-'),
			Token::Dice(&dice),
			Token::Operator('/'),
			Token::OpenParen,
			Token::Num(2.5),
			Token::Operator('-'),
			Token::Num(1.0),
			Token::CloseParen,
		]
	);
}

#[test]
fn describe_keeps_groups_and_disambiguates() {
	let grouped = Expr::Mul(
		Box::new(Expr::Group(Box::new(Expr::Add(
			Box::new(Expr::Num(1.0)),
			Box::new(Expr::Num(2.0)),
		)))),
		Box::new(Expr::Num(3.0)),
	);
	assert_eq!(grouped.to_string(), "(1 + 2) * 3");

	let ungrouped = Expr::Mul(
		Box::new(Expr::Add(Box::new(Expr::Num(1.0)), Box::new(Expr::Num(2.0)))),
		Box::new(Expr::Num(3.0)),
	);
	assert_eq!(ungrouped.to_string(), "(1 + 2) * 3");

	let negated = Expr::Neg(Box::new(Expr::Add(Box::new(Expr::Num(1.0)), Box::new(Expr::Num(2.0)))));
	assert_eq!(negated.to_string(), "-(1 + 2)");
}

#[test]
fn into_owned_preserves_results() {
	let dice = Dice::new(2, 6);
	let expr = Expr::Dice(dice);
	let evaled = expr.eval(&mut IterRoller::new([2, 5])).unwrap();
	let owned = evaled.clone().into_owned();
	assert_eq!(owned, evaled);
	assert_eq!(owned.calc().unwrap(), 7.0);
}
