use std::{
	io::{self, Write},
	process::ExitCode,
};

use ariadne::{Color, Label, Report, ReportKind, Source};
use chumsky::Parser as _;
use clap::Parser;
use rollwright::{
	chat,
	dice::roller::FastRand as FastRandRoller,
	expr::{Describe, Expr},
	DiceRollResult,
};
use tracing_subscriber::EnvFilter;

/// Evaluates dice expressions (e.g. `2d20kh1 + 3d6-L`) or chat messages with bracketed expressions
#[derive(Debug, clap::Parser)]
#[command(version, about)]
struct Args {
	/// Treat the input as a chat message with bracketed dice expressions
	#[arg(short, long)]
	chat: bool,

	/// Print results as JSON
	#[arg(short, long)]
	json: bool,

	/// Seed for the dice roller (random if not given)
	#[arg(short, long, env = "ROLLWRIGHT_SEED")]
	seed: Option<u64>,

	/// Maximum number of individual dice to list per dice group
	#[arg(short, long)]
	list_limit: Option<usize>,

	/// Expression or message; read from stdin when omitted
	input: Vec<String>,
}

fn main() -> ExitCode {
	tracing_subscriber::fmt()
		.with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")))
		.with_writer(io::stderr)
		.init();

	let args = Args::parse();
	let input = if args.input.is_empty() {
		match read_stdin() {
			Ok(line) => line,
			Err(err) => {
				eprintln!("Unable to read input: {err}");
				return ExitCode::FAILURE;
			}
		}
	} else {
		// Combine all args so the input can be left unquoted even with spaces
		args.input.join(" ")
	};

	let mut rng = args.seed.map_or_else(FastRandRoller::default, FastRandRoller::with_seed);
	if args.chat {
		run_chat(&args, &input, &mut rng)
	} else {
		run_expr(&args, &input, &mut rng)
	}
}

/// Reads the first line available from stdin, prompting for it if stdin is interactive.
fn read_stdin() -> io::Result<String> {
	let mut lines = io::stdin().lines();

	// If there isn't already input available in stdin, display a prompt for it
	if lines.size_hint().1.is_none() {
		print!("Enter dice expression: ");
		io::stdout().flush()?;
	}

	lines.next().unwrap_or_else(|| Ok(String::new()))
}

/// Evaluates a single expression and prints the result.
fn run_expr(args: &Args, input: &str, rng: &mut FastRandRoller) -> ExitCode {
	let lc = input.to_lowercase();
	let expr: Expr = match rollwright::parser().parse(lc.as_str()).into_result() {
		Ok(expr) => expr,
		Err(errs) => {
			for err in errs {
				let span = *err.span();
				Report::build(ReportKind::Error, span.start..span.end)
					.with_message(err.to_string())
					.with_label(
						Label::new(span.start..span.end)
							.with_message(err.reason().to_string())
							.with_color(Color::Red),
					)
					.finish()
					.eprint(Source::from(&lc))
					.ok();
			}
			return ExitCode::FAILURE;
		}
	};

	let evaled = match expr.eval(rng) {
		Ok(evaled) => evaled,
		Err(err) => {
			eprintln!("Evaluation error: {err}");
			return ExitCode::FAILURE;
		}
	};

	let rolled = match DiceRollResult::from_evaled(&evaled) {
		Ok(rolled) => rolled,
		Err(err) => {
			eprintln!("Calculation error: {err}");
			return ExitCode::FAILURE;
		}
	};

	if args.json {
		return print_json(&rolled);
	}

	println!("Input: {input}");
	println!("Parsed: {expr}");
	println!("Deterministic: {}", expr.is_deterministic());
	println!();
	println!("Described: {}", evaled.describe(args.list_limit));
	println!("Total: {}", rolled.result);
	ExitCode::SUCCESS
}

/// Segments a chat message and prints the content along with each roll.
fn run_chat(args: &Args, input: &str, rng: &mut FastRandRoller) -> ExitCode {
	let segmented = chat::segment(input, rng);

	if args.json {
		return print_json(&segmented);
	}

	println!("Content: {}", segmented.content);
	for (idx, roll) in segmented.dice_rolls.iter().enumerate() {
		println!("{{{idx}}}: {}", roll.result);
	}
	println!();
	println!("Rendered: {}", segmented.hydrate(|roll| roll.result.to_string()));
	ExitCode::SUCCESS
}

/// Prints a value as pretty JSON.
fn print_json(value: &impl serde::Serialize) -> ExitCode {
	match serde_json::to_string_pretty(value) {
		Ok(json) => {
			println!("{json}");
			ExitCode::SUCCESS
		}
		Err(err) => {
			eprintln!("Unable to serialize result: {err}");
			ExitCode::FAILURE
		}
	}
}
