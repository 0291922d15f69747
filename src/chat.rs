//! Segmentation of chat messages with embedded dice expressions.
//!
//! Any `[...]` segment of a message that holds a valid expression is evaluated and replaced with a positional
//! placeholder (`{0}`, `{1}`, ...) referring to its result, so the message can be re-hydrated for display later.
//! Segments that don't evaluate are left in the message exactly as written, brackets included.
//!
//! When a message has at least one roll, its content is a format string: literal braces from the message are doubled
//! (`{{`, `}}`) so they can't be mistaken for placeholders. Messages without rolls are kept verbatim.
//! Requires the `parse` feature (enabled by default).

use alloc::{format, string::String, vec::Vec};

use crate::{detail::DiceRollResult, dice::roller::Roller};

/// Chat message with its dice expressions replaced by placeholders
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "camelCase"))]
#[non_exhaustive]
pub struct Segmented {
	/// Message text, with a `{i}` placeholder for the `i`th entry of [`Self::dice_rolls`].
	/// Literal braces are doubled if there are any rolls.
	pub content: String,

	/// Results of the successfully evaluated dice expressions, in the order they appear in the message
	pub dice_rolls: Vec<DiceRollResult>,
}

impl Segmented {
	/// Fills the placeholders of the content using a function that renders each roll result, in a single pass over
	/// the content. Rendered text is never scanned for placeholders itself, doubled braces become single ones, and a
	/// placeholder without a matching roll is left as written.
	///
	/// # Examples
	/// ```
	/// use rollwright::{chat, dice::roller::Val as ValRoller};
	///
	/// let segmented = chat::segment("Attack: [1d20+5] hits!", &mut ValRoller(12));
	/// assert_eq!(segmented.hydrate(|roll| roll.result.to_string()), "Attack: 17 hits!");
	///
	/// let segmented = chat::segment("{0} stays, [1d4] rolls", &mut ValRoller(3));
	/// assert_eq!(segmented.content, "{{0}} stays, {0} rolls");
	/// assert_eq!(segmented.hydrate(|roll| roll.result.to_string()), "{0} stays, 3 rolls");
	/// ```
	#[must_use]
	pub fn hydrate(&self, mut render: impl FnMut(&DiceRollResult) -> String) -> String {
		if self.dice_rolls.is_empty() {
			return self.content.clone();
		}

		let mut hydrated = String::with_capacity(self.content.len());
		let mut rest = self.content.as_str();
		while let Some(pos) = rest.find(|c| c == '{' || c == '}') {
			hydrated.push_str(&rest[..pos]);
			rest = &rest[pos..];

			if let Some(tail) = rest.strip_prefix("{{") {
				hydrated.push('{');
				rest = tail;
			} else if let Some(tail) = rest.strip_prefix("}}") {
				hydrated.push('}');
				rest = tail;
			} else if let Some((roll, tail)) = self.placeholder_at(rest) {
				hydrated.push_str(&render(roll));
				rest = tail;
			} else {
				// Lone brace, both are one byte
				hydrated.push_str(&rest[..1]);
				rest = &rest[1..];
			}
		}
		hydrated.push_str(rest);

		hydrated
	}

	/// Reads a `{i}` placeholder from the start of some text, returning its roll and the text after it.
	fn placeholder_at<'s>(&self, text: &'s str) -> Option<(&DiceRollResult, &'s str)> {
		let inner = text.strip_prefix('{')?;
		let end = inner.find('}')?;
		let digits = &inner[..end];
		if digits.is_empty() || !digits.bytes().all(|b| b.is_ascii_digit()) {
			return None;
		}

		let idx: usize = digits.parse().ok()?;
		Some((self.dice_rolls.get(idx)?, &inner[end + 1..]))
	}
}

/// Single piece of a chat message
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[non_exhaustive]
pub enum Segment<'a> {
	/// Text outside of brackets
	Text(&'a str),

	/// Text between a pair of brackets (brackets not included)
	Bracketed(&'a str),
}

/// Splits a message into plain text and bracketed segments, in order.
///
/// Brackets don't nest: each `[` is closed by the first `]` after it, so `[a [b] c]` yields the bracketed segment
/// `a [b` followed by the text ` c]`. A bracketed segment can't span a line break, and a `[` without a matching `]`
/// is plain text.
///
/// # Examples
/// ```
/// use rollwright::chat::{split, Segment};
///
/// assert_eq!(
/// 	split("roll [2d6] now"),
/// 	[Segment::Text("roll "), Segment::Bracketed("2d6"), Segment::Text(" now")]
/// );
/// ```
#[must_use]
pub fn split(message: &str) -> Vec<Segment<'_>> {
	let mut segments = Vec::new();
	let mut text_start = 0;
	let mut search_from = 0;

	while let Some(open) = message[search_from..].find('[').map(|pos| pos + search_from) {
		let inner_start = open + 1;
		let line_end = message[inner_start..]
			.find('\n')
			.map_or(message.len(), |pos| pos + inner_start);

		match message[inner_start..line_end].find(']') {
			Some(len) => {
				if open > text_start {
					segments.push(Segment::Text(&message[text_start..open]));
				}
				segments.push(Segment::Bracketed(&message[inner_start..inner_start + len]));
				text_start = inner_start + len + 1;
				search_from = text_start;
			}
			None => search_from = inner_start,
		}
	}

	if text_start < message.len() {
		segments.push(Segment::Text(&message[text_start..]));
	}

	segments
}

/// Evaluates every bracketed dice expression in a message, replacing each one that evaluates successfully with a
/// positional placeholder. Placeholder indices only count successful expressions.
///
/// This never fails: anything that isn't a valid expression stays in the message as written. If nothing evaluates,
/// the content is the message itself; otherwise literal braces are doubled (see the [module docs](self)).
///
/// # Examples
/// ```
/// use rollwright::{chat, dice::roller::Val as ValRoller};
///
/// let segmented = chat::segment("[not-a-roll] then [1d20+5] and [2d6]", &mut ValRoller(3));
/// assert_eq!(segmented.content, "[not-a-roll] then {0} and {1}");
/// assert_eq!(segmented.dice_rolls.len(), 2);
/// assert_eq!(segmented.dice_rolls[0].result, 8.0);
/// assert_eq!(segmented.dice_rolls[1].result, 6.0);
/// ```
pub fn segment(message: &str, rng: &mut impl Roller) -> Segmented {
	let mut content = String::with_capacity(message.len());
	let mut dice_rolls = Vec::new();

	for seg in split(message) {
		match seg {
			Segment::Text(text) => push_escaped(&mut content, text),
			Segment::Bracketed(notation) => {
				tracing::trace!(notation, "evaluating bracketed segment");
				match DiceRollResult::evaluate(notation, rng) {
					Ok(result) => {
						content.push_str(&placeholder(dice_rolls.len()));
						dice_rolls.push(result);
					}
					Err(err) => {
						tracing::debug!(notation, error = %err, "bracketed segment left as text");
						content.push('[');
						push_escaped(&mut content, notation);
						content.push(']');
					}
				}
			}
		}
	}

	tracing::debug!(rolls = dice_rolls.len(), "segmented chat message");
	if dice_rolls.is_empty() {
		content = message.into();
	}
	Segmented { content, dice_rolls }
}

/// Pushes text onto the content, doubling any braces.
fn push_escaped(content: &mut String, text: &str) {
	for c in text.chars() {
		if c == '{' || c == '}' {
			content.push(c);
		}
		content.push(c);
	}
}

/// Builds the placeholder for the roll result at an index.
fn placeholder(idx: usize) -> String {
	format!("{{{idx}}}")
}
