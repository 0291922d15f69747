//! Bounded chat history with publish/subscribe fan-out.
//! Requires the `history` feature (enabled by default).
//!
//! Messages are segmented with [`chat::segment()`](crate::chat::segment) and appended one at a time. Once the history
//! holds its capacity, appending evicts the oldest message. Every append is broadcast to the current subscribers.

use alloc::{collections::VecDeque, string::String, sync::Arc, vec::Vec};

use tokio::sync::broadcast;

use crate::{
	chat::{self, Segmented},
	detail::DiceRollResult,
	dice::roller::Roller,
};

/// Number of messages kept by [`History::default()`]
pub const DEFAULT_CAPACITY: usize = 100;

/// Number of undelivered messages a subscriber may lag behind by default before it starts missing some
pub const DEFAULT_BROADCAST_BUFFER: usize = 64;

/// Single message in the chat history
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "camelCase"))]
#[non_exhaustive]
pub struct ChatMessage {
	/// Sequential ID, unique within the history that created the message
	pub id: u64,

	/// Name of whoever sent the message
	pub author: String,

	/// Message text, with a `{i}` placeholder for the `i`th entry of [`Self::dice_rolls`].
	/// Literal braces are doubled if there are any rolls; see [`Segmented::hydrate`](crate::chat::Segmented::hydrate).
	pub content: String,

	/// Results of the dice expressions from the message
	pub dice_rolls: Vec<DiceRollResult>,
}

/// Settings for a [`History`]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[allow(clippy::exhaustive_structs)]
pub struct HistoryConfig {
	/// Maximum number of messages kept; clamped to at least 1
	pub capacity: usize,

	/// Size of the broadcast buffer for subscribers; clamped to at least 1
	pub broadcast_buffer: usize,
}

impl Default for HistoryConfig {
	fn default() -> Self {
		Self {
			capacity: DEFAULT_CAPACITY,
			broadcast_buffer: DEFAULT_BROADCAST_BUFFER,
		}
	}
}

/// Bounded, append-only chat history that notifies subscribers of every new message
///
/// # Examples
/// ```
/// use rollwright::{dice::roller::Val as ValRoller, history::History};
///
/// let mut history = History::new(2);
/// let mut rx = history.subscribe();
///
/// history.post("Mira", "I attack! [1d20+5]", &mut ValRoller(10));
/// history.post("Mira", "again", &mut ValRoller(10));
/// history.post("Mira", "and again", &mut ValRoller(10));
///
/// // Oldest message was evicted
/// assert_eq!(history.len(), 2);
/// assert_eq!(history.messages().next().map(|msg| msg.content.as_str()), Some("again"));
///
/// // Subscribers still got every message
/// let first = rx.try_recv()?;
/// assert_eq!(first.content, "I attack! {0}");
/// assert_eq!(first.dice_rolls[0].result, 15.0);
/// # Ok::<(), Box<dyn std::error::Error>>(())
/// ```
#[derive(Debug)]
pub struct History {
	/// Messages, oldest first
	messages: VecDeque<Arc<ChatMessage>>,

	/// Maximum number of messages kept
	capacity: usize,

	/// ID for the next appended message
	next_id: u64,

	/// Sending half of the subscriber channel
	sender: broadcast::Sender<Arc<ChatMessage>>,
}

impl History {
	/// Creates an empty history that keeps at most `capacity` messages (at least 1).
	#[must_use]
	pub fn new(capacity: usize) -> Self {
		Self::with_config(HistoryConfig {
			capacity,
			..HistoryConfig::default()
		})
	}

	/// Creates an empty history with the given settings.
	#[must_use]
	pub fn with_config(config: HistoryConfig) -> Self {
		let capacity = config.capacity.max(1);
		let (sender, _) = broadcast::channel(config.broadcast_buffer.max(1));
		Self {
			messages: VecDeque::with_capacity(capacity),
			capacity,
			next_id: 0,
			sender,
		}
	}

	/// Segments raw message text (see [`chat::segment()`]) and appends the result.
	pub fn post(&mut self, author: impl Into<String>, raw: &str, rng: &mut impl Roller) -> Arc<ChatMessage> {
		let segmented = chat::segment(raw, rng);
		self.append(author, segmented)
	}

	/// Appends an already segmented message, evicting the oldest message if the history is full, and broadcasts it
	/// to all current subscribers.
	pub fn append(&mut self, author: impl Into<String>, segmented: Segmented) -> Arc<ChatMessage> {
		let message = Arc::new(ChatMessage {
			id: self.next_id,
			author: author.into(),
			content: segmented.content,
			dice_rolls: segmented.dice_rolls,
		});
		self.next_id = self.next_id.wrapping_add(1);

		while self.messages.len() >= self.capacity {
			if let Some(evicted) = self.messages.pop_front() {
				tracing::trace!(id = evicted.id, "evicted message from history");
			}
		}
		self.messages.push_back(Arc::clone(&message));
		tracing::debug!(id = message.id, author = %message.author, rolls = message.dice_rolls.len(), "appended message");

		// Sending only fails when nobody is subscribed
		match self.sender.send(Arc::clone(&message)) {
			Ok(receivers) => tracing::trace!(id = message.id, receivers, "broadcast message"),
			Err(_) => tracing::trace!(id = message.id, "no subscribers for message"),
		}

		message
	}

	/// Subscribes to every message appended from now on.
	#[must_use]
	pub fn subscribe(&self) -> broadcast::Receiver<Arc<ChatMessage>> {
		self.sender.subscribe()
	}

	/// Iterates over the kept messages, oldest first.
	pub fn messages(&self) -> impl Iterator<Item = &Arc<ChatMessage>> {
		self.messages.iter()
	}

	/// Gets the number of kept messages.
	#[must_use]
	pub fn len(&self) -> usize {
		self.messages.len()
	}

	/// Checks whether there are no kept messages.
	#[must_use]
	pub fn is_empty(&self) -> bool {
		self.messages.is_empty()
	}

	/// Gets the maximum number of kept messages.
	#[must_use]
	pub const fn capacity(&self) -> usize {
		self.capacity
	}
}

impl Default for History {
	/// Creates an empty history with the [default settings](HistoryConfig::default).
	fn default() -> Self {
		Self::with_config(HistoryConfig::default())
	}
}
