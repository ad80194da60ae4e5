use std::collections::HashMap;

use serde::Serialize;

use super::prefix_key::PrefixKey;
use super::state::State;
use super::token::{Sequence, Successor, Token};
use crate::error::{MarkovError, Result};

/// The trained token chain.
///
/// Maps the key of every observed window to the multiset of tokens that
/// followed it, and keeps the leading window of every training sequence so
/// generation can replay it verbatim.
///
/// # Invariants
/// - `prefix_len` is always >= 1
/// - Every state in `transitions` holds at least one successor
/// - Every starter has length `min(prefix_len, len(sequence))`
/// - Once handed out by the builder a chain is never mutated again, so it
///   can be shared by any number of generators without locking
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Chain {
	/// Configured window length.
	prefix_len: usize,

	/// Prefix key to successor multiset.
	transitions: HashMap<PrefixKey, State>,

	/// Leading window of every training sequence, in corpus order.
	starters: Vec<Sequence>,
}

/// Summary counters of a chain.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
pub struct ChainStats {
	pub prefix_len: usize,
	/// One starter is recorded per training sequence.
	pub sequences: usize,
	pub keys: usize,
	/// Size of all successor multisets, terminators included.
	pub transitions: usize,
	pub terminators: usize,
}

impl Chain {
	/// Creates an empty chain with window length `prefix_len`.
	///
	/// # Errors
	/// Returns `InvalidArgument` if `prefix_len < 1`.
	pub(crate) fn new(prefix_len: usize) -> Result<Self> {
		if prefix_len < 1 {
			return Err(MarkovError::invalid_argument(format!(
				"prefix length must be >= 1, got {prefix_len}"
			)));
		}
		Ok(Self {
			prefix_len,
			transitions: HashMap::new(),
			starters: Vec::new(),
		})
	}

	/// Adds one training sequence to the chain.
	///
	/// The window is shrunk to the sequence length when the sequence is
	/// shorter than `prefix_len`, so every sequence (even an empty one)
	/// contributes a starter and exactly one terminated window.
	pub(crate) fn add_sequence(&mut self, sequence: &[Token]) {
		let window = self.prefix_len.min(sequence.len());

		self.starters.push(sequence[..window].to_vec());

		for (i, next) in sequence[window..].iter().enumerate() {
			let key = PrefixKey::of(&sequence[i..i + window]);
			self.transitions
				.entry(key)
				.or_default()
				.add_successor(Successor::Token(next.clone()));
		}

		let last = PrefixKey::of(&sequence[sequence.len() - window..]);
		self.transitions.entry(last).or_default().add_successor(Successor::End);
	}

	/// Merges a partial chain into this one.
	///
	/// Successor counts for matching keys are summed and the other chain's
	/// starters are appended after this chain's own.
	///
	/// # Errors
	/// Returns an error if the prefix lengths do not match.
	pub(crate) fn merge(&mut self, other: Self) -> Result<()> {
		if self.prefix_len != other.prefix_len {
			return Err(MarkovError::invalid_argument(format!(
				"cannot merge chains with prefix lengths {} and {}",
				self.prefix_len, other.prefix_len
			)));
		}

		for (key, state) in other.transitions {
			match self.transitions.get_mut(&key) {
				Some(existing) => existing.merge(&state),
				None => {
					self.transitions.insert(key, state);
				}
			}
		}
		self.starters.extend(other.starters);

		Ok(())
	}

	pub fn prefix_len(&self) -> usize {
		self.prefix_len
	}

	/// Recorded starters, one per training sequence, in corpus order.
	pub fn starters(&self) -> &[Sequence] {
		&self.starters
	}

	/// Successor multiset of `window`, if that window was ever observed.
	pub fn successors(&self, window: &[Token]) -> Option<&State> {
		self.successors_by_key(&PrefixKey::of(window))
	}

	pub fn successors_by_key(&self, key: &PrefixKey) -> Option<&State> {
		self.transitions.get(key)
	}

	/// Number of distinct prefix keys.
	pub fn key_count(&self) -> usize {
		self.transitions.len()
	}

	/// `true` if the chain was built from zero sequences.
	pub fn is_empty(&self) -> bool {
		self.starters.is_empty()
	}

	pub fn stats(&self) -> ChainStats {
		ChainStats {
			prefix_len: self.prefix_len,
			sequences: self.starters.len(),
			keys: self.transitions.len(),
			transitions: self.transitions.values().map(State::len).sum(),
			terminators: self.transitions.values().map(|s| s.count(&Successor::End)).sum(),
		}
	}
}
