use std::collections::VecDeque;

use log::trace;
use rand::Rng;
use rand::seq::IndexedRandom;

use super::chain::Chain;
use super::prefix_key::PrefixKey;
use super::token::{Successor, Token};
use crate::error::{MarkovError, Result};

/// Where the generator is in its walk of the chain.
#[derive(Debug)]
enum Phase<'c> {
	/// No starter picked yet.
	Unseeded,
	/// Replaying the chosen starter; `next` is the index of the next token.
	Seeding { starter: &'c [Token], next: usize },
	/// Sampling successors of the trailing window.
	Extending,
	/// Nothing more will be produced.
	Done,
}

/// Walks a [`Chain`] to produce one token at a time.
///
/// The generator borrows the chain immutably, so any number of generators
/// can read the same chain concurrently. Every random choice (starter and
/// successor) is drawn from the injected `rng`; passing a seeded RNG makes
/// generation reproducible.
///
/// Generation ends normally when the trailing window has no recorded
/// successor or when the terminator is sampled. After that every call to
/// [`Generator::next_token`] returns `Ok(None)`.
///
/// The bound of [`Generator::generate_bounded`] applies to the generator's
/// whole output: tokens already taken through `next_token` count toward it.
#[derive(Debug)]
pub struct Generator<'c, R> {
	chain: &'c Chain,
	rng: R,
	phase: Phase<'c>,
	/// Trailing tokens used as the lookup key.
	window: VecDeque<&'c Token>,
	/// Window length, fixed by the chosen starter.
	width: usize,
	emitted: usize,
}

impl<'c, R: Rng> Generator<'c, R> {
	pub fn new(chain: &'c Chain, rng: R) -> Self {
		Self {
			chain,
			rng,
			phase: Phase::Unseeded,
			window: VecDeque::with_capacity(chain.prefix_len()),
			width: 0,
			emitted: 0,
		}
	}

	/// Tokens produced so far, starter included.
	pub fn emitted(&self) -> usize {
		self.emitted
	}

	pub fn is_done(&self) -> bool {
		matches!(self.phase, Phase::Done)
	}

	/// Produces the next token, or `Ok(None)` once generation has ended.
	///
	/// # Errors
	/// Returns `EmptyModel` if the chain has no starter. The error is
	/// returned on every call, never a partial result.
	pub fn next_token(&mut self) -> Result<Option<&'c Token>> {
		if let Phase::Unseeded = self.phase {
			self.seed()?;
		}

		if let Phase::Seeding { starter, next } = self.phase {
			if let Some(token) = starter.get(next) {
				self.phase = Phase::Seeding { starter, next: next + 1 };
				self.emitted += 1;
				return Ok(Some(token));
			}
			self.phase = Phase::Extending;
		}

		if let Phase::Extending = self.phase {
			return Ok(self.extend());
		}

		Ok(None)
	}

	/// Generates until the chain ends.
	///
	/// # Errors
	/// Returns `EmptyModel` if the chain has no starter.
	pub fn generate(&mut self) -> Result<Vec<Token>> {
		let mut output = Vec::new();
		while let Some(token) = self.next_token()? {
			output.push(token.clone());
		}
		Ok(output)
	}

	/// Generates until the chain ends or the generator has produced
	/// `max_tokens` tokens in total, whichever comes first. The starter's
	/// tokens and any token already returned by `next_token` count toward
	/// the bound, so the returned vector holds only the remaining tokens.
	///
	/// # Errors
	/// Returns `InvalidArgument` if `max_tokens` is below the chain's prefix
	/// length, since the starter alone may be that long, and `EmptyModel` if
	/// the chain has no starter.
	pub fn generate_bounded(&mut self, max_tokens: usize) -> Result<Vec<Token>> {
		if max_tokens < self.chain.prefix_len() {
			return Err(MarkovError::invalid_argument(format!(
				"max tokens ({max_tokens}) must be >= prefix length ({})",
				self.chain.prefix_len()
			)));
		}

		let mut output = Vec::new();
		while self.emitted < max_tokens {
			match self.next_token()? {
				Some(token) => output.push(token.clone()),
				None => break,
			}
		}
		Ok(output)
	}

	fn seed(&mut self) -> Result<()> {
		let chain = self.chain;
		let starter = chain.starters().choose(&mut self.rng).ok_or(MarkovError::EmptyModel)?;

		let start = starter.len().saturating_sub(chain.prefix_len());
		self.window.clear();
		self.window.extend(&starter[start..]);
		self.width = self.window.len();
		self.phase = Phase::Seeding { starter, next: 0 };
		trace!("seeded with a starter of {} tokens", starter.len());
		Ok(())
	}

	fn extend(&mut self) -> Option<&'c Token> {
		let chain = self.chain;
		let key = PrefixKey::of(self.window.iter().copied());

		let Some(state) = chain.successors_by_key(&key) else {
			trace!("no successor for {key:?}, stopping after {} tokens", self.emitted);
			self.phase = Phase::Done;
			return None;
		};

		match state.sample(&mut self.rng) {
			Some(Successor::Token(token)) => {
				self.window.push_back(token);
				if self.window.len() > self.width {
					self.window.pop_front();
				}
				self.emitted += 1;
				Some(token)
			}
			Some(Successor::End) | None => {
				trace!("terminator reached after {} tokens", self.emitted);
				self.phase = Phase::Done;
				None
			}
		}
	}
}
