use std::collections::BTreeMap;

use rand::Rng;

use super::token::Successor;

/// Successor multiset of a single prefix.
///
/// A `State` corresponds to one prefix key and stores every successor
/// observed after that prefix, including the terminator. Duplicates are
/// kept as occurrence counts, so drawing uniformly over the multiset is the
/// same as drawing each distinct successor proportionally to its count.
///
/// ## Invariants
/// - Every count is strictly positive
/// - A `State` stored in a chain holds at least one successor
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct State {
	/// Distinct successors and how many times each was observed.
	/// Example: { End => 1, "e" => 42, "a" => 3 }
	successors: BTreeMap<Successor, usize>,
	/// Sum of all counts, i.e. the size of the multiset.
	total: usize,
}

impl State {
	pub fn new() -> Self {
		Self::default()
	}

	/// Records one more occurrence of `successor`.
	pub fn add_successor(&mut self, successor: Successor) {
		*self.successors.entry(successor).or_insert(0) += 1;
		self.total += 1;
	}

	/// Number of entries in the multiset, duplicates included.
	pub fn len(&self) -> usize {
		self.total
	}

	pub fn is_empty(&self) -> bool {
		self.total == 0
	}

	/// How many times `successor` was observed.
	pub fn count(&self, successor: &Successor) -> usize {
		self.successors.get(successor).copied().unwrap_or(0)
	}

	/// Distinct successors with their occurrence counts, in a stable order.
	pub fn iter(&self) -> impl Iterator<Item = (&Successor, usize)> {
		self.successors.iter().map(|(successor, count)| (successor, *count))
	}

	/// Draws one element of the multiset uniformly at random.
	///
	/// Performs an O(n) scan over the distinct successors with a cumulative
	/// subtraction to select a bucket. Returns `None` if the state is empty.
	pub fn sample<R: Rng + ?Sized>(&self, rng: &mut R) -> Option<&Successor> {
		if self.total == 0 {
			return None;
		}

		let mut r = rng.random_range(0..self.total);
		for (successor, count) in &self.successors {
			if r < *count {
				return Some(successor);
			}
			r -= count;
		}

		// Unreachable while `total` matches the counts.
		self.successors.keys().next_back()
	}

	/// Adds every occurrence recorded in `other` to this state.
	///
	/// Used when partial chains built on separate threads are combined.
	/// Merging is commutative, so the result does not depend on the order in
	/// which workers finish.
	pub fn merge(&mut self, other: &Self) {
		for (successor, count) in &other.successors {
			*self.successors.entry(successor.clone()).or_insert(0) += *count;
		}
		self.total += other.total;
	}
}
