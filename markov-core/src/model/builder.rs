use std::thread;

use log::debug;

use super::build_config::BuildConfig;
use super::chain::Chain;
use super::token::Token;
use crate::error::{MarkovError, Result};

/// Builds a [`Chain`] from a corpus of independent sequences.
///
/// Splits the corpus into contiguous partitions, builds one partial chain per
/// partition on its own thread, then merges the partial chains sequentially
/// in partition order once every thread has finished. Workers share no
/// mutable state, so no lock is taken during the build.
#[derive(Clone, Debug)]
pub struct ChainBuilder {
	config: BuildConfig,
}

impl ChainBuilder {
	pub fn new(config: BuildConfig) -> Self {
		Self { config }
	}

	pub fn config(&self) -> &BuildConfig {
		&self.config
	}

	/// Builds the chain. Returns only after every worker has joined.
	///
	/// An empty corpus yields an empty chain.
	///
	/// # Errors
	/// Returns `Internal` if a worker thread panicked.
	pub fn build<S>(&self, sequences: &[S]) -> Result<Chain>
	where
		S: AsRef<[Token]> + Sync,
	{
		let prefix_len = self.config.prefix_len();
		let mut chain = Chain::new(prefix_len)?;
		if sequences.is_empty() {
			debug!("empty corpus, returning empty chain");
			return Ok(chain);
		}

		let partitions = self.config.max_partitions().clamp(1, sequences.len());
		let chunk_size = sequences.len().div_ceil(partitions);
		debug!(
			"building chain: {} sequences, prefix length {}, {} partitions of up to {} sequences",
			sequences.len(),
			prefix_len,
			sequences.len().div_ceil(chunk_size),
			chunk_size
		);

		let partials = thread::scope(|scope| {
			let handles: Vec<_> = sequences
				.chunks(chunk_size)
				.map(|chunk| {
					scope.spawn(move || {
						let mut partial = Chain::new(prefix_len)?;
						for sequence in chunk {
							partial.add_sequence(sequence.as_ref());
						}
						Ok::<_, MarkovError>(partial)
					})
				})
				.collect();

			handles
				.into_iter()
				.map(|handle| {
					handle
						.join()
						.map_err(|_| MarkovError::Internal("chain build worker panicked".to_owned()))?
				})
				.collect::<Result<Vec<_>>>()
		})?;

		for partial in partials {
			chain.merge(partial)?;
		}

		debug!(
			"chain built: {} keys, {} starters",
			chain.key_count(),
			chain.starters().len()
		);
		Ok(chain)
	}
}

/// Builds a chain with the default parallelism.
///
/// # Errors
/// Returns `InvalidArgument` if `prefix_len < 1`; no chain is produced.
pub fn build<S>(sequences: &[S], prefix_len: usize) -> Result<Chain>
where
	S: AsRef<[Token]> + Sync,
{
	ChainBuilder::new(BuildConfig::new(prefix_len)?).build(sequences)
}
