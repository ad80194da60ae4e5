use crate::error::{MarkovError, Result};

/// Default number of corpus partitions handed to each worker thread.
pub const DEFAULT_CHUNK_FACTOR: usize = 8;

/// Parameters controlling chain construction.
///
/// # Responsibilities
/// - Hold the prefix (window) length of the chain
/// - Hold the parallelism settings of the builder. The corpus is split into
///   up to `workers * chunk_factor` partitions and each partition is built on
///   its own thread, so `workers` is a unit of parallelism rather than an
///   exact thread count
///
/// # Invariants
/// - `prefix_len >= 1`
/// - `workers`, when set, is >= 1
/// - `chunk_factor >= 1`
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct BuildConfig {
	/// Number of tokens used as the key for the next token.
	prefix_len: usize,

	/// Parallelism unit. `None` means one per logical CPU.
	workers: Option<usize>,

	/// Partitions per worker.
	chunk_factor: usize,
}

impl BuildConfig {
	/// Creates a configuration with default parallelism.
	///
	/// # Errors
	/// Returns `InvalidArgument` if `prefix_len < 1`.
	pub fn new(prefix_len: usize) -> Result<Self> {
		if prefix_len < 1 {
			return Err(MarkovError::invalid_argument(format!(
				"prefix length must be >= 1, got {prefix_len}"
			)));
		}
		Ok(Self {
			prefix_len,
			workers: None,
			chunk_factor: DEFAULT_CHUNK_FACTOR,
		})
	}

	pub fn prefix_len(&self) -> usize {
		self.prefix_len
	}

	/// Resolved worker count.
	pub fn workers(&self) -> usize {
		self.workers.unwrap_or_else(num_cpus::get)
	}

	pub fn chunk_factor(&self) -> usize {
		self.chunk_factor
	}

	/// Upper bound on the number of build threads (`workers * chunk_factor`).
	pub fn max_partitions(&self) -> usize {
		self.workers().saturating_mul(self.chunk_factor())
	}

	/// Sets the parallelism unit.
	///
	/// # Errors
	/// Returns an error if `workers` is zero.
	pub fn set_workers(&mut self, workers: usize) -> Result<()> {
		if workers == 0 {
			return Err(MarkovError::invalid_argument("worker count must be >= 1"));
		}
		self.workers = Some(workers);
		Ok(())
	}

	/// Sets how many partitions each worker receives.
	///
	/// # Errors
	/// Returns an error if `chunk_factor` is zero.
	pub fn set_chunk_factor(&mut self, chunk_factor: usize) -> Result<()> {
		if chunk_factor == 0 {
			return Err(MarkovError::invalid_argument("chunk factor must be >= 1"));
		}
		self.chunk_factor = chunk_factor;
		Ok(())
	}
}
