//! Error type shared by chain construction, generation and corpus loading.

use std::path::PathBuf;

use thiserror::Error;

/// Convenient result type used throughout the crate.
pub type Result<T, E = MarkovError> = std::result::Result<T, E>;

/// Failures surfaced by the chain engine.
///
/// Reaching an unknown prefix, sampling the terminator or hitting a token
/// bound are not errors: they are how generation normally ends.
#[derive(Debug, Error)]
pub enum MarkovError {
	/// A caller-supplied parameter is out of range.
	#[error("invalid argument: {0}")]
	InvalidArgument(String),
	/// Generation was attempted on a chain without any starter.
	#[error("cannot generate from an empty chain")]
	EmptyModel,
	/// A generated token is not valid UTF-8 and cannot be displayed as text.
	#[error("generated token is not valid UTF-8: {0}")]
	InvalidUtf8(#[from] std::str::Utf8Error),
	/// Filesystem IO error with optional context path.
	#[error("io error while reading {path:?}: {source}")]
	Io {
		source: std::io::Error,
		path: Option<PathBuf>,
	},
	/// A build worker panicked before handing back its partial chain.
	#[error("internal error: {0}")]
	Internal(String),
}

impl MarkovError {
	pub(crate) fn invalid_argument(message: impl Into<String>) -> Self {
		Self::InvalidArgument(message.into())
	}

	/// Attaches an optional path when wrapping IO errors.
	pub fn io(source: std::io::Error, path: Option<PathBuf>) -> Self {
		Self::Io { source, path }
	}
}
