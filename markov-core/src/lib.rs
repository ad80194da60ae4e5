//! Markov-chain token sequence generation.
//!
//! This crate provides:
//! - A generic chain over opaque byte-string tokens, keyed on fixed-length
//!   windows of preceding tokens
//! - Parallel chain construction from a corpus of independent sequences
//! - Randomized generation, unbounded or bounded to a token count, with an
//!   injected random source
//! - Sentence (word tokens) and word (character tokens) specializations
//!
//! ```
//! use markov_core::model::build_config::BuildConfig;
//! use markov_core::text::{Mode, TextModel};
//! use rand::SeedableRng;
//!
//! let model = TextModel::train(&["a b c"], BuildConfig::new(1)?, Mode::Sentence)?;
//! let text = model.generate(rand::rngs::StdRng::seed_from_u64(7), None)?;
//! assert_eq!(text, "a b c");
//! # Ok::<(), markov_core::error::MarkovError>(())
//! ```

/// Error type and result alias.
pub mod error;

/// Corpus loading helpers (file or stdin, one sequence per line).
pub mod io;

/// Core chain engine: tokens, keys, chain, builder and generator.
pub mod model;

/// Sentence and word specializations over the engine.
pub mod text;

pub use error::{MarkovError, Result};
pub use model::build_config::BuildConfig;
pub use model::builder::{ChainBuilder, build};
pub use model::chain::{Chain, ChainStats};
pub use model::generator::Generator;
pub use model::token::{Sequence, Successor, Token};
pub use text::{Mode, TextModel};
