//! Top-level module for the token chain engine.
//!
//! Provides:
//! - Tokens and the terminator marker (`Token`, `Successor`)
//! - Window fingerprints (`PrefixKey`)
//! - Successor multisets (`State`)
//! - The trained chain (`Chain`) and its concurrent builder (`ChainBuilder`)
//! - Token-by-token sampling (`Generator`)

/// Build parameters: prefix length and parallelism.
pub mod build_config;

/// Concurrent chain construction from a corpus of sequences.
///
/// Builds partial chains on worker threads and merges them once all
/// workers have joined.
pub mod builder;

/// The trained chain: transitions and starters.
pub mod chain;

/// Stateful sampler walking a chain, optionally bounded.
pub mod generator;

/// SHA-256 fingerprint of a window of tokens.
pub mod prefix_key;

/// Successor multiset of a single prefix.
///
/// Tracks occurrence counts and supports uniform sampling over the multiset.
pub mod state;

/// Opaque tokens, sequences and the terminator marker.
pub mod token;
