use std::fmt;

use sha2::{Digest, Sha256};

use super::token::Token;

/// Fixed-size fingerprint of a window of tokens.
///
/// Each token is fed to SHA-256 as its byte length (u64, little-endian)
/// followed by its bytes, so windows never collide through a shared
/// separator and windows of different lengths never share a key.
#[derive(Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct PrefixKey([u8; 32]);

impl PrefixKey {
	/// Computes the key of a window. Build and lookup must both go through here.
	pub fn of<'a, I>(window: I) -> Self
	where
		I: IntoIterator<Item = &'a Token>,
	{
		let mut hasher = Sha256::new();
		for token in window {
			hasher.update((token.len() as u64).to_le_bytes());
			hasher.update(token.as_bytes());
		}
		let digest = hasher.finalize();

		let mut bytes = [0u8; 32];
		bytes.copy_from_slice(&digest);
		Self(bytes)
	}

	pub fn as_bytes(&self) -> &[u8; 32] {
		&self.0
	}
}

impl fmt::Debug for PrefixKey {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		write!(f, "PrefixKey(")?;
		for byte in &self.0[..6] {
			write!(f, "{byte:02x}")?;
		}
		write!(f, "..)")
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	fn tokens(words: &[&str]) -> Vec<Token> {
		words.iter().map(|w| Token::from(*w)).collect()
	}

	#[test]
	fn same_window_same_key() {
		let a = tokens(&["Hello", ","]);
		let b = tokens(&["Hello", ","]);
		assert_eq!(PrefixKey::of(&a), PrefixKey::of(&b));
	}

	#[test]
	fn empty_window_is_the_digest_of_nothing() {
		// SHA-256 of the empty input.
		let key = PrefixKey::of(&[] as &[Token]);
		assert_eq!(&key.as_bytes()[..4], &[0xe3, 0xb0, 0xc4, 0x42]);
	}

	#[test]
	fn token_boundaries_are_part_of_the_key() {
		// A plain concatenation would map both of these to "a bc".
		let split_late = tokens(&["a ", "bc"]);
		let split_early = tokens(&["a", " bc"]);
		assert_ne!(PrefixKey::of(&split_late), PrefixKey::of(&split_early));

		let joined = tokens(&["ab"]);
		let apart = tokens(&["a", "b"]);
		assert_ne!(PrefixKey::of(&joined), PrefixKey::of(&apart));
	}

	#[test]
	fn empty_tokens_change_the_key() {
		let one = tokens(&["x"]);
		let padded = tokens(&["x", ""]);
		assert_ne!(PrefixKey::of(&one), PrefixKey::of(&padded));
		assert_ne!(PrefixKey::of(&[] as &[Token]), PrefixKey::of(&tokens(&[""])));
	}

	#[test]
	fn order_matters() {
		assert_ne!(
			PrefixKey::of(&tokens(&["a", "b"])),
			PrefixKey::of(&tokens(&["b", "a"]))
		);
	}
}
