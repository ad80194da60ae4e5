use std::fmt;
use std::sync::Arc;

/// An opaque, immutable unit of content.
///
/// The engine only ever compares tokens and hashes their bytes; a token may
/// be a word, a single character or any other byte string. Clones share one
/// allocation, so copying tokens into successor sets and output is cheap.
#[derive(Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Token(Arc<[u8]>);

impl Token {
	pub fn new(bytes: impl AsRef<[u8]>) -> Self {
		Self(Arc::from(bytes.as_ref()))
	}

	pub fn as_bytes(&self) -> &[u8] {
		&self.0
	}

	pub fn len(&self) -> usize {
		self.0.len()
	}

	pub fn is_empty(&self) -> bool {
		self.0.is_empty()
	}

	/// Views the token as text, failing if its bytes are not UTF-8.
	pub fn as_str(&self) -> Result<&str, std::str::Utf8Error> {
		std::str::from_utf8(&self.0)
	}
}

impl From<&str> for Token {
	fn from(value: &str) -> Self {
		Self::new(value)
	}
}

impl From<char> for Token {
	fn from(value: char) -> Self {
		let mut buf = [0u8; 4];
		Self::new(value.encode_utf8(&mut buf))
	}
}

impl From<&[u8]> for Token {
	fn from(value: &[u8]) -> Self {
		Self::new(value)
	}
}

impl fmt::Debug for Token {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		match self.as_str() {
			Ok(s) => write!(f, "{s:?}"),
			Err(_) => write!(f, "{:?}", &self.0),
		}
	}
}

/// One ordered training example.
pub type Sequence = Vec<Token>;

/// A value stored in a successor multiset.
///
/// `End` is the terminator marker: it is recorded after the last window of
/// every sequence and sampled with the same frequency semantics as tokens.
#[derive(Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Debug)]
pub enum Successor {
	End,
	Token(Token),
}

impl Successor {
	pub fn token(&self) -> Option<&Token> {
		match self {
			Successor::Token(token) => Some(token),
			Successor::End => None,
		}
	}

	pub fn is_end(&self) -> bool {
		matches!(self, Successor::End)
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn char_tokens_hold_utf8_bytes() {
		let token = Token::from('é');
		assert_eq!(token.as_bytes(), "é".as_bytes());
		assert_eq!(token.as_str().unwrap(), "é");
	}

	#[test]
	fn non_utf8_token_is_reported() {
		let token = Token::new([0xff, 0xfe]);
		assert!(token.as_str().is_err());
		assert_eq!(format!("{token:?}"), "[255, 254]");
	}

	#[test]
	fn terminator_is_not_a_token() {
		assert!(Successor::End.is_end());
		assert_eq!(Successor::End.token(), None);
		let word = Successor::Token(Token::from("word"));
		assert_eq!(word.token(), Some(&Token::from("word")));
	}
}
