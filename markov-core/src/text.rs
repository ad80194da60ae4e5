//! Text specializations of the token engine.
//!
//! A [`Mode`] decides how a line of text becomes a token sequence and how
//! generated tokens are turned back into a display string.

use rand::Rng;

use crate::error::Result;
use crate::model::build_config::BuildConfig;
use crate::model::builder::ChainBuilder;
use crate::model::chain::Chain;
use crate::model::generator::Generator;
use crate::model::token::{Sequence, Token};

/// Granularity of the tokens.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Default)]
pub enum Mode {
	/// Whitespace-delimited words; one line is one sentence.
	#[default]
	Sentence,
	/// Unicode scalar values; one line is one word.
	Word,
}

impl Mode {
	/// Splits one training line into tokens.
	pub fn tokenize(self, line: &str) -> Sequence {
		match self {
			Mode::Sentence => line.split_whitespace().map(Token::from).collect(),
			Mode::Word => line.chars().map(Token::from).collect(),
		}
	}

	/// String placed between generated tokens.
	pub fn separator(self) -> &'static str {
		match self {
			Mode::Sentence => " ",
			Mode::Word => "",
		}
	}

	/// Joins generated tokens into display text.
	///
	/// # Errors
	/// Returns `InvalidUtf8` if a token is not valid UTF-8.
	pub fn join(self, tokens: &[Token]) -> Result<String> {
		let parts = tokens
			.iter()
			.map(Token::as_str)
			.collect::<std::result::Result<Vec<_>, _>>()?;
		Ok(parts.join(self.separator()))
	}
}

/// A chain trained on lines of text in a given [`Mode`].
#[derive(Clone, Debug)]
pub struct TextModel {
	mode: Mode,
	chain: Chain,
}

impl TextModel {
	/// Tokenizes every line and builds the chain from the result.
	pub fn train<S: AsRef<str>>(lines: &[S], config: BuildConfig, mode: Mode) -> Result<Self> {
		let sequences: Vec<Sequence> = lines.iter().map(|line| mode.tokenize(line.as_ref())).collect();
		let chain = ChainBuilder::new(config).build(&sequences)?;
		Ok(Self { mode, chain })
	}

	pub fn mode(&self) -> Mode {
		self.mode
	}

	pub fn chain(&self) -> &Chain {
		&self.chain
	}

	/// Generates one piece of text. `None` leaves generation unbounded.
	///
	/// # Errors
	/// Fails with `InvalidArgument` if the bound is below the prefix length
	/// and with `EmptyModel` if nothing was trained.
	pub fn generate<R: Rng>(&self, rng: R, max_tokens: Option<usize>) -> Result<String> {
		let mut generator = Generator::new(&self.chain, rng);
		let tokens = match max_tokens {
			Some(max_tokens) => generator.generate_bounded(max_tokens)?,
			None => generator.generate()?,
		};
		self.mode.join(&tokens)
	}
}

#[cfg(test)]
mod tests {
	use rand::SeedableRng;
	use rand::rngs::StdRng;

	use super::*;
	use crate::error::MarkovError;

	fn train(lines: &[&str], prefix_len: usize, mode: Mode) -> TextModel {
		TextModel::train(lines, BuildConfig::new(prefix_len).unwrap(), mode).unwrap()
	}

	#[test]
	fn sentence_mode_splits_on_whitespace() {
		let tokens = Mode::Sentence.tokenize("  It's   a\ttest. ");
		assert_eq!(tokens, vec![Token::from("It's"), Token::from("a"), Token::from("test.")]);
		assert_eq!(Mode::Sentence.join(&tokens).unwrap(), "It's a test.");
	}

	#[test]
	fn word_mode_splits_on_code_points() {
		let tokens = Mode::Word.tokenize("héllo");
		assert_eq!(tokens.len(), 5);
		assert_eq!(tokens[1], Token::from('é'));
		assert_eq!(Mode::Word.join(&tokens).unwrap(), "héllo");
	}

	#[test]
	fn join_rejects_non_utf8() {
		let tokens = vec![Token::new([0xc3])];
		assert!(matches!(Mode::Word.join(&tokens), Err(MarkovError::InvalidUtf8(_))));
	}

	#[test]
	fn single_sentence_is_reproduced() {
		let model = train(&["a b c"], 1, Mode::Sentence);
		for seed in 0..10 {
			assert_eq!(model.generate(StdRng::seed_from_u64(seed), None).unwrap(), "a b c");
		}
	}

	#[test]
	fn bounded_sentence_has_three_words() {
		let model = train(&["a b c d e f g"], 1, Mode::Sentence);
		for seed in 0..10 {
			let text = model.generate(StdRng::seed_from_u64(seed), Some(3)).unwrap();
			assert_eq!(text, "a b c");
		}
	}

	#[test]
	fn bounded_word_stops_early() {
		let model = train(&["abcdefg"], 1, Mode::Word);
		assert_eq!(model.generate(StdRng::seed_from_u64(0), Some(3)).unwrap(), "abc");
	}

	#[test]
	fn word_prefix_three_keeps_second_letter() {
		let model = train(&["Hello!", "Test"], 3, Mode::Word);
		for seed in 0..20 {
			let text = model.generate(StdRng::seed_from_u64(seed), None).unwrap();
			assert!(text == "Hello!" || text == "Test", "got {text:?}");
		}
	}

	#[test]
	fn empty_line_is_harmless() {
		let model = train(&[""], 3, Mode::Word);
		assert_eq!(model.generate(StdRng::seed_from_u64(0), None).unwrap(), "");
	}

	#[test]
	fn nothing_trained_is_an_empty_model() {
		let lines: [&str; 0] = [];
		let model = train(&lines, 1, Mode::Sentence);
		assert!(matches!(
			model.generate(StdRng::seed_from_u64(0), None),
			Err(MarkovError::EmptyModel)
		));
	}
}
