use std::fs;
use std::io::{self, Read};
use std::path::Path;

use crate::error::{MarkovError, Result};

/// Reads a text file and returns all its lines as a `Vec<String>`.
///
/// - Reads the entire file into memory
/// - Splits on `\n` / `\r\n`
pub fn read_lines<P: AsRef<Path>>(filename: P) -> Result<Vec<String>> {
	let path = filename.as_ref();
	let contents =
		fs::read_to_string(path).map_err(|err| MarkovError::io(err, Some(path.to_path_buf())))?;
	Ok(split_lines(&contents))
}

/// Reads all of `reader` and returns its lines.
pub fn read_lines_from<R: Read>(mut reader: R) -> Result<Vec<String>> {
	let mut contents = String::new();
	reader
		.read_to_string(&mut contents)
		.map_err(|err| MarkovError::io(err, None))?;
	Ok(split_lines(&contents))
}

/// Reads the corpus from standard input.
pub fn read_stdin_lines() -> Result<Vec<String>> {
	read_lines_from(io::stdin().lock())
}

fn split_lines(contents: &str) -> Vec<String> {
	contents.lines().map(str::to_owned).collect()
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn splits_on_both_line_endings() {
		let lines = read_lines_from("a b\r\nc d\n\ne".as_bytes()).unwrap();
		assert_eq!(lines, vec!["a b", "c d", "", "e"]);
	}

	#[test]
	fn trailing_newline_adds_no_line() {
		let lines = read_lines_from("one\ntwo\n".as_bytes()).unwrap();
		assert_eq!(lines, vec!["one", "two"]);
	}

	#[test]
	fn missing_file_reports_its_path() {
		let err = read_lines("definitely/not/here.txt").unwrap_err();
		match err {
			MarkovError::Io { path: Some(path), .. } => {
				assert_eq!(path, Path::new("definitely/not/here.txt"))
			}
			other => panic!("unexpected error: {other:?}"),
		}
	}
}
