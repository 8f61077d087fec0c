//! The vocabulary a puzzle is filled from.

use crate::crossword::ParseError;
use crate::csp::word::Word;
use itertools::Itertools;
use std::path::Path;

/// Parses a word list: whitespace separated (one per line in word files),
/// upper-cased, duplicates dropped. The first occurrence keeps its position.
///
/// # Errors
///
/// `ParseError::EmptyWordList` if no words remain.
pub fn parse_words(text: &str) -> Result<Vec<Word>, ParseError> {
    let words: Vec<Word> = text
        .split_whitespace()
        .map(|w| Word::from(w.to_uppercase()))
        .unique()
        .collect();

    if words.is_empty() {
        return Err(ParseError::EmptyWordList);
    }
    Ok(words)
}

/// Reads and parses a word file.
///
/// # Errors
///
/// If the file cannot be read or contains no words.
pub fn parse_words_file(path: impl AsRef<Path>) -> Result<Vec<Word>, ParseError> {
    parse_words(&std::fs::read_to_string(path)?)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_words_are_trimmed_uppercased_and_deduplicated() {
        let words = parse_words("one\n  Two \n\nONE\nthree\r\n").unwrap();
        assert_eq!(
            words,
            vec![Word::from("ONE"), Word::from("TWO"), Word::from("THREE")]
        );
    }

    #[test]
    fn test_space_separated_words() {
        assert_eq!(parse_words("six seven").unwrap().len(), 2);
    }

    #[test]
    fn test_empty_word_list_is_an_error() {
        assert!(matches!(parse_words(""), Err(ParseError::EmptyWordList)));
        assert!(matches!(parse_words(" \n\t\n"), Err(ParseError::EmptyWordList)));
    }
}
