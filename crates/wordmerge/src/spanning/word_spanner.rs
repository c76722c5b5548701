//! # Word Spanner

use std::{borrow::Cow, sync::LazyLock};

use regex::Regex;

use crate::{types::Symbol, vocab::SplitMode};

/// Pattern for [`SplitMode::WordPunct`]: runs of word characters, or runs of
/// characters that are neither word characters nor whitespace.
pub const WORD_PUNCT_PATTERN: &str = r"\w+|[^\w\s]+";

static WORD_PUNCT_REGEX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(WORD_PUNCT_PATTERN).expect("regex pattern compilation failed"));

impl SplitMode {
    /// Split `text` into words.
    pub fn split<'a>(
        self,
        text: &'a str,
    ) -> impl Iterator<Item = &'a str> + 'a {
        let (whitespace, word_punct) = match self {
            SplitMode::Whitespace => (Some(text.split_whitespace()), None),
            SplitMode::WordPunct => (
                None,
                Some(WORD_PUNCT_REGEX.find_iter(text).map(|m| m.as_str())),
            ),
        };
        whitespace
            .into_iter()
            .flatten()
            .chain(word_punct.into_iter().flatten())
    }
}

/// Turns text into words, and words into initial symbol sequences.
///
/// Shared by the trainer and the tokenizer so both preprocess identically.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WordSpanner {
    lower_case: bool,
    split: SplitMode,
    end_of_word: Symbol,
}

impl WordSpanner {
    /// Create a new spanner.
    pub fn new(
        lower_case: bool,
        split: SplitMode,
        end_of_word: Symbol,
    ) -> Self {
        Self {
            lower_case,
            split,
            end_of_word,
        }
    }

    /// The end-of-word marker.
    pub fn end_of_word(&self) -> &Symbol {
        &self.end_of_word
    }

    /// Apply case folding, if enabled.
    pub fn normalize<'a>(
        &self,
        text: &'a str,
    ) -> Cow<'a, str> {
        if self.lower_case {
            Cow::Owned(text.to_lowercase())
        } else {
            Cow::Borrowed(text)
        }
    }

    /// Visit each (normalized) word of `text`, in order.
    pub fn for_each_word<F>(
        &self,
        text: &str,
        mut f: F,
    ) where
        F: FnMut(&str),
    {
        let text = self.normalize(text);
        for word in self.split.split(&text) {
            f(word);
        }
    }

    /// Collect the (normalized) words of `text`.
    pub fn words(
        &self,
        text: &str,
    ) -> Vec<String> {
        let mut words = Vec::new();
        self.for_each_word(text, |w| words.push(w.to_string()));
        words
    }

    /// The initial symbols of a word: one per character, then the end-of-word marker.
    pub fn word_symbols(
        &self,
        word: &str,
    ) -> Vec<Symbol> {
        word_symbols(word, &self.end_of_word)
    }
}

/// The initial symbols of a word: one per character, then `end_of_word`.
pub fn word_symbols(
    word: &str,
    end_of_word: &Symbol,
) -> Vec<Symbol> {
    let mut symbols = Vec::with_capacity(word.len() + 1);
    let mut buf = [0u8; 4];
    symbols.extend(word.chars().map(|c| Symbol::from(&*c.encode_utf8(&mut buf))));
    symbols.push(end_of_word.clone());
    symbols
}
