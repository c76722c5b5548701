//! # Vocabulary Options
//!
//! Preprocessing choices made at training time.
//!
//! These travel with the trained [`crate::vocab::BpeVocab`] and are replayed
//! verbatim by the tokenizer. Tokenizing with different case folding or word
//! splitting than the vocabulary was trained with does not fail; it silently
//! produces worse segmentations. Keeping the options inside the vocabulary
//! (and its serialized form) is what keeps the two in step.

use serde::{Deserialize, Serialize};

use crate::{
    errors::{WMResult, WordmergeError},
    spanning::WordSpanner,
    types::Symbol,
};

/// The default end-of-word marker.
pub const DEFAULT_END_OF_WORD: &str = "</w>";

/// The default unknown token.
pub const DEFAULT_UNKNOWN_TOKEN: &str = "<unk>";

/// How the end-of-word marker appears in string tokens.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EndOfWordMode {
    /// Keep the marker: ``"low</w>"``, or a standalone ``"</w>"`` token.
    #[default]
    Keep,

    /// Remove the marker from each word's last token; a marker-only last
    /// token is dropped.
    Strip,
}

/// How text is split into words.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SplitMode {
    /// Split on runs of Unicode whitespace.
    #[default]
    Whitespace,

    /// Split into runs of word characters and runs of punctuation.
    ///
    /// See [`crate::spanning::WORD_PUNCT_PATTERN`].
    WordPunct,
}

/// Options shared by training and tokenization.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct VocabOptions {
    /// Fold text to lowercase before splitting into characters.
    pub lower_case: bool,

    /// The end-of-word marker appended to every word.
    pub end_of_word: Symbol,

    /// How the end-of-word marker appears in string tokens.
    pub end_of_word_mode: EndOfWordMode,

    /// How text is split into words.
    pub split: SplitMode,

    /// The token reported for symbols outside the vocabulary.
    pub unknown_token: Symbol,
}

impl Default for VocabOptions {
    fn default() -> Self {
        Self {
            lower_case: false,
            end_of_word: DEFAULT_END_OF_WORD.into(),
            end_of_word_mode: EndOfWordMode::default(),
            split: SplitMode::default(),
            unknown_token: DEFAULT_UNKNOWN_TOKEN.into(),
        }
    }
}

impl VocabOptions {
    /// Sets case folding.
    pub fn with_lower_case(
        self,
        lower_case: bool,
    ) -> Self {
        Self { lower_case, ..self }
    }

    /// Sets the end-of-word marker.
    ///
    /// The marker must be non-empty; see [`Self::try_validate`].
    pub fn with_end_of_word<S: AsRef<str>>(
        self,
        end_of_word: S,
    ) -> Self {
        Self {
            end_of_word: end_of_word.as_ref().into(),
            ..self
        }
    }

    /// Sets the end-of-word token mode.
    pub fn with_end_of_word_mode(
        self,
        end_of_word_mode: EndOfWordMode,
    ) -> Self {
        Self {
            end_of_word_mode,
            ..self
        }
    }

    /// Sets the word split mode.
    pub fn with_split(
        self,
        split: SplitMode,
    ) -> Self {
        Self { split, ..self }
    }

    /// Sets the unknown token.
    pub fn with_unknown_token<S: AsRef<str>>(
        self,
        unknown_token: S,
    ) -> Self {
        Self {
            unknown_token: unknown_token.as_ref().into(),
            ..self
        }
    }

    /// Check that the options can describe a vocabulary.
    ///
    /// ## Returns
    /// A [`WordmergeError::VocabConflict`] if the end-of-word marker
    /// or the unknown token is empty.
    pub fn try_validate(&self) -> WMResult<()> {
        if self.end_of_word.is_empty() {
            return Err(WordmergeError::VocabConflict(
                "end-of-word marker must not be empty".to_string(),
            ));
        }
        if self.unknown_token.is_empty() {
            return Err(WordmergeError::VocabConflict(
                "unknown token must not be empty".to_string(),
            ));
        }
        Ok(())
    }

    /// Build the [`WordSpanner`] for these options.
    pub fn spanner(&self) -> WordSpanner {
        WordSpanner::new(self.lower_case, self.split, self.end_of_word.clone())
    }

    /// Render one word's final symbols as output tokens, per [`EndOfWordMode`].
    ///
    /// Only the last symbol carries the word's marker. Earlier symbols pass
    /// through unchanged, even when their text ends with the marker text.
    ///
    /// ## Arguments
    /// * `symbols` - the word's symbols, end-of-word marker included.
    /// * `tokens` - the target token buffer.
    pub fn render_word(
        &self,
        symbols: &[Symbol],
        tokens: &mut Vec<String>,
    ) {
        let Some((last, rest)) = symbols.split_last() else {
            return;
        };
        tokens.extend(rest.iter().map(Symbol::to_string));

        let last = match self.end_of_word_mode {
            EndOfWordMode::Keep => last.as_str(),
            EndOfWordMode::Strip => last
                .strip_suffix(self.end_of_word.as_str())
                .unwrap_or(last),
        };
        if !last.is_empty() {
            tokens.push(last.to_string());
        }
    }
}
