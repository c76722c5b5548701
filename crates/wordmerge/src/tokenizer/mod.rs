//! # Tokenizer
//!
//! Segments text with a trained [`BpeVocab`].
//!
//! Each word is split and case folded exactly as at training time
//! (per the vocabulary's [`crate::vocab::VocabOptions`]), started as its
//! characters plus the end-of-word marker, and then merged with the learned
//! rules in rank order. Characters never seen in training stay as
//! single-character tokens.
//!
//! ## Example
//!
//! ```rust
//! use std::sync::Arc;
//!
//! use wordmerge::{
//!     tokenizer::Tokenizer,
//!     training::{BpeTrainer, BpeTrainerOptions},
//! };
//!
//! let mut trainer: BpeTrainer = BpeTrainerOptions::new(2).with_lower_case(true).init();
//! trainer.update_from_text("low lower lowest");
//! let vocab = trainer.train().unwrap().vocab;
//!
//! let tokenizer = Tokenizer::new(vocab).unwrap();
//! assert_eq!(
//!     tokenizer.tokenize("lowering"),
//!     vec!["low", "e", "r", "i", "n", "g", "</w>"]
//! );
//! ```

mod tokenizer_options;

use std::sync::Arc;

#[doc(inline)]
pub use tokenizer_options::TokenizerOptions;

use crate::{
    encoders::{MergeScanSpanEncoder, SpanEncoder},
    errors::{InvalidInput, WMResult, WordmergeError},
    spanning::WordSpanner,
    types::{Symbol, TokenId},
    vocab::BpeVocab,
};

/// Tokenize `text` against `vocab`, with the default encoder.
///
/// ## Arguments
/// * `vocab` - A trained vocabulary.
/// * `text` - The text to segment.
///
/// ## Returns
/// The tokens of every word, in input order; or
/// `InvalidInput::UntrainedVocab` if the vocabulary is empty.
pub fn tokenize(
    vocab: &BpeVocab,
    text: &str,
) -> WMResult<Vec<String>> {
    check_trained(vocab)?;

    let spanner = vocab.options().spanner();
    let mut tokens = Vec::new();
    spanner.for_each_word(text, |word| {
        let symbols = encode_word(vocab, &spanner, &MergeScanSpanEncoder, word);
        render_tokens(vocab, &symbols, &mut tokens);
    });
    Ok(tokens)
}

fn check_trained(vocab: &BpeVocab) -> WMResult<()> {
    if vocab.is_empty() {
        return Err(InvalidInput::UntrainedVocab.into());
    }
    Ok(())
}

fn encode_word(
    vocab: &BpeVocab,
    spanner: &WordSpanner,
    encoder: &dyn SpanEncoder,
    word: &str,
) -> Vec<Symbol> {
    let mut symbols = spanner.word_symbols(word);
    encoder.encode_span(vocab, &mut symbols);
    symbols
}

fn render_tokens(
    vocab: &BpeVocab,
    symbols: &[Symbol],
    tokens: &mut Vec<String>,
) {
    vocab.options().render_word(symbols, tokens);
}

/// A tokenizer over a shared, read-only [`BpeVocab`].
///
/// `Tokenizer` is `Send + Sync`; one instance may serve many threads.
#[derive(Clone)]
pub struct Tokenizer {
    vocab: Arc<BpeVocab>,
    spanner: WordSpanner,
    encoder: Arc<dyn SpanEncoder>,
}

impl Tokenizer {
    /// Build a tokenizer with default [`TokenizerOptions`].
    pub fn new(vocab: Arc<BpeVocab>) -> WMResult<Self> {
        Self::with_options(vocab, TokenizerOptions::default())
    }

    /// Build a tokenizer.
    ///
    /// ## Arguments
    /// * `vocab` - A trained vocabulary.
    /// * `options` - The tokenizer options.
    ///
    /// ## Returns
    /// An `InvalidInput::UntrainedVocab` error if the vocabulary is empty.
    pub fn with_options(
        vocab: Arc<BpeVocab>,
        options: TokenizerOptions,
    ) -> WMResult<Self> {
        check_trained(&vocab)?;
        Ok(Self {
            spanner: vocab.options().spanner(),
            encoder: options.encoder().span_encoder(),
            vocab,
        })
    }

    /// The vocabulary.
    pub fn vocab(&self) -> &Arc<BpeVocab> {
        &self.vocab
    }

    /// The final symbols for each word of `text`, end-of-word markers included.
    pub fn word_symbols(
        &self,
        text: &str,
    ) -> Vec<Vec<Symbol>> {
        let mut words = Vec::new();
        self.spanner.for_each_word(text, |word| {
            words.push(encode_word(
                &self.vocab,
                &self.spanner,
                self.encoder.as_ref(),
                word,
            ));
        });
        words
    }

    /// Tokenize `text`, keeping per-word token lists.
    pub fn tokenize_words(
        &self,
        text: &str,
    ) -> Vec<Vec<String>> {
        self.word_symbols(text)
            .into_iter()
            .map(|symbols| {
                let mut tokens = Vec::with_capacity(symbols.len());
                render_tokens(&self.vocab, &symbols, &mut tokens);
                tokens
            })
            .collect()
    }

    /// Tokenize `text`; the tokens of every word, in input order.
    pub fn tokenize(
        &self,
        text: &str,
    ) -> Vec<String> {
        let mut tokens = Vec::new();
        self.spanner.for_each_word(text, |word| {
            let symbols = encode_word(&self.vocab, &self.spanner, self.encoder.as_ref(), word);
            render_tokens(&self.vocab, &symbols, &mut tokens);
        });
        tokens
    }

    /// Encode `text` to token ids.
    ///
    /// Symbols outside the vocabulary map to
    /// [`crate::vocab::UNKNOWN_TOKEN_ID`].
    pub fn encode(
        &self,
        text: &str,
    ) -> Vec<TokenId> {
        self.word_symbols(text)
            .iter()
            .flatten()
            .map(|s| self.vocab.token_id_or_unknown(s))
            .collect()
    }

    /// Decode token ids to text.
    ///
    /// Symbols are concatenated; each end-of-word marker becomes a single
    /// space between words. The unknown token id decodes to the unknown token.
    ///
    /// Ids carry no word boundaries of their own, so any symbol whose text
    /// ends with the marker is read as word-final. Words that contain the
    /// marker text literally do not decode to their original form.
    ///
    /// ## Returns
    /// A [`WordmergeError::UnknownTokenId`] error for ids outside the vocabulary.
    pub fn decode(
        &self,
        tokens: &[TokenId],
    ) -> WMResult<String> {
        let end_of_word = self.spanner.end_of_word().as_str();

        let mut text = String::new();
        for &id in tokens {
            let symbol = self
                .vocab
                .symbol(id)
                .ok_or(WordmergeError::UnknownTokenId(id))?;
            match symbol.strip_suffix(end_of_word) {
                Some(stem) => {
                    text.push_str(stem);
                    text.push(' ');
                }
                None => text.push_str(symbol),
            }
        }
        if text.ends_with(' ') {
            text.pop();
        }
        Ok(text)
    }

    /// Tokenize a batch of texts, in parallel.
    #[cfg(feature = "rayon")]
    pub fn tokenize_batch<S>(
        &self,
        batch: &[S],
    ) -> Vec<Vec<String>>
    where
        S: AsRef<str> + Sync,
    {
        use rayon::prelude::*;

        batch.par_iter().map(|s| self.tokenize(s.as_ref())).collect()
    }

    /// Tokenize a batch of texts.
    #[cfg(not(feature = "rayon"))]
    pub fn tokenize_batch<S>(
        &self,
        batch: &[S],
    ) -> Vec<Vec<String>>
    where
        S: AsRef<str> + Sync,
    {
        batch.iter().map(|s| self.tokenize(s.as_ref())).collect()
    }
}
