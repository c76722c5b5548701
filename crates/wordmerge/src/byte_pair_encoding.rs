//! # Byte Pair Encoding
//!
//! A corpus-bound convenience wrapper over [`crate::training`] and
//! [`crate::tokenizer`]: construct over a corpus, train once, then tokenize.
//!
//! ```rust
//! use wordmerge::BytePairEncoding;
//!
//! let mut bpe = BytePairEncoding::new("low lower lowest", true);
//! bpe.train(2).unwrap();
//!
//! assert_eq!(
//!     bpe.tokenize("lowering").unwrap(),
//!     vec!["low", "e", "r", "i", "n", "g", "</w>"]
//! );
//! ```

use std::{collections::BTreeSet, path::Path, sync::Arc};

use crate::{
    errors::{InvalidInput, WMResult},
    tokenizer::{Tokenizer, TokenizerOptions},
    training::{BpeTrainer, BpeTrainerOptions, TrainResults},
    types::TokenId,
    vocab::{BpeVocab, VocabOptions},
};

/// Convert a signed merge count to a merge budget.
///
/// ## Returns
/// `InvalidInput::NegativeMergeCount` for negative counts.
pub fn merge_budget(num_merges: i64) -> WMResult<usize> {
    usize::try_from(num_merges).map_err(|_| InvalidInput::NegativeMergeCount(num_merges).into())
}

/// Train a vocabulary over `corpus`.
///
/// ## Arguments
/// * `corpus` - The training text.
/// * `num_merges` - The merge budget; must be non-negative.
/// * `lower_case` - Fold the corpus (and later inputs) to lowercase.
///
/// ## Returns
/// The [`TrainResults`]; or an `InvalidInput` error for a negative
/// budget or a corpus with no words.
pub fn create_vocab_and_tokenization(
    corpus: &str,
    num_merges: i64,
    lower_case: bool,
) -> WMResult<TrainResults> {
    BytePairEncoding::new(corpus, lower_case).train(num_merges)
}

/// Base statistics of a training corpus, after case folding.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct CorpusStats {
    /// Number of characters.
    pub chars: usize,

    /// Number of distinct characters.
    pub distinct_chars: usize,
}

impl CorpusStats {
    /// Compute the stats of `text`.
    pub fn from_text(text: &str) -> Self {
        let distinct: BTreeSet<char> = text.chars().collect();
        Self {
            chars: text.chars().count(),
            distinct_chars: distinct.len(),
        }
    }
}

/// A corpus, and the vocabulary trained over it.
pub struct BytePairEncoding {
    corpus: String,
    options: VocabOptions,
    stats: CorpusStats,
    tokenizer_options: TokenizerOptions,
    tokenizer: Option<Tokenizer>,
}

impl BytePairEncoding {
    /// Hold `corpus` for training.
    ///
    /// ## Arguments
    /// * `corpus` - The training text.
    /// * `lower_case` - Fold the corpus (and later inputs) to lowercase.
    pub fn new<S: Into<String>>(
        corpus: S,
        lower_case: bool,
    ) -> Self {
        Self::with_options(corpus, VocabOptions::default().with_lower_case(lower_case))
    }

    /// Hold `corpus` for training, with explicit [`VocabOptions`].
    pub fn with_options<S: Into<String>>(
        corpus: S,
        options: VocabOptions,
    ) -> Self {
        let corpus = corpus.into();
        let stats = CorpusStats::from_text(&options.spanner().normalize(&corpus));
        log::info!(
            "Base corpus has {} characters with {} distinct",
            stats.chars,
            stats.distinct_chars
        );

        Self {
            corpus,
            options,
            stats,
            tokenizer_options: TokenizerOptions::default(),
            tokenizer: None,
        }
    }

    /// Read the corpus from a UTF-8 file.
    pub fn from_path<P: AsRef<Path>>(
        path: P,
        lower_case: bool,
    ) -> WMResult<Self> {
        let corpus = std::fs::read_to_string(path)?;
        Ok(Self::new(corpus, lower_case))
    }

    /// Sets the [`TokenizerOptions`] used after training.
    pub fn with_tokenizer_options(
        self,
        tokenizer_options: TokenizerOptions,
    ) -> Self {
        Self {
            tokenizer_options,
            ..self
        }
    }

    /// The preprocessing options.
    pub fn options(&self) -> &VocabOptions {
        &self.options
    }

    /// The base corpus statistics.
    pub fn corpus_stats(&self) -> CorpusStats {
        self.stats
    }

    /// Learn up to `num_merges` merges over the corpus.
    ///
    /// Replaces any previously trained vocabulary.
    ///
    /// ## Returns
    /// The [`TrainResults`]; or an `InvalidInput` error for a negative
    /// budget or a corpus with no words.
    pub fn train(
        &mut self,
        num_merges: i64,
    ) -> WMResult<TrainResults> {
        let num_merges = merge_budget(num_merges)?;

        let mut trainer: BpeTrainer = BpeTrainerOptions::new(num_merges)
            .with_vocab_options(self.options.clone())
            .init();
        trainer.update_from_text(&self.corpus);

        let results = trainer.train()?;
        self.tokenizer = Some(self.tokenizer_options.build(results.vocab.clone())?);
        Ok(results)
    }

    /// The trained vocabulary, if any.
    pub fn vocab(&self) -> Option<&Arc<BpeVocab>> {
        self.tokenizer.as_ref().map(Tokenizer::vocab)
    }

    /// The trained tokenizer, if any.
    pub fn tokenizer(&self) -> Option<&Tokenizer> {
        self.tokenizer.as_ref()
    }

    fn trained(&self) -> WMResult<&Tokenizer> {
        self.tokenizer
            .as_ref()
            .ok_or_else(|| InvalidInput::UntrainedVocab.into())
    }

    /// Tokenize `text` with the trained vocabulary.
    ///
    /// ## Returns
    /// `InvalidInput::UntrainedVocab` if [`Self::train`] has not been called.
    pub fn tokenize(
        &self,
        text: &str,
    ) -> WMResult<Vec<String>> {
        Ok(self.trained()?.tokenize(text))
    }

    /// Encode `text` to token ids with the trained vocabulary.
    pub fn encode(
        &self,
        text: &str,
    ) -> WMResult<Vec<TokenId>> {
        Ok(self.trained()?.encode(text))
    }
}
