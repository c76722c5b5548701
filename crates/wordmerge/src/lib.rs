//! # `wordmerge` Word-Level BPE
//!
//! Learns a subword vocabulary from a corpus with word-frequency byte pair
//! encoding (Sennrich et al., "Neural Machine Translation of Rare Words with
//! Subword Units"), and segments new text with it.
//!
//! Words carry an explicit end-of-word marker (``</w>`` by default), so
//! merges never cross word boundaries and word-final units stay distinct.
//!
//! See:
//! * [`training`] to learn a [`vocab::BpeVocab`] from a corpus.
//! * [`tokenizer`] to segment text with a trained vocabulary.
//! * [`vocab`] for the vocabulary, its options, and vocab io.
//! * [`BytePairEncoding`] for the corpus-bound wrapper over both.
//!
//! ## Crate Features
//!
//! #### feature: ``default``
//!
//! * ``ahash``
//! * ``rayon``
//!
//! #### feature: ``ahash``
//!
//! This swaps all HashMap/HashSet implementations for ``ahash``.
//!
//! This is done by the ``types::WMHash{*}`` type alias machinery.
//!
//! #### feature: ``rayon``
//!
//! This enables parallel [`tokenizer::Tokenizer::tokenize_batch`].
//!
//! #### feature: ``tracing``
//!
//! This enables a number of ``tracing`` instrumentation points.
//! This is only useful for timing tracing of the library itself.
//!
//! ## Example
//!
//! ```rust
//! use wordmerge::create_vocab_and_tokenization;
//!
//! let results = create_vocab_and_tokenization("low lower lowest", 2, true).unwrap();
//! assert_eq!(results.merges_performed, 2);
//!
//! let tokens = wordmerge::tokenize(&results.vocab, "lowering").unwrap();
//! assert_eq!(tokens, vec!["low", "e", "r", "i", "n", "g", "</w>"]);
//! ```
#![warn(missing_docs, unused)]

pub mod compat;
pub mod encoders;
pub mod errors;
pub mod spanning;
pub mod tokenizer;
pub mod training;
pub mod types;
pub mod vocab;

mod byte_pair_encoding;

#[doc(inline)]
pub use byte_pair_encoding::{
    BytePairEncoding, CorpusStats, create_vocab_and_tokenization, merge_budget,
};
#[doc(inline)]
pub use errors::{InvalidInput, WMResult, WordmergeError};
#[doc(inline)]
pub use tokenizer::{Tokenizer, TokenizerOptions, tokenize};
#[doc(inline)]
pub use vocab::{BpeVocab, VocabOptions};
