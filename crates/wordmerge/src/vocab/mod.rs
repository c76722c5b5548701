//! # Vocabulary
//!
//! This module provides the trained vocabulary and its io mechanisms.
//!
//! A [`BpeVocab`] holds:
//! * `options` - the [`VocabOptions`] it was trained with,
//! * `alphabet` - the sorted base symbols,
//! * `merges` - the ordered [`MergeRule`] list ``(left, right) -> merged``,
//! * the symbol set, with token ids.
pub mod io;

mod bpe_vocab;
mod merge_rule;
mod vocab_options;

#[doc(inline)]
pub use bpe_vocab::{BpeVocab, UNKNOWN_TOKEN_ID, try_validate_merges};
#[doc(inline)]
pub use merge_rule::MergeRule;
#[doc(inline)]
pub use vocab_options::{
    DEFAULT_END_OF_WORD, DEFAULT_UNKNOWN_TOKEN, EndOfWordMode, SplitMode, VocabOptions,
};
