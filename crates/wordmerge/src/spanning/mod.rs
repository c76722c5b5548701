//! # Word Spanning
//!
//! Splits text into words and words into their initial symbols.

mod word_spanner;

#[doc(inline)]
pub use word_spanner::{WORD_PUNCT_PATTERN, WordSpanner, word_symbols};
