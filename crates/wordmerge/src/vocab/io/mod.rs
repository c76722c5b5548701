//! # Vocabulary IO
//!
//! Vocabularies are stored as JSON: the [`crate::vocab::VocabOptions`],
//! the sorted base alphabet, and the ordered merge pairs.
//!
//! ```rust,no_run
//! use wordmerge::{
//!     tokenizer::Tokenizer,
//!     vocab::io::load_json_vocab_path,
//! };
//!
//! fn example() -> wordmerge::WMResult<Vec<String>> {
//!     let vocab = load_json_vocab_path("vocab.json")?;
//!     let tokenizer = Tokenizer::new(vocab.into())?;
//!     Ok(tokenizer.tokenize("the lowest tower"))
//! }
//! ```

mod json_vocab;

#[doc(inline)]
pub use json_vocab::*;
