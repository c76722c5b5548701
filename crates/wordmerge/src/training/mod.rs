//! # Vocabulary Training
//!
//! Learns an ordered list of merge rules from a corpus.
//!
//! Training:
//! * splits each sample into words, per [`crate::vocab::VocabOptions`];
//! * counts distinct words;
//! * starts every word as its characters plus an end-of-word marker;
//! * repeatedly merges the most frequent adjacent pair, across all words,
//!   until the merge budget is spent or no pair is left.
//!
//! Ties between equally frequent pairs go to the lexicographically smallest
//! ``(left, right)`` pair, so training is reproducible.
//!
//! ## Training Example
//!
//! ```rust
//! use wordmerge::training::{BpeTrainer, BpeTrainerOptions};
//!
//! let mut trainer: BpeTrainer = BpeTrainerOptions::new(2).with_lower_case(true).init();
//! trainer.update_from_samples(["low lower", "lowest"]);
//!
//! let results = trainer.train().unwrap();
//! assert_eq!(results.merges_performed, 2);
//!
//! let rules = results.vocab.merges();
//! assert_eq!((rules[0].left.as_str(), rules[0].right.as_str()), ("l", "o"));
//! assert_eq!(rules[1].merged.as_str(), "low");
//! ```

pub mod utility;

mod bpe_trainer;
mod training_types;

#[doc(inline)]
pub use bpe_trainer::{BpeTrainer, BpeTrainerOptions, MergeJob, TrainResults};
#[doc(inline)]
pub use training_types::{WordCountType, WordKeyType};
