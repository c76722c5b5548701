//! Tokenizer Options
//!
//! Options for building a [`Tokenizer`].

use std::sync::Arc;

use crate::{encoders::EncoderKind, errors::WMResult, tokenizer::Tokenizer, vocab::BpeVocab};

/// Options for configuring a [`Tokenizer`].
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct TokenizerOptions {
    /// The [`EncoderKind`] to use.
    pub encoder: EncoderKind,
}

impl TokenizerOptions {
    /// Get the configured [`EncoderKind`].
    pub fn encoder(&self) -> EncoderKind {
        self.encoder
    }

    /// Set the configured [`EncoderKind`] and return the builder.
    pub fn with_encoder(
        self,
        encoder: EncoderKind,
    ) -> Self {
        Self { encoder }
    }

    /// Build a [`Tokenizer`] over `vocab`.
    ///
    /// ## Returns
    /// An `InvalidInput::UntrainedVocab` error if the vocabulary is empty.
    pub fn build(
        self,
        vocab: Arc<BpeVocab>,
    ) -> WMResult<Tokenizer> {
        Tokenizer::with_options(vocab, self)
    }
}
