//! # Span Encoder Trait

use std::sync::Arc;

use serde::{Deserialize, Serialize};

use crate::{
    encoders::{MergeReplaySpanEncoder, MergeScanSpanEncoder},
    types::Symbol,
    vocab::BpeVocab,
};

/// A strategy for applying a vocabulary's merge rules to one word.
pub trait SpanEncoder: Send + Sync {
    /// Merges a word's symbols, in place.
    ///
    /// ## Arguments
    /// * `vocab` - The reference vocabulary.
    /// * `symbols` - The word's initial symbols (characters plus the
    ///   end-of-word marker); rewritten to the final segmentation.
    fn encode_span(
        &self,
        vocab: &BpeVocab,
        symbols: &mut Vec<Symbol>,
    );
}

/// Selects a [`SpanEncoder`].
///
/// All encoders produce identical segmentations.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EncoderKind {
    /// Use the [`MergeScanSpanEncoder`].
    #[default]
    Scan,

    /// Use the [`MergeReplaySpanEncoder`].
    ///
    /// The reference encoder: the rule list is replayed literally.
    Replay,
}

impl EncoderKind {
    /// Build the selected [`SpanEncoder`].
    pub fn span_encoder(&self) -> Arc<dyn SpanEncoder> {
        match self {
            EncoderKind::Scan => Arc::new(MergeScanSpanEncoder),
            EncoderKind::Replay => Arc::new(MergeReplaySpanEncoder),
        }
    }
}
