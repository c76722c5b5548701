//! # `PairIndex` Builder

use crate::training::WordCountType;
use crate::training::utility::symbol_span_buffer::SymbolSpanBuf;
use crate::types::{SymbolPair, WMHashMap, WMHashSet};

/// A map from [`SymbolPair`] to its weighted occurrence count.
pub type PairCountMap<C> = WMHashMap<SymbolPair, C>;

/// A map from [`SymbolPair`] to indices over ``words``.
pub type PairIndexMap = WMHashMap<SymbolPair, WMHashSet<usize>>;

/// An index of pair information relative to a ``&[SymbolSpanBuf]``.
#[derive(Debug, Clone)]
pub struct PairSpanIndex<C: WordCountType> {
    /// A map from [`SymbolPair`] to its occurrence count.
    ///
    /// ``sum(words[i].window_count(pair) * word_counts[i]) for all i``
    pub pair_counts: PairCountMap<C>,

    /// A map from [`SymbolPair`] to the indices of words that may contain it.
    pub pair_index: PairIndexMap,
}

impl<C: WordCountType> PairSpanIndex<C> {
    /// Build a [`PairSpanIndex`] from a slice of [`SymbolSpanBuf`]s, using a count table.
    ///
    /// # Arguments
    /// * `spans` - a sequence of word spans; assumed to be unique.
    /// * `counts` - `counts[i]` is the count of `spans[i]`.
    #[cfg_attr(feature = "tracing", tracing::instrument(skip(spans, counts)))]
    pub fn from_span_count_table(
        spans: &[SymbolSpanBuf],
        counts: &[C],
    ) -> Self {
        let size_hint = spans.len();

        let mut pair_index = PairSpanIndex {
            pair_counts: PairCountMap::with_capacity(size_hint),
            pair_index: PairIndexMap::with_capacity(size_hint),
        };

        let zero = C::zero();

        for (index, (span, &count)) in spans.iter().zip(counts).enumerate() {
            if count != zero && span.len() >= 2 {
                for p in span.pairs() {
                    *pair_index.pair_counts.entry(p.clone()).or_default() += count;
                    pair_index.pair_index.entry(p).or_default().insert(index);
                }
            }
        }

        pair_index
    }
}
