//! # Symbol Span Buffer

use crate::{
    spanning::word_symbols,
    types::{Symbol, SymbolPair},
};

/// A mutable span of symbols (one distinct word).
///
/// Iteratively rewritten during BPE vocabulary training.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct SymbolSpanBuf {
    symbols: Vec<Symbol>,
}

impl<S: Into<Symbol>> FromIterator<S> for SymbolSpanBuf {
    fn from_iter<I: IntoIterator<Item = S>>(iter: I) -> Self {
        Self {
            symbols: iter.into_iter().map(Into::into).collect(),
        }
    }
}

impl SymbolSpanBuf {
    const DEC: i32 = -1;
    const INC: i32 = 1;

    /// Create a new span buffer from symbols.
    pub fn from_symbols(symbols: Vec<Symbol>) -> Self {
        Self { symbols }
    }

    /// Create the initial span for a word: its characters, then `end_of_word`.
    ///
    /// # Arguments
    /// * `word` - the (already case-folded) word.
    /// * `end_of_word` - the end-of-word marker symbol.
    pub fn from_word(
        word: &str,
        end_of_word: &Symbol,
    ) -> Self {
        Self {
            symbols: word_symbols(word, end_of_word),
        }
    }

    /// View the symbols as a slice.
    pub fn symbols(&self) -> &[Symbol] {
        &self.symbols
    }

    /// Consume the span, returning its symbols.
    pub fn into_symbols(self) -> Vec<Symbol> {
        self.symbols
    }

    /// Get the length of the span.
    pub fn len(&self) -> usize {
        self.symbols.len()
    }

    /// Is this span empty?
    pub fn is_empty(&self) -> bool {
        self.symbols.is_empty()
    }

    /// Get an iterator over adjacent [`SymbolPair`] windows of this span.
    pub fn pairs(&self) -> impl Iterator<Item = SymbolPair> + '_ {
        self.symbols
            .windows(2)
            .map(|w| (w[0].clone(), w[1].clone()))
    }

    /// Merge all non-overlapping occurrences of `pair -> replacement`, left to right.
    ///
    /// # Arguments
    /// * `pair` - the pair to merge.
    /// * `replacement` - the symbol to replace `pair` with.
    /// * `on_merge` - a callback function to invoke for each incremental pair delta.
    ///   The function is called with:
    ///   - `pair` - the adjacent pair that was removed or added.
    ///   - `delta` - the pair count delta: `+1` for an added pair, `-1` for a removed pair.
    pub fn merge_pair_cb<F>(
        &mut self,
        pair: &SymbolPair,
        replacement: &Symbol,
        on_merge: &mut F,
    ) where
        F: FnMut(SymbolPair, i32),
    {
        let (a, b) = pair;
        let n = self.symbols.len();

        if n < 2 {
            return;
        }

        let mut new_symbols: Vec<Symbol> = Vec::with_capacity(n);

        let mut i = 0;
        while i < n {
            let current = &self.symbols[i];

            if i + 1 < n && current == a && &self.symbols[i + 1] == b {
                // Remove Previous Pair?
                if let Some(x) = new_symbols.last() {
                    on_merge((x.clone(), a.clone()), Self::DEC);
                    on_merge((x.clone(), replacement.clone()), Self::INC);
                }

                // Remove Current Pair.
                on_merge(pair.clone(), Self::DEC);

                // Remove Next Pair?
                if i + 2 < n {
                    let y = &self.symbols[i + 2];
                    on_merge((b.clone(), y.clone()), Self::DEC);
                    on_merge((replacement.clone(), y.clone()), Self::INC);
                }

                new_symbols.push(replacement.clone());

                // Skip 'a' and 'b'.
                i += 2;
            } else {
                new_symbols.push(current.clone());
                i += 1;
            }
        }

        self.symbols = new_symbols;
    }

    /// Merge all non-overlapping occurrences of `pair -> replacement`.
    ///
    /// # Returns
    /// a delta list of pair count deltas for this span:
    /// * `(Pair, +1)` - for each instance of an added `Pair`.
    /// * `(Pair, -1)` - for each instance of a removed `Pair`.
    pub fn merge_pair(
        &mut self,
        pair: &SymbolPair,
        replacement: &Symbol,
    ) -> Vec<(SymbolPair, i32)> {
        let mut deltas: Vec<(SymbolPair, i32)> = Vec::with_capacity(6);
        self.merge_pair_cb(pair, replacement, &mut |p, d| deltas.push((p, d)));
        deltas
    }
}
