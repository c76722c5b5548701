//! # Word Counter

use crate::spanning::WordSpanner;
use crate::training::utility::symbol_span_buffer::SymbolSpanBuf;
use crate::training::{WordCountType, WordKeyType};
use crate::types::WMHashMap;

/// Word counter structure.
///
/// Accumulates ``{ word -> count }`` over any number of samples.
pub struct WordCounter<K, C>
where
    K: WordKeyType,
    C: WordCountType,
{
    /// The spanner used to find (and case fold) words.
    pub spanner: WordSpanner,

    /// The word counts.
    pub word_counts: WMHashMap<K, C>,
}

impl<K, C> WordCounter<K, C>
where
    K: WordKeyType,
    C: WordCountType,
{
    /// Create a new word counter.
    pub fn new(spanner: WordSpanner) -> Self {
        Self {
            spanner,
            word_counts: WMHashMap::with_capacity(1024),
        }
    }

    /// Release the word counts and return them.
    pub fn release(self) -> WMHashMap<K, C> {
        self.word_counts
    }

    /// Number of distinct words seen.
    pub fn distinct_words(&self) -> usize {
        self.word_counts.len()
    }

    /// Total number of word occurrences seen.
    pub fn total_words(&self) -> C {
        C::saturating_total(self.word_counts.values())
    }

    /// Update word counts inplace from text.
    pub fn update_from_text<S: AsRef<str>>(
        &mut self,
        text: S,
    ) {
        let word_counts = &mut self.word_counts;
        self.spanner.for_each_word(text.as_ref(), |word| {
            let k: K = word.into();
            *word_counts.entry(k).or_default() += C::one();
        });
    }

    /// Update word counts inplace from a sample iterator.
    pub fn update_from_samples<I>(
        &mut self,
        samples: I,
    ) where
        I: IntoIterator,
        I::Item: AsRef<str>,
    {
        for sample in samples {
            self.update_from_text(sample);
        }
    }

    /// Convert the counts to ``(SymbolSpanBuf, count)`` entries, sorted by word.
    ///
    /// Sorting fixes the word indices used by the trainer's pair index,
    /// so training logs are reproducible run to run.
    pub fn to_symbol_span_counts(&self) -> Vec<(SymbolSpanBuf, C)> {
        let mut entries: Vec<(&K, &C)> = self.word_counts.iter().collect();
        entries.sort_unstable_by(|a, b| a.0.cmp(b.0));

        let end_of_word = self.spanner.end_of_word();
        entries
            .into_iter()
            .map(|(k, &c)| (SymbolSpanBuf::from_word(k.as_ref(), end_of_word), c))
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use compact_str::CompactString;

    use super::*;
    use crate::vocab::SplitMode;

    fn spanner(lower_case: bool) -> WordSpanner {
        WordSpanner::new(lower_case, SplitMode::Whitespace, "</w>".into())
    }

    #[test]
    fn test_word_counter() {
        let mut wc: WordCounter<String, u64> = WordCounter::new(spanner(false));

        let samples = vec!["Hello world", "Foo world bar world"];
        wc.update_from_samples(samples.iter());

        assert_eq!(wc.distinct_words(), 4);
        assert_eq!(wc.total_words(), 6);

        let mut counts: Vec<(String, u64)> = wc.release().into_iter().collect();
        counts.sort();
        assert_eq!(
            counts,
            vec![
                ("Foo".into(), 1),
                ("Hello".into(), 1),
                ("bar".into(), 1),
                ("world".into(), 3),
            ]
        );
    }

    #[test]
    fn test_word_counter_lower_case() {
        let mut wc: WordCounter<CompactString, u32> = WordCounter::new(spanner(true));
        wc.update_from_text("Low LOW low Lower");

        assert_eq!(wc.word_counts[&CompactString::from("low")], 3);
        assert_eq!(wc.word_counts[&CompactString::from("lower")], 1);
        assert_eq!(wc.distinct_words(), 2);
    }

    #[test]
    fn test_to_symbol_span_counts() {
        let mut wc: WordCounter<CompactString, u32> = WordCounter::new(spanner(false));
        wc.update_from_text("ab b ab");

        let counts = wc.to_symbol_span_counts();
        assert_eq!(counts.len(), 2);

        assert_eq!(counts[0].0.symbols(), &["a", "b", "</w>"]);
        assert_eq!(counts[0].1, 2);

        assert_eq!(counts[1].0.symbols(), &["b", "</w>"]);
        assert_eq!(counts[1].1, 1);
    }
}
