//! # Vocab Trainer

use core::cmp::{Ordering, Reverse};
use std::{collections::BTreeSet, sync::Arc};

use compact_str::CompactString;
use dary_heap::OctonaryHeap;

use crate::errors::{InvalidInput, WMResult};
use crate::training::utility::{PairIndexMap, PairSpanIndex, SymbolSpanBuf, WordCounter};
use crate::training::{WordCountType, WordKeyType};
use crate::types::{Symbol, SymbolPair, WMHashSet};
use crate::vocab::{BpeVocab, VocabOptions};

/// Options for [`BpeTrainer`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BpeTrainerOptions {
    /// The maximum number of merges to learn.
    pub num_merges: usize,

    /// Preprocessing options, carried into the trained vocabulary.
    pub vocab: VocabOptions,
}

impl BpeTrainerOptions {
    /// Create new options.
    ///
    /// ## Arguments
    /// * `num_merges` - The merge budget.
    ///
    /// ## Returns
    /// A new `BpeTrainerOptions` instance with default [`VocabOptions`].
    pub fn new(num_merges: usize) -> Self {
        Self {
            num_merges,
            vocab: VocabOptions::default(),
        }
    }

    /// Sets the merge budget.
    pub fn with_num_merges(
        self,
        num_merges: usize,
    ) -> Self {
        Self { num_merges, ..self }
    }

    /// Sets case folding.
    pub fn with_lower_case(
        self,
        lower_case: bool,
    ) -> Self {
        Self {
            vocab: self.vocab.with_lower_case(lower_case),
            ..self
        }
    }

    /// Sets all vocabulary options.
    pub fn with_vocab_options(
        self,
        vocab: VocabOptions,
    ) -> Self {
        Self { vocab, ..self }
    }

    /// Initializes a [`BpeTrainer`] from these options.
    pub fn init<K, C>(self) -> BpeTrainer<K, C>
    where
        K: WordKeyType,
        C: WordCountType,
    {
        BpeTrainer::new(self)
    }
}

/// A candidate [`SymbolPair`] merge.
///
/// `count` may be stale (too high); the trainer re-validates on pop.
#[derive(Debug, Eq)]
pub struct MergeJob<C: WordCountType> {
    /// The number of instances of this pair in the corpus, when pushed.
    pub count: C,

    /// The pair to merge.
    pub pair: SymbolPair,
}

impl<C: WordCountType> MergeJob<C> {
    /// The job key.
    ///
    /// Max-heap by count; ties go to the lexicographically smallest ``(left, right)``.
    pub fn heap_key(&self) -> (C, Reverse<&SymbolPair>) {
        (self.count, Reverse(&self.pair))
    }
}

impl<C: WordCountType> PartialEq for MergeJob<C> {
    fn eq(
        &self,
        other: &Self,
    ) -> bool {
        self.heap_key() == other.heap_key()
    }
}

impl<C: WordCountType> PartialOrd for MergeJob<C> {
    fn partial_cmp(
        &self,
        other: &Self,
    ) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl<C: WordCountType> Ord for MergeJob<C> {
    fn cmp(
        &self,
        other: &Self,
    ) -> Ordering {
        self.heap_key().cmp(&other.heap_key())
    }
}

/// Trainer for learning word-level byte pair merges.
///
/// # Parameters
/// * `K` - the type used to store words in the word counts.
/// * `C` - the type used to store word and pair counts.
pub struct BpeTrainer<K = CompactString, C = u64>
where
    K: WordKeyType,
    C: WordCountType,
{
    /// Trainer options.
    pub options: BpeTrainerOptions,

    /// The word counter.
    pub word_counter: WordCounter<K, C>,
}

/// Training results.
#[derive(Debug, Clone)]
pub struct TrainResults {
    /// The trained vocabulary.
    pub vocab: Arc<BpeVocab>,

    /// The merge budget.
    pub merges_requested: usize,

    /// The number of merges actually learned.
    pub merges_performed: usize,

    /// The number of distinct words in the corpus.
    pub distinct_words: usize,

    /// The number of word occurrences in the corpus.
    pub total_words: u64,
}

impl TrainResults {
    /// Did training stop early because no pair was left to merge?
    pub fn is_exhausted(&self) -> bool {
        self.merges_performed < self.merges_requested
    }
}

impl<K, C> BpeTrainer<K, C>
where
    K: WordKeyType,
    C: WordCountType,
{
    /// Initializes a [`BpeTrainer`].
    pub fn new(options: BpeTrainerOptions) -> Self {
        let word_counter = WordCounter::new(options.vocab.spanner());
        Self {
            options,
            word_counter,
        }
    }

    /// Update word counts inplace from text.
    pub fn update_from_text<S: AsRef<str>>(
        &mut self,
        text: S,
    ) {
        self.word_counter.update_from_text(text);
    }

    /// Update word counts inplace from a sample iterator.
    ///
    /// ## Arguments
    /// * `samples` - An iterator over string-like samples.
    #[cfg_attr(feature = "tracing", tracing::instrument(skip(self, samples)))]
    pub fn update_from_samples<I>(
        &mut self,
        samples: I,
    ) where
        I: IntoIterator,
        I::Item: AsRef<str>,
    {
        self.word_counter.update_from_samples(samples);
    }

    /// Trains a [`BpeVocab`].
    ///
    /// Repeatedly merges the most frequent adjacent pair, until
    /// `num_merges` merges are learned or no pair remains.
    ///
    /// ## Returns
    /// A `Result` containing the [`TrainResults`];
    /// [`InvalidInput::EmptyCorpus`] if no words were counted; or
    /// [`crate::WordmergeError::VocabConflict`] for invalid vocab options.
    #[cfg_attr(feature = "tracing", tracing::instrument(skip(self)))]
    pub fn train(self) -> WMResult<TrainResults> {
        let num_merges = self.options.num_merges;
        self.options.vocab.try_validate()?;

        if self.word_counter.distinct_words() == 0 {
            return Err(InvalidInput::EmptyCorpus.into());
        }

        let distinct_words = self.word_counter.distinct_words();
        let total_words = self.word_counter.total_words().saturating_u64();
        log::info!(
            "Starting BPE training: {} merges to compute over {} distinct words ({} total)",
            num_merges,
            distinct_words,
            total_words
        );

        let (mut words, word_counts): (Vec<SymbolSpanBuf>, Vec<C>) = self
            .word_counter
            .to_symbol_span_counts()
            .into_iter()
            .unzip();

        let alphabet: BTreeSet<Symbol> = words
            .iter()
            .flat_map(|w| w.symbols().iter().cloned())
            .collect();
        log::info!("Base alphabet: {} symbols", alphabet.len());

        log::info!("Building pair index...");
        let PairSpanIndex {
            mut pair_counts,
            mut pair_index,
        } = PairSpanIndex::from_span_count_table(&words, &word_counts);

        let zero = C::zero();

        // ---- Build heap ----
        log::info!("Building heap with {} unique pairs", pair_counts.len());
        let mut heap = OctonaryHeap::with_capacity(pair_counts.len());
        for (pair, &count) in pair_counts.iter() {
            if count > zero {
                heap.push(MergeJob {
                    count,
                    pair: pair.clone(),
                });
            }
        }

        // ---- Merge loop ----
        log::info!("Starting merge loop");
        let mut merges: Vec<SymbolPair> = Vec::new();
        let mut last_log_percent = 0;

        while merges.len() < num_merges {
            let Some(mut job) = heap.pop() else {
                // No more pairs to merge
                break;
            };

            {
                // Lazy refresh the job count.
                let current = *pair_counts.get(&job.pair).unwrap_or(&zero);
                if job.count != current {
                    job.count = current;
                    if job.count > zero {
                        heap.push(job);
                    }
                    continue;
                }
            }

            if job.count == zero {
                // No live matches.
                continue;
            }

            let (left, right) = &job.pair;
            let merged: Symbol = {
                let mut s = left.clone();
                s.push_str(right);
                s
            };

            let mut grown = WMHashSet::<SymbolPair>::with_capacity(16);

            // Merge this pair in all words where it may occur.
            let word_indices = pair_index.remove(&job.pair).unwrap_or_default();
            for word_idx in word_indices {
                let weight = word_counts[word_idx];
                words[word_idx].merge_pair_cb(&job.pair, &merged, &mut |pair, delta| {
                    if delta < 0 {
                        *pair_counts.entry(pair).or_default() -= weight;
                    } else {
                        *pair_counts.entry(pair.clone()).or_default() += weight;
                        record_pair_word(&mut pair_index, pair.clone(), word_idx);
                        grown.insert(pair);
                    }
                });
            }
            pair_counts.remove(&job.pair);

            // Every pair that gained count holds `merged`; push it at its current count.
            for pair in grown {
                let count = *pair_counts.get(&pair).unwrap_or(&zero);
                if count > zero {
                    heap.push(MergeJob { count, pair });
                }
            }

            log::debug!(
                "merge {}: {:?} + {:?} -> {:?} (frequency: {})",
                merges.len(),
                left,
                right,
                merged,
                job.count
            );
            merges.push(job.pair);

            // Log progress every 1%
            let current_percent = (merges.len() * 100) / num_merges;
            if current_percent > last_log_percent {
                log::info!(
                    "Progress: {}% ({}/{} merges) - Last merge: {:?} (frequency: {})",
                    current_percent,
                    merges.len(),
                    num_merges,
                    merged,
                    job.count
                );
                last_log_percent = current_percent;
            }
        }

        let merges_performed = merges.len();
        if merges_performed < num_merges {
            log::info!(
                "No pairs left to merge: stopped after {} of {} merges",
                merges_performed,
                num_merges
            );
        } else {
            log::info!("Finished training: {} merges completed", merges_performed);
        }

        let vocab = BpeVocab::from_parts(self.options.vocab, alphabet, merges)?;

        Ok(TrainResults {
            vocab: Arc::new(vocab),
            merges_requested: num_merges,
            merges_performed,
            distinct_words,
            total_words,
        })
    }
}

fn record_pair_word(
    pair_index: &mut PairIndexMap,
    pair: SymbolPair,
    word_idx: usize,
) {
    pair_index.entry(pair).or_default().insert(word_idx);
}

#[cfg(test)]
mod tests {
    use std::collections::BTreeMap;

    use super::*;
    use crate::compat::traits::static_is_send_sync_check;
    use crate::types::symbol_pair;

    /// Full-recompute reference trainer.
    fn naive_merges(
        corpus: &str,
        num_merges: usize,
    ) -> Vec<SymbolPair> {
        let eow: Symbol = "</w>".into();
        let mut counts: BTreeMap<&str, u64> = BTreeMap::new();
        for w in corpus.split_whitespace() {
            *counts.entry(w).or_default() += 1;
        }
        let mut words: Vec<(Vec<Symbol>, u64)> = counts
            .into_iter()
            .map(|(w, c)| (crate::spanning::word_symbols(w, &eow), c))
            .collect();

        let mut merges = vec![];
        while merges.len() < num_merges {
            let mut pairs: BTreeMap<SymbolPair, u64> = BTreeMap::new();
            for (symbols, c) in &words {
                for w in symbols.windows(2) {
                    *pairs.entry((w[0].clone(), w[1].clone())).or_default() += c;
                }
            }
            let Some((best, _)) = pairs
                .into_iter()
                .max_by(|a, b| a.1.cmp(&b.1).then_with(|| b.0.cmp(&a.0)))
            else {
                break;
            };

            let merged: Symbol = format!("{}{}", best.0, best.1).into();
            for (symbols, _) in words.iter_mut() {
                let mut i = 0;
                while i + 1 < symbols.len() {
                    if symbols[i] == best.0 && symbols[i + 1] == best.1 {
                        symbols[i] = merged.clone();
                        symbols.remove(i + 1);
                    }
                    i += 1;
                }
            }
            merges.push(best);
        }
        merges
    }

    fn train(
        corpus: &str,
        num_merges: usize,
    ) -> TrainResults {
        let mut trainer = BpeTrainerOptions::new(num_merges).init::<CompactString, u64>();
        trainer.update_from_text(corpus);
        trainer.train().unwrap()
    }

    fn merge_pairs(results: &TrainResults) -> Vec<SymbolPair> {
        results.vocab.merges().iter().map(|r| r.pair()).collect()
    }

    #[test]
    fn test_trainer_options() {
        let options = BpeTrainerOptions::new(10);
        assert_eq!(options.num_merges, 10);
        assert!(!options.vocab.lower_case);

        let options = options.with_num_merges(20).with_lower_case(true);
        assert_eq!(options.num_merges, 20);
        assert!(options.vocab.lower_case);

        let options = options.with_vocab_options(VocabOptions::default());
        assert!(!options.vocab.lower_case);
    }

    #[test]
    fn test_low_lower_lowest() {
        let mut trainer = BpeTrainerOptions::new(2)
            .with_lower_case(true)
            .init::<CompactString, u32>();
        trainer.update_from_text("low lower lowest");

        let results = trainer.train().unwrap();
        static_is_send_sync_check(&results);

        assert_eq!(results.merges_requested, 2);
        assert_eq!(results.merges_performed, 2);
        assert!(!results.is_exhausted());
        assert_eq!(results.distinct_words, 3);
        assert_eq!(results.total_words, 3);

        // (l, o) and (o, w) tie at 3; (l, o) sorts first.
        assert_eq!(
            merge_pairs(&results),
            vec![symbol_pair("l", "o"), symbol_pair("lo", "w")]
        );
        assert!(results.vocab.contains("low"));
    }

    #[test]
    fn test_tie_break_is_lexicographic() {
        // Every pair occurs once; "</w>" sorts before letters.
        let results = train("ab ba", 10);
        assert_eq!(
            merge_pairs(&results),
            vec![
                symbol_pair("a", "</w>"),
                symbol_pair("a", "b"),
                symbol_pair("ab", "</w>"),
                symbol_pair("b", "a</w>"),
            ]
        );
        assert_eq!(results.merges_performed, 4);
        assert!(results.is_exhausted());
    }

    #[test]
    fn test_frequency_weighting() {
        // (h, e): 4 from "the" and 1 from "her".
        let results = train("the the the the her per", 1);
        assert_eq!(merge_pairs(&results), vec![symbol_pair("h", "e")]);

        // (t, h), (h, e) and (e, </w>) tie at 4; (e, r) has only 3.
        let results = train("the the the the ser per ter", 1);
        assert_eq!(merge_pairs(&results), vec![symbol_pair("e", "</w>")]);
    }

    #[test]
    fn test_deterministic() {
        let corpus = "the quick brown fox jumps over the lazy dog the end then there";
        let a = train(corpus, 25);
        let b = train(corpus, 25);
        assert_eq!(merge_pairs(&a), merge_pairs(&b));
        assert_eq!(
            a.vocab.symbols().collect::<Vec<_>>(),
            b.vocab.symbols().collect::<Vec<_>>()
        );
    }

    #[test]
    fn test_matches_full_recompute() {
        for (corpus, n) in [
            ("low lower lowest newer newest wider", 30),
            ("aaaa aaa aa a abab baba", 20),
            ("the cat sat on the mat the cat ate the rat", 40),
            ("x", 3),
        ] {
            let results = train(corpus, n);
            assert_eq!(merge_pairs(&results), naive_merges(corpus, n), "{corpus:?}");
        }
    }

    #[test]
    fn test_zero_merges() {
        let results = train("hello world", 0);
        assert_eq!(results.merges_performed, 0);
        assert!(!results.is_exhausted());
        assert!(results.vocab.merges().is_empty());
        assert_eq!(
            results.vocab.alphabet(),
            &["</w>", "d", "e", "h", "l", "o", "r", "w"]
        );
    }

    #[test]
    fn test_exhaustion() {
        // "ab</w>" is three symbols: at most two merges.
        let results = train("ab ab ab", 10);
        assert_eq!(results.merges_performed, 2);
        assert!(results.is_exhausted());
        assert_eq!(
            merge_pairs(&results),
            vec![symbol_pair("a", "b"), symbol_pair("ab", "</w>")]
        );
    }

    #[test]
    fn test_empty_corpus() {
        let mut trainer = BpeTrainerOptions::new(5).init::<CompactString, u64>();
        trainer.update_from_samples([" ", "\n\t"]);
        assert!(matches!(
            trainer.train(),
            Err(crate::WordmergeError::InvalidInput(InvalidInput::EmptyCorpus))
        ));
    }

    #[test]
    fn test_empty_end_of_word() {
        let mut trainer = BpeTrainerOptions::new(5)
            .with_vocab_options(VocabOptions::default().with_end_of_word(""))
            .init::<CompactString, u64>();
        trainer.update_from_text("low lower");
        assert!(matches!(
            trainer.train(),
            Err(crate::WordmergeError::VocabConflict(_))
        ));
    }

    #[test]
    fn test_merge_job_heap_key() {
        type C = u32;

        let job1: MergeJob<C> = MergeJob {
            pair: symbol_pair("a", "b"),
            count: 2,
        };
        let job2: MergeJob<C> = MergeJob {
            pair: symbol_pair("b", "a"),
            count: 1,
        };
        let job3: MergeJob<C> = MergeJob {
            pair: symbol_pair("a", "c"),
            count: 1,
        };

        assert_eq!(&job1, &job1);
        assert_ne!(&job1, &job2);

        // Higher count wins.
        assert_eq!(job1.cmp(&job2), Ordering::Greater);
        assert_eq!(job2.partial_cmp(&job1), Some(Ordering::Less));

        // Equal count: smaller pair wins.
        assert_eq!(job3.cmp(&job2), Ordering::Greater);
        assert_eq!(job2.cmp(&job3), Ordering::Less);

        let mut heap = OctonaryHeap::new();
        heap.push(job2);
        heap.push(job3);
        heap.push(job1);
        let order: Vec<SymbolPair> = std::iter::from_fn(|| heap.pop().map(|j| j.pair)).collect();
        assert_eq!(
            order,
            vec![
                symbol_pair("a", "b"),
                symbol_pair("a", "c"),
                symbol_pair("b", "a")
            ]
        );
    }
}
