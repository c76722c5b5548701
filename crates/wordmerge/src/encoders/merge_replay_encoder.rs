//! # Merge Replay Span Encoder
//!
//! Replays every merge rule, in rank order,
//! merging each rule's non-overlapping occurrences left to right.

use crate::{
    encoders::SpanEncoder,
    types::Symbol,
    vocab::{BpeVocab, MergeRule},
};

/// A [`SpanEncoder`] which replays the full merge list.
///
/// Cost is proportional to the number of rules, per word.
#[derive(Debug, Default, Clone, Copy)]
pub struct MergeReplaySpanEncoder;

impl SpanEncoder for MergeReplaySpanEncoder {
    fn encode_span(
        &self,
        vocab: &BpeVocab,
        symbols: &mut Vec<Symbol>,
    ) {
        for rule in vocab.merges() {
            if symbols.len() < 2 {
                break;
            }
            apply_rule(rule, symbols);
        }
    }
}

/// Merge every non-overlapping occurrence of `rule`, left to right.
fn apply_rule(
    rule: &MergeRule,
    symbols: &mut Vec<Symbol>,
) {
    let n = symbols.len();
    let mut write = 0;
    let mut read = 0;
    while read < n {
        if read + 1 < n && rule.matches(&symbols[read], &symbols[read + 1]) {
            symbols[write] = rule.merged.clone();
            read += 2;
        } else {
            symbols.swap(write, read);
            read += 1;
        }
        write += 1;
    }
    symbols.truncate(write);
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::encoders::testing::{common_encoder_tests, test_symbols};

    #[test]
    fn test_apply_rule_non_overlapping() {
        let rule = MergeRule::new("a".into(), "a".into(), 0);

        let mut symbols = test_symbols(&["a", "a", "a", "</w>"]);
        apply_rule(&rule, &mut symbols);
        assert_eq!(symbols, vec!["aa", "a", "</w>"]);

        let mut symbols = test_symbols(&["a", "a", "a", "a", "</w>"]);
        apply_rule(&rule, &mut symbols);
        assert_eq!(symbols, vec!["aa", "aa", "</w>"]);

        let mut symbols = test_symbols(&["b", "a"]);
        apply_rule(&rule, &mut symbols);
        assert_eq!(symbols, vec!["b", "a"]);
    }

    #[test]
    fn test_encoder() {
        common_encoder_tests(&MergeReplaySpanEncoder);
    }
}
