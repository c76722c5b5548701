//! # Merge Scan Span Encoder
//!
//! Incrementally re-scans for the best available merge,
//! iterates until no more merges remain.

use crate::{encoders::SpanEncoder, types::Symbol, vocab::BpeVocab};

/// A [`SpanEncoder`] which incrementally scans for merges.
///
/// Each step merges the lowest ranked adjacent pair, leftmost first.
/// Ranks below the last applied rank are skipped: a merged symbol may
/// equal an existing symbol, and pairs it forms with earlier ranks were
/// already passed over in rank order.
///
/// Cost is proportional to the word length, not the number of rules.
#[derive(Debug, Default, Clone, Copy)]
pub struct MergeScanSpanEncoder;

impl SpanEncoder for MergeScanSpanEncoder {
    fn encode_span(
        &self,
        vocab: &BpeVocab,
        symbols: &mut Vec<Symbol>,
    ) {
        let rules = vocab.merges();
        let mut floor = 0;

        while symbols.len() >= 2 {
            // Find the lowest ranked merge available.
            let Some((rank, idx)) = symbols
                .windows(2)
                .enumerate()
                .filter_map(|(idx, w)| {
                    vocab
                        .lookup_merge(&w[0], &w[1])
                        .map(|rule| (rule.rank, idx))
                })
                .filter(|&(rank, _)| rank >= floor)
                .min()
            else {
                break;
            };

            // buf[idx..=idx+1] (a, b) -> buf[idx] ab
            symbols[idx] = rules[rank].merged.clone();
            symbols.remove(idx + 1);
            floor = rank;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::encoders::testing::{common_encoder_tests, test_symbols};
    use crate::types::symbol_pair;
    use crate::vocab::VocabOptions;

    #[test]
    fn test_encoder() {
        common_encoder_tests(&MergeScanSpanEncoder);
    }

    #[test]
    fn test_merged_symbol_equals_marker() {
        // The last rule rebuilds the marker, forming a ("</w>", "</w>")
        // pair whose rule ranks earlier; replay never applies it.
        let vocab = BpeVocab::from_parts(
            VocabOptions::default(),
            ["<", "/", "w", ">", "</w>"].map(Symbol::from),
            vec![
                symbol_pair("</w>", "</w>"),
                symbol_pair("<", "/"),
                symbol_pair("</", "w"),
                symbol_pair("</w", ">"),
            ],
        )
        .unwrap();

        let mut symbols = test_symbols(&["<", "/", "w", ">", "</w>"]);
        MergeScanSpanEncoder.encode_span(&vocab, &mut symbols);
        assert_eq!(symbols, vec!["</w>", "</w>"]);
    }
}
