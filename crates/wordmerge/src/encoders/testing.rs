//! # Encoder Test Utilities

use crate::{
    compat::traits::static_is_send_sync_check,
    encoders::{MergeReplaySpanEncoder, SpanEncoder},
    spanning::word_symbols,
    types::{Symbol, symbol_pair},
    vocab::{BpeVocab, VocabOptions},
};

/// Build a symbol buffer from string literals.
pub fn test_symbols(s: &[&str]) -> Vec<Symbol> {
    s.iter().map(|&s| s.into()).collect()
}

/// Build the common test vocabulary for [`SpanEncoder`] tests.
pub fn common_encoder_test_vocab() -> BpeVocab {
    BpeVocab::from_parts(
        VocabOptions::default(),
        ["</w>", "e", "g", "i", "l", "n", "o", "r", "s", "t", "w"].map(Symbol::from),
        vec![
            symbol_pair("l", "o"),
            symbol_pair("lo", "w"),
            symbol_pair("e", "r"),
            symbol_pair("er", "</w>"),
            symbol_pair("low", "</w>"),
            symbol_pair("s", "t"),
            symbol_pair("e", "st"),
        ],
    )
    .unwrap()
}

fn encode_word<E: SpanEncoder>(
    encoder: &E,
    vocab: &BpeVocab,
    word: &str,
) -> Vec<Symbol> {
    let mut symbols = word_symbols(word, &vocab.options().end_of_word);
    encoder.encode_span(vocab, &mut symbols);
    symbols
}

/// Common [`SpanEncoder`] tests.
pub fn common_encoder_tests<E: SpanEncoder>(encoder: &E) {
    static_is_send_sync_check(encoder);

    let vocab = common_encoder_test_vocab();

    let cases: &[(&str, &[&str])] = &[
        ("low", &["low</w>"]),
        ("lower", &["low", "er</w>"]),
        ("lowest", &["low", "est", "</w>"]),
        ("lowering", &["low", "er", "i", "n", "g", "</w>"]),
        ("slow", &["s", "low</w>"]),
        ("xyz", &["x", "y", "z", "</w>"]),
        ("o", &["o", "</w>"]),
    ];
    for &(word, expected) in cases {
        assert_eq!(encode_word(encoder, &vocab, word), expected, "word: {word}");
    }

    for word in ["rooster", "wellington", "lollollol", "eee", "trellis"] {
        assert_eq!(
            encode_word(encoder, &vocab, word),
            encode_word(&MergeReplaySpanEncoder, &vocab, word),
            "word: {word}"
        );
    }

    // An untrained vocabulary leaves characters untouched.
    let empty = BpeVocab::new(VocabOptions::default());
    assert_eq!(encode_word(encoder, &empty, "ab"), vec!["a", "b", "</w>"]);
}
