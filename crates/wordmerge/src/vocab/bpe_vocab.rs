//! # Merge-Rule Vocabulary

use crate::errors::{WMResult, WordmergeError};
use crate::types::{Symbol, SymbolPair, TokenId, WMHashMap, WMHashSet, symbol_pair};
use crate::vocab::{MergeRule, VocabOptions};

/// The id of the unknown token.
pub const UNKNOWN_TOKEN_ID: TokenId = 0;

/// Validate a base alphabet and an ordered merge list.
///
/// - no alphabet symbol is empty;
/// - for every ``(a, b)`` at rank `r`:
///   - `a` and `b` are in the alphabet, or are results of merges ranked before `r`;
///   - the pair does not appear at an earlier rank.
///
/// ## Arguments
/// * `alphabet` - The base symbols.
/// * `merges` - The ordered merge pairs.
///
/// ## Returns
/// A `Result` indicating whether the parts are consistent.
pub fn try_validate_merges(
    alphabet: &[Symbol],
    merges: &[SymbolPair],
) -> WMResult<()> {
    if let Some(s) = alphabet.iter().find(|s| s.is_empty()) {
        return Err(WordmergeError::VocabConflict(format!(
            "alphabet contains an empty symbol: {s:?}"
        )));
    }

    let mut known: WMHashSet<Symbol> = alphabet.iter().cloned().collect();
    let mut seen: WMHashSet<&SymbolPair> = WMHashSet::with_capacity(merges.len());

    for (rank, pair) in merges.iter().enumerate() {
        for part in [&pair.0, &pair.1] {
            if !known.contains(part) {
                return Err(WordmergeError::VocabConflict(format!(
                    "merge {rank} {pair:?}: symbol {part:?} is not defined"
                )));
            }
        }
        if !seen.insert(pair) {
            return Err(WordmergeError::VocabConflict(format!(
                "merge {rank} {pair:?}: pair repeats an earlier merge"
            )));
        }
        known.insert(MergeRule::new(pair.0.clone(), pair.1.clone(), rank).merged);
    }

    Ok(())
}

/// A trained vocabulary: the base alphabet plus the ordered merge rules.
///
/// ## Token Ids
/// * `0` - the unknown token;
/// * then the alphabet, in sorted order;
/// * then each new merged symbol, in rank order.
///
/// A merge whose result already exists as a symbol reuses that symbol's id.
#[derive(Debug, Clone, PartialEq)]
pub struct BpeVocab {
    options: VocabOptions,

    alphabet: Vec<Symbol>,

    merges: Vec<MergeRule>,

    /// ``{ (left, right) -> rank }``.
    merge_ranks: WMHashMap<SymbolPair, usize>,

    /// ``id -> symbol``; index 0 is the unknown token.
    symbols: Vec<Symbol>,

    /// ``symbol -> id``; excludes the unknown token.
    symbol_ids: WMHashMap<Symbol, TokenId>,
}

impl Default for BpeVocab {
    fn default() -> Self {
        Self::new(VocabOptions::default())
    }
}

impl BpeVocab {
    /// Create an empty (untrained) vocabulary.
    pub fn new(options: VocabOptions) -> Self {
        Self {
            symbols: vec![options.unknown_token.clone()],
            options,
            alphabet: Vec::new(),
            merges: Vec::new(),
            merge_ranks: WMHashMap::default(),
            symbol_ids: WMHashMap::default(),
        }
    }

    /// Build a vocabulary from an alphabet and an ordered merge list.
    ///
    /// ## Arguments
    /// * `options` - The training-time preprocessing options.
    /// * `alphabet` - The base symbols; sorted and de-duplicated here.
    /// * `merges` - The ordered ``(left, right)`` merges.
    ///
    /// ## Returns
    /// A `Result` containing the vocabulary, or a
    /// [`WordmergeError::VocabConflict`] if the parts or the options are
    /// inconsistent.
    pub fn from_parts<A, M>(
        options: VocabOptions,
        alphabet: A,
        merges: M,
    ) -> WMResult<Self>
    where
        A: IntoIterator<Item = Symbol>,
        M: IntoIterator<Item = SymbolPair>,
    {
        options.try_validate()?;

        let mut alphabet: Vec<Symbol> = alphabet.into_iter().collect();
        alphabet.sort();
        alphabet.dedup();

        let merges: Vec<SymbolPair> = merges.into_iter().collect();
        try_validate_merges(&alphabet, &merges)?;

        let mut vocab = Self::new(options);
        for symbol in &alphabet {
            vocab.intern(symbol.clone());
        }
        vocab.alphabet = alphabet;

        vocab.merges.reserve(merges.len());
        vocab.merge_ranks.reserve(merges.len());
        for (rank, (left, right)) in merges.into_iter().enumerate() {
            let rule = MergeRule::new(left, right, rank);
            vocab.merge_ranks.insert(rule.pair(), rank);
            vocab.intern(rule.merged.clone());
            vocab.merges.push(rule);
        }

        Ok(vocab)
    }

    fn intern(
        &mut self,
        symbol: Symbol,
    ) {
        if !self.symbol_ids.contains_key(&symbol) {
            let id = self.symbols.len() as TokenId;
            self.symbols.push(symbol.clone());
            self.symbol_ids.insert(symbol, id);
        }
    }

    /// The training-time preprocessing options.
    pub fn options(&self) -> &VocabOptions {
        &self.options
    }

    /// Is this vocabulary untrained (no symbols at all)?
    pub fn is_empty(&self) -> bool {
        self.alphabet.is_empty() && self.merges.is_empty()
    }

    /// The base alphabet, sorted.
    pub fn alphabet(&self) -> &[Symbol] {
        &self.alphabet
    }

    /// The merge rules, in rank order.
    pub fn merges(&self) -> &[MergeRule] {
        &self.merges
    }

    /// The ordered ``(left, right)`` merge pairs.
    pub fn merge_pairs(&self) -> impl Iterator<Item = SymbolPair> + '_ {
        self.merges.iter().map(MergeRule::pair)
    }

    /// The symbol set, in id order; excludes the unknown token.
    pub fn symbols(&self) -> impl Iterator<Item = &Symbol> {
        self.symbols.iter().skip(1)
    }

    /// The number of distinct symbols; excludes the unknown token.
    pub fn num_symbols(&self) -> usize {
        self.symbols.len() - 1
    }

    /// The number of token ids, including the unknown token.
    pub fn num_tokens(&self) -> usize {
        self.symbols.len()
    }

    /// Is `symbol` in the symbol set?
    pub fn contains(
        &self,
        symbol: &str,
    ) -> bool {
        self.symbol_ids.contains_key(symbol)
    }

    /// Look up the id of a symbol.
    pub fn token_id(
        &self,
        symbol: &str,
    ) -> Option<TokenId> {
        self.symbol_ids.get(symbol).copied()
    }

    /// Look up the id of a symbol; unknown symbols map to [`UNKNOWN_TOKEN_ID`].
    pub fn token_id_or_unknown(
        &self,
        symbol: &str,
    ) -> TokenId {
        self.token_id(symbol).unwrap_or(UNKNOWN_TOKEN_ID)
    }

    /// Look up the symbol for an id; id 0 is the unknown token.
    pub fn symbol(
        &self,
        id: TokenId,
    ) -> Option<&Symbol> {
        self.symbols.get(id as usize)
    }

    /// Look up the rule for an adjacent pair.
    pub fn lookup_merge(
        &self,
        left: &str,
        right: &str,
    ) -> Option<&MergeRule> {
        self.merge_ranks
            .get(&symbol_pair(left, right))
            .map(|&rank| &self.merges[rank])
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn symbols(s: &[&str]) -> Vec<Symbol> {
        s.iter().map(|&s| s.into()).collect()
    }

    fn test_vocab() -> BpeVocab {
        BpeVocab::from_parts(
            VocabOptions::default(),
            symbols(&["w", "o", "l", "</w>", "o"]),
            vec![
                symbol_pair("l", "o"),
                symbol_pair("lo", "w"),
                symbol_pair("low", "</w>"),
            ],
        )
        .unwrap()
    }

    #[test]
    fn test_empty() {
        let vocab = BpeVocab::new(VocabOptions::default());
        assert!(vocab.is_empty());
        assert_eq!(vocab.num_symbols(), 0);
        assert_eq!(vocab.num_tokens(), 1);
        assert_eq!(vocab.symbol(UNKNOWN_TOKEN_ID).unwrap().as_str(), "<unk>");
        assert_eq!(vocab.token_id("<unk>"), None);
    }

    #[test]
    fn test_from_parts() {
        let vocab = test_vocab();
        assert!(!vocab.is_empty());

        assert_eq!(vocab.alphabet(), &["</w>", "l", "o", "w"]);
        assert_eq!(
            vocab.symbols().collect::<Vec<_>>(),
            vec!["</w>", "l", "o", "w", "lo", "low", "low</w>"]
        );
        assert_eq!(vocab.num_symbols(), 7);
        assert_eq!(vocab.num_tokens(), 8);

        assert_eq!(vocab.token_id("</w>"), Some(1));
        assert_eq!(vocab.token_id("low</w>"), Some(7));
        assert_eq!(vocab.token_id("x"), None);
        assert_eq!(vocab.token_id_or_unknown("x"), UNKNOWN_TOKEN_ID);
        assert_eq!(vocab.symbol(5).unwrap().as_str(), "lo");
        assert_eq!(vocab.symbol(8), None);

        assert!(vocab.contains("low"));
        assert!(!vocab.contains("ow"));

        let rule = vocab.lookup_merge("lo", "w").unwrap();
        assert_eq!(rule.rank, 1);
        assert_eq!(rule.merged.as_str(), "low");
        assert!(vocab.lookup_merge("o", "w").is_none());

        assert_eq!(
            vocab.merge_pairs().collect::<Vec<_>>(),
            vec![
                symbol_pair("l", "o"),
                symbol_pair("lo", "w"),
                symbol_pair("low", "</w>")
            ]
        );
    }

    #[test]
    fn test_shared_merge_result() {
        // ("ab", "c") and ("a", "bc") both produce "abc".
        let vocab = BpeVocab::from_parts(
            VocabOptions::default(),
            symbols(&["a", "b", "c"]),
            vec![
                symbol_pair("a", "b"),
                symbol_pair("b", "c"),
                symbol_pair("ab", "c"),
                symbol_pair("a", "bc"),
            ],
        )
        .unwrap();

        assert_eq!(vocab.merges().len(), 4);
        assert_eq!(vocab.num_symbols(), 6);
        assert_eq!(
            vocab.lookup_merge("a", "bc").unwrap().merged,
            vocab.lookup_merge("ab", "c").unwrap().merged
        );
    }

    #[test]
    fn test_validate_undefined_symbol() {
        let err = BpeVocab::from_parts(
            VocabOptions::default(),
            symbols(&["l", "o"]),
            vec![symbol_pair("lo", "w")],
        )
        .unwrap_err();
        assert!(matches!(err, WordmergeError::VocabConflict(_)));
        assert!(err.to_string().contains("is not defined"));

        // A merge result is not usable before its own rank.
        let err = BpeVocab::from_parts(
            VocabOptions::default(),
            symbols(&["l", "o", "w"]),
            vec![symbol_pair("lo", "w"), symbol_pair("l", "o")],
        )
        .unwrap_err();
        assert!(matches!(err, WordmergeError::VocabConflict(_)));
    }

    #[test]
    fn test_validate_repeated_pair() {
        let err = BpeVocab::from_parts(
            VocabOptions::default(),
            symbols(&["l", "o"]),
            vec![symbol_pair("l", "o"), symbol_pair("l", "o")],
        )
        .unwrap_err();
        assert!(err.to_string().contains("repeats"));
    }

    #[test]
    fn test_validate_empty_end_of_word() {
        let err = BpeVocab::from_parts(
            VocabOptions::default().with_end_of_word(""),
            symbols(&["l", "o"]),
            vec![symbol_pair("l", "o")],
        )
        .unwrap_err();
        assert!(matches!(err, WordmergeError::VocabConflict(_)));
    }

    #[test]
    fn test_validate_empty_symbol() {
        let err = try_validate_merges(&symbols(&["a", ""]), &[]).unwrap_err();
        assert!(matches!(err, WordmergeError::VocabConflict(_)));
    }
}
