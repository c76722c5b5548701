//! # Common Types
use compact_str::CompactString;

/// A symbol: a single character, the end-of-word marker, or a merged unit.
///
/// Symbols are compared by string value.
pub type Symbol = CompactString;

/// An ordered pair of adjacent symbols.
pub type SymbolPair = (Symbol, Symbol);

/// A token id assigned to a vocabulary symbol.
pub type TokenId = u32;

cfg_if::cfg_if! {
    if #[cfg(feature = "ahash")] {
        /// Type Alias for hash maps in this crate.
        pub type WMHashMap<K, V> = ahash::AHashMap<K, V>;

        /// Type Alias for hash sets in this crate.
        pub type WMHashSet<V> = ahash::AHashSet<V>;
    } else {
        /// Type Alias for hash maps in this crate.
        pub type WMHashMap<K, V> = std::collections::HashMap<K, V>;

        /// Type Alias for hash sets in this crate.
        pub type WMHashSet<V> = std::collections::HashSet<V>;
    }
}

/// Build a [`SymbolPair`] from anything string-like.
pub fn symbol_pair<A, B>(
    left: A,
    right: B,
) -> SymbolPair
where
    A: AsRef<str>,
    B: AsRef<str>,
{
    (left.as_ref().into(), right.as_ref().into())
}
