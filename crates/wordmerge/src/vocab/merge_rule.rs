//! # Merge Rules

use crate::types::{Symbol, SymbolPair};

/// A learned ``(left, right) -> merged`` rule.
///
/// `rank` is the order in which the rule was learned;
/// tokenization applies rules in ascending rank.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct MergeRule {
    /// The left symbol.
    pub left: Symbol,

    /// The right symbol.
    pub right: Symbol,

    /// ``left ++ right``.
    pub merged: Symbol,

    /// The position of this rule in the learned sequence.
    pub rank: usize,
}

impl MergeRule {
    /// Create a rule; `merged` is the concatenation of `left` and `right`.
    pub fn new(
        left: Symbol,
        right: Symbol,
        rank: usize,
    ) -> Self {
        let mut merged = left.clone();
        merged.push_str(&right);
        Self {
            left,
            right,
            merged,
            rank,
        }
    }

    /// The ``(left, right)`` pair.
    pub fn pair(&self) -> SymbolPair {
        (self.left.clone(), self.right.clone())
    }

    /// Does `(left, right)` match this rule?
    pub fn matches(
        &self,
        left: &str,
        right: &str,
    ) -> bool {
        self.left == left && self.right == right
    }
}
