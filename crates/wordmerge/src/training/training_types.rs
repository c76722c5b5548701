//! # Training Types
//!
//! Bounds on the word keys and frequencies a [`super::BpeTrainer`] counts with.
use core::{
    fmt::{Debug, Display},
    hash::Hash,
    ops::{AddAssign, SubAssign},
};

use num_traits::{FromPrimitive, PrimInt, ToPrimitive, Unsigned};

/// A distinct-word key; built from a word's (case folded) text.
pub trait WordKeyType:
    for<'a> From<&'a str> + AsRef<str> + Debug + Clone + Send + Sync + Eq + Hash + Ord
{
}

impl<K> WordKeyType for K where
    K: for<'a> From<&'a str> + AsRef<str> + Debug + Clone + Send + Sync + Eq + Hash + Ord
{
}

/// A word or pair frequency.
///
/// Frequencies are unsigned; a pair count never drops below zero
/// because every decrement is matched by an earlier increment.
pub trait WordCountType:
    'static
    + PrimInt
    + Unsigned
    + FromPrimitive
    + ToPrimitive
    + Hash
    + Default
    + Debug
    + Display
    + Send
    + Sync
    + AddAssign
    + SubAssign
{
    /// Sum `counts`, clamping at `Self::max_value()`.
    fn saturating_total<'a, I>(counts: I) -> Self
    where
        I: IntoIterator<Item = &'a Self>,
    {
        counts
            .into_iter()
            .fold(Self::zero(), |acc, &c| acc.saturating_add(c))
    }

    /// Widen to `u64`, clamping at `u64::MAX`.
    fn saturating_u64(self) -> u64 {
        self.to_u64().unwrap_or(u64::MAX)
    }
}

impl<C> WordCountType for C where
    C: 'static
        + PrimInt
        + Unsigned
        + FromPrimitive
        + ToPrimitive
        + Hash
        + Default
        + Debug
        + Display
        + Send
        + Sync
        + AddAssign
        + SubAssign
{
}
