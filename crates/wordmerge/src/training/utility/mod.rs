//! # Trainer Implementation Utilities

mod pair_span_index;
mod symbol_span_buffer;
mod word_counter;

#[doc(inline)]
pub use pair_span_index::{PairCountMap, PairIndexMap, PairSpanIndex};
#[doc(inline)]
pub use symbol_span_buffer::SymbolSpanBuf;
#[doc(inline)]
pub use word_counter::WordCounter;
