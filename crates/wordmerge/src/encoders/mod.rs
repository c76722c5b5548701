//! # Span Encoders
//!
//! A [`SpanEncoder`] applies a vocabulary's merge rules to a single word.
//!
//! * [`MergeReplaySpanEncoder`] - replays the whole rule list, in rank order.
//! * [`MergeScanSpanEncoder`] - repeatedly merges the best available pair.
//!
//! Both produce the same segmentation; [`EncoderKind`] selects between them.

mod merge_replay_encoder;
mod merge_scan_encoder;
mod span_encoder;

#[cfg(test)]
pub(crate) mod testing;

#[doc(inline)]
pub use merge_replay_encoder::MergeReplaySpanEncoder;
#[doc(inline)]
pub use merge_scan_encoder::MergeScanSpanEncoder;
#[doc(inline)]
pub use span_encoder::{EncoderKind, SpanEncoder};
