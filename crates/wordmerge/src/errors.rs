//! # Error Types

/// Reasons an input was rejected.
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
pub enum InvalidInput {
    /// The corpus has no words after splitting.
    #[error("corpus is empty after word splitting")]
    EmptyCorpus,

    /// The merge budget was negative.
    #[error("merge count must be non-negative, got {0}")]
    NegativeMergeCount(i64),

    /// Tokenization was requested against a vocabulary with no symbols.
    #[error("vocabulary is empty; train before tokenizing")]
    UntrainedVocab,
}

/// Errors from wordmerge operations.
#[derive(Debug, thiserror::Error)]
pub enum WordmergeError {
    /// The caller supplied invalid input.
    #[error("invalid input: {0}")]
    InvalidInput(#[from] InvalidInput),

    /// Vocabulary data is inconsistent.
    #[error("{0}")]
    VocabConflict(String),

    /// A token id has no symbol in the vocabulary.
    #[error("unknown token id: {0}")]
    UnknownTokenId(u32),

    /// I/O error.
    #[error(transparent)]
    Io(#[from] std::io::Error),

    /// Vocabulary (de)serialization error.
    #[error("serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

/// Result type for wordmerge operations.
pub type WMResult<T> = core::result::Result<T, WordmergeError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_invalid_input_display() {
        let err: WordmergeError = InvalidInput::NegativeMergeCount(-3).into();
        assert_eq!(
            err.to_string(),
            "invalid input: merge count must be non-negative, got -3"
        );

        let err: WordmergeError = InvalidInput::EmptyCorpus.into();
        assert!(matches!(
            err,
            WordmergeError::InvalidInput(InvalidInput::EmptyCorpus)
        ));
    }
}
