//! Error types for gregex
//!
//! All fallible operations return `Result<T, Error>`.
//! Every variant carries the offending text so a failure can be diagnosed
//! without re-running the analysis.

use thiserror::Error;

/// gregex error types
#[derive(Debug, Error)]
pub enum Error {
    /// No token category matches the end of the untokenized remainder
    #[error("cannot tokenize '{remainder}' (already tokenized: '{consumed}')")]
    Tokenization { consumed: String, remainder: String },

    /// The expression handed to the analyzer already contains an operator
    #[error("uncertainty operator '{operator}' already present in '{expression}'")]
    DuplicateOperator {
        operator: String,
        expression: String,
    },

    /// More than one operator occurrence in a substitution check
    #[error("{count} uncertainty operators present in '{expression}', at most one is allowed")]
    AmbiguousOperator { count: usize, expression: String },

    /// A close-terminated suffix has no well-formed rightmost branch
    #[error("no well-formed rightmost branch in '{tokens}'")]
    MalformedBranch { tokens: String },

    /// A (sub)expression has no trailing unit to serve as its stem
    #[error("no stem (trailing unit) in '{tokens}'")]
    EmptyStem { tokens: String },

    /// Operator name or symbol not recognised
    #[error("unknown uncertainty operator '{0}', expected '...', '_' or '|'")]
    UnknownOperator(String),

    /// Vocabulary contains a code the tokenizer cannot use
    #[error("invalid vocabulary: {0}")]
    InvalidVocabulary(String),

    /// Vocabulary file could not be read
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Vocabulary file is not valid JSON
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

/// Result type alias for gregex operations
pub type Result<T> = std::result::Result<T, Error>;
