//! Error types for mongo2sql.

use thiserror::Error;

/// The main error type for query translation.
#[derive(Debug, Error)]
pub enum QueryError {
    /// The query does not have the form `db.<table>.find(...)`.
    #[error("Unable to parse the table name. Expected: db.<table>.find(...)")]
    TableNameNotFound,

    /// A `key:value` pair or bracketed group is malformed.
    #[error("Parse error at '{fragment}': {message}")]
    Parse { fragment: String, message: String },

    /// A `$`-prefixed key that has no SQL translation.
    #[error("Unsupported operator: '{0}'. Expected: $or, $and, $lt, $lte, $gt, $gte, $ne or $in")]
    UnsupportedOperator(String),

    /// More than a filter and a projection were passed to `find`.
    #[error("Expected 0-2 argument groups, got {0}")]
    TooManyArgumentGroups(usize),

    /// Configuration error.
    #[error("Configuration error: {0}")]
    Config(String),

    /// IO error.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

impl QueryError {
    /// Create a parse error for the given fragment of query text.
    pub fn parse(fragment: impl Into<String>, message: impl Into<String>) -> Self {
        Self::Parse {
            fragment: fragment.into(),
            message: message.into(),
        }
    }
}

/// Result type alias for translation operations.
pub type QueryResult<T> = Result<T, QueryError>;
