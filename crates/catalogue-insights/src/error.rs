//! Insight error taxonomy.
//!
//! Distinct kinds so a serving layer can map each to an appropriate
//! response: validation failures are rejected before any fetch, missing
//! records surface as not-found, and upstream failures propagate without
//! retry (retry policy belongs to whoever owns the fetch boundary).

use std::fmt;

use catalogue_transport::FetchError;

/// Failure of one insight operation.
#[derive(Debug)]
pub enum InsightError {
    /// Blank identifier or out-of-range parameter; nothing was fetched.
    InvalidArgument(String),

    /// The requested owner or assembly does not exist upstream.
    NotFound { kind: &'static str, id: String },

    /// The upstream catalogue failed or returned malformed data.
    Upstream { context: String, detail: String },

    /// No other owners exist to compare against.
    EmptyCandidatePool,
}

impl fmt::Display for InsightError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::InvalidArgument(message) => write!(f, "invalid argument: {message}"),
            Self::NotFound { kind, id } => write!(f, "{kind} '{id}' not found"),
            Self::Upstream { context, detail } => {
                write!(f, "upstream failure during {context}: {detail}")
            }
            Self::EmptyCandidatePool => {
                write!(f, "no comparable owners exist for this query")
            }
        }
    }
}

impl std::error::Error for InsightError {}

impl From<FetchError> for InsightError {
    fn from(err: FetchError) -> Self {
        match err {
            FetchError::NotFound { kind, id } => Self::NotFound { kind, id },
            FetchError::Upstream { context, detail } => Self::Upstream { context, detail },
        }
    }
}
