//! Fetch error taxonomy.
//!
//! Structured kinds rather than a bare string: callers map "the record does
//! not exist" and "the upstream misbehaved" to different outcomes, and the
//! collaborator index build treats the two differently per candidate.

use std::fmt;

/// Failure while fetching from the upstream catalogue.
#[derive(Debug)]
pub enum FetchError {
    /// The requested record does not exist upstream (HTTP 404).
    NotFound {
        /// Record kind, e.g. "owner" or "assembly".
        kind: &'static str,
        id: String,
    },

    /// The upstream failed or returned a body we could not decode.
    Upstream {
        /// What we were doing, e.g. "GET /api/sets".
        context: String,
        detail: String,
    },
}

impl FetchError {
    pub fn upstream(context: impl Into<String>, detail: impl fmt::Display) -> Self {
        Self::Upstream {
            context: context.into(),
            detail: detail.to_string(),
        }
    }

    pub fn is_not_found(&self) -> bool {
        matches!(self, Self::NotFound { .. })
    }
}

impl fmt::Display for FetchError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::NotFound { kind, id } => write!(f, "{kind} '{id}' not found upstream"),
            Self::Upstream { context, detail } => {
                write!(f, "upstream catalogue failure during {context}: {detail}")
            }
        }
    }
}

impl std::error::Error for FetchError {}
