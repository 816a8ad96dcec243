//! Resolution error types.

use thiserror::Error;

/// Errors that can occur while resolving tunes against The Session.
#[derive(Debug, Error)]
pub enum ResolveError {
    /// No tune matched the name (or alias) at all.
    #[error("no tune found with name or alias {name:?}")]
    NotFound { name: String },

    /// The name matched, but no setting survived the type/key/id filters.
    #[error("no {name:?} tune found for type {tune_type:?} and key {key:?}")]
    NoMatch {
        name: String,
        tune_type: Option<String>,
        key: Option<String>,
    },

    /// More than one distinct tune matched and no hint picked one out.
    #[error("multiple tunes named {name:?}; candidate tune ids: {candidates:?}")]
    Ambiguous { name: String, candidates: Vec<u32> },

    /// The tune matched but carries no ABC transcription.
    #[error("no transcription available for {name:?}")]
    TranscriptionUnavailable { name: String },

    /// An error propagated from `reqwest`.
    #[error("request error: {0}")]
    Http(#[from] reqwest::Error),

    /// A response or dump file could not be deserialized.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// A malformed value in otherwise well-formed data.
    #[error("parse error in {context}: {message}")]
    Parse { context: String, message: String },

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// The tune data is neither cached locally nor downloadable. The one
    /// fatal error: resolution cannot proceed at all without the data.
    #[error("tune data unavailable: {reason}")]
    SourceUnavailable { reason: String },
}

impl ResolveError {
    /// Returns `true` when the error is transient and the operation may
    /// succeed if retried.
    pub fn is_transient(&self) -> bool {
        matches!(self, Self::Http(_))
    }

    /// Returns `true` when the error means the tune was not matched
    /// (as opposed to an infrastructure failure).
    pub fn is_not_found(&self) -> bool {
        matches!(self, Self::NotFound { .. } | Self::NoMatch { .. })
    }
}

/// Convenience alias for resolution results.
pub type ResolveResult<T> = std::result::Result<T, ResolveError>;
