//! Error taxonomy for session and catalog operations.
//!
//! Every [`CoreError`] maps to a stable machine-readable [`code`](CoreError::code)
//! so the tool layer can hand callers a structured error instead of a bare string.

use serde_json::{json, Value};
use thiserror::Error;

/// Result alias for core operations.
pub type CoreResult<T> = std::result::Result<T, CoreError>;

#[derive(Debug, Error, Clone, PartialEq)]
pub enum CoreError {
    /// Strict lookup of a session that was never created.
    #[error("session {0} not found")]
    SessionNotFound(String),

    /// The session already holds its configured number of thoughts.
    #[error("thought limit reached for session {session_id} (limit: {limit})")]
    ThoughtLimitExceeded { session_id: String, limit: usize },

    /// The requested mental model is not in the catalog. `available` holds catalog keys.
    #[error("mental model '{name}' not found")]
    ModelNotFound { name: String, available: Vec<String> },

    /// Malformed or out-of-range payload.
    #[error("invalid input: {0}")]
    InvalidInput(String),

    /// A caller-supplied record id is already present in the store.
    #[error("record id {0} already exists")]
    DuplicateId(String),

    #[error("{0} lock poisoned")]
    LockPoisoned(&'static str),
}

impl CoreError {
    /// Stable error code surfaced to callers.
    pub fn code(&self) -> &'static str {
        match self {
            Self::SessionNotFound(_) => "SESSION_NOT_FOUND",
            Self::ThoughtLimitExceeded { .. } => "THOUGHT_LIMIT_EXCEEDED",
            Self::ModelNotFound { .. } => "MODEL_NOT_FOUND",
            Self::InvalidInput(_) | Self::DuplicateId(_) => "INVALID_INPUT",
            Self::LockPoisoned(_) => "INTERNAL",
        }
    }

    /// Remediation context, if any.
    pub fn details(&self) -> Option<Value> {
        match self {
            Self::ThoughtLimitExceeded { limit, .. } => Some(json!({ "limit": limit })),
            Self::ModelNotFound { available, .. } => {
                Some(json!({ "available_models": available }))
            }
            _ => None,
        }
    }

    /// The `{isError, code, message, details}` payload returned at the operation boundary.
    pub fn to_payload(&self) -> Value {
        let mut payload = json!({
            "isError": true,
            "code": self.code(),
            "message": self.to_string(),
        });
        if let Some(details) = self.details() {
            payload["details"] = details;
        }
        payload
    }
}
