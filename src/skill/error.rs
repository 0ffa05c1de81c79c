//! Skill pipeline error definitions.

use thiserror::Error;

/// Errors raised while turning a request envelope into a response.
#[derive(Debug, Error)]
pub enum SkillError {
    /// No registered handler accepted the request.
    #[error("Unable to find a suitable request handler for {request_type}")]
    NoHandler { request_type: String },

    /// The request lacked a field the handler needs.
    #[error("Missing field in request envelope: {0}")]
    MissingField(&'static str),

    /// A handler failed while producing its response.
    #[error("Handler {handler} failed: {reason}")]
    Handler { handler: &'static str, reason: String },

    /// The envelope was addressed to another skill.
    #[error("Skill id mismatch: expected {expected}, got {actual:?}")]
    SkillIdMismatch {
        expected: String,
        actual: Option<String>,
    },

    /// No error handler accepted a failure.
    #[error("Unhandled skill error: {0}")]
    Unhandled(Box<SkillError>),
}

/// Result type for skill operations.
pub type SkillResult<T> = Result<T, SkillError>;
