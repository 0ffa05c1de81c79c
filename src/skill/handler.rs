//! Handler and interceptor contracts.
//!
//! # Design Decisions
//! - Handlers return `SkillResult` rather than panicking; the pipeline routes
//!   `Err` to the error handlers
//! - Error handlers are infallible: they always produce a response
//! - Interceptors observe only and cannot alter or veto the pipeline

use crate::envelope::{Request, RequestEnvelope, Response};
use crate::skill::error::{SkillError, SkillResult};

/// Read-only view of the invocation passed to every handler.
#[derive(Debug, Clone, Copy)]
pub struct HandlerInput<'a> {
    pub envelope: &'a RequestEnvelope,
}

impl<'a> HandlerInput<'a> {
    pub fn new(envelope: &'a RequestEnvelope) -> Self {
        Self { envelope }
    }

    pub fn request(&self) -> &'a Request {
        &self.envelope.request
    }

    pub fn request_type(&self) -> &'static str {
        self.envelope.request.request_type()
    }

    pub fn intent_name(&self) -> Option<&'a str> {
        self.envelope.request.intent_name()
    }
}

/// A predicate/action pair over the incoming request.
pub trait RequestHandler: Send + Sync {
    /// Short name used in logs and metrics.
    fn name(&self) -> &'static str;

    fn can_handle(&self, input: &HandlerInput<'_>) -> bool;

    fn handle(&self, input: &HandlerInput<'_>) -> SkillResult<Response>;
}

/// Recovers from a failed dispatch.
pub trait ErrorHandler: Send + Sync {
    fn can_handle(&self, input: &HandlerInput<'_>, error: &SkillError) -> bool;

    fn handle(&self, input: &HandlerInput<'_>, error: &SkillError) -> Response;
}

/// Observes the request before dispatch.
pub trait RequestInterceptor: Send + Sync {
    fn process(&self, input: &HandlerInput<'_>);
}

/// Observes the final response before it is returned.
pub trait ResponseInterceptor: Send + Sync {
    fn process(&self, input: &HandlerInput<'_>, response: &Response);
}
