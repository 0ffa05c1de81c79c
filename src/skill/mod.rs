//! Skill pipeline.
//!
//! # Data Flow
//! ```text
//! RequestEnvelope
//!     → skill id check (rejects foreign envelopes)
//!     → request interceptors (observe)
//!     → dispatcher.rs (first matching handler)
//!     → Err? → error handlers (first that accepts)
//!     → response interceptors (observe)
//!     → ResponseEnvelope
//! ```
//!
//! # Design Decisions
//! - Handler order is caller-constructed and immutable after `build()`
//! - Handler failures are values (`SkillResult`), never panics
//! - A routing miss is treated like a handler failure
//! - Nothing is shared across invocations, so `Skill` is `Sync` without locks

pub mod dispatcher;
pub mod error;
pub mod error_handler;
pub mod handler;
pub mod handlers;
pub mod interceptors;
pub mod verification;

use crate::config::SkillConfig;
use crate::envelope::{RequestEnvelope, Response, ResponseEnvelope};

pub use dispatcher::Dispatcher;
pub use error::{SkillError, SkillResult};
pub use error_handler::GenericErrorHandler;
pub use handler::{ErrorHandler, HandlerInput, RequestHandler, RequestInterceptor, ResponseInterceptor};
pub use handlers::TaxiHandler;
pub use interceptors::{LogRequestInterceptor, LogResponseInterceptor};

/// User agent stamped on every response envelope.
pub const USER_AGENT: &str = concat!(env!("CARGO_PKG_NAME"), "/", env!("CARGO_PKG_VERSION"));

/// Result of a single invocation.
#[derive(Debug, Clone)]
pub struct Invocation {
    pub envelope: ResponseEnvelope,
    /// Set when an error handler produced the response.
    pub recovered: bool,
}

/// An assembled skill: handlers, error handlers and interceptors.
pub struct Skill<H = TaxiHandler> {
    skill_id: Option<String>,
    dispatcher: Dispatcher<H>,
    error_handlers: Vec<Box<dyn ErrorHandler>>,
    request_interceptors: Vec<Box<dyn RequestInterceptor>>,
    response_interceptors: Vec<Box<dyn ResponseInterceptor>>,
}

impl Skill<TaxiHandler> {
    /// The Seattle taxi skill, wired the way it is deployed.
    pub fn taxi(config: &SkillConfig) -> Self {
        let mut builder = SkillBuilder::new(TaxiHandler::default_chain(&config.verification))
            .add_request_interceptor(LogRequestInterceptor)
            .add_response_interceptor(LogResponseInterceptor)
            .add_error_handler(GenericErrorHandler);

        if let Some(skill_id) = &config.skill.skill_id {
            builder = builder.with_skill_id(skill_id.clone());
        }

        builder.build()
    }
}

impl<H: RequestHandler> Skill<H> {
    pub fn builder(handlers: Vec<H>) -> SkillBuilder<H> {
        SkillBuilder::new(handlers)
    }

    /// Turn a request envelope into a response envelope.
    pub fn invoke(&self, envelope: &RequestEnvelope) -> SkillResult<ResponseEnvelope> {
        self.process(envelope).map(|invocation| invocation.envelope)
    }

    /// Like [`Skill::invoke`], also reporting whether an error handler ran.
    pub fn process(&self, envelope: &RequestEnvelope) -> SkillResult<Invocation> {
        self.verify_skill_id(envelope)?;

        let input = HandlerInput::new(envelope);

        for interceptor in &self.request_interceptors {
            interceptor.process(&input);
        }

        let (response, recovered) = match self.dispatcher.dispatch(&input) {
            Ok(response) => (response, false),
            Err(error) => (self.recover(&input, error)?, true),
        };

        for interceptor in &self.response_interceptors {
            interceptor.process(&input, &response);
        }

        Ok(Invocation {
            envelope: ResponseEnvelope::new(response, USER_AGENT),
            recovered,
        })
    }

    pub fn dispatcher(&self) -> &Dispatcher<H> {
        &self.dispatcher
    }

    fn recover(&self, input: &HandlerInput<'_>, error: SkillError) -> SkillResult<Response> {
        match self
            .error_handlers
            .iter()
            .find(|handler| handler.can_handle(input, &error))
        {
            Some(handler) => Ok(handler.handle(input, &error)),
            None => Err(SkillError::Unhandled(Box::new(error))),
        }
    }

    fn verify_skill_id(&self, envelope: &RequestEnvelope) -> SkillResult<()> {
        let Some(expected) = &self.skill_id else {
            return Ok(());
        };

        let actual = envelope.application_id();
        if actual == Some(expected.as_str()) {
            return Ok(());
        }

        Err(SkillError::SkillIdMismatch {
            expected: expected.clone(),
            actual: actual.map(str::to_string),
        })
    }
}

/// Collects the pieces of a [`Skill`]. Registration order is dispatch order.
pub struct SkillBuilder<H> {
    skill_id: Option<String>,
    request_handlers: Vec<H>,
    error_handlers: Vec<Box<dyn ErrorHandler>>,
    request_interceptors: Vec<Box<dyn RequestInterceptor>>,
    response_interceptors: Vec<Box<dyn ResponseInterceptor>>,
}

impl<H: RequestHandler> SkillBuilder<H> {
    pub fn new(request_handlers: Vec<H>) -> Self {
        Self {
            skill_id: None,
            request_handlers,
            error_handlers: Vec::new(),
            request_interceptors: Vec::new(),
            response_interceptors: Vec::new(),
        }
    }

    /// Reject envelopes addressed to any other application id.
    pub fn with_skill_id(mut self, skill_id: impl Into<String>) -> Self {
        self.skill_id = Some(skill_id.into());
        self
    }

    pub fn add_error_handler(mut self, handler: impl ErrorHandler + 'static) -> Self {
        self.error_handlers.push(Box::new(handler));
        self
    }

    pub fn add_request_interceptor(mut self, interceptor: impl RequestInterceptor + 'static) -> Self {
        self.request_interceptors.push(Box::new(interceptor));
        self
    }

    pub fn add_response_interceptor(mut self, interceptor: impl ResponseInterceptor + 'static) -> Self {
        self.response_interceptors.push(Box::new(interceptor));
        self
    }

    pub fn build(self) -> Skill<H> {
        Skill {
            skill_id: self.skill_id,
            dispatcher: Dispatcher::new(self.request_handlers),
            error_handlers: self.error_handlers,
            request_interceptors: self.request_interceptors,
            response_interceptors: self.response_interceptors,
        }
    }
}
