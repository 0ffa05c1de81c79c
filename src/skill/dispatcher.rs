//! First-match request routing.
//!
//! # Responsibilities
//! - Hold the ordered handler list
//! - Select the first handler whose predicate matches
//! - Report a routing miss as an explicit error
//!
//! # Design Decisions
//! - Handler order is fixed at construction (no runtime registration)
//! - Priority order, not best match: a catch-all must come last
//! - Generic over the handler type so the built-in table dispatches statically

use crate::envelope::Response;
use crate::skill::error::{SkillError, SkillResult};
use crate::skill::handler::{HandlerInput, RequestHandler};

/// Routes a request to exactly one handler.
#[derive(Debug, Clone)]
pub struct Dispatcher<H> {
    handlers: Vec<H>,
}

impl<H: RequestHandler> Dispatcher<H> {
    /// Create a dispatcher over handlers in priority order.
    pub fn new(handlers: Vec<H>) -> Self {
        Self { handlers }
    }

    /// The first handler that accepts the input.
    pub fn select(&self, input: &HandlerInput<'_>) -> Option<&H> {
        self.handlers.iter().find(|h| h.can_handle(input))
    }

    /// Invoke the selected handler.
    pub fn dispatch(&self, input: &HandlerInput<'_>) -> SkillResult<Response> {
        let handler = self.select(input).ok_or_else(|| SkillError::NoHandler {
            request_type: input.request_type().to_string(),
        })?;

        tracing::debug!(
            handler = handler.name(),
            request_type = input.request_type(),
            intent = input.intent_name().unwrap_or("-"),
            "Dispatching request"
        );

        handler.handle(input)
    }

    pub fn handlers(&self) -> &[H] {
        &self.handlers
    }
}
