//! Catch-all recovery for failed dispatches.

use crate::envelope::{Response, ResponseBuilder};
use crate::skill::error::SkillError;
use crate::skill::handler::{ErrorHandler, HandlerInput};

pub const APOLOGY_SPEECH: &str = "Sorry, I had trouble doing what you asked. Please try again.";

/// Accepts every error, logs it and apologizes with the session left open.
#[derive(Debug, Clone, Copy, Default)]
pub struct GenericErrorHandler;

impl ErrorHandler for GenericErrorHandler {
    fn can_handle(&self, _input: &HandlerInput<'_>, _error: &SkillError) -> bool {
        true
    }

    fn handle(&self, input: &HandlerInput<'_>, error: &SkillError) -> Response {
        tracing::error!(
            request_type = input.request_type(),
            intent = input.intent_name().unwrap_or("-"),
            error = %error,
            details = ?error,
            "Error handled"
        );

        ResponseBuilder::new()
            .speak(APOLOGY_SPEECH)
            .reprompt(APOLOGY_SPEECH)
            .get_response()
    }
}
