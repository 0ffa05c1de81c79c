//! The taxi skill's request handlers.
//!
//! Each variant is one row of the routing table: a predicate over the
//! request kind (and intent name) plus the response it produces.

use crate::envelope::{Request, Response, ResponseBuilder};
use crate::skill::error::{SkillError, SkillResult};
use crate::skill::handler::{HandlerInput, RequestHandler};
use crate::skill::verification::{VerificationConfig, VerificationOutcome};

pub const ORDER_INTENT: &str = "SpaceNeedleOrderIntent";
pub const HELP_INTENT: &str = "AMAZON.HelpIntent";
pub const CANCEL_INTENT: &str = "AMAZON.CancelIntent";
pub const STOP_INTENT: &str = "AMAZON.StopIntent";

pub const WELCOME_SPEECH: &str =
    "Welcome, to Seattle taxi skill. Please say ride to space needle to book cab.";
pub const ORDER_SPEECH: &str =
    "A ride to the Space Needle will cost five dollars and take ten minutes.";
pub const HELP_SPEECH: &str = "You can say help if you need help! How can I help?";
pub const GOODBYE_SPEECH: &str = "Goodbye!";

#[derive(Debug, Clone)]
pub enum TaxiHandler {
    Launch,
    /// Quotes the ride and starts identity verification.
    Order(VerificationConfig),
    /// Speaks the verification outcome.
    SessionResumed(VerificationConfig),
    Help,
    CancelOrStop,
    SessionEnded,
    /// Echoes any intent name. Matches every IntentRequest, so it goes last.
    IntentReflector,
}

impl TaxiHandler {
    /// The full handler table in priority order.
    pub fn default_chain(verification: &VerificationConfig) -> Vec<TaxiHandler> {
        vec![
            TaxiHandler::Launch,
            TaxiHandler::Order(verification.clone()),
            TaxiHandler::SessionResumed(verification.clone()),
            TaxiHandler::Help,
            TaxiHandler::CancelOrStop,
            TaxiHandler::SessionEnded,
            TaxiHandler::IntentReflector,
        ]
    }
}

impl RequestHandler for TaxiHandler {
    fn name(&self) -> &'static str {
        match self {
            TaxiHandler::Launch => "launch",
            TaxiHandler::Order(_) => "order",
            TaxiHandler::SessionResumed(_) => "session_resumed",
            TaxiHandler::Help => "help",
            TaxiHandler::CancelOrStop => "cancel_or_stop",
            TaxiHandler::SessionEnded => "session_ended",
            TaxiHandler::IntentReflector => "intent_reflector",
        }
    }

    fn can_handle(&self, input: &HandlerInput<'_>) -> bool {
        let request = input.request();
        match self {
            TaxiHandler::Launch => matches!(request, Request::LaunchRequest(_)),
            TaxiHandler::Order(_) => input.intent_name() == Some(ORDER_INTENT),
            TaxiHandler::SessionResumed(_) => matches!(request, Request::SessionResumedRequest(_)),
            TaxiHandler::Help => input.intent_name() == Some(HELP_INTENT),
            TaxiHandler::CancelOrStop => {
                matches!(input.intent_name(), Some(CANCEL_INTENT) | Some(STOP_INTENT))
            }
            TaxiHandler::SessionEnded => matches!(request, Request::SessionEndedRequest(_)),
            TaxiHandler::IntentReflector => matches!(request, Request::IntentRequest(_)),
        }
    }

    fn handle(&self, input: &HandlerInput<'_>) -> SkillResult<Response> {
        let response = match self {
            TaxiHandler::Launch => ResponseBuilder::new()
                .speak(WELCOME_SPEECH)
                .reprompt(WELCOME_SPEECH)
                .get_response(),
            TaxiHandler::Order(verification) => {
                tracing::info!(
                    policy = %verification.policy_name,
                    level = verification.confidence_level,
                    "Ride ordered, requesting identity verification"
                );
                ResponseBuilder::new()
                    .speak(ORDER_SPEECH)
                    .add_directive(verification.start_connection())
                    .get_response()
            }
            TaxiHandler::SessionResumed(verification) => {
                let Request::SessionResumedRequest(resumed) = input.request() else {
                    return Err(SkillError::Handler {
                        handler: self.name(),
                        reason: format!("unexpected request type {}", input.request_type()),
                    });
                };
                let cause = resumed
                    .cause
                    .as_ref()
                    .ok_or(SkillError::MissingField("request.cause"))?;
                let outcome =
                    VerificationOutcome::evaluate(cause, input.envelope.person(), verification)?;
                tracing::info!(outcome = ?outcome, "Session resumed after verification");
                ResponseBuilder::new().speak(&outcome.speech()).get_response()
            }
            TaxiHandler::Help => ResponseBuilder::new()
                .speak(HELP_SPEECH)
                .reprompt(HELP_SPEECH)
                .get_response(),
            TaxiHandler::CancelOrStop => ResponseBuilder::new()
                .speak(GOODBYE_SPEECH)
                .with_should_end_session(true)
                .get_response(),
            TaxiHandler::SessionEnded => {
                if let Request::SessionEndedRequest(ended) = input.request() {
                    tracing::debug!(reason = ?ended.reason, error = ?ended.error, "Session ended");
                }
                ResponseBuilder::new().get_response()
            }
            TaxiHandler::IntentReflector => {
                let intent = input.intent_name().unwrap_or_default();
                ResponseBuilder::new()
                    .speak(&format!("You just triggered {}", intent))
                    .get_response()
            }
        };

        Ok(response)
    }
}
