//! Identity verification over a platform connection.
//!
//! # Data Flow
//! ```text
//! Order intent
//!     → start_connection() emits Connections.StartConnection
//!     → platform runs the verification sub-dialog
//!     → SessionResumedRequest { cause }
//!     → VerificationOutcome::evaluate(cause, person)
//!     → spoken result
//! ```
//!
//! # Design Decisions
//! - All state needed to decide lives in the resumed request
//! - A non-200 connection never looks at the task result
//! - Token checking is opt-in (`enforce_token`)

use crate::envelope::request::{Cause, Person};
use crate::envelope::response::{
    ConfidenceLevel, CustomPolicy, Directive, StartConnection, VerifyPersonInput,
};
use crate::skill::error::{SkillError, SkillResult};

// Re-export from the config module so callers need a single import.
pub use crate::config::schema::VerificationConfig;

/// Task status reported when the person passed verification.
pub const STATUS_ACHIEVED: &str = "ACHIEVED";
/// Task status reported when the account has verification turned off.
pub const STATUS_NOT_ENABLED: &str = "NOT_ENABLED";

pub const TRANSPORT_FAILURE_SPEECH: &str =
    "Sorry, something went wrong while verifying your identity.";
pub const COMPLETED_SPEECH: &str = "Your request was completed.";
pub const VERIFICATION_FAILED_SPEECH: &str =
    "Sorry, verification failed. Your request was not completed.";
pub const DRIVER_ETA_SPEECH: &str =
    ", you were verified and your driver will be arrived in 8 minutes.";

impl VerificationConfig {
    /// Directive asking the platform to run the verification connection.
    pub fn start_connection(&self) -> Directive {
        Directive::StartConnection(StartConnection {
            uri: self.uri.clone(),
            input: VerifyPersonInput {
                requested_authentication_confidence_level: ConfidenceLevel {
                    level: self.confidence_level,
                    custom_policy: CustomPolicy {
                        policy_name: self.policy_name.clone(),
                    },
                },
            },
            token: self.token.clone(),
        })
    }

    /// Whether the resumed cause belongs to the connection we started.
    /// Always true unless `enforce_token` is set.
    pub fn accepts_token(&self, cause: &Cause) -> bool {
        !self.enforce_token || cause.token.as_deref() == Some(self.token.as_str())
    }
}

/// The four ways a verification connection can end.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum VerificationOutcome {
    /// Connection itself failed (non-200, or a foreign token).
    TransportFailed,
    /// Person verified.
    Verified { person_id: String },
    /// Verification not set up for this account; the request goes through.
    NotEnabled,
    /// Denied, timed out, or any other task status.
    Failed { status: String },
}

impl VerificationOutcome {
    /// Decide the outcome from the resumed cause.
    pub fn evaluate(
        cause: &Cause,
        person: Option<&Person>,
        config: &VerificationConfig,
    ) -> SkillResult<Self> {
        let status = cause
            .status
            .as_ref()
            .ok_or(SkillError::MissingField("request.cause.status"))?;

        if !config.accepts_token(cause) {
            tracing::warn!(
                expected = %config.token,
                received = ?cause.token,
                "Connection token mismatch"
            );
            return Ok(VerificationOutcome::TransportFailed);
        }

        if !status.is_ok() {
            tracing::info!(code = ?status.code, message = ?status.message, "Verification connection failed");
            return Ok(VerificationOutcome::TransportFailed);
        }

        let result = cause
            .result
            .as_ref()
            .ok_or(SkillError::MissingField("request.cause.result"))?;

        let outcome = match result.status.as_str() {
            STATUS_ACHIEVED => {
                let person = person.ok_or(SkillError::MissingField("context.System.person"))?;
                let person_id = person
                    .person_id
                    .clone()
                    .ok_or(SkillError::MissingField("context.System.person.personId"))?;
                VerificationOutcome::Verified { person_id }
            }
            STATUS_NOT_ENABLED => VerificationOutcome::NotEnabled,
            other => VerificationOutcome::Failed {
                status: other.to_string(),
            },
        };

        Ok(outcome)
    }

    pub fn speech(&self) -> String {
        match self {
            VerificationOutcome::TransportFailed => TRANSPORT_FAILURE_SPEECH.to_string(),
            VerificationOutcome::Verified { person_id } => {
                format!("{}{}", name_markup(person_id), DRIVER_ETA_SPEECH)
            }
            VerificationOutcome::NotEnabled => COMPLETED_SPEECH.to_string(),
            VerificationOutcome::Failed { .. } => VERIFICATION_FAILED_SPEECH.to_string(),
        }
    }
}

/// Inline markup the platform renders as the person's first name.
pub fn name_markup(person_id: &str) -> String {
    format!("<alexa:name type='first' personId='{}'/>", person_id)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::envelope::request::{ConnectionStatus, TaskResult};

    fn person(id: &str) -> Person {
        Person {
            person_id: Some(id.to_string()),
            access_token: None,
        }
    }

    #[test]
    fn test_default_directive() {
        let config = VerificationConfig::default();
        let Directive::StartConnection(start) = config.start_connection();
        assert_eq!(start.uri, "connection://AMAZON.VerifyPerson/2");
        assert_eq!(start.token, "token");
        let level = start.input.requested_authentication_confidence_level;
        assert_eq!(level.level, 400);
        assert_eq!(level.custom_policy.policy_name, "VOICE_PIN");
    }

    #[test]
    fn test_decision_table() {
        let config = VerificationConfig::default();
        let p = person("amzn1.ask.person.P");

        let outcome = VerificationOutcome::evaluate(&Cause::completed(200, "ACHIEVED"), Some(&p), &config).unwrap();
        assert_eq!(outcome, VerificationOutcome::Verified { person_id: "amzn1.ask.person.P".into() });
        assert_eq!(
            outcome.speech(),
            "<alexa:name type='first' personId='amzn1.ask.person.P'/>, you were verified and your driver will be arrived in 8 minutes."
        );

        let outcome = VerificationOutcome::evaluate(&Cause::completed(200, "NOT_ENABLED"), Some(&p), &config).unwrap();
        assert_eq!(outcome.speech(), COMPLETED_SPEECH);

        for status in ["DENIED", "TIMED_OUT", "SOMETHING_NEW"] {
            let outcome = VerificationOutcome::evaluate(&Cause::completed(200, status), Some(&p), &config).unwrap();
            assert_eq!(outcome, VerificationOutcome::Failed { status: status.into() });
            assert_eq!(outcome.speech(), VERIFICATION_FAILED_SPEECH);
        }
    }

    #[test]
    fn test_transport_failure_ignores_result() {
        let config = VerificationConfig::default();

        let outcome = VerificationOutcome::evaluate(&Cause::completed(500, "ACHIEVED"), None, &config).unwrap();
        assert_eq!(outcome, VerificationOutcome::TransportFailed);
        assert_eq!(outcome.speech(), TRANSPORT_FAILURE_SPEECH);

        // No result at all is fine on the failure path.
        let cause = Cause {
            status: Some(ConnectionStatus { code: Some(404), message: None }),
            ..Cause::default()
        };
        let outcome = VerificationOutcome::evaluate(&cause, None, &config).unwrap();
        assert_eq!(outcome, VerificationOutcome::TransportFailed);
    }

    #[test]
    fn test_missing_fields_are_errors() {
        let config = VerificationConfig::default();

        let err = VerificationOutcome::evaluate(&Cause::default(), None, &config).unwrap_err();
        assert!(matches!(err, SkillError::MissingField("request.cause.status")));

        let err = VerificationOutcome::evaluate(&Cause::completed(200, "ACHIEVED"), None, &config).unwrap_err();
        assert!(matches!(err, SkillError::MissingField("context.System.person")));

        let cause = Cause {
            status: Some(ConnectionStatus { code: Some(200), message: None }),
            ..Cause::default()
        };
        let err = VerificationOutcome::evaluate(&cause, None, &config).unwrap_err();
        assert!(matches!(err, SkillError::MissingField("request.cause.result")));
    }

    #[test]
    fn test_person_without_id() {
        let config = VerificationConfig::default();
        let anonymous = Person {
            person_id: None,
            access_token: None,
        };

        let err = VerificationOutcome::evaluate(&Cause::completed(200, "ACHIEVED"), Some(&anonymous), &config)
            .unwrap_err();
        assert!(matches!(err, SkillError::MissingField("context.System.person.personId")));

        // Only a verified person needs an id.
        for (code, expected) in [
            (500, VerificationOutcome::TransportFailed),
            (200, VerificationOutcome::NotEnabled),
        ] {
            let cause = Cause::completed(code, if code == 200 { "NOT_ENABLED" } else { "ACHIEVED" });
            let outcome = VerificationOutcome::evaluate(&cause, Some(&anonymous), &config).unwrap();
            assert_eq!(outcome, expected);
        }
    }

    #[test]
    fn test_result_without_status_is_failure() {
        let config = VerificationConfig::default();
        let cause = Cause {
            status: Some(ConnectionStatus { code: Some(200), message: None }),
            result: Some(TaskResult::default()),
            ..Cause::default()
        };

        let outcome = VerificationOutcome::evaluate(&cause, None, &config).unwrap();
        assert_eq!(outcome, VerificationOutcome::Failed { status: String::new() });
        assert_eq!(outcome.speech(), VERIFICATION_FAILED_SPEECH);
    }

    #[test]
    fn test_token_enforcement() {
        let p = person("P");
        let lax = VerificationConfig::default();
        let strict = VerificationConfig {
            enforce_token: true,
            ..VerificationConfig::default()
        };

        let foreign = Cause::completed(200, "ACHIEVED").with_token("other");
        assert!(lax.accepts_token(&foreign));
        assert!(!strict.accepts_token(&foreign));
        assert_eq!(
            VerificationOutcome::evaluate(&foreign, Some(&p), &strict).unwrap(),
            VerificationOutcome::TransportFailed
        );

        let missing = Cause::completed(200, "ACHIEVED");
        assert!(!strict.accepts_token(&missing));

        let ours = Cause::completed(200, "ACHIEVED").with_token("token");
        assert!(matches!(
            VerificationOutcome::evaluate(&ours, Some(&p), &strict).unwrap(),
            VerificationOutcome::Verified { .. }
        ));
    }
}
