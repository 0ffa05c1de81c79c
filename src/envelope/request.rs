//! Inbound request envelope.
//!
//! Mirrors the voice platform's camelCase JSON schema. Only the fields the
//! skill reads are typed; everything else is ignored on deserialization.

use std::collections::BTreeMap;

use serde::{Deserialize, Deserializer, Serialize};

/// Root envelope delivered by the voice platform for every invocation.
#[derive(Debug, Clone, Deserialize, Serialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct RequestEnvelope {
    #[serde(default = "default_version")]
    pub version: String,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub session: Option<Session>,

    #[serde(default)]
    pub context: Context,

    pub request: Request,
}

fn default_version() -> String {
    "1.0".to_string()
}

impl RequestEnvelope {
    /// Wrap a request in an envelope with an empty context.
    pub fn new(request: Request) -> Self {
        Self {
            version: default_version(),
            session: None,
            context: Context::default(),
            request,
        }
    }

    /// Attach a verified person to `context.System.person`.
    pub fn with_person(mut self, person_id: impl Into<String>) -> Self {
        self.context.system.person = Some(Person {
            person_id: Some(person_id.into()),
            access_token: None,
        });
        self
    }

    /// Set the application id on `context.System.application`.
    pub fn with_application_id(mut self, application_id: impl Into<String>) -> Self {
        self.context.system.application = Some(Application {
            application_id: application_id.into(),
        });
        self
    }

    /// The application id the platform addressed, preferring the context
    /// over the session.
    pub fn application_id(&self) -> Option<&str> {
        self.context
            .system
            .application
            .as_ref()
            .or_else(|| self.session.as_ref().and_then(|s| s.application.as_ref()))
            .map(|app| app.application_id.as_str())
    }

    /// The verified person, if the platform recognized one.
    pub fn person(&self) -> Option<&Person> {
        self.context.system.person.as_ref()
    }
}

/// Session block. Attributes are carried opaquely.
#[derive(Debug, Clone, Default, Deserialize, Serialize, PartialEq)]
#[serde(rename_all = "camelCase", default)]
pub struct Session {
    pub new: bool,
    pub session_id: String,
    pub application: Option<Application>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub attributes: Option<serde_json::Map<String, serde_json::Value>>,
    pub user: Option<User>,
}

#[derive(Debug, Clone, Default, Deserialize, Serialize, PartialEq)]
pub struct Context {
    #[serde(rename = "System", default)]
    pub system: SystemContext,
}

#[derive(Debug, Clone, Default, Deserialize, Serialize, PartialEq)]
#[serde(rename_all = "camelCase", default)]
pub struct SystemContext {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub application: Option<Application>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub user: Option<User>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub person: Option<Person>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub api_endpoint: Option<String>,
}

#[derive(Debug, Clone, Deserialize, Serialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Application {
    pub application_id: String,
}

#[derive(Debug, Clone, Deserialize, Serialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct User {
    pub user_id: String,
}

/// A person recognized (and possibly verified) by the platform.
#[derive(Debug, Clone, Deserialize, Serialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Person {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub person_id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub access_token: Option<String>,
}

/// The request kinds this skill understands, tagged by `type`.
#[derive(Debug, Clone, Deserialize, Serialize, PartialEq)]
#[serde(tag = "type")]
pub enum Request {
    LaunchRequest(LaunchRequest),
    IntentRequest(IntentRequest),
    SessionResumedRequest(SessionResumedRequest),
    SessionEndedRequest(SessionEndedRequest),
    /// Any request type the skill does not model.
    #[serde(other)]
    Unknown,
}

impl Request {
    /// Platform name of the request kind.
    pub fn request_type(&self) -> &'static str {
        match self {
            Request::LaunchRequest(_) => "LaunchRequest",
            Request::IntentRequest(_) => "IntentRequest",
            Request::SessionResumedRequest(_) => "SessionResumedRequest",
            Request::SessionEndedRequest(_) => "SessionEndedRequest",
            Request::Unknown => "Unknown",
        }
    }

    /// Intent name for an IntentRequest.
    pub fn intent_name(&self) -> Option<&str> {
        match self {
            Request::IntentRequest(req) => Some(req.intent.name.as_str()),
            _ => None,
        }
    }

    pub fn launch() -> Self {
        Request::LaunchRequest(LaunchRequest::default())
    }

    pub fn intent(name: impl Into<String>) -> Self {
        Request::IntentRequest(IntentRequest {
            common: RequestCommon::default(),
            dialog_state: None,
            intent: Intent {
                name: name.into(),
                confirmation_status: None,
                slots: BTreeMap::new(),
            },
        })
    }

    pub fn session_resumed(cause: Cause) -> Self {
        Request::SessionResumedRequest(SessionResumedRequest {
            common: RequestCommon::default(),
            cause: Some(cause),
        })
    }

    pub fn session_ended(reason: Option<String>) -> Self {
        Request::SessionEndedRequest(SessionEndedRequest {
            common: RequestCommon::default(),
            reason,
            error: None,
        })
    }
}

/// Fields every request kind carries.
#[derive(Debug, Clone, Default, Deserialize, Serialize, PartialEq)]
#[serde(rename_all = "camelCase", default)]
pub struct RequestCommon {
    pub request_id: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub timestamp: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub locale: Option<String>,
}

#[derive(Debug, Clone, Default, Deserialize, Serialize, PartialEq)]
pub struct LaunchRequest {
    #[serde(flatten)]
    pub common: RequestCommon,
}

#[derive(Debug, Clone, Deserialize, Serialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct IntentRequest {
    #[serde(flatten)]
    pub common: RequestCommon,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub dialog_state: Option<String>,
    pub intent: Intent,
}

#[derive(Debug, Clone, Deserialize, Serialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Intent {
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub confirmation_status: Option<String>,
    #[serde(default)]
    pub slots: BTreeMap<String, Slot>,
}

impl Intent {
    /// Value of a filled slot.
    pub fn slot_value(&self, name: &str) -> Option<&str> {
        self.slots.get(name).and_then(|slot| slot.value.as_deref())
    }
}

#[derive(Debug, Clone, Deserialize, Serialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Slot {
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub value: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub confirmation_status: Option<String>,
}

/// Callback delivered once an out-of-band connection completes.
#[derive(Debug, Clone, Deserialize, Serialize, PartialEq)]
pub struct SessionResumedRequest {
    #[serde(flatten)]
    pub common: RequestCommon,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub cause: Option<Cause>,
}

/// Outcome of the connection, as reported by the platform.
#[derive(Debug, Clone, Default, Deserialize, Serialize, PartialEq)]
#[serde(default)]
pub struct Cause {
    #[serde(rename = "type", skip_serializing_if = "Option::is_none")]
    pub kind: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub token: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub status: Option<ConnectionStatus>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub result: Option<TaskResult>,
}

impl Cause {
    /// Build a completed-connection cause with the given code and task status.
    pub fn completed(code: u16, task_status: impl Into<String>) -> Self {
        Self {
            kind: Some("ConnectionCompleted".to_string()),
            token: None,
            status: Some(ConnectionStatus {
                code: Some(code),
                message: None,
            }),
            result: Some(TaskResult {
                status: task_status.into(),
            }),
        }
    }

    pub fn with_token(mut self, token: impl Into<String>) -> Self {
        self.token = Some(token.into());
        self
    }
}

/// Transport-level status of the connection.
#[derive(Debug, Clone, Deserialize, Serialize, PartialEq)]
pub struct ConnectionStatus {
    /// Sent as `"200"` by the platform; numbers are accepted too. `None`
    /// when the value is not a number at all.
    #[serde(default, deserialize_with = "deserialize_status_code")]
    pub code: Option<u16>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
}

impl ConnectionStatus {
    pub fn is_ok(&self) -> bool {
        self.code == Some(200)
    }
}

/// Result of the task run inside the connection. An absent status reads as
/// empty and matches no known outcome.
#[derive(Debug, Clone, Default, Deserialize, Serialize, PartialEq)]
pub struct TaskResult {
    #[serde(default)]
    pub status: String,
}

#[derive(Debug, Clone, Default, Deserialize, Serialize, PartialEq)]
pub struct SessionEndedRequest {
    #[serde(flatten)]
    pub common: RequestCommon,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub reason: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<SessionEndedError>,
}

#[derive(Debug, Clone, Deserialize, Serialize, PartialEq)]
pub struct SessionEndedError {
    #[serde(rename = "type")]
    pub kind: String,
    #[serde(default)]
    pub message: String,
}

fn deserialize_status_code<'de, D>(deserializer: D) -> Result<Option<u16>, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum Code {
        Number(u64),
        Text(String),
        Other(serde::de::IgnoredAny),
    }

    Ok(match Code::deserialize(deserializer)? {
        Code::Number(n) => u16::try_from(n).ok(),
        Code::Text(s) => s.trim().parse().ok(),
        Code::Other(_) => None,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_intent_request_from_platform_json() {
        let json = r#"{
            "version": "1.0",
            "session": {
                "new": false,
                "sessionId": "amzn1.echo-api.session.1",
                "application": { "applicationId": "amzn1.ask.skill.taxi" },
                "user": { "userId": "amzn1.ask.account.A" }
            },
            "context": {
                "System": {
                    "application": { "applicationId": "amzn1.ask.skill.taxi" },
                    "user": { "userId": "amzn1.ask.account.A" },
                    "apiEndpoint": "https://api.amazonalexa.com"
                }
            },
            "request": {
                "type": "IntentRequest",
                "requestId": "amzn1.echo-api.request.1",
                "timestamp": "2026-10-19T08:00:00Z",
                "locale": "en-US",
                "dialogState": "COMPLETED",
                "intent": {
                    "name": "SpaceNeedleOrderIntent",
                    "confirmationStatus": "NONE",
                    "slots": {
                        "destination": { "name": "destination", "value": "space needle" }
                    }
                }
            }
        }"#;

        let envelope: RequestEnvelope = serde_json::from_str(json).unwrap();
        assert_eq!(envelope.request.request_type(), "IntentRequest");
        assert_eq!(envelope.request.intent_name(), Some("SpaceNeedleOrderIntent"));
        assert_eq!(envelope.application_id(), Some("amzn1.ask.skill.taxi"));
        assert!(envelope.person().is_none());

        match &envelope.request {
            Request::IntentRequest(req) => {
                assert_eq!(req.common.request_id, "amzn1.echo-api.request.1");
                assert_eq!(req.intent.slot_value("destination"), Some("space needle"));
                assert_eq!(req.intent.slot_value("origin"), None);
            }
            other => panic!("unexpected request {:?}", other),
        }
    }

    #[test]
    fn test_session_resumed_string_code() {
        let json = r#"{
            "context": { "System": { "person": { "personId": "amzn1.ask.person.P" } } },
            "request": {
                "type": "SessionResumedRequest",
                "requestId": "r2",
                "cause": {
                    "type": "ConnectionCompleted",
                    "token": "token",
                    "status": { "code": "200", "message": "OK" },
                    "result": { "status": "ACHIEVED" }
                }
            }
        }"#;

        let envelope: RequestEnvelope = serde_json::from_str(json).unwrap();
        assert_eq!(envelope.person().and_then(|p| p.person_id.as_deref()), Some("amzn1.ask.person.P"));

        let Request::SessionResumedRequest(req) = &envelope.request else {
            panic!("expected SessionResumedRequest");
        };
        let cause = req.cause.as_ref().unwrap();
        assert!(cause.status.as_ref().unwrap().is_ok());
        assert_eq!(cause.token.as_deref(), Some("token"));
        assert_eq!(cause.result.as_ref().unwrap().status, "ACHIEVED");
    }

    #[test]
    fn test_sparse_person_and_result() {
        let json = r#"{
            "context": { "System": { "person": {} } },
            "request": {
                "type": "SessionResumedRequest",
                "requestId": "r5",
                "cause": { "status": { "code": "500" }, "result": {} }
            }
        }"#;

        let envelope: RequestEnvelope = serde_json::from_str(json).unwrap();
        let person = envelope.person().unwrap();
        assert_eq!(person.person_id, None);

        let Request::SessionResumedRequest(req) = &envelope.request else {
            panic!("expected SessionResumedRequest");
        };
        let cause = req.cause.as_ref().unwrap();
        assert_eq!(cause.status.as_ref().unwrap().code, Some(500));
        assert_eq!(cause.result.as_ref().unwrap().status, "");
    }

    #[test]
    fn test_status_code_variants() {
        let numeric: ConnectionStatus = serde_json::from_str(r#"{"code": 500}"#).unwrap();
        assert_eq!(numeric.code, Some(500));
        assert!(!numeric.is_ok());

        let garbage: ConnectionStatus = serde_json::from_str(r#"{"code": "abc"}"#).unwrap();
        assert_eq!(garbage.code, None);
        assert!(!garbage.is_ok());

        let missing: ConnectionStatus = serde_json::from_str(r#"{"message": "x"}"#).unwrap();
        assert_eq!(missing.code, None);
    }

    #[test]
    fn test_unknown_request_type() {
        let json = r#"{ "request": { "type": "CanFulfillIntentRequest", "requestId": "r3" } }"#;
        let envelope: RequestEnvelope = serde_json::from_str(json).unwrap();
        assert_eq!(envelope.request, Request::Unknown);
        assert_eq!(envelope.request.intent_name(), None);
    }

    #[test]
    fn test_session_ended_with_error() {
        let json = r#"{
            "request": {
                "type": "SessionEndedRequest",
                "requestId": "r4",
                "reason": "ERROR",
                "error": { "type": "INVALID_RESPONSE", "message": "bad ssml" }
            }
        }"#;
        let envelope: RequestEnvelope = serde_json::from_str(json).unwrap();
        let Request::SessionEndedRequest(req) = envelope.request else {
            panic!("expected SessionEndedRequest");
        };
        assert_eq!(req.reason.as_deref(), Some("ERROR"));
        assert_eq!(req.error.unwrap().kind, "INVALID_RESPONSE");
    }

    #[test]
    fn test_application_id_falls_back_to_session() {
        let mut envelope = RequestEnvelope::new(Request::launch());
        assert_eq!(envelope.application_id(), None);

        envelope.session = Some(Session {
            application: Some(Application { application_id: "from-session".into() }),
            ..Session::default()
        });
        assert_eq!(envelope.application_id(), Some("from-session"));

        let envelope = envelope.with_application_id("from-context");
        assert_eq!(envelope.application_id(), Some("from-context"));
    }
}
