//! Outbound response envelope.

use serde::{Deserialize, Serialize};

/// Version string every response envelope carries.
pub const RESPONSE_VERSION: &str = "1.0";

/// Envelope returned to the voice platform.
#[derive(Debug, Clone, Deserialize, Serialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct ResponseEnvelope {
    pub version: String,
    pub response: Response,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub session_attributes: Option<serde_json::Map<String, serde_json::Value>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub user_agent: Option<String>,
}

impl ResponseEnvelope {
    pub fn new(response: Response, user_agent: impl Into<String>) -> Self {
        Self {
            version: RESPONSE_VERSION.to_string(),
            response,
            session_attributes: None,
            user_agent: Some(user_agent.into()),
        }
    }
}

/// What the device says, shows and does next.
#[derive(Debug, Clone, Default, Deserialize, Serialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Response {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub output_speech: Option<OutputSpeech>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub reprompt: Option<Reprompt>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub directives: Option<Vec<Directive>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub should_end_session: Option<bool>,
}

impl Response {
    /// Spoken text with any `<speak>` wrapper removed.
    pub fn speech(&self) -> Option<&str> {
        self.output_speech.as_ref().map(OutputSpeech::text)
    }

    /// Reprompt text with any `<speak>` wrapper removed.
    pub fn reprompt_speech(&self) -> Option<&str> {
        self.reprompt.as_ref().map(|r| r.output_speech.text())
    }

    pub fn directives(&self) -> &[Directive] {
        self.directives.as_deref().unwrap_or_default()
    }

    /// True when the platform is asked to keep listening.
    pub fn keeps_session_open(&self) -> bool {
        self.should_end_session == Some(false)
    }
}

#[derive(Debug, Clone, Deserialize, Serialize, PartialEq)]
#[serde(tag = "type")]
pub enum OutputSpeech {
    #[serde(rename = "SSML")]
    Ssml { ssml: String },
    #[serde(rename = "PlainText")]
    PlainText { text: String },
}

impl OutputSpeech {
    /// Wrap text as SSML.
    pub fn ssml(text: &str) -> Self {
        OutputSpeech::Ssml {
            ssml: format!("<speak>{}</speak>", text),
        }
    }

    pub fn text(&self) -> &str {
        match self {
            OutputSpeech::Ssml { ssml } => ssml
                .strip_prefix("<speak>")
                .and_then(|inner| inner.strip_suffix("</speak>"))
                .unwrap_or(ssml),
            OutputSpeech::PlainText { text } => text,
        }
    }
}

#[derive(Debug, Clone, Deserialize, Serialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Reprompt {
    pub output_speech: OutputSpeech,
}

/// Side-channel instructions for the host platform.
#[derive(Debug, Clone, Deserialize, Serialize, PartialEq)]
#[serde(tag = "type")]
pub enum Directive {
    /// Hand the dialog to an external connection (e.g. identity verification).
    #[serde(rename = "Connections.StartConnection")]
    StartConnection(StartConnection),
}

#[derive(Debug, Clone, Deserialize, Serialize, PartialEq)]
pub struct StartConnection {
    pub uri: String,
    pub input: VerifyPersonInput,
    pub token: String,
}

#[derive(Debug, Clone, Deserialize, Serialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct VerifyPersonInput {
    pub requested_authentication_confidence_level: ConfidenceLevel,
}

#[derive(Debug, Clone, Deserialize, Serialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct ConfidenceLevel {
    pub level: u32,
    pub custom_policy: CustomPolicy,
}

#[derive(Debug, Clone, Deserialize, Serialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct CustomPolicy {
    pub policy_name: String,
}
