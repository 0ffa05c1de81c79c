//! Shared fixtures for integration tests.

#![allow(dead_code)]

use std::net::SocketAddr;
use std::sync::{Arc, Mutex};

use serde_json::{json, Value};
use tokio::net::TcpListener;

use seattle_taxi_skill::envelope::Response;
use seattle_taxi_skill::skill::{
    HandlerInput, RequestHandler, RequestInterceptor, ResponseInterceptor, SkillError,
    SkillResult, TaxiHandler,
};
use seattle_taxi_skill::{HttpServer, Shutdown, SkillConfig};

pub const PERSON_ID: &str = "amzn1.ask.person.ABCDEF";
pub const SKILL_ID: &str = "amzn1.ask.skill.seattle-taxi";

/// Request envelope JSON as the platform sends it.
pub fn platform_envelope(request: Value) -> Value {
    json!({
        "version": "1.0",
        "session": {
            "new": false,
            "sessionId": "amzn1.echo-api.session.test",
            "application": { "applicationId": SKILL_ID },
            "user": { "userId": "amzn1.ask.account.test" }
        },
        "context": {
            "System": {
                "application": { "applicationId": SKILL_ID },
                "user": { "userId": "amzn1.ask.account.test" },
                "person": { "personId": PERSON_ID },
                "apiEndpoint": "https://api.amazonalexa.com"
            }
        },
        "request": request
    })
}

pub fn launch_json() -> Value {
    platform_envelope(json!({
        "type": "LaunchRequest",
        "requestId": "amzn1.echo-api.request.launch",
        "timestamp": "2026-10-19T08:00:00Z",
        "locale": "en-US"
    }))
}

pub fn intent_json(name: &str) -> Value {
    platform_envelope(json!({
        "type": "IntentRequest",
        "requestId": "amzn1.echo-api.request.intent",
        "timestamp": "2026-10-19T08:00:00Z",
        "locale": "en-US",
        "intent": { "name": name, "confirmationStatus": "NONE" }
    }))
}

pub fn resumed_json(code: &str, status: &str) -> Value {
    platform_envelope(json!({
        "type": "SessionResumedRequest",
        "requestId": "amzn1.echo-api.request.resumed",
        "timestamp": "2026-10-19T08:01:00Z",
        "locale": "en-US",
        "originIpAddress": "10.0.0.1",
        "cause": {
            "type": "ConnectionCompleted",
            "token": "token",
            "status": { "code": code, "message": "OK" },
            "result": { "status": status }
        }
    }))
}

/// Start the HTTP server on an ephemeral port.
pub async fn start_server(config: SkillConfig) -> (SocketAddr, Shutdown) {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();

    let shutdown = Shutdown::new();
    let server = HttpServer::new(config);
    let server_shutdown = shutdown.subscribe();
    tokio::spawn(async move {
        let _ = server.run(listener, server_shutdown).await;
    });

    (addr, shutdown)
}

/// Taxi handlers plus a handler that always fails.
pub enum TestHandler {
    Taxi(TaxiHandler),
    Failing(&'static str),
}

impl RequestHandler for TestHandler {
    fn name(&self) -> &'static str {
        match self {
            TestHandler::Taxi(h) => h.name(),
            TestHandler::Failing(_) => "failing",
        }
    }

    fn can_handle(&self, input: &HandlerInput<'_>) -> bool {
        match self {
            TestHandler::Taxi(h) => h.can_handle(input),
            TestHandler::Failing(intent) => input.intent_name() == Some(*intent),
        }
    }

    fn handle(&self, input: &HandlerInput<'_>) -> SkillResult<Response> {
        match self {
            TestHandler::Taxi(h) => h.handle(input),
            TestHandler::Failing(_) => Err(SkillError::Handler {
                handler: "failing",
                reason: "downstream exploded".into(),
            }),
        }
    }
}

/// Records what the interceptors saw.
#[derive(Clone, Default)]
pub struct Recorder {
    pub events: Arc<Mutex<Vec<String>>>,
}

impl Recorder {
    pub fn events(&self) -> Vec<String> {
        self.events.lock().unwrap().clone()
    }
}

impl RequestInterceptor for Recorder {
    fn process(&self, input: &HandlerInput<'_>) {
        self.events
            .lock()
            .unwrap()
            .push(format!("request:{}", input.request_type()));
    }
}

impl ResponseInterceptor for Recorder {
    fn process(&self, _input: &HandlerInput<'_>, response: &Response) {
        self.events
            .lock()
            .unwrap()
            .push(format!("response:{}", response.speech().unwrap_or("")));
    }
}
