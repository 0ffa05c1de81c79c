//! Diagnostic interceptors that record the full request and response.

use serde::Serialize;

use crate::envelope::Response;
use crate::skill::handler::{HandlerInput, RequestInterceptor, ResponseInterceptor};

/// Logs the serialized request envelope.
#[derive(Debug, Clone, Copy, Default)]
pub struct LogRequestInterceptor;

impl RequestInterceptor for LogRequestInterceptor {
    fn process(&self, input: &HandlerInput<'_>) {
        tracing::info!(
            request_type = input.request_type(),
            payload = %pretty(input.envelope),
            "======== Request =========="
        );
    }
}

/// Logs the serialized response.
#[derive(Debug, Clone, Copy, Default)]
pub struct LogResponseInterceptor;

impl ResponseInterceptor for LogResponseInterceptor {
    fn process(&self, input: &HandlerInput<'_>, response: &Response) {
        tracing::info!(
            request_type = input.request_type(),
            payload = %pretty(response),
            "======== Response =========="
        );
    }
}

fn pretty<T: Serialize>(value: &T) -> String {
    serde_json::to_string_pretty(value)
        .unwrap_or_else(|e| format!("<unserializable: {}>", e))
}
