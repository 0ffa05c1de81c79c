//! Fluent construction of responses.

use crate::envelope::response::{Directive, OutputSpeech, Reprompt, Response};

/// Accumulates speech, reprompt and directives into a [`Response`].
#[derive(Debug, Default)]
pub struct ResponseBuilder {
    response: Response,
}

impl ResponseBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the spoken output. The text is wrapped as SSML.
    pub fn speak(mut self, text: &str) -> Self {
        self.response.output_speech = Some(OutputSpeech::ssml(text));
        self
    }

    /// Set the reprompt and keep the session open.
    pub fn reprompt(mut self, text: &str) -> Self {
        self.response.reprompt = Some(Reprompt {
            output_speech: OutputSpeech::ssml(text),
        });
        self.response.should_end_session = Some(false);
        self
    }

    pub fn add_directive(mut self, directive: Directive) -> Self {
        self.response
            .directives
            .get_or_insert_with(Vec::new)
            .push(directive);
        self
    }

    pub fn with_should_end_session(mut self, end: bool) -> Self {
        self.response.should_end_session = Some(end);
        self
    }

    pub fn get_response(self) -> Response {
        self.response
    }
}
