//! Voice platform wire types.
//!
//! # Data Flow
//! ```text
//! JSON body
//!     → request.rs (RequestEnvelope, tagged Request)
//!     → [skill pipeline]
//!     → builder.rs (ResponseBuilder)
//!     → response.rs (ResponseEnvelope)
//!     → JSON body
//! ```
//!
//! # Design Decisions
//! - Only fields the skill reads are typed; unknown fields are ignored
//! - Unknown request kinds deserialize to `Request::Unknown` instead of failing
//! - Speech is always emitted as SSML

pub mod builder;
pub mod request;
pub mod response;

pub use builder::ResponseBuilder;
pub use request::{Cause, ConnectionStatus, Request, RequestEnvelope, TaskResult};
pub use response::{Directive, OutputSpeech, Response, ResponseEnvelope};
