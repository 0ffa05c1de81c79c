//! HTTP host subsystem.
//!
//! # Data Flow
//! ```text
//! TCP connection
//!     → server.rs (Axum setup, middleware)
//!     → request.rs (request ID, tracing span)
//!     → JSON RequestEnvelope
//!     → skill pipeline
//!     → JSON ResponseEnvelope
//!     → Send to platform
//! ```

pub mod request;
pub mod server;

pub use request::{MakeInvocationId, X_REQUEST_ID};
pub use server::{AppState, HttpServer};
