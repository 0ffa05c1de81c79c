//! Lifecycle management subsystem.
//!
//! # Data Flow
//! ```text
//! Ctrl+C / test harness
//!     → Shutdown::trigger()
//!     → server stops accepting, drains in-flight invocations, exits
//! ```

pub mod shutdown;

pub use shutdown::Shutdown;
