//! Observability subsystem.
//!
//! # Data Flow
//! ```text
//! Skill pipeline and HTTP layer produce:
//!     → logging.rs (structured log events, request/response payloads)
//!     → metrics.rs (counters, histograms)
//!
//! Consumers:
//!     → Log aggregation (stdout)
//!     → Metrics endpoint (Prometheus scrape)
//! ```

pub mod logging;
pub mod metrics;
