//! Seattle taxi voice skill backend.

pub mod config;
pub mod envelope;
pub mod http;
pub mod lifecycle;
pub mod observability;
pub mod skill;

pub use config::SkillConfig;
pub use http::HttpServer;
pub use lifecycle::Shutdown;
pub use skill::{Skill, SkillBuilder, SkillError};
