//! HTTP handlers for the mentor service.

pub mod health;
pub mod mentor;

pub use health::{health_check, metrics_endpoint, readiness_check};
pub use mentor::career_mentor;
